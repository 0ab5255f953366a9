//! Ledgerline regenerator
//!
//! Loads charges and exchange rates from a JSON fixture, regenerates the ledger records of
//! every charge and prints the per-charge report as JSON.
//!
//! Usage: regenerator [FIXTURE] (default: fixtures/charges.json)

use std::sync::Arc;

use anyhow::Context;
use serde_json::{Value, json};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ledgerline_core::context::AdminContext;
use ledgerline_core::engine::{BatchReport, Fixture, LedgerEngine};
use ledgerline_shared::AppConfig;

const DEFAULT_FIXTURE: &str = "fixtures/charges.json";

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ledgerline=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;
    let context =
        AdminContext::from_config(&config.admin).context("Invalid admin configuration")?;

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_FIXTURE.to_string());
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read fixture {path}"))?;
    let fixture = Fixture::from_json(&json).with_context(|| format!("Invalid fixture {path}"))?;

    let (store, rates) = fixture.into_parts(context);
    info!(path = %path, rates = rates.len(), "Loaded fixture");

    let store = Arc::new(store);
    let engine = LedgerEngine::new(
        &config.engine,
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::clone(&store),
        rates,
    )?;

    let charge_ids = store.charge_ids();
    info!(
        charges = charge_ids.len(),
        workers = config.engine.worker_threads,
        "Regenerating ledger records"
    );
    let report = engine.regenerate_all(&charge_ids);

    if !report.failed.is_empty() {
        warn!(
            failed = report.failed.len(),
            retryable = report.retryable().len(),
            "Some charges were not regenerated"
        );
    }

    println!("{}", serde_json::to_string_pretty(&summary(&report))?);
    Ok(())
}

fn summary(report: &BatchReport) -> Value {
    let succeeded: Vec<_> = report
        .succeeded
        .iter()
        .map(|ledger| {
            json!({
                "charge_id": ledger.charge_id,
                "charge_type": ledger.charge_type,
                "records": ledger.records,
                "skipped": ledger.errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
            })
        })
        .collect();

    let failed: Vec<_> = report
        .failed
        .iter()
        .map(|failure| {
            json!({
                "charge_id": failure.charge_id,
                "charge_type": failure.charge_type,
                "error_code": failure.error_code(),
                "retryable": failure.is_retryable(),
                "errors": failure.errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
            })
        })
        .collect();

    json!({
        "total": report.total(),
        "records": report.record_count(),
        "partial": report.partial().count(),
        "succeeded": succeeded,
        "failed": failed,
    })
}

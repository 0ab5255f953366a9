//! Application configuration management.

use serde::Deserialize;

use crate::types::{BusinessId, Currency, FinancialEntityId};

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Ledger engine configuration.
    #[serde(default)]
    pub engine: EngineConfig,
    /// Admin (bookkeeping) configuration of the owning organization.
    pub admin: AdminConfig,
}

/// What to do with records of a charge whose generator reported per-transaction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartialPolicy {
    /// Persist the records that were generated and report the errors alongside.
    #[default]
    Persist,
    /// Treat any per-transaction error as a failure of the whole charge.
    Reject,
}

/// Ledger engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Size of the worker pool used for batch regeneration.
    #[serde(default = "default_worker_threads")]
    pub worker_threads: usize,
    /// Maximum number of cached exchange rates.
    #[serde(default = "default_rate_cache_capacity")]
    pub rate_cache_capacity: u64,
    /// Time-to-live for cached exchange rates, in seconds.
    #[serde(default = "default_rate_cache_ttl")]
    pub rate_cache_ttl_secs: u64,
    /// Handling of partially generated charges.
    #[serde(default)]
    pub partial_policy: PartialPolicy,
}

fn default_worker_threads() -> usize {
    4
}

fn default_rate_cache_capacity() -> u64 {
    10_000
}

fn default_rate_cache_ttl() -> u64 {
    3600 // 1 hour
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            worker_threads: default_worker_threads(),
            rate_cache_capacity: default_rate_cache_capacity(),
            rate_cache_ttl_secs: default_rate_cache_ttl(),
            partial_policy: PartialPolicy::default(),
        }
    }
}

/// Bookkeeping configuration as stored by the operator.
///
/// The ledger engine validates this into an `AdminContext` before use.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Currency local amounts are kept in.
    #[serde(default = "default_local_currency")]
    pub default_local_currency: Currency,
    /// The organization's own business.
    pub default_admin_business_id: BusinessId,
    /// Businesses representing the organization's own wallets and accounts.
    #[serde(default)]
    pub internal_wallets_ids: Vec<BusinessId>,
    /// Credit-card account businesses.
    #[serde(default)]
    pub credit_card_ids: Vec<BusinessId>,
    /// Businesses dividends are paid through.
    #[serde(default)]
    pub dividend_business_ids: Vec<BusinessId>,
    /// Tax authority dividend withholding tax is paid to.
    #[serde(default)]
    pub dividend_withholding_tax_business_id: Option<BusinessId>,
    /// Bank deposit business.
    #[serde(default)]
    pub bank_deposit_business_id: Option<BusinessId>,
    /// VAT authority business.
    #[serde(default)]
    pub vat_business_id: Option<BusinessId>,
    /// Fee counterparties whose fees fold into the adjoining main entry.
    #[serde(default)]
    pub supplemental_fee_business_ids: Vec<BusinessId>,
    /// Fee counterparties whose fees get their own ledger row.
    #[serde(default)]
    pub fundamental_fee_business_ids: Vec<BusinessId>,
    /// Tax category for VAT on purchases.
    #[serde(default)]
    pub input_vat_tax_category_id: Option<FinancialEntityId>,
    /// Tax category for VAT on sales.
    #[serde(default)]
    pub output_vat_tax_category_id: Option<FinancialEntityId>,
    /// Tax category for exchange-rate differences.
    #[serde(default)]
    pub exchange_rate_tax_category_id: Option<FinancialEntityId>,
    /// Tax category for bank deposit interest.
    #[serde(default)]
    pub bank_deposit_interest_tax_category_id: Option<FinancialEntityId>,
}

fn default_local_currency() -> Currency {
    Currency::Ils
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("LEDGERLINE")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("admin.internal_wallets_ids")
                    .with_list_parse_key("admin.credit_card_ids")
                    .with_list_parse_key("admin.dividend_business_ids")
                    .with_list_parse_key("admin.supplemental_fee_business_ids")
                    .with_list_parse_key("admin.fundamental_fee_business_ids")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

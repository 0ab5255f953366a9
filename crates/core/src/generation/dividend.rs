//! Dividend charges: payments and withholding tax, other transactions reported per transaction.

use super::draft::build_all;
use super::transactions::transaction_draft;
use super::types::{GenerationInput, GeneratorOutput};
use crate::error::GenerationError;

/// Generates the ledger of a dividend charge.
///
/// Transactions with the withholding-tax authority or a dividend business produce records;
/// every other transaction is reported as `NotDividendTransaction` and skipped, so the output
/// may be partial.
///
/// # Errors
///
/// Returns `MissingConfiguration` if no withholding-tax business is configured, or a
/// conversion error of a generated record.
pub fn generate(input: &GenerationInput<'_>) -> Result<GeneratorOutput, GenerationError> {
    let withholding_tax = input.require(
        input.context.dividend_withholding_tax_business_id,
        "dividend_withholding_tax_business_id",
    )?;

    let mut drafts = Vec::new();
    let mut errors = Vec::new();
    for transaction in &input.snapshot.transactions {
        match transaction.business_id {
            Some(business) if business == withholding_tax => {
                drafts.push(transaction_draft(transaction, business, "Dividend withholding tax"));
            }
            Some(business) if input.context.is_dividend_business(business) => {
                drafts.push(transaction_draft(transaction, business, "Dividend"));
            }
            _ => errors.push(GenerationError::NotDividendTransaction {
                transaction_id: transaction.id,
            }),
        }
    }

    Ok(GeneratorOutput {
        records: build_all(drafts, input)?,
        errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::fixtures::Scenario;
    use crate::ledger::LedgerSlot;
    use ledgerline_shared::types::{BusinessId, Currency};
    use rust_decimal_macros::dec;

    fn scenario() -> (Scenario, BusinessId, BusinessId) {
        let mut s = Scenario::new();
        let payer = BusinessId::new();
        let authority = BusinessId::new();
        s.context = s.context.with_dividends([payer], Some(authority));
        (s, payer, authority)
    }

    #[test]
    fn test_requires_withholding_tax_business() {
        let mut s = Scenario::new();
        s.tx(Some(BusinessId::new()), dec!(1000), Currency::Usd);
        assert!(matches!(
            s.run(generate).unwrap_err(),
            GenerationError::MissingConfiguration {
                field: "dividend_withholding_tax_business_id",
                ..
            }
        ));
    }

    #[test]
    fn test_payment_and_withholding_tax() {
        let (mut s, payer, authority) = scenario();
        s.tx(Some(payer), dec!(750), Currency::Ils);
        s.tx(Some(authority), dec!(250), Currency::Ils);

        let output = s.run(generate).unwrap();
        assert!(!output.is_partial());
        assert_eq!(output.records.len(), 2);
        assert_eq!(output.records[0].credit1, LedgerSlot::local(payer, dec!(750)));
        assert_eq!(output.records[0].description.as_deref(), Some("Dividend"));
        assert_eq!(output.records[1].credit1, LedgerSlot::local(authority, dec!(250)));
        assert_eq!(
            output.records[1].description.as_deref(),
            Some("Dividend withholding tax")
        );
    }

    #[test]
    fn test_other_transactions_are_collected() {
        let (mut s, payer, _) = scenario();
        s.tx(Some(payer), dec!(750), Currency::Ils);
        let stranger = s.tx(Some(BusinessId::new()), dec!(-20), Currency::Ils);
        let anonymous = s.tx(None, dec!(-1), Currency::Ils);

        let output = s.run(generate).unwrap();
        assert!(output.is_partial());
        assert_eq!(output.records.len(), 1);
        let messages: Vec<_> = output.errors.iter().map(ToString::to_string).collect();
        assert_eq!(
            messages,
            vec![
                format!("{stranger} is not a dividend transaction"),
                format!("{anonymous} is not a dividend transaction"),
            ]
        );
    }
}

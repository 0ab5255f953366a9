//! Business trip charges: payments plus expense records per trip category.

use super::draft::{RecordDraft, build_all};
use super::fees::{apply_fees, main_drafts};
use super::transactions::counterparty;
use super::types::{GenerationInput, GeneratorOutput};
use crate::charge::{BusinessTrip, Transaction, TripAllocation};
use crate::error::GenerationError;
use crate::split::split_fee;

/// Finds the single expense category a trip transaction is allocated to.
///
/// # Errors
///
/// Returns `UnallocatedTripTransaction` or `AmbiguousTripTransaction`.
pub fn allocation_of<'a>(
    trip: &'a BusinessTrip,
    transaction: &Transaction,
) -> Result<&'a TripAllocation, GenerationError> {
    let mut allocations = trip.allocations_of(transaction.id);
    let allocation = allocations
        .next()
        .ok_or(GenerationError::UnallocatedTripTransaction {
            transaction_id: transaction.id,
        })?;
    if allocations.next().is_some() {
        return Err(GenerationError::AmbiguousTripTransaction {
            transaction_id: transaction.id,
        });
    }
    Ok(allocation)
}

/// Generates the ledger of a business trip charge.
///
/// Records: one payment per main transaction, fees, then one expense record per main
/// transaction moving the amount from the counterparty to the category's tax category.
///
/// # Errors
///
/// Returns `MissingBusinessTrip` if the charge's trip was not loaded, allocation errors,
/// and fee or conversion errors.
pub fn generate(input: &GenerationInput<'_>) -> Result<GeneratorOutput, GenerationError> {
    let charge = input.charge();
    let trip = input
        .snapshot
        .business_trip
        .as_ref()
        .filter(|trip| Some(trip.id) == charge.business_trip_id)
        .ok_or(GenerationError::MissingBusinessTrip {
            charge_id: charge.id,
        })?;

    let split = split_fee(&input.snapshot.transactions);
    let expenses = split
        .main
        .iter()
        .map(|transaction| expense_draft(trip, transaction))
        .collect::<Result<Vec<_>, _>>()?;

    let mut drafts = main_drafts(&split.main, "Business trip payment", None)?;
    apply_fees(&mut drafts, &split.fee, input)?;
    drafts.extend(expenses);

    Ok(GeneratorOutput::from_records(build_all(drafts, input)?))
}

fn expense_draft(
    trip: &BusinessTrip,
    transaction: &Transaction,
) -> Result<RecordDraft, GenerationError> {
    let allocation = allocation_of(trip, transaction)?;
    let business = counterparty(transaction)?;
    Ok(RecordDraft::new(
        transaction.currency,
        Some(transaction.event_date),
        transaction.value_date(),
        transaction.rate_date(),
    )
    .leg(allocation.tax_category_id, -transaction.amount)
    .leg(business, transaction.amount)
    .with_description(format!(
        "Business trip {}: {}",
        trip.name,
        allocation.category.as_str()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charge::TripExpenseCategory;
    use crate::generation::fixtures::Scenario;
    use crate::ledger::LedgerSlot;
    use ledgerline_shared::types::{
        BusinessId, BusinessTripId, Currency, FinancialEntityId, TransactionId,
    };
    use rust_decimal_macros::dec;

    fn with_trip(s: &mut Scenario, allocations: Vec<TripAllocation>) {
        let trip = BusinessTrip {
            id: BusinessTripId::new(),
            name: "Lisbon".to_string(),
            allocations,
        };
        s.charge = s.charge.clone().with_business_trip(trip.id);
        s.trip = Some(trip);
    }

    fn allocation(
        category: TripExpenseCategory,
        tax: FinancialEntityId,
        ids: Vec<TransactionId>,
    ) -> TripAllocation {
        TripAllocation {
            category,
            tax_category_id: tax,
            transaction_ids: ids,
        }
    }

    #[test]
    fn test_payment_and_expense() {
        let mut s = Scenario::new();
        let hotel = BusinessId::new();
        let lodging = FinancialEntityId::new();
        let stay = s.tx(Some(hotel), dec!(-200), Currency::Eur);
        let stay = allocation(TripExpenseCategory::Accommodation, lodging, vec![stay]);
        with_trip(&mut s, vec![stay]);

        let output = s.run(generate).unwrap();
        assert_eq!(output.records.len(), 2);

        let payment = &output.records[0];
        assert_eq!(payment.debit1, LedgerSlot::foreign(hotel, dec!(800), dec!(200)));

        let expense = &output.records[1];
        assert_eq!(expense.debit1, LedgerSlot::foreign(lodging, dec!(800), dec!(200)));
        assert_eq!(expense.credit1, LedgerSlot::foreign(hotel, dec!(800), dec!(200)));
        assert_eq!(
            expense.description.as_deref(),
            Some("Business trip Lisbon: accommodation")
        );
    }

    #[test]
    fn test_trip_must_be_loaded() {
        let mut s = Scenario::new();
        s.tx(Some(BusinessId::new()), dec!(-1), Currency::Ils);
        s.charge = s.charge.clone().with_business_trip(BusinessTripId::new());
        assert!(matches!(
            s.run(generate).unwrap_err(),
            GenerationError::MissingBusinessTrip { .. }
        ));
    }

    #[test]
    fn test_every_transaction_in_exactly_one_category() {
        let mut s = Scenario::new();
        let unallocated = s.tx(Some(BusinessId::new()), dec!(-30), Currency::Ils);
        with_trip(&mut s, vec![]);
        assert!(matches!(
            s.run(generate).unwrap_err(),
            GenerationError::UnallocatedTripTransaction { transaction_id }
                if transaction_id == unallocated
        ));

        let mut s = Scenario::new();
        let twice = s.tx(Some(BusinessId::new()), dec!(-30), Currency::Ils);
        with_trip(
            &mut s,
            vec![
                allocation(TripExpenseCategory::Flight, FinancialEntityId::new(), vec![twice]),
                allocation(TripExpenseCategory::Travel, FinancialEntityId::new(), vec![twice]),
            ],
        );
        assert!(matches!(
            s.run(generate).unwrap_err(),
            GenerationError::AmbiguousTripTransaction { transaction_id } if transaction_id == twice
        ));
    }
}

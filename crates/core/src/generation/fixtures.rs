//! Test scenarios shared by the generator tests.

use chrono::NaiveDate;
use ledgerline_shared::types::{
    BusinessId, ChargeId, Currency, FinancialEntityId, OwnerId, TransactionId,
};
use rust_decimal::Decimal;

use super::types::{GenerationInput, GeneratorFn, GeneratorOutput};
use crate::charge::{BusinessTrip, Charge, ChargeSnapshot, Document, Transaction};
use crate::context::AdminContext;
use crate::currency::{ExchangeRate, RateTable};
use crate::error::GenerationError;

pub(crate) fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
}

/// A charge under construction with an ILS admin context and one owner account.
pub(crate) struct Scenario {
    pub context: AdminContext,
    pub charge: Charge,
    pub transactions: Vec<Transaction>,
    pub documents: Vec<Document>,
    pub trip: Option<BusinessTrip>,
    pub account: FinancialEntityId,
    pub rates: RateTable,
}

impl Scenario {
    pub fn new() -> Self {
        Self {
            context: AdminContext::new(Currency::Ils, BusinessId::new()),
            charge: Charge::new(ChargeId::new(), OwnerId::new()),
            transactions: Vec::new(),
            documents: Vec::new(),
            trip: None,
            account: FinancialEntityId::new(),
            rates: [
                ExchangeRate::new(Currency::Usd, Currency::Ils, Decimal::new(37, 1), date()),
                ExchangeRate::new(Currency::Eur, Currency::Ils, Decimal::new(4, 0), date()),
            ]
            .into_iter()
            .collect(),
        }
    }

    pub fn tx(
        &mut self,
        business: Option<BusinessId>,
        amount: Decimal,
        currency: Currency,
    ) -> TransactionId {
        let transaction =
            Transaction::new(self.charge.id, self.account, business, amount, currency, date());
        let id = transaction.id;
        self.transactions.push(transaction);
        id
    }

    pub fn fee(
        &mut self,
        business: BusinessId,
        amount: Decimal,
        currency: Currency,
    ) -> TransactionId {
        let id = self.tx(Some(business), amount, currency);
        if let Some(last) = self.transactions.last_mut() {
            last.is_fee = true;
        }
        id
    }

    pub fn snapshot(&self) -> ChargeSnapshot {
        ChargeSnapshot::new(
            self.charge.clone(),
            self.transactions.clone(),
            self.documents.clone(),
            self.trip.clone(),
        )
    }

    pub fn run(&self, generator: GeneratorFn) -> Result<GeneratorOutput, GenerationError> {
        let snapshot = self.snapshot();
        let input = GenerationInput::new(&snapshot, &self.context, &self.rates);
        generator(&input)
    }
}

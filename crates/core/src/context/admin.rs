//! Admin context: the immutable bookkeeping configuration threaded through classification
//! and generation.

use std::collections::BTreeSet;

use ledgerline_shared::AdminConfig;
use ledgerline_shared::types::{BusinessId, Currency, FinancialEntityId};

use super::error::ContextError;

/// Validated admin configuration of one owner.
///
/// Built once per generation run and passed explicitly; never global state.
/// The fee allowlists are private so their disjointness cannot be broken after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminContext {
    /// Currency local amounts are kept in.
    pub default_local_currency: Currency,
    /// The owner's own business.
    pub default_admin_business_id: BusinessId,
    /// Businesses representing the owner's wallets and accounts.
    pub internal_wallets_ids: BTreeSet<BusinessId>,
    /// Credit-card account businesses.
    pub credit_card_ids: BTreeSet<BusinessId>,
    /// Businesses dividends are paid through.
    pub dividend_business_ids: BTreeSet<BusinessId>,
    /// Tax authority dividend withholding tax is paid to.
    pub dividend_withholding_tax_business_id: Option<BusinessId>,
    /// Bank deposit business.
    pub bank_deposit_business_id: Option<BusinessId>,
    /// VAT authority.
    pub vat_business_id: Option<BusinessId>,
    /// Tax category for VAT on purchases.
    pub input_vat_tax_category_id: Option<FinancialEntityId>,
    /// Tax category for VAT on sales.
    pub output_vat_tax_category_id: Option<FinancialEntityId>,
    /// Tax category for exchange-rate differences.
    pub exchange_rate_tax_category_id: Option<FinancialEntityId>,
    /// Tax category for bank deposit interest.
    pub bank_deposit_interest_tax_category_id: Option<FinancialEntityId>,
    supplemental_fee_business_ids: BTreeSet<BusinessId>,
    fundamental_fee_business_ids: BTreeSet<BusinessId>,
}

impl AdminContext {
    /// Creates a context with nothing but the local currency and the owner's business.
    #[must_use]
    pub fn new(default_local_currency: Currency, default_admin_business_id: BusinessId) -> Self {
        Self {
            default_local_currency,
            default_admin_business_id,
            internal_wallets_ids: BTreeSet::new(),
            credit_card_ids: BTreeSet::new(),
            dividend_business_ids: BTreeSet::new(),
            dividend_withholding_tax_business_id: None,
            bank_deposit_business_id: None,
            vat_business_id: None,
            input_vat_tax_category_id: None,
            output_vat_tax_category_id: None,
            exchange_rate_tax_category_id: None,
            bank_deposit_interest_tax_category_id: None,
            supplemental_fee_business_ids: BTreeSet::new(),
            fundamental_fee_business_ids: BTreeSet::new(),
        }
    }

    /// Validates operator configuration into a context.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::OverlappingFeeAllowlists` if a business is in both fee allowlists.
    pub fn from_config(config: &AdminConfig) -> Result<Self, ContextError> {
        let mut context =
            Self::new(config.default_local_currency, config.default_admin_business_id);
        context.internal_wallets_ids = config.internal_wallets_ids.iter().copied().collect();
        context.credit_card_ids = config.credit_card_ids.iter().copied().collect();
        context.dividend_business_ids = config.dividend_business_ids.iter().copied().collect();
        context.dividend_withholding_tax_business_id = config.dividend_withholding_tax_business_id;
        context.bank_deposit_business_id = config.bank_deposit_business_id;
        context.vat_business_id = config.vat_business_id;
        context.input_vat_tax_category_id = config.input_vat_tax_category_id;
        context.output_vat_tax_category_id = config.output_vat_tax_category_id;
        context.exchange_rate_tax_category_id = config.exchange_rate_tax_category_id;
        context.bank_deposit_interest_tax_category_id =
            config.bank_deposit_interest_tax_category_id;

        context.with_fee_allowlists(
            config.supplemental_fee_business_ids.iter().copied(),
            config.fundamental_fee_business_ids.iter().copied(),
        )
    }

    /// Replaces both fee allowlists.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::OverlappingFeeAllowlists` if the sets intersect.
    pub fn with_fee_allowlists(
        mut self,
        supplemental: impl IntoIterator<Item = BusinessId>,
        fundamental: impl IntoIterator<Item = BusinessId>,
    ) -> Result<Self, ContextError> {
        let supplemental: BTreeSet<_> = supplemental.into_iter().collect();
        let fundamental: BTreeSet<_> = fundamental.into_iter().collect();

        let overlap: Vec<_> = supplemental.intersection(&fundamental).copied().collect();
        if !overlap.is_empty() {
            return Err(ContextError::OverlappingFeeAllowlists {
                business_ids: overlap,
            });
        }

        self.supplemental_fee_business_ids = supplemental;
        self.fundamental_fee_business_ids = fundamental;
        Ok(self)
    }

    /// Sets the internal wallets.
    #[must_use]
    pub fn with_internal_wallets(mut self, ids: impl IntoIterator<Item = BusinessId>) -> Self {
        self.internal_wallets_ids = ids.into_iter().collect();
        self
    }

    /// Sets the credit-card accounts.
    #[must_use]
    pub fn with_credit_cards(mut self, ids: impl IntoIterator<Item = BusinessId>) -> Self {
        self.credit_card_ids = ids.into_iter().collect();
        self
    }

    /// Sets the dividend businesses and the withholding-tax authority.
    #[must_use]
    pub fn with_dividends(
        mut self,
        ids: impl IntoIterator<Item = BusinessId>,
        withholding_tax_business_id: Option<BusinessId>,
    ) -> Self {
        self.dividend_business_ids = ids.into_iter().collect();
        self.dividend_withholding_tax_business_id = withholding_tax_business_id;
        self
    }

    /// Sets the bank deposit business.
    #[must_use]
    pub fn with_bank_deposit(mut self, business_id: BusinessId) -> Self {
        self.bank_deposit_business_id = Some(business_id);
        self
    }

    /// Sets the VAT authority.
    #[must_use]
    pub fn with_vat_authority(mut self, business_id: BusinessId) -> Self {
        self.vat_business_id = Some(business_id);
        self
    }

    /// Supplemental fee counterparties.
    #[must_use]
    pub fn supplemental_fee_business_ids(&self) -> &BTreeSet<BusinessId> {
        &self.supplemental_fee_business_ids
    }

    /// Fundamental fee counterparties.
    #[must_use]
    pub fn fundamental_fee_business_ids(&self) -> &BTreeSet<BusinessId> {
        &self.fundamental_fee_business_ids
    }

    /// Returns true if the business is one of the owner's wallets.
    #[must_use]
    pub fn is_internal_wallet(&self, business_id: BusinessId) -> bool {
        self.internal_wallets_ids.contains(&business_id)
    }

    /// Returns true if the business is a dividend conduit.
    #[must_use]
    pub fn is_dividend_business(&self, business_id: BusinessId) -> bool {
        self.dividend_business_ids.contains(&business_id)
    }

    /// Returns true if the business is a credit-card account.
    #[must_use]
    pub fn is_credit_card(&self, business_id: BusinessId) -> bool {
        self.credit_card_ids.contains(&business_id)
    }
}

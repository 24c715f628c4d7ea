//! The calculation engine behind the quote calculator endpoints.
//!
//! [`PricingEngine`] composes the validator, discount engine, breakdown
//! calculator and cycle comparator over one injected rule set and plan
//! catalog. Raw input is validated exactly once at this boundary; the
//! inner calculators only ever see typed configurations.

use rust_decimal::Decimal;

use crate::calculations::breakdown::{
    ConsistencyWarning, PriceBreakdown, PriceBreakdownCalculator,
};
use crate::calculations::comparison::{BillingCycleComparator, CycleComparison};
use crate::calculations::validate::{ConfigValidator, ValidationError};
use crate::models::{BusinessRules, PlanCatalog, RawCalculatorInput};

pub struct PricingEngine<'a> {
    rules: &'a BusinessRules,
    catalog: &'a PlanCatalog,
}

impl<'a> PricingEngine<'a> {
    pub fn new(
        rules: &'a BusinessRules,
        catalog: &'a PlanCatalog,
    ) -> Self {
        Self { rules, catalog }
    }

    /// Validates the raw input and computes its itemized breakdown.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] before any arithmetic runs when the
    /// input is rejected.
    pub fn compute_breakdown(
        &self,
        raw: &RawCalculatorInput,
    ) -> Result<PriceBreakdown, ValidationError> {
        let config = ConfigValidator::new(self.rules, self.catalog).validate(raw)?;
        Ok(PriceBreakdownCalculator::new(self.rules).compute(&config))
    }

    /// Validates the raw input and ranks all four billing cadences for it.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] before any arithmetic runs when the
    /// input is rejected.
    pub fn compare_cycles(
        &self,
        raw: &RawCalculatorInput,
    ) -> Result<Vec<CycleComparison>, ValidationError> {
        let config = ConfigValidator::new(self.rules, self.catalog).validate(raw)?;
        Ok(BillingCycleComparator::new(self.rules).compare(&config))
    }

    /// Advisory check of a manually negotiated total; see
    /// [`PriceBreakdownCalculator::validate_negotiated_total`].
    pub fn validate_negotiated_total(
        &self,
        suggested_total: Decimal,
        negotiated_total: Decimal,
    ) -> Option<ConsistencyWarning> {
        PriceBreakdownCalculator::new(self.rules)
            .validate_negotiated_total(suggested_total, negotiated_total)
    }
}

//! Billing-cycle comparison.
//!
//! Runs the breakdown calculator once per cadence for a single
//! configuration and ranks the results. Savings are always measured
//! against the monthly total — the no-discount baseline — so the monthly
//! row reports zero by definition.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::breakdown::{PriceBreakdown, PriceBreakdownCalculator};
use crate::calculations::common::round_percent;
use crate::models::{BillingCycle, BusinessRules, CalculatorConfiguration};

/// One row of the cycle comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleComparison {
    pub cycle: BillingCycle,
    pub breakdown: PriceBreakdown,
    pub savings_amount: Decimal,
    pub savings_percent: Decimal,
}

/// Compares the four billing cadences for one configuration.
#[derive(Debug, Clone)]
pub struct BillingCycleComparator<'a> {
    rules: &'a BusinessRules,
}

impl<'a> BillingCycleComparator<'a> {
    pub fn new(rules: &'a BusinessRules) -> Self {
        Self { rules }
    }

    /// Computes one row per cadence, ordered ascending by total (cheapest
    /// first). Ties break by cadence length ascending so the output is
    /// deterministic.
    pub fn compare(
        &self,
        config: &CalculatorConfiguration,
    ) -> Vec<CycleComparison> {
        let calculator = PriceBreakdownCalculator::new(self.rules);

        let baseline = calculator
            .compute(&config.with_billing_cycle(BillingCycle::Monthly))
            .total;

        let mut rows: Vec<CycleComparison> = BillingCycle::ALL
            .into_iter()
            .map(|cycle| {
                let breakdown = calculator.compute(&config.with_billing_cycle(cycle));
                let savings_amount = baseline - breakdown.total;
                let savings_percent = if baseline.is_zero() {
                    Decimal::ZERO
                } else {
                    round_percent(savings_amount * Decimal::ONE_HUNDRED / baseline)
                };
                CycleComparison {
                    cycle,
                    breakdown,
                    savings_amount,
                    savings_percent,
                }
            })
            .collect();

        rows.sort_by(|a, b| {
            a.breakdown
                .total
                .cmp(&b.breakdown.total)
                .then(a.cycle.months().cmp(&b.cycle.months()))
        });

        rows
    }
}

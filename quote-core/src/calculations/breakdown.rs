//! Itemized price breakdown calculation.
//!
//! This module turns a validated [`CalculatorConfiguration`] into the
//! priced, itemized breakdown printed on a quote.
//!
//! # Algorithm
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | `base` = project value |
//! | 2    | `rate` = combined discount rate (cycle + upfront) |
//! | 3    | `discount` = round(base × rate); `subtotal` = base − discount |
//! | 4    | `vat` = round(subtotal × vat rate), or 0 without VAT |
//! | 5    | `total` = subtotal + vat |
//! | 6    | itemize one line per nonzero discount component |
//!
//! Every amount is a whole-CLP `Decimal`; rounding is half-up. The listed
//! discount lines always sum to the total discount exactly: each line is
//! rounded on its own and the rounding remainder lands on the last line,
//! so `base - discount + vat == total` holds for every input with no
//! accumulated drift.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use quote_core::calculations::PriceBreakdownCalculator;
//! use quote_core::{
//!     BillingCycle, BusinessRules, CalculatorConfiguration, MaterialQuality, PaymentType,
//!     ProjectSize, Urgency,
//! };
//!
//! let rules = BusinessRules::default();
//! let config = CalculatorConfiguration {
//!     project_value: dec!(1000000),
//!     plan_id: "profesional".to_string(),
//!     billing_cycle: BillingCycle::Annual,
//!     project_size: ProjectSize::Medium,
//!     material_quality: MaterialQuality::Standard,
//!     urgency: Urgency::Normal,
//!     payment_type: PaymentType::Upfront,
//!     include_vat: true,
//! };
//!
//! let calculator = PriceBreakdownCalculator::new(&rules);
//! let breakdown = calculator.compute(&config);
//!
//! // 15% + 5% discount, then 19% VAT on the discounted subtotal.
//! assert_eq!(breakdown.discount_amount(), dec!(200000));
//! assert_eq!(breakdown.subtotal, dec!(800000));
//! assert_eq!(breakdown.vat_amount, dec!(152000));
//! assert_eq!(breakdown.total, dec!(952000));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::round_half_up;
use crate::calculations::discount::{DiscountComponent, DiscountEngine};
use crate::models::{BusinessRules, CalculatorConfiguration};

/// One applied discount line on the quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountLine {
    pub label: String,
    pub rate: Decimal,
    pub amount: Decimal,
}

/// The itemized result of a price calculation. Derived, never persisted —
/// always recomputable from a configuration plus the active rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub base_value: Decimal,
    pub applied_discounts: Vec<DiscountLine>,
    pub subtotal: Decimal,
    pub vat_amount: Decimal,
    pub total: Decimal,
}

impl PriceBreakdown {
    /// Total discount taken off the base value.
    pub fn discount_amount(&self) -> Decimal {
        self.base_value - self.subtotal
    }
}

/// Advisory warning on the manual-override path. Never blocks computation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConsistencyWarning {
    #[error(
        "negotiated total {negotiated} falls outside {min_ratio}–{max_ratio} of suggested total {suggested}"
    )]
    NegotiationRangeExceeded {
        suggested: Decimal,
        negotiated: Decimal,
        min_ratio: Decimal,
        max_ratio: Decimal,
    },
}

/// Calculator for itemized price breakdowns over an injected rule set.
#[derive(Debug, Clone)]
pub struct PriceBreakdownCalculator<'a> {
    rules: &'a BusinessRules,
}

impl<'a> PriceBreakdownCalculator<'a> {
    pub fn new(rules: &'a BusinessRules) -> Self {
        Self { rules }
    }

    /// Computes the itemized breakdown for one configuration.
    pub fn compute(
        &self,
        config: &CalculatorConfiguration,
    ) -> PriceBreakdown {
        let engine = DiscountEngine::new(self.rules);

        let base = config.project_value;
        let rate = engine.combined_rate(config);
        let discount_amount = round_half_up(base * rate);
        let subtotal = base - discount_amount;

        let vat_amount = if config.include_vat {
            round_half_up(subtotal * self.rules.vat_rate)
        } else {
            Decimal::ZERO
        };
        let total = subtotal + vat_amount;

        let applied_discounts = Self::itemize(base, discount_amount, engine.components(config));

        tracing::debug!(
            %base,
            %rate,
            %discount_amount,
            %total,
            cycle = config.billing_cycle.as_str(),
            "computed price breakdown"
        );

        PriceBreakdown {
            base_value: base,
            applied_discounts,
            subtotal,
            vat_amount,
            total,
        }
    }

    /// Checks a manually negotiated total against the acceptable window
    /// around the suggested total. Advisory: an out-of-range total still
    /// yields a quote; the caller decides whether to require confirmation.
    pub fn validate_negotiated_total(
        &self,
        suggested_total: Decimal,
        negotiated_total: Decimal,
    ) -> Option<ConsistencyWarning> {
        let range = &self.rules.negotiation_range;
        let floor = suggested_total * range.min;
        let ceiling = suggested_total * range.max;

        if negotiated_total < floor || negotiated_total > ceiling {
            Some(ConsistencyWarning::NegotiationRangeExceeded {
                suggested: suggested_total,
                negotiated: negotiated_total,
                min_ratio: range.min,
                max_ratio: range.max,
            })
        } else {
            None
        }
    }

    /// Builds the discount lines so they sum to `discount_amount` exactly:
    /// every line but the last is rounded on its own, the last line takes
    /// the remainder.
    fn itemize(
        base: Decimal,
        discount_amount: Decimal,
        components: Vec<DiscountComponent>,
    ) -> Vec<DiscountLine> {
        let mut lines: Vec<DiscountLine> = Vec::with_capacity(components.len());
        let count = components.len();

        for (index, component) in components.into_iter().enumerate() {
            let amount = if index + 1 == count {
                let allocated: Decimal = lines.iter().map(|line| line.amount).sum();
                discount_amount - allocated
            } else {
                round_half_up(base * component.rate)
            };
            lines.push(DiscountLine {
                label: component.label,
                rate: component.rate,
                amount,
            });
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use crate::models::{
        BillingCycle, MaterialQuality, PaymentType, ProjectSize, Urgency,
    };

    use super::*;

    fn config(
        value: Decimal,
        cycle: BillingCycle,
        payment: PaymentType,
        include_vat: bool,
    ) -> CalculatorConfiguration {
        CalculatorConfiguration {
            project_value: value,
            plan_id: "profesional".to_string(),
            billing_cycle: cycle,
            project_size: ProjectSize::Medium,
            material_quality: MaterialQuality::Standard,
            urgency: Urgency::Normal,
            payment_type: payment,
            include_vat,
        }
    }

    // =========================================================================
    // compute tests
    // =========================================================================

    #[test]
    fn annual_upfront_with_vat_matches_worked_example() {
        let rules = BusinessRules::default();
        let calculator = PriceBreakdownCalculator::new(&rules);

        let breakdown = calculator.compute(&config(
            dec!(1000000),
            BillingCycle::Annual,
            PaymentType::Upfront,
            true,
        ));

        assert_eq!(breakdown.base_value, dec!(1000000));
        assert_eq!(breakdown.discount_amount(), dec!(200000));
        assert_eq!(breakdown.subtotal, dec!(800000));
        assert_eq!(breakdown.vat_amount, dec!(152000));
        assert_eq!(breakdown.total, dec!(952000));
    }

    #[test]
    fn minimum_value_monthly_without_vat_is_passed_through() {
        let rules = BusinessRules::default();
        let calculator = PriceBreakdownCalculator::new(&rules);

        let breakdown = calculator.compute(&config(
            dec!(300000),
            BillingCycle::Monthly,
            PaymentType::Monthly,
            false,
        ));

        assert_eq!(breakdown.discount_amount(), dec!(0));
        assert_eq!(breakdown.subtotal, dec!(300000));
        assert_eq!(breakdown.vat_amount, dec!(0));
        assert_eq!(breakdown.total, dec!(300000));
        assert!(breakdown.applied_discounts.is_empty());
    }

    #[test]
    fn vat_applies_to_the_discounted_subtotal() {
        let rules = BusinessRules::default();
        let calculator = PriceBreakdownCalculator::new(&rules);

        let breakdown = calculator.compute(&config(
            dec!(1000000),
            BillingCycle::Semestral,
            PaymentType::Monthly,
            true,
        ));

        // 8% discount -> 920000; VAT on 920000, not on the base.
        assert_eq!(breakdown.subtotal, dec!(920000));
        assert_eq!(breakdown.vat_amount, dec!(174800));
        assert_eq!(breakdown.total, dec!(1094800));
    }

    #[test]
    fn discount_lines_sum_to_the_discount_amount_exactly() {
        let rules = BusinessRules::default();
        let calculator = PriceBreakdownCalculator::new(&rules);

        // An odd base value forces per-line rounding.
        let breakdown = calculator.compute(&config(
            dec!(333333),
            BillingCycle::Quarterly,
            PaymentType::Upfront,
            true,
        ));

        let line_sum: Decimal = breakdown
            .applied_discounts
            .iter()
            .map(|line| line.amount)
            .sum();

        assert_eq!(line_sum, breakdown.discount_amount());
        assert_eq!(breakdown.applied_discounts.len(), 2);
    }

    #[test]
    fn rounding_remainder_lands_on_the_last_line() {
        let rules = BusinessRules::default();
        let calculator = PriceBreakdownCalculator::new(&rules);

        // 333333 * 0.08 = 26666.64 -> 26667 total discount.
        // Cycle line rounds on its own: 26667. Upfront line absent.
        let breakdown = calculator.compute(&config(
            dec!(333333),
            BillingCycle::Semestral,
            PaymentType::Monthly,
            false,
        ));

        assert_eq!(breakdown.applied_discounts.len(), 1);
        assert_eq!(breakdown.applied_discounts[0].amount, dec!(26667));
        assert_eq!(breakdown.discount_amount(), dec!(26667));
    }

    #[test]
    fn breakdown_identity_holds_across_sampled_values() {
        let rules = BusinessRules::default();
        let calculator = PriceBreakdownCalculator::new(&rules);

        // Deterministic stride across the whole accepted range.
        let mut value = 300000i64;
        while value <= 50000000 {
            for cycle in BillingCycle::ALL {
                for payment in [PaymentType::Monthly, PaymentType::Upfront] {
                    let breakdown = calculator.compute(&config(
                        Decimal::from(value),
                        cycle,
                        payment,
                        true,
                    ));

                    assert_eq!(
                        breakdown.base_value - breakdown.discount_amount() + breakdown.vat_amount,
                        breakdown.total,
                        "identity violated for value {value} cycle {cycle:?}"
                    );
                    assert!(breakdown.subtotal <= breakdown.base_value);
                    assert!(breakdown.total >= Decimal::ZERO);

                    let line_sum: Decimal = breakdown
                        .applied_discounts
                        .iter()
                        .map(|line| line.amount)
                        .sum();
                    assert_eq!(line_sum, breakdown.discount_amount());
                    assert!(breakdown
                        .applied_discounts
                        .iter()
                        .all(|line| line.amount >= Decimal::ZERO));
                }
            }
            value += 1234567;
        }
    }

    // =========================================================================
    // validate_negotiated_total tests
    // =========================================================================

    #[test]
    fn negotiated_total_inside_the_window_passes() {
        let rules = BusinessRules::default();
        let calculator = PriceBreakdownCalculator::new(&rules);

        assert_eq!(
            calculator.validate_negotiated_total(dec!(952000), dec!(900000)),
            None
        );
    }

    #[test]
    fn negotiated_total_at_the_bounds_passes() {
        let rules = BusinessRules::default();
        let calculator = PriceBreakdownCalculator::new(&rules);

        // 952000 * 0.85 = 809200; 952000 * 1.25 = 1190000
        assert_eq!(
            calculator.validate_negotiated_total(dec!(952000), dec!(809200)),
            None
        );
        assert_eq!(
            calculator.validate_negotiated_total(dec!(952000), dec!(1190000)),
            None
        );
    }

    #[test]
    fn negotiated_total_below_the_floor_warns() {
        let rules = BusinessRules::default();
        let calculator = PriceBreakdownCalculator::new(&rules);

        let warning = calculator.validate_negotiated_total(dec!(952000), dec!(700000));

        assert_eq!(
            warning,
            Some(ConsistencyWarning::NegotiationRangeExceeded {
                suggested: dec!(952000),
                negotiated: dec!(700000),
                min_ratio: dec!(0.85),
                max_ratio: dec!(1.25),
            })
        );
    }

    #[test]
    fn negotiated_total_above_the_ceiling_warns() {
        let rules = BusinessRules::default();
        let calculator = PriceBreakdownCalculator::new(&rules);

        let warning = calculator.validate_negotiated_total(dec!(952000), dec!(1200000));

        assert!(warning.is_some());
    }
}

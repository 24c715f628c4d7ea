use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::billing_cycle::BillingCycle;

/// Errors raised when a rule set fails its construction-time sanity check.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BusinessRulesError {
    #[error("rate '{name}' must lie in [0, 1), got {value}")]
    RateOutOfRange { name: &'static str, value: Decimal },

    #[error("combined discount for {cycle} billing ({combined}) must stay below 1")]
    CombinedRateTooLarge { cycle: &'static str, combined: Decimal },

    #[error("project value bounds inverted: min {min} > max {max}")]
    InvertedValueBounds { min: Decimal, max: Decimal },

    #[error("negotiation range inverted: min {min} > max {max}")]
    InvertedNegotiationRange { min: Decimal, max: Decimal },
}

/// Discount rate per billing cadence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingCycleRates {
    pub monthly: Decimal,
    pub quarterly: Decimal,
    pub semestral: Decimal,
    pub annual: Decimal,
}

/// Bounds within which a manually negotiated total is accepted without a
/// consistency warning, as ratios of the suggested total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegotiationRange {
    pub min: Decimal,
    pub max: Decimal,
}

/// The injected business-rule constants. Constructed explicitly (per tenant
/// if need be) and passed into the engine; never read from ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessRules {
    pub vat_rate: Decimal,
    pub upfront_discount: Decimal,
    pub billing_cycle_discounts: BillingCycleRates,
    pub negotiation_range: NegotiationRange,
    pub project_min_value: Decimal,
    pub project_max_value: Decimal,
}

impl Default for BusinessRules {
    /// The production rule set: 19% VAT, 5% upfront discount, cycle
    /// discounts of 0/3/8/15%, negotiation window 0.85–1.25, project value
    /// bounds of 300,000–50,000,000 CLP.
    fn default() -> Self {
        Self {
            vat_rate: Decimal::new(19, 2),
            upfront_discount: Decimal::new(5, 2),
            billing_cycle_discounts: BillingCycleRates {
                monthly: Decimal::ZERO,
                quarterly: Decimal::new(3, 2),
                semestral: Decimal::new(8, 2),
                annual: Decimal::new(15, 2),
            },
            negotiation_range: NegotiationRange {
                min: Decimal::new(85, 2),
                max: Decimal::new(125, 2),
            },
            project_min_value: Decimal::from(300_000),
            project_max_value: Decimal::from(50_000_000),
        }
    }
}

impl BusinessRules {
    /// Discount rate for one billing cadence.
    pub fn billing_cycle_discount(
        &self,
        cycle: BillingCycle,
    ) -> Decimal {
        match cycle {
            BillingCycle::Monthly => self.billing_cycle_discounts.monthly,
            BillingCycle::Quarterly => self.billing_cycle_discounts.quarterly,
            BillingCycle::Semestral => self.billing_cycle_discounts.semestral,
            BillingCycle::Annual => self.billing_cycle_discounts.annual,
        }
    }

    /// Sanity-check the rule set and hand it back. Use this when loading a
    /// tenant-specific rule set from configuration; `Default` is valid by
    /// construction.
    ///
    /// # Errors
    ///
    /// Returns [`BusinessRulesError`] if any rate falls outside `[0, 1)`,
    /// a cycle discount stacked with the upfront discount reaches 1, or
    /// either range is inverted.
    pub fn validated(self) -> Result<Self, BusinessRulesError> {
        let one = Decimal::ONE;

        let rates = [
            ("vat_rate", self.vat_rate),
            ("upfront_discount", self.upfront_discount),
            ("billing_cycle_discounts.monthly", self.billing_cycle_discounts.monthly),
            ("billing_cycle_discounts.quarterly", self.billing_cycle_discounts.quarterly),
            ("billing_cycle_discounts.semestral", self.billing_cycle_discounts.semestral),
            ("billing_cycle_discounts.annual", self.billing_cycle_discounts.annual),
        ];
        for (name, value) in rates {
            if value < Decimal::ZERO || value >= one {
                return Err(BusinessRulesError::RateOutOfRange { name, value });
            }
        }

        for cycle in BillingCycle::ALL {
            let combined = self.billing_cycle_discount(cycle) + self.upfront_discount;
            if combined >= one {
                return Err(BusinessRulesError::CombinedRateTooLarge {
                    cycle: cycle.as_str(),
                    combined,
                });
            }
        }

        if self.project_min_value > self.project_max_value {
            return Err(BusinessRulesError::InvertedValueBounds {
                min: self.project_min_value,
                max: self.project_max_value,
            });
        }

        if self.negotiation_range.min > self.negotiation_range.max {
            return Err(BusinessRulesError::InvertedNegotiationRange {
                min: self.negotiation_range.min,
                max: self.negotiation_range.max,
            });
        }

        Ok(self)
    }
}

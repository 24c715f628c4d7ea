//! Discount derivation.
//!
//! The combined discount rate is built from exactly two sources: the
//! billing-cadence discount and the fixed upfront-payment discount. The
//! two stack **additively**, not multiplicatively — the discount lines
//! printed on a quote must sum to the headline rate so a non-technical
//! client can follow them.
//!
//! `material_quality`, `urgency` and `project_size` are deliberately not
//! inputs here: in the current business rules they select catalog content
//! and never move the price. A future rule that prices them hooks into
//! [`DiscountEngine::components`].

use rust_decimal::Decimal;

use crate::models::{BusinessRules, CalculatorConfiguration, PaymentType};

/// One contributing discount source, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountComponent {
    pub label: String,
    pub rate: Decimal,
}

/// Derives the combined discount rate for a configuration from an injected
/// rule set. Stateless and pure.
#[derive(Debug, Clone)]
pub struct DiscountEngine<'a> {
    rules: &'a BusinessRules,
}

impl<'a> DiscountEngine<'a> {
    pub fn new(rules: &'a BusinessRules) -> Self {
        Self { rules }
    }

    /// The combined discount rate, always in `[0, 1)` for a validated rule
    /// set.
    pub fn combined_rate(
        &self,
        config: &CalculatorConfiguration,
    ) -> Decimal {
        let mut rate = self.rules.billing_cycle_discount(config.billing_cycle);
        if config.payment_type == PaymentType::Upfront {
            rate += self.rules.upfront_discount;
        }
        rate
    }

    /// The nonzero contributing components, cycle discount first, then the
    /// upfront discount. The breakdown calculator itemizes from this list
    /// so the stacking order is decided in one place.
    pub fn components(
        &self,
        config: &CalculatorConfiguration,
    ) -> Vec<DiscountComponent> {
        let mut components = Vec::new();

        let cycle_rate = self.rules.billing_cycle_discount(config.billing_cycle);
        if !cycle_rate.is_zero() {
            components.push(DiscountComponent {
                label: format!("{} billing discount", config.billing_cycle.as_str()),
                rate: cycle_rate,
            });
        }

        if config.payment_type == PaymentType::Upfront && !self.rules.upfront_discount.is_zero() {
            components.push(DiscountComponent {
                label: "upfront payment discount".to_string(),
                rate: self.rules.upfront_discount,
            });
        }

        components
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::billing_cycle::BillingCycle;
use super::payment_type::PaymentType;
use super::project_profile::{MaterialQuality, ProjectSize, Urgency};

/// Untyped calculator input as it crosses the API boundary. Enumerated
/// fields arrive as wire strings; only the validator turns this into a
/// [`CalculatorConfiguration`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCalculatorInput {
    pub project_value: Decimal,
    pub plan_id: String,
    pub billing_cycle: String,
    pub project_size: String,
    pub material_quality: String,
    pub urgency: String,
    pub payment_type: String,
    pub include_vat: bool,
}

/// Validated calculator input. Ephemeral value object, constructed per
/// calculation request and never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorConfiguration {
    pub project_value: Decimal,
    pub plan_id: String,
    pub billing_cycle: BillingCycle,
    pub project_size: ProjectSize,
    pub material_quality: MaterialQuality,
    pub urgency: Urgency,
    pub payment_type: PaymentType,
    pub include_vat: bool,
}

impl CalculatorConfiguration {
    /// A copy of this configuration with the billing cycle substituted.
    /// Used by the cycle comparator; the original is left untouched.
    pub fn with_billing_cycle(
        &self,
        billing_cycle: BillingCycle,
    ) -> Self {
        Self {
            billing_cycle,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn with_billing_cycle_substitutes_only_the_cycle() {
        let config = CalculatorConfiguration {
            project_value: dec!(1000000),
            plan_id: "profesional".to_string(),
            billing_cycle: BillingCycle::Monthly,
            project_size: ProjectSize::Medium,
            material_quality: MaterialQuality::Standard,
            urgency: Urgency::Normal,
            payment_type: PaymentType::Upfront,
            include_vat: true,
        };

        let annual = config.with_billing_cycle(BillingCycle::Annual);

        assert_eq!(annual.billing_cycle, BillingCycle::Annual);
        assert_eq!(annual.project_value, config.project_value);
        assert_eq!(annual.payment_type, config.payment_type);
        assert_eq!(config.billing_cycle, BillingCycle::Monthly);
    }
}

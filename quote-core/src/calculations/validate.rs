//! Calculator input validation.
//!
//! [`ConfigValidator`] is the only way a [`RawCalculatorInput`] becomes a
//! [`CalculatorConfiguration`]: it checks the project value against the
//! business-rule bounds, the plan id against the loaded catalog, and every
//! enumerated field against its closed set. All violations found are
//! accumulated and returned in one report, so a quote form can surface them
//! together instead of round-tripping per field.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{
    BillingCycle, BusinessRules, CalculatorConfiguration, MaterialQuality, PaymentType,
    PlanCatalog, ProjectSize, RawCalculatorInput, Urgency,
};

/// A single rejected field, carrying enough to render an actionable message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("{field} must lie between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: Decimal,
        max: Decimal,
        value: Decimal,
    },

    #[error("unknown plan '{plan_id}' (known plans: {known:?})")]
    UnknownPlan { plan_id: String, known: Vec<String> },

    #[error("{field} must be one of {allowed:?}, got '{value}'")]
    InvalidChoice {
        field: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },
}

/// Validation failure: every violation found in the rejected input, in
/// field order. Never retried automatically.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("configuration rejected ({} violation(s))", .violations.len())]
pub struct ValidationError {
    violations: Vec<ConfigViolation>,
}

impl ValidationError {
    pub fn new(violations: Vec<ConfigViolation>) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &[ConfigViolation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<ConfigViolation> {
        self.violations
    }
}

/// Pure, side-effect-free input validator over an injected rule set and
/// plan catalog.
#[derive(Debug, Clone)]
pub struct ConfigValidator<'a> {
    rules: &'a BusinessRules,
    catalog: &'a PlanCatalog,
}

impl<'a> ConfigValidator<'a> {
    pub fn new(
        rules: &'a BusinessRules,
        catalog: &'a PlanCatalog,
    ) -> Self {
        Self { rules, catalog }
    }

    /// Validates raw calculator input, accumulating all violations.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] listing every rejected field when the
    /// project value is out of bounds, the plan id is not in the catalog,
    /// or any enumerated field is not one of its allowed values.
    pub fn validate(
        &self,
        raw: &RawCalculatorInput,
    ) -> Result<CalculatorConfiguration, ValidationError> {
        let mut violations = Vec::new();

        if raw.project_value < self.rules.project_min_value
            || raw.project_value > self.rules.project_max_value
        {
            violations.push(ConfigViolation::OutOfRange {
                field: "project_value",
                min: self.rules.project_min_value,
                max: self.rules.project_max_value,
                value: raw.project_value,
            });
        }

        if !self.catalog.contains(&raw.plan_id) {
            violations.push(ConfigViolation::UnknownPlan {
                plan_id: raw.plan_id.clone(),
                known: self.catalog.plan_ids(),
            });
        }

        let billing_cycle = Self::parse_choice(
            &mut violations,
            "billing_cycle",
            &raw.billing_cycle,
            BillingCycle::ALLOWED,
            BillingCycle::parse,
        );
        let project_size = Self::parse_choice(
            &mut violations,
            "project_size",
            &raw.project_size,
            ProjectSize::ALLOWED,
            ProjectSize::parse,
        );
        let material_quality = Self::parse_choice(
            &mut violations,
            "material_quality",
            &raw.material_quality,
            MaterialQuality::ALLOWED,
            MaterialQuality::parse,
        );
        let urgency = Self::parse_choice(
            &mut violations,
            "urgency",
            &raw.urgency,
            Urgency::ALLOWED,
            Urgency::parse,
        );
        let payment_type = Self::parse_choice(
            &mut violations,
            "payment_type",
            &raw.payment_type,
            PaymentType::ALLOWED,
            PaymentType::parse,
        );

        match (billing_cycle, project_size, material_quality, urgency, payment_type) {
            (Some(billing_cycle), Some(project_size), Some(material_quality), Some(urgency), Some(payment_type))
                if violations.is_empty() =>
            {
                Ok(CalculatorConfiguration {
                    project_value: raw.project_value,
                    plan_id: raw.plan_id.clone(),
                    billing_cycle,
                    project_size,
                    material_quality,
                    urgency,
                    payment_type,
                    include_vat: raw.include_vat,
                })
            }
            _ => Err(ValidationError::new(violations)),
        }
    }

    fn parse_choice<T>(
        violations: &mut Vec<ConfigViolation>,
        field: &'static str,
        value: &str,
        allowed: &'static [&'static str],
        parse: fn(&str) -> Option<T>,
    ) -> Option<T> {
        let parsed = parse(value);
        if parsed.is_none() {
            violations.push(ConfigViolation::InvalidChoice {
                field,
                value: value.to_string(),
                allowed,
            });
        }
        parsed
    }
}

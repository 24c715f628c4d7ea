mod billing_cycle;
mod business_rules;
mod configuration;
mod payment_type;
mod pricing_plan;
mod project_profile;
mod session;

pub use billing_cycle::BillingCycle;
pub use business_rules::{BillingCycleRates, BusinessRules, BusinessRulesError, NegotiationRange};
pub use configuration::{CalculatorConfiguration, RawCalculatorInput};
pub use payment_type::PaymentType;
pub use pricing_plan::{PlanCatalog, PricingPlan};
pub use project_profile::{MaterialQuality, ProjectSize, Urgency};
pub use session::{CalculatorSession, NewCalculatorSession, SessionOwner};

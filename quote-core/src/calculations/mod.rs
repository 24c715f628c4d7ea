pub mod breakdown;
pub mod common;
pub mod comparison;
pub mod discount;
pub mod engine;
pub mod validate;

pub use breakdown::{ConsistencyWarning, DiscountLine, PriceBreakdown, PriceBreakdownCalculator};
pub use comparison::{BillingCycleComparator, CycleComparison};
pub use discount::{DiscountComponent, DiscountEngine};
pub use engine::PricingEngine;
pub use validate::{ConfigValidator, ConfigViolation, ValidationError};

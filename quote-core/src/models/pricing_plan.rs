use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;

/// Immutable catalog entry. Loaded once at process start by the catalog
/// loader and never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPlan {
    pub id: String,
    pub label: String,
    pub tier_rank: i32,
    pub suggested_multiplier: Decimal,
    pub features: Vec<String>,
}

impl PricingPlan {
    /// Suggested project value after applying this plan's multiplier,
    /// rounded to whole CLP. Catalog convenience for the quote form; the
    /// discount engine never reads it.
    pub fn suggested_value(
        &self,
        project_value: Decimal,
    ) -> Decimal {
        round_half_up(project_value * self.suggested_multiplier)
    }
}

/// The loaded plan catalog, ordered by tier rank ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanCatalog {
    plans: Vec<PricingPlan>,
}

impl PlanCatalog {
    pub fn new(mut plans: Vec<PricingPlan>) -> Self {
        plans.sort_by_key(|p| p.tier_rank);
        Self { plans }
    }

    pub fn get(
        &self,
        plan_id: &str,
    ) -> Option<&PricingPlan> {
        self.plans.iter().find(|p| p.id == plan_id)
    }

    pub fn contains(
        &self,
        plan_id: &str,
    ) -> bool {
        self.get(plan_id).is_some()
    }

    pub fn plan_ids(&self) -> Vec<String> {
        self.plans.iter().map(|p| p.id.clone()).collect()
    }

    pub fn plans(&self) -> &[PricingPlan] {
        &self.plans
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

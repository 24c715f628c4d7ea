use serde::{Deserialize, Serialize};

/// Payment recurrence for a quote. Longer cadences carry larger discounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    Monthly,
    Quarterly,
    Semestral,
    Annual,
}

impl BillingCycle {
    /// All cycles, ordered by cadence length ascending.
    pub const ALL: [BillingCycle; 4] = [
        Self::Monthly,
        Self::Quarterly,
        Self::Semestral,
        Self::Annual,
    ];

    /// Wire values accepted by the validator.
    pub const ALLOWED: &'static [&'static str] = &["monthly", "quarterly", "semestral", "annual"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Semestral => "semestral",
            Self::Annual => "annual",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "monthly" => Some(Self::Monthly),
            "quarterly" => Some(Self::Quarterly),
            "semestral" => Some(Self::Semestral),
            "annual" => Some(Self::Annual),
            _ => None,
        }
    }

    /// Cadence length in months; the deterministic tie-break for cycle
    /// comparisons that land on the same total.
    pub fn months(&self) -> u8 {
        match self {
            Self::Monthly => 1,
            Self::Quarterly => 3,
            Self::Semestral => 6,
            Self::Annual => 12,
        }
    }
}

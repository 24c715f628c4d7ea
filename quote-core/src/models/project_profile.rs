//! Catalog-selection attributes of a project.
//!
//! These three enums describe the job (scale, material grade, turnaround)
//! and drive catalog and quote-document choices elsewhere in the product.
//! None of them affects the discount rate or the price breakdown — see
//! [`crate::calculations::DiscountEngine`] for where that constraint is
//! enforced.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectSize {
    Small,
    Medium,
    Large,
}

impl ProjectSize {
    pub const ALLOWED: &'static [&'static str] = &["small", "medium", "large"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialQuality {
    Standard,
    Premium,
    Industrial,
}

impl MaterialQuality {
    pub const ALLOWED: &'static [&'static str] = &["standard", "premium", "industrial"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Premium => "premium",
            Self::Industrial => "industrial",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "standard" => Some(Self::Standard),
            "premium" => Some(Self::Premium),
            "industrial" => Some(Self::Industrial),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Normal,
    Urgent,
    Immediate,
}

impl Urgency {
    pub const ALLOWED: &'static [&'static str] = &["normal", "urgent", "immediate"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Urgent => "urgent",
            Self::Immediate => "immediate",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(Self::Normal),
            "urgent" => Some(Self::Urgent),
            "immediate" => Some(Self::Immediate),
            _ => None,
        }
    }
}

use serde::{Deserialize, Serialize};

/// How the client pays the quoted amount. Upfront payment earns the fixed
/// upfront discount; monthly installments earn nothing extra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    Monthly,
    Upfront,
}

impl PaymentType {
    pub const ALLOWED: &'static [&'static str] = &["monthly", "upfront"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Upfront => "upfront",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "monthly" => Some(Self::Monthly),
            "upfront" => Some(Self::Upfront),
            _ => None,
        }
    }
}

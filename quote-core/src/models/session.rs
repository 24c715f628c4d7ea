use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::configuration::CalculatorConfiguration;

/// Who a stored calculator session belongs to: an authenticated user id or
/// a client-generated anonymous session key. Exactly one, by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "key", rename_all = "lowercase")]
pub enum SessionOwner {
    User(String),
    Anonymous(String),
}

impl SessionOwner {
    /// Storage discriminant for the owner variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::User(_) => "user",
            Self::Anonymous(_) => "anonymous",
        }
    }

    /// The owner key itself (user id or anonymous session key).
    pub fn key(&self) -> &str {
        match self {
            Self::User(key) | Self::Anonymous(key) => key,
        }
    }

    pub fn from_kind_and_key(
        kind: &str,
        key: String,
    ) -> Option<Self> {
        match kind {
            "user" => Some(Self::User(key)),
            "anonymous" => Some(Self::Anonymous(key)),
            _ => None,
        }
    }
}

/// Persisted calculator state: either the single live (non-preset) session
/// for an owner, or one of their named presets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorSession {
    pub id: i64,
    pub owner: SessionOwner,
    pub configuration: CalculatorConfiguration,
    pub is_preset: bool,
    pub preset_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// For creating new sessions (no id or timestamps)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCalculatorSession {
    pub owner: SessionOwner,
    pub configuration: CalculatorConfiguration,
    pub is_preset: bool,
    pub preset_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn owner_kind_and_key_round_trip() {
        let user = SessionOwner::User("u-42".to_string());
        let anon = SessionOwner::Anonymous("calc-9f3a".to_string());

        assert_eq!(user.kind(), "user");
        assert_eq!(user.key(), "u-42");
        assert_eq!(
            SessionOwner::from_kind_and_key("user", "u-42".to_string()),
            Some(user)
        );
        assert_eq!(
            SessionOwner::from_kind_and_key("anonymous", "calc-9f3a".to_string()),
            Some(anon)
        );
        assert_eq!(SessionOwner::from_kind_and_key("service", "x".to_string()), None);
    }
}

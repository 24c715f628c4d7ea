use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    CalculatorConfiguration, CalculatorSession, NewCalculatorSession, SessionOwner,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    /// A second live (non-preset) session for an owner hit the storage
    /// uniqueness constraint. Callers should upsert instead.
    #[error("A live session already exists for this owner")]
    DuplicateSession,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Storage boundary for calculator sessions.
///
/// Behavioral contract every backend must honor:
/// - At most one non-preset session exists per owner; backends enforce this
///   with a storage-level uniqueness constraint, not application reads.
/// - `upsert_session` replaces the live session's configuration in place
///   (same id, `updated_at` advanced) or inserts it when absent, in one
///   atomic statement. Safe to retry.
/// - `save_as_preset` always inserts a fresh record. Never retried blindly:
///   it is not idempotent by design.
/// - Owner identity and the preset flag are immutable once a session is
///   created; `update_session` only rewrites the configuration snapshot
///   and the preset name.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn get_session(&self, id: i64) -> Result<CalculatorSession, RepositoryError>;

    /// The single non-preset session for this owner, or `None`.
    async fn get_by_owner(
        &self,
        owner: &SessionOwner,
    ) -> Result<Option<CalculatorSession>, RepositoryError>;

    /// Plain insert. Fails with [`RepositoryError::DuplicateSession`] when a
    /// live session already exists for the owner of a non-preset session.
    async fn create_session(
        &self,
        session: NewCalculatorSession,
    ) -> Result<CalculatorSession, RepositoryError>;

    async fn update_session(
        &self,
        session: &CalculatorSession,
    ) -> Result<(), RepositoryError>;

    /// Atomic insert-or-replace of the owner's live session.
    async fn upsert_session(
        &self,
        owner: &SessionOwner,
        configuration: &CalculatorConfiguration,
    ) -> Result<CalculatorSession, RepositoryError>;

    /// Stores a named preset copy. Each call inserts a new record; the live
    /// session, and any existing preset, are left untouched.
    async fn save_as_preset(
        &self,
        owner: &SessionOwner,
        configuration: &CalculatorConfiguration,
        name: &str,
    ) -> Result<CalculatorSession, RepositoryError>;

    /// Presets, most recently updated first, optionally scoped to an owner.
    async fn list_presets(
        &self,
        owner: Option<&SessionOwner>,
    ) -> Result<Vec<CalculatorSession>, RepositoryError>;

    async fn delete_session(&self, id: i64) -> Result<(), RepositoryError>;
}

use thiserror::Error;

/// Typed failures surfaced by the model layer. Nothing is swallowed; a
/// failure inside a transaction aborts it.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("uniqueness violation: {0}")]
    Uniqueness(String),
    #[error("referential integrity violation: {0}")]
    ReferentialIntegrity(String),
    #[error("device type mismatch: {0}")]
    Mismatch(String),
    #[error("cycle detected: {0}")]
    CycleDetected(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ModelError {
    pub fn db(e: sea_orm::DbErr) -> Self {
        Self::Db(e.to_string())
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self {
        Self::NotFound(format!("{} not found", entity))
    }

    pub fn db(e: sea_orm::DbErr) -> Self {
        Self::Db(e.to_string())
    }

    /// True when the underlying failure is a cycle rejection.
    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::Model(models::errors::ModelError::CycleDetected(_)))
    }
}

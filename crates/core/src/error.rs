use crate::types::DbId;

/// Domain error taxonomy shared by the persistence and HTTP layers.
///
/// Every business-rule violation is reported synchronously through one of
/// these variants; the HTTP layer maps them onto status codes.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A points spend that exceeds the current balance.
    #[error("Insufficient points: balance is {balance}, requested {requested}")]
    InsufficientPoints { balance: i64, requested: i64 },

    #[error("Internal error: {0}")]
    Internal(String),
}

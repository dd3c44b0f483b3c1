use crate::types::DbId;

/// Domain-level error taxonomy shared by the persistence and API layers.
///
/// `Unauthenticated` means no actor context at all; `Forbidden` means the
/// actor exists but lacks the required capability (e.g. a non-finance user
/// deciding a catering approval, or a non-assignee accepting a task).
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Not authenticated: {0}")]
    Unauthenticated(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

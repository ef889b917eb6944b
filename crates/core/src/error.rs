use crate::types::DbId;

/// Domain error returned by the services and the repository capabilities.
///
/// The transport layer maps each variant onto an HTTP status; the message
/// carried by `Validation` and `Conflict` is returned to the client verbatim.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("{0}")]
    Validation(String),

    /// The breed catalog answered, but does not know the requested breed.
    #[error("invalid breed")]
    InvalidBreed,

    /// A domain rule rejected the mutation.
    #[error("{0}")]
    Conflict(String),

    /// The breed catalog could not be consulted.
    #[error("{0}")]
    Upstream(String),

    /// The store refused the write because of a constraint (foreign key,
    /// unique, check).
    #[error("{0}")]
    Integrity(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        CoreError::NotFound { entity, id }
    }
}

/// Convenience alias for domain results.
pub type CoreResult<T> = Result<T, CoreError>;

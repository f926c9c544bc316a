use thiserror::Error;

/// Errors raised by user operations.
///
/// The display text is the bare message so callers can hand it straight
/// back to the client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Duplicate email on registration or on an email change.
    #[error("{0}")]
    Registration(String),

    #[error("{0}")]
    EntityNotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("Repository error: {0}")]
    Repository(String),
}

use thiserror::Error;

/// Result type for identity construction.
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Reasons a captured identity is rejected.
///
/// These never reach the visitor: the capture form swallows them and simply
/// does not advance. They exist so callers and tests can tell why.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("email is empty")]
    MissingEmail,

    #[error("email has no '@': {0}")]
    MalformedEmail(String),

    #[error("name is required but empty")]
    MissingName,
}

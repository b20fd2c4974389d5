use std::collections::BTreeMap;
use std::fmt;

/// Field name -> messages, safe to expose in full.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Closed error set shared by the service layer. The API layer maps each
/// variant to a response code; `Store` and `Internal` details are logged
/// there and never returned to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Missing/invalid/expired access credential, unknown owner, or an
    /// unverified email where one is required. One message for all causes.
    #[error("Unauthenticated")]
    Unauthenticated,
    /// Stateful token failure. The message is generic per operation family;
    /// a detected replay produces the same message as an ordinary bad token.
    #[error("{0}")]
    Token(String),
    #[error("{0}")]
    BadUserInput(String),
    #[error("invalid arguments")]
    Validation(FieldErrors),
    #[error("{0}")]
    NotFound(String),
    #[error("Forbidden")]
    Forbidden,
    #[error("store error: {0}")]
    Store(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn invalid_token() -> Self {
        ServiceError::Token("Invalid token".to_string())
    }

    pub fn not_found(entity: &str, id: impl fmt::Display) -> Self {
        ServiceError::NotFound(format!("{} with id '{}' doesn't exist", entity, id))
    }
}

//! Validated entities, read models, and the error taxonomy shared by the
//! service and storage layers.

pub mod comments;
pub mod replies;
pub mod threads;
pub mod users;

use serde_json::Value;
use std::fmt;
use thiserror::Error;

pub type DomainResult<T> = std::result::Result<T, DomainError>;

/// Failure modes surfaced by validators, repositories, and services. The HTTP
/// layer maps each variant to a status code; everything below it stays
/// transport-agnostic.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Business-rule conflict, such as a taken username or an unknown refresh
    /// token.
    #[error("{0}")]
    Invariant(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Unauthenticated(String),
    #[error(transparent)]
    Storage(#[from] rusqlite::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Machine-readable payload rejection, rendered as `ENTITY.REASON`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{entity}.{kind}")]
pub struct ValidationError {
    entity: &'static str,
    kind: ValidationKind,
}

impl ValidationError {
    pub fn new(entity: &'static str, kind: ValidationKind) -> Self {
        Self { entity, kind }
    }

    pub fn kind(&self) -> ValidationKind {
        self.kind
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    MissingProperty,
    TypeMismatch,
    UsernameTooLong,
    UsernameRestrictedCharacter,
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ValidationKind::MissingProperty => "NOT_CONTAIN_NEEDED_PROPERTY",
            ValidationKind::TypeMismatch => "NOT_MEET_DATA_TYPE_SPECIFICATION",
            ValidationKind::UsernameTooLong => "USERNAME_LIMIT_CHAR",
            ValidationKind::UsernameRestrictedCharacter => {
                "USERNAME_CONTAIN_RESTRICTED_CHARACTER"
            }
        };
        f.write_str(code)
    }
}

/// View over a raw JSON payload. Presence failures are reported before type
/// failures, checking keys in the order the entity declares them.
pub(crate) struct Payload<'a> {
    entity: &'static str,
    value: &'a Value,
}

impl<'a> Payload<'a> {
    pub(crate) fn new(entity: &'static str, value: &'a Value) -> Self {
        Self { entity, value }
    }

    /// Every key must be present, non-null, and not an empty string.
    pub(crate) fn require(&self, keys: &[&str]) -> Result<(), ValidationError> {
        for key in keys {
            let present = match self.value.get(key) {
                None | Some(Value::Null) => false,
                Some(Value::String(text)) => !text.is_empty(),
                Some(_) => true,
            };
            if !present {
                return Err(self.error(ValidationKind::MissingProperty));
            }
        }
        Ok(())
    }

    pub(crate) fn string(&self, key: &str) -> Result<String, ValidationError> {
        self.value
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| self.error(ValidationKind::TypeMismatch))
    }

    pub(crate) fn error(&self, kind: ValidationKind) -> ValidationError {
        ValidationError::new(self.entity, kind)
    }
}

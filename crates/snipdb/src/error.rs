use derive_more::Display;
use serde::{Deserialize, Serialize};
use snipdb_config::ConfigError;
use snipdb_core::{
    error::{ErrorOrigin as CoreErrorOrigin, InternalError, StoreError},
    validate::{IssueMap, ValidationError},
};
use snipdb_schema::error::SchemaError;
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Debug, Deserialize, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }

    /// Field issues, if this is a validation failure.
    #[must_use]
    pub const fn issues(&self) -> Option<&IssueMap> {
        match &self.kind {
            ErrorKind::Validation(issues) => Some(issues),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self.kind, ErrorKind::Validation(_))
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        let message = err.to_string();

        Self::new(
            ErrorKind::Validation(err.into_issues()),
            ErrorOrigin::Codec,
            message,
        )
    }
}

impl From<InternalError> for Error {
    fn from(err: InternalError) -> Self {
        let kind = match err.store_error() {
            Some(store) => ErrorKind::Store(store.into()),
            None => ErrorKind::Internal,
        };

        Self::new(kind, err.origin.into(), err.message)
    }
}

impl From<SchemaError> for Error {
    fn from(err: SchemaError) -> Self {
        Self::new(ErrorKind::Schema, ErrorOrigin::Schema, err.to_string())
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorKind::Config, ErrorOrigin::Config, err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::new(ErrorKind::Input, ErrorOrigin::Wire, err.to_string())
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers and transport layers.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum ErrorKind {
    /// Configuration could not be loaded.
    Config,

    /// Request body is not a key/value object.
    Input,

    /// The caller cannot remediate this.
    Internal,

    /// A declared schema is inconsistent.
    Schema,

    Store(StoreErrorKind),

    /// Field name -> reasons; nothing was persisted.
    Validation(IssueMap),
}

///
/// StoreErrorKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum StoreErrorKind {
    Conflict,
    NotFound,
    Unavailable,
}

impl From<&StoreError> for StoreErrorKind {
    fn from(err: &StoreError) -> Self {
        match err {
            StoreError::Conflict { .. } => Self::Conflict,
            StoreError::NotFound { .. } => Self::NotFound,
            StoreError::Unavailable { .. } => Self::Unavailable,
        }
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum ErrorOrigin {
    Codec,
    Config,
    Entity,
    Schema,
    Store,
    Wire,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Codec => Self::Codec,
            CoreErrorOrigin::Entity => Self::Entity,
            CoreErrorOrigin::Store => Self::Store,
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_keep_their_kind() {
        let err: Error = InternalError::from(StoreError::NotFound {
            entity: "snippet",
            key: 4,
        })
        .into();

        assert_eq!(err.kind, ErrorKind::Store(StoreErrorKind::NotFound));
        assert_eq!(err.origin, ErrorOrigin::Store);
        assert_eq!(err.message, "no snippet with key 4");
    }

    #[test]
    fn invariants_are_internal() {
        let err: Error = InternalError::entity_invariant("bad shape").into();

        assert_eq!(err.kind, ErrorKind::Internal);
        assert_eq!(err.origin, ErrorOrigin::Entity);
        assert!(err.issues().is_none());
    }

    #[test]
    fn validation_carries_issues() {
        let mut issues = IssueMap::new();
        issues.add("code", "This field is required.");
        let err: Error = ValidationError { issues }.into();

        assert!(err.is_validation());
        assert_eq!(
            err.issues().map(|i| i.messages("code").to_vec()),
            Some(vec!["This field is required.".to_string()])
        );
    }

    #[test]
    fn malformed_json_is_an_input_error() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{")
            .expect_err("truncated")
            .into();

        assert_eq!(err.kind, ErrorKind::Input);
        assert_eq!(err.origin.to_string(), "Wire");
    }
}

use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured runtime error with a stable internal classification.
/// Not a stable API; the facade maps it onto its public error.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    /// The variant (if present) must correspond to `origin`.
    pub detail: Option<ErrorDetail>,
}

impl InternalError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    /// Construct a codec-origin invariant violation.
    pub(crate) fn codec_invariant(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvariantViolation,
            ErrorOrigin::Codec,
            message.into(),
        )
    }

    /// Construct an entity-origin invariant violation.
    pub fn entity_invariant(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvariantViolation,
            ErrorOrigin::Entity,
            message.into(),
        )
    }

    #[must_use]
    pub const fn store_error(&self) -> Option<&StoreError> {
        match &self.detail {
            Some(ErrorDetail::Store(err)) => Some(err),
            None => None,
        }
    }

    #[must_use]
    pub const fn is_store_failure(&self) -> bool {
        matches!(self.origin, ErrorOrigin::Store)
    }
}

impl From<StoreError> for InternalError {
    fn from(err: StoreError) -> Self {
        let class = match err {
            StoreError::NotFound { .. } => ErrorClass::NotFound,
            StoreError::Conflict { .. } => ErrorClass::Conflict,
            StoreError::Unavailable { .. } => ErrorClass::Unavailable,
        };

        Self {
            class,
            origin: ErrorOrigin::Store,
            message: err.to_string(),
            detail: Some(ErrorDetail::Store(err)),
        }
    }
}

///
/// ErrorDetail
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error(transparent)]
    Store(StoreError),
}

///
/// StoreError
///
/// Failures raised by a store collaborator. The codec never recovers from
/// these; they surface unchanged inside `InternalError::detail`.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum StoreError {
    #[error("no {entity} with key {key}")]
    NotFound { entity: &'static str, key: u64 },

    #[error("{entity} write conflicts with existing data: {message}")]
    Conflict {
        entity: &'static str,
        message: String,
    },

    #[error("store unavailable: {message}")]
    Unavailable { message: String },
}

///
/// ErrorClass
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Conflict,
    Internal,
    InvariantViolation,
    NotFound,
    Unavailable,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Conflict => "conflict",
            Self::Internal => "internal",
            Self::InvariantViolation => "invariant_violation",
            Self::NotFound => "not_found",
            Self::Unavailable => "unavailable",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Codec,
    Entity,
    Store,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Codec => "codec",
            Self::Entity => "entity",
            Self::Store => "store",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_keeps_detail() {
        let err = InternalError::from(StoreError::NotFound {
            entity: "note",
            key: 9,
        });

        assert_eq!(err.class, ErrorClass::NotFound);
        assert_eq!(err.origin, ErrorOrigin::Store);
        assert_eq!(err.message, "no note with key 9");
        assert_eq!(
            err.store_error(),
            Some(&StoreError::NotFound {
                entity: "note",
                key: 9
            })
        );
    }

    #[test]
    fn invariant_errors_have_no_store_detail() {
        let err = InternalError::codec_invariant("missing field");

        assert!(err.store_error().is_none());
        assert!(!err.is_store_failure());
    }
}

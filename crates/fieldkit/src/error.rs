use derive_more::Display;
use fieldkit_core::{
    Error as CoreError,
    field::FieldError,
    model::ModelError,
    validate::{Reason, ValidateError},
};
use serde::{Deserialize, Serialize};
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

    /// Every failed rule, for `ErrorKind::ValidationFailed`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<Reason>,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
            reasons: Vec::new(),
        }
    }
}

impl From<CoreError> for Error {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::FieldError(err) => err.into(),
            CoreError::ModelError(err) => err.into(),
            CoreError::ValidateError(err) => err.into(),
        }
    }
}

impl From<FieldError> for Error {
    fn from(err: FieldError) -> Self {
        let kind = match err {
            FieldError::Custom(_) => ErrorKind::Conversion,
            FieldError::InvalidFieldType(_) => ErrorKind::InvalidFieldType,
            FieldError::MissingParameter(_) => ErrorKind::MissingParameter,
            FieldError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            FieldError::UnknownOption(_) => ErrorKind::UnknownOption,
        };

        Self::new(kind, ErrorOrigin::Field, err.to_string())
    }
}

impl From<ModelError> for Error {
    fn from(err: ModelError) -> Self {
        let kind = match err {
            ModelError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            ModelError::InvalidDirection { .. } => ErrorKind::InvalidDirection,
            ModelError::UndefinedField { .. } => ErrorKind::UndefinedField,
        };

        Self::new(kind, ErrorOrigin::Model, err.to_string())
    }
}

impl From<ValidateError> for Error {
    fn from(err: ValidateError) -> Self {
        let message = err.to_string();

        match err {
            ValidateError::UnknownValidator(_) => {
                Self::new(ErrorKind::UnknownValidator, ErrorOrigin::Validate, message)
            }
            ValidateError::ValidationFailed(reasons) => Self {
                reasons,
                ..Self::new(ErrorKind::ValidationFailed, ErrorOrigin::Validate, message)
            },
        }
    }
}

///
/// ErrorKind
/// Public error taxonomy. Everything except `ValidationFailed` is a
/// programmer error at a declaration or call site.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum ErrorKind {
    /// A user-supplied converter or constructor rejected its input.
    Conversion,

    InvalidArgument,

    /// Strict re-typing toward a class that is not a strict descendant.
    InvalidDirection,

    InvalidFieldType,
    MissingParameter,

    /// An array-typed field was given something other than a list.
    TypeMismatch,

    UndefinedField,
    UnknownOption,
    UnknownValidator,

    /// `validate()` on an invalid instance; see `Error::reasons`.
    ValidationFailed,
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Field,
    Model,
    Validate,
}

use crate::{ThisError, field::FieldError, model::ModelError, validate::ValidateError};
use std::convert::Infallible;

///
/// Error
///
/// Every failure raised by the engine. All of them are programmer errors in
/// a model declaration or call site, never transient conditions.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    FieldError(#[from] FieldError),

    #[error(transparent)]
    ModelError(#[from] ModelError),

    #[error(transparent)]
    ValidateError(#[from] ValidateError),
}

impl Error {
    /// Wrap a failure raised by a user-supplied converter or constructor.
    pub fn custom(message: impl Into<String>) -> Self {
        FieldError::Custom(message.into()).into()
    }
}

impl From<Infallible> for Error {
    fn from(err: Infallible) -> Self {
        match err {}
    }
}

//! ## Crate layout
//! - `core`: field descriptors, class registries, model instances, values,
//!   custom types and the validation engine.
//! - `error`: public error type with a stable kind + origin taxonomy.
//! - `tracing`: subscriber setup for the engine's structured logs.
//!
//! The `prelude` module is the surface most callers need.

pub use fieldkit_core as core;

pub mod error;
pub mod tracing;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{Error, ErrorKind, ErrorOrigin};

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        event::DID_CHANGE,
        field::{ConstructOptions, DefaultValue, FieldDescriptor, FieldOptions, FieldType},
        model::{Model, ModelClass, ModelClassBuilder, Retype},
        types::{CustomObject, CustomType, CustomValue, DateTime, LocalDateTime},
        validate::{Reason, Subject, Validator, Validity, Verdict},
        value::Value,
    };
    pub use crate::{Error, ErrorKind, ErrorOrigin};
}

//! Core runtime for fieldkit: typed field descriptors, per-class field
//! registries, per-instance value stores, validation chains and the
//! specialization / mutation operations on live model instances.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod error;
pub mod event;
pub mod field;
pub mod model;
pub mod types;
pub mod validate;
pub mod value;

pub use error::Error;
pub(crate) use thiserror::Error as ThisError;

///
/// Prelude
///
/// Domain vocabulary only: classes, instances, values and validation results.
///

pub mod prelude {
    pub use crate::{
        event::DID_CHANGE,
        field::{ConstructOptions, DefaultValue, FieldDescriptor, FieldOptions, FieldType},
        model::{Model, ModelClass, ModelClassBuilder, Retype},
        types::{CustomObject, CustomType, CustomValue, DateTime, LocalDateTime},
        validate::{Reason, Subject, Validator, Validity, Verdict},
        value::Value,
    };
}

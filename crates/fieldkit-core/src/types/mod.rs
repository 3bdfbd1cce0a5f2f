mod date_time;

#[cfg(test)]
mod tests;

use crate::{Error, value::Value};
use derive_more::Deref;
use std::{any::Any, fmt::Debug, sync::Arc};

// re-exports
pub use date_time::{DateTime, DateTimeType, LocalDateTime, LocalDateTimeType};

///
/// CustomType
///
/// Any constructor that is neither a scalar, a generic container nor a
/// model class. Fields declared with a custom type build a fresh value
/// object from the raw input on every write.
///

pub trait CustomType: Debug + Send + Sync + 'static {
    /// Name of the constructed type, for diagnostics.
    fn name(&self) -> &str;

    /// Build a value object from raw input.
    fn construct(&self, raw: &Value) -> Result<CustomValue, Error>;

    /// Whether constructed values expose a plain representation.
    /// When false, serialization passes the value object through untouched.
    fn has_plain_form(&self) -> bool {
        true
    }
}

///
/// CustomObject
///
/// An immutable value object produced by a `CustomType`.
///

pub trait CustomObject: Debug + Send + Sync + 'static {
    fn type_name(&self) -> &'static str;

    /// Plain, JSON-compatible rendering of this object, if it has one.
    fn to_plain(&self) -> Option<Value> {
        None
    }

    fn eq_object(&self, other: &dyn CustomObject) -> bool;

    fn as_any(&self) -> &dyn Any;
}

///
/// CustomValue
///
/// Shared handle to a value object. Value objects are immutable, so clones
/// share the allocation.
///

#[derive(Clone, Debug, Deref)]
pub struct CustomValue(Arc<dyn CustomObject>);

impl CustomValue {
    pub fn new(object: impl CustomObject) -> Self {
        Self(Arc::new(object))
    }

    #[must_use]
    pub fn downcast_ref<T: CustomObject>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    #[must_use]
    pub fn is<T: CustomObject>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }
}

impl PartialEq for CustomValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.eq_object(other.0.as_ref())
    }
}

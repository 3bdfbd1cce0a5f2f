mod convert;
mod options;
mod serialize;

#[cfg(test)]
mod tests;

use crate::{
    Error, ThisError,
    model::ModelClass,
    types::CustomType,
    validate::{Subject, Validator, Validity, check_chain},
    value::Value,
};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Debug, Display},
    str::FromStr,
    sync::Arc,
};

// re-exports
pub use convert::resolve_converter;
pub use options::{DefaultValue, FieldOptions};
pub use serialize::{resolve_serializer, serialize_value};

/// Coerces raw input into a field's typed representation.
pub type Converter = Arc<dyn Fn(&Value, &ConstructOptions) -> Result<Value, Error> + Send + Sync>;

/// Turns a typed field value into plain data.
pub type Serializer = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

///
/// FieldError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum FieldError {
    #[error("conversion failed: {0}")]
    Custom(String),

    #[error("invalid field type '{0}'")]
    InvalidFieldType(String),

    #[error("'{0}' parameter is missing")]
    MissingParameter(&'static str),

    #[error("type mismatch ({expected} was expected, found {found})")]
    TypeMismatch { expected: String, found: String },

    #[error("option '{0}' is unknown")]
    UnknownOption(String),
}

impl FieldError {
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

///
/// ConstructOptions
///
/// Options threaded through construction and nested-model conversion.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConstructOptions {
    /// Fill absent fields from their declared defaults after the raw pass.
    pub use_default_values: bool,
}

impl ConstructOptions {
    /// Options used when rebuilding from a trusted serialized form.
    #[must_use]
    pub const fn without_defaults() -> Self {
        Self {
            use_default_values: false,
        }
    }
}

impl Default for ConstructOptions {
    fn default() -> Self {
        Self {
            use_default_values: true,
        }
    }
}

///
/// FieldType
///
/// Declared type of a field. Drives which converter and serializer a
/// descriptor resolves to.
///

#[derive(Clone)]
#[remain::sorted]
pub enum FieldType {
    Array,
    Bool,
    Custom(Arc<dyn CustomType>),
    Model(ModelClass),
    Number,
    Object,
    Text,
}

impl FieldType {
    #[must_use]
    pub const fn is_model(&self) -> bool {
        matches!(self, Self::Model(_))
    }
}

impl Debug for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(ty) => write!(f, "Custom({})", ty.name()),
            Self::Model(class) => write!(f, "Model({})", class.name()),
            other => write!(f, "{other}"),
        }
    }
}

impl Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Array => f.write_str("array"),
            Self::Bool => f.write_str("boolean"),
            Self::Custom(ty) => f.write_str(ty.name()),
            Self::Model(class) => f.write_str(class.name()),
            Self::Number => f.write_str("number"),
            Self::Object => f.write_str("object"),
            Self::Text => f.write_str("string"),
        }
    }
}

impl FromStr for FieldType {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "array" => Ok(Self::Array),
            "bool" | "boolean" => Ok(Self::Bool),
            "number" => Ok(Self::Number),
            "object" => Ok(Self::Object),
            "string" | "text" => Ok(Self::Text),
            "" => Err(FieldError::MissingParameter("type")),
            other => Err(FieldError::InvalidFieldType(other.to_string())),
        }
    }
}

impl TryFrom<&str> for FieldType {
    type Error = FieldError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ModelClass> for FieldType {
    fn from(class: ModelClass) -> Self {
        Self::Model(class)
    }
}

impl From<&ModelClass> for FieldType {
    fn from(class: &ModelClass) -> Self {
        Self::Model(class.clone())
    }
}

impl From<Arc<dyn CustomType>> for FieldType {
    fn from(ty: Arc<dyn CustomType>) -> Self {
        Self::Custom(ty)
    }
}

///
/// FieldDescriptor
///
/// One declared field: name, declared type, resolved converter and
/// serializer, optional default and its validator chain. Immutable once
/// built and owned by exactly one class registry.
///

pub struct FieldDescriptor {
    name: String,
    field_type: FieldType,
    converter: Converter,
    serializer: Serializer,
    default_value: Option<DefaultValue>,
    validators: Vec<Validator>,
}

impl FieldDescriptor {
    /// Declare a field, resolving its type and applying option overrides.
    pub fn new(
        name: impl Into<String>,
        field_type: FieldType,
        options: FieldOptions,
    ) -> Result<Self, Error> {
        let name = name.into();
        if name.is_empty() {
            return Err(FieldError::MissingParameter("name").into());
        }

        let FieldOptions {
            converter,
            serializer,
            default_value,
            validators,
        } = options;

        let validators = validators
            .into_iter()
            .map(Validator::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            converter: converter.unwrap_or_else(|| resolve_converter(&field_type)),
            serializer: serializer.unwrap_or_else(|| resolve_serializer(&field_type)),
            name,
            field_type,
            default_value,
            validators,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    #[must_use]
    pub const fn default_value(&self) -> Option<&DefaultValue> {
        self.default_value.as_ref()
    }

    #[must_use]
    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    /// Coerce a non-null raw value into this field's typed representation.
    pub fn convert(&self, raw: &Value, options: &ConstructOptions) -> Result<Value, Error> {
        (self.converter)(raw, options)
    }

    /// Render a typed value as plain data.
    #[must_use]
    pub fn serialize(&self, value: &Value) -> Value {
        (self.serializer)(value)
    }

    /// Run this field's validator chain against `value`, reporting failures
    /// under `path`. Model-valued fields also contribute their own issues.
    #[must_use]
    pub fn check_validity(&self, value: Option<&Value>, path: &str) -> Validity {
        let mut reasons = Vec::new();
        check_chain(&self.validators, Subject::from(value), path, &mut reasons);

        if let Some(Value::Model(nested)) = value {
            reasons.extend(nested.check_validity_at(path).into_reasons());
        }

        Validity::from_reasons(reasons)
    }
}

impl Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .field("default_value", &self.default_value)
            .field("validators", &self.validators)
            .finish_non_exhaustive()
    }
}

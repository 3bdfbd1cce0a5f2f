use crate::{
    Error,
    field::{
        ConstructOptions, Converter, FieldError, Serializer, convert::converter,
        serialize::serializer,
    },
    model::Model,
    validate::ValidatorSpec,
    value::Value,
};
use std::{
    fmt::{self, Debug},
    sync::Arc,
};

///
/// DefaultValue
///
/// Either a concrete value or a producer invoked with the instance, so a
/// default may depend on fields that are already set.
///

#[derive(Clone)]
pub enum DefaultValue {
    Producer(Arc<dyn Fn(&Model) -> Value + Send + Sync>),
    Value(Value),
}

impl DefaultValue {
    #[must_use]
    pub fn resolve(&self, model: &Model) -> Value {
        match self {
            Self::Producer(produce) => produce(model),
            Self::Value(value) => value.clone(),
        }
    }
}

impl Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Producer(_) => f.write_str("Producer(..)"),
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

///
/// FieldOptions
///
/// Optional overrides applied when a field is declared. Validator names are
/// kept as written and resolved by `FieldDescriptor::new`, so an unknown
/// name fails at declaration.
///

#[derive(Clone, Default)]
pub struct FieldOptions {
    pub(crate) converter: Option<Converter>,
    pub(crate) serializer: Option<Serializer>,
    pub(crate) default_value: Option<DefaultValue>,
    pub(crate) validators: Vec<ValidatorSpec>,
}

impl FieldOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read options from a plain map.
    ///
    /// Only data-valued keys can be expressed this way: `defaultValue` and
    /// `validators` (a validator name or a list of names). Converters and
    /// serializers are functions and go through the builder methods.
    pub fn from_plain(plain: &Value) -> Result<Self, Error> {
        let Value::Map(map) = plain else {
            return Err(FieldError::type_mismatch("an options object", plain.kind_name()).into());
        };

        let mut options = Self::new();
        for (key, value) in map {
            match key.as_str() {
                "defaultValue" => options = options.default_value(value.clone()),
                "validators" => match value {
                    Value::Text(name) => options = options.validator(name.as_str()),
                    Value::List(names) => {
                        for name in names {
                            let Value::Text(name) = name else {
                                return Err(FieldError::type_mismatch(
                                    "a validator name",
                                    name.kind_name(),
                                )
                                .into());
                            };
                            options = options.validator(name.as_str());
                        }
                    }
                    other => {
                        return Err(FieldError::type_mismatch(
                            "a validator name or list of names",
                            other.kind_name(),
                        )
                        .into());
                    }
                },
                "converter" | "serializer" => {
                    return Err(FieldError::type_mismatch(
                        format!("a function for '{key}' (set it with the builder method)"),
                        value.kind_name(),
                    )
                    .into());
                }
                other => return Err(FieldError::UnknownOption(other.to_string()).into()),
            }
        }

        Ok(options)
    }

    /// Replace the type's converter.
    #[must_use]
    pub fn converter<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &ConstructOptions) -> Result<Value, Error> + Send + Sync + 'static,
    {
        self.converter = Some(converter(f));
        self
    }

    /// Replace the type's converter with an infallible mapping.
    #[must_use]
    pub fn convert_with<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.converter = Some(converter(move |raw, _| Ok(f(raw))));
        self
    }

    /// Replace the type's serializer.
    #[must_use]
    pub fn serializer<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.serializer = Some(serializer(f));
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(DefaultValue::Value(value.into()));
        self
    }

    /// Compute the default from the instance being populated.
    #[must_use]
    pub fn default_with<F>(mut self, f: F) -> Self
    where
        F: Fn(&Model) -> Value + Send + Sync + 'static,
    {
        self.default_value = Some(DefaultValue::Producer(Arc::new(f)));
        self
    }

    #[must_use]
    pub fn validator(mut self, validator: impl Into<ValidatorSpec>) -> Self {
        self.validators.push(validator.into());
        self
    }

    #[must_use]
    pub fn validators<I, V>(mut self, validators: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ValidatorSpec>,
    {
        self.validators.extend(validators.into_iter().map(Into::into));
        self
    }
}

impl Debug for FieldOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldOptions")
            .field("converter", &self.converter.is_some())
            .field("serializer", &self.serializer.is_some())
            .field("default_value", &self.default_value)
            .field("validators", &self.validators)
            .finish()
    }
}

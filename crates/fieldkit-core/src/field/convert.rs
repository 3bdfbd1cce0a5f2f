use crate::{
    Error,
    field::{ConstructOptions, Converter, FieldError, FieldType},
    model::Model,
    value::Value,
};
use std::sync::Arc;

/// Resolve the converter for a declared type.
///
/// Scalar converters are total. Object and array values are deep-copied on
/// every write; arrays reject non-list input. Model and custom types build
/// a fresh instance from the raw value.
#[must_use]
pub fn resolve_converter(field_type: &FieldType) -> Converter {
    match field_type {
        FieldType::Bool => converter(|raw, _| Ok(Value::Bool(raw.truthy()))),

        FieldType::Number => converter(|raw, _| Ok(Value::Number(raw.to_number()))),

        FieldType::Text => converter(|raw, _| {
            Ok(match raw {
                Value::Text(_) => raw.clone(),
                other => Value::Text(other.to_text()),
            })
        }),

        FieldType::Object => converter(|raw, _| Ok(raw.clone())),

        FieldType::Array => converter(|raw, _| match raw {
            Value::List(_) => Ok(raw.clone()),
            other => Err(FieldError::type_mismatch("an array", other.kind_name()).into()),
        }),

        FieldType::Model(class) => {
            let class = class.clone();

            converter(move |raw, options| {
                Model::with_options(&class, raw, *options).map(Value::from)
            })
        }

        FieldType::Custom(ty) => {
            let ty = Arc::clone(ty);

            converter(move |raw, _| ty.construct(raw).map(Value::Custom))
        }
    }
}

pub(crate) fn converter<F>(f: F) -> Converter
where
    F: Fn(&Value, &ConstructOptions) -> Result<Value, Error> + Send + Sync + 'static,
{
    Arc::new(f)
}

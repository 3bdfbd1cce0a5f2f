use crate::{
    field::{FieldType, Serializer},
    value::Value,
};
use std::sync::Arc;

/// Resolve the serializer for a declared type.
#[must_use]
pub fn resolve_serializer(field_type: &FieldType) -> Serializer {
    match field_type {
        FieldType::Object | FieldType::Array => serializer(plain_or_null),

        FieldType::Model(_) => serializer(|value| match value {
            Value::Model(model) => model.as_ref().serialize(),
            other => plain_or_null(other),
        }),

        FieldType::Custom(ty) if ty.has_plain_form() => serializer(|value| match value {
            Value::Custom(custom) => custom.to_plain().unwrap_or_else(|| value.clone()),
            other => other.clone(),
        }),

        FieldType::Bool | FieldType::Number | FieldType::Text | FieldType::Custom(_) => {
            serializer(Value::clone)
        }
    }
}

/// Recursively render any value as plain data.
///
/// `Null` renders as `None`. Map entries that render as `None` are dropped;
/// list slots are kept (as `Null`) so positions are preserved.
#[must_use]
pub fn serialize_value(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Bool(_) | Value::Number(_) | Value::Text(_) => Some(value.clone()),
        Value::Custom(custom) => Some(custom.to_plain().unwrap_or_else(|| value.clone())),
        Value::List(items) => Some(Value::List(
            items.iter().map(plain_or_null).collect(),
        )),
        Value::Map(map) => Some(Value::Map(
            map.iter()
                .filter_map(|(k, v)| serialize_value(v).map(|v| (k.clone(), v)))
                .collect(),
        )),
        Value::Model(model) => Some(model.as_ref().serialize()),
    }
}

fn plain_or_null(value: &Value) -> Value {
    serialize_value(value).unwrap_or(Value::Null)
}

pub(crate) fn serializer<F>(f: F) -> Serializer
where
    F: Fn(&Value) -> Value + Send + Sync + 'static,
{
    Arc::new(f)
}

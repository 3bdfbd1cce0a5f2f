mod cast;
mod json;


use crate::{model::Model, types::CustomValue};
use std::collections::BTreeMap;

///
/// Value
///
/// Type-erased field value. The same representation carries raw input,
/// converted (typed) field values and plain serialized output.
///
/// Null        → an explicit null; an absent slot is modelled as `None` by
///               the callers, never as `Null`.
/// Model       → a nested model instance owned by the value.
/// Custom      → an immutable value object produced by a `CustomType`.
///
/// Plain values are the JSON-compatible subset
/// `Null | Bool | Number | Text | List | Map`.
///

#[derive(Clone, Debug, Default)]
#[remain::sorted]
pub enum Value {
    Bool(bool),
    Custom(CustomValue),
    List(Vec<Self>),
    Map(BTreeMap<String, Self>),
    Model(Box<Model>),
    #[default]
    Null,
    Number(f64),
    Text(String),
}

impl Value {
    /// Build a `Map` value from `(key, value)` pairs.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Self>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a `List` value from anything convertible into values.
    pub fn list<V, I>(items: I) -> Self
    where
        V: Into<Self>,
        I: IntoIterator<Item = V>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Empty `Map`.
    #[must_use]
    pub const fn empty_map() -> Self {
        Self::Map(BTreeMap::new())
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// True for the JSON-compatible subset, recursively.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        match self {
            Self::Null | Self::Bool(_) | Self::Number(_) | Self::Text(_) => true,
            Self::List(items) => items.iter().all(Self::is_plain),
            Self::Map(map) => map.values().all(Self::is_plain),
            Self::Custom(_) | Self::Model(_) => false,
        }
    }

    /// Short name of the variant, for diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Custom(_) => "custom",
            Self::List(_) => "array",
            Self::Map(_) => "object",
            Self::Model(_) => "model",
            Self::Null => "null",
            Self::Number(_) => "number",
            Self::Text(_) => "string",
        }
    }

    ///
    /// Accessors
    ///

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_map(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_model(&self) -> Option<&Model> {
        match self {
            Self::Model(model) => Some(model),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_model_mut(&mut self) -> Option<&mut Model> {
        match self {
            Self::Model(model) => Some(model),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_custom(&self) -> Option<&CustomValue> {
        match self {
            Self::Custom(custom) => Some(custom),
            _ => None,
        }
    }

    /// Read a named member: a map entry, or a model's current field value.
    /// Every other variant has no members.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Self> {
        match self {
            Self::Map(map) => map.get(name),
            Self::Model(model) => model.field_value(name),
            _ => None,
        }
    }

    /// Length of text (in characters) or of a list; `None` for values
    /// without a length.
    #[must_use]
    pub fn length(&self) -> Option<usize> {
        match self {
            Self::Text(s) => Some(s.chars().count()),
            Self::List(items) => Some(items.len()),
            _ => None,
        }
    }
}

///
/// Conversions
///

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Model> for Value {
    fn from(model: Model) -> Self {
        Self::Model(Box::new(model))
    }
}

impl From<CustomValue> for Value {
    fn from(custom: CustomValue) -> Self {
        Self::Custom(custom)
    }
}

impl From<BTreeMap<String, Self>> for Value {
    fn from(map: BTreeMap<String, Self>) -> Self {
        Self::Map(map)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::list(items)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

macro_rules! impl_from_number {
    ( $( $ty:ty ),* ) => {
        $(
            impl From<$ty> for Value {
                #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
                fn from(n: $ty) -> Self {
                    Self::Number(n as f64)
                }
            }
        )*
    };
}

impl_from_number!(f32, f64, i8, i16, i32, i64, u8, u16, u32, u64, usize);

///
/// Equality
///
/// Structural: numbers follow IEEE comparison, nested models compare by
/// their serialized form, custom values by their own equality.
///

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Model(a), Self::Model(b)) => a == b,
            (Self::Custom(a), Self::Custom(b)) => a == b,
            _ => false,
        }
    }
}

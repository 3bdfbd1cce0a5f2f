use crate::value::Value;
use std::collections::{BTreeMap, btree_map};

///
/// ValueStore
///
/// Per-instance field slots. A missing key is an absent slot; an explicit
/// null is stored as `Value::Null`. Only names in the owning class's
/// effective registry are ever read back.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValueStore {
    values: BTreeMap<String, Value>,
}

impl ValueStore {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Write a slot, returning whether it changed under strict equality.
    /// `None` clears the slot.
    pub fn write(&mut self, name: &str, next: Option<Value>) -> bool {
        if strictly_equal(self.values.get(name), next.as_ref()) {
            return false;
        }

        match next {
            Some(value) => {
                self.values.insert(name.to_string(), value);
            }
            None => {
                self.values.remove(name);
            }
        }

        true
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.values.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, Value)> for ValueStore {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Change detection for slot writes.
///
/// Scalars compare by value (`NaN` never equals itself). Freshly converted
/// lists, maps, models and custom values are new objects, so writing one
/// always counts as a change.
#[must_use]
pub fn strictly_equal(current: Option<&Value>, next: Option<&Value>) -> bool {
    match (current, next) {
        (None, None) | (Some(Value::Null), Some(Value::Null)) => true,
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a == b,
        (Some(Value::Number(a)), Some(Value::Number(b))) => a == b,
        (Some(Value::Text(a)), Some(Value::Text(b))) => a == b,
        _ => false,
    }
}

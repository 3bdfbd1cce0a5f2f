mod class;
mod retype;
mod store;


use crate::{
    Error, ThisError,
    event::{DID_CHANGE, Listener, Listeners},
    field::{ConstructOptions, FieldDescriptor, serialize_value},
    validate::{Subject, ValidateError, Validity, check_chain},
    value::Value,
};
use std::{
    collections::BTreeMap,
    fmt::{self, Debug},
    ptr,
    sync::Arc,
};
use tracing::{debug, trace};

// re-exports
pub use class::{FieldRegistry, ModelClass, ModelClassBuilder};
pub use retype::Retype;
pub use store::{ValueStore, strictly_equal};

///
/// ModelError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum ModelError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("cannot re-type '{from}' as '{to}': target is not a strict descendant")]
    InvalidDirection { from: String, to: String },

    #[error("field '{field}' is not defined on '{class}'")]
    UndefinedField { class: String, field: String },
}

///
/// Model
///
/// A live instance: the class currently governing it, its value store and
/// its own observers. The class is a runtime descriptor and may be swapped
/// by `specialize` or `mutate` without touching the store.
///

pub struct Model {
    class: ModelClass,
    store: ValueStore,
    listeners: Listeners,
}

impl Model {
    /// Construct from raw input, applying declared defaults.
    pub fn new(class: &ModelClass, raw: &Value) -> Result<Self, Error> {
        Self::with_options(class, raw, ConstructOptions::default())
    }

    /// Construct from raw input.
    ///
    /// Every effective field reads its raw member, converting non-null
    /// input. One `DID_CHANGE` is emitted if anything was written; the
    /// default pass runs afterwards and does not notify.
    pub fn with_options(
        class: &ModelClass,
        raw: &Value,
        options: ConstructOptions,
    ) -> Result<Self, Error> {
        let mut model = Self::empty(class);
        model.assign(|name| raw.field(name), &options)?;

        Ok(model)
    }

    /// An instance with no values set and no defaults applied.
    #[must_use]
    pub fn empty(class: &ModelClass) -> Self {
        Self {
            class: class.clone(),
            store: ValueStore::default(),
            listeners: Listeners::default(),
        }
    }

    /// Rebuild from a serialized form. Defaults are not re-injected for
    /// fields the serialization omitted.
    pub fn unserialize(class: &ModelClass, plain: &Value) -> Result<Self, Error> {
        Self::with_options(class, plain, ConstructOptions::without_defaults())
    }

    /// Copy through the plain form, as `unserialize(serialize())`.
    ///
    /// Class observers see the copy being populated; instance observers
    /// and explicit null slots are not carried over.
    pub fn clone_model(&self) -> Result<Self, Error> {
        Self::unserialize(&self.class, &self.serialize())
    }

    ///
    /// Accessors
    ///

    #[must_use]
    pub const fn class(&self) -> &ModelClass {
        &self.class
    }

    /// Governed by `class` or by one of its descendants.
    #[must_use]
    pub fn is_instance_of(&self, class: &ModelClass) -> bool {
        self.class.is_a(class)
    }

    /// Same instance, not merely equal content.
    #[must_use]
    pub fn is_same(&self, other: &Self) -> bool {
        ptr::eq(self, other)
    }

    #[must_use]
    pub const fn store(&self) -> &ValueStore {
        &self.store
    }

    /// Current value of an effective field. Absent slots, inert slots left
    /// behind by re-typing and unknown names all read as `None`.
    #[must_use]
    pub fn field_value(&self, name: &str) -> Option<&Value> {
        self.class.field(name).and_then(|_| self.store.get(name))
    }

    ///
    /// Writes
    ///

    /// Write one field without notifying. `None` clears the slot and an
    /// explicit `Null` is stored unconverted. Returns whether the slot
    /// changed under strict equality.
    pub fn set_field_value(
        &mut self,
        name: &str,
        raw: Option<&Value>,
        options: ConstructOptions,
    ) -> Result<bool, Error> {
        let class = self.class.clone();
        let field = class.field(name).ok_or_else(|| ModelError::UndefinedField {
            class: class.name().to_string(),
            field: name.to_string(),
        })?;

        self.write_field(field, raw, &options)
    }

    /// Setter: write one field and notify when it changed.
    pub fn set_field(&mut self, name: &str, raw: impl Into<Value>) -> Result<bool, Error> {
        let raw = raw.into();
        let changed = self.set_field_value(name, Some(&raw), ConstructOptions::default())?;
        if changed {
            self.notify_change();
        }

        Ok(changed)
    }

    /// Clear one field and notify when it was set.
    pub fn unset_field(&mut self, name: &str) -> Result<bool, Error> {
        let changed = self.set_field_value(name, None, ConstructOptions::default())?;
        if changed {
            self.notify_change();
        }

        Ok(changed)
    }

    /// Bulk write from a raw map (or model). Fields missing from `raw` are
    /// cleared; a nullish `raw` clears everything.
    pub fn set_value(&mut self, raw: &Value, options: ConstructOptions) -> Result<bool, Error> {
        self.assign(|name| raw.field(name), &options)
    }

    /// Bulk write without the default pass.
    pub fn replace_value(&mut self, raw: &Value) -> Result<bool, Error> {
        self.assign(|name| raw.field(name), &ConstructOptions::without_defaults())
    }

    /// Fill every absent slot that has a declared default. Producers see
    /// the instance as populated so far; null results are skipped.
    pub fn apply_default_values(&mut self) -> Result<bool, Error> {
        let class = self.class.clone();
        let options = ConstructOptions::default();
        let mut changed = false;

        for field in class.fields() {
            if self.store.get(field.name()).is_some() {
                continue;
            }
            let Some(default) = field.default_value() else {
                continue;
            };

            let value = default.resolve(self);
            if !value.is_null() {
                changed |= self.write_field(field, Some(&value), &options)?;
            }
        }

        Ok(changed)
    }

    // one pass over the effective fields, then at most one notification
    fn assign<'a, F>(&mut self, read: F, options: &ConstructOptions) -> Result<bool, Error>
    where
        F: Fn(&str) -> Option<&'a Value>,
    {
        let class = self.class.clone();
        let mut changed = false;

        for field in class.fields() {
            changed |= self.write_field(field, read(field.name()), options)?;
        }

        if changed {
            self.notify_change();
        }

        if options.use_default_values {
            self.apply_default_values()?;
        }

        Ok(changed)
    }

    fn write_field(
        &mut self,
        field: &FieldDescriptor,
        raw: Option<&Value>,
        options: &ConstructOptions,
    ) -> Result<bool, Error> {
        let next = match raw {
            None => None,
            Some(Value::Null) => Some(Value::Null),
            Some(raw) => Some(field.convert(raw, options)?),
        };

        Ok(self.store.write(field.name(), next))
    }

    ///
    /// Serialization
    ///

    /// Plain form: every effective field with a non-null value, rendered
    /// by its serializer. Absent and null fields are omitted.
    #[must_use]
    pub fn serialize(&self) -> Value {
        let mut out = BTreeMap::new();

        for field in self.class.fields() {
            let Some(value) = self.store.get(field.name()) else {
                continue;
            };
            if value.is_null() {
                continue;
            }

            let plain = field.serialize(value);
            if !plain.is_null() {
                out.insert(field.name().to_string(), plain);
            }
        }

        Value::Map(out)
    }

    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        self.serialize().to_json()
    }

    /// Structural comparison against another instance or a plain value.
    #[must_use]
    pub fn is_equal_to(&self, other: &Value) -> bool {
        match other {
            Value::Null => false,
            Value::Model(model) if self.is_same(model) => true,
            Value::Model(model) => self.serialize() == model.as_ref().serialize(),
            other => serialize_value(other).is_some_and(|plain| self.serialize() == plain),
        }
    }

    ///
    /// Validation
    ///

    /// Run every model-level validator up the class chain, then every
    /// effective field's chain. Never fails.
    #[must_use]
    pub fn check_validity(&self) -> Validity {
        self.check_validity_at("")
    }

    /// Validity with reasons reported relative to `path`.
    #[must_use]
    pub fn check_validity_at(&self, path: &str) -> Validity {
        let mut reasons = Vec::new();

        for class in self.class.lineage() {
            check_chain(class.own_validators(), Subject::Model(self), path, &mut reasons);
        }

        for field in self.class.fields() {
            let field_path = join_path(path, field.name());
            let validity = field.check_validity(self.store.get(field.name()), &field_path);
            reasons.extend(validity.into_reasons());
        }

        Validity::from_reasons(reasons)
    }

    /// Validity of one field's current value.
    pub fn check_field_validity(&self, name: &str) -> Result<Validity, Error> {
        let field = self
            .class
            .field(name)
            .ok_or_else(|| ModelError::UndefinedField {
                class: self.class.name().to_string(),
                field: name.to_string(),
            })?;

        Ok(field.check_validity(self.store.get(name), name))
    }

    /// Fail with every reason when the instance is not valid.
    pub fn validate(&self) -> Result<(), Error> {
        let validity = self.check_validity();
        if validity.is_valid() {
            return Ok(());
        }

        debug!(
            class = self.class.name(),
            reasons = validity.reasons().len(),
            "validation failed"
        );

        Err(ValidateError::ValidationFailed(validity.into_reasons()).into())
    }

    ///
    /// Observers
    ///

    /// Observe `event` on this instance only.
    pub fn on<F>(&mut self, event: impl Into<String>, listener: F) -> &mut Self
    where
        F: Fn(&Self) + Send + Sync + 'static,
    {
        let listener: Listener = Arc::new(listener);
        self.listeners.add(event, listener);
        self
    }

    /// Invoke class handlers, root-most class first, then this instance's.
    pub fn emit(&self, event: &str) {
        trace!(event, class = self.class.name(), "emit");

        let lineage: Vec<&ModelClass> = self.class.lineage().collect();
        for class in lineage.into_iter().rev() {
            class.listeners().notify(event, self);
        }

        self.listeners.notify(event, self);
    }

    fn notify_change(&self) {
        self.emit(DID_CHANGE);
    }
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

impl Clone for Model {
    /// Raw deep copy of the effective field values, explicit nulls
    /// included. Nothing is converted or emitted and instance observers
    /// are not carried over; see `clone_model` for the plain round trip.
    fn clone(&self) -> Self {
        let store = self
            .class
            .fields()
            .iter()
            .filter_map(|field| {
                self.store
                    .get(field.name())
                    .map(|value| (field.name().to_string(), value.clone()))
            })
            .collect();

        Self {
            class: self.class.clone(),
            store,
            listeners: Listeners::default(),
        }
    }
}

impl PartialEq for Model {
    fn eq(&self, other: &Self) -> bool {
        self.is_same(other) || self.serialize() == other.serialize()
    }
}

impl Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("class", &self.class.name())
            .field("values", &self.store)
            .field("listeners", &self.listeners)
            .finish()
    }
}

impl serde::Serialize for Model {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.to_json(), serializer)
    }
}

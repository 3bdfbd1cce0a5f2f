use crate::{
    Error,
    field::ConstructOptions,
    model::{Model, ModelClass, ModelError},
    value::Value,
};
use tracing::debug;

///
/// Retype
///
/// How `mutate` re-types the instance: the target class (defaults to the
/// source instance's class) and whether only strict descendants are
/// accepted.
///

#[derive(Clone, Debug, Default)]
pub struct Retype {
    pub target: Option<ModelClass>,
    pub strict: bool,
}

impl Retype {
    #[must_use]
    pub fn to(target: &ModelClass) -> Self {
        Self {
            target: Some(target.clone()),
            strict: false,
        }
    }

    #[must_use]
    pub const fn strict(mut self) -> Self {
        self.strict = true;
        self
    }
}

impl Model {
    /// Rebind the instance to `target` in place.
    ///
    /// The store is untouched: fields the new class no longer declares go
    /// inert, newly declared ones start absent. Lenient re-typing to the
    /// current class is a no-op; strict re-typing only moves down the
    /// hierarchy.
    pub fn specialize(&mut self, target: &ModelClass, strict: bool) -> Result<(), Error> {
        if strict && !target.is_descendant_of(&self.class) {
            return Err(ModelError::InvalidDirection {
                from: self.class.name().to_string(),
                to: target.name().to_string(),
            }
            .into());
        }
        if self.class == *target {
            return Ok(());
        }

        debug!(from = self.class.name(), to = target.name(), "specialize");
        self.class = target.clone();

        Ok(())
    }

    /// Become structurally equivalent to `other` while keeping this
    /// instance's identity and observers. No default pass runs.
    pub fn mutate(&mut self, other: &Self, retype: Retype) -> Result<(), Error> {
        let target = retype.target.unwrap_or_else(|| other.class.clone());
        self.specialize(&target, retype.strict)?;

        debug!(
            class = self.class.name(),
            source = other.class.name(),
            "mutate"
        );
        self.assign(
            |name| other.field_value(name),
            &ConstructOptions::without_defaults(),
        )?;

        Ok(())
    }

    /// `mutate` from a dynamically typed value, which must hold a model.
    pub fn mutate_from_value(&mut self, other: &Value, retype: Retype) -> Result<(), Error> {
        match other {
            Value::Model(model) => self.mutate(model, retype),
            Value::Null => {
                Err(ModelError::InvalidArgument("'other' parameter is missing".into()).into())
            }
            other => Err(ModelError::InvalidArgument(format!(
                "expected a model instance, found {}",
                other.kind_name()
            ))
            .into()),
        }
    }
}

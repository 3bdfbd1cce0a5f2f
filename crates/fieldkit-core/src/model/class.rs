use crate::{
    Error,
    event::{Listener, Listeners},
    field::{FieldDescriptor, FieldError, FieldOptions, FieldType},
    model::Model,
    validate::{Validator, ValidatorSpec},
};
use std::{
    collections::BTreeMap,
    fmt::{self, Debug},
    iter,
    sync::Arc,
};
use tracing::debug;

///
/// FieldRegistry
///
/// A class's own field declarations plus the effective set visible on it,
/// flattened when the class is built. Ancestor registries are never
/// touched: a redeclared name gets a new descriptor that shadows the
/// inherited one for this class and its descendants only.
///

#[derive(Default)]
pub struct FieldRegistry {
    own: Vec<Arc<FieldDescriptor>>,
    index: BTreeMap<String, usize>,
    effective: Vec<Arc<FieldDescriptor>>,
}

impl FieldRegistry {
    fn declare(&mut self, field: FieldDescriptor) {
        let field = Arc::new(field);

        match self.index.get(field.name()) {
            Some(&pos) => self.own[pos] = field,
            None => {
                self.index.insert(field.name().to_string(), self.own.len());
                self.own.push(field);
            }
        }
    }

    fn seal(&mut self, parent: Option<&Self>) {
        let mut effective = parent.map_or_else(Vec::new, |p| p.effective.clone());

        for field in &self.own {
            match effective.iter().position(|f| f.name() == field.name()) {
                Some(pos) => effective[pos] = Arc::clone(field),
                None => effective.push(Arc::clone(field)),
            }
        }

        self.effective = effective;
    }

    #[must_use]
    pub fn own(&self, name: &str) -> Option<&Arc<FieldDescriptor>> {
        self.index.get(name).map(|&pos| &self.own[pos])
    }

    #[must_use]
    pub fn own_fields(&self) -> &[Arc<FieldDescriptor>] {
        &self.own
    }

    #[must_use]
    pub fn effective(&self) -> &[Arc<FieldDescriptor>] {
        &self.effective
    }
}

///
/// ModelClass
///
/// Runtime descriptor of a model type: its name, parent, field registry,
/// own model-level validators and class-level observers. Cheap to clone;
/// clones share identity.
///

#[derive(Clone)]
pub struct ModelClass(Arc<ClassNode>);

struct ClassNode {
    name: String,
    parent: Option<ModelClass>,
    registry: FieldRegistry,
    validators: Vec<Validator>,
    listeners: Listeners,
}

impl ModelClass {
    pub fn builder(name: impl Into<String>) -> ModelClassBuilder {
        ModelClassBuilder::new(name)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    #[must_use]
    pub fn parent(&self) -> Option<&Self> {
        self.0.parent.as_ref()
    }

    #[must_use]
    pub fn registry(&self) -> &FieldRegistry {
        &self.0.registry
    }

    /// Look a field up on this class, falling back through its ancestors.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Arc<FieldDescriptor>> {
        self.0
            .registry
            .own(name)
            .or_else(|| self.parent().and_then(|parent| parent.field(name)))
    }

    /// Effective fields: own plus inherited, each name exactly once.
    #[must_use]
    pub fn fields(&self) -> &[Arc<FieldDescriptor>] {
        self.0.registry.effective()
    }

    pub fn for_each_field(&self, mut visit: impl FnMut(&FieldDescriptor)) {
        for field in self.fields() {
            visit(field);
        }
    }

    #[must_use]
    pub fn own_fields(&self) -> &[Arc<FieldDescriptor>] {
        self.0.registry.own_fields()
    }

    /// Model-level validators declared on this class itself.
    #[must_use]
    pub fn own_validators(&self) -> &[Validator] {
        &self.0.validators
    }

    #[must_use]
    pub fn listeners(&self) -> &Listeners {
        &self.0.listeners
    }

    /// This class followed by each ancestor, nearest first.
    pub fn lineage(&self) -> impl Iterator<Item = &Self> {
        iter::successors(Some(self), |class| class.parent())
    }

    /// True when `ancestor` appears strictly above this class.
    #[must_use]
    pub fn is_descendant_of(&self, ancestor: &Self) -> bool {
        self.lineage().skip(1).any(|class| class == ancestor)
    }

    /// This class or one of its ancestors is `class`.
    #[must_use]
    pub fn is_a(&self, class: &Self) -> bool {
        self.lineage().any(|c| c == class)
    }
}

impl PartialEq for ModelClass {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ModelClass {}

impl Debug for ModelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelClass")
            .field("name", &self.0.name)
            .field("parent", &self.parent().map(Self::name))
            .field(
                "fields",
                &self.fields().iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

///
/// ModelClassBuilder
///
/// Collects declarations for one class. Each declaration step fails at the
/// point of misuse; `build` freezes the registry.
///

pub struct ModelClassBuilder {
    name: String,
    parent: Option<ModelClass>,
    registry: FieldRegistry,
    validators: Vec<Validator>,
    listeners: Listeners,
}

impl ModelClassBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            registry: FieldRegistry::default(),
            validators: Vec::new(),
            listeners: Listeners::default(),
        }
    }

    #[must_use]
    pub fn extends(mut self, parent: &ModelClass) -> Self {
        self.parent = Some(parent.clone());
        self
    }

    /// Declare a field with default options.
    pub fn field<T>(self, name: impl Into<String>, field_type: T) -> Result<Self, Error>
    where
        T: TryInto<FieldType>,
        T::Error: Into<Error>,
    {
        self.field_with(name, field_type, FieldOptions::default())
    }

    /// Declare a field with option overrides.
    pub fn field_with<T>(
        self,
        name: impl Into<String>,
        field_type: T,
        options: FieldOptions,
    ) -> Result<Self, Error>
    where
        T: TryInto<FieldType>,
        T::Error: Into<Error>,
    {
        let field_type = field_type.try_into().map_err(Into::<Error>::into)?;
        let field = FieldDescriptor::new(name, field_type, options)?;

        Ok(self.declare(field))
    }

    /// Register an already-built descriptor.
    #[must_use]
    pub fn declare(mut self, field: FieldDescriptor) -> Self {
        self.registry.declare(field);
        self
    }

    /// Add a model-level validator.
    pub fn validator(mut self, validator: impl Into<ValidatorSpec>) -> Result<Self, Error> {
        self.validators.push(Validator::try_from(validator.into())?);

        Ok(self)
    }

    /// Observe `event` on every instance of this class and its subclasses.
    #[must_use]
    pub fn on<F>(mut self, event: impl Into<String>, listener: F) -> Self
    where
        F: Fn(&Model) + Send + Sync + 'static,
    {
        let listener: Listener = Arc::new(listener);
        self.listeners.add(event, listener);
        self
    }

    pub fn build(self) -> Result<ModelClass, Error> {
        let Self {
            name,
            parent,
            mut registry,
            validators,
            listeners,
        } = self;

        if name.is_empty() {
            return Err(FieldError::MissingParameter("name").into());
        }

        registry.seal(parent.as_ref().map(ModelClass::registry));

        debug!(
            class = %name,
            parent = parent.as_ref().map_or("-", ModelClass::name),
            own_fields = registry.own_fields().len(),
            effective_fields = registry.effective().len(),
            "model class built"
        );

        Ok(ModelClass(Arc::new(ClassNode {
            name,
            parent,
            registry,
            validators,
            listeners,
        })))
    }
}

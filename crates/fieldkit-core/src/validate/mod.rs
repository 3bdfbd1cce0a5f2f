mod rule;

#[cfg(test)]
mod tests;

use crate::{ThisError, model::Model, value::Value};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Debug, Display},
    sync::Arc,
};

// re-exports
pub use rule::Rule;

/// User-supplied validator function.
pub type CheckFn = Arc<dyn Fn(Subject<'_>, &str) -> Verdict + Send + Sync>;

///
/// ValidateError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum ValidateError {
    #[error("validator '{0}' is unknown")]
    UnknownValidator(String),

    #[error("validation failed (reasons=[{}])", render_reasons(.0))]
    ValidationFailed(Vec<Reason>),
}

fn render_reasons(reasons: &[Reason]) -> String {
    reasons
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

///
/// Reason
///
/// One failed rule and the dotted path of the value it rejected. The root
/// of a model has the empty path.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reason {
    pub failed_validator: String,
    pub path: String,
}

impl Reason {
    pub fn new(failed_validator: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            failed_validator: failed_validator.into(),
            path: path.into(),
        }
    }
}

impl Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{failedValidator: '{}', path: '{}'}}",
            self.failed_validator, self.path
        )
    }
}

///
/// Validity
///
/// Structured outcome of a validity check. Checking never fails; a failed
/// check carries at least one reason.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Validity {
    valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    reasons: Vec<Reason>,
}

impl Validity {
    #[must_use]
    pub const fn valid() -> Self {
        Self {
            valid: true,
            reasons: Vec::new(),
        }
    }

    /// Invalid exactly when `reasons` is non-empty.
    #[must_use]
    pub fn from_reasons(reasons: Vec<Reason>) -> Self {
        Self {
            valid: reasons.is_empty(),
            reasons,
        }
    }

    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    #[must_use]
    pub fn reasons(&self) -> &[Reason] {
        &self.reasons
    }

    #[must_use]
    pub fn into_reasons(self) -> Vec<Reason> {
        self.reasons
    }
}

///
/// Verdict
///
/// What a validator function returns: a plain pass/fail, or a full
/// `Validity` carrying its own reasons.
///

#[derive(Clone, Debug)]
pub enum Verdict {
    Fail,
    Pass,
    Report(Validity),
}

impl From<bool> for Verdict {
    fn from(ok: bool) -> Self {
        if ok { Self::Pass } else { Self::Fail }
    }
}

impl From<Option<bool>> for Verdict {
    fn from(ok: Option<bool>) -> Self {
        ok.unwrap_or(false).into()
    }
}

impl From<Validity> for Verdict {
    fn from(validity: Validity) -> Self {
        Self::Report(validity)
    }
}

///
/// Subject
///
/// The thing a validator looks at: an absent field slot, a field value, or
/// a whole model for model-level rules.
///

#[derive(Clone, Copy, Debug)]
pub enum Subject<'a> {
    Absent,
    Model(&'a Model),
    Value(&'a Value),
}

impl<'a> Subject<'a> {
    /// Absent slots and explicit nulls.
    #[must_use]
    pub const fn is_nullish(&self) -> bool {
        matches!(self, Self::Absent | Self::Value(Value::Null))
    }

    #[must_use]
    pub const fn as_value(&self) -> Option<&'a Value> {
        match *self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_model(&self) -> Option<&'a Model> {
        match *self {
            Self::Model(model) => Some(model),
            Self::Value(Value::Model(model)) => Some(model.as_ref()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&'a str> {
        self.as_value().and_then(Value::as_text)
    }

    #[must_use]
    pub fn truthy(&self) -> bool {
        match self {
            Self::Absent => false,
            Self::Model(_) => true,
            Self::Value(value) => value.truthy(),
        }
    }

    #[must_use]
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Absent | Self::Model(_) => f64::NAN,
            Self::Value(value) => value.to_number(),
        }
    }

    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Absent => "undefined".to_string(),
            Self::Model(_) => "[object Object]".to_string(),
            Self::Value(value) => value.to_text(),
        }
    }

    #[must_use]
    pub fn length(&self) -> Option<usize> {
        self.as_value().and_then(Value::length)
    }
}

impl<'a> From<Option<&'a Value>> for Subject<'a> {
    fn from(value: Option<&'a Value>) -> Self {
        value.map_or(Self::Absent, Self::Value)
    }
}

impl<'a> From<&'a Value> for Subject<'a> {
    fn from(value: &'a Value) -> Self {
        Self::Value(value)
    }
}

impl<'a> From<&'a Model> for Subject<'a> {
    fn from(model: &'a Model) -> Self {
        Self::Model(model)
    }
}

///
/// Validator
///
/// A standard rule resolved from its textual form, or a named function.
/// Resolved once at declaration; checks never re-parse.
///

#[derive(Clone)]
pub enum Validator {
    Function { name: String, check: CheckFn },
    Rule { source: String, rule: Rule },
}

impl Validator {
    /// Resolve `name` or `name(param)` against the standard rules.
    pub fn parse(source: &str) -> Result<Self, ValidateError> {
        let source = source.trim();
        let rule = Rule::parse(source)?;

        Ok(Self::Rule {
            source: source.to_string(),
            rule,
        })
    }

    /// Wrap a function. `name` is what failures report.
    pub fn function<F, R>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(Subject<'_>, &str) -> R + Send + Sync + 'static,
        R: Into<Verdict>,
    {
        Self::Function {
            name: name.into(),
            check: Arc::new(move |subject: Subject<'_>, path: &str| -> Verdict {
                f(subject, path).into()
            }),
        }
    }

    /// Name reported in failure reasons; rules render their source text.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Function { name, .. } => name,
            Self::Rule { source, .. } => source,
        }
    }

    #[must_use]
    pub fn check(&self, subject: Subject<'_>, path: &str) -> Verdict {
        match self {
            Self::Function { check, .. } => check(subject, path),
            Self::Rule { rule, .. } => rule.check(&subject).into(),
        }
    }
}

impl Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function { name, .. } => write!(f, "Function({name})"),
            Self::Rule { source, .. } => write!(f, "Rule({source})"),
        }
    }
}

impl TryFrom<&str> for Validator {
    type Error = ValidateError;

    fn try_from(source: &str) -> Result<Self, Self::Error> {
        Self::parse(source)
    }
}

///
/// ValidatorSpec
///
/// A validator as written in a declaration: either a name still to be
/// resolved or an already-built validator.
///

#[derive(Clone, Debug)]
pub enum ValidatorSpec {
    Name(String),
    Validator(Validator),
}

impl From<&str> for ValidatorSpec {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for ValidatorSpec {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<Validator> for ValidatorSpec {
    fn from(validator: Validator) -> Self {
        Self::Validator(validator)
    }
}

impl TryFrom<ValidatorSpec> for Validator {
    type Error = ValidateError;

    fn try_from(spec: ValidatorSpec) -> Result<Self, Self::Error> {
        match spec {
            ValidatorSpec::Name(name) => Self::parse(&name),
            ValidatorSpec::Validator(validator) => Ok(validator),
        }
    }
}

/// Evaluate `validators` in order against `subject`, appending failures.
///
/// A reported `Validity` contributes its own reasons; any other failure is
/// recorded under the validator's name at `path`.
pub fn check_chain(
    validators: &[Validator],
    subject: Subject<'_>,
    path: &str,
    reasons: &mut Vec<Reason>,
) {
    for validator in validators {
        match validator.check(subject, path) {
            Verdict::Pass => {}
            Verdict::Fail => reasons.push(Reason::new(validator.name(), path)),
            Verdict::Report(validity) if validity.is_valid() => {}
            Verdict::Report(validity) => reasons.extend(validity.reasons),
        }
    }
}

use crate::validate::{Subject, ValidateError};
use regex::{Regex, RegexBuilder};

///
/// Rule
///
/// The closed table of standard validators. Parameterized rules are written
/// `name(param)`, where `param` is a `/pattern/flags` literal or JSON.
///

#[derive(Clone, Debug)]
#[remain::sorted]
pub enum Rule {
    Filled,
    Match(Regex),
    MaxLength(usize),
    MinLength(usize),
    Negative,
    Positive,
    Required,
}

///
/// Param
///

enum Param {
    Json(serde_json::Value),
    Pattern(Regex),
}

impl Rule {
    pub fn parse(source: &str) -> Result<Self, ValidateError> {
        let unknown = || ValidateError::UnknownValidator(source.to_string());

        let (name, param) = match source.split_once('(') {
            Some((name, rest)) => {
                let inner = rest.strip_suffix(')').ok_or_else(unknown)?;
                (name.trim(), Some(parse_param(inner.trim()).ok_or_else(unknown)?))
            }
            None => (source, None),
        };

        match (name, param) {
            ("required", None) => Ok(Self::Required),
            ("filled", None) => Ok(Self::Filled),
            ("positive", None) => Ok(Self::Positive),
            ("negative", None) => Ok(Self::Negative),
            ("minLength", Some(Param::Json(json))) => {
                length_param(&json).map(Self::MinLength).ok_or_else(unknown)
            }
            ("maxLength", Some(Param::Json(json))) => {
                length_param(&json).map(Self::MaxLength).ok_or_else(unknown)
            }
            ("match", Some(Param::Pattern(re))) => Ok(Self::Match(re)),
            ("match", Some(Param::Json(serde_json::Value::String(pattern)))) => {
                Regex::new(&pattern).map(Self::Match).map_err(|_| unknown())
            }
            _ => Err(unknown()),
        }
    }

    #[must_use]
    pub fn check(&self, subject: &Subject<'_>) -> bool {
        match self {
            Self::Required => !subject.is_nullish(),
            Self::Filled => subject.truthy(),
            Self::Positive => subject.to_number() > 0.0,
            Self::Negative => subject.to_number() < 0.0,
            Self::MinLength(min) => subject.length().is_some_and(|len| len >= *min),
            Self::MaxLength(max) => {
                subject.is_nullish() || subject.length().is_some_and(|len| len <= *max)
            }
            Self::Match(re) => !subject.is_nullish() && re.is_match(&subject.to_text()),
        }
    }
}

fn parse_param(text: &str) -> Option<Param> {
    if let Some(body) = text.strip_prefix('/') {
        let (pattern, flags) = body.rsplit_once('/')?;
        return compile_pattern(pattern, flags).map(Param::Pattern);
    }

    serde_json::from_str(text).ok().map(Param::Json)
}

/// Compile a `/pattern/flags` literal. `g`, `y` and `u` have no bearing
/// on a single test and are accepted without effect.
fn compile_pattern(pattern: &str, flags: &str) -> Option<Regex> {
    let mut builder = RegexBuilder::new(pattern);

    for flag in flags.chars() {
        match flag {
            'i' => builder.case_insensitive(true),
            'm' => builder.multi_line(true),
            's' => builder.dot_matches_new_line(true),
            'g' | 'y' | 'u' => &mut builder,
            _ => return None,
        };
    }

    builder.build().ok()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn length_param(json: &serde_json::Value) -> Option<usize> {
    let n = json.as_f64()?;

    (n >= 0.0 && n.fract() == 0.0).then_some(n as usize)
}

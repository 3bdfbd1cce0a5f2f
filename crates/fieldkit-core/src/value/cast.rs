//! Loose casts used by the built-in converters and the standard rules.
//!
//! These follow scripting-language semantics rather than strict parsing:
//! casting junk to a number yields NaN instead of an error.

use crate::value::Value;

/// Magnitudes outside `[EXPONENT_BELOW, EXPONENT_FROM)` render in exponent form.
const EXPONENT_FROM: f64 = 1e21;
const EXPONENT_BELOW: f64 = 1e-6;

impl Value {
    /// Boolean cast.
    #[must_use]
    pub fn truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(s) => !s.is_empty(),
            Self::Custom(_) | Self::List(_) | Self::Map(_) | Self::Model(_) => true,
        }
    }

    /// Numeric cast. Never fails; unparsable input becomes NaN.
    #[must_use]
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Null => 0.0,
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::Number(n) => *n,
            Self::Text(s) => parse_loose_number(s),
            Self::List(_) => parse_loose_number(&self.to_text()),
            Self::Custom(custom) => match custom.to_plain() {
                Some(Self::Number(n)) => n,
                Some(Self::Text(s)) => parse_loose_number(&s),
                _ => f64::NAN,
            },
            Self::Map(_) | Self::Model(_) => f64::NAN,
        }
    }

    /// String cast.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => number_to_text(*n),
            Self::Text(s) => s.clone(),
            Self::List(items) => items
                .iter()
                .map(|item| match item {
                    Self::Null => String::new(),
                    other => other.to_text(),
                })
                .collect::<Vec<_>>()
                .join(","),
            Self::Custom(custom) => custom.to_plain().map_or_else(
                || format!("[object {}]", custom.type_name()),
                |plain| plain.to_text(),
            ),
            Self::Map(_) | Self::Model(_) => "[object Object]".to_string(),
        }
    }
}

/// Render a number the way a loose string cast does: integral values carry
/// no fraction, very large and very small magnitudes use a signed exponent,
/// non-finite values use their spelled-out names.
fn number_to_text(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if !(EXPONENT_BELOW..EXPONENT_FROM).contains(&n.abs()) {
        exponent_text(n)
    } else if n.fract() == 0.0 {
        format!("{n:.0}")
    } else {
        format!("{n}")
    }
}

// `{:e}` gives the shortest mantissa but leaves positive exponents unsigned
fn exponent_text(n: f64) -> String {
    let text = format!("{n:e}");

    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => text,
    }
}

/// Parse text as a number with loose semantics.
///
/// Surrounding whitespace is ignored, blank text is zero, `0x` / `0o` /
/// `0b` prefixes select a radix, `Infinity` is recognised, and anything
/// else that is not a decimal literal is NaN.
pub(crate) fn parse_loose_number(text: &str) -> f64 {
    let s = text.trim();
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        #[allow(clippy::cast_precision_loss)]
        return u64::from_str_radix(&s[2..], radix).map_or(f64::NAN, |n| n as f64);
    }

    // reject spellings the float parser accepts but a loose cast does not
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return f64::NAN;
    }

    s.parse::<f64>().unwrap_or(f64::NAN)
}

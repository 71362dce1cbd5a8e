use std::fmt;

use serde_json::Value as Json;

/// Output of a value transform, or a literal carried through untouched.
///
/// Numbers are kept apart from text because a referenced token whose value is
/// the number `0` (or `NaN`) does not produce a `var()` indirection.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputValue {
    Text(String),
    Number(f64),
}
impl OutputValue {
    pub fn text(value: impl Into<String>) -> Self {
        OutputValue::Text(value.into())
    }

    /// Truthiness as seen by the reference check of the CSS emitter.
    pub fn is_truthy(&self) -> bool {
        match self {
            OutputValue::Text(text) => !text.is_empty(),
            OutputValue::Number(n) => *n != 0.0 && !n.is_nan(),
        }
    }

    /// Literal output for a raw scalar JSON value. Composite values have none.
    pub fn from_raw(raw: &Json) -> Option<Self> {
        match raw {
            Json::String(s) => Some(OutputValue::Text(s.clone())),
            Json::Number(n) => Some(OutputValue::Number(n.as_f64().unwrap_or(f64::NAN))),
            Json::Bool(b) => Some(OutputValue::Text(b.to_string())),
            Json::Null => Some(OutputValue::Text("null".to_string())),
            Json::Array(_) | Json::Object(_) => None,
        }
    }
}
impl fmt::Display for OutputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputValue::Text(text) => f.write_str(text),
            OutputValue::Number(n) => f.write_str(&format_number(*n)),
        }
    }
}

/// Formats a number the way a JavaScript `Number` stringifies.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let abs = n.abs();
    if abs >= 1e21 || abs < 1e-6 {
        let exp = format!("{n:e}");
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exp,
        };
    }
    n.to_string()
}

/// Raw JSON rendered as the string a transform reads.
pub(crate) fn raw_text(raw: &Json) -> String {
    match raw {
        Json::String(s) => s.clone(),
        Json::Number(n) => format_number(n.as_f64().unwrap_or(f64::NAN)),
        other => other.to_string(),
    }
}

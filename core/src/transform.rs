//! Value transforms, keyed by name and picked per token by category.
//!
//! A build lists the transforms it wants by name; for every token the first
//! listed transform whose matcher accepts it produces the output value.
//! Tokens nothing matches keep their raw value.

use crate::{
    color::HslTriple,
    expression::parse_float,
    value::{raw_text, OutputValue},
    Error, Result, Token,
};

pub struct Transform {
    pub name: &'static str,
    matcher: fn(&Token) -> bool,
    transformer: fn(&Token) -> OutputValue,
}
impl Transform {
    pub fn matches(&self, token: &Token) -> bool {
        (self.matcher)(token)
    }
    pub fn apply(&self, token: &Token) -> OutputValue {
        (self.transformer)(token)
    }
}
impl std::fmt::Debug for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Transform").field(&self.name).finish()
    }
}

pub static TRANSFORMS: &[Transform] = &[
    Transform {
        name: "color/customHSL",
        matcher: |t| in_category(t, &["color"]),
        transformer: |t| OutputValue::Text(HslTriple::parse(&raw_text(&t.raw)).to_css()),
    },
    Transform {
        name: "sizes/rem",
        matcher: |t| in_category(t, &["fontSize", "space"]),
        transformer: |t| OutputValue::Text(format!("{}rem", fmt(parse_float(&raw_text(&t.raw)) / 16.0))),
    },
    Transform {
        name: "sizes/px",
        matcher: |t| in_category(t, &["radius", "borderWidth"]),
        transformer: |t| OutputValue::Text(format!("{}px", fmt(parse_float(&raw_text(&t.raw))))),
    },
    Transform {
        name: "sizes/percentage-to-decimal",
        matcher: |t| in_category(t, &["lineHeight", "opacity"]),
        transformer: |t| {
            OutputValue::Number(parse_float(&raw_text(&t.raw).replacen('%', "", 1)) / 100.0)
        },
    },
    Transform {
        name: "fonts/sohne-weights",
        matcher: |t| in_category(t, &["fontWeight"]),
        transformer: |t| OutputValue::Number(font_weight(&raw_text(&t.raw))),
    },
    Transform {
        name: "fonts/system-stack",
        // Only the sans role is gated on its category.
        matcher: |t| match t.name.as_str() {
            "font-family-sans" => in_category(t, &["fontFamily"]),
            name => font_stack(name).is_some(),
        },
        transformer: |t| {
            let stack = font_stack(&t.name).unwrap_or_default();
            OutputValue::Text(format!("'{}', {stack}", raw_text(&t.raw)))
        },
    },
];

/// Söhne ships its weights under German names.
const FONT_WEIGHTS: &[(&str, f64)] = &[
    ("Buch", 400.0),
    ("Kräftig", 500.0),
    ("Halbfett", 600.0),
    ("Dreiviertelfett", 700.0),
];
const DEFAULT_FONT_WEIGHT: f64 = 400.0;

const FONT_STACKS: &[(&str, &str)] = &[
    (
        "font-family-sans",
        "-apple-system, BlinkMacSystemFont, avenir next, avenir, segoe ui, helvetica neue, helvetica, Ubuntu, roboto, noto, arial, sans-serif",
    ),
    (
        "font-family-serif",
        "Iowan Old Style, Apple Garamond, Baskerville, Times New Roman, Droid Serif, Times, Source Serif Pro, serif, Apple Color Emoji, Segoe UI Emoji, Segoe UI Symbol",
    ),
    (
        "font-family-mono",
        "Menlo, Consolas, Monaco, Liberation Mono, Lucida Console, monospace",
    ),
];

fn in_category(token: &Token, categories: &[&str]) -> bool {
    categories.contains(&token.category.as_str())
}

fn fmt(n: f64) -> String {
    crate::value::format_number(n)
}

pub fn font_weight(name: &str) -> f64 {
    FONT_WEIGHTS
        .iter()
        .find(|(weight, _)| *weight == name)
        .map_or(DEFAULT_FONT_WEIGHT, |&(_, value)| value)
}

pub fn font_stack(name: &str) -> Option<&'static str> {
    FONT_STACKS
        .iter()
        .find(|(role, _)| *role == name)
        .map(|&(_, stack)| stack)
}

pub fn lookup(name: &str) -> Result<&'static Transform> {
    TRANSFORMS
        .iter()
        .find(|t| t.name == name)
        .ok_or_else(|| Error::UnknownTransform(name.to_string()))
}

/// The transforms of one build, in configured order.
#[derive(Debug, Clone)]
pub struct TransformChain(Vec<&'static Transform>);
impl TransformChain {
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        names
            .iter()
            .map(|name| lookup(name.as_ref()))
            .collect::<Result<Vec<_>>>()
            .map(TransformChain)
    }

    /// Output value of a token, or `None` for a composite value nothing
    /// transforms.
    pub fn apply(&self, token: &Token) -> Option<OutputValue> {
        match self.0.iter().find(|t| t.matches(token)) {
            Some(transform) => Some(transform.apply(token)),
            None => OutputValue::from_raw(&token.raw),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|t| t.name)
    }
}
impl Default for TransformChain {
    fn default() -> Self {
        TransformChain(TRANSFORMS.iter().collect())
    }
}

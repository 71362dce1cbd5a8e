use convert_case::{Case, Casing};
use indexmap::IndexMap;
use itertools::Itertools;
use serde::Deserialize;

pub mod color;
pub mod config;
pub mod dictionary;
mod error;
pub mod expression;
pub mod format;
pub mod pipeline;
pub mod reference;
pub mod split;
pub mod transform;
pub mod value;

pub use crate::config::{Loader, PassConfig, ProjectConfig};
pub use dictionary::{Token, TokenDictionary};
pub use error::{Error, Result};
pub use pipeline::{BuildPlan, Pass};
pub use value::OutputValue;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenAttributes {
    pub category: Option<String>,
}

/// A token file as authored: groups nested down to `{ value, type, ... }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TokenOrGroup {
    Token {
        value: serde_json::Value,
        #[serde(rename = "type")]
        type_: Option<String>,
        #[serde(default)]
        attributes: TokenAttributes,
    },
    Group(IndexMap<String, TokenOrGroup>),
    /// Metadata strings, arrays and the like sitting next to groups.
    Other(serde_json::Value),
}

fn slugify(s: &str) -> String {
    deunicode::deunicode(s)
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect()
}

/// Custom-property name for a token path: `["fontFamily", "sans"]` becomes
/// `font-family-sans`.
pub fn css_name(path: &[String]) -> String {
    path.iter().map(|x| slugify(x)).join(" ").to_case(Case::Kebab)
}

#[test]
fn test() {
    let path = |p: &[&str]| p.iter().map(|x| x.to_string()).collect::<Vec<_>>();
    assert_eq!(css_name(&path(&["fontFamily", "sans"])), "font-family-sans");
    assert_eq!(css_name(&path(&["color", "primary"])), "color-primary");
    assert_eq!(css_name(&path(&["space", "1.5"])), "space-1-5");
    assert_eq!(css_name(&path(&["fontWeight", "Kräftig"])), "font-weight-kraftig");
    assert_eq!(css_name(&path(&["border width", "thin"])), "border-width-thin");
}

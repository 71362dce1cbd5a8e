//! Loads token files into a flat, ordered token set.

use std::{collections::HashMap, fs, path::Path};

use indexmap::IndexMap;
use serde_json::Value as Json;
use tracing::debug;

use crate::{css_name, expression::Expression, Error, Result, TokenOrGroup};

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Kebab-case custom-property name, without the leading `--`.
    pub name: String,
    pub path: Vec<String>,
    pub category: String,
    pub type_: Option<String>,
    pub raw: Json,
    /// Authored in the pass's source files rather than pulled in by include.
    pub is_source: bool,
}
impl Token {
    pub fn is_color(&self) -> bool {
        self.type_.as_deref() == Some("color")
    }
    pub fn has_type(&self, type_: &str) -> bool {
        self.type_.as_deref() == Some(type_)
    }
}

/// Every token of one pass, in the iteration order of the merged source.
#[derive(Debug, Default)]
pub struct TokenDictionary {
    tokens: Vec<Token>,
    by_path: HashMap<Vec<String>, usize>,
}
impl TokenDictionary {
    /// Reads `include` files first and `source` files over them.
    pub fn load(source: &[impl AsRef<Path>], include: &[impl AsRef<Path>]) -> Result<Self> {
        let mut merged = Marked::Group(IndexMap::new());
        for (paths, is_source) in [(as_paths(include), false), (as_paths(source), true)] {
            for path in paths {
                debug!(path = %path.display(), is_source, "loading token file");
                let tree = read_tokens(path)?;
                merged.merge(Marked::new(tree, is_source));
            }
        }
        Ok(Self::from_marked(merged))
    }

    /// Builds a dictionary from already-parsed trees.
    pub fn from_trees(source: Vec<TokenOrGroup>, include: Vec<TokenOrGroup>) -> Self {
        let mut merged = Marked::Group(IndexMap::new());
        for tree in include {
            merged.merge(Marked::new(tree, false));
        }
        for tree in source {
            merged.merge(Marked::new(tree, true));
        }
        Self::from_marked(merged)
    }

    fn from_marked(merged: Marked) -> Self {
        let mut dictionary = TokenDictionary::default();
        merged.flatten(&mut Vec::new(), &mut dictionary);
        dictionary
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Token at a dotted reference path. A trailing `value` segment, as in
    /// `{color.white.value}`, is tolerated.
    pub fn get(&self, path: &[String]) -> Option<&Token> {
        self.by_path
            .get(path)
            .or_else(|| match path.split_last() {
                Some((last, rest)) if last == "value" => self.by_path.get(rest),
                _ => None,
            })
            .map(|&i| &self.tokens[i])
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

fn as_paths<P: AsRef<Path>>(paths: &[P]) -> Vec<&Path> {
    paths.iter().map(|p| p.as_ref()).collect()
}

pub(crate) fn read_tokens(path: &Path) -> Result<TokenOrGroup> {
    let data = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    serde_json::from_str(&data).map_err(|e| Error::json(path, e))
}

/// Token tree tagged with where each token came from.
enum Marked {
    Token {
        value: Json,
        type_: Option<String>,
        category: Option<String>,
        is_source: bool,
    },
    Group(IndexMap<String, Marked>),
    Other,
}
impl Marked {
    fn new(tree: TokenOrGroup, is_source: bool) -> Self {
        match tree {
            TokenOrGroup::Token {
                value,
                type_,
                attributes,
            } => Marked::Token {
                value,
                type_,
                category: attributes.category,
                is_source,
            },
            TokenOrGroup::Group(group) => Marked::Group(
                group
                    .into_iter()
                    .map(|(key, value)| (key, Marked::new(value, is_source)))
                    .collect(),
            ),
            TokenOrGroup::Other(_) => Marked::Other,
        }
    }

    fn merge(&mut self, other: Marked) {
        match (self, other) {
            (Marked::Group(ours), Marked::Group(theirs)) => {
                for (key, value) in theirs {
                    match ours.get_mut(&key) {
                        Some(existing) => existing.merge(value),
                        None => {
                            ours.insert(key, value);
                        }
                    }
                }
            }
            (_, Marked::Other) => {}
            (this, other) => *this = other,
        }
    }

    fn flatten(self, path: &mut Vec<String>, out: &mut TokenDictionary) {
        match self {
            Marked::Token {
                value,
                type_,
                category,
                is_source,
            } => {
                let category = category
                    .or_else(|| path.first().cloned())
                    .unwrap_or_default();
                out.by_path.insert(path.clone(), out.tokens.len());
                out.tokens.push(Token {
                    name: css_name(path),
                    path: path.clone(),
                    category,
                    type_,
                    raw: value,
                    is_source,
                });
            }
            Marked::Group(group) => {
                for (key, value) in group {
                    path.push(key);
                    value.flatten(path, out);
                    path.pop();
                }
            }
            Marked::Other => {}
        }
    }
}

/// Strings inside a raw value, depth first, in key order.
pub(crate) fn raw_strings(raw: &Json) -> Vec<&str> {
    fn walk<'a>(raw: &'a Json, out: &mut Vec<&'a str>) {
        match raw {
            Json::String(s) => out.push(s),
            Json::Array(items) => items.iter().for_each(|x| walk(x, out)),
            Json::Object(map) => map.values().for_each(|x| walk(x, out)),
            _ => {}
        }
    }
    let mut out = Vec::new();
    walk(raw, &mut out);
    out
}

/// Parsed alias expressions of every string in a raw value.
pub(crate) fn expressions(raw: &Json) -> Vec<Expression> {
    raw_strings(raw).into_iter().map(Expression::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(json: &str) -> TokenOrGroup {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn flattens_in_source_order_with_categories() {
        let dictionary = TokenDictionary::from_trees(
            vec![tree(
                r##"{
                    "color": { "primary": { "value": "#ff0000", "type": "color" } },
                    "fontSize": { "base": { "value": "16", "type": "fontSizes" } },
                    "custom": { "x": { "value": "1", "attributes": { "category": "space" } } }
                }"##,
            )],
            vec![],
        );
        let names: Vec<_> = dictionary.tokens().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["color-primary", "font-size-base", "custom-x"]);
        assert_eq!(dictionary.tokens()[0].category, "color");
        assert!(dictionary.tokens()[0].is_color());
        assert_eq!(dictionary.tokens()[2].category, "space");
        assert!(dictionary.tokens().iter().all(|t| t.is_source));
    }

    #[test]
    fn source_overrides_include_and_marks_origin() {
        let dictionary = TokenDictionary::from_trees(
            vec![tree(r##"{ "color": { "bg": { "value": "{color.white}", "type": "color" } } }"##)],
            vec![tree(
                r##"{ "color": { "white": { "value": "#fff", "type": "color" },
                                "bg": { "value": "#000", "type": "color" } } }"##,
            )],
        );
        let tokens = dictionary.tokens();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].name, "color-white");
        assert!(!tokens[0].is_source);
        assert_eq!(tokens[1].name, "color-bg");
        assert!(tokens[1].is_source);
        assert_eq!(tokens[1].raw, "{color.white}");
    }

    #[test]
    fn merged_groups_keep_include_order() {
        let dictionary = TokenDictionary::from_trees(
            vec![tree(r##"{ "color": { "b": { "value": "#fff" }, "a": { "value": "#111" } } }"##)],
            vec![tree(
                r##"{ "color": { "a": { "value": "#000" } }, "space": { "x": { "value": "4" } } }"##,
            )],
        );
        let names: Vec<_> = dictionary.tokens().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["color-a", "color-b", "space-x"]);
        assert_eq!(dictionary.tokens()[0].raw, "#111");
        assert!(dictionary.tokens()[0].is_source);
        assert!(!dictionary.tokens()[2].is_source);
    }

    #[test]
    fn lookup_by_path() {
        let dictionary = TokenDictionary::from_trees(
            vec![tree(r##"{ "color": { "white": { "value": "#fff" } }, "$meta": "ignored" }"##)],
            vec![],
        );
        let path = |p: &[&str]| p.iter().map(|x| x.to_string()).collect::<Vec<_>>();
        assert!(dictionary.get(&path(&["color", "white"])).is_some());
        assert!(dictionary.get(&path(&["color", "white", "value"])).is_some());
        assert!(dictionary.get(&path(&["color", "black"])).is_none());
        assert_eq!(dictionary.len(), 1);
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = TokenDictionary::load(&["does/not/exist.json"], &[] as &[&str]).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}

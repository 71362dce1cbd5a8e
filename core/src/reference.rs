//! Alias handling: `{color.white}` style references between tokens.
//!
//! Everything here is a pure function of a raw value and the dictionary it
//! is looked up in. [`references`] goes exactly one level deep, matching the
//! `var(--x)` chains the emitter writes; [`resolve_literal`] follows chains to
//! a final value for builds that do not output references.

use itertools::Itertools;
use serde_json::Value as Json;

use crate::{
    dictionary::{expressions, raw_strings},
    expression::{Expression, Segment},
    transform::TransformChain,
    value::OutputValue,
    Token, TokenDictionary,
};

/// Whether any string in the raw value contains an alias.
pub fn uses_reference(raw: &Json) -> bool {
    raw_strings(raw)
        .into_iter()
        .any(|s| Expression::parse(s).has_refs())
}

/// Tokens the raw value points at, in order of appearance. Aliases with no
/// matching token are skipped.
pub fn references<'a>(raw: &Json, dictionary: &'a TokenDictionary) -> Vec<&'a Token> {
    expressions(raw)
        .iter()
        .flat_map(|expr| expr.refs().map(|path| dictionary.get(path)).collect_vec())
        .flatten()
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum Unresolved {
    Missing(String),
    Cycle(String),
    Composite(String),
}
impl std::fmt::Display for Unresolved {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unresolved::Missing(path) => write!(f, "reference {{{path}}} does not exist"),
            Unresolved::Cycle(name) => write!(f, "circular reference through {name}"),
            Unresolved::Composite(name) => write!(f, "{name} has a composite value"),
        }
    }
}

/// Final output value of a token with every alias replaced by the value of
/// the token it names.
///
/// A value that is nothing but one alias takes the target's value as is,
/// numbers included; aliases embedded in text are spliced in as text.
pub fn resolve_literal(
    token: &Token,
    dictionary: &TokenDictionary,
    transforms: &TransformChain,
) -> Result<OutputValue, Unresolved> {
    resolve(token, dictionary, transforms, &mut Vec::new())
}

fn resolve<'a>(
    token: &'a Token,
    dictionary: &'a TokenDictionary,
    transforms: &TransformChain,
    stack: &mut Vec<&'a str>,
) -> Result<OutputValue, Unresolved> {
    if !uses_reference(&token.raw) {
        return transforms
            .apply(token)
            .ok_or_else(|| Unresolved::Composite(token.name.clone()));
    }
    let Json::String(raw) = &token.raw else {
        return Err(Unresolved::Composite(token.name.clone()));
    };
    if stack.contains(&token.name.as_str()) {
        return Err(Unresolved::Cycle(token.name.clone()));
    }
    stack.push(&token.name);

    let mut target = |path: &[String]| match dictionary.get(path) {
        Some(t) => resolve(t, dictionary, transforms, stack),
        None => Err(Unresolved::Missing(path.join("."))),
    };
    let expr = Expression::parse(raw);
    let result = match expr.segments.as_slice() {
        [Segment::Ref(path)] => target(path.as_slice()),
        segments => segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => Ok(text.clone()),
                Segment::Ref(path) => target(path.as_slice()).map(|v| v.to_string()),
            })
            .collect::<Result<String, _>>()
            .map(OutputValue::Text),
    };
    stack.pop();
    result
}

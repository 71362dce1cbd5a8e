//! `css/variables`: one selector block of custom properties.
//!
//! Colors become two properties so opacity can be applied downstream:
//!
//! ```css
//! :root {
//!   --color-primary-hsl: 0,100%,50%;
//!   --color-primary: hsl(var(--color-primary-hsl));
//! }
//! .overlay {
//!   background: hsl(var(--color-primary-hsl), var(--opacity-medium));
//! }
//! ```

use itertools::Itertools;
use tracing::warn;

use crate::{
    reference::{references, resolve_literal, uses_reference},
    transform::TransformChain,
    Token, TokenDictionary,
};

pub const DEFAULT_SELECTOR: &str = ":root";

#[derive(Debug, Clone, Default)]
pub struct FormatOptions {
    pub selector: Option<String>,
    /// Write aliases as `var(--target)` instead of the target's value.
    pub output_references: bool,
}

pub fn css_variables<'a>(
    dictionary: &'a TokenDictionary,
    tokens: impl IntoIterator<Item = &'a Token>,
    transforms: &TransformChain,
    options: &FormatOptions,
) -> String {
    let props = tokens
        .into_iter()
        .flat_map(|token| declarations(token, dictionary, transforms, options))
        .join("\n");
    let selector = options.selector.as_deref().unwrap_or(DEFAULT_SELECTOR);
    format!("{selector} {{\n{props}\n}}")
}

fn declarations(
    token: &Token,
    dictionary: &TokenDictionary,
    transforms: &TransformChain,
    options: &FormatOptions,
) -> Vec<String> {
    let name = if token.is_color() {
        format!("{}-hsl", token.name)
    } else {
        token.name.clone()
    };

    let mut props = Vec::new();
    if options.output_references && uses_reference(&token.raw) {
        for target in references(&token.raw, dictionary) {
            let truthy = resolve_literal(target, dictionary, transforms)
                .map_or(false, |value| value.is_truthy());
            if truthy {
                props.push(format!("  --{name}: var(--{});", target.name));
            }
        }
    } else {
        match resolve_literal(token, dictionary, transforms) {
            Ok(value) => props.push(format!("  --{name}: {value};")),
            Err(reason) => warn!(token = %token.name, %reason, "skipping declaration"),
        }
    }

    if token.is_color() {
        props.push(format!("  --{}: hsl(var(--{name}));", token.name));
    }
    props
}

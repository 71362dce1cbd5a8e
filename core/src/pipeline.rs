//! Turns a [`ProjectConfig`] into passes and runs them.
//!
//! Every pass loads its own merged token set, so passes share nothing and
//! the order they run in does not matter.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::{
    format::{css_variables, FormatOptions},
    transform::TransformChain,
    Error, PassConfig, ProjectConfig, Result, Token, TokenDictionary,
};

/// Top-level manifest key that holds theme metadata rather than tokens.
pub const THEMES_KEY: &str = "$themes";

/// A pass ready to run: its configuration plus the transforms it applies.
#[derive(Debug, Clone)]
pub struct Pass {
    pub config: PassConfig,
    transforms: TransformChain,
}
impl Pass {
    pub fn new(config: PassConfig, transforms: TransformChain) -> Self {
        Pass { config, transforms }
    }

    /// Source tokens whose type the pass does not exclude.
    pub fn includes(&self, token: &Token) -> bool {
        token.is_source
            && !self
                .config
                .exclude_types
                .iter()
                .any(|excluded| token.has_type(excluded))
    }

    pub fn render(&self) -> Result<String> {
        let dictionary = TokenDictionary::load(&self.config.source, &self.config.include)?;
        debug!(pass = %self.config.name, tokens = dictionary.len(), "loaded token set");
        Ok(self.render_dictionary(&dictionary))
    }

    pub fn render_dictionary(&self, dictionary: &TokenDictionary) -> String {
        let options = FormatOptions {
            selector: self.config.selector.clone(),
            output_references: self.config.output_references,
        };
        let tokens = dictionary.tokens().iter().filter(|t| self.includes(t));
        css_variables(dictionary, tokens, &self.transforms, &options)
    }
}

#[derive(Debug, Clone)]
pub struct BuildPlan {
    pub build_path: PathBuf,
    pub passes: Vec<Pass>,
}
impl BuildPlan {
    pub fn from_config(config: &ProjectConfig) -> Result<Self> {
        let transforms = TransformChain::from_names(&config.transforms)?;
        let configs = if !config.passes.is_empty() {
            config.passes.clone()
        } else {
            let sets = match &config.manifest {
                Some(manifest) => discover_sets(manifest)?,
                None => static_sets(config),
            };
            sets.iter().map(|set| pass_for_set(config, set)).collect()
        };
        Ok(BuildPlan {
            build_path: config.build_path.clone(),
            passes: configs
                .into_iter()
                .map(|c| Pass::new(c, transforms.clone()))
                .collect(),
        })
    }

    /// Writes every stylesheet and returns the paths written.
    pub fn run(&self) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.build_path).map_err(|e| Error::io(&self.build_path, e))?;
        let mut written = Vec::with_capacity(self.passes.len());
        for pass in &self.passes {
            let css = pass.render()?;
            let dest = self.build_path.join(&pass.config.destination);
            fs::write(&dest, css).map_err(|e| Error::io(&dest, e))?;
            info!(pass = %pass.config.name, path = %dest.display(), "wrote stylesheet");
            written.push(dest);
        }
        Ok(written)
    }
}

/// The global set followed by the configured themes.
fn static_sets(config: &ProjectConfig) -> Vec<String> {
    std::iter::once(config.global_set.clone())
        .chain(
            config
                .themes
                .iter()
                .filter(|theme| **theme != config.global_set)
                .cloned(),
        )
        .collect()
}

fn pass_for_set(config: &ProjectConfig, set: &str) -> PassConfig {
    let file = |name: &str| config.tokens_dir.join(format!("{name}.json"));
    let is_global = set == config.global_set;
    let defaults = if is_global {
        &config.global
    } else {
        config.theme_defaults()
    };
    PassConfig {
        name: set.to_string(),
        source: vec![file(set)],
        include: if is_global {
            vec![]
        } else {
            vec![file(&config.global_set)]
        },
        destination: format!("{set}.css"),
        selector: Some(defaults.selector.replace("{theme}", set)),
        output_references: defaults.output_references,
        exclude_types: config.excluded_types(is_global),
    }
}

/// Token set names of a combined manifest: its top-level keys minus
/// [`THEMES_KEY`], in file order.
pub fn discover_sets(manifest: &Path) -> Result<Vec<String>> {
    let data = fs::read_to_string(manifest).map_err(|e| Error::io(manifest, e))?;
    let json: serde_json::Value =
        serde_json::from_str(&data).map_err(|e| Error::json(manifest, e))?;
    let serde_json::Value::Object(sets) = json else {
        return Err(Error::Manifest {
            path: manifest.to_path_buf(),
            reason: "top level is not an object".to_string(),
        });
    };
    Ok(sets
        .keys()
        .filter(|key| *key != THEMES_KEY)
        .cloned()
        .collect())
}

//! Build configuration.
//!
//! `defaults/tokens.default.toml` is embedded so the stock build needs no
//! file at all. Projects layer their own TOML over it via [`Loader`] before
//! it is deserialized into [`ProjectConfig`].

use std::path::{Path, PathBuf};

use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;

use crate::Result;

const DEFAULT_TOML: &str = include_str!("../defaults/tokens.default.toml");

/// Name of the optional project file picked up from the working directory.
pub const PROJECT_FILE: &str = "design-tokens.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    pub tokens_dir: PathBuf,
    pub build_path: PathBuf,
    pub global_set: String,
    #[serde(default = "default_themes")]
    pub themes: Vec<String>,
    /// Combined token file whose top-level keys name the sets to build.
    #[serde(default)]
    pub manifest: Option<PathBuf>,
    #[serde(default = "default_transforms")]
    pub transforms: Vec<String>,
    pub global: PassDefaults,
    pub theme: PassDefaults,
    /// Replaces `theme` for the non-global sets of a manifest build.
    pub manifest_theme: PassDefaults,
    pub splitter: SplitterConfig,
    /// Explicit passes; when present they replace the derived ones.
    #[serde(default)]
    pub passes: Vec<PassConfig>,
}

/// Settings shared by the global pass or by every theme pass.
#[derive(Debug, Clone, Deserialize)]
pub struct PassDefaults {
    pub selector: String,
    pub output_references: bool,
    /// Token types left out of the stylesheet; see [`ProjectConfig::excluded_types`].
    #[serde(default)]
    pub exclude_types: Option<Vec<String>>,
}

/// External program that splits a manifest into per-set files.
#[derive(Debug, Clone, Deserialize)]
pub struct SplitterConfig {
    pub program: String,
    /// `{manifest}`, `{tokens_dir}` and `{set}` are substituted.
    #[serde(default = "default_splitter_args")]
    pub args: Vec<String>,
}

/// Composite typography tokens have no flat custom-property form.
pub const DEFAULT_EXCLUDED_TYPES: &[&str] = &["typography"];

impl ProjectConfig {
    /// Defaults for the non-global passes of this build.
    pub fn theme_defaults(&self) -> &PassDefaults {
        if self.manifest.is_some() {
            &self.manifest_theme
        } else {
            &self.theme
        }
    }

    /// Types excluded from the global pass or from theme passes. Unless
    /// configured otherwise typography is dropped from the global pass, and
    /// from every pass of a manifest build.
    pub fn excluded_types(&self, global: bool) -> Vec<String> {
        let defaults = if global {
            &self.global
        } else {
            self.theme_defaults()
        };
        match &defaults.exclude_types {
            Some(types) => types.clone(),
            None if global || self.manifest.is_some() => DEFAULT_EXCLUDED_TYPES
                .iter()
                .map(|t| t.to_string())
                .collect(),
            None => Vec::new(),
        }
    }
}

fn default_themes() -> Vec<String> {
    ["light", "dark", "yellow"].map(String::from).to_vec()
}

fn default_transforms() -> Vec<String> {
    crate::transform::TRANSFORMS
        .iter()
        .map(|t| t.name.to_string())
        .collect()
}

fn default_splitter_args() -> Vec<String> {
    [
        "{manifest}",
        "{tokens_dir}/{set}.json",
        "{set}",
        "--resolveReferences",
        "false",
    ]
    .map(String::from)
    .to_vec()
}

/// Everything one stylesheet needs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PassConfig {
    pub name: String,
    pub source: Vec<PathBuf>,
    #[serde(default)]
    pub include: Vec<PathBuf>,
    pub destination: String,
    #[serde(default)]
    pub selector: Option<String>,
    #[serde(default)]
    pub output_references: bool,
    #[serde(default)]
    pub exclude_types: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a configuration file if it exists.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<ProjectConfig> {
        Ok(self.builder.build()?.try_deserialize()?)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<ProjectConfig> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().unwrap();
        assert_eq!(config.tokens_dir, PathBuf::from("tokens"));
        assert_eq!(config.build_path, PathBuf::from("output"));
        assert_eq!(config.themes, ["light", "dark", "yellow"]);
        assert_eq!(config.transforms.len(), 6);
        assert_eq!(config.global.selector, ":root");
        assert_eq!(config.excluded_types(true), ["typography"]);
        assert!(config.excluded_types(false).is_empty());
        assert_eq!(config.theme.selector, "[data-theme=\"{theme}\"]");
        assert!(config.manifest.is_none());
        assert!(config.passes.is_empty());
    }

    #[test]
    fn files_and_overrides_layer_over_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "themes = [\"night\"]\n[global]\nexclude_types = [\"shadow\"]\n\
             [theme]\nselector = '.{{theme}}-theme'\noutput_references = false"
        )
        .unwrap();
        let config = Loader::new()
            .with_file(file.path())
            .set_override("build_path", "dist/css")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.themes, ["night"]);
        assert_eq!(config.transforms.len(), 6);
        assert_eq!(config.theme.selector, ".{theme}-theme");
        assert!(!config.theme.output_references);
        assert_eq!(config.build_path, PathBuf::from("dist/css"));
        assert_eq!(config.global.selector, ":root");
        assert_eq!(config.excluded_types(true), ["shadow"]);
    }

    #[test]
    fn manifest_builds_use_their_own_theme_defaults() {
        let mut config = load_defaults().unwrap();
        assert_eq!(config.theme_defaults().selector, "[data-theme=\"{theme}\"]");

        config.manifest = Some(PathBuf::from("tokens.json"));
        assert_eq!(
            config.theme_defaults().selector,
            "[data-theme=\"{theme}\"], .{theme}-theme"
        );
        assert!(config.theme_defaults().output_references);
        assert_eq!(config.excluded_types(true), ["typography"]);
        assert_eq!(config.excluded_types(false), ["typography"]);

        config.manifest_theme.exclude_types = Some(vec![]);
        assert!(config.excluded_types(false).is_empty());
    }

    #[test]
    fn missing_required_file_fails() {
        assert!(Loader::new().with_file("no/such/config.toml").build().is_err());
        assert!(Loader::new()
            .with_optional_file("no/such/config.toml")
            .build()
            .is_ok());
    }
}

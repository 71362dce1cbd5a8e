//! Materializes per-set token files from a combined manifest by running the
//! external splitter once per set.

use std::{fs, path::Path, process::Command};

use tracing::info;

use crate::{config::SplitterConfig, pipeline::discover_sets, Error, ProjectConfig, Result};

/// Arguments for one splitter run.
pub fn splitter_args(
    splitter: &SplitterConfig,
    manifest: &Path,
    tokens_dir: &Path,
    set: &str,
) -> Vec<String> {
    splitter
        .args
        .iter()
        .map(|arg| {
            arg.replace("{manifest}", &manifest.display().to_string())
                .replace("{tokens_dir}", &tokens_dir.display().to_string())
                .replace("{set}", set)
        })
        .collect()
}

/// Runs the splitter for every set in the configured manifest and returns
/// the set names.
pub fn split_manifest(config: &ProjectConfig) -> Result<Vec<String>> {
    let Some(manifest) = &config.manifest else {
        return Err(Error::Manifest {
            path: config.tokens_dir.clone(),
            reason: "no manifest configured".to_string(),
        });
    };
    let sets = discover_sets(manifest)?;
    fs::create_dir_all(&config.tokens_dir).map_err(|e| Error::io(&config.tokens_dir, e))?;
    for set in &sets {
        let args = splitter_args(&config.splitter, manifest, &config.tokens_dir, set);
        info!(set = %set, program = %config.splitter.program, "splitting token set");
        let status = Command::new(&config.splitter.program)
            .args(&args)
            .status()
            .map_err(|e| Error::Splitter {
                set: set.clone(),
                reason: e.to_string(),
            })?;
        if !status.success() {
            return Err(Error::Splitter {
                set: set.clone(),
                reason: format!("exited with {status}"),
            });
        }
    }
    Ok(sets)
}

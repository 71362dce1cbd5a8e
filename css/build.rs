use std::{env, fs, path::Path};

use design_tokens_core::{config::Loader, BuildPlan};

fn main() {
    let tokens_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../tokens");
    let out_dir = env::var("OUT_DIR").unwrap();

    let config = Loader::new()
        .set_override("tokens_dir", tokens_dir.display().to_string())
        .unwrap()
        .set_override("build_path", out_dir.clone())
        .unwrap()
        .build()
        .unwrap();
    let plan = BuildPlan::from_config(&config).unwrap();
    let written = plan.run().unwrap();

    let entries = plan
        .passes
        .iter()
        .zip(&written)
        .map(|(pass, path)| format!("    ({:?}, include_str!({:?})),", pass.config.name, path.display().to_string()))
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(
        Path::new(&out_dir).join("stylesheets.rs"),
        format!("/// Generated stylesheets, keyed by token set.\npub static STYLESHEETS: &[(&str, &str)] = &[\n{entries}\n];\n"),
    )
    .unwrap();

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed={}", tokens_dir.display());
}

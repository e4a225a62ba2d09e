//! `structwire init`: project scaffolding.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::manifest::{StructwireManifest, MANIFEST_FILE};

/// Starter schema written by `structwire init`.
pub const SAMPLE_SCHEMA: &str = r#"{
    "sizeof": {
        "uint8_t":  {"size": 1},
        "uint16_t": {"size": 2},
        "uint32_t": {"size": 4}
    },
    "structs": {
        "point": {
            "comment": "2D point",
            "x": {"type": "uint32_t", "comment": "abscissa"},
            "y": {"type": "uint8_t", "comment": "ordinate"}
        },
        "frame": {
            "id":     {"type": "uint16_t"},
            "origin": {"type": "point"},
            "data":   {"type": "uint8_t", "len": 3, "comment": "payload"}
        }
    },
    "endianness": {"host": "little", "network": "big"}
}
"#;

/// Create a new structwire project at the given path.
pub fn run(name: &str) -> Result<()> {
    let project_dir = Path::new(name);
    create_project(project_dir, name)
}

pub(crate) fn create_project(project_dir: &Path, name: &str) -> Result<()> {
    if project_dir.exists() {
        bail!("directory '{}' already exists", project_dir.display());
    }

    fs::create_dir_all(project_dir)
        .with_context(|| format!("creating {}", project_dir.display()))?;

    fs::write(
        project_dir.join(MANIFEST_FILE),
        StructwireManifest::template(name),
    )
    .context("writing structwire.toml")?;

    fs::write(project_dir.join("schema.json"), SAMPLE_SCHEMA).context("writing schema.json")?;

    fs::write(project_dir.join(".gitignore"), "out/\n").context("writing .gitignore")?;

    println!("Created project '{name}'");
    println!("  {name}/{MANIFEST_FILE}");
    println!("  {name}/schema.json");
    println!("  {name}/.gitignore");

    Ok(())
}

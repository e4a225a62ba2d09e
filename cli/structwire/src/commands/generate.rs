//! `structwire generate`: load schema, compute layouts, write C artifacts.

use anyhow::{Context, Result};
use structwire_core::Config;
use structwire_emit::Artifacts;
use structwire_layout::LayoutContext;

use crate::manifest::GeneratePaths;

/// Run the generation pipeline.
pub fn run(paths: &GeneratePaths) -> Result<()> {
    let config = Config::load(&paths.schema)
        .with_context(|| format!("loading schema {}", paths.schema.display()))?;

    tracing::info!(
        schema = %paths.schema.display(),
        endianness = %config.endianness,
        "computing layouts"
    );

    let mut ctx = LayoutContext::new(&config.schema, config.endianness);
    let artifacts = Artifacts::generate(&mut ctx, &paths.basename)
        .with_context(|| format!("generating layouts from {}", paths.schema.display()))?;
    let written = artifacts
        .write_to(&paths.include_dir, &paths.src_dir)
        .context("writing generated files")?;

    let stats = ctx.stats();
    println!(
        "Generated {} structs ({} host / {} net layouts computed)",
        config.schema.aggregates().count(),
        stats.host_builds,
        stats.net_builds
    );
    for path in &written {
        println!("  {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::init::SAMPLE_SCHEMA;
    use std::fs;

    fn paths_in(root: &std::path::Path) -> GeneratePaths {
        GeneratePaths {
            schema: root.join("schema.json"),
            include_dir: root.join("include"),
            src_dir: root.join("src"),
            basename: "sample".to_string(),
        }
    }

    #[test]
    fn generate_writes_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("schema.json"), SAMPLE_SCHEMA).unwrap();
        let paths = paths_in(dir.path());

        run(&paths).unwrap();

        assert!(paths.include_dir.join("sample.h").is_file());
        assert!(paths.include_dir.join("sample_layout.h").is_file());
        assert!(paths.include_dir.join("structwire.h").is_file());
        let source = fs::read_to_string(paths.src_dir.join("sample_layout.c")).unwrap();
        assert!(source.contains("point_net_layout[] = {4, 0, 5, 4};"));
        assert!(source.contains("frame_layout = {"));
    }

    #[test]
    fn missing_schema_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&paths_in(dir.path())).unwrap_err();
        assert!(format!("{err:#}").contains("loading schema"));
    }

    #[test]
    fn cyclic_schema_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("schema.json"),
            r#"{
                "sizeof": {"u8": {"size": 1}},
                "structs": {
                    "a": {"b": {"type": "b"}},
                    "b": {"a": {"type": "a"}}
                },
                "endianness": {"host": "little", "network": "little"}
            }"#,
        )
        .unwrap();
        let paths = paths_in(dir.path());

        let err = run(&paths).unwrap_err();
        assert!(format!("{err:#}").contains("cyclic type reference: a -> b -> a"));
        assert!(!paths.include_dir.exists());
        assert!(!paths.src_dir.exists());
    }
}

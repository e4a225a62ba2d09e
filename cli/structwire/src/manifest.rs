//! `structwire.toml` manifest parsing and output path resolution.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Manifest file name searched for by every command.
pub const MANIFEST_FILE: &str = "structwire.toml";

/// The top-level manifest structure for a structwire project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructwireManifest {
    /// Project metadata (required).
    pub project: ProjectConfig,
    /// Generation defaults.
    #[serde(default)]
    pub generate: GenerateConfig,
}

/// Project metadata section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name (required).
    pub name: String,
    /// Short description.
    #[serde(default)]
    pub description: Option<String>,
}

/// `[generate]` section. Relative paths are relative to the manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GenerateConfig {
    /// Schema JSON file.
    #[serde(default)]
    pub schema: Option<String>,
    /// Directory for generated headers.
    #[serde(default)]
    pub include_dir: Option<String>,
    /// Directory for generated sources.
    #[serde(default)]
    pub src_dir: Option<String>,
    /// Stem of the generated file names.
    #[serde(default)]
    pub basename: Option<String>,
}

impl StructwireManifest {
    /// Search upward from `start_dir` for a `structwire.toml` file, parse and
    /// return it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest = Self::parse(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                tracing::debug!(path = %candidate.display(), "using manifest");
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing structwire.toml")
    }

    /// Generate the default template for `structwire init`.
    pub fn template(name: &str) -> String {
        format!(
            r#"[project]
name = "{name}"

[generate]
schema = "schema.json"
include-dir = "out/include"
src-dir = "out/src"
basename = "{basename}"
"#,
            basename = name.replace('-', "_")
        )
    }
}

/// Command-line overrides for the `[generate]` section.
#[derive(Debug, Clone, Default)]
pub struct GenerateOverrides {
    pub schema: Option<String>,
    pub include_dir: Option<String>,
    pub src_dir: Option<String>,
    pub basename: Option<String>,
}

/// Fully resolved generation inputs and outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratePaths {
    pub schema: PathBuf,
    pub include_dir: PathBuf,
    pub src_dir: PathBuf,
    pub basename: String,
}

impl GeneratePaths {
    pub const DEFAULT_SCHEMA: &'static str = "config.json";
    pub const DEFAULT_INCLUDE_DIR: &'static str = "include";
    pub const DEFAULT_SRC_DIR: &'static str = "src";
    pub const DEFAULT_BASENAME: &'static str = "structs";

    /// Resolve paths with precedence: flag, then manifest, then default.
    ///
    /// Flag paths resolve against `cwd`; manifest and default paths resolve
    /// against the manifest directory when there is one.
    pub fn resolve(
        cwd: &Path,
        manifest: Option<(&StructwireManifest, &Path)>,
        overrides: &GenerateOverrides,
    ) -> Self {
        let (section, base) = match manifest {
            Some((m, dir)) => (m.generate.clone(), dir),
            None => (GenerateConfig::default(), cwd),
        };

        let pick = |flag: &Option<String>, from_manifest: Option<String>, default: &str| {
            match flag {
                Some(path) => cwd.join(path),
                None => base.join(from_manifest.as_deref().unwrap_or(default)),
            }
        };

        GeneratePaths {
            schema: pick(&overrides.schema, section.schema, Self::DEFAULT_SCHEMA),
            include_dir: pick(
                &overrides.include_dir,
                section.include_dir,
                Self::DEFAULT_INCLUDE_DIR,
            ),
            src_dir: pick(&overrides.src_dir, section.src_dir, Self::DEFAULT_SRC_DIR),
            basename: overrides
                .basename
                .clone()
                .or(section.basename)
                .unwrap_or_else(|| Self::DEFAULT_BASENAME.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_manifest() {
        let m = StructwireManifest::parse("[project]\nname = \"demo\"\n").unwrap();
        assert_eq!(m.project.name, "demo");
        assert!(m.generate.schema.is_none());
    }

    #[test]
    fn parse_generate_section() {
        let m = StructwireManifest::parse(
            r#"
[project]
name = "demo"

[generate]
schema = "types.json"
include-dir = "gen/inc"
basename = "demo"
"#,
        )
        .unwrap();
        assert_eq!(m.generate.schema.as_deref(), Some("types.json"));
        assert_eq!(m.generate.include_dir.as_deref(), Some("gen/inc"));
        assert_eq!(m.generate.src_dir, None);
        assert_eq!(m.generate.basename.as_deref(), Some("demo"));
    }

    #[test]
    fn missing_project_is_error() {
        assert!(StructwireManifest::parse("[generate]\nbasename = \"x\"\n").is_err());
    }

    #[test]
    fn template_round_trips() {
        let m = StructwireManifest::parse(&StructwireManifest::template("my-app")).unwrap();
        assert_eq!(m.project.name, "my-app");
        assert_eq!(m.generate.basename.as_deref(), Some("my_app"));
    }

    #[test]
    fn defaults_without_manifest() {
        let cwd = Path::new("/work");
        let paths = GeneratePaths::resolve(cwd, None, &GenerateOverrides::default());
        assert_eq!(paths.schema, PathBuf::from("/work/config.json"));
        assert_eq!(paths.include_dir, PathBuf::from("/work/include"));
        assert_eq!(paths.src_dir, PathBuf::from("/work/src"));
        assert_eq!(paths.basename, "structs");
    }

    #[test]
    fn flags_override_manifest() {
        let m = StructwireManifest::parse(
            "[project]\nname = \"demo\"\n[generate]\nschema = \"s.json\"\nsrc-dir = \"gen\"\n",
        )
        .unwrap();
        let overrides = GenerateOverrides {
            src_dir: Some("elsewhere".into()),
            basename: Some("wire".into()),
            ..Default::default()
        };
        let paths = GeneratePaths::resolve(
            Path::new("/proj/sub"),
            Some((&m, Path::new("/proj"))),
            &overrides,
        );
        assert_eq!(paths.schema, PathBuf::from("/proj/s.json"));
        assert_eq!(paths.include_dir, PathBuf::from("/proj/include"));
        assert_eq!(paths.src_dir, PathBuf::from("/proj/sub/elsewhere"));
        assert_eq!(paths.basename, "wire");
    }

    #[test]
    fn find_manifest_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            StructwireManifest::template("found"),
        )
        .unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        let (m, root) = StructwireManifest::find_and_load(&nested).unwrap().unwrap();
        assert_eq!(m.project.name, "found");
        assert_eq!(root, dir.path());
    }
}

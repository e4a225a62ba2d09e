//! Generated file bundle.

use std::fs;
use std::path::{Path, PathBuf};

use structwire_layout::LayoutContext;

use crate::cdecl::struct_header;
use crate::error::{EmitError, Result};
use crate::tables::{layout_header, layout_source, runtime_header, RUNTIME_HEADER};

/// Output directory an artifact belongs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactDir {
    Include,
    Src,
}

/// One generated file, held in memory until written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub dir: ArtifactDir,
    pub file_name: String,
    pub contents: String,
}

/// All files produced for one schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub files: Vec<Artifact>,
}

impl Artifacts {
    /// Compute every layout and render the four generated files:
    ///
    /// - `<basename>.h`: struct declarations
    /// - `<basename>_layout.h`: layout record declarations
    /// - `structwire.h`: the shared layout record type
    /// - `<basename>_layout.c`: host/net tables and records
    ///
    /// Any layout error aborts generation before anything is rendered.
    pub fn generate(ctx: &mut LayoutContext<'_>, basename: &str) -> Result<Self> {
        let reports = ctx.reports()?;
        let order: Vec<_> = reports.iter().map(|r| r.name.clone()).collect();

        let layout_stem = format!("{basename}_layout");
        let layout_h = format!("{layout_stem}.h");

        let files = vec![
            Artifact {
                dir: ArtifactDir::Include,
                file_name: format!("{basename}.h"),
                contents: struct_header(ctx.schema(), &order, basename),
            },
            Artifact {
                dir: ArtifactDir::Include,
                file_name: layout_h.clone(),
                contents: layout_header(&reports, &layout_stem),
            },
            Artifact {
                dir: ArtifactDir::Include,
                file_name: RUNTIME_HEADER.to_string(),
                contents: runtime_header(),
            },
            Artifact {
                dir: ArtifactDir::Src,
                file_name: format!("{layout_stem}.c"),
                contents: layout_source(&reports, &layout_h)?,
            },
        ];
        Ok(Artifacts { files })
    }

    /// Look up a generated file by name.
    pub fn get(&self, file_name: &str) -> Option<&Artifact> {
        self.files.iter().find(|a| a.file_name == file_name)
    }

    /// Write every file, creating the directories as needed.
    ///
    /// Returns the written paths in generation order.
    pub fn write_to(&self, include_dir: &Path, src_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(self.files.len());
        for artifact in &self.files {
            let dir = match artifact.dir {
                ArtifactDir::Include => include_dir,
                ArtifactDir::Src => src_dir,
            };
            fs::create_dir_all(dir).map_err(|source| EmitError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = dir.join(&artifact.file_name);
            fs::write(&path, &artifact.contents).map_err(|source| EmitError::Io {
                path: path.clone(),
                source,
            })?;
            tracing::info!(path = %path.display(), "wrote artifact");
            written.push(path);
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use structwire_core::{Aggregate, Endianness, EndiannessConfig, Member, Schema};

    fn schema() -> Schema {
        Schema::new()
            .with_primitive("uint8_t", 1)
            .unwrap()
            .with_primitive("uint32_t", 4)
            .unwrap()
            .with_aggregate(
                "Outer",
                Aggregate::new(vec![Member::new("p", "Point"), Member::new("f", "uint32_t")]),
            )
            .unwrap()
            .with_aggregate(
                "Point",
                Aggregate::new(vec![Member::new("x", "uint32_t"), Member::new("y", "uint8_t")]),
            )
            .unwrap()
    }

    fn endianness() -> EndiannessConfig {
        EndiannessConfig::new(Endianness::Little, Endianness::Big)
    }

    #[test]
    fn generates_four_files() {
        let s = schema();
        let mut ctx = LayoutContext::new(&s, endianness());
        let artifacts = Artifacts::generate(&mut ctx, "geo").unwrap();

        let names: Vec<_> = artifacts.files.iter().map(|a| a.file_name.as_str()).collect();
        assert_eq!(names, vec!["geo.h", "geo_layout.h", "structwire.h", "geo_layout.c"]);

        let decls = &artifacts.get("geo.h").unwrap().contents;
        let point = decls.find("struct Point {").unwrap();
        let outer = decls.find("struct Outer {").unwrap();
        assert!(point < outer, "Point must be declared before Outer");

        let source = &artifacts.get("geo_layout.c").unwrap().contents;
        assert!(source.starts_with("#include <geo_layout.h>\n"));
        assert!(source.contains("Outer_host_layout[] = {0, 4, 4, 5, 8, 12};"));
        assert!(source.contains("Outer_net_layout[] = {4, 0, 5, 4, 9, 5};"));
    }

    #[test]
    fn layout_error_aborts_generation() {
        let s = Schema::new()
            .with_aggregate("Bad", Aggregate::new(vec![Member::new("m", "missing_t")]))
            .unwrap();
        let mut ctx = LayoutContext::new(&s, endianness());
        let err = Artifacts::generate(&mut ctx, "bad").unwrap_err();
        assert!(matches!(err, EmitError::Layout(_)));
    }

    #[test]
    fn writes_into_split_directories() {
        let s = schema();
        let mut ctx = LayoutContext::new(&s, endianness());
        let artifacts = Artifacts::generate(&mut ctx, "geo").unwrap();

        let dir = tempfile::tempdir().unwrap();
        let include = dir.path().join("out/include");
        let src = dir.path().join("out/src");
        let written = artifacts.write_to(&include, &src).unwrap();

        assert_eq!(written.len(), 4);
        assert!(include.join("geo.h").is_file());
        assert!(include.join("geo_layout.h").is_file());
        assert!(include.join("structwire.h").is_file());
        assert!(src.join("geo_layout.c").is_file());
        let on_disk = std::fs::read_to_string(src.join("geo_layout.c")).unwrap();
        assert_eq!(on_disk, artifacts.get("geo_layout.c").unwrap().contents);
    }
}

//! `structwire inspect`: print computed layouts.

use std::path::Path;

use anyhow::{bail, Context, Result};
use structwire_core::{Config, EndiannessConfig};
use structwire_layout::{LayoutContext, TypeReport};

/// Print layouts for one type or for every aggregate.
pub fn run(schema_path: &Path, type_name: Option<&str>, format: &str) -> Result<()> {
    let config = Config::load(schema_path)
        .with_context(|| format!("loading schema {}", schema_path.display()))?;
    let mut ctx = LayoutContext::new(&config.schema, config.endianness);

    let reports = match type_name {
        Some(name) => vec![ctx.report(name)?],
        None => ctx.reports()?,
    };

    match format {
        "text" => print!("{}", render_text(&reports, ctx.endianness())),
        "json" => println!("{}", serde_json::to_string_pretty(&reports)?),
        other => bail!("unknown format '{other}' (expected 'text' or 'json')"),
    }
    Ok(())
}

/// Human-readable layout listing.
pub fn render_text(reports: &[TypeReport], endianness: EndiannessConfig) -> String {
    let mut text = String::new();
    text.push_str(&format!("=== Layouts ({endianness}) ===\n"));
    for report in reports {
        text.push('\n');
        text.push_str(&format!("{}\n", report.name));
        text.push_str(&format!(
            "  sizeof {}  align {}  wire {}  fields {}\n",
            report.host_size, report.alignment, report.wire_len, report.field_count
        ));
        text.push_str(&format!("  host {}\n", report.host));
        text.push_str(&format!("  net  {}\n", report.net));
    }
    text
}

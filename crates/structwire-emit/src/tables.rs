//! Layout tables for the generic byte copier.
//!
//! Each aggregate gets a host and a net offset table, flattened as
//! `{start0, end0, start1, end1, ...}`, and a `structwire_layout` record
//! tying them to the field count and both lengths.

use structwire_layout::TypeReport;

use crate::cdecl::{include_guard, with_comment};
use crate::error::{EmitError, Result};

/// File name of the shared layout record header.
pub const RUNTIME_HEADER: &str = "structwire.h";

/// The `structwire_layout` record declaration and the host size check macro.
pub fn runtime_header() -> String {
    let guard = include_guard("structwire");
    let fields = [
        ("const uint32_t num_members;", "number of scalar fields"),
        ("const uint32_t net_len;", "serialized buffer length"),
        ("const uint32_t host_len;", "sizeof the native struct"),
        ("const uint32_t *net_layout;", "{start0, end0, ...}, end < start: reversed"),
        ("const uint32_t *host_layout;", "{start0, end0, ...}"),
    ];

    let mut text = String::new();
    text.push_str(&format!("#ifndef {guard}\n"));
    text.push_str(&format!("#define {guard}\n\n"));
    text.push_str("#include <stdint.h>\n\n");
    text.push_str("struct structwire_layout {\n");
    for (code, comment) in fields {
        text.push_str(&with_comment(&format!("    {code} "), Some(comment), 8));
        text.push('\n');
    }
    text.push_str("};\n\n");
    text.push_str("/* Non-zero when the generated layout matches this compiler's struct. */\n");
    text.push_str(
        "#define STRUCTWIRE_CHECK(type) (type ## _layout.host_len == sizeof(struct type))\n",
    );
    text.push_str(&format!("\n#endif // {guard}\n"));
    text
}

/// Header exposing one `<T>_layout` record per report.
pub fn layout_header(reports: &[TypeReport], stem: &str) -> String {
    let guard = include_guard(stem);
    let mut text = String::new();
    text.push_str(&format!("#ifndef {guard}\n"));
    text.push_str(&format!("#define {guard}\n\n"));
    text.push_str(&format!("#include <{RUNTIME_HEADER}>\n\n"));
    for report in reports {
        text.push_str(&format!(
            "extern const struct structwire_layout {}_layout;\n",
            report.name
        ));
    }
    text.push_str(&format!("\n#endif // {guard}\n"));
    text
}

fn table(type_name: &str, values: Vec<u64>) -> Result<String> {
    let mut cells = Vec::with_capacity(values.len());
    for value in values {
        let cell = u32::try_from(value).map_err(|_| EmitError::TableOverflow {
            type_name: type_name.to_string(),
            value,
        })?;
        cells.push(cell.to_string());
    }
    Ok(cells.join(", "))
}

fn table_scalar(type_name: &str, value: u64) -> Result<u32> {
    u32::try_from(value).map_err(|_| EmitError::TableOverflow {
        type_name: type_name.to_string(),
        value,
    })
}

/// Source defining the tables and records declared by [`layout_header`].
pub fn layout_source(reports: &[TypeReport], header: &str) -> Result<String> {
    let mut text = String::new();
    text.push_str(&format!("#include <{header}>\n"));
    text.push_str("#include <stdint.h>\n");

    for report in reports {
        let name = &report.name;
        let host = table(name, report.host.flatten())?;
        let net = table(name, report.net.flatten())?;
        let num_members = table_scalar(name, report.field_count as u64)?;
        let net_len = table_scalar(name, report.wire_len)?;
        let host_len = table_scalar(name, report.host_size)?;

        text.push('\n');
        text.push_str(&format!("static const uint32_t {name}_host_layout[] = {{{host}}};\n"));
        text.push_str(&format!("static const uint32_t {name}_net_layout[] = {{{net}}};\n"));
        text.push_str(&format!("const struct structwire_layout {name}_layout = {{\n"));
        text.push_str(&format!("    .num_members = {num_members},\n"));
        text.push_str(&format!("    .net_len = {net_len},\n"));
        text.push_str(&format!("    .host_len = {host_len},\n"));
        text.push_str(&format!("    .net_layout = {name}_net_layout,\n"));
        text.push_str(&format!("    .host_layout = {name}_host_layout,\n"));
        text.push_str("};\n");
    }
    Ok(text)
}

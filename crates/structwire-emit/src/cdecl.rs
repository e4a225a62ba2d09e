//! Native structure declarations.

use structwire_core::{Member, Schema, TypeName};

/// Column multiple that trailing `//` comments are padded to.
const COMMENT_COLUMN: usize = 16;

/// Include guard macro for a header named `stem`, e.g. `foo_layout` ->
/// `FOO_LAYOUT_H`.
pub fn include_guard(stem: &str) -> String {
    let mut guard: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    guard.push_str("_H");
    guard
}

/// Pad `code` with spaces to the next multiple of `column` and append the
/// comment. Code already on a multiple is left alone.
pub(crate) fn with_comment(code: &str, comment: Option<&str>, column: usize) -> String {
    match comment {
        Some(text) => {
            let pad = (column - code.len() % column) % column;
            format!("{code}{}// {text}", " ".repeat(pad))
        }
        None => code.trim_end().to_string(),
    }
}

fn c_type(schema: &Schema, type_name: &str) -> String {
    if schema.is_aggregate(type_name) {
        format!("struct {type_name}")
    } else {
        type_name.to_string()
    }
}

fn member_line(schema: &Schema, member: &Member) -> String {
    let declarator = if member.is_array() {
        format!("{}[{}]", member.name, member.count)
    } else {
        member.name.clone()
    };
    let code = format!("    {} {declarator}; ", c_type(schema, &member.type_name));
    with_comment(&code, member.doc.as_deref(), COMMENT_COLUMN)
}

/// Header declaring one C `struct` per aggregate, in `order`.
///
/// `order` should list every embedded aggregate before its container (see
/// `LayoutContext::dependency_order`) so the header compiles as-is. Names
/// in `order` that are not aggregates are skipped.
pub fn struct_header(schema: &Schema, order: &[TypeName], stem: &str) -> String {
    let guard = include_guard(stem);
    let mut text = String::new();
    text.push_str(&format!("#ifndef {guard}\n"));
    text.push_str(&format!("#define {guard}\n\n"));
    text.push_str("#include <stdint.h>\n");

    for name in order {
        let Some(aggregate) = schema.get(name).and_then(|def| def.as_aggregate()) else {
            continue;
        };
        text.push('\n');
        if let Some(doc) = &aggregate.doc {
            text.push_str(&format!("// {doc}\n"));
        }
        text.push_str(&format!("struct {name} {{\n"));
        for member in &aggregate.members {
            text.push_str(&member_line(schema, member));
            text.push('\n');
        }
        text.push_str("};\n");
    }

    text.push_str(&format!("\n#endif // {guard}\n"));
    text
}

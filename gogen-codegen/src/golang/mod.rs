//! Go source rendering.
//!
//! Renderers emit gofmt-shaped text directly (tab indentation, aligned
//! struct columns and composite-literal keys); no external formatter runs
//! over the output.

pub mod document;
pub mod model;
pub mod payload;
mod wire;

pub use document::DocumentGenerator;
pub use model::ModelGenerator;
pub use payload::PayloadGenerator;

use gogen_schema::{ImportSet, Schema};

/// Renders the generated-file header: marker comment, package clause, and
/// the grouped import block when any import is included.
pub(crate) fn file_header(schema: &Schema) -> String {
    let mut out = String::from("// Code generated by gogen. DO NOT EDIT.\n\n");
    out.push_str(&format!("package {}\n\n", schema.package));
    out.push_str(&import_block(&schema.imports));
    out
}

/// Renders the import block with one blank line between groups. Empty for
/// an empty set.
pub(crate) fn import_block(imports: &ImportSet) -> String {
    if imports.is_empty() {
        return String::new();
    }

    let mut out = String::from("import (\n");
    for (i, group) in imports.groups().iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for declaration in group {
            out.push_str(&format!("\t{declaration}\n"));
        }
    }
    out.push_str(")\n\n");
    out
}

/// Renders a struct declaration with aligned columns. Rows are
/// (field name, type expression, tag text); the tag column may be empty.
pub(crate) fn struct_block(name: &str, rows: &[(String, String, String)]) -> String {
    if rows.is_empty() {
        return format!("type {name} struct {{\n}}\n\n");
    }

    let name_width = rows.iter().map(|row| row.0.len()).max().unwrap_or(0);
    let type_width = rows.iter().map(|row| row.1.len()).max().unwrap_or(0);

    let mut out = format!("type {name} struct {{\n");
    for (field, ty, tag) in rows {
        if tag.is_empty() {
            out.push_str(&format!("\t{field:<name_width$} {ty}\n"));
        } else {
            out.push_str(&format!(
                "\t{field:<name_width$} {ty:<type_width$} {tag}\n"
            ));
        }
    }
    out.push_str("}\n\n");
    out
}

/// Renders keyed composite-literal rows with aligned values.
pub(crate) fn literal_rows(rows: &[(String, String)], indent: &str) -> String {
    let key_width = rows.iter().map(|row| row.0.len() + 1).max().unwrap_or(0);
    let mut out = String::new();
    for (key, value) in rows {
        let keyed = format!("{key}:");
        out.push_str(&format!("{indent}{keyed:<key_width$} {value},\n"));
    }
    out
}

/// Renders consecutive one-line functions with aligned bodies.
pub(crate) fn aligned_one_liners(lines: &[(String, String)]) -> String {
    let width = lines.iter().map(|line| line.0.len()).max().unwrap_or(0);
    let mut out = String::new();
    for (signature, body) in lines {
        out.push_str(&format!("{signature:<width$} {body}\n"));
    }
    out
}

/// Normalizes the rendered file to end with exactly one newline.
pub(crate) fn finish(mut out: String) -> String {
    while out.ends_with('\n') {
        out.pop();
    }
    out.push('\n');
    out
}

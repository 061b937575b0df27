//! Assembled generation schema.
//!
//! The schema is the complete input to rendering: container names, ordered
//! fields with resolved types and derived names, and the import set with
//! every field dependency included. It is assembled once per invocation and
//! discarded after rendering.

use crate::error::SchemaError;
use crate::imports::ImportSet;
use crate::names::{NameOptions, Names};
use crate::parser::RawField;
use crate::types::FieldType;
use std::collections::HashMap;

/// One resolved field of the target declaration.
#[derive(Debug, Clone)]
pub struct Field {
    /// Derived identifier variants.
    pub names: Names,
    /// Resolved semantic type.
    pub ty: FieldType,
    /// Parsed tag key/value pairs from the source declaration.
    pub tags: HashMap<String, String>,
}

impl Field {
    /// Resolves one raw field against the current module, deriving names
    /// with the container as naming context.
    ///
    /// # Errors
    /// Returns `SchemaError::UnsupportedType` when the type expression
    /// cannot be classified.
    pub fn new(package: &str, container: &str, raw: &RawField) -> Result<Self, SchemaError> {
        Ok(Self {
            names: Names::new(
                &raw.name,
                NameOptions {
                    context: Some(container.to_string()),
                    field_override: None,
                },
            ),
            ty: FieldType::resolve(package, &raw.type_expr)?,
            tags: parse_tags(&raw.tag_text),
        })
    }

    /// Renders a serialization tag for this field under `key`, e.g.
    /// `` `bson:"user_id"` ``.
    #[must_use]
    pub fn tag(&self, key: &str) -> String {
        format!("`{}:\"{}\"`", key, self.names.field)
    }
}

/// Complete input to artifact rendering.
#[derive(Debug, Clone)]
pub struct Schema {
    /// Package the source declaration lives in.
    pub package: String,
    /// Container identifier variants.
    pub names: Names,
    /// Fields in declaration order.
    pub fields: Vec<Field>,
    /// Import set with field dependencies included.
    pub imports: ImportSet,
}

impl Schema {
    /// Assembles a schema from extracted raw fields and the unit's
    /// registered imports, including each field's type dependencies.
    ///
    /// # Errors
    /// Returns `SchemaError` when a field's type expression cannot be
    /// resolved.
    pub fn assemble(
        package: &str,
        target: &str,
        raw_fields: &[RawField],
        mut imports: ImportSet,
    ) -> Result<Self, SchemaError> {
        let mut fields = Vec::with_capacity(raw_fields.len());
        for raw in raw_fields {
            let field = Field::new(package, target, raw)?;
            imports.include(field.ty.imports());
            fields.push(field);
        }

        Ok(Self {
            package: package.to_string(),
            names: Names::new(target, NameOptions::default()),
            fields,
            imports,
        })
    }
}

/// Parses backtick tag text into key/value pairs. Malformed pairs are
/// dropped.
fn parse_tags(raw: &str) -> HashMap<String, String> {
    let trimmed = raw.trim().trim_matches('`');
    if trimmed.is_empty() {
        return HashMap::new();
    }

    let mut tags = HashMap::new();
    for pair in trimmed.split_whitespace() {
        if let Some((key, value)) = pair.split_once(':') {
            tags.insert(key.to_string(), value.trim_matches('"').to_string());
        }
    }
    tags
}

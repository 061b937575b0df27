//! Raw field extraction from a parsed source unit.

use crate::error::SchemaError;
use crate::parser::{RawField, SourceUnit, TypeBody};

/// Member name reserved as the pre-build validation hook; never extracted.
pub const RESERVED_MEMBER: &str = "Builder";

/// Returns the ordered raw fields of the declaration named `target`.
///
/// For a struct declaration each member contributes one field. For an
/// interface declaration each zero-parameter single-result method
/// contributes one field typed by its result expression. A member or method
/// named `Builder` is skipped in both cases. Declaration order is preserved
/// exactly.
///
/// # Errors
/// Returns `SchemaError::TypeNotFound` when no declaration named `target`
/// exists in the unit.
pub fn type_fields(unit: &SourceUnit, target: &str) -> Result<Vec<RawField>, SchemaError> {
    let decl = unit
        .get_type(target)
        .ok_or_else(|| SchemaError::type_not_found(target))?;

    let fields = match &decl.body {
        TypeBody::Record(members) => members
            .iter()
            .filter(|member| member.name != RESERVED_MEMBER)
            .cloned()
            .collect(),
        TypeBody::Capability(methods) => methods
            .iter()
            .filter(|method| {
                method.name != RESERVED_MEMBER
                    && method.params == 0
                    && method.results.len() == 1
            })
            .map(|method| RawField {
                name: method.name.clone(),
                type_expr: method.results[0].clone(),
                tag_text: String::new(),
            })
            .collect(),
        TypeBody::Opaque => Vec::new(),
    };

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;

    const SOURCE: &str = "package types\n\n\
        type User interface {\n\
        \tID() string\n\
        \tName() string\n\
        \tProfile() user.Profile\n\
        \tBuilder() *UserBuilder\n\
        \tEqual(other User) bool\n\
        \tPair() (string, error)\n\
        }\n\n\
        type Account struct {\n\
        \tID      string\n\
        \tBuilder string\n\
        \tOwner   *user.Identity\n\
        }\n";

    fn unit() -> SourceUnit {
        parse_source("types.go", SOURCE).expect("failed to parse")
    }

    #[test]
    fn test_missing_type() {
        let err = type_fields(&unit(), "Ghost");
        assert!(matches!(err, Err(SchemaError::TypeNotFound { .. })));
    }

    #[test]
    fn test_capability_fields_in_order() {
        let fields = type_fields(&unit(), "User").expect("failed to extract");
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        // Builder is reserved, Equal takes a parameter, Pair returns two
        // values; the rest survive in declaration order.
        assert_eq!(names, vec!["ID", "Name", "Profile"]);
        assert_eq!(fields[2].type_expr, "user.Profile");
    }

    #[test]
    fn test_record_fields_skip_reserved() {
        let fields = type_fields(&unit(), "Account").expect("failed to extract");
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["ID", "Owner"]);
    }
}

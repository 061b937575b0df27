//! Semantic field type resolution.
//!
//! A raw type expression taken verbatim from a declaration is classified
//! into a recursive [`FieldType`] value. Rendering a resolved type through
//! [`std::fmt::Display`] reproduces the original expression exactly, which
//! keeps regenerated output stable.

use crate::error::SchemaError;
use std::fmt;

/// Owning-module classification of a scalar type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Qualifier {
    /// A built-in type with no owning module.
    Builtin,
    /// A type of the current module. The qualifier is implicit in source
    /// and is never rendered.
    Local(String),
    /// A type of another module, written `module.Name` in source.
    Module(String),
}

/// Resolved field type.
///
/// Arbitrary nesting depth; produced once per invocation and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// A named type, optionally behind a reference marker.
    Scalar {
        /// True when the expression carried a leading `*`.
        reference: bool,
        /// Owning module of the type name.
        qualifier: Qualifier,
        /// Unqualified type name.
        name: String,
    },
    /// A slice of an element type.
    Array {
        /// Element type.
        element: Box<FieldType>,
    },
    /// A mapping from a key type to a value type.
    Map {
        /// Key type.
        key: Box<FieldType>,
        /// Value type.
        value: Box<FieldType>,
    },
}

impl FieldType {
    /// Resolves a raw type expression against the current module name.
    ///
    /// Classification precedence: array marker, mapping marker, reference
    /// marker, then identifier shape (upper-case first letter = current
    /// module, embedded `.` = qualified, otherwise built-in).
    ///
    /// The input must be a syntactically valid type expression; resolution
    /// of malformed input is undefined beyond the cheap structural checks
    /// below. This is a caller contract, not a recovery path.
    ///
    /// # Errors
    /// Returns `SchemaError::UnsupportedType` for expressions with no
    /// classifiable remainder (empty text, unterminated mapping key, bare
    /// reference marker).
    pub fn resolve(module: &str, expression: &str) -> Result<Self, SchemaError> {
        let expr = expression.trim();

        if expr.is_empty() {
            return Err(SchemaError::unsupported_type(expression));
        }

        if let Some(rest) = expr.strip_prefix("[]") {
            return Ok(Self::Array {
                element: Box::new(Self::resolve(module, rest)?),
            });
        }

        if let Some(rest) = expr.strip_prefix("map[") {
            let close = rest
                .find(']')
                .ok_or_else(|| SchemaError::unsupported_type(expression))?;
            return Ok(Self::Map {
                key: Box::new(Self::resolve(module, &rest[..close])?),
                value: Box::new(Self::resolve(module, &rest[close + 1..])?),
            });
        }

        let (reference, name) = match expr.strip_prefix('*') {
            Some(rest) => (true, rest),
            None => (false, expr),
        };

        if name.is_empty() {
            return Err(SchemaError::unsupported_type(expression));
        }

        let (qualifier, base) = if name.chars().next().is_some_and(char::is_uppercase) {
            (Qualifier::Local(module.to_string()), name.to_string())
        } else if let Some(dot) = name.find('.').filter(|&i| i > 0) {
            (
                Qualifier::Module(name[..dot].to_string()),
                name[dot + 1..].to_string(),
            )
        } else {
            (Qualifier::Builtin, name.to_string())
        };

        Ok(Self::Scalar {
            reference,
            qualifier,
            name: base,
        })
    }

    /// Returns the module qualifiers transitively referenced by this type,
    /// in left-to-right encounter order.
    #[must_use]
    pub fn imports(&self) -> Vec<String> {
        match self {
            Self::Scalar { qualifier, .. } => match qualifier {
                Qualifier::Builtin => Vec::new(),
                Qualifier::Local(module) | Qualifier::Module(module) => vec![module.clone()],
            },
            Self::Array { element } => element.imports(),
            Self::Map { key, value } => {
                let mut imports = key.imports();
                imports.extend(value.imports());
                imports
            }
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar {
                reference,
                qualifier,
                name,
            } => {
                if *reference {
                    write!(f, "*")?;
                }
                if let Qualifier::Module(module) = qualifier {
                    write!(f, "{module}.")?;
                }
                write!(f, "{name}")
            }
            Self::Array { element } => write!(f, "[]{element}"),
            Self::Map { key, value } => write!(f, "map[{key}]{value}"),
        }
    }
}

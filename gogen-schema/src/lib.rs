//! # Gogen Schema
//!
//! Type inspection and schema assembly for gogen.
//!
//! This crate provides:
//! - Go source parsing into declaration units
//! - Source location and package-name resolution
//! - Raw field extraction from struct and interface declarations
//! - Recursive type-expression resolution
//! - Identifier variant derivation
//! - Import registration, inclusion, and grouping

pub mod error;
pub mod extract;
pub mod imports;
pub mod locate;
pub mod names;
pub mod parser;
pub mod schema;
pub mod types;

pub use error::{ParseError, SchemaError};
pub use extract::type_fields;
pub use imports::ImportSet;
pub use names::{NameOptions, Names};
pub use parser::{ImportDecl, RawField, RawMethod, SourceUnit, TypeBody, TypeDecl, parse_source};
pub use schema::{Field, Schema};
pub use types::{FieldType, Qualifier};

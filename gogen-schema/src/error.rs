//! Error types for source parsing and schema assembly.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for source parsing operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Missing package clause.
    #[error("no package clause found in '{file}'")]
    MissingPackageClause {
        /// File the clause was expected in.
        file: String,
    },

    /// Malformed import declaration.
    #[error("malformed import declaration: '{line}'")]
    MalformedImport {
        /// Offending line.
        line: String,
    },

    /// Malformed member declaration inside a recognized type body.
    #[error("malformed member declaration in type '{type_name}': '{line}'")]
    MalformedMember {
        /// Enclosing type name.
        type_name: String,
        /// Offending line.
        line: String,
    },

    /// A declaration body was still open at end of input.
    #[error("unexpected end of source while reading '{context}'")]
    UnexpectedEof {
        /// Construct being read.
        context: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type for schema assembly.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Target type declaration not found.
    #[error("type '{name}' not found in source unit")]
    TypeNotFound {
        /// Type name.
        name: String,
    },

    /// A type expression the resolver cannot classify.
    #[error("unsupported type expression: '{expression}'")]
    UnsupportedType {
        /// Raw expression text.
        expression: String,
    },

    /// No buildable Go files in the scanned directory.
    #[error("no Go source files in '{dir}'")]
    NoSourceFiles {
        /// Scanned directory.
        dir: PathBuf,
    },

    /// No source file matched the expected name.
    #[error("no source file matching '*{suffix}'")]
    SourceFileNotFound {
        /// Required file-name suffix.
        suffix: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Creates a malformed import error.
    pub fn malformed_import(line: impl Into<String>) -> Self {
        Self::MalformedImport { line: line.into() }
    }

    /// Creates a malformed member error.
    pub fn malformed_member(type_name: impl Into<String>, line: impl Into<String>) -> Self {
        Self::MalformedMember {
            type_name: type_name.into(),
            line: line.into(),
        }
    }
}

impl SchemaError {
    /// Creates a type-not-found error.
    pub fn type_not_found(name: impl Into<String>) -> Self {
        Self::TypeNotFound { name: name.into() }
    }

    /// Creates an unsupported-type error.
    pub fn unsupported_type(expression: impl Into<String>) -> Self {
        Self::UnsupportedType {
            expression: expression.into(),
        }
    }
}

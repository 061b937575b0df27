//! Artifact kinds and the template registry.
//!
//! The three built-in kinds are policy-and-template variants of one
//! kind-agnostic driver. The registry is plain immutable data handed to the
//! driver as configuration; adding a kind means adding a registry entry,
//! not changing the driver.

use crate::golang;
use gogen_schema::Schema;

/// Generation target kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Plain data model with a step-wise builder.
    Model,
    /// Persistence-mapping document (BSON).
    Document,
    /// Wire-transfer payload (JSON).
    Payload,
}

impl ArtifactKind {
    /// File and diagnostic suffix of the kind.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Document => "document",
            Self::Payload => "payload",
        }
    }
}

/// Renders one artifact from an assembled schema and a variant tag.
pub type RenderFn = fn(&Schema, &str) -> String;

/// Everything the driver needs to know about one artifact kind.
#[derive(Debug, Clone)]
pub struct ArtifactSpec {
    /// Kind this spec serves.
    pub kind: ArtifactKind,
    /// Template renderer.
    pub render: RenderFn,
    /// Synthetic dependencies merged into the import set before rendering,
    /// as (alias, declaration) pairs.
    pub forced_imports: &'static [(&'static str, &'static str)],
    /// Serialized-name overrides applied after any user override, as
    /// (public field name, serialized key) pairs.
    pub fixed_renames: &'static [(&'static str, &'static str)],
}

/// Immutable kind-keyed registry of artifact specs.
#[derive(Debug, Clone)]
pub struct ArtifactRegistry {
    specs: Vec<ArtifactSpec>,
}

impl ArtifactRegistry {
    /// Returns the registry of the three built-in kinds.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            specs: vec![
                ArtifactSpec {
                    kind: ArtifactKind::Model,
                    render: golang::model::render,
                    forced_imports: &[],
                    fixed_renames: &[],
                },
                ArtifactSpec {
                    kind: ArtifactKind::Document,
                    render: golang::document::render,
                    forced_imports: &[("bson", "\"go.mongodb.org/mongo-driver/bson\"")],
                    fixed_renames: &[("ID", "_id")],
                },
                ArtifactSpec {
                    kind: ArtifactKind::Payload,
                    render: golang::payload::render,
                    forced_imports: &[("json", "\"encoding/json\"")],
                    fixed_renames: &[],
                },
            ],
        }
    }

    /// Looks up the spec registered for `kind`.
    #[must_use]
    pub fn get(&self, kind: ArtifactKind) -> Option<&ArtifactSpec> {
        self.specs.iter().find(|spec| spec.kind == kind)
    }
}

impl Default for ArtifactRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

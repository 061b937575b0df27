//! # Gogen Codegen
//!
//! Artifact policies, Go renderers, and the generation driver for gogen.
//!
//! This crate provides:
//! - The kind-keyed artifact registry (model / document / payload)
//! - Field inclusion/exclusion policies with serialized-name overrides
//! - Go source renderers in gofmt shape
//! - The single-pass generation driver with atomic file output

pub mod artifact;
pub mod error;
pub mod generator;
pub mod golang;
pub mod policy;

pub use artifact::{ArtifactKind, ArtifactRegistry, ArtifactSpec, RenderFn};
pub use error::CodegenError;
pub use generator::{GenerateRequest, Generator, output_file_name};
pub use policy::{FieldPolicy, IncludeEntry};

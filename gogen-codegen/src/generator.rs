//! The generation driver.
//!
//! One invocation is a single linear pipeline: locate the package, parse
//! the file named after the target type, extract raw fields, assemble the
//! schema, apply the artifact's field policy, rebuild the import inclusion,
//! render, and write. Any stage failure aborts the remaining stages.

use crate::artifact::{ArtifactKind, ArtifactRegistry};
use crate::error::CodegenError;
use crate::policy::FieldPolicy;
use gogen_schema::{extract, locate, ImportSet, NameOptions, Names, Schema};
use std::io::Write;
use std::path::{Path, PathBuf};

/// One generation request.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Artifact kind to render.
    pub kind: ArtifactKind,
    /// Target type name.
    pub type_name: String,
    /// Module root used to classify internal imports; empty disables the
    /// internal bucket.
    pub repo: String,
    /// Directory scanned for source files; also receives the output file.
    pub dir: PathBuf,
    /// Field inclusion/exclusion policy.
    pub policy: FieldPolicy,
    /// Optional variant tag.
    pub tag: Option<String>,
}

/// Kind-agnostic generation engine configured with an artifact registry.
pub struct Generator {
    registry: ArtifactRegistry,
}

impl Generator {
    /// Creates a generator over the standard artifact registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(ArtifactRegistry::standard())
    }

    /// Creates a generator over a caller-supplied registry.
    #[must_use]
    pub fn with_registry(registry: ArtifactRegistry) -> Self {
        Self { registry }
    }

    /// Runs one generation invocation and returns the written file path.
    ///
    /// Identical inputs produce byte-identical output; the destination is
    /// replaced atomically only after the full render succeeds.
    ///
    /// # Errors
    /// Returns `CodegenError` when any pipeline stage fails; no partial
    /// output is left behind.
    pub fn generate(&self, request: &GenerateRequest) -> Result<PathBuf, CodegenError> {
        let spec = self
            .registry
            .get(request.kind)
            .ok_or_else(|| CodegenError::UnknownKind {
                kind: request.kind.suffix().to_string(),
            })?;

        tracing::debug!(
            type_name = %request.type_name,
            kind = request.kind.suffix(),
            dir = %request.dir.display(),
            "generating artifact"
        );

        let names = Names::new(&request.type_name, NameOptions::default());

        let (package, files) = locate::go_files(&request.dir)?;
        let unit = locate::find_and_parse(&files, &format!("{}.go", names.system))?;
        let raw_fields = extract::type_fields(&unit, &request.type_name)?;
        tracing::debug!(package = %package, fields = raw_fields.len(), "extracted declaration");

        let imports = ImportSet::from_unit(&request.repo, &unit, &request.dir);
        let schema = Schema::assemble(&package, &request.type_name, &raw_fields, imports)?;

        let Schema {
            package,
            names,
            fields,
            imports,
        } = schema;

        let fields = request.policy.apply(fields, spec.fixed_renames);

        let mut included = imports.derive();
        for (alias, declaration) in spec.forced_imports {
            included.use_import(*alias, *declaration);
        }
        for field in &fields {
            included.include(field.ty.imports());
        }

        let schema = Schema {
            package,
            names,
            fields,
            imports: included,
        };

        let tag = request.tag.as_deref().unwrap_or("");
        let source = (spec.render)(&schema, tag);

        let path = request.dir.join(output_file_name(
            &schema.names.system,
            request.kind,
            request.tag.as_deref(),
        ));
        write_atomic(&path, &source)?;
        tracing::info!(path = %path.display(), "artifact written");
        Ok(path)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic output file name: system-cased type name, artifact
/// suffix, optional lower-cased variant tag.
#[must_use]
pub fn output_file_name(system: &str, kind: ArtifactKind, tag: Option<&str>) -> String {
    match tag {
        Some(tag) if !tag.is_empty() => {
            format!("{system}_gen_{}_{}.go", kind.suffix(), tag.to_lowercase())
        }
        _ => format!("{system}_gen_{}.go", kind.suffix()),
    }
}

/// Writes through a temporary file in the destination directory, replacing
/// the destination only on full success.
fn write_atomic(path: &Path, contents: &str) -> Result<(), CodegenError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.persist(path).map_err(|err| CodegenError::Io(err.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::IncludeEntry;
    use gogen_schema::SchemaError;
    use std::fs;

    const USER_GO: &str = "package types\n\n\
        import (\n\
        \t\"example.com/app/user\"\n\
        )\n\n\
        type User interface {\n\
        \tID() string\n\
        \tName() string\n\
        \tProfile() user.Profile\n\
        }\n";

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        fs::write(dir.path().join("user.go"), USER_GO).expect("failed to write fixture");
        fs::write(dir.path().join("go.mod"), "module example.com/app\n")
            .expect("failed to write go.mod");
        let sub = dir.path().join("user");
        fs::create_dir(&sub).expect("failed to create dir");
        fs::write(sub.join("user.go"), "package user\n").expect("failed to write fixture");
        dir
    }

    fn request(kind: ArtifactKind, dir: &Path) -> GenerateRequest {
        GenerateRequest {
            kind,
            type_name: "User".to_string(),
            repo: "example.com/app".to_string(),
            dir: dir.to_path_buf(),
            policy: FieldPolicy::default(),
            tag: None,
        }
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(
            output_file_name("user", ArtifactKind::Model, None),
            "user_gen_model.go"
        );
        assert_eq!(
            output_file_name("user", ArtifactKind::Payload, Some("Partial")),
            "user_gen_payload_partial.go"
        );
    }

    #[test]
    fn test_model_end_to_end() {
        let dir = fixture();
        let path = Generator::new()
            .generate(&request(ArtifactKind::Model, dir.path()))
            .expect("generation failed");
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("user_gen_model.go")
        );

        let out = fs::read_to_string(&path).expect("missing output");
        assert!(out.contains("type Users []User"));
        assert!(out.contains("\"example.com/app/user\""));
        assert!(out.contains("func (u *userData) Profile() user.Profile"));
    }

    #[test]
    fn test_payload_strict_include_with_rename() {
        let dir = fixture();
        let mut req = request(ArtifactKind::Payload, dir.path());
        req.policy = FieldPolicy::new(
            vec![IncludeEntry::parse("ID"), IncludeEntry::parse("Name=n")],
            [],
            true,
        );
        req.tag = Some("Partial".to_string());

        let path = Generator::new().generate(&req).expect("generation failed");
        let out = fs::read_to_string(&path).expect("missing output");

        // Exactly the two whitelisted fields, the second under key "n".
        assert!(out.contains("`json:\"id\"`"));
        assert!(out.contains("`json:\"n\"`"));
        assert!(!out.contains("Profile"));
        assert!(out.contains("type UserPayloadPartials []*UserPayloadPartial"));
        // The unused internal import is not re-included.
        assert!(!out.contains("example.com/app/user"));
        assert!(out.contains("\"encoding/json\""));
    }

    #[test]
    fn test_document_identity_key_survives_override() {
        let dir = fixture();
        let mut req = request(ArtifactKind::Document, dir.path());
        req.policy = FieldPolicy::new(vec![IncludeEntry::parse("ID=ident")], [], false);

        let path = Generator::new().generate(&req).expect("generation failed");
        let out = fs::read_to_string(&path).expect("missing output");
        assert!(out.contains("`bson:\"_id\"`"));
        assert!(!out.contains("`bson:\"ident\"`"));
        assert!(out.contains("\"go.mongodb.org/mongo-driver/bson\""));
    }

    #[test]
    fn test_field_order_preserved_after_filtering() {
        let dir = fixture();
        let mut req = request(ArtifactKind::Model, dir.path());
        req.policy = FieldPolicy::new(vec![], ["Name".to_string()], false);

        let path = Generator::new().generate(&req).expect("generation failed");
        let out = fs::read_to_string(&path).expect("missing output");
        let id_at = out.find("WithID").expect("missing WithID");
        let profile_at = out.find("WithProfile").expect("missing WithProfile");
        assert!(id_at < profile_at);
        assert!(!out.contains("WithName"));
    }

    #[test]
    fn test_regeneration_is_byte_identical() {
        let dir = fixture();
        let req = request(ArtifactKind::Document, dir.path());
        let generator = Generator::new();

        let path = generator.generate(&req).expect("generation failed");
        let first = fs::read(&path).expect("missing output");
        let path = generator.generate(&req).expect("regeneration failed");
        let second = fs::read(&path).expect("missing output");
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_type_fails_without_output() {
        let dir = fixture();
        let mut req = request(ArtifactKind::Model, dir.path());
        req.type_name = "Ghost".to_string();

        let err = Generator::new().generate(&req);
        // The file search is keyed off the requested type name, so the
        // pipeline aborts at the locate stage.
        assert!(matches!(
            err,
            Err(CodegenError::Schema(SchemaError::SourceFileNotFound { .. }))
        ));
        assert!(!dir.path().join("ghost_gen_model.go").exists());
    }

    #[test]
    fn test_type_not_found_in_matching_file() {
        let dir = fixture();
        fs::write(dir.path().join("ghost.go"), "package types\n").expect("failed to write");
        let mut req = request(ArtifactKind::Model, dir.path());
        req.type_name = "Ghost".to_string();

        let err = Generator::new().generate(&req);
        assert!(matches!(
            err,
            Err(CodegenError::Schema(SchemaError::TypeNotFound { .. }))
        ));
    }
}

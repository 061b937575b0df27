//! Payload artifact rendering.
//!
//! The payload is the entity's wire-transfer shape: JSON marshalling
//! through a private mirror struct tagged with the serialized field names.

use super::wire::{WireGenerator, WireKind};
use gogen_schema::Schema;

static PAYLOAD: WireKind = WireKind {
    word: "Payload",
    marshal_suffix: "JSON",
    lib: "json",
    tag_key: "json",
    plural_local: "payloads",
    item_local: "payload",
};

/// Renders the payload artifact.
#[must_use]
pub fn render(schema: &Schema, tag: &str) -> String {
    PayloadGenerator::new(schema, tag).generate()
}

/// Generator for the wire payload.
pub struct PayloadGenerator<'a> {
    inner: WireGenerator<'a>,
}

impl<'a> PayloadGenerator<'a> {
    /// Creates a new payload generator.
    #[must_use]
    pub fn new(schema: &'a Schema, tag: &str) -> Self {
        Self {
            inner: WireGenerator::new(schema, tag, &PAYLOAD),
        }
    }

    /// Generates the payload source file.
    #[must_use]
    pub fn generate(&self) -> String {
        self.inner.generate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gogen_schema::{ImportSet, RawField};

    fn schema() -> Schema {
        let mut imports = ImportSet::new("");
        imports.use_import("json", "\"encoding/json\"");
        let raws = [RawField {
            name: "Name".to_string(),
            type_expr: "string".to_string(),
            tag_text: String::new(),
        }];
        Schema::assemble("types", "User", &raws, imports).expect("failed to assemble")
    }

    #[test]
    fn test_payload_shape() {
        let out = render(&schema(), "");
        assert!(out.contains("import (\n\t\"encoding/json\"\n)\n"));
        assert!(out.contains("type UserPayloads []*UserPayload\n"));
        assert!(out.contains("type userPayload struct {\n"));
        assert!(out.contains("`json:\"name\"`"));
        assert!(out.contains("func (u UserPayload) MarshalJSON() ([]byte, error) {"));
        assert!(out.contains("return json.Marshal(userPayload{"));
        assert!(out.contains("func (u *UserPayload) UnmarshalJSON(data []byte) error {"));
        assert!(out.contains("func ToUserPayloads(users Users) UserPayloads {"));
        assert!(out.contains("func (payloads UserPayloads) Users() Users {"));
    }
}

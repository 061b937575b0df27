//! Document artifact rendering.
//!
//! The document maps the entity onto its persistence shape: BSON
//! marshalling through a private mirror struct whose identity field
//! serializes under the reserved `_id` key.

use super::wire::{WireGenerator, WireKind};
use gogen_schema::Schema;

static DOCUMENT: WireKind = WireKind {
    word: "Document",
    marshal_suffix: "BSON",
    lib: "bson",
    tag_key: "bson",
    plural_local: "docs",
    item_local: "doc",
};

/// Renders the document artifact.
#[must_use]
pub fn render(schema: &Schema, tag: &str) -> String {
    DocumentGenerator::new(schema, tag).generate()
}

/// Generator for the persistence document.
pub struct DocumentGenerator<'a> {
    inner: WireGenerator<'a>,
}

impl<'a> DocumentGenerator<'a> {
    /// Creates a new document generator.
    #[must_use]
    pub fn new(schema: &'a Schema, tag: &str) -> Self {
        Self {
            inner: WireGenerator::new(schema, tag, &DOCUMENT),
        }
    }

    /// Generates the document source file.
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
        let mut imports = ImportSet::new("example.com/app");
        imports.add("user", "\"example.com/app/user\"");
        imports.use_import("bson", "\"go.mongodb.org/mongo-driver/bson\"");
        let raws = [
            RawField {
                name: "ID".to_string(),
                type_expr: "string".to_string(),
                tag_text: String::new(),
            },
            RawField {
                name: "Name".to_string(),
                type_expr: "string".to_string(),
                tag_text: String::new(),
            },
        ];
        Schema::assemble("types", "User", &raws, imports).expect("failed to assemble")
    }

    #[test]
    fn test_document_shape() {
        let out = render(&schema(), "");
        assert!(out.contains("type UserDocuments []*UserDocument\n"));
        assert!(out.contains("type UserDocument struct {\n\tuserData\n}\n"));
        assert!(out.contains("type userDocument struct {\n"));
        assert!(out.contains("`bson:\"id\"`"));
        assert!(out.contains("func ToUserDocument(u User) *UserDocument {"));
        assert!(out.contains("func (u UserDocument) MarshalBSON() ([]byte, error) {"));
        assert!(out.contains("return bson.Marshal(userDocument{"));
        assert!(out.contains("func (u *UserDocument) UnmarshalBSON(data []byte) error {"));
        assert!(out.contains("func ToUserDocuments(users Users) UserDocuments {"));
        assert!(out.contains("func (docs UserDocuments) Users() Users {"));
    }

    #[test]
    fn test_variant_tag_suffixes_type_names() {
        let out = render(&schema(), "Partial");
        assert!(out.contains("type UserDocumentPartials []*UserDocumentPartial\n"));
        assert!(out.contains("type userDocumentPartial struct {\n"));
        assert!(out.contains("func ToUserDocumentPartial(u User) *UserDocumentPartial {"));
        // The embedded model data struct stays untagged.
        assert!(out.contains("type UserDocumentPartial struct {\n\tuserData\n}\n"));
    }

    #[test]
    fn test_constructor_reads_accessors() {
        let out = render(&schema(), "");
        assert!(out.contains("\t\tid:   u.ID(),\n"));
        assert!(out.contains("\t\tname: u.Name(),\n"));
    }
}

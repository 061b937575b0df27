//! Shared rendering for the serialization-wrapper artifacts.
//!
//! Document and payload share one shape: a wrapper struct embedding the
//! model's data struct, a private mirror struct carrying serialization
//! tags, marshal/unmarshal through the mirror, and plural converters. Only
//! the serialization library and the naming word differ.

use super::{file_header, finish, literal_rows, struct_block};
use gogen_schema::Schema;

/// Naming and library parameters distinguishing one wrapper artifact.
pub(crate) struct WireKind {
    /// Word suffixed to the entity name, e.g. `Document`.
    pub word: &'static str,
    /// Marshal method suffix, e.g. `BSON`.
    pub marshal_suffix: &'static str,
    /// Serialization library alias, e.g. `bson`.
    pub lib: &'static str,
    /// Tag key on mirror-struct fields.
    pub tag_key: &'static str,
    /// Local plural variable in converters, e.g. `docs`.
    pub plural_local: &'static str,
    /// Local element variable in converters, e.g. `doc`.
    pub item_local: &'static str,
}

/// Generator for one wrapper artifact.
pub(crate) struct WireGenerator<'a> {
    schema: &'a Schema,
    kind: &'static WireKind,
    wrapper: String,
    mirror: String,
}

impl<'a> WireGenerator<'a> {
    pub(crate) fn new(schema: &'a Schema, tag: &str, kind: &'static WireKind) -> Self {
        let names = &schema.names;
        Self {
            schema,
            kind,
            wrapper: format!("{}{}{}", names.public, kind.word, tag),
            mirror: format!("{}{}{}", names.private, kind.word, tag),
        }
    }

    pub(crate) fn generate(&self) -> String {
        let mut out = file_header(self.schema);
        out.push_str(&self.wrapper_types());
        out.push_str(&self.mirror_struct());
        out.push_str(&self.constructor());
        out.push_str(&self.marshal());
        out.push_str(&self.unmarshal());
        out.push_str(&self.plural_converters());
        finish(out)
    }

    fn wrapper_types(&self) -> String {
        let wrapper = &self.wrapper;
        format!(
            "type {wrapper}s []*{wrapper}\n\n\
             type {wrapper} struct {{\n\
             \t{}Data\n\
             }}\n\n",
            self.schema.names.private
        )
    }

    fn mirror_struct(&self) -> String {
        let rows: Vec<_> = self
            .schema
            .fields
            .iter()
            .map(|field| {
                (
                    field.names.public.clone(),
                    field.ty.to_string(),
                    field.tag(self.kind.tag_key),
                )
            })
            .collect();
        struct_block(&self.mirror, &rows)
    }

    fn constructor(&self) -> String {
        let names = &self.schema.names;
        let wrapper = &self.wrapper;
        let mut out = format!(
            "func To{wrapper}({} {}) *{wrapper} {{\n",
            names.short, names.public
        );

        if self.schema.fields.is_empty() {
            out.push_str(&format!("\treturn &{wrapper}{{{}Data{{}}}}\n", names.private));
        } else {
            out.push_str(&format!("\treturn &{wrapper}{{{}Data{{\n", names.private));
            let rows: Vec<_> = self
                .schema
                .fields
                .iter()
                .map(|field| {
                    (
                        field.names.private.clone(),
                        format!("{}.{}()", names.short, field.names.public),
                    )
                })
                .collect();
            out.push_str(&literal_rows(&rows, "\t\t"));
            out.push_str("\t}}\n");
        }
        out.push_str("}\n\n");
        out
    }

    fn marshal(&self) -> String {
        let names = &self.schema.names;
        let mut out = format!(
            "func ({} {}) Marshal{}() ([]byte, error) {{\n",
            names.short, self.wrapper, self.kind.marshal_suffix
        );
        out.push_str(&format!(
            "\treturn {}.Marshal({}{{\n",
            self.kind.lib, self.mirror
        ));
        let rows: Vec<_> = self
            .schema
            .fields
            .iter()
            .map(|field| {
                (
                    field.names.public.clone(),
                    format!("{}.{}", names.short, field.names.private),
                )
            })
            .collect();
        out.push_str(&literal_rows(&rows, "\t\t"));
        out.push_str("\t})\n}\n\n");
        out
    }

    fn unmarshal(&self) -> String {
        let names = &self.schema.names;
        let mut out = format!(
            "func ({} *{}) Unmarshal{}(data []byte) error {{\n",
            names.short, self.wrapper, self.kind.marshal_suffix
        );
        out.push_str(&format!("\tvar tmp {}\n", self.mirror));
        out.push_str(&format!(
            "\tif err := {}.Unmarshal(data, &tmp); err != nil {{\n\
             \t\treturn err\n\
             \t}}\n\n",
            self.kind.lib
        ));
        out.push_str(&format!(
            "\t{}.{}Data = {}Data{{\n",
            names.short, names.private, names.private
        ));
        let rows: Vec<_> = self
            .schema
            .fields
            .iter()
            .map(|field| {
                (
                    field.names.private.clone(),
                    format!("tmp.{}", field.names.public),
                )
            })
            .collect();
        out.push_str(&literal_rows(&rows, "\t\t"));
        out.push_str("\t}\n\treturn nil\n}\n\n");
        out
    }

    fn plural_converters(&self) -> String {
        let names = &self.schema.names;
        let wrapper = &self.wrapper;
        let public = &names.public;
        let entities = format!("{}s", names.private);
        let local = self.kind.plural_local;
        let item = self.kind.item_local;

        format!(
            "func To{wrapper}s({entities} {public}s) {wrapper}s {{\n\
             \t{local} := make({wrapper}s, len({entities}))\n\
             \tfor i, {item} := range {entities} {{\n\
             \t\t{local}[i] = To{wrapper}({item})\n\
             \t}}\n\
             \treturn {local}\n\
             }}\n\n\
             func ({local} {wrapper}s) {public}s() {public}s {{\n\
             \t{entities} := make({public}s, len({local}))\n\
             \tfor i, {item} := range {local} {{\n\
             \t\t{entities}[i] = {item}\n\
             \t}}\n\
             \treturn {entities}\n\
             }}\n"
        )
    }
}

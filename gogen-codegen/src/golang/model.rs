//! Model artifact rendering.
//!
//! The model is the entity's in-memory shape: a plural slice type, a
//! private data struct with one accessor per field, and a builder whose
//! fallible `Build` runs the package's pre-build hook. `MustBuild` is the
//! unchecked convenience wrapper and nothing generated here calls it.

use super::{aligned_one_liners, file_header, finish, struct_block};
use gogen_schema::Schema;

/// Renders the model artifact. The variant tag only affects file naming.
#[must_use]
pub fn render(schema: &Schema, _tag: &str) -> String {
    ModelGenerator::new(schema).generate()
}

/// Generator for the data model and its builder.
pub struct ModelGenerator<'a> {
    schema: &'a Schema,
}

impl<'a> ModelGenerator<'a> {
    /// Creates a new model generator.
    #[must_use]
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Generates the model source file.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut out = file_header(self.schema);
        out.push_str(&self.plural_type());
        out.push_str(&self.data_struct());
        out.push_str(&self.accessors());
        out.push_str(&self.builder());
        finish(out)
    }

    fn plural_type(&self) -> String {
        let public = &self.schema.names.public;
        format!("type {public}s []{public}\n\n")
    }

    fn data_struct(&self) -> String {
        let rows: Vec<_> = self
            .schema
            .fields
            .iter()
            .map(|field| {
                (
                    field.names.private.clone(),
                    field.ty.to_string(),
                    String::new(),
                )
            })
            .collect();
        struct_block(&format!("{}Data", self.schema.names.private), &rows)
    }

    fn accessors(&self) -> String {
        let names = &self.schema.names;
        let receiver = format!("func ({} *{}Data)", names.short, names.private);

        let getters: Vec<_> = self
            .schema
            .fields
            .iter()
            .map(|field| {
                (
                    format!("{receiver} {}() {}", field.names.public, field.ty),
                    format!("{{ return {}.{} }}", names.short, field.names.private),
                )
            })
            .collect();

        let mut out = aligned_one_liners(&getters);
        out.push_str(&format!("{receiver} Builder() *{}Builder {{\n", names.public));
        if self.schema.fields.is_empty() {
            out.push_str(&format!("\treturn New{}Builder()\n", names.public));
        } else {
            out.push_str(&format!("\treturn New{}Builder().\n", names.public));
            for (i, field) in self.schema.fields.iter().enumerate() {
                let chain = if i + 1 == self.schema.fields.len() {
                    ""
                } else {
                    "."
                };
                out.push_str(&format!(
                    "\t\tWith{}({}.{}){chain}\n",
                    field.names.public, names.short, field.names.private
                ));
            }
        }
        out.push_str("}\n\n");
        out
    }

    fn builder(&self) -> String {
        let names = &self.schema.names;
        let public = &names.public;
        let display = &names.display;
        let mut out = String::new();

        out.push_str(&format!(
            "// {public}Builder is a {display} builder\n\
             type {public}Builder struct {{\n\
             \tdata {}Data\n\
             }}\n\n",
            names.private
        ));

        out.push_str(&format!(
            "// New{public}Builder returns a new {display} builder\n\
             func New{public}Builder() *{public}Builder {{\n\
             \treturn &{public}Builder{{}}\n\
             }}\n\n"
        ));

        for field in &self.schema.fields {
            out.push_str(&format!(
                "// With{} sets the {display} {}\n\
                 func (builder *{public}Builder) With{}({} {}) *{public}Builder {{\n\
                 \tbuilder.data.{} = {}\n\
                 \treturn builder\n\
                 }}\n\n",
                field.names.public,
                field.names.display,
                field.names.public,
                field.names.private,
                field.ty,
                field.names.private,
                field.names.private
            ));
        }

        out.push_str(&format!(
            "// Data returns the {display} data\n\
             func (builder *{public}Builder) Data() {public} {{ return &builder.data }}\n\n"
        ));

        out.push_str(&format!(
            "// Build validates and returns the built {display}\n\
             func (builder *{public}Builder) Build() ({public}, error) {{\n\
             \tif err := prebuild(builder); err != nil {{\n\
             \t\treturn nil, err\n\
             \t}}\n\
             \treturn &builder.data, nil\n\
             }}\n\n"
        ));

        out.push_str(&format!(
            "// MustBuild returns the built {display} and panics if any validation error occurs\n\
             func (builder *{public}Builder) MustBuild() {public} {{\n\
             \tbuilt, err := builder.Build()\n\
             \tif err != nil {{\n\
             \t\tpanic(\"failed to build {display}: \" + err.Error())\n\
             \t}}\n\
             \treturn built\n\
             }}\n"
        ));

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gogen_schema::{ImportSet, RawField};

    fn schema() -> Schema {
        let mut imports = ImportSet::new("example.com/app");
        imports.add("user", "\"example.com/app/user\"");
        let raws = [
            RawField {
                name: "ID".to_string(),
                type_expr: "string".to_string(),
                tag_text: String::new(),
            },
            RawField {
                name: "Profile".to_string(),
                type_expr: "user.Profile".to_string(),
                tag_text: String::new(),
            },
        ];
        Schema::assemble("types", "User", &raws, imports).expect("failed to assemble")
    }

    #[test]
    fn test_model_shape() {
        let out = render(&schema(), "");
        assert!(out.starts_with("// Code generated by gogen. DO NOT EDIT.\n"));
        assert!(out.contains("package types\n"));
        assert!(out.contains("type Users []User\n"));
        assert!(out.contains("type userData struct {\n"));
        assert!(out.contains("\tid      string\n"));
        assert!(out.contains("\tprofile user.Profile\n"));
        assert!(out.contains("func (u *userData) ID() string"));
        assert!(out.contains("{ return u.id }"));
        assert!(out.contains("func NewUserBuilder() *UserBuilder {"));
        assert!(out.contains("// WithProfile sets the user profile\n"));
        assert!(out.contains("func (builder *UserBuilder) Build() (User, error) {"));
        assert!(out.contains("if err := prebuild(builder); err != nil {"));
        assert!(out.contains("func (builder *UserBuilder) MustBuild() User {"));
        assert!(out.ends_with("}\n"));
    }

    #[test]
    fn test_builder_chain_terminates() {
        let out = render(&schema(), "");
        assert!(out.contains("\treturn NewUserBuilder().\n"));
        assert!(out.contains("\t\tWithID(u.id).\n"));
        assert!(out.contains("\t\tWithProfile(u.profile)\n"));
    }

    #[test]
    fn test_import_block_groups() {
        let out = render(&schema(), "");
        assert!(out.contains("import (\n\t\"example.com/app/user\"\n)\n"));
    }
}

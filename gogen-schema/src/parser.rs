//! Go source parsing.
//!
//! This module reads the declaration subset the generation engine needs out
//! of a single Go source file: the package clause, import declarations, and
//! struct/interface type declarations with their raw members. Anything else
//! (functions, consts, vars, generic declarations) is skipped, not an error.
//!
//! The parser is line-oriented and assumes gofmt-shaped input: one member
//! per line, declaration braces opened on the declaration line and closed on
//! their own line.

use crate::error::ParseError;

/// Parsed representation of one source file.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    /// Declared package name.
    pub package: String,
    /// Import declarations in source order.
    pub imports: Vec<ImportDecl>,
    /// Type declarations in source order.
    pub types: Vec<TypeDecl>,
}

impl SourceUnit {
    /// Looks up a type declaration by name.
    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&TypeDecl> {
        self.types.iter().find(|decl| decl.name == name)
    }
}

/// One import declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    /// Explicit alias, when the declaration supplies one.
    pub alias: Option<String>,
    /// Quoted import path, without the quotes.
    pub path: String,
}

impl ImportDecl {
    /// Returns the declaration text as written in an import block.
    #[must_use]
    pub fn declaration(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} \"{}\"", alias, self.path),
            None => format!("\"{}\"", self.path),
        }
    }
}

/// One type declaration.
#[derive(Debug, Clone)]
pub struct TypeDecl {
    /// Declared type name.
    pub name: String,
    /// Declaration body.
    pub body: TypeBody,
}

/// Body of a type declaration.
#[derive(Debug, Clone)]
pub enum TypeBody {
    /// A struct declaration with its raw members.
    Record(Vec<RawField>),
    /// An interface declaration with its raw methods.
    Capability(Vec<RawMethod>),
    /// Any other type declaration (alias, named basic type, ...).
    Opaque,
}

/// Raw member extracted verbatim from a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawField {
    /// First declared identifier.
    pub name: String,
    /// Type expression text.
    pub type_expr: String,
    /// Attached tag text including backticks, empty when absent.
    pub tag_text: String,
}

/// Raw interface method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMethod {
    /// Method name.
    pub name: String,
    /// Number of declared parameters.
    pub params: usize,
    /// Result expressions in declaration order.
    pub results: Vec<String>,
}

enum Section {
    Top,
    Imports,
    Record {
        name: String,
        fields: Vec<RawField>,
    },
    Capability {
        name: String,
        methods: Vec<RawMethod>,
    },
}

/// Parses one Go source file.
///
/// # Arguments
/// * `name` - Display name of the unit, used in diagnostics
/// * `content` - File content
///
/// # Errors
/// Returns `ParseError` when the package clause is missing, a recognized
/// declaration body is left open at end of input, or a member/import line
/// inside a recognized declaration is malformed.
pub fn parse_source(name: &str, content: &str) -> Result<SourceUnit, ParseError> {
    let cleaned = strip_comments(content);

    let mut package: Option<String> = None;
    let mut imports = Vec::new();
    let mut types = Vec::new();
    let mut section = Section::Top;
    // Brace depth of skipped constructs (function bodies and the like);
    // declarations are only recognized at depth zero.
    let mut depth: i32 = 0;

    for raw_line in cleaned.lines() {
        let line = raw_line.trim();

        section = match section {
            Section::Top => {
                if line.is_empty() {
                    Section::Top
                } else if depth > 0 {
                    depth = (depth + brace_delta(line)).max(0);
                    Section::Top
                } else if let Some(rest) = line.strip_prefix("package ") {
                    package.get_or_insert_with(|| rest.trim().to_string());
                    Section::Top
                } else if line == "import (" {
                    Section::Imports
                } else if let Some(rest) = line.strip_prefix("import ") {
                    imports.push(parse_import_spec(rest)?);
                    Section::Top
                } else if let Some(rest) = line.strip_prefix("type ") {
                    match parse_type_header(rest) {
                        Some(section) => section,
                        None => {
                            if let Some(decl) = parse_opaque_type(rest) {
                                types.push(decl);
                            }
                            depth = (depth + brace_delta(line)).max(0);
                            Section::Top
                        }
                    }
                } else {
                    depth = (depth + brace_delta(line)).max(0);
                    Section::Top
                }
            }

            Section::Imports => {
                if line == ")" {
                    Section::Top
                } else {
                    if !line.is_empty() {
                        imports.push(parse_import_spec(line)?);
                    }
                    Section::Imports
                }
            }

            Section::Record { name, mut fields } => {
                if line == "}" {
                    types.push(TypeDecl {
                        name,
                        body: TypeBody::Record(fields),
                    });
                    Section::Top
                } else {
                    if !line.is_empty() {
                        if let Some(field) = parse_record_member(&name, line)? {
                            fields.push(field);
                        }
                    }
                    Section::Record { name, fields }
                }
            }

            Section::Capability { name, mut methods } => {
                if line == "}" {
                    types.push(TypeDecl {
                        name,
                        body: TypeBody::Capability(methods),
                    });
                    Section::Top
                } else {
                    if !line.is_empty() {
                        if let Some(method) = parse_capability_method(line) {
                            methods.push(method);
                        }
                    }
                    Section::Capability { name, methods }
                }
            }
        };
    }

    match section {
        Section::Top | Section::Imports => {}
        Section::Record { name, .. } | Section::Capability { name, .. } => {
            return Err(ParseError::UnexpectedEof {
                context: format!("type {name}"),
            });
        }
    }

    let package = package.ok_or_else(|| ParseError::MissingPackageClause {
        file: name.to_string(),
    })?;

    Ok(SourceUnit {
        package,
        imports,
        types,
    })
}

/// Classifies a `type ` declaration header. Returns the section to enter for
/// multi-line struct/interface bodies, a completed declaration for one-line
/// bodies, or None when the declaration should be skipped as opaque.
fn parse_type_header(rest: &str) -> Option<Section> {
    let rest = rest.trim();
    let (name, body) = rest.split_once(char::is_whitespace)?;
    let body = body.trim();

    match body {
        "struct {" => Some(Section::Record {
            name: name.to_string(),
            fields: Vec::new(),
        }),
        "interface {" => Some(Section::Capability {
            name: name.to_string(),
            methods: Vec::new(),
        }),
        _ => None,
    }
}

/// Records a type declaration outside the struct/interface subset so that
/// lookups still find it. Its member list is empty.
fn parse_opaque_type(rest: &str) -> Option<TypeDecl> {
    let name = rest.split_whitespace().next()?;
    if !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }
    Some(TypeDecl {
        name: name.to_string(),
        body: TypeBody::Opaque,
    })
}

/// Parses one import spec line, with or without an explicit alias.
fn parse_import_spec(text: &str) -> Result<ImportDecl, ParseError> {
    let text = text.trim();
    let open = text
        .find('"')
        .ok_or_else(|| ParseError::malformed_import(text))?;
    let close = text
        .rfind('"')
        .filter(|&close| close > open)
        .ok_or_else(|| ParseError::malformed_import(text))?;

    let alias = text[..open].trim();
    Ok(ImportDecl {
        alias: (!alias.is_empty()).then(|| alias.to_string()),
        path: text[open + 1..close].to_string(),
    })
}

/// Parses one struct member line. Embedded members (a lone type name with no
/// field identifier) are skipped.
fn parse_record_member(type_name: &str, line: &str) -> Result<Option<RawField>, ParseError> {
    let (decl, tag_text) = match line.find('`') {
        Some(start) => {
            let end = line.rfind('`').unwrap_or(start);
            (line[..start].trim(), line[start..=end].to_string())
        }
        None => (line, String::new()),
    };

    if decl.is_empty() {
        return Ok(None);
    }

    let mut tokens = decl.split_whitespace();
    let Some(first) = tokens.next() else {
        return Ok(None);
    };

    // Multiple identifiers may share one type expression; the first declared
    // identifier names the field, the rest are consumed and dropped.
    let name = first.trim_end_matches(',');
    if first.ends_with(',') {
        loop {
            match tokens.next() {
                Some(token) if token.ends_with(',') => {}
                Some(_) => break,
                None => return Err(ParseError::malformed_member(type_name, line)),
            }
        }
    }

    let type_expr = tokens.collect::<Vec<_>>().join(" ");
    if type_expr.is_empty() {
        if decl.split_whitespace().count() == 1 {
            return Ok(None);
        }
        return Err(ParseError::malformed_member(type_name, line));
    }

    Ok(Some(RawField {
        name: name.to_string(),
        type_expr,
        tag_text,
    }))
}

/// Parses one interface method line. Embedded interfaces and anything else
/// without a parameter list are skipped.
fn parse_capability_method(line: &str) -> Option<RawMethod> {
    let open = line.find('(')?;
    let name = line[..open].trim();
    if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }

    let close = matching_paren(line, open)?;
    let params_text = line[open + 1..close].trim();
    let params = if params_text.is_empty() {
        0
    } else {
        params_text.split(',').count()
    };

    let results_text = line[close + 1..].trim();
    let results = if results_text.is_empty() {
        Vec::new()
    } else if let Some(inner) = results_text
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    {
        inner
            .split(',')
            .map(|result| result.trim().to_string())
            .filter(|result| !result.is_empty())
            .collect()
    } else {
        vec![results_text.to_string()]
    };

    Some(RawMethod {
        name: name.to_string(),
        params,
        results,
    })
}

/// Returns the byte index of the parenthesis matching the one at `open`.
fn matching_paren(line: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in line[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Net brace count of a line, ignoring braces inside string and rune
/// literals.
fn brace_delta(line: &str) -> i32 {
    let mut delta = 0;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match quote {
            Some(q) => {
                if c == '\\' && q != '`' {
                    let _ = chars.next();
                } else if c == q {
                    quote = None;
                }
            }
            None => match c {
                '"' | '`' | '\'' => quote = Some(c),
                '{' => delta += 1,
                '}' => delta -= 1,
                _ => {}
            },
        }
    }
    delta
}

/// Blanks out line and block comments, preserving line structure and string
/// literal contents.
pub(crate) fn strip_comments(source: &str) -> String {
    enum Mode {
        Code,
        Line,
        Block,
        Quoted(char),
    }

    let mut out = String::with_capacity(source.len());
    let mut mode = Mode::Code;
    let chars: Vec<char> = source.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();
        match mode {
            Mode::Code => match c {
                '/' if next == Some('/') => {
                    mode = Mode::Line;
                    i += 2;
                    continue;
                }
                '/' if next == Some('*') => {
                    mode = Mode::Block;
                    i += 2;
                    continue;
                }
                '"' | '`' | '\'' => {
                    mode = Mode::Quoted(c);
                    out.push(c);
                }
                _ => out.push(c),
            },
            Mode::Line => {
                if c == '\n' {
                    mode = Mode::Code;
                    out.push(c);
                }
            }
            Mode::Block => {
                if c == '*' && next == Some('/') {
                    mode = Mode::Code;
                    i += 2;
                    continue;
                }
                if c == '\n' {
                    out.push(c);
                }
            }
            Mode::Quoted(q) => {
                out.push(c);
                if c == '\\' && q != '`' {
                    if let Some(escaped) = next {
                        out.push(escaped);
                        i += 2;
                        continue;
                    }
                } else if c == q {
                    mode = Mode::Code;
                }
            }
        }
        i += 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
// Package types holds the domain declarations.
package types

import (
	"context"
	"strings"

	"github.com/makes-code/sample/user"

	xstrings "github.com/acme/strings/v2"
)

type User interface {
	ID() string
	Name() string
	Identities() []user.Identity
	Workspaces() map[string]user.Workspace
	Builder() *UserBuilder
	WithContext(ctx context.Context) User
}

type Account struct {
	ID      string `json:"id" bson:"_id"`
	Name    string
	Balance *user.Balance
}

func helper() string {
	if true {
		return "{"
	}
	return "}"
}
"#;

    #[test]
    fn test_parse_package_and_imports() {
        let unit = parse_source("sample.go", SAMPLE).expect("failed to parse");
        assert_eq!(unit.package, "types");
        assert_eq!(unit.imports.len(), 4);
        assert_eq!(unit.imports[0].path, "context");
        assert_eq!(unit.imports[0].alias, None);
        assert_eq!(unit.imports[3].alias.as_deref(), Some("xstrings"));
        assert_eq!(
            unit.imports[3].declaration(),
            "xstrings \"github.com/acme/strings/v2\""
        );
    }

    #[test]
    fn test_parse_capability_methods() {
        let unit = parse_source("sample.go", SAMPLE).expect("failed to parse");
        let decl = unit.get_type("User").expect("missing User");
        let TypeBody::Capability(methods) = &decl.body else {
            panic!("expected capability body");
        };
        assert_eq!(methods.len(), 6);
        assert_eq!(methods[0].name, "ID");
        assert_eq!(methods[0].params, 0);
        assert_eq!(methods[0].results, vec!["string"]);
        assert_eq!(methods[3].results, vec!["map[string]user.Workspace"]);
        assert_eq!(methods[5].name, "WithContext");
        assert_eq!(methods[5].params, 1);
    }

    #[test]
    fn test_parse_record_members() {
        let unit = parse_source("sample.go", SAMPLE).expect("failed to parse");
        let decl = unit.get_type("Account").expect("missing Account");
        let TypeBody::Record(fields) = &decl.body else {
            panic!("expected record body");
        };
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].name, "ID");
        assert_eq!(fields[0].type_expr, "string");
        assert_eq!(fields[0].tag_text, "`json:\"id\" bson:\"_id\"`");
        assert_eq!(fields[1].tag_text, "");
        assert_eq!(fields[2].type_expr, "*user.Balance");
    }

    #[test]
    fn test_function_bodies_are_skipped() {
        let unit = parse_source("sample.go", SAMPLE).expect("failed to parse");
        assert_eq!(unit.types.len(), 2);
    }

    #[test]
    fn test_missing_package_clause() {
        let err = parse_source("empty.go", "type T struct {\n}\n");
        assert!(matches!(
            err,
            Err(ParseError::MissingPackageClause { .. })
        ));
    }

    #[test]
    fn test_unterminated_body() {
        let err = parse_source("broken.go", "package p\n\ntype T struct {\n\tA string\n");
        assert!(matches!(err, Err(ParseError::UnexpectedEof { .. })));
    }

    #[test]
    fn test_single_import_form() {
        let unit =
            parse_source("one.go", "package p\n\nimport \"strings\"\n").expect("failed to parse");
        assert_eq!(unit.imports.len(), 1);
        assert_eq!(unit.imports[0].path, "strings");
    }

    #[test]
    fn test_embedded_member_skipped() {
        let src = "package p\n\ntype T struct {\n\tuser.Base\n\tName string\n}\n";
        let unit = parse_source("embed.go", src).expect("failed to parse");
        let TypeBody::Record(fields) = &unit.types[0].body else {
            panic!("expected record body");
        };
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "Name");
    }

    #[test]
    fn test_shared_type_uses_first_identifier() {
        let src = "package p\n\ntype T struct {\n\tFirst, Second string\n}\n";
        let unit = parse_source("multi.go", src).expect("failed to parse");
        let TypeBody::Record(fields) = &unit.types[0].body else {
            panic!("expected record body");
        };
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "First");
        assert_eq!(fields[0].type_expr, "string");
    }
}

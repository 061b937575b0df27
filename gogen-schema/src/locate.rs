//! Source location and package-name resolution.
//!
//! Given a directory, this module answers which Go files belong to the
//! package, what the package is called, and what declared name an import
//! path resolves to. Import paths that cannot be located on the module
//! search path fall back to a path-segment heuristic (see
//! [`resolve_package_name`]).

use crate::error::{ParseError, SchemaError};
use crate::parser::{self, SourceUnit};
use std::fs;
use std::path::{Path, PathBuf};

/// Lists a directory's buildable Go files and reads its package name.
///
/// Files are sorted by name so repeated runs scan in a stable order.
/// `_test.go` files and files with a `.` or `_` name prefix are excluded,
/// matching the Go build convention.
///
/// # Errors
/// Returns `SchemaError::NoSourceFiles` for a directory without Go files
/// and propagates parse failures when no file yields a package clause.
pub fn go_files(dir: &Path) -> Result<(String, Vec<PathBuf>), SchemaError> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| is_buildable(path))
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(SchemaError::NoSourceFiles {
            dir: dir.to_path_buf(),
        });
    }

    let mut last_err: Option<ParseError> = None;
    for i in 0..files.len() {
        match package_clause(&files[i]) {
            Ok(package) => return Ok((package, files)),
            Err(err) => last_err = Some(err),
        }
    }

    Err(last_err.map_or_else(
        || SchemaError::NoSourceFiles {
            dir: dir.to_path_buf(),
        },
        SchemaError::Parse,
    ))
}

/// Parses the first file whose name ends with `suffix`.
///
/// # Errors
/// Returns `SchemaError::SourceFileNotFound` when no file matches, and
/// propagates read and parse failures.
pub fn find_and_parse(files: &[PathBuf], suffix: &str) -> Result<SourceUnit, SchemaError> {
    let file = files
        .iter()
        .find(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(suffix))
        })
        .ok_or_else(|| SchemaError::SourceFileNotFound {
            suffix: suffix.to_string(),
        })?;

    let content = fs::read_to_string(file).map_err(SchemaError::Io)?;
    Ok(parser::parse_source(&file.display().to_string(), &content)?)
}

/// Resolves the declared package name of an import path.
///
/// Resolution order: the surrounding module (nearest `go.mod` above `dir`),
/// then each `$GOPATH/src` root, then [`fallback_package_name`]. The
/// fallback is a heuristic: it assumes the last path segment names the
/// package unless it looks like a major-version marker, and deeply nested
/// version paths may misresolve.
#[must_use]
pub fn resolve_package_name(import_path: &str, dir: &Path) -> String {
    if let Some(package) = locate_declared_name(import_path, dir) {
        return package;
    }
    tracing::trace!(import_path, "falling back to path-segment package name");
    fallback_package_name(import_path)
}

/// Walks up from `dir` to the nearest `go.mod` and returns the declared
/// module path together with the module root directory.
#[must_use]
pub fn module_path(dir: &Path) -> Option<(String, PathBuf)> {
    for ancestor in dir.ancestors() {
        let go_mod = ancestor.join("go.mod");
        let Ok(content) = fs::read_to_string(&go_mod) else {
            continue;
        };
        for line in content.lines() {
            if let Some(module) = line.trim().strip_prefix("module ") {
                return Some((module.trim().to_string(), ancestor.to_path_buf()));
            }
        }
    }
    None
}

fn locate_declared_name(import_path: &str, dir: &Path) -> Option<String> {
    if let Some((module, root)) = module_path(dir) {
        let rest = if import_path == module {
            Some("")
        } else {
            import_path.strip_prefix(&format!("{module}/"))
        };
        if let Some(rest) = rest {
            let candidate = if rest.is_empty() {
                root
            } else {
                root.join(rest)
            };
            if let Some(package) = dir_package_name(&candidate) {
                return Some(package);
            }
        }
    }

    if let Ok(gopath) = std::env::var("GOPATH") {
        for root in std::env::split_paths(&gopath) {
            let candidate = root.join("src").join(import_path);
            if let Some(package) = dir_package_name(&candidate) {
                return Some(package);
            }
        }
    }

    None
}

/// Reads the package name of the first parsable Go file in `dir`.
fn dir_package_name(dir: &Path) -> Option<String> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .ok()?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| is_buildable(path))
        .collect();
    files.sort();
    files.iter().find_map(|file| package_clause(file).ok())
}

/// Derives a package name from the import path alone. A trailing
/// major-version segment (`v` followed only by digits) defers to the parent
/// segment.
#[must_use]
pub fn fallback_package_name(import_path: &str) -> String {
    let mut segments = import_path.rsplit('/');
    let base = segments.next().unwrap_or(import_path);
    if is_version_segment(base) {
        if let Some(parent) = segments.next() {
            return parent.to_string();
        }
    }
    base.to_string()
}

fn is_version_segment(segment: &str) -> bool {
    segment.len() > 1
        && segment.starts_with('v')
        && segment[1..].chars().all(|c| c.is_ascii_digit())
}

/// Reads the package clause of one file without a full parse.
fn package_clause(file: &Path) -> Result<String, ParseError> {
    let content = fs::read_to_string(file)?;
    let cleaned = parser::strip_comments(&content);
    for line in cleaned.lines() {
        if let Some(package) = line.trim().strip_prefix("package ") {
            return Ok(package.trim().to_string());
        }
    }
    Err(ParseError::MissingPackageClause {
        file: file.display().to_string(),
    })
}

fn is_buildable(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    name.ends_with(".go")
        && !name.ends_with("_test.go")
        && !name.starts_with('.')
        && !name.starts_with('_')
}

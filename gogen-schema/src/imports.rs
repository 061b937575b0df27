//! Import registration, lazy inclusion, and grouped emission.
//!
//! Declarations are registered up front when the source unit is scanned;
//! inclusion happens lazily as field types are resolved and as artifacts
//! inject synthetic dependencies. Only included declarations reach the
//! rendered import block.

use crate::locate;
use crate::parser::SourceUnit;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Mutable-for-one-invocation set of import declarations.
#[derive(Debug, Clone, Default)]
pub struct ImportSet {
    /// Configured module root; classifies internal imports. Empty disables
    /// the internal bucket.
    root: String,
    declarations: HashMap<String, String>,
    used: Vec<String>,
    included: HashSet<String>,
}

impl ImportSet {
    /// Creates an empty set classified against `root`.
    #[must_use]
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Registers every import declaration of a parsed unit.
    ///
    /// Aliasless declarations resolve their alias to the imported package's
    /// declared name via the module search path rooted at `dir`. The cgo
    /// pseudo-import `"C"` is skipped.
    #[must_use]
    pub fn from_unit(root: impl Into<String>, unit: &SourceUnit, dir: &Path) -> Self {
        let mut set = Self::new(root);
        for import in &unit.imports {
            if import.path == "C" {
                continue;
            }
            let alias = match &import.alias {
                Some(alias) => alias.clone(),
                None => locate::resolve_package_name(&import.path, dir),
            };
            set.add(alias, import.declaration());
        }
        set
    }

    /// Registers a declaration under `alias`. A later registration for the
    /// same alias replaces the earlier one.
    pub fn add(&mut self, alias: impl Into<String>, declaration: impl Into<String>) {
        self.declarations.insert(alias.into(), declaration.into());
    }

    /// Marks aliases as used, appending their declarations in call order.
    ///
    /// Unknown aliases are a silent no-op. Each alias is appended at most
    /// once, at its first reference.
    pub fn include<I, S>(&mut self, aliases: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for alias in aliases {
            let alias = alias.as_ref().trim();
            if self.included.contains(alias) {
                continue;
            }
            if let Some(declaration) = self.declarations.get(alias) {
                self.used.push(declaration.clone());
                self.included.insert(alias.to_string());
            }
        }
    }

    /// Registers and immediately includes a declaration. Used for synthetic
    /// dependencies an artifact injects that were not present in the source.
    pub fn use_import(&mut self, alias: impl Into<String>, declaration: impl Into<String>) {
        let alias = alias.into();
        self.add(alias.clone(), declaration);
        self.include([alias]);
    }

    /// True when nothing has been included.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    /// Returns a fresh set sharing this set's registrations with an empty
    /// inclusion sequence.
    #[must_use]
    pub fn derive(&self) -> Self {
        Self {
            root: self.root.clone(),
            declarations: self.declarations.clone(),
            used: Vec::new(),
            included: HashSet::new(),
        }
    }

    /// Partitions the included declarations into ordered buckets for
    /// grouped rendering: standard library, internal, third-party. Bucket
    /// membership is decided per declaration with internal taking
    /// precedence over third-party; within-bucket order is first-reference
    /// order; empty buckets are omitted.
    #[must_use]
    pub fn groups(&self) -> Vec<Vec<String>> {
        let mut standard = Vec::new();
        let mut internal = Vec::new();
        let mut vendor = Vec::new();

        for declaration in &self.used {
            if !self.root.is_empty() && declaration.contains(&self.root) {
                internal.push(declaration.clone());
            } else if declaration.contains('.') {
                vendor.push(declaration.clone());
            } else {
                standard.push(declaration.clone());
            }
        }

        [standard, internal, vendor]
            .into_iter()
            .filter(|bucket| !bucket.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ImportSet {
        let mut set = ImportSet::new("example.com/app");
        set.add("strings", "\"strings\"");
        set.add("context", "\"context\"");
        set.add("user", "\"example.com/app/user\"");
        set.add("bson", "\"go.mongodb.org/mongo-driver/bson\"");
        set
    }

    #[test]
    fn test_include_unknown_is_noop() {
        let mut set = sample();
        set.include(["ghost"]);
        assert!(set.is_empty());
        assert!(set.groups().is_empty());
    }

    #[test]
    fn test_include_first_reference_order_without_duplicates() {
        let mut set = sample();
        set.include(["user", "strings", "user", " strings "]);
        set.include(["user"]);
        assert_eq!(
            set.groups(),
            vec![
                vec!["\"strings\"".to_string()],
                vec!["\"example.com/app/user\"".to_string()],
            ]
        );
    }

    #[test]
    fn test_groups_bucket_order() {
        let mut set = sample();
        set.include(["bson", "user", "context", "strings"]);
        let groups = set.groups();
        assert_eq!(groups.len(), 3);
        // standard, internal, third-party
        assert_eq!(groups[0], vec!["\"context\"", "\"strings\""]);
        assert_eq!(groups[1], vec!["\"example.com/app/user\""]);
        assert_eq!(groups[2], vec!["\"go.mongodb.org/mongo-driver/bson\""]);
    }

    #[test]
    fn test_no_root_means_no_internal_bucket() {
        let mut set = ImportSet::new("");
        set.add("user", "\"example.com/app/user\"");
        set.include(["user"]);
        let groups = set.groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0], vec!["\"example.com/app/user\""]);
    }

    #[test]
    fn test_use_import_registers_and_includes() {
        let mut set = ImportSet::new("");
        set.use_import("json", "\"encoding/json\"");
        assert!(!set.is_empty());
        assert_eq!(set.groups(), vec![vec!["\"encoding/json\"".to_string()]]);
    }

    #[test]
    fn test_derive_keeps_registrations_resets_inclusion() {
        let mut set = sample();
        set.include(["user"]);
        let mut derived = set.derive();
        assert!(derived.is_empty());
        derived.include(["strings"]);
        assert_eq!(derived.groups(), vec![vec!["\"strings\"".to_string()]]);
    }
}

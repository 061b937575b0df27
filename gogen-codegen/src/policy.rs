//! Field inclusion/exclusion policy.
//!
//! A policy decides which of the assembled fields participate in one
//! artifact and under which serialized names. Filtering never reorders
//! fields.

use gogen_schema::Field;
use std::collections::HashSet;

/// One inclusion-list entry, parsed from `name` or `name=override`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeEntry {
    /// Public field name.
    pub name: String,
    /// Serialized-name override, when supplied and non-empty.
    pub rename: Option<String>,
}

impl IncludeEntry {
    /// Parses an entry of the form `name` or `name=override`.
    #[must_use]
    pub fn parse(entry: &str) -> Self {
        match entry.split_once('=') {
            Some((name, rename)) if !rename.is_empty() => Self {
                name: name.to_string(),
                rename: Some(rename.to_string()),
            },
            Some((name, _)) => Self {
                name: name.to_string(),
                rename: None,
            },
            None => Self {
                name: entry.to_string(),
                rename: None,
            },
        }
    }
}

/// Field policy for one artifact invocation.
#[derive(Debug, Clone, Default)]
pub struct FieldPolicy {
    include: Vec<IncludeEntry>,
    exclude: HashSet<String>,
    strict: bool,
}

impl FieldPolicy {
    /// Creates a policy from an inclusion list, an exclusion list, and the
    /// strict-mode switch.
    #[must_use]
    pub fn new(
        include: Vec<IncludeEntry>,
        exclude: impl IntoIterator<Item = String>,
        strict: bool,
    ) -> Self {
        Self {
            include,
            exclude: exclude.into_iter().collect(),
            strict,
        }
    }

    /// Applies the policy in declaration order.
    ///
    /// Excluded fields are dropped unconditionally. Under strict mode only
    /// fields named by the inclusion list survive. An inclusion override
    /// replaces the serialized field name; `fixed_renames` (public name →
    /// serialized key) are applied last and win over any override.
    #[must_use]
    pub fn apply(&self, fields: Vec<Field>, fixed_renames: &[(&str, &str)]) -> Vec<Field> {
        fields
            .into_iter()
            .filter_map(|mut field| {
                if self.exclude.contains(&field.names.public) {
                    return None;
                }

                let entry = self
                    .include
                    .iter()
                    .find(|entry| entry.name == field.names.public);
                if entry.is_none() && self.strict {
                    return None;
                }

                if let Some(rename) = entry.and_then(|entry| entry.rename.as_deref()) {
                    field.names.field = rename.to_string();
                }

                for (public, key) in fixed_renames {
                    if field.names.public == *public {
                        field.names.field = (*key).to_string();
                    }
                }

                Some(field)
            })
            .collect()
    }
}

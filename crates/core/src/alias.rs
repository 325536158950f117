//! Alias tables mapping short user-facing names to model ids or prompt paths.
use std::collections::HashSet;

use serde::Deserialize;

use crate::config::ConfigError;

/// A single alias and the value it stands for.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AliasEntry {
    pub alias: String,
    pub target: String,
}

impl AliasEntry {
    pub fn new(alias: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            target: target.into(),
        }
    }
}

/// An immutable, ordered alias table with unique keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<AliasEntry>")]
pub struct AliasTable {
    entries: Vec<AliasEntry>,
}

impl AliasTable {
    /// Builds a table, rejecting duplicate or empty aliases.
    pub fn new(entries: Vec<AliasEntry>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.alias.is_empty() {
                return Err(ConfigError::Config("Alias must not be empty".to_string()));
            }
            if !seen.insert(entry.alias.as_str()) {
                return Err(ConfigError::Config(format!(
                    "Duplicate alias '{}'",
                    entry.alias
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Looks up the target for an alias. Matching is exact.
    pub fn resolve(&self, alias: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.alias == alias)
            .map(|e| e.target.as_str())
    }

    /// Returns the canonical spelling of `alias`, ignoring ASCII case.
    pub fn find_ignore_case(&self, alias: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.alias.eq_ignore_ascii_case(alias))
            .map(|e| e.alias.as_str())
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.resolve(alias).is_some()
    }

    /// Aliases in table order.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.alias.as_str())
    }

    /// `(alias, target)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.alias.as_str(), e.target.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Vec<AliasEntry>> for AliasTable {
    type Error = ConfigError;

    fn try_from(entries: Vec<AliasEntry>) -> Result<Self, Self::Error> {
        AliasTable::new(entries)
    }
}

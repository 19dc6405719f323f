//! Message-key resolution seam
//!
//! Precondition errors carry machine-readable keys such as
//! `thread.already.archived`. A resolver turns those keys into display
//! text; the default resolver passes keys through untouched so callers that
//! do their own localization see the raw key.

use std::collections::HashMap;

/// Resolves machine-readable message keys to display text
pub trait MessageResolver: Send + Sync {
    fn resolve(&self, key: &str) -> String;
}

/// Passes every key through unresolved
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyResolver;

impl MessageResolver for KeyResolver {
    fn resolve(&self, key: &str) -> String {
        key.to_string()
    }
}

/// Map-backed resolver falling back to the key itself on a miss
#[derive(Debug, Default)]
pub struct TableResolver {
    table: HashMap<String, String>,
}

impl TableResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a translation for a key
    pub fn insert(&mut self, key: &str, text: &str) {
        self.table.insert(key.to_string(), text.to_string());
    }
}

impl FromIterator<(String, String)> for TableResolver {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            table: iter.into_iter().collect(),
        }
    }
}

impl MessageResolver for TableResolver {
    fn resolve(&self, key: &str) -> String {
        self.table
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_resolver_is_identity() {
        assert_eq!(KeyResolver.resolve("thread.locked"), "thread.locked");
    }

    #[test]
    fn test_table_resolver_translates_known_keys() {
        let mut resolver = TableResolver::new();
        resolver.insert("member.banned", "This member is banned.");
        assert_eq!(resolver.resolve("member.banned"), "This member is banned.");
        assert_eq!(resolver.resolve("member.unknown"), "member.unknown");
    }
}

//! Mode-keyed environment data model and merge semantics.
//!
//! Every environment source — inline options, loaded files, the manifest
//! field — produces the same shape: a mapping from mode name to flat
//! variable/value pairs. Sources are merged into an [`EnvMap`] in
//! precedence order, lowest tier first.
//!
//! # Merge Rules
//!
//! - Merging happens at key granularity: a later source overwrites
//!   individual variables, never a whole mode
//! - New modes create new entries; existing modes grow
//! - Nothing is ever removed during a merge pass

use std::collections::BTreeMap;

/// Flat variable → value pairs for a single mode.
pub type ModeVars = BTreeMap<String, String>;

/// The shape shared by every environment source: mode → variables.
pub type SourceConfig = BTreeMap<String, ModeVars>;

/// Accumulates source configurations across precedence tiers.
///
/// An `EnvMap` is created fresh for each `config` hook invocation and
/// discarded afterwards; it is never shared between invocations.
///
/// # Example
///
/// ```
/// use modenv::{EnvMap, SourceConfig};
///
/// let file: SourceConfig = serde_json::from_str(r#"{"dev":{"A":"1","B":"2"}}"#).unwrap();
/// let inline: SourceConfig = serde_json::from_str(r#"{"dev":{"B":"3"}}"#).unwrap();
///
/// let mut map = EnvMap::new();
/// map.apply(Some(&file));
/// map.apply(Some(&inline));
///
/// let dev = map.mode("dev").unwrap();
/// assert_eq!(dev.get("A").map(String::as_str), Some("1"));
/// assert_eq!(dev.get("B").map(String::as_str), Some("3"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvMap {
    modes: BTreeMap<String, ModeVars>,
}

impl EnvMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a source configuration into the map.
    ///
    /// `None` is a no-op, so optional sources (a missing inline `env`
    /// option, an absent manifest field) can be passed through directly.
    /// For each mode in the source, variables are inserted or overwritten
    /// one by one — the last applied source wins per key.
    pub fn apply(&mut self, source: Option<&SourceConfig>) {
        let source = match source {
            Some(source) => source,
            None => return,
        };

        for (mode, vars) in source {
            let entry = self.modes.entry(mode.clone()).or_default();
            for (key, value) in vars {
                entry.insert(key.clone(), value.clone());
            }
        }
    }

    /// Get the resolved variables for one mode.
    pub fn mode(&self, name: &str) -> Option<&ModeVars> {
        self.modes.get(name)
    }

    /// Iterate over all mode names, in sorted order.
    pub fn modes(&self) -> impl Iterator<Item = &str> {
        self.modes.keys().map(String::as_str)
    }

    /// Number of modes in the map.
    pub fn len(&self) -> usize {
        self.modes.len()
    }

    /// Check if the map has no modes.
    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }
}

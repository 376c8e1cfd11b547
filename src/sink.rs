//! Environment sinks.
//!
//! The process environment is externally owned state, so the plugin
//! writes through a capability instead of touching it directly: the host
//! passes [`ProcessEnv`], while tests and the CLI pass [`MemoryEnv`] and
//! inspect what would have been injected.

use std::collections::BTreeMap;

/// A settable key-value store receiving resolved env variables.
///
/// Writes are fire-and-forget: there is no read-back or conflict
/// detection, and the last writer wins.
pub trait EnvSink {
    /// Write one variable.
    fn set(&mut self, key: &str, value: &str);
}

/// Sink backed by the process-wide environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSink for ProcessEnv {
    fn set(&mut self, key: &str, value: &str) {
        std::env::set_var(key, value);
    }
}

/// In-memory sink for tests and resolve-without-applying inspection.
///
/// # Example
///
/// ```
/// use modenv::{EnvSink, MemoryEnv};
///
/// let mut sink = MemoryEnv::new();
/// sink.set("VITE_API_URL", "http://localhost:3000");
///
/// assert_eq!(sink.get("VITE_API_URL"), Some("http://localhost:3000"));
/// assert_eq!(sink.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryEnv {
    vars: BTreeMap<String, String>,
}

impl MemoryEnv {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a variable previously written to this sink.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// All written variables, sorted by key.
    pub fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }

    /// Number of variables written.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Check if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl EnvSink for MemoryEnv {
    fn set(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_stores_and_returns_values() {
        let mut sink = MemoryEnv::new();
        sink.set("KEY", "value");

        assert_eq!(sink.get("KEY"), Some("value"));
        assert_eq!(sink.get("OTHER"), None);
    }

    #[test]
    fn memory_sink_last_write_wins() {
        let mut sink = MemoryEnv::new();
        sink.set("KEY", "first");
        sink.set("KEY", "second");

        assert_eq!(sink.get("KEY"), Some("second"));
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn memory_sink_len_and_is_empty() {
        let mut sink = MemoryEnv::new();
        assert!(sink.is_empty());

        sink.set("KEY", "value");
        assert!(!sink.is_empty());
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn memory_sink_vars_are_sorted() {
        let mut sink = MemoryEnv::new();
        sink.set("B", "2");
        sink.set("A", "1");

        let keys: Vec<_> = sink.vars().keys().collect();
        assert_eq!(keys, vec!["A", "B"]);
    }

    #[test]
    fn process_sink_writes_to_the_environment() {
        let mut sink = ProcessEnv;
        sink.set("MODENV_SINK_TEST_VAR", "test_value");

        assert_eq!(
            std::env::var("MODENV_SINK_TEST_VAR").as_deref(),
            Ok("test_value")
        );
        std::env::remove_var("MODENV_SINK_TEST_VAR");
    }
}

//! Modenv - Mode-keyed environment resolution for build pipelines.
//!
//! Modenv merges mode-keyed environment definitions from dedicated env
//! source files, a `package.json` manifest field, and inline options, then
//! injects the active mode's variables into an environment sink with a
//! configurable key prefix.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`format`] - Source file formats and parsing
//! - [`loader`] - File-tier source loading
//! - [`manifest`] - `package.json` manifest-tier loading
//! - [`plugin`] - The build plugin and its config hook
//! - [`sink`] - Environment sinks for injected variables
//! - [`source`] - The merged mode-to-variables map
//!
//! # Example
//!
//! ```
//! use modenv::{BuildConfig, EnvOptions, EnvPlugin, MemoryEnv, Plugin, SourceConfig};
//!
//! let inline: SourceConfig = serde_json::from_str(
//!     r#"{"development": {"API_URL": "http://localhost:3000"}}"#,
//! ).unwrap();
//!
//! let plugin = EnvPlugin::new(EnvOptions {
//!     env: Some(inline),
//!     ..Default::default()
//! });
//!
//! let root = tempfile::tempdir().unwrap();
//! let mut build = BuildConfig::new(root.path());
//! let mut env = MemoryEnv::new();
//! plugin.config(&mut build, "development", &mut env).unwrap();
//! assert_eq!(env.get("VITE_API_URL"), Some("http://localhost:3000"));
//! ```
//!
//! For file-based source loading, see the integration tests.

pub mod cli;
pub mod error;
pub mod format;
pub mod loader;
pub mod manifest;
pub mod plugin;
pub mod sink;
pub mod source;

pub use error::{EnvError, Result};
pub use format::SourceFormat;
pub use loader::{load_path_sources, load_source_file};
pub use manifest::{load_manifest_config, MANIFEST_FILE};
pub use plugin::{
    resolve_sources, BuildConfig, EnvOptions, EnvPlugin, Plugin, PluginOrder, DEFAULT_ENV_PREFIX,
};
pub use sink::{EnvSink, MemoryEnv, ProcessEnv};
pub use source::{EnvMap, ModeVars, SourceConfig};

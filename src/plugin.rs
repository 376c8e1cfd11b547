//! The env-injection plugin and the host hook contract.
//!
//! The host build pipeline resolves the active mode, then drives each
//! plugin's `config` hook before resolving the rest of the build
//! configuration. [`EnvPlugin`] implements that hook: it merges the
//! three precedence tiers into a fresh [`EnvMap`] and projects the
//! active mode's values into the host's environment sink.
//!
//! Tier order, lowest to highest:
//! 1. candidate files from `load_path`
//! 2. the manifest's `vite-env` field
//! 3. the inline `env` option

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::loader::load_path_sources;
use crate::manifest::load_manifest_config;
use crate::sink::EnvSink;
use crate::source::{EnvMap, SourceConfig};

/// Default prefix for injected variables, matching the host pipeline's
/// default for client-exposed env vars.
pub const DEFAULT_ENV_PREFIX: &str = "VITE_";

/// When the host runs a plugin relative to its own default processing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PluginOrder {
    /// Before the host's default config processing.
    Pre,
    /// Alongside default processing.
    #[default]
    Normal,
    /// After default processing.
    Post,
}

/// The host's mutable build configuration, reduced to the fields this
/// plugin reads or writes.
///
/// The root is carried here explicitly rather than read from the
/// process working directory, so hosts and tests control where
/// candidate paths resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Project root that relative candidate paths resolve against.
    pub root: PathBuf,
    /// Prefix for env vars the host exposes to client code.
    pub env_prefix: String,
}

impl BuildConfig {
    /// Create a configuration rooted at `root` with the default prefix.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
        }
    }
}

/// A build-pipeline plugin, reduced to the hook this crate implements.
///
/// The environment sink is passed in by the host because the process
/// environment is host-owned state; tests pass a
/// [`MemoryEnv`](crate::MemoryEnv) instead.
pub trait Plugin {
    /// Plugin name, as reported to the host.
    fn name(&self) -> &'static str;

    /// Ordering hint for the host pipeline.
    fn order(&self) -> PluginOrder {
        PluginOrder::Normal
    }

    /// The configuration-resolution hook, run once per resolution with
    /// the active mode.
    fn config(&self, build: &mut BuildConfig, mode: &str, env: &mut dyn EnvSink) -> Result<()>;
}

/// Inline options for [`EnvPlugin`].
#[derive(Debug, Clone, Default)]
pub struct EnvOptions {
    /// Injection prefix. Also overwrites the host's `env_prefix` setting
    /// when non-empty; an explicitly empty prefix injects bare keys and
    /// leaves the host setting alone. Defaults to [`DEFAULT_ENV_PREFIX`].
    pub env_prefix: Option<String>,
    /// Ordered candidate env files, resolved against the build root.
    pub load_path: Option<Vec<PathBuf>>,
    /// Inline mode-keyed env values, the highest precedence tier.
    pub env: Option<SourceConfig>,
}

/// The env-injection plugin.
///
/// # Example
///
/// ```
/// use modenv::{BuildConfig, EnvOptions, EnvPlugin, MemoryEnv, Plugin};
///
/// let inline = serde_json::from_str(r#"{"development":{"API_URL":"http://localhost:3000"}}"#);
/// let plugin = EnvPlugin::new(EnvOptions {
///     env: Some(inline.unwrap()),
///     ..EnvOptions::default()
/// });
///
/// let mut build = BuildConfig::new(".");
/// let mut sink = MemoryEnv::new();
/// plugin.config(&mut build, "development", &mut sink).unwrap();
///
/// assert_eq!(sink.get("VITE_API_URL"), Some("http://localhost:3000"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvPlugin {
    options: EnvOptions,
}

impl EnvPlugin {
    /// Create the plugin with the given inline options.
    pub fn new(options: EnvOptions) -> Self {
        Self { options }
    }

    /// The inline options this plugin was created with.
    pub fn options(&self) -> &EnvOptions {
        &self.options
    }
}

impl Plugin for EnvPlugin {
    fn name(&self) -> &'static str {
        "modenv"
    }

    fn order(&self) -> PluginOrder {
        PluginOrder::Pre
    }

    fn config(&self, build: &mut BuildConfig, mode: &str, env: &mut dyn EnvSink) -> Result<()> {
        let prefix = self
            .options
            .env_prefix
            .as_deref()
            .unwrap_or(DEFAULT_ENV_PREFIX);
        if !prefix.is_empty() {
            build.env_prefix = prefix.to_string();
        }

        let map = resolve_sources(&build.root, &self.options)?;

        let vars = match map.mode(mode) {
            Some(vars) => vars,
            None => {
                tracing::debug!("No env entries for mode '{}'", mode);
                return Ok(());
            }
        };

        for (key, value) in vars {
            env.set(&format!("{}{}", prefix, key), value);
        }
        tracing::debug!("Injected {} env vars for mode '{}'", vars.len(), mode);

        Ok(())
    }
}

/// Run the three merge tiers for `options` against `root`.
///
/// Returns the full accumulated map, every mode included; projecting the
/// active mode into a sink is the caller's concern. The hook uses this,
/// and the CLI calls it directly to inspect modes beyond the active one.
pub fn resolve_sources(root: &Path, options: &EnvOptions) -> Result<EnvMap> {
    let mut map = EnvMap::new();
    load_path_sources(&mut map, root, options.load_path.as_deref())?;
    load_manifest_config(&mut map, root);
    map.apply(options.env.as_ref());
    Ok(map)
}

//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Modenv - Mode-keyed environment resolution for build pipelines.
#[derive(Debug, Parser)]
#[command(name = "modenv")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve the active mode's variables (default if no command specified)
    Resolve(ResolveArgs),

    /// List every mode defined across the merged sources
    Modes(ModesArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `resolve` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ResolveArgs {
    /// Mode to resolve
    #[arg(short, long, env = "MODENV_MODE", default_value = "development")]
    pub mode: String,

    /// Key prefix for injected variables (pass an empty string for bare keys)
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Env source file, lowest precedence first (repeatable)
    #[arg(short, long, value_name = "FILE")]
    pub load: Vec<PathBuf>,

    /// Inline definition, highest precedence (repeatable)
    #[arg(short, long, value_name = "MODE:KEY=VALUE", value_parser = parse_set_spec)]
    pub set: Vec<SetSpec>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output as eval-able shell export lines
    #[arg(long)]
    pub export: bool,
}

impl Default for ResolveArgs {
    fn default() -> Self {
        Self {
            mode: "development".to_string(),
            prefix: None,
            load: Vec::new(),
            set: Vec::new(),
            json: false,
            export: false,
        }
    }
}

impl ResolveArgs {
    /// Defaults for a bare invocation with no subcommand, honoring the
    /// same `MODENV_MODE` fallback an explicit `resolve` gets from clap.
    pub fn from_env() -> Self {
        Self {
            mode: std::env::var("MODENV_MODE").unwrap_or_else(|_| "development".to_string()),
            ..Self::default()
        }
    }
}

/// Arguments for the `modes` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ModesArgs {
    /// Env source file, lowest precedence first (repeatable)
    #[arg(short, long, value_name = "FILE")]
    pub load: Vec<PathBuf>,

    /// Inline definition, highest precedence (repeatable)
    #[arg(short, long, value_name = "MODE:KEY=VALUE", value_parser = parse_set_spec)]
    pub set: Vec<SetSpec>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// One inline definition parsed from a `--set MODE:KEY=VALUE` flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetSpec {
    pub mode: String,
    pub key: String,
    pub value: String,
}

/// Parse a `MODE:KEY=VALUE` flag value.
///
/// The mode ends at the first `:` and the key at the first `=`, so values
/// may freely contain both characters. The value may be empty.
fn parse_set_spec(spec: &str) -> Result<SetSpec, String> {
    let (mode, pair) = spec
        .split_once(':')
        .ok_or_else(|| format!("expected MODE:KEY=VALUE, got '{}'", spec))?;
    let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| format!("expected MODE:KEY=VALUE, got '{}'", spec))?;

    if mode.is_empty() || key.is_empty() {
        return Err(format!("mode and key must be non-empty in '{}'", spec));
    }

    Ok(SetSpec {
        mode: mode.to_string(),
        key: key.to_string(),
        value: value.to_string(),
    })
}

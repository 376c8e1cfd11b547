//! Modenv CLI entry point.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use modenv::cli::{Cli, Commands, ModesArgs, ResolveArgs, SetSpec};
use modenv::{
    resolve_sources, BuildConfig, EnvOptions, EnvPlugin, MemoryEnv, Plugin, SourceConfig,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("modenv=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("modenv=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("Modenv starting with args: {:?}", cli);

    // Determine project root
    let root = cli
        .root
        .as_ref()
        .cloned()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    let result = match cli.command {
        Some(Commands::Resolve(args)) => resolve_command(&root, &args),
        Some(Commands::Modes(args)) => modes_command(&root, &args),
        Some(Commands::Completions(args)) => {
            let mut cmd = Cli::command();
            clap_complete::generate(args.shell, &mut cmd, "modenv", &mut std::io::stdout());
            Ok(())
        }
        None => resolve_command(&root, &ResolveArgs::from_env()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

/// Resolve the active mode's variables and print them.
fn resolve_command(root: &Path, args: &ResolveArgs) -> Result<()> {
    let options = EnvOptions {
        env_prefix: args.prefix.clone(),
        load_path: if args.load.is_empty() {
            None
        } else {
            Some(args.load.clone())
        },
        env: inline_config(&args.set),
    };

    let plugin = EnvPlugin::new(options);
    let mut build = BuildConfig::new(root);
    let mut sink = MemoryEnv::new();
    plugin.config(&mut build, &args.mode, &mut sink)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(sink.vars())?);
    } else if args.export {
        for (key, value) in sink.vars() {
            println!("export {}={}", key, quote_posix(value));
        }
    } else {
        for (key, value) in sink.vars() {
            println!("{}={}", key, value);
        }
    }

    Ok(())
}

/// List every mode defined across the merged sources.
fn modes_command(root: &Path, args: &ModesArgs) -> Result<()> {
    let options = EnvOptions {
        env_prefix: None,
        load_path: if args.load.is_empty() {
            None
        } else {
            Some(args.load.clone())
        },
        env: inline_config(&args.set),
    };

    let map = resolve_sources(root, &options)?;

    if args.json {
        let names: Vec<&str> = map.modes().collect();
        println!("{}", serde_json::to_string(&names)?);
    } else {
        for name in map.modes() {
            println!("{}", name);
        }
    }

    Ok(())
}

/// Fold `--set MODE:KEY=VALUE` flags into an inline source config.
fn inline_config(sets: &[SetSpec]) -> Option<SourceConfig> {
    if sets.is_empty() {
        return None;
    }

    let mut config = SourceConfig::new();
    for spec in sets {
        config
            .entry(spec.mode.clone())
            .or_default()
            .insert(spec.key.clone(), spec.value.clone());
    }
    Some(config)
}

/// Single-quote a value for POSIX shells.
fn quote_posix(s: &str) -> String {
    let mut out = String::from("'");
    for ch in s.chars() {
        if ch == '\'' {
            out.push_str("'\\''");
        } else {
            out.push(ch);
        }
    }
    out.push('\'');
    out
}

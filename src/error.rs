//! Error types for modenv operations.
//!
//! This module defines [`EnvError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - A candidate file that does not exist is a silent skip, never an error
//! - A candidate file that exists but cannot be read or parsed is fatal to
//!   the whole `config` hook
//! - Manifest problems are swallowed by the manifest reader and never
//!   surface here

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for modenv operations.
#[derive(Debug, Error)]
pub enum EnvError {
    /// An env source file exists but could not be read.
    #[error("Failed to read env source {path}: {message}")]
    SourceRead { path: PathBuf, message: String },

    /// An env source file was read but could not be parsed.
    #[error("Failed to parse env source {path}: {message}")]
    SourceParse { path: PathBuf, message: String },

    /// No source format is registered for the file's extension.
    #[error("Unsupported env source format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for modenv operations.
pub type Result<T> = std::result::Result<T, EnvError>;

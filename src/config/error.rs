//! Errors raised while loading and validating `prosa.toml`.
//!
//! Kept as a dedicated enum so `main` can map configuration trouble to its
//! own exit status, distinct from metadata errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read at all.
    #[error("cannot read config file `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    /// The file is not valid TOML, or names a field that does not exist.
    #[error("malformed config file")]
    Toml(#[from] toml::de::Error),

    /// The file parsed, but a value fails a semantic check (unknown
    /// locale, zero page size, and the like).
    #[error("invalid configuration: {0}")]
    Validation(String),
}

//! Error types for configuration loading.

use std::path::PathBuf;

/// Errors that can occur while loading or layering configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error reading a configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file not found.
    #[error("config file not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// A top-level entry is not a table.
    #[error("config entry '{name}' is not a section")]
    InvalidSection {
        /// Name of the offending top-level key.
        name: String,
    },

    /// A `section.key=value` command-line override could not be parsed.
    #[error("invalid config override '{arg}': {detail}")]
    InvalidOverride {
        /// The argument as given.
        arg: String,
        /// What is wrong with it.
        detail: String,
    },
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

//! Error types for C/C++ platform resolution.

use std::path::PathBuf;

use flint_core::{DomainError, Flavor};

/// Errors that can occur while resolving or loading C/C++ platforms.
#[derive(Debug, thiserror::Error)]
pub enum CxxError {
    /// A configuration section could not be decoded into toolchain settings.
    #[error("invalid C/C++ configuration in section [{section}]{}: {detail}", flavor_note(.flavor))]
    Configuration {
        /// The flavor the section configures, if it is a flavored section.
        flavor: Option<Flavor>,
        /// Full section name, e.g. `cxx#iphoneos-arm64`.
        section: String,
        /// Description of the problem.
        detail: String,
    },

    /// The effective host flavor has no platform after resolution.
    #[error("internal error: host platform '{flavor}' missing after C/C++ platform resolution")]
    InternalConsistency {
        /// The flavor that should have been present.
        flavor: Flavor,
    },

    /// A lookup in a flavor domain failed.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// TOML deserialization error in a platform file.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// I/O error reading/writing platform files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Platform file not found.
    #[error("platform file not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },
}

fn flavor_note(flavor: &Option<Flavor>) -> String {
    match flavor {
        Some(f) => format!(" for flavor '{f}'"),
        None => String::new(),
    }
}

/// Result type for C/C++ platform operations.
pub type Result<T> = std::result::Result<T, CxxError>;

//! Layered build configuration for the Flint build tool.
//!
//! Configuration is a list of named sections holding key/value pairs.
//! Sections may carry a flavor suffix (`cxx#iphoneos-arm64`) to scope
//! their values to one build variant. Files are TOML:
//!
//! ```toml
//! [cxx]
//! cxxflags = "-g"
//!
//! ["cxx#iphoneos-arm64"]
//! cxxflags = "-O2"
//! ```

pub mod config;
pub mod error;

pub use config::{BuildConfig, ConfigSource, Section, CONFIG_FILE_NAME, LOCAL_CONFIG_FILE_NAME};
pub use error::{ConfigError, Result};

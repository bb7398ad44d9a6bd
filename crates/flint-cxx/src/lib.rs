//! C/C++ platform model and flavor resolution for the Flint build tool.
//!
//! Resolution merges three sources into one [`FlavorDomain`] of
//! [`CxxPlatform`]s:
//! - **Built-in platforms** supplied by the caller (cross toolchains,
//!   `platforms/*.platform.toml` files)
//! - **Host defaults** derived from the detected host and the `[cxx]` section
//! - **Override sections** `[cxx#<flavor>]` layered on top of either
//!
//! See [`resolver::resolve`] for the precedence rules.
//!
//! [`FlavorDomain`]: flint_core::FlavorDomain

pub mod cxx_config;
pub mod defaults;
pub mod error;
pub mod host;
pub mod parse;
pub mod platform;
pub mod resolver;

pub use cxx_config::CxxConfig;
pub use error::{CxxError, Result};
pub use host::{Host, HostArch, HostDetector, HostOs, SystemHostDetector};
pub use platform::{CxxPlatform, Flags, Toolchain, ToolchainOverrides};
pub use resolver::{resolve, ResolvedPlatforms, CXX_PLATFORM_DOMAIN};

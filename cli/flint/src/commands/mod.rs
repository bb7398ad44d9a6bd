//! CLI command implementations.

pub mod platforms;

//! The `[cxx]` view over build configuration.
//!
//! The base section `[cxx]` configures the host toolchain and holds the
//! `host_platform` and `default_platform` options. Sections named
//! `[cxx#<flavor>]` override the toolchain of a single flavor.

use flint_config::ConfigSource;
use flint_core::Flavor;

use crate::error::{CxxError, Result};
use crate::platform::ToolchainOverrides;

/// Name of the base C/C++ section.
pub const CXX_SECTION: &str = "cxx";

/// Separates a section name from the flavor it is scoped to.
pub const FLAVOR_SEPARATOR: char = '#';

/// C/C++ settings read from a [`ConfigSource`], optionally scoped to one flavor.
#[derive(Clone, Copy)]
pub struct CxxConfig<'a> {
    source: &'a dyn ConfigSource,
    flavor: Option<&'a Flavor>,
}

impl<'a> CxxConfig<'a> {
    /// The unscoped view, reading the base `[cxx]` section.
    pub fn new(source: &'a dyn ConfigSource) -> Self {
        Self {
            source,
            flavor: None,
        }
    }

    /// A view reading the `[cxx#<flavor>]` section.
    pub fn for_flavor(&self, flavor: &'a Flavor) -> CxxConfig<'a> {
        Self {
            source: self.source,
            flavor: Some(flavor),
        }
    }

    pub fn flavor(&self) -> Option<&Flavor> {
        self.flavor
    }

    /// Full name of the section this view reads.
    pub fn section_name(&self) -> String {
        match self.flavor {
            Some(f) => format!("{CXX_SECTION}{FLAVOR_SEPARATOR}{f}"),
            None => CXX_SECTION.to_string(),
        }
    }

    /// Toolchain settings in this view's section (empty if the section is absent).
    pub fn overrides(&self) -> Result<ToolchainOverrides> {
        let name = self.section_name();
        match self.source.section(&name) {
            Some(section) => {
                ToolchainOverrides::from_section(section).map_err(|e| CxxError::Configuration {
                    flavor: self.flavor.cloned(),
                    section: name,
                    detail: e.message().to_string(),
                })
            }
            None => Ok(ToolchainOverrides::default()),
        }
    }

    /// Every flavor with a `[cxx#<flavor>]` section, in configuration order.
    pub fn flavors(&self) -> Result<Vec<Flavor>> {
        let prefix = format!("{CXX_SECTION}{FLAVOR_SEPARATOR}");
        let mut flavors = Vec::new();
        for name in self.source.section_names() {
            let Some(tag) = name.strip_prefix(&prefix) else {
                continue;
            };
            let flavor = Flavor::new(tag).map_err(|e| CxxError::Configuration {
                flavor: None,
                section: name.to_string(),
                detail: e.to_string(),
            })?;
            flavors.push(flavor);
        }
        Ok(flavors)
    }

    /// The `cxx.host_platform` option: a flavor to treat as the host.
    pub fn host_platform(&self) -> Option<&'a str> {
        self.pointer("host_platform")
    }

    /// The `cxx.default_platform` option: the flavor used when a target names none.
    pub fn default_platform(&self) -> Option<&'a str> {
        self.pointer("default_platform")
    }

    fn pointer(&self, key: &str) -> Option<&'a str> {
        let value = self.source.get(CXX_SECTION, key)?;
        match value.as_str() {
            Some(s) if !s.trim().is_empty() => Some(s.trim()),
            Some(_) => None,
            None => {
                log::warn!("ignoring {CXX_SECTION}.{key}: expected a flavor name, found {value}");
                None
            }
        }
    }
}

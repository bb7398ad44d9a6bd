//! Configuration files, layering and command-line overrides.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::error::{ConfigError, Result};

/// Name of the project configuration file.
pub const CONFIG_FILE_NAME: &str = ".flintconfig.toml";

/// Name of the uncommitted per-checkout file layered on top of [`CONFIG_FILE_NAME`].
pub const LOCAL_CONFIG_FILE_NAME: &str = ".flintconfig.local.toml";

/// The key/value pairs of one configuration section.
pub type Section = toml::Table;

/// Read-only access to configuration sections.
pub trait ConfigSource {
    /// Look up a section by its full name (including any `#flavor` suffix).
    fn section(&self, name: &str) -> Option<&Section>;

    /// Every section name, in the order the sections were first defined.
    fn section_names(&self) -> Vec<&str>;

    /// Look up a single value.
    fn get(&self, section: &str, key: &str) -> Option<&toml::Value> {
        self.section(section).and_then(|s| s.get(key))
    }

    /// Look up a single string value; non-string values are ignored.
    fn get_str(&self, section: &str, key: &str) -> Option<&str> {
        self.get(section, key).and_then(toml::Value::as_str)
    }
}

/// Build configuration assembled from one or more layers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildConfig {
    sections: IndexMap<String, Section>,
}

impl BuildConfig {
    /// An empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from a TOML string.
    ///
    /// Every top-level entry must be a table; each table is one section.
    pub fn parse(toml_str: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(toml_str)?;
        let mut sections = IndexMap::new();
        for (name, value) in table {
            match value {
                toml::Value::Table(section) => {
                    sections.insert(name, section);
                }
                _ => return Err(ConfigError::InvalidSection { name }),
            }
        }
        Ok(Self { sections })
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        log::debug!(
            "loaded {} config section(s) from {}",
            config.sections.len(),
            path.display()
        );
        Ok(config)
    }

    /// Search upward from `start_dir` for a [`CONFIG_FILE_NAME`] file and
    /// load it, layering a sibling [`LOCAL_CONFIG_FILE_NAME`] on top.
    ///
    /// Returns the configuration together with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                let mut config = Self::load(&candidate)?;
                let local = dir.join(LOCAL_CONFIG_FILE_NAME);
                if local.is_file() {
                    config.merge(Self::load(&local)?);
                }
                return Ok(Some((config, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Layer `overlay` on top of this configuration, key by key.
    pub fn merge(&mut self, overlay: BuildConfig) {
        for (name, section) in overlay.sections {
            let target = self.sections.entry(name).or_default();
            for (key, value) in section {
                target.insert(key, value);
            }
        }
    }

    /// Apply a `section.key=value` override as given on the command line.
    ///
    /// The value is read as a TOML value when it parses as one and as a plain
    /// string otherwise. An empty value removes the key.
    pub fn set_from_arg(&mut self, arg: &str) -> Result<()> {
        let invalid = |detail: &str| ConfigError::InvalidOverride {
            arg: arg.to_string(),
            detail: detail.to_string(),
        };

        let (path, raw) = arg
            .split_once('=')
            .ok_or_else(|| invalid("expected section.key=value"))?;
        // Section names may contain '.' (flavors do); keys never do.
        let (section, key) = path
            .trim()
            .rsplit_once('.')
            .ok_or_else(|| invalid("expected section.key=value"))?;
        if section.is_empty() || key.is_empty() {
            return Err(invalid("section and key must be non-empty"));
        }

        let raw = raw.trim();
        if raw.is_empty() {
            if let Some(s) = self.sections.get_mut(section) {
                s.remove(key);
            }
            return Ok(());
        }
        self.set(section, key, parse_value(raw));
        Ok(())
    }

    /// Set a single value, creating the section if needed.
    pub fn set(&mut self, section: &str, key: &str, value: toml::Value) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

fn parse_value(raw: &str) -> toml::Value {
    toml::from_str::<toml::Table>(&format!("value = {raw}"))
        .ok()
        .and_then(|mut t| t.remove("value"))
        .unwrap_or_else(|| toml::Value::String(raw.to_string()))
}

impl ConfigSource for BuildConfig {
    fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    fn section_names(&self) -> Vec<&str> {
        self.sections.keys().map(String::as_str).collect()
    }
}

//! TOML parsing, serialization, validation, and discovery for platform files.
//!
//! Built-in platforms beyond the host toolchain (cross compilers, SDK
//! toolchains) are stored as `.platform.toml` files in the `platforms/`
//! directory of a project. The file stem is the platform's flavor.

use std::path::{Path, PathBuf};

use flint_core::Flavor;

use crate::error::{CxxError, Result};
use crate::host::HostOs;
use crate::platform::{CxxPlatform, Toolchain};

/// Directory holding platform files, relative to the project root.
pub const PLATFORMS_DIR: &str = "platforms";

/// Suffix of platform file names.
pub const PLATFORM_FILE_SUFFIX: &str = ".platform.toml";

/// A validation issue found in a platform definition.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Severity: "error" or "warning".
    pub severity: &'static str,
    /// Human-readable description.
    pub message: String,
}

/// Load a platform from a `.platform.toml` file.
pub fn load_platform_toml(path: &Path) -> Result<CxxPlatform> {
    if !path.exists() {
        return Err(CxxError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_platform_toml(&content)
}

/// Parse a platform from a TOML string.
pub fn parse_platform_toml(toml_str: &str) -> Result<CxxPlatform> {
    let platform: CxxPlatform = toml::from_str(toml_str)?;
    Ok(platform)
}

/// Serialize a platform to pretty TOML.
pub fn platform_to_toml(platform: &CxxPlatform) -> Result<String> {
    let toml_str = toml::to_string_pretty(platform)?;
    Ok(toml_str)
}

/// Validate a platform definition.
///
/// `file_stem` is the flavor implied by the file name, when the platform
/// was loaded from a file. Returns `Err(issues)` with every problem found.
pub fn validate_platform(
    platform: &CxxPlatform,
    file_stem: Option<&str>,
) -> std::result::Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();
    let toolchain = platform.toolchain();

    // 1. Required tools are set
    let tools = [
        ("cc", &toolchain.cc),
        ("cxx", &toolchain.cxx),
        ("cpp", &toolchain.cpp),
        ("cxxpp", &toolchain.cxxpp),
        ("ld", &toolchain.ld),
        ("ar", &toolchain.ar),
        ("as", &toolchain.assembler),
    ];
    for (key, path) in tools {
        if path.as_os_str().is_empty() {
            issues.push(ValidationIssue {
                severity: "error",
                message: format!("tool '{key}' has an empty path"),
            });
        }
    }

    // 2. Extensions are bare
    let extensions = [
        ("object_file_extension", &toolchain.object_file_extension),
        ("static_library_extension", &toolchain.static_library_extension),
        ("shared_library_extension", &toolchain.shared_library_extension),
    ];
    for (key, ext) in extensions {
        if ext.is_empty() {
            issues.push(ValidationIssue {
                severity: "error",
                message: format!("{key} is empty"),
            });
        } else if ext.starts_with('.') {
            issues.push(ValidationIssue {
                severity: "warning",
                message: format!("{key} '{ext}' should not include the leading '.'"),
            });
        }
    }

    // 3. No empty flags (usually a stray separator in an array)
    let flag_lists = [
        ("cflags", &toolchain.cflags),
        ("cxxflags", &toolchain.cxxflags),
        ("cppflags", &toolchain.cppflags),
        ("cxxppflags", &toolchain.cxxppflags),
        ("ldflags", &toolchain.ldflags),
        ("asflags", &toolchain.asflags),
        ("arflags", &toolchain.arflags),
    ];
    for (key, flags) in flag_lists {
        if flags.iter().any(|f| f.trim().is_empty()) {
            issues.push(ValidationIssue {
                severity: "warning",
                message: format!("{key} contains an empty flag"),
            });
        }
    }

    // 4. File name agrees with the flavor
    if let Some(stem) = file_stem {
        if stem != platform.flavor().name() {
            issues.push(ValidationIssue {
                severity: "error",
                message: format!(
                    "file name '{stem}{PLATFORM_FILE_SUFFIX}' does not match flavor '{}'",
                    platform.flavor()
                ),
            });
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Generate a template `.platform.toml` for a new platform.
///
/// Seeds from the system toolchain of `os` with the given flavor.
pub fn generate_template(flavor: &Flavor, os: HostOs) -> Result<String> {
    let platform = CxxPlatform::new(flavor.clone(), Toolchain::for_host(os));
    platform_to_toml(&platform)
}

/// Discover all `.platform.toml` files in a project's `platforms/` directory.
///
/// Returns a list of (flavor_name, file_path) pairs sorted by name.
pub fn discover_platforms(project_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let platforms_dir = project_dir.join(PLATFORMS_DIR);
    if !platforms_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut platforms = Vec::new();
    for entry in std::fs::read_dir(&platforms_dir)? {
        let path = entry?.path();
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(name) = file_name.strip_suffix(PLATFORM_FILE_SUFFIX) {
            platforms.push((name.to_string(), path.clone()));
        }
    }
    platforms.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(platforms)
}

/// Load every platform file of a project as built-in platforms.
///
/// Platforms are keyed by the flavor declared inside the file.
pub fn load_builtin_platforms(project_dir: &Path) -> Result<Vec<(Flavor, CxxPlatform)>> {
    let mut platforms = Vec::new();
    for (name, path) in discover_platforms(project_dir)? {
        let platform = load_platform_toml(&path)?;
        if platform.flavor().name() != name {
            log::warn!(
                "{} declares flavor '{}'; registering it under that flavor",
                path.display(),
                platform.flavor()
            );
        }
        log::debug!("loaded built-in platform '{}' from {}", platform.flavor(), path.display());
        platforms.push((platform.flavor().clone(), platform));
    }
    Ok(platforms)
}

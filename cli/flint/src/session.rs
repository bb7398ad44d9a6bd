//! Configuration and project discovery for a CLI invocation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use flint_config::BuildConfig;
use flint_cxx::parse::load_builtin_platforms;
use flint_cxx::{CxxConfig, Host, HostDetector, ResolvedPlatforms, SystemHostDetector};

/// Everything a command needs to resolve platforms.
#[derive(Debug, Clone)]
pub struct Session {
    /// Layered configuration (files, then `-c` overrides).
    pub config: BuildConfig,
    /// Project root: the directory holding the config file, or the start directory.
    pub project_dir: PathBuf,
    /// The host platforms are resolved for.
    pub host: Host,
}

impl Session {
    /// Load configuration for a command run from `cwd`.
    ///
    /// An explicit `config_file` replaces the upward search for
    /// `.flintconfig.toml`. `overrides` are `section.key=value` strings
    /// applied last.
    pub fn load(cwd: &Path, config_file: Option<&Path>, overrides: &[String]) -> Result<Self> {
        let (mut config, project_dir) = match config_file {
            Some(path) => {
                let config = BuildConfig::load(path)
                    .with_context(|| format!("loading {}", path.display()))?;
                let dir = path
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| cwd.to_path_buf());
                (config, dir)
            }
            None => match BuildConfig::find_and_load(cwd).context("loading build configuration")? {
                Some((config, dir)) => (config, dir),
                None => {
                    log::debug!("no config file found above {}", cwd.display());
                    (BuildConfig::new(), cwd.to_path_buf())
                }
            },
        };
        for arg in overrides {
            config.set_from_arg(arg)?;
        }
        Ok(Self {
            config,
            project_dir,
            host: SystemHostDetector.detect(),
        })
    }

    /// Resolve the C/C++ platforms for this session.
    pub fn resolve(&self) -> Result<ResolvedPlatforms> {
        let builtins = load_builtin_platforms(&self.project_dir).with_context(|| {
            format!("loading platform files under {}", self.project_dir.display())
        })?;
        let resolved = ResolvedPlatforms::create(&self.host, &CxxConfig::new(&self.config), builtins)
            .context("resolving C/C++ platforms")?;
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flint_config::ConfigSource;

    #[test]
    fn load_without_config_uses_cwd() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::load(dir.path(), None, &[]).unwrap();
        assert_eq!(session.project_dir, dir.path());
        assert!(session.config.is_empty());
    }

    #[test]
    fn load_applies_overrides_last() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[cxx]\ncc = \"gcc\"\n").unwrap();

        let session = Session::load(
            Path::new("/"),
            Some(path.as_path()),
            &["cxx.cc=clang".to_string()],
        )
        .unwrap();
        assert_eq!(session.project_dir, dir.path());
        assert_eq!(session.config.get_str("cxx", "cc"), Some("clang"));
    }

    #[test]
    fn load_rejects_bad_override() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Session::load(dir.path(), None, &["nonsense".to_string()]).is_err());
    }

    #[test]
    fn load_missing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(Session::load(dir.path(), Some(missing.as_path()), &[]).is_err());
    }
}

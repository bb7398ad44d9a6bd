//! C/C++ platform resolution.
//!
//! Merges caller-supplied built-in platforms, the default host platform and
//! per-flavor `[cxx#<flavor>]` override sections into one domain, then picks
//! the platform used when a target does not name one.
//!
//! Precedence, highest first:
//! - override section > built-in platform > default host platform
//! - `cxx.default_platform` > `cxx.host_platform` > detected host
//!
//! Options that name a flavor which does not exist are ignored rather than
//! rejected, so a stale pointer in a shared config never blocks a build.

use std::collections::BTreeSet;

use flint_core::{Flavor, FlavorDomain};
use indexmap::IndexMap;

use crate::cxx_config::CxxConfig;
use crate::defaults::default_host_platform;
use crate::error::{CxxError, Result};
use crate::host::{Host, HostDetector};
use crate::platform::CxxPlatform;

/// Display name of the C/C++ platform domain.
pub const CXX_PLATFORM_DOMAIN: &str = "C/C++ platform";

/// The outcome of platform resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPlatforms {
    default_platform: CxxPlatform,
    platforms: FlavorDomain<CxxPlatform>,
}

impl ResolvedPlatforms {
    /// Detect the host with `detector`, then [`resolve`].
    pub fn create(
        detector: &dyn HostDetector,
        config: &CxxConfig<'_>,
        builtin_platforms: impl IntoIterator<Item = (Flavor, CxxPlatform)>,
    ) -> Result<Self> {
        let host = detector.detect();
        log::debug!("detected host {host}");
        resolve(&host, config, builtin_platforms)
    }

    /// The platform used by targets that request no platform flavor.
    pub fn default_platform(&self) -> &CxxPlatform {
        &self.default_platform
    }

    /// Every resolved platform.
    pub fn all_platforms(&self) -> &FlavorDomain<CxxPlatform> {
        &self.platforms
    }

    /// The platform a target with `flavors` builds with.
    ///
    /// Fails if the flavors name more than one platform.
    pub fn platform_for<'a>(
        &self,
        flavors: impl IntoIterator<Item = &'a Flavor>,
    ) -> Result<&CxxPlatform> {
        Ok(self.platforms.select_or(flavors, &self.default_platform)?)
    }
}

/// Where an override section's base toolchain comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideBase<'a> {
    /// The flavor already has a system platform.
    Existing(&'a CxxPlatform),
    /// The flavor names a host this build is not running on; skip it.
    AlternateHost,
    /// Unknown flavor: customize the default host platform under a new name.
    HostFallback,
}

/// Decide which platform the `[cxx#<flavor>]` section is layered onto.
pub fn override_base<'a>(
    flavor: &Flavor,
    system_platforms: &'a IndexMap<Flavor, CxxPlatform>,
    alternate_hosts: &BTreeSet<Flavor>,
) -> OverrideBase<'a> {
    if let Some(platform) = system_platforms.get(flavor) {
        OverrideBase::Existing(platform)
    } else if alternate_hosts.contains(flavor) {
        OverrideBase::AlternateHost
    } else {
        OverrideBase::HostFallback
    }
}

/// The host flavor after applying `cxx.host_platform`, if it names a platform.
pub fn effective_host_flavor(
    detected: &Flavor,
    host_platform: Option<&str>,
    platforms: &IndexMap<Flavor, CxxPlatform>,
) -> Flavor {
    let Some(name) = host_platform else {
        return detected.clone();
    };
    match Flavor::new(name) {
        Ok(flavor) if platforms.contains_key(&flavor) => flavor,
        _ => {
            log::warn!(
                "cxx.host_platform '{name}' does not name a C/C++ platform; using host '{detected}'"
            );
            detected.clone()
        }
    }
}

/// The default platform: `cxx.default_platform` if it names a platform,
/// otherwise the host platform.
pub fn select_default(
    default_platform: Option<&str>,
    platforms: &FlavorDomain<CxxPlatform>,
    host_platform: &CxxPlatform,
) -> CxxPlatform {
    let Some(name) = default_platform else {
        return host_platform.clone();
    };
    match Flavor::new(name).ok().and_then(|f| platforms.get(&f).ok()) {
        Some(platform) => platform.clone(),
        None => {
            log::warn!(
                "cxx.default_platform '{name}' does not name a C/C++ platform; using '{}'",
                host_platform.flavor()
            );
            host_platform.clone()
        }
    }
}

/// Resolve the C/C++ platforms available to a build running on `host`.
pub fn resolve(
    host: &Host,
    config: &CxxConfig<'_>,
    builtin_platforms: impl IntoIterator<Item = (Flavor, CxxPlatform)>,
) -> Result<ResolvedPlatforms> {
    let host_flavor = host.flavor();
    let default_host = default_host_platform(host, config)?;

    // System platforms: built-ins first, so a built-in host entry wins.
    let mut system_platforms: IndexMap<Flavor, CxxPlatform> = IndexMap::new();
    for (flavor, platform) in builtin_platforms {
        let platform = if platform.flavor() == &flavor {
            platform
        } else {
            log::debug!(
                "rekeying built-in platform '{}' as '{flavor}'",
                platform.flavor()
            );
            platform.with_flavor(flavor.clone())
        };
        system_platforms.insert(flavor, platform);
    }
    if !system_platforms.contains_key(&host_flavor) {
        system_platforms.insert(
            host_flavor.clone(),
            default_host.with_flavor(host_flavor.clone()),
        );
    }

    // Layer [cxx#<flavor>] sections on top.
    let alternate_hosts = host.alternate_flavors();
    let mut override_platforms = system_platforms.clone();
    for flavor in config.flavors()? {
        let base = match override_base(&flavor, &system_platforms, &alternate_hosts) {
            OverrideBase::Existing(platform) => platform,
            OverrideBase::AlternateHost => {
                log::debug!("skipping [cxx#{flavor}]: not running on that host");
                continue;
            }
            OverrideBase::HostFallback => {
                log::info!("Applying \"{flavor}\" overrides to default host platform");
                &default_host
            }
        };
        let overrides = config.for_flavor(&flavor).overrides()?;
        let platform = base.with_flavor(flavor.clone()).with_overrides(&overrides);
        override_platforms.insert(flavor, platform);
    }

    let host_flavor = effective_host_flavor(&host_flavor, config.host_platform(), &override_platforms);
    let host_platform = override_platforms
        .get(&host_flavor)
        .cloned()
        .ok_or_else(|| CxxError::InternalConsistency {
            flavor: host_flavor.clone(),
        })?;

    let platforms = FlavorDomain::new(CXX_PLATFORM_DOMAIN, override_platforms);
    let default_platform = select_default(config.default_platform(), &platforms, &host_platform);
    log::debug!(
        "resolved {} C/C++ platform(s); default '{}'",
        platforms.len(),
        default_platform.flavor()
    );

    Ok(ResolvedPlatforms {
        default_platform,
        platforms,
    })
}

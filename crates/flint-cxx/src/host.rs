//! Host identity detection.
//!
//! The host is the machine running the build. Its flavor (`<os>-<arch>`)
//! names the platform that builds for the host itself; every other
//! `<os>-<arch>` combination is an alternate host.

use std::collections::BTreeSet;
use std::fmt;

use flint_core::Flavor;
use serde::{Deserialize, Serialize};

/// Operating system of a build host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostOs {
    Linux,
    #[serde(rename = "macos")]
    MacOs,
    Windows,
    #[serde(rename = "freebsd")]
    FreeBsd,
    Unknown,
}

impl HostOs {
    /// Every operating system recognised as a build host.
    pub const KNOWN: [HostOs; 4] = [HostOs::Linux, HostOs::MacOs, HostOs::Windows, HostOs::FreeBsd];

    /// The operating system this binary was compiled for.
    pub fn current() -> Self {
        match std::env::consts::OS {
            "linux" => HostOs::Linux,
            "macos" => HostOs::MacOs,
            "windows" => HostOs::Windows,
            "freebsd" => HostOs::FreeBsd,
            _ => HostOs::Unknown,
        }
    }

    /// Name used in host flavors.
    pub fn as_str(self) -> &'static str {
        match self {
            HostOs::Linux => "linux",
            HostOs::MacOs => "macos",
            HostOs::Windows => "windows",
            HostOs::FreeBsd => "freebsd",
            HostOs::Unknown => "unknown",
        }
    }
}

/// CPU architecture of a build host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostArch {
    #[serde(rename = "x86_64")]
    X86_64,
    Arm64,
    I386,
    Armv7,
    Unknown,
}

impl HostArch {
    /// Every architecture recognised as a build host.
    pub const KNOWN: [HostArch; 4] = [HostArch::X86_64, HostArch::Arm64, HostArch::I386, HostArch::Armv7];

    /// The architecture this binary was compiled for.
    pub fn current() -> Self {
        match std::env::consts::ARCH {
            "x86_64" => HostArch::X86_64,
            "aarch64" => HostArch::Arm64,
            "x86" => HostArch::I386,
            "arm" => HostArch::Armv7,
            _ => HostArch::Unknown,
        }
    }

    /// Name used in host flavors.
    pub fn as_str(self) -> &'static str {
        match self {
            HostArch::X86_64 => "x86_64",
            HostArch::Arm64 => "arm64",
            HostArch::I386 => "i386",
            HostArch::Armv7 => "armv7",
            HostArch::Unknown => "unknown",
        }
    }
}

/// Canonical identity of a build host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Host {
    pub os: HostOs,
    pub arch: HostArch,
}

impl Host {
    pub fn new(os: HostOs, arch: HostArch) -> Self {
        Self { os, arch }
    }

    /// The flavor naming the platform that builds for this host.
    pub fn flavor(&self) -> Flavor {
        // Both halves are drawn from the flavor alphabet.
        Flavor::sanitized(&self.to_string())
    }

    /// Flavors of every recognised host, this one included.
    pub fn all_possible_flavors() -> BTreeSet<Flavor> {
        HostOs::KNOWN
            .iter()
            .flat_map(|os| HostArch::KNOWN.iter().map(move |arch| Host::new(*os, *arch).flavor()))
            .collect()
    }

    /// Flavors of every recognised host other than this one.
    pub fn alternate_flavors(&self) -> BTreeSet<Flavor> {
        let own = self.flavor();
        Self::all_possible_flavors()
            .into_iter()
            .filter(|f| *f != own)
            .collect()
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os.as_str(), self.arch.as_str())
    }
}

/// Source of the host identity used for resolution.
pub trait HostDetector {
    fn detect(&self) -> Host;
}

/// Detects the host this process is running on.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHostDetector;

impl HostDetector for SystemHostDetector {
    fn detect(&self) -> Host {
        Host::new(HostOs::current(), HostArch::current())
    }
}

/// A fixed host, for callers that already know (or want to pretend) what they run on.
impl HostDetector for Host {
    fn detect(&self) -> Host {
        *self
    }
}

//! C/C++ platform descriptors.
//!
//! A [`CxxPlatform`] pairs a [`Flavor`] with the [`Toolchain`] that builds
//! for it. Descriptors are values: rekeying and applying overrides both
//! return new descriptors and leave the original untouched.

use std::path::PathBuf;

use flint_config::Section;
use flint_core::{Flavor, Flavored};
use serde::{Deserialize, Serialize};

/// The tools, flags and file conventions of one C/C++ toolchain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toolchain {
    /// C compiler.
    pub cc: PathBuf,
    /// C++ compiler.
    pub cxx: PathBuf,
    /// C preprocessor.
    pub cpp: PathBuf,
    /// C++ preprocessor.
    pub cxxpp: PathBuf,
    /// Linker driver.
    pub ld: PathBuf,
    /// Static archiver.
    pub ar: PathBuf,
    /// Assembler.
    #[serde(rename = "as")]
    pub assembler: PathBuf,
    /// Archive indexer, when the archiver does not index on its own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranlib: Option<PathBuf>,
    /// Symbol stripper.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strip: Option<PathBuf>,
    #[serde(default)]
    pub cflags: Vec<String>,
    #[serde(default)]
    pub cxxflags: Vec<String>,
    #[serde(default)]
    pub cppflags: Vec<String>,
    #[serde(default)]
    pub cxxppflags: Vec<String>,
    #[serde(default)]
    pub ldflags: Vec<String>,
    #[serde(default)]
    pub asflags: Vec<String>,
    #[serde(default)]
    pub arflags: Vec<String>,
    /// Object file extension without the leading dot (`o`, `obj`).
    pub object_file_extension: String,
    /// Static library extension (`a`, `lib`).
    pub static_library_extension: String,
    /// Shared library extension (`so`, `dylib`, `dll`).
    pub shared_library_extension: String,
}

/// A flag list as written in configuration.
///
/// Accepts either a whitespace-separated string (`"-O2 -g"`) or an array
/// of individual flags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawFlags")]
pub struct Flags(pub Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlags {
    Line(String),
    List(Vec<String>),
}

impl From<RawFlags> for Flags {
    fn from(raw: RawFlags) -> Self {
        match raw {
            RawFlags::Line(line) => Flags(line.split_whitespace().map(str::to_string).collect()),
            RawFlags::List(list) => Flags(list),
        }
    }
}

/// Toolchain settings present in one configuration section.
///
/// Every field is optional; absent fields leave the base toolchain's value
/// in place when applied. Keys this type does not know are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ToolchainOverrides {
    pub cc: Option<PathBuf>,
    pub cxx: Option<PathBuf>,
    pub cpp: Option<PathBuf>,
    pub cxxpp: Option<PathBuf>,
    pub ld: Option<PathBuf>,
    pub ar: Option<PathBuf>,
    #[serde(rename = "as")]
    pub assembler: Option<PathBuf>,
    pub ranlib: Option<PathBuf>,
    pub strip: Option<PathBuf>,
    pub cflags: Option<Flags>,
    pub cxxflags: Option<Flags>,
    pub cppflags: Option<Flags>,
    pub cxxppflags: Option<Flags>,
    pub ldflags: Option<Flags>,
    pub asflags: Option<Flags>,
    pub arflags: Option<Flags>,
    pub object_file_extension: Option<String>,
    pub static_library_extension: Option<String>,
    pub shared_library_extension: Option<String>,
}

impl ToolchainOverrides {
    /// Decode the toolchain keys of a configuration section.
    pub fn from_section(section: &Section) -> Result<Self, toml::de::Error> {
        toml::Value::Table(section.clone()).try_into()
    }

    /// Whether the section set no toolchain keys at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn replace<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(v) = value {
        *target = v.clone();
    }
}

fn replace_flags(target: &mut Vec<String>, value: &Option<Flags>) {
    if let Some(Flags(flags)) = value {
        *target = flags.clone();
    }
}

impl Toolchain {
    /// Return a copy with every field present in `overrides` replaced.
    pub fn with_overrides(&self, overrides: &ToolchainOverrides) -> Self {
        let mut t = self.clone();
        replace(&mut t.cc, &overrides.cc);
        replace(&mut t.cxx, &overrides.cxx);
        replace(&mut t.cpp, &overrides.cpp);
        replace(&mut t.cxxpp, &overrides.cxxpp);
        replace(&mut t.ld, &overrides.ld);
        replace(&mut t.ar, &overrides.ar);
        replace(&mut t.assembler, &overrides.assembler);
        if overrides.ranlib.is_some() {
            t.ranlib = overrides.ranlib.clone();
        }
        if overrides.strip.is_some() {
            t.strip = overrides.strip.clone();
        }
        replace_flags(&mut t.cflags, &overrides.cflags);
        replace_flags(&mut t.cxxflags, &overrides.cxxflags);
        replace_flags(&mut t.cppflags, &overrides.cppflags);
        replace_flags(&mut t.cxxppflags, &overrides.cxxppflags);
        replace_flags(&mut t.ldflags, &overrides.ldflags);
        replace_flags(&mut t.asflags, &overrides.asflags);
        replace_flags(&mut t.arflags, &overrides.arflags);
        replace(&mut t.object_file_extension, &overrides.object_file_extension);
        replace(&mut t.static_library_extension, &overrides.static_library_extension);
        replace(&mut t.shared_library_extension, &overrides.shared_library_extension);
        t
    }
}

/// A C/C++ toolchain bound to the flavor that selects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CxxPlatform {
    flavor: Flavor,
    toolchain: Toolchain,
}

impl CxxPlatform {
    pub fn new(flavor: Flavor, toolchain: Toolchain) -> Self {
        Self { flavor, toolchain }
    }

    pub fn flavor(&self) -> &Flavor {
        &self.flavor
    }

    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    /// Copy this platform under a different flavor.
    pub fn with_flavor(&self, flavor: Flavor) -> Self {
        Self {
            flavor,
            toolchain: self.toolchain.clone(),
        }
    }

    /// Copy this platform with `overrides` layered on its toolchain.
    pub fn with_overrides(&self, overrides: &ToolchainOverrides) -> Self {
        Self {
            flavor: self.flavor.clone(),
            toolchain: self.toolchain.with_overrides(overrides),
        }
    }
}

impl Flavored for CxxPlatform {
    fn flavor(&self) -> &Flavor {
        &self.flavor
    }
}

//! Default host toolchains.
//!
//! Each supported host OS has a conventional system toolchain. The
//! default host platform starts from that toolchain and applies the base
//! `[cxx]` section on top.

use std::path::PathBuf;

use crate::cxx_config::CxxConfig;
use crate::error::Result;
use crate::host::{Host, HostOs};
use crate::platform::{CxxPlatform, Toolchain};

impl Toolchain {
    /// The conventional system toolchain for `os`.
    pub fn for_host(os: HostOs) -> Self {
        match os {
            HostOs::Linux | HostOs::Unknown => Self::gnu("/usr/bin"),
            HostOs::FreeBsd => Self::llvm("/usr/bin", "so"),
            HostOs::MacOs => Self::llvm("/usr/bin", "dylib"),
            HostOs::Windows => Self::msvc(),
        }
    }

    /// GCC and binutils installed under `bin_dir`.
    pub fn gnu(bin_dir: &str) -> Self {
        let tool = |name: &str| PathBuf::from(bin_dir).join(name);
        Self {
            cc: tool("gcc"),
            cxx: tool("g++"),
            cpp: tool("gcc"),
            cxxpp: tool("g++"),
            ld: tool("g++"),
            ar: tool("ar"),
            assembler: tool("as"),
            ranlib: Some(tool("ranlib")),
            strip: Some(tool("strip")),
            cflags: Vec::new(),
            cxxflags: Vec::new(),
            cppflags: Vec::new(),
            cxxppflags: Vec::new(),
            ldflags: Vec::new(),
            asflags: Vec::new(),
            arflags: vec!["rcs".into()],
            object_file_extension: "o".into(),
            static_library_extension: "a".into(),
            shared_library_extension: "so".into(),
        }
    }

    /// Clang installed under `bin_dir` as the system `cc`/`c++`.
    pub fn llvm(bin_dir: &str, shared_library_extension: &str) -> Self {
        let tool = |name: &str| PathBuf::from(bin_dir).join(name);
        Self {
            cc: tool("clang"),
            cxx: tool("clang++"),
            cpp: tool("clang"),
            cxxpp: tool("clang++"),
            ld: tool("clang++"),
            ar: tool("ar"),
            assembler: tool("clang"),
            ranlib: Some(tool("ranlib")),
            strip: Some(tool("strip")),
            cflags: Vec::new(),
            cxxflags: Vec::new(),
            cppflags: Vec::new(),
            cxxppflags: Vec::new(),
            ldflags: Vec::new(),
            asflags: Vec::new(),
            arflags: vec!["rcs".into()],
            object_file_extension: "o".into(),
            static_library_extension: "a".into(),
            shared_library_extension: shared_library_extension.into(),
        }
    }

    /// The MSVC toolchain as found on `PATH` in a developer prompt.
    pub fn msvc() -> Self {
        Self {
            cc: "cl.exe".into(),
            cxx: "cl.exe".into(),
            cpp: "cl.exe".into(),
            cxxpp: "cl.exe".into(),
            ld: "link.exe".into(),
            ar: "lib.exe".into(),
            assembler: "ml64.exe".into(),
            ranlib: None,
            strip: None,
            cflags: Vec::new(),
            cxxflags: Vec::new(),
            cppflags: Vec::new(),
            cxxppflags: Vec::new(),
            ldflags: Vec::new(),
            asflags: Vec::new(),
            arflags: Vec::new(),
            object_file_extension: "obj".into(),
            static_library_extension: "lib".into(),
            shared_library_extension: "dll".into(),
        }
    }
}

/// Build the default platform for `host`: the system toolchain with the
/// base `[cxx]` section applied, tagged with the host flavor.
pub fn default_host_platform(host: &Host, config: &CxxConfig<'_>) -> Result<CxxPlatform> {
    let overrides = config.overrides()?;
    let toolchain = Toolchain::for_host(host.os).with_overrides(&overrides);
    Ok(CxxPlatform::new(host.flavor(), toolchain))
}

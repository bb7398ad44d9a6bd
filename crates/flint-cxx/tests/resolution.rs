//! End-to-end C/C++ platform resolution scenarios.

use std::path::PathBuf;

use flint_config::BuildConfig;
use flint_core::Flavor;
use flint_cxx::{
    resolve, CxxConfig, CxxPlatform, Host, HostArch, HostOs, ResolvedPlatforms, Toolchain,
    CXX_PLATFORM_DOMAIN,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn flavor(name: &str) -> Flavor {
    Flavor::new(name).unwrap()
}

fn linux_host() -> Host {
    Host::new(HostOs::Linux, HostArch::X86_64)
}

fn macos_host() -> Host {
    Host::new(HostOs::MacOs, HostArch::Arm64)
}

fn iphoneos_platform() -> CxxPlatform {
    let mut toolchain = Toolchain::llvm("/Applications/Xcode.app/usr/bin", "dylib");
    toolchain.cxxflags = vec!["-arch".into(), "arm64".into(), "-g".into()];
    toolchain.ldflags = vec!["-arch".into(), "arm64".into()];
    CxxPlatform::new(flavor("iphoneos-arm64"), toolchain)
}

fn resolve_with(
    host: Host,
    config_toml: &str,
    builtins: Vec<(Flavor, CxxPlatform)>,
) -> ResolvedPlatforms {
    init_logging();
    let config = BuildConfig::parse(config_toml).unwrap();
    resolve(&host, &CxxConfig::new(&config), builtins).unwrap()
}

#[test]
fn scenario_a_host_only() {
    let resolved = resolve_with(linux_host(), "", Vec::new());

    let platforms = resolved.all_platforms();
    assert_eq!(platforms.name(), CXX_PLATFORM_DOMAIN);
    assert_eq!(platforms.len(), 1);
    let host = platforms.get(&flavor("linux-x86_64")).unwrap();
    assert_eq!(host.toolchain(), &Toolchain::for_host(HostOs::Linux));
    assert_eq!(resolved.default_platform(), host);
}

#[test]
fn scenario_b_override_layers_on_builtin() {
    let d1 = iphoneos_platform();
    let resolved = resolve_with(
        linux_host(),
        r#"
["cxx#iphoneos-arm64"]
cxxflags = "-O2"
"#,
        vec![(flavor("iphoneos-arm64"), d1.clone())],
    );

    let ios = resolved.all_platforms().get(&flavor("iphoneos-arm64")).unwrap();
    let mut expected = d1.toolchain().clone();
    expected.cxxflags = vec!["-O2".into()];
    assert_eq!(ios.toolchain(), &expected);
    assert_eq!(ios.flavor().name(), "iphoneos-arm64");
    // Not the host toolchain.
    assert_eq!(ios.toolchain().ldflags, d1.toolchain().ldflags);
    assert_ne!(ios.toolchain().cc, Toolchain::for_host(HostOs::Linux).cc);
}

#[test]
fn scenario_c_alternate_host_section_is_skipped() {
    let resolved = resolve_with(
        macos_host(),
        r#"
["cxx#linux-x86_64"]
cc = "/usr/bin/gcc-12"
"#,
        Vec::new(),
    );

    let platforms = resolved.all_platforms();
    assert!(!platforms.contains(&flavor("linux-x86_64")));
    assert!(platforms.contains(&flavor("macos-arm64")));
    assert_eq!(platforms.len(), 1);
}

#[test]
fn scenario_d_host_platform_override() {
    let resolved = resolve_with(
        linux_host(),
        r#"
[cxx]
host_platform = "custom"

["cxx#custom"]
cc = "/opt/custom/bin/cc"
"#,
        Vec::new(),
    );

    let platforms = resolved.all_platforms();
    let custom = platforms.get(&flavor("custom")).unwrap();
    assert_eq!(resolved.default_platform(), custom);
    assert_ne!(
        resolved.default_platform(),
        platforms.get(&flavor("linux-x86_64")).unwrap()
    );
    assert_eq!(custom.toolchain().cc, PathBuf::from("/opt/custom/bin/cc"));
    // Unknown flavors start from the host toolchain.
    assert_eq!(custom.toolchain().cxx, PathBuf::from("/usr/bin/g++"));
}

#[test]
fn host_presence_with_unresolvable_host_override() {
    let resolved = resolve_with(
        linux_host(),
        r#"
[cxx]
host_platform = "does-not-exist"
"#,
        Vec::new(),
    );
    assert!(resolved.all_platforms().contains(&flavor("linux-x86_64")));
    assert_eq!(resolved.default_platform().flavor().name(), "linux-x86_64");
}

#[test]
fn explicit_default_platform_wins_over_host_override() {
    let resolved = resolve_with(
        linux_host(),
        r#"
[cxx]
host_platform = "custom"
default_platform = "iphoneos-arm64"

["cxx#custom"]
cc = "/opt/custom/bin/cc"
"#,
        vec![(flavor("iphoneos-arm64"), iphoneos_platform())],
    );
    assert_eq!(resolved.default_platform(), &iphoneos_platform());
}

#[test]
fn unresolvable_default_platform_falls_back_to_host() {
    let resolved = resolve_with(
        linux_host(),
        r#"
[cxx]
default_platform = "android-arm64"
"#,
        Vec::new(),
    );
    let host = resolved.all_platforms().get(&flavor("linux-x86_64")).unwrap();
    assert_eq!(resolved.default_platform(), host);
}

#[test]
fn base_section_feeds_host_and_fallback_platforms_only() {
    let resolved = resolve_with(
        linux_host(),
        r#"
[cxx]
cflags = "-pipe"

["cxx#sanitized"]
cxxflags = "-fsanitize=address"
"#,
        vec![(flavor("iphoneos-arm64"), iphoneos_platform())],
    );
    let platforms = resolved.all_platforms();
    let host = platforms.get(&flavor("linux-x86_64")).unwrap();
    let sanitized = platforms.get(&flavor("sanitized")).unwrap();
    let ios = platforms.get(&flavor("iphoneos-arm64")).unwrap();

    assert_eq!(host.toolchain().cflags, ["-pipe"]);
    assert_eq!(sanitized.toolchain().cflags, ["-pipe"]);
    assert_eq!(sanitized.toolchain().cxxflags, ["-fsanitize=address"]);
    assert!(ios.toolchain().cflags.is_empty());
}

#[test]
fn override_of_host_flavor_replaces_host_entry() {
    let resolved = resolve_with(
        linux_host(),
        r#"
["cxx#linux-x86_64"]
ld = "/usr/bin/ld.lld"
"#,
        Vec::new(),
    );
    let platforms = resolved.all_platforms();
    assert_eq!(platforms.len(), 1);
    let host = platforms.get(&flavor("linux-x86_64")).unwrap();
    assert_eq!(host.toolchain().ld, PathBuf::from("/usr/bin/ld.lld"));
    assert_eq!(resolved.default_platform(), host);
}

#[test]
fn every_entry_is_keyed_by_its_own_flavor() {
    let resolved = resolve_with(
        linux_host(),
        r#"
["cxx#a"]
["cxx#iphoneos-arm64"]
["cxx#windows-x86_64"]
"#,
        vec![
            (flavor("iphoneos-arm64"), iphoneos_platform()),
            (flavor("android-arm64"), iphoneos_platform()),
        ],
    );
    let platforms = resolved.all_platforms();
    for (key, platform) in platforms.entries() {
        assert_eq!(key, platform.flavor());
    }
    let order: Vec<&str> = platforms.flavors().map(Flavor::name).collect();
    assert_eq!(order, ["iphoneos-arm64", "android-arm64", "linux-x86_64", "a"]);
}

#[test]
fn builtins_are_not_mutated() {
    let d1 = iphoneos_platform();
    let builtins = vec![(flavor("iphoneos-arm64"), d1.clone())];
    let _ = resolve_with(
        linux_host(),
        "[\"cxx#iphoneos-arm64\"]\ncc = \"/other/cc\"\n",
        builtins.clone(),
    );
    assert_eq!(builtins[0].1, d1);
}

#[test]
fn resolution_is_repeatable() {
    let toml = "[cxx]\nhost_platform = \"custom\"\n[\"cxx#custom\"]\ncc = \"cc\"\n";
    let first = resolve_with(linux_host(), toml, Vec::new());
    let second = resolve_with(linux_host(), toml, Vec::new());
    assert_eq!(first, second);
}

#[test]
fn create_uses_detector() {
    init_logging();
    let config = BuildConfig::new();
    let resolved =
        ResolvedPlatforms::create(&macos_host(), &CxxConfig::new(&config), Vec::new()).unwrap();
    assert_eq!(resolved.default_platform().flavor().name(), "macos-arm64");
    assert_eq!(
        resolved.default_platform().toolchain().shared_library_extension,
        "dylib"
    );
}

#[test]
fn unknown_platform_lookup_is_an_error() {
    let resolved = resolve_with(linux_host(), "", Vec::new());
    let err = resolved
        .all_platforms()
        .get(&flavor("iphoneos-arm64"))
        .unwrap_err();
    assert!(err.to_string().contains("iphoneos-arm64"));
}

//! `flint platforms`: C/C++ platform listing, description and validation.

use anyhow::{bail, Context, Result};
use flint_core::Flavor;
use flint_cxx::parse::{
    discover_platforms, generate_template, load_platform_toml, platform_to_toml,
    validate_platform, PLATFORMS_DIR, PLATFORM_FILE_SUFFIX,
};
use flint_cxx::CxxPlatform;

use crate::session::Session;

/// List every resolved platform, marking the default and the host.
pub fn list(session: &Session) -> Result<()> {
    let resolved = session.resolve()?;
    let host_flavor = session.host.flavor();
    println!("C/C++ platforms:");
    println!();
    for (flavor, platform) in resolved.all_platforms().entries() {
        let marker = if flavor == resolved.default_platform().flavor() {
            "*"
        } else {
            " "
        };
        let note = if *flavor == host_flavor { " (host)" } else { "" };
        println!(
            "{marker} {:<25} {}{note}",
            flavor.name(),
            platform.toolchain().cxx.display()
        );
    }
    println!();
    println!("* = default platform. Use 'flint platforms describe <flavor>' for details.");
    Ok(())
}

/// Describe one resolved platform.
pub fn describe(session: &Session, name: &str, format: Option<&str>) -> Result<()> {
    let flavor = Flavor::new(name)?;
    let resolved = session.resolve()?;
    let platform = resolved.all_platforms().get(&flavor)?;

    match format {
        None | Some("human") => print_platform(platform),
        Some("toml") => print!("{}", platform_to_toml(platform)?),
        Some(other) => bail!("unknown format '{other}' (expected human or toml)"),
    }
    Ok(())
}

fn print_platform(platform: &CxxPlatform) {
    let t = platform.toolchain();
    println!("=== Platform: {} ===", platform.flavor());
    println!();

    println!("--- Tools ---");
    println!("  cc:     {}", t.cc.display());
    println!("  cxx:    {}", t.cxx.display());
    println!("  cpp:    {}", t.cpp.display());
    println!("  cxxpp:  {}", t.cxxpp.display());
    println!("  ld:     {}", t.ld.display());
    println!("  ar:     {}", t.ar.display());
    println!("  as:     {}", t.assembler.display());
    if let Some(ranlib) = &t.ranlib {
        println!("  ranlib: {}", ranlib.display());
    }
    if let Some(strip) = &t.strip {
        println!("  strip:  {}", strip.display());
    }
    println!();

    println!("--- Flags ---");
    for (key, flags) in [
        ("cflags", &t.cflags),
        ("cxxflags", &t.cxxflags),
        ("cppflags", &t.cppflags),
        ("cxxppflags", &t.cxxppflags),
        ("ldflags", &t.ldflags),
        ("asflags", &t.asflags),
        ("arflags", &t.arflags),
    ] {
        if !flags.is_empty() {
            println!("  {key:<11} {}", flags.join(" "));
        }
    }
    println!();

    println!("--- Outputs ---");
    println!("  Object:         .{}", t.object_file_extension);
    println!("  Static library: .{}", t.static_library_extension);
    println!("  Shared library: .{}", t.shared_library_extension);
}

/// Print the flavor of the default platform.
pub fn default(session: &Session) -> Result<()> {
    let resolved = session.resolve()?;
    println!("{}", resolved.default_platform().flavor());
    Ok(())
}

/// Print the detected host identity.
pub fn host(session: &Session) -> Result<()> {
    println!("Host OS:     {}", session.host.os.as_str());
    println!("Host arch:   {}", session.host.arch.as_str());
    println!("Host flavor: {}", session.host.flavor());
    Ok(())
}

/// Print the platform a target requesting `flavors` would build with.
pub fn select(session: &Session, flavors: &[String]) -> Result<()> {
    let flavors = flavors
        .iter()
        .map(|f| Flavor::new(f).map_err(anyhow::Error::from))
        .collect::<Result<Vec<_>>>()?;
    let resolved = session.resolve()?;
    let platform = resolved.platform_for(&flavors)?;
    println!("{}", platform.flavor());
    Ok(())
}

/// Create `platforms/<flavor>.platform.toml` from the host's system toolchain.
pub fn add(session: &Session, name: &str) -> Result<()> {
    let flavor = Flavor::new(name)?;
    let dir = session.project_dir.join(PLATFORMS_DIR);
    let path = dir.join(format!("{flavor}{PLATFORM_FILE_SUFFIX}"));
    if path.exists() {
        bail!("platform file {} already exists", path.display());
    }
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    std::fs::write(&path, generate_template(&flavor, session.host.os)?)
        .with_context(|| format!("writing {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}

/// Validate every platform file of the project.
pub fn validate(session: &Session) -> Result<()> {
    let files = discover_platforms(&session.project_dir)?;
    if files.is_empty() {
        println!("No platform files under {}/", PLATFORMS_DIR);
        return Ok(());
    }

    let mut errors = 0;
    for (name, path) in files {
        let platform = load_platform_toml(&path)
            .with_context(|| format!("loading {}", path.display()))?;
        match validate_platform(&platform, Some(&name)) {
            Ok(()) => println!("ok      {name}"),
            Err(issues) => {
                println!("issues  {name}");
                for issue in issues {
                    if issue.severity == "error" {
                        errors += 1;
                    }
                    println!("        {}: {}", issue.severity, issue.message);
                }
            }
        }
    }
    if errors > 0 {
        bail!("{errors} platform validation error(s)");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn session(dir: &Path, config: &str) -> Session {
        std::fs::write(dir.join(flint_config::CONFIG_FILE_NAME), config).unwrap();
        Session::load(dir, None, &[]).unwrap()
    }

    #[test]
    fn list_and_default() {
        let dir = tempfile::tempdir().unwrap();
        let s = session(dir.path(), "[\"cxx#custom\"]\ncc = \"cc\"\n");
        assert!(list(&s).is_ok());
        assert!(default(&s).is_ok());
        assert!(host(&s).is_ok());
    }

    #[test]
    fn describe_known_and_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let s = session(dir.path(), "[\"cxx#custom\"]\ncc = \"cc\"\n");
        assert!(describe(&s, "custom", None).is_ok());
        assert!(describe(&s, "custom", Some("toml")).is_ok());
        assert!(describe(&s, "custom", Some("yaml")).is_err());
        assert!(describe(&s, "nonexistent", None).is_err());
        assert!(describe(&s, "not a flavor", None).is_err());
    }

    #[test]
    fn add_then_validate() {
        let dir = tempfile::tempdir().unwrap();
        let s = session(dir.path(), "");
        add(&s, "android-arm64").unwrap();
        assert!(dir
            .path()
            .join("platforms/android-arm64.platform.toml")
            .is_file());
        assert!(add(&s, "android-arm64").is_err());
        assert!(validate(&s).is_ok());
        assert!(describe(&s, "android-arm64", None).is_ok());
    }

    #[test]
    fn validate_reports_mismatched_file() {
        let dir = tempfile::tempdir().unwrap();
        let s = session(dir.path(), "");
        add(&s, "android-arm64").unwrap();
        let platforms = dir.path().join(PLATFORMS_DIR);
        std::fs::rename(
            platforms.join("android-arm64.platform.toml"),
            platforms.join("android-armv7.platform.toml"),
        )
        .unwrap();
        assert!(validate(&s).is_err());
    }

    #[test]
    fn select_multiple_platforms_fails() {
        let dir = tempfile::tempdir().unwrap();
        let s = session(dir.path(), "[\"cxx#a\"]\n[\"cxx#b\"]\n");
        assert!(select(&s, &["a".into()]).is_ok());
        assert!(select(&s, &["shared".into()]).is_ok());
        assert!(select(&s, &["a".into(), "b".into()]).is_err());
    }
}

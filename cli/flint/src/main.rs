//! Flint CLI: inspect the C/C++ platforms a build resolves.

mod commands;
mod session;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use session::Session;

#[derive(Parser)]
#[command(name = "flint", version, about = "The Flint build tool")]
struct Cli {
    /// Override a config value (section.key=value); may be repeated
    #[arg(short = 'c', long = "config", global = true)]
    config: Vec<String>,
    /// Read configuration from this file instead of searching for .flintconfig.toml
    #[arg(long, global = true)]
    config_file: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage C/C++ platforms
    Platforms {
        #[command(subcommand)]
        action: PlatformsAction,
    },
}

#[derive(Subcommand)]
enum PlatformsAction {
    /// List every resolved C/C++ platform
    List,
    /// Show details of a platform
    Describe {
        /// Platform flavor
        flavor: String,
        /// Output format (default: human-readable, "toml" for TOML)
        #[arg(long)]
        format: Option<String>,
    },
    /// Print the default platform's flavor
    Default,
    /// Print the detected host identity
    Host,
    /// Print the platform a target with these flavors builds with
    Select {
        /// Target flavors
        flavors: Vec<String>,
    },
    /// Add a platform file seeded from the host toolchain
    Add {
        /// Platform flavor
        flavor: String,
    },
    /// Validate every platform file
    Validate,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let session = Session::load(&cwd, cli.config_file.as_deref(), &cli.config)?;

    match cli.command {
        Commands::Platforms { action } => match action {
            PlatformsAction::List => commands::platforms::list(&session),
            PlatformsAction::Describe { flavor, format } => {
                commands::platforms::describe(&session, &flavor, format.as_deref())
            }
            PlatformsAction::Default => commands::platforms::default(&session),
            PlatformsAction::Host => commands::platforms::host(&session),
            PlatformsAction::Select { flavors } => commands::platforms::select(&session, &flavors),
            PlatformsAction::Add { flavor } => commands::platforms::add(&session, &flavor),
            PlatformsAction::Validate => commands::platforms::validate(&session),
        },
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use clap::CommandFactory;
    use flint_core::Flavor;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_overrides() {
        let cli = Cli::try_parse_from([
            "flint",
            "platforms",
            "describe",
            "custom",
            "-c",
            "cxx.host_platform=custom",
            "-c",
            "cxx#custom.cc=clang",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.config.len(), 2);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Commands::Platforms {
                action: PlatformsAction::Describe { ref flavor, .. }
            } if flavor == "custom"
        ));
    }

    /// Full workflow: config → add platform → resolve → select.
    #[test]
    fn config_add_resolve_workflow() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("workflow");
        std::fs::create_dir_all(project.join("src")).unwrap();
        std::fs::write(
            project.join(flint_config::CONFIG_FILE_NAME),
            r#"
[cxx]
default_platform = "android-arm64"

["cxx#android-arm64"]
cxxflags = "-O2"
"#,
        )
        .unwrap();

        // 1. Load from a nested directory
        let session = Session::load(&project.join("src"), None, &[]).unwrap();
        assert_eq!(session.project_dir, project);

        // 2. Without the platform file, the section falls back to the host toolchain
        let resolved = session.resolve().unwrap();
        let android = Flavor::new("android-arm64").unwrap();
        assert_eq!(resolved.default_platform().flavor(), &android);

        // 3. Add a platform file; the section now layers on it
        commands::platforms::add(&session, "android-arm64").unwrap();
        let mut file = flint_cxx::parse::load_platform_toml(
            &project.join("platforms/android-arm64.platform.toml"),
        )
        .unwrap()
        .toolchain()
        .clone();
        file.cxxflags = vec!["-O2".into()];
        let resolved = session.resolve().unwrap();
        assert_eq!(resolved.default_platform().toolchain(), &file);

        // 4. Command-line override redirects the default
        let session = Session::load(
            &project,
            None,
            &["cxx.default_platform=".to_string()],
        )
        .unwrap();
        let resolved = session.resolve().unwrap();
        assert_eq!(resolved.default_platform().flavor(), &session.host.flavor());
        assert!(commands::platforms::select(&session, &["android-arm64".into()]).is_ok());
    }

    #[test]
    fn malformed_section_fails_resolution() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(flint_config::CONFIG_FILE_NAME),
            "[\"cxx#broken\"]\ncxxflags = 12\n",
        )
        .unwrap();
        let session = Session::load(dir.path(), None, &[]).unwrap();
        let err = session.resolve().unwrap_err();
        assert!(format!("{err:#}").contains("cxx#broken"));
    }
}

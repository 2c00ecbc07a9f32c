//! # provider-mirror
//!
//! Sync Terraform provider archives into a network mirror.
//!
//! ## Commands
//!
//! - `local`: Mirror archive files from the local filesystem
//! - `remote`: Mirror every archive under another bucket prefix
//!
//! ## Example
//!
//! ```bash
//! # Upload local builds (flat layout)
//! provider-mirror local mirror/registry.terraform.io/acme/widget dist/*.zip
//!
//! # Copy published releases (per-version layout)
//! provider-mirror remote releases/widget/ mirror/registry.terraform.io/acme/widget
//! ```
//!
//! Buckets are directories under the store root (`--store-root`, or
//! `[store] root` in `provider-mirror.toml`).

use anyhow::Result;
use clap::{Parser, Subcommand};
use mirror_core::MirrorLayout;
use mirror_types::ObjectLocation;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod console;

use commands::{local, remote};
use config::Config;

/// Sync Terraform provider archives into a network mirror.
#[derive(Parser, Debug)]
#[command(name = "provider-mirror")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file (default: provider-mirror.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding one subdirectory per bucket
    #[arg(long, global = true)]
    store_root: Option<PathBuf>,

    /// Program that fingerprints an archive
    #[arg(long, global = true)]
    fingerprint_program: Option<String>,

    /// Archive layout: flat or per-version
    #[arg(long, global = true)]
    layout: Option<MirrorLayout>,

    /// Enable verbose output. Repeat for more verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Mirror local archive files
    Local {
        /// Destination as bucket/prefix
        destination: ObjectLocation,

        /// Archive files named {package}_{version}_{platform}_{arch}.zip
        #[arg(required = true)]
        archives: Vec<PathBuf>,
    },

    /// Mirror every archive under a source bucket prefix
    Remote {
        /// Source as bucket/prefix
        source: ObjectLocation,

        /// Destination as bucket/prefix
        destination: ObjectLocation,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;

    // Flags override the file.
    if let Some(root) = cli.store_root {
        config.store.root = root;
    }
    if let Some(program) = cli.fingerprint_program {
        config.fingerprint.program = program;
    }
    if let Some(layout) = cli.layout {
        config.mirror.layout = Some(layout);
    }

    match cli.command {
        Commands::Local {
            destination,
            archives,
        } => {
            local::run(&config, destination, archives).await?;
        }
        Commands::Remote {
            source,
            destination,
        } => {
            remote::run(&config, source, destination).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn local_requires_an_archive() {
        assert!(Cli::try_parse_from(["provider-mirror", "local", "mirror/p"]).is_err());
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "provider-mirror",
            "remote",
            "releases/widget/",
            "mirror/acme/widget",
            "--layout",
            "flat",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.layout, Some(MirrorLayout::Flat));
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Remote {
                source,
                destination,
            } => {
                assert_eq!(source, ObjectLocation::new("releases", "widget/"));
                assert_eq!(destination.bucket, "mirror");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn rejects_bucketless_location() {
        assert!(Cli::try_parse_from(["provider-mirror", "local", "/prefix", "a.zip"]).is_err());
    }
}

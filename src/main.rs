//! forkstep - advance a fork to a release version
//!
//! CLI binary for planning and applying release checkpoints.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use forkstep::repo::CommitIdentity;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "forkstep")]
#[command(about = "Plan and apply release patch checkpoints to a fork")]
#[command(version)]
struct Cli {
    /// Path to the repository to patch (defaults to current directory)
    #[arg(short, long, global = true)]
    repository: Option<PathBuf>,

    /// Path to the patch catalog
    #[arg(short, long, global = true, env = "FORKSTEP_PATCHES")]
    patches: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the checkpoint for a version and print it
    Plan {
        /// Target release version (e.g. 1.9.2)
        version: String,

        /// Print the checkpoint as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply the checkpoint for a version to the repository
    Apply {
        /// Target release version (e.g. 1.9.2)
        version: String,

        /// Dry run - show what would be done without making changes
        #[arg(long)]
        dry_run: bool,

        /// Name recorded on commits created while applying
        #[arg(long, env = "FORKSTEP_COMMITTER_NAME", default_value = "forkstep")]
        committer_name: String,

        /// Email recorded on commits created while applying
        #[arg(
            long,
            env = "FORKSTEP_COMMITTER_EMAIL",
            default_value = "forkstep@localhost"
        )]
        committer_email: String,
    },
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let patches = cli
        .patches
        .context("no patch catalog given; pass --patches or set FORKSTEP_PATCHES")?;
    // git runs from the repository, so catalog paths must not be relative
    let patches = std::path::absolute(&patches)
        .with_context(|| format!("cannot resolve {}", patches.display()))?;
    let repository = cli.repository.unwrap_or_else(|| PathBuf::from("."));

    match cli.command {
        Commands::Plan { version, json } => {
            cli::run_plan(&patches, &version, json).await?;
        }
        Commands::Apply {
            version,
            dry_run,
            committer_name,
            committer_email,
        } => {
            let identity = CommitIdentity {
                name: committer_name,
                email: committer_email,
            };
            cli::run_apply(&repository, &patches, &version, identity, dry_run).await?;
        }
    }

    Ok(())
}

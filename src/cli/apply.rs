//! Apply command - advance a checkout to a target version

use crate::cli::plan::print_checkpoint;
use crate::cli::progress::CliProgress;
use crate::cli::style::{Stylize, check, cross};
use anstream::{eprintln, println};
use forkstep::error::Result;
use forkstep::patch_set::CatalogPatchSet;
use forkstep::patcher::{Apply, VersionsParser};
use forkstep::repo::{CommitIdentity, GitRepository};
use std::path::Path;

/// Run the apply command
pub async fn run_apply(
    repository: &Path,
    patches: &Path,
    version: &str,
    identity: CommitIdentity,
    dry_run: bool,
) -> Result<()> {
    let patch_set = CatalogPatchSet::new(patches);
    let checkpoint = VersionsParser::new(version, &patch_set)
        .get_checkpoint()
        .await?;

    print_checkpoint(&checkpoint);
    println!();

    let repo = GitRepository::new(repository, identity);
    let progress = CliProgress::new();
    let apply = Apply::with_progress(&repo, &progress);

    if dry_run {
        apply.dry_run(&checkpoint).await;
        return Ok(());
    }

    if let Err(e) = apply.checkpoint(&checkpoint).await {
        if let Some(step) = progress.current_step() {
            eprintln!(
                "{} {} failed; repository left as-is for manual recovery",
                cross(),
                step.to_string().error()
            );
        }
        return Err(e);
    }

    println!(
        "{} {} is ready on branch {}",
        check(),
        version.accent(),
        checkpoint.final_branch.accent()
    );
    Ok(())
}

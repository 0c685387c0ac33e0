//! Plan command - resolve and print a checkpoint

use crate::cli::style::{Stylize, arrow};
use anstream::println;
use forkstep::error::{Error, Result};
use forkstep::patch_set::CatalogPatchSet;
use forkstep::patcher::VersionsParser;
use forkstep::types::Checkpoint;
use std::path::Path;

/// Run the plan command
pub async fn run_plan(patches: &Path, version: &str, json: bool) -> Result<()> {
    let patch_set = CatalogPatchSet::new(patches);
    let checkpoint = VersionsParser::new(version, &patch_set)
        .get_checkpoint()
        .await?;

    if json {
        let rendered = serde_json::to_string_pretty(&checkpoint)
            .map_err(|e| Error::Internal(format!("Failed to serialize checkpoint: {e}")))?;
        println!("{rendered}");
    } else {
        print_checkpoint(&checkpoint);
    }

    Ok(())
}

/// Print a human-readable summary of a checkpoint
pub fn print_checkpoint(checkpoint: &Checkpoint) {
    println!(
        "Checkpoint for {} ({} changeset{})",
        checkpoint.final_branch.accent(),
        checkpoint.changes.len(),
        if checkpoint.changes.len() == 1 { "" } else { "s" }
    );
    println!("  Baseline: {}", checkpoint.checkout_ref.accent());
    println!("  Branch:   {}", checkpoint.final_branch.accent());

    for (idx, change) in checkpoint.changes.iter().enumerate() {
        println!();
        println!("{}", format!("Changeset {}", idx + 1).emphasis());
        if change.is_empty() {
            println!("  {}", "nothing to apply".muted());
            continue;
        }
        for patch in &change.patches {
            println!("  {} {}", arrow(), patch.muted());
        }
        for (path, git_ref) in &change.bumps {
            println!("  {} bump {} to {}", arrow(), path.accent(), git_ref.accent());
        }
        for (path, patches) in &change.submodule_patches {
            for patch in patches {
                println!("  {} {}: {}", arrow(), path.accent(), patch.muted());
            }
        }
    }
}

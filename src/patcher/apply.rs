//! Phase 2: checkpoint application
//!
//! Runs a checkpoint through the seven repository steps. The first failing
//! step ends the run and its error is returned unchanged; nothing is undone.

use crate::error::Result;
use crate::patcher::{NoopProgress, ProgressCallback, Step};
use crate::repo::Repository;
use crate::types::Checkpoint;
use std::collections::BTreeMap;
use tracing::{error, info};

static NOOP_PROGRESS: NoopProgress = NoopProgress;

/// Applies checkpoints to a repository
pub struct Apply<'a> {
    repo: &'a dyn Repository,
    progress: &'a dyn ProgressCallback,
}

impl<'a> Apply<'a> {
    /// Create an applier without progress reporting
    pub fn new(repo: &'a dyn Repository) -> Self {
        Self::with_progress(repo, &NOOP_PROGRESS)
    }

    /// Create an applier that reports each step to `progress`
    pub fn with_progress(repo: &'a dyn Repository, progress: &'a dyn ProgressCallback) -> Self {
        Self { repo, progress }
    }

    /// Apply a checkpoint
    ///
    /// Steps, in order:
    /// 1. Configure the committer
    /// 2. Check out `checkout_ref`
    /// 3. Clean submodules
    /// 4. Create `final_branch` at HEAD
    /// 5. Apply every changeset's patches in one batch
    /// 6. Bump submodules to the merged pins
    /// 7. Apply submodule patches in one batch
    pub async fn checkpoint(&self, checkpoint: &Checkpoint) -> Result<()> {
        let patches = collect_patches(checkpoint);
        let bumps = merge_bumps(checkpoint);
        let (paths, submodule_patches) = flatten_submodule_patches(checkpoint);

        self.step(Step::ConfigureCommitter, self.repo.configure_committer())
            .await?;
        self.step(Step::Checkout, self.repo.checkout(&checkpoint.checkout_ref))
            .await?;
        self.step(Step::CleanSubmodules, self.repo.clean_submodules())
            .await?;
        self.step(
            Step::CheckoutBranch,
            self.repo.checkout_branch(&checkpoint.final_branch),
        )
        .await?;
        self.step(Step::ApplyPatches, self.repo.apply_patch(&patches))
            .await?;
        self.step(Step::BumpSubmodules, self.repo.bump_submodule(&bumps))
            .await?;
        self.step(
            Step::PatchSubmodules,
            self.repo.patch_submodule(&paths, &submodule_patches),
        )
        .await?;

        info!(
            "Applied {} changeset(s) onto branch {}",
            checkpoint.changes.len(),
            checkpoint.final_branch
        );
        Ok(())
    }

    /// Report what applying `checkpoint` would do, without touching the repository
    pub async fn dry_run(&self, checkpoint: &Checkpoint) {
        let patches = collect_patches(checkpoint);
        let bumps = merge_bumps(checkpoint);
        let (paths, submodule_patches) = flatten_submodule_patches(checkpoint);
        let progress = self.progress;

        progress
            .on_message("Dry run - no changes will be made")
            .await;
        progress
            .on_message(&format!("Would check out {}", checkpoint.checkout_ref))
            .await;
        progress.on_message("Would clean submodules").await;
        progress
            .on_message(&format!("Would create branch {}", checkpoint.final_branch))
            .await;

        if patches.is_empty() {
            progress.on_message("No patches to apply").await;
        } else {
            progress.on_message("Would apply patches:").await;
            for patch in &patches {
                progress.on_message(&format!("  - {patch}")).await;
            }
        }

        if bumps.is_empty() {
            progress.on_message("No submodules to bump").await;
        } else {
            progress.on_message("Would bump submodules:").await;
            for (path, git_ref) in &bumps {
                progress
                    .on_message(&format!("  - {path} → {git_ref}"))
                    .await;
            }
        }

        if paths.is_empty() {
            progress.on_message("No submodule patches to apply").await;
        } else {
            progress.on_message("Would patch submodules:").await;
            for (path, patch) in paths.iter().zip(&submodule_patches) {
                progress.on_message(&format!("  - {path}: {patch}")).await;
            }
        }
    }

    async fn step(
        &self,
        step: Step,
        operation: impl std::future::Future<Output = Result<()>>,
    ) -> Result<()> {
        self.progress.on_step(step).await;
        info!("[{}/{}] {step}", step.number(), Step::ALL.len());

        operation.await.inspect_err(|e| {
            error!("{step} failed: {e}");
        })
    }
}

/// Every changeset's patches, in changeset order then list order
fn collect_patches(checkpoint: &Checkpoint) -> Vec<String> {
    checkpoint
        .changes
        .iter()
        .flat_map(|c| c.patches.iter().cloned())
        .collect()
}

/// Union of all bumps; a later changeset overrides an earlier pin
fn merge_bumps(checkpoint: &Checkpoint) -> BTreeMap<String, String> {
    let mut bumps = BTreeMap::new();
    for change in &checkpoint.changes {
        bumps.extend(
            change
                .bumps
                .iter()
                .map(|(path, git_ref)| (path.clone(), git_ref.clone())),
        );
    }
    bumps
}

/// Submodule patches as parallel (paths, patches) lists
///
/// Changeset order, then submodule path order, then patch order.
fn flatten_submodule_patches(checkpoint: &Checkpoint) -> (Vec<String>, Vec<String>) {
    checkpoint
        .changes
        .iter()
        .flat_map(|c| &c.submodule_patches)
        .flat_map(|(path, patches)| patches.iter().map(move |p| (path.clone(), p.clone())))
        .unzip()
}

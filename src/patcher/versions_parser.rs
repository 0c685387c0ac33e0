//! Phase 1: checkpoint planning
//!
//! Resolves a target version into the ordered changesets to apply.

use crate::error::{Error, Result};
use crate::patch_set::PatchSet;
use crate::types::{Changeset, Checkpoint};
use tracing::debug;

/// Builds a [`Checkpoint`] for one target version
pub struct VersionsParser<'a> {
    version: String,
    patch_set: &'a dyn PatchSet,
}

impl<'a> VersionsParser<'a> {
    /// Create a parser for `version` backed by `patch_set`
    pub fn new(version: impl Into<String>, patch_set: &'a dyn PatchSet) -> Self {
        Self {
            version: version.into(),
            patch_set,
        }
    }

    /// Resolve the checkpoint
    ///
    /// Queries the patch set for each version in order and stops at the first
    /// error, which is returned as is.
    pub async fn get_checkpoint(&self) -> Result<Checkpoint> {
        let versions = self.patch_set.versions_to_apply_for(&self.version).await?;

        let checkout_ref = versions
            .first()
            .map(|v| v.git_ref.clone())
            .ok_or_else(|| Error::NoVersionsToApply(self.version.clone()))?;

        debug!(
            "Resolved {} version(s) for {}: {:?}",
            versions.len(),
            self.version,
            versions.iter().map(ToString::to_string).collect::<Vec<_>>()
        );

        let mut changes = Vec::with_capacity(versions.len());
        for version in &versions {
            let patches = self.patch_set.patches_for(version).await?;
            let bumps = self.patch_set.bumps_for(version).await?;
            let submodule_patches = self.patch_set.submodule_patches_for(version).await?;

            debug!(
                "  {version}: {} patch(es), {} bump(s), {} patched submodule(s)",
                patches.len(),
                bumps.len(),
                submodule_patches.len()
            );

            changes.push(Changeset {
                patches,
                bumps,
                submodule_patches,
            });
        }

        Ok(Checkpoint {
            changes,
            checkout_ref,
            final_branch: self.version.clone(),
        })
    }
}

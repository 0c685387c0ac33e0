//! Repository operations
//!
//! The mutating primitives a checkpoint is applied through.

mod git;

pub use git::{CommitIdentity, GitRepository};

use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Repository trait for checkpoint application
///
/// Every method mutates the working checkout. Implementations must not roll
/// back earlier operations when one fails.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Configure the identity used for commits made while applying
    async fn configure_committer(&self) -> Result<()>;

    /// Check out a commit or ref
    async fn checkout(&self, git_ref: &str) -> Result<()>;

    /// Reset all submodules to a pristine state
    async fn clean_submodules(&self) -> Result<()>;

    /// Check out (creating if needed) a branch at the current HEAD
    async fn checkout_branch(&self, name: &str) -> Result<()>;

    /// Apply top-level patches in order
    async fn apply_patch(&self, patches: &[String]) -> Result<()>;

    /// Move submodules to the given refs (submodule path -> ref)
    async fn bump_submodule(&self, bumps: &BTreeMap<String, String>) -> Result<()>;

    /// Apply `patches[i]` inside submodule `paths[i]`, in order
    async fn patch_submodule(&self, paths: &[String], patches: &[String]) -> Result<()>;
}

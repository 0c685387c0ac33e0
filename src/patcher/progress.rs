//! Progress callback trait for interface-agnostic updates
//!
//! Lets the CLI (or any other front end) follow checkpoint application.

use async_trait::async_trait;
use std::fmt;

/// One of the seven operations a checkpoint is applied through, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    /// Configure the committer identity
    ConfigureCommitter,
    /// Check out the baseline ref
    Checkout,
    /// Reset submodules to a pristine state
    CleanSubmodules,
    /// Create the result branch
    CheckoutBranch,
    /// Apply top-level patches
    ApplyPatches,
    /// Move submodules to their pinned refs
    BumpSubmodules,
    /// Apply patches inside submodules
    PatchSubmodules,
}

impl Step {
    /// All steps in execution order
    pub const ALL: [Self; 7] = [
        Self::ConfigureCommitter,
        Self::Checkout,
        Self::CleanSubmodules,
        Self::CheckoutBranch,
        Self::ApplyPatches,
        Self::BumpSubmodules,
        Self::PatchSubmodules,
    ];

    /// 1-based position in the sequence
    pub const fn number(self) -> usize {
        self as usize + 1
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ConfigureCommitter => "Configuring committer",
            Self::Checkout => "Checking out baseline",
            Self::CleanSubmodules => "Cleaning submodules",
            Self::CheckoutBranch => "Creating branch",
            Self::ApplyPatches => "Applying patches",
            Self::BumpSubmodules => "Bumping submodules",
            Self::PatchSubmodules => "Patching submodules",
        };
        f.write_str(label)
    }
}

/// Progress callback trait
///
/// Implement this trait to receive progress updates during application.
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called right before a step's repository operation
    async fn on_step(&self, step: Step);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_step(&self, _step: Step) {}
    async fn on_message(&self, _message: &str) {}
}

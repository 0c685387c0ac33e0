//! Core types for forkstep

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A resolved release step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Version {
    /// Major version number
    pub major: u32,
    /// Minor version number
    pub minor: u32,
    /// Patch version number
    pub patch: u32,
    /// Source-control reference (commit or ref) for this step
    #[serde(rename = "ref")]
    pub git_ref: String,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Patches, submodule bumps and submodule patches for one version step
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Changeset {
    /// Top-level patches, in application order
    pub patches: Vec<String>,
    /// Submodule path -> target commit reference
    pub bumps: BTreeMap<String, String>,
    /// Submodule path -> patches for that submodule, in application order
    pub submodule_patches: BTreeMap<String, Vec<String>>,
}

impl Changeset {
    /// Whether this step carries nothing to apply
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty() && self.bumps.is_empty() && self.submodule_patches.is_empty()
    }
}

/// Fully resolved execution plan for a target version
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Checkpoint {
    /// One changeset per version step, oldest first
    pub changes: Vec<Changeset>,
    /// Baseline commit the plan starts from
    pub checkout_ref: String,
    /// Branch created to hold the result (the target version verbatim)
    pub final_branch: String,
}

//! Patch catalogs
//!
//! Provides the interface the planner uses to discover which versions to
//! apply and what each version carries.

mod catalog;
mod version;

pub use catalog::CatalogPatchSet;
pub use version::{ReleaseVersion, parse_release_version};

use crate::error::Result;
use crate::types::Version;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Patch catalog trait
///
/// This trait abstracts where patches and bumps come from, allowing the
/// planner to run against an on-disk catalog or an in-memory double.
#[async_trait]
pub trait PatchSet: Send + Sync {
    /// Ordered versions to apply to reach `version` (ascending, inclusive)
    async fn versions_to_apply_for(&self, version: &str) -> Result<Vec<Version>>;

    /// Top-level patches for a version, in application order
    async fn patches_for(&self, version: &Version) -> Result<Vec<String>>;

    /// Submodule bumps for a version (submodule path -> ref)
    async fn bumps_for(&self, version: &Version) -> Result<BTreeMap<String, String>>;

    /// Submodule patches for a version (submodule path -> patches)
    async fn submodule_patches_for(&self, version: &Version)
    -> Result<BTreeMap<String, Vec<String>>>;
}

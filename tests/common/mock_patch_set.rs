//! Mock patch set for testing
//!
//! These are test utilities - not every test file uses all of them.

#![allow(dead_code)]

use async_trait::async_trait;
use forkstep::error::{Error, Result};
use forkstep::patch_set::PatchSet;
use forkstep::types::Version;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

/// One recorded query against the patch set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchSetCall {
    VersionsToApplyFor(String),
    PatchesFor(Version),
    BumpsFor(Version),
    SubmodulePatchesFor(Version),
}

/// In-memory patch set
///
/// Features:
/// - Configurable responses per version (empty when unset)
/// - Call tracking in issue order across all four queries
/// - Error injection per query and version
#[derive(Default)]
pub struct MockPatchSet {
    versions: Mutex<Vec<Version>>,
    patches: Mutex<HashMap<Version, Vec<String>>>,
    bumps: Mutex<HashMap<Version, BTreeMap<String, String>>>,
    submodule_patches: Mutex<HashMap<Version, BTreeMap<String, Vec<String>>>>,
    // Call tracking
    calls: Mutex<Vec<PatchSetCall>>,
    // Error injection
    error_on_versions: Mutex<Option<String>>,
    error_on_patches: Mutex<HashMap<Version, String>>,
    error_on_bumps: Mutex<HashMap<Version, String>>,
    error_on_submodule_patches: Mutex<HashMap<Version, String>>,
}

impl MockPatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    // === Response setup ===

    pub fn set_versions(&self, versions: Vec<Version>) {
        *self.versions.lock().unwrap() = versions;
    }

    pub fn set_patches(&self, version: &Version, patches: &[&str]) {
        self.patches.lock().unwrap().insert(
            version.clone(),
            patches.iter().map(ToString::to_string).collect(),
        );
    }

    pub fn set_bumps(&self, version: &Version, bumps: &[(&str, &str)]) {
        self.bumps.lock().unwrap().insert(
            version.clone(),
            bumps
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        );
    }

    pub fn set_submodule_patches(&self, version: &Version, path: &str, patches: &[&str]) {
        self.submodule_patches
            .lock()
            .unwrap()
            .entry(version.clone())
            .or_default()
            .insert(
                path.to_string(),
                patches.iter().map(ToString::to_string).collect(),
            );
    }

    // === Error injection ===

    pub fn fail_versions(&self, msg: &str) {
        *self.error_on_versions.lock().unwrap() = Some(msg.to_string());
    }

    pub fn fail_patches_for(&self, version: &Version, msg: &str) {
        self.error_on_patches
            .lock()
            .unwrap()
            .insert(version.clone(), msg.to_string());
    }

    pub fn fail_bumps_for(&self, version: &Version, msg: &str) {
        self.error_on_bumps
            .lock()
            .unwrap()
            .insert(version.clone(), msg.to_string());
    }

    pub fn fail_submodule_patches_for(&self, version: &Version, msg: &str) {
        self.error_on_submodule_patches
            .lock()
            .unwrap()
            .insert(version.clone(), msg.to_string());
    }

    // === Call verification ===

    pub fn get_calls(&self) -> Vec<PatchSetCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Versions that any payload query was issued for, deduplicated in order
    pub fn queried_versions(&self) -> Vec<Version> {
        let mut seen = Vec::new();
        for call in self.get_calls() {
            let version = match call {
                PatchSetCall::VersionsToApplyFor(_) => continue,
                PatchSetCall::PatchesFor(v)
                | PatchSetCall::BumpsFor(v)
                | PatchSetCall::SubmodulePatchesFor(v) => v,
            };
            if !seen.contains(&version) {
                seen.push(version);
            }
        }
        seen
    }

    fn record(&self, call: PatchSetCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn injected(errors: &Mutex<HashMap<Version, String>>, version: &Version) -> Result<()> {
        match errors.lock().unwrap().get(version) {
            Some(msg) => Err(Error::Catalog(msg.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PatchSet for MockPatchSet {
    async fn versions_to_apply_for(&self, version: &str) -> Result<Vec<Version>> {
        self.record(PatchSetCall::VersionsToApplyFor(version.to_string()));

        if let Some(msg) = self.error_on_versions.lock().unwrap().as_ref() {
            return Err(Error::Catalog(msg.clone()));
        }

        Ok(self.versions.lock().unwrap().clone())
    }

    async fn patches_for(&self, version: &Version) -> Result<Vec<String>> {
        self.record(PatchSetCall::PatchesFor(version.clone()));
        Self::injected(&self.error_on_patches, version)?;

        Ok(self
            .patches
            .lock()
            .unwrap()
            .get(version)
            .cloned()
            .unwrap_or_default())
    }

    async fn bumps_for(&self, version: &Version) -> Result<BTreeMap<String, String>> {
        self.record(PatchSetCall::BumpsFor(version.clone()));
        Self::injected(&self.error_on_bumps, version)?;

        Ok(self
            .bumps
            .lock()
            .unwrap()
            .get(version)
            .cloned()
            .unwrap_or_default())
    }

    async fn submodule_patches_for(
        &self,
        version: &Version,
    ) -> Result<BTreeMap<String, Vec<String>>> {
        self.record(PatchSetCall::SubmodulePatchesFor(version.clone()));
        Self::injected(&self.error_on_submodule_patches, version)?;

        Ok(self
            .submodule_patches
            .lock()
            .unwrap()
            .get(version)
            .cloned()
            .unwrap_or_default())
    }
}

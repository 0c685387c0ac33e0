//! Directory-backed patch catalog
//!
//! Layout, per release line:
//!
//! ```text
//! <root>/<major>.<minor>/starting-versions.yml
//! <root>/<major>.<minor>/<patch>/*.patch                  top-level patches
//! <root>/<major>.<minor>/<patch>/bumps.yml                submodule bumps
//! <root>/<major>.<minor>/<patch>/<submodule>/*.patch      submodule patches
//! ```

use crate::error::{Error, Result};
use crate::patch_set::{PatchSet, parse_release_version};
use crate::types::Version;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

const STARTING_VERSIONS_FILE: &str = "starting-versions.yml";
const BUMPS_FILE: &str = "bumps.yml";
const PATCH_EXTENSION: &str = "patch";

/// Contents of `starting-versions.yml`
#[derive(Debug, Clone, Deserialize)]
struct StartingVersions {
    starting_versions: Vec<StartingVersion>,
}

/// A patch release upstream tagged, usable as a baseline
#[derive(Debug, Clone, Deserialize)]
struct StartingVersion {
    /// Patch number within the release line
    version: u32,
    /// Upstream ref for this release
    #[serde(rename = "ref")]
    git_ref: String,
    /// Submodule pins for this release
    #[serde(default)]
    submodules: BTreeMap<String, String>,
}

/// Patch set read from a catalog directory
#[derive(Debug, Clone)]
pub struct CatalogPatchSet {
    root: PathBuf,
}

impl CatalogPatchSet {
    /// Create a patch set rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn line_dir(&self, major: u32, minor: u32) -> PathBuf {
        self.root.join(format!("{major}.{minor}"))
    }

    fn version_dir(&self, version: &Version) -> PathBuf {
        self.line_dir(version.major, version.minor)
            .join(version.patch.to_string())
    }

    fn starting_versions(&self, major: u32, minor: u32) -> Result<Vec<StartingVersion>> {
        let path = self.line_dir(major, minor).join(STARTING_VERSIONS_FILE);
        if !path.is_file() {
            return Err(Error::VersionNotFound(format!(
                "no {STARTING_VERSIONS_FILE} for release line {major}.{minor} in {}",
                self.root.display()
            )));
        }

        let contents = std::fs::read_to_string(&path)?;
        let parsed: StartingVersions = serde_yaml::from_str(&contents)?;

        let mut seen = HashSet::new();
        for entry in &parsed.starting_versions {
            if !seen.insert(entry.version) {
                return Err(Error::Catalog(format!(
                    "duplicate starting version {major}.{minor}.{} in {}",
                    entry.version,
                    path.display()
                )));
            }
        }

        Ok(parsed.starting_versions)
    }
}

#[async_trait]
impl PatchSet for CatalogPatchSet {
    async fn versions_to_apply_for(&self, version: &str) -> Result<Vec<Version>> {
        let target = parse_release_version(version)?;
        let starting = self.starting_versions(target.major, target.minor)?;

        let baseline = starting
            .iter()
            .filter(|s| s.version <= target.patch)
            .max_by_key(|s| s.version)
            .ok_or_else(|| {
                Error::VersionNotFound(format!("no starting version at or below {target}"))
            })?;

        debug!(
            "Baseline for {target} is {}.{} ({})",
            target.line(),
            baseline.version,
            baseline.git_ref
        );

        Ok((baseline.version..=target.patch)
            .map(|patch| Version {
                major: target.major,
                minor: target.minor,
                patch,
                git_ref: baseline.git_ref.clone(),
            })
            .collect())
    }

    async fn patches_for(&self, version: &Version) -> Result<Vec<String>> {
        let dir = self.version_dir(version);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut patches = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            if entry.file_type().is_file() && is_patch(entry.path()) {
                patches.push(path_string(entry.path())?);
            }
        }

        Ok(patches)
    }

    async fn bumps_for(&self, version: &Version) -> Result<BTreeMap<String, String>> {
        let mut bumps = self
            .starting_versions(version.major, version.minor)?
            .into_iter()
            .find(|s| s.version == version.patch)
            .map(|s| s.submodules)
            .unwrap_or_default();

        let bumps_file = self.version_dir(version).join(BUMPS_FILE);
        if bumps_file.is_file() {
            let contents = std::fs::read_to_string(&bumps_file)?;
            let overrides: Option<BTreeMap<String, String>> = serde_yaml::from_str(&contents)?;
            bumps.extend(overrides.unwrap_or_default());
        }

        Ok(bumps)
    }

    async fn submodule_patches_for(
        &self,
        version: &Version,
    ) -> Result<BTreeMap<String, Vec<String>>> {
        let dir = self.version_dir(version);
        let mut submodule_patches: BTreeMap<String, Vec<String>> = BTreeMap::new();
        if !dir.is_dir() {
            return Ok(submodule_patches);
        }

        for entry in WalkDir::new(&dir).min_depth(2).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() || !is_patch(entry.path()) {
                continue;
            }

            let submodule = entry
                .path()
                .parent()
                .and_then(|p| p.strip_prefix(&dir).ok())
                .ok_or_else(|| {
                    Error::Catalog(format!(
                        "cannot determine submodule for {}",
                        entry.path().display()
                    ))
                })
                .and_then(submodule_key)?;

            submodule_patches
                .entry(submodule)
                .or_default()
                .push(path_string(entry.path())?);
        }

        Ok(submodule_patches)
    }
}

fn is_patch(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == PATCH_EXTENSION)
}

fn path_string(path: &Path) -> Result<String> {
    path.to_str()
        .map(str::to_string)
        .ok_or_else(|| Error::Catalog(format!("path is not valid UTF-8: {}", path.display())))
}

/// Submodule path relative to the version directory, `/`-separated
fn submodule_key(relative: &Path) -> Result<String> {
    let components = relative
        .components()
        .map(|c| path_string(Path::new(c.as_os_str())))
        .collect::<Result<Vec<_>>>()?;
    Ok(components.join("/"))
}

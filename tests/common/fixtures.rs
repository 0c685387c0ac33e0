//! Test data factories for forkstep types
//!
//! These are test utilities - not every test file uses all of them.

#![allow(dead_code)]

use forkstep::types::{Changeset, Checkpoint, Version};
use std::fs;
use std::path::Path;

/// Create a 1.9.x version
pub fn make_version(patch: u32, git_ref: &str) -> Version {
    Version {
        major: 1,
        minor: 9,
        patch,
        git_ref: git_ref.to_string(),
    }
}

/// Create a changeset from borrowed literals
pub fn make_changeset(
    patches: &[&str],
    bumps: &[(&str, &str)],
    submodule_patches: &[(&str, Vec<&str>)],
) -> Changeset {
    Changeset {
        patches: patches.iter().map(ToString::to_string).collect(),
        bumps: bumps
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect(),
        submodule_patches: submodule_patches
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.iter().map(ToString::to_string).collect()))
            .collect(),
    }
}

/// Two-step checkpoint touching patches, bumps and submodule patches
pub fn sample_checkpoint() -> Checkpoint {
    Checkpoint {
        changes: vec![
            make_changeset(
                &["patch-1"],
                &[("src/some-path", "some-other-sha")],
                &[("src/sub/path", vec!["path/to/other.patch"])],
            ),
            make_changeset(
                &["patch-2"],
                &[("src/some-other-path", "a-sha")],
                &[("src/some-other-sub/path", vec!["path/to/different.patch"])],
            ),
        ],
        checkout_ref: "abcde12345".to_string(),
        final_branch: "1.9.2".to_string(),
    }
}

/// Write `contents` to `root/relative`, creating parent directories
pub fn write_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Catalog with release line 1.9 starting at 1.9.2 and patches for 1.9.3
pub fn write_sample_catalog(root: &Path) {
    write_file(
        root,
        "1.9/starting-versions.yml",
        "starting_versions:\n  - version: 2\n    ref: v1.9.2\n    submodules:\n      src/foo: sha-foo\n",
    );
    write_file(root, "1.9/3/0001-fix.patch", "fix");
    write_file(root, "1.9/3/bumps.yml", "src/bar: sha-bar\n");
    write_file(root, "1.9/3/src/foo/0001-foo.patch", "foo");
}

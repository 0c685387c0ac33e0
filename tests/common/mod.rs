//! Shared test helpers

pub mod fixtures;
pub mod mock_patch_set;

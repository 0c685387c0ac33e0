//! forkstep - release checkpoints for long-lived forks
//!
//! Resolves a target release version into an ordered [`types::Checkpoint`]
//! and applies it to a repository checkout:
//! 1. Planning - query a [`patch_set::PatchSet`] for every version step
//! 2. Application - drive a [`repo::Repository`] through a fixed, fail-fast
//!    sequence of seven operations

pub mod error;
pub mod patch_set;
pub mod patcher;
pub mod repo;
pub mod types;

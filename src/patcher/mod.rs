//! Two-phase checkpoint engine
//!
//! 1. Planning - resolve a target version into a [`Checkpoint`](crate::types::Checkpoint)
//! 2. Application - run the checkpoint against a repository, stopping at the
//!    first failing step

mod apply;
mod progress;
mod versions_parser;

pub use apply::Apply;
pub use progress::{NoopProgress, ProgressCallback, Step};
pub use versions_parser::VersionsParser;

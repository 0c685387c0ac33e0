//! CLI commands
//!
//! Command implementations for the `forkstep` binary.

mod apply;
mod plan;
mod progress;
mod style;

pub use apply::run_apply;
pub use plan::run_plan;

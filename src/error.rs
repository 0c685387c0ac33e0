//! Error types for forkstep

use thiserror::Error;

/// Errors raised while planning or applying a checkpoint
#[derive(Error, Debug)]
pub enum Error {
    /// Target version string is not `<major>.<minor>.<patch>`
    #[error("invalid version '{0}': expected <major>.<minor>.<patch>")]
    InvalidVersion(String),

    /// The patch set resolved no versions for the target
    #[error("no versions to apply for {0}")]
    NoVersionsToApply(String),

    /// The catalog has no starting point for the target
    #[error("version not found: {0}")]
    VersionNotFound(String),

    /// Malformed catalog content
    #[error("patch catalog error: {0}")]
    Catalog(String),

    /// Repository operation failed
    #[error("repository error: {0}")]
    Repository(String),

    /// A git invocation exited unsuccessfully
    #[error("`{command}` failed: {stderr}")]
    GitCommand {
        /// Command line that was run
        command: String,
        /// Captured standard error
        stderr: String,
    },

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Directory traversal error
    #[error("directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Internal invariant broken
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result alias using forkstep's [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

//! Repository backed by the `git` executable

use crate::error::{Error, Result};
use crate::repo::Repository;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

/// Identity recorded on commits created while applying a checkpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitIdentity {
    /// Committer name
    pub name: String,
    /// Committer email
    pub email: String,
}

/// Git working copy
#[derive(Debug, Clone)]
pub struct GitRepository {
    workdir: PathBuf,
    identity: CommitIdentity,
}

impl GitRepository {
    /// Open the repository at `workdir`
    pub fn new(workdir: impl Into<PathBuf>, identity: CommitIdentity) -> Self {
        Self {
            workdir: workdir.into(),
            identity,
        }
    }

    /// Git command for `dir` that never prompts on the terminal
    fn git_command(dir: &Path) -> Command {
        let mut cmd = Command::new("git");
        cmd.current_dir(dir);
        cmd.env("GIT_TERMINAL_PROMPT", "0");
        cmd
    }

    /// Git command with the committer identity passed per invocation
    ///
    /// Submodules keep their own config, so `.git/config` of the
    /// superproject does not reach them.
    fn git_commit_command(&self, dir: &Path) -> Command {
        let mut cmd = Self::git_command(dir);
        cmd.arg("-c");
        cmd.arg(format!("user.name={}", self.identity.name));
        cmd.arg("-c");
        cmd.arg(format!("user.email={}", self.identity.email));
        cmd
    }

    async fn run(mut cmd: Command, args: &[&str]) -> Result<String> {
        let command = format!("git {}", args.join(" "));
        debug!("Running {command}");

        let output = cmd.args(args).output().await?;
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            Err(Error::GitCommand {
                command,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }

    async fn git(&self, args: &[&str]) -> Result<String> {
        Self::run(Self::git_command(&self.workdir), args).await
    }

    async fn commit(&self, message: &str) -> Result<()> {
        self.git(&["commit", "--quiet", "-m", message])
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl Repository for GitRepository {
    async fn configure_committer(&self) -> Result<()> {
        self.git(&["config", "user.name", self.identity.name.as_str()])
            .await?;
        self.git(&["config", "user.email", self.identity.email.as_str()])
            .await?;
        Ok(())
    }

    async fn checkout(&self, git_ref: &str) -> Result<()> {
        self.git(&["checkout", "--quiet", git_ref]).await?;
        Ok(())
    }

    async fn clean_submodules(&self) -> Result<()> {
        self.git(&["submodule", "sync", "--recursive"]).await?;
        self.git(&["submodule", "update", "--init", "--recursive", "--force"])
            .await?;
        self.git(&[
            "submodule",
            "foreach",
            "--recursive",
            "git",
            "clean",
            "-ffd",
        ])
        .await?;
        Ok(())
    }

    async fn checkout_branch(&self, name: &str) -> Result<()> {
        self.git(&["checkout", "--quiet", "-B", name]).await?;
        Ok(())
    }

    async fn apply_patch(&self, patches: &[String]) -> Result<()> {
        if patches.is_empty() {
            return Ok(());
        }

        let mut args = vec!["am", "--quiet"];
        args.extend(patches.iter().map(String::as_str));
        self.git(&args).await?;
        Ok(())
    }

    async fn bump_submodule(&self, bumps: &BTreeMap<String, String>) -> Result<()> {
        if bumps.is_empty() {
            return Ok(());
        }

        let mut lines = Vec::with_capacity(bumps.len());
        for (path, git_ref) in bumps {
            Self::run(
                Self::git_command(&self.workdir.join(path)),
                &["checkout", "--quiet", git_ref.as_str()],
            )
            .await?;
            self.git(&["add", path.as_str()]).await?;
            lines.push(format!("- {path}: {git_ref}"));
        }

        self.commit(&format!("Bump submodules\n\n{}", lines.join("\n")))
            .await
    }

    async fn patch_submodule(&self, paths: &[String], patches: &[String]) -> Result<()> {
        if paths.len() != patches.len() {
            return Err(Error::Repository(format!(
                "submodule patch lists differ in length: {} paths, {} patches",
                paths.len(),
                patches.len()
            )));
        }
        if paths.is_empty() {
            return Ok(());
        }

        let mut lines = Vec::with_capacity(paths.len());
        for (path, patch) in paths.iter().zip(patches) {
            // git am runs inside the submodule; relative patch paths are
            // relative to the superproject
            let patch_path = std::path::absolute(self.workdir.join(patch))?;
            let patch_arg = patch_path.to_str().ok_or_else(|| {
                Error::Repository(format!("path is not valid UTF-8: {}", patch_path.display()))
            })?;
            Self::run(
                self.git_commit_command(&self.workdir.join(path)),
                &["am", "--quiet", patch_arg],
            )
            .await?;
            self.git(&["add", path.as_str()]).await?;
            lines.push(format!("- {path}: {patch}"));
        }

        self.commit(&format!("Apply submodule patches\n\n{}", lines.join("\n")))
            .await
    }
}

//! The git operations git-spruce needs, and their `git` subprocess implementation.

use std::path::PathBuf;
use std::process::{Command, Output};

use super::error::{GitError, Result};

/// Narrow seam over the version-control tool.
pub trait GitBackend {
    /// Raw text of the verbose branch listing (`git branch -v`).
    fn branch_listing(&self) -> Result<String>;

    /// Whether `reference` resolves to an object.
    fn is_valid_reference(&self, reference: &str) -> bool;

    /// Whether every commit of `branch` is reachable from `base`.
    /// Any failure (unknown ref, spawn error) counts as `false`.
    fn is_ancestor(&self, branch: &str, base: &str) -> bool;

    /// Delete a local branch. Returns the tool's combined output lines,
    /// uninterpreted.
    fn delete_branch(&self, branch: &str, force: bool) -> Vec<String>;

    /// Fetch from `remote`, removing remote-tracking refs deleted upstream.
    fn fetch_prune(&self, remote: &str) -> Result<()>;
}

/// `GitBackend` that shells out to the `git` binary.
#[derive(Debug, Clone, Default)]
pub struct GitCli {
    /// Working tree to run in; the current directory when `None`.
    repo_dir: Option<PathBuf>,

    /// Extra environment for every invocation.
    #[cfg(test)]
    envs: Vec<(&'static str, &'static str)>,
}

impl GitCli {
    pub fn new(repo_dir: Option<PathBuf>) -> Self {
        Self {
            repo_dir,
            #[cfg(test)]
            envs: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn with_envs(mut self, envs: &[(&'static str, &'static str)]) -> Self {
        self.envs.extend_from_slice(envs);
        self
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new("git");
        if let Some(dir) = &self.repo_dir {
            cmd.current_dir(dir);
        }
        #[cfg(test)]
        cmd.envs(self.envs.iter().copied());
        cmd.args(args);
        cmd
    }

    fn output(&self, args: &[&str]) -> std::io::Result<Output> {
        run_logged(self.command(args), args)
    }

    /// Run git and report only whether it exited with status zero.
    fn succeeds(&self, args: &[&str]) -> bool {
        self.output(args).is_ok_and(|out| out.status.success())
    }

    /// Run git, returning stdout on success.
    fn run_output(&self, args: &[&str]) -> Result<String> {
        stdout_of(self.command(args), args)
    }
}

fn run_logged(mut cmd: Command, args: &[&str]) -> std::io::Result<Output> {
    let output = cmd.output();
    match &output {
        Ok(out) => tracing::debug!(args = ?args, status = %out.status, "ran git"),
        Err(e) => tracing::debug!(args = ?args, error = %e, "failed to spawn git"),
    }
    output
}

fn stdout_of(cmd: Command, args: &[&str]) -> Result<String> {
    let output =
        run_logged(cmd, args).map_err(|e| GitError::command_failed(args, e.to_string()))?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        Err(GitError::command_failed(
            args,
            format!("{}: {stderr}", output.status),
        ))
    }
}

impl GitBackend for GitCli {
    fn branch_listing(&self) -> Result<String> {
        let args = ["branch", "-v", "--no-color"];
        // The upstream-gone marker is translated in other locales
        let mut cmd = self.command(&args);
        cmd.env("LC_ALL", "C");
        stdout_of(cmd, &args)
    }

    fn is_valid_reference(&self, reference: &str) -> bool {
        self.succeeds(&["rev-parse", "--quiet", "--verify", reference])
    }

    fn is_ancestor(&self, branch: &str, base: &str) -> bool {
        self.succeeds(&["merge-base", "--is-ancestor", branch, base])
    }

    fn delete_branch(&self, branch: &str, force: bool) -> Vec<String> {
        let flag = if force { "-D" } else { "-d" };

        match self.output(&["branch", flag, branch]) {
            Ok(output) => String::from_utf8_lossy(&output.stdout)
                .lines()
                .chain(String::from_utf8_lossy(&output.stderr).lines())
                .map(str::to_string)
                .collect(),
            Err(e) => vec![format!("Failed to run git: {e}")],
        }
    }

    fn fetch_prune(&self, remote: &str) -> Result<()> {
        self.run_output(&["fetch", "--prune", remote]).map(|_| ())
    }
}

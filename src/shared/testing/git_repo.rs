use std::path::{Path, PathBuf};
use std::process::Command;

use crate::infra::git::GitCli;

/// Ignore global/system git config so tests are isolated from local
/// settings (e.g., GPG signing, aliases, hooks, branch sorting).
const ISOLATED_GIT_ENV: [(&str, &str); 2] = [
    ("GIT_CONFIG_GLOBAL", "/dev/null"),
    ("GIT_CONFIG_SYSTEM", "/dev/null"),
];

/// A `GitCli` for `dir` that runs with the same isolated config as `TestRepo`.
pub fn isolated_git_cli(dir: PathBuf) -> GitCli {
    GitCli::new(Some(dir)).with_envs(&ISOLATED_GIT_ENV)
}

/// A temporary git repository for testing.
pub struct TestRepo {
    dir: tempfile::TempDir,
    /// Bare repository acting as `origin`, once attached
    origin: Option<tempfile::TempDir>,
}

impl TestRepo {
    /// Create a git Command with isolated config (ignores global/system settings).
    fn git_command(dir: &Path) -> Command {
        let mut cmd = Command::new("git");
        cmd.current_dir(dir);
        cmd.envs(ISOLATED_GIT_ENV);
        cmd
    }

    fn run_in(dir: &Path, args: &[&str]) -> String {
        let output = Self::git_command(dir)
            .args(args)
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    /// Create a new test repository on `main` with an initial commit.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        Self::run_in(dir.path(), &["init", "-q", "-b", "main"]);
        Self::run_in(dir.path(), &["config", "user.email", "test@example.com"]);
        Self::run_in(dir.path(), &["config", "user.name", "Test User"]);
        Self::run_in(
            dir.path(),
            &["commit", "-q", "--allow-empty", "-m", "Initial commit"],
        );

        Self { dir, origin: None }
    }

    /// Get the canonicalized path to the repository.
    /// This resolves symlinks (e.g., /var -> /private/var on macOS).
    pub fn path(&self) -> PathBuf {
        self.dir
            .path()
            .canonicalize()
            .expect("Failed to canonicalize path")
    }

    /// The production git backend, pointed at this repository.
    pub fn git_cli(&self) -> GitCli {
        isolated_git_cli(self.path())
    }

    /// Run git in the repository, asserting success. Returns stdout.
    pub fn git(&self, args: &[&str]) -> String {
        Self::run_in(&self.path(), args)
    }

    /// Create a branch at the current HEAD (already merged into it).
    pub fn create_branch(&self, name: &str) {
        self.git(&["branch", name]);
    }

    /// Create a branch carrying one commit that `main` does not have.
    pub fn create_unmerged_branch(&self, name: &str) {
        self.git(&["checkout", "-q", "-b", name]);
        self.git(&[
            "commit",
            "-q",
            "--allow-empty",
            "-m",
            &format!("work on {name}"),
        ]);
        self.git(&["checkout", "-q", "main"]);
    }

    pub fn checkout(&self, name: &str) {
        self.git(&["checkout", "-q", name]);
    }

    pub fn rename_branch(&self, from: &str, to: &str) {
        self.git(&["branch", "-m", from, to]);
    }

    /// Check whether a local branch exists.
    pub fn has_branch(&self, name: &str) -> bool {
        Self::git_command(&self.path())
            .args(["rev-parse", "--quiet", "--verify", &format!("refs/heads/{name}")])
            .output()
            .expect("Failed to run git rev-parse")
            .status
            .success()
    }

    /// Point a branch at an upstream that does not exist, so git reports it as gone.
    pub fn mark_upstream_gone(&self, name: &str) {
        if self.git(&["remote"]).lines().all(|r| r != "origin") {
            self.git(&["remote", "add", "origin", "/nonexistent/origin.git"]);
        }
        self.git(&["config", &format!("branch.{name}.remote"), "origin"]);
        self.git(&[
            "config",
            &format!("branch.{name}.merge"),
            &format!("refs/heads/{name}"),
        ]);
    }

    /// Attach a bare repository as `origin` and push every local branch to it.
    pub fn attach_origin(&mut self) {
        let origin = tempfile::tempdir().expect("Failed to create temp dir");
        Self::run_in(origin.path(), &["init", "-q", "--bare"]);

        let origin_path = origin.path().to_string_lossy().to_string();
        self.git(&["remote", "add", "origin", &origin_path]);
        self.git(&["push", "-q", "origin", "--all"]);
        self.git(&["fetch", "-q", "origin"]);

        self.origin = Some(origin);
    }

    /// Delete a branch on the attached origin.
    pub fn delete_origin_branch(&self, name: &str) {
        let origin = self.origin.as_ref().expect("origin not attached");
        Self::run_in(origin.path(), &["branch", "-D", name]);
    }

    /// Check whether a remote-tracking branch `origin/<name>` exists locally.
    pub fn has_remote_tracking_branch(&self, name: &str) -> bool {
        Self::git_command(&self.path())
            .args([
                "rev-parse",
                "--quiet",
                "--verify",
                &format!("refs/remotes/origin/{name}"),
            ])
            .output()
            .expect("Failed to run git rev-parse")
            .status
            .success()
    }
}

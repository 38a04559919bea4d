//! Git operations through the `git` binary.
//!
//! Everything git-spruce asks of the repository goes through the
//! `GitBackend` trait so the scanning and cleaning logic can run against a
//! fake in tests.

mod backend;
mod branch;
mod error;

pub use backend::{GitBackend, GitCli};
pub use branch::{Branch, parse_branch_listing};
pub use error::{GitError, Result};

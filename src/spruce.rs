//! Branch scanning, merge classification and deletion policy.

use crate::infra::git::{Branch, GitBackend, Result, parse_branch_listing};
use crate::shared::config::Config;

/// Conventional names of a repository's root branch. When the configured
/// merge base is one of them, both are tried so renamed defaults still match.
const ROOT_BRANCH_ALIASES: [&str; 2] = ["main", "master"];

pub struct Spruce<G> {
    git: G,
    merge_base: String,
    ignore_branches: Vec<String>,
    origin: String,
}

impl<G: GitBackend> Spruce<G> {
    pub fn new(git: G, config: &Config) -> Self {
        Self {
            git,
            merge_base: config.merge_base.clone(),
            ignore_branches: config.ignore_branches.clone(),
            origin: config.origin.clone(),
        }
    }

    pub fn merge_base(&self) -> &str {
        &self.merge_base
    }

    /// Fetch from the configured remote, pruning deleted remote branches.
    pub fn fetch_prune(&self) -> Result<()> {
        self.git.fetch_prune(&self.origin)
    }

    /// Local branches eligible for cleaning, in the tool's listing order.
    pub fn list_branches(&self) -> Result<Vec<Branch>> {
        let listing = self.git.branch_listing()?;
        Ok(parse_branch_listing(&listing, &self.ignore_branches))
    }

    /// Whether `branch` has been fully merged into the merge base.
    ///
    /// With a `main`/`master` merge base, each alias that exists is checked
    /// first; the direct check against the configured name runs last.
    pub fn is_merged(&self, branch: &str) -> bool {
        if ROOT_BRANCH_ALIASES.contains(&self.merge_base.as_str()) {
            let merged_into_alias = ROOT_BRANCH_ALIASES.iter().any(|alias| {
                self.git.is_valid_reference(alias) && self.git.is_ancestor(branch, alias)
            });
            if merged_into_alias {
                return true;
            }
        }

        self.git.is_ancestor(branch, &self.merge_base)
    }

    /// Delete `branch`, returning the tool's diagnostic lines verbatim.
    pub fn delete_branch(&self, branch: &str, force: bool) -> Vec<String> {
        self.git.delete_branch(branch, force)
    }

    #[cfg(test)]
    pub fn git(&self) -> &G {
        &self.git
    }
}

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::infra::git::{GitBackend, GitCli};
use crate::shared::config::load_config;
use crate::shared::table::{color, render_table};
use crate::spruce::Spruce;

#[derive(Args, Clone, Debug, Default, PartialEq, Eq)]
pub struct CleanArgs {
    /// Run `git fetch --prune` before scanning
    #[arg(short, long)]
    pub prune: bool,

    /// Delete with `git branch -D` instead of `git branch -d`
    #[arg(short, long)]
    pub force: bool,

    /// Remove every merged branch without asking
    #[arg(short, long)]
    pub yes_all: bool,

    /// Path of the git repository to spruce (default: current directory)
    #[arg(long, value_name = "PATH")]
    pub repo: Option<PathBuf>,
}

/// Counts accumulated over one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub merged: usize,
    pub not_merged: usize,
    pub removed: usize,
}

pub fn run(args: &CleanArgs) -> anyhow::Result<()> {
    let config = load_config().context("Failed to load configuration")?;
    let spruce = Spruce::new(GitCli::new(args.repo.clone()), &config);

    let mut stdout = io::stdout().lock();
    let mut confirm = |branch: &str| prompt_removal(branch);
    clean(&spruce, args, &mut confirm, &mut stdout)?;

    Ok(())
}

/// Scan, classify and remove merged branches, then print the tally.
///
/// `confirm` is asked once per merged branch unless `yes_all` is set.
pub fn clean<G: GitBackend, W: Write>(
    spruce: &Spruce<G>,
    args: &CleanArgs,
    confirm: &mut dyn FnMut(&str) -> bool,
    out: &mut W,
) -> anyhow::Result<RunSummary> {
    if args.prune
        && let Err(e) = spruce.fetch_prune()
    {
        tracing::warn!(error = %e, "prune fetch failed, continuing with local state");
    }

    let branches = spruce
        .list_branches()
        .context("Failed to list branches")?;
    tracing::debug!(
        count = branches.len(),
        merge_base = spruce.merge_base(),
        "scanning branches"
    );

    let mut summary = RunSummary::default();

    for branch in &branches {
        let name = branch.name.as_str();

        if !spruce.is_merged(name) {
            summary.not_merged += 1;
            let gone = if branch.is_stale { " (upstream gone)" } else { "" };
            writeln!(
                out,
                "Branch {}{name}{} is not merged{gone}",
                color::YELLOW,
                color::RESET
            )?;
            continue;
        }

        summary.merged += 1;

        if args.yes_all {
            writeln!(out, "Branch {}{name}{} is merged", color::GREEN, color::RESET)?;
        } else if !confirm(name) {
            writeln!(out, "Branch {}{name}{} not removed", color::YELLOW, color::RESET)?;
            continue;
        }

        for line in spruce.delete_branch(name, args.force) {
            writeln!(out, "{line}")?;
        }
        summary.removed += 1;
    }

    writeln!(out)?;
    render_summary(out, &summary)?;

    Ok(summary)
}

fn render_summary<W: Write>(out: &mut W, summary: &RunSummary) -> io::Result<()> {
    render_table(
        out,
        &["Merged", "Not Merged", "Removed"],
        &[vec![
            summary.merged.to_string(),
            summary.not_merged.to_string(),
            summary.removed.to_string(),
        ]],
    )
}

/// Ask on the terminal whether a merged branch should be removed.
fn prompt_removal(branch: &str) -> bool {
    print!(
        "Branch {}{branch}{} is merged. Remove? [y/N] ",
        color::GREEN,
        color::RESET
    );
    io::stdout().flush().ok();

    read_confirmation(&mut io::stdin().lock())
}

/// Read one answer line. EOF or a read error declines.
fn read_confirmation<R: BufRead>(input: &mut R) -> bool {
    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(0) | Err(_) => false,
        Ok(_) => {
            let answer = answer.trim();
            answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
        }
    }
}

//! Parsing of `git branch -v` output.

/// A local branch as reported by the branch listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub name: String,
    /// The branch's remote-tracking counterpart no longer exists.
    pub is_stale: bool,
}

/// Parse a verbose branch listing into branches, in listing order.
///
/// Current-branch (`*`) and other-worktree (`+`) markers are stripped.
/// Blank lines, pseudo-branches such as `(HEAD detached at ...)`, and
/// names in `ignored` are dropped.
pub fn parse_branch_listing(listing: &str, ignored: &[String]) -> Vec<Branch> {
    listing
        .lines()
        .filter_map(parse_branch_line)
        .filter(|branch| !ignored.contains(&branch.name))
        .collect()
}

fn parse_branch_line(line: &str) -> Option<Branch> {
    let line = line.trim().trim_start_matches(['*', '+']).trim();
    if line.is_empty() || line.starts_with('(') {
        return None;
    }

    let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    if name.is_empty() {
        return None;
    }

    Some(Branch {
        name: name.to_string(),
        is_stale: upstream_is_gone(rest),
    })
}

/// Whether the tracking segment after the name (and hash, if any) says the
/// upstream is gone: `[gone]` with `-v`, `[origin/x: gone]` with `-vv`.
/// The commit subject is never inspected.
fn upstream_is_gone(rest: &str) -> bool {
    let rest = rest.trim_start();
    let tracking = if rest.starts_with('[') {
        rest
    } else {
        rest.split_once(char::is_whitespace)
            .map_or("", |(_, tail)| tail.trim_start())
    };

    tracking
        .strip_prefix('[')
        .and_then(|segment| segment.split_once(']'))
        .is_some_and(|(status, _)| status == "gone" || status.ends_with(": gone"))
}

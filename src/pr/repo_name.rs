use lazy_static::lazy_static;
use regex::Regex;

use super::types::RepoNameParts;

lazy_static! {
    // Project names stop at the first hyphen, so `proj-my-app-s25-01` does not match.
    static ref REPO_NAME_RE: Regex =
        Regex::new(r"proj-(?P<project>[^-]+)-(?P<term>[fwsm][0-9]{2})-(?P<team>[0-9]{2})")
            .expect("repo name regex must compile");
}

/// Split a course-project repository name into project, term and team.
///
/// Names follow `proj-<project>-<term><yy>-<team>` where term is one of
/// f/w/s/m (fall, winter, spring, summer). The pattern is searched for
/// anywhere in the name. Returns None when the name does not follow the
/// convention; that is a normal outcome, not an error.
pub fn parse_repo_name(repo: &str) -> Option<RepoNameParts> {
    let caps = REPO_NAME_RE.captures(repo)?;
    Some(RepoNameParts {
        project: caps["project"].to_string(),
        term: caps["term"].to_string(),
        team: caps["team"].to_string(),
    })
}

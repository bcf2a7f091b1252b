use lazy_static::lazy_static;
use regex::Regex;

use crate::pr::PullRequest;

lazy_static! {
    static ref DOKKU_LINK_RE: Regex =
        Regex::new(r"https://(?P<app>[^.]+)\.dokku-(?P<slot>[0-9]{2})\.cs\.ucsb\.edu")
            .expect("dokku link regex must compile");
}

/// A deployment hostname found in a PR description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DokkuLink {
    /// Dokku app name (the first hostname label)
    pub app: String,
    /// Two-digit dokku host number
    pub slot: String,
}

/// Find the first `https://<app>.dokku-<NN>.cs.ucsb.edu` link anywhere in the PR body.
pub fn extract_link(pr: &PullRequest) -> Option<DokkuLink> {
    let caps = DOKKU_LINK_RE.captures(pr.body_text())?;
    Some(DokkuLink {
        app: caps["app"].to_string(),
        slot: caps["slot"].to_string(),
    })
}

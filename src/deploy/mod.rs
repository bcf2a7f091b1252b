pub mod link;
pub mod types;

pub use link::extract_link;
pub use types::{DeploymentDescriptor, FullDescriptor, RepoAndBranch};

use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::pr::{self, PrError, PrUrl, PullRequest, PullRequestFetcher};

/// Dokku host number reserved for the shared instructor host; exempt from team checks.
pub const SHARED_SLOT: &str = "00";

#[derive(Debug, Error)]
pub enum DeployError {
    #[error(transparent)]
    Pr(#[from] PrError),

    #[error("No dokku deployment link found in the description of PR {pr_url}")]
    MissingDeploymentLink { pr_url: String },

    #[error("Dokku number {slot} cannot be checked: no team number in repo name {repo}")]
    TeamNumberNotFound { slot: String, repo: String },

    #[error("Dokku number {slot} does not match team number {team} in repo name {repo}")]
    TeamSlotMismatch {
        slot: String,
        team: String,
        repo: String,
    },

    #[error("Could not find branch name for PR with URL: {pr_url}")]
    BranchNotFound { pr_url: String },
}

/// Resolve a PR URL into the full dokku deployment descriptor.
///
/// The dokku number linked from the PR body must equal the team number in the
/// repository name unless it is the shared slot "00".
#[instrument(skip(fetcher, token))]
pub async fn build_deployment_descriptor(
    fetcher: &dyn PullRequestFetcher,
    token: &str,
    raw_url: &str,
) -> Result<DeploymentDescriptor, DeployError> {
    let pr_url = pr::decompose(raw_url)?;
    let repo_parts = pr::parse_repo_name(&pr_url.repo);
    debug!(owner = %pr_url.owner, repo = %pr_url.repo, pr = %pr_url.pr_number, "parsed PR URL");
    match &repo_parts {
        Some(parts) => {
            debug!(project = %parts.project, term = %parts.term, team = %parts.team, "parsed repo name")
        }
        None => debug!(repo = %pr_url.repo, "repo name carries no team number"),
    }

    let pull_request = fetcher.fetch(token, &pr_url).await?;

    let link = extract_link(&pull_request).ok_or_else(|| DeployError::MissingDeploymentLink {
        pr_url: raw_url.to_string(),
    })?;
    debug!(app = %link.app, slot = %link.slot, "found dokku link");

    if link.slot != SHARED_SLOT {
        let team = repo_parts
            .map(|parts| parts.team)
            .ok_or_else(|| DeployError::TeamNumberNotFound {
                slot: link.slot.clone(),
                repo: pr_url.repo.clone(),
            })?;
        if team != link.slot {
            return Err(DeployError::TeamSlotMismatch {
                slot: link.slot,
                team,
                repo: pr_url.repo,
            });
        }
    }

    let branch = branch_of(&pull_request, raw_url)?;
    info!(app = %link.app, dokku = %link.slot, %branch, "resolved deployment");

    Ok(DeploymentDescriptor::Full(FullDescriptor {
        app: link.app,
        dokku: link.slot,
        repo: pr_url.repo_url(),
        branch,
        owner: pr_url.owner,
        repo_name: pr_url.repo,
        pr_url: raw_url.to_string(),
    }))
}

/// Resolve a PR URL into just its repository URL and source branch.
#[instrument(skip(fetcher, token))]
pub async fn build_repo_and_branch(
    fetcher: &dyn PullRequestFetcher,
    token: &str,
    raw_url: &str,
) -> Result<DeploymentDescriptor, DeployError> {
    let pr_url: PrUrl = pr::decompose(raw_url)?;
    let pull_request = fetcher.fetch(token, &pr_url).await?;
    let branch = branch_of(&pull_request, raw_url)?;
    info!(%branch, "resolved repo and branch");

    Ok(DeploymentDescriptor::Reduced(RepoAndBranch {
        repo: pr_url.repo_url(),
        branch,
    }))
}

fn branch_of(pull_request: &PullRequest, raw_url: &str) -> Result<String, DeployError> {
    pull_request
        .branch()
        .map(str::to_string)
        .ok_or_else(|| DeployError::BranchNotFound {
            pr_url: raw_url.to_string(),
        })
}

use serde::Serialize;

/// Everything needed to deploy a PR branch to its dokku app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FullDescriptor {
    /// Dokku app name
    pub app: String,
    /// Dokku host number ("00" for the shared host)
    pub dokku: String,
    /// Repository URL (https://github.com/{owner}/{repo})
    pub repo: String,
    /// PR source branch
    pub branch: String,
    pub owner: String,
    pub repo_name: String,
    /// The PR URL as given by the caller
    pub pr_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoAndBranch {
    pub repo: String,
    pub branch: String,
}

/// Result of a resolution: the full dokku descriptor, or only repo + branch.
/// Serializes without a tag, as the bare object of whichever form it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DeploymentDescriptor {
    Full(FullDescriptor),
    Reduced(RepoAndBranch),
}

impl DeploymentDescriptor {
    pub fn repo(&self) -> &str {
        match self {
            DeploymentDescriptor::Full(full) => &full.repo,
            DeploymentDescriptor::Reduced(reduced) => &reduced.repo,
        }
    }

    pub fn branch(&self) -> &str {
        match self {
            DeploymentDescriptor::Full(full) => &full.branch,
            DeploymentDescriptor::Reduced(reduced) => &reduced.branch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_descriptor_json_shape() {
        let descriptor = DeploymentDescriptor::Full(FullDescriptor {
            app: "dining".to_string(),
            dokku: "10".to_string(),
            repo: "https://github.com/org/proj-dining-s25-10".to_string(),
            branch: "feature".to_string(),
            owner: "org".to_string(),
            repo_name: "proj-dining-s25-10".to_string(),
            pr_url: "https://github.com/Org/proj-dining-s25-10/pull/46".to_string(),
        });
        let json = serde_json::to_string(&descriptor).unwrap();
        assert_eq!(
            json,
            r#"{"app":"dining","dokku":"10","repo":"https://github.com/org/proj-dining-s25-10","branch":"feature","owner":"org","repo_name":"proj-dining-s25-10","pr_url":"https://github.com/Org/proj-dining-s25-10/pull/46"}"#
        );
    }

    #[test]
    fn test_reduced_descriptor_json_shape() {
        let descriptor = DeploymentDescriptor::Reduced(RepoAndBranch {
            repo: "https://github.com/org/repo".to_string(),
            branch: "main".to_string(),
        });
        assert_eq!(
            serde_json::to_string(&descriptor).unwrap(),
            r#"{"repo":"https://github.com/org/repo","branch":"main"}"#
        );
        assert_eq!(descriptor.branch(), "main");
    }
}

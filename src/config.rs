use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::pr::DEFAULT_API_BASE;

/// Config file looked up in the current directory when --config is not given.
pub const DEFAULT_CONFIG_FILE: &str = ".dokku-pr.toml";

/// Token file read when neither the config nor the environment supplies a token.
pub const DEFAULT_TOKEN_FILE: &str = "GITHUB_TOKEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("GitHub token not found: set github.token, GITHUB_TOKEN, or create {0}")]
    MissingToken(String),
}

/// Top-level configuration loaded from .dokku-pr.toml.
/// All fields are optional; the tool works with zero config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubConfig {
    /// GitHub API token. Takes precedence over GITHUB_TOKEN and the token file.
    pub token: Option<String>,
    /// File holding the token, relative to the working directory.
    pub token_file: Option<PathBuf>,
    /// REST API root, for GitHub Enterprise or local testing.
    pub api_base: Option<String>,
}

impl Config {
    /// Load configuration from `path`, or from .dokku-pr.toml in the current
    /// directory. A missing default file yields the default config; an explicit
    /// path that cannot be read is an error.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load_from(default_path)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn api_base(&self) -> &str {
        self.github.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }

    pub fn token_file(&self) -> &Path {
        self.github
            .token_file
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_TOKEN_FILE))
    }

    /// Resolve the GitHub token: config file value first, then the
    /// GITHUB_TOKEN env var, then the contents of the token file.
    pub fn github_token(&self) -> Result<String, ConfigError> {
        self.resolve_token(std::env::var("GITHUB_TOKEN").ok())
    }

    fn resolve_token(&self, env_token: Option<String>) -> Result<String, ConfigError> {
        let non_empty = |token: String| {
            let token = token.trim().to_string();
            (!token.is_empty()).then_some(token)
        };

        if let Some(token) = self.github.token.clone().and_then(non_empty) {
            return Ok(token);
        }
        if let Some(token) = env_token.and_then(non_empty) {
            return Ok(token);
        }

        let token_file = self.token_file();
        match fs::read_to_string(token_file) {
            Ok(contents) => non_empty(contents)
                .ok_or_else(|| ConfigError::MissingToken(token_file.display().to_string())),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(ConfigError::MissingToken(token_file.display().to_string()))
            }
            Err(err) => Err(ConfigError::FileRead(err)),
        }
    }
}

mod config;
mod deploy;
mod output;
mod pr;

use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info, info_span};
use tracing_subscriber::EnvFilter;

/// dokku-pr — resolve a GitHub Pull Request URL into the app, dokku host and
/// branch needed to deploy it.
#[derive(Parser, Debug)]
#[command(name = "dokku-pr", version, about)]
struct Cli {
    /// GitHub Pull Request URL (e.g., https://github.com/ucsb-cs156-s25/proj-dining-s25-10/pull/46)
    pr_url: String,

    /// Only resolve the repository URL and branch (no dokku link or team check)
    #[arg(long)]
    repo_branch_only: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = output::OutputFormat::Json)]
    format: output::OutputFormat,

    /// Optional output file path; defaults to stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file path; defaults to .dokku-pr.toml when present
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let _main_span = info_span!("dokku_pr", pr_url = %cli.pr_url).entered();

    info!("loading configuration");
    let config = config::Config::load(cli.config.as_deref())?;
    let token = config.github_token()?;
    debug!(api_base = %config.api_base(), "resolved GitHub credentials");

    let client = pr::GitHubClient::new(config.api_base());
    let descriptor = if cli.repo_branch_only {
        info!("resolving repo and branch");
        deploy::build_repo_and_branch(&client, &token, &cli.pr_url).await?
    } else {
        info!("resolving deployment descriptor");
        deploy::build_deployment_descriptor(&client, &token, &cli.pr_url).await?
    };

    output::emit(&descriptor, cli.format, cli.output.as_deref())?;
    info!("done");

    Ok(())
}

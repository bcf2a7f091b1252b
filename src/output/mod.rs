use crate::deploy::DeploymentDescriptor;
use clap::ValueEnum;
use colored::Colorize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output file: {0}")]
    FileWrite(#[from] std::io::Error),

    #[error("Failed to serialize descriptor: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single-line JSON object
    #[default]
    Json,
    /// Aligned key/value lines for humans
    Text,
}

/// Write the descriptor to stdout (default) or to a file.
///
/// Files always get plain text; colors are only used on the terminal.
#[instrument(skip(descriptor), fields(repo = %descriptor.repo(), branch = %descriptor.branch()))]
pub fn emit(
    descriptor: &DeploymentDescriptor,
    format: OutputFormat,
    output_path: Option<&Path>,
) -> Result<(), OutputError> {
    match output_path {
        None => {
            debug!("writing descriptor to stdout");
            let rendered = match format {
                OutputFormat::Json => render_json(descriptor)?,
                OutputFormat::Text => render_text(descriptor, true),
            };
            println!("{}", rendered);
            Ok(())
        }
        Some(path) => {
            debug!(path = %path.display(), "writing descriptor to file");
            let mut rendered = match format {
                OutputFormat::Json => render_json(descriptor)?,
                OutputFormat::Text => render_text(descriptor, false),
            };
            rendered.push('\n');
            std::fs::write(path, rendered)?;
            Ok(())
        }
    }
}

pub fn render_json(descriptor: &DeploymentDescriptor) -> Result<String, OutputError> {
    Ok(serde_json::to_string(descriptor)?)
}

/// Render as `key: value` lines, followed by the dokku sync command for full descriptors.
fn render_text(descriptor: &DeploymentDescriptor, color: bool) -> String {
    let fields: Vec<(&str, &str)> = match descriptor {
        DeploymentDescriptor::Full(full) => vec![
            ("app", full.app.as_str()),
            ("dokku", full.dokku.as_str()),
            ("repo", full.repo.as_str()),
            ("branch", full.branch.as_str()),
            ("owner", full.owner.as_str()),
            ("repo_name", full.repo_name.as_str()),
            ("pr_url", full.pr_url.as_str()),
        ],
        DeploymentDescriptor::Reduced(reduced) => {
            vec![("repo", reduced.repo.as_str()), ("branch", reduced.branch.as_str())]
        }
    };

    let width = fields.iter().map(|(key, _)| key.len()).max().unwrap_or(0) + 1;
    let mut out = String::new();
    for (key, value) in &fields {
        let label = format!("{:<width$}", format!("{}:", key), width = width);
        if color {
            out.push_str(&format!("{} {}\n", label.cyan().bold(), value));
        } else {
            out.push_str(&format!("{} {}\n", label, value));
        }
    }

    if let DeploymentDescriptor::Full(full) = descriptor {
        let host = format!("dokku-{}", full.dokku);
        let command = format!("dokku git:sync {} {} {}", full.app, full.repo, full.branch);
        out.push('\n');
        if color {
            out.push_str(&format!("# on {}\n{}", host.yellow(), command.green().bold()));
        } else {
            out.push_str(&format!("# on {}\n{}", host, command));
        }
    } else {
        out.pop();
    }
    out
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::config::{PanelConfig, DEFAULT_CONFIG_PATH};

#[derive(Debug, Parser)]
#[command(
    name = "compliance-panel",
    version,
    about = "Review provisioned-product compliance findings and notify affected users"
)]
pub struct Cli {
    /// RON configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
    /// Catalog snapshot JSON; overrides the configured path.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
    /// Backend base URL; overrides the configured endpoint.
    #[arg(long)]
    pub endpoint: Option<String>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Interactive panel on the terminal (default).
    Run,
    /// Write the compliance report as JSON.
    Export {
        #[arg(long, default_value = "reports")]
        out: PathBuf,
    },
    /// Post the stale product list to a Slack webhook.
    NotifyStale {
        #[arg(long)]
        webhook: Option<String>,
    },
}

impl Cli {
    pub fn apply_overrides(&self, config: &mut PanelConfig) {
        if let Some(snapshot) = &self.snapshot {
            config.snapshot = snapshot.clone();
        }
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
    }
}

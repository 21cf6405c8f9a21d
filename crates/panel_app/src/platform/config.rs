use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use panel_core::ComplianceThresholds;
use panel_engine::SendSettings;
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_PATH: &str = "compliance_panel.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Backend base URL; requests go to `{endpoint}/send-email`.
    pub endpoint: String,
    pub snapshot: PathBuf,
    pub confirm_window_ms: u64,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub stale_product_threshold_hours: u32,
    pub high_product_count_threshold: usize,
    pub launch_count_threshold: usize,
    pub slack_webhook: Option<String>,
    pub log_destination: LogDestination,
}

impl Default for PanelConfig {
    fn default() -> Self {
        let thresholds = ComplianceThresholds::default();
        let send = SendSettings::default();
        Self {
            endpoint: send.endpoint,
            snapshot: PathBuf::from("snapshot.json"),
            confirm_window_ms: 3_000,
            connect_timeout_ms: send.connect_timeout.as_millis() as u64,
            request_timeout_ms: send.request_timeout.as_millis() as u64,
            stale_product_threshold_hours: thresholds.stale_after_hours,
            high_product_count_threshold: thresholds.high_product_count,
            launch_count_threshold: thresholds.launch_count,
            slack_webhook: None,
            log_destination: LogDestination::default(),
        }
    }
}

impl PanelConfig {
    pub fn confirm_window(&self) -> Duration {
        Duration::from_millis(self.confirm_window_ms)
    }

    pub fn thresholds(&self) -> ComplianceThresholds {
        ComplianceThresholds {
            stale_after_hours: self.stale_product_threshold_hours,
            high_product_count: self.high_product_count_threshold,
            launch_count: self.launch_count_threshold,
        }
    }

    pub fn send_settings(&self) -> SendSettings {
        SendSettings {
            endpoint: self.endpoint.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Reads the config file. A missing file is not an error and yields `None`.
pub fn try_load_config(path: &Path) -> Result<Option<PanelConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    ron::from_str(&content)
        .map(Some)
        .map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
}

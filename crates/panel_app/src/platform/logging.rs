//! Log routing for the terminal host. The panel owns stdout, so the
//! default sink is `./panel.log`; terminal output is opt-in.

use std::fs::File;
use std::path::PathBuf;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

const LOG_PATH: &str = "./panel.log";

/// Where the host sends diagnostics, chosen by `log_destination` in the
/// config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogDestination {
    #[default]
    File,
    /// Interleaved with the panel on the terminal.
    Terminal,
    Both,
}

impl LogDestination {
    fn to_terminal(self) -> bool {
        matches!(self, Self::Terminal | Self::Both)
    }

    fn to_file(self) -> bool {
        matches!(self, Self::File | Self::Both)
    }
}

/// Installs the global logger. Called once, after the config is read, so
/// a config problem can itself be logged.
pub fn initialize(destination: LogDestination) {
    let level = LevelFilter::Info;
    let config = build_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if destination.to_terminal() {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if destination.to_file() {
        if let Some(file_logger) = create_file_logger(level, config) {
            loggers.push(file_logger);
        }
    }
    if loggers.is_empty() {
        return;
    }

    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(level: LevelFilter, config: Config) -> Option<Box<WriteLogger<File>>> {
    let log_path = PathBuf::from(LOG_PATH);
    match File::create(&log_path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("compliance-panel: cannot open {:?} ({}); file logging off", log_path, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LogDestination;

    #[test]
    fn default_keeps_the_terminal_for_the_panel() {
        let destination = LogDestination::default();
        assert!(destination.to_file());
        assert!(!destination.to_terminal());
    }

    #[test]
    fn both_routes_everywhere() {
        assert!(LogDestination::Both.to_file());
        assert!(LogDestination::Both.to_terminal());
        assert!(!LogDestination::Terminal.to_file());
    }
}

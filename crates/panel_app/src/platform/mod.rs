mod app;
mod cli;
mod config;
mod effects;
mod logging;
#[cfg(test)]
mod test_support;
mod ui;

use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use panel_core::compliance::stale_report_message;
use panel_core::{build_record_set, PanelState};
use panel_engine::{
    export_report, load_snapshot, EngineHandle, ReqwestEmailSender, SlackNotifier,
};
use panel_logging::{panel_info, panel_warn};

use self::cli::{Cli, Command};
use self::config::{try_load_config, PanelConfig};
use self::effects::EffectRunner;
use self::ui::toast::TerminalNotifier;

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, config_error) = match try_load_config(&cli.config) {
        Ok(loaded) => (loaded.unwrap_or_default(), None),
        Err(err) => (PanelConfig::default(), Some(err)),
    };
    logging::initialize(config.log_destination);
    if let Some(err) = config_error {
        panel_warn!("{}; using defaults", err);
    }
    cli.apply_overrides(&mut config);

    let snapshot = load_snapshot(&config.snapshot)?;
    let records = build_record_set(&snapshot, Utc::now(), config.thresholds());

    match cli.command.clone().unwrap_or(Command::Run) {
        Command::Run => {
            let sender = ReqwestEmailSender::new(&config.send_settings())?;
            let engine = EngineHandle::new(Arc::new(sender)).context("starting engine runtime")?;
            let runner = EffectRunner::new(Box::new(engine), Box::new(TerminalNotifier));
            panel_info!("Panel started against {}", config.endpoint);
            app::run_panel(PanelState::new(records, config.confirm_window()), runner);
        }
        Command::Export { out } => {
            let path = export_report(&out, &records, &Utc::now().to_rfc3339())?;
            println!("Report written to {}", path.display());
        }
        Command::NotifyStale { webhook } => {
            let webhook = webhook
                .or_else(|| config.slack_webhook.clone())
                .context("no Slack webhook configured; pass --webhook or set slack_webhook")?;
            match stale_report_message(&records.stale) {
                Some(message) => {
                    SlackNotifier::new(&webhook, config.send_settings().request_timeout)?
                        .post_blocking(&message)?;
                    println!("Posted {} stale products", records.stale.len());
                }
                None => panel_info!("No stale provisioned products found."),
            }
        }
    }
    Ok(())
}

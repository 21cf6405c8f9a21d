#![deny(missing_docs)]
//! Shared logging utilities for the compliance panel workspace.
//!
//! This crate provides the `panel_*` logging macros used by the state
//! machine, the effect engine and the terminal host, plus a test
//! initializer for the global logger.

/// Per-message dispatch detail from the panel state machine.
#[macro_export]
macro_rules! panel_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Ignored clicks, timer bookkeeping and engine command flow.
#[macro_export]
macro_rules! panel_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Sends, deliveries, exports and startup milestones.
#[macro_export]
macro_rules! panel_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Recoverable panel problems: bad tags, missing detail views, failed sends.
#[macro_export]
macro_rules! panel_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Out-of-range selections, a stopped engine and webhook failures.
#[macro_export]
macro_rules! panel_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Shortens an email address for diagnostics, keeping the first character
/// of the local part and the full domain (`a***@example.com`).
///
/// Addresses without an `@` are masked entirely.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{first}***@{domain}")
        }
        None => "***".to_string(),
    }
}

/// Routes panel diagnostics to the terminal while tests run. A second
/// call, or a logger installed elsewhere, leaves the first one in place.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

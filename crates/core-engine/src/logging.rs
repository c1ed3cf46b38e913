//! Process-wide tracing setup.

use std::sync::OnceLock;

pub const LOG_LEVEL_VAR: &str = "WEBCARD_LOG";

static INIT: OnceLock<()> = OnceLock::new();

fn parse_level(raw: Option<&str>) -> tracing::Level {
    match raw.unwrap_or("info").trim().to_ascii_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}

/// Install the fmt subscriber with the level from `WEBCARD_LOG`.
///
/// Only the first call has any effect. A subscriber installed elsewhere
/// wins silently.
pub fn init() {
    INIT.get_or_init(|| {
        let level = parse_level(std::env::var(LOG_LEVEL_VAR).ok().as_deref());
        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .try_init();
    });
}

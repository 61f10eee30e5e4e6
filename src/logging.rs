//! Diagnostic logging to stderr through `tracing`.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive, e.g. `taskflow=trace`.
pub const LOG_ENV: &str = "TASKFLOW_LOG";

/// Level used when nothing else is configured.
pub const DEFAULT_LEVEL: &str = "warn";

/// Pick the filter directive: `--verbose`, then the environment, then config.
#[must_use]
pub fn filter_directive(env_value: Option<&str>, config_level: &str, verbose: bool) -> String {
    if verbose {
        return "debug".to_string();
    }
    env_value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| Some(config_level.trim()).filter(|s| !s.is_empty()))
        .unwrap_or(DEFAULT_LEVEL)
        .to_string()
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(config_level: &str, verbose: bool) {
    let env_value = std::env::var(LOG_ENV).ok();
    let directive = filter_directive(env_value.as_deref(), config_level, verbose);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init();
}

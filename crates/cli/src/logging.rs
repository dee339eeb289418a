use assetdesk_core::config::{AppConfig, LogFormat};
use tracing::Level;

/// Installs the global subscriber. Output goes to stderr so stdout stays a
/// single JSON document.
pub fn init(config: &AppConfig) {
    let log_level = config.logging.level.trim().parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(log_level);

    let installed = match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    if installed.is_err() {
        tracing::debug!(
            event_name = "cli.logging.already_initialized",
            correlation_id = "bootstrap",
            "tracing subscriber was already installed"
        );
    }
}

use clap::ValueEnum;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::settings::{LogFormat, LoggingConfig};


#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    TRACE,
    DEBUG,
    INFO,
    WARN,
    ERROR,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match *self {
            LogLevel::TRACE => "TRACE",
            LogLevel::DEBUG => "DEBUG",
            LogLevel::INFO => "INFO",
            LogLevel::WARN => "WARN",
            LogLevel::ERROR => "ERROR",
        }
    }
}

/// Builds the logging config, a CLI level wins over the configured one.
pub fn resolve_logging_config(arg_log_level: Option<LogLevel>, format: Option<LogFormat>) -> LoggingConfig {
    let defaults = LoggingConfig::default();
    LoggingConfig::new(
        arg_log_level
            .map(|level| level.as_str().to_lowercase())
            .unwrap_or(defaults.level),
        format.unwrap_or_else(LogFormat::from_env),
    )
}

/// Initialize tracing with the desired config.
pub fn init_logging(cfg: &LoggingConfig) {
    let env_filter = EnvFilter::try_new(&cfg.level)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // Base layer: filter + writer
    let registry = tracing_subscriber::registry().with(env_filter);

    // Choose format layer
    match cfg.format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_timer(UtcTime::rfc_3339())
                .flatten_event(true) // log collectors index top-level fields
                .with_ansi(false);

            let _ = registry.with(layer).try_init();
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_timer(UtcTime::rfc_3339())
                .with_ansi(true);

            let _ = registry.with(layer).try_init();
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_level_wins() {
        let cfg = resolve_logging_config(Some(LogLevel::DEBUG), Some(LogFormat::Compact));
        assert_eq!(cfg.level, "debug");
        assert_eq!(cfg.format, LogFormat::Compact);
    }

    #[test]
    fn defaults_to_info() {
        let cfg = resolve_logging_config(None, Some(LogFormat::Json));
        assert_eq!(cfg.level, "info");
    }

    #[test]
    fn init_twice_is_harmless() {
        let cfg = resolve_logging_config(Some(LogLevel::WARN), Some(LogFormat::Json));
        init_logging(&cfg);
        init_logging(&cfg);
    }
}

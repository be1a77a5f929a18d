use clap::ValueEnum;

use crate::cache::token::EnvironmentMode;
use crate::utils::constants::{DEFAULT_ENVIRONMENT, ENV_NODE_ENV};

/// ================================
/// Process-wide settings, fixed at start
/// ================================
#[derive(Debug, Clone)]
pub struct SettingsConfig {
    pub environment: EnvironmentMode,
    pub logging: LoggingConfig,
}

impl SettingsConfig {
    pub fn new(app_env: &str, logging: LoggingConfig) -> Self {
        Self {
            environment: EnvironmentMode::from_name(app_env),
            logging,
        }
    }
}

/// `APP_ENV` (already read by the CLI) wins, then `NODE_ENV`, then development.
pub fn environment_name(app_env: Option<String>) -> String {
    app_env
        .or_else(|| std::env::var(ENV_NODE_ENV).ok())
        .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_owned())
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Json,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Json,
    Compact,
}

impl LogFormat {
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT")
            .unwrap_or_else(|_| "json".to_string())
            .to_lowercase()
            .as_str()
        {
            "compact" | "text" => LogFormat::Compact,
            _ => LogFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn settings_pick_environment_from_name() {
        let settings = SettingsConfig::new("production", LoggingConfig::default());
        assert!(settings.environment.is_production());
        let settings = SettingsConfig::new("development", LoggingConfig::default());
        assert!(!settings.environment.is_production());
    }

    #[test]
    #[serial]
    fn node_env_is_the_fallback_environment() {
        std::env::set_var(ENV_NODE_ENV, "production");
        assert_eq!(environment_name(None), "production");
        assert_eq!(environment_name(Some("staging".into())), "staging");

        std::env::remove_var(ENV_NODE_ENV);
        assert_eq!(environment_name(None), "development");
    }

    #[test]
    fn bind_addr_joins_host_and_port() {
        let server = ServerConfig { host: "127.0.0.1".into(), port: 9000 };
        assert_eq!(server.bind_addr(), "127.0.0.1:9000");
    }
}

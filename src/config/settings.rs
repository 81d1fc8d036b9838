//! Typed settings deserialized from the layered configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::logger::LoggerConfig;

fn default_app_name() -> String {
    "red404".to_string()
}

fn default_app_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

/// Root settings structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logger: LoggerConfig,
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application identity, reported in startup logs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    #[serde(default = "default_app_name")]
    pub name: String,

    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Server Configuration
// ============================================================================

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Per-request deadline in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

impl ServerConfig {
    /// Get the full server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::LogFormat;
    use proptest::prelude::*;
    use std::path::PathBuf;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.application.name, "red404");
        assert_eq!(settings.application.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.request_timeout(), Duration::from_secs(30));
        assert_eq!(settings.logger, LoggerConfig::default());
    }

    #[test]
    fn test_server_address() {
        let server = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 9000,
            ..Default::default()
        };
        assert_eq!(server.address(), "0.0.0.0:9000");
    }

    #[test]
    fn test_deserialize_partial() {
        let settings: Settings = toml::from_str(
            r#"
            [application]
            name = "my-app"

            [server]
            port = 3000
        "#,
        )
        .expect("Failed to deserialize");

        assert_eq!(settings.application.name, "my-app");
        assert_eq!(settings.application.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert!(settings.logger.console.enabled);
    }

    #[test]
    fn test_deserialize_full() {
        let settings: Settings = toml::from_str(
            r#"
            [application]
            name = "users"
            version = "2.0.0"

            [server]
            host = "0.0.0.0"
            port = 8081
            request_timeout = 60

            [logger]
            level = "debug"

            [logger.console]
            enabled = true
            colored = false

            [logger.file]
            enabled = true
            path = "logs/users.log"
            append = false
            format = "compact"
        "#,
        )
        .expect("Failed to deserialize");

        assert_eq!(settings.application.version, "2.0.0");
        assert_eq!(settings.server.request_timeout, 60);
        assert_eq!(settings.logger.level, "debug");
        assert!(!settings.logger.console.colored);
        assert!(settings.logger.file.enabled);
        assert_eq!(settings.logger.file.path, PathBuf::from("logs/users.log"));
        assert!(!settings.logger.file.append);
        assert_eq!(settings.logger.file.format, LogFormat::Compact);
    }

    #[test]
    fn test_server_section_keys() {
        let value = toml::Value::try_from(ServerConfig::default()).unwrap();
        let mut keys: Vec<&str> = value
            .as_table()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["host", "port", "request_timeout"]);
    }

    #[test]
    fn test_shipped_default_toml_matches_defaults() {
        let settings: Settings = toml::from_str(include_str!("../../config/default.toml"))
            .expect("config/default.toml should deserialize");
        assert_eq!(settings, Settings::default());
    }

    proptest! {
        #[test]
        fn test_settings_toml_round_trip(
            host in "[a-z0-9.]{1,20}",
            port in 1u16..,
            request_timeout in 1u64..3600,
            level in prop::sample::select(vec!["trace", "debug", "info", "warn", "error"]),
            colored in any::<bool>(),
            append in any::<bool>(),
        ) {
            let mut settings = Settings::default();
            settings.server.host = host;
            settings.server.port = port;
            settings.server.request_timeout = request_timeout;
            settings.logger.level = level.to_string();
            settings.logger.console.colored = colored;
            settings.logger.file.append = append;

            let text = toml::to_string(&settings).unwrap();
            let parsed: Settings = toml::from_str(&text).unwrap();
            prop_assert_eq!(parsed, settings);
        }
    }
}

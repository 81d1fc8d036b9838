//! Configuration validation logic
//!
//! Checks run after loading and again after command line overrides are
//! merged, so a bad value is reported before the server starts.

use crate::config::error::ConfigError;
use crate::config::settings::{ServerConfig, Settings};
use crate::logger::LoggerConfig;

impl ServerConfig {
    /// Validate server configuration
    ///
    /// # Validation Rules
    /// - Host must not be empty
    /// - Port must be between 1 and 65535
    /// - Request timeout must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::validation(
                "server.host",
                "Host must not be empty.",
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

fn validate_logger(logger: &LoggerConfig) -> Result<(), ConfigError> {
    if logger.parse_level().is_err() {
        return Err(ConfigError::validation(
            "logger.level",
            format!(
                "Invalid log level '{}'. Valid levels are: trace, debug, info, warn, error",
                logger.level
            ),
        ));
    }

    if logger.file.enabled && logger.file.path.as_os_str().is_empty() {
        return Err(ConfigError::validation(
            "logger.file.path",
            "File path cannot be empty when file output is enabled.",
        ));
    }

    if !logger.console.enabled && !logger.file.enabled {
        return Err(ConfigError::validation(
            "logger",
            "At least one output (console or file) must be enabled.",
        ));
    }

    Ok(())
}

impl Settings {
    /// Validate all settings sections
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.application.name.trim().is_empty() {
            return Err(ConfigError::validation(
                "application.name",
                "Application name must not be empty.",
            ));
        }

        self.server.validate()?;
        validate_logger(&self.logger)
    }
}

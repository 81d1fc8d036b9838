//! Logger Module
//!
//! A logging system based on `tracing-subscriber` with support for:
//! - Console output with color control
//! - File output in Full, Compact or JSON format

pub mod config;
pub mod error;


pub use config::*;
pub use error::LoggerError;

use std::fs::{self, File, OpenOptions};
use std::io::IsTerminal;
use std::sync::Mutex;

use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize the global logger with the given configuration.
///
/// Fails if a global subscriber is already installed.
pub fn init_logger(config: &LoggerConfig) -> Result<(), LoggerError> {
    config.validate()?;

    let filter = build_filter(config)?;
    let layers = build_layers(config)?;

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| LoggerError::Init {
            message: e.to_string(),
        })
}

pub(crate) fn build_filter(config: &LoggerConfig) -> Result<EnvFilter, LoggerError> {
    let level = config.parse_level()?;
    EnvFilter::try_new(level.as_str().to_lowercase()).map_err(|e| LoggerError::config(e.to_string()))
}

/// Builds the enabled output layers.
///
/// The file layer is added before the console layer so ANSI escapes from
/// span fields formatted for the console never reach the file.
pub(crate) fn build_layers(config: &LoggerConfig) -> Result<Vec<BoxedLayer>, LoggerError> {
    let mut layers: Vec<BoxedLayer> = Vec::new();

    if config.file.enabled {
        let writer = Mutex::new(open_log_file(&config.file)?);
        let base = fmt::layer().with_ansi(false).with_target(true);

        let layer: BoxedLayer = match config.file.format {
            LogFormat::Full => base.with_writer(writer).boxed(),
            LogFormat::Compact => base.compact().with_writer(writer).boxed(),
            LogFormat::Json => base.json().with_writer(writer).boxed(),
        };
        layers.push(layer);
    }

    if config.console.enabled {
        let use_ansi = config.console.colored && std::io::stdout().is_terminal();
        layers.push(
            fmt::layer()
                .with_ansi(use_ansi)
                .with_target(true)
                .with_level(true)
                .boxed(),
        );
    }

    Ok(layers)
}

fn open_log_file(config: &FileConfig) -> Result<File, LoggerError> {
    if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut options = OpenOptions::new();
    options.create(true);
    if config.append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }

    Ok(options.open(&config.path)?)
}

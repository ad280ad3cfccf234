// src/logging.rs

//! Structured logging setup
//!
//! Builds the global `tracing` subscriber from [`LoggingConfig`]:
//! - an `EnvFilter` (`RUST_LOG` wins over the configured level)
//! - an optional console layer
//! - an optional daily-rolling file layer written through a non-blocking worker

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::Identity;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

use crate::config::{LogFormat, LoggingConfig};
use crate::error::{Error, Result, ResultExt};

/// Keeps the file writer alive; dropping it flushes pending log lines
#[derive(Debug, Default)]
pub struct LoggingGuard {
    _guards: Vec<WorkerGuard>,
}

/// Resolves the effective filter directive
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard> {
    let mut guard = LoggingGuard::default();
    let registry = Registry::default().with(build_filter(config));

    let registry = if config.console.enabled {
        let console_layer = match config.format {
            LogFormat::Json => fmt::layer().json().with_target(true).boxed(),
            LogFormat::Compact => fmt::layer()
                .compact()
                .with_ansi(config.console.colored)
                .with_target(false)
                .boxed(),
            LogFormat::Pretty => fmt::layer()
                .with_ansi(config.console.colored)
                .with_target(true)
                .with_line_number(true)
                .boxed(),
        };
        registry.with(console_layer)
    } else {
        registry.with(Identity::new().boxed())
    };

    let registry = if let Some(file_config) = &config.file {
        let directory = file_config.path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = file_config
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("portal.log");

        std::fs::create_dir_all(directory)?;
        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(file_name)
            .build(directory)
            .with_context(|| format!("Failed to open log file in {}", directory.display()))?;
        let (non_blocking, worker_guard) = tracing_appender::non_blocking(file_appender);
        guard._guards.push(worker_guard);

        let file_layer = match config.format {
            LogFormat::Json => fmt::layer().json().with_writer(non_blocking).boxed(),
            LogFormat::Pretty => fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking)
                .boxed(),
            LogFormat::Compact => fmt::layer()
                .compact()
                .with_ansi(false)
                .with_writer(non_blocking)
                .boxed(),
        };
        registry.with(file_layer)
    } else {
        registry.with(Identity::new().boxed())
    };

    registry
        .try_init()
        .map_err(|e| Error::config("Failed to install tracing subscriber").caused_by(e))?;

    tracing::debug!(level = %config.level, format = ?config.format, "Logging initialized");
    Ok(guard)
}

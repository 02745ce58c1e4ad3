//! Logging system for sealedsecret.
//!
//! Installs a `tracing` subscriber with an `EnvFilter`, one of three output
//! formats, and optional file output. `RUST_LOG` overrides the configured
//! level when set.

use sealedsecret_types::{LogConfig, LogFormat, Result, SealError};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize logging from configuration.
///
/// When logging to a file the returned guard must be held until exit, or
/// buffered lines are lost.
pub fn init(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let (writer, guard, ansi) = match &config.path {
        Some(path) => {
            let (dir, file) = split_log_path(path)?;
            let appender = tracing_appender::rolling::never(dir, file);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard), false)
        }
        None => (BoxMakeWriter::new(std::io::stderr), None, true),
    };

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(format_layer(config.format, writer, ansi))
        .try_init()
        .map_err(|e| SealError::Config(format!("Failed to install log subscriber: {}", e)))?;

    Ok(guard)
}

/// Build the filter: `RUST_LOG` when present, the configured level otherwise.
pub fn env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.level.as_directive()))
}

fn format_layer<S>(format: LogFormat, writer: BoxMakeWriter, ansi: bool) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    match format {
        LogFormat::Pretty => fmt::layer().pretty().with_ansi(ansi).with_writer(writer).boxed(),
        LogFormat::Json => fmt::layer().json().with_writer(writer).boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer)
            .boxed(),
    }
}

fn split_log_path(path: &Path) -> Result<(&Path, &std::ffi::OsStr)> {
    let file = path
        .file_name()
        .ok_or_else(|| SealError::Config(format!("Log path has no file name: {}", path.display())))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Ok((dir, file))
}

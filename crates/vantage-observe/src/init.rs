use time::{UtcOffset, format_description::well_known::Rfc3339};
use tracing_subscriber::{fmt, fmt::time::OffsetTime, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{config::LoggerConfig, error::LoggerError, format::LoggerFormat};

/// Install the global `tracing` subscriber described by `cfg`.
///
/// Only one subscriber can be installed per process; later calls return
/// [`LoggerError::AlreadyInstalled`].
pub fn logger_init(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    let filter = cfg.env_filter()?;
    let timer = local_timer();

    let text = (cfg.format == LoggerFormat::Text).then(|| {
        fmt::layer()
            .with_ansi(cfg.use_color)
            .with_target(cfg.with_targets)
            .with_timer(timer.clone())
    });
    let json = (cfg.format == LoggerFormat::Json).then(|| {
        fmt::layer()
            .json()
            .with_ansi(false)
            .with_target(cfg.with_targets)
            .with_timer(timer.clone())
    });
    let journald = journald_layer(cfg.format)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(text)
        .with(json)
        .with(journald)
        .try_init()
        .map_err(classify)
}

/// RFC 3339 timestamps in the host's local offset, UTC when it cannot be determined.
fn local_timer() -> OffsetTime<Rfc3339> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    OffsetTime::new(offset, Rfc3339)
}

fn classify(err: impl std::fmt::Display) -> LoggerError {
    let msg = err.to_string();
    if msg.contains("global default") {
        LoggerError::AlreadyInstalled
    } else {
        LoggerError::Install(msg)
    }
}

#[cfg(all(target_os = "linux", feature = "journald"))]
fn journald_layer(format: LoggerFormat) -> Result<Option<tracing_journald::Layer>, LoggerError> {
    if format != LoggerFormat::Journald {
        return Ok(None);
    }
    tracing_journald::layer()
        .map(Some)
        .map_err(|e| LoggerError::Install(format!("journald: {e}")))
}

#[cfg(not(all(target_os = "linux", feature = "journald")))]
fn journald_layer(
    format: LoggerFormat,
) -> Result<Option<tracing_subscriber::layer::Identity>, LoggerError> {
    match format {
        LoggerFormat::Journald => Err(LoggerError::JournaldUnavailable),
        _ => Ok(None),
    }
}

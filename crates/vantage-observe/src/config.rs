use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::{error::LoggerError, format::LoggerFormat};

/// Target of the probe and orchestrator events.
const DISCOVERY_TARGET: &str = "vantage_discover";

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    /// Base `EnvFilter` directive, e.g. `info` or `vantage_api=debug,info`.
    pub level: String,
    /// Separate level for per-probe outcomes, which are logged at `debug`.
    pub probe_level: Option<String>,
    pub with_targets: bool,
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::Text,
            level: "info".to_string(),
            probe_level: None,
            with_targets: true,
            use_color: cfg!(test) || std::io::stdout().is_terminal(),
        }
    }
}

impl LoggerConfig {
    /// Full filter directive string.
    pub fn directives(&self) -> String {
        match &self.probe_level {
            Some(level) => format!("{},{DISCOVERY_TARGET}={level}", self.level),
            None => self.level.clone(),
        }
    }

    pub(crate) fn env_filter(&self) -> Result<EnvFilter, LoggerError> {
        let directives = self.directives();
        EnvFilter::try_new(&directives).map_err(|e| LoggerError::BadDirective {
            directive: directives,
            reason: e.to_string(),
        })
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("unknown log format {0:?} (expected text, json or journald)")]
    UnknownFormat(String),

    #[error("journald output is unavailable in this build")]
    JournaldUnavailable,

    #[error("a global logger is already installed")]
    AlreadyInstalled,

    #[error("invalid filter directive {directive:?}: {reason}")]
    BadDirective { directive: String, reason: String },

    #[error("failed to install logger: {0}")]
    Install(String),
}

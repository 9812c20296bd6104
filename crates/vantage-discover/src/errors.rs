use thiserror::Error;
use vantage_core::CoreError;
use vantage_exec::ExecError;

/// Why a protocol probe produced no check.
///
/// Absorbed by the orchestrator; never reaches the caller of `discover`.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("host unreachable: {0}")]
    Unreachable(#[from] ExecError),

    #[error("HTTP redirects to HTTPS")]
    RedirectsToHttps,

    #[error("http request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    #[error("invalid probe target: {0}")]
    InvalidTarget(String),

    #[error("name server lookup failed: {0}")]
    Lookup(String),
}

#[derive(Error, Debug)]
pub enum DiscoverError {
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[source] CoreError),

    #[error("failed to set up probe {probe}: {reason}")]
    Setup { probe: &'static str, reason: String },
}

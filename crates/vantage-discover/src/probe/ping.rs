use std::time::Duration;

use async_trait::async_trait;
use tracing::trace;
use vantage_exec::{ProcConfig, run_to_exit};
use vantage_model::{Check, CheckSettings, EndpointDescriptor, PingSettings};

use super::{CHECK_TIMEOUT_SECS, Probe};
use crate::{config::DiscoverConfig, errors::ProbeError};

const FREQUENCY_SECS: u32 = 60;

/// Network-layer echo through the system `ping` utility.
///
/// `ping` exits with status 0 when at least one echo was answered.
#[derive(Debug, Clone)]
pub struct ReachabilityProbe {
    program: String,
    count: u32,
    wait: Duration,
    deadline: Duration,
}

impl ReachabilityProbe {
    pub fn new(cfg: &DiscoverConfig) -> Self {
        Self {
            program: cfg.ping_program.clone(),
            count: cfg.ping_count,
            wait: cfg.ping_wait,
            deadline: cfg.ping_deadline,
        }
    }

    fn command(&self, host: &str) -> ProcConfig {
        let wait_secs = self.wait.as_secs().max(1);
        ProcConfig::new(self.program.clone())
            .with_args([
                "-c".to_string(),
                self.count.to_string(),
                "-W".to_string(),
                wait_secs.to_string(),
                "-q".to_string(),
                host.to_string(),
            ])
            .with_deadline(self.deadline)
    }
}

#[async_trait]
impl Probe for ReachabilityProbe {
    fn name(&self) -> &'static str {
        "ping"
    }

    async fn probe(&self, endpoint: &EndpointDescriptor) -> Result<Check, ProbeError> {
        let host = endpoint.host.as_str();
        // A leading dash would be parsed as an option by ping.
        if host.is_empty() || host.starts_with('-') {
            return Err(ProbeError::InvalidTarget(host.to_string()));
        }

        run_to_exit(&self.command(host)).await?;
        trace!(%host, "echo answered");

        let settings = CheckSettings::Ping(PingSettings {
            hostname: host.to_string(),
            timeout: CHECK_TIMEOUT_SECS,
        });
        Ok(Check::new(settings, FREQUENCY_SECS, true))
    }
}

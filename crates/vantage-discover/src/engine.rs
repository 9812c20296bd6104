use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, instrument, warn};
use vantage_core::{DefaultProbeSet, Normalizer, PassthroughNormalizer};
use vantage_model::{Check, CheckHealthSettings, EndpointDto};

use crate::{
    config::DiscoverConfig,
    errors::DiscoverError,
    fallback,
    probe::{DnsProbe, HickoryLookup, HttpProbe, Probe, ReachabilityProbe},
};

/// Discovery orchestrator.
///
/// Runs every applicable probe concurrently, waits for all of them, and keeps
/// the checks of those that succeeded. Probe failures are never surfaced.
pub struct Discovery {
    normalizer: Arc<dyn Normalizer>,
    probes: Vec<Arc<dyn Probe>>,
    defaults: DefaultProbeSet,
}

impl Discovery {
    /// Reachability, HTTP, HTTPS and DNS-authority probes over pass-through normalization.
    pub fn new(cfg: &DiscoverConfig, defaults: DefaultProbeSet) -> Result<Self, DiscoverError> {
        let probes: Vec<Arc<dyn Probe>> = vec![
            Arc::new(ReachabilityProbe::new(cfg)),
            Arc::new(HttpProbe::plain(cfg)?),
            Arc::new(HttpProbe::secure(cfg)?),
            Arc::new(DnsProbe::new(
                Arc::new(HickoryLookup::new(cfg.dns_timeout)?),
                cfg.dns_fallback_server.clone(),
            )),
        ];
        Ok(Self::with_probes(
            Arc::new(PassthroughNormalizer),
            probes,
            defaults,
        ))
    }

    pub fn with_probes(
        normalizer: Arc<dyn Normalizer>,
        probes: Vec<Arc<dyn Probe>>,
        defaults: DefaultProbeSet,
    ) -> Self {
        Self {
            normalizer,
            probes,
            defaults,
        }
    }

    #[inline]
    pub fn defaults(&self) -> &DefaultProbeSet {
        &self.defaults
    }

    /// Probe `hostname` over every protocol and propose the viable checks.
    ///
    /// Checks come back in the order their probes finished. An endpoint that
    /// answers on no protocol is a success with zero checks.
    #[instrument(level = "debug", skip(self))]
    pub async fn discover(&self, hostname: &str) -> Result<EndpointDto, DiscoverError> {
        let endpoint = self.normalizer.normalize(hostname).map_err(|e| {
            warn!(%hostname, error = %e, "failed to parse endpoint name");
            DiscoverError::InvalidEndpoint(e)
        })?;
        let endpoint = Arc::new(endpoint);

        let mut tasks = JoinSet::new();
        for probe in self.probes.iter().filter(|p| p.supports(&endpoint)) {
            let probe = Arc::clone(probe);
            let endpoint = Arc::clone(&endpoint);
            tasks.spawn(async move {
                let outcome = probe.probe(&endpoint).await;
                (probe.name(), outcome)
            });
        }

        let mut checks = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((probe, Ok(check))) => {
                    debug!(probe, host = %endpoint.host, "discovered");
                    checks.push(self.stamp(check));
                }
                Ok((probe, Err(e))) => {
                    debug!(probe, host = %endpoint.host, reason = %e, "probe omitted");
                }
                Err(e) => warn!(host = %endpoint.host, error = %e, "probe task aborted"),
            }
        }

        Ok(EndpointDto::new(endpoint.host.clone(), checks))
    }

    /// Static templates for `hostname`, routed to the default probe set.
    pub fn generate_defaults(&self, hostname: &str) -> EndpointDto {
        fallback::generate_routed_defaults(hostname, &self.defaults)
    }

    fn stamp(&self, check: Check) -> Check {
        check
            .with_health(CheckHealthSettings::immediate())
            .with_route(self.defaults.route())
    }
}

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use hickory_resolver::TokioResolver;
use tracing::{debug, trace};
use vantage_model::{Check, CheckSettings, DnsSettings, EndpointDescriptor};

use super::{CHECK_TIMEOUT_SECS, Probe};
use crate::errors::{DiscoverError, ProbeError};

const FREQUENCY_SECS: u32 = 120;

/// Source of NS records.
#[async_trait]
pub trait NsLookup: Send + Sync + 'static {
    /// Name servers for exactly `domain`, as host names.
    async fn lookup_ns(&self, domain: &str) -> Result<Vec<String>, ProbeError>;
}

/// [`NsLookup`] backed by an asynchronous hickory resolver.
pub struct HickoryLookup {
    resolver: TokioResolver,
}

impl HickoryLookup {
    /// System resolver (`/etc/resolv.conf` on Unix) with a single attempt of at
    /// most `timeout` per query.
    pub fn new(timeout: Duration) -> Result<Self, DiscoverError> {
        let mut builder = TokioResolver::builder_tokio().map_err(|e| DiscoverError::Setup {
            probe: "dns",
            reason: e.to_string(),
        })?;
        let opts = builder.options_mut();
        opts.timeout = timeout;
        opts.attempts = 1;

        Ok(Self {
            resolver: builder.build(),
        })
    }
}

#[async_trait]
impl NsLookup for HickoryLookup {
    async fn lookup_ns(&self, domain: &str) -> Result<Vec<String>, ProbeError> {
        let lookup = self
            .resolver
            .ns_lookup(domain)
            .await
            .map_err(|e| ProbeError::Lookup(e.to_string()))?;

        Ok(lookup.iter().map(|ns| ns.to_string()).collect())
    }
}

/// Authoritative name servers for `host`, walking up the hierarchy.
///
/// `a.b.example.com` is tried, then `b.example.com`, then `example.com`.
/// The walk stops without a result once the parent would have fewer than two labels.
/// Trailing dots are stripped from the returned names.
pub async fn authoritative_servers(lookup: &dyn NsLookup, host: &str) -> Option<Vec<String>> {
    let mut domain = host.trim_end_matches('.');
    loop {
        match lookup.lookup_ns(domain).await {
            Ok(servers) if !servers.is_empty() => {
                return Some(
                    servers
                        .iter()
                        .map(|s| s.trim_end_matches('.').to_string())
                        .collect(),
                );
            }
            Ok(_) => trace!(%domain, "no name servers"),
            Err(e) => trace!(%domain, error = %e, "name server lookup failed"),
        }

        let (_, parent) = domain.split_once('.')?;
        if parent.split('.').count() < 2 {
            return None;
        }
        domain = parent;
    }
}

/// Authoritative DNS check for the endpoint.
///
/// Always yields an enabled check: when no name servers are found the fallback
/// server is kept. IP literals are not supported.
pub struct DnsProbe {
    lookup: Arc<dyn NsLookup>,
    fallback_server: String,
}

impl DnsProbe {
    pub fn new(lookup: Arc<dyn NsLookup>, fallback_server: impl Into<String>) -> Self {
        Self {
            lookup,
            fallback_server: fallback_server.into(),
        }
    }
}

#[async_trait]
impl Probe for DnsProbe {
    fn name(&self) -> &'static str {
        "dns"
    }

    fn supports(&self, endpoint: &EndpointDescriptor) -> bool {
        !endpoint.is_ip
    }

    async fn probe(&self, endpoint: &EndpointDescriptor) -> Result<Check, ProbeError> {
        let host = endpoint.host.trim();
        let found = if host.is_empty() {
            None
        } else {
            authoritative_servers(self.lookup.as_ref(), host).await
        };
        let server = match found {
            Some(servers) => servers.join(","),
            None => {
                debug!(host = %endpoint.host, fallback = %self.fallback_server, "no authoritative servers");
                self.fallback_server.clone()
            }
        };

        let settings = CheckSettings::Dns(DnsSettings {
            name: endpoint.host.clone(),
            record_type: "A".to_string(),
            port: 53,
            server,
            timeout: CHECK_TIMEOUT_SECS,
            protocol: "udp".to_string(),
        });
        Ok(Check::new(settings, FREQUENCY_SECS, true))
    }
}

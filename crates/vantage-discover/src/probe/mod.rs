//! Live protocol probes.
//!
//! Each probe looks at the endpoint over one protocol and either proposes a
//! [`Check`] or explains, through [`ProbeError`], why it has nothing to offer.
//! Probes never retry.
use async_trait::async_trait;
use vantage_model::{Check, EndpointDescriptor};

use crate::errors::ProbeError;

mod ping;
pub use ping::ReachabilityProbe;

mod http;
pub use http::{HttpProbe, HttpScheme};

mod dns;
pub use dns::{DnsProbe, HickoryLookup, NsLookup, authoritative_servers};

/// Header block written into discovered http/https checks.
pub const DISCOVERED_HEADERS: &str = "User-Agent: vantage\nAccept-Encoding: gzip\n";

/// Timeout, in seconds, written into discovered checks.
pub const CHECK_TIMEOUT_SECS: u32 = 5;

#[async_trait]
pub trait Probe: Send + Sync + 'static {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Whether the probe is meaningful for this endpoint at all.
    fn supports(&self, _endpoint: &EndpointDescriptor) -> bool {
        true
    }

    async fn probe(&self, endpoint: &EndpointDescriptor) -> Result<Check, ProbeError>;
}

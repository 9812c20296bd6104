//! Turning raw user input into an [`EndpointDescriptor`].
//!
//! Discovery only ever sees the descriptor, so swapping the [`Normalizer`]
//! changes how hosts are interpreted without touching any probe.
//!
//! - [`PassthroughNormalizer`] is the active behaviour: the input is carried verbatim.
//! - [`UrlNormalizer`] understands schemes, IP literals and `ip:port` targets.
use std::net::IpAddr;

use tracing::trace;
use url::Url;
use vantage_model::EndpointDescriptor;

use crate::error::CoreError;

pub trait Normalizer: Send + Sync + 'static {
    fn normalize(&self, raw: &str) -> Result<EndpointDescriptor, CoreError>;
}

/// Identity normalization: host is the raw input, no URL or IP detection.
///
/// Never fails. Probes must tolerate hosts that still contain a scheme or a port.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughNormalizer;

impl Normalizer for PassthroughNormalizer {
    fn normalize(&self, raw: &str) -> Result<EndpointDescriptor, CoreError> {
        Ok(EndpointDescriptor::passthrough(raw))
    }
}

/// Scheme, case and IP-literal aware normalization.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlNormalizer;

impl Normalizer for UrlNormalizer {
    fn normalize(&self, raw: &str) -> Result<EndpointDescriptor, CoreError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(CoreError::InvalidEndpoint("empty hostname".into()));
        }

        let (host, url) = if raw.contains("://") {
            let url = Url::parse(raw)
                .map_err(|e| CoreError::InvalidEndpoint(format!("{raw}: {e}")))?;
            let host = url
                .host_str()
                .ok_or_else(|| CoreError::InvalidEndpoint(format!("{raw}: missing host")))?
                .to_string();
            (host, Some(url))
        } else {
            (raw.to_string(), None)
        };
        let host = host.to_ascii_lowercase();

        let is_ip = parse_ip(&host).is_some() || is_ip_port(&host);
        trace!(%host, is_ip, has_url = url.is_some(), "endpoint normalized");

        Ok(EndpointDescriptor { host, is_ip, url })
    }
}

fn parse_ip(host: &str) -> Option<IpAddr> {
    host.trim_start_matches('[')
        .trim_end_matches(']')
        .parse()
        .ok()
}

/// `ip:port` with a numeric port, i.e. an explicit TCP target.
fn is_ip_port(host: &str) -> bool {
    let Some((ip, port)) = host.rsplit_once(':') else {
        return false;
    };
    port.parse::<u16>().is_ok() && parse_ip(ip).is_some()
}

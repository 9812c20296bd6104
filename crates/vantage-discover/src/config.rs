use std::time::Duration;

/// Tuning of the live protocol probes.
#[derive(Debug, Clone)]
pub struct DiscoverConfig {
    /// Whole-request timeout of the HTTP/HTTPS `HEAD` probes.
    pub http_timeout: Duration,
    /// Redirects followed before the HTTP probes give up.
    pub max_redirects: usize,
    /// `User-Agent` sent by the HTTP probes themselves.
    pub user_agent: String,
    /// Echo utility used by the reachability probe.
    pub ping_program: String,
    pub ping_count: u32,
    /// Per-echo reply wait.
    pub ping_wait: Duration,
    /// Hard deadline for the whole echo run.
    pub ping_deadline: Duration,
    /// Per-hop timeout of the name server lookups.
    pub dns_timeout: Duration,
    /// Server left in the dns check when no authoritative servers are found.
    pub dns_fallback_server: String,
}

impl Default for DiscoverConfig {
    fn default() -> Self {
        Self {
            http_timeout: Duration::from_secs(5),
            max_redirects: 10,
            user_agent: concat!("vantage-discover/", env!("CARGO_PKG_VERSION")).to_string(),
            ping_program: "ping".to_string(),
            ping_count: 3,
            ping_wait: Duration::from_secs(1),
            ping_deadline: Duration::from_secs(5),
            dns_timeout: Duration::from_secs(5),
            dns_fallback_server: "8.8.8.8".to_string(),
        }
    }
}

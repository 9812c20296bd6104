use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::{Context, Result};
use vantage_core::{DEFAULT_PROBE_NAMES, DEFAULT_PROBE_SCOPE};
use vantage_discover::DiscoverConfig;
use vantage_model::OrgId;
use vantage_observe::{LoggerConfig, LoggerFormat};

pub const ENV_LISTEN: &str = "VANTAGE_LISTEN";
pub const ENV_LOG_LEVEL: &str = "VANTAGE_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "VANTAGE_LOG_FORMAT";
pub const ENV_PROBE_LOG_LEVEL: &str = "VANTAGE_PROBE_LOG_LEVEL";
pub const ENV_PROBES: &str = "VANTAGE_DEFAULT_PROBES";
pub const ENV_PROBE_SCOPE: &str = "VANTAGE_PROBE_SCOPE";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "VANTAGE_HTTP_TIMEOUT_SECS";
pub const ENV_DNS_FALLBACK: &str = "VANTAGE_DNS_FALLBACK";

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub listen: SocketAddr,
    pub logger: LoggerConfig,
    /// Probe agents every discovered check is routed to.
    pub probe_names: Vec<String>,
    pub probe_scope: OrgId,
    pub discover: DiscoverConfig,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([0, 0, 0, 0], 8080)),
            logger: LoggerConfig::default(),
            probe_names: DEFAULT_PROBE_NAMES.iter().map(|n| n.to_string()).collect(),
            probe_scope: DEFAULT_PROBE_SCOPE,
            discover: DiscoverConfig::default(),
        }
    }
}

impl DaemonConfig {
    /// Defaults overridden by `VANTAGE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = lookup(ENV_LISTEN) {
            cfg.listen = parse(ENV_LISTEN, &v)?;
        }
        if let Some(v) = lookup(ENV_LOG_LEVEL) {
            cfg.logger.level = v;
        }
        if let Some(v) = lookup(ENV_LOG_FORMAT) {
            cfg.logger.format =
                LoggerFormat::from_str(&v).with_context(|| format!("{ENV_LOG_FORMAT}={v}"))?;
        }
        if let Some(v) = lookup(ENV_PROBE_LOG_LEVEL) {
            cfg.logger.probe_level = Some(v);
        }
        if let Some(v) = lookup(ENV_PROBES) {
            cfg.probe_names = v
                .split(',')
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(v) = lookup(ENV_PROBE_SCOPE) {
            cfg.probe_scope = OrgId(parse(ENV_PROBE_SCOPE, &v)?);
        }
        if let Some(v) = lookup(ENV_HTTP_TIMEOUT_SECS) {
            cfg.discover.http_timeout = Duration::from_secs(parse(ENV_HTTP_TIMEOUT_SECS, &v)?);
        }
        if let Some(v) = lookup(ENV_DNS_FALLBACK) {
            cfg.discover.dns_fallback_server = v;
        }

        Ok(cfg)
    }
}

fn parse<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("invalid {key}: {raw:?}"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let cfg = DaemonConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.listen.port(), 8080);
        assert_eq!(cfg.probe_names.len(), DEFAULT_PROBE_NAMES.len());
        assert_eq!(cfg.probe_scope, DEFAULT_PROBE_SCOPE);
    }

    #[test]
    fn environment_overrides() {
        let cfg = DaemonConfig::from_lookup(lookup(&[
            (ENV_LISTEN, "127.0.0.1:9000"),
            (ENV_LOG_FORMAT, "json"),
            (ENV_PROBE_LOG_LEVEL, "debug"),
            (ENV_PROBES, "FPT, VIETTEL,,"),
            (ENV_PROBE_SCOPE, "7"),
            (ENV_HTTP_TIMEOUT_SECS, "2"),
        ]))
        .unwrap();

        assert_eq!(cfg.listen, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(cfg.logger.format, LoggerFormat::Json);
        assert_eq!(cfg.logger.directives(), "info,vantage_discover=debug");
        assert_eq!(cfg.probe_names, vec!["FPT", "VIETTEL"]);
        assert_eq!(cfg.probe_scope, OrgId(7));
        assert_eq!(cfg.discover.http_timeout, Duration::from_secs(2));
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(DaemonConfig::from_lookup(lookup(&[(ENV_LISTEN, "nowhere")])).is_err());
        assert!(DaemonConfig::from_lookup(lookup(&[(ENV_PROBE_SCOPE, "one")])).is_err());
        assert!(DaemonConfig::from_lookup(lookup(&[(ENV_LOG_FORMAT, "xml")])).is_err());
    }
}

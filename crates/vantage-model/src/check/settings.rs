use serde::{Deserialize, Serialize};

use super::CheckType;
use crate::TimeoutSecs;

/// Protocol-specific settings, keyed by check type.
///
/// Serialized adjacently tagged: `{"type": "<kind>", "settings": {...}}`.
/// Field names follow the probe agents' wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "settings", rename_all = "lowercase")]
pub enum CheckSettings {
    Http(HttpSettings),
    Https(HttpSettings),
    Static(ContentSettings),
    Clink(ContentSettings),
    CdnIntegrity(CdnIntegritySettings),
    Dns(DnsSettings),
    Ping(PingSettings),
    Tcp(TcpSettings),
}

impl CheckSettings {
    pub fn check_type(&self) -> CheckType {
        match self {
            CheckSettings::Http(_) => CheckType::Http,
            CheckSettings::Https(_) => CheckType::Https,
            CheckSettings::Static(_) => CheckType::Static,
            CheckSettings::Clink(_) => CheckType::Clink,
            CheckSettings::CdnIntegrity(_) => CheckType::CdnIntegrity,
            CheckSettings::Dns(_) => CheckType::Dns,
            CheckSettings::Ping(_) => CheckType::Ping,
            CheckSettings::Tcp(_) => CheckType::Tcp,
        }
    }
}

/// Settings shared by `http` and `https` checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpSettings {
    pub host: String,
    pub port: u16,
    pub path: String,
    pub method: String,
    /// Newline-separated `Name: value` request headers.
    pub headers: String,
    pub timeout: TimeoutSecs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub getall: Option<bool>,
    /// Only meaningful for `https`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate_cert: Option<bool>,
}

/// Settings for `static` and `clink` checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSettings {
    pub host: String,
    pub method: String,
    pub headers: String,
    pub timeout: TimeoutSecs,
    /// Number of resources fetched per run.
    pub total: u32,
    pub getall: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CdnIntegritySettings {
    pub host: String,
    pub headers: String,
    pub numfile: u32,
    /// Bytes read per file.
    pub chunksize: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsSettings {
    /// Record name to resolve.
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub port: u16,
    /// Comma-separated list of name servers to query.
    pub server: String,
    pub timeout: TimeoutSecs,
    pub protocol: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingSettings {
    pub hostname: String,
    pub timeout: TimeoutSecs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TcpSettings {
    pub host: String,
}

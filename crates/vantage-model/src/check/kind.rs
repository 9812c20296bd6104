use std::fmt;

use serde::{Deserialize, Serialize};

/// Protocol of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckType {
    Http,
    Https,
    /// Static content fetch.
    Static,
    /// Link crawl.
    Clink,
    /// CDN file integrity.
    CdnIntegrity,
    Dns,
    Ping,
    Tcp,
}

impl CheckType {
    /// Wire name of the check type.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckType::Http => "http",
            CheckType::Https => "https",
            CheckType::Static => "static",
            CheckType::Clink => "clink",
            CheckType::CdnIntegrity => "cdnintegrity",
            CheckType::Dns => "dns",
            CheckType::Ping => "ping",
            CheckType::Tcp => "tcp",
        }
    }
}

impl fmt::Display for CheckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

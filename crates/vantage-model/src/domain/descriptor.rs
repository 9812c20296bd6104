use url::Url;

/// Canonical form of a raw hostname handed to discovery.
///
/// Built once per request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDescriptor {
    /// Host as probes should address it.
    pub host: String,
    /// The host is an IP literal; DNS-dependent probes are skipped.
    pub is_ip: bool,
    /// Parsed URL when the raw input carried a scheme.
    pub url: Option<Url>,
}

impl EndpointDescriptor {
    /// Descriptor that carries the raw input verbatim, without URL or IP detection.
    pub fn passthrough(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            is_ip: false,
            url: None,
        }
    }

    /// Path to request, falling back to `/` when no URL was parsed.
    pub fn path(&self) -> &str {
        match &self.url {
            Some(url) if !url.path().is_empty() => url.path(),
            _ => "/",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passthrough_keeps_input() {
        let d = EndpointDescriptor::passthrough("Example.COM:8080");
        assert_eq!(d.host, "Example.COM:8080");
        assert!(!d.is_ip);
        assert!(d.url.is_none());
        assert_eq!(d.path(), "/");
    }

    #[test]
    fn path_comes_from_url() {
        let d = EndpointDescriptor {
            host: "example.com".into(),
            is_ip: false,
            url: Some(Url::parse("https://example.com/status").unwrap()),
        };
        assert_eq!(d.path(), "/status");
    }
}

use async_trait::async_trait;
use reqwest::{Client, redirect::Policy};
use tracing::trace;
use url::Url;
use vantage_model::{Check, CheckSettings, EndpointDescriptor, HttpSettings};

use super::{CHECK_TIMEOUT_SECS, DISCOVERED_HEADERS, Probe};
use crate::{
    config::DiscoverConfig,
    errors::{DiscoverError, ProbeError},
};

const FREQUENCY_SECS: u32 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpScheme {
    Http,
    Https,
}

impl HttpScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpScheme::Http => "http",
            HttpScheme::Https => "https",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            HttpScheme::Http => 80,
            HttpScheme::Https => 443,
        }
    }
}

/// `HEAD` request against the endpoint, following redirects.
///
/// The check describes where the redirect chain ended. For plain HTTP a chain
/// that leaves the `http` scheme is rejected: such a site is not meaningfully
/// checkable over plaintext.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    scheme: HttpScheme,
    client: Client,
}

impl HttpProbe {
    pub fn new(scheme: HttpScheme, cfg: &DiscoverConfig) -> Result<Self, DiscoverError> {
        // Probe from this host directly, never through an environment proxy.
        let client = Client::builder()
            .timeout(cfg.http_timeout)
            .redirect(Policy::limited(cfg.max_redirects))
            .user_agent(cfg.user_agent.clone())
            .no_proxy()
            .build()
            .map_err(|e| DiscoverError::Setup {
                probe: scheme.as_str(),
                reason: e.to_string(),
            })?;
        Ok(Self::with_client(scheme, client))
    }

    pub fn plain(cfg: &DiscoverConfig) -> Result<Self, DiscoverError> {
        Self::new(HttpScheme::Http, cfg)
    }

    pub fn secure(cfg: &DiscoverConfig) -> Result<Self, DiscoverError> {
        Self::new(HttpScheme::Https, cfg)
    }

    pub fn with_client(scheme: HttpScheme, client: Client) -> Self {
        Self { scheme, client }
    }

    /// First URL of the chain.
    ///
    /// A parsed URL overrides the host only when its scheme matches ours; its path always applies.
    fn target(&self, endpoint: &EndpointDescriptor) -> Result<Url, ProbeError> {
        let host = match &endpoint.url {
            Some(url) if url.scheme() == self.scheme.as_str() => authority(url),
            _ => endpoint.host.clone(),
        };
        let raw = format!("{}://{}{}", self.scheme.as_str(), host, endpoint.path());
        Url::parse(&raw).map_err(|e| ProbeError::InvalidTarget(format!("{raw}: {e}")))
    }
}

#[async_trait]
impl Probe for HttpProbe {
    fn name(&self) -> &'static str {
        self.scheme.as_str()
    }

    async fn probe(&self, endpoint: &EndpointDescriptor) -> Result<Check, ProbeError> {
        let target = self.target(endpoint)?;
        trace!(%target, "sending HEAD");

        let response = self.client.head(target).send().await?;
        trace!(landed = %response.url(), status = %response.status(), "HEAD answered");
        self.landed_check(response.url())
    }
}

impl HttpProbe {
    /// Check describing the URL the redirect chain ended on.
    fn landed_check(&self, landed: &Url) -> Result<Check, ProbeError> {
        if self.scheme == HttpScheme::Http && landed.scheme() != "http" {
            return Err(ProbeError::RedirectsToHttps);
        }

        let host = landed
            .host_str()
            .ok_or_else(|| ProbeError::InvalidTarget(format!("{landed}: missing host")))?
            .to_string();
        let port = landed.port().unwrap_or(self.scheme.default_port());

        let settings = HttpSettings {
            host,
            port,
            path: landed.path().to_string(),
            method: "GET".to_string(),
            headers: DISCOVERED_HEADERS.to_string(),
            timeout: CHECK_TIMEOUT_SECS,
            getall: None,
            validate_cert: (self.scheme == HttpScheme::Https).then_some(true),
        };
        let settings = match self.scheme {
            HttpScheme::Http => CheckSettings::Http(settings),
            HttpScheme::Https => CheckSettings::Https(settings),
        };
        Ok(Check::new(settings, FREQUENCY_SECS, true))
    }
}

fn authority(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_model::CheckType;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    fn http_probe() -> HttpProbe {
        HttpProbe::plain(&DiscoverConfig::default()).unwrap()
    }

    fn settings(check: &Check) -> &HttpSettings {
        match &check.settings {
            CheckSettings::Http(s) | CheckSettings::Https(s) => s,
            other => panic!("not an http check: {other:?}"),
        }
    }

    fn descriptor_for(server: &MockServer) -> EndpointDescriptor {
        EndpointDescriptor::passthrough(server.address().to_string())
    }

    #[tokio::test]
    async fn answering_server_yields_http_check() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let check = http_probe().probe(&descriptor_for(&server)).await.unwrap();
        let s = settings(&check);

        assert_eq!(check.check_type(), CheckType::Http);
        assert_eq!(check.frequency, 120);
        assert!(check.enabled);
        assert_eq!(s.host, server.address().ip().to_string());
        assert_eq!(s.port, server.address().port());
        assert_eq!(s.path, "/");
        assert_eq!(s.method, "GET");
        assert_eq!(s.headers, DISCOVERED_HEADERS);
        assert_eq!(s.timeout, 5);
        assert_eq!(s.validate_cert, None);
    }

    #[tokio::test]
    async fn error_status_still_counts_as_an_answer() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        assert!(http_probe().probe(&descriptor_for(&server)).await.is_ok());
    }

    #[tokio::test]
    async fn follows_redirects_and_records_final_path() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(301)
                    .insert_header("Location", format!("{}/landing", server.uri())),
            )
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .and(path("/landing"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let check = http_probe().probe(&descriptor_for(&server)).await.unwrap();
        assert_eq!(settings(&check).path, "/landing");
    }

    #[test]
    fn landing_on_https_drops_the_http_check() {
        let landed = Url::parse("https://example.com/").unwrap();
        let err = http_probe().landed_check(&landed).unwrap_err();
        assert!(matches!(err, ProbeError::RedirectsToHttps));
    }

    #[test]
    fn landing_on_http_keeps_default_port() {
        let landed = Url::parse("http://www.example.com/home").unwrap();
        let check = http_probe().landed_check(&landed).unwrap();
        let s = settings(&check);

        assert_eq!(check.check_type(), CheckType::Http);
        assert_eq!(s.host, "www.example.com");
        assert_eq!(s.port, 80);
        assert_eq!(s.path, "/home");
        assert_eq!(s.validate_cert, None);
    }

    #[test]
    fn secure_landing_records_port_and_validates_cert() {
        let secure = HttpProbe::secure(&DiscoverConfig::default()).unwrap();

        let landed = Url::parse("https://example.com:8443/x").unwrap();
        let check = secure.landed_check(&landed).unwrap();
        let s = settings(&check);
        assert_eq!(check.check_type(), CheckType::Https);
        assert_eq!(check.frequency, 120);
        assert!(check.enabled);
        assert_eq!(s.host, "example.com");
        assert_eq!(s.port, 8443);
        assert_eq!(s.path, "/x");
        assert_eq!(s.validate_cert, Some(true));

        let check = secure
            .landed_check(&Url::parse("https://example.com/").unwrap())
            .unwrap();
        assert_eq!(settings(&check).port, 443);
    }

    #[tokio::test]
    async fn connection_refused_is_an_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = http_probe()
            .probe(&EndpointDescriptor::passthrough(addr.to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, ProbeError::HttpRequest(_)));
    }

    #[test]
    fn parsed_url_overrides_host_only_for_matching_scheme() {
        let endpoint = EndpointDescriptor {
            host: "example.com".into(),
            is_ip: false,
            url: Some(Url::parse("http://www.example.com:8080/health").unwrap()),
        };

        let plain = http_probe().target(&endpoint).unwrap();
        assert_eq!(plain.as_str(), "http://www.example.com:8080/health");

        let secure = HttpProbe::secure(&DiscoverConfig::default())
            .unwrap()
            .target(&endpoint)
            .unwrap();
        assert_eq!(secure.as_str(), "https://example.com/health");
    }

    #[test]
    fn unparseable_host_is_invalid_target() {
        let err = http_probe()
            .target(&EndpointDescriptor::passthrough("exa mple.com"))
            .unwrap_err();
        assert!(matches!(err, ProbeError::InvalidTarget(_)));
    }

    #[test]
    fn https_defaults() {
        assert_eq!(HttpScheme::Https.default_port(), 443);
        assert_eq!(HttpScheme::Http.default_port(), 80);
    }
}

//! Check templates produced without any network access.
//!
//! Two shapes exist. [`generate_defaults`] is the bare set returned by the API
//! when it proposes checks for a new endpoint: no routing, static content off.
//! [`generate_routed_defaults`] adds a tcp template, turns static content on and
//! routes everything to the default probe set.
use vantage_core::DefaultProbeSet;
use vantage_model::{
    CdnIntegritySettings, Check, CheckHealthSettings, CheckSettings, ContentSettings, DnsSettings,
    EndpointDescriptor, EndpointDto, HttpSettings, PingSettings, TcpSettings,
};

/// Header block written into template checks.
pub const TEMPLATE_HEADERS: &str = "User-Agent: Mozilla/5.0\nAccept-Encoding: gzip\n";

const TIMEOUT_SECS: u32 = 5;
const CONTENT_TOTAL: u32 = 5;
const CDN_NUM_FILES: u32 = 5;
const CDN_CHUNK_SIZE: u64 = 3 * 1024 * 1024;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Variant {
    Bare,
    Routed,
}

/// Seven templates: http and https enabled; static, clink, cdnintegrity, dns, ping disabled.
pub fn generate_defaults(hostname: &str) -> EndpointDto {
    let endpoint = EndpointDescriptor::passthrough(hostname);
    EndpointDto::new(hostname, templates(&endpoint, Variant::Bare))
}

/// Eight templates, each routed to `defaults` with immediate health settings.
///
/// http, https and static are enabled; clink, tcp, cdnintegrity, dns and ping are not.
pub fn generate_routed_defaults(hostname: &str, defaults: &DefaultProbeSet) -> EndpointDto {
    let endpoint = EndpointDescriptor::passthrough(hostname);
    let checks = templates(&endpoint, Variant::Routed)
        .into_iter()
        .map(|check| {
            check
                .with_route(defaults.route())
                .with_health(CheckHealthSettings::immediate())
        })
        .collect();
    EndpointDto::new(hostname, checks)
}

fn templates(endpoint: &EndpointDescriptor, variant: Variant) -> Vec<Check> {
    let host = endpoint.host.clone();
    let path = endpoint.path().to_string();

    let web = |port: u16| HttpSettings {
        host: host.clone(),
        port,
        path: path.clone(),
        method: "GET".to_string(),
        headers: TEMPLATE_HEADERS.to_string(),
        timeout: TIMEOUT_SECS,
        getall: Some(true),
        validate_cert: None,
    };
    let content = || ContentSettings {
        host: host.clone(),
        method: "GET".to_string(),
        headers: TEMPLATE_HEADERS.to_string(),
        timeout: TIMEOUT_SECS,
        total: CONTENT_TOTAL,
        getall: true,
    };

    let mut checks = vec![
        Check::new(CheckSettings::Http(web(80)), 60, true),
        Check::new(CheckSettings::Https(web(443)), 60, true),
        Check::new(
            CheckSettings::Static(content()),
            60,
            variant == Variant::Routed,
        ),
        Check::new(CheckSettings::Clink(content()), 1800, false),
    ];
    if variant == Variant::Routed {
        checks.push(Check::new(
            CheckSettings::Tcp(TcpSettings { host: host.clone() }),
            1800,
            false,
        ));
    }
    checks.extend([
        Check::new(
            CheckSettings::CdnIntegrity(CdnIntegritySettings {
                host: host.clone(),
                headers: TEMPLATE_HEADERS.to_string(),
                numfile: CDN_NUM_FILES,
                chunksize: CDN_CHUNK_SIZE,
            }),
            1800,
            false,
        ),
        // Left for the user to fill in.
        Check::new(
            CheckSettings::Dns(DnsSettings {
                name: String::new(),
                record_type: String::new(),
                port: 53,
                server: String::new(),
                timeout: TIMEOUT_SECS,
                protocol: "udp".to_string(),
            }),
            60,
            false,
        ),
        Check::new(
            CheckSettings::Ping(PingSettings {
                hostname: host.clone(),
                timeout: TIMEOUT_SECS,
            }),
            10,
            false,
        ),
    ]);
    checks
}

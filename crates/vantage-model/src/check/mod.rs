mod kind;
pub use kind::CheckType;

mod settings;
pub use settings::{
    CdnIntegritySettings, CheckSettings, ContentSettings, DnsSettings, HttpSettings, PingSettings,
    TcpSettings,
};

mod route;
pub use route::CheckRoute;

mod health;
pub use health::CheckHealthSettings;

use serde::{Deserialize, Serialize};

use crate::{CheckId, FrequencySecs};

/// One protocol-specific monitoring configuration attached to an endpoint.
///
/// On the wire the settings union contributes the sibling `"type"` and `"settings"` keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Check {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CheckId>,
    #[serde(flatten)]
    pub settings: CheckSettings,
    /// Seconds between two executions.
    pub frequency: FrequencySecs,
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<CheckRoute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_settings: Option<CheckHealthSettings>,
}

impl Check {
    /// Unsaved check without route or health settings.
    pub fn new(settings: CheckSettings, frequency: FrequencySecs, enabled: bool) -> Self {
        Self {
            id: None,
            settings,
            frequency,
            enabled,
            route: None,
            health_settings: None,
        }
    }

    pub fn with_route(mut self, route: CheckRoute) -> Self {
        self.route = Some(route);
        self
    }

    pub fn with_health(mut self, health: CheckHealthSettings) -> Self {
        self.health_settings = Some(health);
        self
    }

    #[inline]
    pub fn check_type(&self) -> CheckType {
        self.settings.check_type()
    }
}

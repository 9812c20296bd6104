use serde::{Deserialize, Serialize};

/// Alerting thresholds of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckHealthSettings {
    /// Minimum number of probes that must agree on a failure.
    pub num_probes: u32,
    /// Consecutive failing steps before an alert fires.
    pub steps: u32,
}

impl CheckHealthSettings {
    /// Alert on the first failure seen by a single probe.
    pub const fn immediate() -> Self {
        Self {
            num_probes: 1,
            steps: 1,
        }
    }
}

impl Default for CheckHealthSettings {
    fn default() -> Self {
        Self::immediate()
    }
}

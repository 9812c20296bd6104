use serde::{Deserialize, Serialize};

use crate::ProbeId;

/// Rule selecting which probe agents execute a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "config")]
pub enum CheckRoute {
    /// Explicit, ordered list of probe agents.
    #[serde(rename = "byIds")]
    ByIds { ids: Vec<ProbeId> },
}

impl CheckRoute {
    pub fn by_ids(ids: impl Into<Vec<ProbeId>>) -> Self {
        CheckRoute::ByIds { ids: ids.into() }
    }

    /// Probe agents addressed by this route.
    pub fn probe_ids(&self) -> &[ProbeId] {
        match self {
            CheckRoute::ByIds { ids } => ids,
        }
    }
}

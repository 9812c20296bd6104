use serde::{Deserialize, Serialize};

use crate::{Check, EndpointId, OrgId};

/// An endpoint together with its proposed or persisted checks.
///
/// Discovery returns it without `id`/`org_id`; the storage collaborator fills them in on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EndpointId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<OrgId>,
    pub name: String,
    #[serde(default)]
    pub checks: Vec<Check>,
}

impl EndpointDto {
    /// Unsaved endpoint with the given checks.
    pub fn new(name: impl Into<String>, checks: Vec<Check>) -> Self {
        Self {
            id: None,
            org_id: None,
            name: name.into(),
            checks,
        }
    }
}

//! Contracts of the storage collaborator.
//!
//! Persistence lives outside the discovery engine; these traits are the only
//! surface it relies on. [`MemoryStore`] backs tests and single-process deployments.
mod memory;
pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;
use vantage_model::{EndpointDto, EndpointId, EndpointPage, EndpointQuery, OrgId, ProbeId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("probe not found: {0}")]
    ProbeNotFound(String),

    #[error("endpoint not found: {0}")]
    EndpointNotFound(EndpointId),

    #[error("endpoint already exists: {0}")]
    EndpointExists(String),

    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Lookup of probe agents by their registered name.
#[async_trait]
pub trait ProbeStore: Send + Sync + 'static {
    /// Resolve `name` within organisation `scope`.
    ///
    /// Returns [`StoreError::ProbeNotFound`] when no probe carries that name.
    async fn find_probe_by_name(&self, name: &str, scope: OrgId) -> Result<ProbeId, StoreError>;
}

/// Endpoint persistence, always scoped by organisation.
#[async_trait]
pub trait EndpointStore: Send + Sync + 'static {
    /// Persist a new endpoint and its checks; identifiers are assigned here.
    async fn create_endpoint(&self, org: OrgId, endpoint: EndpointDto)
    -> Result<EndpointDto, StoreError>;

    /// Replace an existing endpoint (matched on `endpoint.id`).
    async fn update_endpoint(&self, org: OrgId, endpoint: EndpointDto)
    -> Result<EndpointDto, StoreError>;

    async fn delete_endpoint(&self, org: OrgId, id: EndpointId) -> Result<(), StoreError>;

    async fn list_endpoints(
        &self,
        org: OrgId,
        query: &EndpointQuery,
    ) -> Result<EndpointPage<EndpointDto>, StoreError>;

    async fn get_endpoint(&self, org: OrgId, id: EndpointId) -> Result<EndpointDto, StoreError>;
}

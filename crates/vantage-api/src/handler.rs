use async_trait::async_trait;
use vantage_model::{EndpointDto, EndpointId, EndpointPage, EndpointQuery, OrgId};

use crate::error::ApiError;

/// Endpoint API handler.
///
/// Abstracts the backend so the HTTP layer can sit on [`DiscoveryApiAdapter`]
/// or on a custom implementation with extra policy.
///
/// [`DiscoveryApiAdapter`]: crate::DiscoveryApiAdapter
#[async_trait]
pub trait ApiHandler: Send + Sync + 'static {
    async fn list_endpoints(
        &self,
        org: OrgId,
        query: EndpointQuery,
    ) -> Result<EndpointPage<EndpointDto>, ApiError>;

    async fn get_endpoint(&self, org: OrgId, id: EndpointId) -> Result<EndpointDto, ApiError>;

    async fn add_endpoint(&self, org: OrgId, endpoint: EndpointDto)
    -> Result<EndpointDto, ApiError>;

    async fn update_endpoint(
        &self,
        org: OrgId,
        endpoint: EndpointDto,
    ) -> Result<EndpointDto, ApiError>;

    async fn delete_endpoint(&self, org: OrgId, id: EndpointId) -> Result<(), ApiError>;

    /// Propose checks for `name`.
    ///
    /// `live` runs the protocol probes; otherwise the static templates are returned.
    /// Nothing is persisted.
    async fn discover_endpoint(&self, name: &str, live: bool) -> Result<EndpointDto, ApiError>;
}

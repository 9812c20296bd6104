use std::sync::Arc;

use async_trait::async_trait;
use vantage_core::EndpointStore;
use vantage_discover::{Discovery, generate_defaults};
use vantage_model::{EndpointDto, EndpointId, EndpointPage, EndpointQuery, OrgId};

use crate::{error::ApiError, handler::ApiHandler};

/// Adapter that bridges [`Discovery`] and an [`EndpointStore`] to [`ApiHandler`].
pub struct DiscoveryApiAdapter {
    discovery: Arc<Discovery>,
    store: Arc<dyn EndpointStore>,
}

impl DiscoveryApiAdapter {
    pub fn new(discovery: Arc<Discovery>, store: Arc<dyn EndpointStore>) -> Self {
        Self { discovery, store }
    }
}

#[async_trait]
impl ApiHandler for DiscoveryApiAdapter {
    async fn list_endpoints(
        &self,
        org: OrgId,
        query: EndpointQuery,
    ) -> Result<EndpointPage<EndpointDto>, ApiError> {
        Ok(self.store.list_endpoints(org, &query).await?)
    }

    async fn get_endpoint(&self, org: OrgId, id: EndpointId) -> Result<EndpointDto, ApiError> {
        Ok(self.store.get_endpoint(org, id).await?)
    }

    async fn add_endpoint(
        &self,
        org: OrgId,
        endpoint: EndpointDto,
    ) -> Result<EndpointDto, ApiError> {
        Ok(self.store.create_endpoint(org, endpoint).await?)
    }

    async fn update_endpoint(
        &self,
        org: OrgId,
        endpoint: EndpointDto,
    ) -> Result<EndpointDto, ApiError> {
        Ok(self.store.update_endpoint(org, endpoint).await?)
    }

    async fn delete_endpoint(&self, org: OrgId, id: EndpointId) -> Result<(), ApiError> {
        Ok(self.store.delete_endpoint(org, id).await?)
    }

    async fn discover_endpoint(&self, name: &str, live: bool) -> Result<EndpointDto, ApiError> {
        if live {
            Ok(self.discovery.discover(name).await?)
        } else {
            Ok(generate_defaults(name))
        }
    }
}

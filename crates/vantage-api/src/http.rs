use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{FromRequestParts, Path, Query, State},
    http::{StatusCode, request::Parts},
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use vantage_model::{EndpointDto, EndpointId, EndpointQuery, OrgId};

use crate::{envelope::Envelope, error::ApiError, handler::ApiHandler};

/// Header carrying the caller's organisation.
pub const ORG_HEADER: &str = "x-org-id";

/// HTTP API service builder.
pub struct HttpApi<H> {
    handler: Arc<H>,
}

impl<H> HttpApi<H>
where
    H: ApiHandler,
{
    /// Create new HTTP API with the given handler.
    pub fn new(handler: Arc<H>) -> Self {
        Self { handler }
    }

    /// Build axum router with mounted endpoints.
    ///
    /// Routes:
    /// - GET    /api/v2/endpoints           - List endpoints
    /// - POST   /api/v2/endpoints           - Create endpoint
    /// - PUT    /api/v2/endpoints           - Update endpoint
    /// - GET    /api/v2/endpoints/discover  - Propose checks for a host
    /// - GET    /api/v2/endpoints/{id}      - Get endpoint
    /// - DELETE /api/v2/endpoints/{id}      - Delete endpoint
    pub fn router(self) -> Router {
        Router::new()
            .route(
                "/api/v2/endpoints",
                get(list_endpoints::<H>)
                    .post(add_endpoint::<H>)
                    .put(update_endpoint::<H>),
            )
            .route("/api/v2/endpoints/discover", get(discover_endpoint::<H>))
            .route(
                "/api/v2/endpoints/{id}",
                get(get_endpoint::<H>).delete(delete_endpoint::<H>),
            )
            .with_state(self.handler)
    }
}

/// Organisation of the caller, taken from the `X-Org-Id` header.
#[derive(Debug, Clone, Copy)]
pub struct OrgContext(pub OrgId);

impl<S> FromRequestParts<S> for OrgContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(ORG_HEADER)
            .ok_or_else(|| ApiError::Unauthorized("missing organisation".into()))?;
        let id = raw
            .to_str()
            .ok()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .ok_or_else(|| ApiError::Unauthorized("malformed organisation id".into()))?;
        Ok(OrgContext(OrgId(id)))
    }
}

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct ListEndpointsParams {
    name: Option<String>,
    limit: Option<usize>,
    offset: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ListEndpointsResponse {
    items: Vec<EndpointDto>,
    total: usize,
}

#[derive(Debug, Deserialize)]
struct DiscoverParams {
    name: Option<String>,
    #[serde(default)]
    live: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v2/endpoints
///
/// Query params (all optional):
/// - ?name=example  - case-insensitive substring filter
/// - ?limit=50      - max items per page (default 100, max 1000)
/// - ?offset=0      - pagination offset (default 0)
async fn list_endpoints<H>(
    State(handler): State<Arc<H>>,
    OrgContext(org): OrgContext,
    Query(params): Query<ListEndpointsParams>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let mut query = EndpointQuery::new();

    if let Some(name) = params.name {
        if name.trim().is_empty() {
            return Err(ApiError::InvalidRequest("name cannot be empty".into()));
        }
        query = query.with_name(name);
    }

    if let Some(limit) = params.limit {
        query = query.with_limit(limit);
    }

    if let Some(offset) = params.offset {
        query = query.with_offset(offset);
    }

    let page = handler.list_endpoints(org, query).await?;
    debug!(%org, count = page.items.len(), total = page.total, "endpoints listed");

    Ok(Json(Envelope::ok(ListEndpointsResponse {
        items: page.items,
        total: page.total,
    })))
}

/// GET /api/v2/endpoints/{id}
async fn get_endpoint<H>(
    State(handler): State<Arc<H>>,
    OrgContext(org): OrgContext,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let id = EndpointId(id);
    debug!(%org, %id, "getting endpoint");
    let endpoint = handler.get_endpoint(org, id).await?;
    Ok(Json(Envelope::ok(endpoint)))
}

/// POST /api/v2/endpoints
async fn add_endpoint<H>(
    State(handler): State<Arc<H>>,
    OrgContext(org): OrgContext,
    Json(endpoint): Json<EndpointDto>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    if endpoint.name.trim().is_empty() {
        return Err(ApiError::InvalidRequest("name is required".into()));
    }

    debug!(%org, name = %endpoint.name, checks = endpoint.checks.len(), "creating endpoint");
    let created = handler.add_endpoint(org, endpoint).await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::with_status(StatusCode::CREATED, created)),
    ))
}

/// PUT /api/v2/endpoints
async fn update_endpoint<H>(
    State(handler): State<Arc<H>>,
    OrgContext(org): OrgContext,
    Json(endpoint): Json<EndpointDto>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    if endpoint.name.trim().is_empty() {
        return Err(ApiError::InvalidRequest("name is required".into()));
    }
    let Some(id) = endpoint.id else {
        return Err(ApiError::InvalidRequest("id is required".into()));
    };

    debug!(%org, %id, "updating endpoint");
    let updated = handler.update_endpoint(org, endpoint).await?;
    Ok(Json(Envelope::ok(updated)))
}

/// DELETE /api/v2/endpoints/{id}
async fn delete_endpoint<H>(
    State(handler): State<Arc<H>>,
    OrgContext(org): OrgContext,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let id = EndpointId(id);
    handler.delete_endpoint(org, id).await?;
    debug!(%org, %id, "endpoint deleted");

    Ok(Json(Envelope::ok(id)))
}

/// GET /api/v2/endpoints/discover?name=<host>[&live=true]
async fn discover_endpoint<H>(
    State(handler): State<Arc<H>>,
    OrgContext(org): OrgContext,
    Query(params): Query<DiscoverParams>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let name = match params.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => return Err(ApiError::InvalidRequest("name is required".into())),
    };

    debug!(%org, %name, live = params.live, "discovering endpoint");
    let endpoint = handler.discover_endpoint(&name, params.live).await?;
    debug!(%name, checks = endpoint.checks.len(), "discovery finished");

    Ok(Json(Envelope::ok(endpoint)))
}

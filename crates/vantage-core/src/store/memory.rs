use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use async_trait::async_trait;
use tracing::{debug, trace};
use vantage_model::{
    CheckId, EndpointDto, EndpointId, EndpointPage, EndpointQuery, OrgId, ProbeId,
};

use super::{EndpointStore, ProbeStore, StoreError};

/// In-memory probe and endpoint storage.
///
/// Cloning is cheap; clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<MemoryStoreInner>>,
}

#[derive(Default)]
struct MemoryStoreInner {
    /// Probes indexed by (scope, name).
    probes: HashMap<(OrgId, String), ProbeId>,
    /// Endpoints indexed by id.
    endpoints: HashMap<EndpointId, EndpointDto>,
    /// Index: organisation -> endpoint ids in creation order.
    by_org: HashMap<OrgId, Vec<EndpointId>>,
    last_probe_id: i64,
    last_endpoint_id: i64,
    last_check_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a probe agent under `name` and return its new id.
    ///
    /// Registering the same name twice in a scope returns the existing id.
    pub fn register_probe(&self, name: impl Into<String>, scope: OrgId) -> ProbeId {
        let mut inner = self.write();
        let key = (scope, name.into());
        if let Some(id) = inner.probes.get(&key) {
            return *id;
        }
        inner.last_probe_id += 1;
        let id = ProbeId(inner.last_probe_id);
        trace!(name = %key.1, %scope, %id, "probe registered");
        inner.probes.insert(key, id);
        id
    }

    fn read(&self) -> RwLockReadGuard<'_, MemoryStoreInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, MemoryStoreInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MemoryStoreInner {
    fn owned(&self, org: OrgId, id: EndpointId) -> Option<&EndpointDto> {
        self.endpoints
            .get(&id)
            .filter(|endpoint| endpoint.org_id == Some(org))
    }

    fn name_taken(&self, org: OrgId, name: &str, except: Option<EndpointId>) -> bool {
        self.by_org
            .get(&org)
            .into_iter()
            .flatten()
            .filter(|id| Some(**id) != except)
            .filter_map(|id| self.endpoints.get(id))
            .any(|endpoint| endpoint.name == name)
    }

    fn assign_check_ids(&mut self, endpoint: &mut EndpointDto) {
        for check in endpoint.checks.iter_mut().filter(|c| c.id.is_none()) {
            self.last_check_id += 1;
            check.id = Some(CheckId(self.last_check_id));
        }
    }
}

#[async_trait]
impl ProbeStore for MemoryStore {
    async fn find_probe_by_name(&self, name: &str, scope: OrgId) -> Result<ProbeId, StoreError> {
        self.read()
            .probes
            .get(&(scope, name.to_string()))
            .copied()
            .ok_or_else(|| StoreError::ProbeNotFound(name.to_string()))
    }
}

#[async_trait]
impl EndpointStore for MemoryStore {
    async fn create_endpoint(
        &self,
        org: OrgId,
        mut endpoint: EndpointDto,
    ) -> Result<EndpointDto, StoreError> {
        let mut inner = self.write();
        if inner.name_taken(org, &endpoint.name, None) {
            return Err(StoreError::EndpointExists(endpoint.name));
        }

        inner.last_endpoint_id += 1;
        let id = EndpointId(inner.last_endpoint_id);
        endpoint.id = Some(id);
        endpoint.org_id = Some(org);
        inner.assign_check_ids(&mut endpoint);

        debug!(%org, %id, name = %endpoint.name, checks = endpoint.checks.len(), "endpoint created");
        inner.endpoints.insert(id, endpoint.clone());
        inner.by_org.entry(org).or_default().push(id);
        Ok(endpoint)
    }

    async fn update_endpoint(
        &self,
        org: OrgId,
        mut endpoint: EndpointDto,
    ) -> Result<EndpointDto, StoreError> {
        let id = endpoint
            .id
            .ok_or_else(|| StoreError::Backend("endpoint id not set".into()))?;

        let mut inner = self.write();
        if inner.owned(org, id).is_none() {
            return Err(StoreError::EndpointNotFound(id));
        }
        if inner.name_taken(org, &endpoint.name, Some(id)) {
            return Err(StoreError::EndpointExists(endpoint.name));
        }

        endpoint.org_id = Some(org);
        inner.assign_check_ids(&mut endpoint);

        debug!(%org, %id, checks = endpoint.checks.len(), "endpoint updated");
        inner.endpoints.insert(id, endpoint.clone());
        Ok(endpoint)
    }

    async fn delete_endpoint(&self, org: OrgId, id: EndpointId) -> Result<(), StoreError> {
        let mut inner = self.write();
        if inner.owned(org, id).is_none() {
            return Err(StoreError::EndpointNotFound(id));
        }

        inner.endpoints.remove(&id);
        if let Some(ids) = inner.by_org.get_mut(&org) {
            ids.retain(|endpoint_id| *endpoint_id != id);
        }
        debug!(%org, %id, "endpoint deleted");
        Ok(())
    }

    async fn list_endpoints(
        &self,
        org: OrgId,
        query: &EndpointQuery,
    ) -> Result<EndpointPage<EndpointDto>, StoreError> {
        let inner = self.read();

        let filtered: Vec<&EndpointDto> = inner
            .by_org
            .get(&org)
            .into_iter()
            .flatten()
            .filter_map(|id| inner.endpoints.get(id))
            .filter(|endpoint| query.matches(&endpoint.name))
            .collect();
        let total = filtered.len();

        let items = filtered
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .cloned()
            .collect();

        Ok(EndpointPage { items, total })
    }

    async fn get_endpoint(&self, org: OrgId, id: EndpointId) -> Result<EndpointDto, StoreError> {
        self.read()
            .owned(org, id)
            .cloned()
            .ok_or(StoreError::EndpointNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_model::{Check, CheckSettings, PingSettings};

    const ORG: OrgId = OrgId(1);
    const OTHER_ORG: OrgId = OrgId(2);

    fn endpoint(name: &str) -> EndpointDto {
        let ping = Check::new(
            CheckSettings::Ping(PingSettings {
                hostname: name.to_string(),
                timeout: 5,
            }),
            60,
            true,
        );
        EndpointDto::new(name, vec![ping])
    }

    #[tokio::test]
    async fn probes_resolve_within_their_scope() {
        let store = MemoryStore::new();
        let fpt = store.register_probe("FPT", ORG);
        assert_eq!(store.register_probe("FPT", ORG), fpt);

        assert_eq!(store.find_probe_by_name("FPT", ORG).await.unwrap(), fpt);
        assert!(matches!(
            store.find_probe_by_name("FPT", OTHER_ORG).await,
            Err(StoreError::ProbeNotFound(_))
        ));
    }

    #[tokio::test]
    async fn create_assigns_ids() {
        let store = MemoryStore::new();
        let created = store
            .create_endpoint(ORG, endpoint("example.com"))
            .await
            .unwrap();

        let id = created.id.expect("endpoint id");
        assert_eq!(created.org_id, Some(ORG));
        assert!(created.checks.iter().all(|c| c.id.is_some()));
        assert_eq!(store.get_endpoint(ORG, id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn duplicate_name_is_rejected_per_org() {
        let store = MemoryStore::new();
        store
            .create_endpoint(ORG, endpoint("example.com"))
            .await
            .unwrap();

        assert!(matches!(
            store.create_endpoint(ORG, endpoint("example.com")).await,
            Err(StoreError::EndpointExists(_))
        ));
        assert!(
            store
                .create_endpoint(OTHER_ORG, endpoint("example.com"))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn endpoints_are_invisible_to_other_orgs() {
        let store = MemoryStore::new();
        let created = store
            .create_endpoint(ORG, endpoint("example.com"))
            .await
            .unwrap();
        let id = created.id.unwrap();

        assert!(matches!(
            store.get_endpoint(OTHER_ORG, id).await,
            Err(StoreError::EndpointNotFound(_))
        ));
        assert!(matches!(
            store.delete_endpoint(OTHER_ORG, id).await,
            Err(StoreError::EndpointNotFound(_))
        ));
        assert!(store.get_endpoint(ORG, id).await.is_ok());
    }

    #[tokio::test]
    async fn update_replaces_checks() {
        let store = MemoryStore::new();
        let mut created = store
            .create_endpoint(ORG, endpoint("example.com"))
            .await
            .unwrap();
        created.checks[0].enabled = false;

        let updated = store.update_endpoint(ORG, created.clone()).await.unwrap();
        assert!(!updated.checks[0].enabled);
        assert_eq!(updated.checks[0].id, created.checks[0].id);

        let missing = EndpointDto {
            id: Some(EndpointId(999)),
            ..endpoint("missing.example.com")
        };
        assert!(matches!(
            store.update_endpoint(ORG, missing).await,
            Err(StoreError::EndpointNotFound(EndpointId(999)))
        ));
    }

    #[tokio::test]
    async fn delete_removes_from_listing() {
        let store = MemoryStore::new();
        let a = store.create_endpoint(ORG, endpoint("a.example.com")).await.unwrap();
        store.create_endpoint(ORG, endpoint("b.example.com")).await.unwrap();

        store.delete_endpoint(ORG, a.id.unwrap()).await.unwrap();

        let page = store
            .list_endpoints(ORG, &EndpointQuery::new())
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name, "b.example.com");
    }

    #[tokio::test]
    async fn list_filters_and_paginates() {
        let store = MemoryStore::new();
        for name in ["a.example.com", "b.example.com", "c.example.com", "rust-lang.org"] {
            store.create_endpoint(ORG, endpoint(name)).await.unwrap();
        }

        let page = store
            .list_endpoints(ORG, &EndpointQuery::new().with_name("example"))
            .await
            .unwrap();
        assert_eq!(page.total, 3);

        let page = store
            .list_endpoints(
                ORG,
                &EndpointQuery::new()
                    .with_name("example")
                    .with_offset(1)
                    .with_limit(1),
            )
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "b.example.com");

        let empty = store
            .list_endpoints(OTHER_ORG, &EndpointQuery::new())
            .await
            .unwrap();
        assert_eq!(empty.total, 0);
    }
}

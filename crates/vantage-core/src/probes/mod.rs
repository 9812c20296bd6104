use std::sync::Arc;

use tracing::{debug, info, warn};
use vantage_model::{CheckRoute, OrgId, ProbeId};

use crate::{
    error::CoreError,
    store::{ProbeStore, StoreError},
};

/// Probe agents every discovered check is routed to, in this order.
pub const DEFAULT_PROBE_NAMES: &[&str] = &["VNPT_HN", "VNPT", "FPT", "VIETTEL", "THANHPV", "THANHPVWINDOW"];

/// Organisation that owns the default probe agents.
pub const DEFAULT_PROBE_SCOPE: OrgId = OrgId(1);

/// Resolved ids of the default probe agents.
///
/// Built once at start-up and read-only afterwards; clones share the same list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultProbeSet {
    ids: Arc<[ProbeId]>,
}

impl DefaultProbeSet {
    /// Resolve `names` within `scope`, preserving their order.
    ///
    /// Names the store does not know are logged and skipped, so the set may be partial or empty.
    /// Any other store failure aborts resolution.
    pub async fn resolve<S>(store: &S, names: &[&str], scope: OrgId) -> Result<Self, CoreError>
    where
        S: ProbeStore + ?Sized,
    {
        debug!(count = names.len(), %scope, "resolving default probes");

        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            match store.find_probe_by_name(name, scope).await {
                Ok(id) => ids.push(id),
                Err(StoreError::ProbeNotFound(_)) => {
                    warn!(probe = %name, "default probe not found");
                }
                Err(e) => return Err(e.into()),
            }
        }

        info!(resolved = ids.len(), requested = names.len(), "default probes resolved");
        Ok(Self::from_ids(ids))
    }

    /// Resolve the built-in [`DEFAULT_PROBE_NAMES`] in [`DEFAULT_PROBE_SCOPE`].
    pub async fn resolve_builtin<S>(store: &S) -> Result<Self, CoreError>
    where
        S: ProbeStore + ?Sized,
    {
        Self::resolve(store, DEFAULT_PROBE_NAMES, DEFAULT_PROBE_SCOPE).await
    }

    pub fn from_ids(ids: impl Into<Vec<ProbeId>>) -> Self {
        Self {
            ids: Arc::from(ids.into()),
        }
    }

    #[inline]
    pub fn ids(&self) -> &[ProbeId] {
        &self.ids
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Route addressing exactly this set.
    pub fn route(&self) -> CheckRoute {
        CheckRoute::by_ids(self.ids.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    use async_trait::async_trait;

    struct BrokenStore;

    #[async_trait]
    impl ProbeStore for BrokenStore {
        async fn find_probe_by_name(&self, _: &str, _: OrgId) -> Result<ProbeId, StoreError> {
            Err(StoreError::Backend("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn resolves_in_declared_order() {
        let store = MemoryStore::new();
        let fpt = store.register_probe("FPT", DEFAULT_PROBE_SCOPE);
        let vnpt = store.register_probe("VNPT", DEFAULT_PROBE_SCOPE);

        let set = DefaultProbeSet::resolve(&store, &["VNPT", "FPT"], DEFAULT_PROBE_SCOPE)
            .await
            .unwrap();
        assert_eq!(set.ids(), &[vnpt, fpt]);
    }

    #[tokio::test]
    async fn missing_names_are_skipped() {
        let store = MemoryStore::new();
        let viettel = store.register_probe("VIETTEL", DEFAULT_PROBE_SCOPE);
        store.register_probe("FPT", OrgId(7));

        let set = DefaultProbeSet::resolve_builtin(&store).await.unwrap();
        assert_eq!(set.ids(), &[viettel]);
    }

    #[tokio::test]
    async fn empty_store_yields_empty_set() {
        let set = DefaultProbeSet::resolve_builtin(&MemoryStore::new())
            .await
            .unwrap();
        assert!(set.is_empty());
        assert_eq!(set.route(), CheckRoute::by_ids(Vec::new()));
    }

    #[tokio::test]
    async fn other_store_errors_abort() {
        let err = DefaultProbeSet::resolve_builtin(&BrokenStore)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Store(StoreError::Backend(_))));
    }

    #[test]
    fn route_carries_ids() {
        let set = DefaultProbeSet::from_ids(vec![ProbeId(3), ProbeId(9)]);
        assert_eq!(set.route().probe_ids(), &[ProbeId(3), ProbeId(9)]);

        let clone = set.clone();
        assert_eq!(clone, set);
    }
}

use dashmap::DashMap;
use uguid::Guid;

use crate::{samples::AppDomainId, stores::RuntimeIdStore};

/// Concurrent map from app-domain to the GUID of its runtime instance.
///
/// Identities are rendered once, at insertion, in the lowercase hyphenated form expected by
/// the backend.
#[derive(Default)]
pub struct RuntimeIdMap {
    runtime_ids: DashMap<AppDomainId, String>,
}

impl RuntimeIdMap {
    /// Creates an empty map
    #[must_use]
    pub fn new() -> Self {
        RuntimeIdMap {
            runtime_ids: DashMap::new(),
        }
    }

    /// Associates the runtime instance `runtime_id` to an app-domain
    pub fn insert(&self, app_domain_id: AppDomainId, runtime_id: Guid) {
        self.runtime_ids
            .insert(app_domain_id, runtime_id.to_string().to_ascii_lowercase());
    }

    /// Forgets an unloaded app-domain
    pub fn remove(&self, app_domain_id: AppDomainId) {
        self.runtime_ids.remove(&app_domain_id);
    }
}

impl RuntimeIdStore for RuntimeIdMap {
    fn runtime_id(&self, app_domain_id: AppDomainId) -> Option<String> {
        self.runtime_ids
            .get(&app_domain_id)
            .map(|entry| entry.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let map = RuntimeIdMap::new();
        let guid: Guid = "01234567-89AB-CDEF-0123-456789ABCDEF".parse().unwrap();
        map.insert(AppDomainId(1), guid);

        assert_eq!(
            map.runtime_id(AppDomainId(1)).as_deref(),
            Some("01234567-89ab-cdef-0123-456789abcdef")
        );
        assert!(map.runtime_id(AppDomainId(2)).is_none());

        map.remove(AppDomainId(1));
        assert!(map.runtime_id(AppDomainId(1)).is_none());
    }
}

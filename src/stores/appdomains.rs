use dashmap::DashMap;

use crate::{
    samples::AppDomainId,
    stores::{AppDomainInfo, AppDomainStore},
};

/// Concurrent map of the app-domains reported by the runtime
#[derive(Default)]
pub struct AppDomainMap {
    app_domains: DashMap<AppDomainId, AppDomainInfo>,
}

impl AppDomainMap {
    /// Creates an empty map
    #[must_use]
    pub fn new() -> Self {
        AppDomainMap {
            app_domains: DashMap::new(),
        }
    }

    /// Records an app-domain, replacing a previous one with the same id
    pub fn insert(&self, app_domain_id: AppDomainId, pid: u32, name: impl Into<String>) {
        self.app_domains.insert(
            app_domain_id,
            AppDomainInfo {
                pid,
                name: name.into(),
            },
        );
    }

    /// Forgets an unloaded app-domain
    pub fn remove(&self, app_domain_id: AppDomainId) -> Option<AppDomainInfo> {
        self.app_domains
            .remove(&app_domain_id)
            .map(|(_, info)| info)
    }
}

impl AppDomainStore for AppDomainMap {
    fn app_domain_info(&self, app_domain_id: AppDomainId) -> Option<AppDomainInfo> {
        self.app_domains
            .get(&app_domain_id)
            .map(|entry| entry.value().clone())
    }
}

//! Multi-site host registry.
//!
//! The registry maps request authorities to [`Site`]s. Its state is one
//! immutable snapshot behind a lock; writers build a new snapshot and swap
//! it in, readers clone the `Arc` and work without holding the lock.

pub mod config;
pub mod site;

pub use self::config::{extract_sites, HostConfig, SiteConfig};
pub use self::site::Site;

use crate::content::ContentTree;
use crate::error::ContentError;
use crate::types::{ItemId, NodeRef};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info};

/// Request facts the registry needs to pick a site
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Host authority of the request, e.g. `example.com:8080`
    pub authority: Option<String>,
}

impl RequestContext {
    pub fn new(authority: impl Into<String>) -> Self {
        Self {
            authority: Some(authority.into()),
        }
    }

    /// A context with no request, e.g. a background job
    pub fn none() -> Self {
        Self::default()
    }
}

/// One consistent view of the registry
#[derive(Debug, Clone)]
pub struct SiteSnapshot {
    pub default_site: Arc<Site>,
    pub sites: Vec<Arc<Site>>,
}

/// Thread-safe registry of configured sites
#[derive(Debug)]
pub struct SiteRegistry {
    state: RwLock<Arc<SiteSnapshot>>,
}

impl SiteRegistry {
    pub fn new(default_site: Site, sites: Vec<Site>) -> Self {
        Self {
            state: RwLock::new(Arc::new(SiteSnapshot {
                default_site: Arc::new(default_site),
                sites: dedup(sites.into_iter().map(Arc::new).collect()),
            })),
        }
    }

    /// Build the registry from the host section of the configuration.
    ///
    /// Configured sites are only registered when `multiple_sites` is set.
    pub fn from_config(config: &HostConfig) -> Self {
        let sites = if config.multiple_sites {
            extract_sites(config)
        } else {
            Vec::new()
        };
        debug!(
            sites = sites.len(),
            multiple_sites = config.multiple_sites,
            "Building site registry from configuration"
        );
        Self::new(config.default_site(), sites)
    }

    /// Current snapshot of the registry
    pub fn snapshot(&self) -> Arc<SiteSnapshot> {
        Arc::clone(&self.state.read())
    }

    pub fn default_site(&self) -> Arc<Site> {
        Arc::clone(&self.snapshot().default_site)
    }

    pub fn sites(&self) -> Vec<Arc<Site>> {
        self.snapshot().sites.clone()
    }

    /// First registered site answering to `authority`, if any
    pub fn get_site(&self, authority: &str) -> Option<Arc<Site>> {
        let snapshot = self.snapshot();
        snapshot
            .sites
            .iter()
            .find(|site| site.matches(authority))
            .cloned()
    }

    /// Site serving `request`, falling back to the default site
    pub fn current_site(&self, request: &RequestContext) -> Arc<Site> {
        request
            .authority
            .as_deref()
            .and_then(|authority| self.get_site(authority))
            .unwrap_or_else(|| self.default_site())
    }

    /// Register additional sites, keeping existing ones and dropping duplicates
    pub fn add_sites(&self, new_sites: Vec<Site>) {
        let mut state = self.state.write();
        let mut sites = state.sites.clone();
        sites.extend(new_sites.into_iter().map(Arc::new));
        let sites = dedup(sites);
        info!(sites = sites.len(), "Added sites to registry");
        *state = Arc::new(SiteSnapshot {
            default_site: Arc::clone(&state.default_site),
            sites,
        });
    }

    /// Swap the default site and the full site list in one step
    pub fn replace_sites(
        &self,
        default_site: Site,
        new_sites: Option<Vec<Site>>,
    ) -> Result<(), ContentError> {
        let new_sites = new_sites.ok_or_else(|| {
            ContentError::InvalidArgument("replace_sites requires a site list".to_string())
        })?;
        let snapshot = SiteSnapshot {
            default_site: Arc::new(default_site),
            sites: dedup(new_sites.into_iter().map(Arc::new).collect()),
        };
        info!(
            sites = snapshot.sites.len(),
            default_start_page = snapshot.default_site.start_page_id,
            "Replaced site registry"
        );
        *self.state.write() = Arc::new(snapshot);
        Ok(())
    }

    /// Site whose start page is `id`, checking registered sites before the default
    pub fn site_for_start_page(&self, id: ItemId) -> Option<Arc<Site>> {
        let snapshot = self.snapshot();
        snapshot
            .sites
            .iter()
            .find(|site| site.start_page_id == id)
            .cloned()
            .or_else(|| {
                (snapshot.default_site.start_page_id == id)
                    .then(|| Arc::clone(&snapshot.default_site))
            })
    }

    pub fn is_start_page(&self, id: ItemId) -> bool {
        self.site_for_start_page(id).is_some()
    }

    /// Site owning `node`: the nearest item on its ancestor chain (itself
    /// included) that is a site start page or root. Falls back to the default.
    pub fn site_for_item(&self, tree: &ContentTree, node: NodeRef) -> Arc<Site> {
        let snapshot = self.snapshot();
        let chain = std::iter::once(node).chain(tree.ancestors(node));
        for current in chain {
            let Some(item) = tree.get(current) else {
                continue;
            };
            if item.is_transient() {
                continue;
            }
            let owner = snapshot
                .sites
                .iter()
                .find(|site| site.start_page_id == item.id || site.root_id == item.id);
            if let Some(site) = owner {
                return Arc::clone(site);
            }
        }
        Arc::clone(&snapshot.default_site)
    }
}

fn dedup(sites: Vec<Arc<Site>>) -> Vec<Arc<Site>> {
    let mut result: Vec<Arc<Site>> = Vec::with_capacity(sites.len());
    for site in sites {
        if !result.iter().any(|existing| **existing == *site) {
            result.push(site);
        }
    }
    result
}

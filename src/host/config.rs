//! Host configuration: the site definitions the registry is built from.

use crate::host::site::Site;
use crate::types::ItemId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Host section of the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// Id of the tree root shared by all sites unless overridden
    #[serde(default = "default_root_id")]
    pub root_id: ItemId,

    /// Start page of the default site
    #[serde(default = "default_start_page_id")]
    pub start_page_id: ItemId,

    /// Whether `sites` are registered at all
    #[serde(default)]
    pub multiple_sites: bool,

    /// Upload folders available to every site
    #[serde(default = "default_upload_folders")]
    pub upload_folders: Vec<String>,

    #[serde(default)]
    pub sites: Vec<SiteConfig>,
}

/// One site definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Host authority, e.g. `example.com` or `example.com:8080`
    pub name: String,

    /// Overrides the host-wide root
    #[serde(default)]
    pub root_id: Option<ItemId>,

    pub start_page_id: ItemId,

    #[serde(default)]
    pub wildcards: bool,

    #[serde(default)]
    pub upload_folders: Vec<String>,

    #[serde(default)]
    pub settings: BTreeMap<String, String>,
}

fn default_root_id() -> ItemId {
    1
}

fn default_start_page_id() -> ItemId {
    1
}

fn default_upload_folders() -> Vec<String> {
    vec!["~/upload".to_string()]
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            root_id: default_root_id(),
            start_page_id: default_start_page_id(),
            multiple_sites: false,
            upload_folders: default_upload_folders(),
            sites: Vec::new(),
        }
    }
}

impl HostConfig {
    /// Validate host configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.root_id <= 0 {
            return Err("root_id must be a positive item id".to_string());
        }
        if self.start_page_id <= 0 {
            return Err("start_page_id must be a positive item id".to_string());
        }

        let mut names = HashSet::new();
        for site in &self.sites {
            if site.name.trim().is_empty() {
                return Err("site name cannot be empty".to_string());
            }
            if site.start_page_id <= 0 {
                return Err(format!(
                    "site '{}': start_page_id must be a positive item id",
                    site.name
                ));
            }
            if matches!(site.root_id, Some(id) if id <= 0) {
                return Err(format!(
                    "site '{}': root_id must be a positive item id",
                    site.name
                ));
            }
            if !names.insert(site.name.to_ascii_lowercase()) {
                return Err(format!("duplicate site '{}'", site.name));
            }
        }
        Ok(())
    }

    /// The site used when no configured site matches a request
    pub fn default_site(&self) -> Site {
        let mut site = Site::new(self.root_id, self.start_page_id, "");
        site.upload_folders = self.upload_folders.clone();
        site
    }
}

/// Turn configured site definitions into [`Site`] values.
///
/// Each site inherits the host-wide root unless it names its own, and the
/// host-wide upload folders come before its own.
pub fn extract_sites(config: &HostConfig) -> Vec<Site> {
    config
        .sites
        .iter()
        .map(|element| {
            let mut site = Site::new(
                element.root_id.unwrap_or(config.root_id),
                element.start_page_id,
                element.name.clone(),
            )
            .with_wildcards(element.wildcards);
            for folder in config.upload_folders.iter().chain(&element.upload_folders) {
                if !site.upload_folders.contains(folder) {
                    site.upload_folders.push(folder.clone());
                }
            }
            site.settings = element.settings.clone();
            site
        })
        .collect()
}

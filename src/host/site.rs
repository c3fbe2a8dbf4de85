//! Site definitions and host-authority matching.

use crate::types::ItemId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A tenant: binds a host authority to a root and start page in the tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    /// Host authority this site answers to; empty for the default site
    pub name: String,
    pub root_id: ItemId,
    pub start_page_id: ItemId,
    /// Also answer to any subdomain of `name`
    pub wildcards: bool,
    pub upload_folders: Vec<String>,
    pub settings: BTreeMap<String, String>,
}

/// Lowercase an authority and drop a trailing root dot from its host part
fn normalize_authority(authority: &str) -> String {
    let authority = authority.trim().to_ascii_lowercase();
    match authority.rsplit_once(':') {
        Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => {
            format!("{}:{}", host.trim_end_matches('.'), port)
        }
        _ => authority.trim_end_matches('.').to_string(),
    }
}

fn strip_port(authority: &str) -> &str {
    match authority.rsplit_once(':') {
        Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => host,
        _ => authority,
    }
}

impl Site {
    pub fn new(root_id: ItemId, start_page_id: ItemId, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root_id,
            start_page_id,
            wildcards: false,
            upload_folders: Vec::new(),
            settings: BTreeMap::new(),
        }
    }

    pub fn with_wildcards(mut self, wildcards: bool) -> Self {
        self.wildcards = wildcards;
        self
    }

    pub fn with_upload_folder(mut self, folder: impl Into<String>) -> Self {
        self.upload_folders.push(folder.into());
        self
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    pub fn setting(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }

    /// Whether this site answers requests for `authority`.
    ///
    /// Comparison is case-insensitive. A site name without a port matches
    /// the host on any port; with a port, only that port. Wildcard sites also
    /// match any subdomain. The default site (empty name) matches nothing.
    pub fn matches(&self, authority: &str) -> bool {
        if self.name.is_empty() {
            return false;
        }
        let name = normalize_authority(&self.name);
        let mut host = normalize_authority(authority);
        if strip_port(&name) == name {
            host = strip_port(&host).to_string();
        }
        if host == name {
            return true;
        }
        self.wildcards && host.ends_with(&format!(".{}", name))
    }
}

/// Sites are the same registration when they answer to the same authority
/// with the same start page
impl PartialEq for Site {
    fn eq(&self, other: &Self) -> bool {
        normalize_authority(&self.name) == normalize_authority(&other.name)
            && self.start_page_id == other.start_page_id
            && self.root_id == other.root_id
    }
}

impl Eq for Site {}

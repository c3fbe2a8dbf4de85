//! Integration tests for the multi-site host registry

use super::test_utils::{node, sample_tree};
use folio::host::{extract_sites, HostConfig, SiteConfig};
use folio::{ContentError, RequestContext, Site, SiteRegistry};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::thread;

fn host_config() -> HostConfig {
    let site = |name: &str, start_page_id: i32, wildcards: bool| SiteConfig {
        name: name.to_string(),
        root_id: None,
        start_page_id,
        wildcards,
        upload_folders: Vec::new(),
        settings: BTreeMap::new(),
    };
    HostConfig {
        root_id: 1,
        start_page_id: 2,
        multiple_sites: true,
        upload_folders: vec!["~/upload".to_string()],
        sites: vec![site("one.example", 2, false), site("two.example", 3, true)],
    }
}

#[test]
fn test_unknown_authority_falls_back_to_default() {
    let registry = SiteRegistry::from_config(&host_config());
    assert!(registry.get_site("nowhere.example").is_none());
    let site = registry.current_site(&RequestContext::new("nowhere.example"));
    assert_eq!(*site, *registry.default_site());
}

#[test]
fn test_wildcard_and_port_matching() {
    let registry = SiteRegistry::from_config(&host_config());
    assert_eq!(
        registry.get_site("WWW.Two.Example:8080").unwrap().start_page_id,
        3
    );
    assert!(registry.get_site("www.one.example").is_none());
    assert_eq!(registry.get_site("one.example:443").unwrap().start_page_id, 2);
}

#[test]
fn test_extract_sites_is_pure() {
    let config = host_config();
    let first = extract_sites(&config);
    let second = extract_sites(&config);
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    assert!(first.iter().all(|s| s.root_id == 1));
}

#[test]
fn test_replace_and_add() {
    let registry = SiteRegistry::from_config(&host_config());
    let err = registry.replace_sites(Site::new(1, 1, ""), None).unwrap_err();
    assert!(matches!(err, ContentError::InvalidArgument(_)));
    assert_eq!(registry.sites().len(), 2);

    registry
        .replace_sites(Site::new(1, 1, ""), Some(vec![Site::new(1, 3, "three.example")]))
        .unwrap();
    assert!(registry.get_site("one.example").is_none());
    registry.add_sites(vec![
        Site::new(1, 3, "three.example"),
        Site::new(1, 2, "one.example"),
    ]);
    assert_eq!(registry.sites().len(), 2);
    assert!(registry.get_site("one.example").is_some());
}

#[test]
fn test_site_for_item() {
    let (tree, _) = sample_tree();
    let registry = SiteRegistry::from_config(&host_config());
    assert_eq!(registry.site_for_item(&tree, node(&tree, 6)).name, "one.example");
    assert_eq!(registry.site_for_item(&tree, node(&tree, 8)).name, "two.example");
    assert!(registry.is_start_page(3));
    assert!(!registry.is_start_page(5));
}

#[test]
fn test_readers_see_whole_snapshots() {
    let registry = Arc::new(SiteRegistry::from_config(&host_config()));
    let writer = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            for i in 0..50 {
                let sites = vec![
                    Site::new(1, 10 + i, "a.example"),
                    Site::new(1, 10 + i, "b.example"),
                ];
                registry
                    .replace_sites(Site::new(1, 10 + i, ""), Some(sites))
                    .unwrap();
            }
        })
    };
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for _ in 0..200 {
                    let snapshot = registry.snapshot();
                    let start = snapshot.default_site.start_page_id;
                    if start >= 10 {
                        assert!(snapshot.sites.iter().all(|s| s.start_page_id == start));
                    }
                }
            })
        })
        .collect();
    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
}

//! Integration tests for path resolution and URL computation

use super::test_utils::{node, sample_tree};
use folio::resolve::DEFAULT_ACTION;
use folio::{get_child, resolve_path, resolve_url, RequestContext, Site, SiteRegistry};

#[test]
fn test_full_match_binds_deepest_item() {
    let (tree, root) = sample_tree();
    let result = resolve_path(&tree, root, "one/news/today", "");
    assert_eq!(result.item, Some(node(&tree, 6)));
    assert_eq!(result.remaining, "");
    assert!(result.is_exact());
    assert_eq!(result.action(), DEFAULT_ACTION);
}

#[test]
fn test_partial_match_keeps_remainder() {
    let (tree, root) = sample_tree();
    let result = resolve_path(&tree, root, "one/missing/today", "");
    assert_eq!(result.item, Some(node(&tree, 2)));
    assert_eq!(result.remaining, "missing/today");
    assert_eq!(result.action(), "missing");
    assert_eq!(result.argument(), "today");
}

#[test]
fn test_case_insensitive_and_extension_matching() {
    let (tree, root) = sample_tree();
    let result = resolve_path(&tree, root, "/ONE/News/today.html", ".html");
    assert_eq!(result.item, Some(node(&tree, 6)));
    assert!(result.is_exact());
}

#[test]
fn test_query_string_is_split_off() {
    let (tree, root) = sample_tree();
    let result = resolve_path(&tree, root, "one/about?lang=en&q=a+b", "");
    assert_eq!(result.item, Some(node(&tree, 4)));
    assert_eq!(result.query.get("lang").map(String::as_str), Some("en"));
    assert_eq!(result.query.get("q").map(String::as_str), Some("a b"));
}

#[test]
fn test_protected_items_still_resolve() {
    let (tree, root) = sample_tree();
    let result = resolve_path(&tree, root, "two/about", "");
    assert_eq!(result.item, Some(node(&tree, 8)));
}

#[test]
fn test_get_child_paths() {
    let (tree, root) = sample_tree();
    assert_eq!(get_child(&tree, root, "", ""), Some(root));
    assert_eq!(get_child(&tree, root, "/", ""), Some(root));
    assert_eq!(get_child(&tree, root, "one", ""), Some(node(&tree, 2)));
    assert_eq!(get_child(&tree, root, "/one/news/teaser", ""), Some(node(&tree, 7)));
    assert_eq!(get_child(&tree, root, "one/nothing", ""), None);
}

#[test]
fn test_urls_by_kind() {
    let (mut tree, root) = sample_tree();
    assert_eq!(tree.url(root, ".html").unwrap(), "/");
    assert_eq!(tree.url(node(&tree, 2), ".html").unwrap(), "/one/");
    assert_eq!(tree.url(node(&tree, 6), ".html").unwrap(), "/one/news/today.html");
    assert_eq!(
        tree.url(node(&tree, 7), ".html").unwrap(),
        "/one/news.html?item=7"
    );

    let today = node(&tree, 6);
    tree.warm_url(today, ".html").unwrap();
    tree.set_name(node(&tree, 5), "stories").unwrap();
    assert_eq!(tree.url(today, ".html").unwrap(), "/one/stories/today.html");
}

#[test]
fn test_resolve_url_uses_request_site() {
    let (tree, _) = sample_tree();
    let registry = SiteRegistry::new(
        Site::new(1, 2, ""),
        vec![Site::new(1, 3, "two.example")],
    );

    let result = resolve_url(&tree, &registry, &RequestContext::new("two.example"), "about", "");
    assert_eq!(result.item, Some(node(&tree, 8)));

    let result = resolve_url(&tree, &registry, &RequestContext::new("other.example"), "about", "");
    assert_eq!(result.item, Some(node(&tree, 4)));

    let result = resolve_url(&tree, &registry, &RequestContext::none(), "news/today", "");
    assert_eq!(result.item, Some(node(&tree, 6)));
}

#[test]
fn test_resolve_url_with_missing_start_page() {
    let (tree, _) = sample_tree();
    let registry = SiteRegistry::new(Site::new(1, 99, ""), Vec::new());
    let result = resolve_url(&tree, &registry, &RequestContext::none(), "about", "");
    assert!(result.is_empty());
}

//! Integration tests for content source dispatch

use super::test_utils::{node, sample_tree};
use folio::content::{ItemKind, Principal};
use folio::source::{ChildQuery, SourcePriority, SourceRegistry, TreeSource};
use folio::ContentError;

fn registry() -> SourceRegistry {
    let mut registry = SourceRegistry::new();
    registry.register(Box::new(TreeSource::new("everything")));
    registry.register(Box::new(
        TreeSource::new("parts").for_kinds(&[ItemKind::Part]),
    ));
    registry.register(Box::new(
        TreeSource::new("pages").for_kinds(&[ItemKind::Page, ItemKind::StartPage]),
    ));
    registry
}

#[test]
fn test_specific_sources_take_precedence() {
    let (tree, root) = sample_tree();
    let registry = registry();
    assert_eq!(registry.names(), vec!["parts", "pages", "everything"]);
    assert_eq!(registry.provider_for(&tree, node(&tree, 7)).unwrap().name(), "parts");
    assert_eq!(registry.provider_for(&tree, node(&tree, 6)).unwrap().name(), "pages");
    assert_eq!(registry.provider_for(&tree, root).unwrap().name(), "everything");
}

#[test]
fn test_explicit_priority_overrides_kind_default() {
    let mut registry = SourceRegistry::new();
    registry.register(Box::new(
        TreeSource::new("parts").for_kinds(&[ItemKind::Part]),
    ));
    registry.register(Box::new(
        TreeSource::new("first").with_priority(SourcePriority::SPECIFIC_KIND - 1),
    ));
    assert_eq!(registry.names(), vec!["first", "parts"]);
}

#[test]
fn test_save_copy_and_delete_through_registry() {
    let (mut tree, _) = sample_tree();
    let registry = registry();
    let news = node(&tree, 5);
    let two = node(&tree, 3);

    let copy = registry.copy_to(&mut tree, news, two).unwrap();
    let ids: Vec<i32> = tree
        .descendants_and_self(copy)
        .iter()
        .map(|n| tree.item(*n).unwrap().id)
        .collect();
    assert_eq!(ids.len(), 3);
    assert!(ids.iter().all(|id| *id > 8));
    assert_eq!(tree.path(copy).unwrap(), "/two/news/");

    let fresh = tree.create(ItemKind::Page, "fresh");
    tree.attach(fresh, Some(two)).unwrap();
    let id = registry.save(&mut tree, fresh).unwrap();
    assert_eq!(registry.get(&tree, id), Some(fresh));

    registry.delete(&mut tree, copy).unwrap();
    assert_eq!(tree.len(), 9);
}

#[test]
fn test_children_query_through_registry() {
    let (tree, _) = sample_tree();
    let registry = registry();
    let news = node(&tree, 5);

    let all = registry.children(&tree, &ChildQuery::new(news)).unwrap();
    assert_eq!(all.len(), 2);

    let pages = registry.children(&tree, &ChildQuery::new(news).pages()).unwrap();
    assert_eq!(pages, vec![node(&tree, 6)]);

    let two = node(&tree, 3);
    let visible = registry
        .children(&tree, &ChildQuery::new(two).for_principal(Principal::anonymous()))
        .unwrap();
    assert!(visible.is_empty());
}

#[test]
fn test_missing_source() {
    let (mut tree, root) = sample_tree();
    let registry = SourceRegistry::new();
    assert!(matches!(
        registry.save(&mut tree, root),
        Err(ContentError::NoSource(_))
    ));
    assert!(registry.resolve_path(&tree, root, "one").is_empty());
}

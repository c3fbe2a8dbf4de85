//! Integration tests for tree structure and sibling ordering

use super::test_utils::{node, sample_tree};
use folio::content::{ItemKind, Principal};
use folio::filter::{ItemFilter, KindFilter, VisibleFilter};
use folio::{ContentError, ContentTree};

#[test]
fn test_import_preserves_document_order() {
    let (tree, root) = sample_tree();
    assert_eq!(tree.len(), 8);
    let names: Vec<String> = tree
        .structural_children(node(&tree, 5))
        .iter()
        .map(|n| tree.item(*n).unwrap().name_or_id())
        .collect();
    assert_eq!(names, vec!["today", "teaser"]);
    assert_eq!(tree.parent(node(&tree, 2)), Some(root));
}

#[test]
fn test_parent_child_links_stay_consistent() {
    let (mut tree, _) = sample_tree();
    let about = node(&tree, 4);
    let news = node(&tree, 5);

    tree.attach(about, Some(news)).unwrap();
    assert_eq!(tree.parent(about), Some(news));
    assert!(tree.structural_children(news).contains(&about));
    assert!(!tree.structural_children(node(&tree, 2)).contains(&about));

    tree.detach(about).unwrap();
    assert_eq!(tree.parent(about), None);
    assert!(!tree.structural_children(news).contains(&about));

    for (handle, item) in tree.iter() {
        for child in item.child_refs() {
            assert_eq!(tree.parent(*child), Some(handle));
        }
    }
}

#[test]
fn test_attach_under_own_descendant_fails() {
    let (mut tree, _) = sample_tree();
    let one = node(&tree, 2);
    let today = node(&tree, 6);
    let err = tree.attach(one, Some(today)).unwrap_err();
    assert!(matches!(err, ContentError::InvalidOperation(_)));
    assert_eq!(tree.parent(today), Some(node(&tree, 5)));
}

#[test]
fn test_insertion_keeps_existing_ranking() {
    let mut tree = ContentTree::new();
    let parent = tree.create(ItemKind::Page, "parent");
    let mut existing = Vec::new();
    for (i, order) in [0, 10, 20].into_iter().enumerate() {
        let child = tree.create(ItemKind::Page, &format!("c{}", i));
        tree.item_mut(child).unwrap().sort_order = order;
        tree.attach(child, Some(parent)).unwrap();
        existing.push(child);
    }

    let newcomer = tree.create(ItemKind::Page, "new");
    tree.attach(newcomer, Some(parent)).unwrap();

    let children = tree.structural_children(parent);
    let ranked: Vec<_> = children.iter().filter(|c| **c != newcomer).copied().collect();
    assert_eq!(ranked, existing);
    assert_eq!(children.len(), 4);
}

#[test]
fn test_move_to_index_renumbers_siblings() {
    let (mut tree, _) = sample_tree();
    let one = node(&tree, 2);
    let news = node(&tree, 5);
    tree.move_to_index(news, 0).unwrap();

    let children = tree.structural_children(one);
    assert_eq!(children[0], news);
    let orders: Vec<i32> = children
        .iter()
        .map(|c| tree.item(*c).unwrap().sort_order)
        .collect();
    assert!(orders.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_remove_drops_subtree_and_ids() {
    let (mut tree, _) = sample_tree();
    let news = node(&tree, 5);
    assert_eq!(tree.remove(news).unwrap(), 3);
    assert!(tree.find_by_id(6).is_none());
    assert!(tree.find_by_id(7).is_none());
    assert!(matches!(tree.item(news), Err(ContentError::NodeNotFound(_))));
}

#[test]
fn test_children_respect_authorization_and_zones() {
    let (tree, _) = sample_tree();
    let two = node(&tree, 3);
    assert!(tree.children(two, &Principal::anonymous()).unwrap().is_empty());
    let editor = Principal::user("ed", &["editors"]);
    assert_eq!(tree.children(two, &editor).unwrap().len(), 1);

    let news = node(&tree, 5);
    let right = tree
        .children_in_zone(news, Some("Right"), &Principal::anonymous())
        .unwrap();
    assert_eq!(right, vec![node(&tree, 7)]);
    let unzoned = tree
        .children_in_zone(news, None, &Principal::anonymous())
        .unwrap();
    assert_eq!(unzoned, vec![node(&tree, 6)]);
}

#[test]
fn test_composed_filters() {
    let (mut tree, _) = sample_tree();
    let news = node(&tree, 5);
    tree.item_mut(node(&tree, 6)).unwrap().visible = false;
    let filter = KindFilter::new(&[ItemKind::Page, ItemKind::Part]).and(VisibleFilter);
    let children = tree.children_filtered(news, &filter).unwrap();
    assert_eq!(children, vec![node(&tree, 7)]);
}

#[test]
fn test_export_round_trip_keeps_shape() {
    let (tree, root) = sample_tree();
    let spec = tree.export(root).unwrap();
    let json = serde_json::to_string(&spec).unwrap();
    let (copy, copy_root) = ContentTree::from_json(&json).unwrap();
    assert_eq!(copy.len(), tree.len());
    let about = node(&copy, 4);
    assert_eq!(copy.item(about).unwrap().title, "About One");
    assert_eq!(
        copy.item(about).unwrap().details.value("Rank").and_then(|v| v.as_int()),
        Some(3)
    );
    assert_eq!(copy.path(node(&copy, 6)).unwrap(), "/one/news/today/");
    assert_eq!(copy.parent(node(&copy, 2)), Some(copy_root));
}

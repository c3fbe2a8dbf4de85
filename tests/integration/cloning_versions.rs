//! Integration tests for cloning, in-place update and version snapshots

use super::test_utils::{node, sample_tree};
use folio::content::{ContentState, Principal};
use folio::details::DetailValue;
use folio::TRANSIENT_ID;

#[test]
fn test_shallow_clone_resets_identity() {
    let (mut tree, _) = sample_tree();
    let about = node(&tree, 4);
    let copy = tree.clone_item(about, false).unwrap();

    let item = tree.item(copy).unwrap();
    assert_eq!(item.id, TRANSIENT_ID);
    assert_eq!(tree.parent(copy), None);
    assert!(item.child_refs().is_empty());
    assert_eq!(item.title, "About One");
    assert_eq!(item.details.value("Text").and_then(|v| v.as_str()), Some("hello"));
    assert!(!tree.same_item(copy, about));
    assert!(tree.same_item(about, about));
}

#[test]
fn test_clone_shares_no_containers() {
    let (mut tree, _) = sample_tree();
    let about = node(&tree, 4);
    let copy = tree.clone_item(about, false).unwrap();
    tree.item_mut(copy).unwrap().details.set("Text", "changed").unwrap();
    assert_eq!(
        tree.item(about).unwrap().details.value("Text").and_then(|v| v.as_str()),
        Some("hello")
    );
}

#[test]
fn test_deep_clone_copies_shape_with_transient_ids() {
    let (mut tree, _) = sample_tree();
    let one = node(&tree, 2);
    let copy = tree.clone_item(one, true).unwrap();

    let original = tree.descendants_and_self(one);
    let cloned = tree.descendants_and_self(copy);
    assert_eq!(original.len(), cloned.len());
    for (a, b) in original.iter().zip(&cloned) {
        let a = tree.item(*a).unwrap();
        let b = tree.item(*b).unwrap();
        assert_eq!(a.name(), b.name());
        assert_eq!(a.child_refs().len(), b.child_refs().len());
        assert_eq!(b.id, TRANSIENT_ID);
    }
}

#[test]
fn test_update_from_mirrors_details() {
    let (mut tree, _) = sample_tree();
    let destination = node(&tree, 6);
    let source = node(&tree, 4);
    {
        let details = &mut tree.item_mut(destination).unwrap().details;
        details.set("A", 1).unwrap();
        details.set("B", 2).unwrap();
    }
    {
        let details = &mut tree.item_mut(source).unwrap().details;
        details.remove("Text");
        details.remove("Rank");
        details.set("A", 5).unwrap();
        details.set("C", 9).unwrap();
    }

    tree.update_from(destination, source).unwrap();

    let details = &tree.item(destination).unwrap().details;
    let keys: Vec<&str> = details.keys().collect();
    assert_eq!(keys, vec!["A", "C"]);
    assert_eq!(details.value("A"), Some(&DetailValue::Int(5)));
    assert_eq!(details.value("C"), Some(&DetailValue::Int(9)));
    assert_eq!(tree.item(destination).unwrap().id, 6);
    assert_eq!(tree.parent(destination), Some(node(&tree, 5)));
}

#[test]
fn test_update_from_copies_read_restrictions() {
    let (mut tree, _) = sample_tree();
    let protected = node(&tree, 8);
    let open = node(&tree, 6);
    tree.update_from(open, protected).unwrap();
    assert!(!tree.item(open).unwrap().is_authorized(&Principal::anonymous()));
    assert!(tree
        .item(open)
        .unwrap()
        .is_authorized(&Principal::user("ed", &["Editors"])));
}

#[test]
fn test_versions_and_publishing() {
    let (mut tree, _) = sample_tree();
    let about = node(&tree, 4);

    let first = tree.create_version(about).unwrap();
    tree.item_mut(about).unwrap().title = "Edited".to_string();
    let second = tree.create_version(about).unwrap();

    assert_eq!(tree.item(first).unwrap().version_index, 0);
    assert_eq!(tree.item(second).unwrap().version_index, 1);
    assert_eq!(tree.item(about).unwrap().version_index, 2);
    assert_eq!(tree.versions_of(about), vec![second, first]);

    // versions report the master's place in the tree
    assert_eq!(tree.path(first).unwrap(), tree.path(about).unwrap());
    assert_eq!(tree.canonical(first), about);

    tree.item_mut(about).unwrap().state = ContentState::Draft;
    let master = tree.publish_version(first).unwrap();
    assert_eq!(master, about);
    let item = tree.item(about).unwrap();
    assert_eq!(item.title, "About One");
    assert_eq!(item.state, ContentState::Published);
}

#[test]
fn test_publish_requires_a_version() {
    let (mut tree, _) = sample_tree();
    assert!(tree.publish_version(node(&tree, 4)).is_err());
}

#[test]
fn test_items_attached_to_a_version_belong_to_its_master() {
    let (mut tree, _) = sample_tree();
    let news = node(&tree, 5);
    let version = tree.create_version(news).unwrap();
    let today = node(&tree, 6);

    let extra = tree.clone_item(today, false).unwrap();
    tree.set_name(extra, "extra").unwrap();
    tree.attach(extra, Some(version)).unwrap();

    assert_eq!(tree.parent(extra), Some(news));
    let anonymous = Principal::anonymous();
    assert!(tree.children(news, &anonymous).unwrap().contains(&extra));
    assert_eq!(
        tree.children(version, &anonymous).unwrap(),
        tree.children(news, &anonymous).unwrap()
    );
    assert_eq!(tree.path(extra).unwrap(), "/one/news/extra/");
}

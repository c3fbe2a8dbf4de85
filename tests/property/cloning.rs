//! Property-based tests for deep cloning

use folio::content::ItemKind;
use folio::{ContentTree, NodeRef, TRANSIENT_ID};
use proptest::prelude::*;

/// Build a tree from parent indexes: entry `i` is the parent of item `i + 1`
fn build(parents: &[usize]) -> (ContentTree, NodeRef) {
    let mut tree = ContentTree::new();
    let root = tree.create(ItemKind::RootPage, "root");
    tree.set_id(root, 1).unwrap();
    let mut nodes = vec![root];
    for (i, parent) in parents.iter().enumerate() {
        let node = tree.create(ItemKind::Page, &format!("p{}", i));
        tree.set_id(node, i as i32 + 2).unwrap();
        tree.attach(node, Some(nodes[parent % nodes.len()])).unwrap();
        nodes.push(node);
    }
    (tree, root)
}

fn shape(tree: &ContentTree, node: NodeRef) -> Vec<(String, usize)> {
    tree.descendants_and_self(node)
        .into_iter()
        .map(|n| {
            let item = tree.item(n).unwrap();
            (item.name_or_id(), item.child_refs().len())
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_deep_clone_keeps_shape_and_resets_ids(parents in prop::collection::vec(0usize..64, 0..24)) {
        let (mut tree, root) = build(&parents);
        let copy = tree.clone_item(root, true).unwrap();

        prop_assert_eq!(shape(&tree, copy), shape(&tree, root));
        prop_assert_eq!(tree.parent(copy), None);
        for node in tree.descendants_and_self(copy) {
            prop_assert_eq!(tree.item(node).unwrap().id, TRANSIENT_ID);
        }
        prop_assert_eq!(tree.len(), 2 * (parents.len() + 1));
    }

    #[test]
    fn prop_clone_is_never_equal_to_source(parents in prop::collection::vec(0usize..8, 1..8)) {
        let (mut tree, root) = build(&parents);
        let copy = tree.clone_item(root, false).unwrap();
        prop_assert!(!tree.same_item(copy, root));
        prop_assert!(tree.same_item(root, root));
    }
}

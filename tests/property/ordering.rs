//! Property-based tests for sibling ordering

use folio::content::ordering::{insertion_index, normalize_sort_orders};
use folio::content::ItemKind;
use folio::ContentTree;
use proptest::prelude::*;

proptest! {
    /// Attaching a new item never reorders the siblings already present
    #[test]
    fn prop_attach_preserves_existing_ranking(orders in prop::collection::vec(-50_000i32..50_000, 0..12)) {
        let mut sorted = orders.clone();
        sorted.sort();

        let mut tree = ContentTree::new();
        let parent = tree.create(ItemKind::Page, "parent");
        let mut existing = Vec::new();
        for (i, order) in sorted.iter().enumerate() {
            let child = tree.create(ItemKind::Page, &format!("c{}", i));
            tree.item_mut(child).unwrap().sort_order = *order;
            tree.attach(child, Some(parent)).unwrap();
            existing.push(child);
        }
        let before = tree.structural_children(parent);

        let newcomer = tree.create(ItemKind::Page, "new");
        tree.attach(newcomer, Some(parent)).unwrap();

        let after: Vec<_> = tree
            .structural_children(parent)
            .into_iter()
            .filter(|c| *c != newcomer)
            .collect();
        prop_assert_eq!(after, before);
        prop_assert_eq!(tree.structural_children(parent).len(), sorted.len() + 1);
    }

    #[test]
    fn prop_insertion_index_in_bounds(orders in prop::collection::vec(any::<i32>(), 0..20)) {
        prop_assert!(insertion_index(&orders) <= orders.len());
    }

    /// Normalizing yields strictly increasing orders and keeps an already
    /// increasing list untouched
    #[test]
    fn prop_normalize_is_strictly_increasing(orders in prop::collection::vec(any::<i32>(), 0..20)) {
        let mut normalized = orders.clone();
        let changed = normalize_sort_orders(&mut normalized);
        prop_assert!(normalized.windows(2).all(|w| w[0] < w[1]));

        let mut again = normalized.clone();
        prop_assert!(normalize_sort_orders(&mut again).is_empty());
        prop_assert_eq!(again, normalized.clone());
        for (i, (a, b)) in orders.iter().zip(&normalized).enumerate() {
            if a != b {
                prop_assert!(changed.contains(&i));
            }
        }
    }
}

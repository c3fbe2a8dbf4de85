//! Shared fixtures for integration tests

use folio::{ContentTree, NodeRef};

/// Two sites under one root:
///
/// ```text
/// root (1)
/// ├── one (2, start page)
/// │   ├── about (4)
/// │   └── news (5)
/// │       ├── today (6)
/// │       └── teaser (7, part in zone "Right")
/// └── two (3, start page)
///     └── about (8, readable by Editors only)
/// ```
pub const SAMPLE_TREE: &str = r#"{
    "id": 1, "name": "root", "kind": "root_page",
    "children": [
        {"id": 2, "name": "one", "kind": "start_page", "children": [
            {"id": 4, "name": "about", "title": "About One",
             "details": {"Text": "hello", "Rank": 3}},
            {"id": 5, "name": "news", "children": [
                {"id": 6, "name": "today"},
                {"id": 7, "name": "teaser", "kind": "part", "zone": "Right"}
            ]}
        ]},
        {"id": 3, "name": "two", "kind": "start_page", "children": [
            {"id": 8, "name": "about", "roles": ["Editors"]}
        ]}
    ]
}"#;

pub fn sample_tree() -> (ContentTree, NodeRef) {
    ContentTree::from_json(SAMPLE_TREE).unwrap()
}

/// Handle of the item with persisted `id`
pub fn node(tree: &ContentTree, id: i32) -> NodeRef {
    tree.find_by_id(id)
        .unwrap_or_else(|| panic!("item {} missing from fixture", id))
}

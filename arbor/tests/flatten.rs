mod common;

use arbor::{Descend, TreeDelegate, TreeNode, Visitor, flatten, flatten_with};

use common::{Model, s, sample};

fn flat_ids(nodes: &[TreeNode<String>]) -> Vec<&str> {
    nodes.iter().map(|node| node.id.as_str()).collect()
}

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn test_flatten_preorder_with_levels_and_indices() {
    let mut model = Model::new()
        .root("r1")
        .root("r2")
        .child("r1", "a")
        .child("r1", "b")
        .expanded(&["r1", "a"]);

    let tree = flatten(&mut model);

    assert_eq!(flat_ids(tree.nodes()), vec!["r1", "a", "b", "r2"]);
    let levels: Vec<_> = tree.iter().map(|node| node.level).collect();
    assert_eq!(levels, vec![0, 1, 1, 0]);
    let indices: Vec<_> = tree.iter().map(|node| node.global_index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
}

#[test]
fn test_flatten_sibling_bookkeeping() {
    let mut model = sample().expanded(&["r1", "a"]);
    let tree = flatten(&mut model);

    assert_eq!(flat_ids(tree.nodes()), vec!["r1", "a", "a1", "a2", "b", "r2"]);

    let a2 = tree.find("a2").unwrap();
    assert_eq!(a2.local_index, 1);
    assert!(!a2.has_next_sibling);
    assert_eq!(tree.get(a2.parent.unwrap()).unwrap().id, "a");

    let a = tree.find("a").unwrap();
    assert_eq!(a.local_index, 0);
    assert!(a.has_next_sibling);
    assert!(a.is_expanded);

    let r2 = tree.find("r2").unwrap();
    assert!(r2.is_root());
    assert!(r2.is_last_sibling());
    assert!(!r2.is_expanded);
}

#[test]
fn test_flatten_empty_roots() {
    let mut model = Model::new();
    let tree = flatten(&mut model);
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
}

#[test]
fn test_duplicate_id_later_node_wins_lookup() {
    let mut model = Model::new()
        .root("r1")
        .root("r2")
        .child("r1", "dup")
        .child("r2", "dup")
        .expanded(&["r1", "r2"]);

    let tree = flatten(&mut model);

    assert_eq!(flat_ids(tree.nodes()), vec!["r1", "dup", "r2", "dup"]);
    assert_eq!(tree.index_of("dup"), Some(3));
    assert_eq!(tree.find("dup").unwrap().parent, Some(2));
    assert_eq!(tree.get(1).unwrap().parent, Some(0));
}

// =============================================================================
// Visibility
// =============================================================================

#[test]
fn test_item_visible_iff_all_ancestors_expanded() {
    // `a` is expanded but its parent is not: a1/a2 stay hidden.
    let mut model = sample().expanded(&["a"]);
    let tree = flatten(&mut model);
    assert_eq!(flat_ids(tree.nodes()), vec!["r1", "r2"]);

    model.expanded.insert(s("r1"));
    let tree = flatten(&mut model);
    assert_eq!(flat_ids(tree.nodes()), vec!["r1", "a", "a1", "a2", "b", "r2"]);
}

#[test]
fn test_children_fetched_only_when_descending() {
    let mut model = sample().expanded(&["r1"]);
    let _ = flatten(&mut model);
    // r1 is the only expanded node.
    assert_eq!(model.child_lookups.get(), 1);
}

#[test]
fn test_flatten_is_idempotent() {
    let mut model = sample().expanded(&["r1", "a", "r2"]);
    let first = flatten(&mut model);
    let second = flatten(&mut model);
    assert_eq!(first.nodes(), second.nodes());
}

#[test]
fn test_descend_predicate_overrides_flags() {
    let mut model = sample();
    let tree = flatten_with(&mut model, &mut Descend(|_: &TreeNode<String>| true));
    assert_eq!(
        flat_ids(tree.nodes()),
        vec!["r1", "a", "a1", "a2", "b", "r2", "c"]
    );

    let mut model = sample();
    let tree = flatten_with(
        &mut model,
        &mut Descend(|node: &TreeNode<String>| node.level == 0),
    );
    assert_eq!(flat_ids(tree.nodes()), vec!["r1", "a", "b", "r2", "c"]);
}

// =============================================================================
// Hooks
// =============================================================================

#[derive(Default)]
struct Recorder {
    pre: Vec<(String, Option<String>)>,
    visited: Vec<String>,
}

impl Visitor<Model> for Recorder {
    fn pre_visit(&mut self, delegate: &mut Model, item: &String, parent: Option<&String>) {
        // Forcing state here shows up in the same pass.
        if item == "r2" {
            delegate.set_expanded(item, true);
        }
        self.pre.push((item.clone(), parent.cloned()));
    }

    fn visit(&mut self, node: &TreeNode<String>) {
        self.visited.push(node.id.clone());
    }
}

#[test]
fn test_hooks_run_in_traversal_order() {
    let mut model = sample().expanded(&["r1"]);
    let mut recorder = Recorder::default();
    let tree = flatten_with(&mut model, &mut recorder);

    assert_eq!(recorder.visited, vec!["r1", "a", "b", "r2", "c"]);
    assert_eq!(recorder.pre[0], (s("r1"), None));
    assert_eq!(recorder.pre[1], (s("a"), Some(s("r1"))));
    assert_eq!(recorder.pre[4], (s("c"), Some(s("r2"))));
    assert!(tree.find("r2").unwrap().is_expanded);
    assert!(model.is_open("r2"));
}

//! Shared in-memory delegate for the integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::{HashMap, HashSet};

use arbor::{TreeController, TreeDelegate};

/// Tree of string ids with caller-owned expansion and selection sets.
#[derive(Debug, Default)]
pub struct Model {
    roots: Vec<String>,
    children: HashMap<String, Vec<String>>,
    pub expanded: HashSet<String>,
    pub selected: HashSet<String>,
    pub child_lookups: Cell<usize>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(mut self, id: &str) -> Self {
        self.roots.push(id.to_string());
        self
    }

    pub fn child(mut self, parent: &str, id: &str) -> Self {
        self.children
            .entry(parent.to_string())
            .or_default()
            .push(id.to_string());
        self
    }

    pub fn expanded(mut self, ids: &[&str]) -> Self {
        self.expanded.extend(ids.iter().map(|id| id.to_string()));
        self
    }

    pub fn add_child(&mut self, parent: &str, id: &str) {
        self.children
            .entry(parent.to_string())
            .or_default()
            .push(id.to_string());
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }
}

impl TreeDelegate for Model {
    type Item = String;

    fn roots(&self) -> Vec<String> {
        self.roots.clone()
    }

    fn children(&self, item: &String) -> Vec<String> {
        self.child_lookups.set(self.child_lookups.get() + 1);
        self.children.get(item).cloned().unwrap_or_default()
    }

    fn id(&self, item: &String) -> String {
        item.clone()
    }

    fn is_expanded(&self, item: &String) -> bool {
        self.expanded.contains(item)
    }

    fn set_expanded(&mut self, item: &String, expanded: bool) {
        if expanded {
            self.expanded.insert(item.clone());
        } else {
            self.expanded.remove(item);
        }
    }

    fn is_selected(&self, item: &String) -> bool {
        self.selected.contains(item)
    }

    fn set_selected(&mut self, item: &String, selected: bool) {
        if selected {
            self.selected.insert(item.clone());
        } else {
            self.selected.remove(item);
        }
    }
}

/// r1 -> [a -> [a1, a2], b], r2 -> [c]
pub fn sample() -> Model {
    Model::new()
        .root("r1")
        .root("r2")
        .child("r1", "a")
        .child("r1", "b")
        .child("a", "a1")
        .child("a", "a2")
        .child("r2", "c")
}

/// Two roots, two children each, two grandchildren per child: 14 items.
pub fn three_levels() -> Model {
    let mut model = Model::new();
    for root in ["x", "y"] {
        model = model.root(root);
        for child in 1..=2 {
            let child_id = format!("{root}{child}");
            model = model.child(root, &child_id);
            for grandchild in ["a", "b"] {
                model = model.child(&child_id, &format!("{child_id}{grandchild}"));
            }
        }
    }
    model
}

pub fn ids<D: TreeDelegate>(controller: &TreeController<D>) -> Vec<String> {
    controller.nodes().iter().map(|node| node.id.clone()).collect()
}

pub fn levels<D: TreeDelegate>(controller: &TreeController<D>) -> Vec<usize> {
    controller.nodes().iter().map(|node| node.level).collect()
}

pub fn s(id: &str) -> String {
    id.to_string()
}

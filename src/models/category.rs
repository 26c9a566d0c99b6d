// src/models/category.rs

//! Category tree data structures.

use serde::{Deserialize, Serialize};

/// One node in the forum's category hierarchy.
///
/// A node may carry topics, subcategories, both, or neither. Nodes are
/// built once during tree discovery and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryNode {
    /// Display title of the category
    pub title: String,

    /// Absolute URL of the category listing page
    pub url: String,

    /// True iff the listing page contains at least one topic link
    pub has_topics: bool,

    /// Subcategories in discovery order
    #[serde(default)]
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            has_topics: false,
            children: Vec::new(),
        }
    }

    /// A leaf carries topics and nothing below it.
    pub fn is_leaf(&self) -> bool {
        self.has_topics && self.children.is_empty()
    }

    /// Total number of nodes in this subtree, including self.
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(CategoryNode::node_count)
            .sum::<usize>()
    }

    /// All nodes whose listing pages carry topics, in discovery order.
    pub fn topic_bearing(&self) -> Vec<&CategoryNode> {
        let mut nodes = Vec::new();
        self.collect_topic_bearing(&mut nodes);
        nodes
    }

    fn collect_topic_bearing<'a>(&'a self, out: &mut Vec<&'a CategoryNode>) {
        if self.has_topics {
            out.push(self);
        }
        for child in &self.children {
            child.collect_topic_bearing(out);
        }
    }
}

/// Borrowed view of a category, used to scope storage and extraction.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRef<'a> {
    pub title: &'a str,
    pub url: &'a str,
}

impl<'a> From<&'a CategoryNode> for CategoryRef<'a> {
    fn from(node: &'a CategoryNode) -> Self {
        Self {
            title: &node.title,
            url: &node.url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> CategoryNode {
        let mut root = CategoryNode::new("Root", "https://example.com/forum");
        let mut general = CategoryNode::new("General", "https://example.com/f1-general");
        general.has_topics = true;
        let mut mixed = CategoryNode::new("Mixed", "https://example.com/f2-mixed");
        mixed.has_topics = true;
        let mut nested = CategoryNode::new("Nested", "https://example.com/f3-nested");
        nested.has_topics = true;
        mixed.children.push(nested);
        root.children.push(general);
        root.children.push(mixed);
        root
    }

    #[test]
    fn test_is_leaf_invariant() {
        let tree = sample_tree();
        // Root: no topics, has children -> not a leaf
        assert!(!tree.is_leaf());
        // General: topics, no children -> leaf
        assert!(tree.children[0].is_leaf());
        // Mixed: topics AND children -> not a leaf, still topic-bearing
        assert!(!tree.children[1].is_leaf());
        assert!(tree.children[1].has_topics);
    }

    #[test]
    fn test_node_count() {
        assert_eq!(sample_tree().node_count(), 4);
    }

    #[test]
    fn test_topic_bearing_order() {
        let tree = sample_tree();
        let bearing = tree.topic_bearing();
        let titles: Vec<_> = bearing.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["General", "Mixed", "Nested"]);
    }

    #[test]
    fn test_serde_round_trip_preserves_leafness() {
        let tree = sample_tree();
        let json = serde_json::to_string(&tree).unwrap();
        let restored: CategoryNode = serde_json::from_str(&json).unwrap();
        assert_eq!(tree, restored);
        assert!(restored.children[0].is_leaf());
        assert!(!restored.children[1].is_leaf());
    }

    #[test]
    fn test_deserialize_without_children_field() {
        let node: CategoryNode = serde_json::from_str(
            r#"{"title": "Empty", "url": "https://example.com/f9", "has_topics": false}"#,
        )
        .unwrap();
        assert!(node.children.is_empty());
        assert!(!node.is_leaf());
    }
}

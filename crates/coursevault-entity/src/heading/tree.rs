//! Heading tree structures for hierarchical display.

use serde::{Deserialize, Serialize};

use coursevault_core::types::HeadingId;

use crate::document::Document;

/// A node in a built course-file tree, carrying its direct documents and
/// recursively its children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadingTreeNode {
    /// Heading ID.
    pub id: HeadingId,
    /// Heading title.
    pub title: String,
    /// Sibling ordering index.
    pub order_index: i32,
    /// Whether this heading was seeded from the template.
    pub is_template_origin: bool,
    /// Explicit completion flag.
    pub completed: bool,
    /// Documents attached directly to this heading (all retained versions).
    pub documents: Vec<Document>,
    /// Child nodes, ordered by `order_index`.
    pub children: Vec<HeadingTreeNode>,
}

impl HeadingTreeNode {
    /// Number of nodes in the subtree rooted here, including this node.
    pub fn subtree_count(&self) -> u64 {
        1 + self
            .children
            .iter()
            .map(HeadingTreeNode::subtree_count)
            .sum::<u64>()
    }

    /// Whether this node counts as complete: it has at least one
    /// current-version document or its completed flag is explicitly set.
    pub fn is_complete(&self) -> bool {
        self.completed || !self.documents.is_empty()
    }
}

/// A complete course-file tree: an ordered forest of heading nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseFileTree {
    /// The root-level nodes, ordered by `order_index`.
    pub roots: Vec<HeadingTreeNode>,
    /// Total number of headings in the tree.
    pub total_headings: u64,
}

impl CourseFileTree {
    /// Create an empty tree.
    pub fn empty() -> Self {
        Self {
            roots: Vec::new(),
            total_headings: 0,
        }
    }
}

//! Builds the display tree from flat heading and document rows.

use std::collections::HashMap;

use coursevault_core::types::HeadingId;
use coursevault_entity::document::Document;
use coursevault_entity::heading::{CourseFileTree, Heading, HeadingTreeNode};

/// Assemble the ordered forest for a course file.
///
/// Headings arrive sorted by `order_index`; documents are grouped onto
/// their heading with every retained version, ordered by file name then
/// version.
pub fn build_tree(headings: Vec<Heading>, documents: Vec<Document>) -> CourseFileTree {
    if headings.is_empty() {
        return CourseFileTree::empty();
    }

    let mut docs_by_heading: HashMap<HeadingId, Vec<Document>> = HashMap::new();
    for document in documents {
        docs_by_heading
            .entry(document.heading_id)
            .or_default()
            .push(document);
    }
    for versions in docs_by_heading.values_mut() {
        versions.sort_by(|a, b| a.file_name.cmp(&b.file_name).then(a.version.cmp(&b.version)));
    }

    let mut children_of: HashMap<Option<HeadingId>, Vec<Heading>> = HashMap::new();
    for heading in headings {
        children_of.entry(heading.parent_id).or_default().push(heading);
    }

    let roots = attach(None, &mut children_of, &mut docs_by_heading);
    let total_headings = roots.iter().map(HeadingTreeNode::subtree_count).sum();
    CourseFileTree {
        roots,
        total_headings,
    }
}

fn attach(
    parent: Option<HeadingId>,
    children_of: &mut HashMap<Option<HeadingId>, Vec<Heading>>,
    docs_by_heading: &mut HashMap<HeadingId, Vec<Document>>,
) -> Vec<HeadingTreeNode> {
    let mut siblings = children_of.remove(&parent).unwrap_or_default();
    siblings.sort_by_key(|h| h.order_index);
    siblings
        .into_iter()
        .map(|heading| {
            let children = attach(Some(heading.id), children_of, docs_by_heading);
            HeadingTreeNode {
                id: heading.id,
                title: heading.title,
                order_index: heading.order_index,
                is_template_origin: heading.is_template_origin,
                completed: heading.completed,
                documents: docs_by_heading.remove(&heading.id).unwrap_or_default(),
                children,
            }
        })
        .collect()
}

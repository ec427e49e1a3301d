//! Completion scoring over the heading tree.

use coursevault_entity::heading::{CourseFileTree, HeadingTreeNode};

/// Percentage of headings that count as complete, rounded to the nearest
/// integer. An empty structure scores zero.
///
/// A heading is complete when it holds at least one document or its
/// explicit completed flag is set; descendants do not roll up into their
/// parent.
pub fn completion_percent(tree: &CourseFileTree) -> u8 {
    let (complete, total) = tree
        .roots
        .iter()
        .map(count_subtree)
        .fold((0u64, 0u64), |(c, t), (sc, st)| (c + sc, t + st));
    if total == 0 {
        return 0;
    }
    (100.0 * complete as f64 / total as f64).round() as u8
}

fn count_subtree(node: &HeadingTreeNode) -> (u64, u64) {
    let own = (u64::from(node.is_complete()), 1);
    node.children
        .iter()
        .map(count_subtree)
        .fold(own, |(c, t), (sc, st)| (c + sc, t + st))
}

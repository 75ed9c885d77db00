//! Resolution of a [`KeyPath`] against a content tree.
//!
//! The walk is a pre-order descent from the root at depth 0. Each node is
//! checked with the key path predicates; a node that fully resolves the path
//! is accumulated together with the concrete key path leading to it.
//! Container nodes are walked through without consuming a segment and are
//! never accumulated themselves.

use std::fmt;

use crate::element::{is_container_key, KeyPathElement};
use crate::KeyPath;

/// A key path bound to exactly one matched node.
pub struct ResolvedKeyPath<'a> {
    key_path: KeyPath,
    address: Vec<usize>,
    element: &'a dyn KeyPathElement,
}

impl<'a> ResolvedKeyPath<'a> {
    /// Concrete path of the node, one literal key per level (no wildcards).
    pub fn key_path(&self) -> &KeyPath {
        &self.key_path
    }

    /// Child indices leading from the root to the node.
    pub fn address(&self) -> &[usize] {
        &self.address
    }

    pub fn element(&self) -> &'a dyn KeyPathElement {
        self.element
    }

    pub fn into_key_path(self) -> KeyPath {
        self.key_path
    }
}

impl fmt::Debug for ResolvedKeyPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedKeyPath")
            .field("key_path", &self.key_path)
            .field("address", &self.address)
            .field("element", &self.element.key())
            .finish()
    }
}

/// Resolve `key_path` against the tree rooted at `root`.
///
/// Returns every fully matching node in traversal order; an unmatched path
/// yields an empty list.
pub fn resolve_key_path<'a>(
    key_path: &KeyPath,
    root: &'a dyn KeyPathElement,
) -> Vec<ResolvedKeyPath<'a>> {
    let mut accumulator = Vec::new();
    let mut address = Vec::new();
    resolve_element(
        key_path,
        root,
        0,
        &KeyPath::empty(),
        &mut address,
        &mut accumulator,
    );
    log::debug!(
        "key path {} resolved to {} element(s)",
        key_path,
        accumulator.len()
    );
    accumulator
}

fn resolve_element<'a>(
    key_path: &KeyPath,
    element: &'a dyn KeyPathElement,
    depth: usize,
    partial: &KeyPath,
    address: &mut Vec<usize>,
    accumulator: &mut Vec<ResolvedKeyPath<'a>>,
) {
    let key = element.key();
    if !key_path.matches(key, depth) {
        return;
    }

    let container = is_container_key(key);
    let owned;
    let partial = if container {
        partial
    } else {
        owned = partial.add_key(key);
        &owned
    };

    if !container && key_path.fully_resolves_to(key, depth) {
        log::trace!("key path {} matched {}", key_path, partial);
        accumulator.push(ResolvedKeyPath {
            key_path: partial.clone(),
            address: address.clone(),
            element,
        });
    }

    if !key_path.propagate_to_children(key, depth) {
        return;
    }
    let child_depth = depth + key_path.increment_depth_by(key, depth);
    for index in 0..element.child_count() {
        if let Some(child) = element.child(index) {
            address.push(index);
            resolve_element(key_path, child, child_depth, partial, address, accumulator);
            address.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ContentNode;

    fn tree() -> ContentNode {
        ContentNode::container(vec![
            ContentNode::layer(
                "A",
                vec![ContentNode::group(
                    "B",
                    vec![ContentNode::shape("C"), ContentNode::shape("D")],
                )],
            ),
            ContentNode::layer("E", vec![]),
        ])
    }

    fn keys(resolved: &[ResolvedKeyPath<'_>]) -> Vec<String> {
        resolved.iter().map(|r| r.key_path().to_string()).collect()
    }

    #[test]
    fn literal_path_binds_node_and_address() {
        let root = tree();
        let resolved = resolve_key_path(&KeyPath::new(["A", "B", "D"]), &root);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].address(), &[0, 0, 1]);
        assert_eq!(resolved[0].element().key(), "D");
        assert_eq!(root.node_at(resolved[0].address()).unwrap().key, "D");
    }

    #[test]
    fn traversal_order_is_preorder() {
        let root = tree();
        let resolved = resolve_key_path(&KeyPath::new(["**"]), &root);
        assert_eq!(keys(&resolved), vec!["A", "A.B", "A.B.C", "A.B.D", "E"]);
    }

    #[test]
    fn caller_key_path_is_not_mutated() {
        let root = tree();
        let query = KeyPath::new(["*", "B", "*"]);
        let before = query.clone();
        let resolved = resolve_key_path(&query, &root);
        assert_eq!(resolved.len(), 2);
        assert_eq!(query, before);
    }

    #[test]
    fn empty_key_path_matches_nothing() {
        let root = tree();
        assert!(resolve_key_path(&KeyPath::empty(), &root).is_empty());
    }

    #[test]
    fn adjacent_globstars_terminate() {
        let root = tree();
        assert!(resolve_key_path(&KeyPath::new(["**", "**"]), &root).is_empty());
        let resolved = resolve_key_path(&KeyPath::new(["**", "**", "**"]), &root);
        assert!(resolved.len() <= root.addressable_count());
    }

    #[test]
    fn globstar_literal_can_match_first_level() {
        let root = tree();
        let resolved = resolve_key_path(&KeyPath::new(["**", "A"]), &root);
        assert_eq!(keys(&resolved), vec!["A"]);
    }
}

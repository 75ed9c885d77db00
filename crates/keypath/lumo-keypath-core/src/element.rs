//! The addressable-node capability the resolver walks.

/// Key of the structural nodes a player injects on its own (the implicit
/// root of a composition, the content group of a shape layer). Such nodes
/// match any key path at any depth and never consume a segment.
pub const CONTAINER_KEY: &str = "__container";

#[inline]
pub fn is_container_key(key: &str) -> bool {
    key == CONTAINER_KEY
}

/// A node of a content tree that can be addressed by a [`KeyPath`](crate::KeyPath).
///
/// Only the key and the ordered children are needed for resolution; concrete
/// node kinds stay behind this trait.
pub trait KeyPathElement {
    /// Local key (layer, group or shape name).
    fn key(&self) -> &str;

    /// Number of direct children.
    fn child_count(&self) -> usize;

    /// Child at `index` in declaration order.
    fn child(&self, index: usize) -> Option<&dyn KeyPathElement>;
}

impl<'a> dyn KeyPathElement + 'a {
    /// Iterate over direct children in declaration order.
    pub fn children(&self) -> Children<'_> {
        Children {
            element: self,
            next: 0,
        }
    }
}

/// Iterator over the children of a [`KeyPathElement`].
pub struct Children<'a> {
    element: &'a dyn KeyPathElement,
    next: usize,
}

impl<'a> Iterator for Children<'a> {
    type Item = &'a dyn KeyPathElement;

    fn next(&mut self) -> Option<Self::Item> {
        let child = self.element.child(self.next)?;
        self.next += 1;
        Some(child)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.element.child_count().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Leaf(&'static str);

    impl KeyPathElement for Leaf {
        fn key(&self) -> &str {
            self.0
        }
        fn child_count(&self) -> usize {
            0
        }
        fn child(&self, _index: usize) -> Option<&dyn KeyPathElement> {
            None
        }
    }

    struct Pair(&'static str, Leaf, Leaf);

    impl KeyPathElement for Pair {
        fn key(&self) -> &str {
            self.0
        }
        fn child_count(&self) -> usize {
            2
        }
        fn child(&self, index: usize) -> Option<&dyn KeyPathElement> {
            match index {
                0 => Some(&self.1),
                1 => Some(&self.2),
                _ => None,
            }
        }
    }

    #[test]
    fn children_iterates_in_order() {
        let pair = Pair("root", Leaf("a"), Leaf("b"));
        let pair: &dyn KeyPathElement = &pair;
        let keys: Vec<&str> = pair.children().map(|c| c.key()).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(pair.children().size_hint(), (2, Some(2)));
    }

    #[test]
    fn container_key_detection() {
        assert!(is_container_key("__container"));
        assert!(!is_container_key("container"));
    }
}

use alloc::vec::Vec;

use crate::node::{Color, NIL};
use crate::tree::RbTree;

/// Lazy in-order traversal over a [`RbTree`], yielding `(key, color, count)`
/// triples in ascending key order.
///
/// The traversal is iterative, keeping an explicit stack of at most
/// tree-height indices instead of recursing. Each iterator is independent of
/// any other traversal of the same tree.
#[derive(Debug)]
pub struct InOrder<'a, K> {
    tree: &'a RbTree<K>,

    /// Ancestors whose left subtree has been fully visited
    stack: Vec<usize>,

    /// Next subtree to descend into, `NIL` when only the stack remains
    current: usize,
}

impl<'a, K> InOrder<'a, K> {
    pub(crate) fn new(tree: &'a RbTree<K>) -> Self {
        Self {
            tree,
            stack: Vec::new(),
            current: tree.root_index(),
        }
    }
}

impl<'a, K> Iterator for InOrder<'a, K> {
    type Item = (&'a K, Color, u32);

    fn next(&mut self) -> Option<Self::Item> {
        while self.current != NIL {
            self.stack.push(self.current);
            self.current = self.tree.left_of(self.current);
        }

        let idx = self.stack.pop()?;
        self.current = self.tree.right_of(idx);

        let node = self.tree.node_at(idx);
        Some((&node.key, node.color, node.count))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.tree.len()))
    }
}

impl<'a, K> IntoIterator for &'a RbTree<K> {
    type Item = (&'a K, Color, u32);
    type IntoIter = InOrder<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.in_order()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_traversal() {
        let tree = RbTree::<i32>::new();
        assert!(tree.in_order().next().is_none());
    }

    #[test]
    fn test_ascending_order_with_colors() {
        let mut tree = RbTree::new();
        for key in [4, 2, 6, 1, 3, 5, 7] {
            tree.insert(key);
        }

        // Inserting 1 under the red 2 recolors 2 and 6 black and leaves the
        // later leaves red, so the full coloring is deterministic.
        let triples: Vec<(i32, Color, u32)> = tree
            .in_order()
            .map(|(key, color, count)| (*key, color, count))
            .collect();
        assert_eq!(
            triples,
            vec![
                (1, Color::Red, 1),
                (2, Color::Black, 1),
                (3, Color::Red, 1),
                (4, Color::Black, 1),
                (5, Color::Red, 1),
                (6, Color::Black, 1),
                (7, Color::Red, 1),
            ]
        );
    }

    #[test]
    fn test_independent_iterators() {
        let mut tree = RbTree::new();
        for key in [2, 1, 3] {
            tree.insert(key);
        }

        let mut first = tree.in_order();
        let mut second = tree.in_order();

        // Advancing one traversal does not disturb the other.
        assert_eq!(first.next().map(|(key, _, _)| *key), Some(1));
        assert_eq!(first.next().map(|(key, _, _)| *key), Some(2));
        assert_eq!(second.next().map(|(key, _, _)| *key), Some(1));
        assert_eq!(first.next().map(|(key, _, _)| *key), Some(3));
        assert!(first.next().is_none());
        assert_eq!(second.next().map(|(key, _, _)| *key), Some(2));
    }

    #[test]
    fn test_into_iterator_for_ref() {
        let mut tree = RbTree::new();
        tree.insert(10);
        tree.insert(5);

        let keys: Vec<i32> = (&tree).into_iter().map(|(key, _, _)| *key).collect();
        assert_eq!(keys, vec![5, 10]);
    }

    #[test]
    fn test_size_hint_upper_bound() {
        let mut tree = RbTree::new();
        for key in [1, 2, 2, 3] {
            tree.insert(key);
        }

        let iter = tree.in_order();
        assert_eq!(iter.size_hint(), (0, Some(3)));
        assert_eq!(iter.count(), 3);
    }
}

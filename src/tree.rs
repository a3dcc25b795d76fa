use core::cmp::Ordering;

use alloc::vec::Vec;

use crate::iter::InOrder;
use crate::node::{Color, NIL, Node};

/// A Red-Black tree multiset with O(log n) insertion and ordered traversal.
///
/// Nodes are stored in a growable arena and reference each other by stable
/// integer indices. Index `0` is reserved as the shared nil sentinel: it is
/// always black, every query for one of its links answers the sentinel again,
/// and it serves as every leaf and as the logical parent of the root. That
/// keeps the rotation and fix-up code free of null special cases.
///
/// Key features:
/// - Duplicate keys increment a per-node counter (multiset behavior)
/// - Iterative insertion fix-up, no recursion on the mutation path
/// - Height bounded by 2·log₂(n+1) for n distinct keys
/// - Lazy, restartable in-order traversal over `(key, color, count)` triples
#[derive(Debug, Clone)]
pub struct RbTree<K> {
    /// Arena of nodes; arena slot `i` holds the node addressed by index `i + 1`
    nodes: Vec<Node<K>>,

    /// Index of the root node, `NIL` when the tree is empty
    root: usize,

    /// Total number of insertions including duplicates
    total: usize,

    /// Number of rotations performed while rebalancing
    rotations: usize,

    /// Number of red-uncle recoloring steps performed while rebalancing
    recolors: usize,
}

impl<K> RbTree<K> {
    /// Creates an empty tree.
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: NIL,
            total: 0,
            rotations: 0,
            recolors: 0,
        }
    }

    /// Creates an empty tree with arena space for `capacity` distinct keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root: NIL,
            total: 0,
            rotations: 0,
            recolors: 0,
        }
    }

    /// Returns the number of distinct keys in the tree.
    #[inline]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the total number of insertions, counting duplicates.
    #[inline]
    pub const fn total_count(&self) -> usize {
        self.total
    }

    /// Returns `true` if no key has been inserted yet.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of rotations performed so far.
    ///
    /// Together with [`recolors`](Self::recolors) this exposes how the
    /// balancing state machine resolved past insertions.
    #[inline]
    pub const fn rotations(&self) -> usize {
        self.rotations
    }

    /// Returns the number of red-uncle recoloring steps performed so far.
    #[inline]
    pub const fn recolors(&self) -> usize {
        self.recolors
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    ///
    /// An empty tree has height 0. The red-black invariants bound this by
    /// 2·log₂(n+1) for n distinct keys.
    pub fn height(&self) -> usize {
        self.subtree_height(self.root)
    }

    fn subtree_height(&self, idx: usize) -> usize {
        if idx == NIL {
            return 0;
        }
        let node = self.node_at(idx);
        1 + self.subtree_height(node.left).max(self.subtree_height(node.right))
    }

    /// Returns a lazy in-order iterator over `(key, color, count)` triples
    /// in ascending key order.
    ///
    /// Each call starts an independent traversal; no cursor state is retained
    /// in the tree, so re-invoking this on an unmodified tree yields an
    /// identical sequence.
    pub fn in_order(&self) -> InOrder<'_, K> {
        InOrder::new(self)
    }

    #[inline]
    pub(crate) const fn root_index(&self) -> usize {
        self.root
    }

    #[inline]
    pub(crate) fn node_at(&self, idx: usize) -> &Node<K> {
        debug_assert!(idx != NIL && idx <= self.nodes.len());
        &self.nodes[idx - 1]
    }

    #[inline]
    fn node_at_mut(&mut self, idx: usize) -> &mut Node<K> {
        debug_assert!(idx != NIL && idx <= self.nodes.len());
        &mut self.nodes[idx - 1]
    }

    /// The sentinel reads as black, so a red-red check never needs a
    /// separate "has a parent" guard.
    #[inline]
    pub(crate) fn color_of(&self, idx: usize) -> Color {
        if idx == NIL {
            Color::Black
        } else {
            self.node_at(idx).color
        }
    }

    #[inline]
    fn set_color(&mut self, idx: usize, color: Color) {
        if idx != NIL {
            self.node_at_mut(idx).color = color;
        }
    }

    #[inline]
    fn parent_of(&self, idx: usize) -> usize {
        if idx == NIL { NIL } else { self.node_at(idx).parent }
    }

    #[inline]
    pub(crate) fn left_of(&self, idx: usize) -> usize {
        if idx == NIL { NIL } else { self.node_at(idx).left }
    }

    #[inline]
    pub(crate) fn right_of(&self, idx: usize) -> usize {
        if idx == NIL { NIL } else { self.node_at(idx).right }
    }
}

impl<K: Ord> RbTree<K> {
    /// Inserts `key` into the multiset.
    ///
    /// If the key is already present its multiplicity counter is incremented
    /// and the structure is left untouched. Otherwise a new red node is
    /// spliced in at the leaf position found by a standard BST descent and
    /// the balancing fix-up restores the red-black invariants. Never fails.
    pub fn insert(&mut self, key: K) {
        let existing = self.find_node(&key);
        if existing != NIL {
            self.node_at_mut(existing).count += 1;
            self.total += 1;
            return;
        }

        let parent = self.find_insertion_parent(&key);
        let goes_left = parent != NIL && key < self.node_at(parent).key;

        self.nodes.push(Node::new(key, parent));
        let new_idx = self.nodes.len();

        if parent == NIL {
            self.root = new_idx;
        } else if goes_left {
            self.node_at_mut(parent).left = new_idx;
        } else {
            self.node_at_mut(parent).right = new_idx;
        }

        self.total += 1;
        self.fix_insert(new_idx);

        #[cfg(debug_assertions)]
        debug_assert!(
            self.verify_invariants(),
            "red-black invariants violated after insert"
        );
    }

    /// Returns how many times `key` was inserted, `0` if it is absent.
    pub fn count(&self, key: &K) -> u32 {
        let idx = self.find_node(key);
        if idx == NIL { 0 } else { self.node_at(idx).count }
    }

    /// Returns `true` if `key` was inserted at least once.
    pub fn contains(&self, key: &K) -> bool {
        self.find_node(key) != NIL
    }

    /// Returns the smallest key, or `None` if the tree is empty.
    pub fn min(&self) -> Option<&K> {
        if self.root == NIL {
            return None;
        }
        let mut current = self.root;
        while self.left_of(current) != NIL {
            current = self.left_of(current);
        }
        Some(&self.node_at(current).key)
    }

    /// Returns the largest key, or `None` if the tree is empty.
    pub fn max(&self) -> Option<&K> {
        if self.root == NIL {
            return None;
        }
        let mut current = self.root;
        while self.right_of(current) != NIL {
            current = self.right_of(current);
        }
        Some(&self.node_at(current).key)
    }

    /// Descends from the root looking for `key`; returns `NIL` if absent.
    fn find_node(&self, key: &K) -> usize {
        let mut current = self.root;
        while current != NIL {
            let node = self.node_at(current);
            match key.cmp(&node.key) {
                Ordering::Equal => return current,
                Ordering::Less => current = node.left,
                Ordering::Greater => current = node.right,
            }
        }
        NIL
    }

    /// Second descent of an insertion: finds the leaf node that will become
    /// the parent of the spliced-in key. Only called when the key is absent,
    /// so equality never occurs along the way.
    fn find_insertion_parent(&self, key: &K) -> usize {
        let mut current = self.root;
        let mut parent = NIL;
        while current != NIL {
            parent = current;
            let node = self.node_at(current);
            current = if *key < node.key { node.left } else { node.right };
        }
        parent
    }

    /// Balancing after an insertion.
    ///
    /// On entry the only possible violation is a red `node` under a red
    /// parent. Each iteration looks at the uncle:
    /// - red uncle: recolor parent, uncle and grandparent and climb two
    ///   levels (case 1)
    /// - black uncle, inner child: rotate at the parent to reach the outer
    ///   shape (case 2)
    /// - black uncle, outer child: recolor and rotate at the grandparent,
    ///   which resolves the violation for good (case 3)
    ///
    /// The explicit `break` after case 3 is redundant with the loop guard
    /// (the new parent is black at that point) but mirrors the one-step
    /// termination of the case analysis.
    fn fix_insert(&mut self, mut node: usize) {
        while self.color_of(self.parent_of(node)) == Color::Red {
            let parent = self.parent_of(node);
            let grandparent = self.parent_of(parent);

            if parent == self.left_of(grandparent) {
                let uncle = self.right_of(grandparent);

                if self.color_of(uncle) == Color::Red {
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.recolors += 1;
                    node = grandparent;
                } else {
                    if node == self.right_of(parent) {
                        node = parent;
                        self.rotate_left(node);
                    }
                    let parent = self.parent_of(node);
                    let grandparent = self.parent_of(parent);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_right(grandparent);
                    break;
                }
            } else {
                let uncle = self.left_of(grandparent);

                if self.color_of(uncle) == Color::Red {
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.recolors += 1;
                    node = grandparent;
                } else {
                    if node == self.left_of(parent) {
                        node = parent;
                        self.rotate_right(node);
                    }
                    let parent = self.parent_of(node);
                    let grandparent = self.parent_of(parent);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_left(grandparent);
                    break;
                }
            }
        }

        // Root is forced black unconditionally (property 2).
        self.set_color(self.root, Color::Black);
    }

    /// Left rotation around `x`: `x`'s right child takes `x`'s place and
    /// `x` becomes its left child. In-order key ordering is preserved.
    fn rotate_left(&mut self, x: usize) {
        let y = self.right_of(x);
        if x == NIL || y == NIL {
            return;
        }

        let y_left = self.left_of(y);
        self.node_at_mut(x).right = y_left;
        if y_left != NIL {
            self.node_at_mut(y_left).parent = x;
        }

        let x_parent = self.parent_of(x);
        self.node_at_mut(y).parent = x_parent;

        if x_parent == NIL {
            self.root = y;
        } else if x == self.left_of(x_parent) {
            self.node_at_mut(x_parent).left = y;
        } else {
            self.node_at_mut(x_parent).right = y;
        }

        self.node_at_mut(y).left = x;
        self.node_at_mut(x).parent = y;

        self.rotations += 1;
    }

    /// Mirror image of [`rotate_left`](Self::rotate_left).
    fn rotate_right(&mut self, y: usize) {
        let x = self.left_of(y);
        if y == NIL || x == NIL {
            return;
        }

        let x_right = self.right_of(x);
        self.node_at_mut(y).left = x_right;
        if x_right != NIL {
            self.node_at_mut(x_right).parent = y;
        }

        let y_parent = self.parent_of(y);
        self.node_at_mut(x).parent = y_parent;

        if y_parent == NIL {
            self.root = x;
        } else if y == self.right_of(y_parent) {
            self.node_at_mut(y_parent).right = x;
        } else {
            self.node_at_mut(y_parent).left = x;
        }

        self.node_at_mut(x).right = y;
        self.node_at_mut(y).parent = x;

        self.rotations += 1;
    }

    #[cfg(debug_assertions)]
    fn verify_invariants(&self) -> bool {
        if self.root == NIL {
            return true;
        }

        if self.color_of(self.root) != Color::Black {
            return false;
        }

        self.black_height(self.root).is_some() && self.is_ordered(self.root, None, None)
    }

    /// Checks the no-red-red and equal-black-height properties of a subtree,
    /// returning its black-height or `None` on violation.
    #[cfg(debug_assertions)]
    fn black_height(&self, idx: usize) -> Option<usize> {
        if idx == NIL {
            return Some(1);
        }

        let node = self.node_at(idx);

        if node.color == Color::Red
            && (self.color_of(node.left) == Color::Red || self.color_of(node.right) == Color::Red)
        {
            return None;
        }

        let left_height = self.black_height(node.left)?;
        let right_height = self.black_height(node.right)?;

        if left_height != right_height {
            return None;
        }

        if node.color == Color::Black {
            Some(left_height + 1)
        } else {
            Some(left_height)
        }
    }

    #[cfg(debug_assertions)]
    fn is_ordered(&self, idx: usize, low: Option<&K>, high: Option<&K>) -> bool {
        if idx == NIL {
            return true;
        }

        let node = self.node_at(idx);
        if low.is_some_and(|low| node.key <= *low) {
            return false;
        }
        if high.is_some_and(|high| node.key >= *high) {
            return false;
        }

        self.is_ordered(node.left, low, Some(&node.key))
            && self.is_ordered(node.right, Some(&node.key), high)
    }
}

impl<K> Default for RbTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> Extend<K> for RbTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for RbTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

/// Sentinel index standing in for every absent child and for the root's
/// parent. Real nodes are addressed by indices ≥ 1, so link comparisons
/// against `NIL` replace nullable pointers throughout the tree code.
pub(crate) const NIL: usize = 0;

/// Red-Black tree node colors used to maintain tree balance properties.
///
/// Red-Black trees maintain balance by ensuring:
/// - Red nodes have black children
/// - All paths from root to leaves have equal black node counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Red node - must have black children, cannot be adjacent to other red nodes
    Red,
    /// Black node - can have children of any color, contributes to black height
    Black,
}

/// A node in the Red-Black tree containing a key and structural information.
///
/// Each node stores its key, duplicate count, tree relationships as arena
/// indices, and its color for balancing.
#[derive(Debug, Clone)]
pub(crate) struct Node<K> {
    /// The stored key; one node per distinct key
    pub(crate) key: K,

    /// Number of times this key was inserted (supports multiset behavior)
    pub(crate) count: u32,

    /// Color of this node (Red or Black) used for Red-Black tree balancing
    pub(crate) color: Color,

    /// Index of the parent node in the arena (`NIL` if this is the root)
    pub(crate) parent: usize,

    /// Index of the left child node in the arena (`NIL` if no left child)
    pub(crate) left: usize,

    /// Index of the right child node in the arena (`NIL` if no right child)
    pub(crate) right: usize,
}

impl<K> Node<K> {
    /// Freshly spliced nodes are always red with sentinel children.
    pub(crate) const fn new(key: K, parent: usize) -> Self {
        Self {
            key,
            count: 1,
            color: Color::Red,
            parent,
            left: NIL,
            right: NIL,
        }
    }
}

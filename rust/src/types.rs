//! Core types and data structures for AvlTree.
//!
//! This module contains the node layout, the tree struct itself and the
//! id/handle types shared by the engines and the cursors.

use crate::compact_arena::CompactArena;
use crate::compare::NaturalOrder;

// ============================================================================
// TYPE DEFINITIONS
// ============================================================================

/// Node ID type for arena-based allocation
pub type NodeId = u32;

/// Marks an absent child or an empty tree.
pub const NULL_NODE: NodeId = u32::MAX;

/// Heights are small: an AVL tree of height 64 would hold more nodes than
/// the `u32` id space can address.
pub type Height = u8;

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// An ordered set kept height-balanced with AVL rotations.
///
/// Elements are their own keys and are ordered by a comparator, `Ord` by
/// default. Nodes live in an arena and refer to their children by id; there
/// are no parent links, so every rebalancing pass works from an explicit
/// stack of ancestors collected while descending.
///
/// # Examples
///
/// ```
/// use avltree::{AvlTree, InOrder, LevelOrder};
///
/// let mut tree: AvlTree<i32> = (1..=7).collect();
/// assert_eq!(tree.len(), 7);
/// assert_eq!(tree.height(), 3);
///
/// let (_, inserted) = tree.insert(4);
/// assert!(!inserted);
///
/// let sorted: Vec<_> = tree.begin::<InOrder>().copied().collect();
/// assert_eq!(sorted, [1, 2, 3, 4, 5, 6, 7]);
///
/// let levels: Vec<_> = tree.begin::<LevelOrder>().copied().collect();
/// assert_eq!(levels, [4, 2, 6, 1, 3, 5, 7]);
///
/// assert_eq!(tree.erase(&4), 1);
/// assert_eq!(tree.erase(&4), 0);
/// ```
///
/// # Performance Characteristics
///
/// - **Insertion**: O(log n)
/// - **Lookup**: O(log n)
/// - **Deletion**: O(log n)
/// - **Traversal**: O(n), any of the four orders
/// - **Clear**: O(n log n), one erase per element
///
/// # Concurrency
///
/// The tree does no internal synchronisation. Cursors borrow the tree, so
/// the compiler rejects any mutation while one is alive.
#[derive(Debug, Clone)]
pub struct AvlTree<T, C = NaturalOrder> {
    /// Root of the node graph, `NULL_NODE` when empty.
    pub(crate) root: NodeId,
    /// Number of elements.
    pub(crate) len: usize,
    /// Strict weak order over `T`.
    pub(crate) comparator: C,
    /// Storage for every node reachable from `root`.
    pub(crate) nodes: CompactArena<AvlNode<T>>,
}

/// A tree node: one element, two child ids and the cached subtree height.
#[derive(Debug, Clone)]
pub struct AvlNode<T> {
    pub(crate) value: T,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
    /// 1 for a leaf; absent children count as 0.
    pub(crate) height: Height,
}

/// A copyable reference to a node, returned by `insert`, `find` and cursors.
///
/// Handles stay valid across inserts (nodes never move between slots) and
/// are invalidated by any erase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(pub(crate) NodeId);

impl Handle {
    /// Return the raw node ID.
    pub fn id(&self) -> NodeId {
        self.0
    }
}

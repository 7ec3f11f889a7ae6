//! AVL tree ordered set in Rust, with resumable traversal cursors.
//!
//! This crate provides a height-balanced binary search tree holding unique
//! elements under a pluggable strict weak order. Insertion and deletion run
//! iteratively: the engines record the ancestors of the touched node on an
//! explicit stack and rebalance along it bottom-up, so no operation recurses
//! and nodes carry no parent links.
//!
//! The tree can be walked in pre-order, in-order, post-order and
//! level-order. Every walk is a cursor that can be cloned, paused and
//! resumed, and a walk can start at any node, covering only its subtree.
//!
//! The [`graph`] module builds Kruskal's minimum spanning forest on top of
//! the tree and backs the `mst` binary.

#[macro_use]
mod macros;

mod compact_arena;
mod compare;
mod error;
mod stack;
mod types;
mod construction;
mod get_operations;
mod insert_operations;
mod delete_operations;
mod node;
mod iteration;
mod validation;

pub mod graph;

pub use compact_arena::CompactArenaStats;
pub use compare::{Compare, NaturalOrder};
pub use error::{AvlResult, AvlResultExt, AvlTreeError, KeyResult, ModifyResult};
pub use iteration::{
    Cursor, InOrder, InOrderCursor, LevelOrder, LevelOrderCursor, PostOrder, PostOrderCursor,
    PreOrder, PreOrderCursor, Traversal,
};
pub use stack::PathStack;
pub use types::{AvlTree, Handle, NodeId};

impl<T, C> AvlTree<T, C> {
    // ============================================================================
    // SIZE AND STORAGE
    // ============================================================================

    /// Returns the number of elements in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Statistics for the node arena, including slots freed by erase and not
    /// yet reused.
    pub fn node_stats(&self) -> CompactArenaStats {
        self.nodes.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_tracks_inserts_and_erases() {
        let mut tree = AvlTree::new();
        assert!(tree.is_empty());
        for i in 0..10 {
            tree.insert(i);
        }
        assert_eq!(tree.len(), 10);
        tree.erase(&3);
        tree.erase(&3);
        assert_eq!(tree.len(), 9);
        assert!(!tree.is_empty());
    }

    #[test]
    fn test_node_stats_after_churn() {
        let mut tree: AvlTree<u32> = (0..8).collect();
        for i in 0..4 {
            tree.erase(&i);
        }
        let stats = tree.node_stats();
        assert_eq!(stats.allocated_count, 4);
        assert_eq!(stats.free_count, 4);
        assert_eq!(stats.total_capacity, 8);
        assert!((stats.fragmentation - 0.5).abs() < f64::EPSILON);

        tree.insert(100);
        assert_eq!(tree.node_stats().free_count, 3);
        assert_eq!(tree.node_stats().total_capacity, 8);
    }
}

//! Traversal cursors for AvlTree.
//!
//! Four cursor types walk the node graph in pre-, in-, post- and level-order.
//! None of them recurses: each keeps its pending work on explicit stacks, so
//! a cursor can be paused, cloned and resumed at will. A cursor can start at
//! any node, not only the root, and then walks that node's subtree.
//!
//! Cursors borrow the tree they walk. Mutating the tree while a cursor is
//! alive would leave stale node ids on its stacks, so the borrow checker
//! refuses it.

use std::fmt::Debug;

use crate::compact_arena::CompactArena;
use crate::error::{AvlResult, AvlTreeError};
use crate::stack::PathStack;
use crate::types::{AvlNode, AvlTree, Handle, NodeId, NULL_NODE};

// ============================================================================
// CURSOR CONTRACT
// ============================================================================

/// A forward-only, resumable position in a traversal.
///
/// A cursor is exhausted once it has moved past the last node of its
/// traversal; advancing an exhausted cursor does nothing.
pub trait Cursor<'a, T: 'a>: Iterator<Item = &'a T> + Clone + PartialEq + Debug {
    /// The node under the cursor, `None` when exhausted.
    fn handle(&self) -> Option<Handle>;

    /// The element under the cursor, `None` when exhausted.
    fn get(&self) -> Option<&'a T>;

    /// Move to the next node of the traversal.
    fn advance(&mut self);

    fn is_exhausted(&self) -> bool;

    /// The element under the cursor.
    ///
    /// # Panics
    ///
    /// Panics when the cursor is exhausted.
    fn value(&self) -> &'a T {
        match self.get() {
            Some(value) => value,
            None => panic!("dereferenced an exhausted cursor"),
        }
    }

    /// The element under the cursor, or `ExhaustedCursor`.
    fn try_value(&self) -> AvlResult<&'a T> {
        self.get().ok_or(AvlTreeError::ExhaustedCursor)
    }
}

/// A traversal order, used to pick a cursor type in
/// [`AvlTree::begin`] and [`AvlTree::end`].
pub trait Traversal {
    type Cursor<'a, T: 'a>: Cursor<'a, T>;

    /// Cursor walking the subtree rooted at `start`; exhausted when `start`
    /// is `None` or a handle whose node has been erased.
    fn cursor_at<'a, T: 'a, C: 'a>(tree: &'a AvlTree<T, C>, start: Option<Handle>) -> Self::Cursor<'a, T>;
}

/// Node, left subtree, right subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreOrder {}

/// Left subtree, node, right subtree: ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InOrder {}

/// Left subtree, right subtree, node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostOrder {}

/// Breadth-first, level by level, left to right within a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelOrder {}

// ============================================================================
// TREE ENTRY POINTS
// ============================================================================

impl<T, C> AvlTree<T, C> {
    /// Cursor at the first node of the chosen traversal over the whole tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltree::{AvlTree, Cursor, PostOrder};
    ///
    /// let tree: AvlTree<i32> = [4, 2, 6, 1, 3, 5, 7].into_iter().collect();
    /// let mut cursor = tree.begin::<PostOrder>();
    /// assert_eq!(cursor.value(), &1);
    /// cursor.advance();
    /// assert_eq!(cursor.value(), &3);
    /// assert_ne!(cursor, tree.end::<PostOrder>());
    /// ```
    pub fn begin<O: Traversal>(&self) -> O::Cursor<'_, T> {
        O::cursor_at(self, Some(Handle(self.root)))
    }

    /// The exhausted cursor every traversal of this tree ends at.
    pub fn end<O: Traversal>(&self) -> O::Cursor<'_, T> {
        O::cursor_at(self, None)
    }

    /// Cursor walking only the subtree rooted at `handle`.
    pub fn begin_at<O: Traversal>(&self, handle: Handle) -> O::Cursor<'_, T> {
        O::cursor_at(self, Some(handle))
    }

    /// Ascending iteration, same as `begin::<InOrder>()`.
    pub fn iter(&self) -> InOrderCursor<'_, T> {
        self.begin::<InOrder>()
    }
}

impl<'a, T, C> IntoIterator for &'a AvlTree<T, C> {
    type Item = &'a T;
    type IntoIter = InOrderCursor<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

traversal_shortcuts! {
    PreOrder => pre_order,
    InOrder => in_order,
    PostOrder => post_order,
    LevelOrder => level_order,
}

/// The node `start` names if it is live, otherwise the exhausted marker.
fn live<T>(nodes: &CompactArena<AvlNode<T>>, start: Option<Handle>) -> NodeId {
    match start {
        Some(Handle(node)) if nodes.contains(node) => node,
        _ => NULL_NODE,
    }
}

// ============================================================================
// PRE-ORDER
// ============================================================================

/// Cursor yielding each node before its subtrees.
pub struct PreOrderCursor<'a, T> {
    nodes: &'a CompactArena<AvlNode<T>>,
    current: NodeId,
    /// Right subtrees still to visit, nearest on top.
    pending: PathStack,
}

impl Traversal for PreOrder {
    type Cursor<'a, T: 'a> = PreOrderCursor<'a, T>;

    fn cursor_at<'a, T: 'a, C: 'a>(tree: &'a AvlTree<T, C>, start: Option<Handle>) -> Self::Cursor<'a, T> {
        PreOrderCursor {
            nodes: &tree.nodes,
            current: live(&tree.nodes, start),
            pending: PathStack::new(),
        }
    }
}

impl<'a, T> PreOrderCursor<'a, T> {
    fn step(&mut self) {
        if let Some(node) = self.nodes.get(self.current) {
            if node.right != NULL_NODE {
                self.pending.push(node.right);
            }
            if node.left != NULL_NODE {
                self.pending.push(node.left);
            }
        }
        self.current = self.pending.pop().unwrap_or(NULL_NODE);
    }
}

impl_cursor!(PreOrderCursor { pending });

// ============================================================================
// IN-ORDER
// ============================================================================

/// Cursor yielding elements in ascending order.
pub struct InOrderCursor<'a, T> {
    nodes: &'a CompactArena<AvlNode<T>>,
    current: NodeId,
    /// Ancestors whose left subtree is being walked.
    pending: PathStack,
}

impl Traversal for InOrder {
    type Cursor<'a, T: 'a> = InOrderCursor<'a, T>;

    fn cursor_at<'a, T: 'a, C: 'a>(tree: &'a AvlTree<T, C>, start: Option<Handle>) -> Self::Cursor<'a, T> {
        let mut cursor = InOrderCursor {
            nodes: &tree.nodes,
            current: NULL_NODE,
            pending: PathStack::new(),
        };
        cursor.push_left_spine(live(&tree.nodes, start));
        cursor.current = cursor.pending.pop().unwrap_or(NULL_NODE);
        cursor
    }
}

impl<'a, T> InOrderCursor<'a, T> {
    fn push_left_spine(&mut self, mut id: NodeId) {
        while let Some(node) = self.nodes.get(id) {
            self.pending.push(id);
            id = node.left;
        }
    }

    fn step(&mut self) {
        if let Some(node) = self.nodes.get(self.current) {
            self.push_left_spine(node.right);
        }
        self.current = self.pending.pop().unwrap_or(NULL_NODE);
    }
}

impl_cursor!(InOrderCursor { pending });

// ============================================================================
// POST-ORDER
// ============================================================================

/// Cursor yielding each node after both of its subtrees.
///
/// The whole order is computed when the cursor is created: a node-right-left
/// walk is pushed onto `output`, which then pops in left-right-node order.
pub struct PostOrderCursor<'a, T> {
    nodes: &'a CompactArena<AvlNode<T>>,
    current: NodeId,
    output: PathStack,
}

impl Traversal for PostOrder {
    type Cursor<'a, T: 'a> = PostOrderCursor<'a, T>;

    fn cursor_at<'a, T: 'a, C: 'a>(tree: &'a AvlTree<T, C>, start: Option<Handle>) -> Self::Cursor<'a, T> {
        let nodes = &tree.nodes;
        let mut output = PathStack::new();
        let mut work = PathStack::new();
        let node = live(nodes, start);
        if node != NULL_NODE {
            work.push(node);
        }
        while let Some(id) = work.pop() {
            output.push(id);
            if let Some(n) = nodes.get(id) {
                if n.left != NULL_NODE {
                    work.push(n.left);
                }
                if n.right != NULL_NODE {
                    work.push(n.right);
                }
            }
        }

        let current = output.pop().unwrap_or(NULL_NODE);
        PostOrderCursor {
            nodes,
            current,
            output,
        }
    }
}

impl<'a, T> PostOrderCursor<'a, T> {
    fn step(&mut self) {
        self.current = self.output.pop().unwrap_or(NULL_NODE);
    }

    /// Nodes left to yield after the current one.
    pub fn remaining(&self) -> usize {
        self.output.len()
    }
}

impl_cursor!(PostOrderCursor { output });

// ============================================================================
// LEVEL-ORDER
// ============================================================================

/// Cursor yielding nodes level by level.
///
/// `active` holds the rest of the current level and `next` collects the
/// children of the nodes already yielded. When `active` runs dry the stacks
/// swap roles; `next` is reversed on the swap so each level comes out left
/// to right, exactly as a queue-based breadth-first walk would yield it.
pub struct LevelOrderCursor<'a, T> {
    nodes: &'a CompactArena<AvlNode<T>>,
    current: NodeId,
    active: PathStack,
    next: PathStack,
}

impl Traversal for LevelOrder {
    type Cursor<'a, T: 'a> = LevelOrderCursor<'a, T>;

    fn cursor_at<'a, T: 'a, C: 'a>(tree: &'a AvlTree<T, C>, start: Option<Handle>) -> Self::Cursor<'a, T> {
        LevelOrderCursor {
            nodes: &tree.nodes,
            current: live(&tree.nodes, start),
            active: PathStack::new(),
            next: PathStack::new(),
        }
    }
}

impl<'a, T> LevelOrderCursor<'a, T> {
    fn step(&mut self) {
        if let Some(node) = self.nodes.get(self.current) {
            if node.left != NULL_NODE {
                self.next.push(node.left);
            }
            if node.right != NULL_NODE {
                self.next.push(node.right);
            }
        }
        if self.active.is_empty() {
            std::mem::swap(&mut self.active, &mut self.next);
            self.active.reverse();
        }
        self.current = self.active.pop().unwrap_or(NULL_NODE);
    }
}

impl_cursor!(LevelOrderCursor { active, next });

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_tree() -> AvlTree<i32> {
        [4, 2, 6, 1, 3, 5, 7].into_iter().collect()
    }

    #[test]
    fn test_four_orders_on_complete_tree() {
        let tree = complete_tree();
        let pre: Vec<_> = tree.begin::<PreOrder>().copied().collect();
        let ino: Vec<_> = tree.begin::<InOrder>().copied().collect();
        let post: Vec<_> = tree.begin::<PostOrder>().copied().collect();
        let level: Vec<_> = tree.begin::<LevelOrder>().copied().collect();

        assert_eq!(pre, [4, 2, 1, 3, 6, 5, 7]);
        assert_eq!(ino, [1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(post, [1, 3, 2, 5, 7, 6, 4]);
        assert_eq!(level, [4, 2, 6, 1, 3, 5, 7]);
    }

    #[test]
    fn test_named_shortcuts_match_begin() {
        let tree = complete_tree();
        assert!(tree.pre_order().eq(tree.begin::<PreOrder>()));
        assert!(tree.in_order().eq(tree.iter()));
        assert!(tree.post_order().eq(tree.begin::<PostOrder>()));
        assert!(tree.level_order().eq(tree.begin::<LevelOrder>()));
        assert!((&tree).into_iter().eq(tree.iter()));
    }

    #[test]
    fn test_empty_tree_cursors_start_exhausted() {
        let tree = AvlTree::<i32>::new();
        assert!(tree.begin::<PreOrder>().is_exhausted());
        assert!(tree.begin::<InOrder>().is_exhausted());
        assert!(tree.begin::<PostOrder>().is_exhausted());
        assert!(tree.begin::<LevelOrder>().is_exhausted());
        assert!(tree.begin::<InOrder>() == tree.end::<InOrder>());
    }

    #[test]
    fn test_subtree_traversal_from_handle() {
        let tree = complete_tree();
        let two = tree.find(&2).unwrap();
        let six = tree.find(&6).unwrap();

        let sub: Vec<_> = tree.begin_at::<InOrder>(two).copied().collect();
        assert_eq!(sub, [1, 2, 3]);
        let sub: Vec<_> = tree.pre_order_from(six).copied().collect();
        assert_eq!(sub, [6, 5, 7]);
        let sub: Vec<_> = tree.post_order_from(two).copied().collect();
        assert_eq!(sub, [1, 3, 2]);
        let sub: Vec<_> = tree.level_order_from(six).copied().collect();
        assert_eq!(sub, [6, 5, 7]);
    }

    #[test]
    fn test_cloned_cursor_advances_independently() {
        let tree = complete_tree();
        let mut a = tree.begin::<LevelOrder>();
        a.advance();
        a.advance();
        let mut b = a.clone();
        assert!(a == b);
        assert_eq!(b.value(), &6);

        b.advance();
        assert_eq!(b.value(), &1);
        assert_eq!(a.value(), &6);
        assert!(a != b);

        let rest_a: Vec<_> = a.copied().collect();
        let rest_b: Vec<_> = b.copied().collect();
        assert_eq!(rest_a, [6, 1, 3, 5, 7]);
        assert_eq!(rest_b, [1, 3, 5, 7]);
    }

    #[test]
    fn test_exhausted_cursor_advance_is_noop() {
        let tree = complete_tree();
        let mut cursor = tree.begin::<PreOrder>();
        for _ in 0..7 {
            assert!(!cursor.is_exhausted());
            cursor.advance();
        }
        assert!(cursor.is_exhausted());
        cursor.advance();
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.get(), None);
        assert_eq!(cursor.handle(), None);
        assert_eq!(cursor.try_value(), Err(AvlTreeError::ExhaustedCursor));
        assert!(cursor == tree.end::<PreOrder>());
    }

    #[test]
    #[should_panic(expected = "exhausted cursor")]
    fn test_dereferencing_end_panics() {
        let tree = complete_tree();
        tree.end::<InOrder>().value();
    }

    #[test]
    fn test_cursor_handle_feeds_erase() {
        let mut tree = complete_tree();
        let handle = {
            let mut cursor = tree.begin::<PostOrder>();
            cursor.advance();
            cursor.handle().unwrap()
        };
        assert_eq!(tree.erase_at(handle), Some(3));
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_post_order_is_materialized_up_front() {
        let tree = complete_tree();
        let mut cursor = tree.begin::<PostOrder>();
        assert_eq!(cursor.remaining(), 6);
        cursor.advance();
        assert_eq!(cursor.remaining(), 5);
    }

    #[test]
    fn test_level_order_on_uneven_tree() {
        let tree: AvlTree<i32> = [5, 3, 8, 1, 4, 7, 9, 2, 6].into_iter().collect();
        let level: Vec<_> = tree.level_order().copied().collect();
        assert_eq!(level, [5, 3, 8, 1, 4, 7, 9, 2, 6]);
    }

    #[test]
    fn test_invalid_handle_gives_exhausted_cursor() {
        let mut tree = complete_tree();
        let gone = tree.find(&7).unwrap();
        tree.erase(&7);
        assert!(tree.begin_at::<InOrder>(gone).is_exhausted());
    }

    #[test]
    fn test_cursor_debug_shows_position_without_element_debug() {
        struct Opaque(u8);
        let mut tree = AvlTree::with_comparator(|a: &Opaque, b: &Opaque| a.0 < b.0);
        tree.extend([Opaque(2), Opaque(1), Opaque(3)]);

        let cursor = tree.begin::<LevelOrder>();
        let shown = format!("{:?}", cursor);
        assert!(shown.starts_with("LevelOrderCursor { current: "), "{}", shown);
        assert!(shown.contains("active: "), "{}", shown);
        assert!(shown.contains("next: "), "{}", shown);

        let ints = complete_tree();
        assert_ne!(ints.begin::<PostOrder>(), ints.end::<PostOrder>());
        assert_eq!(ints.end::<InOrder>(), ints.end::<InOrder>());
    }

    #[test]
    fn test_traversal_starts_from_handles_only() {
        let tree = complete_tree();
        assert!(InOrder::cursor_at(&tree, None).is_exhausted());
        assert_eq!(InOrder::cursor_at(&tree, None), tree.end::<InOrder>());

        let six = tree.find(&6);
        let sub: Vec<_> = PreOrder::cursor_at(&tree, six).copied().collect();
        assert_eq!(sub, [6, 5, 7]);
        let sub: Vec<_> = PostOrder::cursor_at(&tree, six).copied().collect();
        assert_eq!(sub, [5, 7, 6]);
    }
}

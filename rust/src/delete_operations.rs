//! DELETE operations for AvlTree.
//!
//! Removal splices the target out of its parent's child slot. A node with
//! two children is replaced by its in-order successor, which is itself
//! unhooked from deeper in the right subtree first. Both the successor's
//! descent path and the path above the removed node are then retraced, and
//! unlike insertion several of those ancestors may need a rotation.

use log::{debug, warn};

use crate::compare::Compare;
use crate::error::{AvlTreeError, ModifyResult, TreeResult};
use crate::iteration::{Cursor, InOrder};
use crate::stack::PathStack;
use crate::types::{AvlTree, Handle, NodeId, NULL_NODE};

impl<T, C: Compare<T>> AvlTree<T, C> {
    /// Remove the element equivalent to `key`.
    ///
    /// Returns the number of elements removed: 1, or 0 when the key is
    /// absent, in which case the tree is untouched.
    ///
    /// # Panics
    ///
    /// Panics if the rebalancing engine finds its own invariants broken.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltree::AvlTree;
    ///
    /// let mut tree: AvlTree<i32> = (1..=3).collect();
    /// assert_eq!(tree.erase(&2), 1);
    /// assert_eq!(tree.erase(&2), 0);
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn erase(&mut self, key: &T) -> usize {
        usize::from(self.take(key).is_some())
    }

    /// Remove the element equivalent to `key` and hand it back.
    ///
    /// # Panics
    ///
    /// Panics if the rebalancing engine finds its own invariants broken.
    pub fn take(&mut self, key: &T) -> Option<T> {
        match self.path_to(key).and_then(|path| self.remove_path(path)) {
            Ok(removed) => removed,
            Err(e) => panic!("AVL erase failed: {}", e),
        }
    }

    /// Remove the element a handle (from `insert`, `find` or a cursor)
    /// refers to.
    ///
    /// Returns `None` if the handle's slot is empty. Erasing invalidates
    /// every outstanding handle: a stale handle whose slot has been reused
    /// refers to the newer element.
    ///
    /// # Panics
    ///
    /// Panics if the rebalancing engine finds its own invariants broken.
    pub fn erase_at(&mut self, handle: Handle) -> Option<T> {
        match self.remove_handle(handle) {
            Ok(removed) => Some(removed),
            Err(AvlTreeError::InvalidHandle(_)) => None,
            Err(e) => panic!("AVL erase failed: {}", e),
        }
    }

    /// Remove with invariant checks before and after the mutation.
    pub fn try_erase(&mut self, key: &T) -> ModifyResult<T> {
        if let Err(e) = self.check_invariants_detailed() {
            warn!("erase refused, tree invalid before removal: {}", e);
            return Err(AvlTreeError::DataIntegrityError(e));
        }

        let removed = self
            .remove_path(self.path_to(key)?)?
            .ok_or(AvlTreeError::KeyNotFound)?;

        if let Err(e) = self.check_invariants_detailed() {
            warn!("tree invalid after removal: {}", e);
            return Err(AvlTreeError::DataIntegrityError(e));
        }

        Ok(removed)
    }

    /// Remove and return the least element.
    pub fn pop_first(&mut self) -> Option<T> {
        let handle = self.extreme_handle(|node| node.left)?;
        self.erase_at(handle)
    }

    /// Remove and return the greatest element.
    pub fn pop_last(&mut self) -> Option<T> {
        let handle = self.extreme_handle(|node| node.right)?;
        self.erase_at(handle)
    }

    /// Remove every element by repeatedly erasing `begin::<InOrder>()`.
    ///
    /// O(n log n): each element leaves through the ordinary removal path.
    /// Freed slots stay in the arena and are reused, most recently freed
    /// (the greatest element's) first.
    pub fn clear(&mut self) {
        debug!("clearing tree of {} elements", self.len);
        loop {
            let first = self.begin::<InOrder>().handle();
            let Some(handle) = first else {
                break;
            };
            if self.erase_at(handle).is_none() {
                break;
            }
        }
    }

    // ============================================================================
    // DELETION ENGINE
    // ============================================================================

    fn remove_handle(&mut self, handle: Handle) -> TreeResult<T> {
        let value = match self.nodes.get(handle.0) {
            Some(node) => &node.value,
            None => return Err(AvlTreeError::InvalidHandle(handle.0)),
        };
        let path = self.path_to(value)?;
        if path.peek() != Some(handle.0) {
            return Err(AvlTreeError::corrupted_tree(
                "Handle",
                &format!("node {} is not reachable by its own value", handle.0),
            ));
        }
        self.remove_path(path)?
            .ok_or_else(|| AvlTreeError::corrupted_tree("Path", "located node vanished"))
    }

    /// Remove the node on top of `path` (a `path_to` result).
    fn remove_path(&mut self, mut path: PathStack) -> TreeResult<Option<T>> {
        let target = match path.pop() {
            Some(NULL_NODE) | None => return Ok(None),
            Some(id) => id,
        };
        let parent = path.peek().unwrap_or(NULL_NODE);
        let (left, right, two_children) = {
            let node = self.node(target)?;
            (node.left, node.right, node.has_two_children())
        };

        if two_children {
            let successor = self.splice_successor(target, parent, left, right)?;
            path.push(successor);
        } else {
            let child = if left == NULL_NODE { right } else { left };
            self.replace_child(parent, target, child)?;
        }

        self.retrace(&mut path, NULL_NODE)?;

        let node = self
            .nodes
            .deallocate(target)
            .ok_or_else(|| AvlTreeError::arena_error("Deallocation", &format!("node {} was not live", target)))?;
        self.len -= 1;
        Ok(Some(node.value))
    }

    /// Move the leftmost node of `right` into `target`'s place and retrace
    /// the path the successor was taken from. Returns the successor.
    fn splice_successor(
        &mut self,
        target: NodeId,
        parent: NodeId,
        left: NodeId,
        right: NodeId,
    ) -> TreeResult<NodeId> {
        let mut sub_path = PathStack::new();
        let mut successor = right;
        loop {
            let next = self.node(successor)?.left;
            if next == NULL_NODE {
                break;
            }
            sub_path.push(successor);
            successor = next;
        }

        match sub_path.peek() {
            Some(successor_parent) => {
                let orphan = self.node(successor)?.right;
                self.node_mut(successor_parent)?.left = orphan;
                let node = self.node_mut(successor)?;
                node.left = left;
                node.right = right;
            }
            // The right child is the successor and keeps its own right subtree.
            None => self.node_mut(successor)?.left = left,
        }
        self.replace_child(parent, target, successor)?;
        debug!("node {} replaced by successor {}", target, successor);

        self.retrace(&mut sub_path, successor)?;
        Ok(successor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InOrder, PreOrder};

    fn pre_order(tree: &AvlTree<i32>) -> Vec<i32> {
        tree.begin::<PreOrder>().copied().collect()
    }

    #[test]
    fn test_erase_leaf_one_child_and_root() {
        let mut tree: AvlTree<i32> = [2, 1, 3, 4].into_iter().collect();
        assert_eq!(tree.erase(&4), 1); // leaf
        assert_eq!(pre_order(&tree), [2, 1, 3]);

        tree.insert(4);
        assert_eq!(tree.erase(&3), 1); // one child
        assert_eq!(pre_order(&tree), [2, 1, 4]);

        assert_eq!(tree.erase(&2), 1); // root with two children
        assert_eq!(pre_order(&tree), [4, 1]);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_erase_two_children_relocates_successor() {
        let mut tree: AvlTree<i32> = [5, 3, 8, 1, 4, 7, 9, 2, 6].into_iter().collect();
        assert_eq!(tree.erase(&5), 1);
        assert_eq!(tree.get(Handle(tree.root)), Some(&6));
        assert_eq!(pre_order(&tree), [6, 3, 1, 2, 4, 8, 7, 9]);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_erase_when_right_child_is_successor() {
        let mut tree: AvlTree<i32> = [2, 1, 3].into_iter().collect();
        assert_eq!(tree.erase(&2), 1);
        assert_eq!(pre_order(&tree), [3, 1]);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_erase_needing_rotations_at_several_levels() {
        // A minimal (Fibonacci) AVL tree: deleting from the short side of the
        // root cascades rotations up the path.
        let mut tree: AvlTree<i32> = [8, 5, 11, 3, 7, 10, 12, 2, 4, 6, 9, 1].into_iter().collect();
        assert!(tree.check_invariants());
        assert_eq!(tree.erase(&12), 1);
        assert!(tree.check_invariants());
        let values: Vec<_> = tree.begin::<InOrder>().copied().collect();
        assert_eq!(values, [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
    }

    #[test]
    fn test_erase_missing_key_is_idempotent() {
        let mut tree: AvlTree<i32> = (0..10).collect();
        let before = pre_order(&tree);
        for _ in 0..3 {
            assert_eq!(tree.erase(&42), 0);
        }
        assert_eq!(pre_order(&tree), before);
        assert_eq!(AvlTree::<i32>::new().erase(&1), 0);
    }

    #[test]
    fn test_take_and_erase_at() {
        let mut tree: AvlTree<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        assert_eq!(tree.take(&"b".to_string()), Some("b".to_string()));

        let handle = tree.find(&"c".to_string()).unwrap();
        assert_eq!(tree.erase_at(handle), Some("c".to_string()));
        assert_eq!(tree.erase_at(handle), None);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_erase_at_cursor_position() {
        let mut tree: AvlTree<i32> = (1..=10).collect();
        let third = tree.begin::<InOrder>().nth(2).copied().unwrap();
        let handle = tree.find(&third).unwrap();
        assert_eq!(tree.erase_at(handle), Some(3));
        assert!(!tree.contains(&3));
    }

    #[test]
    fn test_try_erase_reports_missing_key() {
        let mut tree: AvlTree<i32> = (1..=3).collect();
        assert_eq!(tree.try_erase(&2), Ok(2));
        assert_eq!(tree.try_erase(&2), Err(AvlTreeError::KeyNotFound));
    }

    #[test]
    fn test_pop_first_and_last() {
        let mut tree: AvlTree<i32> = [4, 2, 6, 1, 3, 5, 7].into_iter().collect();
        assert_eq!(tree.pop_first(), Some(1));
        assert_eq!(tree.pop_last(), Some(7));
        assert_eq!(tree.pop_first(), Some(2));
        assert_eq!(tree.len(), 4);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_clear_empties_and_frees_every_slot() {
        let mut tree: AvlTree<i32> = (0..100).collect();
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.root, NULL_NODE);
        assert_eq!(tree.node_stats().allocated_count, 0);
        assert_eq!(tree.begin::<InOrder>().count(), 0);

        // freed slots are reused
        tree.extend(0..100);
        assert_eq!(tree.node_stats().total_capacity, 100);
    }

    #[test]
    fn test_clear_erases_in_ascending_order() {
        let mut tree = AvlTree::new();
        let handles: Vec<Handle> = (0..10).map(|i| tree.insert(i).0).collect();
        tree.clear();
        assert!(tree.check_invariants());

        // the free list hands back the last slot erased: the greatest element's
        let (reused, _) = tree.insert(42);
        assert_eq!(reused, handles[9]);
        let (reused, _) = tree.insert(43);
        assert_eq!(reused, handles[8]);
    }
}

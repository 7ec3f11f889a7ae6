//! GET operations for AvlTree.
//!
//! Read-only lookups: plain binary descent for `find`, and the ancestor-path
//! descent the insert and delete engines start from.

use std::cmp::Ordering;

use crate::compare::Compare;
use crate::error::{AvlTreeError, KeyResult, TreeResult};
use crate::stack::PathStack;
use crate::types::{AvlNode, AvlTree, Handle, NodeId, NULL_NODE};

impl<T, C: Compare<T>> AvlTree<T, C> {
    // ============================================================================
    // PUBLIC GET OPERATIONS
    // ============================================================================

    /// Locate the element equivalent to `key`.
    ///
    /// Returns `None`, the end sentinel, when no such element exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltree::AvlTree;
    ///
    /// let tree: AvlTree<i32> = [10, 20, 30].into_iter().collect();
    /// let handle = tree.find(&20).unwrap();
    /// assert_eq!(tree.get(handle), Some(&20));
    /// assert!(tree.find(&25).is_none());
    /// ```
    pub fn find(&self, key: &T) -> Option<Handle> {
        let mut current = self.root;
        while let Some(node) = self.nodes.get(current) {
            current = match self.comparator.ordering(key, &node.value) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(Handle(current)),
            };
        }
        None
    }

    /// Check if an equivalent element exists in the tree.
    pub fn contains(&self, key: &T) -> bool {
        self.find(key).is_some()
    }

    /// The stored element equivalent to `key`.
    pub fn get_equivalent(&self, key: &T) -> Option<&T> {
        self.find(key).and_then(|handle| self.get(handle))
    }

    /// Like [`get_equivalent`](Self::get_equivalent), with `KeyNotFound` for
    /// a missing key.
    pub fn get_item(&self, key: &T) -> KeyResult<&T> {
        self.get_equivalent(key).ok_or(AvlTreeError::KeyNotFound)
    }

    // ============================================================================
    // PATH TRACKING
    // ============================================================================

    /// Descend from the root towards `key`, pushing every visited node.
    ///
    /// The top of the returned stack is the node equivalent to `key`, or
    /// `NULL_NODE` when the key is absent (the empty slot a new leaf would
    /// take). Ancestors sit below it in root-to-leaf order.
    pub(crate) fn path_to(&self, key: &T) -> TreeResult<PathStack> {
        let mut path = PathStack::with_capacity(usize::from(self.height()) + 1);
        let mut current = self.root;
        loop {
            path.push(current);
            if current == NULL_NODE {
                return Ok(path);
            }
            let node = self.node(current)?;
            current = match self.comparator.ordering(key, &node.value) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Ok(path),
            };
        }
    }
}

impl<T, C> AvlTree<T, C> {
    /// The element a handle refers to, `None` once it has been erased.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.nodes.get(handle.0).map(|node| &node.value)
    }

    /// Height of the tree: 0 when empty, 1 for a single node.
    pub fn height(&self) -> u8 {
        self.nodes.get(self.root).map_or(0, |node| node.height)
    }

    /// The least element.
    pub fn first(&self) -> Option<&T> {
        self.extreme_handle(|node| node.left).and_then(|handle| self.get(handle))
    }

    /// The greatest element.
    pub fn last(&self) -> Option<&T> {
        self.extreme_handle(|node| node.right).and_then(|handle| self.get(handle))
    }

    /// Follow `step` from the root until it runs out of children.
    pub(crate) fn extreme_handle(&self, step: impl Fn(&AvlNode<T>) -> NodeId) -> Option<Handle> {
        let mut id = self.root;
        let mut node = self.nodes.get(id)?;
        loop {
            let next = step(node);
            match self.nodes.get(next) {
                Some(child) => {
                    id = next;
                    node = child;
                }
                None => return Some(Handle(id)),
            }
        }
    }
}

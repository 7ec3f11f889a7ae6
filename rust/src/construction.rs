//! Construction and initialization logic for AvlTree.
//!
//! A tree is configured by two things only: the comparator it orders its
//! elements with and the number of node slots to reserve up front.

use crate::compact_arena::CompactArena;
use crate::compare::{Compare, NaturalOrder};
use crate::types::{AvlTree, NULL_NODE};

impl<T> AvlTree<T, NaturalOrder> {
    /// Create an empty tree ordered by `T: Ord`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltree::AvlTree;
    ///
    /// let tree = AvlTree::<i32>::new();
    /// assert!(tree.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }

    /// Create an empty tree with room for `capacity` nodes before the arena
    /// has to grow.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, NaturalOrder)
    }
}

impl<T, C> AvlTree<T, C> {
    /// Create an empty tree ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltree::{AvlTree, InOrder};
    ///
    /// let mut tree = AvlTree::with_comparator(|a: &i32, b: &i32| a > b);
    /// tree.extend([1, 3, 2]);
    /// let values: Vec<_> = tree.begin::<InOrder>().copied().collect();
    /// assert_eq!(values, [3, 2, 1]);
    /// ```
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_capacity_and_comparator(0, comparator)
    }

    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        Self {
            root: NULL_NODE,
            len: 0,
            comparator,
            nodes: CompactArena::with_capacity(capacity),
        }
    }

    /// The comparator this tree orders its elements with.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }
}

impl<T, C: Default> Default for AvlTree<T, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C: Compare<T>> Extend<T> for AvlTree<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T, C: Compare<T> + Default> FromIterator<T> for AvlTree<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut tree = Self::with_capacity_and_comparator(iter.size_hint().0, C::default());
        tree.extend(iter);
        tree
    }
}

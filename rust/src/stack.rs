//! LIFO stack of node ids.
//!
//! The engines collect ancestor paths on it and the cursors keep their
//! pending work on it. Only `push`, `top`, `pop` and `is_empty` are part of
//! the contract; the backing `Vec` is an implementation detail.

use crate::types::NodeId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathStack<T = NodeId> {
    items: Vec<T>,
}

impl<T> PathStack<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    #[inline]
    pub fn top(&self) -> Option<&T> {
        self.items.last()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Flip the stack so the oldest item becomes the top.
    pub(crate) fn reverse(&mut self) {
        self.items.reverse();
    }
}

impl<T: Copy> PathStack<T> {
    /// Copy of the top item.
    #[inline]
    pub fn peek(&self) -> Option<T> {
        self.items.last().copied()
    }
}

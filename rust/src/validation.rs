//! Validation and debugging utilities for AvlTree.
//!
//! This module contains the invariant checks used by the `try_*` operations
//! and the tests, plus a textual dump of the tree shape for debugging.

use std::fmt::{self, Debug, Write};

use crate::compare::Compare;
use crate::error::{AvlResult, AvlTreeError};
use crate::iteration::Cursor;
use crate::types::{AvlTree, NodeId, NULL_NODE};

/// Largest height an AVL tree with `len` nodes can reach.
pub(crate) fn height_bound(len: usize) -> u32 {
    (1.44 * ((len as f64) + 2.0).log2()).ceil() as u32
}

// ============================================================================
// VALIDATION METHODS
// ============================================================================

impl<T, C: Compare<T>> AvlTree<T, C> {
    /// Check if the tree maintains the AVL invariants.
    pub fn check_invariants(&self) -> bool {
        self.check_invariants_detailed().is_ok()
    }

    /// Check invariants with detailed error reporting.
    ///
    /// Verifies, in order: every node's cached height and balance factor,
    /// strict ascending order under the comparator, agreement between
    /// `len()`, the number of reachable nodes and the arena's allocation
    /// count, and the AVL height bound.
    pub fn check_invariants_detailed(&self) -> Result<(), String> {
        self.check_node_shapes()?;
        self.check_ordering()?;
        self.check_arena_tree_consistency()
            .map_err(|e| e.to_string())?;

        let bound = height_bound(self.len);
        if u32::from(self.height()) > bound {
            return Err(format!(
                "Height {} exceeds the bound {} for {} elements",
                self.height(),
                bound,
                self.len
            ));
        }
        Ok(())
    }

    /// Alias for check_invariants_detailed (for test compatibility).
    pub fn validate(&self) -> Result<(), String> {
        self.check_invariants_detailed()
    }

    /// Check if tree is in a valid state for operations
    pub fn validate_for_operation(&self, operation: &str) -> AvlResult<()> {
        self.check_invariants_detailed().map_err(|e| {
            AvlTreeError::data_integrity(operation, &format!("Validation for {}: {}", operation, e))
        })
    }

    /// Cached heights and balance factors, checked without recursion.
    fn check_node_shapes(&self) -> Result<(), String> {
        let mut budget = self.nodes.len();
        for handle in self.pre_order_handles() {
            if budget == 0 {
                return Err("Child links form a cycle".to_string());
            }
            budget -= 1;

            let node = self.node(handle).map_err(|e| e.to_string())?;
            let left = self.height_of(node.left).map_err(|e| e.to_string())?;
            let right = self.height_of(node.right).map_err(|e| e.to_string())?;
            let expected = 1 + left.max(right);
            if node.height != expected {
                return Err(format!(
                    "Node {} caches height {} but its subtrees give {}",
                    handle, node.height, expected
                ));
            }
            let balance = i32::from(left) - i32::from(right);
            if !(-1..=1).contains(&balance) {
                return Err(format!("Node {} has balance factor {}", handle, balance));
            }
        }
        Ok(())
    }

    /// In-order traversal must be strictly ascending.
    fn check_ordering(&self) -> Result<(), String> {
        let mut previous: Option<&T> = None;
        for (index, value) in self.iter().enumerate() {
            if let Some(prev) = previous {
                if !self.comparator.less(prev, value) {
                    return Err(format!("In-order traversal is not ascending at index {}", index));
                }
            }
            previous = Some(value);
        }
        Ok(())
    }

    /// Check that arena allocation matches tree structure
    fn check_arena_tree_consistency(&self) -> AvlResult<()> {
        if (self.root == NULL_NODE) != self.nodes.is_empty() {
            return Err(AvlTreeError::corrupted_tree(
                "Root",
                &format!("root {} disagrees with an arena of {} nodes", self.root, self.nodes.len()),
            ));
        }

        let reachable = self.iter().take(self.nodes.len() + 1).count();
        if reachable != self.len {
            return Err(AvlTreeError::corrupted_tree(
                "Length",
                &format!("{} reachable nodes but len() is {}", reachable, self.len),
            ));
        }

        let allocated = self.node_stats().allocated_count;
        if allocated != self.len {
            return Err(AvlTreeError::arena_error(
                "Node consistency check",
                &format!("{} in tree vs {} in arena", self.len, allocated),
            ));
        }

        Ok(())
    }
}

// ============================================================================
// DEBUGGING UTILITIES
// ============================================================================

impl<T, C> AvlTree<T, C> {
    /// Node ids in pre-order, for walks that need ids rather than values.
    fn pre_order_handles(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut cursor = self.pre_order();
        std::iter::from_fn(move || {
            let handle = cursor.handle()?;
            cursor.advance();
            Some(handle.id())
        })
    }

    /// Depth of every node in pre-order, computed alongside the walk.
    fn pre_order_depths(&self) -> Vec<(NodeId, usize)> {
        let mut out = Vec::with_capacity(self.len);
        let mut work = vec![(self.root, 0usize)];
        while let Some((id, depth)) = work.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            out.push((id, depth));
            work.push((node.right, depth + 1));
            work.push((node.left, depth + 1));
        }
        out
    }
}

impl<T: Debug, C> AvlTree<T, C> {
    /// Indented dump of the tree shape, one node per line in pre-order.
    ///
    /// Each line shows the element, the cached height and the balance factor;
    /// leaves are marked with `*`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_shape(&mut out);
        out
    }

    /// Prints the tree shape for debugging.
    pub fn print_tree(&self) {
        println!("Tree structure ({} elements, height {}):", self.len, self.height());
        print!("{}", self.render());
    }

    fn write_shape(&self, out: &mut impl Write) -> fmt::Result {
        if self.root == NULL_NODE {
            return writeln!(out, "<empty>");
        }
        for (id, depth) in self.pre_order_depths() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            let balance = self.balance_of(id).unwrap_or_default();
            let marker = if node.is_leaf() { "*" } else { "" };
            writeln!(
                out,
                "{}{:?}{} [h={}, b={:+}]",
                "  ".repeat(depth),
                node.value,
                marker,
                node.height,
                balance
            )?;
        }
        Ok(())
    }
}

//! Node-level operations for AvlTree.
//!
//! This module holds the pieces every structural change is built from: node
//! access by id, cached height upkeep, the four rotations, the shared
//! rebalance decision and the bottom-up retrace along an ancestor stack.

use log::{debug, trace};

use crate::error::{AvlTreeError, TreeResult};
use crate::stack::PathStack;
use crate::types::{AvlNode, AvlTree, Height, NodeId, NULL_NODE};

// ============================================================================
// NODE IMPLEMENTATION
// ============================================================================

impl<T> AvlNode<T> {
    /// A detached node with no children.
    pub(crate) fn leaf(value: T) -> Self {
        Self {
            value,
            left: NULL_NODE,
            right: NULL_NODE,
            height: 1,
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.left == NULL_NODE && self.right == NULL_NODE
    }

    pub(crate) fn has_two_children(&self) -> bool {
        self.left != NULL_NODE && self.right != NULL_NODE
    }
}

impl<T, C> AvlTree<T, C> {
    // ============================================================================
    // NODE ACCESS
    // ============================================================================

    pub(crate) fn node(&self, id: NodeId) -> TreeResult<&AvlNode<T>> {
        self.nodes
            .get(id)
            .ok_or_else(|| AvlTreeError::corrupted_tree("Link", &format!("node {} is not allocated", id)))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> TreeResult<&mut AvlNode<T>> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| AvlTreeError::corrupted_tree("Link", &format!("node {} is not allocated", id)))
    }

    /// Cached height of the subtree at `id`, 0 for an absent child.
    pub(crate) fn height_of(&self, id: NodeId) -> TreeResult<Height> {
        if id == NULL_NODE {
            return Ok(0);
        }
        Ok(self.node(id)?.height)
    }

    /// `height(left) - height(right)`, 0 for an absent node.
    pub(crate) fn balance_of(&self, id: NodeId) -> TreeResult<i32> {
        if id == NULL_NODE {
            return Ok(0);
        }
        let node = self.node(id)?;
        Ok(i32::from(self.height_of(node.left)?) - i32::from(self.height_of(node.right)?))
    }

    /// Recompute the cached height of `id` from its children.
    pub(crate) fn update_height(&mut self, id: NodeId) -> TreeResult<()> {
        let node = self.node(id)?;
        let height = 1 + self.height_of(node.left)?.max(self.height_of(node.right)?);
        self.node_mut(id)?.height = height;
        Ok(())
    }

    // ============================================================================
    // ROTATIONS
    // ============================================================================

    /// Lift `a.right` above `a`; returns the new subtree root.
    pub(crate) fn rotate_left(&mut self, a: NodeId) -> TreeResult<NodeId> {
        let b = self.node(a)?.right;
        if b == NULL_NODE {
            return Err(AvlTreeError::missing_child("left"));
        }
        let c = self.node(b)?.left;

        self.node_mut(b)?.left = a;
        self.node_mut(a)?.right = c;
        self.update_height(a)?;
        self.update_height(b)?;

        trace!("rotate left: node {} replaced by {}", a, b);
        Ok(b)
    }

    /// Lift `a.left` above `a`; returns the new subtree root.
    pub(crate) fn rotate_right(&mut self, a: NodeId) -> TreeResult<NodeId> {
        let b = self.node(a)?.left;
        if b == NULL_NODE {
            return Err(AvlTreeError::missing_child("right"));
        }
        let c = self.node(b)?.right;

        self.node_mut(b)?.right = a;
        self.node_mut(a)?.left = c;
        self.update_height(a)?;
        self.update_height(b)?;

        trace!("rotate right: node {} replaced by {}", a, b);
        Ok(b)
    }

    pub(crate) fn rotate_left_right(&mut self, a: NodeId) -> TreeResult<NodeId> {
        let left = self.node(a)?.left;
        if left == NULL_NODE {
            return Err(AvlTreeError::missing_child("left-right"));
        }
        let new_left = self.rotate_left(left)?;
        self.node_mut(a)?.left = new_left;
        self.rotate_right(a)
    }

    pub(crate) fn rotate_right_left(&mut self, a: NodeId) -> TreeResult<NodeId> {
        let right = self.node(a)?.right;
        if right == NULL_NODE {
            return Err(AvlTreeError::missing_child("right-left"));
        }
        let new_right = self.rotate_right(right)?;
        self.node_mut(a)?.right = new_right;
        self.rotate_left(a)
    }

    /// Restore the balance of `id` with at most one (single or double)
    /// rotation. Shared by insertion and deletion; returns the subtree root.
    pub(crate) fn rebalance(&mut self, id: NodeId) -> TreeResult<NodeId> {
        let balance = self.balance_of(id)?;
        if balance > 1 {
            let left = self.node(id)?.left;
            if self.balance_of(left)? >= 0 {
                self.rotate_right(id)
            } else {
                self.rotate_left_right(id)
            }
        } else if balance < -1 {
            let right = self.node(id)?.right;
            if self.balance_of(right)? <= 0 {
                self.rotate_left(id)
            } else {
                self.rotate_right_left(id)
            }
        } else {
            Ok(id)
        }
    }

    // ============================================================================
    // LINKING
    // ============================================================================

    /// Point whichever child slot of `parent` holds `old` at `new`.
    /// A `NULL_NODE` parent means `old` is the root.
    pub(crate) fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) -> TreeResult<()> {
        if parent == NULL_NODE {
            if self.root != new {
                debug!("root replaced: {} -> {}", self.root, new);
            }
            self.root = new;
            return Ok(());
        }

        let node = self.node_mut(parent)?;
        if node.left == old {
            node.left = new;
        } else if node.right == old {
            node.right = new;
        } else {
            return Err(AvlTreeError::corrupted_tree(
                "Link",
                &format!("node {} is not a child of {}", old, parent),
            ));
        }
        Ok(())
    }

    /// Walk `path` from its top (deepest node) down to its bottom, fixing the
    /// height and balance of every node and relinking each rotated subtree
    /// into its parent. `anchor` is the parent of the bottom entry,
    /// `NULL_NODE` when the bottom entry is the root.
    pub(crate) fn retrace(&mut self, path: &mut PathStack, anchor: NodeId) -> TreeResult<()> {
        while let Some(id) = path.pop() {
            self.update_height(id)?;
            let top = self.rebalance(id)?;
            if top != id {
                let parent = path.peek().unwrap_or(anchor);
                self.replace_child(parent, id, top)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::types::{AvlTree, NULL_NODE};

    /// Chain 1 -> 2 -> 3 down the right spine, bypassing the insert engine.
    fn right_chain() -> (AvlTree<i32>, [u32; 3]) {
        let mut tree = AvlTree::new();
        let a = tree.nodes.allocate(super::AvlNode::leaf(1)).unwrap();
        let b = tree.nodes.allocate(super::AvlNode::leaf(2)).unwrap();
        let c = tree.nodes.allocate(super::AvlNode::leaf(3)).unwrap();
        tree.node_mut(a).unwrap().right = b;
        tree.node_mut(b).unwrap().right = c;
        tree.update_height(b).unwrap();
        tree.update_height(a).unwrap();
        tree.root = a;
        tree.len = 3;
        (tree, [a, b, c])
    }

    #[test]
    fn test_heights_and_balance() {
        let (tree, [a, b, c]) = right_chain();
        assert_eq!(tree.height_of(a).unwrap(), 3);
        assert_eq!(tree.height_of(b).unwrap(), 2);
        assert_eq!(tree.height_of(c).unwrap(), 1);
        assert_eq!(tree.height_of(NULL_NODE).unwrap(), 0);
        assert_eq!(tree.balance_of(a).unwrap(), -2);
        assert_eq!(tree.balance_of(NULL_NODE).unwrap(), 0);
    }

    #[test]
    fn test_rotate_left_lifts_right_child() {
        let (mut tree, [a, b, c]) = right_chain();
        let top = tree.rotate_left(a).unwrap();
        assert_eq!(top, b);
        assert_eq!(tree.node(b).unwrap().left, a);
        assert_eq!(tree.node(b).unwrap().right, c);
        assert_eq!(tree.node(a).unwrap().right, NULL_NODE);
        assert_eq!(tree.height_of(a).unwrap(), 1);
        assert_eq!(tree.height_of(b).unwrap(), 2);
    }

    #[test]
    fn test_rotation_without_pivot_is_invariant_violation() {
        let (mut tree, [_, _, c]) = right_chain();
        let err = tree.rotate_right(c).unwrap_err();
        assert!(err.is_invariant_violation());
        assert!(tree.rotate_left(c).is_err());
        assert!(tree.rotate_left_right(c).is_err());
        assert!(tree.rotate_right_left(c).is_err());
    }

    #[test]
    fn test_rebalance_picks_single_rotation() {
        let (mut tree, [a, b, _]) = right_chain();
        assert_eq!(tree.rebalance(a).unwrap(), b);
        assert_eq!(tree.balance_of(b).unwrap(), 0);
    }

    #[test]
    fn test_rebalance_picks_double_rotation() {
        // 3 with left child 1 whose right child is 2: left-right case.
        let mut tree: AvlTree<i32> = AvlTree::new();
        let n3 = tree.nodes.allocate(super::AvlNode::leaf(3)).unwrap();
        let n1 = tree.nodes.allocate(super::AvlNode::leaf(1)).unwrap();
        let n2 = tree.nodes.allocate(super::AvlNode::leaf(2)).unwrap();
        tree.node_mut(n3).unwrap().left = n1;
        tree.node_mut(n1).unwrap().right = n2;
        tree.update_height(n1).unwrap();
        tree.update_height(n3).unwrap();

        let top = tree.rebalance(n3).unwrap();
        assert_eq!(top, n2);
        assert_eq!(tree.node(n2).unwrap().left, n1);
        assert_eq!(tree.node(n2).unwrap().right, n3);
        assert!(tree.node(n1).unwrap().is_leaf());
        assert!(tree.node(n2).unwrap().has_two_children());
    }

    #[test]
    fn test_rebalance_leaves_balanced_node_alone() {
        let (mut tree, [_, b, _]) = right_chain();
        assert_eq!(tree.rebalance(b).unwrap(), b);
    }

    #[test]
    fn test_replace_child_rejects_stranger() {
        let (mut tree, [a, b, c]) = right_chain();
        assert!(tree.replace_child(a, c, b).is_err());
        tree.replace_child(NULL_NODE, a, b).unwrap();
        assert_eq!(tree.root, b);
    }
}

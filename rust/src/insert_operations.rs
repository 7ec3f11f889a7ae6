//! INSERT operations for AvlTree.
//!
//! A new element always enters as a leaf at the end of its search path; the
//! ancestors on that path are then revisited bottom-up. Only one rotation is
//! ever needed per insertion, but every ancestor still gets its height
//! recomputed and its balance checked.

use log::{trace, warn};

use crate::compare::Compare;
use crate::error::{AvlTreeError, ModifyResult, TreeResult};
use crate::types::{AvlNode, AvlTree, Handle, NULL_NODE};

impl<T, C: Compare<T>> AvlTree<T, C> {
    /// Insert `value` unless an equivalent element is already present.
    ///
    /// Returns the handle of the inserted or the already present node, and
    /// whether an insertion happened. A rejected duplicate leaves the tree
    /// untouched.
    ///
    /// # Panics
    ///
    /// Panics if the rebalancing engine finds its own invariants broken,
    /// which indicates a bug in this crate rather than in the caller.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// let (first, inserted) = tree.insert("b");
    /// assert!(inserted);
    /// let (again, inserted) = tree.insert("b");
    /// assert!(!inserted);
    /// assert_eq!(first, again);
    /// ```
    pub fn insert(&mut self, value: T) -> (Handle, bool) {
        match self.insert_leaf(value) {
            Ok(result) => result,
            Err(e) => panic!("AVL insert failed: {}", e),
        }
    }

    /// Insert with invariant checks before and after the mutation.
    pub fn try_insert(&mut self, value: T) -> ModifyResult<(Handle, bool)> {
        if let Err(e) = self.check_invariants_detailed() {
            warn!("insert refused, tree invalid before insertion: {}", e);
            return Err(AvlTreeError::DataIntegrityError(e));
        }

        let result = self.insert_leaf(value)?;

        if let Err(e) = self.check_invariants_detailed() {
            warn!("tree invalid after insertion: {}", e);
            return Err(AvlTreeError::DataIntegrityError(e));
        }

        Ok(result)
    }

    /// Insert every value, stopping at the first engine failure.
    ///
    /// Returns how many values were new.
    pub fn insert_all<I>(&mut self, values: I) -> ModifyResult<usize>
    where
        I: IntoIterator<Item = T>,
    {
        let mut inserted = 0;
        for value in values {
            if self.insert_leaf(value)?.1 {
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    // ============================================================================
    // INSERTION ENGINE
    // ============================================================================

    fn insert_leaf(&mut self, value: T) -> TreeResult<(Handle, bool)> {
        if self.root == NULL_NODE {
            let id = self.nodes.allocate(AvlNode::leaf(value))?;
            self.root = id;
            self.len = 1;
            return Ok((Handle(id), true));
        }

        let mut path = self.path_to(&value)?;
        match path.pop() {
            Some(NULL_NODE) => {}
            Some(existing) => return Ok((Handle(existing), false)),
            None => return Err(AvlTreeError::corrupted_tree("Path", "descent produced no entries")),
        }

        let parent = path
            .peek()
            .ok_or_else(|| AvlTreeError::corrupted_tree("Path", "absent key has no parent"))?;
        let goes_left = self.comparator.less(&value, &self.node(parent)?.value);

        let id = self.nodes.allocate(AvlNode::leaf(value))?;
        let parent_node = self.node_mut(parent)?;
        if goes_left {
            parent_node.left = id;
        } else {
            parent_node.right = id;
        }
        self.len += 1;
        trace!("attached node {} under {} (left: {})", id, parent, goes_left);

        self.retrace(&mut path, NULL_NODE)?;
        Ok((Handle(id), true))
    }
}

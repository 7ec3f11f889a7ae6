//! Slot arena backing the tree nodes.
//!
//! Nodes are addressed by a `u32` index instead of a pointer, which keeps the
//! tree free of parent back-pointers and shared ownership. Vacated slots are
//! chained into an intrusive free list and handed out again by the next
//! allocation, so a long-lived tree with churn does not grow its storage.

use std::convert::TryFrom;

use crate::error::{AvlTreeError, TreeResult};
use crate::types::{NodeId, NULL_NODE};

/// Statistics for a compact arena
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompactArenaStats {
    pub total_capacity: usize,
    pub allocated_count: usize,
    pub free_count: usize,
    pub utilization: f64,
    pub fragmentation: f64,
}

#[derive(Debug, Clone)]
enum Slot<T> {
    Occupied(T),
    /// Link to the next vacant slot, `NULL_NODE` ends the chain.
    Vacant { next_free: NodeId },
}

/// Index-addressed storage with free-slot reuse.
#[derive(Debug, Clone)]
pub struct CompactArena<T> {
    slots: Vec<Slot<T>>,
    free_head: NodeId,
    free_count: usize,
}

impl<T> CompactArena<T> {
    /// Create a new empty compact arena
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a new compact arena with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: NULL_NODE,
            free_count: 0,
        }
    }

    /// Store `item` and return its id, reusing a vacant slot when one exists.
    #[inline]
    pub fn allocate(&mut self, item: T) -> TreeResult<NodeId> {
        if self.free_head != NULL_NODE {
            let id = self.free_head;
            let slot = &mut self.slots[id as usize];
            let next_free = match slot {
                Slot::Vacant { next_free } => *next_free,
                Slot::Occupied(_) => {
                    return Err(AvlTreeError::arena_error(
                        "Allocation",
                        &format!("free list points at occupied slot {}", id),
                    ))
                }
            };
            *slot = Slot::Occupied(item);
            self.free_head = next_free;
            self.free_count -= 1;
            return Ok(id);
        }

        let id = NodeId::try_from(self.slots.len())
            .ok()
            .filter(|&id| id != NULL_NODE)
            .ok_or_else(|| AvlTreeError::arena_error("Allocation", "node id space exhausted"))?;
        self.slots.push(Slot::Occupied(item));
        Ok(id)
    }

    /// Remove the item stored at `id` and return it.
    #[inline]
    pub fn deallocate(&mut self, id: NodeId) -> Option<T> {
        let slot = self.slots.get_mut(usize::try_from(id).ok()?)?;
        if !matches!(slot, Slot::Occupied(_)) {
            return None;
        }

        let old = std::mem::replace(
            slot,
            Slot::Vacant {
                next_free: self.free_head,
            },
        );
        self.free_head = id;
        self.free_count += 1;

        match old {
            Slot::Occupied(item) => Some(item),
            Slot::Vacant { .. } => None,
        }
    }

    /// Get a reference to an item in the arena
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&T> {
        if id == NULL_NODE {
            return None;
        }
        match self.slots.get(id as usize)? {
            Slot::Occupied(item) => Some(item),
            Slot::Vacant { .. } => None,
        }
    }

    /// Get a mutable reference to an item in the arena
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        if id == NULL_NODE {
            return None;
        }
        match self.slots.get_mut(id as usize)? {
            Slot::Occupied(item) => Some(item),
            Slot::Vacant { .. } => None,
        }
    }

    /// Check if an ID is valid and allocated
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free_count
    }

    /// Check if the arena is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots ever handed out, occupied or vacant.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Get the number of free slots
    pub fn free_count(&self) -> usize {
        self.free_count
    }

    /// Get arena statistics
    pub fn stats(&self) -> CompactArenaStats {
        let total_capacity = self.capacity();
        let allocated_count = self.len();
        let free_count = self.free_count();
        let utilization = if total_capacity > 0 {
            allocated_count as f64 / total_capacity as f64
        } else {
            0.0
        };
        let fragmentation = if total_capacity > 0 {
            free_count as f64 / total_capacity as f64
        } else {
            0.0
        };

        CompactArenaStats {
            total_capacity,
            allocated_count,
            free_count,
            utilization,
            fragmentation,
        }
    }
}

impl<T> Default for CompactArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

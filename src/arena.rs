//! Slot storage for tree nodes. Nodes refer to each other by [`NodeId`] instead of pointers, and
//! freed slots are threaded into a free list through the slots themselves so releasing a node
//! never allocates.

use std::fmt;
use std::mem;

use crate::error::AllocError;

/// Index of a node in an [`Arena`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) value: i32,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

enum Slot {
    Occupied(Node),
    Vacant { next_free: Option<NodeId> },
}

pub(crate) struct Arena {
    slots: Vec<Slot>,
    free_head: Option<NodeId>,
    live: usize,
    limit: Option<usize>,
}

impl Arena {
    pub(crate) fn new(limit: Option<usize>) -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            live: 0,
            limit,
        }
    }

    /// Number of occupied slots.
    pub(crate) fn live(&self) -> usize {
        self.live
    }

    /// Stores a childless node holding `value`. Vacant slots are reused before the backing
    /// storage grows, and growth goes through `try_reserve` so exhaustion comes back as an error
    /// rather than an abort.
    pub(crate) fn alloc(&mut self, value: i32) -> Result<NodeId, AllocError> {
        if let Some(limit) = self.limit {
            if self.live >= limit {
                return Err(AllocError::LimitReached { limit });
            }
        }

        let node = Node {
            value,
            left: None,
            right: None,
        };
        let id = match self.free_head {
            Some(id) => {
                let slot = mem::replace(&mut self.slots[id.0], Slot::Occupied(node));
                match slot {
                    Slot::Vacant { next_free } => self.free_head = next_free,
                    Slot::Occupied(_) => panic!("free list points at occupied slot {id}"),
                }
                id
            }
            None => {
                self.slots.try_reserve(1)?;
                self.slots.push(Slot::Occupied(node));
                NodeId(self.slots.len() - 1)
            }
        };
        self.live += 1;

        Ok(id)
    }

    /// Releases the node at `id` and hands it back so the caller can still read its links.
    ///
    /// ## Panics
    ///
    /// When `id` is already free.
    pub(crate) fn free(&mut self, id: NodeId) -> Node {
        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        match mem::replace(&mut self.slots[id.0], vacant) {
            Slot::Occupied(node) => {
                self.free_head = Some(id);
                self.live -= 1;
                node
            }
            Slot::Vacant { .. } => panic!("double free of node {id}"),
        }
    }

    pub(crate) fn get(&self, id: NodeId) -> &Node {
        match &self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("dangling node id {id}"),
        }
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node {
        match &mut self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("dangling node id {id}"),
        }
    }

    /// Drops the backing storage. Only valid once every node has been freed.
    pub(crate) fn release(&mut self) {
        debug_assert_eq!(self.live, 0, "releasing arena with live nodes");
        self.slots = Vec::new();
        self.free_head = None;
    }
}

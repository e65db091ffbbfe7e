//! An unbalanced Binary Search Tree of unique `i32`s. Nodes live in an index arena and every
//! node is owned by exactly one link: the tree's root or a child link of its parent.
//!
//! # Examples
//!
//! ```
//! use intbst::tree::{Insertion, Tree};
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(tree.search(5).is_none());
//!
//! for value in [5, 3, 8, 1, 4] {
//!     tree.insert(value).unwrap();
//! }
//! assert_eq!(tree.iter().collect::<Vec<_>>(), [1, 3, 4, 5, 8]);
//!
//! // Duplicates are turned away by `insert_unique`.
//! assert_eq!(tree.insert_unique(3), Ok(Insertion::Duplicate));
//! assert_eq!(tree.len(), 5);
//!
//! // Deleting a node with two children promotes its in-order predecessor.
//! assert!(tree.delete(5));
//! assert_eq!(tree.root().map(|n| n.value()), Some(4));
//! assert_eq!(tree.iter().collect::<Vec<_>>(), [1, 3, 4, 8]);
//! ```

use std::cmp::Ordering;
use std::fmt;

use tracing::{debug, trace};

use crate::arena::{Arena, NodeId};
use crate::error::AllocError;
use crate::util::NodeSlot;

/// A Binary Search Tree holding unique integers. This can be used for inserting, searching, and
/// deleting values, and for walking them in ascending order. There is no rebalancing so the
/// shape of the tree depends entirely on insertion order.
pub struct Tree {
    arena: Arena,
    root: Option<NodeId>,
    size: usize,
}

/// What [`Tree::insert_unique`] did with a value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Insertion {
    /// The value was absent and now has its own node.
    Inserted,
    /// The value was already present and the tree is unchanged.
    Duplicate,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("size", &self.size)
            .field("values", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

impl Tree {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            arena: Arena::new(None),
            root: None,
            size: 0,
        }
    }

    /// Generates a new, empty `Tree` that refuses to hold more than `limit` nodes. Inserting past
    /// the limit fails with [`AllocError::LimitReached`] just as running out of memory would.
    pub fn with_node_limit(limit: usize) -> Self {
        Self {
            arena: Arena::new(Some(limit)),
            root: None,
            size: 0,
        }
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.size
    }

    /// The root node, if any.
    pub fn root(&self) -> Option<NodeRef<'_>> {
        self.root.map(|id| NodeRef { tree: self, id })
    }

    /// Finds the node holding `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use intbst::tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1).unwrap();
    ///
    /// assert_eq!(tree.search(1).map(|n| n.value()), Some(1));
    /// assert!(tree.search(42).is_none());
    /// ```
    pub fn search(&self, value: i32) -> Option<NodeRef<'_>> {
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.arena.get(id);
            match value.cmp(&node.value) {
                Ordering::Equal => {
                    trace!(value, node = %id, "search hit");
                    return Some(NodeRef { tree: self, id });
                }
                Ordering::Less => current = node.left,
                Ordering::Greater => current = node.right,
            }
        }
        trace!(value, "search miss");
        None
    }

    /// Whether `value` is in the tree.
    pub fn contains(&self, value: i32) -> bool {
        self.search(value).is_some()
    }

    /// Adds a node holding `value` below the last node visited on its search path.
    ///
    /// The caller must make sure `value` isn't already present; [`Tree::insert_unique`] does
    /// that check. The node is allocated before any link changes so a failed allocation leaves
    /// the tree untouched.
    pub fn insert(&mut self, value: i32) -> Result<(), AllocError> {
        debug_assert!(!self.contains(value), "{value} is already in the tree");

        let new_node = self.arena.alloc(value)?;

        let mut trail = None;
        let mut current = self.root;
        while let Some(id) = current {
            trail = Some(id);
            let node = self.arena.get(id);
            current = if value < node.value {
                node.left
            } else {
                node.right
            };
        }

        match trail {
            None => self.root = Some(new_node),
            Some(parent) => {
                let parent = self.arena.get_mut(parent);
                if value < parent.value {
                    parent.left = Some(new_node);
                } else {
                    parent.right = Some(new_node);
                }
            }
        }
        self.size += 1;
        debug_assert_eq!(self.arena.live(), self.size);
        debug!(value, node = %new_node, size = self.size, "inserted");

        Ok(())
    }

    /// Inserts `value` unless it is already present. Both bulk loading and interactive adds go
    /// through here so they share a single duplicate policy.
    ///
    /// # Examples
    ///
    /// ```
    /// use intbst::tree::{Insertion, Tree};
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.insert_unique(7), Ok(Insertion::Inserted));
    /// assert_eq!(tree.insert_unique(7), Ok(Insertion::Duplicate));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert_unique(&mut self, value: i32) -> Result<Insertion, AllocError> {
        if self.contains(value) {
            return Ok(Insertion::Duplicate);
        }
        self.insert(value)?;
        Ok(Insertion::Inserted)
    }

    /// Deletes the node holding `value`. Returns whether a node was found and removed; when it
    /// wasn't, nothing changes.
    ///
    /// # Examples
    ///
    /// ```
    /// use intbst::tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1).unwrap();
    ///
    /// assert!(tree.delete(1));
    /// assert!(!tree.delete(1));
    /// assert!(tree.is_empty());
    /// ```
    pub fn delete(&mut self, value: i32) -> bool {
        let Some(slot) = self.locate(value) else {
            trace!(value, "delete miss");
            return false;
        };
        self.remove_at(slot);
        self.size -= 1;
        debug_assert_eq!(self.arena.live(), self.size);

        true
    }

    /// Walks the whole tree in ascending order.
    pub fn iter(&self) -> InOrder<'_> {
        InOrder::new(self, self.root)
    }

    /// The number of nodes on the longest path from the root to a leaf.
    pub fn height(&self) -> usize {
        let mut tallest = 0;
        let mut pending: Vec<(NodeId, usize)> = self.root.map(|id| (id, 1)).into_iter().collect();
        while let Some((id, depth)) = pending.pop() {
            tallest = tallest.max(depth);
            let node = self.arena.get(id);
            pending.extend(node.left.map(|l| (l, depth + 1)));
            pending.extend(node.right.map(|r| (r, depth + 1)));
        }
        tallest
    }

    /// Frees every node bottom-up: both subtrees of a node are gone before the node itself.
    /// Leaves the tree empty and returns how many nodes were freed.
    pub fn destroy_all(&mut self) -> usize {
        let mut freed = 0;
        // `true` once the node's children have been queued ahead of it.
        let mut pending: Vec<(NodeId, bool)> = Vec::new();
        pending.extend(self.root.take().map(|id| (id, false)));

        while let Some((id, children_queued)) = pending.pop() {
            if children_queued {
                self.arena.free(id);
                freed += 1;
                continue;
            }
            let node = self.arena.get(id);
            let (left, right) = (node.left, node.right);
            pending.push((id, true));
            pending.extend(right.map(|r| (r, false)));
            pending.extend(left.map(|l| (l, false)));
        }

        debug_assert_eq!(freed, self.size);
        self.size = 0;
        self.arena.release();
        debug!(freed, "destroyed tree");

        freed
    }

    /// First phase of a delete: finds the link that owns the node holding `value`.
    fn locate(&self, value: i32) -> Option<NodeSlot> {
        let mut slot = NodeSlot::Root;
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.arena.get(id);
            match value.cmp(&node.value) {
                Ordering::Equal => return Some(slot),
                Ordering::Less => {
                    slot = NodeSlot::Left(id);
                    current = node.left;
                }
                Ordering::Greater => {
                    slot = NodeSlot::Right(id);
                    current = node.right;
                }
            }
        }
        None
    }

    fn slot_target(&self, slot: NodeSlot) -> Option<NodeId> {
        match slot {
            NodeSlot::Root => self.root,
            NodeSlot::Left(parent) => self.arena.get(parent).left,
            NodeSlot::Right(parent) => self.arena.get(parent).right,
        }
    }

    fn set_slot(&mut self, slot: NodeSlot, child: Option<NodeId>) {
        match slot {
            NodeSlot::Root => self.root = child,
            NodeSlot::Left(parent) => self.arena.get_mut(parent).left = child,
            NodeSlot::Right(parent) => self.arena.get_mut(parent).right = child,
        }
    }

    /// Second phase of a delete: removes the node owned by `slot` and frees exactly one node.
    /// Size bookkeeping is left to the caller.
    ///
    /// ## Panics
    ///
    /// When `slot` is empty.
    fn remove_at(&mut self, slot: NodeSlot) {
        let target = self
            .slot_target(slot)
            .expect("located slot must hold a node");
        let node = self.arena.get(target);

        match (node.left, node.right) {
            (None, None) => {
                debug!(value = node.value, ?slot, "deleting leaf");
                self.set_slot(slot, None);
                self.arena.free(target);
            }
            (Some(child), None) | (None, Some(child)) => {
                debug!(value = node.value, ?slot, "deleting node with one child");
                self.set_slot(slot, Some(child));
                self.arena.free(target);
            }
            // With two children the target keeps its place in the tree and takes the value of
            // its in-order predecessor, the largest node in its left subtree. The predecessor
            // has no right child so it is spliced out by handing its left subtree to its parent.
            (Some(left), Some(_)) => {
                let mut trail = None;
                let mut predecessor = left;
                while let Some(right) = self.arena.get(predecessor).right {
                    trail = Some(predecessor);
                    predecessor = right;
                }

                let orphan = self.arena.get(predecessor).left;
                match trail {
                    None => self.arena.get_mut(target).left = orphan,
                    Some(parent) => self.arena.get_mut(parent).right = orphan,
                }
                let predecessor = self.arena.free(predecessor);

                let target = self.arena.get_mut(target);
                debug!(
                    value = target.value,
                    replacement = predecessor.value,
                    "deleting node with two children"
                );
                target.value = predecessor.value;
            }
        }
    }
}

impl<'a> IntoIterator for &'a Tree {
    type Item = i32;
    type IntoIter = InOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A borrowed view of one node, as returned by [`Tree::search`].
#[derive(Copy, Clone)]
pub struct NodeRef<'a> {
    tree: &'a Tree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    /// The value stored in this node.
    pub fn value(&self) -> i32 {
        self.tree.arena.get(self.id).value
    }

    /// The root of this node's left subtree.
    pub fn left(&self) -> Option<NodeRef<'a>> {
        self.tree.arena.get(self.id).left.map(|id| NodeRef {
            tree: self.tree,
            id,
        })
    }

    /// The root of this node's right subtree.
    pub fn right(&self) -> Option<NodeRef<'a>> {
        self.tree.arena.get(self.id).right.map(|id| NodeRef {
            tree: self.tree,
            id,
        })
    }

    /// Walks the subtree rooted at this node in ascending order.
    pub fn iter(&self) -> InOrder<'a> {
        InOrder::new(self.tree, Some(self.id))
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("value", &self.value())
            .finish()
    }
}

/// Lazy in-order walk over a tree or subtree. Every call to [`Tree::iter`] or [`NodeRef::iter`]
/// starts a fresh walk with its own stack.
pub struct InOrder<'a> {
    tree: &'a Tree,
    /// Nodes whose left subtrees are being walked and that are still to be visited.
    stack: Vec<NodeId>,
}

impl<'a> InOrder<'a> {
    fn new(tree: &'a Tree, root: Option<NodeId>) -> Self {
        let mut walk = Self {
            tree,
            stack: Vec::new(),
        };
        walk.push_left_spine(root);
        walk
    }

    fn push_left_spine(&mut self, mut current: Option<NodeId>) {
        while let Some(id) = current {
            self.stack.push(id);
            current = self.tree.arena.get(id).left;
        }
    }
}

impl Iterator for InOrder<'_> {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        let id = self.stack.pop()?;
        let node = self.tree.arena.get(id);
        self.push_left_spine(node.right);
        Some(node.value)
    }
}

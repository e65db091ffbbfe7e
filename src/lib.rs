//! This crate keeps a Binary Search Tree (BST) of unique integers and wraps it in a small
//! menu-driven console for loading, showing, adding, deleting, and finding values.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a value
//! and will sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for a value takes `O(height)` where `height` is the longest path from the root
//! `Node` to a leaf `Node`. The [`tree::Tree`] here does no rebalancing, so feeding it sorted
//! input gives a tree as tall as it is large. BSTs also naturally support sorted iteration by
//! visiting the left subtree, then the subtree root, then the right subtree.
//!
//! ## Layout
//!
//! - [`tree`]: the engine: insert, search, delete, in-order walks, teardown.
//! - [`loader`]: seeds a tree from a file of integers.
//! - [`session`]: the console menu.
//! - [`display`]: prints values in fixed-width rows.
//! - [`cli`]: command line arguments for the `intbst` binary.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]
#![forbid(unsafe_code)]

mod arena;
pub mod cli;
pub mod display;
pub mod error;
pub mod loader;
pub mod session;
pub mod tree;
mod util;

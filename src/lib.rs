//! This crate exposes a Binary Search Tree that keeps itself balanced (an AVL tree), along with
//! the plain, unbalanced variant it is built from.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored values. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a value
//! and sometimes has child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than or equal to its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for values in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). Values arriving in sorted order turn a plain BST
//! into a linked list with a height of `N - 1`.
//!
//! ## AVL Tree
//!
//! An AVL tree caches the height of every subtree and, after each insert or delete, walks from
//! the changed node back up to the root. Any node whose subtrees' heights differ by more than one
//! is rotated, which keeps the height at `O(lg N)`.
//!
//! [`Tree`] is generic over a [`Balance`] policy: [`AvlTree`] rotates and ignores duplicates,
//! [`Bst`] never rotates and keeps duplicates.
//!
//! # Examples
//!
//! ```
//! use avl_tree::{AvlTree, Bst};
//!
//! let avl: AvlTree<_> = (0..1000).collect();
//! let bst: Bst<_> = (0..1000).collect();
//!
//! assert_eq!(avl.get_root().unwrap().height(), 9);
//! assert_eq!(bst.get_root().unwrap().height(), 999);
//! assert!(avl.iter().eq(bst.iter()));
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod balance;
pub mod collections;
mod iter;
mod node;
mod tree;
mod validate;

pub use balance::{Avl, Balance, Unbalanced};
pub use iter::{InOrder, PreOrder};
pub use node::NodeRef;
pub use tree::{AvlTree, Bst, Tree};
pub use validate::InvariantError;

#[cfg(test)]
mod test {
    pub(crate) mod quick;
}

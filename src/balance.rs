//! Balance policies. A [`Tree`][crate::Tree] hands every mutation's starting point to its
//! policy, which walks from there to the root putting the cached heights (and, for [`Avl`], the
//! shape) back in order.
//!
//! See [the Wikipedia page][wiki] for the AVL terminology used here.
//!
//! [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Rebalancing

use std::ptr::NonNull;

use log::trace;

use crate::node::{Link, Node};

/// Decides how a [`Tree`][crate::Tree] treats duplicates and what happens on the way back up
/// after a node is added or removed. This trait is sealed: the policies are [`Unbalanced`] and
/// [`Avl`].
pub trait Balance: sealed::Rebalance {
    /// Used by the tree's `Display` implementation, e.g. `AVL pre-order { 2, 1, 3 }`.
    const NAME: &'static str;

    /// Whether `add` ignores a value equal to one already in the tree.
    const IGNORES_DUPLICATES: bool;
}

pub(crate) mod sealed {
    use super::*;

    pub trait Rebalance {
        /// Walks from `start` to the root restoring the policy's invariants, relinking rotated
        /// subtrees into their parents or into `root`.
        ///
        /// # Safety
        ///
        /// `start` must be empty or point at a node reachable from `root`, and every node
        /// reachable from `root` must be live with consistent parent links.
        unsafe fn rebalance<T>(root: &mut Link<T>, start: Link<T>);
    }
}

/// A plain binary search tree. Duplicates are kept (as right descendants) and nothing is ever
/// rotated; the walk after a mutation only refreshes the cached heights.
pub enum Unbalanced {}

/// An AVL tree. Duplicates are ignored and the walk after a mutation rotates any node whose
/// subtrees' heights differ by more than one.
pub enum Avl {}

impl Balance for Unbalanced {
    const NAME: &'static str = "BST";
    const IGNORES_DUPLICATES: bool = false;
}

impl sealed::Rebalance for Unbalanced {
    unsafe fn rebalance<T>(_root: &mut Link<T>, start: Link<T>) {
        let mut current = start;
        while let Some(node) = current.0 {
            update_height(node);
            current = (*node.as_ptr()).parent;
        }
    }
}

impl Balance for Avl {
    const NAME: &'static str = "AVL";
    const IGNORES_DUPLICATES: bool = true;
}

impl sealed::Rebalance for Avl {
    unsafe fn rebalance<T>(root: &mut Link<T>, start: Link<T>) {
        let mut current = start;
        while let Some(node) = current.0 {
            // Read before rotating: the rotated subtree's old root moves down a level but the
            // walk carries on above the whole subtree.
            let parent = (*node.as_ptr()).parent;
            let balance_factor = (*node.as_ptr()).balance_factor();

            if balance_factor < -1 {
                let left = (*node.as_ptr())
                    .left
                    .0
                    .expect("A left-heavy node has a left child");
                if (*left.as_ptr()).balance_factor() > 0 {
                    trace!("left-right case (balance factor {balance_factor})");
                    (*node.as_ptr()).left = Link::to(rotate_left(left));
                } else {
                    trace!("left-left case (balance factor {balance_factor})");
                }
                let subtree_root = rotate_right(node);
                replace_child(root, parent, node, Link::to(subtree_root));
            } else if balance_factor > 1 {
                let right = (*node.as_ptr())
                    .right
                    .0
                    .expect("A right-heavy node has a right child");
                if (*right.as_ptr()).balance_factor() < 0 {
                    trace!("right-left case (balance factor {balance_factor})");
                    (*node.as_ptr()).right = Link::to(rotate_right(right));
                } else {
                    trace!("right-right case (balance factor {balance_factor})");
                }
                let subtree_root = rotate_left(node);
                replace_child(root, parent, node, Link::to(subtree_root));
            } else {
                update_height(node);
            }

            current = parent;
        }
    }
}

/// Sets the height of `node` to one more than its taller child.
///
/// # Safety
///
/// `node` and its children must be live.
pub(crate) unsafe fn update_height<T>(node: NonNull<Node<T>>) {
    let node = node.as_ptr();
    (*node).height = 1 + (*node).left.height().max((*node).right.height());
}

/// Points whichever link held `old` at `new` instead: the matching child link of `parent`, or
/// `root` when `parent` is empty. Does not touch `new`'s own parent link.
///
/// # Safety
///
/// `parent` must be empty or live, and when it is live `old` must be one of its children.
pub(crate) unsafe fn replace_child<T>(
    root: &mut Link<T>,
    parent: Link<T>,
    old: NonNull<Node<T>>,
    new: Link<T>,
) {
    match parent.0 {
        None => *root = new,
        Some(parent) => {
            let parent = parent.as_ptr();
            if (*parent).left == Link::to(old) {
                (*parent).left = new;
            } else {
                (*parent).right = new;
            }
        }
    }
}

/// Rotates the subtree rooted at `old_root` to the left, moving its right child up. Returns the
/// new subtree root, whose parent link already names `old_root`'s parent; the caller relinks it
/// from that side.
///
/// ## Panics
///
/// When `old_root` has no right child.
///
/// # Diagram
///
/// ```text
///    Option<parent>            Option<parent>
///      /                         /
///   old_root                  new_root
///    /     \                  /     \
///   x    new_root  rotate -> old_root z
///         /  \               /  \
///        y    z             x    y
/// ```
///
/// # Safety
///
/// `old_root` and everything below it must be live.
pub(crate) unsafe fn rotate_left<T>(old_root: NonNull<Node<T>>) -> NonNull<Node<T>> {
    let old = old_root.as_ptr();
    let new_root = (*old).right.0.expect("Rotate left => right child");
    let new = new_root.as_ptr();

    (*old).right = (*new).left;
    if let Some(y) = (*old).right.0 {
        (*y.as_ptr()).parent = Link::to(old_root);
    }

    (*new).left = Link::to(old_root);
    (*new).parent = (*old).parent;
    (*old).parent = Link::to(new_root);

    update_height(old_root);
    update_height(new_root);
    new_root
}

/// Rotates the subtree rooted at `old_root` to the right, moving its left child up. The mirror
/// image of [`rotate_left`].
///
/// ## Panics
///
/// When `old_root` has no left child.
///
/// # Diagram
///
/// ```text
///    Option<parent>            Option<parent>
///      /                         /
///   old_root                  new_root
///    /     \                  /     \
/// new_root  z     rotate ->  x    old_root
///  / \                               /  \
/// x   y                             y    z
/// ```
///
/// # Safety
///
/// `old_root` and everything below it must be live.
pub(crate) unsafe fn rotate_right<T>(old_root: NonNull<Node<T>>) -> NonNull<Node<T>> {
    let old = old_root.as_ptr();
    let new_root = (*old).left.0.expect("Rotate right => left child");
    let new = new_root.as_ptr();

    (*old).left = (*new).right;
    if let Some(y) = (*old).left.0 {
        (*y.as_ptr()).parent = Link::to(old_root);
    }

    (*new).right = Link::to(old_root);
    (*new).parent = (*old).parent;
    (*old).parent = Link::to(new_root);

    update_height(old_root);
    update_height(new_root);
    new_root
}

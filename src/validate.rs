//! Diagnostic checks. Nothing in the tree calls these; they exist so tests (and curious callers)
//! can confirm a mutation left the tree in a consistent state. They never repair anything.

use std::ptr;

use thiserror::Error;

use crate::collections::Stack;
use crate::node::Node;
use crate::Tree;

/// The first invariant a check found broken. `depth` counts edges from the root to the offending
/// node, so the root is at depth 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantError {
    /// A value is not less than an ancestor it sits left of, or is less than an ancestor it sits
    /// right of.
    #[error("node at depth {depth} is out of order with its ancestors")]
    OutOfOrder {
        /// Depth of the offending node.
        depth: usize,
    },
    /// A cached height disagrees with the heights of the node's children.
    #[error("node at depth {depth} caches height {cached} but its children give {expected}")]
    StaleHeight {
        /// Depth of the offending node.
        depth: usize,
        /// The height stored in the node.
        cached: isize,
        /// One more than the taller child's height.
        expected: isize,
    },
    /// The subtrees' heights differ by more than one.
    #[error("node at depth {depth} has balance factor {balance_factor}")]
    Unbalanced {
        /// Depth of the offending node.
        depth: usize,
        /// Right subtree height minus left subtree height.
        balance_factor: isize,
    },
    /// A node's parent link names some node other than the one owning it.
    #[error("node at depth {depth} points at a parent that does not own it")]
    BrokenParentLink {
        /// Depth of the offending node.
        depth: usize,
    },
    /// A non-root node has no parent link, or the root has one.
    #[error("node at depth {depth} has a parent link that does not match its position")]
    OrphanedNode {
        /// Depth of the offending node.
        depth: usize,
    },
}

/// A node still to be checked together with everything its position implies.
struct Pending<'a, T> {
    node: &'a Node<T>,
    parent: Option<&'a Node<T>>,
    /// Inclusive lower bound from the nearest ancestor this node is right of.
    lower: Option<&'a T>,
    /// Exclusive upper bound from the nearest ancestor this node is left of.
    upper: Option<&'a T>,
    depth: usize,
}

impl<T, B> Tree<T, B>
where
    T: Ord,
{
    /// Checks that every left descendant is smaller than its ancestor and every right descendant
    /// is at least as large.
    pub fn validate_bst(&self) -> Result<(), InvariantError> {
        self.check(false)
    }

    /// Checks ordering like [`validate_bst`][Self::validate_bst], and also that every cached
    /// height is correct, every node is balanced, and every parent link points at the node that
    /// owns it.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::{AvlTree, Bst, InvariantError};
    ///
    /// let avl: AvlTree<_> = (0..3).collect();
    /// assert_eq!(avl.validate_avl(), Ok(()));
    ///
    /// let bst: Bst<_> = (0..3).collect();
    /// assert_eq!(
    ///     bst.validate_avl(),
    ///     Err(InvariantError::Unbalanced { depth: 0, balance_factor: 2 })
    /// );
    /// ```
    pub fn validate_avl(&self) -> Result<(), InvariantError> {
        self.check(true)
    }

    /// Whether [`validate_bst`][Self::validate_bst] passes.
    pub fn is_valid_bst(&self) -> bool {
        self.validate_bst().is_ok()
    }

    /// Whether [`validate_avl`][Self::validate_avl] passes.
    pub fn is_valid_avl(&self) -> bool {
        self.validate_avl().is_ok()
    }

    /// Pre-order walk checking each node against the bounds its ancestors impose, plus the
    /// structural invariants when `avl` is set.
    fn check(&self, avl: bool) -> Result<(), InvariantError> {
        let mut stack = Stack::new();
        if let Some(root) = self.root.get() {
            stack.push(Pending {
                node: root,
                parent: None,
                lower: None,
                upper: None,
                depth: 0,
            });
        }

        while let Some(Pending {
            node,
            parent,
            lower,
            upper,
            depth,
        }) = stack.pop()
        {
            let above_lower = lower.map_or(true, |lower| node.value >= *lower);
            let below_upper = upper.map_or(true, |upper| node.value < *upper);
            if !(above_lower && below_upper) {
                return Err(InvariantError::OutOfOrder { depth });
            }

            if avl {
                let expected = 1 + node.left.height().max(node.right.height());
                if node.height != expected {
                    return Err(InvariantError::StaleHeight {
                        depth,
                        cached: node.height,
                        expected,
                    });
                }

                let balance_factor = node.balance_factor();
                if balance_factor.abs() > 1 {
                    return Err(InvariantError::Unbalanced {
                        depth,
                        balance_factor,
                    });
                }

                match (node.parent.get(), parent) {
                    (None, None) => {}
                    (Some(linked), Some(owner)) if ptr::eq(linked, owner) => {}
                    (Some(_), Some(_)) => return Err(InvariantError::BrokenParentLink { depth }),
                    _ => return Err(InvariantError::OrphanedNode { depth }),
                }
            }

            if let Some(right) = node.right.get() {
                stack.push(Pending {
                    node: right,
                    parent: Some(node),
                    lower: Some(&node.value),
                    upper,
                    depth: depth + 1,
                });
            }
            if let Some(left) = node.left.get() {
                stack.push(Pending {
                    node: left,
                    parent: Some(node),
                    lower,
                    upper: Some(&node.value),
                    depth: depth + 1,
                });
            }
        }

        Ok(())
    }
}

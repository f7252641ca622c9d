//! The tree itself. Every node is its own allocation; parents own their children through raw
//! `left`/`right` links and children point back at their parent with a raw `parent` link that
//! never owns anything.
//!
//! # Examples
//!
//! ```
//! use avl_tree::AvlTree;
//!
//! let mut tree = AvlTree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.contains(&1));
//! assert_eq!(tree.find_min(), None);
//!
//! // Ascending inserts would make a plain BST a linked list. Here they rotate.
//! tree.add(1);
//! tree.add(2);
//! tree.add(3);
//! assert_eq!(tree.to_string(), "AVL pre-order { 2, 1, 3 }");
//!
//! // Duplicates are ignored.
//! tree.add(2);
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
//!
//! // Removing reports whether the value was there.
//! assert!(tree.remove(&2));
//! assert!(!tree.remove(&2));
//! assert!(tree.is_valid_avl());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use log::{debug, trace};

use crate::balance::sealed::Rebalance;
use crate::balance::{replace_child, Avl, Balance, Unbalanced};
use crate::collections::{Queue, Stack};
use crate::iter::{InOrder, PreOrder};
use crate::node::{Link, Node, NodeRef};

/// A binary search tree over values that are their own keys. The balance policy `B` decides
/// whether duplicates are kept and whether the tree rotates to stay balanced; see [`Bst`] and
/// [`AvlTree`].
pub struct Tree<T, B = Avl> {
    // This is a `Link` instead of an `Option<Node>` so that it can be moved around with the `Tree`
    // without the children's parent pointers breaking.
    pub(crate) root: Link<T>,
    marker: PhantomData<(Box<Node<T>>, B)>,
}

/// A plain binary search tree: no rotations, duplicates kept.
pub type Bst<T> = Tree<T, Unbalanced>;

/// A self-balancing binary search tree (specifically, an AVL tree): no duplicates.
pub type AvlTree<T> = Tree<T, Avl>;

impl<T, B> Default for Tree<T, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, B> Drop for Tree<T, B> {
    fn drop(&mut self) {
        self.make_empty();
    }
}

impl<T, B> Tree<T, B> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: Link::NONE,
            marker: PhantomData,
        }
    }

    /// Whether the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.root.0.is_none()
    }

    /// Releases every node. Nodes are freed with an explicit stack so a degenerate tree can't
    /// overflow the call stack.
    pub fn make_empty(&mut self) {
        let mut stack = Stack::new();
        if let Some(root) = self.root.0.take() {
            stack.push(root);
        }

        let mut freed = 0usize;
        while let Some(node) = stack.pop() {
            // SAFETY: Each node is reachable through exactly one owning link and the root link was
            // just cleared, so every node is pushed once and nothing can reach it after this.
            // Nodes were allocated with `Box::new` in `Node::alloc`.
            let node = unsafe { Box::from_raw(node.as_ptr()) };
            if let Some(left) = node.left.0 {
                stack.push(left);
            }
            if let Some(right) = node.right.0 {
                stack.push(right);
            }
            freed += 1;
        }

        if freed > 0 {
            debug!("released {freed} nodes");
        }
    }

    /// A read-only handle to the root node, or `None` if the tree is empty.
    pub fn get_root(&self) -> Option<NodeRef<'_, T>> {
        self.root.get().map(NodeRef::new)
    }

    /// The smallest value in the tree, or `None` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let tree: AvlTree<_> = [5, 3, 8, 1].into_iter().collect();
    /// assert_eq!(tree.find_min(), Some(&1));
    /// assert_eq!(tree.find_max(), Some(&8));
    /// ```
    pub fn find_min(&self) -> Option<&T> {
        let mut node = self.root.get()?;
        while let Some(left) = node.left.get() {
            node = left;
        }
        Some(&node.value)
    }

    /// The largest value in the tree, or `None` if the tree is empty.
    pub fn find_max(&self) -> Option<&T> {
        let mut node = self.root.get()?;
        while let Some(right) = node.right.get() {
            node = right;
        }
        Some(&node.value)
    }

    /// Iterates the values in ascending order.
    pub fn iter(&self) -> InOrder<'_, T> {
        InOrder::new(self.root.get())
    }

    /// Collects the values in ascending order into a [`Queue`].
    pub fn inorder_traversal(&self) -> Queue<&T> {
        self.iter().collect()
    }

    /// Iterates the values root first, then the left subtree, then the right subtree. Adding these
    /// values to an empty [`Bst`] in this order rebuilds the same shape.
    pub fn preorder(&self) -> PreOrder<'_, T> {
        PreOrder::new(self.root.get())
    }
}

impl<T, B> Tree<T, B>
where
    T: Ord,
{
    /// Whether a value equal to `value` is in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.add(1);
    ///
    /// assert!(tree.contains(&1));
    /// assert!(!tree.contains(&42));
    /// ```
    pub fn contains(&self, value: &T) -> bool {
        self.find_node(value).is_some()
    }

    /// The first node on the search path holding a value equal to `value`.
    fn find_node(&self, value: &T) -> Option<NonNull<Node<T>>> {
        let mut current = self.root;
        while let Some(ptr) = current.0 {
            // SAFETY: `ptr` came from a link reachable from the root so it's live.
            let node = unsafe { ptr.as_ref() };
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left,
                Ordering::Equal => return Some(ptr),
                Ordering::Greater => node.right,
            };
        }
        None
    }
}

impl<T, B> Tree<T, B>
where
    T: Ord,
    B: Balance,
{
    /// Inserts `value` as a new leaf and rebalances from the leaf's parent up. Values smaller
    /// than a node go to its left, everything else to its right. An [`AvlTree`] ignores a value
    /// equal to one it already holds; a [`Bst`] stores it again.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::{AvlTree, Bst};
    ///
    /// let mut avl = AvlTree::new();
    /// let mut bst = Bst::new();
    /// for value in [2, 1, 2] {
    ///     avl.add(value);
    ///     bst.add(value);
    /// }
    ///
    /// assert_eq!(avl.iter().count(), 2);
    /// assert_eq!(bst.iter().count(), 3);
    /// ```
    pub fn add(&mut self, value: T) {
        let mut parent = Link::NONE;
        let mut goes_left = false;
        let mut current = self.root;
        while let Some(ptr) = current.0 {
            // SAFETY: `ptr` came from a link reachable from the root so it's live, and the shared
            // borrow ends before anything below writes to the tree.
            let node = unsafe { ptr.as_ref() };
            parent = current;
            current = match value.cmp(&node.value) {
                Ordering::Equal if B::IGNORES_DUPLICATES => return,
                Ordering::Less => {
                    goes_left = true;
                    node.left
                }
                Ordering::Equal | Ordering::Greater => {
                    goes_left = false;
                    node.right
                }
            };
        }

        let leaf = Link::to(Node::new_leaf(value, parent));
        match parent.0 {
            None => self.root = leaf,
            Some(parent_ptr) => {
                // SAFETY: `parent_ptr` is the live node whose empty child slot ended the descent.
                // Nothing else is borrowed from the tree while we hold `&mut self`.
                unsafe {
                    if goes_left {
                        (*parent_ptr.as_ptr()).left = leaf;
                    } else {
                        (*parent_ptr.as_ptr()).right = leaf;
                    }
                    <B as Rebalance>::rebalance(&mut self.root, parent);
                }
            }
        }
    }

    /// Removes one node holding a value equal to `value`, returning whether there was one. A node
    /// with two children is replaced by its in-order successor.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let mut tree: AvlTree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// assert!(tree.remove(&2));
    /// assert!(!tree.contains(&2));
    /// assert!(!tree.remove(&42));
    /// ```
    pub fn remove(&mut self, value: &T) -> bool {
        let Some(node) = self.find_node(value) else {
            return false;
        };

        // SAFETY: `node` is live and reachable from the root, and all the links read and written
        // below belong to live nodes of this tree. We hold `&mut self` so nothing else is borrowed
        // from the tree. `node` is unlinked from every other node before it is freed.
        unsafe {
            let (parent, left, right) = {
                let n = node.as_ref();
                (n.parent, n.left, n.right)
            };

            let rebalance_from = match (left.0, right.0) {
                (None, None) => {
                    trace!("removing a leaf");
                    replace_child(&mut self.root, parent, node, Link::NONE);
                    parent
                }
                (Some(child), None) | (None, Some(child)) => {
                    trace!("removing a node with one child");
                    (*child.as_ptr()).parent = parent;
                    replace_child(&mut self.root, parent, node, Link::to(child));
                    parent
                }
                (Some(left), Some(right)) => {
                    trace!("removing a node with two children");
                    self.splice_successor(node, left, right)
                }
            };

            drop(Box::from_raw(node.as_ptr()));
            <B as Rebalance>::rebalance(&mut self.root, rebalance_from);
        }

        true
    }

    /// Moves the in-order successor of `node` (the leftmost node of its right subtree) into
    /// `node`'s place. Returns the lowest node whose subtree changed, which is where rebalancing
    /// has to start.
    ///
    /// # Safety
    ///
    /// `node` must be a live node of this tree with `left` and `right` as its children.
    unsafe fn splice_successor(
        &mut self,
        node: NonNull<Node<T>>,
        left: NonNull<Node<T>>,
        right: NonNull<Node<T>>,
    ) -> Link<T> {
        let mut successor_parent = node;
        let mut successor = right;
        while let Some(next) = (*successor.as_ptr()).left.0 {
            successor_parent = successor;
            successor = next;
        }
        let s = successor.as_ptr();

        (*s).left = Link::to(left);
        (*left.as_ptr()).parent = Link::to(successor);

        let rebalance_from = if successor == right {
            Link::to(successor)
        } else {
            // The successor has no left child so its right subtree fills the gap it leaves.
            (*successor_parent.as_ptr()).left = (*s).right;
            if let Some(orphan) = (*s).right.0 {
                (*orphan.as_ptr()).parent = Link::to(successor_parent);
            }

            (*s).right = Link::to(right);
            (*right.as_ptr()).parent = Link::to(successor);
            Link::to(successor_parent)
        };

        let parent = (*node.as_ptr()).parent;
        replace_child(&mut self.root, parent, node, Link::to(successor));
        (*s).parent = parent;

        rebalance_from
    }
}

impl<T, B> Clone for Tree<T, B>
where
    T: Clone,
{
    /// Copies the tree node for node, so the copy has the same shape and heights.
    fn clone(&self) -> Self {
        let mut copy = Self::new();
        let Some(root) = self.root.get() else {
            return copy;
        };

        let mut stack = Stack::new();
        let new_root = Node::alloc(root.value.clone(), Link::NONE, root.height);
        copy.root = Link::to(new_root);
        stack.push((root, new_root));

        while let Some((original, new_parent)) = stack.pop() {
            for (child, goes_left) in [(original.left.get(), true), (original.right.get(), false)] {
                let Some(child) = child else {
                    continue;
                };
                let new_child = Node::alloc(child.value.clone(), Link::to(new_parent), child.height);
                // SAFETY: `new_parent` was allocated by this loop, is owned by `copy` and nothing
                // else references it.
                unsafe {
                    if goes_left {
                        (*new_parent.as_ptr()).left = Link::to(new_child);
                    } else {
                        (*new_parent.as_ptr()).right = Link::to(new_child);
                    }
                }
                stack.push((child, new_child));
            }
        }

        copy
    }
}

impl<T, B> fmt::Debug for Tree<T, B>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Writes the values in pre-order, e.g. `AVL pre-order { 2, 1, 3 }`.
impl<T, B> fmt::Display for Tree<T, B>
where
    T: fmt::Display,
    B: Balance,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} pre-order {{ ", B::NAME)?;
        for (i, value) in self.preorder().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str(" }")
    }
}

impl<T, B> Extend<T> for Tree<T, B>
where
    T: Ord,
    B: Balance,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

/// Adds the values one at a time in iteration order, so the order decides the initial shape.
impl<T, B> FromIterator<T> for Tree<T, B>
where
    T: Ord,
    B: Balance,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, T, B> IntoIterator for &'a Tree<T, B> {
    type Item = &'a T;
    type IntoIter = InOrder<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//! Borrowing iterators over a [`Tree`][crate::Tree]. Both walk the tree with an explicit
//! [`Stack`] instead of recursing.

use crate::collections::Stack;
use crate::node::Node;

/// Yields a tree's values in ascending order. Created by [`Tree::iter`][crate::Tree::iter].
///
/// The stack holds the left spine still to be visited: on each step the nodes down the left edge
/// of the current subtree are pushed, the deepest one is popped and yielded, and the walk moves
/// on to its right subtree.
pub struct InOrder<'a, T> {
    stack: Stack<&'a Node<T>>,
    current: Option<&'a Node<T>>,
}

impl<'a, T> InOrder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        Self {
            stack: Stack::new(),
            current: root,
        }
    }
}

impl<'a, T> Iterator for InOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current {
            self.stack.push(node);
            self.current = node.left.get();
        }

        let node = self.stack.pop()?;
        self.current = node.right.get();
        Some(&node.value)
    }
}

/// Yields a tree's values root first, then the left subtree, then the right subtree. Created by
/// [`Tree::preorder`][crate::Tree::preorder].
pub struct PreOrder<'a, T> {
    stack: Stack<&'a Node<T>>,
}

impl<'a, T> PreOrder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        let mut stack = Stack::new();
        if let Some(root) = root {
            stack.push(root);
        }
        Self { stack }
    }
}

impl<'a, T> Iterator for PreOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right first so the left subtree comes off the stack first.
        if let Some(right) = node.right.get() {
            self.stack.push(right);
        }
        if let Some(left) = node.left.get() {
            self.stack.push(left);
        }
        Some(&node.value)
    }
}

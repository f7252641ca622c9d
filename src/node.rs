use std::fmt;
use std::ptr::NonNull;

/// A pointer to a `Node` that may be empty. Used for both edge directions: a parent's `left` and
/// `right` links own the child they point to while a child's `parent` link only observes.
pub struct Link<T>(pub(crate) Option<NonNull<Node<T>>>);

impl<T> Clone for Link<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for Link<T> {}

impl<T> PartialEq for Link<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl<T> Eq for Link<T> {}

impl<T> Link<T> {
    pub(crate) const NONE: Self = Link(None);

    pub(crate) fn to(node: NonNull<Node<T>>) -> Self {
        Link(Some(node))
    }

    pub(crate) fn get(&self) -> Option<&Node<T>> {
        // SAFETY: A non-empty link always points at a live node of the tree it belongs to. Nodes
        // are only freed after every link to them has been cleared or overwritten, and callers
        // only hold the returned reference while the tree is borrowed.
        unsafe { self.0.as_ref().map(|ptr| ptr.as_ref()) }
    }

    /// Height of the subtree behind this link. An empty link has a height of -1.
    pub(crate) fn height(self) -> isize {
        self.get().map_or(-1, |n| n.height)
    }
}

/// A single allocation in the tree. Nodes are created with `Box::leak` and released with
/// `Box::from_raw` by whichever operation detaches them for good.
pub struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
    pub(crate) parent: Link<T>,
    /// Edges on the longest path down to a leaf. A leaf has a height of 0.
    pub(crate) height: isize,
}

impl<T> Node<T> {
    pub(crate) fn alloc(value: T, parent: Link<T>, height: isize) -> NonNull<Self> {
        NonNull::from(Box::leak(Box::new(Node {
            value,
            left: Link::NONE,
            right: Link::NONE,
            parent,
            height,
        })))
    }

    pub(crate) fn new_leaf(value: T, parent: Link<T>) -> NonNull<Self> {
        Self::alloc(value, parent, 0)
    }

    pub(crate) fn balance_factor(&self) -> isize {
        self.right.height() - self.left.height()
    }
}

/// A read-only handle to a node of a [`Tree`][crate::Tree], borrowed from the tree.
///
/// # Examples
///
/// ```
/// use avl_tree::AvlTree;
///
/// let tree: AvlTree<_> = [1, 2, 3].into_iter().collect();
/// let root = tree.get_root().unwrap();
///
/// assert_eq!(root.value(), &2);
/// assert_eq!(root.height(), 1);
/// assert_eq!(root.left().map(|n| *n.value()), Some(1));
/// assert_eq!(root.right().unwrap().parent().map(|n| *n.value()), Some(2));
/// ```
pub struct NodeRef<'a, T> {
    node: &'a Node<T>,
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for NodeRef<'_, T> {}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn new(node: &'a Node<T>) -> Self {
        Self { node }
    }

    /// The value stored in this node.
    pub fn value(&self) -> &'a T {
        &self.node.value
    }

    /// The root of the left subtree.
    pub fn left(&self) -> Option<NodeRef<'a, T>> {
        self.node.left.get().map(NodeRef::new)
    }

    /// The root of the right subtree.
    pub fn right(&self) -> Option<NodeRef<'a, T>> {
        self.node.right.get().map(NodeRef::new)
    }

    /// The node this one hangs from. Only the root has none.
    pub fn parent(&self) -> Option<NodeRef<'a, T>> {
        self.node.parent.get().map(NodeRef::new)
    }

    /// The cached height of the subtree rooted here. A leaf has a height of 0.
    pub fn height(&self) -> isize {
        self.node.height
    }

    /// Height of the right subtree minus height of the left subtree.
    pub fn balance_factor(&self) -> isize {
        self.node.balance_factor()
    }

    /// Whether `self` and `other` are the same node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.node, other.node)
    }
}

impl<T> fmt::Debug for NodeRef<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.node.value)
            .field("height", &self.node.height)
            .finish()
    }
}

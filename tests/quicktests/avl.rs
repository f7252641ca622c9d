use avl_tree::AvlTree;
use quickcheck_macros::quickcheck;

use std::collections::{BTreeSet, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a `BTreeSet`, checking the AVL invariants after
/// every step. This way we can ensure that after a random smattering of adds and removes we
/// have the same set of values in both.
fn do_ops<T>(ops: &[Op<T>], tree: &mut AvlTree<T>, set: &mut BTreeSet<T>) -> bool
where
    T: Ord + Clone,
{
    for op in ops {
        let agreed = match op {
            Op::Add(value) => {
                tree.add(value.clone());
                set.insert(value.clone());
                true
            }
            Op::Remove(value) => tree.remove(value) == set.remove(value),
        };
        if !agreed || !tree.is_valid_avl() {
            return false;
        }
    }

    true
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = AvlTree::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set)
        && tree.iter().eq(set.iter())
        && tree.find_min() == set.iter().next()
        && tree.find_max() == set.iter().next_back()
}

#[quickcheck]
fn valid_after_every_add(xs: Vec<i32>) -> bool {
    let mut tree = AvlTree::new();
    xs.into_iter().all(|x| {
        tree.add(x);
        tree.is_valid_bst() && tree.is_valid_avl()
    })
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: AvlTree<_> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.contains(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: AvlTree<_> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.contains(x))
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: AvlTree<_> = xs.iter().copied().collect();
    for delete in &deletes {
        tree.remove(delete);
    }

    let mut still_present = xs;
    still_present.retain(|x| !deletes.contains(x));

    deletes.iter().all(|x| !tree.contains(x))
        && still_present.iter().all(|x| tree.contains(x))
        && tree.is_valid_avl()
}

#[quickcheck]
fn inorder_is_sorted_and_distinct(xs: Vec<i16>) -> bool {
    let tree: AvlTree<_> = xs.iter().copied().collect();
    let distinct: BTreeSet<_> = xs.into_iter().collect();
    let queue = tree.inorder_traversal();

    queue.len() == distinct.len() && queue.into_iter().eq(distinct.iter())
}

#[quickcheck]
fn removing_absent_value_changes_nothing(xs: Vec<i8>, absent: i8) -> bool {
    let mut tree: AvlTree<_> = xs.into_iter().filter(|x| *x != absent).collect();
    let before = tree.to_string();

    !tree.remove(&absent) && tree.to_string() == before && tree.is_valid_avl()
}

#[quickcheck]
fn clone_matches_shape(xs: Vec<i8>) -> bool {
    let tree: AvlTree<_> = xs.into_iter().collect();
    let copy = tree.clone();

    copy.preorder().eq(tree.preorder()) && copy.is_valid_avl()
}

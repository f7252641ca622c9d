use avl_tree::Bst;
use quickcheck_macros::quickcheck;

use crate::Op;

/// Applies a set of operations to a tree and a sorted `Vec` standing in for a multiset, since a
/// plain BST keeps every copy of a value.
fn do_ops<T>(ops: &[Op<T>], tree: &mut Bst<T>, model: &mut Vec<T>) -> bool
where
    T: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Add(value) => {
                tree.add(value.clone());
                let at = model.partition_point(|x| x <= value);
                model.insert(at, value.clone());
            }
            Op::Remove(value) => {
                let found = model.binary_search(value).map(|at| model.remove(at));
                if tree.remove(value) != found.is_ok() {
                    return false;
                }
            }
        }
        if !tree.is_valid_bst() {
            return false;
        }
    }

    true
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Bst::new();
    let mut model = Vec::new();

    do_ops(&ops, &mut tree, &mut model) && tree.iter().eq(model.iter())
}

#[quickcheck]
fn preorder_rebuilds_the_same_shape(xs: Vec<i8>) -> bool {
    let tree: Bst<_> = xs.into_iter().collect();
    let rebuilt: Bst<_> = tree.preorder().copied().collect();

    rebuilt.to_string() == tree.to_string()
}

#[quickcheck]
fn add_then_remove_round_trips(xs: Vec<i8>, fresh: i8) -> bool {
    let mut tree: Bst<_> = xs.into_iter().filter(|x| *x != fresh).collect();
    let before: Vec<_> = tree.iter().copied().collect();

    tree.add(fresh);
    tree.remove(&fresh) && tree.iter().copied().eq(before) && tree.is_valid_bst()
}

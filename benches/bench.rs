use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use avl_tree::{AvlTree, Bst};

#[derive(Clone)]
enum TreeEnum<T> {
    Avl(AvlTree<T>),
    Bst(Bst<T>),
}

impl<T> TreeEnum<T>
where
    T: Ord,
{
    fn contains(&self, value: &T) -> bool {
        match self {
            Self::Avl(t) => t.contains(value),
            Self::Bst(t) => t.contains(value),
        }
    }

    fn add(&mut self, value: T) {
        match self {
            Self::Avl(t) => t.add(value),
            Self::Bst(t) => t.add(value),
        }
    }

    fn remove(&mut self, value: &T) -> bool {
        match self {
            Self::Avl(t) => t.remove(value),
            Self::Bst(t) => t.remove(value),
        }
    }
}

/// Helper to bench a function on a tree.
/// It creates a group for the given name and closure and runs tests for various sizes of both
/// trees before finishing the group. Values are added in ascending order, which is the worst case
/// for the plain BST.
fn bench_helper(c: &mut Criterion, name: &str, f: impl Fn(&mut TreeEnum<i32>, i32)) {
    let mut group = c.benchmark_group(name);

    for num_levels in [3, 7, 11] {
        let num_nodes = 2usize.pow(num_levels as u32) - 1;
        let avl_tree: AvlTree<_> = (0..num_nodes as i32).collect();
        let bst_tree: Bst<_> = (0..num_nodes as i32).collect();
        let largest_element_in_tree = avl_tree.find_max().copied().unwrap_or_default();

        let tree_tests = [
            ("avl", TreeEnum::Avl(avl_tree)),
            ("bst", TreeEnum::Bst(bst_tree)),
        ];
        for (name, tree) in tree_tests {
            let id = BenchmarkId::new(name, largest_element_in_tree);

            group.bench_function(id, |b| {
                b.iter_custom(|iters| {
                    let mut time = std::time::Duration::ZERO;
                    for _ in 0..iters {
                        let mut tree = black_box(tree.clone());
                        let instant = std::time::Instant::now();
                        f(&mut tree, black_box(largest_element_in_tree));
                        let elapsed = instant.elapsed();
                        time += elapsed;
                    }
                    time
                })
            });
        }
    }

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_helper(c, "contains", |tree, i| {
        let _found = black_box(tree.contains(&i));
    });
    bench_helper(c, "remove", |tree, i| {
        tree.remove(&i);
    });

    bench_helper(c, "add", |tree, i| {
        tree.add(i + 1);
    });

    bench_helper(c, "contains-miss", |tree, i| {
        let _found = black_box(tree.contains(&(i + 1)));
    });
    bench_helper(c, "remove-miss", |tree, i| {
        tree.remove(&(i + 1));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use std::hint::black_box;

const NUM_OF_OPERATIONS: usize = 1_000;

fn keys() -> Vec<u32> {
    let mut rng = StdRng::seed_from_u64(1);
    (0..NUM_OF_OPERATIONS).map(|_| rng.gen()).collect()
}

fn bench_btreeset_insert(c: &mut Criterion) {
    let keys = keys();
    c.bench_function("bench btreeset insert", |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for key in &keys {
                set.insert(*key);
            }
            set
        })
    });
}

fn bench_btreeset_get(c: &mut Criterion) {
    let keys = keys();
    let set: BTreeSet<u32> = keys.iter().copied().collect();
    c.bench_function("bench btreeset get", |b| {
        b.iter(|| {
            for key in &keys {
                black_box(set.get(key));
            }
        })
    });
}

macro_rules! tree_benches {
    ($($module_name:ident: $type_name:ident,)*) => {
        $(
            mod $module_name {
                use balanced_bst::$type_name;
                use criterion::Criterion;
                use std::hint::black_box;

                pub fn bench_insert(c: &mut Criterion) {
                    let keys = super::keys();
                    c.bench_function(&format!("bench {} insert", stringify!($module_name)), |b| b.iter(|| {
                        let mut tree = $type_name::new();
                        for key in &keys {
                            tree.insert(*key);
                        }
                        tree
                    }));
                }

                pub fn bench_get(c: &mut Criterion) {
                    let keys = super::keys();
                    let tree: $type_name<u32> = keys.iter().copied().collect();
                    c.bench_function(&format!("bench {} get", stringify!($module_name)), |b| b.iter(|| {
                        for key in &keys {
                            black_box(tree.get(key));
                        }
                    }));
                }

                pub fn bench_remove(c: &mut Criterion) {
                    let keys = super::keys();
                    c.bench_function(&format!("bench {} remove", stringify!($module_name)), |b| b.iter_batched(
                        || keys.iter().copied().collect::<$type_name<u32>>(),
                        |mut tree| {
                            for key in &keys {
                                black_box(tree.remove(key));
                            }
                        },
                        criterion::BatchSize::SmallInput,
                    ));
                }
            }
        )*

        criterion_group!(
            benches,
            bench_btreeset_get,
            bench_btreeset_insert,
            $(
                $module_name::bench_get,
                $module_name::bench_insert,
                $module_name::bench_remove,
            )*
        );
    }
}

tree_benches!(
    bs_tree: BsTree,
    avl_tree: AvlTree,
    red_black_tree: RedBlackTree,
);

criterion_main!(benches);

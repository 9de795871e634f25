use criterion::{criterion_group, criterion_main, Criterion};
use kd_index::kdtree::{KDTree, KDTreeIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstar::RTree;

fn generate_points(n: usize) -> Vec<[f64; 2]> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n)
        .map(|_| [rng.gen_range(-180.0..180.0), rng.gen_range(-90.0..90.0)])
        .collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let points = generate_points(100_000);
    let target = [12.5, -41.25];

    c.bench_function("construction (kd-index)", |b| {
        b.iter(|| KDTree::try_new(points.iter().copied()).unwrap())
    });

    c.bench_function("construction (rstar bulk)", |b| {
        b.iter(|| RTree::bulk_load(points.clone()))
    });

    let tree = KDTree::try_new(points.iter().copied()).unwrap();
    let rstar_tree = RTree::bulk_load(points.clone());

    c.bench_function("nearest 10 (kd-index)", |b| {
        b.iter(|| tree.nearest_neighbors(10, &target).unwrap())
    });

    c.bench_function("nearest 10 (rstar)", |b| {
        b.iter(|| {
            rstar_tree
                .nearest_neighbor_iter(&target)
                .take(10)
                .collect::<Vec<_>>()
        })
    });

    c.bench_function("within 5 (kd-index)", |b| {
        b.iter(|| tree.within(5., &target).unwrap())
    });

    c.bench_function("within 5 (rstar)", |b| {
        b.iter(|| {
            rstar_tree
                .locate_within_distance(target, 25.)
                .collect::<Vec<_>>()
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

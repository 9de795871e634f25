//! Fixtures and a brute-force reference shared by the unit tests.

use num_traits::Zero;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::r#type::{cmp_num, sq_dist, IndexableNum, KDPoint};

/// The 100 point fixture used by kdbush, as `[x, y]` pairs.
pub(crate) fn points() -> Vec<[f64; 2]> {
    let coords: Vec<[i32; 2]> = vec![
        [54, 1],
        [97, 21],
        [65, 35],
        [33, 54],
        [95, 39],
        [54, 3],
        [53, 54],
        [84, 72],
        [33, 34],
        [43, 15],
        [52, 83],
        [81, 23],
        [1, 61],
        [38, 74],
        [11, 91],
        [24, 56],
        [90, 31],
        [25, 57],
        [46, 61],
        [29, 69],
        [49, 60],
        [4, 98],
        [71, 15],
        [60, 25],
        [38, 84],
        [52, 38],
        [94, 51],
        [13, 25],
        [77, 73],
        [88, 87],
        [6, 27],
        [58, 22],
        [53, 28],
        [27, 91],
        [96, 98],
        [93, 14],
        [22, 93],
        [45, 94],
        [18, 28],
        [35, 15],
        [19, 81],
        [20, 81],
        [67, 53],
        [43, 3],
        [47, 66],
        [48, 34],
        [46, 12],
        [32, 38],
        [43, 12],
        [39, 94],
        [88, 62],
        [66, 14],
        [84, 30],
        [72, 81],
        [41, 92],
        [26, 4],
        [6, 76],
        [47, 21],
        [57, 70],
        [71, 82],
        [50, 68],
        [96, 18],
        [40, 31],
        [78, 53],
        [71, 90],
        [32, 14],
        [55, 6],
        [32, 88],
        [62, 32],
        [21, 67],
        [73, 81],
        [44, 64],
        [29, 50],
        [70, 5],
        [6, 22],
        [68, 3],
        [11, 23],
        [20, 42],
        [21, 73],
        [63, 86],
        [9, 40],
        [99, 2],
        [99, 76],
        [56, 77],
        [83, 6],
        [21, 72],
        [78, 30],
        [75, 53],
        [41, 11],
        [95, 20],
        [30, 38],
        [96, 82],
        [65, 48],
        [33, 18],
        [87, 28],
        [10, 10],
        [40, 34],
        [10, 20],
        [47, 29],
        [46, 78],
    ];

    coords
        .into_iter()
        .map(|[x, y]| [x.into(), y.into()])
        .collect()
}

/// `n` random points with `dims` coordinates each in `[-100, 100)`, reproducible from `seed`.
pub(crate) fn random_points(n: usize, dims: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| (0..dims).map(|_| rng.gen_range(-100.0..100.0)).collect())
        .collect()
}

/// Ids of every point sorted by distance to `target`, ties broken by id.
pub(crate) fn brute_force_order<P, Q>(points: &[P], target: &Q) -> Vec<usize>
where
    P: KDPoint,
    Q: KDPoint<Num = P::Num> + ?Sized,
{
    let mut ids: Vec<usize> = (0..points.len()).collect();
    ids.sort_by(|&a, &b| {
        cmp_num(&sq_dist(&points[a], target), &sq_dist(&points[b], target)).then(a.cmp(&b))
    });
    ids
}

/// Ids of the `k` points nearest to `target`, found by a linear scan.
pub(crate) fn brute_force_nearest<P, Q>(points: &[P], k: usize, target: &Q) -> Vec<usize>
where
    P: KDPoint,
    Q: KDPoint<Num = P::Num> + ?Sized,
{
    let mut ids = brute_force_order(points, target);
    ids.truncate(k);
    ids
}

/// Ids of every point within `radius` of `target`, nearest first, found by a linear scan.
pub(crate) fn brute_force_within<P, Q>(points: &[P], radius: P::Num, target: &Q) -> Vec<usize>
where
    P: KDPoint,
    Q: KDPoint<Num = P::Num> + ?Sized,
{
    let r2 = radius.sq_diff(P::Num::zero());
    brute_force_order(points, target)
        .into_iter()
        .filter(|&id| sq_dist(&points[id], target) <= r2)
        .collect()
}

use std::cmp::Ordering;
use std::fmt::Debug;
use std::ops::Add;

use geo_traits::CoordTrait;
use num_traits::{Bounded, Num, NumCast, ToPrimitive, Zero};

use crate::distance::ExactDistance;

/// A trait for types that can be used for indexed coordinates.
///
/// This trait is sealed and cannot be implemented for external types. Each coordinate type picks
/// the accumulator its squared distances are computed in. Integer coordinates accumulate in
/// `i128`, which cannot overflow or underflow for any supported input. Floating point coordinates
/// accumulate in an [`ExactDistance`], which carries the rounding error of every step so that
/// distances near a query boundary compare exactly.
pub trait IndexableNum:
    private::Sealed
    + Num
    + NumCast
    + ToPrimitive
    + PartialOrd
    + Copy
    + Debug
    + Send
    + Sync
    + Bounded
{
    /// The type squared distances are accumulated in.
    type Distance: Clone + PartialOrd + Debug + Zero + Add<Output = Self::Distance> + Send + Sync;

    /// The squared difference `(self - other)²`.
    fn sq_diff(self, other: Self) -> Self::Distance;

    /// Whether this value can be totally ordered against every other valid value.
    ///
    /// Always `true` for integers; `false` for NaN and infinite floats.
    fn is_orderable(self) -> bool;
}

macro_rules! impl_integer {
    ($($t:ty),*) => {
        $(
            impl IndexableNum for $t {
                type Distance = i128;

                #[inline]
                fn sq_diff(self, other: Self) -> i128 {
                    let d = self as i128 - other as i128;
                    d * d
                }

                #[inline]
                fn is_orderable(self) -> bool {
                    true
                }
            }
        )*
    };
}

macro_rules! impl_float {
    ($($t:ty),*) => {
        $(
            impl IndexableNum for $t {
                type Distance = ExactDistance;

                #[inline]
                fn sq_diff(self, other: Self) -> ExactDistance {
                    ExactDistance::from_sq_diff(self as f64, other as f64)
                }

                #[inline]
                fn is_orderable(self) -> bool {
                    self.is_finite()
                }
            }
        )*
    };
}

impl_integer!(i8, u8, i16, u16, i32, u32);
impl_float!(f32, f64);

/// Compare two coordinates that have already been checked with [`IndexableNum::is_orderable`].
#[inline]
pub(crate) fn cmp_num<T: PartialOrd>(a: &T, b: &T) -> Ordering {
    // Inputs are validated on insertion, so this never falls back outside of caller-linked trees.
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

/// A point in k-dimensional space.
///
/// Implement this on your own types to attach arbitrary payload to each indexed point; the tree
/// only ever reads coordinates through this trait.
///
/// ```
/// use kd_index::KDPoint;
///
/// struct Star {
///     name: &'static str,
///     position: [f64; 3],
/// }
///
/// impl KDPoint for Star {
///     type Num = f64;
///
///     fn dims(&self) -> usize {
///         3
///     }
///
///     fn coord(&self, axis: usize) -> f64 {
///         self.position[axis]
///     }
/// }
/// ```
pub trait KDPoint {
    /// The coordinate type.
    type Num: IndexableNum;

    /// The number of coordinates of this point.
    fn dims(&self) -> usize;

    /// The coordinate on the given axis. `axis` is always less than [`KDPoint::dims`].
    fn coord(&self, axis: usize) -> Self::Num;
}

impl<N: IndexableNum, const D: usize> KDPoint for [N; D] {
    type Num = N;

    #[inline]
    fn dims(&self) -> usize {
        D
    }

    #[inline]
    fn coord(&self, axis: usize) -> N {
        self[axis]
    }
}

impl<N: IndexableNum> KDPoint for [N] {
    type Num = N;

    #[inline]
    fn dims(&self) -> usize {
        self.len()
    }

    #[inline]
    fn coord(&self, axis: usize) -> N {
        self[axis]
    }
}

impl<N: IndexableNum> KDPoint for Vec<N> {
    type Num = N;

    #[inline]
    fn dims(&self) -> usize {
        self.len()
    }

    #[inline]
    fn coord(&self, axis: usize) -> N {
        self[axis]
    }
}

impl<N: IndexableNum> KDPoint for Box<[N]> {
    type Num = N;

    #[inline]
    fn dims(&self) -> usize {
        self.len()
    }

    #[inline]
    fn coord(&self, axis: usize) -> N {
        self[axis]
    }
}

impl<N: IndexableNum> KDPoint for (N, N) {
    type Num = N;

    #[inline]
    fn dims(&self) -> usize {
        2
    }

    #[inline]
    fn coord(&self, axis: usize) -> N {
        if axis == 0 {
            self.0
        } else {
            self.1
        }
    }
}

impl<N: IndexableNum> KDPoint for (N, N, N) {
    type Num = N;

    #[inline]
    fn dims(&self) -> usize {
        3
    }

    #[inline]
    fn coord(&self, axis: usize) -> N {
        match axis {
            0 => self.0,
            1 => self.1,
            _ => self.2,
        }
    }
}

impl<P: KDPoint + ?Sized> KDPoint for &P {
    type Num = P::Num;

    #[inline]
    fn dims(&self) -> usize {
        (**self).dims()
    }

    #[inline]
    fn coord(&self, axis: usize) -> P::Num {
        (**self).coord(axis)
    }
}

/// Adapter exposing any [`CoordTrait`] as a [`KDPoint`].
///
/// The dimensionality follows the coordinate's [`geo_traits::Dimensions`], so `Xy` coordinates
/// are 2-D and `Xyz`/`Xym` coordinates are 3-D.
#[derive(Debug, Clone, Copy)]
pub struct CoordPoint<C>(pub C);

impl<C> KDPoint for CoordPoint<C>
where
    C: CoordTrait,
    C::T: IndexableNum,
{
    type Num = C::T;

    #[inline]
    fn dims(&self) -> usize {
        self.0.dim().size()
    }

    #[inline]
    fn coord(&self, axis: usize) -> C::T {
        self.0.nth_or_panic(axis)
    }
}

/// Borrowing counterpart of [`CoordPoint`], used for query targets.
pub(crate) struct CoordRef<'a, C>(pub(crate) &'a C);

impl<C> KDPoint for CoordRef<'_, C>
where
    C: CoordTrait,
    C::T: IndexableNum,
{
    type Num = C::T;

    #[inline]
    fn dims(&self) -> usize {
        self.0.dim().size()
    }

    #[inline]
    fn coord(&self, axis: usize) -> C::T {
        self.0.nth_or_panic(axis)
    }
}

/// Squared Euclidean distance between two points of equal dimensionality.
#[inline]
pub fn sq_dist<A, B>(a: &A, b: &B) -> <A::Num as IndexableNum>::Distance
where
    A: KDPoint + ?Sized,
    B: KDPoint<Num = A::Num> + ?Sized,
{
    let mut total = <A::Num as IndexableNum>::Distance::zero();
    for axis in 0..a.dims() {
        total = total + a.coord(axis).sq_diff(b.coord(axis));
    }
    total
}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for i8 {}
    impl Sealed for u8 {}
    impl Sealed for i16 {}
    impl Sealed for u16 {}
    impl Sealed for i32 {}
    impl Sealed for u32 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unsigned_differences_do_not_underflow() {
        assert_eq!(3u8.sq_diff(250u8), 247 * 247);
        assert_eq!(u32::MAX.sq_diff(0), (u32::MAX as i128) * (u32::MAX as i128));
    }

    #[test]
    fn squared_distance_sums_every_axis() {
        assert_eq!(sq_dist(&[0i32, 0, 0], &[1i32, 2, 3]), 14);
        assert_eq!(sq_dist(&(1.0f64, 1.0f64), &(2.0f64, 2.0f64)).to_f64(), 2.0);
        assert_eq!(sq_dist(&vec![5.0f32], &vec![2.0f32]).to_f64(), 9.0);
    }

    #[test]
    fn non_finite_floats_are_not_orderable() {
        assert!(1.5f64.is_orderable());
        assert!(!f64::NAN.is_orderable());
        assert!(!f32::INFINITY.is_orderable());
        assert!(i8::MIN.is_orderable());
    }

    #[test]
    fn coord_point_follows_coord_dimensions() {
        let point = CoordPoint((3.0f64, 4.0f64));
        assert_eq!(point.dims(), 2);
        assert_eq!(point.coord(1), 4.0);
    }
}

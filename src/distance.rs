//! Exact squared distances for floating point coordinates.

use std::cmp::Ordering;
use std::ops::{Add, Neg};

use num_traits::Zero;
use tinyvec::TinyVec;

/// An exact sum of squared floating point differences.
///
/// The value is held as a floating point expansion: a list of non-zero, non-overlapping `f64`
/// components in increasing order of magnitude whose exact sum is the represented value. Every
/// operation on it (differences, squares, sums, comparisons) is free of rounding error, so two
/// distances compare the way their real-number values do.
///
/// Exactness holds as long as no squared coordinate difference overflows `f64`, and no rounding
/// error term of a product falls below the smallest subnormal. Coordinates between roughly `1e-140`
/// and `1e150` in magnitude (and zero) are always safe.
///
/// ```
/// use kd_index::{sq_dist, ExactDistance};
///
/// // 0.6² + 0.8² is slightly more than 1 for these doubles
/// let dist = sq_dist(&[0.6f64, 0.8], &[0., 0.]);
/// let one = sq_dist(&[1.0f64], &[0.]);
/// assert!(dist > one);
/// assert_eq!(dist.to_f64(), 1.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExactDistance {
    components: TinyVec<[f64; 16]>,
}

impl ExactDistance {
    /// The exact value of `(a - b)²`.
    pub(crate) fn from_sq_diff(a: f64, b: f64) -> Self {
        // a - b == d + e exactly, so (a - b)² == d² + 2de + e²
        let (d, e) = two_sum(a, -b);
        let (dd, dd_err) = two_product(d, d);
        let (de, de_err) = two_product(d, e);
        let (ee, ee_err) = two_product(e, e);

        let mut result = Self::default();
        for term in [ee_err, ee, 2.0 * de_err, 2.0 * de, dd_err, dd] {
            result.grow(term);
        }
        result
    }

    /// The nearest `f64` to this value, up to one rounding of the largest component.
    pub fn to_f64(&self) -> f64 {
        self.components.iter().sum()
    }

    /// Add a single `f64` into the expansion, keeping it non-overlapping and free of zeros.
    fn grow(&mut self, b: f64) {
        let mut q = b;
        let mut len = 0;
        for i in 0..self.components.len() {
            let (sum, err) = two_sum(q, self.components[i]);
            q = sum;
            if err != 0.0 {
                self.components[len] = err;
                len += 1;
            }
        }
        self.components.truncate(len);
        if q != 0.0 {
            self.components.push(q);
        }
    }

    /// The sign of the value, which is the sign of its largest component.
    fn sign(&self) -> Ordering {
        match self.components.last() {
            None => Ordering::Equal,
            Some(&largest) if largest > 0.0 => Ordering::Greater,
            Some(_) => Ordering::Less,
        }
    }
}

impl Add for ExactDistance {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        for &component in rhs.components.iter() {
            self.grow(component);
        }
        self
    }
}

impl Neg for ExactDistance {
    type Output = Self;

    fn neg(mut self) -> Self {
        for component in self.components.iter_mut() {
            *component = -*component;
        }
        self
    }
}

impl Zero for ExactDistance {
    fn zero() -> Self {
        Self::default()
    }

    fn is_zero(&self) -> bool {
        self.components.is_empty()
    }
}

impl PartialEq for ExactDistance {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for ExactDistance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some((self.clone() + -other.clone()).sign())
    }
}

/// `a + b` as the rounded sum and its exact rounding error.
#[inline]
fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let sum = a + b;
    let b_virtual = sum - a;
    let a_virtual = sum - b_virtual;
    let b_round = b - b_virtual;
    let a_round = a - a_virtual;
    (sum, a_round + b_round)
}

/// `a * b` as the rounded product and its exact rounding error.
#[inline]
fn two_product(a: f64, b: f64) -> (f64, f64) {
    let product = a * b;
    (product, a.mul_add(b, -product))
}

#[cfg(test)]
mod test {
    use super::*;

    fn sq(a: f64, b: f64) -> ExactDistance {
        ExactDistance::from_sq_diff(a, b)
    }

    #[test]
    fn boundary_sum_is_not_rounded() {
        // In f64 arithmetic 0.6 * 0.6 + 0.8 * 0.8 rounds to exactly 1.0
        assert_eq!(0.6f64 * 0.6 + 0.8 * 0.8, 1.0);

        let dist = sq(0.6, 0.) + sq(0.8, 0.);
        let one = sq(1., 0.);
        assert!(dist > one);
        assert_ne!(dist, one);
        assert_eq!(dist.to_f64(), 1.0);
    }

    #[test]
    fn differences_are_not_rounded() {
        // 1e16 + 1 - 1e16 would lose the 1 in a plain f64 subtraction
        let big = 1e16;
        assert!(sq(big + 2., 0.) > sq(big, 0.));
        assert_eq!(sq(0.1, 0.3), sq(0.3, 0.1));
        assert!(sq(0.1, 0.3) < sq(0.1, 0.30000000000000004));
    }

    #[test]
    fn equal_values_compare_equal() {
        assert_eq!(sq(1., 3.) + sq(2., 2.), sq(0., 2.));
        assert_eq!(sq(1.5, 1.5), ExactDistance::zero());
        assert!(sq(1.5, 1.5).is_zero());
        assert_eq!(sq(3., 1.).to_f64(), 4.0);
    }

    #[test]
    fn ordering_is_exact_for_tiny_gaps() {
        let x = 1.0f64;
        let next = f64::from_bits(x.to_bits() + 1);
        assert!(sq(next, 0.) > sq(x, 0.));
        assert!(sq(x, 0.) + sq(1e-30, 0.) > sq(x, 0.));
        assert!(-sq(2., 0.) < ExactDistance::zero());
    }
}

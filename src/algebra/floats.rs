#![allow(non_snake_case)]
use num_rational::BigRational;
use num_traits::{Num, NumAssign, Signed, ToPrimitive, Zero};
use std::fmt::{Debug, Display};

/// Core trait for the scalar field used by the simplex engines.
///
/// The floating point engines run on `f64`.  The exact engine runs on
/// [`BigRational`](num_rational::BigRational), where every arithmetic
/// operation is exact and all tolerances collapse to zero.
///
/// `Scalar` relies on [`num_traits`](num_traits) for its arithmetic bounds.
/// Values are passed by value, so implementations for heap-allocated types
/// are cloned where needed.
pub trait Scalar:
    'static + Clone + Debug + Display + PartialOrd + Num + NumAssign + Signed + Send + Sync
{
    /// true if arithmetic on this type is exact
    const EXACT: bool;

    /// conversion from a finite `f64`
    fn from_f64(v: f64) -> Self;

    /// nearest `f64` value
    fn to_f64(&self) -> f64;

    /// square root.  Approximate for exact types.
    fn sqrt(&self) -> Self;

    /// the larger of two values
    fn max_of(self, other: Self) -> Self {
        if other > self {
            other
        } else {
            self
        }
    }
}

impl Scalar for f64 {
    const EXACT: bool = false;

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }
    #[inline]
    fn to_f64(&self) -> f64 {
        *self
    }
    #[inline]
    fn sqrt(&self) -> Self {
        f64::sqrt(*self)
    }
}

impl Scalar for BigRational {
    const EXACT: bool = true;

    fn from_f64(v: f64) -> Self {
        // every finite double is a dyadic rational, so this is exact
        BigRational::from_float(v).unwrap_or_else(BigRational::zero)
    }

    fn to_f64(&self) -> f64 {
        // scaled before dividing, so huge numerators and denominators
        // still give a finite quotient
        ToPrimitive::to_f64(self).unwrap_or(f64::NAN)
    }

    fn sqrt(&self) -> Self {
        <BigRational as Scalar>::from_f64(f64::sqrt(Scalar::to_f64(self)))
    }
}

/// Trait for converting `f64` constants into a [`Scalar`](crate::algebra::Scalar)

// NB: `AsScalar` lets us write (2.0).as_T() on constants rather
// than T::from_f64(2.0) everywhere
pub trait AsScalar<T>: 'static {
    fn as_T(&self) -> T;
}

impl<T: Scalar> AsScalar<T> for f64 {
    #[inline]
    fn as_T(&self) -> T {
        T::from_f64(*self)
    }
}

impl<T: Scalar> AsScalar<T> for usize {
    #[inline]
    fn as_T(&self) -> T {
        T::from_f64(*self as f64)
    }
}

#[test]
fn test_rational_roundtrip() {
    let v: BigRational = (0.375).as_T();
    assert_eq!(v, BigRational::new(3.into(), 8.into()));
    assert_eq!(Scalar::to_f64(&v), 0.375);

    let third = BigRational::new(1.into(), 3.into());
    assert!((Scalar::to_f64(&third) - 1.0 / 3.0).abs() < 1e-15);
    assert!(BigRational::EXACT);
    assert!(!f64::EXACT);
}

#[test]
fn test_rational_beyond_f64_range() {
    use num_bigint::BigInt;

    let big = BigInt::from(10).pow(400);
    let v = BigRational::new(&big + BigInt::from(1), &big * BigInt::from(2));
    assert!((Scalar::to_f64(&v) - 0.5).abs() < 1e-12);
}

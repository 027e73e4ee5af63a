//! Dense basis factorizations with product-form (eta file) updates.
//!
//! A [`Factorization`] holds a base factor of the basis matrix `B` plus a
//! list of eta columns, one for every column replacement since the last
//! refactorization.  Solves with `B` (ftran) and `B'` (btran) go through
//! the base factor and the eta file in the appropriate order.

#![allow(non_snake_case)]

mod eta;
mod lu;
mod qr;

pub(crate) use eta::*;
pub(crate) use lu::*;
pub(crate) use qr::*;

use crate::algebra::{FactorError, Scalar};
use enum_dispatch::enum_dispatch;

/// Solves with a factored square matrix.
#[enum_dispatch]
pub(crate) trait DenseFactor<T>
where
    T: Scalar,
{
    /// dimension of the factored matrix
    fn dim(&self) -> usize;

    /// overwrite `b` with the solution of `B x = b`
    fn solve(&self, b: &mut [T]);

    /// overwrite `c` with the solution of `B' x = c`
    fn solve_t(&self, c: &mut [T]);
}

#[enum_dispatch(DenseFactor<T>)]
pub(crate) enum BaseFactor<T>
where
    T: Scalar,
{
    LuFactor(LuFactor<T>),
    QrFactor(QrFactor<T>),
}

/// Factorization method for the basis matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FactorMethod {
    /// LU with partial (row) pivoting
    LuPartial,
    /// LU with complete pivoting
    LuComplete,
    /// QR by Givens rotations
    Givens,
}

impl<T> BaseFactor<T>
where
    T: Scalar,
{
    /// Factor the dense column-major matrix `B` of dimension `n`.
    pub(crate) fn new(
        B: &[T],
        n: usize,
        method: FactorMethod,
        eps: &T,
    ) -> Result<Self, FactorError> {
        if B.len() != n * n {
            return Err(FactorError::IncompatibleDimension);
        }
        let factor = match method {
            FactorMethod::LuPartial => LuFactor::factor(B, n, false, eps)?.into(),
            FactorMethod::LuComplete => LuFactor::factor(B, n, true, eps)?.into(),
            FactorMethod::Givens => QrFactor::factor(B, n, eps)?.into(),
        };
        Ok(factor)
    }
}

#[cfg(test)]
fn colmajor(rows: &[&[f64]]) -> Vec<f64> {
    let n = rows.len();
    let mut B = vec![0.0; n * n];
    for (i, row) in rows.iter().enumerate() {
        for (j, v) in row.iter().enumerate() {
            B[i + j * n] = *v;
        }
    }
    B
}

#[test]
fn test_base_factor_methods() {
    let B = colmajor(&[&[0., 2., 1.], &[1., 1., 0.], &[4., 0., 3.]]);
    let x = [1., -2., 3.];
    // b = B*x
    let b = [-1., -1., 13.];
    // c = B'*x
    let c = [10., 0., 10.];

    for method in [
        FactorMethod::LuPartial,
        FactorMethod::LuComplete,
        FactorMethod::Givens,
    ] {
        let F = BaseFactor::new(&B, 3, method, &1e-12).unwrap();
        assert_eq!(F.dim(), 3);

        let mut y = b;
        F.solve(&mut y);
        for i in 0..3 {
            assert!((y[i] - x[i]).abs() < 1e-12, "{:?}", method);
        }

        let mut y = c;
        F.solve_t(&mut y);
        for i in 0..3 {
            assert!((y[i] - x[i]).abs() < 1e-12, "{:?}", method);
        }
    }
}

#[test]
fn test_base_factor_singular() {
    let B = colmajor(&[&[1., 2.], &[2., 4.]]);
    for method in [
        FactorMethod::LuPartial,
        FactorMethod::LuComplete,
        FactorMethod::Givens,
    ] {
        assert!(matches!(
            BaseFactor::new(&B, 2, method, &1e-12),
            Err(FactorError::Singular(_))
        ));
    }
    assert_eq!(
        BaseFactor::new(&B, 3, FactorMethod::LuPartial, &1e-12).err(),
        Some(FactorError::IncompatibleDimension)
    );
}

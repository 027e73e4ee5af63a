#![allow(non_snake_case)]
use super::DenseFactor;
use crate::algebra::{FactorError, Scalar};

/// QR factors of a square matrix computed with Givens rotations.
///
/// Stores `Q'` and the upper triangle `R` with `Q' B = R`, both row-major.
#[derive(Debug, Clone)]
pub(crate) struct QrFactor<T> {
    n: usize,
    qt: Vec<T>,
    r: Vec<T>,
}

impl<T> QrFactor<T>
where
    T: Scalar,
{
    pub(crate) fn factor(B: &[T], n: usize, eps: &T) -> Result<Self, FactorError> {
        let mut r = vec![T::zero(); n * n];
        let mut qt = vec![T::zero(); n * n];
        for i in 0..n {
            for j in 0..n {
                r[i * n + j] = B[i + j * n].clone();
            }
            qt[i * n + i] = T::one();
        }

        for j in 0..n {
            // annihilate below the diagonal from the bottom up
            for i in ((j + 1)..n).rev() {
                let b = r[i * n + j].clone();
                if b.is_zero() {
                    continue;
                }
                let a = r[(i - 1) * n + j].clone();
                let h = (a.clone() * a.clone() + b.clone() * b.clone()).sqrt();
                let c = a / h.clone();
                let s = b / h;
                rotate(&mut r, n, i - 1, i, &c, &s);
                rotate(&mut qt, n, i - 1, i, &c, &s);
                r[i * n + j] = T::zero();
            }
            if r[j * n + j].abs() <= *eps || r[j * n + j].is_zero() {
                return Err(FactorError::Singular(j));
            }
        }

        Ok(Self { n, qt, r })
    }
}

// apply the rotation [c s; -s c] to rows p and q
fn rotate<T: Scalar>(M: &mut [T], n: usize, p: usize, q: usize, c: &T, s: &T) {
    for k in 0..n {
        let x = M[p * n + k].clone();
        let y = M[q * n + k].clone();
        M[p * n + k] = c.clone() * x.clone() + s.clone() * y.clone();
        M[q * n + k] = c.clone() * y - s.clone() * x;
    }
}

impl<T> DenseFactor<T> for QrFactor<T>
where
    T: Scalar,
{
    fn dim(&self) -> usize {
        self.n
    }

    fn solve(&self, b: &mut [T]) {
        let n = self.n;
        let (qt, r) = (&self.qt, &self.r);

        // R x = Q' b
        let mut y: Vec<T> = (0..n)
            .map(|i| {
                (0..n).fold(T::zero(), |acc, k| {
                    acc + qt[i * n + k].clone() * b[k].clone()
                })
            })
            .collect();
        for i in (0..n).rev() {
            let mut s = y[i].clone();
            for k in (i + 1)..n {
                s -= r[i * n + k].clone() * y[k].clone();
            }
            y[i] = s / r[i * n + i].clone();
        }
        b.clone_from_slice(&y);
    }

    fn solve_t(&self, c: &mut [T]) {
        let n = self.n;
        let (qt, r) = (&self.qt, &self.r);

        // R' v = c, then x = Q v
        let mut v: Vec<T> = c.to_vec();
        for i in 0..n {
            let mut s = v[i].clone();
            for k in 0..i {
                s -= r[k * n + i].clone() * v[k].clone();
            }
            v[i] = s / r[i * n + i].clone();
        }
        for (i, ci) in c.iter_mut().enumerate() {
            *ci = (0..n).fold(T::zero(), |acc, k| {
                acc + qt[k * n + i].clone() * v[k].clone()
            });
        }
    }
}

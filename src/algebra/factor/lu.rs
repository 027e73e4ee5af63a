#![allow(non_snake_case)]
use super::DenseFactor;
use crate::algebra::{FactorError, Scalar};

/// LU factors of a square matrix with `P B Q = L U`.
///
/// `L` is unit lower triangular and `U` is upper triangular, both stored
/// in one row-major array.  `perm[i]` is the row of `B` moved to position
/// `i`, and `cperm[j]` the column of `B` moved to position `j`.
#[derive(Debug, Clone)]
pub(crate) struct LuFactor<T> {
    n: usize,
    lu: Vec<T>,
    perm: Vec<usize>,
    cperm: Vec<usize>,
}

impl<T> LuFactor<T>
where
    T: Scalar,
{
    /// Factor the dense column-major matrix `B`.  With `complete` set the
    /// pivot is chosen over the whole active submatrix, otherwise over the
    /// active part of the pivot column only.
    pub(crate) fn factor(B: &[T], n: usize, complete: bool, eps: &T) -> Result<Self, FactorError> {
        let mut lu = vec![T::zero(); n * n];
        for j in 0..n {
            for i in 0..n {
                lu[i * n + j] = B[i + j * n].clone();
            }
        }
        let mut perm: Vec<usize> = (0..n).collect();
        let mut cperm: Vec<usize> = (0..n).collect();

        for k in 0..n {
            // pivot search
            let (mut pr, mut pc) = (k, k);
            let mut best = T::zero();
            let cols = if complete { k..n } else { k..k + 1 };
            for j in cols {
                for i in k..n {
                    let v = lu[i * n + j].abs();
                    if v > best {
                        best = v;
                        pr = i;
                        pc = j;
                    }
                }
            }
            if best <= *eps || best.is_zero() {
                return Err(FactorError::Singular(k));
            }

            if pr != k {
                for j in 0..n {
                    lu.swap(k * n + j, pr * n + j);
                }
                perm.swap(k, pr);
            }
            if pc != k {
                for i in 0..n {
                    lu.swap(i * n + k, i * n + pc);
                }
                cperm.swap(k, pc);
            }

            let pivot = lu[k * n + k].clone();
            for i in (k + 1)..n {
                if lu[i * n + k].is_zero() {
                    continue;
                }
                let l = lu[i * n + k].clone() / pivot.clone();
                for j in (k + 1)..n {
                    if !lu[k * n + j].is_zero() {
                        let u = lu[k * n + j].clone();
                        lu[i * n + j] -= l.clone() * u;
                    }
                }
                lu[i * n + k] = l;
            }
        }

        Ok(Self { n, lu, perm, cperm })
    }
}

impl<T> DenseFactor<T> for LuFactor<T>
where
    T: Scalar,
{
    fn dim(&self) -> usize {
        self.n
    }

    fn solve(&self, b: &mut [T]) {
        let n = self.n;
        let lu = &self.lu;
        let mut y: Vec<T> = self.perm.iter().map(|&p| b[p].clone()).collect();

        // L z = P b
        for i in 0..n {
            let mut s = y[i].clone();
            for (k, yk) in y.iter().enumerate().take(i) {
                s -= lu[i * n + k].clone() * yk.clone();
            }
            y[i] = s;
        }
        // U w = z
        for i in (0..n).rev() {
            let mut s = y[i].clone();
            for k in (i + 1)..n {
                s -= lu[i * n + k].clone() * y[k].clone();
            }
            y[i] = s / lu[i * n + i].clone();
        }
        for (j, w) in y.into_iter().enumerate() {
            b[self.cperm[j]] = w;
        }
    }

    fn solve_t(&self, c: &mut [T]) {
        let n = self.n;
        let lu = &self.lu;
        let mut y: Vec<T> = self.cperm.iter().map(|&q| c[q].clone()).collect();

        // U' v = Q' c
        for i in 0..n {
            let mut s = y[i].clone();
            for k in 0..i {
                s -= lu[k * n + i].clone() * y[k].clone();
            }
            y[i] = s / lu[i * n + i].clone();
        }
        // L' w = v
        for i in (0..n).rev() {
            let mut s = y[i].clone();
            for k in (i + 1)..n {
                s -= lu[k * n + i].clone() * y[k].clone();
            }
            y[i] = s;
        }
        for (i, w) in y.into_iter().enumerate() {
            c[self.perm[i]] = w;
        }
    }
}

#[test]
fn test_lu_exact_rational() {
    use num_rational::BigRational;
    let r = |a: i64, b: i64| BigRational::new(a.into(), b.into());

    // B = [1/2 1; 1/3 0] in column-major order
    let B = vec![r(1, 2), r(1, 3), r(1, 1), r(0, 1)];
    let F = LuFactor::factor(&B, 2, false, &r(0, 1)).unwrap();

    // B * [3, 1/2] = [2, 1]
    let mut x = vec![r(2, 1), r(1, 1)];
    F.solve(&mut x);
    assert_eq!(x, vec![r(3, 1), r(1, 2)]);
}

#![allow(non_snake_case)]
use super::{BaseFactor, DenseFactor, FactorMethod};
use crate::algebra::{FactorError, Scalar};

// one column replacement B <- B E, with E the identity except
// for column r, which holds alpha = inv(B) a
#[derive(Debug, Clone)]
struct Eta<T> {
    r: usize,
    alpha: Vec<T>,
}

/// Basis factorization: a base factor followed by an eta file.
pub(crate) struct Factorization<T>
where
    T: Scalar,
{
    base: BaseFactor<T>,
    etas: Vec<Eta<T>>,
    refactor_limit: usize,
    eps: T,
}

impl<T> Factorization<T>
where
    T: Scalar,
{
    /// Factor the dense column-major basis matrix `B`.
    pub(crate) fn new(
        B: &[T],
        n: usize,
        method: FactorMethod,
        refactor_limit: usize,
        eps: T,
    ) -> Result<Self, FactorError> {
        let base = BaseFactor::new(B, n, method, &eps)?;
        Ok(Self {
            base,
            etas: Vec::new(),
            refactor_limit,
            eps,
        })
    }

    pub(crate) fn dim(&self) -> usize {
        self.base.dim()
    }

    /// overwrite `b` with `inv(B) b`
    pub(crate) fn ftran(&self, b: &mut [T]) {
        self.base.solve(b);
        for eta in &self.etas {
            let r = eta.r;
            let xr = b[r].clone() / eta.alpha[r].clone();
            for (i, a) in eta.alpha.iter().enumerate() {
                if i != r && !a.is_zero() {
                    b[i] -= a.clone() * xr.clone();
                }
            }
            b[r] = xr;
        }
    }

    /// overwrite `c` with `inv(B') c`
    pub(crate) fn btran(&self, c: &mut [T]) {
        for eta in self.etas.iter().rev() {
            let r = eta.r;
            let mut s = c[r].clone();
            for (i, a) in eta.alpha.iter().enumerate() {
                if i != r && !a.is_zero() {
                    s -= a.clone() * c[i].clone();
                }
            }
            c[r] = s / eta.alpha[r].clone();
        }
        self.base.solve_t(c);
    }

    /// Replace basis column `r` given `alpha = inv(B) a` for the
    /// entering column `a`.
    pub(crate) fn update(&mut self, r: usize, alpha: &[T]) -> Result<(), FactorError> {
        if alpha.len() != self.dim() {
            return Err(FactorError::IncompatibleDimension);
        }
        if alpha[r].abs() <= self.eps || alpha[r].is_zero() {
            return Err(FactorError::Singular(r));
        }
        self.etas.push(Eta {
            r,
            alpha: alpha.to_vec(),
        });
        Ok(())
    }

    /// true once the eta file is long enough that a fresh factorization
    /// is cheaper than further updates
    pub(crate) fn needs_refactor(&self) -> bool {
        self.etas.len() >= self.refactor_limit
    }
}

impl<T> std::fmt::Debug for Factorization<T>
where
    T: Scalar,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Factorization")
            .field("dim", &self.dim())
            .field("etas", &self.etas.len())
            .finish()
    }
}

#[test]
fn test_eta_updates() {
    // B = I (2x2), then replace column 0 by a = [2, 1]'
    let B = vec![1., 0., 0., 1.];
    let mut F = Factorization::new(&B, 2, FactorMethod::LuPartial, 2, 1e-12).unwrap();

    let mut alpha = vec![2., 1.];
    F.ftran(&mut alpha);
    F.update(0, &alpha).unwrap();
    assert!(!F.needs_refactor());

    // new B = [2 0; 1 1]
    let mut x = vec![4., 3.];
    F.ftran(&mut x);
    assert!((x[0] - 2.).abs() < 1e-14 && (x[1] - 1.).abs() < 1e-14);

    // B' y = [5, 1] -> y = [2, 1]
    let mut y = vec![5., 1.];
    F.btran(&mut y);
    assert!((y[0] - 2.).abs() < 1e-14 && (y[1] - 1.).abs() < 1e-14);

    // replace column 1 by a = [0, 0]' is singular
    let mut alpha = vec![0., 0.];
    F.ftran(&mut alpha);
    assert!(F.update(1, &alpha).is_err());

    let mut alpha = vec![1., 3.];
    F.ftran(&mut alpha);
    F.update(1, &alpha).unwrap();
    assert!(F.needs_refactor());
}

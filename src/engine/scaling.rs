#![allow(non_snake_case)]
use super::lp::LpData;
use super::simplex::Outcome;
use crate::params::ScaleMode;
use itertools::izip;

// passes of geometric mean scaling
const GM_PASSES: usize = 4;

/// Row and column scale factors of an LP.
///
/// The scaled matrix is `R A S`, with `R = diag(r)` and `S = diag(s)`.
/// An auxiliary variable `r_i` becomes `r[i] * r_i` and a structural
/// variable `x_j` becomes `x_j / s[j]`.  All factors are powers of 2, so
/// scaling does not perturb the data.
#[derive(Debug, Clone)]
pub(crate) struct Scaling {
    /// row scaling terms
    pub r: Vec<f64>,
    /// column scaling terms
    pub s: Vec<f64>,
}

impl Scaling {
    pub fn new(lp: &LpData<f64>, mode: ScaleMode) -> Self {
        let mut sc = Self {
            r: vec![1.0; lp.m],
            s: vec![1.0; lp.n],
        };
        if matches!(mode, ScaleMode::GeometricMean | ScaleMode::Both) {
            for _ in 0..GM_PASSES {
                sc.geometric_pass(lp);
            }
        }
        if matches!(mode, ScaleMode::Equilibration | ScaleMode::Both) {
            sc.equilibrate_pass(lp);
        }
        sc.r.iter_mut().for_each(|v| *v = pow2(*v));
        sc.s.iter_mut().for_each(|v| *v = pow2(*v));
        sc
    }

    fn scaled(&self, i: usize, j: usize, a: f64) -> f64 {
        (self.r[i] * a * self.s[j]).abs()
    }

    // (min, max) of the absolute scaled entries in each row
    fn row_ranges(&self, lp: &LpData<f64>) -> Vec<Option<(f64, f64)>> {
        let mut ranges: Vec<Option<(f64, f64)>> = vec![None; lp.m];
        for (j, col) in lp.A.iter().enumerate() {
            for &(i, a) in col {
                let v = self.scaled(i, j, a);
                if v == 0.0 {
                    continue;
                }
                ranges[i] = Some(match ranges[i] {
                    Some((lo, hi)) => (lo.min(v), hi.max(v)),
                    None => (v, v),
                });
            }
        }
        ranges
    }

    fn col_range(&self, lp: &LpData<f64>, j: usize) -> Option<(f64, f64)> {
        lp.A[j]
            .iter()
            .map(|&(i, a)| self.scaled(i, j, a))
            .filter(|&v| v > 0.0)
            .fold(None, |acc, v| match acc {
                Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
                None => Some((v, v)),
            })
    }

    fn geometric_pass(&mut self, lp: &LpData<f64>) {
        for (i, range) in self.row_ranges(lp).into_iter().enumerate() {
            if let Some((lo, hi)) = range {
                self.r[i] /= (lo * hi).sqrt();
            }
        }
        for j in 0..lp.n {
            if let Some((lo, hi)) = self.col_range(lp, j) {
                self.s[j] /= (lo * hi).sqrt();
            }
        }
    }

    fn equilibrate_pass(&mut self, lp: &LpData<f64>) {
        for (i, range) in self.row_ranges(lp).into_iter().enumerate() {
            if let Some((_, hi)) = range {
                self.r[i] /= hi;
            }
        }
        for j in 0..lp.n {
            if let Some((_, hi)) = self.col_range(lp, j) {
                self.s[j] /= hi;
            }
        }
    }

    // scale factor of variable k, in the sense z~ = f z
    fn factor(&self, m: usize, k: usize) -> f64 {
        if k < m {
            self.r[k]
        } else {
            1.0 / self.s[k - m]
        }
    }

    /// The scaled LP.
    pub fn apply(&self, lp: &LpData<f64>) -> LpData<f64> {
        let m = lp.m;
        let mut out = lp.clone();
        for (j, col) in out.A.iter_mut().enumerate() {
            for (i, a) in col.iter_mut() {
                *a *= self.r[*i] * self.s[j];
            }
        }
        for (k, (lb, ub, c)) in izip!(&mut out.lb, &mut out.ub, &mut out.c).enumerate() {
            let f = self.factor(m, k);
            *lb = lb.map(|v| v * f);
            *ub = ub.map(|v| v * f);
            *c /= f;
        }
        out
    }

    /// Map primal values and reduced costs of a run on the scaled LP
    /// back to the original LP.
    pub fn unscale(&self, out: &mut Outcome<f64>) {
        let m = self.r.len();
        for (k, (x, d)) in izip!(&mut out.x, &mut out.d).enumerate() {
            let f = self.factor(m, k);
            *x /= f;
            *d *= f;
        }
    }
}

// nearest power of 2
fn pow2(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        f64::powi(2.0, v.log2().round() as i32)
    } else {
        1.0
    }
}

#[test]
fn test_scaling() {
    use crate::problem::{ObjDir, SolStat};
    use super::control::SimplexReturn;

    // [1000  0.01]
    // [   2     4]
    let lp = LpData {
        m: 2,
        n: 2,
        A: vec![vec![(0, 1000.), (1, 2.)], vec![(0, 0.01), (1, 4.)]],
        lb: vec![Some(1.), None, Some(0.), Some(0.)],
        ub: vec![Some(3000.), Some(8.), None, Some(10.)],
        c: vec![0., 0., 1., -1.],
        c0: 0.,
        dir: ObjDir::Minimize,
    };

    for mode in [ScaleMode::Equilibration, ScaleMode::GeometricMean, ScaleMode::Both] {
        let sc = Scaling::new(&lp, mode);
        assert!(sc.r.iter().chain(&sc.s).all(|v| v.log2().fract() == 0.0));

        let slp = sc.apply(&lp);
        let big = slp.A.iter().flatten().map(|e| e.1.abs()).fold(0.0, f64::max);
        let small = slp.A.iter().flatten().map(|e| e.1.abs()).fold(f64::MAX, f64::min);
        if mode != ScaleMode::Equilibration {
            assert!(big / small < 1e4);
        }
        if mode != ScaleMode::GeometricMean {
            assert!(big <= 2.0);
        }

        // values map back exactly
        let mut out = Outcome {
            ret: SimplexReturn::Ok,
            stat: vec![],
            x: vec![slp.ub[0].unwrap(), 0., 0., slp.ub[3].unwrap()],
            d: vec![0., 0., slp.c[2], slp.c[3]],
            prim_stat: SolStat::Feasible,
            dual_stat: SolStat::Feasible,
            iters: 0,
        };
        sc.unscale(&mut out);
        assert_eq!(out.x[0], 3000.);
        assert_eq!(out.x[3], 10.);
        assert_eq!(out.d[2], 1.);
        assert_eq!(out.d[3], -1.);
    }

    assert!(Scaling::new(&lp, ScaleMode::None).r.iter().all(|&v| v == 1.0));
}

#![allow(non_snake_case)]
use super::DiagnosticsError;
use crate::problem::{ObjDir, Problem, SolutionStatus, VarStat};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Range of an objective coefficient over which the current basis
/// stays optimal.  Unbounded sides are infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CostRange {
    pub lower: f64,
    pub upper: f64,
}

impl Problem {
    /// Objective coefficient ranges of all columns.
    ///
    /// The basic solution must be optimal.  The current basis is
    /// factored if no factorization is cached.
    pub fn sensitivity(&mut self) -> Result<Vec<CostRange>, DiagnosticsError> {
        if self.status() != SolutionStatus::Optimal {
            return Err(DiagnosticsError::NotOptimal);
        }
        if !self.bf_exists() {
            self.factorize()?;
        }

        // work in minimization sense
        let sign = match self.obj_dir() {
            ObjDir::Minimize => 1.0,
            ObjDir::Maximize => -1.0,
        };
        let m = self.num_rows();
        let d: Vec<f64> = self
            .basic
            .row_dual
            .iter()
            .chain(&self.basic.col_dual)
            .map(|d| sign * d)
            .collect();

        let ranges = (0..self.num_cols())
            .map(|j| {
                let k = m + j;
                let c = sign * self.cols[j].obj;
                let (lo, hi) = match self.var_stat(k) {
                    VarStat::Basic => self.basic_range(k, &d),
                    stat => nonbasic_range(stat, d[k]),
                };
                to_user(sign, c + lo, c + hi)
            })
            .collect();
        Ok(ranges)
    }

    // Cost changes `delta` of basic variable `k` keeping every nonbasic
    // reduced cost `d_q - delta * alpha_q` dual feasible, where alpha is
    // the tableau row of `k`.
    fn basic_range(&self, k: usize, d: &[f64]) -> (f64, f64) {
        let (mut lo, mut hi) = (f64::NEG_INFINITY, f64::INFINITY);
        let factor = match &self.factor {
            Some(factor) => factor,
            None => return (lo, hi),
        };
        let m = self.num_rows();
        let Some(p) = factor.head.iter().position(|&h| h == k) else {
            return (lo, hi);
        };

        let mut rho = vec![0.0; m];
        rho[p] = 1.0;
        factor.lu.btran(&mut rho);

        for q in 0..m + self.num_cols() {
            let stat = self.var_stat(q);
            if stat.is_basic() || stat == VarStat::Fixed {
                continue;
            }
            // alpha_q = rho' N_q with N_q = e_q or -a_q
            let alpha = if q < m {
                rho[q]
            } else {
                -self.cols[q - m].entries.iter().map(|&(i, a)| rho[i] * a).sum::<f64>()
            };
            if alpha.abs() < 1e-12 {
                continue;
            }
            let t = d[q] / alpha;
            match stat {
                // d_q - delta * alpha >= 0
                VarStat::AtLower if alpha > 0.0 => hi = hi.min(t),
                VarStat::AtLower => lo = lo.max(t),
                // d_q - delta * alpha <= 0
                VarStat::AtUpper if alpha > 0.0 => lo = lo.max(t),
                VarStat::AtUpper => hi = hi.min(t),
                // a free nonbasic variable keeps d_q = 0
                _ => {
                    lo = lo.max(0.0);
                    hi = hi.min(0.0);
                }
            }
        }
        (lo, hi)
    }
}

// cost change range of a nonbasic variable with reduced cost `d`
fn nonbasic_range(stat: VarStat, d: f64) -> (f64, f64) {
    match stat {
        VarStat::AtLower => (-d, f64::INFINITY),
        VarStat::AtUpper => (f64::NEG_INFINITY, -d),
        VarStat::Free => (-d, -d),
        _ => (f64::NEG_INFINITY, f64::INFINITY),
    }
}

fn to_user(sign: f64, lo: f64, hi: f64) -> CostRange {
    if sign > 0.0 {
        CostRange { lower: lo, upper: hi }
    } else {
        CostRange {
            lower: -hi,
            upper: -lo,
        }
    }
}

#[test]
fn test_cost_ranges() {
    use crate::engine::{control::SimplexControl, simplex};
    use crate::io::ConfigurablePrintTarget;
    use crate::problem::Bounds;

    // maximize 3x + 2y
    // s.t.  x +  y <= 4
    //       x + 3y <= 8
    //       0 <= x <= 3, y >= 0
    let mut P = Problem::new();
    P.print_to_sink();
    P.set_obj_dir(ObjDir::Maximize);
    P.add_rows(2);
    P.add_cols(2);
    P.set_row_bnds(0, Bounds::Upper(4.)).unwrap();
    P.set_row_bnds(1, Bounds::Upper(8.)).unwrap();
    P.set_col_bnds(0, Bounds::Double(0., 3.)).unwrap();
    P.set_col_bnds(1, Bounds::Lower(0.)).unwrap();
    P.set_obj_coef(0, 3.).unwrap();
    P.set_obj_coef(1, 2.).unwrap();
    P.set_mat_row(0, &[(0, 1.), (1, 1.)]).unwrap();
    P.set_mat_row(1, &[(0, 1.), (1, 3.)]).unwrap();

    assert_eq!(P.sensitivity(), Err(DiagnosticsError::NotOptimal));
    assert_eq!(simplex::simplex(&mut P, &SimplexControl::default()), crate::engine::control::SimplexReturn::Ok);
    assert!(!P.bf_exists());

    let ranges = P.sensitivity().unwrap();
    assert!(P.bf_exists());
    // x sits at its upper bound and stays there while c_x >= 2
    assert!((ranges[0].lower - 2.).abs() < 1e-9);
    assert_eq!(ranges[0].upper, f64::INFINITY);
    // y stays basic for 0 <= c_y <= 3
    assert!(ranges[1].lower.abs() < 1e-9);
    assert!((ranges[1].upper - 3.).abs() < 1e-9);
}

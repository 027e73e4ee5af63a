#![allow(non_snake_case)]
use crate::problem::{ContinuousKind, ObjDir, Problem, SolutionStatus};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which solution [`Problem::check_kkt`] examines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KktTarget {
    /// The most recent continuous solution: the basic solution after a
    /// simplex run, the interior point solution after an interior point
    /// run.
    Continuous,
    /// The integer solution.  Only the primal conditions are checked.
    Integer,
}

/// Accuracy grade of a residual category, from its largest relative
/// residual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Quality {
    /// at most 1e-9
    High,
    /// at most 1e-6
    Medium,
    /// at most 1e-3
    Low,
    /// the solution is wrong
    Unknown,
}

impl Quality {
    pub fn from_relative(re: f64) -> Self {
        if re <= 1e-9 {
            Quality::High
        } else if re <= 1e-6 {
            Quality::Medium
        } else if re <= 1e-3 {
            Quality::Low
        } else {
            Quality::Unknown
        }
    }
}

/// Row or column where a residual occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum KktLocation {
    Row(usize),
    Col(usize),
}

/// Largest residuals of one category of the KKT conditions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KktResidual {
    /// largest absolute residual
    pub abs_max: f64,
    /// where it occurs, `None` if every residual is zero
    pub abs_loc: Option<KktLocation>,
    /// largest relative residual
    pub rel_max: f64,
    pub rel_loc: Option<KktLocation>,
    pub quality: Quality,
}

impl Default for KktResidual {
    fn default() -> Self {
        Self {
            abs_max: 0.0,
            abs_loc: None,
            rel_max: 0.0,
            rel_loc: None,
            quality: Quality::High,
        }
    }
}

impl KktResidual {
    // record residual `ae` with scale `s` at `loc`
    fn add(&mut self, ae: f64, s: f64, loc: KktLocation) {
        let re = ae / (1.0 + s.abs());
        if ae > self.abs_max {
            self.abs_max = ae;
            self.abs_loc = Some(loc);
        }
        if re > self.rel_max {
            self.rel_max = re;
            self.rel_loc = Some(loc);
        }
        self.quality = Quality::from_relative(self.rel_max);
    }
}

/// Residuals of the KKT conditions of a solution.
///
/// * primal equalities: `r_i = sum_j a_ij x_j` for every row, scaled by
///   the row activity
/// * primal bounds: bound violations of rows and columns, scaled by the
///   violated bound
/// * dual equalities: `d_j = c_j - sum_i a_ij pi_i` for every column,
///   scaled by the cost `c_j`
/// * dual bounds: sign violations of the reduced costs given the bounds
///   of each variable, scaled by the cost
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KktReport {
    pub primal_eq: KktResidual,
    pub primal_bound: KktResidual,
    /// absent for integer solutions
    pub dual_eq: Option<KktResidual>,
    pub dual_bound: Option<KktResidual>,
}

// views of one solution
struct Solution<'a> {
    row_prim: &'a [f64],
    col_prim: &'a [f64],
    duals: Option<(&'a [f64], &'a [f64])>,
}

impl Problem {
    /// Check the KKT conditions of a solution.
    ///
    /// For a continuous target with an optimal basic solution and no
    /// cached factorization, the basis is factored first so that
    /// later sensitivity queries find it cached.
    pub fn check_kkt(&mut self, target: KktTarget) -> KktReport {
        if target == KktTarget::Continuous
            && self.last_continuous != Some(ContinuousKind::Interior)
            && !self.bf_exists()
            && self.status() == SolutionStatus::Optimal
        {
            if let Err(e) = self.factorize() {
                tracing::warn!(error = %e, "optimal basis could not be factored");
            }
        }

        let sol = match target {
            KktTarget::Integer => Solution {
                row_prim: &self.mip.row_val,
                col_prim: &self.mip.col_val,
                duals: None,
            },
            KktTarget::Continuous => match self.last_continuous {
                Some(ContinuousKind::Interior) => Solution {
                    row_prim: &self.interior.row_prim,
                    col_prim: &self.interior.col_prim,
                    duals: Some((&self.interior.row_dual, &self.interior.col_dual)),
                },
                _ => Solution {
                    row_prim: &self.basic.row_prim,
                    col_prim: &self.basic.col_prim,
                    duals: Some((&self.basic.row_dual, &self.basic.col_dual)),
                },
            },
        };

        let report = KktReport {
            primal_eq: self.primal_eq(&sol),
            primal_bound: self.primal_bound(&sol),
            dual_eq: sol.duals.map(|d| self.dual_eq(d)),
            dual_bound: sol.duals.map(|d| self.dual_bound(d)),
        };
        tracing::debug!(?target, ?report, "KKT check");
        report
    }

    fn primal_eq(&self, sol: &Solution) -> KktResidual {
        let mut res = KktResidual::default();
        for (i, (ax, r)) in self.eval_rows(sol.col_prim).iter().zip(sol.row_prim).enumerate() {
            res.add((r - ax).abs(), *r, KktLocation::Row(i));
        }
        res
    }

    fn primal_bound(&self, sol: &Solution) -> KktResidual {
        let mut res = KktResidual::default();
        let rows = self.rows.iter().zip(sol.row_prim).enumerate();
        for (i, (row, x)) in rows {
            if let (ae, Some(b)) = row.bounds.violation(*x) {
                res.add(ae, b, KktLocation::Row(i));
            }
        }
        let cols = self.cols.iter().zip(sol.col_prim).enumerate();
        for (j, (col, x)) in cols {
            if let (ae, Some(b)) = col.bounds.violation(*x) {
                res.add(ae, b, KktLocation::Col(j));
            }
        }
        res
    }

    fn dual_eq(&self, (row_dual, col_dual): (&[f64], &[f64])) -> KktResidual {
        let mut res = KktResidual::default();
        for (j, (col, d)) in self.cols.iter().zip(col_dual).enumerate() {
            let api: f64 = col.entries.iter().map(|&(i, a)| a * row_dual[i]).sum();
            res.add((d - (col.obj - api)).abs(), col.obj, KktLocation::Col(j));
        }
        res
    }

    fn dual_bound(&self, (row_dual, col_dual): (&[f64], &[f64])) -> KktResidual {
        let sign = match self.obj_dir() {
            ObjDir::Minimize => 1.0,
            ObjDir::Maximize => -1.0,
        };
        // a variable without upper bound needs d >= 0 and one without
        // lower bound d <= 0 in minimization sense
        let violation = |lower: Option<f64>, upper: Option<f64>, d: f64| {
            let d = sign * d;
            match (lower, upper) {
                (Some(_), Some(_)) => 0.0,
                (Some(_), None) => (-d).max(0.0),
                (None, Some(_)) => d.max(0.0),
                (None, None) => d.abs(),
            }
        };

        let mut res = KktResidual::default();
        for (i, (row, d)) in self.rows.iter().zip(row_dual).enumerate() {
            let ae = violation(row.bounds.lower(), row.bounds.upper(), *d);
            if ae > 0.0 {
                res.add(ae, 0.0, KktLocation::Row(i));
            }
        }
        for (j, (col, d)) in self.cols.iter().zip(col_dual).enumerate() {
            let ae = violation(col.bounds.lower(), col.bounds.upper(), *d);
            if ae > 0.0 {
                res.add(ae, col.obj, KktLocation::Col(j));
            }
        }
        res
    }
}

#[test]
fn test_quality_thresholds() {
    assert_eq!(Quality::from_relative(1e-10), Quality::High);
    assert_eq!(Quality::from_relative(1e-7), Quality::Medium);
    assert_eq!(Quality::from_relative(1e-4), Quality::Low);
    assert_eq!(Quality::from_relative(1.0), Quality::Unknown);
    assert_eq!(Quality::from_relative(f64::NAN), Quality::Unknown);
}

#[test]
fn test_residual_locations() {
    let mut res = KktResidual::default();
    res.add(0.5, 1000.0, KktLocation::Row(2));
    res.add(0.1, 0.0, KktLocation::Col(4));
    assert_eq!(res.abs_max, 0.5);
    assert_eq!(res.abs_loc, Some(KktLocation::Row(2)));
    assert_eq!(res.rel_max, 0.1);
    assert_eq!(res.rel_loc, Some(KktLocation::Col(4)));
    assert_eq!(res.quality, Quality::Unknown);
}

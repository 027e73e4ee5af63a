//! Cutting planes for the root relaxation.
//!
//! Every generator looks at the optimal root relaxation and returns
//! inequalities in the structural variables that are valid for all
//! integer feasible points and violated by the relaxation optimum.

mod clique;
mod cover;
mod gomory;
mod mir;

use crate::engine::control::SimplexControl;
use crate::engine::lp::LpData;
use crate::engine::simplex::Outcome;
use crate::params::CutFlags;

// minimal violation of a cut worth adding
const MIN_VIOLATION: f64 = 1e-6;

/// A cut `lb <= sum a_j x_j <= ub`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Cut {
    pub coefs: Vec<(usize, f64)>,
    pub lb: Option<f64>,
    pub ub: Option<f64>,
}

impl Cut {
    pub fn activity(&self, xs: &[f64]) -> f64 {
        self.coefs.iter().map(|&(j, a)| a * xs[j]).sum()
    }

    /// amount by which `xs` violates the cut
    pub fn violation(&self, xs: &[f64]) -> f64 {
        let act = self.activity(xs);
        let lo = self.lb.map_or(0.0, |l| l - act);
        let hi = self.ub.map_or(0.0, |u| act - u);
        lo.max(hi).max(0.0)
    }

    fn is_violated(&self, xs: &[f64]) -> bool {
        let rhs = self.lb.or(self.ub).unwrap_or(0.0);
        self.violation(xs) > MIN_VIOLATION * (1.0 + rhs.abs())
    }
}

/// Everything a generator needs to know about the root relaxation.
pub(crate) struct CutContext<'a> {
    pub lp: &'a LpData<f64>,
    /// rows `0..model_rows` are model rows, the rest are earlier cuts
    pub model_rows: usize,
    pub is_int: &'a [bool],
    pub out: &'a Outcome<f64>,
    pub ctrl: &'a SimplexControl,
    rows: Vec<Vec<(usize, f64)>>,
}

impl<'a> CutContext<'a> {
    pub fn new(
        lp: &'a LpData<f64>,
        model_rows: usize,
        is_int: &'a [bool],
        out: &'a Outcome<f64>,
        ctrl: &'a SimplexControl,
    ) -> Self {
        let mut rows = vec![Vec::new(); lp.m];
        for (j, col) in lp.A.iter().enumerate() {
            for &(i, a) in col {
                rows[i].push((j, a));
            }
        }
        Self {
            lp,
            model_rows,
            is_int,
            out,
            ctrl,
            rows,
        }
    }

    /// structural part of the relaxation optimum
    pub fn xs(&self) -> &[f64] {
        &self.out.x[self.lp.m..]
    }

    /// structural coefficients of row `i`
    pub fn row(&self, i: usize) -> &[(usize, f64)] {
        &self.rows[i]
    }

    /// bounds of structural column `j`
    pub fn col_bounds(&self, j: usize) -> (Option<f64>, Option<f64>) {
        let k = self.lp.m + j;
        (self.lp.lb[k], self.lp.ub[k])
    }

    /// true if variable `k` (auxiliary or structural) is integer with
    /// integral bounds
    pub fn is_integer_var(&self, k: usize) -> bool {
        let m = self.lp.m;
        k >= m && self.is_int[k - m] && {
            let integral = |v: Option<f64>| v.map_or(true, |v| v == v.floor());
            integral(self.lp.lb[k]) && integral(self.lp.ub[k])
        }
    }

    /// true if structural column `j` is binary
    pub fn is_binary(&self, j: usize) -> bool {
        self.is_int[j] && self.col_bounds(j) == (Some(0.0), Some(1.0))
    }

    /// Model rows written as `sum a_j x_j <= b`, one per finite side.
    pub fn le_rows(&self) -> impl Iterator<Item = (Vec<(usize, f64)>, f64)> + '_ {
        (0..self.model_rows).flat_map(move |i| {
            let row = &self.rows[i];
            let upper = self.lp.ub[i].map(|u| (row.clone(), u));
            let lower = self.lp.lb[i].map(|l| (row.iter().map(|&(j, a)| (j, -a)).collect(), -l));
            upper.into_iter().chain(lower)
        })
    }
}

/// Generate one round of cuts of the families selected by `flags`.
pub(crate) fn generate(ctx: &CutContext, flags: CutFlags) -> Vec<Cut> {
    let mut cuts = Vec::new();
    if flags.contains(CutFlags::GOMORY) {
        cuts.extend(gomory::generate(ctx));
    }
    if flags.contains(CutFlags::MIR) {
        cuts.extend(mir::generate(ctx));
    }
    if flags.contains(CutFlags::COVER) {
        cuts.extend(cover::generate(ctx));
    }
    if flags.contains(CutFlags::CLIQUE) {
        cuts.extend(clique::generate(ctx));
    }
    let xs = ctx.xs();
    cuts.retain(|c| c.is_violated(xs));
    cuts.dedup();
    cuts
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::engine::control::SimplexReturn;
    use crate::engine::progress::Progress;
    use crate::engine::simplex::solve_lp;
    use crate::io::{ConfigurablePrintTarget, PrintTarget};
    use crate::params::MsgLevel;
    use crate::problem::ObjDir;

    #[allow(non_snake_case)]
    /// maximization LP over rows `(entries, lb, ub)` and columns
    /// `(lb, ub, cost)`
    pub fn make_lp(
        rows: &[(Vec<(usize, f64)>, Option<f64>, Option<f64>)],
        cols: &[(Option<f64>, Option<f64>, f64)],
    ) -> LpData<f64> {
        let m = rows.len();
        let mut A = vec![Vec::new(); cols.len()];
        for (i, (entries, _, _)) in rows.iter().enumerate() {
            for &(j, a) in entries {
                A[j].push((i, a));
            }
        }
        let mut c = vec![0.0; m];
        c.extend(cols.iter().map(|col| -col.2));
        LpData {
            m,
            n: cols.len(),
            A,
            lb: rows.iter().map(|r| r.1).chain(cols.iter().map(|c| c.0)).collect(),
            ub: rows.iter().map(|r| r.2).chain(cols.iter().map(|c| c.1)).collect(),
            c,
            c0: 0.0,
            dir: ObjDir::Maximize,
        }
    }

    pub fn solve(lp: &LpData<f64>) -> Outcome<f64> {
        let mut out = PrintTarget::default();
        out.print_to_sink();
        let mut progress = Progress::new(&mut out, MsgLevel::Off, 1, 0, i32::MAX);
        let res = solve_lp(lp, lp.std_stat(), &SimplexControl::default(), &mut progress).unwrap();
        assert_eq!(res.ret, SimplexReturn::Ok);
        res
    }

    /// true if no integer point of the box `0..=hi` satisfying all rows
    /// violates `cut`
    pub fn cut_is_valid(lp: &LpData<f64>, cut: &Cut, hi: i32) -> bool {
        let n = lp.n;
        let mut x = vec![0i32; n];
        loop {
            let xs: Vec<f64> = x.iter().map(|&v| v as f64).collect();
            let in_bounds = (0..n).all(|j| {
                let k = lp.m + j;
                lp.lb[k].map_or(true, |l| xs[j] >= l) && lp.ub[k].map_or(true, |u| xs[j] <= u)
            });
            let feasible = in_bounds
                && (0..lp.m).all(|i| {
                    let xs = &xs;
                    let act: f64 = (0..n)
                        .flat_map(|j| lp.A[j].iter().filter(move |e| e.0 == i).map(move |e| e.1 * xs[j]))
                        .sum();
                    lp.lb[i].map_or(true, |l| act >= l - 1e-9) && lp.ub[i].map_or(true, |u| act <= u + 1e-9)
                });
            if feasible && cut.violation(&xs) > 1e-9 {
                return false;
            }
            // next grid point
            let mut j = 0;
            loop {
                if j == n {
                    return true;
                }
                x[j] += 1;
                if x[j] <= hi {
                    break;
                }
                x[j] = 0;
                j += 1;
            }
        }
    }
}

//! Dense bounded-variable simplex method.
//!
//! The engine works on an [`LpData`] copy of the problem and keeps an
//! explicit basis heading together with a [`Factorization`] of the basis
//! matrix.  Primal and dual variants share the basis bookkeeping defined
//! here.  The engine is generic over the scalar field, so the same code
//! runs in floating point and in exact rational arithmetic.

#![allow(non_snake_case)]

mod driver;
mod dual;
mod primal;

pub(crate) use driver::*;

use super::control::{RatioTest, SimplexControl, SimplexReturn};
use super::lp::LpData;
use super::progress::Progress;
use crate::algebra::factor::{FactorMethod, Factorization};
use crate::algebra::{AsScalar, FactorError, Scalar, VectorMath};
use crate::params::{Pricing, SimplexMethod};
use crate::problem::{SolStat, VarStat, FACTOR_EPS, REFACTOR_LIMIT};

// consecutive degenerate steps before switching to Bland's rule
const DEGEN_SWITCH: usize = 25;

/// Tolerances of a simplex run.  All zero in exact arithmetic.
#[derive(Debug, Clone)]
pub(crate) struct Tolerances<T> {
    pub bnd: T,
    pub dj: T,
    pub piv: T,
    pub relax: T,
}

impl<T> Tolerances<T>
where
    T: Scalar,
{
    pub fn new(ctrl: &SimplexControl) -> Self {
        if T::EXACT {
            return Self {
                bnd: T::zero(),
                dj: T::zero(),
                piv: T::zero(),
                relax: T::zero(),
            };
        }
        Self {
            bnd: ctrl.tol_bnd.as_T(),
            dj: ctrl.tol_dj.as_T(),
            piv: ctrl.tol_piv.as_T(),
            relax: match ctrl.r_test {
                RatioTest::Textbook => T::zero(),
                RatioTest::Harris => ctrl.relax.as_T(),
            },
        }
    }
}

/// Final state of a simplex run.
#[derive(Debug, Clone)]
pub(crate) struct Outcome<T> {
    pub ret: SimplexReturn,
    pub stat: Vec<VarStat>,
    /// values of all m+n variables
    pub x: Vec<T>,
    /// reduced costs of all m+n variables, in minimization sense
    pub d: Vec<T>,
    pub prim_stat: SolStat,
    pub dual_stat: SolStat,
    pub iters: usize,
}

// result of a primal ratio test
enum Step<T> {
    Pivot { r: usize, to_upper: bool, t: T },
    Flip { t: T },
    Unbounded,
}

pub(crate) struct Simplex<'a, T>
where
    T: Scalar,
{
    lp: &'a LpData<T>,
    tol: Tolerances<T>,
    pricing: Pricing,
    it_lim: usize,
    // objective lower and upper limit
    obj_lim: (f64, f64),
    method: FactorMethod,

    stat: Vec<VarStat>,
    head: Vec<usize>,
    factor: Factorization<T>,
    x: Vec<T>,
    iters: usize,

    degen: usize,
    stall: usize,
    bland: bool,
}

impl<'a, T> Simplex<'a, T>
where
    T: Scalar,
{
    /// Set up a run from the basis statuses `stat`.  Fails with
    /// `BadBasis` or `Singular` if the basis can't be used.
    pub fn new(lp: &'a LpData<T>, stat: Vec<VarStat>, ctrl: &SimplexControl) -> Result<Self, SimplexReturn> {
        let m = lp.m;
        if stat.len() != m + lp.n {
            return Err(SimplexReturn::BadBasis);
        }
        let head: Vec<usize> = (0..m + lp.n).filter(|&k| stat[k].is_basic()).collect();
        if head.len() != m {
            return Err(SimplexReturn::BadBasis);
        }
        let method = if T::EXACT {
            // rotations need square roots
            match FactorMethod::from(ctrl.bf_type) {
                FactorMethod::Givens => FactorMethod::LuPartial,
                other => other,
            }
        } else {
            ctrl.bf_type.into()
        };
        let factor = Self::factor_basis(lp, &head, method).map_err(|_| SimplexReturn::Singular)?;

        Ok(Self {
            lp,
            tol: Tolerances::new(ctrl),
            pricing: ctrl.pricing,
            it_lim: ctrl.it_lim.max(0) as usize,
            obj_lim: (ctrl.obj_ll, ctrl.obj_ul),
            method,
            stat,
            head,
            factor,
            x: vec![T::zero(); m + lp.n],
            iters: 0,
            degen: 0,
            stall: 0,
            bland: false,
        })
    }

    fn factor_basis(lp: &LpData<T>, head: &[usize], method: FactorMethod) -> Result<Factorization<T>, FactorError> {
        let eps = if T::EXACT { T::zero() } else { FACTOR_EPS.as_T() };
        let B = lp.basis_matrix(head);
        Factorization::new(&B, lp.m, method, REFACTOR_LIMIT, eps)
    }

    /// Run the variant selected by `meth`.
    pub fn solve(&mut self, meth: SimplexMethod, progress: &mut Progress) -> SimplexReturn {
        match meth {
            SimplexMethod::Primal => self.primal(progress),
            SimplexMethod::Dual => self.dual(progress),
        }
    }

    fn m(&self) -> usize {
        self.lp.m
    }

    fn nvars(&self) -> usize {
        self.lp.m + self.lp.n
    }

    /// Compute values of all variables for the current basis.
    fn compute_x(&mut self) {
        let lp = self.lp;
        let mut rhs = vec![T::zero(); lp.m];
        for k in 0..self.nvars() {
            if self.stat[k].is_basic() {
                continue;
            }
            let v = lp.nonbasic_value(k, self.stat[k]);
            if !v.is_zero() {
                if k < lp.m {
                    rhs[k] -= v.clone();
                } else {
                    for (i, a) in &lp.A[k - lp.m] {
                        rhs[*i] += a.clone() * v.clone();
                    }
                }
            }
            self.x[k] = v;
        }
        self.factor.ftran(&mut rhs);
        for (p, v) in rhs.into_iter().enumerate() {
            self.x[self.head[p]] = v;
        }
    }

    /// Reduced costs of all variables for costs `cost`, zero for basics.
    fn reduced_costs(&self, cost: &[T]) -> Vec<T> {
        let mut pi: Vec<T> = self.head.iter().map(|&k| cost[k].clone()).collect();
        self.factor.btran(&mut pi);
        (0..self.nvars())
            .map(|k| {
                if self.stat[k].is_basic() {
                    T::zero()
                } else {
                    cost[k].clone() - self.lp.col_dot(k, &pi)
                }
            })
            .collect()
    }

    /// `inv(B) a_k`
    fn ftran_col(&self, k: usize) -> Vec<T> {
        let mut a = self.lp.col_dense(k);
        self.factor.ftran(&mut a);
        a
    }

    /// Row `r` of the simplex tableau `inv(B) [I | -A]`, for all variables.
    pub fn tableau_row(&self, r: usize) -> Vec<T> {
        let mut rho = vec![T::zero(); self.m()];
        rho[r] = T::one();
        self.factor.btran(&mut rho);
        (0..self.nvars())
            .map(|k| {
                if self.stat[k].is_basic() {
                    T::zero()
                } else {
                    self.lp.col_dot(k, &rho)
                }
            })
            .collect()
    }

    // feasibility tolerance around a bound
    fn bnd_tol(&self, bound: &T) -> T {
        self.tol.bnd.clone() * (T::one() + bound.abs())
    }

    /// Primal infeasibility of variable `k`: amount and whether it lies
    /// below its lower bound.
    fn infeas(&self, k: usize) -> Option<(T, bool)> {
        let x = &self.x[k];
        if let Some(l) = &self.lp.lb[k] {
            if *x < l.clone() - self.bnd_tol(l) {
                return Some((l.clone() - x.clone(), true));
            }
        }
        if let Some(u) = &self.lp.ub[k] {
            if *x > u.clone() + self.bnd_tol(u) {
                return Some((x.clone() - u.clone(), false));
            }
        }
        None
    }

    fn sum_infeas(&self) -> T {
        self.head
            .iter()
            .filter_map(|&k| self.infeas(k))
            .fold(T::zero(), |acc, (v, _)| acc + v)
    }

    /// true if the reduced cost `dk` of nonbasic `k` has the right sign
    fn dual_feasible(&self, k: usize, dk: &T) -> bool {
        let tol = &self.tol.dj;
        match self.stat[k] {
            VarStat::Basic | VarStat::Fixed => true,
            VarStat::AtLower => *dk >= -tol.clone(),
            VarStat::AtUpper => *dk <= tol.clone(),
            VarStat::Free => dk.abs() <= *tol,
        }
    }

    /// Status a leaving variable takes when it reaches a bound.
    fn leaving_stat(&self, k: usize, to_upper: bool) -> VarStat {
        match (&self.lp.lb[k], &self.lp.ub[k]) {
            (Some(l), Some(u)) if l == u => VarStat::Fixed,
            (_, Some(_)) if to_upper => VarStat::AtUpper,
            (Some(_), _) => VarStat::AtLower,
            (None, Some(_)) => VarStat::AtUpper,
            (None, None) => VarStat::Free,
        }
    }

    /// Replace the basic variable at position `r` by `q`, with
    /// `alpha = inv(B) a_q`.
    fn pivot(&mut self, r: usize, q: usize, to_upper: bool, alpha: &[T]) -> Result<(), FactorError> {
        let k = self.head[r];
        self.stat[k] = self.leaving_stat(k, to_upper);
        self.stat[q] = VarStat::Basic;
        self.head[r] = q;

        let updated = !self.factor.needs_refactor() && self.factor.update(r, alpha).is_ok();
        if !updated {
            self.factor = Self::factor_basis(self.lp, &self.head, self.method)?;
        }
        tracing::trace!(leaving = k, entering = q, iter = self.iters, "simplex pivot");
        Ok(())
    }

    // Track degenerate steps.  Returns false once the method has stalled
    // for so long that it is not expected to make progress.
    fn record_step(&mut self, t: &T) -> bool {
        if t.is_zero() || (!T::EXACT && t.abs() <= self.tol.bnd) {
            self.degen += 1;
            self.stall += 1;
            if self.degen > DEGEN_SWITCH {
                self.bland = true;
            }
        } else {
            self.degen = 0;
            self.stall = 0;
            self.bland = false;
        }
        self.stall <= 50 * self.nvars() + 1000
    }

    fn limit_reached(&self, progress: &Progress) -> Option<SimplexReturn> {
        if self.iters >= self.it_lim {
            Some(SimplexReturn::IterationLimit)
        } else if progress.time_exceeded() {
            Some(SimplexReturn::TimeLimit)
        } else {
            None
        }
    }

    /// Assemble the outcome, with primal values and reduced costs for
    /// the final basis.
    pub fn finish(mut self, ret: SimplexReturn) -> Outcome<T> {
        self.compute_x();
        let d = self.reduced_costs(&self.lp.c);

        let prim_stat = match ret {
            SimplexReturn::NoPrimalFeasible => SolStat::NoFeasible,
            _ if self.head.iter().all(|&k| self.infeas(k).is_none()) => SolStat::Feasible,
            _ => SolStat::Infeasible,
        };
        let dual_stat = match ret {
            SimplexReturn::NoDualFeasible => SolStat::NoFeasible,
            _ if (0..self.nvars()).all(|k| self.dual_feasible(k, &d[k])) => SolStat::Feasible,
            _ => SolStat::Infeasible,
        };

        Outcome {
            ret,
            stat: self.stat,
            x: self.x,
            d,
            prim_stat,
            dual_stat,
            iters: self.iters,
        }
    }

    // norm used by steepest edge pricing: 1 + |inv(B) a_k|^2
    fn edge_weight(&self, k: usize) -> T {
        T::one() + self.ftran_col(k).sumsq()
    }
}

//! LP/MIP problem instances.
//!
//! A [`Problem`] owns its rows, columns, constraint matrix, basis, the
//! three solution slots (basic, interior point and integer), a cached
//! basis factorization, its print target and its [`ControlParams`].
//!
//! Every row `i` has an auxiliary variable `r_i = sum_j a_ij x_j`, which
//! carries the row bounds.  Rows and auxiliary variables are indexed
//! before columns wherever the two are combined: variable `k < m` is
//! auxiliary variable `k`, and variable `m + j` is column `j`.

#![allow(non_snake_case)]

mod basis;
mod bounds;
mod control;
mod error;
mod solution;

pub(crate) use basis::*;
pub use bounds::*;
pub use error::*;
pub use solution::*;

use crate::io::PrintTarget;
use crate::params::ControlParams;
use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ObjDir {
    #[default]
    Minimize,
    Maximize,
}

/// Kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VarKind {
    #[default]
    Continuous,
    Integer,
    /// integer with bounds 0..1
    Binary,
}

impl VarKind {
    pub fn is_integer(&self) -> bool {
        !matches!(self, VarKind::Continuous)
    }
}

/// Problem class, derived from the column kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemClass {
    Lp,
    Mip,
}

#[derive(Debug, Clone)]
pub(crate) struct Row {
    pub bounds: Bounds,
    pub stat: VarStat,
}

#[derive(Debug, Clone)]
pub(crate) struct Col {
    pub bounds: Bounds,
    pub kind: VarKind,
    pub obj: f64,
    pub stat: VarStat,
    // (row, value) pairs with nonzero values, unordered
    pub entries: Vec<(usize, f64)>,
}

/// A linear or mixed integer program together with its control
/// parameters and solutions.
///
/// New rows are free and basic.  New columns are continuous, fixed at
/// zero and nonbasic, so the standard basis is always valid.
#[derive(Debug)]
pub struct Problem {
    dir: ObjDir,
    obj_const: f64,
    pub(crate) rows: Vec<Row>,
    pub(crate) cols: Vec<Col>,

    pub(crate) basic: BasicSolution,
    pub(crate) interior: InteriorSolution,
    pub(crate) mip: MipSolution,
    pub(crate) last_continuous: Option<ContinuousKind>,

    pub(crate) factor: Option<BasisFactor>,
    pub(crate) params: ControlParams,
    pub(crate) out: PrintTarget,
}

impl Default for Problem {
    fn default() -> Self {
        Self::new()
    }
}

impl Problem {
    /// creates an empty minimization problem with default parameters
    pub fn new() -> Self {
        Self {
            dir: ObjDir::Minimize,
            obj_const: 0.0,
            rows: Vec::new(),
            cols: Vec::new(),
            basic: BasicSolution::default(),
            interior: InteriorSolution::default(),
            mip: MipSolution::default(),
            last_continuous: None,
            factor: None,
            params: ControlParams::new(),
            out: PrintTarget::default(),
        }
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_cols(&self) -> usize {
        self.cols.len()
    }

    /// number of integer (including binary) columns
    pub fn num_int(&self) -> usize {
        self.cols.iter().filter(|c| c.kind.is_integer()).count()
    }

    /// number of nonzero constraint coefficients
    pub fn num_nz(&self) -> usize {
        self.cols.iter().map(|c| c.entries.len()).sum()
    }

    /// [`ProblemClass::Mip`] if any column is integer
    pub fn class(&self) -> ProblemClass {
        if self.cols.iter().any(|c| c.kind.is_integer()) {
            ProblemClass::Mip
        } else {
            ProblemClass::Lp
        }
    }

    pub fn obj_dir(&self) -> ObjDir {
        self.dir
    }

    pub fn set_obj_dir(&mut self, dir: ObjDir) {
        self.dir = dir;
    }

    pub fn obj_const(&self) -> f64 {
        self.obj_const
    }

    pub fn set_obj_const(&mut self, c0: f64) {
        self.obj_const = c0;
    }

    /// Append `count` free basic rows.  Returns the index of the first.
    pub fn add_rows(&mut self, count: usize) -> usize {
        let first = self.rows.len();
        self.rows.extend((0..count).map(|_| Row {
            bounds: Bounds::Free,
            stat: VarStat::Basic,
        }));
        self.structure_changed();
        first
    }

    /// Append `count` columns fixed at zero.  Returns the index of the
    /// first.
    pub fn add_cols(&mut self, count: usize) -> usize {
        let first = self.cols.len();
        self.cols.extend((0..count).map(|_| Col {
            bounds: Bounds::Fixed(0.0),
            kind: VarKind::Continuous,
            obj: 0.0,
            stat: VarStat::Fixed,
            entries: Vec::new(),
        }));
        self.structure_changed();
        first
    }

    pub fn row_bnds(&self, i: usize) -> Bounds {
        self.rows[i].bounds
    }

    pub fn col_bnds(&self, j: usize) -> Bounds {
        self.cols[j].bounds
    }

    /// Set the bounds of row `i`.  A nonbasic auxiliary variable is
    /// moved to a status consistent with the new bounds.
    pub fn set_row_bnds(&mut self, i: usize, bounds: Bounds) -> Result<(), ProblemError> {
        check_bounds(&bounds)?;
        let row = self.rows.get_mut(i).ok_or(ProblemError::BadRow(i))?;
        row.bounds = bounds;
        if !row.stat.is_basic() {
            row.stat = nonbasic_stat(&bounds, row.stat);
        }
        Ok(())
    }

    /// Set the bounds of column `j`.  A nonbasic column is moved to a
    /// status consistent with the new bounds.
    pub fn set_col_bnds(&mut self, j: usize, bounds: Bounds) -> Result<(), ProblemError> {
        check_bounds(&bounds)?;
        let col = self.cols.get_mut(j).ok_or(ProblemError::BadCol(j))?;
        col.bounds = bounds;
        if !col.stat.is_basic() {
            col.stat = nonbasic_stat(&bounds, col.stat);
        }
        Ok(())
    }

    pub fn col_kind(&self, j: usize) -> VarKind {
        self.cols[j].kind
    }

    /// Set the kind of column `j`.  [`VarKind::Binary`] also sets the
    /// column bounds to `0..1`.
    pub fn set_col_kind(&mut self, j: usize, kind: VarKind) -> Result<(), ProblemError> {
        if j >= self.cols.len() {
            return Err(ProblemError::BadCol(j));
        }
        if kind == VarKind::Binary {
            self.set_col_bnds(j, Bounds::Double(0.0, 1.0))?;
        }
        self.cols[j].kind = kind;
        Ok(())
    }

    pub fn obj_coef(&self, j: usize) -> f64 {
        self.cols[j].obj
    }

    pub fn set_obj_coef(&mut self, j: usize, c: f64) -> Result<(), ProblemError> {
        if !c.is_finite() {
            return Err(ProblemError::BadValue(c));
        }
        self.cols.get_mut(j).ok_or(ProblemError::BadCol(j))?.obj = c;
        Ok(())
    }

    /// the nonzero coefficients of column `j` as (row, value) pairs
    pub fn mat_col(&self, j: usize) -> &[(usize, f64)] {
        &self.cols[j].entries
    }

    /// the nonzero coefficients of row `i` as (column, value) pairs
    pub fn mat_row(&self, i: usize) -> Vec<(usize, f64)> {
        self.cols
            .iter()
            .enumerate()
            .filter_map(|(j, c)| {
                c.entries
                    .iter()
                    .find(|(r, _)| *r == i)
                    .map(|&(_, v)| (j, v))
            })
            .collect()
    }

    /// Replace column `j` of the constraint matrix.  Zero values are
    /// dropped.
    pub fn set_mat_col(&mut self, j: usize, entries: &[(usize, f64)]) -> Result<(), ProblemError> {
        if j >= self.cols.len() {
            return Err(ProblemError::BadCol(j));
        }
        check_sparse(entries, self.rows.len(), ProblemError::BadRow)?;
        self.cols[j].entries = entries.iter().copied().filter(|e| e.1 != 0.0).collect();
        self.factor = None;
        Ok(())
    }

    /// Replace row `i` of the constraint matrix.  Zero values are
    /// dropped.
    pub fn set_mat_row(&mut self, i: usize, entries: &[(usize, f64)]) -> Result<(), ProblemError> {
        if i >= self.rows.len() {
            return Err(ProblemError::BadRow(i));
        }
        check_sparse(entries, self.cols.len(), ProblemError::BadCol)?;
        for col in self.cols.iter_mut() {
            col.entries.retain(|(r, _)| *r != i);
        }
        for &(j, v) in entries.iter().filter(|e| e.1 != 0.0) {
            self.cols[j].entries.push((i, v));
        }
        self.factor = None;
        Ok(())
    }

    // dimensions changed: solutions and factorization are stale
    fn structure_changed(&mut self) {
        let (m, n) = (self.rows.len(), self.cols.len());
        self.basic.resize(m, n);
        self.interior.resize(m, n);
        self.mip.resize(m, n);
        self.last_continuous = None;
        self.factor = None;
    }

    // -----------------------------------------
    // solution queries
    // -----------------------------------------

    /// status of the basic solution
    pub fn status(&self) -> SolutionStatus {
        self.basic.status()
    }
    pub fn prim_stat(&self) -> SolStat {
        self.basic.prim_stat
    }
    pub fn dual_stat(&self) -> SolStat {
        self.basic.dual_stat
    }
    pub fn obj_val(&self) -> f64 {
        self.basic.obj
    }
    pub fn row_prim(&self, i: usize) -> f64 {
        self.basic.row_prim[i]
    }
    pub fn row_dual(&self, i: usize) -> f64 {
        self.basic.row_dual[i]
    }
    pub fn col_prim(&self, j: usize) -> f64 {
        self.basic.col_prim[j]
    }
    pub fn col_dual(&self, j: usize) -> f64 {
        self.basic.col_dual[j]
    }

    /// status of the interior point solution
    pub fn ipt_status(&self) -> SolutionStatus {
        self.interior.status
    }
    pub fn ipt_obj_val(&self) -> f64 {
        self.interior.obj
    }
    pub fn ipt_row_prim(&self, i: usize) -> f64 {
        self.interior.row_prim[i]
    }
    pub fn ipt_row_dual(&self, i: usize) -> f64 {
        self.interior.row_dual[i]
    }
    pub fn ipt_col_prim(&self, j: usize) -> f64 {
        self.interior.col_prim[j]
    }
    pub fn ipt_col_dual(&self, j: usize) -> f64 {
        self.interior.col_dual[j]
    }

    /// status of the integer solution
    pub fn mip_status(&self) -> SolutionStatus {
        self.mip.status
    }
    pub fn mip_obj_val(&self) -> f64 {
        self.mip.obj
    }
    pub fn mip_row_val(&self, i: usize) -> f64 {
        self.mip.row_val[i]
    }
    pub fn mip_col_val(&self, j: usize) -> f64 {
        self.mip.col_val[j]
    }

    /// objective value of the column values `x`, in the problem's sense
    pub(crate) fn eval_obj(&self, x: &[f64]) -> f64 {
        self.obj_const + self.cols.iter().zip(x).map(|(c, x)| c.obj * x).sum::<f64>()
    }

    /// row activities `A x`
    pub(crate) fn eval_rows(&self, x: &[f64]) -> Vec<f64> {
        let mut r = vec![0.0; self.rows.len()];
        for (col, xj) in self.cols.iter().zip(x) {
            for &(i, v) in &col.entries {
                r[i] += v * xj;
            }
        }
        r
    }
}

fn check_bounds(bounds: &Bounds) -> Result<(), ProblemError> {
    let finite = |v: f64| {
        if !v.is_finite() {
            Err(ProblemError::BadValue(v))
        } else {
            Ok(())
        }
    };
    if let Some(l) = bounds.lower() {
        finite(l)?;
    }
    if let Some(u) = bounds.upper() {
        finite(u)?;
    }
    Ok(())
}

fn check_sparse(
    entries: &[(usize, f64)],
    len: usize,
    bad: fn(usize) -> ProblemError,
) -> Result<(), ProblemError> {
    let mut seen = HashSet::new();
    for &(k, v) in entries {
        if k >= len {
            return Err(bad(k));
        }
        if !v.is_finite() {
            return Err(ProblemError::BadValue(v));
        }
        if !seen.insert(k) {
            return Err(ProblemError::DuplicateIndex(k));
        }
    }
    Ok(())
}

#[test]
fn test_problem_building() {
    let mut P = Problem::new();
    assert_eq!(P.add_rows(2), 0);
    assert_eq!(P.add_cols(3), 0);
    assert_eq!(P.class(), ProblemClass::Lp);

    P.set_mat_row(0, &[(0, 1.), (2, 2.)]).unwrap();
    P.set_mat_col(1, &[(1, -1.), (0, 0.)]).unwrap();
    assert_eq!(P.mat_row(0), vec![(0, 1.), (2, 2.)]);
    assert_eq!(P.mat_col(1), &[(1, -1.)]);
    assert_eq!(P.num_nz(), 3);

    assert_eq!(
        P.set_mat_row(0, &[(0, 1.), (0, 2.)]),
        Err(ProblemError::DuplicateIndex(0))
    );
    assert_eq!(P.set_mat_row(5, &[]), Err(ProblemError::BadRow(5)));
    assert_eq!(P.set_mat_col(0, &[(2, 1.)]), Err(ProblemError::BadRow(2)));

    P.set_col_kind(2, VarKind::Binary).unwrap();
    assert_eq!(P.col_bnds(2), Bounds::Double(0., 1.));
    assert_eq!(P.cols[2].stat, VarStat::AtLower);
    assert_eq!(P.class(), ProblemClass::Mip);
    assert_eq!(P.num_int(), 1);

    assert_eq!(P.eval_rows(&[1., 2., 3.]), vec![7., -2.]);
}

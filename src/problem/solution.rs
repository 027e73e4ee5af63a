#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Feasibility status of the primal or dual part of a basic solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SolStat {
    #[default]
    Undefined,
    Feasible,
    Infeasible,
    /// no feasible solution exists
    NoFeasible,
}

/// Overall status of a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SolutionStatus {
    #[default]
    Undefined,
    Optimal,
    Feasible,
    Infeasible,
    /// the problem has no feasible solution
    NoFeasible,
    /// the objective is unbounded
    Unbounded,
}

/// Status of a variable in a simplex basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VarStat {
    Basic,
    /// nonbasic at its lower bound
    AtLower,
    /// nonbasic at its upper bound
    AtUpper,
    /// nonbasic free variable, at zero
    Free,
    /// nonbasic fixed variable
    Fixed,
}

impl VarStat {
    pub fn is_basic(&self) -> bool {
        matches!(self, VarStat::Basic)
    }
}

/// Which continuous solution was produced most recently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContinuousKind {
    Basic,
    Interior,
}

/// Basic solution produced by the simplex family.
#[derive(Debug, Clone, Default)]
pub(crate) struct BasicSolution {
    pub prim_stat: SolStat,
    pub dual_stat: SolStat,
    pub obj: f64,
    pub row_prim: Vec<f64>,
    pub row_dual: Vec<f64>,
    pub col_prim: Vec<f64>,
    pub col_dual: Vec<f64>,
}

impl BasicSolution {
    pub(crate) fn status(&self) -> SolutionStatus {
        use SolStat::*;
        match (self.prim_stat, self.dual_stat) {
            (Feasible, Feasible) => SolutionStatus::Optimal,
            (Feasible, NoFeasible) => SolutionStatus::Unbounded,
            (Feasible, _) => SolutionStatus::Feasible,
            (NoFeasible, _) => SolutionStatus::NoFeasible,
            (Infeasible, _) => SolutionStatus::Infeasible,
            (Undefined, _) => SolutionStatus::Undefined,
        }
    }
}

/// Interior point solution.
#[derive(Debug, Clone, Default)]
pub(crate) struct InteriorSolution {
    pub status: SolutionStatus,
    pub obj: f64,
    pub row_prim: Vec<f64>,
    pub row_dual: Vec<f64>,
    pub col_prim: Vec<f64>,
    pub col_dual: Vec<f64>,
}

/// Integer solution produced by branch-and-bound.
#[derive(Debug, Clone, Default)]
pub(crate) struct MipSolution {
    pub status: SolutionStatus,
    pub obj: f64,
    pub row_val: Vec<f64>,
    pub col_val: Vec<f64>,
}

impl BasicSolution {
    pub(crate) fn resize(&mut self, m: usize, n: usize) {
        *self = BasicSolution {
            row_prim: vec![0.0; m],
            row_dual: vec![0.0; m],
            col_prim: vec![0.0; n],
            col_dual: vec![0.0; n],
            ..Default::default()
        };
    }
}

impl InteriorSolution {
    pub(crate) fn resize(&mut self, m: usize, n: usize) {
        *self = InteriorSolution {
            row_prim: vec![0.0; m],
            row_dual: vec![0.0; m],
            col_prim: vec![0.0; n],
            col_dual: vec![0.0; n],
            ..Default::default()
        };
    }
}

impl MipSolution {
    pub(crate) fn resize(&mut self, m: usize, n: usize) {
        *self = MipSolution {
            row_val: vec![0.0; m],
            col_val: vec![0.0; n],
            ..Default::default()
        };
    }
}

#[test]
fn test_basic_status() {
    let mut s = BasicSolution::default();
    assert_eq!(s.status(), SolutionStatus::Undefined);
    s.prim_stat = SolStat::Feasible;
    s.dual_stat = SolStat::Feasible;
    assert_eq!(s.status(), SolutionStatus::Optimal);
    s.dual_stat = SolStat::NoFeasible;
    assert_eq!(s.status(), SolutionStatus::Unbounded);
    s.prim_stat = SolStat::NoFeasible;
    assert_eq!(s.status(), SolutionStatus::NoFeasible);
}

//! Interior point backend.
//!
//! The LP is handed to the `clarabel` conic solver in the form
//!
//! ```text
//! min c'x  s.t.  Gx + s = h,  s in {0}^p x R+^q
//! ```
//!
//! Equality rows (fixed rows and fixed columns) form the zero cone and
//! every finite inequality bound one row of the nonnegative cone.

#![allow(non_snake_case)]

use super::control::{InteriorControl, InteriorReturn};
use super::progress::Progress;
use crate::problem::{Bounds, ContinuousKind, ObjDir, Problem, SolutionStatus};
use clarabel::algebra::CscMatrix;
use clarabel::solver::{DefaultSettingsBuilder, DefaultSolver, IPSolver, SolverStatus, SupportedConeT};

// `DefaultSolver::new` returns the solver itself in some clarabel
// releases and a `Result` in others
trait IntoSolver {
    fn into_solver(self) -> Result<DefaultSolver<f64>, String>;
}

impl IntoSolver for DefaultSolver<f64> {
    fn into_solver(self) -> Result<DefaultSolver<f64>, String> {
        Ok(self)
    }
}

impl<E: std::fmt::Display> IntoSolver for Result<DefaultSolver<f64>, E> {
    fn into_solver(self) -> Result<DefaultSolver<f64>, String> {
        self.map_err(|e| e.to_string())
    }
}

// which bound of which variable a conic row represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Fix,
    Lower,
    Upper,
}

#[derive(Debug, Clone, Copy)]
struct ConicRow {
    // index among the m+n auxiliary and structural variables
    var: usize,
    side: Side,
    rhs: f64,
}

/// Conic form of an LP.
struct ConicLp {
    m: usize,
    n: usize,
    rows: Vec<ConicRow>,
    num_zero: usize,
    G: CscMatrix<f64>,
    c: Vec<f64>,
}

impl ConicLp {
    fn new(P: &Problem) -> Self {
        let (m, n) = (P.num_rows(), P.num_cols());
        let bounds = P.rows.iter().map(|r| r.bounds).chain(P.cols.iter().map(|c| c.bounds));

        let mut fixed = Vec::new();
        let mut ineq = Vec::new();
        for (var, b) in bounds.enumerate() {
            match b {
                Bounds::Fixed(v) => fixed.push(ConicRow { var, side: Side::Fix, rhs: v }),
                _ => {
                    // l <= v  is  -v + s = -l
                    if let Some(l) = b.lower() {
                        ineq.push(ConicRow { var, side: Side::Lower, rhs: -l });
                    }
                    if let Some(u) = b.upper() {
                        ineq.push(ConicRow { var, side: Side::Upper, rhs: u });
                    }
                }
            }
        }
        let num_zero = fixed.len();
        let rows: Vec<ConicRow> = fixed.into_iter().chain(ineq).collect();

        // columns of G: a row of the problem contributes a_ij, a column
        // bound contributes 1
        let mut cols: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
        for (k, row) in rows.iter().enumerate() {
            let sign = if row.side == Side::Lower { -1.0 } else { 1.0 };
            if row.var < m {
                for (j, a) in P.mat_row(row.var) {
                    cols[j].push((k, sign * a));
                }
            } else {
                cols[row.var - m].push((k, sign));
            }
        }

        let mut colptr = Vec::with_capacity(n + 1);
        let mut rowval = Vec::new();
        let mut nzval = Vec::new();
        colptr.push(0);
        for mut col in cols {
            col.sort_by_key(|e| e.0);
            for (k, v) in col {
                rowval.push(k);
                nzval.push(v);
            }
            colptr.push(rowval.len());
        }
        let G = CscMatrix::new(rows.len(), n, colptr, rowval, nzval);

        let sense = match P.obj_dir() {
            ObjDir::Minimize => 1.0,
            ObjDir::Maximize => -1.0,
        };
        let c = P.cols.iter().map(|col| sense * col.obj).collect();

        Self {
            m,
            n,
            rows,
            num_zero,
            G,
            c,
        }
    }

    fn cones(&self) -> Vec<SupportedConeT<f64>> {
        let num_ineq = self.rows.len() - self.num_zero;
        let mut cones = Vec::new();
        if self.num_zero > 0 {
            cones.push(SupportedConeT::ZeroConeT(self.num_zero));
        }
        if num_ineq > 0 {
            cones.push(SupportedConeT::NonnegativeConeT(num_ineq));
        }
        cones
    }

    /// Reduced costs of all m+n variables from the conic duals `z`, in
    /// minimization sense.
    fn reduced_costs(&self, z: &[f64]) -> Vec<f64> {
        let mut d = vec![0.0; self.m + self.n];
        for (row, zk) in self.rows.iter().zip(z) {
            d[row.var] += match row.side {
                Side::Fix => -zk,
                Side::Lower => *zk,
                Side::Upper => -zk,
            };
        }
        d
    }
}

fn map_status(status: SolverStatus) -> (InteriorReturn, SolutionStatus) {
    match status {
        SolverStatus::Solved | SolverStatus::AlmostSolved => (InteriorReturn::Ok, SolutionStatus::Optimal),
        SolverStatus::PrimalInfeasible
        | SolverStatus::DualInfeasible
        | SolverStatus::AlmostPrimalInfeasible
        | SolverStatus::AlmostDualInfeasible => (InteriorReturn::NoFeasible, SolutionStatus::NoFeasible),
        SolverStatus::MaxIterations => (InteriorReturn::IterationLimit, SolutionStatus::Undefined),
        SolverStatus::NumericalError => (InteriorReturn::Instability, SolutionStatus::Undefined),
        SolverStatus::InsufficientProgress => (InteriorReturn::NoConvergence, SolutionStatus::Undefined),
        _ => (InteriorReturn::Fail, SolutionStatus::Undefined),
    }
}

// outcome of the conic solve: return code, solution status, x, z
type ConicResult = (InteriorReturn, SolutionStatus, Vec<f64>, Vec<f64>);

// Without variables or without constraints there is nothing to iterate on.
fn solve_trivial(lp: &ConicLp) -> ConicResult {
    let feasible = lp.rows.iter().all(|r| match r.side {
        Side::Fix => r.rhs == 0.0,
        Side::Lower | Side::Upper => r.rhs >= 0.0,
    });
    let bounded = lp.n == 0 || lp.c.iter().all(|&c| c == 0.0);
    let (ret, status) = if feasible && bounded {
        (InteriorReturn::Ok, SolutionStatus::Optimal)
    } else {
        (InteriorReturn::NoFeasible, SolutionStatus::NoFeasible)
    };
    (ret, status, vec![0.0; lp.n], vec![0.0; lp.rows.len()])
}

fn solve_conic(lp: &ConicLp, ctrl: &InteriorControl, progress: &mut Progress) -> Result<ConicResult, InteriorReturn> {
    if lp.n == 0 || lp.rows.is_empty() {
        return Ok(solve_trivial(lp));
    }
    let settings = DefaultSettingsBuilder::default()
        .max_iter(ctrl.max_iter)
        .verbose(false)
        .build()
        .map_err(|e| {
            progress.error(format_args!("interior: bad solver settings: {}", e));
            InteriorReturn::Fail
        })?;

    let Pm = CscMatrix::zeros((lp.n, lp.n));
    let h: Vec<f64> = lp.rows.iter().map(|r| r.rhs).collect();
    let mut solver = DefaultSolver::new(&Pm, &lp.c, &lp.G, &h, &lp.cones(), settings)
        .into_solver()
        .map_err(|e| {
            progress.error(format_args!("interior: problem data rejected: {}", e));
            InteriorReturn::Fail
        })?;
    solver.solve();

    let sol = &solver.solution;
    progress.info(format_args!(
        "{} iterations, primal residual {:.3e}, dual residual {:.3e}",
        sol.iterations, sol.r_prim, sol.r_dual
    ));
    let (ret, status) = map_status(sol.status);
    Ok((ret, status, sol.x.clone(), sol.z.clone()))
}

/// Solve `P` with the interior point method and store the interior
/// solution.
pub(crate) fn interior(P: &mut Problem, ctrl: &InteriorControl) -> InteriorReturn {
    let lp = ConicLp::new(P);

    let (ret, status, x, z) = {
        let mut progress = Progress::new(&mut P.out, ctrl.msg_lev, 1, 0, i32::MAX);
        progress.info(format_args!(
            "Interior point method: {} rows, {} columns, {} conic constraints",
            lp.m,
            lp.n,
            lp.rows.len()
        ));
        let res = match solve_conic(&lp, ctrl, &mut progress) {
            Ok(res) => res,
            Err(ret) => return ret,
        };
        match res.1 {
            SolutionStatus::Optimal => progress.info(format_args!("OPTIMAL SOLUTION FOUND")),
            SolutionStatus::NoFeasible => {
                progress.info(format_args!("PROBLEM HAS NO FEASIBLE PRIMAL/DUAL SOLUTION"))
            }
            _ => progress.error(format_args!("interior point method stopped: {:?}", res.0)),
        }
        res
    };

    P.interior.resize(lp.m, lp.n);
    P.last_continuous = Some(ContinuousKind::Interior);
    P.interior.status = status;
    tracing::debug!(ret = ?ret, status = ?status, "interior point run finished");
    if status != SolutionStatus::Optimal {
        return ret;
    }

    let sign = match P.obj_dir() {
        ObjDir::Minimize => 1.0,
        ObjDir::Maximize => -1.0,
    };
    let d: Vec<f64> = lp.reduced_costs(&z).into_iter().map(|v| sign * v).collect();
    let row_prim = P.eval_rows(&x);
    let obj = P.eval_obj(&x);

    let sol = &mut P.interior;
    sol.obj = obj;
    sol.row_prim = row_prim;
    sol.col_prim = x;
    sol.row_dual = d[..lp.m].to_vec();
    sol.col_dual = d[lp.m..].to_vec();
    ret
}

#[test]
fn test_interior_lp() {
    use crate::io::ConfigurablePrintTarget;

    // maximize 3x + 2y  s.t.  x + y <= 4,  x + 3y <= 8,  0 <= x <= 3,  y >= 0
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

    assert_eq!(interior(&mut P, &InteriorControl::default()), InteriorReturn::Ok);
    assert_eq!(P.ipt_status(), SolutionStatus::Optimal);
    assert!((P.ipt_obj_val() - 11.).abs() < 1e-6);
    assert!((P.ipt_col_prim(0) - 3.).abs() < 1e-6);
    assert!((P.ipt_row_prim(0) - 4.).abs() < 1e-6);
    assert!((P.ipt_row_dual(0) - 2.).abs() < 1e-5);
    assert!((P.ipt_col_dual(0) - 1.).abs() < 1e-5);
    assert!(P.ipt_row_dual(1).abs() < 1e-5);

    // x >= 2 contradicts x + y <= 1
    let mut P = Problem::new();
    P.print_to_sink();
    P.add_rows(1);
    P.add_cols(2);
    P.set_row_bnds(0, Bounds::Upper(1.)).unwrap();
    P.set_col_bnds(0, Bounds::Lower(2.)).unwrap();
    P.set_col_bnds(1, Bounds::Lower(0.)).unwrap();
    P.set_mat_row(0, &[(0, 1.), (1, 1.)]).unwrap();
    assert_eq!(interior(&mut P, &InteriorControl::default()), InteriorReturn::NoFeasible);
    assert_eq!(P.ipt_status(), SolutionStatus::NoFeasible);
}

#[test]
fn test_interior_trivial() {
    let mut P = Problem::new();
    P.add_cols(1);
    P.set_col_bnds(0, Bounds::Free).unwrap();
    P.set_obj_coef(0, 1.).unwrap();
    let lp = ConicLp::new(&P);
    assert_eq!(solve_trivial(&lp).0, InteriorReturn::NoFeasible);

    P.set_obj_coef(0, 0.).unwrap();
    let lp = ConicLp::new(&P);
    assert_eq!(solve_trivial(&lp).1, SolutionStatus::Optimal);
}

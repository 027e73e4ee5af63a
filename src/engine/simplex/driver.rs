#![allow(non_snake_case)]
use super::*;
use crate::engine::presolve::presolve;
use crate::engine::scaling::Scaling;
use crate::engine::lp::problem_stat;
use crate::params::ScaleMode;
use crate::problem::{ContinuousKind, ObjDir, Problem};
use num_rational::BigRational;

/// Run the simplex method on `lp` from the basis `stat`.  Fails only if
/// the starting basis can't be used.
pub(crate) fn solve_lp<T: Scalar>(
    lp: &LpData<T>,
    stat: Vec<VarStat>,
    ctrl: &SimplexControl,
    progress: &mut Progress,
) -> Result<Outcome<T>, SimplexReturn> {
    let mut spx = Simplex::new(lp, stat, ctrl)?;
    let ret = spx.solve(ctrl.meth, progress);
    Ok(spx.finish(ret))
}

fn solve_scaled(
    lp: &LpData<f64>,
    stat: Vec<VarStat>,
    ctrl: &SimplexControl,
    progress: &mut Progress,
) -> Result<Outcome<f64>, SimplexReturn> {
    if ctrl.scaling == ScaleMode::None {
        return solve_lp(lp, stat, ctrl, progress);
    }
    let sc = Scaling::new(lp, ctrl.scaling);
    let mut out = solve_lp(&sc.apply(lp), stat, ctrl, progress)?;
    sc.unscale(&mut out);
    Ok(out)
}

// Solve the presolved LP, then recover a basis of the original LP and
// finish from there.
fn solve_presolved(
    lp: &LpData<f64>,
    ctrl: &SimplexControl,
    progress: &mut Progress,
) -> Result<Outcome<f64>, SimplexReturn> {
    let pre = match presolve(lp, ctrl.tol_bnd) {
        Ok(pre) => pre,
        Err(ret) => {
            progress.info(format_args!("PROBLEM HAS NO {} FEASIBLE SOLUTION", match ret {
                SimplexReturn::NoDualFeasible => "DUAL",
                _ => "PRIMAL",
            }));
            return Err(ret);
        }
    };
    progress.info(format_args!(
        "Presolve removed {} rows and {} columns",
        pre.removed_rows(),
        pre.removed_cols()
    ));

    let red = solve_scaled(&pre.lp, pre.lp.std_stat(), ctrl, progress)?;
    let stat = pre.recover_basis(lp, &red.stat);

    let mut out = if red.ret == SimplexReturn::Ok {
        match solve_scaled(lp, stat, ctrl, progress) {
            Err(SimplexReturn::Singular | SimplexReturn::BadBasis) => {
                tracing::warn!("recovered basis rejected, restarting from the standard basis");
                solve_scaled(lp, lp.std_stat(), ctrl, progress)?
            }
            res => res?,
        }
    } else {
        Simplex::new(lp, stat, ctrl)?.finish(red.ret)
    };
    out.iters += red.iters;
    Ok(out)
}

/// Solve `P` with the floating point simplex method and store the basic
/// solution.
pub(crate) fn simplex(P: &mut Problem, ctrl: &SimplexControl) -> SimplexReturn {
    let lp = LpData::<f64>::from_problem(P);
    let stat = problem_stat(P);

    let result = {
        let mut progress = Progress::new(&mut P.out, ctrl.msg_lev, ctrl.out_frq, ctrl.out_dly, ctrl.tm_lim);
        if lp.has_empty_bounds() {
            progress.error(format_args!("simplex: some double bounded variable has incorrect bounds"));
            return SimplexReturn::Bound;
        }
        if ctrl.presolve {
            solve_presolved(&lp, ctrl, &mut progress)
        } else {
            solve_scaled(&lp, stat, ctrl, &mut progress)
        }
    };
    store_result(P, &lp, result)
}

/// Solve `P` with the primal simplex method in exact rational
/// arithmetic and store the basic solution.
pub(crate) fn exact(P: &mut Problem, ctrl: &SimplexControl) -> SimplexReturn {
    let lp = LpData::<BigRational>::from_problem(P);
    let stat = problem_stat(P);

    let result = {
        let mut progress = Progress::new(&mut P.out, ctrl.msg_lev, ctrl.out_frq, ctrl.out_dly, ctrl.tm_lim);
        if lp.has_empty_bounds() {
            progress.error(format_args!("exact: some double bounded variable has incorrect bounds"));
            return SimplexReturn::Bound;
        }
        progress.info(format_args!("Solving LP in exact arithmetic"));
        let mut ctrl = ctrl.clone();
        ctrl.meth = SimplexMethod::Primal;
        solve_lp(&lp, stat, &ctrl, &mut progress)
    };
    store_result(P, &lp, result)
}

fn store_result<T: Scalar>(P: &mut Problem, lp: &LpData<T>, result: Result<Outcome<T>, SimplexReturn>) -> SimplexReturn {
    let out = match result {
        Ok(out) => out,
        Err(ret) => {
            // presolve may settle the problem without any basis
            let (prim, dual) = match ret {
                SimplexReturn::NoPrimalFeasible => (SolStat::NoFeasible, SolStat::Undefined),
                SimplexReturn::NoDualFeasible => (SolStat::Undefined, SolStat::NoFeasible),
                _ => return ret,
            };
            P.basic.resize(lp.m, lp.n);
            P.basic.prim_stat = prim;
            P.basic.dual_stat = dual;
            P.last_continuous = Some(ContinuousKind::Basic);
            return ret;
        }
    };

    let m = lp.m;
    let sign = match lp.dir {
        ObjDir::Minimize => 1.0,
        ObjDir::Maximize => -1.0,
    };
    let x: Vec<f64> = out.x.iter().map(Scalar::to_f64).collect();
    let d: Vec<f64> = out.d.iter().map(|v| sign * Scalar::to_f64(v)).collect();

    let sol = &mut P.basic;
    sol.prim_stat = out.prim_stat;
    sol.dual_stat = out.dual_stat;
    sol.obj = Scalar::to_f64(&lp.obj_value(&out.x));
    sol.row_prim = x[..m].to_vec();
    sol.col_prim = x[m..].to_vec();
    sol.row_dual = d[..m].to_vec();
    sol.col_dual = d[m..].to_vec();

    for (row, s) in P.rows.iter_mut().zip(&out.stat[..m]) {
        row.stat = *s;
    }
    for (col, s) in P.cols.iter_mut().zip(&out.stat[m..]) {
        col.stat = *s;
    }
    P.factor = None;
    P.last_continuous = Some(ContinuousKind::Basic);
    P.params.add_iterations(out.iters);

    tracing::debug!(iters = out.iters, ret = ?out.ret, obj = P.basic.obj, "simplex run finished");
    out.ret
}

#[cfg(test)]
fn small_lp() -> Problem {
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
    P
}

#[cfg(test)]
use crate::io::ConfigurablePrintTarget;

#[test]
fn test_simplex_variants() {
    use crate::engine::control::SimplexControlBuilder;
    use crate::params::Pricing;
    use crate::problem::SolutionStatus;

    for meth in [SimplexMethod::Primal, SimplexMethod::Dual] {
        for pricing in [Pricing::Textbook, Pricing::SteepestEdge] {
            for presolve in [false, true] {
                let mut P = small_lp();
                let ctrl = SimplexControlBuilder::default()
                    .meth(meth)
                    .pricing(pricing)
                    .presolve(presolve)
                    .build()
                    .unwrap();
                assert_eq!(simplex(&mut P, &ctrl), SimplexReturn::Ok);
                assert_eq!(P.status(), SolutionStatus::Optimal);
                assert!((P.obj_val() - 11.).abs() < 1e-9);
                assert!((P.col_prim(0) - 3.).abs() < 1e-9);
                assert!((P.col_prim(1) - 1.).abs() < 1e-9);
                // row 0 is tight with dual 2, the bound on x has dual 1
                assert!((P.row_dual(0) - 2.).abs() < 1e-9);
                assert!(P.row_dual(1).abs() < 1e-9);
                assert!((P.col_dual(0) - 1.).abs() < 1e-9);
            }
        }
    }
}

#[test]
fn test_exact_simplex() {
    use crate::problem::SolutionStatus;

    let mut P = small_lp();
    let ret = exact(&mut P, &SimplexControl::default());
    assert_eq!(ret, SimplexReturn::Ok);
    assert_eq!(P.status(), SolutionStatus::Optimal);
    assert_eq!(P.obj_val(), 11.);
    assert_eq!(P.col_prim(1), 1.);
    assert!(P.params.it_cnt() > 0);
}

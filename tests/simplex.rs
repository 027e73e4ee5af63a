#![allow(non_snake_case)]

use lpcontrol::io::ConfigurablePrintTarget;
use lpcontrol::params::*;
use lpcontrol::problem::*;
use lpcontrol::solver::Status;

// maximize 3x + 2y
// s.t.  x +  y <= 4
//       x + 3y <= 8
//       0 <= x <= 3, y >= 0
fn small_lp() -> Problem {
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

// one row and one column with 0 <= x <= 1, the row bounds given
fn single(row: Bounds) -> Problem {
    let mut P = Problem::new();
    P.print_to_sink();
    P.add_rows(1);
    P.add_cols(1);
    P.set_col_bnds(0, Bounds::Double(0., 1.)).unwrap();
    P.set_row_bnds(0, row).unwrap();
    P.set_mat_row(0, &[(0, 1.)]).unwrap();
    P.set_obj_coef(0, 1.).unwrap();
    P
}

#[test]
fn test_trivially_feasible() {
    let mut P = single(Bounds::Upper(1.));
    assert_eq!(P.simplex(), Status::Ok);
    assert_eq!(P.status(), SolutionStatus::Optimal);
    let x = P.col_prim(0);
    assert!((-1e-9..=1. + 1e-9).contains(&x));
}

#[test]
fn test_infeasible_never_ok() {
    for presolve in [0, 1] {
        for method in [SimplexMethod::Primal, SimplexMethod::Dual] {
            let mut P = single(Bounds::Lower(2.));
            P.set_int_param(ParamKey::Presol, presolve).unwrap();
            P.set_param(ParamKey::Dual, method).unwrap();
            let status = P.simplex();
            assert!(
                matches!(status, Status::NoPrimalFeasible | Status::Fault),
                "{:?}",
                status
            );
            assert_eq!(P.prim_stat(), SolStat::NoFeasible);
        }
    }
}

#[test]
fn test_unbounded() {
    // maximize x with x >= 0 and no upper limit
    let mut P = Problem::new();
    P.print_to_sink();
    P.set_obj_dir(ObjDir::Maximize);
    P.add_rows(1);
    P.add_cols(2);
    P.set_row_bnds(0, Bounds::Upper(1.)).unwrap();
    P.set_mat_row(0, &[(0, -1.), (1, 1.)]).unwrap();
    P.set_col_bnds(0, Bounds::Lower(0.)).unwrap();
    P.set_col_bnds(1, Bounds::Lower(0.)).unwrap();
    P.set_obj_coef(0, 1.).unwrap();
    assert_eq!(P.simplex(), Status::NoDualFeasible);
    assert_eq!(P.dual_stat(), SolStat::NoFeasible);
}

#[test]
fn test_small_lp_settings() {
    let variants: [(ParamKey, ParamValue); 7] = [
        (ParamKey::Dual, 1.into()),
        (ParamKey::Price, 0.into()),
        (ParamKey::Relax, 0.0.into()),
        (ParamKey::Scale, 3.into()),
        (ParamKey::Presol, 1.into()),
        (ParamKey::BfType, 2.into()),
        (ParamKey::BfType, 3.into()),
    ];
    for (key, value) in variants {
        let mut P = small_lp();
        P.set_param(key, value).unwrap();
        assert_eq!(P.simplex(), Status::Ok, "{} = {}", key, value);
        assert!((P.obj_val() - 11.).abs() < 1e-9);
        assert!((P.col_prim(0) - 3.).abs() < 1e-9);
        assert!((P.col_prim(1) - 1.).abs() < 1e-9);
        assert!((P.row_dual(0) - 2.).abs() < 1e-9);
        assert_eq!(P.col_stat(0), VarStat::AtUpper);
        assert_eq!(P.row_stat(1), VarStat::Basic);
    }
}

#[test]
fn test_iteration_counter_and_limit() {
    let mut P = small_lp();
    assert_eq!(P.simplex(), Status::Ok);
    let first = P.params().it_cnt();
    assert!(first > 0);

    // warm start from the optimal basis
    assert_eq!(P.simplex(), Status::Ok);
    assert_eq!(P.params().it_cnt(), first);

    let mut P = small_lp();
    P.set_int_param(ParamKey::ItLim, 0).unwrap();
    assert_eq!(P.simplex(), Status::IterationLimit);
}

#[test]
fn test_objective_limit() {
    // minimize x + y  s.t.  x >= 2, y >= 2
    let mut P = Problem::new();
    P.print_to_sink();
    P.add_rows(2);
    P.add_cols(2);
    P.set_row_bnds(0, Bounds::Lower(2.)).unwrap();
    P.set_row_bnds(1, Bounds::Lower(2.)).unwrap();
    P.set_mat_row(0, &[(0, 1.)]).unwrap();
    P.set_mat_row(1, &[(1, 1.)]).unwrap();
    P.set_col_bnds(0, Bounds::Lower(0.)).unwrap();
    P.set_col_bnds(1, Bounds::Lower(0.)).unwrap();
    P.set_obj_coef(0, 1.).unwrap();
    P.set_obj_coef(1, 1.).unwrap();
    P.set_param(ParamKey::Dual, SimplexMethod::Dual).unwrap();
    P.set_real_param(ParamKey::ObjUl, 1.0).unwrap();
    assert_eq!(P.simplex(), Status::ObjUpperLimit);

    P.std_basis();
    P.set_real_param(ParamKey::ObjUl, f64::MAX).unwrap();
    assert_eq!(P.simplex(), Status::Ok);
    assert!((P.obj_val() - 4.).abs() < 1e-9);
}

#[test]
fn test_presolve_empty_row() {
    let mut P = small_lp();
    let i = P.add_rows(1);
    P.set_row_bnds(i, Bounds::Lower(1.)).unwrap();
    P.set_int_param(ParamKey::Presol, 1).unwrap();
    assert_eq!(P.simplex(), Status::NoPrimalFeasible);
    assert_eq!(P.prim_stat(), SolStat::NoFeasible);
}

#[test]
fn test_rounding() {
    let mut P = small_lp();
    P.set_int_param(ParamKey::Round, 1).unwrap();
    assert_eq!(P.simplex(), Status::Ok);
    assert_eq!(P.row_dual(1), 0.0);
    assert_eq!(P.col_dual(1), 0.0);
}

#[test]
fn test_bad_bounds() {
    let mut P = small_lp();
    P.set_col_bnds(1, Bounds::Double(2., 1.)).unwrap();
    assert_eq!(P.simplex(), Status::Fault);
    assert_eq!(P.exact(), Status::Fault);
}

#[test]
fn test_exact() {
    let mut P = small_lp();
    // a cost that has no exact binary representation
    P.set_obj_coef(1, 0.1).unwrap();
    P.set_obj_coef(0, 0.3).unwrap();
    assert_eq!(P.exact(), Status::Ok);
    assert_eq!(P.status(), SolutionStatus::Optimal);
    assert_eq!(P.col_prim(0), 3.);
    assert_eq!(P.col_prim(1), 1.);
    assert_eq!(P.row_prim(0), 4.);

    let mut P = single(Bounds::Lower(2.));
    assert_eq!(P.exact(), Status::NoPrimalFeasible);
}

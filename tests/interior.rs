#![allow(non_snake_case)]

use lpcontrol::io::ConfigurablePrintTarget;
use lpcontrol::problem::*;
use lpcontrol::solver::Status;

// minimize 2x + 3y + z
// s.t.  x + y + z  = 3
//       x - y     >= -1
//       0 <= x <= 2, y >= 0, z >= 1
fn lp() -> Problem {
    let mut P = Problem::new();
    P.print_to_sink();
    P.add_rows(2);
    P.add_cols(3);
    P.set_row_bnds(0, Bounds::Fixed(3.)).unwrap();
    P.set_row_bnds(1, Bounds::Lower(-1.)).unwrap();
    P.set_mat_row(0, &[(0, 1.), (1, 1.), (2, 1.)]).unwrap();
    P.set_mat_row(1, &[(0, 1.), (1, -1.)]).unwrap();
    P.set_col_bnds(0, Bounds::Double(0., 2.)).unwrap();
    P.set_col_bnds(1, Bounds::Lower(0.)).unwrap();
    P.set_col_bnds(2, Bounds::Lower(1.)).unwrap();
    for (j, c) in [2., 3., 1.].into_iter().enumerate() {
        P.set_obj_coef(j, c).unwrap();
    }
    P
}

#[test]
fn test_interior_matches_simplex() {
    let mut P = lp();
    assert_eq!(P.interior(), Status::Ok);
    assert_eq!(P.ipt_status(), SolutionStatus::Optimal);

    // z carries the whole row: x = y = 0, z = 3
    assert!((P.ipt_obj_val() - 3.).abs() < 1e-6);
    assert!((P.ipt_col_prim(2) - 3.).abs() < 1e-6);
    assert!((P.ipt_row_prim(0) - 3.).abs() < 1e-6);

    assert_eq!(P.simplex(), Status::Ok);
    assert!((P.obj_val() - P.ipt_obj_val()).abs() < 1e-6);
    for i in 0..2 {
        assert!((P.row_dual(i) - P.ipt_row_dual(i)).abs() < 1e-5);
    }
    for j in 0..3 {
        assert!((P.col_dual(j) - P.ipt_col_dual(j)).abs() < 1e-5);
    }
}

#[test]
fn test_interior_infeasible() {
    let mut P = lp();
    // x + y + z = 3 with z >= 4
    P.set_col_bnds(2, Bounds::Lower(4.)).unwrap();
    assert_eq!(P.interior(), Status::NoPrimalFeasible);
    assert_eq!(P.ipt_status(), SolutionStatus::NoFeasible);
}

#![allow(non_snake_case)]

use lpcontrol::diagnostics::*;
use lpcontrol::io::ConfigurablePrintTarget;
use lpcontrol::problem::*;
use lpcontrol::solver::Status;

// maximize x + y
// s.t.  x + 2y <= 4
//       0 <= x <= 3, 0 <= y
fn small_problem() -> Problem {
    let mut P = Problem::new();
    P.print_to_sink();
    P.set_obj_dir(ObjDir::Maximize);
    P.add_rows(1);
    P.add_cols(2);
    P.set_mat_row(0, &[(0, 1.), (1, 2.)]).unwrap();
    P.set_row_bnds(0, Bounds::Upper(4.)).unwrap();
    P.set_col_bnds(0, Bounds::Double(0., 3.)).unwrap();
    P.set_col_bnds(1, Bounds::Lower(0.)).unwrap();
    P.set_obj_coef(0, 1.).unwrap();
    P.set_obj_coef(1, 1.).unwrap();
    P
}

fn acceptable(res: &KktResidual) -> bool {
    matches!(res.quality, Quality::High | Quality::Medium)
}

#[test]
fn test_kkt_after_simplex() {
    let mut P = small_problem();
    assert_eq!(P.simplex(), Status::Ok);
    assert!(!P.bf_exists());

    let report = P.check_kkt(KktTarget::Continuous);
    assert_eq!(report.primal_eq.quality, Quality::High);
    assert_eq!(report.primal_bound.quality, Quality::High);
    assert_eq!(report.dual_eq.unwrap().quality, Quality::High);
    assert_eq!(report.dual_bound.unwrap().quality, Quality::High);

    // the optimal basis is now factored
    assert!(P.bf_exists());
}

#[test]
fn test_kkt_after_interior() {
    let mut P = small_problem();
    assert_eq!(P.interior(), Status::Ok);

    let report = P.check_kkt(KktTarget::Continuous);
    assert!(acceptable(&report.primal_eq));
    assert!(acceptable(&report.primal_bound));
    assert!(acceptable(&report.dual_eq.unwrap()));
    assert!(acceptable(&report.dual_bound.unwrap()));
}

#[test]
fn test_kkt_after_intopt() {
    let mut P = small_problem();
    P.set_col_kind(0, VarKind::Integer).unwrap();
    P.set_col_kind(1, VarKind::Integer).unwrap();
    assert_eq!(P.intopt(true), Status::Ok);
    assert_eq!(P.mip_status(), SolutionStatus::Optimal);

    let report = P.check_kkt(KktTarget::Integer);
    assert_eq!(report.primal_eq.quality, Quality::High);
    assert_eq!(report.primal_bound.quality, Quality::High);
    assert!(report.dual_eq.is_none());
    assert!(report.dual_bound.is_none());
}

#[test]
fn test_sensitivity_ranges_contain_costs() {
    let mut P = small_problem();
    assert_eq!(P.simplex(), Status::Ok);

    let ranges = P.sensitivity().unwrap();
    assert_eq!(ranges.len(), 2);
    for (j, r) in ranges.iter().enumerate() {
        let c = P.obj_coef(j);
        assert!(r.lower <= c && c <= r.upper, "column {}: {:?}", j, r);
    }
    assert!(P.bf_exists());
}

#[test]
fn test_sensitivity_requires_optimum() {
    let mut P = small_problem();
    assert!(matches!(P.sensitivity(), Err(DiagnosticsError::NotOptimal)));
}

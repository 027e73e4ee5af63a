#![allow(non_snake_case)]
use super::*;
use crate::engine::simplex;

/// Time limit in seconds as native milliseconds.  Negative and huge
/// values mean unbounded.
pub(crate) fn millis(secs: f64) -> i32 {
    if secs < 0.0 {
        return i32::MAX;
    }
    let ms = (secs * 1000.0).round();
    if ms >= i32::MAX as f64 {
        i32::MAX
    } else {
        ms as i32
    }
}

/// iteration limit with negative values meaning unbounded
pub(crate) fn iterations(it_lim: i32) -> i32 {
    if it_lim < 0 {
        i32::MAX
    } else {
        it_lim
    }
}

pub(crate) fn simplex_control(params: &ControlParams) -> SimplexControl {
    let r_test = if params.relax() == 0.0 {
        RatioTest::Textbook
    } else {
        RatioTest::Harris
    };
    built(
        SimplexControlBuilder::default()
            .msg_lev(params.msg_lev())
            .meth(params.method())
            .pricing(params.pricing())
            .r_test(r_test)
            .relax(params.relax())
            .tol_bnd(params.tol_bnd())
            .tol_dj(params.tol_dj())
            .tol_piv(params.tol_piv())
            .obj_ll(params.obj_ll())
            .obj_ul(params.obj_ul())
            .it_lim(iterations(params.it_lim()))
            .tm_lim(millis(params.tm_lim()))
            .out_frq(params.out_frq())
            .out_dly(millis(params.out_dly()))
            .presolve(params.presolve())
            .scaling(params.scale())
            .bf_type(params.bf_type())
            .build(),
    )
}

// Zero solution components below the tolerances
fn round_solution(P: &mut Problem, ctrl: &SimplexControl) {
    let clip = |v: &mut f64, tol: f64| {
        if v.abs() <= tol {
            *v = 0.0;
        }
    };
    let sol = &mut P.basic;
    for v in sol.row_prim.iter_mut().chain(sol.col_prim.iter_mut()) {
        clip(v, ctrl.tol_bnd);
    }
    for v in sol.row_dual.iter_mut().chain(sol.col_dual.iter_mut()) {
        clip(v, ctrl.tol_dj);
    }
}

/// Floating point primal or dual simplex.
pub(crate) struct SimplexAdapter;

impl SolverAdapter for SimplexAdapter {
    type Control = SimplexControl;
    type Code = SimplexReturn;
    const NAME: &'static str = "simplex";

    fn control(&self, params: &ControlParams) -> SimplexControl {
        simplex_control(params)
    }

    fn invoke(&self, P: &mut Problem, ctrl: &SimplexControl) -> SimplexReturn {
        simplex::simplex(P, ctrl)
    }

    fn normalize(&self, code: SimplexReturn) -> Status {
        Status::from_simplex(code)
    }

    fn finish(&self, P: &mut Problem, ctrl: &SimplexControl, code: SimplexReturn) {
        if code == SimplexReturn::Ok && P.params().round() {
            round_solution(P, ctrl);
        }
    }
}

/// Primal simplex in exact rational arithmetic.
pub(crate) struct ExactAdapter;

impl SolverAdapter for ExactAdapter {
    type Control = SimplexControl;
    type Code = SimplexReturn;
    const NAME: &'static str = "exact";

    fn control(&self, params: &ControlParams) -> SimplexControl {
        simplex_control(params)
    }

    fn invoke(&self, P: &mut Problem, ctrl: &SimplexControl) -> SimplexReturn {
        simplex::exact(P, ctrl)
    }

    fn normalize(&self, code: SimplexReturn) -> Status {
        Status::from_exact(code)
    }
}

#[test]
fn test_simplex_control_from_params() {
    use crate::params::*;

    let mut params = ControlParams::new();
    let ctrl = simplex_control(&params);
    assert_eq!(ctrl.it_lim, i32::MAX);
    assert_eq!(ctrl.tm_lim, i32::MAX);
    assert_eq!(ctrl.r_test, RatioTest::Harris);
    assert_eq!(ctrl.out_dly, 0);
    assert!(!ctrl.presolve);

    params.set(ParamKey::Relax, 0.0).unwrap();
    params.set(ParamKey::TmLim, 2.5).unwrap();
    params.set(ParamKey::ItLim, 100).unwrap();
    params.set(ParamKey::Dual, SimplexMethod::Dual).unwrap();
    params.set(ParamKey::Presol, 1).unwrap();
    let ctrl = simplex_control(&params);
    assert_eq!(ctrl.r_test, RatioTest::Textbook);
    assert_eq!(ctrl.tm_lim, 2500);
    assert_eq!(ctrl.it_lim, 100);
    assert_eq!(ctrl.meth, SimplexMethod::Dual);
    assert!(ctrl.presolve);

    assert_eq!(millis(1e12), i32::MAX);
    assert_eq!(millis(f64::INFINITY), i32::MAX);
    assert_eq!(iterations(-5), i32::MAX);
}

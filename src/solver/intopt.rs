#![allow(non_snake_case)]
use super::simplex::{millis, simplex_control};
use super::*;
use crate::engine::intopt;
use crate::params::CutFlags;

// longest time limit honored by the search, in seconds
const MAX_TIME_LIMIT: f64 = 1e6;

pub(crate) fn intopt_control(params: &ControlParams, presolve: bool) -> IntoptControl {
    let tm_lim = match params.tm_lim() {
        t if t > MAX_TIME_LIMIT => i32::MAX,
        t => millis(t),
    };
    let cuts = params.use_cuts();
    built(
        IntoptControlBuilder::default()
            .msg_lev(params.msg_lev())
            .br_tech(params.branch())
            .bt_tech(params.btrack())
            .tol_int(params.tol_int())
            .tol_obj(params.tol_obj())
            .tm_lim(tm_lim)
            .out_frq(params.out_frq())
            .out_dly(millis(params.out_dly()))
            .mip_gap(params.mip_gap())
            .gmi_cuts(cuts.contains(CutFlags::GOMORY))
            .mir_cuts(cuts.contains(CutFlags::MIR))
            .cov_cuts(cuts.contains(CutFlags::COVER))
            .clq_cuts(cuts.contains(CutFlags::CLIQUE))
            .presolve(presolve)
            .binarize(params.binarize())
            // node relaxations share the simplex settings, including
            // the iteration limit
            .lp(simplex_control(params))
            .build(),
    )
}

/// Branch-and-bound.  `presolve` is chosen by the caller, not read from
/// the store.
pub(crate) struct IntoptAdapter {
    pub presolve: bool,
}

impl SolverAdapter for IntoptAdapter {
    type Control = IntoptControl;
    type Code = IntoptReturn;
    const NAME: &'static str = "intopt";

    fn control(&self, params: &ControlParams) -> IntoptControl {
        intopt_control(params, self.presolve)
    }

    fn invoke(&self, P: &mut Problem, ctrl: &IntoptControl) -> IntoptReturn {
        intopt::intopt(P, ctrl)
    }

    fn normalize(&self, code: IntoptReturn) -> Status {
        Status::from_intopt(code)
    }
}

#[test]
fn test_intopt_control_from_params() {
    use crate::params::*;

    let mut params = ControlParams::new();
    params.set(ParamKey::UseCuts, (CutFlags::GOMORY | CutFlags::CLIQUE).bits()).unwrap();
    params.set(ParamKey::TmLim, 2e6).unwrap();
    params.set(ParamKey::ItLim, 50).unwrap();
    params.set(ParamKey::BTrack, Backtrack::DepthFirst).unwrap();

    let ctrl = intopt_control(&params, true);
    assert!(ctrl.presolve);
    assert!(ctrl.gmi_cuts && ctrl.clq_cuts);
    assert!(!ctrl.mir_cuts && !ctrl.cov_cuts);
    assert_eq!(ctrl.tm_lim, i32::MAX);
    assert_eq!(ctrl.lp.it_lim, 50);
    assert_eq!(ctrl.bt_tech, Backtrack::DepthFirst);

    params.set(ParamKey::TmLim, 10.0).unwrap();
    let ctrl = intopt_control(&params, false);
    assert_eq!(ctrl.tm_lim, 10_000);
    assert!(!ctrl.presolve);
}

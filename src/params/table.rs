// Parameter slot table: one entry per key carrying its name, kind,
// default and domain.  All accessors validate against this table.

use super::{ParamKey, ParamKind, ParamValue, NUM_PARAMS};
use lazy_static::lazy_static;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Domain {
    /// any value of the right kind
    Any,
    /// integer in a closed range
    Range(i32, i32),
    /// integer bounded below
    AtLeast(i32),
    /// real, not negative
    NonNegative,
}

impl Domain {
    pub(crate) fn admits(&self, value: &ParamValue) -> bool {
        match (self, value) {
            (_, ParamValue::Real(v)) if v.is_nan() => false,
            (Domain::NonNegative, ParamValue::Real(v)) => *v >= 0.0,
            (Domain::Any, _) => true,
            (Domain::Range(lo, hi), ParamValue::Int(v)) => lo <= v && v <= hi,
            (Domain::AtLeast(lo), ParamValue::Int(v)) => lo <= v,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct ParamSpec {
    pub key: ParamKey,
    pub name: &'static str,
    pub kind: ParamKind,
    pub default: ParamValue,
    pub domain: Domain,
}

const fn int(key: ParamKey, name: &'static str, default: i32, domain: Domain) -> ParamSpec {
    ParamSpec {
        key,
        name,
        kind: ParamKind::Int,
        default: ParamValue::Int(default),
        domain,
    }
}

const fn real(key: ParamKey, name: &'static str, default: f64, domain: Domain) -> ParamSpec {
    ParamSpec {
        key,
        name,
        kind: ParamKind::Real,
        default: ParamValue::Real(default),
        domain,
    }
}

const BOOL: Domain = Domain::Range(0, 1);

// ordered by key code
const SPECS: [ParamSpec; NUM_PARAMS] = [
    int(ParamKey::MsgLev, "msg_lev", 3, Domain::Range(0, 3)),
    int(ParamKey::Scale, "scale", 1, Domain::Range(0, 3)),
    int(ParamKey::Dual, "dual", 0, BOOL),
    int(ParamKey::Price, "price", 1, BOOL),
    real(ParamKey::Relax, "relax", 0.07, Domain::NonNegative),
    real(ParamKey::TolBnd, "tol_bnd", 1e-7, Domain::NonNegative),
    real(ParamKey::TolDj, "tol_dj", 1e-7, Domain::NonNegative),
    real(ParamKey::TolPiv, "tol_piv", 1e-9, Domain::NonNegative),
    int(ParamKey::Round, "round", 0, BOOL),
    real(ParamKey::ObjLl, "obj_ll", -f64::MAX, Domain::Any),
    real(ParamKey::ObjUl, "obj_ul", f64::MAX, Domain::Any),
    int(ParamKey::ItLim, "it_lim", -1, Domain::Any),
    ParamSpec {
        key: ParamKey::ItCnt,
        name: "it_cnt",
        kind: ParamKind::Counter,
        default: ParamValue::Int(0),
        domain: Domain::AtLeast(0),
    },
    real(ParamKey::TmLim, "tm_lim", -1.0, Domain::Any),
    int(ParamKey::OutFrq, "out_frq", 200, Domain::AtLeast(1)),
    real(ParamKey::OutDly, "out_dly", 0.0, Domain::NonNegative),
    int(ParamKey::Branch, "branch", 2, Domain::Range(0, 3)),
    int(ParamKey::BTrack, "btrack", 3, Domain::Range(0, 3)),
    real(ParamKey::TolInt, "tol_int", 1e-5, Domain::NonNegative),
    real(ParamKey::TolObj, "tol_obj", 1e-7, Domain::NonNegative),
    int(ParamKey::MpsInfo, "mps_info", 1, BOOL),
    int(ParamKey::MpsObj, "mps_obj", 2, Domain::Range(0, 2)),
    int(ParamKey::MpsOrig, "mps_orig", 0, BOOL),
    int(ParamKey::MpsWide, "mps_wide", 1, BOOL),
    int(ParamKey::MpsFree, "mps_free", 0, BOOL),
    int(ParamKey::MpsSkip, "mps_skip", 0, BOOL),
    int(ParamKey::LptOrig, "lpt_orig", 0, BOOL),
    int(ParamKey::Presol, "presol", 0, BOOL),
    int(ParamKey::Binarize, "binarize", 0, BOOL),
    int(ParamKey::UseCuts, "use_cuts", 0x00, Domain::Range(0x00, 0xFF)),
    int(ParamKey::BfType, "bf_type", 1, Domain::Range(1, 3)),
    real(ParamKey::MipGap, "mip_gap", 0.0, Domain::NonNegative),
];

lazy_static! {
    static ref NAME_INDEX: HashMap<&'static str, ParamKey> =
        SPECS.iter().map(|s| (s.name, s.key)).collect();
}

pub(crate) fn spec(key: ParamKey) -> &'static ParamSpec {
    &SPECS[key.index()]
}

pub(crate) fn lookup(name: &str) -> Option<ParamKey> {
    NAME_INDEX.get(name).copied()
}

#[test]
fn test_table_order() {
    for (i, s) in SPECS.iter().enumerate() {
        assert_eq!(s.key.index(), i);
        assert_eq!(s.default.kind() == ParamKind::Int, s.kind != ParamKind::Real);
        assert!(s.domain.admits(&s.default), "{}", s.name);
    }
    assert_eq!(NAME_INDEX.len(), NUM_PARAMS);
}

#![allow(non_snake_case)]

use lpcontrol::params::*;
use lpcontrol::problem::{Problem, ProblemClass, VarKind};

#[test]
fn test_defaults_on_creation() {
    let P = Problem::new();
    assert_eq!(P.get_param(ParamKey::MsgLev), ParamValue::Int(3));
    assert_eq!(P.get_int_param(ParamKey::ItLim), Ok(-1));
    assert_eq!(P.get_real_param(ParamKey::TmLim), Ok(-1.0));
    assert_eq!(P.get_real_param(ParamKey::Relax), Ok(0.07));
    assert_eq!(P.get_int_param(ParamKey::BTrack), Ok(3));
    assert_eq!(P.get_int_param(ParamKey::ItCnt), Ok(0));
    assert_eq!(P.get_real_param(ParamKey::MipGap), Ok(0.0));

    // every key has a value of its own kind
    for (key, value) in P.params().iter() {
        match key.kind() {
            ParamKind::Real => assert!(matches!(value, ParamValue::Real(_)), "{}", key),
            _ => assert!(matches!(value, ParamValue::Int(_)), "{}", key),
        }
    }
}

#[test]
fn test_accessor_errors() {
    let mut P = Problem::new();

    assert!(matches!(
        P.get_real_param(ParamKey::MsgLev),
        Err(ParamError::TypeMismatch { .. })
    ));
    assert!(matches!(
        P.set_real_param(ParamKey::ItLim, 10.0),
        Err(ParamError::TypeMismatch { .. })
    ));
    assert_eq!(
        P.set_int_param(ParamKey::ItCnt, 5),
        Err(ParamError::ReadOnly(ParamKey::ItCnt))
    );
    assert!(matches!(
        P.set_int_param(ParamKey::Branch, 4),
        Err(ParamError::InvalidValue { .. })
    ));
    assert!(P.set_real_param(ParamKey::TolBnd, -1e-3).is_err());
    assert!(P.set_real_param(ParamKey::TolDj, f64::NAN).is_err());
    assert!(P.set_int_param(ParamKey::OutFrq, 0).is_err());

    // rejected writes leave the old value
    assert_eq!(P.get_int_param(ParamKey::Branch), Ok(2));

    // limits take any value
    P.set_int_param(ParamKey::ItLim, -100).unwrap();
    P.set_real_param(ParamKey::TmLim, -3.0).unwrap();
    P.set_real_param(ParamKey::ObjLl, 5.0).unwrap();

    assert!(ParamKey::from_code(400).is_err());
    assert_eq!(ParamKey::from_code(327), Ok(ParamKey::Presol));
    assert_eq!("use_cuts".parse::<ParamKey>(), Ok(ParamKey::UseCuts));
}

#[test]
fn test_reset_keeps_counter() {
    let mut P = Problem::new();
    P.set_param(ParamKey::Dual, SimplexMethod::Dual).unwrap();
    P.set_real_param(ParamKey::TolInt, 1e-3).unwrap();
    P.reset_params();
    assert_eq!(P.params().method(), SimplexMethod::Primal);
    assert_eq!(P.params().tol_int(), 1e-5);
    assert_eq!(P.params(), &ControlParams::new());
}

#[test]
fn test_problem_class() {
    let mut P = Problem::new();
    P.add_cols(3);
    assert_eq!(P.class(), ProblemClass::Lp);
    P.set_col_kind(1, VarKind::Integer).unwrap();
    assert_eq!(P.class(), ProblemClass::Mip);
    P.set_col_kind(1, VarKind::Continuous).unwrap();
    assert_eq!(P.class(), ProblemClass::Lp);
}

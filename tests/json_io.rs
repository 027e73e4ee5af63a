#![allow(non_snake_case)]

#[cfg(feature = "serde")]
#[test]
fn test_json_io() {
    use lpcontrol::params::*;
    use lpcontrol::problem::Problem;
    use std::io::{Seek, SeekFrom};

    let mut P = Problem::new();
    P.set_param(ParamKey::Branch, BranchRule::MostFractional).unwrap();
    P.set_real_param(ParamKey::TmLim, 12.5).unwrap();
    P.set_real_param(ParamKey::ObjUl, f64::INFINITY).unwrap();
    P.set_int_param(ParamKey::UseCuts, 0x0C).unwrap();

    // write the parameters to a file
    let mut file = tempfile::tempfile().unwrap();
    P.params().write_to(&mut file).unwrap();

    // read them back
    file.seek(SeekFrom::Start(0)).unwrap();
    let params = ControlParams::read_from(&mut file).unwrap();
    assert_eq!(params.branch(), BranchRule::MostFractional);
    assert_eq!(params.tm_lim(), 12.5);
    assert_eq!(params.use_cuts(), CutFlags::GOMORY | CutFlags::MIR);
    // infinities are stored as the largest finite value
    assert_eq!(params.obj_ul(), f64::MAX);

    // unknown keys and out of range values are rejected
    assert!(ControlParams::from_json(r#"{"no_such_key": 1}"#).is_err());
    assert!(ControlParams::from_json(r#"{"msg_lev": 7}"#).is_err());
    assert!(ControlParams::from_json(r#"{"tol_int": -1.0}"#).is_err());

    // absent keys keep their defaults
    let params = ControlParams::from_json(r#"{"presol": 1}"#).unwrap();
    assert!(params.presolve());
    assert_eq!(params.msg_lev(), MsgLevel::All);
}

use super::{table, ParamError, ParamKind, ParamValue};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of a control parameter.
///
/// Every key has a fixed numeric code (see [`ParamKey::code`]), a fixed
/// snake-case name and exactly one value kind.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ParamKey {
    /// message level
    MsgLev = 300,
    /// scaling option
    Scale = 301,
    /// use the dual simplex
    Dual = 302,
    /// pricing option
    Price = 303,
    /// ratio test relaxation parameter
    Relax = 304,
    /// primal feasibility tolerance
    TolBnd = 305,
    /// dual feasibility tolerance
    TolDj = 306,
    /// pivot tolerance
    TolPiv = 307,
    /// round tiny solution components to zero
    Round = 308,
    /// objective lower limit
    ObjLl = 309,
    /// objective upper limit
    ObjUl = 310,
    /// simplex iteration limit
    ItLim = 311,
    /// simplex iteration count
    ItCnt = 312,
    /// time limit in seconds
    TmLim = 313,
    /// output frequency in iterations
    OutFrq = 314,
    /// output delay in seconds
    OutDly = 315,
    /// branching technique
    Branch = 316,
    /// backtracking technique
    BTrack = 317,
    /// integer feasibility tolerance
    TolInt = 318,
    /// objective tolerance
    TolObj = 319,
    /// write comment cards in MPS output
    MpsInfo = 320,
    /// objective row handling in MPS output
    MpsObj = 321,
    /// use original names in MPS output
    MpsOrig = 322,
    /// use all data fields in MPS output
    MpsWide = 323,
    /// write free MPS
    MpsFree = 324,
    /// skip empty columns in MPS output
    MpsSkip = 325,
    /// use original names in LP output
    LptOrig = 326,
    /// use the LP presolver
    Presol = 327,
    /// replace general integers by binaries
    Binarize = 328,
    /// cut generation flags
    UseCuts = 329,
    /// basis factorization type
    BfType = 330,
    /// relative MIP gap tolerance
    MipGap = 331,
}

/// Number of control parameters.
pub const NUM_PARAMS: usize = 32;

const FIRST_CODE: i32 = ParamKey::MsgLev as i32;

impl ParamKey {
    /// All keys, in code order.
    pub const ALL: [ParamKey; NUM_PARAMS] = [
        ParamKey::MsgLev,
        ParamKey::Scale,
        ParamKey::Dual,
        ParamKey::Price,
        ParamKey::Relax,
        ParamKey::TolBnd,
        ParamKey::TolDj,
        ParamKey::TolPiv,
        ParamKey::Round,
        ParamKey::ObjLl,
        ParamKey::ObjUl,
        ParamKey::ItLim,
        ParamKey::ItCnt,
        ParamKey::TmLim,
        ParamKey::OutFrq,
        ParamKey::OutDly,
        ParamKey::Branch,
        ParamKey::BTrack,
        ParamKey::TolInt,
        ParamKey::TolObj,
        ParamKey::MpsInfo,
        ParamKey::MpsObj,
        ParamKey::MpsOrig,
        ParamKey::MpsWide,
        ParamKey::MpsFree,
        ParamKey::MpsSkip,
        ParamKey::LptOrig,
        ParamKey::Presol,
        ParamKey::Binarize,
        ParamKey::UseCuts,
        ParamKey::BfType,
        ParamKey::MipGap,
    ];

    /// numeric code of the key
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Look up a key by its numeric code.
    pub fn from_code(code: i32) -> Result<Self, ParamError> {
        code.checked_sub(FIRST_CODE)
            .and_then(|i| usize::try_from(i).ok())
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| ParamError::InvalidKey(code.to_string()))
    }

    /// snake-case name of the key, e.g. `"tol_bnd"`
    pub fn name(self) -> &'static str {
        table::spec(self).name
    }

    /// the kind of value the key holds
    pub fn kind(self) -> ParamKind {
        table::spec(self).kind
    }

    /// the value installed when a parameter store is created or reset
    pub fn default_value(self) -> ParamValue {
        table::spec(self).default
    }

    pub(crate) fn index(self) -> usize {
        (self as i32 - FIRST_CODE) as usize
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParamKey {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        table::lookup(s).ok_or_else(|| ParamError::InvalidKey(s.to_string()))
    }
}

#[test]
fn test_key_codes() {
    for (i, key) in ParamKey::ALL.iter().enumerate() {
        assert_eq!(key.index(), i);
        assert_eq!(ParamKey::from_code(key.code()), Ok(*key));
        assert_eq!(key.name().parse::<ParamKey>(), Ok(*key));
    }
    assert_eq!(ParamKey::ItCnt.code(), 312);
    assert_eq!(ParamKey::MipGap.code(), 331);
    assert!(matches!(
        ParamKey::from_code(299),
        Err(ParamError::InvalidKey(_))
    ));
    assert!(ParamKey::from_code(332).is_err());
    assert!(ParamKey::from_code(i32::MIN).is_err());
    assert!("no_such_key".parse::<ParamKey>().is_err());
}

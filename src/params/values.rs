use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Kind of value held by a parameter slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// integer or enumeration encoded as an integer
    Int,
    /// real value
    Real,
    /// integer counter maintained by the solvers, read-only for callers
    Counter,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::Int => f.write_str("integer"),
            ParamKind::Real => f.write_str("real"),
            ParamKind::Counter => f.write_str("counter"),
        }
    }
}

/// A parameter value as seen at the accessor boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ParamValue {
    Int(i32),
    Real(f64),
}

impl ParamValue {
    /// the kind a value of this shape can be stored in
    pub(crate) fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Int(_) => ParamKind::Int,
            ParamValue::Real(_) => ParamKind::Real,
        }
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Real(v)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Real(v) => write!(f, "{:e}", v),
        }
    }
}

// Typed views of the enumerated parameters.  Each converts from the
// stored integer code and back.
macro_rules! int_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident = $code:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $code),+
        }

        impl $name {
            /// integer code stored in the parameter table
            pub fn code(self) -> i32 {
                self as i32
            }

            /// typed value for an integer code, if the code is in range
            pub fn from_code(code: i32) -> Option<Self> {
                match code {
                    $($code => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl From<$name> for ParamValue {
            fn from(v: $name) -> Self {
                ParamValue::Int(v.code())
            }
        }
    };
}

int_enum! {
    /// Verbosity of solver output.
    MsgLevel {
        /// no output
        Off = 0,
        /// error messages only
        Error = 1,
        /// normal output
        Normal = 2,
        /// full output, including informational messages
        All = 3,
    }
}

int_enum! {
    /// Scaling applied before a floating point simplex solve.
    ScaleMode {
        /// no scaling
        None = 0,
        /// equilibration scaling
        Equilibration = 1,
        /// geometric mean scaling
        GeometricMean = 2,
        /// geometric mean scaling followed by equilibration
        Both = 3,
    }
}

int_enum! {
    /// Simplex variant.
    SimplexMethod {
        /// two-phase primal simplex
        Primal = 0,
        /// dual simplex, falling back to the primal when the starting
        /// basis is not dual feasible
        Dual = 1,
    }
}

int_enum! {
    /// Pricing rule for the simplex.
    Pricing {
        /// textbook (Dantzig) pricing
        Textbook = 0,
        /// steepest edge pricing
        SteepestEdge = 1,
    }
}

int_enum! {
    /// Branching variable selection in branch-and-bound.
    BranchRule {
        /// first fractional variable
        FirstFractional = 0,
        /// last fractional variable
        LastFractional = 1,
        /// heuristic of Driebeck and Tomlin
        DriebeckTomlin = 2,
        /// most fractional variable
        MostFractional = 3,
    }
}

int_enum! {
    /// Node selection in branch-and-bound.
    Backtrack {
        /// depth first search
        DepthFirst = 0,
        /// breadth first search
        BreadthFirst = 1,
        /// best projection heuristic
        BestProjection = 2,
        /// node with the best local bound
        BestLocalBound = 3,
    }
}

int_enum! {
    /// Basis factorization method.
    BasisFactorType {
        /// LU with partial pivoting and product form updates
        ForrestTomlin = 1,
        /// LU with complete pivoting and product form updates
        BartelsGolub = 2,
        /// QR by Givens rotations and product form updates
        Givens = 3,
    }
}

/// Set of cut families enabled for branch-and-bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CutFlags(u8);

impl CutFlags {
    pub const NONE: CutFlags = CutFlags(0x00);
    /// lifted cover cuts
    pub const COVER: CutFlags = CutFlags(0x01);
    /// clique cuts
    pub const CLIQUE: CutFlags = CutFlags(0x02);
    /// Gomory mixed integer cuts
    pub const GOMORY: CutFlags = CutFlags(0x04);
    /// mixed integer rounding cuts
    pub const MIR: CutFlags = CutFlags(0x08);
    pub const ALL: CutFlags = CutFlags(0xFF);

    pub fn from_bits(bits: i32) -> Option<Self> {
        u8::try_from(bits).ok().map(CutFlags)
    }

    pub fn bits(self) -> i32 {
        self.0 as i32
    }

    pub fn contains(self, other: CutFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for CutFlags {
    type Output = CutFlags;
    fn bitor(self, rhs: Self) -> Self {
        CutFlags(self.0 | rhs.0)
    }
}

impl From<CutFlags> for ParamValue {
    fn from(v: CutFlags) -> Self {
        ParamValue::Int(v.bits())
    }
}

#[test]
fn test_typed_views() {
    assert_eq!(MsgLevel::from_code(2), Some(MsgLevel::Normal));
    assert_eq!(MsgLevel::from_code(4), None);
    assert!(MsgLevel::All > MsgLevel::Error);
    assert_eq!(BasisFactorType::from_code(0), None);
    assert_eq!(Backtrack::BestLocalBound.code(), 3);
    assert_eq!(ParamValue::from(BranchRule::MostFractional), ParamValue::Int(3));

    let cuts = CutFlags::GOMORY | CutFlags::MIR;
    assert!(cuts.contains(CutFlags::MIR));
    assert!(!cuts.contains(CutFlags::COVER));
    assert_eq!(cuts.bits(), 0x0C);
    assert!(CutFlags::ALL.contains(cuts));
    assert_eq!(CutFlags::from_bits(0x100), None);
    assert!(CutFlags::from_bits(0).unwrap().is_empty());
}

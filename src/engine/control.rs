//! Native configuration records and return codes of the solver engines.
//!
//! A control record is built fresh from a parameter store snapshot for
//! every solve and discarded afterwards.

use crate::params::*;
use derive_builder::Builder;
use thiserror::Error;

/// Error type returned when a control record fails validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControlError {
    #[error("bad value for control field \"{0}\"")]
    BadFieldValue(&'static str),
}

/// Ratio test used by the primal simplex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioTest {
    /// textbook ratio test
    Textbook,
    /// two pass ratio test of Harris
    Harris,
}

// ---------------------------------------------------
// simplex
// ---------------------------------------------------

/// Control record for the simplex engines.  Limits are in native units:
/// `i32::MAX` means unbounded, times are in milliseconds.
#[derive(Builder, Debug, Clone)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct SimplexControl {
    #[builder(default = "MsgLevel::All")]
    pub msg_lev: MsgLevel,

    #[builder(default = "SimplexMethod::Primal")]
    pub meth: SimplexMethod,

    #[builder(default = "Pricing::SteepestEdge")]
    pub pricing: Pricing,

    #[builder(default = "RatioTest::Harris")]
    pub r_test: RatioTest,

    ///relaxation of the bounds in the Harris ratio test, relative to
    ///`tol_bnd`
    #[builder(default = "0.07")]
    pub relax: f64,

    #[builder(default = "1e-7")]
    pub tol_bnd: f64,

    #[builder(default = "1e-7")]
    pub tol_dj: f64,

    #[builder(default = "1e-9")]
    pub tol_piv: f64,

    #[builder(default = "-f64::MAX")]
    pub obj_ll: f64,

    #[builder(default = "f64::MAX")]
    pub obj_ul: f64,

    ///iteration limit
    #[builder(default = "i32::MAX")]
    pub it_lim: i32,

    ///time limit (milliseconds)
    #[builder(default = "i32::MAX")]
    pub tm_lim: i32,

    ///iterations between progress lines
    #[builder(default = "200")]
    pub out_frq: i32,

    ///delay before progress output starts (milliseconds)
    #[builder(default = "0")]
    pub out_dly: i32,

    #[builder(default = "false")]
    pub presolve: bool,

    #[builder(default = "ScaleMode::Equilibration")]
    pub scaling: ScaleMode,

    #[builder(default = "BasisFactorType::ForrestTomlin")]
    pub bf_type: BasisFactorType,
}

impl Default for SimplexControl {
    fn default() -> SimplexControl {
        SimplexControlBuilder::default().build().unwrap()
    }
}

impl From<ControlError> for SimplexControlBuilderError {
    fn from(e: ControlError) -> Self {
        SimplexControlBuilderError::ValidationError(e.to_string())
    }
}

impl SimplexControlBuilder {
    fn validate(&self) -> Result<(), ControlError> {
        check_nonneg(self.tol_bnd, "tol_bnd")?;
        check_nonneg(self.tol_dj, "tol_dj")?;
        check_nonneg(self.tol_piv, "tol_piv")?;
        check_nonneg(self.relax, "relax")?;
        check_at_least(self.it_lim, 0, "it_lim")?;
        check_at_least(self.tm_lim, 0, "tm_lim")?;
        check_at_least(self.out_frq, 1, "out_frq")?;
        check_at_least(self.out_dly, 0, "out_dly")?;
        Ok(())
    }
}

fn check_nonneg(v: Option<f64>, field: &'static str) -> Result<(), ControlError> {
    match v {
        Some(v) if v.is_nan() || v < 0.0 => Err(ControlError::BadFieldValue(field)),
        _ => Ok(()),
    }
}

fn check_at_least(v: Option<i32>, lo: i32, field: &'static str) -> Result<(), ControlError> {
    match v {
        Some(v) if v < lo => Err(ControlError::BadFieldValue(field)),
        _ => Ok(()),
    }
}

/// Return codes of the simplex engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimplexReturn {
    /// the solver finished, the solution status tells the outcome
    Ok,
    /// the initial basis is invalid
    BadBasis,
    /// the initial basis matrix is singular
    Singular,
    /// some double bounded variable has lower bound above upper bound
    Bound,
    /// the solver failed numerically
    Fail,
    /// the objective lower limit was reached
    ObjLowerLimit,
    /// the objective upper limit was reached
    ObjUpperLimit,
    IterationLimit,
    TimeLimit,
    /// the problem has no primal feasible solution
    NoPrimalFeasible,
    /// the problem has no dual feasible solution
    NoDualFeasible,
    /// the exact solver could not make progress
    NoConvergence,
}

// ---------------------------------------------------
// interior point
// ---------------------------------------------------

/// Control record for the interior point engine.
#[derive(Builder, Debug, Clone)]
pub struct InteriorControl {
    #[builder(default = "MsgLevel::All")]
    pub msg_lev: MsgLevel,

    #[builder(default = "200")]
    pub max_iter: u32,
}

impl Default for InteriorControl {
    fn default() -> InteriorControl {
        InteriorControlBuilder::default().build().unwrap()
    }
}

/// Return codes of the interior point engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteriorReturn {
    Ok,
    Fail,
    /// the problem has no feasible (primal or dual) solution
    NoFeasible,
    NoConvergence,
    IterationLimit,
    /// numerical instability
    Instability,
}

// ---------------------------------------------------
// branch-and-bound
// ---------------------------------------------------

/// Control record for the branch-and-bound engine.
#[derive(Builder, Debug, Clone)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct IntoptControl {
    #[builder(default = "MsgLevel::All")]
    pub msg_lev: MsgLevel,

    #[builder(default = "BranchRule::DriebeckTomlin")]
    pub br_tech: BranchRule,

    #[builder(default = "Backtrack::BestLocalBound")]
    pub bt_tech: Backtrack,

    #[builder(default = "1e-5")]
    pub tol_int: f64,

    #[builder(default = "1e-7")]
    pub tol_obj: f64,

    ///time limit (milliseconds)
    #[builder(default = "i32::MAX")]
    pub tm_lim: i32,

    ///iterations between progress lines
    #[builder(default = "200")]
    pub out_frq: i32,

    ///delay before progress output starts (milliseconds)
    #[builder(default = "0")]
    pub out_dly: i32,

    ///relative gap at which the search stops
    #[builder(default = "0.0")]
    pub mip_gap: f64,

    ///Gomory mixed integer cuts
    #[builder(default = "false")]
    pub gmi_cuts: bool,

    ///mixed integer rounding cuts
    #[builder(default = "false")]
    pub mir_cuts: bool,

    ///cover cuts
    #[builder(default = "false")]
    pub cov_cuts: bool,

    ///clique cuts
    #[builder(default = "false")]
    pub clq_cuts: bool,

    ///solve the root relaxation internally
    #[builder(default = "false")]
    pub presolve: bool,

    ///replace general integer columns by binary expansions
    #[builder(default = "false")]
    pub binarize: bool,

    ///settings for the node relaxations, including the per node
    ///iteration limit
    #[builder(default = "SimplexControl::default()")]
    pub lp: SimplexControl,
}

impl Default for IntoptControl {
    fn default() -> IntoptControl {
        IntoptControlBuilder::default().build().unwrap()
    }
}

impl From<ControlError> for IntoptControlBuilderError {
    fn from(e: ControlError) -> Self {
        IntoptControlBuilderError::ValidationError(e.to_string())
    }
}

impl IntoptControlBuilder {
    fn validate(&self) -> Result<(), ControlError> {
        check_nonneg(self.tol_int, "tol_int")?;
        check_nonneg(self.tol_obj, "tol_obj")?;
        check_nonneg(self.mip_gap, "mip_gap")?;
        check_at_least(self.tm_lim, 0, "tm_lim")?;
        check_at_least(self.out_frq, 1, "out_frq")?;
        check_at_least(self.out_dly, 0, "out_dly")?;
        Ok(())
    }
}

/// Return codes of the branch-and-bound engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntoptReturn {
    /// the search finished, the solution status tells the outcome
    Ok,
    /// the root relaxation has no primal feasible solution
    NoPrimalFeasible,
    /// the root relaxation has no dual feasible solution
    NoDualFeasible,
    /// some double bounded variable has lower bound above upper bound
    Bound,
    /// the root relaxation was not solved to optimality beforehand
    Root,
    /// the search failed
    Fail,
    /// the relative gap tolerance was reached
    MipGap,
    TimeLimit,
}

#[test]
fn test_control_validation() {
    let ctrl = SimplexControl::default();
    assert_eq!(ctrl.it_lim, i32::MAX);
    assert_eq!(ctrl.r_test, RatioTest::Harris);

    assert!(SimplexControlBuilder::default()
        .tol_bnd(-1.0)
        .build()
        .is_err());
    assert!(SimplexControlBuilder::default()
        .tol_dj(f64::NAN)
        .build()
        .is_err());
    assert!(SimplexControlBuilder::default().tm_lim(-1).build().is_err());
    assert!(IntoptControlBuilder::default().mip_gap(-0.1).build().is_err());

    let ctrl = IntoptControl::default();
    assert!(!ctrl.gmi_cuts && !ctrl.presolve);
    assert_eq!(ctrl.bt_tech, Backtrack::BestLocalBound);
}

use crate::engine::control::{InteriorReturn, IntoptReturn, SimplexReturn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Outcome of a solver run, common to all solver families.
#[derive(PartialEq, Eq, Clone, Debug, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Status {
    /// The solver finished.  The solution status of the problem tells
    /// whether an optimal solution was found.
    Ok,
    /// The solver could not start or failed internally.
    Fault,
    /// No primal feasible solution exists.
    NoPrimalFeasible,
    /// No dual feasible solution exists.  For branch-and-bound, the root
    /// relaxation has no feasible dual and the search was not started.
    NoDualFeasible,
    /// The solver could not converge.
    NoConvergence,
    /// Iteration limit reached.
    IterationLimit,
    /// Time limit reached.
    TimeLimit,
    /// Numerical instability.
    Instability,
    /// The relative MIP gap tolerance was reached.
    MipGap,
    /// The dual simplex reached the objective lower limit.
    ObjLowerLimit,
    /// The dual simplex reached the objective upper limit.
    ObjUpperLimit,
}

impl Status {
    /// true if the solver finished normally
    pub fn is_ok(&self) -> bool {
        matches!(self, Status::Ok)
    }

    /// Status of a floating point simplex run.
    ///
    /// # Panics
    ///
    /// Panics on a code the floating point simplex never returns.
    pub fn from_simplex(code: SimplexReturn) -> Self {
        match code {
            SimplexReturn::Ok => Status::Ok,
            SimplexReturn::BadBasis | SimplexReturn::Singular | SimplexReturn::Bound | SimplexReturn::Fail => {
                Status::Fault
            }
            SimplexReturn::IterationLimit => Status::IterationLimit,
            SimplexReturn::TimeLimit => Status::TimeLimit,
            SimplexReturn::NoPrimalFeasible => Status::NoPrimalFeasible,
            SimplexReturn::NoDualFeasible => Status::NoDualFeasible,
            SimplexReturn::ObjLowerLimit => Status::ObjLowerLimit,
            SimplexReturn::ObjUpperLimit => Status::ObjUpperLimit,
            SimplexReturn::NoConvergence => unmapped("simplex", code),
        }
    }

    /// Status of an exact simplex run.  Unlike [`Status::from_simplex`]
    /// this accepts `NoConvergence`.
    pub fn from_exact(code: SimplexReturn) -> Self {
        match code {
            SimplexReturn::NoConvergence => Status::NoConvergence,
            _ => Status::from_simplex(code),
        }
    }

    /// Status of an interior point run.
    pub fn from_interior(code: InteriorReturn) -> Self {
        match code {
            InteriorReturn::Ok => Status::Ok,
            InteriorReturn::Fail => Status::Fault,
            InteriorReturn::NoFeasible => Status::NoPrimalFeasible,
            InteriorReturn::NoConvergence => Status::NoConvergence,
            InteriorReturn::IterationLimit => Status::IterationLimit,
            InteriorReturn::Instability => Status::Instability,
        }
    }

    /// Status of a branch-and-bound run.  The codes `Bound`, `Root` and
    /// `Fail` all become [`Status::Fault`].
    pub fn from_intopt(code: IntoptReturn) -> Self {
        match code {
            IntoptReturn::Ok => Status::Ok,
            IntoptReturn::NoPrimalFeasible => Status::NoPrimalFeasible,
            IntoptReturn::NoDualFeasible => Status::NoDualFeasible,
            IntoptReturn::Bound | IntoptReturn::Root | IntoptReturn::Fail => Status::Fault,
            IntoptReturn::MipGap => Status::MipGap,
            IntoptReturn::TimeLimit => Status::TimeLimit,
        }
    }
}

// A code without a mapping means the solver and this table disagree
fn unmapped(family: &str, code: impl std::fmt::Debug) -> ! {
    panic!("no status mapping for {} return code {:?}", family, code)
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[test]
fn test_status_tables() {
    assert_eq!(Status::from_simplex(SimplexReturn::Singular), Status::Fault);
    assert_eq!(Status::from_simplex(SimplexReturn::Bound), Status::Fault);
    assert_eq!(Status::from_exact(SimplexReturn::TimeLimit), Status::TimeLimit);
    assert_eq!(Status::from_exact(SimplexReturn::NoConvergence), Status::NoConvergence);
    assert_eq!(Status::from_interior(InteriorReturn::NoFeasible), Status::NoPrimalFeasible);
    assert_eq!(Status::from_intopt(IntoptReturn::Root), Status::Fault);
    assert_eq!(Status::from_intopt(IntoptReturn::MipGap), Status::MipGap);
    assert!(Status::Ok.is_ok());
    assert_eq!(Status::ObjUpperLimit.to_string(), "ObjUpperLimit");
}

#[test]
#[should_panic(expected = "no status mapping")]
fn test_simplex_no_convergence_panics() {
    Status::from_simplex(SimplexReturn::NoConvergence);
}

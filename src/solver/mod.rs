//! Solver dispatch.
//!
//! Each solver family is driven through a [`SolverAdapter`]: the adapter
//! builds the native control record of its family from a snapshot of the
//! problem's [`ControlParams`](crate::params::ControlParams), runs the
//! native engine once and normalizes the native return code into a
//! [`Status`].  The entry points are the methods [`Problem::simplex`],
//! [`Problem::exact`], [`Problem::interior`] and [`Problem::intopt`].

use crate::params::ControlParams;
use crate::problem::Problem;
use std::fmt::Debug;

mod interior;
mod intopt;
mod simplex;
mod status;

pub use crate::engine::control::*;
pub use status::*;

pub(crate) use interior::InteriorAdapter;
pub(crate) use intopt::IntoptAdapter;
pub(crate) use simplex::{ExactAdapter, SimplexAdapter};

/// One solver family as seen from the parameter store.
pub(crate) trait SolverAdapter {
    /// native control record
    type Control: Debug;
    /// native return code
    type Code: Debug + Copy;

    /// name used in log events
    const NAME: &'static str;

    /// Build the native control record.  Every value in the store lies
    /// in its domain, so this can't fail.
    fn control(&self, params: &ControlParams) -> Self::Control;

    /// Run the native engine once.
    fn invoke(&self, P: &mut Problem, ctrl: &Self::Control) -> Self::Code;

    /// Map a native code to the unified status.
    fn normalize(&self, code: Self::Code) -> Status;

    /// Post-processing after the engine returned `code`.
    fn finish(&self, _P: &mut Problem, _ctrl: &Self::Control, _code: Self::Code) {}

    #[allow(non_snake_case)]
    fn run(&self, P: &mut Problem) -> Status {
        let ctrl = self.control(P.params());
        tracing::debug!(solver = Self::NAME, control = ?ctrl, "native control record");

        let code = self.invoke(P, &ctrl);
        self.finish(P, &ctrl, code);

        let status = self.normalize(code);
        if status.is_ok() {
            tracing::info!(solver = Self::NAME, ?code, "solver finished");
        } else {
            tracing::warn!(solver = Self::NAME, ?code, %status, "solver stopped");
        }
        status
    }
}

/// A native control record from an in-domain store never fails
/// validation.
pub(crate) fn built<C, E: std::fmt::Display>(res: Result<C, E>) -> C {
    res.unwrap_or_else(|e| panic!("control record rejected a stored parameter: {}", e))
}

impl Problem {
    /// Solve the LP relaxation with the floating point simplex method.
    ///
    /// The primal or dual variant and all other settings come from the
    /// parameter store.  The basic solution and the basis statuses are
    /// stored in the problem.
    pub fn simplex(&mut self) -> Status {
        SimplexAdapter.run(self)
    }

    /// Solve the LP relaxation with the primal simplex method in exact
    /// rational arithmetic.
    pub fn exact(&mut self) -> Status {
        ExactAdapter.run(self)
    }

    /// Solve the LP relaxation with the interior point method.
    pub fn interior(&mut self) -> Status {
        InteriorAdapter.run(self)
    }

    /// Solve the MIP by branch-and-bound.
    ///
    /// Without `presolve` the basic solution must already be optimal,
    /// i.e. [`Problem::simplex`] must have solved the LP relaxation;
    /// otherwise the search is not started and the result is
    /// [`Status::Fault`].  With `presolve` the root relaxation is solved
    /// internally.
    pub fn intopt(&mut self, presolve: bool) -> Status {
        IntoptAdapter { presolve }.run(self)
    }
}

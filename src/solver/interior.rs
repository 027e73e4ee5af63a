#![allow(non_snake_case)]
use super::*;
use crate::engine::interior;

/// Interior point method.  The engine takes no settings from the
/// parameter store.
pub(crate) struct InteriorAdapter;

impl SolverAdapter for InteriorAdapter {
    type Control = InteriorControl;
    type Code = InteriorReturn;
    const NAME: &'static str = "interior";

    fn control(&self, _params: &ControlParams) -> InteriorControl {
        InteriorControl::default()
    }

    fn invoke(&self, P: &mut Problem, ctrl: &InteriorControl) -> InteriorReturn {
        interior::interior(P, ctrl)
    }

    fn normalize(&self, code: InteriorReturn) -> Status {
        Status::from_interior(code)
    }
}

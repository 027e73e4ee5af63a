#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bounds of a row (auxiliary variable) or column.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Bounds {
    /// -inf < x < +inf
    #[default]
    Free,
    /// l <= x < +inf
    Lower(f64),
    /// -inf < x <= u
    Upper(f64),
    /// l <= x <= u
    Double(f64, f64),
    /// x = v
    Fixed(f64),
}

impl Bounds {
    /// Bounds from an optional lower and upper value.
    pub fn from_pair(lb: Option<f64>, ub: Option<f64>) -> Self {
        match (lb, ub) {
            (None, None) => Bounds::Free,
            (Some(l), None) => Bounds::Lower(l),
            (None, Some(u)) => Bounds::Upper(u),
            (Some(l), Some(u)) if l == u => Bounds::Fixed(l),
            (Some(l), Some(u)) => Bounds::Double(l, u),
        }
    }

    /// lower bound, if any
    pub fn lower(&self) -> Option<f64> {
        match *self {
            Bounds::Lower(l) | Bounds::Double(l, _) | Bounds::Fixed(l) => Some(l),
            Bounds::Free | Bounds::Upper(_) => None,
        }
    }

    /// upper bound, if any
    pub fn upper(&self) -> Option<f64> {
        match *self {
            Bounds::Upper(u) | Bounds::Double(_, u) | Bounds::Fixed(u) => Some(u),
            Bounds::Free | Bounds::Lower(_) => None,
        }
    }

    /// lower bound, `-inf` if none
    pub fn lb(&self) -> f64 {
        self.lower().unwrap_or(f64::NEG_INFINITY)
    }

    /// upper bound, `+inf` if none
    pub fn ub(&self) -> f64 {
        self.upper().unwrap_or(f64::INFINITY)
    }

    /// true if the bounds can't be satisfied
    pub fn is_empty(&self) -> bool {
        matches!(*self, Bounds::Double(l, u) if l > u)
    }

    /// distance of `x` outside the bounds and the violated bound
    pub(crate) fn violation(&self, x: f64) -> (f64, Option<f64>) {
        match (self.lower(), self.upper()) {
            (Some(l), _) if x < l => (l - x, Some(l)),
            (_, Some(u)) if x > u => (x - u, Some(u)),
            _ => (0.0, None),
        }
    }
}

#[test]
fn test_bounds() {
    assert_eq!(Bounds::from_pair(Some(1.), Some(1.)), Bounds::Fixed(1.));
    assert_eq!(Bounds::Upper(3.).lb(), f64::NEG_INFINITY);
    assert_eq!(Bounds::Double(0., 2.).ub(), 2.);
    assert!(Bounds::Double(2., 1.).is_empty());
    assert_eq!(Bounds::Double(0., 1.).violation(1.5), (0.5, Some(1.)));
    assert_eq!(Bounds::Lower(0.).violation(3.), (0., None));
}

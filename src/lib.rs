//! __lpcontrol__ is a control layer for linear and mixed integer
//! programming solvers.
//!
//! A [`Problem`](problem::Problem) holds an LP or MIP instance
//! together with its control parameters, solved as
//!
//! $$
//! \begin{array}{rl}
//! \text{minimize or maximize} & c^T x + c_0\\\\\[2ex\]
//!  \text{subject to} & r = A x \\\\\[1ex\]
//!         & l_r \le r \le u_r,\quad l_x \le x \le u_x
//!  \end{array}
//! $$
//!
//! with some columns of $x$ possibly restricted to integer values.
//!
//! The crate
//!
//! * keeps the 32 [control parameters](params) of each problem in a
//!   typed, validated store,
//! * translates the store into the native control record of the selected
//!   solver family and runs it ([`Problem::simplex`](problem::Problem::simplex),
//!   [`exact`](problem::Problem::exact), [`interior`](problem::Problem::interior)
//!   and [`intopt`](problem::Problem::intopt)),
//! * normalizes the native return codes of all families into one
//!   [`Status`](solver::Status) vocabulary, and
//! * checks the [KKT conditions](diagnostics) of the computed solutions.
//!
//! Reference backends for every family are built in: a bounded variable
//! primal and dual simplex method in floating point or exact rational
//! arithmetic with presolve and scaling, an interior point method through
//! the [Clarabel](https://crates.io/crates/clarabel) conic solver, and a
//! branch-and-bound search with cutting planes.
//!
//! # Example
//!
//! ```
//! use lpcontrol::problem::{Bounds, ObjDir, Problem};
//! use lpcontrol::solver::Status;
//! use lpcontrol::io::ConfigurablePrintTarget;
//!
//! let mut P = Problem::new();
//! P.print_to_sink();
//! P.set_obj_dir(ObjDir::Maximize);
//! P.add_rows(1);
//! P.add_cols(2);
//! P.set_mat_row(0, &[(0, 1.), (1, 2.)]).unwrap();
//! P.set_row_bnds(0, Bounds::Upper(4.)).unwrap();
//! P.set_col_bnds(0, Bounds::Double(0., 3.)).unwrap();
//! P.set_col_bnds(1, Bounds::Lower(0.)).unwrap();
//! P.set_obj_coef(0, 1.).unwrap();
//! P.set_obj_coef(1, 1.).unwrap();
//!
//! assert_eq!(P.simplex(), Status::Ok);
//! assert!((P.obj_val() - 3.5).abs() < 1e-9);
//! ```
//!
//! # License
//!
//! Licensed under Apache License, Version 2.0.

#![allow(non_snake_case)]

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod algebra;
pub mod diagnostics;
pub mod io;
pub mod params;
pub mod problem;
pub mod solver;

pub(crate) mod engine;

/// crate version
pub fn version() -> &'static str {
    VERSION
}

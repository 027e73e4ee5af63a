//! Mixed integer rounding cuts from single model rows.
//!
//! A row `sum a_j x_j <= b` is brought to `sum g_j y_j <= beta` with
//! `y_j >= 0` by complementing every variable at the bound nearer to
//! the relaxation optimum.  Continuous terms with positive coefficient
//! are dropped, the negative ones form the slack `s`, and for a scale
//! `delta` the MIR inequality
//!
//! ```text
//! sum_int (floor(g_j/delta) + max(0, f_j - f0)/(1 - f0)) y_j
//!     - s/(delta (1 - f0)) <= floor(beta/delta)
//! ```
//!
//! is valid, where `f0` and `f_j` are the fractional parts of
//! `beta/delta` and `g_j/delta`.

use super::{Cut, CutContext};

// fractional parts of the right hand side outside this range give weak
// cuts
const MIN_FRAC: f64 = 0.05;
const MAX_FRAC: f64 = 0.95;

#[derive(Clone, Copy)]
struct Term {
    col: usize,
    g: f64,
    bound: f64,
    // complemented at the upper bound
    upper: bool,
    int: bool,
}

pub(super) fn generate(ctx: &CutContext) -> Vec<Cut> {
    let xs = ctx.xs();
    let mut cuts = Vec::new();
    for (row, b) in ctx.le_rows() {
        if !row.iter().any(|&(j, _)| ctx.is_integer_var(ctx.lp.m + j)) {
            continue;
        }
        let (terms, beta) = match complement(ctx, &row, b) {
            Some(t) => t,
            None => continue,
        };

        // candidate scales: 1 and the integer coefficients
        let mut deltas = vec![1.0];
        deltas.extend(terms.iter().filter(|t| t.int && t.g.abs() > 1e-9).map(|t| t.g.abs()));

        let best = deltas
            .into_iter()
            .filter_map(|delta| mir_cut(&terms, beta, delta))
            .map(|cut| (cut.violation(xs), cut))
            .fold(None, |acc: Option<(f64, Cut)>, (v, cut)| match acc {
                Some((best, _)) if best >= v => acc,
                _ => Some((v, cut)),
            });
        if let Some((v, cut)) = best {
            if v > 0.0 {
                cuts.push(cut);
            }
        }
    }
    cuts
}

fn complement(ctx: &CutContext, row: &[(usize, f64)], b: f64) -> Option<(Vec<Term>, f64)> {
    let xs = ctx.xs();
    let mut beta = b;
    let mut terms = Vec::with_capacity(row.len());
    for &(j, a) in row {
        let (lb, ub) = ctx.col_bounds(j);
        let upper = match (lb, ub) {
            (Some(l), Some(u)) => (u - xs[j]) < (xs[j] - l),
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => return None,
        };
        // a x = a l + a y  or  a u - a y
        let (bound, g) = if upper { (ub?, -a) } else { (lb?, a) };
        beta -= a * bound;
        terms.push(Term {
            col: j,
            g,
            bound,
            upper,
            int: ctx.is_integer_var(ctx.lp.m + j),
        });
    }
    Some((terms, beta))
}

fn mir_cut(terms: &[Term], beta: f64, delta: f64) -> Option<Cut> {
    let bd = beta / delta;
    let f0 = bd - bd.floor();
    if !(MIN_FRAC..=MAX_FRAC).contains(&f0) {
        return None;
    }
    // sum h_j y_j <= rhs in the complemented variables
    let mut h: Vec<(Term, f64)> = Vec::with_capacity(terms.len());
    for t in terms {
        let gd = t.g / delta;
        let coef = if t.int {
            let fj = gd - gd.floor();
            gd.floor() + (fj - f0).max(0.0) / (1.0 - f0)
        } else if t.g < 0.0 {
            gd / (1.0 - f0)
        } else {
            continue;
        };
        if coef != 0.0 {
            h.push((*t, coef));
        }
    }

    // back to x:  h y = h x - h l  or  h u - h x
    let mut rhs = bd.floor();
    let mut coefs = Vec::with_capacity(h.len());
    for (t, c) in h {
        if t.upper {
            coefs.push((t.col, -c));
            rhs -= c * t.bound;
        } else {
            coefs.push((t.col, c));
            rhs += c * t.bound;
        }
    }
    if coefs.is_empty() {
        return None;
    }
    coefs.sort_by_key(|e| e.0);
    Some(Cut {
        coefs,
        lb: None,
        ub: Some(rhs),
    })
}

#[test]
fn test_mir_cuts() {
    use super::test_support::*;
    use crate::engine::control::SimplexControl;

    // maximize 2x + 1.5y - 0.1z  s.t.  2x + y <= 5.5 + 0.5z,
    // x in 0..4 integer, y in 0..1 integer, z in 0..1
    // the optimum x = 2.5, y = z = 1 violates x + y <= 3
    let lp = make_lp(
        &[(vec![(0, 2.), (1, 1.), (2, -0.5)], None, Some(5.5))],
        &[(Some(0.), Some(4.), 2.), (Some(0.), Some(1.), 1.5), (Some(0.), Some(1.), -0.1)],
    );
    let out = solve(&lp);
    let is_int = [true, true, false];
    let ctrl = SimplexControl::default();
    let ctx = CutContext::new(&lp, 1, &is_int, &out, &ctrl);

    let cuts = generate(&ctx);
    assert!(!cuts.is_empty());
    for cut in &cuts {
        assert!(cut.violation(ctx.xs()) > 1e-6);
        assert!(cut_is_valid(&lp, cut, 4));
    }
}

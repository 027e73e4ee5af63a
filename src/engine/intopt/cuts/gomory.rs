//! Gomory mixed integer cuts from rows of the optimal tableau.

use super::{Cut, CutContext};
use crate::engine::simplex::Simplex;
use crate::problem::VarStat;

// basic integer values closer than this to an integer are skipped
const MIN_FRAC: f64 = 0.01;
// rows per round
const MAX_CUTS: usize = 50;
// largest coefficient ratio of an accepted cut
const MAX_DYNAMISM: f64 = 1e8;

pub(super) fn generate(ctx: &CutContext) -> Vec<Cut> {
    let (lp, out) = (ctx.lp, ctx.out);
    let spx = match Simplex::new(lp, out.stat.clone(), ctx.ctrl) {
        Ok(spx) => spx,
        Err(_) => return Vec::new(),
    };
    let m = lp.m;

    let mut cuts = Vec::new();
    let mut r = 0;
    for k in 0..m + lp.n {
        if !out.stat[k].is_basic() {
            continue;
        }
        let pos = r;
        r += 1;
        if !ctx.is_integer_var(k) {
            continue;
        }
        let f0 = out.x[k] - out.x[k].floor();
        if !(MIN_FRAC..=1.0 - MIN_FRAC).contains(&f0) {
            continue;
        }
        if let Some(cut) = gmi_cut(ctx, &spx.tableau_row(pos), f0) {
            cuts.push(cut);
            if cuts.len() == MAX_CUTS {
                break;
            }
        }
    }
    cuts
}

// Cut from the tableau row `row` of a basic integer variable with
// fractional part `f0`.
fn gmi_cut(ctx: &CutContext, row: &[f64], f0: f64) -> Option<Cut> {
    let (lp, out) = (ctx.lp, ctx.out);
    let m = lp.m;
    let eps = ctx.ctrl.tol_piv;

    // x_B + sum abar_k t_k = x_B* with t_k >= 0 the distance of
    // nonbasic k from its bound; the cut is sum pi_k t_k >= 1
    let mut sigma = vec![0.0; m + lp.n];
    let mut rhs = 1.0;
    for (k, &a) in row.iter().enumerate() {
        if a.abs() <= eps {
            continue;
        }
        // the row reads x_B + sum a_k z_k = 0
        let (abar, bound, upper) = match out.stat[k] {
            VarStat::AtLower => (a, lp.lb[k]?, false),
            VarStat::AtUpper => (-a, lp.ub[k]?, true),
            VarStat::Fixed | VarStat::Basic => continue,
            VarStat::Free => return None,
        };
        let pi = if ctx.is_integer_var(k) {
            let fk = abar - abar.floor();
            if fk <= f0 {
                fk / f0
            } else {
                (1.0 - fk) / (1.0 - f0)
            }
        } else if abar >= 0.0 {
            abar / f0
        } else {
            -abar / (1.0 - f0)
        };
        // t_k = x_k - l_k or u_k - x_k
        let s = if upper { -pi } else { pi };
        sigma[k] += s;
        rhs += s * bound;
    }

    // substitute the auxiliary variables
    let mut coefs = vec![0.0; lp.n];
    for (j, c) in coefs.iter_mut().enumerate() {
        *c = sigma[m + j];
    }
    for (i, &s) in sigma[..m].iter().enumerate() {
        if s != 0.0 {
            for &(j, a) in ctx.row(i) {
                coefs[j] += s * a;
            }
        }
    }

    let coefs: Vec<(usize, f64)> = coefs
        .into_iter()
        .enumerate()
        .filter(|(_, c)| c.abs() > 1e-12)
        .collect();
    let big = coefs.iter().map(|e| e.1.abs()).fold(0.0, f64::max);
    let small = coefs.iter().map(|e| e.1.abs()).fold(f64::INFINITY, f64::min);
    if coefs.is_empty() || big / small > MAX_DYNAMISM {
        return None;
    }
    Some(Cut {
        coefs,
        lb: Some(rhs),
        ub: None,
    })
}

#[test]
fn test_gomory_cuts() {
    use super::test_support::*;
    use crate::engine::control::SimplexControl;

    // maximize x + y  s.t.  2x + 2y <= 3,  -2x + 2y <= 1,  x, y in 0..3 integer
    let lp = make_lp(
        &[
            (vec![(0, 2.), (1, 2.)], None, Some(3.)),
            (vec![(0, -2.), (1, 2.)], None, Some(1.)),
        ],
        &[(Some(0.), Some(3.), 1.), (Some(0.), Some(3.), 1.)],
    );
    let out = solve(&lp);
    let is_int = [true, true];
    let ctrl = SimplexControl::default();
    let ctx = CutContext::new(&lp, 2, &is_int, &out, &ctrl);

    let cuts = generate(&ctx);
    assert!(!cuts.is_empty());
    for cut in &cuts {
        assert!(cut.violation(ctx.xs()) > 1e-6);
        assert!(cut_is_valid(&lp, cut, 3));
    }
}

#[test]
fn test_gomory_single_row() {
    use super::test_support::*;
    use crate::engine::control::SimplexControl;

    // maximize 7x  s.t.  6x <= 2,  x in 0..3 integer; the only integer
    // point is x = 0 and the cut must keep it
    let lp = make_lp(&[(vec![(0, 6.)], None, Some(2.))], &[(Some(0.), Some(3.), 7.)]);
    let out = solve(&lp);
    let is_int = [true];
    let ctrl = SimplexControl::default();
    let ctx = CutContext::new(&lp, 1, &is_int, &out, &ctrl);

    let cuts = generate(&ctx);
    assert_eq!(cuts.len(), 1);
    let cut = &cuts[0];
    assert!(cut.violation(ctx.xs()) > 1e-6);
    assert!(cut.violation(&[0.0]) <= 1e-9);
    assert!(cut_is_valid(&lp, cut, 3));
}

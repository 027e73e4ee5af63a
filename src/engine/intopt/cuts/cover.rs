//! Lifted-free cover cuts for knapsack rows over binary columns.

use super::{Cut, CutContext};

pub(super) fn generate(ctx: &CutContext) -> Vec<Cut> {
    let xs = ctx.xs();
    let mut cuts = Vec::new();
    for (row, b) in ctx.le_rows() {
        if row.is_empty() || !row.iter().all(|&(j, _)| ctx.is_binary(j)) {
            continue;
        }
        // complement negative coefficients: a x = a - a (1 - x)
        let mut cap = b;
        let mut items: Vec<(usize, f64, bool)> = Vec::with_capacity(row.len());
        for &(j, a) in &row {
            if a < 0.0 {
                cap -= a;
                items.push((j, -a, true));
            } else if a > 0.0 {
                items.push((j, a, false));
            }
        }
        if cap < 0.0 {
            continue;
        }
        if let Some(cut) = cover_cut(&items, cap, xs) {
            cuts.push(cut);
        }
    }
    cuts
}

// Greedy cover for sum a_j z_j <= cap, where z_j is x_j or 1 - x_j:
// items with large relaxation value per unit of weight first.
fn cover_cut(items: &[(usize, f64, bool)], cap: f64, xs: &[f64]) -> Option<Cut> {
    let value = |&(j, _, compl): &(usize, f64, bool)| if compl { 1.0 - xs[j] } else { xs[j] };
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&p, &q| {
        let kp = (1.0 - value(&items[p])) / items[p].1;
        let kq = (1.0 - value(&items[q])) / items[q].1;
        kp.total_cmp(&kq)
    });

    let mut weight = 0.0;
    let mut cover = Vec::new();
    for p in order {
        cover.push(items[p]);
        weight += items[p].1;
        if weight > cap + 1e-9 {
            break;
        }
    }
    if weight <= cap + 1e-9 {
        return None;
    }

    // sum_C z_j <= |C| - 1
    let mut rhs = cover.len() as f64 - 1.0;
    let mut coefs: Vec<(usize, f64)> = Vec::with_capacity(cover.len());
    for &(j, _, compl) in &cover {
        if compl {
            coefs.push((j, -1.0));
            rhs -= 1.0;
        } else {
            coefs.push((j, 1.0));
        }
    }
    coefs.sort_by_key(|e| e.0);
    Some(Cut {
        coefs,
        lb: None,
        ub: Some(rhs),
    })
}

#[test]
fn test_cover_cuts() {
    use super::test_support::*;
    use crate::engine::control::SimplexControl;

    // maximize 5x0 + 4x1 + 3x2  s.t.  2x0 + 2x1 + 2x2 <= 5, binaries
    let lp = make_lp(
        &[(vec![(0, 2.), (1, 2.), (2, 2.)], None, Some(5.))],
        &[(Some(0.), Some(1.), 5.), (Some(0.), Some(1.), 4.), (Some(0.), Some(1.), 3.)],
    );
    let out = solve(&lp);
    let is_int = [true; 3];
    let ctrl = SimplexControl::default();
    let ctx = CutContext::new(&lp, 1, &is_int, &out, &ctrl);

    let cuts = generate(&ctx);
    assert_eq!(cuts.len(), 1);
    assert_eq!(cuts[0].coefs, vec![(0, 1.), (1, 1.), (2, 1.)]);
    assert_eq!(cuts[0].ub, Some(2.));
    assert!(cut_is_valid(&lp, &cuts[0], 1));
}

//! Clique cuts from the conflict graph of binary columns.
//!
//! Two binaries conflict if some row with nonnegative coefficients on
//! binaries only can't hold both of them at one.  A clique `Q` of the
//! conflict graph gives `sum_Q x_j <= 1`.

use super::{Cut, CutContext};
use std::collections::{BTreeSet, HashSet};

pub(super) fn generate(ctx: &CutContext) -> Vec<Cut> {
    let n = ctx.lp.n;
    let xs = ctx.xs();
    let mut adj: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); n];

    for (row, b) in ctx.le_rows() {
        if row.len() < 2 || !row.iter().all(|&(j, a)| ctx.is_binary(j) && a >= 0.0) {
            continue;
        }
        for (p, &(j, aj)) in row.iter().enumerate() {
            for &(k, ak) in &row[p + 1..] {
                if aj + ak > b + 1e-9 {
                    adj[j].insert(k);
                    adj[k].insert(j);
                }
            }
        }
    }

    // greedy cliques grown from every fractional seed
    let mut order: Vec<usize> = (0..n).filter(|&j| !adj[j].is_empty() && xs[j] > 1e-6).collect();
    order.sort_by(|&p, &q| xs[q].total_cmp(&xs[p]));

    let mut seen: HashSet<Vec<usize>> = HashSet::new();
    let mut cuts = Vec::new();
    for &seed in &order {
        let mut clique = vec![seed];
        for &j in &order {
            if j != seed && clique.iter().all(|q| adj[j].contains(q)) {
                clique.push(j);
            }
        }
        let weight: f64 = clique.iter().map(|&j| xs[j]).sum();
        if clique.len() < 2 || weight <= 1.0 + 1e-6 {
            continue;
        }
        clique.sort_unstable();
        if seen.insert(clique.clone()) {
            cuts.push(Cut {
                coefs: clique.into_iter().map(|j| (j, 1.0)).collect(),
                lb: None,
                ub: Some(1.0),
            });
        }
    }
    cuts
}

#[test]
fn test_clique_cuts() {
    use super::test_support::*;
    use crate::engine::control::SimplexControl;

    // maximize x0 + x1 + x2  s.t.  pairwise x_j + x_k <= 1, binaries
    let lp = make_lp(
        &[
            (vec![(0, 1.), (1, 1.)], None, Some(1.)),
            (vec![(1, 1.), (2, 1.)], None, Some(1.)),
            (vec![(0, 1.), (2, 1.)], None, Some(1.)),
        ],
        &[(Some(0.), Some(1.), 1.), (Some(0.), Some(1.), 1.), (Some(0.), Some(1.), 1.)],
    );
    let out = solve(&lp);
    let is_int = [true; 3];
    let ctrl = SimplexControl::default();
    let ctx = CutContext::new(&lp, 3, &is_int, &out, &ctrl);

    // the relaxation optimum is x = 1/2
    let cuts = generate(&ctx);
    assert_eq!(cuts.len(), 1);
    assert_eq!(cuts[0].coefs, vec![(0, 1.), (1, 1.), (2, 1.)]);
    assert!(cut_is_valid(&lp, &cuts[0], 1));
}

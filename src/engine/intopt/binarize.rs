//! Binary expansion of bounded general integer columns.
//!
//! A column `l <= x <= u` with integer bounds and `u - l >= 2` gets `t`
//! binary columns `b_k` and the row `x - sum 2^k b_k = l`, after which
//! `x` itself no longer needs to be branched on.

use crate::engine::lp::LpData;

// columns with wider ranges are kept as they are
const MAX_BITS: u32 = 31;

/// Expand the integer columns flagged in `is_int`.  Returns the number
/// of expanded columns; `lp` and `is_int` are extended in place.
pub(crate) fn binarize(lp: &mut LpData<f64>, is_int: &mut Vec<bool>) -> usize {
    let n0 = lp.n;
    let mut links: Vec<(usize, f64, Vec<usize>)> = Vec::new();

    for j in 0..n0 {
        if !is_int[j] {
            continue;
        }
        let k = lp.m + j;
        let (l, u) = match (lp.lb[k], lp.ub[k]) {
            (Some(l), Some(u)) => (l, u),
            _ => continue,
        };
        let range = u - l;
        if range < 2.0 || range >= f64::powi(2.0, MAX_BITS as i32) {
            continue;
        }
        let bits = (range + 1.0).log2().ceil() as u32;

        let mut cols = Vec::with_capacity(bits as usize);
        for _ in 0..bits {
            cols.push(lp.n);
            lp.A.push(Vec::new());
            lp.lb.push(Some(0.0));
            lp.ub.push(Some(1.0));
            lp.c.push(0.0);
            is_int.push(true);
            lp.n += 1;
        }
        is_int[j] = false;
        links.push((j, l, cols));
    }

    for (j, l, cols) in &links {
        let mut entries = vec![(*j, 1.0)];
        entries.extend(cols.iter().enumerate().map(|(b, &c)| (c, -f64::powi(2.0, b as i32))));
        lp.add_row(&entries, Some(*l), Some(*l));
    }
    links.len()
}

#[test]
fn test_binarize() {
    use crate::problem::ObjDir;

    // x in 1..6 (integer), y in 0..1 (binary), z continuous
    let mut lp = LpData {
        m: 0,
        n: 3,
        A: vec![vec![]; 3],
        lb: vec![Some(1.), Some(0.), Some(0.)],
        ub: vec![Some(6.), Some(1.), None],
        c: vec![1., 1., 1.],
        c0: 0.,
        dir: ObjDir::Minimize,
    };
    let mut is_int = vec![true, true, false];

    assert_eq!(binarize(&mut lp, &mut is_int), 1);
    // range 5 needs 3 bits
    assert_eq!((lp.m, lp.n), (1, 6));
    assert_eq!(is_int, vec![false, true, false, true, true, true]);
    assert_eq!(lp.lb[0], Some(1.));
    assert_eq!(lp.ub[0], Some(1.));
    assert_eq!(lp.A[0], vec![(0, 1.)]);
    assert_eq!(lp.A[5], vec![(0, -4.)]);
    assert_eq!(lp.c, vec![0., 1., 1., 1., 0., 0., 0.]);
}

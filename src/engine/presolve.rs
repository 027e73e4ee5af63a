//! LP presolve for the floating point simplex.
//!
//! The presolver removes free rows, empty rows, row singletons (turned
//! into column bounds), fixed columns and empty columns.  The reduced LP
//! is solved from the standard basis and its final basis is mapped back
//! to the original LP, which is then solved from that warm start.

#![allow(non_snake_case)]

use super::control::SimplexReturn;
use super::lp::LpData;
use crate::problem::VarStat;

#[derive(Debug, Clone)]
enum RowFate {
    Free,
    Empty,
    // the row bounds were moved onto column `col`; the flags record
    // which column bounds came from this row
    Singleton {
        col: usize,
        a: f64,
        lb_from_row: bool,
        ub_from_row: bool,
    },
}

/// A reduced LP and the information needed to recover a basis of the
/// original LP from a basis of the reduced one.
#[derive(Debug)]
pub(crate) struct Presolved {
    pub lp: LpData<f64>,
    m: usize,
    n: usize,
    row_map: Vec<usize>,
    col_map: Vec<usize>,
    rows: Vec<(usize, RowFate)>,
    cols: Vec<(usize, VarStat)>,
}

impl Presolved {
    pub fn removed_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn removed_cols(&self) -> usize {
        self.cols.len()
    }

    /// Map basis statuses of the reduced LP to the original LP.
    pub fn recover_basis(&self, orig: &LpData<f64>, red_stat: &[VarStat]) -> Vec<VarStat> {
        let (m, mr) = (self.m, self.row_map.len());
        let mut stat = vec![VarStat::Basic; m + self.n];

        for (ri, &i) in self.row_map.iter().enumerate() {
            stat[i] = red_stat[ri];
        }
        for (rj, &j) in self.col_map.iter().enumerate() {
            stat[m + j] = red_stat[mr + rj];
        }
        for &(j, s) in &self.cols {
            stat[m + j] = s;
        }

        for (i, fate) in self.rows.iter().rev() {
            stat[*i] = VarStat::Basic;
            if let RowFate::Singleton {
                col,
                a,
                lb_from_row,
                ub_from_row,
            } = *fate
            {
                let k = m + col;
                let at_lower = match stat[k] {
                    VarStat::AtLower => lb_from_row,
                    VarStat::Fixed => lb_from_row,
                    _ => false,
                };
                let at_upper = match stat[k] {
                    VarStat::AtUpper | VarStat::Fixed => ub_from_row && !at_lower,
                    _ => false,
                };
                if at_lower || at_upper {
                    // the column sits on a bound implied by the row, so
                    // the row is the one that is tight
                    stat[k] = VarStat::Basic;
                    let row_at_upper = (a > 0.0) == at_upper;
                    stat[*i] = if row_at_upper {
                        VarStat::AtUpper
                    } else {
                        VarStat::AtLower
                    };
                }
            }
        }

        for (k, s) in stat.iter_mut().enumerate() {
            if !s.is_basic() {
                *s = orig.nonbasic_stat(k, *s);
            }
        }
        stat
    }
}

// feasibility tolerance around a bound
fn tol_at(tol: f64, b: f64) -> f64 {
    tol * (1.0 + b.abs())
}

/// Reduce `lp`.  Detects primal infeasibility of an empty or singleton
/// row and dual infeasibility of an empty column.
pub(crate) fn presolve(lp: &LpData<f64>, tol: f64) -> Result<Presolved, SimplexReturn> {
    let (m, n) = (lp.m, lp.n);
    let mut lb = lp.lb.clone();
    let mut ub = lp.ub.clone();
    let mut row_active = vec![true; m];
    let mut col_active = vec![true; n];

    let mut row_cols: Vec<Vec<(usize, f64)>> = vec![Vec::new(); m];
    for (j, col) in lp.A.iter().enumerate() {
        for &(i, a) in col {
            row_cols[i].push((j, a));
        }
    }

    let mut rows: Vec<(usize, RowFate)> = Vec::new();
    let mut cols: Vec<(usize, VarStat)> = Vec::new();

    let mut changed = true;
    while changed {
        changed = false;

        for i in 0..m {
            if !row_active[i] {
                continue;
            }
            let live: Vec<(usize, f64)> = row_cols[i]
                .iter()
                .copied()
                .filter(|&(j, _)| col_active[j])
                .collect();

            let fate = if lb[i].is_none() && ub[i].is_none() {
                RowFate::Free
            } else if live.is_empty() {
                let lo_ok = lb[i].map_or(true, |l| l <= tol_at(tol, l));
                let up_ok = ub[i].map_or(true, |u| u >= -tol_at(tol, u));
                if !(lo_ok && up_ok) {
                    return Err(SimplexReturn::NoPrimalFeasible);
                }
                RowFate::Empty
            } else if live.len() == 1 {
                let (j, a) = live[0];
                let k = m + j;
                let (mut lo, mut up) = (lb[i].map(|v| v / a), ub[i].map(|v| v / a));
                if a < 0.0 {
                    std::mem::swap(&mut lo, &mut up);
                }
                let lb_from_row = match (lo, lb[k]) {
                    (Some(l), Some(cl)) => l > cl,
                    (Some(_), None) => true,
                    _ => false,
                };
                let ub_from_row = match (up, ub[k]) {
                    (Some(u), Some(cu)) => u < cu,
                    (Some(_), None) => true,
                    _ => false,
                };
                if lb_from_row {
                    lb[k] = lo;
                }
                if ub_from_row {
                    ub[k] = up;
                }
                if let (Some(l), Some(u)) = (lb[k], ub[k]) {
                    if l > u + tol_at(tol, u) {
                        return Err(SimplexReturn::NoPrimalFeasible);
                    }
                    if l > u {
                        // equal within tolerance
                        if lb_from_row {
                            lb[k] = Some(u);
                        } else {
                            ub[k] = Some(l);
                        }
                    }
                }
                RowFate::Singleton {
                    col: j,
                    a,
                    lb_from_row,
                    ub_from_row,
                }
            } else {
                continue;
            };
            row_active[i] = false;
            rows.push((i, fate));
            changed = true;
        }

        for j in 0..n {
            if !col_active[j] {
                continue;
            }
            let k = m + j;
            if let (Some(l), Some(u)) = (lb[k], ub[k]) {
                if l == u {
                    for &(i, a) in &lp.A[j] {
                        if row_active[i] {
                            lb[i] = lb[i].map(|b| b - a * l);
                            ub[i] = ub[i].map(|b| b - a * l);
                        }
                    }
                    col_active[j] = false;
                    cols.push((j, VarStat::Fixed));
                    changed = true;
                    continue;
                }
            }
            let empty = lp.A[j].iter().all(|&(i, _)| !row_active[i]);
            if empty {
                let c = lp.c[k];
                let s = if c > 0.0 {
                    lb[k].ok_or(SimplexReturn::NoDualFeasible).map(|_| VarStat::AtLower)?
                } else if c < 0.0 {
                    ub[k].ok_or(SimplexReturn::NoDualFeasible).map(|_| VarStat::AtUpper)?
                } else if lb[k].is_some() {
                    VarStat::AtLower
                } else if ub[k].is_some() {
                    VarStat::AtUpper
                } else {
                    VarStat::Free
                };
                col_active[j] = false;
                cols.push((j, s));
                changed = true;
            }
        }
    }

    // assemble the reduced LP
    let row_map: Vec<usize> = (0..m).filter(|&i| row_active[i]).collect();
    let col_map: Vec<usize> = (0..n).filter(|&j| col_active[j]).collect();
    let mut new_row = vec![usize::MAX; m];
    for (ri, &i) in row_map.iter().enumerate() {
        new_row[i] = ri;
    }

    let keep = row_map.iter().copied().chain(col_map.iter().map(|&j| m + j));
    let (mut rlb, mut rub, mut rc) = (Vec::new(), Vec::new(), Vec::new());
    for k in keep {
        rlb.push(lb[k]);
        rub.push(ub[k]);
        rc.push(lp.c[k]);
    }
    let A = col_map
        .iter()
        .map(|&j| {
            lp.A[j]
                .iter()
                .filter(|&&(i, _)| row_active[i])
                .map(|&(i, a)| (new_row[i], a))
                .collect()
        })
        .collect();

    let reduced = LpData {
        m: row_map.len(),
        n: col_map.len(),
        A,
        lb: rlb,
        ub: rub,
        c: rc,
        c0: 0.0,
        dir: lp.dir,
    };

    Ok(Presolved {
        lp: reduced,
        m,
        n,
        row_map,
        col_map,
        rows,
        cols,
    })
}

#[cfg(test)]
fn test_lp(
    rows: &[(Vec<(usize, f64)>, Option<f64>, Option<f64>)],
    cols: &[(Option<f64>, Option<f64>, f64)],
) -> LpData<f64> {
    use crate::problem::ObjDir;
    let m = rows.len();
    let mut A = vec![Vec::new(); cols.len()];
    for (i, (entries, _, _)) in rows.iter().enumerate() {
        for &(j, a) in entries.iter() {
            A[j].push((i, a));
        }
    }
    let mut c = vec![0.0; m];
    c.extend(cols.iter().map(|c| c.2));
    LpData {
        m,
        n: cols.len(),
        A,
        lb: rows.iter().map(|r| r.1).chain(cols.iter().map(|c| c.0)).collect(),
        ub: rows.iter().map(|r| r.2).chain(cols.iter().map(|c| c.1)).collect(),
        c,
        c0: 0.0,
        dir: ObjDir::Minimize,
    }
}

#[test]
fn test_presolve_reductions() {
    // row 0: free, row 1: x0 >= 2 (singleton), row 2: x0 + x1 <= 4
    // x1 fixed at 1
    let lp = test_lp(
        &[
            (vec![(0, 1.), (1, 1.)], None, None),
            (vec![(0, 1.)], Some(2.), None),
            (vec![(0, 1.), (1, 1.)], None, Some(4.)),
        ],
        &[(Some(0.), Some(10.), 1.), (Some(1.), Some(1.), 0.)],
    );
    let pre = presolve(&lp, 1e-9).unwrap();
    assert_eq!(pre.removed_cols(), 2);
    assert_eq!(pre.removed_rows(), 3);
    assert_eq!((pre.lp.m, pre.lp.n), (0, 0));

    // x0 sits at its row implied lower bound, so row 1 is tight
    let stat = pre.recover_basis(&lp, &[]);
    assert_eq!(stat[1], VarStat::AtLower);
    assert_eq!(stat[3], VarStat::Basic);
    assert_eq!(stat[4], VarStat::Fixed);
    assert_eq!(stat.iter().filter(|s| s.is_basic()).count(), 3);
}

#[test]
fn test_presolve_infeasible() {
    // empty row requiring 1 <= 0
    let lp = test_lp(&[(vec![], Some(1.), None)], &[]);
    assert_eq!(presolve(&lp, 1e-9).err(), Some(SimplexReturn::NoPrimalFeasible));

    // singleton 2 <= x <= 3 with x in 0..1
    let lp = test_lp(&[(vec![(0, 1.)], Some(2.), Some(3.))], &[(Some(0.), Some(1.), 0.)]);
    assert_eq!(presolve(&lp, 1e-9).err(), Some(SimplexReturn::NoPrimalFeasible));

    // empty column with negative cost and no upper bound
    let lp = test_lp(&[], &[(Some(0.), None, -1.)]);
    assert_eq!(presolve(&lp, 1e-9).err(), Some(SimplexReturn::NoDualFeasible));
}

//! Branching: choice of the fractional variable to split on.

use crate::engine::control::SimplexControl;
use crate::engine::lp::LpData;
use crate::engine::simplex::{Outcome, Simplex};
use crate::params::BranchRule;
use crate::problem::VarStat;
use enum_dispatch::enum_dispatch;

/// An integer column with a fractional value in the current relaxation.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    /// structural column index
    pub col: usize,
    pub value: f64,
    /// `value - floor(value)`
    pub frac: f64,
    /// estimated objective degradation of the down and up branch
    pub dn: f64,
    pub up: f64,
}

#[enum_dispatch]
pub(crate) trait Branching {
    /// true if the rule uses the degradation estimates
    fn needs_degradation(&self) -> bool {
        false
    }

    /// Index of the chosen candidate and whether its down branch is
    /// explored first.
    fn select(&self, cands: &[Candidate]) -> (usize, bool);
}

pub(crate) struct FirstFractional;
pub(crate) struct LastFractional;
pub(crate) struct MostFractional;
pub(crate) struct DriebeckTomlin;

// explore towards the nearer integer first
fn nearer_down(c: &Candidate) -> bool {
    c.frac < 0.5
}

impl Branching for FirstFractional {
    fn select(&self, cands: &[Candidate]) -> (usize, bool) {
        (0, nearer_down(&cands[0]))
    }
}

impl Branching for LastFractional {
    fn select(&self, cands: &[Candidate]) -> (usize, bool) {
        let i = cands.len() - 1;
        (i, nearer_down(&cands[i]))
    }
}

impl Branching for MostFractional {
    fn select(&self, cands: &[Candidate]) -> (usize, bool) {
        let dist = |c: &Candidate| (c.frac - 0.5).abs();
        let mut best = 0;
        for (i, c) in cands.iter().enumerate() {
            if dist(c) < dist(&cands[best]) {
                best = i;
            }
        }
        (best, nearer_down(&cands[best]))
    }
}

impl Branching for DriebeckTomlin {
    fn needs_degradation(&self) -> bool {
        true
    }

    // the variable whose worse branch degrades the objective most; the
    // better branch is explored first
    fn select(&self, cands: &[Candidate]) -> (usize, bool) {
        let score = |c: &Candidate| c.dn.max(c.up);
        let mut best = 0;
        for (i, c) in cands.iter().enumerate() {
            if score(c) > score(&cands[best]) {
                best = i;
            }
        }
        let c = &cands[best];
        if c.dn == c.up {
            (best, nearer_down(c))
        } else {
            (best, c.dn < c.up)
        }
    }
}

#[enum_dispatch(Branching)]
pub(crate) enum Brancher {
    FirstFractional,
    LastFractional,
    MostFractional,
    DriebeckTomlin,
}

impl From<BranchRule> for Brancher {
    fn from(rule: BranchRule) -> Self {
        match rule {
            BranchRule::FirstFractional => FirstFractional.into(),
            BranchRule::LastFractional => LastFractional.into(),
            BranchRule::MostFractional => MostFractional.into(),
            BranchRule::DriebeckTomlin => DriebeckTomlin.into(),
        }
    }
}

/// Fill in the degradation estimates of the candidates from the final
/// basis of the relaxation `out`: one dual ratio test per branch on the
/// tableau row of the candidate.
pub(crate) fn estimate_degradation(lp: &LpData<f64>, out: &Outcome<f64>, ctrl: &SimplexControl, cands: &mut [Candidate]) {
    let spx = match Simplex::new(lp, out.stat.clone(), ctrl) {
        Ok(spx) => spx,
        Err(_) => return,
    };
    for c in cands.iter_mut() {
        let k = lp.m + c.col;
        // basis position of k
        let r = out.stat[..k].iter().filter(|s| s.is_basic()).count();
        let row = spx.tableau_row(r);

        // the basic variable moves by -row[q] per unit increase of x_q
        let mut dn = f64::INFINITY;
        let mut up = f64::INFINITY;
        for (q, a) in row.iter().enumerate() {
            if a.abs() <= ctrl.tol_piv {
                continue;
            }
            let (inc, dec) = match out.stat[q] {
                VarStat::AtLower => (true, false),
                VarStat::AtUpper => (false, true),
                VarStat::Free => (true, true),
                VarStat::Basic | VarStat::Fixed => continue,
            };
            let rate = out.d[q].abs() / a.abs();
            // increasing x_q lowers the basic variable if a > 0
            if (inc && *a > 0.0) || (dec && *a < 0.0) {
                dn = dn.min(rate * c.frac);
            }
            if (inc && *a < 0.0) || (dec && *a > 0.0) {
                up = up.min(rate * (1.0 - c.frac));
            }
        }
        c.dn = dn;
        c.up = up;
    }
}

#[test]
fn test_branch_rules() {
    let cand = |col, frac: f64, dn, up| Candidate {
        col,
        value: col as f64 + frac,
        frac,
        dn,
        up,
    };
    let cands = vec![cand(0, 0.2, 1.0, 3.0), cand(3, 0.45, 0.5, 0.5), cand(5, 0.9, 4.0, 0.1)];

    assert_eq!(Brancher::from(BranchRule::FirstFractional).select(&cands), (0, true));
    assert_eq!(Brancher::from(BranchRule::LastFractional).select(&cands), (2, false));
    assert_eq!(Brancher::from(BranchRule::MostFractional).select(&cands), (1, true));

    let dth = Brancher::from(BranchRule::DriebeckTomlin);
    assert!(dth.needs_degradation());
    assert_eq!(dth.select(&cands), (2, false));
}

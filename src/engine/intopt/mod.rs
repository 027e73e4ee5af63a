//! Branch-and-bound for mixed integer programs.
//!
//! The search starts from an optimal basis of the LP relaxation.  Node
//! relaxations are solved with the dual simplex method, warm started
//! from the final basis of the parent node.  Before branching the root
//! relaxation can be tightened with cutting planes, and bounded general
//! integer columns can be replaced by binary expansions.

#![allow(non_snake_case)]

mod backtrack;
mod binarize;
mod branch;
mod cuts;
mod node;

use backtrack::{NodeSelection, NodeSelector, SelectContext};
use branch::{estimate_degradation, Brancher, Branching, Candidate};
use node::Node;

use super::control::{IntoptControl, IntoptReturn, SimplexControl, SimplexReturn};
use super::lp::{problem_stat, LpData};
use super::progress::Progress;
use super::simplex::{solve_lp, Outcome};
use crate::params::{CutFlags, MsgLevel, SimplexMethod};
use crate::problem::{ObjDir, Problem, SolutionStatus, VarStat};

// rounds of cut generation at the root
const CUT_ROUNDS: usize = 5;

/// Statuses for `lp` from the statuses `stat` of an LP with `m0` rows
/// which `lp` extends by appending rows and columns.  New rows start
/// basic, new columns at their lower bound.
fn extend_stat(stat: &[VarStat], m0: usize, lp: &LpData<f64>) -> Vec<VarStat> {
    let n0 = stat.len() - m0;
    let mut out = Vec::with_capacity(lp.m + lp.n);
    out.extend_from_slice(&stat[..m0]);
    out.extend(std::iter::repeat(VarStat::Basic).take(lp.m - m0));
    out.extend_from_slice(&stat[m0..]);
    out.extend((n0..lp.n).map(|j| lp.nonbasic_stat(lp.m + j, VarStat::AtLower)));
    out
}

/// Sum of integer infeasibilities and the fractional candidates of `x`.
fn fractional(lp: &LpData<f64>, is_int: &[bool], x: &[f64], tol_int: f64) -> (f64, Vec<Candidate>) {
    let mut sum = 0.0;
    let mut cands = Vec::new();
    for (j, _) in is_int.iter().enumerate().filter(|e| *e.1) {
        let v = x[lp.m + j];
        let frac = v - v.floor();
        if frac.min(1.0 - frac) > tol_int {
            sum += frac.min(1.0 - frac);
            cands.push(Candidate {
                col: j,
                value: v,
                frac,
                dn: 0.0,
                up: 0.0,
            });
        }
    }
    (sum, cands)
}

struct Search<'a> {
    lp: LpData<f64>,
    is_int: Vec<bool>,
    ctrl: &'a IntoptControl,
    brancher: Brancher,
    selector: NodeSelector,
    nodes: Vec<Node>,
    next_id: usize,
    /// incumbent objective (minimization sense) and values of all m+n
    /// variables
    incumbent: Option<(f64, Vec<f64>)>,
    root_obj: f64,
    root_infeas: f64,
    iters: usize,
    solved: usize,
}

impl<'a> Search<'a> {
    fn new(lp: LpData<f64>, is_int: Vec<bool>, ctrl: &'a IntoptControl) -> Self {
        Self {
            lp,
            is_int,
            ctrl,
            brancher: ctrl.br_tech.into(),
            selector: ctrl.bt_tech.into(),
            nodes: Vec::new(),
            next_id: 0,
            incumbent: None,
            root_obj: f64::NEG_INFINITY,
            root_infeas: 0.0,
            iters: 0,
            solved: 0,
        }
    }

    // objective in the problem's own sense
    fn user_obj(&self, v: f64) -> f64 {
        match self.lp.dir {
            ObjDir::Minimize => self.lp.c0 + v,
            ObjDir::Maximize => self.lp.c0 - v,
        }
    }

    // a node whose relaxation is not better than the incumbent by more
    // than the relative tolerance can't improve it
    fn is_fathomed(&self, bound: f64) -> bool {
        match &self.incumbent {
            Some((inc, _)) => bound >= inc - self.ctrl.tol_obj * (1.0 + inc.abs()),
            None => false,
        }
    }

    fn best_bound(&self) -> Option<f64> {
        self.nodes.iter().map(|n| n.bound).reduce(f64::min)
    }

    // relative gap between the incumbent and the best active bound
    fn gap(&self) -> Option<f64> {
        let (inc, _) = self.incumbent.as_ref()?;
        let bound = self.best_bound()?;
        Some((inc - bound).abs() / (inc.abs() + f64::EPSILON))
    }

    fn push_root(&mut self, stat: Vec<VarStat>) {
        let root = Node {
            id: self.next_id,
            depth: 0,
            bound: f64::NEG_INFINITY,
            infeas: 0.0,
            lb: self.lp.lb.clone(),
            ub: self.lp.ub.clone(),
            stat,
        };
        self.next_id += 1;
        self.nodes.push(root);
    }

    fn node_control(&self) -> SimplexControl {
        let mut ctrl = self.ctrl.lp.clone();
        ctrl.meth = SimplexMethod::Dual;
        ctrl.presolve = false;
        // stop a node as soon as it can't beat the incumbent
        if let Some((inc, _)) = &self.incumbent {
            let lim = self.user_obj(*inc);
            match self.lp.dir {
                ObjDir::Minimize => ctrl.obj_ul = lim,
                ObjDir::Maximize => ctrl.obj_ll = lim,
            }
        }
        ctrl
    }

    fn display(&self, progress: &mut Progress, force: bool) {
        let rel = match self.lp.dir {
            ObjDir::Minimize => ">=",
            ObjDir::Maximize => "<=",
        };
        let bound = self
            .best_bound()
            .map(|b| format!("{:17.9e}", self.user_obj(b)))
            .unwrap_or_else(|| format!("{:>17}", "-"));
        let inc = match &self.incumbent {
            Some((v, _)) => format!("{:17.9e}", self.user_obj(*v)),
            None => format!("{:>17}", "not found yet"),
        };
        let gap = self
            .gap()
            .map(|g| format!("{:5.1}%", 100.0 * g))
            .unwrap_or_default();
        progress.status(
            self.solved,
            force,
            format_args!(
                "+{:>6}: mip = {} {} {} {} ({}; {})",
                self.iters,
                inc,
                rel,
                bound,
                gap,
                self.nodes.len(),
                self.solved
            ),
        );
    }

    fn run(&mut self, progress: &mut Progress) -> IntoptReturn {
        while !self.nodes.is_empty() {
            if progress.time_exceeded() {
                self.display(progress, true);
                progress.info(format_args!("TIME LIMIT EXCEEDED; SEARCH TERMINATED"));
                return IntoptReturn::TimeLimit;
            }
            if let Some(gap) = self.gap() {
                if self.ctrl.mip_gap > 0.0 && gap <= self.ctrl.mip_gap {
                    self.display(progress, true);
                    progress.info(format_args!("RELATIVE MIP GAP TOLERANCE REACHED; SEARCH TERMINATED"));
                    return IntoptReturn::MipGap;
                }
            }

            let ctx = SelectContext {
                incumbent: self.incumbent.as_ref().map(|inc| inc.0),
                root_obj: self.root_obj,
                root_infeas: self.root_infeas,
            };
            let idx = self.selector.select(&self.nodes, &ctx);
            let node = self.nodes.remove(idx);
            if self.is_fathomed(node.bound) {
                continue;
            }
            if let Err(ret) = self.solve_node(node, progress) {
                return ret;
            }
            self.display(progress, false);
        }
        self.display(progress, true);
        IntoptReturn::Ok
    }

    fn solve_node(&mut self, node: Node, progress: &mut Progress) -> Result<(), IntoptReturn> {
        let mut lp = self.lp.clone();
        lp.lb.clone_from(&node.lb);
        lp.ub.clone_from(&node.ub);
        let ctrl = self.node_control();

        let out = {
            let mut child = progress.child(MsgLevel::Error);
            match solve_lp(&lp, node.stat.clone(), &ctrl, &mut child) {
                Ok(out) => out,
                // the parent basis is unusable, start over
                Err(_) => solve_lp(&lp, lp.std_stat(), &ctrl, &mut child).map_err(|_| IntoptReturn::Fail)?,
            }
        };
        self.solved += 1;
        self.iters += out.iters;

        match out.ret {
            SimplexReturn::Ok => {}
            SimplexReturn::NoPrimalFeasible | SimplexReturn::ObjLowerLimit | SimplexReturn::ObjUpperLimit => {
                return Ok(())
            }
            SimplexReturn::TimeLimit => {
                progress.info(format_args!("TIME LIMIT EXCEEDED; SEARCH TERMINATED"));
                return Err(IntoptReturn::TimeLimit);
            }
            ret => {
                progress.error(format_args!("intopt: node {} relaxation failed ({:?})", node.id, ret));
                return Err(IntoptReturn::Fail);
            }
        }

        let obj = lp.cost(&out.x);
        if node.depth == 0 {
            self.root_obj = obj;
        }
        if self.is_fathomed(obj) {
            return Ok(());
        }

        let (infeas, mut cands) = fractional(&lp, &self.is_int, &out.x, self.ctrl.tol_int);
        if node.depth == 0 {
            self.root_infeas = infeas;
        }
        if cands.is_empty() {
            self.new_incumbent(&lp, obj, out.x);
            self.display(progress, true);
            return Ok(());
        }

        if self.brancher.needs_degradation() {
            estimate_degradation(&lp, &out, &ctrl, &mut cands);
        }
        let (c, down_first) = self.brancher.select(&cands);
        let cand = &cands[c];
        let k = lp.m + cand.col;
        tracing::trace!(node = node.id, col = cand.col, value = cand.value, "branching");

        let down = node.child(self.next_id, obj, infeas, &out.stat, k, (None, Some(cand.value.floor())));
        let up = node.child(self.next_id + 1, obj, infeas, &out.stat, k, (Some(cand.value.ceil()), None));
        self.next_id += 2;
        // the branch explored first goes last, on top of the stack
        if down_first {
            self.nodes.push(up);
            self.nodes.push(down);
        } else {
            self.nodes.push(down);
            self.nodes.push(up);
        }
        Ok(())
    }

    fn new_incumbent(&mut self, lp: &LpData<f64>, obj: f64, mut x: Vec<f64>) {
        for (j, _) in self.is_int.iter().enumerate().filter(|e| *e.1) {
            let v = &mut x[lp.m + j];
            *v = v.round();
        }
        tracing::debug!(obj = self.user_obj(obj), "new incumbent");
        self.incumbent = Some((obj, x));
        // active nodes that can no longer improve are dropped
        let inc = obj;
        let tol = self.ctrl.tol_obj * (1.0 + inc.abs());
        self.nodes.retain(|n| n.bound < inc - tol);
    }
}

/// Root relaxation of `lp` from the basis `stat`.
fn solve_root(
    lp: &LpData<f64>,
    stat: Vec<VarStat>,
    ctrl: &SimplexControl,
    progress: &mut Progress,
) -> Result<Outcome<f64>, IntoptReturn> {
    let out = match solve_lp(lp, stat, ctrl, progress) {
        Ok(out) => out,
        Err(_) => solve_lp(lp, lp.std_stat(), ctrl, progress).map_err(|_| IntoptReturn::Fail)?,
    };
    match out.ret {
        SimplexReturn::Ok => Ok(out),
        SimplexReturn::NoPrimalFeasible => Err(IntoptReturn::NoPrimalFeasible),
        SimplexReturn::NoDualFeasible => Err(IntoptReturn::NoDualFeasible),
        SimplexReturn::TimeLimit => Err(IntoptReturn::TimeLimit),
        _ => Err(IntoptReturn::Fail),
    }
}

// Tighten the root relaxation with rounds of cuts.  Returns the final
// root basis.
fn add_cuts(
    lp: &mut LpData<f64>,
    is_int: &[bool],
    mut out: Outcome<f64>,
    ctrl: &IntoptControl,
    progress: &mut Progress,
    iters: &mut usize,
) -> Vec<VarStat> {
    let flags = [
        (ctrl.cov_cuts, CutFlags::COVER),
        (ctrl.clq_cuts, CutFlags::CLIQUE),
        (ctrl.gmi_cuts, CutFlags::GOMORY),
        (ctrl.mir_cuts, CutFlags::MIR),
    ]
    .iter()
    .filter(|f| f.0)
    .fold(CutFlags::NONE, |acc, f| acc | f.1);
    if flags.is_empty() {
        return out.stat;
    }

    let model_rows = lp.m;
    let mut lp_ctrl = ctrl.lp.clone();
    lp_ctrl.meth = SimplexMethod::Dual;
    let mut total = 0;

    for _ in 0..CUT_ROUNDS {
        let new_cuts = {
            let ctx = cuts::CutContext::new(lp, model_rows, is_int, &out, &ctrl.lp);
            cuts::generate(&ctx, flags)
        };
        if new_cuts.is_empty() {
            break;
        }
        let m0 = lp.m;
        for cut in &new_cuts {
            lp.add_row(&cut.coefs, cut.lb, cut.ub);
        }
        total += new_cuts.len();

        let stat = extend_stat(&out.stat, m0, lp);
        let mut child = progress.child(MsgLevel::Error);
        match solve_lp(lp, stat.clone(), &lp_ctrl, &mut child) {
            Ok(next) if next.ret == SimplexReturn::Ok => {
                *iters += next.iters;
                out = next;
            }
            // leave the rest to the search
            _ => return stat,
        }
    }
    progress.info(format_args!("{} cuts added to the root relaxation", total));
    tracing::info!(cuts = total, "root relaxation tightened");
    out.stat
}

/// Solve the MIP `P` by branch-and-bound and store the integer
/// solution.
pub(crate) fn intopt(P: &mut Problem, ctrl: &IntoptControl) -> IntoptReturn {
    let (m, n) = (P.num_rows(), P.num_cols());
    let mut lp = LpData::<f64>::from_problem(P);
    let mut is_int: Vec<bool> = P.cols.iter().map(|c| c.kind.is_integer()).collect();
    let stat = problem_stat(P);
    let basic_optimal = P.basic.status() == SolutionStatus::Optimal;

    let mut iters = 0;
    let result = {
        let mut progress = Progress::new(&mut P.out, ctrl.msg_lev, ctrl.out_frq, ctrl.out_dly, ctrl.tm_lim);

        if lp.has_empty_bounds() {
            progress.error(format_args!("intopt: some double bounded variable has incorrect bounds"));
            return IntoptReturn::Bound;
        }
        let fractional_bound = (0..n).find(|&j| {
            let k = m + j;
            let integral = |v: Option<f64>| v.map_or(true, |v| v == v.floor());
            is_int[j] && !(integral(lp.lb[k]) && integral(lp.ub[k]))
        });
        if let Some(j) = fractional_bound {
            progress.error(format_args!("intopt: integer column {} has non-integer bound", j));
            return IntoptReturn::Bound;
        }
        if !ctrl.presolve && !basic_optimal {
            progress.error(format_args!("intopt: optimal basis to initial LP relaxation not provided"));
            return IntoptReturn::Root;
        }

        progress.info(format_args!(
            "Integer optimization begins: {} rows, {} columns, {} integer",
            m,
            n,
            is_int.iter().filter(|&&b| b).count()
        ));
        run_search(&mut lp, &mut is_int, stat, ctrl, &mut progress, &mut iters)
    };
    P.params.add_iterations(iters);

    let (ret, values) = match result {
        Ok(res) => res,
        Err(ret) => {
            P.mip.resize(m, n);
            if ret == IntoptReturn::NoPrimalFeasible {
                P.mip.status = SolutionStatus::NoFeasible;
            }
            return ret;
        }
    };

    P.mip.resize(m, n);
    P.mip.status = match (&values, ret) {
        (Some(_), IntoptReturn::Ok) => SolutionStatus::Optimal,
        (Some(_), _) => SolutionStatus::Feasible,
        (None, IntoptReturn::Ok) => SolutionStatus::NoFeasible,
        (None, _) => SolutionStatus::Undefined,
    };
    if let Some(mut x) = values {
        for (v, col) in x.iter_mut().zip(&P.cols) {
            if col.kind.is_integer() {
                *v = v.round();
            }
        }
        let row_val = P.eval_rows(&x);
        P.mip.obj = P.eval_obj(&x);
        P.mip.row_val = row_val;
        P.mip.col_val = x;
    }
    tracing::debug!(ret = ?ret, status = ?P.mip.status, "branch-and-bound finished");
    ret
}

// Root relaxation, preprocessing and tree search.  Returns the search
// outcome and the structural values of the incumbent.
fn run_search(
    lp: &mut LpData<f64>,
    is_int: &mut Vec<bool>,
    stat: Vec<VarStat>,
    ctrl: &IntoptControl,
    progress: &mut Progress,
    iters: &mut usize,
) -> Result<(IntoptReturn, Option<Vec<f64>>), IntoptReturn> {
    let n = lp.n;
    let root = {
        let lev = if ctrl.presolve { MsgLevel::All } else { MsgLevel::Error };
        let mut child = progress.child(lev);
        solve_root(lp, stat, &ctrl.lp, &mut child)
    };
    let root = match root {
        Ok(root) => root,
        Err(ret) => {
            match ret {
                IntoptReturn::NoPrimalFeasible => progress.info(format_args!("PROBLEM HAS NO PRIMAL FEASIBLE SOLUTION")),
                IntoptReturn::NoDualFeasible => progress.info(format_args!("LP RELAXATION HAS NO DUAL FEASIBLE SOLUTION")),
                _ => progress.error(format_args!("intopt: cannot solve LP relaxation")),
            }
            return Err(ret);
        }
    };
    *iters += root.iters;

    if !is_int.iter().any(|&b| b) {
        // nothing to branch on
        progress.info(format_args!("INTEGER OPTIMAL SOLUTION FOUND"));
        return Ok((IntoptReturn::Ok, Some(root.x[lp.m..].to_vec())));
    }

    let mut root = root;
    if ctrl.binarize {
        let m0 = lp.m;
        let count = binarize::binarize(lp, is_int);
        if count > 0 {
            progress.info(format_args!("{} integer columns replaced by binary expansions", count));
            let stat = extend_stat(&root.stat, m0, lp);
            let mut lp_ctrl = ctrl.lp.clone();
            lp_ctrl.meth = SimplexMethod::Dual;
            let mut child = progress.child(MsgLevel::Error);
            root = solve_root(lp, stat, &lp_ctrl, &mut child)?;
            *iters += root.iters;
        }
    }
    let root_stat = add_cuts(lp, is_int, root, ctrl, progress, iters);

    let mut search = Search::new(lp.clone(), is_int.clone(), ctrl);
    search.push_root(root_stat);
    let ret = search.run(progress);
    *iters += search.iters;

    match ret {
        IntoptReturn::Ok if search.incumbent.is_some() => progress.info(format_args!("INTEGER OPTIMAL SOLUTION FOUND")),
        IntoptReturn::Ok => progress.info(format_args!("PROBLEM HAS NO INTEGER FEASIBLE SOLUTION")),
        _ => {}
    }
    let m = search.lp.m;
    let values = search.incumbent.map(|(_, x)| x[m..m + n].to_vec());
    Ok((ret, values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::control::IntoptControlBuilder;
    use crate::io::ConfigurablePrintTarget;
    use crate::params::{Backtrack, BranchRule};
    use crate::problem::{Bounds, VarKind};

    // maximize 8x + 5y
    // s.t.  x +  y <= 6
    //      9x + 5y <= 45
    //       0 <= x, y <= 10 integer
    //
    // LP optimum (3.75, 2.25), integer optimum (5, 0) with value 40
    fn small_mip() -> Problem {
        let mut P = Problem::new();
        P.print_to_sink();
        P.set_obj_dir(ObjDir::Maximize);
        P.add_rows(2);
        P.add_cols(2);
        P.set_row_bnds(0, Bounds::Upper(6.)).unwrap();
        P.set_row_bnds(1, Bounds::Upper(45.)).unwrap();
        P.set_mat_row(0, &[(0, 1.), (1, 1.)]).unwrap();
        P.set_mat_row(1, &[(0, 9.), (1, 5.)]).unwrap();
        P.set_obj_coef(0, 8.).unwrap();
        P.set_obj_coef(1, 5.).unwrap();
        for j in 0..2 {
            P.set_col_bnds(j, Bounds::Double(0., 10.)).unwrap();
            P.set_col_kind(j, VarKind::Integer).unwrap();
        }
        P
    }

    fn presolving() -> IntoptControlBuilder {
        let mut b = IntoptControlBuilder::default();
        b.presolve(true);
        b
    }

    fn assert_optimal(P: &Problem) {
        assert_eq!(P.mip_status(), SolutionStatus::Optimal);
        assert_eq!(P.mip_obj_val(), 40.);
        assert_eq!(P.mip_col_val(0), 5.);
        assert_eq!(P.mip_col_val(1), 0.);
        assert_eq!(P.mip_row_val(1), 45.);
    }

    #[test]
    fn test_search_strategies() {
        let rules = [
            BranchRule::FirstFractional,
            BranchRule::LastFractional,
            BranchRule::MostFractional,
            BranchRule::DriebeckTomlin,
        ];
        let backtracks = [
            Backtrack::DepthFirst,
            Backtrack::BreadthFirst,
            Backtrack::BestProjection,
            Backtrack::BestLocalBound,
        ];
        for br in rules {
            for bt in backtracks {
                let mut P = small_mip();
                let ctrl = presolving().br_tech(br).bt_tech(bt).build().unwrap();
                assert_eq!(intopt(&mut P, &ctrl), IntoptReturn::Ok, "{:?} {:?}", br, bt);
                assert_optimal(&P);
            }
        }
    }

    #[test]
    fn test_cuts_and_binarize() {
        let mut P = small_mip();
        let ctrl = presolving()
            .gmi_cuts(true)
            .mir_cuts(true)
            .cov_cuts(true)
            .clq_cuts(true)
            .build()
            .unwrap();
        assert_eq!(intopt(&mut P, &ctrl), IntoptReturn::Ok);
        assert_optimal(&P);

        let mut P = small_mip();
        let ctrl = presolving().binarize(true).build().unwrap();
        assert_eq!(intopt(&mut P, &ctrl), IntoptReturn::Ok);
        assert_optimal(&P);
        // the problem itself is left alone
        assert_eq!(P.num_cols(), 2);
    }

    #[test]
    fn test_root_basis_required() {
        let mut P = small_mip();
        P.print_to_buffer();
        let ctrl = IntoptControl::default();
        assert_eq!(intopt(&mut P, &ctrl), IntoptReturn::Root);
        let msg = P.get_print_buffer().unwrap();
        assert!(msg.contains("optimal basis to initial LP relaxation not provided"));

        let ret = crate::engine::simplex::simplex(&mut P, &SimplexControl::default());
        assert_eq!(ret, SimplexReturn::Ok);
        assert_eq!(intopt(&mut P, &ctrl), IntoptReturn::Ok);
        assert_optimal(&P);
        assert!(P.params.it_cnt() > 0);
    }

    #[test]
    fn test_no_integer_solution() {
        // 2x = 1 has a relaxed solution but no integer one
        let mut P = Problem::new();
        P.print_to_sink();
        P.add_rows(1);
        P.add_cols(1);
        P.set_row_bnds(0, Bounds::Fixed(1.)).unwrap();
        P.set_mat_row(0, &[(0, 2.)]).unwrap();
        P.set_col_bnds(0, Bounds::Double(0., 5.)).unwrap();
        P.set_col_kind(0, VarKind::Integer).unwrap();
        let ctrl = presolving().build().unwrap();
        assert_eq!(intopt(&mut P, &ctrl), IntoptReturn::Ok);
        assert_eq!(P.mip_status(), SolutionStatus::NoFeasible);

        // 2x >= 12 conflicts with x <= 5
        P.set_row_bnds(0, Bounds::Lower(12.)).unwrap();
        assert_eq!(intopt(&mut P, &ctrl), IntoptReturn::NoPrimalFeasible);
        assert_eq!(P.mip_status(), SolutionStatus::NoFeasible);

        P.set_col_bnds(0, Bounds::Double(0.5, 5.)).unwrap();
        assert_eq!(intopt(&mut P, &ctrl), IntoptReturn::Bound);
    }
}

use super::*;
use crate::problem::ObjDir;

impl<'a, T> Simplex<'a, T>
where
    T: Scalar,
{
    /// Dual simplex from a dual feasible basis.  Boxed nonbasic variables
    /// with reduced costs of the wrong sign are first moved to their
    /// opposite bound; if that does not give a dual feasible basis the
    /// primal simplex is used instead.
    pub(super) fn dual(&mut self, progress: &mut Progress) -> SimplexReturn {
        if !self.make_dual_feasible() {
            progress.info(format_args!("Basis is not dual feasible, using the primal simplex"));
            return self.primal(progress);
        }

        loop {
            self.compute_x();
            let d = self.reduced_costs(&self.lp.c);
            self.display(progress, false, false);

            if let Some(ret) = self.limit_reached(progress) {
                self.display(progress, false, true);
                return ret;
            }

            let (r, below) = match self.choose_leaving() {
                Some(leaving) => leaving,
                None => {
                    self.display(progress, false, true);
                    progress.info(format_args!("OPTIMAL SOLUTION FOUND"));
                    return SimplexReturn::Ok;
                }
            };

            // the objective of a dual feasible basis bounds the optimum
            if let Some(ret) = self.objective_limit() {
                self.display(progress, false, true);
                progress.info(format_args!("OBJECTIVE LIMIT REACHED; SEARCH TERMINATED"));
                return ret;
            }

            let row = self.tableau_row(r);
            let q = match self.dual_ratio(&row, &d, below) {
                Some(q) => q,
                None => {
                    self.display(progress, false, true);
                    progress.info(format_args!("PROBLEM HAS NO PRIMAL FEASIBLE SOLUTION"));
                    return SimplexReturn::NoPrimalFeasible;
                }
            };

            let alpha = self.ftran_col(q);
            if self.pivot(r, q, !below, &alpha).is_err() {
                progress.error(format_args!("Numerical instability (dual simplex)"));
                return SimplexReturn::Fail;
            }
            self.iters += 1;

            if !self.record_step(&d[q].abs()) {
                progress.error(format_args!("Dual simplex is cycling"));
                return if T::EXACT {
                    SimplexReturn::NoConvergence
                } else {
                    SimplexReturn::Fail
                };
            }
        }
    }

    fn make_dual_feasible(&mut self) -> bool {
        let d = self.reduced_costs(&self.lp.c);
        let tol = self.tol.dj.clone();
        for k in 0..self.nvars() {
            let boxed = self.lp.lb[k].is_some() && self.lp.ub[k].is_some();
            match self.stat[k] {
                VarStat::AtLower if d[k] < -tol.clone() => {
                    if !boxed {
                        return false;
                    }
                    self.stat[k] = VarStat::AtUpper;
                }
                VarStat::AtUpper if d[k] > tol => {
                    if !boxed {
                        return false;
                    }
                    self.stat[k] = VarStat::AtLower;
                }
                VarStat::Free if d[k].abs() > tol => return false,
                _ => {}
            }
        }
        true
    }

    /// Leaving row: the basic variable with the largest (weighted)
    /// infeasibility, and whether it lies below its lower bound.
    fn choose_leaving(&self) -> Option<(usize, bool)> {
        let mut best: Option<(usize, bool, T)> = None;
        for (r, &k) in self.head.iter().enumerate() {
            let (amount, below) = match self.infeas(k) {
                Some(infeas) => infeas,
                None => continue,
            };
            let score = if self.bland {
                // smallest index first
                T::from_f64(-(k as f64))
            } else {
                match self.pricing {
                    Pricing::Textbook => amount,
                    Pricing::SteepestEdge => {
                        let mut rho = vec![T::zero(); self.m()];
                        rho[r] = T::one();
                        self.factor.btran(&mut rho);
                        amount.clone() * amount / rho.sumsq()
                    }
                }
            };
            if best.as_ref().map_or(true, |(_, _, s)| score > *s) {
                best = Some((r, below, score));
            }
        }
        best.map(|(r, below, _)| (r, below))
    }

    /// Dual ratio test on tableau row `row`.  Returns the entering
    /// variable keeping all reduced costs sign feasible.
    fn dual_ratio(&self, row: &[T], d: &[T], below: bool) -> Option<usize> {
        let piv = &self.tol.piv;
        let mut cands: Vec<(usize, T, T, T)> = Vec::new();

        for k in 0..self.nvars() {
            let a = &row[k];
            if a.abs() <= *piv || a.is_zero() {
                continue;
            }
            // the leaving variable changes by -a per unit increase of x_k;
            // it must move up when below its lower bound
            let up = *a < T::zero();
            let ok = match self.stat[k] {
                VarStat::AtLower => up == below,
                VarStat::AtUpper => up != below,
                VarStat::Free => true,
                VarStat::Basic | VarStat::Fixed => false,
            };
            if !ok {
                continue;
            }
            let dk = d[k].abs();
            let rate = a.abs();
            let relaxed = (dk.clone() + self.tol.relax.clone() * self.tol.dj.clone()) / rate.clone();
            cands.push((k, dk / rate.clone(), relaxed, rate));
        }

        if cands.is_empty() {
            return None;
        }

        if self.bland || self.tol.relax.is_zero() {
            let mut best = 0;
            for i in 1..cands.len() {
                let (b, c) = (&cands[best], &cands[i]);
                let better = if c.1 != b.1 {
                    c.1 < b.1
                } else if self.bland {
                    c.0 < b.0
                } else {
                    c.3 > b.3
                };
                if better {
                    best = i;
                }
            }
            return Some(cands[best].0);
        }

        let mut tmax = cands[0].2.clone();
        for c in &cands[1..] {
            if c.2 < tmax {
                tmax = c.2.clone();
            }
        }
        cands
            .iter()
            .filter(|c| c.1 <= tmax)
            .fold(None, |acc: Option<&(usize, T, T, T)>, c| match acc {
                Some(b) if b.3 >= c.3 => Some(b),
                _ => Some(c),
            })
            .map(|c| c.0)
    }

    fn objective_limit(&self) -> Option<SimplexReturn> {
        if T::EXACT {
            return None;
        }
        let obj = self.lp.obj_value(&self.x).to_f64();
        match self.lp.dir {
            ObjDir::Minimize if obj > self.obj_lim.1 => Some(SimplexReturn::ObjUpperLimit),
            ObjDir::Maximize if obj < self.obj_lim.0 => Some(SimplexReturn::ObjLowerLimit),
            _ => None,
        }
    }
}

use super::*;

impl<'a, T> Simplex<'a, T>
where
    T: Scalar,
{
    /// Two phase primal simplex.  Phase 1 minimizes the sum of
    /// infeasibilities of the basic variables, phase 2 the objective.
    pub(super) fn primal(&mut self, progress: &mut Progress) -> SimplexReturn {
        let nvars = self.nvars();
        let mut cost = vec![T::zero(); nvars];

        loop {
            self.compute_x();

            // phase 1 costs penalize basic variables outside their bounds
            let mut phase1 = false;
            for c in cost.iter_mut() {
                c.set_zero();
            }
            for &k in &self.head {
                if let Some((_, below)) = self.infeas(k) {
                    cost[k] = if below { -T::one() } else { T::one() };
                    phase1 = true;
                }
            }
            let d = if phase1 {
                self.reduced_costs(&cost)
            } else {
                self.reduced_costs(&self.lp.c)
            };

            self.display(progress, phase1, false);

            if let Some(ret) = self.limit_reached(progress) {
                self.display(progress, phase1, true);
                return ret;
            }

            let (q, inc) = match self.choose_entering(&d) {
                Some(entering) => entering,
                None if phase1 => {
                    self.display(progress, phase1, true);
                    progress.info(format_args!("PROBLEM HAS NO PRIMAL FEASIBLE SOLUTION"));
                    return SimplexReturn::NoPrimalFeasible;
                }
                None => {
                    self.display(progress, phase1, true);
                    progress.info(format_args!("OPTIMAL SOLUTION FOUND"));
                    return SimplexReturn::Ok;
                }
            };

            let alpha = self.ftran_col(q);
            let t = match self.primal_ratio(q, inc, &alpha) {
                Step::Unbounded if phase1 => {
                    progress.error(format_args!("Numerical instability (primal simplex, phase I)"));
                    return SimplexReturn::Fail;
                }
                Step::Unbounded => {
                    self.display(progress, phase1, true);
                    progress.info(format_args!("PROBLEM HAS UNBOUNDED SOLUTION"));
                    return SimplexReturn::NoDualFeasible;
                }
                Step::Flip { t } => {
                    self.stat[q] = if inc { VarStat::AtUpper } else { VarStat::AtLower };
                    t
                }
                Step::Pivot { r, to_upper, t } => {
                    if self.pivot(r, q, to_upper, &alpha).is_err() {
                        progress.error(format_args!("Numerical instability (primal simplex)"));
                        return SimplexReturn::Fail;
                    }
                    t
                }
            };
            self.iters += 1;

            if !self.record_step(&t) {
                progress.error(format_args!("Primal simplex is cycling"));
                return if T::EXACT {
                    SimplexReturn::NoConvergence
                } else {
                    SimplexReturn::Fail
                };
            }
        }
    }

    /// Pricing.  Returns the entering variable and whether it increases.
    fn choose_entering(&self, d: &[T]) -> Option<(usize, bool)> {
        let tol = &self.tol.dj;
        let eligible = (0..self.nvars()).filter_map(|k| {
            let dk = &d[k];
            match self.stat[k] {
                VarStat::AtLower if *dk < -tol.clone() => Some((k, true)),
                VarStat::AtUpper if *dk > *tol => Some((k, false)),
                VarStat::Free if dk.abs() > *tol => Some((k, *dk < T::zero())),
                _ => None,
            }
        });

        if self.bland {
            return eligible.min_by_key(|(k, _)| *k);
        }

        let mut best: Option<(usize, bool, T)> = None;
        for (k, inc) in eligible {
            let score = match self.pricing {
                Pricing::Textbook => d[k].abs(),
                Pricing::SteepestEdge => d[k].clone() * d[k].clone() / self.edge_weight(k),
            };
            if best.as_ref().map_or(true, |(_, _, s)| score > *s) {
                best = Some((k, inc, score));
            }
        }
        best.map(|(k, inc, _)| (k, inc))
    }

    /// Ratio test for entering variable `q` moving up (`inc`) or down.
    fn primal_ratio(&self, q: usize, inc: bool, alpha: &[T]) -> Step<T> {
        // (position, to_upper, ratio, relaxed ratio, |delta|)
        let mut cands: Vec<(usize, bool, T, T, T)> = Vec::new();

        for (r, a) in alpha.iter().enumerate() {
            if a.abs() <= self.tol.piv || a.is_zero() {
                continue;
            }
            let k = self.head[r];
            let x = &self.x[k];
            // rate of change of x_k as the entering variable moves
            let delta = if inc { -a.clone() } else { a.clone() };
            let infeas = self.infeas(k);

            let (bound, to_upper) = if delta > T::zero() {
                match (infeas, &self.lp.lb[k], &self.lp.ub[k]) {
                    (Some((_, true)), Some(l), _) => (l, false),
                    (Some((_, false)), _, _) => continue,
                    (_, _, Some(u)) => (u, true),
                    _ => continue,
                }
            } else {
                match (infeas, &self.lp.lb[k], &self.lp.ub[k]) {
                    (Some((_, false)), _, Some(u)) => (u, true),
                    (Some((_, true)), _, _) => continue,
                    (_, Some(l), _) => (l, false),
                    _ => continue,
                }
            };

            let dist = (bound.clone() - x.clone()).abs();
            let rate = delta.abs();
            let ratio = dist.clone() / rate.clone();
            let slack = self.tol.relax.clone() * self.bnd_tol(bound);
            let relaxed = (dist + slack) / rate.clone();
            cands.push((r, to_upper, ratio, relaxed, rate));
        }

        let chosen = if cands.is_empty() {
            None
        } else if self.bland || self.tol.relax.is_zero() {
            // textbook: smallest ratio, ties broken by the larger pivot
            // or, under Bland's rule, by the smaller variable index
            let mut best = 0;
            for i in 1..cands.len() {
                let (b, c) = (&cands[best], &cands[i]);
                let better = if c.2 != b.2 {
                    c.2 < b.2
                } else if self.bland {
                    self.head[c.0] < self.head[b.0]
                } else {
                    c.4 > b.4
                };
                if better {
                    best = i;
                }
            }
            Some(best)
        } else {
            // Harris: largest pivot among ratios within the relaxed bound
            let tmax = cands
                .iter()
                .map(|c| c.3.clone())
                .fold(None, |acc: Option<T>, v| match acc {
                    Some(a) if a <= v => Some(a),
                    _ => Some(v),
                });
            tmax.and_then(|tmax| {
                (0..cands.len())
                    .filter(|&i| cands[i].2 <= tmax)
                    .fold(None, |acc: Option<usize>, i| match acc {
                        Some(b) if cands[b].4 >= cands[i].4 => Some(b),
                        _ => Some(i),
                    })
            })
        };

        // the entering variable itself may reach its opposite bound first
        let range = match (&self.lp.lb[q], &self.lp.ub[q]) {
            (Some(l), Some(u)) => Some(u.clone() - l.clone()),
            _ => None,
        };

        match (chosen, range) {
            (Some(i), Some(range)) if range <= cands[i].2 => Step::Flip { t: range },
            (Some(i), _) => {
                let (r, to_upper, ratio, _, _) = cands.swap_remove(i);
                let t = if ratio < T::zero() { T::zero() } else { ratio };
                Step::Pivot { r, to_upper, t }
            }
            (None, Some(range)) => Step::Flip { t: range },
            (None, None) => Step::Unbounded,
        }
    }

    pub(super) fn display(&self, progress: &mut Progress, phase1: bool, force: bool) {
        let obj = self.lp.obj_value(&self.x).to_f64();
        let infeas = self.sum_infeas().to_f64();
        let marker = if phase1 { ' ' } else { '*' };
        progress.status(
            self.iters,
            force,
            format_args!("{}{:>6}: obj = {:>17.9e}  infeas = {:>10.3e}", marker, self.iters, obj, infeas),
        );
    }
}

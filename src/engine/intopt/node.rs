use crate::problem::VarStat;

/// An active subproblem of the search tree.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub id: usize,
    pub depth: usize,
    /// objective of the parent relaxation, in minimization sense
    pub bound: f64,
    /// sum of integer infeasibilities of the parent relaxation
    pub infeas: f64,
    /// bounds of all m+n variables
    pub lb: Vec<Option<f64>>,
    pub ub: Vec<Option<f64>>,
    /// final basis of the parent, used as warm start
    pub stat: Vec<VarStat>,
}

impl Node {
    /// Child node with variable `k` restricted to `lb..=ub`.
    pub fn child(
        &self,
        id: usize,
        bound: f64,
        infeas: f64,
        stat: &[VarStat],
        k: usize,
        (lb, ub): (Option<f64>, Option<f64>),
    ) -> Node {
        let mut child = Node {
            id,
            depth: self.depth + 1,
            bound,
            infeas,
            lb: self.lb.clone(),
            ub: self.ub.clone(),
            stat: stat.to_vec(),
        };
        if lb.is_some() {
            child.lb[k] = lb;
        }
        if ub.is_some() {
            child.ub[k] = ub;
        }
        child
    }
}

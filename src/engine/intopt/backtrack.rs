//! Backtracking: which active node is solved next.

use super::node::Node;
use crate::params::Backtrack;
use enum_dispatch::enum_dispatch;

/// Search state seen by the node selection.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SelectContext {
    /// incumbent objective, in minimization sense
    pub incumbent: Option<f64>,
    pub root_obj: f64,
    pub root_infeas: f64,
}

#[enum_dispatch]
pub(crate) trait NodeSelection {
    /// Index of the next node in `nodes`, which is not empty and ordered
    /// by creation.
    fn select(&self, nodes: &[Node], ctx: &SelectContext) -> usize;
}

pub(crate) struct DepthFirst;
pub(crate) struct BreadthFirst;
pub(crate) struct BestProjection;
pub(crate) struct BestLocalBound;

impl NodeSelection for DepthFirst {
    fn select(&self, nodes: &[Node], _ctx: &SelectContext) -> usize {
        nodes.len() - 1
    }
}

impl NodeSelection for BreadthFirst {
    fn select(&self, _nodes: &[Node], _ctx: &SelectContext) -> usize {
        0
    }
}

impl NodeSelection for BestLocalBound {
    fn select(&self, nodes: &[Node], _ctx: &SelectContext) -> usize {
        argmin(nodes, |n| n.bound)
    }
}

impl NodeSelection for BestProjection {
    fn select(&self, nodes: &[Node], ctx: &SelectContext) -> usize {
        let inc = match ctx.incumbent {
            Some(inc) if ctx.root_infeas > 0.0 => inc,
            // nothing to project on yet
            _ => return DepthFirst.select(nodes, ctx),
        };
        let rate = (inc - ctx.root_obj) / ctx.root_infeas;
        argmin(nodes, |n| n.bound + rate * n.infeas)
    }
}

// smallest key, ties resolved in favor of the deeper node
fn argmin(nodes: &[Node], key: impl Fn(&Node) -> f64) -> usize {
    let mut best = 0;
    for (i, n) in nodes.iter().enumerate().skip(1) {
        let (a, b) = (key(n), key(&nodes[best]));
        if a < b || (a == b && n.depth > nodes[best].depth) {
            best = i;
        }
    }
    best
}

#[enum_dispatch(NodeSelection)]
pub(crate) enum NodeSelector {
    DepthFirst,
    BreadthFirst,
    BestProjection,
    BestLocalBound,
}

impl From<Backtrack> for NodeSelector {
    fn from(bt: Backtrack) -> Self {
        match bt {
            Backtrack::DepthFirst => DepthFirst.into(),
            Backtrack::BreadthFirst => BreadthFirst.into(),
            Backtrack::BestProjection => BestProjection.into(),
            Backtrack::BestLocalBound => BestLocalBound.into(),
        }
    }
}

#[test]
fn test_node_selection() {
    let node = |id, depth, bound, infeas| Node {
        id,
        depth,
        bound,
        infeas,
        lb: vec![],
        ub: vec![],
        stat: vec![],
    };
    let nodes = vec![node(0, 1, 5.0, 0.5), node(1, 2, 3.0, 2.0), node(2, 3, 4.0, 1.0)];
    let mut ctx = SelectContext {
        incumbent: None,
        root_obj: 2.0,
        root_infeas: 1.0,
    };

    let sel = |bt: Backtrack, ctx: &SelectContext| NodeSelector::from(bt).select(&nodes, ctx);
    assert_eq!(sel(Backtrack::DepthFirst, &ctx), 2);
    assert_eq!(sel(Backtrack::BreadthFirst, &ctx), 0);
    assert_eq!(sel(Backtrack::BestLocalBound, &ctx), 1);
    assert_eq!(sel(Backtrack::BestProjection, &ctx), 2);

    // projections: 5 + 4*0.5 = 7, 3 + 4*2 = 11, 4 + 4*1 = 8
    ctx.incumbent = Some(6.0);
    assert_eq!(sel(Backtrack::BestProjection, &ctx), 0);
}

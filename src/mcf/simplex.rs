/*
 * Copyright (c) 2021, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! A primal network simplex implementation.
//!
//! The solution is represented by a spanning tree. Every edge not in the
//! tree has its flow at the lower bound 0 or at its capacity. The tree is
//! stored by the predecessor, the depth and the thread (the cyclic preorder
//! successor) of each node. The node potentials are chosen such that all
//! tree edges have reduced cost `cost(u,v) - pi(u) + pi(v) = 0`.
//!
//! If the graph is not connected the tree is a spanning forest with one root
//! per component.
//!
//! # Example
//!
//! ```
//! use netflow::{Edge, Graph, Node};
//! use netflow::mcf::{ArcState, NetworkSimplex, PivotRule};
//!
//! let mut g = Graph::<i64>::directed();
//! g.add_node("s", Node::new().demand(4)).unwrap();
//! g.add_node("t", Node::new().demand(-4)).unwrap();
//! g.add_edge("s", "t", Edge::new().cost(10).capacity(4)).unwrap();
//! g.add_edge("s", "a", Edge::new().cost(1).capacity(3)).unwrap();
//! g.add_edge("a", "t", Edge::new().cost(1).capacity(3)).unwrap();
//!
//! let mut spx = NetworkSimplex::new(&g).unwrap();
//! spx.pivot = PivotRule::FirstEligible;
//! assert!(spx.solve().unwrap());
//! assert_eq!(spx.value(), 16);
//!
//! // the optimality conditions hold for every non-tree edge
//! for (u, v) in g.edges() {
//!     let rc = spx.reduced_cost(u, v).unwrap();
//!     match spx.arc_state(u, v).unwrap() {
//!         ArcState::Tree => assert_eq!(rc, 0),
//!         ArcState::Lower => assert!(rc >= 0),
//!         ArcState::Upper => assert!(rc <= 0),
//!     }
//! }
//! ```

use super::{PivotRule, SolutionState};
use crate::disjointset::DisjointSet;
use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use crate::Scalar;

use log::{debug, trace, warn};

use std::cmp::max;
use std::collections::HashMap;

/// The position of an edge in the simplex basis.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ArcState {
    /// Non-tree edge with flow 0.
    Lower,
    /// Non-tree edge with flow equal to its capacity.
    Upper,
    /// Tree edge.
    Tree,
}

const NONE: usize = usize::MAX;

/// A primal network simplex algorithm.
pub struct NetworkSimplex<'a, F> {
    graph: &'a Graph<F>,
    /// Position of each edge given by its end nodes.
    edge_ids: HashMap<(usize, usize), usize>,

    tails: Vec<usize>,
    heads: Vec<usize>,
    costs: Vec<F>,
    caps: Vec<F>,
    flows: Vec<F>,
    state: Vec<ArcState>,

    /// Parent of each node in the tree.
    pred: Vec<usize>,
    /// The tree edge to the parent.
    pred_edge: Vec<usize>,
    depth: Vec<usize>,
    /// Next node in preorder, the last node of a tree points to its root.
    thread: Vec<usize>,
    potentials: Vec<F>,

    /// The rule for selecting the entering edge.
    pub pivot: PivotRule,
    /// The root of the tree. If `None` the first node is used.
    pub root: Option<NodeId>,
    /// Stop with [`Error::PivotLimit`] after that many pivots.
    ///
    /// Degenerate pivots may cycle, so the default is the larger of
    /// `n * m` and 1000. `None` removes the limit.
    pub max_pivots: Option<usize>,

    npivots: usize,
    solution_state: SolutionState,
}

impl<'a, F> NetworkSimplex<'a, F>
where
    F: Scalar,
{
    /// Create the algorithm for a directed graph with capacities.
    ///
    /// The current flow of the graph is used as starting solution if it is
    /// feasible.
    pub fn new(g: &'a Graph<F>) -> Result<Self> {
        g.require_directed()?;

        let arcs = g.arcs();
        let n = g.num_nodes();
        let m = arcs.len();
        let mut spx = NetworkSimplex {
            graph: g,
            edge_ids: HashMap::with_capacity(m),
            tails: Vec::with_capacity(m),
            heads: Vec::with_capacity(m),
            costs: Vec::with_capacity(m),
            caps: Vec::with_capacity(m),
            flows: Vec::with_capacity(m),
            state: vec![ArcState::Lower; m],

            pred: vec![NONE; n],
            pred_edge: vec![NONE; n],
            depth: vec![0; n],
            thread: vec![0; n],
            potentials: vec![F::zero(); n],

            pivot: PivotRule::Dantzig,
            root: None,
            max_pivots: Some(max(n * m, 1000)),

            npivots: 0,
            solution_state: SolutionState::Unknown,
        };

        for (e, &(u, v)) in arcs.iter().enumerate() {
            let edge = g
                .edge_between(u, v)
                .ok_or_else(|| Error::EdgeNotFound(g.id_at(u).clone(), g.id_at(v).clone()))?;
            let cap = edge
                .capacity
                .ok_or_else(|| Error::MissingCapacity(g.id_at(u).clone(), g.id_at(v).clone()))?;
            spx.edge_ids.insert((u, v), e);
            spx.tails.push(u);
            spx.heads.push(v);
            spx.costs.push(edge.cost);
            spx.caps.push(cap);
            spx.flows.push(edge.flow);
        }

        Ok(spx)
    }

    pub fn as_graph(&self) -> &'a Graph<F> {
        self.graph
    }

    /// Return the solution state of the latest computation.
    pub fn solution_state(&self) -> SolutionState {
        self.solution_state
    }

    /// Number of pivots of the latest computation.
    pub fn num_pivots(&self) -> usize {
        self.npivots
    }

    /// Return the cost of the current flow.
    pub fn value(&self) -> F {
        let mut v = F::zero();
        for e in 0..self.flows.len() {
            v += self.flows[e] * self.costs[e];
        }
        v
    }

    /// The flow on all edges in edge order.
    pub fn flows(&self) -> &[F] {
        &self.flows
    }

    /// The flow on an edge.
    pub fn flow<N, M>(&self, u: N, v: M) -> Result<F>
    where
        N: Into<NodeId>,
        M: Into<NodeId>,
    {
        Ok(self.flows[self.edge_id(u.into(), v.into())?])
    }

    /// The potential of a node.
    pub fn potential<N: Into<NodeId>>(&self, u: N) -> Result<F> {
        Ok(self.potentials[self.graph.idx(u.into().as_str())?])
    }

    /// The reduced cost `cost(u,v) - pi(u) + pi(v)` of an edge.
    pub fn reduced_cost<N, M>(&self, u: N, v: M) -> Result<F>
    where
        N: Into<NodeId>,
        M: Into<NodeId>,
    {
        Ok(self.rcost(self.edge_id(u.into(), v.into())?))
    }

    /// Return `true` if the edge is in the spanning tree.
    pub fn is_tree_arc<N, M>(&self, u: N, v: M) -> Result<bool>
    where
        N: Into<NodeId>,
        M: Into<NodeId>,
    {
        Ok(self.arc_state(u, v)? == ArcState::Tree)
    }

    pub fn arc_state<N, M>(&self, u: N, v: M) -> Result<ArcState>
    where
        N: Into<NodeId>,
        M: Into<NodeId>,
    {
        Ok(self.state[self.edge_id(u.into(), v.into())?])
    }

    fn edge_id(&self, u: NodeId, v: NodeId) -> Result<usize> {
        let i = self.graph.idx(u.as_str())?;
        let j = self.graph.idx(v.as_str())?;
        self.edge_ids.get(&(i, j)).copied().ok_or(Error::EdgeNotFound(u, v))
    }

    fn rcost(&self, e: usize) -> F {
        self.costs[e] - self.potentials[self.tails[e]] + self.potentials[self.heads[e]]
    }

    /// Solve the min-cost-flow problem.
    ///
    /// Returns `false` if the problem is infeasible.
    pub fn solve(&mut self) -> Result<bool> {
        self.npivots = 0;
        self.solution_state = SolutionState::Unknown;

        let root = match self.root {
            Some(ref r) => Some(self.graph.idx(r.as_str())?),
            None => None,
        };

        if !self.is_feasible() {
            let mut h = self.graph.clone();
            if !h.find_feasible_flow()? {
                self.solution_state = SolutionState::Infeasible;
                return Ok(false);
            }
            for (e, (u, v)) in h.arcs().into_iter().enumerate() {
                self.flows[e] = h.edge_between(u, v).map(|e| e.flow).unwrap_or_else(F::zero);
            }
        }

        self.init_tree()?;
        self.update_tree(root)?;

        while let Some(e) = self.find_entering_edge()? {
            if let Some(max) = self.max_pivots {
                if self.npivots >= max {
                    return Err(Error::PivotLimit(max));
                }
            }
            self.augment_cycle(e);
            self.update_tree(root)?;
            self.npivots += 1;
        }

        debug!(
            "Network simplex: optimal after {} pivots, cost {:?}",
            self.npivots,
            self.value()
        );
        self.solution_state = SolutionState::Optimal;
        Ok(true)
    }

    /// Return `true` if the current flow satisfies bounds and demands.
    fn is_feasible(&self) -> bool {
        let n = self.graph.num_nodes();
        let mut balance: Vec<F> = (0..n).map(|u| self.graph.node_at(u).demand).collect();
        for e in 0..self.flows.len() {
            if self.flows[e] < F::zero() || self.flows[e] > self.caps[e] {
                return false;
            }
            balance[self.tails[e]] -= self.flows[e];
            balance[self.heads[e]] += self.flows[e];
        }
        balance.iter().all(|b| b.is_zero())
    }

    fn is_basic(&self, e: usize) -> bool {
        self.flows[e] > F::zero() && self.flows[e] < self.caps[e]
    }

    /// Compute the initial spanning tree.
    ///
    /// First all cycles of edges strictly between their bounds are removed
    /// by augmenting along them. The remaining such edges form a forest,
    /// which is extended by edges at their bounds until it spans all nodes
    /// (or all nodes of each component).
    fn init_tree(&mut self) -> Result<()> {
        let mut ncanceled = 0;
        while let Some(cycle) = self.find_basic_cycle() {
            self.cancel_cycle(&cycle);
            ncanceled += 1;
        }

        let mut sets = DisjointSet::new();
        for u in self.graph.nodes() {
            sets.add(Some(u))?;
        }
        for e in 0..self.flows.len() {
            self.state[e] = if self.flows[e].is_zero() {
                ArcState::Lower
            } else {
                ArcState::Upper
            };
        }

        let graph = self.graph;
        let ids = |u: usize| graph.id_at(u);
        for e in 0..self.flows.len() {
            if self.is_basic(e) {
                if !sets.union(ids(self.tails[e]), ids(self.heads[e]))? {
                    return Err(Error::InvariantViolation("basic edges contain a cycle".to_string()));
                }
                self.state[e] = ArcState::Tree;
            }
        }
        for e in 0..self.flows.len() {
            if self.state[e] != ArcState::Tree && sets.union(ids(self.tails[e]), ids(self.heads[e]))? {
                self.state[e] = ArcState::Tree;
            }
        }

        if sets.num_sets() > 1 {
            warn!("Graph is not connected, using a spanning forest with {} trees", sets.num_sets());
        }
        debug!("Initial tree after canceling {} cycles", ncanceled);
        Ok(())
    }

    /// Find a cycle of edges strictly between their bounds.
    ///
    /// The cycle is returned as edges with their direction of traversal
    /// (`true` if traversed from tail to head).
    fn find_basic_cycle(&self) -> Option<Vec<(usize, bool)>> {
        let n = self.graph.num_nodes();
        let mut adj = vec![vec![]; n];
        for e in 0..self.flows.len() {
            if self.is_basic(e) {
                adj[self.tails[e]].push((e, self.heads[e]));
                adj[self.heads[e]].push((e, self.tails[e]));
            }
        }

        let mut parent = vec![(NONE, NONE); n];
        let mut visited = vec![false; n];
        let mut stack = Vec::new();
        for r in 0..n {
            if visited[r] {
                continue;
            }
            visited[r] = true;
            stack.push((r, 0));
            while let Some(&(u, i)) = stack.last() {
                if i == adj[u].len() {
                    stack.pop();
                    continue;
                }
                let top = stack.len() - 1;
                stack[top].1 += 1;

                let (e, v) = adj[u][i];
                if e == parent[u].0 {
                    continue;
                }
                if !visited[v] {
                    visited[v] = true;
                    parent[v] = (e, u);
                    stack.push((v, 0));
                    continue;
                }

                // back edge: v is an ancestor of u, the cycle is v -> ... -> u -> v
                let mut cycle = vec![(e, self.tails[e] == u)];
                let mut x = u;
                while x != v {
                    let (pe, p) = parent[x];
                    cycle.push((pe, self.tails[pe] == p));
                    x = p;
                }
                cycle.reverse();
                return Some(cycle);
            }
        }
        None
    }

    /// Augment along a cycle in the direction of non-positive cost.
    fn cancel_cycle(&mut self, cycle: &[(usize, bool)]) {
        let mut cost = F::zero();
        for &(e, fwd) in cycle {
            if fwd {
                cost += self.costs[e];
            } else {
                cost -= self.costs[e];
            }
        }
        let reverse = cost > F::zero();

        let mut df = F::max_value();
        for &(e, fwd) in cycle {
            let r = if fwd != reverse {
                self.caps[e] - self.flows[e]
            } else {
                self.flows[e]
            };
            if r < df {
                df = r;
            }
        }
        for &(e, fwd) in cycle {
            if fwd != reverse {
                self.flows[e] += df;
            } else {
                self.flows[e] -= df;
            }
            self.graph.draw_flow(self.tails[e], self.heads[e], self.flows[e]);
        }
        trace!("Canceled cycle of {} edges with {:?} units", cycle.len(), df);
    }

    /// Compute predecessors, depths, thread and potentials of the tree.
    fn update_tree(&mut self, root: Option<usize>) -> Result<()> {
        let n = self.graph.num_nodes();
        let mut adj = vec![vec![]; n];
        let mut ntree = 0;
        for e in 0..self.state.len() {
            if self.state[e] == ArcState::Tree {
                adj[self.tails[e]].push((e, self.heads[e]));
                adj[self.heads[e]].push((e, self.tails[e]));
                ntree += 1;
            }
        }

        self.pred.fill(NONE);
        self.pred_edge.fill(NONE);
        let mut visited = vec![false; n];
        let mut nvisited_edges = 0;
        let roots = root.into_iter().chain(0..n);
        let mut stack = Vec::new();
        for r in roots {
            if visited[r] {
                continue;
            }
            visited[r] = true;
            self.depth[r] = 0;
            self.potentials[r] = F::zero();

            // preorder traversal, each node is threaded to its successor
            let mut last = r;
            stack.push(r);
            while let Some(u) = stack.pop() {
                if u != r {
                    self.thread[last] = u;
                    last = u;
                }
                for &(e, v) in adj[u].iter().rev() {
                    if e == self.pred_edge[u] {
                        continue;
                    }
                    if visited[v] {
                        return Err(Error::InvariantViolation("tree edges contain a cycle".to_string()));
                    }
                    visited[v] = true;
                    self.pred[v] = u;
                    self.pred_edge[v] = e;
                    self.depth[v] = self.depth[u] + 1;
                    nvisited_edges += 1;
                    stack.push(v);
                }
            }
            self.thread[last] = r;

            // potentials along the thread, parents come first
            let mut u = self.thread[r];
            while u != r {
                let p = self.pred[u];
                let e = self.pred_edge[u];
                self.potentials[u] = if self.tails[e] == p {
                    self.potentials[p] - self.costs[e]
                } else {
                    self.potentials[p] + self.costs[e]
                };
                u = self.thread[u];
            }
        }

        if nvisited_edges != ntree {
            return Err(Error::InvariantViolation("tree edges contain a cycle".to_string()));
        }
        Ok(())
    }

    /// Select the entering edge according to the pivot rule.
    fn find_entering_edge(&self) -> Result<Option<usize>> {
        let mut best = None;
        let mut best_violation = F::zero();
        for e in 0..self.state.len() {
            let rc = self.rcost(e);
            let violation = match self.state[e] {
                ArcState::Tree => continue,
                _ if self.is_basic(e) => {
                    return Err(Error::InvariantViolation(format!(
                        "edge ({}, {}) is strictly between its bounds but not in the tree",
                        self.graph.id_at(self.tails[e]),
                        self.graph.id_at(self.heads[e])
                    )))
                }
                ArcState::Lower => -rc,
                ArcState::Upper => rc,
            };
            if violation > best_violation {
                best = Some(e);
                best_violation = violation;
                if self.pivot == PivotRule::FirstEligible {
                    break;
                }
            }
        }
        Ok(best)
    }

    /// Augment along the cycle closed by the entering edge and exchange the
    /// leaving edge.
    fn augment_cycle(&mut self, entering: usize) {
        // orient the cycle along the entering edge
        let (from, to) = match self.state[entering] {
            ArcState::Lower => (self.tails[entering], self.heads[entering]),
            _ => (self.heads[entering], self.tails[entering]),
        };

        // the cycle: entering edge, path from `to` to the apex, path from the
        // apex to `from`
        let mut up = vec![];
        let mut down = vec![];
        let (mut a, mut b) = (to, from);
        while a != b {
            if self.depth[a] >= self.depth[b] {
                let e = self.pred_edge[a];
                up.push((e, self.tails[e] == a));
                a = self.pred[a];
            } else {
                let e = self.pred_edge[b];
                down.push((e, self.tails[e] == self.pred[b]));
                b = self.pred[b];
            }
        }
        down.reverse();
        let mut cycle = Vec::with_capacity(1 + up.len() + down.len());
        cycle.push((entering, from == self.tails[entering]));
        cycle.extend(up);
        cycle.extend(down);

        // the last edge with minimal residual capacity leaves
        let mut leaving = entering;
        let mut leaving_fwd = true;
        let mut df = F::max_value();
        for &(e, fwd) in &cycle {
            let r = if fwd {
                self.caps[e] - self.flows[e]
            } else {
                self.flows[e]
            };
            if r <= df {
                df = r;
                leaving = e;
                leaving_fwd = fwd;
            }
        }

        for &(e, fwd) in &cycle {
            if fwd {
                self.flows[e] += df;
            } else {
                self.flows[e] -= df;
            }
            if !df.is_zero() {
                self.graph.draw_flow(self.tails[e], self.heads[e], self.flows[e]);
            }
        }

        if leaving == entering {
            self.state[entering] = match self.state[entering] {
                ArcState::Lower => ArcState::Upper,
                _ => ArcState::Lower,
            };
        } else {
            self.state[entering] = ArcState::Tree;
            self.state[leaving] = if leaving_fwd {
                ArcState::Upper
            } else {
                ArcState::Lower
            };
        }

        trace!(
            "Pivot {}: entering ({}, {}), leaving ({}, {}), {:?} units on a cycle of {} edges",
            self.npivots,
            self.graph.id_at(self.tails[entering]),
            self.graph.id_at(self.heads[entering]),
            self.graph.id_at(self.tails[leaving]),
            self.graph.id_at(self.heads[leaving]),
            df,
            cycle.len()
        );
        self.graph.draw_pivot(
            (self.tails[entering], self.heads[entering]),
            (self.tails[leaving], self.heads[leaving]),
        );
    }
}

impl<F> Graph<F>
where
    F: Scalar,
{
    /// Solve the minimum cost flow problem with the network simplex.
    ///
    /// Returns `false` if the problem is infeasible.
    pub fn network_simplex(&mut self, pivot: PivotRule, root: Option<NodeId>) -> Result<bool> {
        if !self.find_feasible_flow()? {
            return Ok(false);
        }

        let flows = {
            let mut spx = NetworkSimplex::new(self)?;
            spx.pivot = pivot;
            spx.root = root;
            if !spx.solve()? {
                return Ok(false);
            }
            spx.flows().to_vec()
        };
        self.set_flows(&flows);
        Ok(true)
    }
}

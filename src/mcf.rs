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

//! Minimum Cost Flow algorithms.
//!
//! The problem data is read from the graph: each edge has a `cost` and a
//! `capacity`, each node a `demand` (positive for supply, negative for
//! demand). A flow is feasible if `0 <= flow <= capacity` on every edge and
//! the outflow minus the inflow of every node equals its demand value.
//!
//! Infeasibility is not an error, the functions return `Ok(false)` and the
//! flows on the edges must not be used.

use crate::error::{Error, Result};
use crate::graph::{Edge, Graph, Node, NodeId};
use crate::maxflow::augmenting::dfs_augmenting;
use crate::network::Network;
use crate::Scalar;

use log::debug;

use std::str::FromStr;

pub mod cyclecanceling;
pub mod simplex;
pub use self::simplex::{ArcState, NetworkSimplex};

/// The minimum cost flow algorithm.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum McfAlgorithm {
    Simplex,
    CycleCanceling,
}

impl FromStr for McfAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "simplex" => Ok(McfAlgorithm::Simplex),
            "cycle_canceling" => Ok(McfAlgorithm::CycleCanceling),
            _ => Err(Error::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// The rule for selecting the entering arc of the network simplex.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PivotRule {
    /// The arc with the largest violation of the optimality conditions.
    Dantzig,
    /// The first arc violating the optimality conditions in edge order.
    FirstEligible,
}

impl FromStr for PivotRule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "dantzig" => Ok(PivotRule::Dantzig),
            "first_eligible" => Ok(PivotRule::FirstEligible),
            _ => Err(Error::UnknownPivotRule(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SolutionState {
    /// Unknown state, the problem has not been solved, yet
    Unknown,
    /// The problem has been solved to optimality
    Optimal,
    /// The problem is infeasible
    Infeasible,
}

impl<F> Graph<F>
where
    F: Scalar,
{
    /// Solve the minimum cost flow problem.
    ///
    /// `pivot` and `root` are only used by the network simplex. Returns
    /// `false` if the problem is infeasible.
    pub fn min_cost_flow(&mut self, algo: McfAlgorithm, pivot: PivotRule, root: Option<NodeId>) -> Result<bool> {
        match algo {
            McfAlgorithm::Simplex => self.network_simplex(pivot, root),
            McfAlgorithm::CycleCanceling => self.cycle_canceling(),
        }
    }

    /// Compute some feasible flow.
    ///
    /// A super source with an arc to every supply node and a super sink with
    /// an arc from every demand node are added, their capacities are the
    /// supply and demand values. The flow is feasible iff a maximum flow
    /// between both saturates all these arcs. The two nodes are removed
    /// afterwards.
    ///
    /// # Example
    ///
    /// ```
    /// use netflow::{Edge, Graph, Node};
    ///
    /// let mut g = Graph::<i32>::directed();
    /// g.add_node("a", Node::new().demand(3)).unwrap();
    /// g.add_node("b", Node::new().demand(-3)).unwrap();
    /// g.add_edge("a", "b", Edge::new().capacity(2)).unwrap();
    /// assert!(!g.find_feasible_flow().unwrap());
    ///
    /// g.edge_mut("a", "b").unwrap().capacity = Some(5);
    /// assert!(g.find_feasible_flow().unwrap());
    /// assert_eq!(g.edge("a", "b").unwrap().flow, 3);
    /// assert_eq!(g.num_nodes(), 2);
    /// ```
    pub fn find_feasible_flow(&mut self) -> Result<bool> {
        // validates directedness and capacities before the graph is changed
        Network::new(self)?;

        let mut supply = F::zero();
        let mut demand = F::zero();
        for u in 0..self.num_nodes() {
            let b = self.node_at(u).demand;
            if b > F::zero() {
                supply += b;
            } else {
                demand -= b;
            }
        }
        if supply != demand {
            debug!("Infeasible: total supply {:?} != total demand {:?}", supply, demand);
            return Ok(false);
        }

        let src = self.fresh_id("__source");
        let snk = self.fresh_id("__sink");
        self.add_node(src.clone(), Node::new())?;
        self.add_node(snk.clone(), Node::new())?;
        let result = self.saturate_demands(&src, &snk);
        self.del_node(src)?;
        self.del_node(snk)?;

        let feasible = result?;
        debug!("Feasible flow found: {}", feasible);
        Ok(feasible)
    }

    fn saturate_demands(&mut self, src: &NodeId, snk: &NodeId) -> Result<bool> {
        let n = self.num_nodes() - 2;
        for u in 0..n {
            let b = self.node_at(u).demand;
            let id = self.id_at(u).clone();
            if b > F::zero() {
                self.add_edge(src, id, Edge::new().capacity(b))?;
            } else if b < F::zero() {
                self.add_edge(id, snk, Edge::new().capacity(-b))?;
            }
        }

        let (mut net, s, t) = self.flow_network(src.clone(), snk.clone())?;
        dfs_augmenting(self, &mut net, s, t);
        net.write_back(self);

        let s_saturated = self.outs(s).iter().all(|&v| self.is_saturated(s, v));
        let t_saturated = self.ins(t).iter().all(|&u| self.is_saturated(u, t));
        Ok(s_saturated && t_saturated)
    }

    fn is_saturated(&self, u: usize, v: usize) -> bool {
        self.edge_between(u, v)
            .map(|e| Some(e.flow) == e.capacity)
            .unwrap_or(false)
    }

    /// Return an id with prefix `base` that is not used by any node.
    fn fresh_id(&self, base: &str) -> NodeId {
        let mut id = NodeId::from(base);
        let mut k = 0;
        while self.contains_node(&id) {
            k += 1;
            id = NodeId::from(format!("{}{}", base, k));
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::{McfAlgorithm, PivotRule};
    use crate::{Edge, Error, Graph, Node};

    #[test]
    fn test_parse() {
        assert_eq!("cycle_canceling".parse::<McfAlgorithm>().unwrap(), McfAlgorithm::CycleCanceling);
        assert_eq!("first_eligible".parse::<PivotRule>().unwrap(), PivotRule::FirstEligible);
        assert_eq!(
            "bland".parse::<PivotRule>(),
            Err(Error::UnknownPivotRule("bland".to_string()))
        );
        assert_eq!(
            "ssp".parse::<McfAlgorithm>(),
            Err(Error::UnknownAlgorithm("ssp".to_string()))
        );
    }

    #[test]
    fn test_feasible_flow() {
        let mut g = Graph::<i32>::directed();
        g.add_node("__source", Node::new().demand(4)).unwrap();
        g.add_node("x", Node::new()).unwrap();
        g.add_node("__sink", Node::new().demand(-4)).unwrap();
        g.add_edge("__source", "x", Edge::new().capacity(3)).unwrap();
        g.add_edge("x", "__sink", Edge::new().capacity(9)).unwrap();
        g.add_edge("__source", "__sink", Edge::new().capacity(1)).unwrap();

        assert!(g.find_feasible_flow().unwrap());
        assert_eq!(g.num_nodes(), 3);
        assert_eq!(g.num_edges(), 3);
        assert_eq!(g.flow_value("__source").unwrap(), 4);
        assert_eq!(g.flow_value("x").unwrap(), 0);
    }

    #[test]
    fn test_unbalanced() {
        let mut g = Graph::<i32>::directed();
        g.add_node("a", Node::new().demand(5)).unwrap();
        g.add_node("b", Node::new().demand(-3)).unwrap();
        g.add_edge("a", "b", Edge::new().capacity(10)).unwrap();
        assert!(!g.find_feasible_flow().unwrap());
        assert!(!g.min_cost_flow(McfAlgorithm::Simplex, PivotRule::Dantzig, None).unwrap());
        assert!(!g.min_cost_flow(McfAlgorithm::CycleCanceling, PivotRule::Dantzig, None).unwrap());

        let mut u = Graph::<i32>::undirected();
        u.add_edge("a", "b", Edge::new().capacity(1)).unwrap();
        assert_eq!(u.find_feasible_flow(), Err(Error::NotDirected));
    }
}

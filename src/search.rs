/*
 * Copyright (c) 2018, 2020, 2021, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! # Graph search algorithms.
//!
//! All searches are done by one routine. The nodes pass through the states
//! `Unseen -> Frontier -> Done`. The [`Algorithm`] determines the order in
//! which nodes leave the frontier and how an explored edge changes the
//! label of its end node:
//!
//! | algorithm       | frontier       | relaxation of `(u,v)`                              |
//! |-----------------|----------------|----------------------------------------------------|
//! | `Dfs`           | stack          | first predecessor wins                             |
//! | `Bfs`           | queue          | first predecessor wins                             |
//! | `UnweightedSpt` | queue          | first predecessor wins, distance is number of hops |
//! | `Dijkstra`      | priority queue | `dist(u) + cost(u,v)` if strictly smaller          |
//! | `Prim`          | priority queue | `cost(u,v)` if strictly smaller                    |
//!
//! For the plain searches the distance of a node is its number of hops from
//! the source.
//!
//! # Example
//!
//! ```
//! use netflow::{Edge, Graph};
//! use netflow::search::Algorithm;
//!
//! let mut g = Graph::<i32>::undirected();
//! for (i, &c) in [1, 2, 3, 4, 5].iter().enumerate() {
//!     g.add_edge(i, (i + 1) % 5, Edge::new().cost(c)).unwrap();
//! }
//!
//! let tree = g.search(0, Some(3.into()), Algorithm::Dijkstra, false).unwrap();
//! assert_eq!(tree.distance(3), Some(6));
//! let path = tree.path().unwrap();
//! assert_eq!(path.iter().map(|u| u.as_str()).collect::<Vec<_>>(), vec!["0", "1", "2", "3"]);
//! ```

use crate::collections::Frontier;
use crate::draw::NodeState;
use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use crate::Scalar;

use log::debug;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// The search algorithm.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Algorithm {
    Dfs,
    Bfs,
    Dijkstra,
    Prim,
    UnweightedSpt,
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "DFS" => Ok(Algorithm::Dfs),
            "BFS" => Ok(Algorithm::Bfs),
            "Dijkstra" => Ok(Algorithm::Dijkstra),
            "Prim" => Ok(Algorithm::Prim),
            "UnweightedSPT" => Ok(Algorithm::UnweightedSpt),
            _ => Err(Error::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// The result of a search.
///
/// Contains the predecessor of each reached node, its distance label and the
/// order in which the nodes have been expanded.
pub struct SearchTree<'a, F> {
    graph: &'a Graph<F>,
    source: usize,
    destination: Option<usize>,
    pred: Vec<Option<usize>>,
    dist: Vec<Option<F>>,
    depth: Vec<usize>,
    state: Vec<NodeState>,
    order: Vec<usize>,
}

impl<'a, F> fmt::Debug for SearchTree<'a, F>
where
    F: Scalar,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SearchTree")
            .field("source", self.source())
            .field("visited", &self.visited().collect::<Vec<_>>())
            .finish()
    }
}

impl<'a, F> SearchTree<'a, F>
where
    F: Scalar,
{
    /// Create a tree from labels computed elsewhere.
    ///
    /// All nodes with a distance label are considered done.
    pub(crate) fn from_labels(
        graph: &'a Graph<F>,
        source: usize,
        pred: Vec<Option<usize>>,
        dist: Vec<Option<F>>,
    ) -> Self {
        let n = graph.num_nodes();
        let mut depth = vec![0; n];
        let mut state = vec![NodeState::Unseen; n];
        let mut order = vec![];
        for u in 0..n {
            if dist[u].is_some() {
                state[u] = NodeState::Done;
                order.push(u);
                let mut v = u;
                while let Some(p) = pred[v] {
                    depth[u] += 1;
                    v = p;
                    if depth[u] > n {
                        break;
                    }
                }
            }
        }
        SearchTree {
            graph,
            source,
            destination: None,
            pred,
            dist,
            depth,
            state,
            order,
        }
    }

    /// Return the source node.
    pub fn source(&self) -> &'a NodeId {
        self.graph.id_at(self.source)
    }

    /// Return the predecessor of `u` in the search tree.
    pub fn pred<N: Into<NodeId>>(&self, u: N) -> Option<&'a NodeId> {
        let u = self.graph.idx(u.into().as_str()).ok()?;
        self.pred[u].map(|p| self.graph.id_at(p))
    }

    /// Return the distance label of `u`.
    ///
    /// This is the path length for Dijkstra, the weight of the connecting
    /// edge for Prim and the number of hops otherwise.
    pub fn distance<N: Into<NodeId>>(&self, u: N) -> Option<F> {
        let u = self.graph.idx(u.into().as_str()).ok()?;
        self.dist[u]
    }

    /// Return the number of tree edges between the source and `u`.
    pub fn depth<N: Into<NodeId>>(&self, u: N) -> Option<usize> {
        let u = self.graph.idx(u.into().as_str()).ok()?;
        self.dist[u].map(|_| self.depth[u])
    }

    /// Return the final state of a node.
    pub fn state<N: Into<NodeId>>(&self, u: N) -> NodeState {
        match self.graph.idx(u.into().as_str()) {
            Ok(u) => self.state[u],
            Err(_) => NodeState::Unseen,
        }
    }

    /// Return `true` if `u` has been reached by the search.
    pub fn reached<N: Into<NodeId>>(&self, u: N) -> bool {
        self.state(u) != NodeState::Unseen
    }

    /// Return the expanded nodes in the order of expansion.
    pub fn visited(&self) -> impl Iterator<Item = &'a NodeId> + '_ {
        self.order.iter().map(move |&u| self.graph.id_at(u))
    }

    /// Return the predecessor mapping of all reached nodes.
    pub fn predecessors(&self) -> HashMap<NodeId, NodeId> {
        self.tree_arcs()
            .map(|(p, u)| (self.graph.id_at(u).clone(), self.graph.id_at(p).clone()))
            .collect()
    }

    /// Return the edges `(pred(u), u)` of the search tree.
    pub fn tree_edges(&self) -> Vec<(NodeId, NodeId)> {
        self.tree_arcs()
            .map(|(p, u)| (self.graph.id_at(p).clone(), self.graph.id_at(u).clone()))
            .collect()
    }

    /// The pairs `(pred(u), u)` as node positions.
    fn tree_arcs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.pred.len()).filter_map(move |u| self.pred[u].map(|p| (p, u)))
    }

    /// Return `true` if the search stopped at its destination.
    pub fn found(&self) -> bool {
        self.destination.is_some()
    }

    /// Return the path from the source to the destination.
    ///
    /// Returns `None` if no destination was given or it has not been reached.
    pub fn path(&self) -> Option<Vec<NodeId>> {
        self.destination.and_then(|t| self.path_from(t))
    }

    /// Return the tree path from the source to `u`.
    pub fn path_to<N: Into<NodeId>>(&self, u: N) -> Option<Vec<NodeId>> {
        let u = self.graph.idx(u.into().as_str()).ok()?;
        self.path_from(u)
    }

    fn path_from(&self, t: usize) -> Option<Vec<NodeId>> {
        self.dist[t]?;
        let mut path = vec![self.graph.id_at(t).clone()];
        let mut u = t;
        while let Some(p) = self.pred[u] {
            path.push(self.graph.id_at(p).clone());
            u = p;
            if path.len() > self.pred.len() {
                return None;
            }
        }
        debug_assert_eq!(u, self.source);
        path.reverse();
        Some(path)
    }

    pub(crate) fn depth_at(&self, u: usize) -> Option<usize> {
        self.dist[u].map(|_| self.depth[u])
    }
}

impl<F> Graph<F>
where
    F: Scalar,
{
    /// Run a search from `source`.
    ///
    /// If `destination` is given, the search stops as soon as the destination
    /// is about to be expanded, and [`SearchTree::path`] returns the path to
    /// it. If `reverse` is `true`, the in-edges are followed instead of the
    /// out-edges (only for directed graphs).
    ///
    /// Dijkstra and Prim use the edge costs, which should be non-negative.
    pub fn search<N: Into<NodeId>>(
        &self,
        source: N,
        destination: Option<NodeId>,
        algo: Algorithm,
        reverse: bool,
    ) -> Result<SearchTree<'_, F>> {
        if reverse {
            self.require_directed()?;
        }
        let s = self.idx(source.into().as_str())?;
        let t = match destination {
            Some(t) => Some(self.idx(t.as_str())?),
            None => None,
        };
        Ok(search(self, s, t, algo, reverse))
    }
}

/// The search routine on node positions.
pub(crate) fn search<F>(
    g: &Graph<F>,
    src: usize,
    dst: Option<usize>,
    algo: Algorithm,
    reverse: bool,
) -> SearchTree<'_, F>
where
    F: Scalar,
{
    let n = g.num_nodes();
    let mut frontier = match algo {
        Algorithm::Dfs => Frontier::stack(),
        Algorithm::Bfs | Algorithm::UnweightedSpt => Frontier::queue(),
        Algorithm::Dijkstra | Algorithm::Prim => Frontier::priqueue(n),
    };

    let mut tree = SearchTree {
        graph: g,
        source: src,
        destination: None,
        pred: vec![None; n],
        dist: vec![None; n],
        depth: vec![0; n],
        state: vec![NodeState::Unseen; n],
        order: Vec::with_capacity(n),
    };

    tree.dist[src] = Some(F::zero());
    tree.state[src] = NodeState::Frontier;
    g.draw_node(src, NodeState::Frontier);
    frontier.push(src, F::zero());

    while let Some(u) = frontier.pop() {
        if tree.state[u] == NodeState::Done {
            continue;
        }
        if Some(u) == dst {
            tree.destination = Some(u);
            break;
        }

        tree.state[u] = NodeState::Done;
        tree.order.push(u);
        g.draw_node(u, NodeState::Done);

        let du = tree.dist[u].unwrap_or_else(F::zero);
        for v in g.adjacent(u, reverse) {
            if tree.state[v] == NodeState::Done {
                continue;
            }
            g.draw_edge(u, v);

            let label = match algo {
                Algorithm::Dfs | Algorithm::Bfs | Algorithm::UnweightedSpt => {
                    if tree.state[v] != NodeState::Unseen {
                        continue;
                    }
                    du + F::one()
                }
                Algorithm::Dijkstra | Algorithm::Prim => {
                    let edge = if reverse { g.edge_between(v, u) } else { g.edge_between(u, v) };
                    let cost = edge.map(|e| e.cost).unwrap_or_else(F::zero);
                    let label = if algo == Algorithm::Dijkstra { du + cost } else { cost };
                    if tree.dist[v].map(|dv| label >= dv).unwrap_or(false) {
                        continue;
                    }
                    label
                }
            };

            tree.pred[v] = Some(u);
            tree.dist[v] = Some(label);
            tree.depth[v] = tree.depth[u] + 1;
            if tree.state[v] == NodeState::Unseen {
                tree.state[v] = NodeState::Frontier;
                g.draw_node(v, NodeState::Frontier);
            }
            frontier.push(v, label);
        }
    }

    debug!(
        "{:?} search from {} expanded {} of {} nodes",
        algo,
        g.id_at(src),
        tree.order.len(),
        n
    );

    tree
}

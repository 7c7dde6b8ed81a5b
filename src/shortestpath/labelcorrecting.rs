// Copyright (c) 2016-2022 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

//! FIFO label-correcting shortest paths (Moore-Bellman-Ford with a queue).
//!
//! Nodes whose label changed are kept in a FIFO queue. Each time the
//! predecessor of a node `v` is changed to `u`, the predecessor chain of `u`
//! is followed. If it reaches `v`, the predecessor graph contains a cycle,
//! which always has negative cost, and the algorithm stops.
//!
//! # Example
//!
//! ```
//! use netflow::{Edge, Graph};
//!
//! let mut g = Graph::<i32>::directed();
//! for &(u, v, w) in &[(0, 1, -8), (1, 4, -3), (2, 0, 2), (2, 1, 1), (2, 5, -3), (3, 1, 0), (3, 2, 5),
//!                     (4, 3, 8), (5, 3, -1), (6, 3, 4), (6, 4, 6), (6, 5, 3)]
//! {
//!     g.add_edge(u, v, Edge::new().cost(w)).unwrap();
//! }
//!
//! let tree = g.fifo_label_correcting(6).unwrap().unwrap();
//! assert_eq!(tree.pred(6), None);
//! for &(u, p) in &[(0, 2), (1, 0), (2, 3), (4, 1), (5, 6)] {
//!     assert_eq!(tree.pred(u).unwrap().as_str(), p.to_string());
//! }
//! assert_eq!(tree.distance(4), Some(-2));
//! ```

use crate::error::Result;
use crate::graph::{Graph, NodeId};
use crate::search::SearchTree;
use crate::Scalar;

use log::debug;

use std::collections::VecDeque;

/// A negative cost cycle.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NegativeCycle<F> {
    /// The nodes of the cycle in traversal order.
    ///
    /// The cycle uses the arcs `(nodes[i], nodes[i+1])` and
    /// `(nodes[last], nodes[0])`.
    pub nodes: Vec<NodeId>,
    /// The (negative) total cost of the cycle.
    pub cost: F,
}

/// Labels of a successful label-correcting run.
pub(crate) struct Labels<F> {
    /// Incoming arc and tail of each reached node.
    pub pred: Vec<Option<(usize, usize)>>,
    pub dist: Vec<Option<F>>,
}

/// Run the FIFO label-correcting algorithm.
///
/// `neighs[u]` contains the outgoing arcs of `u` as `(arc, head, cost)`.
/// All `sources` start with distance 0.
///
/// Returns the labels or the arcs of a negative cycle in forward order.
pub(crate) fn fifo_label_correcting<F>(
    neighs: &[Vec<(usize, usize, F)>],
    sources: &[usize],
) -> std::result::Result<Labels<F>, Vec<usize>>
where
    F: Scalar,
{
    let n = neighs.len();
    let mut pred: Vec<Option<(usize, usize)>> = vec![None; n];
    let mut dist = vec![None; n];
    let mut inqueue = vec![false; n];
    let mut queue = VecDeque::with_capacity(n);

    for &s in sources {
        dist[s] = Some(F::zero());
        inqueue[s] = true;
        queue.push_back(s);
    }

    let mut nupdates = 0usize;
    while let Some(u) = queue.pop_front() {
        inqueue[u] = false;
        let du = match dist[u] {
            Some(d) => d,
            None => continue,
        };
        for &(a, v, c) in &neighs[u] {
            let d = du + c;
            if dist[v].map(|dv| d >= dv).unwrap_or(false) {
                continue;
            }
            dist[v] = Some(d);
            pred[v] = Some((a, u));
            nupdates += 1;

            // v is an ancestor of u iff the new predecessor arc closes a cycle
            let mut x = u;
            let mut steps = 0;
            loop {
                if x == v {
                    let mut cycle = Vec::new();
                    let mut y = v;
                    loop {
                        let (a, p) = match pred[y] {
                            Some(pa) => pa,
                            None => break,
                        };
                        cycle.push(a);
                        y = p;
                        if y == v || cycle.len() > n {
                            break;
                        }
                    }
                    cycle.reverse();
                    debug!("Negative cycle with {} arcs after {} updates", cycle.len(), nupdates);
                    return Err(cycle);
                }
                match pred[x] {
                    Some((_, p)) if steps < n => {
                        x = p;
                        steps += 1;
                    }
                    _ => break,
                }
            }

            if !inqueue[v] {
                inqueue[v] = true;
                queue.push_back(v);
            }
        }
    }

    debug!("Label-correcting finished after {} updates", nupdates);
    Ok(Labels { pred, dist })
}

impl<F> Graph<F>
where
    F: Scalar,
{
    /// Compute shortest paths from `source` with arbitrary edge costs.
    ///
    /// Returns the shortest path tree, or a negative cost cycle reachable
    /// from `source`. Edges of undirected graphs can be traversed in both
    /// directions, so a single negative undirected edge is a negative cycle.
    pub fn fifo_label_correcting<N: Into<NodeId>>(
        &self,
        source: N,
    ) -> Result<std::result::Result<SearchTree<'_, F>, NegativeCycle<F>>> {
        let s = self.idx(source.into().as_str())?;
        let arcs = self.arcs();
        let mut neighs = vec![vec![]; self.num_nodes()];
        for (a, &(u, v)) in arcs.iter().enumerate() {
            let cost = self.edge_between(u, v).map(|e| e.cost).unwrap_or_else(F::zero);
            neighs[u].push((a << 1, v, cost));
            if !self.is_directed() {
                neighs[v].push((a << 1 | 1, u, cost));
            }
        }

        match fifo_label_correcting(&neighs, &[s]) {
            Ok(labels) => {
                let pred = labels.pred.iter().map(|p| p.map(|(_, u)| u)).collect();
                Ok(Ok(SearchTree::from_labels(self, s, pred, labels.dist)))
            }
            Err(cycle) => {
                let mut cost = F::zero();
                let mut nodes = Vec::with_capacity(cycle.len());
                for a in cycle {
                    let (u, v) = arcs[a >> 1];
                    let tail = if a & 1 == 0 { u } else { v };
                    cost += self.edge_between(u, v).map(|e| e.cost).unwrap_or_else(F::zero);
                    nodes.push(self.id_at(tail).clone());
                }
                Ok(Err(NegativeCycle { nodes, cost }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fifo_label_correcting;
    use crate::{Edge, Graph};

    #[test]
    fn test_negative_cycle() {
        let mut g = Graph::<i32>::directed();
        g.add_edge("s", "a", Edge::new().cost(4)).unwrap();
        g.add_edge("a", "b", Edge::new().cost(1)).unwrap();
        g.add_edge("b", "c", Edge::new().cost(-3)).unwrap();
        g.add_edge("c", "a", Edge::new().cost(1)).unwrap();

        let cycle = g.fifo_label_correcting("s").unwrap().unwrap_err();
        assert_eq!(cycle.cost, -1);
        assert_eq!(cycle.nodes.len(), 3);
        let n = cycle.nodes.len();
        for i in 0..n {
            assert!(g.contains_edge(&cycle.nodes[i], &cycle.nodes[(i + 1) % n]));
        }

        // the cycle is found from every node on it
        assert!(g.fifo_label_correcting("c").unwrap().is_err());

        g.edge_mut("b", "c").unwrap().cost = -2;
        let tree = g.fifo_label_correcting("s").unwrap().unwrap();
        assert_eq!(tree.distance("c"), Some(3));
        assert_eq!(tree.depth("c"), Some(3));
        assert!(g.fifo_label_correcting("a").unwrap().unwrap().pred("s").is_none());
    }

    #[test]
    fn test_undirected_negative_edge() {
        let mut g = Graph::<i32>::undirected();
        g.add_edge(0, 1, Edge::new().cost(2)).unwrap();
        g.add_edge(1, 2, Edge::new().cost(-1)).unwrap();
        let cycle = g.fifo_label_correcting(0).unwrap().unwrap_err();
        assert_eq!(cycle.cost, -2);
        assert_eq!(cycle.nodes.len(), 2);
    }

    #[test]
    fn test_multiple_sources() {
        // 0 -> 1 -> 2, 3 -> 2
        let neighs = vec![vec![(0, 1, 2)], vec![(1, 2, 2)], vec![], vec![(2, 2, -1)]];
        let labels = match fifo_label_correcting(&neighs, &[0, 1, 2, 3]) {
            Ok(labels) => labels,
            Err(_) => panic!("unexpected cycle"),
        };
        assert_eq!(labels.dist, vec![Some(0), Some(0), Some(-1), Some(0)]);
        assert_eq!(labels.pred[2], Some((2, 3)));
        assert_eq!(labels.pred[0], None);
    }
}

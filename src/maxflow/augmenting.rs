// Copyright (c) 2015-2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Augmenting path algorithms.
//!
//! Each iteration searches a path from the source to the sink in the
//! residual network, pushes the minimal residual capacity along it and
//! stops when the sink cannot be reached anymore. With
//! [`Augmenting::ShortestPath`] this is the algorithm of Edmonds and Karp.

use super::Augmenting;
use crate::collections::Frontier;
use crate::error::Result;
use crate::graph::{Graph, NodeId};
use crate::network::Network;
use crate::Scalar;

use log::{debug, trace};

use std::cmp::{min, Reverse};

const UNSEEN: (usize, usize) = (usize::MAX, usize::MAX);

impl<F> Graph<F>
where
    F: Scalar,
{
    /// Compute a maximum flow with augmenting paths found by depth first
    /// search.
    ///
    /// The number of augmentations is only bounded by the flow value.
    ///
    /// # Example
    ///
    /// ```
    /// use netflow::{Edge, Graph};
    ///
    /// let mut g = Graph::<i32>::directed();
    /// g.add_edge("s", "a", Edge::new().capacity(3)).unwrap();
    /// g.add_edge("s", "b", Edge::new().capacity(2)).unwrap();
    /// g.add_edge("a", "b", Edge::new().capacity(2)).unwrap();
    /// g.add_edge("a", "t", Edge::new().capacity(2)).unwrap();
    /// g.add_edge("b", "t", Edge::new().capacity(3)).unwrap();
    ///
    /// assert_eq!(g.max_flow("s", "t").unwrap(), 5);
    /// assert_eq!(g.edge("s", "a").unwrap().flow, 3);
    /// ```
    pub fn max_flow<N, M>(&mut self, source: N, sink: M) -> Result<F>
    where
        N: Into<NodeId>,
        M: Into<NodeId>,
    {
        let (mut net, s, t) = self.flow_network(source.into(), sink.into())?;
        let value = dfs_augmenting(self, &mut net, s, t);
        net.write_back(self);
        Ok(value)
    }

    /// Compute a maximum flow with augmenting paths chosen by `rule`.
    pub fn max_flow_augmenting<N, M>(&mut self, source: N, sink: M, rule: Augmenting) -> Result<F>
    where
        N: Into<NodeId>,
        M: Into<NodeId>,
    {
        let (mut net, s, t) = self.flow_network(source.into(), sink.into())?;
        let value = augmenting(self, &mut net, s, t, rule);
        net.write_back(self);
        Ok(value)
    }
}

/// Push flow along the path to `t` stored in `pred` and return the amount.
fn augment<F>(g: &Graph<F>, net: &mut Network<F>, pred: &[(usize, usize)], s: usize, t: usize) -> F
where
    F: Scalar,
{
    let mut v = t;
    let mut df = F::max_value();
    while v != s {
        let (a, u) = pred[v];
        df = min(df, net.residual(a));
        v = u;
    }

    debug_assert!(df > F::zero());

    let mut v = t;
    while v != s {
        let (a, u) = pred[v];
        net.push(g, a, df);
        v = u;
    }
    df
}

/// The basic algorithm, each path is found by a depth first search.
pub(crate) fn dfs_augmenting<F>(g: &Graph<F>, net: &mut Network<F>, s: usize, t: usize) -> F
where
    F: Scalar,
{
    let n = net.num_nodes();
    let mut pred = vec![UNSEEN; n];
    // (node, index of the next arc to be considered)
    let mut stack = Vec::with_capacity(n);
    let mut value = F::zero();
    let mut niter = 0;

    loop {
        pred.fill(UNSEEN);
        pred[s] = (0, s);
        stack.clear();
        stack.push((s, 0));

        'dfs: while let Some(&(u, i)) = stack.last() {
            if i == net.neighs(u).len() {
                stack.pop();
                continue;
            }
            let top = stack.len() - 1;
            stack[top].1 += 1;
            let (a, v) = net.neighs(u)[i];
            if pred[v] == UNSEEN && net.residual(a) > F::zero() {
                pred[v] = (a, u);
                if v == t {
                    break 'dfs;
                }
                stack.push((v, 0));
            }
        }

        if pred[t] == UNSEEN {
            break;
        }

        let df = augment(g, net, &pred, s, t);
        trace!("Augment {:?} units", df);
        value += df;
        niter += 1;
    }

    debug!("Augmenting paths (DFS): value {:?} after {} augmentations", value, niter);
    value
}

/// The generalized algorithm.
///
/// The paths are found by a labelling search whose frontier discipline is
/// determined by `rule`. For [`Augmenting::MaxCapacity`] the frontier is
/// ordered by the bottleneck capacity of the best known path, which is
/// updated when a wider path is found.
pub(crate) fn augmenting<F>(g: &Graph<F>, net: &mut Network<F>, s: usize, t: usize, rule: Augmenting) -> F
where
    F: Scalar,
{
    let n = net.num_nodes();
    let mut pred = vec![UNSEEN; n];
    let mut bottleneck = vec![F::zero(); n];
    let mut done = vec![false; n];
    let mut value = F::zero();
    let mut niter = 0;

    loop {
        let mut frontier = match rule {
            Augmenting::Dfs => Frontier::stack(),
            Augmenting::ShortestPath => Frontier::queue(),
            Augmenting::MaxCapacity => Frontier::priqueue(n),
        };
        pred.fill(UNSEEN);
        done.fill(false);
        pred[s] = (0, s);
        bottleneck[s] = F::max_value();
        frontier.push(s, Reverse(F::max_value()));

        while let Some(u) = frontier.pop() {
            if done[u] {
                continue;
            }
            if u == t {
                break;
            }
            done[u] = true;
            for &(a, v) in net.neighs(u) {
                let r = net.residual(a);
                if done[v] || r.is_zero() {
                    continue;
                }
                let b = min(bottleneck[u], r);
                let better = match rule {
                    Augmenting::MaxCapacity => pred[v] == UNSEEN || b > bottleneck[v],
                    _ => pred[v] == UNSEEN,
                };
                if better {
                    pred[v] = (a, u);
                    bottleneck[v] = b;
                    frontier.push(v, Reverse(b));
                }
            }
        }

        if pred[t] == UNSEEN {
            break;
        }

        let df = augment(g, net, &pred, s, t);
        debug_assert!(df == bottleneck[t]);
        trace!("Augment {:?} units", df);
        value += df;
        niter += 1;
    }

    debug!("Augmenting paths ({:?}): value {:?} after {} augmentations", rule, value, niter);
    value
}

#[cfg(test)]
mod tests {
    use crate::maxflow::Augmenting;
    use crate::{Edge, Graph};

    fn network() -> Graph<i64> {
        let mut g = Graph::directed();
        for &(u, v, c) in &[
            ("s", "a", 16),
            ("s", "b", 13),
            ("b", "a", 4),
            ("a", "c", 12),
            ("c", "b", 9),
            ("b", "d", 14),
            ("d", "c", 7),
            ("c", "t", 20),
            ("d", "t", 4),
        ] {
            g.add_edge(u, v, Edge::new().capacity(c)).unwrap();
        }
        g
    }

    #[test]
    fn test_rules() {
        for &rule in &[Augmenting::Dfs, Augmenting::ShortestPath, Augmenting::MaxCapacity] {
            let mut g = network();
            assert_eq!(g.max_flow_augmenting("s", "t", rule).unwrap(), 23);
            let mut cut = g.min_cut("s").unwrap();
            cut.sort();
            assert_eq!(cut.iter().map(|u| u.as_str()).collect::<String>(), "abds");
        }
        let mut g = network();
        assert_eq!(g.max_flow("s", "t").unwrap(), 23);
        assert_eq!(g.flow_value("t").unwrap(), -23);
    }

    #[test]
    fn test_restart_from_zero() {
        let mut g = network();
        g.edge_mut("s", "b").unwrap().flow = 5;
        assert_eq!(g.max_flow("s", "t").unwrap(), 23);
        assert_eq!(g.max_flow("s", "t").unwrap(), 23);
    }
}

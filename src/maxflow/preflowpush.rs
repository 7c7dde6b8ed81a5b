/*
 * Copyright (c) 2017, 2018, 2020, 2021, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! The preflow-push algorithm.
//!
//! The algorithm starts by saturating all arcs leaving the source. Nodes
//! other than source and sink with positive excess are *active* and kept in
//! a frontier, whose discipline is determined by the [`Preflow`] variant.
//! An active node pushes its excess over *admissible* arcs, i.e. residual
//! arcs `(u,v)` with `d(u) = d(v) + 1`. If it cannot push anything, it is
//! relabeled to `1 + min d(v)` over its residual arcs.
//!
//! The initial labels are the exact distances to the sink, computed by a
//! reverse unweighted shortest path search. Nodes that cannot reach the sink
//! get the label `2n+1`, the source gets the label `n`.

use super::Preflow;
use crate::collections::Frontier;
use crate::error::Result;
use crate::graph::{Graph, NodeId};
use crate::network::Network;
use crate::search::{self, Algorithm};
use crate::Scalar;

use log::{debug, warn};

use std::cmp::{min, Reverse};

impl<F> Graph<F>
where
    F: Scalar,
{
    /// Compute a maximum flow with the preflow-push algorithm.
    ///
    /// # Example
    ///
    /// ```
    /// use netflow::{Edge, Graph};
    /// use netflow::maxflow::Preflow;
    ///
    /// let mut g = Graph::<i32>::directed();
    /// g.add_edge(1, 2, Edge::new().capacity(4)).unwrap();
    /// g.add_edge(1, 3, Edge::new().capacity(2)).unwrap();
    /// g.add_edge(2, 3, Edge::new().capacity(3)).unwrap();
    /// g.add_edge(2, 4, Edge::new().capacity(1)).unwrap();
    /// g.add_edge(3, 4, Edge::new().capacity(5)).unwrap();
    ///
    /// for &algo in &[Preflow::Fifo, Preflow::Sap, Preflow::HighestLabel] {
    ///     assert_eq!(g.max_flow_preflowpush(1, 4, algo).unwrap(), 6);
    ///     assert_eq!(g.flow_value(2).unwrap(), 0);
    ///     assert_eq!(g.flow_value(3).unwrap(), 0);
    /// }
    /// ```
    pub fn max_flow_preflowpush<N, M>(&mut self, source: N, sink: M, algo: Preflow) -> Result<F>
    where
        N: Into<NodeId>,
        M: Into<NodeId>,
    {
        let (mut net, s, t) = self.flow_network(source.into(), sink.into())?;
        let value = preflowpush(self, &mut net, s, t, algo);
        net.write_back(self);
        Ok(value)
    }
}

pub(crate) fn preflowpush<F>(g: &Graph<F>, net: &mut Network<F>, s: usize, t: usize, algo: Preflow) -> F
where
    F: Scalar,
{
    let n = net.num_nodes();

    // exact distance labels
    let mut label = vec![2 * n + 1; n];
    let tree = search::search(g, t, None, Algorithm::UnweightedSpt, true);
    let mut nunreachable = 0;
    for (u, l) in label.iter_mut().enumerate() {
        match tree.depth_at(u) {
            Some(d) => *l = d,
            None => nunreachable += 1,
        }
    }
    if nunreachable > 0 {
        warn!("Graph is disconnected: {} nodes cannot reach the sink", nunreachable);
    }
    label[s] = n;

    let mut excess = vec![F::zero(); n];
    let mut active = vec![false; n];
    let mut frontier = match algo {
        Preflow::Fifo => Frontier::queue(),
        Preflow::Sap => Frontier::stack(),
        Preflow::HighestLabel => Frontier::priqueue(n),
    };

    // saturate all arcs leaving the source
    for i in 0..net.neighs(s).len() {
        let (a, v) = net.neighs(s)[i];
        let r = net.residual(a);
        if r > F::zero() {
            net.push(g, a, r);
            excess[v] += r;
            excess[s] -= r;
            if v != t && !active[v] {
                active[v] = true;
                frontier.push(v, Reverse(label[v]));
            }
        }
    }

    let mut npushes = 0usize;
    let mut nrelabels = 0usize;
    while let Some(u) = frontier.pop() {
        active[u] = false;
        debug_assert!(excess[u] > F::zero());

        // push over all admissible arcs
        let mut pushed = false;
        for i in 0..net.neighs(u).len() {
            if excess[u].is_zero() {
                break;
            }
            let (a, v) = net.neighs(u)[i];
            let r = net.residual(a);
            if r.is_zero() || label[u] != label[v] + 1 {
                continue;
            }
            let df = min(excess[u], r);
            net.push(g, a, df);
            excess[u] -= df;
            excess[v] += df;
            pushed = true;
            npushes += 1;
            if v != s && v != t && !active[v] {
                active[v] = true;
                frontier.push(v, Reverse(label[v]));
            }
        }

        if !pushed {
            let newlabel = net
                .neighs(u)
                .iter()
                .filter(|&&(a, _)| net.residual(a) > F::zero())
                .map(|&(_, v)| label[v] + 1)
                .min();
            if let Some(l) = newlabel {
                label[u] = l;
                nrelabels += 1;
                g.draw_relabel(u, l);
            }
        }

        if excess[u] > F::zero() {
            active[u] = true;
            frontier.push(u, Reverse(label[u]));
        }
    }

    debug!(
        "Preflow-push ({:?}): value {:?} after {} pushes and {} relabels",
        algo, excess[t], npushes, nrelabels
    );
    excess[t]
}

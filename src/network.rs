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

//! The residual network of a directed graph.
//!
//! Each edge `e` of the graph (numbered in edge order) is represented by a
//! pair of arcs, the forward arc `2*e` and the backward arc `2*e+1`. The flow
//! vector is shared by both arcs: `flow[2*e]` is the flow on `e` and
//! `flow[2*e+1]` is its remaining capacity. Hence the residual capacity of
//! arc `a` is `flow[a ^ 1]` and pushing `df` units over `a` means
//! `flow[a] += df; flow[a ^ 1] -= df`.

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::Scalar;

pub(crate) struct Network<F> {
    /// Tail and head position of each edge.
    edges: Vec<(usize, usize)>,
    /// The arcs leaving each node as `(arc, head)`, forward arcs first.
    neighs: Vec<Vec<(usize, usize)>>,
    /// Cost of each edge.
    costs: Vec<F>,
    /// Flow and remaining capacity of each edge.
    flow: Vec<F>,
}

impl<F> Network<F>
where
    F: Scalar,
{
    /// Create the residual network of the current flow of `g`.
    ///
    /// Fails if `g` is undirected or some edge has no capacity.
    pub fn new(g: &Graph<F>) -> Result<Self> {
        g.require_directed()?;

        let edges = g.arcs();
        let mut neighs = vec![vec![]; g.num_nodes()];
        let mut costs = Vec::with_capacity(edges.len());
        let mut flow = Vec::with_capacity(2 * edges.len());
        for (e, &(u, v)) in edges.iter().enumerate() {
            let edge = g
                .edge_between(u, v)
                .ok_or_else(|| Error::EdgeNotFound(g.id_at(u).clone(), g.id_at(v).clone()))?;
            let cap = edge
                .capacity
                .ok_or_else(|| Error::MissingCapacity(g.id_at(u).clone(), g.id_at(v).clone()))?;
            costs.push(edge.cost);
            flow.push(edge.flow);
            flow.push(cap - edge.flow);
            neighs[u].push((e << 1, v));
        }
        for (e, &(u, v)) in edges.iter().enumerate() {
            neighs[v].push((e << 1 | 1, u));
        }

        Ok(Network {
            edges,
            neighs,
            costs,
            flow,
        })
    }

    pub fn num_nodes(&self) -> usize {
        self.neighs.len()
    }

    /// Set the flow on all edges to zero.
    pub fn reset(&mut self) {
        for e in 0..self.edges.len() {
            let f = self.flow[e << 1];
            self.flow[e << 1 | 1] += f;
            self.flow[e << 1] = F::zero();
        }
    }

    /// The arcs leaving `u` as `(arc, head)`.
    pub fn neighs(&self, u: usize) -> &[(usize, usize)] {
        &self.neighs[u]
    }

    /// Cost of arc `a`, the backward arc has the negated edge cost.
    pub fn cost(&self, a: usize) -> F {
        let c = self.costs[a >> 1];
        if a & 1 == 0 {
            c
        } else {
            -c
        }
    }

    /// Flow on edge `e`.
    pub fn flow(&self, e: usize) -> F {
        self.flow[e << 1]
    }

    pub fn residual(&self, a: usize) -> F {
        self.flow[a ^ 1]
    }

    /// Push `df` units of flow over arc `a` and notify the drawer of `g`.
    pub fn push(&mut self, g: &Graph<F>, a: usize, df: F) {
        debug_assert!(df <= self.residual(a));
        self.flow[a] += df;
        self.flow[a ^ 1] -= df;
        let (u, v) = self.edges[a >> 1];
        g.draw_flow(u, v, self.flow[a & !1]);
    }

    /// Write the flow back to the edges of `g`.
    pub fn write_back(&self, g: &mut Graph<F>) {
        for (e, &(u, v)) in self.edges.iter().enumerate() {
            if let Some(edge) = g.edge_between_mut(u, v) {
                edge.flow = self.flow(e);
            }
        }
    }
}

#[cfg(test)]
impl<F> Network<F>
where
    F: Scalar,
{
    fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Tail of arc `a`.
    fn src(&self, a: usize) -> usize {
        let (u, v) = self.edges[a >> 1];
        if a & 1 == 0 {
            u
        } else {
            v
        }
    }

    /// Head of arc `a`.
    fn snk(&self, a: usize) -> usize {
        let (u, v) = self.edges[a >> 1];
        if a & 1 == 0 {
            v
        } else {
            u
        }
    }

    /// Capacity of edge `e`.
    fn capacity(&self, e: usize) -> F {
        self.flow[e << 1] + self.flow[e << 1 | 1]
    }
}

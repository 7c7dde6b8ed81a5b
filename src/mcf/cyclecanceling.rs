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

//! The cycle canceling algorithm.
//!
//! Starting from a feasible flow, negative cost cycles in the residual
//! network are searched with the FIFO label-correcting algorithm and
//! saturated until none is left. A feasible flow without negative residual
//! cycle is optimal.

use crate::error::Result;
use crate::graph::Graph;
use crate::network::Network;
use crate::shortestpath::labelcorrecting::fifo_label_correcting;
use crate::Scalar;

use log::{debug, trace};

use std::cmp::min;

impl<F> Graph<F>
where
    F: Scalar,
{
    /// Solve the minimum cost flow problem by cycle canceling.
    ///
    /// Returns `false` if the problem is infeasible.
    ///
    /// # Example
    ///
    /// ```
    /// use netflow::{Edge, Graph, Node};
    ///
    /// let mut g = Graph::<i32>::directed();
    /// g.add_node("s", Node::new().demand(4)).unwrap();
    /// g.add_node("t", Node::new().demand(-4)).unwrap();
    /// g.add_edge("s", "t", Edge::new().cost(10).capacity(4)).unwrap();
    /// g.add_edge("s", "a", Edge::new().cost(1).capacity(3)).unwrap();
    /// g.add_edge("a", "t", Edge::new().cost(1).capacity(3)).unwrap();
    ///
    /// assert!(g.cycle_canceling().unwrap());
    /// assert_eq!(g.flow_cost(), 16);
    /// assert_eq!(g.edge("s", "t").unwrap().flow, 1);
    /// ```
    pub fn cycle_canceling(&mut self) -> Result<bool> {
        if !self.find_feasible_flow()? {
            return Ok(false);
        }

        let mut net = Network::new(self)?;
        let n = net.num_nodes();
        let sources: Vec<usize> = (0..n).collect();
        let mut ncycles = 0usize;

        loop {
            let mut neighs = vec![vec![]; n];
            for (u, arcs) in neighs.iter_mut().enumerate() {
                for &(a, v) in net.neighs(u) {
                    if net.residual(a) > F::zero() {
                        arcs.push((a, v, net.cost(a)));
                    }
                }
            }

            // every node is a source, so every negative cycle is found
            let cycle = match fifo_label_correcting(&neighs, &sources) {
                Ok(_) => break,
                Err(cycle) => cycle,
            };

            let df = cycle
                .iter()
                .map(|&a| net.residual(a))
                .fold(F::max_value(), min);
            debug_assert!(df > F::zero());
            for &a in &cycle {
                net.push(self, a, df);
            }
            ncycles += 1;
            trace!("Canceled cycle of {} arcs with {:?} units", cycle.len(), df);
        }

        net.write_back(self);
        debug!(
            "Cycle canceling: {} cycles canceled, cost {:?}",
            ncycles,
            self.flow_cost()
        );
        Ok(true)
    }
}

/*
 * Copyright (c) 2017, 2018, 2020, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Maximum flow algorithms.
//!
//! All algorithms work on a directed graph whose edges have a capacity. They
//! start from the zero flow, store the maximum flow in the `flow` field of
//! the edges and return its value. The source side of a minimum cut can be
//! obtained afterwards with [`Graph::min_cut`](crate::Graph::min_cut).
//!
//! - [`Graph::max_flow`](crate::Graph::max_flow): augmenting paths found by
//!   depth first search,
//! - [`Graph::max_flow_augmenting`](crate::Graph::max_flow_augmenting):
//!   augmenting paths with a selectable [`Augmenting`] rule,
//! - [`Graph::max_flow_preflowpush`](crate::Graph::max_flow_preflowpush):
//!   preflow-push with a selectable [`Preflow`] node selection.
//!
//! # Example
//!
//! ```
//! use netflow::{Edge, Graph};
//! use netflow::maxflow::Preflow;
//!
//! let mut g = Graph::<i32>::directed();
//! for &(u, v, c) in &[('s', 'a', 5), ('s', 'c', 5), ('a', 'b', 2), ('a', 'c', 1), ('a', 'd', 1),
//!                     ('c', 'd', 2), ('d', 'b', 2), ('b', 't', 4), ('d', 't', 5)]
//! {
//!     g.add_edge(u, v, Edge::new().capacity(c)).unwrap();
//! }
//!
//! assert_eq!(g.max_flow('s', 't').unwrap(), 5);
//! assert_eq!(g.max_flow_preflowpush('s', 't', Preflow::HighestLabel).unwrap(), 5);
//! assert_eq!(g.flow_value('s').unwrap(), 5);
//!
//! let mut cut = g.min_cut('s').unwrap();
//! cut.sort();
//! assert_eq!(cut.iter().map(|u| u.as_str()).collect::<String>(), "acs");
//! ```

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use crate::network::Network;
use crate::Scalar;

use std::str::FromStr;

pub mod augmenting;
pub mod preflowpush;

/// The rule for finding augmenting paths.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Augmenting {
    /// Depth first search.
    Dfs,
    /// Breadth first search, i.e. a path with the least number of arcs.
    ShortestPath,
    /// A path with maximal bottleneck capacity.
    MaxCapacity,
}

impl FromStr for Augmenting {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "DFS" => Ok(Augmenting::Dfs),
            "BFS" | "ShortestPath" => Ok(Augmenting::ShortestPath),
            "MaxCapacity" => Ok(Augmenting::MaxCapacity),
            _ => Err(Error::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// The order in which preflow-push processes the active nodes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Preflow {
    /// First in, first out.
    Fifo,
    /// Last in, first out.
    Sap,
    /// The active node with the largest distance label first.
    HighestLabel,
}

impl FromStr for Preflow {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "FIFO" => Ok(Preflow::Fifo),
            "SAP" => Ok(Preflow::Sap),
            "HighestLabel" => Ok(Preflow::HighestLabel),
            _ => Err(Error::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl<F> Graph<F>
where
    F: Scalar,
{
    /// Resolve source and sink and build the residual network of the zero
    /// flow.
    pub(crate) fn flow_network(&self, source: NodeId, sink: NodeId) -> Result<(Network<F>, usize, usize)> {
        let s = self.idx(source.as_str())?;
        let t = self.idx(sink.as_str())?;
        if s == t {
            return Err(Error::SameSourceSink(source));
        }
        let mut net = Network::new(self)?;
        net.reset();
        Ok((net, s, t))
    }
}

#[cfg(test)]
mod tests {
    use super::{Augmenting, Preflow};
    use crate::{Edge, Error, Graph};

    #[test]
    fn test_parse() {
        assert_eq!("SAP".parse::<Preflow>().unwrap(), Preflow::Sap);
        assert_eq!("BFS".parse::<Augmenting>().unwrap(), Augmenting::ShortestPath);
        assert!("Dinic".parse::<Preflow>().is_err());
    }

    #[test]
    fn test_errors() {
        let mut g = Graph::<i32>::directed();
        g.add_edge(0, 1, Edge::new().capacity(1)).unwrap();
        assert_eq!(g.max_flow(0, 0), Err(Error::SameSourceSink(0.into())));
        assert_eq!(g.max_flow(0, 2), Err(Error::NodeNotFound(2.into())));
        g.add_edge(1, 2, Edge::new()).unwrap();
        assert_eq!(g.max_flow(0, 2), Err(Error::MissingCapacity(1.into(), 2.into())));
    }
}

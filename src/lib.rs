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

#![forbid(unsafe_code)]

//! A graph store with attributed nodes and edges and a collection of
//! combinatorial optimization algorithms working on it.
//!
//! The algorithms read costs, capacities and demands from the graph and
//! write the computed flows back to the edges.
//!
//! # Example
//!
//! ```
//! use netflow::{Edge, Graph, Node};
//! use netflow::mcf::{McfAlgorithm, PivotRule};
//!
//! let mut g = Graph::<i64>::directed();
//! g.add_node("s", Node::new().demand(5)).unwrap();
//! g.add_node("t", Node::new().demand(-5)).unwrap();
//! g.add_edge("s", "a", Edge::new().cost(2).capacity(10)).unwrap();
//! g.add_edge("a", "t", Edge::new().cost(3).capacity(10)).unwrap();
//!
//! let feasible = g.min_cost_flow(McfAlgorithm::Simplex, PivotRule::Dantzig, None).unwrap();
//! assert!(feasible);
//! assert_eq!(g.flow_cost(), 25);
//! ```

use num_traits::{Bounded, NumAssign, NumCast, Signed};
use std::fmt::Debug;

// # Data structures

pub mod attributes;
pub use self::attributes::{Attributes, Value};

pub mod graph;
pub use self::graph::{Edge, Graph, GraphType, Node, NodeId};

pub mod collections;
pub mod disjointset;
pub use self::disjointset::DisjointSet;

mod network;

// # Algorithms

pub mod maxflow;
pub mod mcf;
pub mod mst;
pub mod search;
pub mod shortestpath;

// # Drawing

pub mod draw;

mod error;
pub use self::error::{Error, Result};

/// Numeric type of costs, capacities, flows and demands.
///
/// Implemented for all signed primitive integer types.
pub trait Scalar: NumAssign + Signed + Bounded + NumCast + Ord + Copy + Debug + 'static {}

impl<T> Scalar for T where T: NumAssign + Signed + Bounded + NumCast + Ord + Copy + Debug + 'static {}

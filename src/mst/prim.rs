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

//! Implementation of Prim's algorithm

use crate::error::Result;
use crate::graph::{Graph, NodeId};
use crate::search::{Algorithm, SearchTree};
use crate::Scalar;

impl<F> Graph<F>
where
    F: Scalar,
{
    /// Run Prim's algorithm to solve the *Minimum Spanning Tree*
    /// problem on a graph.
    ///
    /// The tree is grown from `source`. If the graph is not connected, the
    /// returned tree only spans the component of `source`. The tree edges
    /// are the pairs of [`SearchTree::tree_edges`], the distance label of a
    /// node is the cost of its tree edge.
    ///
    /// # Example
    ///
    /// ```
    /// use netflow::{Edge, Graph};
    ///
    /// let mut g = Graph::<i32>::undirected();
    /// for &(u, v, w) in &[('a', 'b', 9), ('a', 'd', 4), ('a', 'e', 5), ('a', 'h', 7), ('b', 'c', 2),
    ///                     ('b', 'f', 4), ('b', 'g', 6), ('c', 'f', 2), ('c', 'h', 8), ('d', 'e', 1),
    ///                     ('d', 'i', 4), ('e', 'h', 9), ('e', 'i', 3), ('f', 'g', 3), ('f', 'h', 9),
    ///                     ('f', 'j', 9), ('g', 'j', 9), ('h', 'i', 10), ('h', 'j', 8), ('i', 'j', 18)]
    /// {
    ///     g.add_edge(u, v, Edge::new().cost(w)).unwrap();
    /// }
    ///
    /// let tree = g.minimum_spanning_tree_prim('a').unwrap();
    /// let mut edges = tree
    ///     .tree_edges()
    ///     .into_iter()
    ///     .map(|(u, v)| if u.as_str() < v.as_str() { (u, v) } else { (v, u) })
    ///     .map(|(u, v)| format!("{}{}", u, v))
    ///     .collect::<Vec<_>>();
    /// edges.sort();
    /// assert_eq!(edges, vec!["ad", "ah", "bc", "cf", "ch", "de", "ei", "fg", "hj"]);
    /// ```
    pub fn minimum_spanning_tree_prim<N: Into<NodeId>>(&self, source: N) -> Result<SearchTree<'_, F>> {
        self.search(source, None, Algorithm::Prim, false)
    }
}

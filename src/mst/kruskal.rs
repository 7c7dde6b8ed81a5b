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

//! Implementation of Kruskal's algorithm

use crate::disjointset::DisjointSet;
use crate::error::Result;
use crate::graph::{Graph, NodeId};
use crate::Scalar;

use log::debug;

impl<F> Graph<F>
where
    F: Scalar,
{
    /// Run Kruskal's algorithm to solve the *Minimum Spanning Tree*
    /// problem on a graph.
    ///
    /// Edges with equal cost are considered in edge order. The algorithm
    /// actually solves a minimum spanning *forest* problem if the graph is
    /// not connected. This can easily be verified by checking the number of
    /// returned edges.
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
    /// let tree = g.minimum_spanning_tree_kruskal().unwrap();
    /// assert_eq!(tree.len(), 9);
    /// let sum: i32 = tree.iter().map(|(u, v)| g.edge(u, v).unwrap().cost).sum();
    /// assert_eq!(sum, 38);
    /// ```
    pub fn minimum_spanning_tree_kruskal(&self) -> Result<Vec<(NodeId, NodeId)>> {
        let mut arcs = self.arcs();
        arcs.sort_by_key(|&(u, v)| self.edge_between(u, v).map(|e| e.cost).unwrap_or_else(F::zero));

        let mut sets = DisjointSet::new();
        for u in self.nodes() {
            sets.add(Some(u))?;
        }

        let n = self.num_nodes();
        let mut tree = Vec::with_capacity(n.saturating_sub(1));
        for (u, v) in arcs {
            if tree.len() + 1 >= n {
                break;
            }
            let (uid, vid) = (self.id_at(u), self.id_at(v));
            if sets.union(uid, vid)? {
                self.draw_edge(u, v);
                tree.push((uid.clone(), vid.clone()));
            }
        }

        debug!("Kruskal: {} tree edges for {} nodes", tree.len(), n);
        Ok(tree)
    }
}

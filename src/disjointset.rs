/*
 * Copyright (c) 2017, 2020, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Union-find on top of a directed graph.
//!
//! Each element is a node of an internal directed graph. A set is a tree in
//! that graph with all edges pointing from a child towards the root, the
//! root is the representative of the set.
//!
//! # Example
//!
//! ```
//! use netflow::DisjointSet;
//!
//! let mut sets = DisjointSet::new();
//! sets.add(vec!["a", "b"]).unwrap();
//! sets.add(vec!["c"]).unwrap();
//! sets.add(vec!["d"]).unwrap();
//!
//! assert!(sets.same_set("a", "b").unwrap());
//! assert!(!sets.same_set("a", "c").unwrap());
//! assert!(sets.union("c", "d").unwrap());
//! assert!(sets.union("d", "b").unwrap());
//! assert!(!sets.union("a", "c").unwrap());
//! assert_eq!(sets.num_sets(), 1);
//! ```

use crate::error::Result;
use crate::graph::{Edge, Graph, Node, NodeId};

/// A collection of disjoint sets.
#[derive(Clone, Debug)]
pub struct DisjointSet {
    /// Edges go from a child to its parent.
    forest: Graph<i32>,
    /// The size of the set for each root.
    sizes: Vec<usize>,
    nsets: usize,
    /// Whether `find` compresses the paths it walks.
    pub optimize: bool,
}

impl Default for DisjointSet {
    fn default() -> Self {
        DisjointSet::new()
    }
}

impl DisjointSet {
    pub fn new() -> Self {
        DisjointSet {
            forest: Graph::directed(),
            sizes: vec![],
            nsets: 0,
            optimize: true,
        }
    }

    /// Number of elements in all sets.
    pub fn len(&self) -> usize {
        self.forest.num_nodes()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of disjoint sets.
    pub fn num_sets(&self) -> usize {
        self.nsets
    }

    /// Add a new set.
    ///
    /// The first member becomes the representative. Fails if any member
    /// is already contained in some set, in which case the members added
    /// before the duplicate remain in the new set.
    pub fn add<I, N>(&mut self, members: I) -> Result<()>
    where
        I: IntoIterator<Item = N>,
        N: Into<NodeId>,
    {
        let mut members = members.into_iter().map(Into::into);
        let root = match members.next() {
            Some(root) => root,
            None => return Ok(()),
        };
        self.forest.add_node(root.clone(), Node::new())?;
        self.sizes.push(1);
        self.nsets += 1;
        let r = self.sizes.len() - 1;

        for u in members {
            self.forest.add_node(u.clone(), Node::new())?;
            self.forest.add_edge(u, root.clone(), Edge::new())?;
            self.sizes.push(0);
            self.sizes[r] += 1;
        }
        Ok(())
    }

    /// Return the representative of the set containing `u`.
    pub fn find<N: Into<NodeId>>(&mut self, u: N) -> Result<NodeId> {
        let u = self.forest.idx(u.into().as_str())?;
        let root = self.find_root(u)?;
        Ok(self.forest.id_at(root).clone())
    }

    /// Return `true` if `u` and `v` are in the same set.
    pub fn same_set<N, M>(&mut self, u: N, v: M) -> Result<bool>
    where
        N: Into<NodeId>,
        M: Into<NodeId>,
    {
        let u = self.forest.idx(u.into().as_str())?;
        let v = self.forest.idx(v.into().as_str())?;
        Ok(self.find_root(u)? == self.find_root(v)?)
    }

    /// Join the sets containing `u` and `v`.
    ///
    /// Returns `false` if both are already in the same set. The root of the
    /// larger set becomes the root of the joined set.
    pub fn union<N, M>(&mut self, u: N, v: M) -> Result<bool>
    where
        N: Into<NodeId>,
        M: Into<NodeId>,
    {
        let u = self.forest.idx(u.into().as_str())?;
        let v = self.forest.idx(v.into().as_str())?;
        let mut ru = self.find_root(u)?;
        let mut rv = self.find_root(v)?;
        if ru == rv {
            return Ok(false);
        }

        if self.sizes[ru] < self.sizes[rv] {
            std::mem::swap(&mut ru, &mut rv);
        }
        let (child, root) = (self.forest.id_at(rv).clone(), self.forest.id_at(ru).clone());
        self.forest.add_edge(child, root, Edge::new())?;
        self.sizes[ru] += self.sizes[rv];
        self.sizes[rv] = 0;
        self.nsets -= 1;
        Ok(true)
    }

    fn parent(&self, u: usize) -> Option<usize> {
        self.forest.outs(u).first().copied()
    }

    fn find_root(&mut self, u: usize) -> Result<usize> {
        let mut root = u;
        while let Some(p) = self.parent(root) {
            root = p;
        }

        if self.optimize {
            let mut x = u;
            while let Some(p) = self.parent(x) {
                if p != root {
                    let xid = self.forest.id_at(x).clone();
                    self.forest.del_edge(xid.clone(), self.forest.id_at(p).clone())?;
                    self.forest.add_edge(xid, self.forest.id_at(root).clone(), Edge::new())?;
                }
                x = p;
            }
        }

        Ok(root)
    }
}

#[cfg(test)]
mod tests {
    use super::DisjointSet;
    use crate::Error;

    fn chain(optimize: bool) -> DisjointSet {
        let mut sets = DisjointSet::new();
        sets.optimize = optimize;
        for i in 0..8 {
            sets.add(Some(i)).unwrap();
        }
        for i in 0..4 {
            sets.union(2 * i, 2 * i + 1).unwrap();
        }
        sets.union(0, 2).unwrap();
        sets.union(4, 6).unwrap();
        sets.union(1, 5).unwrap();
        sets
    }

    #[test]
    fn test_union_find() {
        for &optimize in &[false, true] {
            let mut sets = chain(optimize);
            assert_eq!(sets.num_sets(), 1);
            assert_eq!(sets.len(), 8);
            let root = sets.find(7).unwrap();
            for i in 0..8 {
                assert_eq!(sets.find(i).unwrap(), root);
            }
            assert!(!sets.union(3, 6).unwrap());
        }
    }

    #[test]
    fn test_compression_keeps_root() {
        let mut sets = chain(true);
        let roots: Vec<_> = (0..8).map(|i| sets.find_root(i).unwrap()).collect();
        let before: Vec<_> = roots.iter().map(|&r| sets.forest.id_at(r).clone()).collect();
        // every node is now a direct child of the root
        for i in 0..8 {
            if let Some(p) = sets.parent(i) {
                assert_eq!(sets.parent(p), None);
            }
        }
        let after: Vec<_> = (0..8).map(|i| sets.find(i).unwrap()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_errors() {
        let mut sets = DisjointSet::new();
        sets.add(vec!["a", "b"]).unwrap();
        assert_eq!(sets.add(vec!["b"]), Err(Error::DuplicateNode("b".into())));
        assert_eq!(sets.find("x"), Err(Error::NodeNotFound("x".into())));
        assert_eq!(sets.num_sets(), 1);
    }
}

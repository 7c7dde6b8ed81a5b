/*
 * Copyright (c) 2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! An adjacency list graph with attributed nodes and edges.
//!
//! Nodes are identified by a [`NodeId`], which is the string form of
//! whatever the caller used to name the node (so the node `1` and the node
//! `"1"` are the same). Edges are identified by the pair of their end nodes,
//! there is no separate edge object.
//!
//! Internally each node has a position in the node list. All algorithms of
//! this crate work on these positions, which are stable as long as no node
//! is removed.
//!
//! # Example
//!
//! ```
//! use netflow::{Edge, Graph, Node};
//!
//! let mut g = Graph::<i32>::directed();
//! g.add_node("s", Node::new().demand(2)).unwrap();
//! g.add_edge("s", "t", Edge::new().cost(3).capacity(5)).unwrap();
//!
//! assert_eq!(g.num_nodes(), 2);
//! assert_eq!(g.edge("s", "t").unwrap().cost, 3);
//! assert!(g.add_node("t", Node::new()).is_err());
//! assert!(g.in_neighbors("t").unwrap().any(|u| u.as_str() == "s"));
//! ```

use crate::attributes::{Attributes, Value};
use crate::draw::{Drawer, Event, NodeState};
use crate::error::{Error, Result};
use crate::Scalar;

use either::Either;
use num_traits::Zero;

use std::borrow::Borrow;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// The identifier of a node.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct NodeId(String);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        NodeId(s)
    }
}

impl From<&String> for NodeId {
    fn from(s: &String) -> Self {
        NodeId(s.clone())
    }
}

impl From<&NodeId> for NodeId {
    fn from(u: &NodeId) -> Self {
        u.clone()
    }
}

impl From<char> for NodeId {
    fn from(c: char) -> Self {
        NodeId(c.to_string())
    }
}

macro_rules! node_id_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for NodeId {
            fn from(x: $t) -> Self {
                NodeId(x.to_string())
            }
        })*
    };
}

node_id_from_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Whether the edges of a graph are directed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum GraphType {
    Directed,
    Undirected,
}

/// The data of a node.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Node<F> {
    /// Supply (positive) or demand (negative) of the node.
    pub demand: F,
    /// Free-form attributes.
    pub attrs: Attributes,
}

impl<F: Zero> Default for Node<F> {
    fn default() -> Self {
        Node {
            demand: F::zero(),
            attrs: Attributes::new(),
        }
    }
}

impl<F: Zero> Node<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn demand(mut self, demand: F) -> Self {
        self.demand = demand;
        self
    }

    pub fn attr<V: Into<Value>>(mut self, key: &str, value: V) -> Self {
        self.attrs.insert(key.to_string(), value.into());
        self
    }
}

/// The data of an edge.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Edge<F> {
    /// The cost (or length, or weight) of the edge.
    pub cost: F,
    /// The capacity of the edge. Required by all flow algorithms.
    pub capacity: Option<F>,
    /// The current flow on the edge.
    pub flow: F,
    /// Free-form attributes.
    pub attrs: Attributes,
}

impl<F: Zero> Default for Edge<F> {
    fn default() -> Self {
        Edge {
            cost: F::zero(),
            capacity: None,
            flow: F::zero(),
            attrs: Attributes::new(),
        }
    }
}

impl<F: Zero> Edge<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cost(mut self, cost: F) -> Self {
        self.cost = cost;
        self
    }

    pub fn capacity(mut self, capacity: F) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn flow(mut self, flow: F) -> Self {
        self.flow = flow;
        self
    }

    pub fn attr<V: Into<Value>>(mut self, key: &str, value: V) -> Self {
        self.attrs.insert(key.to_string(), value.into());
        self
    }
}

/// Node data together with its adjacency lists.
#[derive(Clone)]
struct NodeSlot<F> {
    id: NodeId,
    node: Node<F>,
    /// Out-neighbors (directed) or all neighbors (undirected).
    outs: Vec<usize>,
    /// In-neighbors, always empty for undirected graphs.
    ins: Vec<usize>,
}

/// The graph store.
pub struct Graph<F> {
    graph_type: GraphType,
    index: HashMap<NodeId, usize>,
    slots: Vec<NodeSlot<F>>,
    /// Edge data keyed by (tail, head) positions.
    ///
    /// Undirected edges are stored once in the orientation they have been
    /// added with.
    edges: HashMap<(usize, usize), Edge<F>>,
    drawer: RefCell<Option<Box<dyn Drawer<F>>>>,
}

impl<F: Clone> Clone for Graph<F> {
    /// Clone the graph structure and all data but not the drawer.
    fn clone(&self) -> Self {
        Graph {
            graph_type: self.graph_type,
            index: self.index.clone(),
            slots: self.slots.clone(),
            edges: self.edges.clone(),
            drawer: RefCell::new(None),
        }
    }
}

impl<F: fmt::Debug> fmt::Debug for Graph<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut edges = f.debug_list();
        for (u, slot) in self.slots.iter().enumerate() {
            for &v in &slot.outs {
                if let Some(e) = self.edges.get(&(u, v)) {
                    edges.entry(&(&slot.id, &self.slots[v].id, e));
                }
            }
        }
        edges.finish()
    }
}

impl<F> Graph<F>
where
    F: Scalar,
{
    /// Create an empty graph.
    pub fn new(graph_type: GraphType) -> Self {
        Graph {
            graph_type,
            index: HashMap::new(),
            slots: vec![],
            edges: HashMap::new(),
            drawer: RefCell::new(None),
        }
    }

    /// Create an empty directed graph.
    pub fn directed() -> Self {
        Self::new(GraphType::Directed)
    }

    /// Create an empty undirected graph.
    pub fn undirected() -> Self {
        Self::new(GraphType::Undirected)
    }

    pub fn graph_type(&self) -> GraphType {
        self.graph_type
    }

    pub fn is_directed(&self) -> bool {
        self.graph_type == GraphType::Directed
    }

    pub fn num_nodes(&self) -> usize {
        self.slots.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Install a drawer receiving all algorithm events.
    pub fn set_drawer<D>(&mut self, drawer: D)
    where
        D: Drawer<F> + 'static,
    {
        *self.drawer.get_mut() = Some(Box::new(drawer));
    }

    /// Remove and return the current drawer.
    pub fn take_drawer(&mut self) -> Option<Box<dyn Drawer<F>>> {
        self.drawer.get_mut().take()
    }

    /// Add a new node.
    ///
    /// Fails with [`Error::DuplicateNode`] if the node exists.
    pub fn add_node<N: Into<NodeId>>(&mut self, u: N, node: Node<F>) -> Result<()> {
        let u = u.into();
        if self.index.contains_key(&u) {
            return Err(Error::DuplicateNode(u));
        }
        self.insert_node(u, node);
        Ok(())
    }

    fn insert_node(&mut self, u: NodeId, node: Node<F>) -> usize {
        let i = self.slots.len();
        self.index.insert(u.clone(), i);
        self.slots.push(NodeSlot {
            id: u,
            node,
            outs: vec![],
            ins: vec![],
        });
        i
    }

    /// Remove a node and all its incident edges.
    ///
    /// The order of the remaining nodes is preserved.
    pub fn del_node<N: Into<NodeId>>(&mut self, u: N) -> Result<Node<F>> {
        let u = u.into();
        let i = self.idx(u.as_str())?;

        let slot = self.slots.remove(i);
        self.index.remove(&slot.id);

        let shift = |v: usize| if v > i { v - 1 } else { v };
        for s in &mut self.slots {
            s.outs.retain(|&v| v != i);
            s.ins.retain(|&v| v != i);
            for v in s.outs.iter_mut().chain(s.ins.iter_mut()) {
                *v = shift(*v);
            }
        }
        for (k, s) in self.slots.iter().enumerate().skip(i) {
            self.index.insert(s.id.clone(), k);
        }
        self.edges = std::mem::take(&mut self.edges)
            .into_iter()
            .filter(|&((v, w), _)| v != i && w != i)
            .map(|((v, w), e)| ((shift(v), shift(w)), e))
            .collect();

        Ok(slot.node)
    }

    /// Add a new edge from `u` to `v`.
    ///
    /// Missing end nodes are created with default data. Fails with
    /// [`Error::DuplicateEdge`] if the edge exists (in any orientation for
    /// undirected graphs).
    pub fn add_edge<N, M>(&mut self, u: N, v: M, edge: Edge<F>) -> Result<()>
    where
        N: Into<NodeId>,
        M: Into<NodeId>,
    {
        let u = u.into();
        let v = v.into();
        if let (Some(&i), Some(&j)) = (self.index.get(&u), self.index.get(&v)) {
            if self.edge_between(i, j).is_some() {
                return Err(Error::DuplicateEdge(u, v));
            }
        }

        let i = match self.index.get(&u) {
            Some(&i) => i,
            None => self.insert_node(u, Node::default()),
        };
        let j = match self.index.get(&v) {
            Some(&j) => j,
            None => self.insert_node(v, Node::default()),
        };

        self.slots[i].outs.push(j);
        match self.graph_type {
            GraphType::Directed => self.slots[j].ins.push(i),
            GraphType::Undirected if i != j => self.slots[j].outs.push(i),
            GraphType::Undirected => (),
        }
        self.edges.insert((i, j), edge);
        Ok(())
    }

    /// Remove the edge between `u` and `v`.
    pub fn del_edge<N, M>(&mut self, u: N, v: M) -> Result<Edge<F>>
    where
        N: Into<NodeId>,
        M: Into<NodeId>,
    {
        let u = u.into();
        let v = v.into();
        let (i, j) = self.edge_key(&u, &v)?;

        let edge = self.edges.remove(&(i, j)).ok_or(Error::EdgeNotFound(u, v))?;
        remove_first(&mut self.slots[i].outs, j);
        match self.graph_type {
            GraphType::Directed => remove_first(&mut self.slots[j].ins, i),
            GraphType::Undirected if i != j => remove_first(&mut self.slots[j].outs, i),
            GraphType::Undirected => (),
        }
        Ok(edge)
    }

    pub fn contains_node<N: Into<NodeId>>(&self, u: N) -> bool {
        self.index.contains_key(&u.into())
    }

    pub fn contains_edge<N, M>(&self, u: N, v: M) -> bool
    where
        N: Into<NodeId>,
        M: Into<NodeId>,
    {
        self.edge_key(&u.into(), &v.into()).is_ok()
    }

    /// Return the data of a node.
    pub fn node<N: Into<NodeId>>(&self, u: N) -> Result<&Node<F>> {
        let i = self.idx(u.into().as_str())?;
        Ok(&self.slots[i].node)
    }

    /// Return the mutable data of a node.
    pub fn node_mut<N: Into<NodeId>>(&mut self, u: N) -> Result<&mut Node<F>> {
        let i = self.idx(u.into().as_str())?;
        Ok(&mut self.slots[i].node)
    }

    /// Return the data of an edge.
    ///
    /// For undirected graphs both orientations are tried.
    pub fn edge<N, M>(&self, u: N, v: M) -> Result<&Edge<F>>
    where
        N: Into<NodeId>,
        M: Into<NodeId>,
    {
        let key = self.edge_key(&u.into(), &v.into())?;
        Ok(&self.edges[&key])
    }

    /// Return the mutable data of an edge.
    ///
    /// For undirected graphs both orientations are tried.
    pub fn edge_mut<N, M>(&mut self, u: N, v: M) -> Result<&mut Edge<F>>
    where
        N: Into<NodeId>,
        M: Into<NodeId>,
    {
        let u = u.into();
        let v = v.into();
        let key = self.edge_key(&u, &v)?;
        self.edges.get_mut(&key).ok_or(Error::EdgeNotFound(u, v))
    }

    /// Return a free-form attribute of a node.
    pub fn get_node_attr<N: Into<NodeId>>(&self, u: N, key: &str) -> Result<Option<&Value>> {
        Ok(self.node(u)?.attrs.get(key))
    }

    /// Set a free-form attribute of a node and return its old value.
    pub fn set_node_attr<N, V>(&mut self, u: N, key: &str, value: V) -> Result<Option<Value>>
    where
        N: Into<NodeId>,
        V: Into<Value>,
    {
        Ok(self.node_mut(u)?.attrs.insert(key.to_string(), value.into()))
    }

    /// Return a free-form attribute of an edge.
    pub fn get_edge_attr<N, M>(&self, u: N, v: M, key: &str) -> Result<Option<&Value>>
    where
        N: Into<NodeId>,
        M: Into<NodeId>,
    {
        Ok(self.edge(u, v)?.attrs.get(key))
    }

    /// Set a free-form attribute of an edge and return its old value.
    pub fn set_edge_attr<N, M, V>(&mut self, u: N, v: M, key: &str, value: V) -> Result<Option<Value>>
    where
        N: Into<NodeId>,
        M: Into<NodeId>,
        V: Into<Value>,
    {
        Ok(self.edge_mut(u, v)?.attrs.insert(key.to_string(), value.into()))
    }

    /// Return the neighbors of a node.
    ///
    /// These are the out-neighbors for directed graphs.
    pub fn neighbors<N: Into<NodeId>>(&self, u: N) -> Result<impl Iterator<Item = &NodeId>> {
        let i = self.idx(u.into().as_str())?;
        Ok(self.slots[i].outs.iter().map(move |&j| &self.slots[j].id))
    }

    /// Return the out-neighbors of a node in a directed graph.
    pub fn out_neighbors<N: Into<NodeId>>(&self, u: N) -> Result<impl Iterator<Item = &NodeId>> {
        self.require_directed()?;
        self.neighbors(u)
    }

    /// Return the in-neighbors of a node in a directed graph.
    pub fn in_neighbors<N: Into<NodeId>>(&self, u: N) -> Result<impl Iterator<Item = &NodeId>> {
        self.require_directed()?;
        let i = self.idx(u.into().as_str())?;
        Ok(self.slots[i].ins.iter().map(move |&j| &self.slots[j].id))
    }

    /// Return an iterator over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.slots.iter().map(|s| &s.id)
    }

    /// Return an iterator over all edges.
    ///
    /// The edges are ordered by their tail node, edges with the same tail are
    /// ordered as in the tail's adjacency list.
    pub fn edges(&self) -> impl Iterator<Item = (&NodeId, &NodeId)> {
        self.arcs()
            .into_iter()
            .map(move |(i, j)| (&self.slots[i].id, &self.slots[j].id))
    }

    /// Return the total cost `sum(cost * flow)` of the current flow.
    pub fn flow_cost(&self) -> F {
        let mut value = F::zero();
        for e in self.edges.values() {
            value += e.cost * e.flow;
        }
        value
    }

    /// Return the net flow leaving a node (outflow minus inflow).
    pub fn flow_value<N: Into<NodeId>>(&self, u: N) -> Result<F> {
        self.require_directed()?;
        let i = self.idx(u.into().as_str())?;
        let mut value = F::zero();
        for &j in &self.slots[i].outs {
            value += self.edges[&(i, j)].flow;
        }
        for &j in &self.slots[i].ins {
            value -= self.edges[&(j, i)].flow;
        }
        Ok(value)
    }

    /// Return the nodes reachable from `source` in the residual graph of the
    /// current flow.
    ///
    /// After a maximum flow computation these nodes form the source side of a
    /// minimum cut.
    pub fn min_cut<N: Into<NodeId>>(&self, source: N) -> Result<Vec<NodeId>> {
        self.require_directed()?;
        let s = self.idx(source.into().as_str())?;
        let mut seen = vec![false; self.num_nodes()];
        let mut stack = vec![s];
        seen[s] = true;
        while let Some(u) = stack.pop() {
            let fwd = self.slots[u].outs.iter().filter(|&&v| {
                let e = &self.edges[&(u, v)];
                e.capacity.map(|cap| e.flow < cap).unwrap_or(true)
            });
            let bwd = self.slots[u]
                .ins
                .iter()
                .filter(|&&v| self.edges[&(v, u)].flow > F::zero());
            for &v in fwd.chain(bwd) {
                if !seen[v] {
                    seen[v] = true;
                    stack.push(v);
                }
            }
        }
        Ok((0..self.num_nodes())
            .filter(|&u| seen[u])
            .map(|u| self.slots[u].id.clone())
            .collect())
    }

    // Position based access used by the algorithms.

    pub(crate) fn require_directed(&self) -> Result<()> {
        if self.is_directed() {
            Ok(())
        } else {
            Err(Error::NotDirected)
        }
    }

    /// Return the position of a node.
    pub(crate) fn idx(&self, u: &str) -> Result<usize> {
        self.index.get(u).copied().ok_or_else(|| Error::NodeNotFound(u.into()))
    }

    pub(crate) fn id_at(&self, i: usize) -> &NodeId {
        &self.slots[i].id
    }

    pub(crate) fn node_at(&self, i: usize) -> &Node<F> {
        &self.slots[i].node
    }

    /// The out-neighbors (or neighbors) of the node at position `i`.
    pub(crate) fn outs(&self, i: usize) -> &[usize] {
        &self.slots[i].outs
    }

    /// The in-neighbors of the node at position `i`.
    pub(crate) fn ins(&self, i: usize) -> &[usize] {
        &self.slots[i].ins
    }

    /// The neighbors in search direction.
    pub(crate) fn adjacent(&self, i: usize, reverse: bool) -> impl Iterator<Item = usize> + '_ {
        if reverse {
            Either::Left(self.slots[i].ins.iter().copied())
        } else {
            Either::Right(self.slots[i].outs.iter().copied())
        }
    }

    /// Return the edge between two node positions.
    ///
    /// For undirected graphs both orientations are tried.
    pub(crate) fn edge_between(&self, i: usize, j: usize) -> Option<&Edge<F>> {
        self.edges.get(&(i, j)).or_else(|| match self.graph_type {
            GraphType::Undirected => self.edges.get(&(j, i)),
            GraphType::Directed => None,
        })
    }

    pub(crate) fn edge_between_mut(&mut self, i: usize, j: usize) -> Option<&mut Edge<F>> {
        let key = if self.edges.contains_key(&(i, j)) || self.is_directed() {
            (i, j)
        } else {
            (j, i)
        };
        self.edges.get_mut(&key)
    }

    /// Return all edges as pairs of node positions in edge order.
    pub(crate) fn arcs(&self) -> Vec<(usize, usize)> {
        let mut arcs = Vec::with_capacity(self.edges.len());
        for (i, slot) in self.slots.iter().enumerate() {
            for &j in &slot.outs {
                if self.edges.contains_key(&(i, j)) {
                    arcs.push((i, j));
                }
            }
        }
        arcs
    }

    /// Set the flows of all edges, given in edge order.
    pub(crate) fn set_flows(&mut self, flows: &[F]) {
        for ((i, j), &flow) in self.arcs().into_iter().zip(flows) {
            if let Some(e) = self.edges.get_mut(&(i, j)) {
                e.flow = flow;
            }
        }
    }

    fn edge_key(&self, u: &NodeId, v: &NodeId) -> Result<(usize, usize)> {
        let i = self.idx(u.as_str())?;
        let j = self.idx(v.as_str())?;
        if self.edges.contains_key(&(i, j)) {
            Ok((i, j))
        } else if !self.is_directed() && self.edges.contains_key(&(j, i)) {
            Ok((j, i))
        } else {
            Err(Error::EdgeNotFound(u.clone(), v.clone()))
        }
    }

    // Drawer notifications.

    pub(crate) fn draw_node(&self, i: usize, state: NodeState) {
        if let Some(d) = self.drawer.borrow_mut().as_mut() {
            d.draw(Event::NodeState {
                node: &self.slots[i].id,
                state,
            });
        }
    }

    pub(crate) fn draw_edge(&self, i: usize, j: usize) {
        if let Some(d) = self.drawer.borrow_mut().as_mut() {
            d.draw(Event::EdgeRelaxed {
                tail: &self.slots[i].id,
                head: &self.slots[j].id,
            });
        }
    }

    pub(crate) fn draw_flow(&self, i: usize, j: usize, flow: F) {
        if let Some(d) = self.drawer.borrow_mut().as_mut() {
            d.draw(Event::FlowChanged {
                tail: &self.slots[i].id,
                head: &self.slots[j].id,
                flow,
            });
        }
    }

    pub(crate) fn draw_relabel(&self, i: usize, label: usize) {
        if let Some(d) = self.drawer.borrow_mut().as_mut() {
            d.draw(Event::Relabeled {
                node: &self.slots[i].id,
                label,
            });
        }
    }

    pub(crate) fn draw_pivot(&self, entering: (usize, usize), leaving: (usize, usize)) {
        if let Some(d) = self.drawer.borrow_mut().as_mut() {
            d.draw(Event::Pivot {
                entering: (&self.slots[entering.0].id, &self.slots[entering.1].id),
                leaving: (&self.slots[leaving.0].id, &self.slots[leaving.1].id),
            });
        }
    }
}

fn remove_first(list: &mut Vec<usize>, x: usize) {
    if let Some(pos) = list.iter().position(|&y| y == x) {
        list.remove(pos);
    }
}

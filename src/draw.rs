/*
 * Copyright (c) 2020, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Visualizing algorithm progress.
//!
//! The algorithms report every step that is interesting to watch as an
//! [`Event`] to the [`Drawer`] installed on the graph (see
//! [`Graph::set_drawer`](crate::Graph::set_drawer)). What the drawer does
//! with the events (rendering an image, printing a trace, ...) is up to the
//! drawer. The algorithms never depend on it, so running without drawer is
//! the same as running with a drawer that ignores everything.
//!
//! # Example
//!
//! ```
//! use netflow::{Graph, Edge};
//! use netflow::draw::Event;
//! use netflow::search::Algorithm;
//! use std::sync::{Arc, Mutex};
//!
//! let mut g = Graph::<i32>::directed();
//! g.add_edge("a", "b", Edge::new().cost(1)).unwrap();
//! g.add_edge("b", "c", Edge::new().cost(1)).unwrap();
//!
//! let relaxed = Arc::new(Mutex::new(0));
//! let cnt = relaxed.clone();
//! g.set_drawer(move |ev: Event<'_, i32>| {
//!     if let Event::EdgeRelaxed { .. } = ev {
//!         *cnt.lock().unwrap() += 1;
//!     }
//! });
//! g.search("a", None, Algorithm::Bfs, false).unwrap();
//! assert_eq!(*relaxed.lock().unwrap(), 2);
//! ```

use crate::graph::NodeId;

/// The state of a node during a search.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NodeState {
    /// The node has not been reached, yet.
    Unseen,
    /// The node has been reached but not been expanded.
    Frontier,
    /// The node has been expanded.
    Done,
}

/// A single observable algorithm step.
#[derive(Clone, Copy, Debug)]
pub enum Event<'a, F> {
    /// A node changed its search state.
    NodeState { node: &'a NodeId, state: NodeState },
    /// An edge has been explored by a search.
    EdgeRelaxed { tail: &'a NodeId, head: &'a NodeId },
    /// The flow on an edge changed.
    FlowChanged { tail: &'a NodeId, head: &'a NodeId, flow: F },
    /// A node got a new distance label (preflow-push).
    Relabeled { node: &'a NodeId, label: usize },
    /// A simplex pivot exchanged two tree arcs.
    ///
    /// If the entering arc only changed its bound, `entering == leaving`.
    Pivot {
        entering: (&'a NodeId, &'a NodeId),
        leaving: (&'a NodeId, &'a NodeId),
    },
}

/// Receiver of algorithm events.
pub trait Drawer<F> {
    /// Render the state after the step described by `event`.
    fn draw(&mut self, event: Event<'_, F>);
}

impl<F, T> Drawer<F> for T
where
    T: FnMut(Event<'_, F>),
{
    fn draw(&mut self, event: Event<'_, F>) {
        (self)(event)
    }
}

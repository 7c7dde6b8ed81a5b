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

//! Structural errors.
//!
//! Infeasibility of a flow problem is *not* an error, the corresponding
//! functions report it with a `bool`.

use crate::graph::NodeId;

use thiserror::Error;

/// Errors raised by graph operations and algorithms.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("node {0} already exists")]
    DuplicateNode(NodeId),

    #[error("edge ({0}, {1}) already exists")]
    DuplicateEdge(NodeId, NodeId),

    #[error("node {0} does not exist")]
    NodeNotFound(NodeId),

    #[error("edge ({0}, {1}) does not exist")]
    EdgeNotFound(NodeId, NodeId),

    #[error("operation requires a directed graph")]
    NotDirected,

    #[error("edge ({0}, {1}) has no capacity")]
    MissingCapacity(NodeId, NodeId),

    #[error("source and sink must be different nodes, got {0} twice")]
    SameSourceSink(NodeId),

    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("unknown pivot rule: {0}")]
    UnknownPivotRule(String),

    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("pivot limit of {0} reached")]
    PivotLimit(usize),
}

/// Result type of all fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;

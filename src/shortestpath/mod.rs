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

//! Shortest path algorithms.
//!
//! Shortest paths with non-negative costs are computed by
//! [`Graph::search`](crate::Graph::search) with
//! [`Algorithm::Dijkstra`](crate::search::Algorithm::Dijkstra). This module
//! contains the label-correcting algorithm for arbitrary costs.

pub mod labelcorrecting;
pub use self::labelcorrecting::NegativeCycle;

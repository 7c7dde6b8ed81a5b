/*
 * Copyright (c) 2018, 2020, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

use super::BinHeap;

use std::collections::VecDeque;

/// The set of nodes that have been reached but not been processed.
///
/// The variant determines the order in which nodes leave the frontier. The
/// priority passed to [`Frontier::push`] is only used by the priority queue,
/// where the node with the *smallest* priority leaves first (use
/// [`std::cmp::Reverse`] for largest-first).
pub enum Frontier<V> {
    /// Last in, first out.
    Stack(Vec<usize>),
    /// First in, first out.
    Queue(VecDeque<usize>),
    /// Smallest priority first.
    PriQueue(BinHeap<V>),
}

impl<V> Frontier<V>
where
    V: PartialOrd + Clone,
{
    pub fn stack() -> Self {
        Frontier::Stack(Vec::new())
    }

    pub fn queue() -> Self {
        Frontier::Queue(VecDeque::new())
    }

    /// A priority queue for the nodes `0..n`.
    pub fn priqueue(n: usize) -> Self {
        Frontier::PriQueue(BinHeap::new(n))
    }

    /// Add node `u` to the frontier.
    ///
    /// For a priority queue a node already in the frontier gets the new
    /// priority, the other variants always add another entry.
    pub fn push(&mut self, u: usize, priority: V) {
        match self {
            Frontier::Stack(s) => s.push(u),
            Frontier::Queue(q) => q.push_back(u),
            Frontier::PriQueue(h) => h.push(u, priority),
        }
    }

    /// Remove and return the next node.
    pub fn pop(&mut self) -> Option<usize> {
        match self {
            Frontier::Stack(s) => s.pop(),
            Frontier::Queue(q) => q.pop_front(),
            Frontier::PriQueue(h) => h.pop_min().map(|(u, _)| u),
        }
    }
}

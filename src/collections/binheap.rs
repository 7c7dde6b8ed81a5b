// Copyright (c) 2016, 2017, 2020, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Binary heap over node positions.

const NOT_ON_HEAP: usize = usize::MAX;

/// A binary min-heap whose items are the positions `0..n` of the nodes of a
/// graph.
///
/// Each node is contained at most once. Its value can be changed while it is
/// on the heap, which is what a search needs when it finds a better path to a
/// node on the frontier.
pub struct BinHeap<V> {
    /// The heap elements.
    heap: Vec<usize>,
    /// Position on the heap of each node.
    pos: Vec<usize>,
    /// The value (priority) of each node.
    values: Vec<Option<V>>,
}

impl<V> BinHeap<V>
where
    V: PartialOrd + Clone,
{
    /// Create an empty heap for the nodes `0..n`.
    pub fn new(n: usize) -> Self {
        BinHeap {
            heap: Vec::with_capacity(n),
            pos: vec![NOT_ON_HEAP; n],
            values: vec![None; n],
        }
    }

    /// Return `true` if `u` is on the heap.
    fn contains(&self, u: usize) -> bool {
        self.pos[u] != NOT_ON_HEAP
    }

    /// Put `u` with the given value on the heap.
    ///
    /// If `u` is already on the heap its value is replaced (in both
    /// directions).
    pub fn push(&mut self, u: usize, value: V) {
        if self.contains(u) {
            let smaller = self.values[u].as_ref().map(|old| value < *old).unwrap_or(false);
            self.values[u] = Some(value);
            if smaller {
                self.upheap(u);
            } else {
                self.downheap(u);
            }
        } else {
            self.pos[u] = self.heap.len();
            self.heap.push(u);
            self.values[u] = Some(value);
            self.upheap(u);
        }
    }

    /// Remove and return the node with the smallest value.
    pub fn pop_min(&mut self) -> Option<(usize, V)> {
        if self.heap.is_empty() {
            return None;
        }

        let u = self.heap.swap_remove(0);
        self.pos[u] = NOT_ON_HEAP;
        if let Some(&v) = self.heap.first() {
            self.pos[v] = 0;
            self.downheap(v);
        }
        self.values[u].take().map(|value| (u, value))
    }

    /// Move node `u` up in the heap until its parent does not have a larger
    /// value or the root is reached.
    fn upheap(&mut self, u: usize) {
        let mut cur_pos = self.pos[u];
        while cur_pos > 0 {
            let parent_pos = (cur_pos - 1) / 2;
            let parent = self.heap[parent_pos];
            // Using > instead of >= moves the node up as far as possible, so
            // the last node touched with the same value comes first. This
            // makes the search more dfs like.
            if self.values[u] > self.values[parent] {
                break;
            }
            self.heap[cur_pos] = parent;
            self.pos[parent] = cur_pos;
            cur_pos = parent_pos;
        }
        self.heap[cur_pos] = u;
        self.pos[u] = cur_pos;
    }

    /// Move node `u` down in the heap until no child has a smaller value.
    fn downheap(&mut self, u: usize) {
        let n = self.heap.len();
        let mut cur_pos = self.pos[u];
        loop {
            let left_pos = 2 * cur_pos + 1;
            let right_pos = left_pos + 1;
            let next_pos = if left_pos >= n {
                break;
            } else if right_pos >= n || self.values[self.heap[left_pos]] < self.values[self.heap[right_pos]] {
                left_pos
            } else {
                right_pos
            };

            let next = self.heap[next_pos];
            if self.values[u] <= self.values[next] {
                break;
            }

            self.heap[cur_pos] = next;
            self.pos[next] = cur_pos;
            cur_pos = next_pos;
        }
        self.heap[cur_pos] = u;
        self.pos[u] = cur_pos;
    }
}

#[cfg(test)]
mod tests {
    use super::BinHeap;
    use std::cmp::Reverse;

    #[test]
    fn test_heap_order() {
        let mut h = BinHeap::new(6);
        for &(u, v) in &[(0, 5), (1, 3), (2, 8), (3, 1), (4, 9), (5, 4)] {
            h.push(u, v);
        }
        assert_eq!(h.heap.len(), 6);
        h.push(4, 0);
        h.push(3, 6);

        let order: Vec<_> = std::iter::from_fn(|| h.pop_min()).collect();
        assert_eq!(order, vec![(4, 0), (1, 3), (5, 4), (0, 5), (3, 6), (2, 8)]);
        assert!(h.heap.is_empty());
        assert!(!h.contains(4));
    }

    #[test]
    fn test_max_heap() {
        let mut h = BinHeap::new(4);
        h.push(0, Reverse(2));
        h.push(1, Reverse(7));
        h.push(2, Reverse(5));
        h.push(0, Reverse(9));
        assert_eq!(h.pop_min(), Some((0, Reverse(9))));
        assert_eq!(h.pop_min(), Some((1, Reverse(7))));
        assert!(h.contains(2));
        assert_eq!(h.pop_min(), Some((2, Reverse(5))));
        assert_eq!(h.pop_min(), None);
    }
}

/*
 * Copyright (c) 2020, 2021, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

use netflow::maxflow::{Augmenting, Preflow};
use netflow::{Edge, Graph, NodeId};

use std::collections::HashSet;
use std::error::Error;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A layered network with eight inner nodes `0..8` and some zero
/// capacities.
fn layered() -> Result<Graph<i32>, Box<dyn Error>> {
    let mut g = Graph::directed();
    for i in 0..4 {
        g.add_edge("s", i, Edge::new().capacity((i * 5 % 7) as i32 + 1))?;
        for j in 4..8 {
            g.add_edge(i, j, Edge::new().capacity(((i * 3 + j * 5) % 6) as i32))?;
        }
    }
    for j in 4..7 {
        g.add_edge(j, j + 1, Edge::new().capacity(2))?;
    }
    g.add_edge(1, 2, Edge::new().capacity(3))?;
    for j in 4..8 {
        g.add_edge(j, "t", Edge::new().capacity((j * 3 % 5) as i32 + 2))?;
    }
    Ok(g)
}

fn cut_capacity(g: &Graph<i32>, side: &HashSet<NodeId>) -> i32 {
    g.edges()
        .filter(|(u, v)| side.contains(*u) && !side.contains(*v))
        .map(|(u, v)| g.edge(u, v).ok().and_then(|e| e.capacity).unwrap_or(0))
        .sum()
}

/// The minimum cut capacity over all subsets of inner nodes.
fn brute_force_min_cut(g: &Graph<i32>) -> i32 {
    let inner: Vec<NodeId> = g.nodes().filter(|u| u.as_str() != "s" && u.as_str() != "t").cloned().collect();
    let mut best = i32::max_value();
    for mask in 0u32..(1 << inner.len()) {
        let mut side: HashSet<NodeId> = (0..inner.len())
            .filter(|i| mask & (1 << i) != 0)
            .map(|i| inner[i].clone())
            .collect();
        side.insert("s".into());
        best = best.min(cut_capacity(g, &side));
    }
    best
}

fn check_flow(g: &Graph<i32>, value: i32) -> Result<(), Box<dyn Error>> {
    for (u, v) in g.edges() {
        let e = g.edge(u, v)?;
        assert!(0 <= e.flow && Some(e.flow) <= e.capacity);
    }
    for u in g.nodes() {
        let expected = match u.as_str() {
            "s" => value,
            "t" => -value,
            _ => 0,
        };
        assert_eq!(g.flow_value(u)?, expected);
    }

    // the residual reachable set is a minimum cut
    let side: HashSet<NodeId> = g.min_cut("s")?.into_iter().collect();
    assert!(!side.contains(&NodeId::from("t")));
    assert_eq!(cut_capacity(g, &side), value);
    Ok(())
}

#[test]
fn test_all_algorithms() -> Result<(), Box<dyn Error>> {
    init();
    let mut g = layered()?;
    let expected = brute_force_min_cut(&g);

    let value = g.max_flow("s", "t")?;
    assert_eq!(value, expected);
    check_flow(&g, value)?;

    for &rule in &[Augmenting::Dfs, Augmenting::ShortestPath, Augmenting::MaxCapacity] {
        let value = g.max_flow_augmenting("s", "t", rule)?;
        assert_eq!(value, expected, "augmenting {:?}", rule);
        check_flow(&g, value)?;
    }

    for &algo in &[Preflow::Fifo, Preflow::Sap, Preflow::HighestLabel] {
        let value = g.max_flow_preflowpush("s", "t", algo)?;
        assert_eq!(value, expected, "preflow-push {:?}", algo);
        check_flow(&g, value)?;
    }

    Ok(())
}

#[test]
fn test_two_min_cuts() -> Result<(), Box<dyn Error>> {
    init();
    // both {s,a} and {s,a,b} are minimum cuts of capacity 11
    let mut g = Graph::<i32>::directed();
    g.add_edge("s", "a", Edge::new().capacity(10))?;
    g.add_edge("s", "b", Edge::new().capacity(2))?;
    g.add_edge("a", "b", Edge::new().capacity(6))?;
    g.add_edge("a", "t", Edge::new().capacity(3))?;
    g.add_edge("b", "t", Edge::new().capacity(8))?;

    let min_cuts = vec![
        vec![NodeId::from("a"), NodeId::from("s")],
        vec![NodeId::from("a"), NodeId::from("b"), NodeId::from("s")],
    ];
    let check_cut = |g: &Graph<i32>| -> Result<(), Box<dyn Error>> {
        check_flow(g, 11)?;
        let mut cut = g.min_cut("s")?;
        cut.sort();
        assert!(min_cuts.contains(&cut), "unexpected cut {:?}", cut);
        Ok(())
    };

    assert_eq!(g.max_flow("s", "t")?, 11);
    check_cut(&g)?;
    for &rule in &[Augmenting::Dfs, Augmenting::ShortestPath, Augmenting::MaxCapacity] {
        assert_eq!(g.max_flow_augmenting("s", "t", rule)?, 11);
        check_cut(&g)?;
    }
    for &algo in &[Preflow::Fifo, Preflow::Sap, Preflow::HighestLabel] {
        assert_eq!(g.max_flow_preflowpush("s", "t", algo)?, 11);
        check_cut(&g)?;
    }

    Ok(())
}

#[test]
fn test_disconnected() -> Result<(), Box<dyn Error>> {
    init();
    let mut g = Graph::<i32>::directed();
    g.add_edge("s", "a", Edge::new().capacity(4))?;
    g.add_edge("b", "t", Edge::new().capacity(4))?;

    assert_eq!(g.max_flow("s", "t")?, 0);
    for &algo in &[Preflow::Fifo, Preflow::Sap, Preflow::HighestLabel] {
        assert_eq!(g.max_flow_preflowpush("s", "t", algo)?, 0);
        assert_eq!(g.edge("s", "a")?.flow, 0);
    }
    let mut cut = g.min_cut("s")?;
    cut.sort();
    assert_eq!(cut, vec![NodeId::from("a"), NodeId::from("s")]);

    Ok(())
}

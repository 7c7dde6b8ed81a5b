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

use netflow::draw::NodeState;
use netflow::search::Algorithm;
use netflow::{Edge, Error as GraphError, Graph, NodeId};

use std::collections::HashSet;
use std::error::Error;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn ids(path: &[NodeId]) -> Vec<&str> {
    path.iter().map(|u| u.as_str()).collect()
}

/// A directed cycle `0 -> 1 -> 2 -> 3 -> 4 -> 0` with costs 1 to 5.
fn cycle() -> Result<Graph<i32>, Box<dyn Error>> {
    let mut g = Graph::directed();
    for i in 0..5 {
        g.add_edge(i, (i + 1) % 5, Edge::new().cost(i as i32 + 1))?;
    }
    Ok(g)
}

#[test]
fn test_dijkstra_cycle() -> Result<(), Box<dyn Error>> {
    init();
    let g = cycle()?;

    let tree = g.search(0, None, Algorithm::Dijkstra, false)?;
    let dists: Vec<_> = (0..5).map(|u| tree.distance(u)).collect();
    assert_eq!(dists, vec![Some(0), Some(1), Some(3), Some(6), Some(10)]);
    assert_eq!(ids(&tree.path_to(4).unwrap()), vec!["0", "1", "2", "3", "4"]);
    assert_eq!(tree.visited().count(), 5);
    assert!(!tree.found());

    let tree = g.search(0, None, Algorithm::Dijkstra, true)?;
    assert_eq!(tree.distance(4), Some(5));
    assert_eq!(tree.distance(3), Some(9));
    assert_eq!(tree.distance(1), Some(14));
    assert_eq!(tree.pred(3).map(|u| u.as_str()), Some("4"));

    Ok(())
}

#[test]
fn test_destination() -> Result<(), Box<dyn Error>> {
    init();
    let g = cycle()?;

    let tree = g.search(1, Some(3.into()), Algorithm::Bfs, false)?;
    assert!(tree.found());
    assert_eq!(ids(&tree.path().unwrap()), vec!["1", "2", "3"]);
    assert_eq!(tree.state(3), NodeState::Frontier);
    assert_eq!(tree.state(4), NodeState::Unseen);
    assert!(!tree.reached(0));

    Ok(())
}

#[test]
fn test_unweighted_depth() -> Result<(), Box<dyn Error>> {
    init();
    let mut g = Graph::<i32>::undirected();
    for &(u, v) in &[("a", "b"), ("b", "c"), ("a", "d"), ("d", "c"), ("c", "e")] {
        g.add_edge(u, v, Edge::new().cost(100))?;
    }
    g.add_node("x", Default::default())?;

    for &algo in &[Algorithm::Bfs, Algorithm::UnweightedSpt] {
        let tree = g.search("a", None, algo, false)?;
        assert_eq!(tree.distance("e"), Some(3));
        assert_eq!(tree.depth("e"), Some(3));
        assert_eq!(tree.distance("x"), None);
        assert!(!tree.reached("x"));
        assert_eq!(tree.predecessors().len(), 4);
    }

    let tree = g.search("a", None, Algorithm::Dfs, false)?;
    assert_eq!(tree.visited().next().map(|u| u.as_str()), Some("a"));
    assert_eq!(tree.tree_edges().len(), 4);

    Ok(())
}

#[test]
fn test_tree_paths() -> Result<(), Box<dyn Error>> {
    init();
    let mut g = Graph::<i32>::directed();
    for i in 0..12 {
        for &j in &[(i + 1) % 12, (i * 5 + 3) % 12, (i * 7 + 2) % 12] {
            if j != i && !g.contains_edge(i, j) {
                g.add_edge(i, j, Edge::new().cost((i * 3 + j) % 7 + 1))?;
            }
        }
    }
    g.add_edge(12, 0, Edge::new())?;

    for &algo in &[
        Algorithm::Dfs,
        Algorithm::Bfs,
        Algorithm::UnweightedSpt,
        Algorithm::Dijkstra,
        Algorithm::Prim,
    ] {
        let tree = g.search(0, None, algo, false)?;

        // every reachable node is expanded exactly once
        let visited: Vec<_> = tree.visited().collect();
        let unique: HashSet<_> = visited.iter().collect();
        assert_eq!(visited.len(), 12, "{:?}", algo);
        assert_eq!(unique.len(), visited.len(), "{:?}", algo);
        assert!(!tree.reached(12));

        // every tree path starts at the source and has no repeated node
        for u in 0..12 {
            let path = tree.path_to(u).unwrap();
            assert_eq!(path.first(), Some(&NodeId::from(0)));
            assert_eq!(path.last(), Some(&NodeId::from(u)));
            let nodes: HashSet<_> = path.iter().collect();
            assert_eq!(nodes.len(), path.len());
            for w in path.windows(2) {
                assert!(g.contains_edge(&w[0], &w[1]));
            }
        }
    }

    Ok(())
}

#[test]
fn test_search_errors() -> Result<(), Box<dyn Error>> {
    let mut g = Graph::<i32>::undirected();
    g.add_edge(0, 1, Edge::new())?;
    assert_eq!(
        g.search(0, None, Algorithm::Bfs, true).unwrap_err(),
        GraphError::NotDirected
    );
    assert_eq!(
        g.search(7, None, Algorithm::Bfs, false).unwrap_err(),
        GraphError::NodeNotFound(7.into())
    );
    assert_eq!(
        g.search(0, Some(9.into()), Algorithm::Bfs, false).unwrap_err(),
        GraphError::NodeNotFound(9.into())
    );
    Ok(())
}

#[test]
fn test_label_correcting() -> Result<(), Box<dyn Error>> {
    init();
    let mut g = cycle()?;

    // agrees with Dijkstra on non-negative costs
    let lc = g.fifo_label_correcting(0)?.unwrap();
    let dijkstra = g.search(0, None, Algorithm::Dijkstra, false)?;
    for u in 0..5 {
        assert_eq!(lc.distance(u), dijkstra.distance(u));
    }

    // shortcut with negative cost
    g.add_edge(0, 3, Edge::new().cost(-2))?;
    let lc = g.fifo_label_correcting(0)?.unwrap();
    assert_eq!(lc.distance(3), Some(-2));
    assert_eq!(lc.distance(4), Some(2));
    assert_eq!(ids(&lc.path_to(4).unwrap()), vec!["0", "3", "4"]);

    // the whole cycle becomes negative
    g.edge_mut(4, 0)?.cost = -11;
    let cycle = g.fifo_label_correcting(1)?.unwrap_err();
    assert!(cycle.cost < 0);
    let n = cycle.nodes.len();
    let mut cost = 0;
    for i in 0..n {
        cost += g.edge(&cycle.nodes[i], &cycle.nodes[(i + 1) % n])?.cost;
    }
    assert_eq!(cost, cycle.cost);

    Ok(())
}

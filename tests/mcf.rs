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

use netflow::mcf::{ArcState, McfAlgorithm, NetworkSimplex, PivotRule, SolutionState};
use netflow::{Edge, Graph, Node, NodeId};

use std::error::Error;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Two supply nodes `0, 1` and two demand nodes `6, 7` connected by edges
/// `i -> j` for `i < j`, some of them with negative cost.
fn instance() -> Result<Graph<i64>, Box<dyn Error>> {
    let mut g = Graph::directed();
    for u in 0..8 {
        let demand = match u {
            0 => 6,
            1 => 4,
            6 | 7 => -5,
            _ => 0,
        };
        g.add_node(u, Node::new().demand(demand))?;
    }
    for i in 0..8 {
        for j in i + 1..8 {
            if (i + j) % 3 != 0 {
                let cost = ((i * 7 + j * 3) % 9) as i64 - 2;
                let cap = ((i + 2 * j) % 5) as i64 + 2;
                g.add_edge(i, j, Edge::new().cost(cost).capacity(cap))?;
            }
        }
    }
    Ok(g)
}

fn check_feasible(g: &Graph<i64>) -> Result<(), Box<dyn Error>> {
    for (u, v) in g.edges() {
        let e = g.edge(u, v)?;
        assert!(0 <= e.flow && Some(e.flow) <= e.capacity);
    }
    for u in g.nodes() {
        assert_eq!(g.flow_value(u)?, g.node(u)?.demand);
    }
    Ok(())
}

#[test]
fn test_algorithms_agree() -> Result<(), Box<dyn Error>> {
    init();
    let mut costs = vec![];

    let mut g = instance()?;
    assert!(g.min_cost_flow(McfAlgorithm::CycleCanceling, PivotRule::Dantzig, None)?);
    check_feasible(&g)?;
    costs.push(g.flow_cost());

    for &pivot in &[PivotRule::Dantzig, PivotRule::FirstEligible] {
        for root in vec![None, Some(NodeId::from(3)), Some(NodeId::from(7))] {
            let mut g = instance()?;
            assert!(g.min_cost_flow(McfAlgorithm::Simplex, pivot, root)?);
            check_feasible(&g)?;
            costs.push(g.flow_cost());
        }
    }

    assert!(costs.iter().all(|&c| c == costs[0]), "costs differ: {:?}", costs);
    Ok(())
}

#[test]
fn test_optimality_certificate() -> Result<(), Box<dyn Error>> {
    init();
    let mut g = instance()?;
    assert!(g.cycle_canceling()?);
    let cost = g.flow_cost();

    // starting from an optimal flow
    let mut spx = NetworkSimplex::new(&g)?;
    assert!(spx.solve()?);
    assert_eq!(spx.solution_state(), SolutionState::Optimal);
    assert_eq!(spx.value(), cost);

    let mut ntree = 0;
    for (u, v) in g.edges() {
        let rc = spx.reduced_cost(u, v)?;
        let flow = spx.flow(u, v)?;
        let cap = g.edge(u, v)?.capacity.unwrap_or(0);
        match spx.arc_state(u, v)? {
            ArcState::Tree => {
                assert_eq!(rc, 0);
                ntree += 1;
            }
            ArcState::Lower => {
                assert!(rc >= 0);
                assert_eq!(flow, 0);
            }
            ArcState::Upper => {
                assert!(rc <= 0);
                assert_eq!(flow, cap);
            }
        }
    }
    assert_eq!(ntree, g.num_nodes() - 1);

    Ok(())
}

#[test]
fn test_negative_cycle_with_demands() -> Result<(), Box<dyn Error>> {
    init();
    for &algo in &[McfAlgorithm::Simplex, McfAlgorithm::CycleCanceling] {
        let mut g = Graph::<i32>::directed();
        g.add_node("s", Node::new().demand(2))?;
        g.add_node("t", Node::new().demand(-2))?;
        g.add_edge("s", "t", Edge::new().cost(3).capacity(5))?;
        g.add_edge("t", "u", Edge::new().cost(-2).capacity(1))?;
        g.add_edge("u", "s", Edge::new().cost(-2).capacity(4))?;

        assert!(g.min_cost_flow(algo, PivotRule::FirstEligible, None)?);
        // two units s -> t and one unit around the cycle of cost -1
        assert_eq!(g.flow_cost(), 5);
        assert_eq!(g.edge("s", "t")?.flow, 3);
        assert_eq!(g.edge("u", "s")?.flow, 1);
    }
    Ok(())
}

#[test]
fn test_infeasible() -> Result<(), Box<dyn Error>> {
    init();
    for &algo in &[McfAlgorithm::Simplex, McfAlgorithm::CycleCanceling] {
        // balanced, but the capacity is too small
        let mut g = Graph::<i32>::directed();
        g.add_node("a", Node::new().demand(3))?;
        g.add_node("b", Node::new().demand(-3))?;
        g.add_edge("a", "c", Edge::new().cost(1).capacity(5))?;
        g.add_edge("c", "b", Edge::new().cost(1).capacity(2))?;
        assert!(!g.min_cost_flow(algo, PivotRule::Dantzig, None)?);
        assert_eq!(g.num_nodes(), 3);

        // the demand node cannot be reached at all
        let mut g = Graph::<i32>::directed();
        g.add_node("a", Node::new().demand(1))?;
        g.add_node("b", Node::new().demand(-1))?;
        g.add_edge("b", "a", Edge::new().capacity(1))?;
        assert!(!g.min_cost_flow(algo, PivotRule::Dantzig, None)?);
    }

    let mut g = Graph::<i32>::directed();
    g.add_node("a", Node::new().demand(1))?;
    g.add_node("b", Node::new().demand(-1))?;
    let mut spx = NetworkSimplex::new(&g)?;
    assert!(!spx.solve()?);
    assert_eq!(spx.solution_state(), SolutionState::Infeasible);

    Ok(())
}

#[test]
fn test_drawer_pivots() -> Result<(), Box<dyn Error>> {
    use netflow::draw::Event;
    use std::cell::Cell;
    use std::rc::Rc;

    init();
    let mut g = instance()?;
    let flows = Rc::new(Cell::new(0));
    let cnt = flows.clone();
    g.set_drawer(move |ev: Event<'_, i64>| {
        if let Event::FlowChanged { .. } = ev {
            cnt.set(cnt.get() + 1);
        }
    });
    assert!(g.network_simplex(PivotRule::Dantzig, None)?);
    assert!(flows.get() > 0);
    assert!(g.take_drawer().is_some());

    Ok(())
}

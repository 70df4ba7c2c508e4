use std::collections::HashMap;

use fdg_sim::{
    force::fruchterman_reingold, ForceGraph, ForceGraphHelper, Simulation, SimulationParameters,
};
use gridflow_algo::{line_utilization, LoadingBand};
use gridflow_core::{Line, Network, NodeRole};
use petgraph::graph::NodeIndex;
use serde::Serialize;

/// Stroke width of a line with no capacity, and the base of every other width
const BASE_WIDTH: f32 = 0.5;
/// Extra width of a fully loaded line
const LOADING_WIDTH: f32 = 2.0;

#[derive(Debug, Clone, Serialize)]
pub struct LayoutNode {
    pub id: String,
    pub role: NodeRole,
    pub color: &'static str,
    pub demand_mw: f64,
    pub supply_mw: f64,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct LayoutLine {
    pub from: String,
    pub to: String,
    pub capacity_mw: f64,
    pub unit_cost: f64,
    pub flow_mw: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utilization_pct: Option<f64>,
    pub band: LoadingBand,
    pub color: &'static str,
    pub width: f32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LayoutResult {
    pub name: String,
    pub nodes: Vec<LayoutNode>,
    pub lines: Vec<LayoutLine>,
}

/// Fill colour of a node by role
pub fn role_color(role: NodeRole) -> &'static str {
    match role {
        NodeRole::Source => "green",
        NodeRole::Sink => "red",
        NodeRole::Transshipment => "blue",
    }
}

/// Stroke width of a line: grows with loading, `0.5` when unrated
pub fn line_width(line: &Line) -> f32 {
    match line_utilization(line) {
        Some(pct) => (pct / 100.0) as f32 * LOADING_WIDTH + BASE_WIDTH,
        None => BASE_WIDTH,
    }
}

fn style_line(line: &Line) -> LayoutLine {
    let band = LoadingBand::for_line(line);
    LayoutLine {
        from: line.from.to_string(),
        to: line.to.to_string(),
        capacity_mw: line.capacity.value(),
        unit_cost: line.unit_cost,
        flow_mw: line.flow.value(),
        utilization_pct: line_utilization(line),
        band,
        color: band.color(),
        width: line_width(line),
    }
}

/// Runs a force-directed layout on the provided `Network`.
///
/// Nodes and lines come out in identity order. Positions start from random
/// seeds, so only their finiteness is stable between runs.
pub fn layout_network(network: &Network, iterations: usize) -> LayoutResult {
    if network.node_count() == 0 {
        return LayoutResult {
            name: network.name().to_string(),
            ..LayoutResult::default()
        };
    }

    let nodes = network.nodes();
    let mut graph: ForceGraph<usize, ()> = ForceGraph::default();
    let mut index_map: HashMap<&str, NodeIndex> = HashMap::new();
    for (position, node) in nodes.iter().enumerate() {
        let idx = graph.add_force_node(node.id.to_string(), position);
        index_map.insert(node.id.as_str(), idx);
    }

    let lines = network.lines();
    for line in &lines {
        if let (Some(&from), Some(&to)) = (
            index_map.get(line.from.as_str()),
            index_map.get(line.to.as_str()),
        ) {
            graph.add_edge(from, to, ());
        }
    }

    let mut params = SimulationParameters::default();
    params.set_force(fruchterman_reingold(45.0, 0.95));
    let mut simulation = Simulation::from_graph(graph, params);
    for _ in 0..iterations {
        simulation.update(0.02);
    }

    let graph = simulation.get_graph();
    let mut placed = vec![(0.0f32, 0.0f32); nodes.len()];
    for idx in graph.node_indices() {
        let node = &graph[idx];
        placed[node.data] = (node.location.x, node.location.y);
    }

    let layout_nodes = nodes
        .iter()
        .zip(placed)
        .map(|(node, (x, y))| {
            let role = node.role();
            LayoutNode {
                id: node.id.to_string(),
                role,
                color: role_color(role),
                demand_mw: node.demand.value(),
                supply_mw: node.supply.value(),
                x,
                y,
            }
        })
        .collect();

    LayoutResult {
        name: network.name().to_string(),
        nodes: layout_nodes,
        lines: lines.into_iter().map(style_line).collect(),
    }
}

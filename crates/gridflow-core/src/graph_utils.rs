use crate::{Network, NodeRole};
use anyhow::{anyhow, Result};
use petgraph::algo::connected_components;

/// Summary statistics produced by `graph stats` (density/degree/weak components).
#[derive(Debug, serde::Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub weak_components: usize,
    pub min_degree: usize,
    pub avg_degree: f64,
    pub max_degree: usize,
    pub density: f64,
}

/// Calculates graph-level statistics; degree counts both line directions.
pub fn graph_stats(network: &Network) -> Result<GraphStats> {
    let graph = network.graph();
    let node_count = graph.node_count();
    let edge_count = graph.edge_count();
    let degrees: Vec<usize> = graph
        .node_indices()
        .map(|node| graph.neighbors_undirected(node).count())
        .collect();
    let min_degree = degrees.iter().copied().min().unwrap_or(0);
    let max_degree = degrees.iter().copied().max().unwrap_or(0);
    let avg_degree = if node_count == 0 {
        0.0
    } else {
        degrees.iter().sum::<usize>() as f64 / node_count as f64
    };
    // directed: at most n(n-1) lines
    let density = if node_count < 2 {
        0.0
    } else {
        edge_count as f64 / (node_count as f64 * (node_count as f64 - 1.0))
    };
    Ok(GraphStats {
        node_count,
        edge_count,
        weak_components: connected_components(graph),
        min_degree,
        avg_degree,
        max_degree,
        density,
    })
}

/// Export the network to a DOT string (Graphviz) so external tools can draw it.
pub fn export_graph(network: &Network, format: &str) -> Result<String> {
    match format.to_ascii_lowercase().as_str() {
        "graphviz" | "dot" => Ok(render_dot(network)),
        other => Err(anyhow!("unsupported graph export format '{other}'")),
    }
}

fn render_dot(network: &Network) -> String {
    let mut buffer = String::new();
    let title = if network.name().is_empty() {
        "gridflow"
    } else {
        network.name()
    };
    buffer.push_str(&format!("digraph \"{}\" {{\n", sanitize_label(title)));
    for node in network.nodes() {
        let color = match node.role() {
            NodeRole::Source => "green",
            NodeRole::Sink => "red",
            NodeRole::Transshipment => "blue",
        };
        buffer.push_str(&format!(
            "  \"{id}\" [label=\"{id}\\nsupply: {supply}\\ndemand: {demand}\", color={color}];\n",
            id = sanitize_label(node.id.as_str()),
            supply = node.supply.value(),
            demand = node.demand.value(),
        ));
    }
    for line in network.lines() {
        buffer.push_str(&format!(
            "  \"{}\" -> \"{}\" [label=\"flow: {:.1}\\ncap: {}\\ncost: {}\"];\n",
            sanitize_label(line.from.as_str()),
            sanitize_label(line.to.as_str()),
            line.flow.value(),
            line.capacity.value(),
            line.unit_cost
        ));
    }
    buffer.push('}');
    buffer
}

fn sanitize_label(label: &str) -> String {
    label.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Network {
        let mut network = Network::with_name("tri");
        network
            .add_node("A", 0.0, 10.0)
            .unwrap()
            .add_node("B", 0.0, 0.0)
            .unwrap()
            .add_node("C", 10.0, 0.0)
            .unwrap()
            .add_line("A", "B", 10.0, 1.0)
            .unwrap()
            .add_line("B", "C", 10.0, 1.0)
            .unwrap()
            .add_line("A", "C", 5.0, 3.0)
            .unwrap();
        network
    }

    #[test]
    fn test_graph_stats() {
        let stats = graph_stats(&triangle()).unwrap();
        assert_eq!(stats.node_count, 3);
        assert_eq!(stats.edge_count, 3);
        assert_eq!(stats.weak_components, 1);
        assert_eq!(stats.min_degree, 2);
        assert_eq!(stats.max_degree, 2);
        assert!((stats.density - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_graph_stats_empty() {
        let stats = graph_stats(&Network::new()).unwrap();
        assert_eq!(stats.node_count, 0);
        assert_eq!(stats.avg_degree, 0.0);
        assert_eq!(stats.density, 0.0);
    }

    #[test]
    fn test_export_dot() {
        let dot = export_graph(&triangle(), "DOT").unwrap();
        assert!(dot.starts_with("digraph \"tri\" {"));
        assert!(dot.contains("\"A\" -> \"C\""));
        assert!(dot.contains("color=green"));
        assert!(dot.contains("color=red"));
        assert!(dot.ends_with('}'));
    }

    #[test]
    fn test_export_unknown_format() {
        assert!(export_graph(&triangle(), "svg").is_err());
    }
}

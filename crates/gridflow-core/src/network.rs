//! The transmission network container.

use crate::diagnostics::{Category, Diagnostics};
use crate::{
    FlowAssignment, GridError, GridResult, Line, LineKey, Megawatts, Node, NodeId, NodeRole,
};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::BTreeMap;

/// How `add_line` treats an endpoint that has not been added yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EndpointPolicy {
    /// Reject the line with [`GridError::UnknownNode`]
    #[default]
    Strict,
    /// Create the missing endpoint as a zero-balance transshipment node
    Lenient,
}

/// The transmission network graph.
///
/// Nodes are kept in a petgraph `DiGraph` and indexed by [`NodeId`] through a
/// `BTreeMap`, which also fixes the identity order used by [`Network::nodes`].
/// At most one line exists per ordered node pair.
#[derive(Debug, Clone, Default)]
pub struct Network {
    name: String,
    graph: DiGraph<Node, Line>,
    index: BTreeMap<NodeId, NodeIndex>,
    policy: EndpointPolicy,
}

// Sites are nodes and lines are directed edges; direction is the permitted
// transport direction, so a bidirectional corridor is modelled as two lines.

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Select how unknown line endpoints are handled
    pub fn with_endpoint_policy(mut self, policy: EndpointPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn endpoint_policy(&self) -> EndpointPolicy {
        self.policy
    }

    /// Read-only view of the underlying petgraph storage
    pub fn graph(&self) -> &DiGraph<Node, Line> {
        &self.graph
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Add a site, or overwrite the demand/supply of an existing one.
    ///
    /// Lines incident to an overwritten node are kept.
    pub fn add_node(
        &mut self,
        id: impl Into<NodeId>,
        demand: f64,
        supply: f64,
    ) -> GridResult<&mut Self> {
        let id = id.into();
        check_non_negative(&format!("demand of node '{id}'"), demand)?;
        check_non_negative(&format!("supply of node '{id}'"), supply)?;

        let node = Node {
            id: id.clone(),
            demand: Megawatts(demand),
            supply: Megawatts(supply),
        };
        match self.index.get(&id) {
            Some(&idx) => self.graph[idx] = node,
            None => {
                let idx = self.graph.add_node(node);
                self.index.insert(id, idx);
            }
        }
        Ok(self)
    }

    /// Add a line with zero initial flow
    pub fn add_line(
        &mut self,
        from: impl Into<NodeId>,
        to: impl Into<NodeId>,
        capacity: f64,
        unit_cost: f64,
    ) -> GridResult<&mut Self> {
        self.add_line_with_flow(from, to, capacity, unit_cost, 0.0)
    }

    /// Add a line, or overwrite the attributes of the line between the same
    /// ordered pair.
    pub fn add_line_with_flow(
        &mut self,
        from: impl Into<NodeId>,
        to: impl Into<NodeId>,
        capacity: f64,
        unit_cost: f64,
        initial_flow: f64,
    ) -> GridResult<&mut Self> {
        let key = LineKey::new(from, to);
        check_non_negative(&format!("capacity of line {key}"), capacity)?;
        check_finite(&format!("unit cost of line {key}"), unit_cost)?;
        check_finite(&format!("flow of line {key}"), initial_flow)?;

        let source = self.resolve_endpoint(&key, &key.from)?;
        let target = self.resolve_endpoint(&key, &key.to)?;

        let line = Line {
            from: key.from,
            to: key.to,
            capacity: Megawatts(capacity),
            unit_cost,
            flow: Megawatts(initial_flow),
        };
        match self.graph.find_edge(source, target) {
            Some(edge) => self.graph[edge] = line,
            None => {
                self.graph.add_edge(source, target, line);
            }
        }
        Ok(self)
    }

    /// Overwrite the flow of an existing line.
    ///
    /// The value is not clamped to the capacity, so what-if overloads can be
    /// modelled.
    pub fn set_flow(&mut self, from: &str, to: &str, value: f64) -> GridResult<&mut Self> {
        check_finite(&format!("flow of line {from}->{to}"), value)?;
        let edge = self.find_line(from, to).ok_or_else(|| GridError::EdgeNotFound {
            from: from.to_string(),
            to: to.to_string(),
        })?;
        self.graph[edge].flow = Megawatts(value);
        Ok(self)
    }

    /// Replace every line's flow with the values of `flows`.
    ///
    /// The assignment must cover exactly the network's line set; nothing is
    /// written unless it does.
    pub fn apply_flows(&mut self, flows: &FlowAssignment) -> GridResult<()> {
        let mut targets = Vec::with_capacity(flows.len());
        for (key, value) in flows.iter() {
            let edge = self
                .find_line(key.from.as_str(), key.to.as_str())
                .ok_or_else(|| GridError::EdgeNotFound {
                    from: key.from.to_string(),
                    to: key.to.to_string(),
                })?;
            targets.push((edge, value));
        }
        if targets.len() != self.graph.edge_count() {
            return Err(GridError::Validation(format!(
                "flow assignment covers {} of {} lines",
                targets.len(),
                self.graph.edge_count()
            )));
        }
        for (edge, value) in targets {
            self.graph[edge].flow = value;
        }
        Ok(())
    }

    fn resolve_endpoint(&mut self, key: &LineKey, id: &NodeId) -> GridResult<NodeIndex> {
        if let Some(&idx) = self.index.get(id) {
            return Ok(idx);
        }
        match self.policy {
            EndpointPolicy::Strict => Err(GridError::UnknownNode {
                line: key.to_string(),
                node: id.to_string(),
            }),
            EndpointPolicy::Lenient => {
                let idx = self.graph.add_node(Node::new(id, 0.0, 0.0));
                self.index.insert(id.clone(), idx);
                Ok(idx)
            }
        }
    }

    fn find_line(&self, from: &str, to: &str) -> Option<petgraph::graph::EdgeIndex> {
        let source = *self.index.get(from)?;
        let target = *self.index.get(to)?;
        self.graph.find_edge(source, target)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&idx| &self.graph[idx])
    }

    pub fn line(&self, from: &str, to: &str) -> Option<&Line> {
        self.find_line(from, to).map(|edge| &self.graph[edge])
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All nodes in identity order
    pub fn nodes(&self) -> Vec<&Node> {
        self.index.values().map(|&idx| &self.graph[idx]).collect()
    }

    /// All lines in identity order
    pub fn lines(&self) -> Vec<&Line> {
        let mut lines: Vec<&Line> = self.graph.edge_weights().collect();
        lines.sort_by(|a, b| (&a.from, &a.to).cmp(&(&b.from, &b.to)));
        lines
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn line_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Get total supply over all nodes (MW)
    pub fn total_supply_mw(&self) -> Megawatts {
        self.graph.node_weights().map(|n| n.supply).sum()
    }

    /// Get total demand over all nodes (MW)
    pub fn total_demand_mw(&self) -> Megawatts {
        self.graph.node_weights().map(|n| n.demand).sum()
    }

    /// Sum of current flows entering a node
    pub fn inflow_mw(&self, id: &str) -> Option<Megawatts> {
        self.directed_flow(id, Direction::Incoming)
    }

    /// Sum of current flows leaving a node
    pub fn outflow_mw(&self, id: &str) -> Option<Megawatts> {
        self.directed_flow(id, Direction::Outgoing)
    }

    fn directed_flow(&self, id: &str, direction: Direction) -> Option<Megawatts> {
        let idx = *self.index.get(id)?;
        Some(
            self.graph
                .edges_directed(idx, direction)
                .map(|edge| edge.weight().flow)
                .sum(),
        )
    }

    /// Snapshot of the current flows
    pub fn flow_assignment(&self) -> FlowAssignment {
        self.graph
            .edge_weights()
            .map(|line| (line.key(), line.flow))
            .collect()
    }

    /// Cost of `flows` on this network: `Σ flow * unit_cost`.
    ///
    /// Lines missing from the assignment count as carrying no flow.
    pub fn transmission_cost(&self, flows: &FlowAssignment) -> f64 {
        self.lines()
            .iter()
            .map(|line| {
                let flow = flows.get_key(&line.key()).unwrap_or(Megawatts::ZERO);
                flow.value() * line.unit_cost
            })
            .sum()
    }

    /// Cost of the flows currently stored on the lines
    pub fn current_cost(&self) -> f64 {
        self.lines().iter().map(|line| line.cost()).sum()
    }

    /// Compute basic statistics about the network
    pub fn stats(&self) -> NetworkStats {
        let mut stats = NetworkStats {
            num_nodes: self.node_count(),
            num_lines: self.line_count(),
            ..NetworkStats::default()
        };

        for node in self.graph.node_weights() {
            match node.role() {
                NodeRole::Source => stats.num_sources += 1,
                NodeRole::Sink => stats.num_sinks += 1,
                NodeRole::Transshipment => stats.num_transshipment += 1,
            }
            stats.total_supply_mw += node.supply.value();
            stats.total_demand_mw += node.demand.value();
        }
        stats.total_capacity_mw = self.graph.edge_weights().map(|l| l.capacity.value()).sum();
        stats
    }

    /// Validate network data for issues that make solving fail or look odd.
    pub fn validate_into(&self, diag: &mut Diagnostics) {
        let stats = self.stats();

        if stats.num_nodes == 0 {
            diag.error(Category::Structure, "Network has no nodes", None);
            return;
        }

        let imbalance = stats.total_supply_mw - stats.total_demand_mw;
        if imbalance.abs() > 1e-9 * stats.total_supply_mw.max(stats.total_demand_mw).max(1.0) {
            diag.error(
                Category::Balance,
                format!(
                    "Total supply ({:.2} MW) differs from total demand ({:.2} MW) by {:.2} MW",
                    stats.total_supply_mw, stats.total_demand_mw, imbalance
                ),
                None,
            );
        }

        if stats.num_lines == 0 && stats.num_nodes > 1 {
            diag.error(Category::Structure, "Network has multiple nodes but no lines", None);
        }

        for (id, &idx) in &self.index {
            let node = &self.graph[idx];
            let rating = |direction| -> f64 {
                self.graph
                    .edges_directed(idx, direction)
                    .map(|e| e.weight().capacity.value())
                    .sum()
            };
            let entity = format!("Node {id}");
            let entity = Some(entity.as_str());

            if stats.num_nodes > 1 && self.graph.neighbors_undirected(idx).next().is_none() {
                diag.warn(Category::Topology, "Node has no lines", entity);
            }
            let net = node.net().value();
            match node.role() {
                NodeRole::Source if rating(Direction::Outgoing) < net => diag.warn(
                    Category::Capacity,
                    format!(
                        "Outgoing capacity {:.2} MW is below surplus {:.2} MW",
                        rating(Direction::Outgoing),
                        net
                    ),
                    entity,
                ),
                NodeRole::Sink if rating(Direction::Incoming) < -net => diag.warn(
                    Category::Capacity,
                    format!(
                        "Incoming capacity {:.2} MW is below deficit {:.2} MW",
                        rating(Direction::Incoming),
                        -net
                    ),
                    entity,
                ),
                _ => {}
            }
        }

        for line in self.lines() {
            let entity = format!("Line {}", line.key());
            let entity = Some(entity.as_str());
            if line.capacity.value() == 0.0 {
                diag.warn(Category::Capacity, "Line has zero capacity", entity);
            }
            if line.unit_cost < 0.0 {
                diag.warn(
                    Category::Cost,
                    format!("Negative unit cost {}", line.unit_cost),
                    entity,
                );
            }
            if !line.within_capacity() {
                diag.warn(
                    Category::Flow,
                    format!(
                        "Flow {:.2} MW outside [0, {:.2}] MW",
                        line.flow.value(),
                        line.capacity.value()
                    ),
                    entity,
                );
            }
        }
    }
}

fn check_finite(what: &str, value: f64) -> GridResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GridError::InvalidAttribute(format!(
            "{what} must be finite, got {value}"
        )))
    }
}

fn check_non_negative(what: &str, value: f64) -> GridResult<()> {
    check_finite(what, value)?;
    if value < 0.0 {
        return Err(GridError::InvalidAttribute(format!(
            "{what} must be non-negative, got {value}"
        )));
    }
    Ok(())
}

/// Statistics about a network's size and balance
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct NetworkStats {
    pub num_nodes: usize,
    pub num_lines: usize,
    pub num_sources: usize,
    pub num_sinks: usize,
    pub num_transshipment: usize,
    pub total_supply_mw: f64,
    pub total_demand_mw: f64,
    pub total_capacity_mw: f64,
}

impl std::fmt::Display for NetworkStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} nodes ({} sources, {} sinks, {} transshipment), {} lines, supply {:.0} MW, demand {:.0} MW",
            self.num_nodes,
            self.num_sources,
            self.num_sinks,
            self.num_transshipment,
            self.num_lines,
            self.total_supply_mw,
            self.total_demand_mw
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_node() -> Network {
        let mut network = Network::with_name("pair");
        network
            .add_node("G", 0.0, 60.0)
            .unwrap()
            .add_node("L", 60.0, 0.0)
            .unwrap()
            .add_line("G", "L", 100.0, 1.5)
            .unwrap();
        network
    }

    #[test]
    fn test_network_creation() {
        let network = two_node();
        assert_eq!(network.name(), "pair");
        assert_eq!(network.node_count(), 2);
        assert_eq!(network.line_count(), 1);
        assert_eq!(network.line("G", "L").unwrap().unit_cost, 1.5);
        assert!(network.line("L", "G").is_none());
    }

    #[test]
    fn test_add_node_overwrites() {
        let mut network = two_node();
        network.add_node("L", 80.0, 10.0).unwrap();
        let node = network.node("L").unwrap();
        assert_eq!(network.node_count(), 2);
        assert_eq!(node.demand.value(), 80.0);
        assert_eq!(node.role(), NodeRole::Sink);
        // incident lines survive the overwrite
        assert_eq!(network.line_count(), 1);
    }

    #[test]
    fn test_add_line_overwrites_pair() {
        let mut network = two_node();
        network
            .add_line_with_flow("G", "L", 40.0, 9.0, 12.0)
            .unwrap();
        assert_eq!(network.line_count(), 1);
        let line = network.line("G", "L").unwrap();
        assert_eq!(line.capacity.value(), 40.0);
        assert_eq!(line.unit_cost, 9.0);
        assert_eq!(line.flow.value(), 12.0);
    }

    #[test]
    fn test_unknown_endpoint_rejected() {
        let mut network = two_node();
        let err = network.add_line("G", "X", 10.0, 1.0).unwrap_err();
        assert!(matches!(err, GridError::UnknownNode { ref node, .. } if node == "X"));
        assert_eq!(network.line_count(), 1);
        assert!(!network.contains_node("X"));
    }

    #[test]
    fn test_lenient_endpoint_creates_transshipment() {
        let mut network = Network::new().with_endpoint_policy(EndpointPolicy::Lenient);
        network.add_line("P", "Q", 10.0, 1.0).unwrap();
        assert_eq!(network.node_count(), 2);
        assert_eq!(network.node("P").unwrap().role(), NodeRole::Transshipment);
    }

    #[test]
    fn test_invalid_attributes() {
        let mut network = two_node();
        assert!(matches!(
            network.add_node("N", -1.0, 0.0),
            Err(GridError::InvalidAttribute(_))
        ));
        assert!(matches!(
            network.add_node("N", 0.0, f64::NAN),
            Err(GridError::InvalidAttribute(_))
        ));
        assert!(matches!(
            network.add_line("G", "L", -5.0, 1.0),
            Err(GridError::InvalidAttribute(_))
        ));
        assert!(matches!(
            network.add_line("G", "L", 5.0, f64::INFINITY),
            Err(GridError::InvalidAttribute(_))
        ));
    }

    #[test]
    fn test_set_flow_does_not_clamp() {
        let mut network = two_node();
        network.set_flow("G", "L", 250.0).unwrap();
        assert_eq!(network.line("G", "L").unwrap().flow.value(), 250.0);

        let err = network.set_flow("L", "G", 1.0).unwrap_err();
        assert!(matches!(err, GridError::EdgeNotFound { .. }));
    }

    #[test]
    fn test_apply_flows_all_or_nothing() {
        let mut network = two_node();
        network.set_flow("G", "L", 5.0).unwrap();

        let mut orphan = network.flow_assignment();
        orphan.insert(LineKey::new("L", "G"), Megawatts(1.0));
        assert!(network.apply_flows(&orphan).is_err());
        assert_eq!(network.line("G", "L").unwrap().flow.value(), 5.0);

        let mut good = FlowAssignment::new();
        good.insert(LineKey::new("G", "L"), Megawatts(60.0));
        network.apply_flows(&good).unwrap();
        assert_eq!(network.line("G", "L").unwrap().flow.value(), 60.0);

        let empty = FlowAssignment::new();
        assert!(matches!(
            network.apply_flows(&empty),
            Err(GridError::Validation(_))
        ));
    }

    #[test]
    fn test_identity_order() {
        let mut network = Network::new();
        for id in ["C", "A", "B"] {
            network.add_node(id, 0.0, 0.0).unwrap();
        }
        network.add_line("C", "A", 1.0, 0.0).unwrap();
        network.add_line("A", "C", 1.0, 0.0).unwrap();
        network.add_line("A", "B", 1.0, 0.0).unwrap();

        let nodes: Vec<&str> = network.nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(nodes, vec!["A", "B", "C"]);
        let lines: Vec<String> = network.lines().iter().map(|l| l.key().to_string()).collect();
        assert_eq!(lines, vec!["A->B", "A->C", "C->A"]);
    }

    #[test]
    fn test_inflow_outflow_and_cost() {
        let mut network = two_node();
        network.set_flow("G", "L", 60.0).unwrap();
        assert_eq!(network.outflow_mw("G"), Some(Megawatts(60.0)));
        assert_eq!(network.inflow_mw("G"), Some(Megawatts(0.0)));
        assert_eq!(network.inflow_mw("L"), Some(Megawatts(60.0)));
        assert_eq!(network.inflow_mw("missing"), None);
        assert!((network.current_cost() - 90.0).abs() < 1e-12);

        let mut half = FlowAssignment::new();
        half.insert(LineKey::new("G", "L"), Megawatts(30.0));
        assert!((network.transmission_cost(&half) - 45.0).abs() < 1e-12);
        assert_eq!(network.transmission_cost(&FlowAssignment::new()), 0.0);
    }

    #[test]
    fn test_network_stats() {
        let mut network = two_node();
        network.add_node("T", 0.0, 0.0).unwrap();
        let stats = network.stats();
        assert_eq!(stats.num_nodes, 3);
        assert_eq!(stats.num_sources, 1);
        assert_eq!(stats.num_sinks, 1);
        assert_eq!(stats.num_transshipment, 1);
        assert_eq!(stats.total_supply_mw, 60.0);
        assert_eq!(stats.total_demand_mw, 60.0);
        assert_eq!(stats.total_capacity_mw, 100.0);
        assert!(stats.to_string().contains("3 nodes"));
    }

    #[test]
    fn test_network_validation_empty() {
        let network = Network::new();
        let mut diag = Diagnostics::new();
        network.validate_into(&mut diag);
        assert!(diag.has_errors());
        assert!(diag.errors().any(|i| i.message.contains("no nodes")));
    }

    #[test]
    fn test_network_validation_imbalance_and_isolation() {
        let mut network = two_node();
        network.add_node("Z", 5.0, 0.0).unwrap();
        let mut diag = Diagnostics::new();
        network.validate_into(&mut diag);
        assert_eq!(diag.in_category(Category::Balance).count(), 1);
        assert!(diag
            .warnings()
            .any(|i| i.entity.as_deref() == Some("Node Z") && i.message.contains("no lines")));
    }

    #[test]
    fn test_network_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Network>();
    }

    #[test]
    fn test_valid_network_has_no_errors() {
        let network = two_node();
        let mut diag = Diagnostics::new();
        network.validate_into(&mut diag);
        assert!(!diag.has_errors());
    }
}

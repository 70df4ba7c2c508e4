//! Successive-shortest-path solver

use super::residual::ResidualGraph;
use super::SolveResult;
use gridflow_core::{FlowAssignment, GridError, GridResult, Megawatts, Network};
use std::collections::HashMap;
use std::time::Instant;

/// Solver configuration
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Upper bound on augmenting paths before giving up
    pub max_augmentations: usize,
    /// Relative tolerance, scaled by the larger of total supply and total
    /// demand (and never below 1 MW)
    pub tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_augmentations: 100_000,
            tolerance: 1e-9,
        }
    }
}

/// Minimum-cost flow solver.
///
/// The solver never reads the flows currently stored on the network; it
/// only looks at demands, supplies, capacities and costs.
#[derive(Debug, Clone, Default)]
pub struct MinCostFlowSolver {
    config: SolverConfig,
}

impl MinCostFlowSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_max_augmentations(mut self, max_augmentations: usize) -> Self {
        self.config.max_augmentations = max_augmentations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.config.tolerance = tolerance;
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve and write the optimal flows back onto `network`.
    ///
    /// On error the network is left exactly as it was.
    pub fn solve(&self, network: &mut Network) -> GridResult<SolveResult> {
        let result = self.compute(network)?;
        network.apply_flows(&result.assignment)?;
        Ok(result)
    }

    /// Solve without touching the network.
    pub fn compute(&self, network: &Network) -> GridResult<SolveResult> {
        let start = Instant::now();

        if !(self.config.tolerance.is_finite() && self.config.tolerance >= 0.0) {
            return Err(GridError::InvalidAttribute(format!(
                "solver tolerance must be a non-negative finite number, got {}",
                self.config.tolerance
            )));
        }

        let total_supply = network.total_supply_mw().value();
        let total_demand = network.total_demand_mw().value();
        if !(total_supply.is_finite() && total_demand.is_finite()) {
            return Err(GridError::InvalidAttribute(format!(
                "total supply {total_supply} MW or total demand {total_demand} MW is out of range"
            )));
        }
        let eps = self.config.tolerance * total_supply.max(total_demand).max(1.0);

        if (total_supply - total_demand).abs() > eps {
            return Err(GridError::Infeasible(format!(
                "total supply {:.3} MW does not match total demand {:.3} MW",
                total_supply, total_demand
            )));
        }

        let nodes = network.nodes();
        let lines = network.lines();
        let number: HashMap<&str, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id.as_str(), i))
            .collect();

        let super_source = nodes.len();
        let super_sink = nodes.len() + 1;
        let mut graph = ResidualGraph::with_nodes(nodes.len() + 2);
        let mut excess: Vec<f64> = nodes.iter().map(|node| node.net().value()).collect();

        let mut line_arcs = Vec::with_capacity(lines.len());
        for line in &lines {
            let capacity = line.capacity.value();
            if capacity <= 0.0 {
                line_arcs.push(None);
                continue;
            }
            let from = number[line.from.as_str()];
            let to = number[line.to.as_str()];
            let arc = graph.add_arc(from, to, capacity, line.unit_cost);
            if line.unit_cost < 0.0 {
                graph.push(arc, capacity);
                excess[from] -= capacity;
                excess[to] += capacity;
            }
            line_arcs.push(Some(arc));
        }

        // pre-saturating huge negative-cost lines can overflow an excess
        if let Some(value) = excess.iter().find(|value| !value.is_finite()) {
            return Err(GridError::InvalidAttribute(format!(
                "negative-cost line capacities push a node excess to {value} MW"
            )));
        }

        let mut required = 0.0;
        for (node, &value) in excess.iter().enumerate() {
            if value > eps {
                graph.add_arc(super_source, node, value, 0.0);
                required += value;
            } else if value < -eps {
                graph.add_arc(node, super_sink, -value, 0.0);
            }
        }
        if !required.is_finite() {
            return Err(GridError::InvalidAttribute(format!(
                "required transfer {required} MW is out of range"
            )));
        }

        let mut potentials = vec![0.0; graph.node_count()];
        let mut shipped = 0.0;
        let mut augmentations = 0;

        while required - shipped > eps {
            let paths = graph.shortest_paths(super_source, &potentials, eps);
            if paths.distance(super_sink).is_none() {
                break;
            }
            if augmentations >= self.config.max_augmentations {
                return Err(GridError::DidNotConverge {
                    iterations: augmentations,
                });
            }

            // unreachable nodes take the largest distance so that arcs into
            // the reached region keep a non-negative reduced cost
            let farthest = (0..potentials.len())
                .filter_map(|node| paths.distance(node))
                .fold(0.0, f64::max);
            for (node, potential) in potentials.iter_mut().enumerate() {
                *potential += paths.distance(node).unwrap_or(farthest);
            }

            let path = graph.path_to(&paths, super_sink);
            let amount = path
                .iter()
                .map(|&arc| graph.residual(arc))
                .fold(required - shipped, f64::min);
            for &arc in &path {
                graph.push(arc, amount);
            }
            shipped += amount;
            augmentations += 1;
        }

        if required - shipped > eps {
            return Err(GridError::Infeasible(format!(
                "only {:.3} of {:.3} MW can be delivered within line capacities",
                shipped, required
            )));
        }

        let mut assignment = FlowAssignment::new();
        let mut total_cost = 0.0;
        let mut total_flow = 0.0;
        for (line, arc) in lines.iter().zip(&line_arcs) {
            let flow = match arc {
                Some(arc) => snap(graph.flow(*arc), line.capacity.value(), eps),
                None => 0.0,
            };
            total_cost += flow * line.unit_cost;
            total_flow += flow;
            assignment.insert(line.key(), Megawatts(flow));
        }

        Ok(SolveResult {
            assignment,
            total_cost,
            total_flow_mw: total_flow,
            augmentations,
            solve_time: start.elapsed(),
        })
    }
}

/// Pin values within `eps` of the bounds onto the bounds
fn snap(flow: f64, capacity: f64, eps: f64) -> f64 {
    if flow <= eps {
        0.0
    } else if flow >= capacity - eps {
        capacity
    } else {
        flow
    }
}

/// Solve `network` with the default configuration and write back the flows.
pub fn solve_min_cost_flow(network: &mut Network) -> GridResult<SolveResult> {
    MinCostFlowSolver::new().solve(network)
}

//! Case files: a network description plus solver and analysis settings.
//!
//! ```toml
//! name = "Two-bus"
//!
//! [[nodes]]
//! id = "G"
//! supply = 100.0
//!
//! [[nodes]]
//! id = "L"
//! demand = 100.0
//!
//! [[lines]]
//! from = "G"
//! to = "L"
//! capacity = 120.0
//! cost = 2.0
//!
//! [solver]
//! max_augmentations = 1000
//!
//! [analysis]
//! threshold_percent = 80.0
//! ```
//!
//! Node keys may be strings or non-negative integers. Overrides set line
//! flows after the network is built, for what-if analysis without solving.

use anyhow::{Context, Result};
use gridflow_algo::{MinCostFlowSolver, DEFAULT_THRESHOLD_PCT};
use gridflow_core::{EndpointPolicy, GridResult, Network, NodeId};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseFile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub lines: Vec<LineRecord>,
    #[serde(default)]
    pub overrides: Vec<FlowOverride>,
    #[serde(default)]
    pub solver: SolverSection,
    #[serde(default)]
    pub analysis: AnalysisSection,
}

/// String or integer node key
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NodeKey {
    Number(u64),
    Text(String),
}

impl From<NodeKey> for NodeId {
    fn from(key: NodeKey) -> Self {
        match key {
            NodeKey::Number(n) => NodeId::from(n),
            NodeKey::Text(s) => NodeId::from(s),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeRecord {
    pub id: NodeKey,
    #[serde(default)]
    pub demand: f64,
    #[serde(default)]
    pub supply: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LineRecord {
    pub from: NodeKey,
    pub to: NodeKey,
    pub capacity: f64,
    #[serde(default)]
    pub cost: f64,
    /// Initial flow (MW)
    #[serde(default)]
    pub flow: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlowOverride {
    pub from: NodeKey,
    pub to: NodeKey,
    pub flow: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolverSection {
    pub max_augmentations: Option<usize>,
    pub tolerance: Option<f64>,
    #[serde(default)]
    pub lenient_endpoints: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisSection {
    pub threshold_percent: Option<f64>,
}

/// Load a case file, picking the parser from the extension.
///
/// Unknown extensions are tried as TOML, then as JSON.
pub fn load_case(path: &Path) -> Result<CaseFile> {
    let data =
        fs::read_to_string(path).with_context(|| format!("reading case file '{}'", path.display()))?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("toml") => {
            toml::from_str(&data).context("parsing case file toml")
        }
        Some(ext) if ext.eq_ignore_ascii_case("json") => {
            serde_json::from_str(&data).context("parsing case file json")
        }
        _ => toml::from_str(&data)
            .or_else(|_| serde_json::from_str(&data))
            .context("parsing case file"),
    }
}

impl CaseFile {
    /// Build the network: nodes, then lines, then flow overrides.
    pub fn build_network(&self, lenient: bool) -> GridResult<Network> {
        let policy = if lenient || self.solver.lenient_endpoints {
            EndpointPolicy::Lenient
        } else {
            EndpointPolicy::Strict
        };
        let mut network = Network::with_name(self.name.clone()).with_endpoint_policy(policy);

        for node in &self.nodes {
            network.add_node(node.id.clone(), node.demand, node.supply)?;
        }
        for line in &self.lines {
            network.add_line_with_flow(
                line.from.clone(),
                line.to.clone(),
                line.capacity,
                line.cost,
                line.flow,
            )?;
        }
        for edit in &self.overrides {
            let from = NodeId::from(edit.from.clone());
            let to = NodeId::from(edit.to.clone());
            network.set_flow(from.as_str(), to.as_str(), edit.flow)?;
        }
        Ok(network)
    }

    /// Solver configured from the case, with an optional command-line override
    pub fn solver(&self, max_augmentations: Option<usize>) -> MinCostFlowSolver {
        let mut solver = MinCostFlowSolver::new();
        if let Some(limit) = max_augmentations.or(self.solver.max_augmentations) {
            solver = solver.with_max_augmentations(limit);
        }
        if let Some(tolerance) = self.solver.tolerance {
            solver = solver.with_tolerance(tolerance);
        }
        solver
    }

    /// Bottleneck threshold: command line, then case file, then 90 %
    pub fn threshold(&self, threshold: Option<f64>) -> f64 {
        threshold
            .or(self.analysis.threshold_percent)
            .unwrap_or(DEFAULT_THRESHOLD_PCT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridflow_core::GridError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TOML_CASE: &str = r#"
name = "pair"

[[nodes]]
id = "G"
supply = 60.0

[[nodes]]
id = 7
demand = 60.0

[[lines]]
from = "G"
to = 7
capacity = 100.0
cost = 1.5
flow = 10.0

[[overrides]]
from = "G"
to = 7
flow = 25.0

[solver]
max_augmentations = 50

[analysis]
threshold_percent = 75.0
"#;

    fn write_temp(suffix: &str, body: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_toml_case() {
        let file = write_temp(".toml", TOML_CASE);
        let case = load_case(file.path()).unwrap();
        assert_eq!(case.name, "pair");
        assert_eq!(case.nodes[1].id, NodeKey::Number(7));

        let network = case.build_network(false).unwrap();
        assert_eq!(network.name(), "pair");
        assert_eq!(network.line("G", "7").unwrap().flow.value(), 25.0);
        assert_eq!(case.threshold(None), 75.0);
        assert_eq!(case.threshold(Some(50.0)), 50.0);
        assert_eq!(case.solver(None).config().max_augmentations, 50);
        assert_eq!(case.solver(Some(3)).config().max_augmentations, 3);
    }

    #[test]
    fn test_load_json_case_without_extension() {
        let body = r#"{
            "nodes": [{"id": "A", "supply": 5.0}, {"id": "B", "demand": 5.0}],
            "lines": [{"from": "A", "to": "B", "capacity": 5.0}]
        }"#;
        let file = write_temp(".case", body);
        let case = load_case(file.path()).unwrap();
        let network = case.build_network(false).unwrap();
        assert_eq!(network.line_count(), 1);
        assert_eq!(case.threshold(None), DEFAULT_THRESHOLD_PCT);
    }

    #[test]
    fn test_unknown_endpoint_needs_lenient() {
        let body = r#"
[[nodes]]
id = "A"
supply = 1.0

[[lines]]
from = "A"
to = "Z"
capacity = 1.0
"#;
        let file = write_temp(".toml", body);
        let case = load_case(file.path()).unwrap();
        assert!(matches!(
            case.build_network(false),
            Err(GridError::UnknownNode { .. })
        ));
        let network = case.build_network(true).unwrap();
        assert!(network.contains_node("Z"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let file = write_temp(".toml", "[[nodes]]\nid = \"A\"\nload = 3.0\n");
        assert!(load_case(file.path()).is_err());
    }
}

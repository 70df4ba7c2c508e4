//! Network analysis report.
//!
//! A [`NetworkReport`] is a plain snapshot: structure counts, aggregate
//! supply/demand, the cost of the last solve (if one is passed in) and the
//! bottleneck list. Renderers consume it through `Display` or `Serialize`.

use crate::bottleneck::{find_bottlenecks, Bottleneck};
use crate::mcf::SolveResult;
use gridflow_core::{GridResult, Network, NetworkStats};
use serde::Serialize;
use std::fmt;

/// Bottlenecks listed in the text rendering
pub const MAX_LISTED_BOTTLENECKS: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct NetworkReport {
    pub name: String,
    pub stats: NetworkStats,
    /// Cost of the solve the report was built from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
    pub threshold_pct: f64,
    pub bottlenecks: Vec<Bottleneck>,
}

impl NetworkReport {
    /// Build a report from the network's current flows.
    ///
    /// `solution` only contributes the total cost; bottlenecks are always
    /// computed from the flows stored on the network.
    pub fn build(
        network: &Network,
        solution: Option<&SolveResult>,
        threshold_pct: f64,
    ) -> GridResult<Self> {
        Ok(Self {
            name: network.name().to_string(),
            stats: network.stats(),
            total_cost: solution.map(|s| s.total_cost),
            threshold_pct,
            bottlenecks: find_bottlenecks(network, threshold_pct)?,
        })
    }

    /// The `n` most loaded bottlenecks
    pub fn most_critical(&self, n: usize) -> &[Bottleneck] {
        &self.bottlenecks[..n.min(self.bottlenecks.len())]
    }
}

impl fmt::Display for NetworkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = if self.name.is_empty() {
            "Network"
        } else {
            self.name.as_str()
        };
        writeln!(f, "===== {title} - Network Analysis Report =====")?;
        writeln!(f)?;
        writeln!(f, "NETWORK SUMMARY:")?;
        writeln!(f, "  Nodes: {}", self.stats.num_nodes)?;
        writeln!(f, "  Lines: {}", self.stats.num_lines)?;
        writeln!(f, "  Source nodes: {}", self.stats.num_sources)?;
        writeln!(f, "  Sink nodes: {}", self.stats.num_sinks)?;
        writeln!(f, "  Transshipment nodes: {}", self.stats.num_transshipment)?;
        writeln!(f)?;
        writeln!(f, "  Total supply: {:.2} MW", self.stats.total_supply_mw)?;
        writeln!(f, "  Total demand: {:.2} MW", self.stats.total_demand_mw)?;

        if let Some(cost) = self.total_cost {
            writeln!(f)?;
            writeln!(f, "FLOW RESULTS:")?;
            writeln!(f, "  Total transmission cost: {cost:.2}")?;
        }

        if !self.bottlenecks.is_empty() {
            writeln!(f)?;
            writeln!(f, "BOTTLENECK ANALYSIS (>= {:.1}%):", self.threshold_pct)?;
            writeln!(f, "  Bottlenecks found: {}", self.bottlenecks.len())?;
            writeln!(f)?;
            writeln!(f, "  Most critical:")?;
            for (i, b) in self.most_critical(MAX_LISTED_BOTTLENECKS).iter().enumerate() {
                writeln!(
                    f,
                    "  {}. Line {}: capacity {:.2} MW, flow {:.2} MW, utilization {:.1}%",
                    i + 1,
                    b.line,
                    b.capacity_mw,
                    b.flow_mw,
                    b.utilization_pct
                )?;
            }
        }

        writeln!(f)?;
        write!(f, "=============================================")
    }
}

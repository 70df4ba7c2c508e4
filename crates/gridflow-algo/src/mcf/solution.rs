//! Solver output

use gridflow_core::{FlowAssignment, Megawatts};
use serde::Serialize;
use std::time::Duration;

/// Outcome of a successful solve
#[derive(Debug, Clone, Serialize)]
pub struct SolveResult {
    /// Optimal flow on every line
    #[serde(rename = "flows")]
    pub assignment: FlowAssignment,
    /// `Σ flow * unit_cost` over all lines
    pub total_cost: f64,
    /// Sum of all line flows (MW)
    pub total_flow_mw: f64,
    /// Augmenting paths used
    pub augmentations: usize,
    /// Wall-clock solve time
    #[serde(serialize_with = "serialize_millis", rename = "solve_time_ms")]
    pub solve_time: Duration,
}

impl SolveResult {
    pub fn flow(&self, from: &str, to: &str) -> Option<Megawatts> {
        self.assignment.get(from, to)
    }

    pub fn summary(&self) -> String {
        format!(
            "Min-cost flow: total cost {:.2}, {:.2} MW on {} lines, {} augmentations, {:.3} ms",
            self.total_cost,
            self.total_flow_mw,
            self.assignment.len(),
            self.augmentations,
            self.solve_time.as_secs_f64() * 1000.0
        )
    }
}

fn serialize_millis<S: serde::Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(value.as_micros() as f64 / 1000.0)
}

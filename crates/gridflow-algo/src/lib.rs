//! # gridflow-algo: Flow Optimization and Loading Analysis
//!
//! Algorithms that operate on a [`gridflow_core::Network`]:
//!
//! - [`mcf`] - Minimum-cost flow solver (successive shortest paths with node
//!   potentials) that replaces the network's flows with an optimal assignment
//! - [`bottleneck`] - Line utilization and congestion ranking
//! - [`report`] - The read-only summary handed to report/visual front ends
//! - [`sample`] - The six-node demonstration network
//!
//! ## Quick Start
//!
//! ```rust
//! use gridflow_algo::{find_bottlenecks, MinCostFlowSolver};
//! use gridflow_core::Network;
//!
//! let mut network = Network::new();
//! network
//!     .add_node("G", 0.0, 100.0)?
//!     .add_node("L", 100.0, 0.0)?
//!     .add_line("G", "L", 110.0, 2.0)?;
//!
//! let result = MinCostFlowSolver::new().solve(&mut network)?;
//! assert_eq!(result.total_cost, 200.0);
//!
//! let congested = find_bottlenecks(&network, 90.0)?;
//! assert_eq!(congested.len(), 1);
//! # Ok::<(), gridflow_core::GridError>(())
//! ```

pub mod bottleneck;
pub mod mcf;
pub mod report;
pub mod sample;

pub use bottleneck::{
    find_bottlenecks, line_utilization, Bottleneck, LoadingBand, DEFAULT_THRESHOLD_PCT,
};
pub use mcf::{solve_min_cost_flow, MinCostFlowSolver, SolveResult, SolverConfig};
pub use report::NetworkReport;

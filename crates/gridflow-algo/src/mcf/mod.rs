//! Minimum-cost flow
//!
//! Routes every source's surplus to the sinks at the lowest total
//! transmission cost the line capacities allow.
//!
//! ## Formulation
//!
//! ```text
//! minimize    Σ flow(e) * unit_cost(e)
//! subject to  0 <= flow(e) <= capacity(e)                 for every line e
//!             outflow(n) - inflow(n) = supply(n) - demand(n)  for every node n
//! ```
//!
//! ## Method
//!
//! Successive shortest augmenting paths on the residual graph. Node
//! potentials keep reduced costs non-negative so each path is found with
//! Dijkstra. Lines with a negative unit cost start saturated, which turns
//! their residual reverse arc into a positive-cost arc and shifts the
//! endpoint excesses to match.
//!
//! A super source feeds every node with positive excess and a super sink
//! drains every node with negative excess. The problem is feasible exactly
//! when all of that excess can be shipped.
//!
//! ## Example
//!
//! ```
//! use gridflow_algo::mcf::MinCostFlowSolver;
//! use gridflow_algo::sample::sample_network;
//!
//! let mut network = sample_network()?;
//! let result = MinCostFlowSolver::new().solve(&mut network)?;
//! assert!((result.total_cost - 740.0).abs() < 1e-9);
//! println!("{}", result.summary());
//! # Ok::<(), gridflow_core::GridError>(())
//! ```

mod residual;
mod solution;
mod solver;

pub use solution::SolveResult;
pub use solver::{solve_min_cost_flow, MinCostFlowSolver, SolverConfig};

//! Unified error type for gridflow
//!
//! Every fallible operation in the workspace reports a [`GridError`]. The
//! variants split into the network-construction errors (`UnknownNode`,
//! `EdgeNotFound`, `InvalidAttribute`), the solver outcomes (`Infeasible`,
//! `DidNotConverge`) and `Validation` for flow snapshots that do not fit the
//! network. File and parse failures belong to the callers that read files.
//!
//! # Example
//!
//! ```
//! use gridflow_core::{GridError, GridResult, Network};
//!
//! fn build() -> GridResult<Network> {
//!     let mut network = Network::new();
//!     network.add_node("A", 0.0, 10.0)?;
//!     network.add_line("A", "B", 10.0, 1.0)?;
//!     Ok(network)
//! }
//!
//! assert!(matches!(build(), Err(GridError::UnknownNode { .. })));
//! ```

use thiserror::Error;

/// Unified error type for all gridflow operations.
#[derive(Error, Debug)]
pub enum GridError {
    /// A line references a node that has not been added
    #[error("unknown node '{node}' referenced by line {line}")]
    UnknownNode { line: String, node: String },

    /// Manual flow assignment targets a line that does not exist
    #[error("no line between '{from}' and '{to}'")]
    EdgeNotFound { from: String, to: String },

    /// Supply and demand cannot be balanced over the available lines
    #[error("network is infeasible: {0}")]
    Infeasible(String),

    /// The solver hit its augmentation budget
    #[error("solver did not converge within {iterations} augmentations")]
    DidNotConverge { iterations: usize },

    /// Negative, non-finite or out-of-range input value
    #[error("invalid attribute: {0}")]
    InvalidAttribute(String),

    /// Stored flows that do not match the network's line set
    #[error("validation error: {0}")]
    Validation(String),
}

impl GridError {
    /// True for the two solver outcomes that mean "no flow was produced".
    pub fn is_solver_failure(&self) -> bool {
        matches!(
            self,
            GridError::Infeasible(_) | GridError::DidNotConverge { .. }
        )
    }
}

/// Convenience type alias for Results using GridError.
pub type GridResult<T> = Result<T, GridError>;

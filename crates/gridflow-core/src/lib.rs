//! # gridflow-core: Transmission Network Model
//!
//! Provides the data structures for modelling a transmission network as a
//! directed graph of generation/demand sites connected by capacitated, costed
//! transmission lines.
//!
//! ## Design Philosophy
//!
//! Networks are modeled as **directed simple graphs** where:
//! - **Nodes**: sites with a demand and a supply (MW). Their role (source,
//!   sink, transshipment) is derived from the net balance on every read.
//! - **Edges**: transmission lines identified by their ordered endpoint pair,
//!   carrying a capacity, a unit cost and the currently assigned flow.
//!
//! The [`Network`] owns the petgraph storage exclusively and only hands out
//! shared references, so the referential-integrity invariant (every line's
//! endpoints exist) can't be broken from outside.
//!
//! ## Quick Start
//!
//! ```rust
//! use gridflow_core::{Network, NodeRole};
//!
//! let mut network = Network::with_name("Two-bus");
//! network
//!     .add_node("G", 0.0, 100.0)?
//!     .add_node("L", 100.0, 0.0)?
//!     .add_line("G", "L", 120.0, 2.0)?;
//!
//! assert_eq!(network.node("G").unwrap().role(), NodeRole::Source);
//! assert_eq!(network.line_count(), 1);
//! # Ok::<(), gridflow_core::GridError>(())
//! ```
//!
//! ## Modules
//!
//! - [`network`] - The [`Network`] container and its construction API
//! - [`flow`] - [`FlowAssignment`], the per-line flow mapping
//! - [`diagnostics`] - Validation findings
//! - [`graph_utils`] - Structural statistics and Graphviz export
//! - [`units`] - Unit-safe power quantities

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

pub mod diagnostics;
pub mod error;
pub mod flow;
pub mod graph_utils;
pub mod network;
pub mod units;

pub use diagnostics::{Category, DiagnosticIssue, Diagnostics, Severity};
pub use error::{GridError, GridResult};
pub use flow::FlowAssignment;
pub use graph_utils::*;
pub use network::{EndpointPolicy, Network, NetworkStats};
pub use petgraph::graph::NodeIndex;
pub use units::Megawatts;

/// Caller-assigned node key.
///
/// Keys are strings; integer keys are stored as their decimal form. Ordering
/// is lexicographic and defines the identity order used by every enumeration.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    #[inline]
    pub fn new(value: impl Into<String>) -> Self {
        NodeId(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        NodeId(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        NodeId(value)
    }
}

impl From<&NodeId> for NodeId {
    fn from(value: &NodeId) -> Self {
        value.clone()
    }
}

macro_rules! node_id_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for NodeId {
                fn from(value: $ty) -> Self {
                    NodeId(value.to_string())
                }
            }
        )*
    };
}

node_id_from_integer!(i32, i64, u32, u64, usize);

/// Identity of a line: the ordered `(from, to)` endpoint pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub from: NodeId,
    pub to: NodeId,
}

impl LineKey {
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl std::fmt::Display for LineKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}

/// Role of a node in the flow problem, derived from its net balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    /// Supply exceeds demand; emits its surplus
    Source,
    /// Demand exceeds supply; absorbs its deficit
    Sink,
    /// Balanced; passes flow through unchanged
    Transshipment,
}

impl NodeRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeRole::Source => "source",
            NodeRole::Sink => "sink",
            NodeRole::Transshipment => "transshipment",
        }
    }
}

impl std::fmt::Display for NodeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generation/demand site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: NodeId,
    /// Power consumed at the site (MW)
    pub demand: Megawatts,
    /// Power produced at the site (MW)
    pub supply: Megawatts,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, demand: f64, supply: f64) -> Self {
        Self {
            id: id.into(),
            demand: Megawatts(demand),
            supply: Megawatts(supply),
        }
    }

    /// Net injection: `supply - demand`
    pub fn net(&self) -> Megawatts {
        self.supply - self.demand
    }

    pub fn role(&self) -> NodeRole {
        let net = self.net().value();
        if net > 0.0 {
            NodeRole::Source
        } else if net < 0.0 {
            NodeRole::Sink
        } else {
            NodeRole::Transshipment
        }
    }
}

/// A directed transmission line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub from: NodeId,
    pub to: NodeId,
    /// Upper bound on flow (MW)
    pub capacity: Megawatts,
    /// Cost per MW transported
    pub unit_cost: f64,
    /// Currently assigned flow (MW)
    pub flow: Megawatts,
}

impl Line {
    pub fn key(&self) -> LineKey {
        LineKey {
            from: self.from.clone(),
            to: self.to.clone(),
        }
    }

    /// Transmission cost of the current flow
    pub fn cost(&self) -> f64 {
        self.flow.value() * self.unit_cost
    }

    /// Whether the current flow lies within `[0, capacity]`
    pub fn within_capacity(&self) -> bool {
        self.flow.value() >= 0.0 && self.flow <= self.capacity
    }
}

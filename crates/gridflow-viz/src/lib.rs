//! Drawing data for transmission networks.
//!
//! [`layout::layout_network`] places the nodes with a force-directed
//! simulation and attaches the styling a renderer needs (role colours,
//! line widths and loading colours). The result serializes to JSON.

pub mod layout;

pub use layout::{layout_network, LayoutLine, LayoutNode, LayoutResult};

pub mod analysis;
pub mod completions;
pub mod demo;
pub mod graph;
pub mod solve;
pub mod validate;

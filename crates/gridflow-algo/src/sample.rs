//! The six-node demonstration network.
//!
//! Two generation sites (A, B) feed three demand centres (C, D, E) through a
//! hub F. Lines carry hand-picked starting flows that are deliberately not
//! optimal.

use gridflow_core::{GridResult, Network};

pub const SAMPLE_NAME: &str = "Sample Network";

/// Build the sample network with its initial flows
pub fn sample_network() -> GridResult<Network> {
    let mut network = Network::with_name(SAMPLE_NAME);
    network
        .add_node("A", 0.0, 100.0)?
        .add_node("B", 0.0, 150.0)?
        .add_node("C", 50.0, 0.0)?
        .add_node("D", 120.0, 0.0)?
        .add_node("E", 80.0, 0.0)?
        .add_node("F", 0.0, 0.0)?;

    // (from, to, capacity MW, unit cost, initial flow MW)
    let lines = [
        ("A", "F", 80.0, 2.0, 30.0),
        ("A", "C", 40.0, 3.0, 20.0),
        ("B", "F", 60.0, 1.0, 25.0),
        ("B", "D", 90.0, 2.0, 40.0),
        ("F", "C", 30.0, 1.0, 15.0),
        ("F", "D", 50.0, 3.0, 20.0),
        ("F", "E", 80.0, 2.0, 30.0),
    ];
    for (from, to, capacity, cost, flow) in lines {
        network.add_line_with_flow(from, to, capacity, cost, flow)?;
    }
    Ok(network)
}

/// Manual what-if flows applied before solving in the demo
pub const SAMPLE_OVERRIDES: [(&str, &str, f64); 2] = [("A", "F", 45.0), ("B", "D", 60.0)];

//! Walkthrough of the sample network: initial flows, manual edits, optimal
//! solve, bottlenecks and the report.

use std::io;

use anyhow::{Context, Result};
use gridflow_algo::sample::{sample_network, SAMPLE_OVERRIDES};
use gridflow_algo::{find_bottlenecks, MinCostFlowSolver, NetworkReport};
use gridflow_cli::common::write_flow_table;
use tracing::info;

pub fn handle(threshold: f64) -> Result<()> {
    let mut network = sample_network()?;
    info!("{} created: {}", network.name(), network.stats());

    println!("Initial flows:");
    write_flow_table(&network, io::stdout())?;
    println!("Cost of initial flows: {:.2}", network.current_cost());

    for (from, to, flow) in SAMPLE_OVERRIDES {
        network.set_flow(from, to, flow)?;
    }
    println!();
    println!("Manually edited flows:");
    write_flow_table(&network, io::stdout())?;

    let result = MinCostFlowSolver::new()
        .solve(&mut network)
        .context("solving min-cost flow")?;
    println!();
    println!("Optimal flows:");
    write_flow_table(&network, io::stdout())?;
    println!("Total cost: {:.2}", result.total_cost);

    let bottlenecks = find_bottlenecks(&network, threshold)?;
    println!();
    println!("{} bottleneck(s) found.", bottlenecks.len());
    for (i, b) in bottlenecks.iter().enumerate() {
        println!("{}. Line {}: {:.1}% utilization", i + 1, b.line, b.utilization_pct);
    }

    let report = NetworkReport::build(&network, Some(&result), threshold)?;
    println!();
    println!("{report}");
    Ok(())
}

//! `bottlenecks` and `report`: both read the final flows of a case.

use std::io;

use anyhow::{Context, Result};
use gridflow_algo::{find_bottlenecks, NetworkReport, SolveResult};
use gridflow_cli::case::load_case;
use gridflow_cli::common::{write_bottleneck_table, write_json, OutputFormat};
use gridflow_cli::CaseArgs;
use gridflow_core::Network;
use tracing::{debug, info};

struct Prepared {
    network: Network,
    solution: Option<SolveResult>,
    threshold: f64,
}

/// Load the case and, unless `no_solve`, replace its flows with the optimum.
fn prepare(args: &CaseArgs, threshold: Option<f64>, no_solve: bool) -> Result<Prepared> {
    let case = load_case(&args.case_file)?;
    let mut network = case
        .build_network(args.lenient)
        .context("building network from case file")?;
    info!("Loaded {}: {}", args.case_file.display(), network.stats());

    let solution = if no_solve {
        None
    } else {
        let result = case
            .solver(args.max_augmentations)
            .solve(&mut network)
            .context("solving min-cost flow")?;
        debug!("{}", result.summary());
        Some(result)
    };
    Ok(Prepared {
        threshold: case.threshold(threshold),
        network,
        solution,
    })
}

pub fn handle_bottlenecks(
    args: &CaseArgs,
    threshold: Option<f64>,
    no_solve: bool,
    format: OutputFormat,
) -> Result<()> {
    let prepared = prepare(args, threshold, no_solve)?;
    let bottlenecks = find_bottlenecks(&prepared.network, prepared.threshold)?;
    info!(
        "{} line(s) at or above {:.1}% utilization",
        bottlenecks.len(),
        prepared.threshold
    );

    match format {
        OutputFormat::Table => write_bottleneck_table(&bottlenecks, io::stdout())?,
        OutputFormat::Json => write_json(&bottlenecks, &mut io::stdout(), true)?,
    }
    Ok(())
}

pub fn handle_report(
    args: &CaseArgs,
    threshold: Option<f64>,
    no_solve: bool,
    format: OutputFormat,
) -> Result<()> {
    let prepared = prepare(args, threshold, no_solve)?;
    let report = NetworkReport::build(
        &prepared.network,
        prepared.solution.as_ref(),
        prepared.threshold,
    )?;

    match format {
        OutputFormat::Table => println!("{report}"),
        OutputFormat::Json => write_json(&report, &mut io::stdout(), true)?,
    }
    Ok(())
}

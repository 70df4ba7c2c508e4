use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use gridflow_cli::case::load_case;
use gridflow_cli::GraphCommands;
use gridflow_core::{graph_utils, Network};
use gridflow_viz::layout_network;
use tracing::info;

fn load_network(case_file: &Path, lenient: bool) -> Result<Network> {
    let case = load_case(case_file)?;
    case.build_network(lenient)
        .context("building network from case file")
}

fn emit(payload: &str, out: Option<&Path>, what: &str) -> Result<()> {
    if let Some(path) = out {
        fs::write(path, payload).with_context(|| format!("writing {what} to '{}'", path.display()))?;
        info!("{what} written to {}", path.display());
    } else {
        println!("{payload}");
    }
    Ok(())
}

pub fn handle(command: &GraphCommands) -> Result<()> {
    match command {
        GraphCommands::Stats { case_file, lenient } => {
            let network = load_network(case_file, *lenient)?;
            let stats = graph_utils::graph_stats(&network)?;
            println!("Graph statistics for {}:", case_file.display());
            println!("  Nodes         : {}", stats.node_count);
            println!("  Lines         : {}", stats.edge_count);
            println!("  Components    : {}", stats.weak_components);
            println!(
                "  Degree [min/avg/max]: {}/{:.2}/{}",
                stats.min_degree, stats.avg_degree, stats.max_degree
            );
            println!("  Density       : {:.4}", stats.density);
            Ok(())
        }
        GraphCommands::Export {
            case_file,
            lenient,
            format,
            out,
        } => {
            let network = load_network(case_file, *lenient)?;
            let dot = graph_utils::export_graph(&network, format)?;
            emit(&dot, out.as_deref(), "Graph")
        }
        GraphCommands::Layout {
            case,
            iterations,
            solve,
            out,
        } => {
            let loaded = load_case(&case.case_file)?;
            let mut network = loaded
                .build_network(case.lenient)
                .context("building network from case file")?;
            if *solve {
                let result = loaded
                    .solver(case.max_augmentations)
                    .solve(&mut network)
                    .context("solving min-cost flow")?;
                info!("{}", result.summary());
            }
            let layout = layout_network(&network, *iterations);
            let payload = serde_json::to_string_pretty(&layout)?;
            emit(&payload, out.as_deref(), "Layout")
        }
    }
}

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use gridflow_cli::case::load_case;
use gridflow_cli::common::{write_flow_table, write_json, OutputFormat};
use gridflow_cli::CaseArgs;
use tracing::{debug, info};

pub fn handle(args: &CaseArgs, format: OutputFormat, out: Option<&Path>) -> Result<()> {
    let case = load_case(&args.case_file)?;
    let mut network = case
        .build_network(args.lenient)
        .context("building network from case file")?;
    info!("Loaded {}: {}", args.case_file.display(), network.stats());

    let result = case
        .solver(args.max_augmentations)
        .solve(&mut network)
        .context("solving min-cost flow")?;
    debug!("{}", result.summary());

    match format {
        OutputFormat::Table => {
            write_flow_table(&network, io::stdout())?;
            println!();
            println!("Total cost: {:.2}", result.total_cost);
        }
        OutputFormat::Json => write_json(&result, &mut io::stdout(), true)?,
    }

    if let Some(path) = out {
        let payload = serde_json::to_string_pretty(&result)?;
        fs::write(path, payload)
            .with_context(|| format!("writing solution to '{}'", path.display()))?;
        info!("Solution written to {}", path.display());
    }
    Ok(())
}

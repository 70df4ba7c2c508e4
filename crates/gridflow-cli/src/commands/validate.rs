use std::io;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use gridflow_cli::case::load_case;
use gridflow_cli::common::{write_json, OutputFormat};
use gridflow_core::Diagnostics;
use tracing::info;

pub fn handle(case_file: &Path, lenient: bool, format: OutputFormat) -> Result<()> {
    let case = load_case(case_file)?;
    let network = case
        .build_network(lenient)
        .context("building network from case file")?;
    info!("Validating {}: {}", case_file.display(), network.stats());

    let mut diag = Diagnostics::new();
    network.validate_into(&mut diag);

    match format {
        OutputFormat::Table => print!("{diag}"),
        OutputFormat::Json => write_json(&diag, &mut io::stdout(), true)?,
    }

    if diag.has_errors() {
        return Err(anyhow!("case has {}", diag.summary()));
    }
    Ok(())
}

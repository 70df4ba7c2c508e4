//! Output helpers shared across commands.

use clap::ValueEnum;
use gridflow_algo::{line_utilization, Bottleneck};
use gridflow_core::Network;
use serde::Serialize;
use std::io::{self, Write};
use tabwriter::TabWriter;

/// Output format for tabular/structured data.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable aligned table
    #[default]
    Table,
    /// JSON document (pipe-friendly, structured)
    Json,
}

/// Write data as JSON to the given writer.
pub fn write_json<W: Write, T: Serialize>(
    data: &T,
    writer: &mut W,
    pretty: bool,
) -> io::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, data).map_err(io::Error::other)?;
    } else {
        serde_json::to_writer(&mut *writer, data).map_err(io::Error::other)?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Per-line flow table in identity order
pub fn write_flow_table<W: Write>(network: &Network, writer: W) -> io::Result<()> {
    let mut table = TabWriter::new(writer).padding(2);
    writeln!(table, "LINE\tFLOW (MW)\tCAPACITY (MW)\tLOADING\tUNIT COST\tCOST")?;
    for line in network.lines() {
        let loading = match line_utilization(line) {
            Some(pct) => format!("{pct:.1}%"),
            None => "-".to_string(),
        };
        writeln!(
            table,
            "{}\t{:.2}\t{:.2}\t{}\t{}\t{:.2}",
            line.key(),
            line.flow.value(),
            line.capacity.value(),
            loading,
            line.unit_cost,
            line.cost()
        )?;
    }
    table.flush()
}

pub fn write_bottleneck_table<W: Write>(bottlenecks: &[Bottleneck], writer: W) -> io::Result<()> {
    let mut table = TabWriter::new(writer).padding(2);
    writeln!(table, "#\tLINE\tFLOW (MW)\tCAPACITY (MW)\tUTILIZATION\tBAND")?;
    for (rank, b) in bottlenecks.iter().enumerate() {
        writeln!(
            table,
            "{}\t{}\t{:.2}\t{:.2}\t{:.1}%\t{}",
            rank + 1,
            b.line,
            b.flow_mw,
            b.capacity_mw,
            b.utilization_pct,
            b.band()
        )?;
    }
    table.flush()
}

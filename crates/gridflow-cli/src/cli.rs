use crate::common::OutputFormat;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueHint};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Min-cost transmission flow and bottleneck analysis",
    long_about = None
)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info", global = true)]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Commands,
}

/// Case file plus the solver settings that can be overridden from the command line
#[derive(Args, Debug, Clone)]
pub struct CaseArgs {
    /// Case file describing the network (TOML or JSON)
    #[arg(value_hint = ValueHint::FilePath)]
    pub case_file: PathBuf,

    /// Maximum number of augmenting paths (overrides the case file)
    #[arg(long)]
    pub max_augmentations: Option<usize>,

    /// Create unknown line endpoints as transshipment nodes
    #[arg(long)]
    pub lenient: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the minimum-cost flow for a case
    Solve {
        #[command(flatten)]
        case: CaseArgs,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
        /// Also write the solution as JSON to this file
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        out: Option<PathBuf>,
    },
    /// List lines loaded at or above a utilization threshold
    Bottlenecks {
        #[command(flatten)]
        case: CaseArgs,
        /// Threshold in percent (overrides the case file, default 90)
        #[arg(long)]
        threshold: Option<f64>,
        /// Analyze the flows given in the case file instead of solving first
        #[arg(long)]
        no_solve: bool,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Print the network analysis report
    Report {
        #[command(flatten)]
        case: CaseArgs,
        /// Threshold in percent (overrides the case file, default 90)
        #[arg(long)]
        threshold: Option<f64>,
        /// Report the flows given in the case file instead of solving first
        #[arg(long)]
        no_solve: bool,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Check a case file for problems that prevent or distort a solve
    Validate {
        /// Case file describing the network (TOML or JSON)
        #[arg(value_hint = ValueHint::FilePath)]
        case_file: PathBuf,
        /// Create unknown line endpoints as transshipment nodes
        #[arg(long)]
        lenient: bool,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Graph utilities
    Graph {
        #[command(subcommand)]
        command: GraphCommands,
    },
    /// Walk through the built-in six-node sample network
    Demo {
        /// Bottleneck threshold in percent
        #[arg(long, default_value_t = 90.0)]
        threshold: f64,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
        /// Write output to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum GraphCommands {
    /// Graph stats summary
    Stats {
        /// Case file describing the network (TOML or JSON)
        #[arg(value_hint = ValueHint::FilePath)]
        case_file: PathBuf,
        /// Create unknown line endpoints as transshipment nodes
        #[arg(long)]
        lenient: bool,
    },
    /// Export graph to various formats
    Export {
        /// Case file describing the network (TOML or JSON)
        #[arg(value_hint = ValueHint::FilePath)]
        case_file: PathBuf,
        /// Create unknown line endpoints as transshipment nodes
        #[arg(long)]
        lenient: bool,
        /// Output format (currently only "dot"/"graphviz")
        #[arg(long, default_value = "dot")]
        format: String,
        /// Write output to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Compute a force-directed layout with line styling (JSON)
    Layout {
        #[command(flatten)]
        case: CaseArgs,
        /// Number of simulation steps
        #[arg(long, default_value_t = 150)]
        iterations: usize,
        /// Solve before styling so widths reflect the optimal flows
        #[arg(long)]
        solve: bool,
        /// Write output to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}

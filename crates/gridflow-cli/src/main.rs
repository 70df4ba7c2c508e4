use clap::Parser;
use gridflow_cli::cli::{Cli, Commands};
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

mod commands;

use commands::{analysis, completions, demo, graph, solve, validate};

fn main() {
    let cli = Cli::parse();

    // logs go to stderr so table/JSON output on stdout stays clean
    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("setting default subscriber failed: {err}");
    }

    let (label, result) = match &cli.command {
        Commands::Solve { case, format, out } => {
            info!("Solving {}", case.case_file.display());
            ("Solve", solve::handle(case, *format, out.as_deref()))
        }
        Commands::Bottlenecks {
            case,
            threshold,
            no_solve,
            format,
        } => {
            info!("Analyzing bottlenecks in {}", case.case_file.display());
            (
                "Bottleneck analysis",
                analysis::handle_bottlenecks(case, *threshold, *no_solve, *format),
            )
        }
        Commands::Report {
            case,
            threshold,
            no_solve,
            format,
        } => {
            info!("Building report for {}", case.case_file.display());
            (
                "Report",
                analysis::handle_report(case, *threshold, *no_solve, *format),
            )
        }
        Commands::Validate {
            case_file,
            lenient,
            format,
        } => {
            info!("Validating case {}", case_file.display());
            ("Validation", validate::handle(case_file, *lenient, *format))
        }
        Commands::Graph { command } => ("Graph command", graph::handle(command)),
        Commands::Demo { threshold } => ("Demo", demo::handle(*threshold)),
        Commands::Completions { shell, out } => {
            ("Completions", completions::handle(*shell, out.as_deref()))
        }
    };

    match result {
        Ok(()) => info!("{label} successful!"),
        Err(e) => {
            error!("{label} failed: {e:?}");
            std::process::exit(1);
        }
    }
}

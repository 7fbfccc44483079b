mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use market_study_core::formatting::Locale;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::projection::{BreakevenArgs, ProjectArgs};
use commands::study::ExtractArgs;

/// SaaS market-study projections
#[derive(Parser)]
#[command(
    name = "msg",
    version,
    about = "SaaS market-study projections and break-even comparisons",
    long_about = "A CLI for projecting eight quarters of SaaS revenue and costs with decimal \
                  precision, with and without an accelerator programme. Locates break-even \
                  quarters, compares the two scenarios and extracts structured data from \
                  agent reports."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Display locale for table output (fr, en)
    #[arg(long, default_value = "fr", global = true)]
    locale: Locale,
}

#[derive(Subcommand)]
enum Commands {
    /// Project eight quarters for both scenarios
    Project(ProjectArgs),
    /// Find the break-even quarter of one scenario
    Breakeven(BreakevenArgs),
    /// Compare baseline and assisted scenarios
    Summary(ProjectArgs),
    /// Projection, break-even and comparison with per-scenario indicators
    Analyze(ProjectArgs),
    /// Extract the fenced JSON block from an agent's answer
    Extract(ExtractArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Project(args) => commands::projection::run_project(args),
        Commands::Breakeven(args) => commands::projection::run_breakeven(args, cli.locale),
        Commands::Summary(args) => commands::projection::run_summary(args, cli.locale),
        Commands::Analyze(args) => commands::projection::run_analyze(args),
        Commands::Extract(args) => commands::study::run_extract(args),
        Commands::Version => {
            println!("msg {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(cli.output, cli.locale, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

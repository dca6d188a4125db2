mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::kpis::{PeriodKpisArgs, PortfolioArgs, ProjectSummaryArgs};
use commands::parse::ParseArgs;

/// Offshore wind project finance KPIs from reporting snapshots
#[derive(Parser)]
#[command(
    name = "offwind",
    version,
    about = "Offshore wind project finance KPIs from reporting snapshots",
    long_about = "Derives period, project and portfolio KPIs (EBITDA, DSCR, gearing, \
                  capacity factor, dividend yield) from offshore wind reporting \
                  snapshots with decimal precision, and extracts candidate figures \
                  from pasted report text."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the KPI snapshot for one period, or all periods
    PeriodKpis(PeriodKpisArgs),
    /// Summarise a project: latest KPIs, YoY deltas, per-period history
    ProjectSummary(ProjectSummaryArgs),
    /// Roll up KPI summaries across a portfolio of projects
    Portfolio(PortfolioArgs),
    /// Extract candidate financial fields from pasted report text
    Parse(ParseArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::PeriodKpis(args) => commands::kpis::run_period_kpis(args),
        Commands::ProjectSummary(args) => commands::kpis::run_project_summary(args),
        Commands::Portfolio(args) => commands::kpis::run_portfolio(args),
        Commands::Parse(args) => commands::parse::run_parse(args),
        Commands::Version => {
            println!("offwind {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

use chrono::NaiveDate;
use clap::Args;
use serde_json::Value;

use offwind_core::aggregation;
use offwind_core::types::Project;

use crate::input;

/// Arguments for per-period KPI computation
#[derive(Args)]
pub struct PeriodKpisArgs {
    /// Path to a project snapshot JSON file
    #[arg(long)]
    pub input: Option<String>,

    /// Period end date (YYYY-MM-DD); all periods when omitted
    #[arg(long)]
    pub period_end: Option<NaiveDate>,
}

/// Arguments for the project-level summary
#[derive(Args)]
pub struct ProjectSummaryArgs {
    /// Path to a project snapshot JSON file
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the portfolio roll-up
#[derive(Args)]
pub struct PortfolioArgs {
    /// Path to a JSON file holding an array of project snapshots
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_period_kpis(args: PeriodKpisArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let project = load_project(args.input.as_deref())?;

    if let Some(end) = args.period_end {
        let period = project.period_ending(end)?;
        let snapshot = aggregation::compute_period_kpis(period, &project);
        Ok(serde_json::to_value(snapshot)?)
    } else {
        // Newest first, matching the summary ordering.
        let summary = aggregation::project_kpi_summary(&project);
        Ok(serde_json::to_value(summary.period_kpis)?)
    }
}

pub fn run_project_summary(args: ProjectSummaryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let project = load_project(args.input.as_deref())?;
    let summary = aggregation::project_kpi_summary(&project);
    Ok(serde_json::to_value(summary)?)
}

pub fn run_portfolio(args: PortfolioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let projects: Vec<Project> = if let Some(path) = args.input.as_deref() {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input file is required (or pipe JSON on stdin)".into());
    };

    for project in &projects {
        project.validate()?;
    }

    let portfolio = aggregation::portfolio_summary(&projects);
    Ok(serde_json::to_value(portfolio)?)
}

fn load_project(path: Option<&str>) -> Result<Project, Box<dyn std::error::Error>> {
    let project: Project = if let Some(path) = path {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input file is required (or pipe JSON on stdin)".into());
    };

    project.validate()?;
    Ok(project)
}

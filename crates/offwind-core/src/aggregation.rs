//! Per-period KPI snapshot assembly and project/portfolio roll-ups.
//!
//! A snapshot merges whatever the period's records allow: one metric being
//! unknown never blocks computing the others. Snapshot fields are an
//! explicit, enumerated set so the output shape is statically checkable.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::leverage;
use crate::numeric::{safe_divide, to_percent, zero_or_value};
use crate::operations;
use crate::statements::{balance, income};
use crate::types::{Money, Multiple, Mwh, Period, Project, Rate};

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// All KPIs derivable for a single reporting period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSnapshot {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,

    // Income statement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebitda: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebit: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_profit: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebitda_margin_pct: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebit_margin_pct: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_margin_pct: Option<Rate>,

    // Balance sheet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_debt: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_debt: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debt_to_equity: Option<Multiple>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gearing_pct: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_equity: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_assets: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_fixed_assets: Option<Money>,

    // Cash flow and debt service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_from_operations: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cfads: Option<Money>,
    pub debt_service: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dscr: Option<Multiple>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dscr_headroom_pct: Option<Rate>,

    // Production
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_pct: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity_factor_pct: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_vs_p50_pct: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_vs_budget_pct: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_generation_mwh: Option<Mwh>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue_per_mwh: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_per_mwh: Option<Money>,

    // Distributions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividends_paid: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_available_for_distribution: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividend_yield_pct: Option<Rate>,
    pub cumulative_dividends: Money,
}

/// Project-level summary: latest-period values, YoY deltas and the full
/// per-period history (newest first).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub project_name: String,
    pub installed_capacity_mw: Decimal,
    pub cod_date: NaiveDate,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_revenue: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_ebitda: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_ebitda_margin_pct: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_net_profit: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_net_debt: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_dscr: Option<Multiple>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_capacity_factor_pct: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_availability_pct: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_dividends: Option<Money>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cumulative_dividends: Option<Money>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue_yoy_pct: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebitda_yoy_pct: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_profit_yoy_pct: Option<Rate>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub period_kpis: Vec<KpiSnapshot>,
}

/// Portfolio roll-up across projects, with per-period histories stripped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_projects: usize,
    pub total_capacity_mw: Decimal,
    pub projects: Vec<ProjectSummary>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Sum of dividends paid across all project periods ending on or before
/// `up_to` (inclusive).
pub fn cumulative_dividends(project: &Project, up_to: NaiveDate) -> Money {
    project
        .periods
        .iter()
        .filter(|p| p.period_end <= up_to)
        .filter_map(|p| p.dividend.as_ref())
        .map(|d| zero_or_value(d.dividends_paid))
        .sum()
}

/// Assemble the full KPI snapshot for one period.
pub fn compute_period_kpis(period: &Period, project: &Project) -> KpiSnapshot {
    let statement_set = period.statements.as_ref();
    let income_stmt = statement_set.and_then(|fs| fs.income_statement.as_ref());
    let balance_sheet = statement_set.and_then(|fs| fs.balance_sheet.as_ref());
    let cash_flow = statement_set.and_then(|fs| fs.cash_flow_statement.as_ref());
    let production = period.production.as_ref();
    let dividend = period.dividend.as_ref();

    let mut snapshot = KpiSnapshot {
        period_start: period.period_start,
        period_end: period.period_end,
        revenue: None,
        ebitda: None,
        ebit: None,
        net_profit: None,
        ebitda_margin_pct: None,
        ebit_margin_pct: None,
        net_margin_pct: None,
        net_debt: None,
        total_debt: None,
        debt_to_equity: None,
        gearing_pct: None,
        total_equity: None,
        net_assets: None,
        total_fixed_assets: None,
        cash_from_operations: None,
        cfads: None,
        debt_service: Decimal::ZERO,
        dscr: None,
        dscr_headroom_pct: None,
        availability_pct: None,
        capacity_factor_pct: None,
        generation_vs_p50_pct: None,
        generation_vs_budget_pct: None,
        net_generation_mwh: None,
        revenue_per_mwh: None,
        cost_per_mwh: None,
        dividends_paid: None,
        cash_available_for_distribution: None,
        dividend_yield_pct: None,
        cumulative_dividends: cumulative_dividends(project, period.period_end),
    };

    if let Some(inc) = income_stmt {
        snapshot.revenue = inc.turnover;
        snapshot.ebitda = income::ebitda(inc);
        snapshot.ebit = income::operating_profit(inc);
        snapshot.net_profit = income::profit_after_tax(inc);

        // Margins are only meaningful against nonzero turnover.
        if let Some(turnover) = inc.turnover {
            if !turnover.is_zero() {
                snapshot.ebitda_margin_pct =
                    to_percent(safe_divide(snapshot.ebitda, Some(turnover)));
                snapshot.ebit_margin_pct = to_percent(safe_divide(snapshot.ebit, Some(turnover)));
                snapshot.net_margin_pct =
                    to_percent(safe_divide(snapshot.net_profit, Some(turnover)));
            }
        }
    }

    if let Some(bs) = balance_sheet {
        snapshot.net_debt = Some(balance::net_debt(bs));
        snapshot.total_debt = Some(balance::total_debt(bs));
        snapshot.debt_to_equity = leverage::debt_to_equity(bs);
        snapshot.gearing_pct = leverage::gearing_pct(bs);
        snapshot.total_equity = Some(balance::total_equity(bs));
        snapshot.net_assets = Some(balance::net_assets(bs));
        snapshot.total_fixed_assets = Some(balance::total_fixed_assets(bs));
    }

    if let Some(cf) = cash_flow {
        snapshot.cash_from_operations = cf.net_cash_from_operating;
    }

    snapshot.cfads = leverage::cfads(income_stmt, cash_flow);
    snapshot.debt_service = leverage::debt_service(&period.debt_movements);

    if snapshot.cfads.is_some() && snapshot.debt_service > Decimal::ZERO {
        snapshot.dscr = leverage::dscr(snapshot.cfads, snapshot.debt_service);
        snapshot.dscr_headroom_pct =
            leverage::dscr_headroom_pct(snapshot.dscr, dscr_covenant_minimum(period));
    }

    if let Some(prod) = production {
        snapshot.availability_pct = prod.availability_pct;
        snapshot.capacity_factor_pct =
            operations::capacity_factor_pct(prod, project.installed_capacity_mw);
        snapshot.generation_vs_p50_pct = operations::generation_vs_p50_pct(prod);
        snapshot.generation_vs_budget_pct = operations::generation_vs_budget_pct(prod);
        snapshot.net_generation_mwh = prod.net_export_mwh;

        if let Some(inc) = income_stmt {
            snapshot.revenue_per_mwh =
                operations::revenue_per_mwh(inc.turnover, prod.net_export_mwh);
            snapshot.cost_per_mwh =
                operations::cost_per_mwh(inc.cost_of_sales, prod.net_export_mwh);
        }
    }

    if let Some(div) = dividend {
        snapshot.dividends_paid = div.dividends_paid;
        snapshot.cash_available_for_distribution = div.cash_available_for_distribution;
        if project.initial_equity_invested.is_some() {
            snapshot.dividend_yield_pct = to_percent(safe_divide(
                div.dividends_paid,
                project.initial_equity_invested,
            ));
        }
    }

    snapshot
}

/// Year-over-Year change = (Current - Previous) / |Previous|, as a
/// percentage. The absolute denominator keeps the sign of the result
/// aligned with the direction of change even off a negative base.
pub fn yoy_change_pct(current: Option<Decimal>, previous: Option<Decimal>) -> Option<Rate> {
    let current = current?;
    let previous = previous?;
    if previous.is_zero() {
        return None;
    }
    to_percent(safe_divide(Some(current - previous), Some(previous.abs())))
}

/// Summarise a project across all its periods.
///
/// Periods are ordered by period end descending; ties are broken by period
/// start descending, and any remaining ties keep their input order (the
/// sort is stable). Index 0 is "latest", index 1 "previous"; YoY deltas are
/// omitted when fewer than two periods exist.
pub fn project_kpi_summary(project: &Project) -> ProjectSummary {
    let mut ordered: Vec<&Period> = project.periods.iter().collect();
    ordered.sort_by(|a, b| {
        b.period_end
            .cmp(&a.period_end)
            .then_with(|| b.period_start.cmp(&a.period_start))
    });

    let period_kpis: Vec<KpiSnapshot> = ordered
        .iter()
        .map(|period| compute_period_kpis(period, project))
        .collect();

    let latest = period_kpis.first();
    let previous = period_kpis.get(1);

    ProjectSummary {
        project_name: project.name.clone(),
        installed_capacity_mw: project.installed_capacity_mw,
        cod_date: project.cod_date,
        latest_revenue: latest.and_then(|k| k.revenue),
        latest_ebitda: latest.and_then(|k| k.ebitda),
        latest_ebitda_margin_pct: latest.and_then(|k| k.ebitda_margin_pct),
        latest_net_profit: latest.and_then(|k| k.net_profit),
        latest_net_debt: latest.and_then(|k| k.net_debt),
        latest_dscr: latest.and_then(|k| k.dscr),
        latest_capacity_factor_pct: latest.and_then(|k| k.capacity_factor_pct),
        latest_availability_pct: latest.and_then(|k| k.availability_pct),
        latest_dividends: latest.and_then(|k| k.dividends_paid),
        cumulative_dividends: latest.map(|k| k.cumulative_dividends),
        revenue_yoy_pct: yoy_change_pct(
            latest.and_then(|k| k.revenue),
            previous.and_then(|k| k.revenue),
        ),
        ebitda_yoy_pct: yoy_change_pct(
            latest.and_then(|k| k.ebitda),
            previous.and_then(|k| k.ebitda),
        ),
        net_profit_yoy_pct: yoy_change_pct(
            latest.and_then(|k| k.net_profit),
            previous.and_then(|k| k.net_profit),
        ),
        period_kpis,
    }
}

/// Roll project summaries into a portfolio view, stripping the verbose
/// per-period history from each.
pub fn portfolio_summary(projects: &[Project]) -> PortfolioSummary {
    let summaries: Vec<ProjectSummary> = projects
        .iter()
        .map(|project| {
            let mut summary = project_kpi_summary(project);
            summary.period_kpis = Vec::new();
            summary
        })
        .collect();

    PortfolioSummary {
        total_projects: projects.len(),
        total_capacity_mw: projects.iter().map(|p| p.installed_capacity_mw).sum(),
        projects: summaries,
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// The DSCR threshold for a period: an explicit DSCR covenant minimum when
/// the period carries one, otherwise the standard default.
fn dscr_covenant_minimum(period: &Period) -> Decimal {
    period
        .covenant_tests
        .iter()
        .find(|t| t.covenant_name.eq_ignore_ascii_case("dscr"))
        .and_then(|t| t.required_minimum)
        .unwrap_or(leverage::DEFAULT_DSCR_MINIMUM)
}

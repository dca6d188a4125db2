use chrono::NaiveDate;
use rust_decimal_macros::dec;

use offwind_core::aggregation;
use offwind_core::types::{
    BalanceSheet, CovenantTest, DebtMovement, DividendDistribution, FinancialStatementSet,
    IncomeStatement, Period, ProductionData, Project,
};

// ===========================================================================
// End-to-end KPI derivation over a realistic project snapshot
// ===========================================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A 450 MW offshore wind SPV with two audited annual periods.
/// All money figures in £ thousands.
fn sample_project() -> Project {
    let period_2023 = Period {
        period_start: date(2023, 1, 1),
        period_end: date(2023, 12, 31),
        is_audited: true,
        statements: Some(FinancialStatementSet {
            income_statement: Some(IncomeStatement {
                turnover: Some(dec!(220_000)),
                cost_of_sales: Some(dec!(78_000)),
                administrative_expenses: Some(dec!(9_000)),
                depreciation: Some(dec!(41_000)),
                current_tax: Some(dec!(18_000)),
                ..Default::default()
            }),
            ..Default::default()
        }),
        dividend: Some(DividendDistribution {
            dividends_paid: Some(dec!(10_000)),
            ..Default::default()
        }),
        ..Default::default()
    };

    let period_2024 = Period {
        period_start: date(2024, 1, 1),
        period_end: date(2024, 12, 31),
        is_audited: true,
        statements: Some(FinancialStatementSet {
            income_statement: Some(IncomeStatement {
                turnover: Some(dec!(250_000)),
                cost_of_sales: Some(dec!(80_000)),
                administrative_expenses: Some(dec!(10_000)),
                other_operating_income: Some(dec!(3_000)),
                interest_receivable: Some(dec!(500)),
                interest_payable: Some(dec!(35_000)),
                fair_value_movement_derivatives: Some(dec!(5_000)),
                foreign_exchange_gain_loss: Some(dec!(-1_000)),
                current_tax: Some(dec!(25_000)),
                deferred_tax: Some(dec!(2_000)),
                depreciation: Some(dec!(42_000)),
            }),
            balance_sheet: Some(BalanceSheet {
                wind_farm_assets_cost: Some(dec!(1_000_000)),
                wind_farm_assets_depreciation: Some(dec!(200_000)),
                decommissioning_asset_cost: Some(dec!(50_000)),
                decommissioning_asset_depreciation: Some(dec!(10_000)),
                trade_receivables: Some(dec!(20_000)),
                cash_and_equivalents: Some(dec!(35_000)),
                trade_payables: Some(dec!(12_000)),
                short_term_loans: Some(dec!(40_000)),
                long_term_loans: Some(dec!(300_000)),
                long_term_bonds: Some(dec!(450_000)),
                decommissioning_provision: Some(dec!(75_000)),
                retained_earnings: Some(dec!(18_000)),
                ..Default::default()
            }),
            ..Default::default()
        }),
        production: Some(ProductionData {
            net_export_mwh: Some(dec!(1_500_000)),
            availability_pct: Some(dec!(97.2)),
            p50_generation_mwh: Some(dec!(1_480_000)),
            budget_generation_mwh: Some(dec!(1_520_000)),
            period_hours: Some(dec!(8784)),
            ..Default::default()
        }),
        dividend: Some(DividendDistribution {
            dividends_paid: Some(dec!(12_000)),
            cash_available_for_distribution: Some(dec!(15_000)),
            ..Default::default()
        }),
        debt_movements: vec![DebtMovement {
            facility: "Senior Term Loan".into(),
            opening_balance: Some(dec!(845_000)),
            interest_charged: Some(dec!(35_000)),
            principal_repaid: Some(dec!(55_000)),
            closing_balance: Some(dec!(790_000)),
            ..Default::default()
        }],
        covenant_tests: vec![CovenantTest {
            covenant_name: "DSCR".into(),
            required_minimum: Some(dec!(1.25)),
            ..Default::default()
        }],
        ..Default::default()
    };

    Project {
        name: "Dogger South".into(),
        location: Some("North Sea, UK".into()),
        cod_date: date(2018, 6, 30),
        installed_capacity_mw: dec!(450),
        initial_equity_invested: Some(dec!(500_000)),
        periods: vec![period_2023, period_2024],
        ..Default::default()
    }
}

#[test]
fn test_period_snapshot_income_kpis() {
    let project = sample_project();
    let period = project.period_ending(date(2024, 12, 31)).unwrap();
    let snapshot = aggregation::compute_period_kpis(period, &project);

    assert_eq!(snapshot.revenue, Some(dec!(250_000)));
    // EBITDA = 250k - 80k - 10k + 3k + 42k = 205k
    assert_eq!(snapshot.ebitda, Some(dec!(205_000)));
    assert_eq!(snapshot.ebit, Some(dec!(163_000)));
    // PAT = PBT 132.5k - tax 27k
    assert_eq!(snapshot.net_profit, Some(dec!(105_500)));

    assert_eq!(snapshot.ebitda_margin_pct, Some(dec!(82.00)));
    assert_eq!(snapshot.ebit_margin_pct, Some(dec!(65.20)));
    assert_eq!(snapshot.net_margin_pct, Some(dec!(42.20)));
}

#[test]
fn test_period_snapshot_balance_sheet_kpis() {
    let project = sample_project();
    let period = project.period_ending(date(2024, 12, 31)).unwrap();
    let snapshot = aggregation::compute_period_kpis(period, &project);

    // Debt = 40k ST + 300k LT loans + 450k LT bonds
    assert_eq!(snapshot.total_debt, Some(dec!(790_000)));
    assert_eq!(snapshot.net_debt, Some(dec!(755_000)));
    // 790k / 18k equity
    assert_eq!(snapshot.debt_to_equity, Some(dec!(43.8889)));
    // 755k / (755k + 18k)
    assert_eq!(snapshot.gearing_pct, Some(dec!(97.67)));
    assert_eq!(snapshot.total_fixed_assets, Some(dec!(840_000)));
    assert_eq!(snapshot.net_assets, Some(dec!(18_000)));
}

#[test]
fn test_period_snapshot_debt_service_and_dscr() {
    let project = sample_project();
    let period = project.period_ending(date(2024, 12, 31)).unwrap();
    let snapshot = aggregation::compute_period_kpis(period, &project);

    // Debt service = 35k interest + 55k principal
    assert_eq!(snapshot.debt_service, dec!(90_000));
    // CFADS = EBITDA 205k - current tax 25k
    assert_eq!(snapshot.cfads, Some(dec!(180_000)));
    assert_eq!(snapshot.dscr, Some(dec!(2.0000)));
    // Headroom against the period's 1.25x covenant: (2.0 - 1.25) / 1.25
    assert_eq!(snapshot.dscr_headroom_pct, Some(dec!(60.00)));
}

#[test]
fn test_period_snapshot_production_kpis() {
    let project = sample_project();
    let period = project.period_ending(date(2024, 12, 31)).unwrap();
    let snapshot = aggregation::compute_period_kpis(period, &project);

    assert_eq!(snapshot.availability_pct, Some(dec!(97.2)));
    // 1.5M MWh / (450 MW * 8784 h) = 0.3795
    assert_eq!(snapshot.capacity_factor_pct, Some(dec!(37.95)));
    // (1.5M - 1.48M) / 1.48M
    assert_eq!(snapshot.generation_vs_p50_pct, Some(dec!(1.35)));
    // (1.5M - 1.52M) / 1.52M
    assert_eq!(snapshot.generation_vs_budget_pct, Some(dec!(-1.32)));
    // 250k / 1.5M MWh
    assert_eq!(snapshot.revenue_per_mwh, Some(dec!(0.1667)));
    assert_eq!(snapshot.cost_per_mwh, Some(dec!(0.0533)));
}

#[test]
fn test_period_snapshot_distributions() {
    let project = sample_project();
    let period = project.period_ending(date(2024, 12, 31)).unwrap();
    let snapshot = aggregation::compute_period_kpis(period, &project);

    assert_eq!(snapshot.dividends_paid, Some(dec!(12_000)));
    assert_eq!(snapshot.cash_available_for_distribution, Some(dec!(15_000)));
    // 12k / 500k initial equity
    assert_eq!(snapshot.dividend_yield_pct, Some(dec!(2.40)));
    // 10k (2023) + 12k (2024)
    assert_eq!(snapshot.cumulative_dividends, dec!(22_000));
}

#[test]
fn test_sparse_period_computes_what_it_can() {
    // A period carrying only an income statement: balance sheet, production
    // and distribution KPIs stay unknown; nothing errors.
    let project = Project {
        name: "Forth Array".into(),
        installed_capacity_mw: dec!(588),
        periods: vec![Period {
            period_start: date(2024, 1, 1),
            period_end: date(2024, 12, 31),
            statements: Some(FinancialStatementSet {
                income_statement: Some(IncomeStatement {
                    turnover: Some(dec!(100_000)),
                    cost_of_sales: Some(dec!(30_000)),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        }],
        ..Default::default()
    };

    let period = project.period_ending(date(2024, 12, 31)).unwrap();
    let snapshot = aggregation::compute_period_kpis(period, &project);

    assert_eq!(snapshot.ebitda, Some(dec!(70_000)));
    assert_eq!(snapshot.net_debt, None);
    assert_eq!(snapshot.capacity_factor_pct, None);
    assert_eq!(snapshot.dscr, None);
    assert_eq!(snapshot.dividend_yield_pct, None);
    assert_eq!(snapshot.cumulative_dividends, dec!(0));
}

// ===========================================================================
// Project summary and portfolio roll-up
// ===========================================================================

#[test]
fn test_project_summary_latest_and_yoy() {
    let summary = aggregation::project_kpi_summary(&sample_project());

    assert_eq!(summary.project_name, "Dogger South");
    assert_eq!(summary.period_kpis.len(), 2);
    // Newest first
    assert_eq!(summary.period_kpis[0].period_end, date(2024, 12, 31));

    assert_eq!(summary.latest_revenue, Some(dec!(250_000)));
    assert_eq!(summary.latest_ebitda, Some(dec!(205_000)));
    assert_eq!(summary.latest_dscr, Some(dec!(2.0000)));
    assert_eq!(summary.cumulative_dividends, Some(dec!(22_000)));

    // (250k - 220k) / 220k
    assert_eq!(summary.revenue_yoy_pct, Some(dec!(13.64)));
    // 2023 EBITDA = 220k - 78k - 9k + 41k = 174k; (205k - 174k) / 174k
    assert_eq!(summary.ebitda_yoy_pct, Some(dec!(17.82)));
}

#[test]
fn test_portfolio_rollup() {
    let projects = vec![
        sample_project(),
        Project {
            name: "Forth Array".into(),
            cod_date: date(2021, 3, 15),
            installed_capacity_mw: dec!(588),
            ..Default::default()
        },
    ];

    let portfolio = aggregation::portfolio_summary(&projects);
    assert_eq!(portfolio.total_projects, 2);
    assert_eq!(portfolio.total_capacity_mw, dec!(1038));
    // Per-period histories are stripped from the roll-up
    assert!(portfolio.projects.iter().all(|s| s.period_kpis.is_empty()));
    assert_eq!(portfolio.projects[0].latest_ebitda, Some(dec!(205_000)));
}

// ===========================================================================
// Snapshot serialization
// ===========================================================================

#[test]
fn test_snapshot_serializes_money_as_strings_and_omits_unknowns() {
    let project = sample_project();
    let period = project.period_ending(date(2024, 12, 31)).unwrap();
    let snapshot = aggregation::compute_period_kpis(period, &project);

    let value = serde_json::to_value(&snapshot).unwrap();
    let obj = value.as_object().unwrap();

    // Decimal fields serialize as strings for lossless round-tripping
    assert_eq!(obj["ebitda"], serde_json::json!("205000"));
    assert_eq!(obj["gearing_pct"], serde_json::json!("97.67"));
    // Unknown KPIs are omitted, not null
    assert!(!obj.contains_key("cash_from_operations"));
}

#[test]
fn test_project_snapshot_round_trips_through_json() {
    let project = sample_project();
    let json = serde_json::to_string(&project).unwrap();
    let restored: Project = serde_json::from_str(&json).unwrap();

    let original = aggregation::project_kpi_summary(&project);
    let reparsed = aggregation::project_kpi_summary(&restored);
    assert_eq!(original.period_kpis, reparsed.period_kpis);
}

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::numeric::zero_or_value;
use crate::{OffwindError, OffwindResult};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Percentages and other rate-like results (e.g. 38.05 for 38.05%).
pub type Rate = Decimal;

/// Coverage ratios and multiples (e.g. 1.5x DSCR)
pub type Multiple = Decimal;

/// Energy volumes in MWh
pub type Mwh = Decimal;

/// Currency code
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    GBP,
    USD,
    EUR,
    DKK,
    NOK,
    Other(String),
}

/// Reporting interval granularity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodType {
    #[default]
    Annual,
    Quarterly,
    Monthly,
}

/// Provenance of a financial statement set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    #[default]
    Audited,
    Management,
    Forecast,
    Budget,
}

/// Debt facility instrument type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtType {
    BankLoan,
    Bond,
    ShareholderLoan,
    RevolvingCredit,
    TermLoan,
}

/// Debt amortisation profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmortisationType {
    Annuity,
    #[default]
    Sculpted,
    Bullet,
    Linear,
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

/// An offshore wind project snapshot: static reference data plus the full
/// reporting history handed over by the record store.
///
/// The engine never mutates a snapshot; every derived figure lives in a
/// transient result struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Commercial operation date
    pub cod_date: NaiveDate,
    pub installed_capacity_mw: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ownership_share_pct: Option<Rate>,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub reporting_frequency: PeriodType,
    /// Denominator for dividend yield
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_equity_invested: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub debt_facilities: Vec<DebtFacility>,
    #[serde(default)]
    pub periods: Vec<Period>,
}

impl Project {
    /// Boundary-level sanity checks on a freshly loaded snapshot. The
    /// formulas themselves never validate; missing data flows through them
    /// as `None`.
    pub fn validate(&self) -> OffwindResult<()> {
        if self.installed_capacity_mw < Decimal::ZERO {
            return Err(OffwindError::InvalidInput {
                field: "installed_capacity_mw".into(),
                reason: "Installed capacity cannot be negative.".into(),
            });
        }
        if let Some(equity) = self.initial_equity_invested {
            if equity < Decimal::ZERO {
                return Err(OffwindError::InvalidInput {
                    field: "initial_equity_invested".into(),
                    reason: "Initial equity invested cannot be negative.".into(),
                });
            }
        }
        for period in &self.periods {
            if period.period_start > period.period_end {
                return Err(OffwindError::InvalidInput {
                    field: "periods".into(),
                    reason: format!(
                        "Period starting {} ends before it begins ({}).",
                        period.period_start, period.period_end
                    ),
                });
            }
        }
        Ok(())
    }

    /// Deserialise a project snapshot from JSON.
    pub fn from_json(json: &str) -> OffwindResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Look up the period with the given end date.
    pub fn period_ending(&self, end: NaiveDate) -> OffwindResult<&Period> {
        self.periods
            .iter()
            .find(|p| p.period_end == end)
            .ok_or(OffwindError::PeriodNotFound(end))
    }
}

// ---------------------------------------------------------------------------
// Period and its one-each children
// ---------------------------------------------------------------------------

/// A reporting interval for a project. Each child record is optional and
/// must be presence-checked before use; a period may carry any subset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Period {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    #[serde(default)]
    pub period_type: PeriodType,
    #[serde(default)]
    pub is_audited: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statements: Option<FinancialStatementSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production: Option<ProductionData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue_breakdown: Option<RevenueBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_breakdown: Option<CostBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividend: Option<DividendDistribution>,
    #[serde(default)]
    pub debt_movements: Vec<DebtMovement>,
    #[serde(default)]
    pub covenant_tests: Vec<CovenantTest>,
}

/// Container grouping the three statements reported for a period.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinancialStatementSet {
    #[serde(default)]
    pub source_type: SourceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income_statement: Option<IncomeStatement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance_sheet: Option<BalanceSheet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_flow_statement: Option<CashFlowStatement>,
}

/// Profit and loss account. Every field is "amount or unknown"; subtotals
/// are derived in `statements::income`, never stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncomeStatement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turnover: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_of_sales: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub administrative_expenses: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_operating_income: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_receivable: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_payable: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fair_value_movement_derivatives: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreign_exchange_gain_loss: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_tax: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deferred_tax: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depreciation: Option<Money>,
}

/// Statement of financial position. Asset classes are carried as
/// cost/accumulated-depreciation pairs; net book values and totals are
/// derived in `statements::balance`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceSheet {
    // Fixed assets by class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_farm_assets_cost: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_farm_assets_depreciation: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmission_assets_cost: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmission_assets_depreciation: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decommissioning_asset_cost: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decommissioning_asset_depreciation: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_ppe_cost: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_ppe_depreciation: Option<Money>,

    // Current assets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_receivables: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intercompany_receivables: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prepayments_accrued_income: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_debtors: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derivative_assets: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_and_equivalents: Option<Money>,

    // Current liabilities
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_payables: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intercompany_payables: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accruals_deferred_income: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_tax_liability: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_term_loans: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_term_bonds: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_term_lease_liability: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derivative_liabilities_current: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_current_liabilities: Option<Money>,

    // Non-current liabilities
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_term_loans: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_term_bonds: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shareholder_loans: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_term_lease_liability: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deferred_tax_liability: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decommissioning_provision: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_provisions: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deferred_profit_on_disposal: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derivative_liabilities_noncurrent: Option<Money>,

    // Equity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_capital: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_premium: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retained_earnings: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_reserves: Option<Money>,
}

/// Statement of cash flows (simplified indirect method).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CashFlowStatement {
    // Operating
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_from_operations: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_paid: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_cash_from_operating: Option<Money>,

    // Investing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capex: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proceeds_from_disposal: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_received: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_cash_from_investing: Option<Money>,

    // Financing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_drawdowns: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_repayments: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bond_repayments: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_paid: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividends_paid: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equity_contributions: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_cash_from_financing: Option<Money>,

    // Cash movement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_change_in_cash: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_cash: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_cash: Option<Money>,

    /// Explicit CFADS from a loan compliance certificate. Takes precedence
    /// over the EBITDA-based approximation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cfads_input: Option<Money>,
}

// ---------------------------------------------------------------------------
// Production
// ---------------------------------------------------------------------------

/// Production and availability data for a period.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductionData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_generation_mwh: Option<Mwh>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_export_mwh: Option<Mwh>,
    /// Production-based availability
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_pct: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curtailment_mwh: Option<Mwh>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curtailment_pct: Option<Rate>,
    /// Long-term expected generation at P50
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p50_generation_mwh: Option<Mwh>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_generation_mwh: Option<Mwh>,
    /// e.g. 98.5 meaning 98.5% of the long-term average wind resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_index: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_hours: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Revenue and cost breakdowns
// ---------------------------------------------------------------------------

/// Revenue split by source (PPA, CfD, merchant, certificates, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RevenueBreakdown {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ppa_revenue: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cfd_revenue: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_revenue: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roc_revenue: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rego_revenue: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity_market_revenue: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ancillary_services_revenue: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curtailment_compensation: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_revenue: Option<Money>,
}

impl RevenueBreakdown {
    /// Sum of all revenue lines, absent lines counted as zero.
    pub fn total(&self) -> Money {
        zero_or_value(self.ppa_revenue)
            + zero_or_value(self.cfd_revenue)
            + zero_or_value(self.merchant_revenue)
            + zero_or_value(self.roc_revenue)
            + zero_or_value(self.rego_revenue)
            + zero_or_value(self.capacity_market_revenue)
            + zero_or_value(self.ancillary_services_revenue)
            + zero_or_value(self.curtailment_compensation)
            + zero_or_value(self.other_revenue)
    }
}

/// Operating cost split.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub om_fixed: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub om_variable: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seabed_lease: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onshore_lease: Option<Money>,
    /// TNUoS, BSUoS and similar charges
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmission_charges: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub management_fees: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_costs: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_charges: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imbalance_costs: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community_fund: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_opex: Option<Money>,
}

impl CostBreakdown {
    /// Sum of all cost lines, absent lines counted as zero.
    pub fn total(&self) -> Money {
        zero_or_value(self.om_fixed)
            + zero_or_value(self.om_variable)
            + zero_or_value(self.seabed_lease)
            + zero_or_value(self.onshore_lease)
            + zero_or_value(self.transmission_charges)
            + zero_or_value(self.insurance)
            + zero_or_value(self.management_fees)
            + zero_or_value(self.admin_costs)
            + zero_or_value(self.network_charges)
            + zero_or_value(self.imbalance_costs)
            + zero_or_value(self.community_fund)
            + zero_or_value(self.other_opex)
    }
}

// ---------------------------------------------------------------------------
// Debt
// ---------------------------------------------------------------------------

/// A named debt instrument.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtFacility {
    pub name: String,
    pub facility_type: DebtType,
    #[serde(default)]
    pub currency: Currency,
    pub original_notional: Money,
    /// For revolving facilities
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commitment_amount: Option<Money>,
    #[serde(default = "default_true")]
    pub is_fixed_rate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_rate_pct: Option<Rate>,
    /// e.g. "SONIA", "SOFR"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floating_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_pct: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maturity_date: Option<NaiveDate>,
    #[serde(default)]
    pub amortisation_type: AmortisationType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repayment_frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_rating: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Period-over-period reconciliation of a facility's balance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DebtMovement {
    /// Facility name this movement belongs to
    pub facility: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_balance: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drawdowns: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_charged: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal_repaid: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fees_costs: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_balance: Option<Money>,
}

impl DebtMovement {
    /// Whether `opening + drawdowns - principal repaid = closing` holds,
    /// with absent fields counted as zero.
    pub fn reconciles(&self) -> bool {
        zero_or_value(self.opening_balance) + zero_or_value(self.drawdowns)
            - zero_or_value(self.principal_repaid)
            == zero_or_value(self.closing_balance)
    }
}

// ---------------------------------------------------------------------------
// Distributions and covenants
// ---------------------------------------------------------------------------

/// Dividend and distribution record for a period.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DividendDistribution {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_available_for_distribution: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividends_declared: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividends_paid: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retained_for_reserves: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shareholder_loan_repayments: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shareholder_loan_interest: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A covenant test result reported for a period, e.g. "DSCR" or "Gearing".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CovenantTest {
    pub covenant_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_minimum: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_maximum: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_value: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headroom_absolute: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headroom_pct: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_date: Option<NaiveDate>,
}

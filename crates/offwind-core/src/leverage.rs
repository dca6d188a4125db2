//! Leverage, debt service and covenant headroom metrics.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::numeric::{safe_divide, to_percent, zero_or_value};
use crate::statements::balance::{net_debt, total_debt, total_equity};
use crate::statements::income::ebitda;
use crate::types::{
    BalanceSheet, CashFlowStatement, DebtMovement, IncomeStatement, Money, Multiple, Rate,
};

/// Standard minimum DSCR covenant used when a period carries no explicit
/// threshold.
pub const DEFAULT_DSCR_MINIMUM: Decimal = dec!(1.10);

/// Debt/Equity = Total Debt / Total Equity
pub fn debt_to_equity(bs: &BalanceSheet) -> Option<Multiple> {
    safe_divide(Some(total_debt(bs)), Some(total_equity(bs)))
}

/// Gearing = Net Debt / (Net Debt + Equity), as a percentage.
pub fn gearing_pct(bs: &BalanceSheet) -> Option<Rate> {
    let nd = net_debt(bs);
    let denominator = nd + total_equity(bs);
    to_percent(safe_divide(Some(nd), Some(denominator)))
}

/// Debt Service = Σ interest charged + principal repaid over all facility
/// movements in the period; zero when there are none.
pub fn debt_service(movements: &[DebtMovement]) -> Money {
    movements
        .iter()
        .map(|m| zero_or_value(m.interest_charged) + zero_or_value(m.principal_repaid))
        .sum()
}

/// Cash Flow Available for Debt Service.
///
/// An explicit figure from a loan compliance certificate takes precedence
/// unchanged. Otherwise approximated as EBITDA - current tax (proxy for
/// cash tax); `None` when neither is available.
pub fn cfads(
    income: Option<&IncomeStatement>,
    cash_flow: Option<&CashFlowStatement>,
) -> Option<Money> {
    if let Some(certified) = cash_flow.and_then(|cf| cf.cfads_input) {
        return Some(certified);
    }
    let income = income?;
    let ebitda = ebitda(income)?;
    Some(ebitda - zero_or_value(income.current_tax))
}

/// DSCR = CFADS / Debt Service
///
/// `None` when CFADS is unknown or debt service is zero.
pub fn dscr(cfads: Option<Money>, debt_service: Money) -> Option<Multiple> {
    safe_divide(cfads, Some(debt_service))
}

/// DSCR Headroom = (Actual - Required Minimum) / Required Minimum,
/// as a percentage above (or below) the covenant threshold.
pub fn dscr_headroom_pct(actual: Option<Multiple>, required_minimum: Decimal) -> Option<Rate> {
    let actual = actual?;
    to_percent(safe_divide(
        Some(actual - required_minimum),
        Some(required_minimum),
    ))
}

use crate::numeric::zero_or_value;
use crate::types::{BalanceSheet, Money};

/// Total Fixed Assets = Σ per asset class (cost - accumulated depreciation)
pub fn total_fixed_assets(bs: &BalanceSheet) -> Money {
    let wind_farm_nbv =
        zero_or_value(bs.wind_farm_assets_cost) - zero_or_value(bs.wind_farm_assets_depreciation);
    let transmission_nbv = zero_or_value(bs.transmission_assets_cost)
        - zero_or_value(bs.transmission_assets_depreciation);
    let decommissioning_nbv = zero_or_value(bs.decommissioning_asset_cost)
        - zero_or_value(bs.decommissioning_asset_depreciation);
    let other_nbv = zero_or_value(bs.other_ppe_cost) - zero_or_value(bs.other_ppe_depreciation);
    wind_farm_nbv + transmission_nbv + decommissioning_nbv + other_nbv
}

/// Total Current Assets = Σ current asset items
pub fn total_current_assets(bs: &BalanceSheet) -> Money {
    zero_or_value(bs.trade_receivables)
        + zero_or_value(bs.intercompany_receivables)
        + zero_or_value(bs.prepayments_accrued_income)
        + zero_or_value(bs.other_debtors)
        + zero_or_value(bs.derivative_assets)
        + zero_or_value(bs.cash_and_equivalents)
}

/// Total Current Liabilities = Σ current liability items
pub fn total_current_liabilities(bs: &BalanceSheet) -> Money {
    zero_or_value(bs.trade_payables)
        + zero_or_value(bs.intercompany_payables)
        + zero_or_value(bs.accruals_deferred_income)
        + zero_or_value(bs.current_tax_liability)
        + zero_or_value(bs.short_term_loans)
        + zero_or_value(bs.short_term_bonds)
        + zero_or_value(bs.short_term_lease_liability)
        + zero_or_value(bs.derivative_liabilities_current)
        + zero_or_value(bs.other_current_liabilities)
}

/// Total Non-Current Liabilities = Σ long-term liability items
pub fn total_non_current_liabilities(bs: &BalanceSheet) -> Money {
    zero_or_value(bs.long_term_loans)
        + zero_or_value(bs.long_term_bonds)
        + zero_or_value(bs.shareholder_loans)
        + zero_or_value(bs.long_term_lease_liability)
        + zero_or_value(bs.deferred_tax_liability)
        + zero_or_value(bs.decommissioning_provision)
        + zero_or_value(bs.other_provisions)
        + zero_or_value(bs.deferred_profit_on_disposal)
        + zero_or_value(bs.derivative_liabilities_noncurrent)
}

/// Total Equity = Share Capital + Share Premium + Retained Earnings
///                + Other Reserves
pub fn total_equity(bs: &BalanceSheet) -> Money {
    zero_or_value(bs.share_capital)
        + zero_or_value(bs.share_premium)
        + zero_or_value(bs.retained_earnings)
        + zero_or_value(bs.other_reserves)
}

/// Net Assets = Fixed Assets + Current Assets - Current Liabilities
///              - Non-Current Liabilities
///
/// Equals [`total_equity`] under the accounting identity; the engine trusts
/// the identity rather than enforcing it.
pub fn net_assets(bs: &BalanceSheet) -> Money {
    total_fixed_assets(bs) + total_current_assets(bs)
        - total_current_liabilities(bs)
        - total_non_current_liabilities(bs)
}

/// Total Debt = ST Loans + ST Bonds + LT Loans + LT Bonds
///
/// Shareholder loans and lease liabilities are excluded for covenant
/// comparability.
pub fn total_debt(bs: &BalanceSheet) -> Money {
    zero_or_value(bs.short_term_loans)
        + zero_or_value(bs.short_term_bonds)
        + zero_or_value(bs.long_term_loans)
        + zero_or_value(bs.long_term_bonds)
}

/// Net Debt = Total Debt - Cash and Equivalents
pub fn net_debt(bs: &BalanceSheet) -> Money {
    total_debt(bs) - zero_or_value(bs.cash_and_equivalents)
}

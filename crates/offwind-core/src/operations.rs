//! Operational KPIs: capacity factor, generation versus reference yields,
//! and unit economics.

use rust_decimal::Decimal;

use crate::numeric::{safe_divide, to_percent};
use crate::types::{Money, Mwh, ProductionData, Rate};

/// Capacity Factor = Net Export / (Installed Capacity x Period Hours),
/// as a percentage. Typical offshore wind: 35-50%.
///
/// `None` when net export or period hours are unknown, or when either
/// multiplicand is zero.
pub fn capacity_factor_pct(
    production: &ProductionData,
    installed_capacity_mw: Decimal,
) -> Option<Rate> {
    let net_export = production.net_export_mwh?;
    let period_hours = production.period_hours?;
    if installed_capacity_mw.is_zero() || period_hours.is_zero() {
        return None;
    }
    let max_generation = installed_capacity_mw * period_hours;
    to_percent(safe_divide(Some(net_export), Some(max_generation)))
}

/// (Actual - Reference) / Reference, as a percentage.
///
/// `None` when either volume is unknown or the reference is zero.
pub fn generation_vs_reference_pct(actual: Option<Mwh>, reference: Option<Mwh>) -> Option<Rate> {
    let actual = actual?;
    let reference = reference?;
    if reference.is_zero() {
        return None;
    }
    to_percent(safe_divide(Some(actual - reference), Some(reference)))
}

/// Actual generation against the long-term P50 expectation.
pub fn generation_vs_p50_pct(production: &ProductionData) -> Option<Rate> {
    generation_vs_reference_pct(production.net_export_mwh, production.p50_generation_mwh)
}

/// Actual generation against the budgeted volume.
pub fn generation_vs_budget_pct(production: &ProductionData) -> Option<Rate> {
    generation_vs_reference_pct(production.net_export_mwh, production.budget_generation_mwh)
}

/// Revenue per MWh of net generation (£/MWh).
pub fn revenue_per_mwh(revenue: Option<Money>, generation_mwh: Option<Mwh>) -> Option<Money> {
    safe_divide(revenue, generation_mwh)
}

/// Operating cost per MWh of net generation (£/MWh).
pub fn cost_per_mwh(costs: Option<Money>, generation_mwh: Option<Mwh>) -> Option<Money> {
    safe_divide(costs, generation_mwh)
}

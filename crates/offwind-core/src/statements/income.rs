use crate::numeric::zero_or_value;
use crate::types::{IncomeStatement, Money};

/// Gross Profit = Turnover - Cost of Sales
///
/// `None` when turnover is unknown; an absent cost of sales counts as zero.
pub fn gross_profit(income: &IncomeStatement) -> Option<Money> {
    let turnover = income.turnover?;
    Some(turnover - zero_or_value(income.cost_of_sales))
}

/// Operating Profit (EBIT) = Gross Profit - Administrative Expenses
///                           + Other Operating Income
pub fn operating_profit(income: &IncomeStatement) -> Option<Money> {
    let gross = gross_profit(income)?;
    Some(
        gross - zero_or_value(income.administrative_expenses)
            + zero_or_value(income.other_operating_income),
    )
}

/// EBITDA = Operating Profit + Depreciation
///
/// Depreciation is added back as a non-cash expense.
pub fn ebitda(income: &IncomeStatement) -> Option<Money> {
    let operating = operating_profit(income)?;
    Some(operating + zero_or_value(income.depreciation))
}

/// Profit Before Tax = Operating Profit + Interest Receivable
///                     - Interest Payable + Fair Value Movements
///                     + FX Gains/Losses
pub fn profit_before_tax(income: &IncomeStatement) -> Option<Money> {
    let operating = operating_profit(income)?;
    Some(
        operating + zero_or_value(income.interest_receivable)
            - zero_or_value(income.interest_payable)
            + zero_or_value(income.fair_value_movement_derivatives)
            + zero_or_value(income.foreign_exchange_gain_loss),
    )
}

/// Total Tax = Current Tax + Deferred Tax
///
/// Never unknown: absent components are zero.
pub fn total_tax(income: &IncomeStatement) -> Money {
    zero_or_value(income.current_tax) + zero_or_value(income.deferred_tax)
}

/// Profit After Tax = Profit Before Tax - Total Tax
pub fn profit_after_tax(income: &IncomeStatement) -> Option<Money> {
    let pbt = profit_before_tax(income)?;
    Some(pbt - total_tax(income))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn sample_income() -> IncomeStatement {
        IncomeStatement {
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
        }
    }

    #[test]
    fn test_gross_profit() {
        assert_eq!(gross_profit(&sample_income()), Some(dec!(170_000)));
    }

    #[test]
    fn test_gross_profit_unknown_turnover() {
        let income = IncomeStatement {
            cost_of_sales: Some(dec!(80_000)),
            ..Default::default()
        };
        assert_eq!(gross_profit(&income), None);
    }

    #[test]
    fn test_gross_profit_absent_cost_of_sales_is_zero() {
        let income = IncomeStatement {
            turnover: Some(dec!(250_000)),
            ..Default::default()
        };
        assert_eq!(gross_profit(&income), Some(dec!(250_000)));
    }

    #[test]
    fn test_operating_profit() {
        // GP = 170_000, OP = 170_000 - 10_000 + 3_000
        assert_eq!(operating_profit(&sample_income()), Some(dec!(163_000)));
    }

    #[test]
    fn test_ebitda_adds_back_depreciation() {
        // OP = 163_000, EBITDA = 163_000 + 42_000
        assert_eq!(ebitda(&sample_income()), Some(dec!(205_000)));
    }

    #[test]
    fn test_ebitda_propagates_unknown() {
        let income = IncomeStatement {
            depreciation: Some(dec!(42_000)),
            ..Default::default()
        };
        assert_eq!(ebitda(&income), None);
    }

    #[test]
    fn test_profit_before_tax() {
        // OP = 163_000, PBT = 163_000 + 500 - 35_000 + 5_000 - 1_000
        assert_eq!(profit_before_tax(&sample_income()), Some(dec!(132_500)));
    }

    #[test]
    fn test_total_tax_never_unknown() {
        assert_eq!(total_tax(&sample_income()), dec!(27_000));
        assert_eq!(total_tax(&IncomeStatement::default()), dec!(0));
    }

    #[test]
    fn test_profit_after_tax() {
        // PBT = 132_500, PAT = 132_500 - 27_000
        assert_eq!(profit_after_tax(&sample_income()), Some(dec!(105_500)));
    }

    #[test]
    fn test_profit_after_tax_partial_finance_items() {
        let income = IncomeStatement {
            turnover: Some(dec!(100_000)),
            interest_payable: Some(dec!(20_000)),
            current_tax: Some(dec!(5_000)),
            ..Default::default()
        };
        // PBT = 100_000 - 20_000 = 80_000, PAT = 80_000 - 5_000
        assert_eq!(profit_after_tax(&income), Some(dec!(75_000)));
    }
}

//! Vocabulary tables mapping terms seen in pasted report text to internal
//! field names.
//!
//! Each table is an ordered slice constructed once at compile time and
//! passed by reference into the matcher; order matters because partial
//! matching takes the first hit.

/// An ordered term-to-field vocabulary.
pub type Vocabulary = &'static [(&'static str, &'static str)];

pub const INCOME_STATEMENT_VOCAB: Vocabulary = &[
    // Revenue
    ("turnover", "turnover"),
    ("revenue", "turnover"),
    ("total revenue", "turnover"),
    ("sales", "turnover"),
    ("income", "turnover"),
    // Cost of sales
    ("cost of sales", "cost_of_sales"),
    ("cost of goods sold", "cost_of_sales"),
    ("cogs", "cost_of_sales"),
    ("operating costs", "cost_of_sales"),
    // Admin
    ("administrative expenses", "administrative_expenses"),
    ("admin expenses", "administrative_expenses"),
    ("administration costs", "administrative_expenses"),
    ("g&a", "administrative_expenses"),
    // Operating profit
    ("operating profit", "operating_profit"),
    ("ebit", "operating_profit"),
    ("profit from operations", "operating_profit"),
    // Finance
    ("interest receivable", "interest_receivable"),
    ("interest income", "interest_receivable"),
    ("finance income", "interest_receivable"),
    ("interest payable", "interest_payable"),
    ("interest expense", "interest_payable"),
    ("finance costs", "interest_payable"),
    ("interest payable and similar charges", "interest_payable"),
    // Fair value
    ("fair value movement", "fair_value_movement_derivatives"),
    (
        "fair value movements on financial instruments",
        "fair_value_movement_derivatives",
    ),
    ("derivative fair value", "fair_value_movement_derivatives"),
    // Profit
    ("profit before tax", "profit_before_tax"),
    ("profit before taxation", "profit_before_tax"),
    ("pbt", "profit_before_tax"),
    ("profit after tax", "profit_after_tax"),
    ("profit for the year", "profit_after_tax"),
    ("profit for the period", "profit_after_tax"),
    ("net profit", "profit_after_tax"),
    // Tax
    ("taxation", "total_tax"),
    ("tax", "total_tax"),
    ("income tax", "total_tax"),
    ("current tax", "current_tax"),
    ("deferred tax", "deferred_tax"),
    // Depreciation
    ("depreciation", "depreciation"),
    ("depreciation and amortisation", "depreciation"),
    ("d&a", "depreciation"),
];

pub const BALANCE_SHEET_VOCAB: Vocabulary = &[
    // Assets
    ("tangible assets", "total_fixed_assets"),
    ("fixed assets", "total_fixed_assets"),
    ("property plant and equipment", "total_fixed_assets"),
    ("ppe", "total_fixed_assets"),
    ("wind farm assets", "wind_farm_assets_cost"),
    // Current assets
    ("debtors", "trade_receivables"),
    ("trade receivables", "trade_receivables"),
    ("trade debtors", "trade_receivables"),
    ("cash at bank", "cash_and_equivalents"),
    ("cash and cash equivalents", "cash_and_equivalents"),
    ("cash", "cash_and_equivalents"),
    // Liabilities
    ("creditors", "trade_payables"),
    ("trade payables", "trade_payables"),
    ("trade creditors", "trade_payables"),
    ("loans", "long_term_loans"),
    ("bank loans", "long_term_loans"),
    ("bonds", "long_term_bonds"),
    ("pp notes", "long_term_bonds"),
    // Provisions
    ("decommissioning provision", "decommissioning_provision"),
    ("provisions", "other_provisions"),
    // Equity
    ("share capital", "share_capital"),
    ("called up share capital", "share_capital"),
    ("retained earnings", "retained_earnings"),
    ("profit and loss account", "retained_earnings"),
    ("shareholders funds", "total_equity"),
    ("shareholders' funds", "total_equity"),
    ("net assets", "net_assets"),
];

pub const PRODUCTION_VOCAB: Vocabulary = &[
    ("generation", "net_export_mwh"),
    ("output", "net_export_mwh"),
    ("electricity generated", "net_export_mwh"),
    ("net generation", "net_export_mwh"),
    ("gross generation", "gross_generation_mwh"),
    ("availability", "availability_pct"),
    ("pba", "availability_pct"),
    ("production based availability", "availability_pct"),
    ("curtailment", "curtailment_mwh"),
    ("p50", "p50_generation_mwh"),
    ("budget", "budget_generation_mwh"),
    ("capacity factor", "capacity_factor_pct"),
];

pub const DEBT_VOCAB: Vocabulary = &[
    ("opening balance", "opening_balance"),
    ("closing balance", "closing_balance"),
    ("interest charged", "interest_charged"),
    ("principal repaid", "principal_repaid"),
    ("repayments", "principal_repaid"),
    ("drawdowns", "drawdowns"),
    ("dscr", "dscr"),
    ("debt service coverage ratio", "dscr"),
];

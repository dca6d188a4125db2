//! Heuristic extraction of financial fields from pasted report text.
//!
//! Turns loosely formatted text copied out of annual reports, loan
//! compliance certificates and production reports into categorized,
//! confidence-scored candidate fields. Nothing here ever fails on
//! malformed input: values that do not parse are kept as raw text with
//! `needs_review` set, and labels with no vocabulary match land in the
//! unmatched bucket, so a human reviewer always sees everything that was
//! extracted.

pub mod vocab;

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use vocab::Vocabulary;

/// Confidence assigned when the value parsed to a number.
const CONFIDENCE_PARSED: f64 = 0.8;

/// Confidence assigned when the raw text was kept.
const CONFIDENCE_RAW: f64 = 0.5;

/// "Label: value" pairs anywhere in the text.
static COLON_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([A-Za-z][A-Za-z\s&']+?):\s*([\d,.()\-£$€]+(?:\s*[km])?)")
        .expect("colon pattern is valid")
});

/// A textual label separated from a numeric-looking token by at least two
/// spaces, on its own line (table layouts).
static TABULAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([A-Za-z][A-Za-z\s&']+?)\s{2,}([\d,.()\-£$€]+(?:\s*[km])?)\s*$")
        .expect("tabular pattern is valid")
});

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// A candidate field extracted from pasted text, pending human review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedField {
    pub original_text: String,
    /// The cleaned numeric value as text, or the raw value when it did not
    /// parse.
    pub extracted_value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapped_field: Option<String>,
    pub confidence: f64,
    pub needs_review: bool,
}

/// Extraction results grouped by target record type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedDataResponse {
    pub income_statement_fields: Vec<ParsedField>,
    pub balance_sheet_fields: Vec<ParsedField>,
    pub production_fields: Vec<ParsedField>,
    pub debt_fields: Vec<ParsedField>,
    pub unmatched_fields: Vec<ParsedField>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Clean a raw value string and convert it to a decimal.
///
/// Handles currency symbols (£/$/€), thousands separators, parenthesized
/// negatives (`(1,234)` -> -1234), a leading minus, and case-insensitive
/// `k`/`m` magnitude suffixes applied after sign resolution.
pub fn clean_numeric_value(value_str: &str) -> Option<Decimal> {
    let trimmed = value_str.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut cleaned: String = trimmed
        .chars()
        .filter(|c| !matches!(c, '£' | '$' | '€' | ','))
        .collect();

    let mut is_negative = false;
    if cleaned.starts_with('(') && cleaned.ends_with(')') && cleaned.len() >= 2 {
        is_negative = true;
        cleaned = cleaned[1..cleaned.len() - 1].to_string();
    }

    let mut multiplier = Decimal::ONE;
    let lower = cleaned.to_ascii_lowercase();
    if lower.ends_with('k') {
        multiplier = dec!(1_000);
        cleaned.truncate(cleaned.len() - 1);
    } else if lower.ends_with('m') {
        multiplier = dec!(1_000_000);
        cleaned.truncate(cleaned.len() - 1);
    }

    if let Some(rest) = cleaned.strip_prefix('-') {
        is_negative = true;
        cleaned = rest.to_string();
    }

    let value = Decimal::from_str(cleaned.trim()).ok()? * multiplier;
    Some(if is_negative { -value } else { value })
}

/// Extract candidate (label, value) pairs from free text.
///
/// Two patterns run independently over the input and their results are
/// concatenated: `label: value` anywhere, and a per-line tabular form.
pub fn extract_key_value_pairs(text: &str) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = COLON_PATTERN
        .captures_iter(text)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect();

    for line in text.lines() {
        if let Some(caps) = TABULAR_PATTERN.captures(line.trim()) {
            pairs.push((caps[1].trim().to_string(), caps[2].trim().to_string()));
        }
    }

    pairs
}

/// Find the field a label maps to: case-insensitive exact match first, then
/// substring containment in either direction, in vocabulary order.
pub fn find_best_mapping(key: &str, vocabulary: Vocabulary) -> Option<&'static str> {
    let key_lower = key.trim().to_lowercase();

    for &(term, field) in vocabulary {
        if term == key_lower {
            return Some(field);
        }
    }

    for &(term, field) in vocabulary {
        if key_lower.contains(term) || term.contains(key_lower.as_str()) {
            return Some(field);
        }
    }

    None
}

/// Parse pasted financial text into categorized candidate fields.
///
/// Labels are matched against the vocabularies in fixed precedence order:
/// income statement, balance sheet, production, debt. First match wins;
/// anything unmatched is preserved for review rather than discarded.
pub fn parse_financial_text(text: &str) -> ParsedDataResponse {
    let mut response = ParsedDataResponse::default();

    for (key, value_str) in extract_key_value_pairs(text) {
        let parsed_value = clean_numeric_value(&value_str);

        let mut field = ParsedField {
            original_text: format!("{key}: {value_str}"),
            extracted_value: parsed_value
                .map(|v| v.to_string())
                .unwrap_or_else(|| value_str.clone()),
            mapped_field: None,
            confidence: if parsed_value.is_some() {
                CONFIDENCE_PARSED
            } else {
                CONFIDENCE_RAW
            },
            needs_review: parsed_value.is_none(),
        };

        if let Some(mapped) = find_best_mapping(&key, vocab::INCOME_STATEMENT_VOCAB) {
            field.mapped_field = Some(mapped.to_string());
            response.income_statement_fields.push(field);
        } else if let Some(mapped) = find_best_mapping(&key, vocab::BALANCE_SHEET_VOCAB) {
            field.mapped_field = Some(mapped.to_string());
            response.balance_sheet_fields.push(field);
        } else if let Some(mapped) = find_best_mapping(&key, vocab::PRODUCTION_VOCAB) {
            field.mapped_field = Some(mapped.to_string());
            response.production_fields.push(field);
        } else if let Some(mapped) = find_best_mapping(&key, vocab::DEBT_VOCAB) {
            field.mapped_field = Some(mapped.to_string());
            response.debt_fields.push(field);
        } else {
            field.needs_review = true;
            response.unmatched_fields.push(field);
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clean_parenthesized_negative() {
        assert_eq!(clean_numeric_value("(1,234)"), Some(dec!(-1234)));
    }

    #[test]
    fn test_clean_currency_and_separators() {
        assert_eq!(clean_numeric_value("£45,000"), Some(dec!(45000)));
        assert_eq!(clean_numeric_value("€1,234,567.89"), Some(dec!(1234567.89)));
        assert_eq!(clean_numeric_value("$12"), Some(dec!(12)));
    }

    #[test]
    fn test_clean_magnitude_suffixes() {
        assert_eq!(clean_numeric_value("1.5m"), Some(dec!(1_500_000)));
        assert_eq!(clean_numeric_value("250K"), Some(dec!(250_000)));
        assert_eq!(clean_numeric_value("2.5 M"), Some(dec!(2_500_000)));
    }

    #[test]
    fn test_clean_leading_minus_and_suffix() {
        assert_eq!(clean_numeric_value("-1.2m"), Some(dec!(-1_200_000)));
    }

    #[test]
    fn test_clean_garbage_is_none() {
        assert_eq!(clean_numeric_value("n/a"), None);
        assert_eq!(clean_numeric_value(""), None);
        assert_eq!(clean_numeric_value("£"), None);
    }

    #[test]
    fn test_colon_pattern_extraction() {
        let pairs = extract_key_value_pairs("Turnover: £250,000\nDepreciation: (42,000)");
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], ("Turnover".to_string(), "£250,000".to_string()));
        assert_eq!(pairs[1], ("Depreciation".to_string(), "(42,000)".to_string()));
    }

    #[test]
    fn test_tabular_pattern_requires_two_spaces() {
        let pairs = extract_key_value_pairs("Net generation  1,500,000\nSingle space 42\n");
        assert_eq!(pairs.len(), 1);
        assert_eq!(
            pairs[0],
            ("Net generation".to_string(), "1,500,000".to_string())
        );
    }

    #[test]
    fn test_find_best_mapping_exact_before_partial() {
        assert_eq!(
            find_best_mapping("Total Revenue", vocab::INCOME_STATEMENT_VOCAB),
            Some("turnover")
        );
        assert_eq!(
            find_best_mapping("PBA", vocab::PRODUCTION_VOCAB),
            Some("availability_pct")
        );
        assert_eq!(find_best_mapping("wingspan", vocab::DEBT_VOCAB), None);
    }

    #[test]
    fn test_find_best_mapping_containment_both_directions() {
        // Label contains the vocabulary term
        assert_eq!(
            find_best_mapping("Total cash at bank and in hand", vocab::BALANCE_SHEET_VOCAB),
            Some("cash_and_equivalents")
        );
        // Vocabulary term contains the label
        assert_eq!(
            find_best_mapping("fair value", vocab::INCOME_STATEMENT_VOCAB),
            Some("fair_value_movement_derivatives")
        );
    }

    #[test]
    fn test_parse_routes_to_buckets_in_precedence_order() {
        let text = "Turnover: £250,000\nNet assets: 18,000\nPBA: 97.2\nDrawdowns: 10,000\n";
        let response = parse_financial_text(text);
        assert_eq!(response.income_statement_fields.len(), 1);
        assert_eq!(response.balance_sheet_fields.len(), 1);
        assert_eq!(response.production_fields.len(), 1);
        assert_eq!(response.debt_fields.len(), 1);
        assert!(response.unmatched_fields.is_empty());

        let turnover = &response.income_statement_fields[0];
        assert_eq!(turnover.mapped_field.as_deref(), Some("turnover"));
        assert_eq!(turnover.confidence, 0.8);
        assert!(!turnover.needs_review);
    }

    #[test]
    fn test_parse_unmatched_label_needs_review() {
        let response = parse_financial_text("Flux capacitance: 1,234\n");
        assert_eq!(response.unmatched_fields.len(), 1);
        let field = &response.unmatched_fields[0];
        assert!(field.needs_review);
        // The value still parsed, so confidence stays at the parsed level.
        assert_eq!(field.confidence, 0.8);
        assert_eq!(field.extracted_value, "1234");
    }

    #[test]
    fn test_parse_unparseable_value_keeps_raw_text() {
        let response = parse_financial_text("Turnover: ()\n");
        assert_eq!(response.income_statement_fields.len(), 1);
        let field = &response.income_statement_fields[0];
        assert!(field.needs_review);
        assert_eq!(field.confidence, 0.5);
        assert_eq!(field.extracted_value, "()");
    }
}

//! Export service domain logic for the contribution tracker.
//!
//! Builds the plain-text contribution report. Delivery of the file is left to
//! a [`ReportSink`](crate::storage::ReportSink) chosen by the caller.

use super::commands::ContributionReport;
use super::models::contribution::Contribution;
use super::statistics;

pub const REPORT_FILENAME: &str = "faraja-contributions.txt";
pub const CURRENCY: &str = "TZS";

/// Format an amount with comma thousands separators and at most three
/// fractional digits, e.g. `5000.0` → `5,000`, `1234.5` → `1,234.5`
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }

    // Exact decimal expansion, rounded to three places
    let rounded = format!("{:.3}", amount.abs());
    let (whole, fraction) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut formatted = String::with_capacity(whole.len() + whole.len() / 3 + 5);
    if amount < 0.0 && (whole != "0" || !fraction.is_empty()) {
        formatted.push('-');
    }
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(digit);
    }
    if !fraction.is_empty() {
        formatted.push('.');
        formatted.push_str(fraction);
    }
    formatted
}

/// Amount with currency label, e.g. "TZS 5,000"
pub fn format_currency(amount: f64) -> String {
    format!("{} {}", CURRENCY, format_amount(amount))
}

/// Export service that handles all export-related business logic
#[derive(Clone, Debug, Default)]
pub struct ExportService {}

impl ExportService {
    pub fn new() -> Self {
        Self {}
    }

    /// Render the report for `contributions` (store order, newest first)
    pub fn build_report(&self, contributions: &[Contribution]) -> ContributionReport {
        let mut content = String::new();
        content.push_str("FARAJA APP Contribution Report\n");
        content.push_str("==============================\n\n");
        content.push_str(&format!(
            "Total Contributors: {}\n",
            statistics::total_contributors(contributions)
        ));
        content.push_str(&format!(
            "Total Amount: {}\n\n",
            format_currency(statistics::total_amount(contributions))
        ));
        content.push_str("Contribution Details:\n");
        content.push_str("--------------------\n");

        let blocks: Vec<String> = contributions
            .iter()
            .enumerate()
            .map(|(index, contribution)| Self::contribution_block(index + 1, contribution))
            .collect();
        content.push_str(&blocks.join("\n"));

        ContributionReport {
            filename: REPORT_FILENAME.to_string(),
            content,
            contribution_count: contributions.len(),
        }
    }

    fn contribution_block(number: usize, contribution: &Contribution) -> String {
        format!(
            "Contribution #{}\n\
             -------------------------\n\
             Name: {}\n\
             Amount: {}\n\
             Payment Method: {}\n\
             Phone Number: {}\n\
             Date: {}\n\
             Status: {}\n",
            number,
            contribution.name,
            format_currency(contribution.amount),
            contribution.payment_method,
            contribution.phone_number,
            contribution.date,
            contribution.status,
        )
    }
}

//! Domain-level command and result types.
//!
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the DTOs defined in the
//! `shared` crate to these internal types.

use shared::PaymentMethod;

use super::models::contribution::Contribution;

/// Input for submitting a contribution. Fields are already cleaned:
/// trimmed name, positive finite amount, 10-digit phone number.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitContributionCommand {
    pub name: String,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub phone_number: String,
}

/// Result of a submission that produced a record.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionResult {
    /// True iff the simulated transaction succeeded
    pub success: bool,
    pub contribution: Contribution,
}

/// Rendered contribution report.
#[derive(Debug, Clone, PartialEq)]
pub struct ContributionReport {
    pub filename: String,
    pub content: String,
    pub contribution_count: usize,
}

/// Result of exporting the report through a report sink.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReportResult {
    pub report: ContributionReport,
    /// Where the sink put the file
    pub location: String,
}

/// Where the submission flow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
}

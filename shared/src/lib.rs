use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mobile-money provider used to pay a contribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "M-Pesa")]
    MPesa,
    #[serde(rename = "AirtelMoney")]
    AirtelMoney,
    #[serde(rename = "TigoPesa")]
    TigoPesa,
}

impl PaymentMethod {
    /// All providers in form display order
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::MPesa,
        PaymentMethod::AirtelMoney,
        PaymentMethod::TigoPesa,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::MPesa => "M-Pesa",
            PaymentMethod::AirtelMoney => "AirtelMoney",
            PaymentMethod::TigoPesa => "TigoPesa",
        }
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::MPesa
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| format!("Unknown payment method: {}", s))
    }
}

/// Outcome recorded on a contribution
///
/// `Pending` is never produced by the submission flow: records are finalized
/// as `Success` or `Failed` as soon as the transaction settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionStatus {
    Pending,
    Success,
    Failed,
}

impl ContributionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContributionStatus::Pending => "pending",
            ContributionStatus::Success => "success",
            ContributionStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for ContributionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contribution as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    /// Contribution ID in format: "contribution::<epoch_millis>::<uuid>"
    pub id: String,
    pub name: String,
    /// Amount in TZS
    pub amount: f64,
    /// Amount formatted for display, e.g. "TZS 5,000"
    pub formatted_amount: String,
    pub payment_method: PaymentMethod,
    /// Recipient phone number (10 digits)
    pub phone_number: String,
    /// Human-readable local creation time
    pub date: String,
    pub status: ContributionStatus,
}

/// Raw contribution form input, exactly as typed by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitContributionRequest {
    pub name: String,
    /// Amount input string, e.g. "5000" or "TZS 5,000"
    pub amount: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    pub phone_number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitContributionResponse {
    /// True iff the simulated transaction succeeded
    pub success: bool,
    pub contribution: Option<Contribution>,
    pub notification: Notification,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionListResponse {
    pub contributions: Vec<Contribution>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionSummaryResponse {
    pub total_contributors: usize,
    pub total_amount: f64,
    pub formatted_total_amount: String,
    pub has_contributions: bool,
}

/// Sum of successful contributions paid through one provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethodTotal {
    pub payment_method: PaymentMethod,
    pub amount: f64,
}

/// One bar of the recent contributions chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentContributionPoint {
    /// First name of the contributor
    pub name: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionBreakdownResponse {
    pub payment_methods: Vec<PaymentMethodTotal>,
    pub recent: Vec<RecentContributionPoint>,
}

/// Result of writing the report into the export directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportToPathResponse {
    pub success: bool,
    pub message: String,
    pub file_path: Option<String>,
    pub contribution_count: usize,
    pub notification: Notification,
}

/// Result of validating a contribution form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionFormValidation {
    pub is_valid: bool,
    pub errors: Vec<ContributionValidationError>,
    /// Inline message for the first failing rule
    pub error_message: Option<String>,
    pub cleaned_name: Option<String>,
    pub cleaned_amount: Option<f64>,
}

/// Specific validation errors for contribution forms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ContributionValidationError {
    EmptyName,
    EmptyAmount,
    InvalidAmountFormat(String),
    AmountNotPositive,
    AmountTooLarge,
    InvalidPhoneNumber,
}

impl fmt::Display for ContributionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContributionValidationError::EmptyName => write!(f, "Please enter your full name"),
            ContributionValidationError::EmptyAmount
            | ContributionValidationError::InvalidAmountFormat(_)
            | ContributionValidationError::AmountNotPositive
            | ContributionValidationError::AmountTooLarge => {
                write!(f, "Please enter a valid amount")
            }
            ContributionValidationError::InvalidPhoneNumber => {
                write!(f, "Please enter a valid 10-digit phone number")
            }
        }
    }
}

impl std::error::Error for ContributionValidationError {}

/// State of the contribution input form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionFormState {
    pub name: String,
    pub amount_input: String,
    pub payment_method: PaymentMethod,
    pub phone_number: String,
    pub is_submitting: bool,
    pub error_message: Option<String>,
}

impl Default for ContributionFormState {
    fn default() -> Self {
        Self {
            name: String::new(),
            amount_input: String::new(),
            payment_method: PaymentMethod::default(),
            phone_number: String::new(),
            is_submitting: false,
            error_message: None,
        }
    }
}

/// Severity of a user-visible notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
    Warning,
}

/// A user-visible status message (toast)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

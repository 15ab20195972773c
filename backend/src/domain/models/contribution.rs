//! Domain model for a contribution.
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use shared::{ContributionStatus, PaymentMethod};
use uuid::Uuid;

/// A finalized contribution attempt, persisted exactly in this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub phone_number: String,
    pub date: String,
    pub status: ContributionStatus,
}

impl Contribution {
    /// Generate a contribution ID from the creation time plus a random UUID.
    /// Format: contribution::<epoch_millis>::<uuid>
    pub fn generate_id(epoch_millis: i64) -> String {
        format!("contribution::{}::{}", epoch_millis, Uuid::new_v4().simple())
    }

    /// Human-readable local timestamp, e.g. "3/14/2025, 9:05:07 AM"
    pub fn format_date(at: &DateTime<Local>) -> String {
        at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
    }

    pub fn is_successful(&self) -> bool {
        self.status == ContributionStatus::Success
    }

    /// First whitespace-separated part of the contributor name
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

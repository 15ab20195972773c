//! Aggregate queries over a contribution list.
//!
//! Every function takes the list in store order (newest first) and only
//! counts records whose status is success.

use shared::{PaymentMethod, PaymentMethodTotal, RecentContributionPoint};
use std::collections::HashSet;

use super::models::contribution::Contribution;

/// Number of points in the recent contributions series
pub const RECENT_CONTRIBUTIONS_LIMIT: usize = 5;

/// Providers in chart order
const BREAKDOWN_ORDER: [PaymentMethod; 3] = [
    PaymentMethod::AirtelMoney,
    PaymentMethod::MPesa,
    PaymentMethod::TigoPesa,
];

pub fn successful(contributions: &[Contribution]) -> impl Iterator<Item = &Contribution> {
    contributions.iter().filter(|c| c.is_successful())
}

pub fn total_amount(contributions: &[Contribution]) -> f64 {
    successful(contributions).map(|c| c.amount).sum()
}

/// Distinct contributor names; identical names count once
pub fn total_contributors(contributions: &[Contribution]) -> usize {
    successful(contributions)
        .map(|c| c.name.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Successful amount per provider, skipping providers with nothing paid
pub fn payment_method_breakdown(contributions: &[Contribution]) -> Vec<PaymentMethodTotal> {
    BREAKDOWN_ORDER
        .iter()
        .map(|method| PaymentMethodTotal {
            payment_method: *method,
            amount: successful(contributions)
                .filter(|c| c.payment_method == *method)
                .map(|c| c.amount)
                .sum(),
        })
        .filter(|total| total.amount > 0.0)
        .collect()
}

/// The most recent successful contributions, oldest to newest
pub fn recent_contributions(contributions: &[Contribution], limit: usize) -> Vec<RecentContributionPoint> {
    let mut recent: Vec<RecentContributionPoint> = successful(contributions)
        .take(limit)
        .map(|c| RecentContributionPoint {
            name: c.first_name().to_string(),
            amount: c.amount,
        })
        .collect();
    recent.reverse();
    recent
}

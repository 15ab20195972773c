use shared::{Contribution, ContributionSummaryResponse};

use crate::domain::export_service::format_currency;
use crate::domain::models::contribution::Contribution as DomainContribution;

pub struct ContributionMapper;

impl ContributionMapper {
    /// Convert a domain contribution to its DTO, adding the display amount
    pub fn to_dto(domain: DomainContribution) -> Contribution {
        Contribution {
            formatted_amount: format_currency(domain.amount),
            id: domain.id,
            name: domain.name,
            amount: domain.amount,
            payment_method: domain.payment_method,
            phone_number: domain.phone_number,
            date: domain.date,
            status: domain.status,
        }
    }

    pub fn to_dto_list(domain_contributions: Vec<DomainContribution>) -> Vec<Contribution> {
        domain_contributions.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_summary(total_contributors: usize, total_amount: f64, has_contributions: bool) -> ContributionSummaryResponse {
        ContributionSummaryResponse {
            total_contributors,
            total_amount,
            formatted_total_amount: format_currency(total_amount),
            has_contributions,
        }
    }
}

//! Claim queue filtering and prioritization
//!
//! Read-only projections for queue displays. Filtering and sorting never
//! mutate claim state, and every sort is stable so identical requests over
//! an unchanged data set return identical orderings.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use core_kernel::ClaimId;

use crate::claim::{Claim, ClaimType, Priority};
use crate::lifecycle::ClaimStatus;

/// Filter predicates for queue queries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClaimFilter {
    pub status: Option<ClaimStatus>,
    pub assigned_officer: Option<String>,
    /// Case-insensitive substring over claim number, applicant, village,
    /// and district
    pub search: Option<String>,
}

impl ClaimFilter {
    pub fn matches(&self, claim: &Claim) -> bool {
        if let Some(status) = self.status {
            if claim.status() != status {
                return false;
            }
        }
        if let Some(officer) = &self.assigned_officer {
            if claim.assigned_officer() != Some(officer.as_str()) {
                return false;
            }
        }
        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            if term.is_empty() {
                return true;
            }
            let haystacks = [
                claim.claim_number(),
                &claim.applicant().name,
                &claim.location().village,
                &claim.location().district,
            ];
            if !haystacks
                .iter()
                .any(|h| h.to_lowercase().contains(&term))
            {
                return false;
            }
        }
        true
    }
}

/// Queue sort keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Priority descending (high first)
    Priority,
    /// Submission date descending (newest first)
    Date,
    /// Days in queue descending (oldest first)
    DaysInQueue,
    /// Declared area descending (largest first)
    Area,
    /// District ascending (lexicographic)
    District,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "priority" => Ok(SortKey::Priority),
            "date" => Ok(SortKey::Date),
            "days_in_queue" => Ok(SortKey::DaysInQueue),
            "area" => Ok(SortKey::Area),
            "district" => Ok(SortKey::District),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

/// Queue card projection of a claim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimSummary {
    pub id: ClaimId,
    pub claim_number: String,
    pub applicant_name: String,
    pub village: String,
    pub district: String,
    pub area_hectares: Decimal,
    pub status: ClaimStatus,
    pub priority: Priority,
    pub claim_type: ClaimType,
    pub submitted_at: Option<DateTime<Utc>>,
    pub days_in_queue: i64,
    pub assigned_officer: Option<String>,
}

impl ClaimSummary {
    pub fn from_claim(claim: &Claim, now: DateTime<Utc>) -> Self {
        Self {
            id: claim.id(),
            claim_number: claim.claim_number().to_string(),
            applicant_name: claim.applicant().name.clone(),
            village: claim.location().village.clone(),
            district: claim.location().district.clone(),
            area_hectares: claim.area_hectares(),
            status: claim.status(),
            priority: claim.priority(),
            claim_type: claim.claim_type(),
            submitted_at: claim.submitted_at(),
            days_in_queue: claim.days_in_queue(now),
            assigned_officer: claim.assigned_officer().map(str::to_string),
        }
    }
}

/// Filters and sorts claims into queue summaries
///
/// `sort_by` is a stable sort, so claims that compare equal keep their
/// original relative order.
pub fn query(
    claims: &[Claim],
    filter: &ClaimFilter,
    sort: SortKey,
    now: DateTime<Utc>,
) -> Vec<ClaimSummary> {
    let mut summaries: Vec<ClaimSummary> = claims
        .iter()
        .filter(|c| filter.matches(c))
        .map(|c| ClaimSummary::from_claim(c, now))
        .collect();

    summaries.sort_by(|a, b| compare(a, b, sort));
    summaries
}

fn compare(a: &ClaimSummary, b: &ClaimSummary, sort: SortKey) -> Ordering {
    match sort {
        SortKey::Priority => b.priority.rank().cmp(&a.priority.rank()),
        SortKey::Date => b.submitted_at.cmp(&a.submitted_at),
        SortKey::DaysInQueue => b.days_in_queue.cmp(&a.days_in_queue),
        SortKey::Area => b.area_hectares.cmp(&a.area_hectares),
        SortKey::District => a.district.cmp(&b.district),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::{
        Applicant, ClaimBuilder, ClaimLocation, Declarations, DocumentRef, DocumentType, LandType,
    };
    use crate::lifecycle::{Actor, ActorRole, TransitionPayload};
    use core_kernel::geo::Coordinate;
    use rust_decimal_macros::dec;

    fn claim(name: &str, village: &str, district: &str, area: Decimal, priority: Priority) -> Claim {
        let mut c = ClaimBuilder::new()
            .applicant(Applicant {
                name: name.to_string(),
                guardian_name: "Guardian".to_string(),
                mobile_number: "9876543210".to_string(),
                email: None,
            })
            .location(ClaimLocation {
                village: village.to_string(),
                district: district.to_string(),
                state: "Madhya Pradesh".to_string(),
                center: Coordinate::new(23.2599, 77.4126).unwrap(),
                boundary: vec![],
            })
            .claim_type(ClaimType::Individual)
            .land_type(LandType::Agricultural)
            .area_hectares(area)
            .add_document(DocumentRef::new(DocumentType::LandRecord, "records.pdf", 1))
            .declarations(Declarations {
                truth_accepted: true,
                false_information_acknowledged: true,
                data_consent: true,
            })
            .priority(priority)
            .build()
            .unwrap();
        let actor = Actor::new("claimant", ActorRole::Claimant);
        c.transition(ClaimStatus::Submitted, &actor, TransitionPayload::None, None)
            .unwrap();
        c
    }

    fn sample() -> Vec<Claim> {
        vec![
            claim("Ramesh Kumar Patel", "Khandwa", "Khandwa", dec!(2.5), Priority::High),
            claim("Sunita Devi Meena", "Banswara", "Banswara", dec!(1.8), Priority::Medium),
            claim("Tribal Welfare Committee", "Koraput", "Koraput", dec!(15.2), Priority::High),
            claim("Lakshmi Tribal Sangha", "Wayanad", "Wayanad", dec!(8.7), Priority::Low),
        ]
    }

    #[test]
    fn test_filter_by_search_is_case_insensitive() {
        let claims = sample();
        let filter = ClaimFilter {
            search: Some("KHANDWA".to_string()),
            ..Default::default()
        };
        let result = query(&claims, &filter, SortKey::Priority, Utc::now());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].applicant_name, "Ramesh Kumar Patel");
    }

    #[test]
    fn test_filter_by_status() {
        let claims = sample();
        let filter = ClaimFilter {
            status: Some(ClaimStatus::Submitted),
            ..Default::default()
        };
        assert_eq!(query(&claims, &filter, SortKey::Date, Utc::now()).len(), 4);

        let filter = ClaimFilter {
            status: Some(ClaimStatus::Verified),
            ..Default::default()
        };
        assert!(query(&claims, &filter, SortKey::Date, Utc::now()).is_empty());
    }

    #[test]
    fn test_sort_by_priority_descending() {
        let claims = sample();
        let result = query(&claims, &ClaimFilter::default(), SortKey::Priority, Utc::now());
        let ranks: Vec<u8> = result.iter().map(|s| s.priority.rank()).collect();
        assert_eq!(ranks, vec![3, 3, 2, 1]);
    }

    #[test]
    fn test_priority_sort_is_stable() {
        let claims = sample();
        let result = query(&claims, &ClaimFilter::default(), SortKey::Priority, Utc::now());
        // The two high-priority claims keep their original relative order
        assert_eq!(result[0].applicant_name, "Ramesh Kumar Patel");
        assert_eq!(result[1].applicant_name, "Tribal Welfare Committee");
    }

    #[test]
    fn test_sort_by_area_descending() {
        let claims = sample();
        let result = query(&claims, &ClaimFilter::default(), SortKey::Area, Utc::now());
        assert_eq!(result[0].area_hectares, dec!(15.2));
        assert_eq!(result[3].area_hectares, dec!(1.8));
    }

    #[test]
    fn test_sort_by_district_ascending() {
        let claims = sample();
        let result = query(&claims, &ClaimFilter::default(), SortKey::District, Utc::now());
        let districts: Vec<&str> = result.iter().map(|s| s.district.as_str()).collect();
        assert_eq!(districts, vec!["Banswara", "Khandwa", "Koraput", "Wayanad"]);
    }

    #[test]
    fn test_repeated_query_is_deterministic() {
        let claims = sample();
        let now = Utc::now();
        let first = query(&claims, &ClaimFilter::default(), SortKey::Priority, now);
        let second = query(&claims, &ClaimFilter::default(), SortKey::Priority, now);
        let ids_first: Vec<_> = first.iter().map(|s| s.id).collect();
        let ids_second: Vec<_> = second.iter().map(|s| s.id).collect();
        assert_eq!(ids_first, ids_second);
    }

    #[test]
    fn test_filter_by_officer() {
        let mut claims = sample();
        claims[0].assign_officer("Rajesh Kumar");
        let filter = ClaimFilter {
            assigned_officer: Some("Rajesh Kumar".to_string()),
            ..Default::default()
        };
        let result = query(&claims, &filter, SortKey::Date, Utc::now());
        assert_eq!(result.len(), 1);
    }
}

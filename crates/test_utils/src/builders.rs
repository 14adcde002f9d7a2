//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while
//! using defaults for everything else.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::geo::Coordinate;

use domain_claims::{
    Actor, ActorRole, Claim, ClaimDraft, ClaimStatus, ClaimType, DocumentRef, DocumentType,
    LandType, Priority, Recommendation, TransitionPayload,
};

use crate::fixtures::{CommitteeFixtures, GeoFixtures, StringFixtures};

/// Builder for a valid claim draft
pub struct ClaimDraftBuilder {
    draft: ClaimDraft,
}

impl Default for ClaimDraftBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimDraftBuilder {
    /// Creates a builder whose draft passes every stage validator
    pub fn new() -> Self {
        Self {
            draft: ClaimDraft {
                applicant_name: Some(StringFixtures::applicant_name().to_string()),
                guardian_name: Some(StringFixtures::guardian_name().to_string()),
                mobile_number: Some(StringFixtures::mobile_number().to_string()),
                email: Some("applicant@example.in".to_string()),
                village: Some(StringFixtures::village().to_string()),
                district: Some(StringFixtures::district().to_string()),
                state: Some(StringFixtures::state().to_string()),
                claim_type: Some(ClaimType::Individual),
                land_type: Some(LandType::Agricultural),
                total_area: Some(dec!(2.5)),
                description: Some("Ancestral cultivation since 1987".to_string()),
                priority: None,
                truth_declaration: true,
                false_information_declaration: true,
                data_consent: true,
                documents: vec![DocumentRef::new(
                    DocumentType::IdentityProof,
                    "aadhaar.pdf",
                    120_000,
                )],
                center: Some(GeoFixtures::bhopal()),
                boundary: vec![],
            },
        }
    }

    pub fn with_applicant_name(mut self, name: impl Into<String>) -> Self {
        self.draft.applicant_name = Some(name.into());
        self
    }

    pub fn with_mobile_number(mut self, mobile: impl Into<String>) -> Self {
        self.draft.mobile_number = Some(mobile.into());
        self
    }

    pub fn with_village(mut self, village: impl Into<String>) -> Self {
        self.draft.village = Some(village.into());
        self
    }

    pub fn with_district(mut self, district: impl Into<String>) -> Self {
        self.draft.district = Some(district.into());
        self
    }

    pub fn with_claim_type(mut self, claim_type: ClaimType) -> Self {
        self.draft.claim_type = Some(claim_type);
        self
    }

    pub fn with_area(mut self, area: Decimal) -> Self {
        self.draft.total_area = Some(area);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.draft.priority = Some(priority);
        self
    }

    pub fn with_center(mut self, center: Coordinate) -> Self {
        self.draft.center = Some(center);
        self
    }

    pub fn without_documents(mut self) -> Self {
        self.draft.documents.clear();
        self
    }

    pub fn without_declarations(mut self) -> Self {
        self.draft.truth_declaration = false;
        self.draft.false_information_declaration = false;
        self.draft.data_consent = false;
        self
    }

    pub fn build(self) -> ClaimDraft {
        self.draft
    }
}

/// Builds a claim advanced to a requested lifecycle stage
///
/// Walks the aggregate through real transitions (no state is faked), so
/// the resulting claim carries a genuine history and checklist.
pub struct StagedClaimBuilder {
    draft: ClaimDraft,
    status: ClaimStatus,
}

impl StagedClaimBuilder {
    pub fn new(status: ClaimStatus) -> Self {
        Self {
            draft: ClaimDraftBuilder::new().build(),
            status,
        }
    }

    pub fn with_draft(mut self, draft: ClaimDraft) -> Self {
        self.draft = draft;
        self
    }

    /// Builds the claim, advancing it through the lifecycle
    ///
    /// # Panics
    ///
    /// Panics on an unreachable target stage; test-only code.
    pub fn build(self) -> Claim {
        let claimant = Actor::new("claimant-1", ActorRole::Claimant);
        let officer = Actor::new("officer-1", ActorRole::FieldOfficer);

        let mut claim = build_from_draft(self.draft);
        if self.status == ClaimStatus::Draft {
            return claim;
        }

        let path = [
            (ClaimStatus::Submitted, &claimant),
            (ClaimStatus::FieldVerificationPending, &officer),
            (ClaimStatus::UnderVerification, &officer),
        ];
        for (target, actor) in path {
            claim
                .transition(target, actor, TransitionPayload::None, None)
                .expect("staged transition");
            if claim.status() == self.status {
                return claim;
            }
        }

        // Past under_verification: complete the checklist and verify
        for (category, item_id) in required_checklist_items(&claim) {
            claim
                .toggle_checklist_item(category, &item_id, true)
                .expect("toggle required item");
        }
        claim
            .submit_verification("Verified on site", Some(Recommendation::Approve), &officer)
            .expect("submit verification");
        if claim.status() == self.status {
            return claim;
        }

        claim
            .transition(
                ClaimStatus::CommitteeReview,
                &officer,
                TransitionPayload::None,
                None,
            )
            .expect("staged transition");
        claim
            .convene_committee(CommitteeFixtures::standard_roster())
            .expect("convene committee");
        if claim.status() == self.status {
            return claim;
        }

        panic!("unsupported staged status: {}", self.status);
    }
}

fn required_checklist_items(
    claim: &Claim,
) -> Vec<(domain_claims::ChecklistCategory, String)> {
    claim
        .checklist()
        .items()
        .iter()
        .filter(|i| i.required)
        .map(|i| (i.category, i.id.clone()))
        .collect()
}

fn build_from_draft(draft: ClaimDraft) -> Claim {
    use domain_claims::{Applicant, ClaimBuilder, ClaimLocation, Declarations};

    ClaimBuilder::new()
        .applicant(Applicant {
            name: draft.applicant_name.expect("applicant name"),
            guardian_name: draft.guardian_name.expect("guardian name"),
            mobile_number: draft.mobile_number.expect("mobile number"),
            email: draft.email,
        })
        .location(ClaimLocation {
            village: draft.village.expect("village"),
            district: draft.district.expect("district"),
            state: draft.state.expect("state"),
            center: draft.center.expect("center"),
            boundary: draft.boundary,
        })
        .claim_type(draft.claim_type.expect("claim type"))
        .land_type(draft.land_type.expect("land type"))
        .area_hectares(draft.total_area.expect("area"))
        .documents(draft.documents)
        .declarations(Declarations {
            truth_accepted: draft.truth_declaration,
            false_information_acknowledged: draft.false_information_declaration,
            data_consent: draft.data_consent,
        })
        .priority(draft.priority.unwrap_or(Priority::Medium))
        .build()
        .expect("valid test claim")
}

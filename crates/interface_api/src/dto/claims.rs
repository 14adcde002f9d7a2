//! Claims DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::geo::Coordinate;
use core_kernel::MemberId;

use domain_claims::{
    ChecklistCategory, ChecklistItem, ChecklistStats, Claim, ClaimDraft, ClaimStatus,
    ClaimType, CommitteeMember, Decision, DecisionType, DocumentRef, DocumentType, LandType,
    Priority, Recommendation, VoteValue,
};

use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
pub struct CoordinateDto {
    pub latitude: f64,
    pub longitude: f64,
}

impl CoordinateDto {
    fn into_coordinate(self) -> Result<Coordinate, ApiError> {
        Coordinate::new(self.latitude, self.longitude)
            .map_err(|e| ApiError::BadRequest(e.to_string()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentDto {
    pub document_type: DocumentType,
    pub file_name: String,
    #[serde(default)]
    pub size_bytes: u64,
}

#[derive(Debug, Deserialize)]
pub struct SubmitClaimRequest {
    pub applicant_name: Option<String>,
    pub guardian_name: Option<String>,
    pub mobile_number: Option<String>,
    pub email: Option<String>,
    pub village: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub claim_type: Option<ClaimType>,
    pub land_type: Option<LandType>,
    pub total_area: Option<Decimal>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    #[serde(default)]
    pub truth_declaration: bool,
    #[serde(default)]
    pub false_information_declaration: bool,
    #[serde(default)]
    pub data_consent: bool,
    #[serde(default)]
    pub documents: Vec<DocumentDto>,
    pub center: Option<CoordinateDto>,
    #[serde(default)]
    pub boundary: Vec<CoordinateDto>,
}

impl SubmitClaimRequest {
    pub fn into_draft(self) -> Result<ClaimDraft, ApiError> {
        let center = self.center.map(CoordinateDto::into_coordinate).transpose()?;
        let boundary = self
            .boundary
            .into_iter()
            .map(CoordinateDto::into_coordinate)
            .collect::<Result<Vec<_>, _>>()?;
        let documents = self
            .documents
            .into_iter()
            .map(|d| DocumentRef::new(d.document_type, d.file_name, d.size_bytes))
            .collect();

        Ok(ClaimDraft {
            applicant_name: self.applicant_name,
            guardian_name: self.guardian_name,
            mobile_number: self.mobile_number,
            email: self.email,
            village: self.village,
            district: self.district,
            state: self.state,
            claim_type: self.claim_type,
            land_type: self.land_type,
            total_area: self.total_area,
            description: self.description,
            priority: self.priority,
            truth_declaration: self.truth_declaration,
            false_information_declaration: self.false_information_declaration,
            data_consent: self.data_consent,
            documents,
            center,
            boundary,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    pub target: ClaimStatus,
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QueueUpdateRequest {
    pub priority: Option<Priority>,
    pub assigned_officer: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleChecklistItemRequest {
    pub category: ChecklistCategory,
    pub item_id: String,
    pub checked: bool,
    pub comments: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitVerificationRequest {
    #[serde(default)]
    pub overall_comments: String,
    pub recommendation: Option<Recommendation>,
}

#[derive(Debug, Deserialize)]
pub struct CommitteeMemberDto {
    pub member_id: Option<Uuid>,
    pub name: String,
    #[serde(default = "default_weight")]
    pub weight: u32,
    #[serde(default)]
    pub is_chair: bool,
}

fn default_weight() -> u32 {
    1
}

impl CommitteeMemberDto {
    pub fn into_member(self) -> CommitteeMember {
        let member_id = self.member_id.map(MemberId::from_uuid).unwrap_or_default();
        if self.is_chair {
            CommitteeMember::chair(member_id, self.name, self.weight)
        } else {
            CommitteeMember::new(member_id, self.name, self.weight)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ConveneCommitteeRequest {
    pub members: Vec<CommitteeMemberDto>,
}

#[derive(Debug, Deserialize)]
pub struct CastVoteRequest {
    pub member_id: Uuid,
    pub vote: VoteValue,
}

#[derive(Debug, Deserialize)]
pub struct FinalizeDecisionRequest {
    pub decision: DecisionType,
    pub justification: String,
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub chair_override: bool,
}

#[derive(Debug, Deserialize)]
pub struct QueryParams {
    pub status: Option<String>,
    pub assigned_officer: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub id: Uuid,
    pub claim_number: String,
    pub status: ClaimStatus,
    pub priority: Priority,
    pub applicant_name: String,
    pub village: String,
    pub district: String,
    pub state: String,
    pub claim_type: ClaimType,
    pub land_type: LandType,
    pub area_hectares: Decimal,
    pub assigned_officer: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
    pub version: u32,
}

impl ClaimResponse {
    pub fn from_claim(claim: &Claim) -> Self {
        Self {
            id: Uuid::from(claim.id()),
            claim_number: claim.claim_number().to_string(),
            status: claim.status(),
            priority: claim.priority(),
            applicant_name: claim.applicant().name.clone(),
            village: claim.location().village.clone(),
            district: claim.location().district.clone(),
            state: claim.location().state.clone(),
            claim_type: claim.claim_type(),
            land_type: claim.land_type(),
            area_hectares: claim.area_hectares(),
            assigned_officer: claim.assigned_officer().map(str::to_string),
            submitted_at: claim.submitted_at(),
            updated_at: claim.updated_at(),
            version: claim.version(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChecklistResponse {
    pub items: Vec<ChecklistItem>,
    pub stats: ChecklistStats,
    pub gate_passed: bool,
    pub submitted: bool,
}

impl ChecklistResponse {
    pub fn from_claim(claim: &Claim) -> Self {
        let stats = claim.checklist().stats();
        Self {
            items: claim.checklist().items().to_vec(),
            stats,
            gate_passed: stats.gate_passed(),
            submitted: claim.checklist().is_submitted(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClaimDetailResponse {
    pub claim: ClaimResponse,
    pub checklist: ChecklistResponse,
    pub decision: Option<Decision>,
}

impl ClaimDetailResponse {
    pub fn from_claim(claim: &Claim) -> Self {
        Self {
            claim: ClaimResponse::from_claim(claim),
            checklist: ChecklistResponse::from_claim(claim),
            decision: claim.decision().cloned(),
        }
    }
}

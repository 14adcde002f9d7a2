//! Claim Aggregate Root
//!
//! The Claim aggregate is the consistency boundary for a forest rights
//! application. The verification checklist, committee session, and
//! decision are embedded so a single optimistic-version write covers
//! every mutation, and `status` changes only through [`Claim::transition`].
//!
//! # Invariants
//!
//! - Declared area is positive
//! - Once submitted, the center coordinate lies inside the configured
//!   national bounding box
//! - Lifecycle transitions follow the adjacency list in [`crate::lifecycle`]
//! - Votes are append-only; the decision, once recorded, is final

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::geo::Coordinate;
use core_kernel::{ClaimId, DocumentId, MemberId};

use crate::checklist::{
    ChecklistCategory, ChecklistSnapshot, Recommendation, VerificationChecklist,
};
use crate::consensus::{
    CommitteeMember, CommitteeSession, ConsensusPolicy, ConsensusReport, VoteValue,
};
use crate::decision::Decision;
use crate::error::ClaimError;
use crate::events::ClaimEvent;
use crate::lifecycle::{
    authorized_roles, is_transition_allowed, Actor, ClaimStatus, TransitionPayload,
    TransitionRecord,
};

/// Kind of forest rights being claimed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimType {
    Individual,
    Community,
    CommunityResource,
    Habitat,
    Development,
}

impl fmt::Display for ClaimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ClaimType::Individual => "individual",
            ClaimType::Community => "community",
            ClaimType::CommunityResource => "community_resource",
            ClaimType::Habitat => "habitat",
            ClaimType::Development => "development",
        };
        f.write_str(s)
    }
}

/// Current use of the claimed land
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandType {
    Agricultural,
    Forest,
    Habitation,
    Grazing,
    WaterBody,
    Mixed,
}

/// Queue priority, set at intake or by an officer
///
/// Priority is an explicit attribute; the engine never derives it from
/// claim type or area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Ordering rank for queue sorting (high = 3, medium = 2, low = 1)
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }
}

/// Category of an attached document reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    IdentityProof,
    LandRecord,
    BankPassbook,
    Photograph,
    WitnessStatement,
    Other,
}

/// Reference to a document held by the external document store
///
/// The engine keeps references only; bytes live elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRef {
    pub id: DocumentId,
    pub document_type: DocumentType,
    pub file_name: String,
    pub size_bytes: u64,
    pub verified: bool,
}

impl DocumentRef {
    pub fn new(document_type: DocumentType, file_name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            id: DocumentId::new(),
            document_type,
            file_name: file_name.into(),
            size_bytes,
            verified: false,
        }
    }
}

/// Claimant identity details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Applicant {
    pub name: String,
    pub guardian_name: String,
    pub mobile_number: String,
    pub email: Option<String>,
}

/// Where the claimed land lies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimLocation {
    pub village: String,
    pub district: String,
    pub state: String,
    pub center: Coordinate,
    pub boundary: Vec<Coordinate>,
}

/// The three intake declarations, retained for audit
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Declarations {
    pub truth_accepted: bool,
    pub false_information_acknowledged: bool,
    pub data_consent: bool,
}

impl Declarations {
    pub fn all_accepted(&self) -> bool {
        self.truth_accepted && self.false_information_acknowledged && self.data_consent
    }
}

/// The Claim aggregate root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    id: ClaimId,
    claim_number: String,
    applicant: Applicant,
    location: ClaimLocation,
    claim_type: ClaimType,
    land_type: LandType,
    area_hectares: Decimal,
    description: Option<String>,
    documents: Vec<DocumentRef>,
    declarations: Declarations,
    status: ClaimStatus,
    priority: Priority,
    assigned_officer: Option<String>,
    checklist: VerificationChecklist,
    committee: Option<CommitteeSession>,
    decision: Option<Decision>,
    history: Vec<TransitionRecord>,
    submitted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    /// Domain events pending publication
    #[serde(skip)]
    events: Vec<ClaimEvent>,
    /// Version for optimistic concurrency; bumped on every mutation
    version: u32,
}

impl Claim {
    pub fn id(&self) -> ClaimId {
        self.id
    }

    pub fn claim_number(&self) -> &str {
        &self.claim_number
    }

    pub fn applicant(&self) -> &Applicant {
        &self.applicant
    }

    pub fn location(&self) -> &ClaimLocation {
        &self.location
    }

    pub fn claim_type(&self) -> ClaimType {
        self.claim_type
    }

    pub fn land_type(&self) -> LandType {
        self.land_type
    }

    pub fn area_hectares(&self) -> Decimal {
        self.area_hectares
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn documents(&self) -> &[DocumentRef] {
        &self.documents
    }

    pub fn declarations(&self) -> Declarations {
        self.declarations
    }

    pub fn status(&self) -> ClaimStatus {
        self.status
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn assigned_officer(&self) -> Option<&str> {
        self.assigned_officer.as_deref()
    }

    pub fn checklist(&self) -> &VerificationChecklist {
        &self.checklist
    }

    pub fn committee(&self) -> Option<&CommitteeSession> {
        self.committee.as_ref()
    }

    pub fn decision(&self) -> Option<&Decision> {
        self.decision.as_ref()
    }

    pub fn history(&self) -> &[TransitionRecord] {
        &self.history
    }

    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Returns accumulated domain events and clears them
    pub fn take_events(&mut self) -> Vec<ClaimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whole days the claim has spent since submission
    pub fn days_in_queue(&self, now: DateTime<Utc>) -> i64 {
        let reference = self.submitted_at.unwrap_or(self.created_at);
        (now - reference).num_days().max(0)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
        self.version += 1;
    }

    /// Requests a lifecycle transition
    ///
    /// Checks, in order: edge existence, actor authorization for the edge,
    /// and the edge's guard (checklist gate or decision record). On success
    /// the status changes, an immutable history entry is appended, and the
    /// matching domain events are recorded. On failure nothing changes.
    ///
    /// # Errors
    ///
    /// `IllegalTransition`, `Unauthorized`, or `GuardFailed`.
    pub fn transition(
        &mut self,
        target: ClaimStatus,
        actor: &Actor,
        payload: TransitionPayload,
        reason: Option<String>,
    ) -> Result<(), ClaimError> {
        let from = self.status;

        if !is_transition_allowed(from, target) {
            return Err(ClaimError::IllegalTransition {
                from: from.to_string(),
                to: target.to_string(),
            });
        }
        if !authorized_roles(from, target).contains(&actor.role) {
            return Err(ClaimError::Unauthorized {
                role: actor.role.to_string(),
                action: format!("transition {from} -> {target}"),
            });
        }
        let applied_decision = self.check_guard(target, &payload)?;

        let now = Utc::now();
        self.status = target;
        self.history.push(TransitionRecord {
            from,
            to: target,
            actor_id: actor.id.clone(),
            role: actor.role,
            reason,
            recorded_at: now,
        });

        if target == ClaimStatus::Submitted && self.submitted_at.is_none() {
            self.submitted_at = Some(now);
            self.events.push(ClaimEvent::ClaimSubmitted {
                claim_id: self.id,
                claim_number: self.claim_number.clone(),
                actor: actor.id.clone(),
                timestamp: now,
            });
        }
        if target == ClaimStatus::Verified {
            if let TransitionPayload::Checklist(ref snapshot) = payload {
                self.events.push(ClaimEvent::ClaimVerified {
                    claim_id: self.id,
                    recommendation: snapshot.recommendation,
                    actor: actor.id.clone(),
                    timestamp: now,
                });
            }
        }
        if let Some(decision) = applied_decision {
            self.events.push(ClaimEvent::ClaimDecided {
                claim_id: self.id,
                decision_type: decision.decision_type,
                mode: decision.mode,
                actor: actor.id.clone(),
                timestamp: now,
            });
            if decision.decision_type.is_terminal() {
                self.decision = Some(decision);
            }
        }
        self.events.push(ClaimEvent::StatusChanged {
            claim_id: self.id,
            from,
            to: target,
            actor: actor.id.clone(),
            timestamp: now,
        });

        self.touch();
        Ok(())
    }

    /// Evaluates the guard for the target edge; returns the decision to
    /// record when the edge is decision-gated
    fn check_guard(
        &self,
        target: ClaimStatus,
        payload: &TransitionPayload,
    ) -> Result<Option<Decision>, ClaimError> {
        match target {
            ClaimStatus::Verified => match payload {
                TransitionPayload::Checklist(snapshot) if snapshot.stats.gate_passed() => Ok(None),
                TransitionPayload::Checklist(_) => Err(ClaimError::GuardFailed(
                    "verification checklist has unchecked required items".to_string(),
                )),
                _ => Err(ClaimError::GuardFailed(
                    "a checklist snapshot is required to verify a claim".to_string(),
                )),
            },
            ClaimStatus::Approved
            | ClaimStatus::ApprovedConditional
            | ClaimStatus::Rejected
            | ClaimStatus::ReturnedForInfo => {
                if self.decision.is_some() {
                    return Err(ClaimError::DecisionAlreadyRecorded);
                }
                match payload {
                    TransitionPayload::Decision(decision) => {
                        if decision.justification.trim().is_empty() {
                            return Err(ClaimError::GuardFailed(
                                "decision justification must not be empty".to_string(),
                            ));
                        }
                        if decision.decision_type.target_status() != target {
                            return Err(ClaimError::GuardFailed(format!(
                                "decision type {} does not match target state {target}",
                                decision.decision_type
                            )));
                        }
                        Ok(Some(decision.clone()))
                    }
                    _ => Err(ClaimError::GuardFailed(
                        "a decision record is required for a committee outcome".to_string(),
                    )),
                }
            }
            _ => Ok(None),
        }
    }

    /// Attaches a document reference
    pub fn attach_document(&mut self, document: DocumentRef) {
        self.documents.push(document);
        self.touch();
    }

    /// Overrides the queue priority
    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
        self.touch();
    }

    /// Assigns a verification officer
    pub fn assign_officer(&mut self, officer: impl Into<String>) {
        self.assigned_officer = Some(officer.into());
        self.touch();
    }

    fn require_status(&self, expected: ClaimStatus) -> Result<(), ClaimError> {
        if self.status != expected {
            return Err(ClaimError::InvalidState {
                expected: expected.to_string(),
                actual: self.status.to_string(),
            });
        }
        Ok(())
    }

    /// Sets one checklist item's checked flag during verification
    pub fn toggle_checklist_item(
        &mut self,
        category: ChecklistCategory,
        item_id: &str,
        checked: bool,
    ) -> Result<(), ClaimError> {
        self.require_verification_stage()?;
        self.checklist.toggle_item(category, item_id, checked)?;
        self.touch();
        Ok(())
    }

    /// Sets one checklist item's comments during verification
    pub fn set_checklist_comment(
        &mut self,
        category: ChecklistCategory,
        item_id: &str,
        comments: impl Into<String>,
    ) -> Result<(), ClaimError> {
        self.require_verification_stage()?;
        self.checklist.set_comment(category, item_id, comments)?;
        self.touch();
        Ok(())
    }

    fn require_verification_stage(&self) -> Result<(), ClaimError> {
        match self.status {
            ClaimStatus::FieldVerificationPending | ClaimStatus::UnderVerification => Ok(()),
            _ => Err(ClaimError::InvalidState {
                expected: ClaimStatus::UnderVerification.to_string(),
                actual: self.status.to_string(),
            }),
        }
    }

    /// Submits the verification report and drives the `verified` transition
    pub fn submit_verification(
        &mut self,
        overall_comments: impl Into<String>,
        recommendation: Option<Recommendation>,
        actor: &Actor,
    ) -> Result<ChecklistSnapshot, ClaimError> {
        self.require_status(ClaimStatus::UnderVerification)?;
        let snapshot = self.checklist.submit(overall_comments, recommendation)?;
        self.transition(
            ClaimStatus::Verified,
            actor,
            TransitionPayload::Checklist(snapshot.clone()),
            None,
        )?;
        Ok(snapshot)
    }

    /// Fixes the committee roster once the claim is in committee review
    pub fn convene_committee(
        &mut self,
        members: Vec<CommitteeMember>,
    ) -> Result<(), ClaimError> {
        self.require_status(ClaimStatus::CommitteeReview)?;
        if self.committee.is_some() {
            return Err(ClaimError::CommitteeAlreadyConvened);
        }
        if members.is_empty() {
            return Err(ClaimError::MissingRequiredField("committee members".to_string()));
        }
        self.committee = Some(CommitteeSession::new(self.id, members));
        self.touch();
        Ok(())
    }

    /// Records a member's vote
    pub fn cast_vote(
        &mut self,
        member_id: MemberId,
        value: VoteValue,
    ) -> Result<(), ClaimError> {
        self.require_status(ClaimStatus::CommitteeReview)?;
        let session = self
            .committee
            .as_mut()
            .ok_or(ClaimError::NoCommitteeSession)?;
        session.cast_vote(member_id, value)?;
        self.touch();
        Ok(())
    }

    /// Computes the current consensus report
    pub fn consensus(&self, policy: &ConsensusPolicy) -> Result<ConsensusReport, ClaimError> {
        let session = self
            .committee
            .as_ref()
            .ok_or(ClaimError::NoCommitteeSession)?;
        Ok(session.consensus(policy))
    }
}

/// Builder for creating new claims from validated intake data
///
/// # Example
///
/// ```rust,ignore
/// let claim = ClaimBuilder::new()
///     .applicant(applicant)
///     .location(location)
///     .claim_type(ClaimType::Individual)
///     .land_type(LandType::Agricultural)
///     .area_hectares(dec!(2.5))
///     .build()?;
/// ```
pub struct ClaimBuilder {
    applicant: Option<Applicant>,
    location: Option<ClaimLocation>,
    claim_type: Option<ClaimType>,
    land_type: Option<LandType>,
    area_hectares: Option<Decimal>,
    description: Option<String>,
    documents: Vec<DocumentRef>,
    declarations: Declarations,
    priority: Priority,
}

impl ClaimBuilder {
    pub fn new() -> Self {
        Self {
            applicant: None,
            location: None,
            claim_type: None,
            land_type: None,
            area_hectares: None,
            description: None,
            documents: Vec::new(),
            declarations: Declarations {
                truth_accepted: false,
                false_information_acknowledged: false,
                data_consent: false,
            },
            priority: Priority::Medium,
        }
    }

    pub fn applicant(mut self, applicant: Applicant) -> Self {
        self.applicant = Some(applicant);
        self
    }

    pub fn location(mut self, location: ClaimLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn claim_type(mut self, claim_type: ClaimType) -> Self {
        self.claim_type = Some(claim_type);
        self
    }

    pub fn land_type(mut self, land_type: LandType) -> Self {
        self.land_type = Some(land_type);
        self
    }

    pub fn area_hectares(mut self, area: Decimal) -> Self {
        self.area_hectares = Some(area);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn add_document(mut self, document: DocumentRef) -> Self {
        self.documents.push(document);
        self
    }

    pub fn documents(mut self, documents: Vec<DocumentRef>) -> Self {
        self.documents = documents;
        self
    }

    pub fn declarations(mut self, declarations: Declarations) -> Self {
        self.declarations = declarations;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Builds the claim in the draft state
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` for absent required fields and
    /// `Invalid`-style errors for a non-positive area.
    pub fn build(self) -> Result<Claim, ClaimError> {
        let applicant = self
            .applicant
            .ok_or_else(|| ClaimError::MissingRequiredField("applicant".to_string()))?;
        let location = self
            .location
            .ok_or_else(|| ClaimError::MissingRequiredField("location".to_string()))?;
        let claim_type = self
            .claim_type
            .ok_or_else(|| ClaimError::MissingRequiredField("claim_type".to_string()))?;
        let land_type = self
            .land_type
            .ok_or_else(|| ClaimError::MissingRequiredField("land_type".to_string()))?;
        let area_hectares = self
            .area_hectares
            .ok_or_else(|| ClaimError::MissingRequiredField("area_hectares".to_string()))?;
        if area_hectares <= Decimal::ZERO {
            return Err(ClaimError::MissingRequiredField(
                "area_hectares must be positive".to_string(),
            ));
        }

        let now = Utc::now();
        let id = ClaimId::new_v7();

        Ok(Claim {
            id,
            claim_number: generate_claim_number(),
            applicant,
            location,
            claim_type,
            land_type,
            area_hectares,
            description: self.description,
            documents: self.documents,
            declarations: self.declarations,
            status: ClaimStatus::Draft,
            priority: self.priority,
            assigned_officer: None,
            checklist: VerificationChecklist::standard_for(id),
            committee: None,
            decision: None,
            history: Vec::new(),
            submitted_at: None,
            created_at: now,
            updated_at: now,
            events: Vec::new(),
            version: 1,
        })
    }
}

impl Default for ClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates a claim number in the `FR{year}{sequence}` format
fn generate_claim_number() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let year = Utc::now().format("%Y");
    format!("FR{}{:06}", year, duration.as_nanos() % 1_000_000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::ActorRole;
    use rust_decimal_macros::dec;

    fn test_claim() -> Claim {
        ClaimBuilder::new()
            .applicant(Applicant {
                name: "Ramesh Kumar Patel".to_string(),
                guardian_name: "Mohan Lal Patel".to_string(),
                mobile_number: "9876543210".to_string(),
                email: None,
            })
            .location(ClaimLocation {
                village: "Khandwa".to_string(),
                district: "Khandwa".to_string(),
                state: "Madhya Pradesh".to_string(),
                center: Coordinate::new(23.2599, 77.4126).unwrap(),
                boundary: vec![],
            })
            .claim_type(ClaimType::Individual)
            .land_type(LandType::Agricultural)
            .area_hectares(dec!(2.5))
            .add_document(DocumentRef::new(
                DocumentType::IdentityProof,
                "aadhaar.pdf",
                120_000,
            ))
            .declarations(Declarations {
                truth_accepted: true,
                false_information_acknowledged: true,
                data_consent: true,
            })
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_creates_draft() {
        let claim = test_claim();
        assert_eq!(claim.status(), ClaimStatus::Draft);
        assert!(claim.claim_number().starts_with("FR"));
        assert_eq!(claim.version(), 1);
        assert!(claim.history().is_empty());
    }

    #[test]
    fn test_builder_rejects_missing_fields() {
        let result = ClaimBuilder::new().build();
        assert!(matches!(result, Err(ClaimError::MissingRequiredField(_))));
    }

    #[test]
    fn test_builder_rejects_zero_area() {
        let result = ClaimBuilder::new()
            .applicant(test_claim().applicant().clone())
            .location(test_claim().location().clone())
            .claim_type(ClaimType::Individual)
            .land_type(LandType::Forest)
            .area_hectares(Decimal::ZERO)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_submit_records_event_and_history() {
        let mut claim = test_claim();
        let actor = Actor::new("claimant-1", ActorRole::Claimant);
        claim
            .transition(ClaimStatus::Submitted, &actor, TransitionPayload::None, None)
            .unwrap();

        assert_eq!(claim.status(), ClaimStatus::Submitted);
        assert!(claim.submitted_at().is_some());
        assert_eq!(claim.history().len(), 1);
        let events = claim.take_events();
        assert!(events.iter().any(|e| e.event_type() == "ClaimSubmitted"));
        assert!(events.iter().any(|e| e.event_type() == "StatusChanged"));
    }

    #[test]
    fn test_illegal_transition_is_noop() {
        let mut claim = test_claim();
        let actor = Actor::new("chair-1", ActorRole::CommitteeChair);
        let before = claim.version();
        let err = claim
            .transition(ClaimStatus::Approved, &actor, TransitionPayload::None, None)
            .unwrap_err();

        assert!(matches!(err, ClaimError::IllegalTransition { .. }));
        assert_eq!(claim.status(), ClaimStatus::Draft);
        assert_eq!(claim.version(), before);
        assert!(claim.history().is_empty());
    }

    #[test]
    fn test_unauthorized_role_is_rejected() {
        let mut claim = test_claim();
        let actor = Actor::new("member-1", ActorRole::CommitteeMember);
        let err = claim
            .transition(ClaimStatus::Submitted, &actor, TransitionPayload::None, None)
            .unwrap_err();
        assert!(matches!(err, ClaimError::Unauthorized { .. }));
        assert_eq!(claim.status(), ClaimStatus::Draft);
    }

    #[test]
    fn test_mutations_bump_version() {
        let mut claim = test_claim();
        let v = claim.version();
        claim.set_priority(Priority::High);
        assert_eq!(claim.version(), v + 1);
        claim.assign_officer("Rajesh Kumar");
        assert_eq!(claim.version(), v + 2);
    }
}

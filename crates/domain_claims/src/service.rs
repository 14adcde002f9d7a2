//! Claim application service
//!
//! Orchestrates validation, lifecycle transitions, checklist work, voting,
//! and queries over the `ClaimStore` port. All operations are synchronous
//! request/response; every store call runs under a bounded timeout, and
//! mutations retry a small number of times on optimistic-version conflicts
//! by reloading and reapplying, which serializes concurrent writers on the
//! same claim.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use core_kernel::geo::BoundingBox;
use core_kernel::{ClaimId, MemberId, PortError};

use crate::checklist::{ChecklistCategory, ChecklistSnapshot, Recommendation};
use crate::claim::{Applicant, Claim, ClaimBuilder, ClaimLocation, Declarations, Priority};
use crate::consensus::{CommitteeMember, ConsensusPolicy, ConsensusReport, VoteValue};
use crate::decision::{Decision, DecisionMode, DecisionType};
use crate::error::ClaimError;
use crate::lifecycle::{Actor, ActorRole, ClaimStatus, TransitionPayload};
use crate::ports::{ClaimStore, EventSink};
use crate::query::{self, ClaimFilter, ClaimSummary, SortKey};
use crate::validation::{self, ClaimDraft, Stage, StageValidation};

/// Engine policy configuration
///
/// Quorum and majority thresholds are policy, not law; deployments tune
/// them through the API configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub consensus: ConsensusPolicy,
    pub bounds: BoundingBox,
    pub store_timeout: Duration,
    pub conflict_retries: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            consensus: ConsensusPolicy::default(),
            bounds: BoundingBox::default(),
            store_timeout: Duration::from_secs(5),
            conflict_retries: 3,
        }
    }
}

/// The claim lifecycle and decision engine
pub struct ClaimService {
    store: Arc<dyn ClaimStore>,
    events: Arc<dyn EventSink>,
    config: EngineConfig,
}

impl ClaimService {
    pub fn new(
        store: Arc<dyn ClaimStore>,
        events: Arc<dyn EventSink>,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            events,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validates one wizard stage of a draft; pure, no store access
    pub fn validate_stage(&self, draft: &ClaimDraft, stage: Stage) -> StageValidation {
        validation::validate_stage(draft, stage, &self.config.bounds)
    }

    /// Validates and submits a new claim
    ///
    /// Runs every stage validator as the submission gate, builds the
    /// aggregate, drives the `draft -> submitted` transition, and persists.
    pub async fn submit_claim(
        &self,
        draft: ClaimDraft,
        actor: &Actor,
    ) -> Result<Claim, ClaimError> {
        let validation = validation::validate_all(&draft, &self.config.bounds);
        if !validation.is_valid() {
            return Err(ClaimError::Invalid(validation));
        }

        let mut claim = build_claim(draft)?;
        claim.transition(ClaimStatus::Submitted, actor, TransitionPayload::None, None)?;

        self.with_timeout("insert_claim", self.store.insert(&claim))
            .await?;
        self.publish_events(&mut claim);

        tracing::info!(
            claim_id = %claim.id(),
            claim_number = claim.claim_number(),
            "claim submitted"
        );
        Ok(claim)
    }

    /// Fetches a claim by ID
    pub async fn get_claim(&self, id: ClaimId) -> Result<Claim, ClaimError> {
        self.load(id).await
    }

    /// Requests a lifecycle transition
    pub async fn transition(
        &self,
        id: ClaimId,
        target: ClaimStatus,
        actor: &Actor,
        payload: TransitionPayload,
        reason: Option<String>,
    ) -> Result<Claim, ClaimError> {
        let (claim, ()) = self
            .mutate(id, |claim| {
                claim.transition(target, actor, payload.clone(), reason.clone())
            })
            .await?;
        tracing::info!(claim_id = %id, target = %target, actor = %actor.id, "claim transitioned");
        Ok(claim)
    }

    /// Updates queue attributes (priority override, officer assignment)
    pub async fn update_queue_attributes(
        &self,
        id: ClaimId,
        priority: Option<Priority>,
        assigned_officer: Option<String>,
        actor: &Actor,
    ) -> Result<Claim, ClaimError> {
        require_role(
            actor,
            &[ActorRole::FieldOfficer, ActorRole::Administrator],
            "update queue attributes",
        )?;
        let (claim, ()) = self
            .mutate(id, |claim| {
                if let Some(priority) = priority {
                    claim.set_priority(priority);
                }
                if let Some(officer) = &assigned_officer {
                    claim.assign_officer(officer.clone());
                }
                Ok(())
            })
            .await?;
        Ok(claim)
    }

    /// Sets a checklist item's checked flag and optional comments
    pub async fn toggle_checklist_item(
        &self,
        id: ClaimId,
        category: ChecklistCategory,
        item_id: &str,
        checked: bool,
        comments: Option<String>,
        actor: &Actor,
    ) -> Result<Claim, ClaimError> {
        require_role(
            actor,
            &[ActorRole::FieldOfficer, ActorRole::Administrator],
            "edit the verification checklist",
        )?;
        let (claim, ()) = self
            .mutate(id, |claim| {
                claim.toggle_checklist_item(category, item_id, checked)?;
                if let Some(comments) = &comments {
                    claim.set_checklist_comment(category, item_id, comments.clone())?;
                }
                Ok(())
            })
            .await?;
        Ok(claim)
    }

    /// Submits the verification report and drives the `verified` transition
    pub async fn submit_verification(
        &self,
        id: ClaimId,
        overall_comments: String,
        recommendation: Option<Recommendation>,
        actor: &Actor,
    ) -> Result<(Claim, ChecklistSnapshot), ClaimError> {
        let (claim, snapshot) = self
            .mutate(id, |claim| {
                claim.submit_verification(overall_comments.clone(), recommendation, actor)
            })
            .await?;
        tracing::info!(
            claim_id = %id,
            recommendation = ?snapshot.recommendation,
            "verification submitted"
        );
        Ok((claim, snapshot))
    }

    /// Fixes the committee roster for a claim in committee review
    pub async fn convene_committee(
        &self,
        id: ClaimId,
        members: Vec<CommitteeMember>,
        actor: &Actor,
    ) -> Result<Claim, ClaimError> {
        require_role(
            actor,
            &[ActorRole::CommitteeChair, ActorRole::Administrator],
            "convene a committee",
        )?;
        let (claim, ()) = self
            .mutate(id, |claim| claim.convene_committee(members.clone()))
            .await?;
        tracing::info!(claim_id = %id, members = claim.committee().map_or(0, |s| s.members().len()), "committee convened");
        Ok(claim)
    }

    /// Casts a member's vote and returns the updated consensus report
    ///
    /// The duplicate check and the append persist under one version check,
    /// so two concurrent requests from the same member cannot both land.
    pub async fn cast_vote(
        &self,
        id: ClaimId,
        member_id: MemberId,
        value: VoteValue,
    ) -> Result<ConsensusReport, ClaimError> {
        let policy = self.config.consensus;
        let (claim, ()) = self
            .mutate(id, |claim| claim.cast_vote(member_id, value))
            .await?;
        let report = claim.consensus(&policy)?;
        tracing::info!(
            claim_id = %id,
            member_id = %member_id,
            vote = %value,
            voted_weight = report.voted_weight,
            "vote cast"
        );
        Ok(report)
    }

    /// Computes the current consensus report without mutating anything
    pub async fn consensus(&self, id: ClaimId) -> Result<ConsensusReport, ClaimError> {
        let claim = self.load(id).await?;
        claim.consensus(&self.config.consensus)
    }

    /// Records the committee decision and drives the outcome transition
    ///
    /// Requires quorum. Without automatic consensus the finalization must
    /// be an explicit chair override, which is logged distinctly.
    pub async fn finalize_decision(
        &self,
        id: ClaimId,
        decision_type: DecisionType,
        justification: String,
        conditions: Vec<String>,
        actor: &Actor,
        chair_override: bool,
    ) -> Result<(Claim, ConsensusReport), ClaimError> {
        let policy = self.config.consensus;
        let (claim, report) = self
            .mutate(id, |claim| {
                let report = claim.consensus(&policy)?;
                if !report.quorum_met {
                    return Err(ClaimError::QuorumNotMet {
                        voted: report.voted_weight,
                        required: report.required_quorum_weight,
                    });
                }
                if !report.consensus_reached && !chair_override {
                    return Err(ClaimError::ConsensusNotReached);
                }
                let mode = if chair_override {
                    DecisionMode::ChairOverride
                } else {
                    DecisionMode::Consensus
                };
                let decision = Decision::new(
                    claim.id(),
                    decision_type,
                    justification.clone(),
                    conditions.clone(),
                    actor.id.clone(),
                    mode,
                )?;
                claim.transition(
                    decision_type.target_status(),
                    actor,
                    TransitionPayload::Decision(decision),
                    None,
                )?;
                Ok(report)
            })
            .await?;

        if chair_override {
            tracing::warn!(
                claim_id = %id,
                decision = %decision_type,
                chair = %actor.id,
                "decision finalized by chair override without automatic consensus"
            );
        } else {
            tracing::info!(
                claim_id = %id,
                decision = %decision_type,
                "decision finalized by consensus"
            );
        }
        Ok((claim, report))
    }

    /// Filters and sorts claims for queue displays; read-only
    pub async fn query_claims(
        &self,
        filter: ClaimFilter,
        sort: SortKey,
    ) -> Result<Vec<ClaimSummary>, ClaimError> {
        let claims = self.with_timeout("list_claims", self.store.list()).await?;
        Ok(query::query(&claims, &filter, sort, Utc::now()))
    }

    /// Readiness check against the store
    pub async fn ping_store(&self) -> Result<(), ClaimError> {
        self.with_timeout("ping", self.store.ping()).await
    }

    async fn load(&self, id: ClaimId) -> Result<Claim, ClaimError> {
        match self.with_timeout("get_claim", self.store.get(id)).await {
            Err(ClaimError::Store(e)) if e.is_not_found() => {
                Err(ClaimError::ClaimNotFound(id.to_string()))
            }
            other => other,
        }
    }

    /// Loads, applies, and persists a mutation under optimistic versioning
    ///
    /// Domain errors abort without persisting; version conflicts reload and
    /// reapply up to `conflict_retries` times. Events accumulated by the
    /// mutation are published only after the write lands.
    async fn mutate<R, F>(&self, id: ClaimId, mut apply: F) -> Result<(Claim, R), ClaimError>
    where
        F: FnMut(&mut Claim) -> Result<R, ClaimError>,
    {
        let mut attempt = 0u32;
        loop {
            let mut claim = self.load(id).await?;
            let expected = claim.version();
            let outcome = apply(&mut claim)?;

            match self
                .with_timeout("update_claim", self.store.update(&claim, expected))
                .await
            {
                Ok(()) => {
                    self.publish_events(&mut claim);
                    return Ok((claim, outcome));
                }
                Err(ClaimError::Store(e))
                    if e.is_conflict() && attempt < self.config.conflict_retries =>
                {
                    attempt += 1;
                    tracing::debug!(claim_id = %id, attempt, "write conflict, reloading claim");
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn with_timeout<T, F>(&self, operation: &str, fut: F) -> Result<T, ClaimError>
    where
        F: Future<Output = Result<T, PortError>>,
    {
        match tokio::time::timeout(self.config.store_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(ClaimError::Store(e)),
            Err(_) => Err(ClaimError::Store(PortError::Timeout {
                operation: operation.to_string(),
                duration_ms: self.config.store_timeout.as_millis() as u64,
            })),
        }
    }

    fn publish_events(&self, claim: &mut Claim) {
        for event in claim.take_events() {
            self.events.publish(&event);
        }
    }
}

fn require_role(actor: &Actor, allowed: &[ActorRole], action: &str) -> Result<(), ClaimError> {
    if allowed.contains(&actor.role) {
        Ok(())
    } else {
        Err(ClaimError::Unauthorized {
            role: actor.role.to_string(),
            action: action.to_string(),
        })
    }
}

/// Maps a validated draft onto the aggregate builder
fn build_claim(draft: ClaimDraft) -> Result<Claim, ClaimError> {
    let missing = |field: &str| ClaimError::MissingRequiredField(field.to_string());

    let mut builder = ClaimBuilder::new()
        .applicant(Applicant {
            name: draft.applicant_name.ok_or_else(|| missing("applicant_name"))?,
            guardian_name: draft.guardian_name.ok_or_else(|| missing("guardian_name"))?,
            mobile_number: draft.mobile_number.ok_or_else(|| missing("mobile_number"))?,
            email: draft.email,
        })
        .location(ClaimLocation {
            village: draft.village.ok_or_else(|| missing("village"))?,
            district: draft.district.ok_or_else(|| missing("district"))?,
            state: draft.state.ok_or_else(|| missing("state"))?,
            center: draft.center.ok_or_else(|| missing("center"))?,
            boundary: draft.boundary,
        })
        .claim_type(draft.claim_type.ok_or_else(|| missing("claim_type"))?)
        .land_type(draft.land_type.ok_or_else(|| missing("land_type"))?)
        .area_hectares(draft.total_area.ok_or_else(|| missing("total_area"))?)
        .documents(draft.documents)
        .declarations(Declarations {
            truth_accepted: draft.truth_declaration,
            false_information_acknowledged: draft.false_information_declaration,
            data_consent: draft.data_consent,
        })
        .priority(draft.priority.unwrap_or(Priority::Medium));

    if let Some(description) = draft.description {
        builder = builder.description(description);
    }
    builder.build()
}

//! Claims handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use core_kernel::{ClaimId, MemberId};
use domain_claims::{
    Actor, ChecklistSnapshot, ClaimFilter, ClaimSummary, ConsensusReport, SortKey, Stage,
    StageValidation, TransitionPayload,
};

use crate::dto::claims::*;
use crate::error::ApiError;
use crate::AppState;

/// Submits a new claim
pub async fn submit_claim(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(request): Json<SubmitClaimRequest>,
) -> Result<(StatusCode, Json<ClaimResponse>), ApiError> {
    let draft = request.into_draft()?;
    let claim = state.service.submit_claim(draft, &actor).await?;
    Ok((StatusCode::CREATED, Json(ClaimResponse::from_claim(&claim))))
}

/// Lists claims for queue displays
pub async fn list_claims(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<Vec<ClaimSummary>>, ApiError> {
    let status = params
        .status
        .as_deref()
        .map(str::parse)
        .transpose()
        .map_err(ApiError::BadRequest)?;
    let sort = params
        .sort
        .as_deref()
        .map(str::parse)
        .transpose()
        .map_err(ApiError::BadRequest)?
        .unwrap_or(SortKey::Priority);

    let filter = ClaimFilter {
        status,
        assigned_officer: params.assigned_officer,
        search: params.search,
    };
    let summaries = state.service.query_claims(filter, sort).await?;
    Ok(Json(summaries))
}

/// Gets a claim by ID, including checklist and decision detail
pub async fn get_claim(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClaimDetailResponse>, ApiError> {
    let claim = state.service.get_claim(ClaimId::from_uuid(id)).await?;
    Ok(Json(ClaimDetailResponse::from_claim(&claim)))
}

/// Dry-runs one wizard stage against a draft
pub async fn validate_stage(
    State(state): State<AppState>,
    Path(stage): Path<String>,
    Json(request): Json<SubmitClaimRequest>,
) -> Result<Json<StageValidation>, ApiError> {
    let stage: Stage = stage.parse().map_err(ApiError::BadRequest)?;
    let draft = request.into_draft()?;
    Ok(Json(state.service.validate_stage(&draft, stage)))
}

/// Requests a lifecycle transition
pub async fn transition(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(request): Json<TransitionRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state
        .service
        .transition(
            ClaimId::from_uuid(id),
            request.target,
            &actor,
            TransitionPayload::None,
            request.reason,
        )
        .await?;
    Ok(Json(ClaimResponse::from_claim(&claim)))
}

/// Updates queue attributes (priority override, officer assignment)
pub async fn update_queue(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(request): Json<QueueUpdateRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state
        .service
        .update_queue_attributes(
            ClaimId::from_uuid(id),
            request.priority,
            request.assigned_officer,
            &actor,
        )
        .await?;
    Ok(Json(ClaimResponse::from_claim(&claim)))
}

/// Sets a checklist item's checked flag and comments
pub async fn toggle_checklist_item(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(request): Json<ToggleChecklistItemRequest>,
) -> Result<Json<ChecklistResponse>, ApiError> {
    let claim = state
        .service
        .toggle_checklist_item(
            ClaimId::from_uuid(id),
            request.category,
            &request.item_id,
            request.checked,
            request.comments,
            &actor,
        )
        .await?;
    Ok(Json(ChecklistResponse::from_claim(&claim)))
}

/// Submits the verification report
pub async fn submit_verification(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(request): Json<SubmitVerificationRequest>,
) -> Result<Json<ChecklistSnapshot>, ApiError> {
    let (_claim, snapshot) = state
        .service
        .submit_verification(
            ClaimId::from_uuid(id),
            request.overall_comments,
            request.recommendation,
            &actor,
        )
        .await?;
    Ok(Json(snapshot))
}

/// Convenes the committee roster for a claim in committee review
pub async fn convene_committee(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(request): Json<ConveneCommitteeRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let members = request
        .members
        .into_iter()
        .map(CommitteeMemberDto::into_member)
        .collect();
    let claim = state
        .service
        .convene_committee(ClaimId::from_uuid(id), members, &actor)
        .await?;
    Ok(Json(ClaimResponse::from_claim(&claim)))
}

/// Casts a committee member's vote
pub async fn cast_vote(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CastVoteRequest>,
) -> Result<Json<ConsensusReport>, ApiError> {
    let report = state
        .service
        .cast_vote(
            ClaimId::from_uuid(id),
            MemberId::from_uuid(request.member_id),
            request.vote,
        )
        .await?;
    Ok(Json(report))
}

/// Returns the current consensus report
pub async fn get_consensus(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ConsensusReport>, ApiError> {
    let report = state.service.consensus(ClaimId::from_uuid(id)).await?;
    Ok(Json(report))
}

/// Records the committee decision
pub async fn finalize_decision(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(request): Json<FinalizeDecisionRequest>,
) -> Result<Json<ClaimDetailResponse>, ApiError> {
    let (claim, _report) = state
        .service
        .finalize_decision(
            ClaimId::from_uuid(id),
            request.decision,
            request.justification,
            request.conditions,
            &actor,
            request.chair_override,
        )
        .await?;
    Ok(Json(ClaimDetailResponse::from_claim(&claim)))
}

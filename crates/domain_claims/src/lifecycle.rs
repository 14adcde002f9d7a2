//! Claim lifecycle state machine
//!
//! The lifecycle is an explicit adjacency list plus an authorization table
//! mapping (role, edge) to allowed. Guards for the checklist-gated and
//! decision-gated edges are evaluated in [`crate::claim::Claim::transition`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::checklist::ChecklistSnapshot;
use crate::decision::Decision;

/// Claim lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    /// Being drafted by the claimant, not yet submitted
    Draft,
    /// Submitted and awaiting triage
    Submitted,
    /// Queued for a field officer
    FieldVerificationPending,
    /// Field officer is working the verification checklist
    UnderVerification,
    /// Verification submitted with a recommendation
    Verified,
    /// Before the gram sabha / committee
    CommitteeReview,
    /// Rights granted as requested
    Approved,
    /// Rights granted subject to conditions
    ApprovedConditional,
    /// Application denied
    Rejected,
    /// Sent back to the claimant for more information
    ReturnedForInfo,
}

impl ClaimStatus {
    /// Returns true for states with no outgoing transitions
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ClaimStatus::Approved | ClaimStatus::ApprovedConditional | ClaimStatus::Rejected
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Draft => "draft",
            ClaimStatus::Submitted => "submitted",
            ClaimStatus::FieldVerificationPending => "field_verification_pending",
            ClaimStatus::UnderVerification => "under_verification",
            ClaimStatus::Verified => "verified",
            ClaimStatus::CommitteeReview => "committee_review",
            ClaimStatus::Approved => "approved",
            ClaimStatus::ApprovedConditional => "approved_conditional",
            ClaimStatus::Rejected => "rejected",
            ClaimStatus::ReturnedForInfo => "returned_for_info",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ClaimStatus::Draft),
            "submitted" => Ok(ClaimStatus::Submitted),
            "field_verification_pending" => Ok(ClaimStatus::FieldVerificationPending),
            "under_verification" => Ok(ClaimStatus::UnderVerification),
            "verified" => Ok(ClaimStatus::Verified),
            "committee_review" => Ok(ClaimStatus::CommitteeReview),
            "approved" => Ok(ClaimStatus::Approved),
            "approved_conditional" => Ok(ClaimStatus::ApprovedConditional),
            "rejected" => Ok(ClaimStatus::Rejected),
            "returned_for_info" => Ok(ClaimStatus::ReturnedForInfo),
            other => Err(format!("unknown claim status: {other}")),
        }
    }
}

/// Roles recognized by the authorization table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Claimant,
    FieldOfficer,
    CommitteeMember,
    CommitteeChair,
    Administrator,
}

impl ActorRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorRole::Claimant => "claimant",
            ActorRole::FieldOfficer => "field_officer",
            ActorRole::CommitteeMember => "committee_member",
            ActorRole::CommitteeChair => "committee_chair",
            ActorRole::Administrator => "administrator",
        }
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActorRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "claimant" => Ok(ActorRole::Claimant),
            "field_officer" => Ok(ActorRole::FieldOfficer),
            "committee_member" => Ok(ActorRole::CommitteeMember),
            "committee_chair" => Ok(ActorRole::CommitteeChair),
            "administrator" => Ok(ActorRole::Administrator),
            other => Err(format!("unknown actor role: {other}")),
        }
    }
}

/// The identity performing an operation
///
/// The role is supplied by the identity provider at the API boundary and
/// trusted here; the engine authorizes but does not authenticate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub role: ActorRole,
}

impl Actor {
    pub fn new(id: impl Into<String>, role: ActorRole) -> Self {
        Self { id: id.into(), role }
    }
}

/// Stage-specific payload accompanying a transition request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TransitionPayload {
    None,
    /// Checklist snapshot gating the `verified` edge
    Checklist(ChecklistSnapshot),
    /// Decision record gating the committee outcome edges
    Decision(Decision),
}

/// An immutable entry in a claim's transition history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub from: ClaimStatus,
    pub to: ClaimStatus,
    pub actor_id: String,
    pub role: ActorRole,
    pub reason: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

/// Checks whether the edge exists in the lifecycle graph
pub fn is_transition_allowed(from: ClaimStatus, to: ClaimStatus) -> bool {
    use ClaimStatus::*;
    matches!(
        (from, to),
        (Draft, Submitted)
            | (Submitted, FieldVerificationPending)
            | (FieldVerificationPending, UnderVerification)
            | (UnderVerification, Verified)
            | (Verified, CommitteeReview)
            | (CommitteeReview, Approved)
            | (CommitteeReview, ApprovedConditional)
            | (CommitteeReview, Rejected)
            | (CommitteeReview, ReturnedForInfo)
            | (ReturnedForInfo, Submitted)
    )
}

/// Roles authorized to drive a given edge
///
/// An empty slice means the edge does not exist. Role checks are an
/// explicit capability table rather than string matching so that every
/// edge/role pairing is visible in one place.
pub fn authorized_roles(from: ClaimStatus, to: ClaimStatus) -> &'static [ActorRole] {
    use ActorRole::*;
    use ClaimStatus::*;
    match (from, to) {
        (Draft, Submitted) => &[Claimant, FieldOfficer],
        (Submitted, FieldVerificationPending) => &[FieldOfficer, Administrator],
        (FieldVerificationPending, UnderVerification) => &[FieldOfficer],
        (UnderVerification, Verified) => &[FieldOfficer],
        (Verified, CommitteeReview) => &[FieldOfficer, CommitteeChair, Administrator],
        (CommitteeReview, Approved)
        | (CommitteeReview, ApprovedConditional)
        | (CommitteeReview, Rejected)
        | (CommitteeReview, ReturnedForInfo) => &[CommitteeChair],
        (ReturnedForInfo, Submitted) => &[Claimant, FieldOfficer],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(ClaimStatus::Approved.is_terminal());
        assert!(ClaimStatus::ApprovedConditional.is_terminal());
        assert!(ClaimStatus::Rejected.is_terminal());
        assert!(!ClaimStatus::ReturnedForInfo.is_terminal());
        assert!(!ClaimStatus::CommitteeReview.is_terminal());
    }

    #[test]
    fn test_terminal_states_have_no_outgoing_edges() {
        let all = [
            ClaimStatus::Draft,
            ClaimStatus::Submitted,
            ClaimStatus::FieldVerificationPending,
            ClaimStatus::UnderVerification,
            ClaimStatus::Verified,
            ClaimStatus::CommitteeReview,
            ClaimStatus::Approved,
            ClaimStatus::ApprovedConditional,
            ClaimStatus::Rejected,
            ClaimStatus::ReturnedForInfo,
        ];
        for from in all.iter().filter(|s| s.is_terminal()) {
            for to in &all {
                assert!(!is_transition_allowed(*from, *to));
            }
        }
    }

    #[test]
    fn test_returned_for_info_loops_back() {
        assert!(is_transition_allowed(
            ClaimStatus::ReturnedForInfo,
            ClaimStatus::Submitted
        ));
    }

    #[test]
    fn test_only_field_officer_verifies() {
        let roles = authorized_roles(ClaimStatus::UnderVerification, ClaimStatus::Verified);
        assert_eq!(roles, &[ActorRole::FieldOfficer]);
    }

    #[test]
    fn test_only_chair_drives_committee_outcomes() {
        for to in [
            ClaimStatus::Approved,
            ClaimStatus::ApprovedConditional,
            ClaimStatus::Rejected,
            ClaimStatus::ReturnedForInfo,
        ] {
            assert_eq!(
                authorized_roles(ClaimStatus::CommitteeReview, to),
                &[ActorRole::CommitteeChair]
            );
        }
    }

    #[test]
    fn test_status_string_roundtrip() {
        let status = ClaimStatus::FieldVerificationPending;
        let parsed: ClaimStatus = status.as_str().parse().unwrap();
        assert_eq!(status, parsed);
    }

    #[test]
    fn test_role_string_roundtrip() {
        let role = ActorRole::CommitteeChair;
        let parsed: ActorRole = role.as_str().parse().unwrap();
        assert_eq!(role, parsed);
    }
}

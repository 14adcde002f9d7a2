//! Claims domain errors

use thiserror::Error;

use core_kernel::PortError;

use crate::validation::StageValidation;

/// Errors that can occur in the claims domain
///
/// Every rejected mutation leaves the claim unchanged; errors are returned
/// as typed results, never as silent no-ops.
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Claim not found: {0}")]
    ClaimNotFound(String),

    #[error("Validation failed with {} error(s)", .0.error_count())]
    Invalid(StageValidation),

    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    #[error("Illegal transition from {from} to {to}")]
    IllegalTransition { from: String, to: String },

    #[error("Role {role} is not authorized to {action}")]
    Unauthorized { role: String, action: String },

    #[error("Transition guard failed: {0}")]
    GuardFailed(String),

    #[error("Checklist has {completed} of {required} required items checked")]
    IncompleteRequired { completed: usize, required: usize },

    #[error("A recommendation is required to submit verification")]
    MissingRecommendation,

    #[error("Checklist is read-only once verification has been submitted")]
    ChecklistReadOnly,

    #[error("Unknown checklist item: {category}/{item}")]
    UnknownChecklistItem { category: String, item: String },

    #[error("Claim is in state {actual}, expected {expected}")]
    InvalidState { expected: String, actual: String },

    #[error("No committee session has been convened for this claim")]
    NoCommitteeSession,

    #[error("A committee session is already convened for this claim")]
    CommitteeAlreadyConvened,

    #[error("Member {0} is not on the committee roster")]
    UnknownMember(String),

    #[error("Member {0} has already voted on this claim")]
    DuplicateVote(String),

    #[error("Quorum not met: voted weight {voted} of required {required}")]
    QuorumNotMet { voted: u32, required: u32 },

    #[error("Decision justification must not be empty")]
    EmptyJustification,

    #[error("Conditions are only valid for conditional approval, not {0}")]
    InvalidConditions(String),

    #[error("A decision has already been recorded for this claim")]
    DecisionAlreadyRecorded,

    #[error("Consensus not reached; finalization requires an explicit chair override")]
    ConsensusNotReached,

    #[error("Claim store error: {0}")]
    Store(#[from] PortError),
}

impl ClaimError {
    /// Returns true if the underlying failure is a transient store problem
    /// the caller may retry with backoff
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClaimError::Store(e) if e.is_transient())
    }
}

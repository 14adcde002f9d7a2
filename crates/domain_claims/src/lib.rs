//! Forest Rights Claim Domain
//!
//! This crate implements the claim lifecycle from submission through field
//! verification and committee review to a terminal decision.
//!
//! # Claim Lifecycle
//!
//! ```text
//! draft -> submitted -> field_verification_pending -> under_verification
//!       -> verified -> committee_review
//!       -> approved | approved_conditional | rejected | returned_for_info
//! ```
//!
//! `returned_for_info` loops back to `submitted` once the claimant
//! resubmits. The three approval/rejection outcomes are terminal.

pub mod claim;
pub mod lifecycle;
pub mod validation;
pub mod checklist;
pub mod consensus;
pub mod decision;
pub mod events;
pub mod query;
pub mod ports;
pub mod service;
pub mod error;

pub use claim::{
    Claim, ClaimBuilder, Applicant, ClaimLocation, Declarations,
    DocumentRef, DocumentType, ClaimType, LandType, Priority,
};
pub use lifecycle::{Actor, ActorRole, ClaimStatus, TransitionPayload, TransitionRecord};
pub use validation::{ClaimDraft, Stage, StageValidation, ValidationWarning};
pub use checklist::{
    ChecklistCategory, ChecklistItem, ChecklistSnapshot, ChecklistStats,
    Recommendation, VerificationChecklist,
};
pub use consensus::{
    CommitteeMember, CommitteeSession, CommitteeVote, ConsensusPolicy,
    ConsensusReport, VoteTally, VoteValue,
};
pub use decision::{Decision, DecisionMode, DecisionType};
pub use events::{ClaimEvent, TracingEventSink};
pub use query::{ClaimFilter, ClaimSummary, SortKey};
pub use ports::{ClaimStore, EventSink};
pub use service::{ClaimService, EngineConfig};
pub use error::ClaimError;

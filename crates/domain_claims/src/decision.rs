//! Committee decision records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{ClaimId, DecisionId};

use crate::error::ClaimError;
use crate::lifecycle::ClaimStatus;

/// The committee's decision on a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionType {
    /// Grant forest rights as requested
    Approved,
    /// Grant rights subject to conditions
    ApprovedConditional,
    /// Deny the application
    Rejected,
    /// Send back to the claimant for clarification
    ReturnedForInfo,
}

impl DecisionType {
    /// The lifecycle state this decision drives the claim into
    pub fn target_status(&self) -> ClaimStatus {
        match self {
            DecisionType::Approved => ClaimStatus::Approved,
            DecisionType::ApprovedConditional => ClaimStatus::ApprovedConditional,
            DecisionType::Rejected => ClaimStatus::Rejected,
            DecisionType::ReturnedForInfo => ClaimStatus::ReturnedForInfo,
        }
    }

    /// True for the three outcomes that close the claim
    pub fn is_terminal(&self) -> bool {
        self.target_status().is_terminal()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionType::Approved => "approved",
            DecisionType::ApprovedConditional => "approved_conditional",
            DecisionType::Rejected => "rejected",
            DecisionType::ReturnedForInfo => "returned_for_info",
        }
    }
}

impl fmt::Display for DecisionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecisionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(DecisionType::Approved),
            "approved_conditional" => Ok(DecisionType::ApprovedConditional),
            "rejected" => Ok(DecisionType::Rejected),
            "returned_for_info" => Ok(DecisionType::ReturnedForInfo),
            other => Err(format!("unknown decision type: {other}")),
        }
    }
}

/// How the decision was reached
///
/// Chair overrides (a decision without automatic consensus, e.g. after a
/// tie) are recorded and logged distinctly from consensus decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionMode {
    Consensus,
    ChairOverride,
}

impl fmt::Display for DecisionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionMode::Consensus => f.write_str("consensus"),
            DecisionMode::ChairOverride => f.write_str("chair_override"),
        }
    }
}

/// The immutable decision record created once per claim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    pub id: DecisionId,
    pub claim_id: ClaimId,
    pub decision_type: DecisionType,
    pub justification: String,
    pub conditions: Vec<String>,
    pub decided_by: String,
    pub mode: DecisionMode,
    pub decided_at: DateTime<Utc>,
}

impl Decision {
    /// Creates a decision record, enforcing the justification and
    /// conditions invariants
    ///
    /// # Errors
    ///
    /// `EmptyJustification` when the justification is blank;
    /// `InvalidConditions` when conditions accompany a decision type other
    /// than conditional approval. An empty conditions list is always
    /// acceptable, including for conditional approval.
    pub fn new(
        claim_id: ClaimId,
        decision_type: DecisionType,
        justification: impl Into<String>,
        conditions: Vec<String>,
        decided_by: impl Into<String>,
        mode: DecisionMode,
    ) -> Result<Self, ClaimError> {
        let justification = justification.into();
        if justification.trim().is_empty() {
            return Err(ClaimError::EmptyJustification);
        }
        if !conditions.is_empty() && decision_type != DecisionType::ApprovedConditional {
            return Err(ClaimError::InvalidConditions(decision_type.to_string()));
        }

        Ok(Self {
            id: DecisionId::new_v7(),
            claim_id,
            decision_type,
            justification,
            conditions,
            decided_by: decided_by.into(),
            mode,
            decided_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_requires_justification() {
        let err = Decision::new(
            ClaimId::new(),
            DecisionType::Approved,
            "   ",
            vec![],
            "chair",
            DecisionMode::Consensus,
        )
        .unwrap_err();
        assert!(matches!(err, ClaimError::EmptyJustification));
    }

    #[test]
    fn test_conditions_only_for_conditional_approval() {
        let err = Decision::new(
            ClaimId::new(),
            DecisionType::Approved,
            "Valid claim",
            vec!["Sustainable forest resource use only".to_string()],
            "chair",
            DecisionMode::Consensus,
        )
        .unwrap_err();
        assert!(matches!(err, ClaimError::InvalidConditions(_)));
    }

    #[test]
    fn test_conditional_approval_with_empty_conditions_is_allowed() {
        let decision = Decision::new(
            ClaimId::new(),
            DecisionType::ApprovedConditional,
            "Approved subject to conditions to be notified",
            vec![],
            "chair",
            DecisionMode::Consensus,
        );
        assert!(decision.is_ok());
    }

    #[test]
    fn test_target_statuses() {
        assert_eq!(
            DecisionType::Approved.target_status(),
            ClaimStatus::Approved
        );
        assert_eq!(
            DecisionType::ReturnedForInfo.target_status(),
            ClaimStatus::ReturnedForInfo
        );
        assert!(DecisionType::Rejected.is_terminal());
        assert!(!DecisionType::ReturnedForInfo.is_terminal());
    }
}

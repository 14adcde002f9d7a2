//! Domain events for the claim aggregate
//!
//! Events capture the milestones an external notifier may subscribe to.
//! They accumulate on the aggregate and are published by the service after
//! a successful persist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::ClaimId;

use crate::checklist::Recommendation;
use crate::decision::{DecisionMode, DecisionType};
use crate::lifecycle::ClaimStatus;
use crate::ports::EventSink;

/// Domain events emitted by the Claim aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ClaimEvent {
    /// Claim entered the submitted state
    ClaimSubmitted {
        claim_id: ClaimId,
        claim_number: String,
        actor: String,
        timestamp: DateTime<Utc>,
    },

    /// Field verification submitted with a recommendation
    ClaimVerified {
        claim_id: ClaimId,
        recommendation: Recommendation,
        actor: String,
        timestamp: DateTime<Utc>,
    },

    /// Committee decision recorded
    ClaimDecided {
        claim_id: ClaimId,
        decision_type: DecisionType,
        mode: DecisionMode,
        actor: String,
        timestamp: DateTime<Utc>,
    },

    /// Any lifecycle transition
    StatusChanged {
        claim_id: ClaimId,
        from: ClaimStatus,
        to: ClaimStatus,
        actor: String,
        timestamp: DateTime<Utc>,
    },
}

impl ClaimEvent {
    /// Returns the claim ID associated with this event
    pub fn claim_id(&self) -> ClaimId {
        match self {
            ClaimEvent::ClaimSubmitted { claim_id, .. } => *claim_id,
            ClaimEvent::ClaimVerified { claim_id, .. } => *claim_id,
            ClaimEvent::ClaimDecided { claim_id, .. } => *claim_id,
            ClaimEvent::StatusChanged { claim_id, .. } => *claim_id,
        }
    }

    /// Returns the timestamp of this event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            ClaimEvent::ClaimSubmitted { timestamp, .. } => *timestamp,
            ClaimEvent::ClaimVerified { timestamp, .. } => *timestamp,
            ClaimEvent::ClaimDecided { timestamp, .. } => *timestamp,
            ClaimEvent::StatusChanged { timestamp, .. } => *timestamp,
        }
    }

    /// Returns the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            ClaimEvent::ClaimSubmitted { .. } => "ClaimSubmitted",
            ClaimEvent::ClaimVerified { .. } => "ClaimVerified",
            ClaimEvent::ClaimDecided { .. } => "ClaimDecided",
            ClaimEvent::StatusChanged { .. } => "StatusChanged",
        }
    }
}

/// Event sink that logs events through `tracing`
///
/// Stands in for the external notification service in local and test
/// wiring; a real notifier subscribes at the same seam.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn publish(&self, event: &ClaimEvent) {
        tracing::info!(
            event_type = event.event_type(),
            claim_id = %event.claim_id(),
            timestamp = %event.timestamp(),
            "domain event"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_accessors() {
        let claim_id = ClaimId::new();
        let event = ClaimEvent::ClaimSubmitted {
            claim_id,
            claim_number: "FR2025001".to_string(),
            actor: "claimant-1".to_string(),
            timestamp: Utc::now(),
        };
        assert_eq!(event.claim_id(), claim_id);
        assert_eq!(event.event_type(), "ClaimSubmitted");
    }

    #[test]
    fn test_event_serialization() {
        let event = ClaimEvent::StatusChanged {
            claim_id: ClaimId::new(),
            from: ClaimStatus::Submitted,
            to: ClaimStatus::FieldVerificationPending,
            actor: "officer-1".to_string(),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("StatusChanged"));
    }
}

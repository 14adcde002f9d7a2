//! Committee voting and consensus calculation
//!
//! A committee session is convened when a claim enters committee review.
//! The roster (members and their vote weights) is fixed at that point;
//! votes are append-only and one per member. Quorum and majority
//! thresholds are policy configuration, not hardcoded law.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use core_kernel::{ClaimId, MemberId};

use crate::error::ClaimError;

/// A committee member's vote value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteValue {
    Approve,
    Conditional,
    Reject,
    Abstain,
}

impl VoteValue {
    pub const ALL: [VoteValue; 4] = [
        VoteValue::Approve,
        VoteValue::Conditional,
        VoteValue::Reject,
        VoteValue::Abstain,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VoteValue::Approve => "approve",
            VoteValue::Conditional => "conditional",
            VoteValue::Reject => "reject",
            VoteValue::Abstain => "abstain",
        }
    }
}

impl fmt::Display for VoteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteValue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" => Ok(VoteValue::Approve),
            "conditional" => Ok(VoteValue::Conditional),
            "reject" => Ok(VoteValue::Reject),
            "abstain" => Ok(VoteValue::Abstain),
            other => Err(format!("unknown vote value: {other}")),
        }
    }
}

/// A member of the convened committee
///
/// Vote weight is a property of membership, fixed when the roster is
/// convened. The chair conventionally carries a higher weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitteeMember {
    pub member_id: MemberId,
    pub name: String,
    pub weight: u32,
    pub is_chair: bool,
}

impl CommitteeMember {
    pub fn new(member_id: MemberId, name: impl Into<String>, weight: u32) -> Self {
        Self {
            member_id,
            name: name.into(),
            weight: weight.max(1),
            is_chair: false,
        }
    }

    pub fn chair(member_id: MemberId, name: impl Into<String>, weight: u32) -> Self {
        Self {
            member_id,
            name: name.into(),
            weight: weight.max(1),
            is_chair: true,
        }
    }
}

/// An immutable, append-only vote record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitteeVote {
    pub member_id: MemberId,
    pub value: VoteValue,
    pub weight: u32,
    pub cast_at: DateTime<Utc>,
}

/// Configurable quorum and majority thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusPolicy {
    /// Fraction of total weight that must have voted before finalization
    pub quorum_threshold: Decimal,
    /// Fraction of total weight the approve tally must exceed
    pub majority_threshold: Decimal,
}

impl Default for ConsensusPolicy {
    fn default() -> Self {
        Self {
            quorum_threshold: dec!(0.6),
            majority_threshold: dec!(0.5),
        }
    }
}

impl ConsensusPolicy {
    /// The minimum voted weight for quorum: ceil(total * quorum_threshold)
    pub fn required_quorum_weight(&self, total_weight: u32) -> u32 {
        (Decimal::from(total_weight) * self.quorum_threshold)
            .ceil()
            .to_u32()
            .unwrap_or(total_weight)
    }
}

/// Per-vote-value tally
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub count: usize,
    pub weight: u32,
}

/// The computed state of a committee vote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusReport {
    pub total_weight: u32,
    pub voted_weight: u32,
    pub required_quorum_weight: u32,
    pub quorum_met: bool,
    pub breakdown: BTreeMap<VoteValue, VoteTally>,
    pub consensus_reached: bool,
    /// Approve and reject weights are equal and non-zero with no consensus;
    /// finalization then requires an explicit chair override
    pub tied: bool,
}

/// The committee review session for one claim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitteeSession {
    claim_id: ClaimId,
    members: Vec<CommitteeMember>,
    votes: Vec<CommitteeVote>,
}

impl CommitteeSession {
    pub fn new(claim_id: ClaimId, members: Vec<CommitteeMember>) -> Self {
        Self {
            claim_id,
            members,
            votes: Vec::new(),
        }
    }

    pub fn claim_id(&self) -> ClaimId {
        self.claim_id
    }

    pub fn members(&self) -> &[CommitteeMember] {
        &self.members
    }

    pub fn votes(&self) -> &[CommitteeVote] {
        &self.votes
    }

    pub fn member(&self, member_id: MemberId) -> Option<&CommitteeMember> {
        self.members.iter().find(|m| m.member_id == member_id)
    }

    pub fn has_voted(&self, member_id: MemberId) -> bool {
        self.votes.iter().any(|v| v.member_id == member_id)
    }

    /// Total weight of the convened roster
    pub fn total_weight(&self) -> u32 {
        self.members.iter().map(|m| m.weight).sum()
    }

    /// Appends a vote for a roster member
    ///
    /// The duplicate check and the append happen on the same aggregate
    /// under one optimistic-version write, so two concurrent casts by the
    /// same member cannot both land.
    pub fn cast_vote(&mut self, member_id: MemberId, value: VoteValue) -> Result<(), ClaimError> {
        let member = self
            .member(member_id)
            .ok_or_else(|| ClaimError::UnknownMember(member_id.to_string()))?;
        let weight = member.weight;
        if self.has_voted(member_id) {
            return Err(ClaimError::DuplicateVote(member_id.to_string()));
        }
        self.votes.push(CommitteeVote {
            member_id,
            value,
            weight,
            cast_at: Utc::now(),
        });
        Ok(())
    }

    /// Computes the weighted tally; idempotent for a fixed vote set
    pub fn consensus(&self, policy: &ConsensusPolicy) -> ConsensusReport {
        let total_weight = self.total_weight();
        let voted_weight: u32 = self.votes.iter().map(|v| v.weight).sum();

        let mut breakdown: BTreeMap<VoteValue, VoteTally> = VoteValue::ALL
            .iter()
            .map(|v| (*v, VoteTally::default()))
            .collect();
        for vote in &self.votes {
            let tally = breakdown.entry(vote.value).or_default();
            tally.count += 1;
            tally.weight += vote.weight;
        }

        let required_quorum_weight = policy.required_quorum_weight(total_weight);
        let quorum_met = voted_weight >= required_quorum_weight;

        let approve_weight = breakdown[&VoteValue::Approve].weight;
        let reject_weight = breakdown[&VoteValue::Reject].weight;
        let consensus_reached = Decimal::from(approve_weight)
            > Decimal::from(total_weight) * policy.majority_threshold;
        let tied = approve_weight == reject_weight && approve_weight > 0 && !consensus_reached;

        ConsensusReport {
            total_weight,
            voted_weight,
            required_quorum_weight,
            quorum_met,
            breakdown,
            consensus_reached,
            tied,
        }
    }
}

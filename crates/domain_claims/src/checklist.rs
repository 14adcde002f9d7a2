//! Field verification checklist
//!
//! Each claim owns one checklist during the verification stage. Items are
//! grouped by category; all required items must be checked before the
//! verification report can be submitted, and the checklist becomes
//! read-only once it has.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::ClaimId;

use crate::error::ClaimError;

/// Checklist item categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistCategory {
    Document,
    Field,
    Legal,
}

impl ChecklistCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChecklistCategory::Document => "document",
            ChecklistCategory::Field => "field",
            ChecklistCategory::Legal => "legal",
        }
    }
}

impl fmt::Display for ChecklistCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChecklistCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "document" => Ok(ChecklistCategory::Document),
            "field" => Ok(ChecklistCategory::Field),
            "legal" => Ok(ChecklistCategory::Legal),
            other => Err(format!("unknown checklist category: {other}")),
        }
    }
}

/// Verification officer's recommendation on submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// Approve for committee review
    Approve,
    /// Reject the application
    Reject,
    /// Request additional information
    Clarification,
    /// Schedule another field visit
    FieldVisit,
}

/// A single checklist entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub label: String,
    pub category: ChecklistCategory,
    pub required: bool,
    pub checked: bool,
    pub comments: String,
}

impl ChecklistItem {
    fn new(
        id: &str,
        label: &str,
        category: ChecklistCategory,
        required: bool,
    ) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            category,
            required,
            checked: false,
            comments: String::new(),
        }
    }
}

/// Completion statistics for a checklist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistStats {
    pub total_items: usize,
    pub completed_items: usize,
    pub required_items: usize,
    pub completed_required: usize,
}

impl ChecklistStats {
    /// The submission gate: every required item is checked
    pub fn gate_passed(&self) -> bool {
        self.completed_required == self.required_items
    }
}

/// Immutable record of a submitted verification, used as the payload for
/// the `under_verification -> verified` transition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistSnapshot {
    pub claim_id: ClaimId,
    pub stats: ChecklistStats,
    pub recommendation: Recommendation,
    pub overall_comments: String,
    pub submitted_at: DateTime<Utc>,
}

/// The verification checklist owned 1:1 by a claim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationChecklist {
    claim_id: ClaimId,
    items: Vec<ChecklistItem>,
    overall_comments: String,
    recommendation: Option<Recommendation>,
    submitted: bool,
    submitted_at: Option<DateTime<Utc>>,
}

impl VerificationChecklist {
    /// Creates the standard FRA verification checklist for a claim
    pub fn standard_for(claim_id: ClaimId) -> Self {
        use ChecklistCategory::*;
        let items = vec![
            ChecklistItem::new("aadhaar_card", "Aadhaar Card Verification", Document, true),
            ChecklistItem::new("bank_passbook", "Bank Account Details", Document, true),
            ChecklistItem::new("land_records", "Land Records Verification", Document, true),
            ChecklistItem::new("photographic_evidence", "Photographic Evidence", Document, false),
            ChecklistItem::new("witness_statements", "Witness Statements", Document, false),
            ChecklistItem::new("boundary_marking", "Boundary Marking", Field, true),
            ChecklistItem::new("land_use_pattern", "Land Use Pattern", Field, true),
            ChecklistItem::new("forest_cover_assessment", "Forest Cover Assessment", Field, true),
            ChecklistItem::new("accessibility_check", "Accessibility Check", Field, false),
            ChecklistItem::new("neighbor_verification", "Neighbor Verification", Field, false),
            ChecklistItem::new("forest_rights_eligibility", "Forest Rights Eligibility", Legal, true),
            ChecklistItem::new("environmental_clearance", "Environmental Clearance", Legal, true),
            ChecklistItem::new("tribal_status_verification", "Tribal Status Verification", Legal, true),
            ChecklistItem::new("land_ceiling_compliance", "Land Ceiling Compliance", Legal, false),
            ChecklistItem::new("conflict_resolution", "Conflict Resolution", Legal, false),
        ];
        Self {
            claim_id,
            items,
            overall_comments: String::new(),
            recommendation: None,
            submitted: false,
            submitted_at: None,
        }
    }

    pub fn claim_id(&self) -> ClaimId {
        self.claim_id
    }

    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn recommendation(&self) -> Option<Recommendation> {
        self.recommendation
    }

    pub fn overall_comments(&self) -> &str {
        &self.overall_comments
    }

    fn item_mut(
        &mut self,
        category: ChecklistCategory,
        item_id: &str,
    ) -> Result<&mut ChecklistItem, ClaimError> {
        self.items
            .iter_mut()
            .find(|i| i.category == category && i.id == item_id)
            .ok_or_else(|| ClaimError::UnknownChecklistItem {
                category: category.to_string(),
                item: item_id.to_string(),
            })
    }

    /// Sets one item's checked flag
    pub fn toggle_item(
        &mut self,
        category: ChecklistCategory,
        item_id: &str,
        checked: bool,
    ) -> Result<(), ClaimError> {
        if self.submitted {
            return Err(ClaimError::ChecklistReadOnly);
        }
        self.item_mut(category, item_id)?.checked = checked;
        Ok(())
    }

    /// Replaces one item's comments
    pub fn set_comment(
        &mut self,
        category: ChecklistCategory,
        item_id: &str,
        comments: impl Into<String>,
    ) -> Result<(), ClaimError> {
        if self.submitted {
            return Err(ClaimError::ChecklistReadOnly);
        }
        self.item_mut(category, item_id)?.comments = comments.into();
        Ok(())
    }

    /// Computes completion statistics
    pub fn stats(&self) -> ChecklistStats {
        let mut stats = ChecklistStats {
            total_items: 0,
            completed_items: 0,
            required_items: 0,
            completed_required: 0,
        };
        for item in &self.items {
            stats.total_items += 1;
            if item.checked {
                stats.completed_items += 1;
            }
            if item.required {
                stats.required_items += 1;
                if item.checked {
                    stats.completed_required += 1;
                }
            }
        }
        stats
    }

    /// Submits the verification report, freezing the checklist
    ///
    /// # Errors
    ///
    /// `IncompleteRequired` when a required item is unchecked,
    /// `MissingRecommendation` when no recommendation is set,
    /// `ChecklistReadOnly` when already submitted.
    pub fn submit(
        &mut self,
        overall_comments: impl Into<String>,
        recommendation: Option<Recommendation>,
    ) -> Result<ChecklistSnapshot, ClaimError> {
        if self.submitted {
            return Err(ClaimError::ChecklistReadOnly);
        }
        let stats = self.stats();
        if !stats.gate_passed() {
            return Err(ClaimError::IncompleteRequired {
                completed: stats.completed_required,
                required: stats.required_items,
            });
        }
        let recommendation = recommendation.ok_or(ClaimError::MissingRecommendation)?;

        let now = Utc::now();
        self.overall_comments = overall_comments.into();
        self.recommendation = Some(recommendation);
        self.submitted = true;
        self.submitted_at = Some(now);

        Ok(ChecklistSnapshot {
            claim_id: self.claim_id,
            stats,
            recommendation,
            overall_comments: self.overall_comments.clone(),
            submitted_at: now,
        })
    }

    /// Checks every required item; test and triage helper
    pub fn check_all_required(&mut self) {
        if self.submitted {
            return;
        }
        for item in &mut self.items {
            if item.required {
                item.checked = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checklist() -> VerificationChecklist {
        VerificationChecklist::standard_for(ClaimId::new())
    }

    #[test]
    fn test_standard_checklist_shape() {
        let list = checklist();
        let stats = list.stats();
        assert_eq!(stats.total_items, 15);
        assert_eq!(stats.required_items, 9);
        assert_eq!(stats.completed_items, 0);
        assert!(!stats.gate_passed());
    }

    #[test]
    fn test_toggle_and_stats() {
        let mut list = checklist();
        list.toggle_item(ChecklistCategory::Document, "aadhaar_card", true)
            .unwrap();
        let stats = list.stats();
        assert_eq!(stats.completed_items, 1);
        assert_eq!(stats.completed_required, 1);
    }

    #[test]
    fn test_unknown_item() {
        let mut list = checklist();
        let err = list
            .toggle_item(ChecklistCategory::Legal, "aadhaar_card", true)
            .unwrap_err();
        assert!(matches!(err, ClaimError::UnknownChecklistItem { .. }));
    }

    #[test]
    fn test_submit_requires_all_required_items() {
        let mut list = checklist();
        list.check_all_required();
        // Uncheck one required item
        list.toggle_item(ChecklistCategory::Field, "forest_cover_assessment", false)
            .unwrap();
        let err = list
            .submit("Summary", Some(Recommendation::Approve))
            .unwrap_err();
        assert!(matches!(
            err,
            ClaimError::IncompleteRequired {
                completed: 8,
                required: 9
            }
        ));
    }

    #[test]
    fn test_submit_requires_recommendation() {
        let mut list = checklist();
        list.check_all_required();
        let err = list.submit("Summary", None).unwrap_err();
        assert!(matches!(err, ClaimError::MissingRecommendation));
    }

    #[test]
    fn test_submit_freezes_checklist() {
        let mut list = checklist();
        list.check_all_required();
        let snapshot = list
            .submit("All verified on site", Some(Recommendation::Approve))
            .unwrap();
        assert!(snapshot.stats.gate_passed());
        assert!(list.is_submitted());

        let err = list
            .toggle_item(ChecklistCategory::Document, "aadhaar_card", false)
            .unwrap_err();
        assert!(matches!(err, ClaimError::ChecklistReadOnly));

        let err = list.submit("Again", Some(Recommendation::Reject)).unwrap_err();
        assert!(matches!(err, ClaimError::ChecklistReadOnly));
    }

    #[test]
    fn test_comments_are_persisted_per_item() {
        let mut list = checklist();
        list.set_comment(
            ChecklistCategory::Document,
            "land_records",
            "Requires additional verification",
        )
        .unwrap();
        let item = list
            .items()
            .iter()
            .find(|i| i.id == "land_records")
            .unwrap();
        assert_eq!(item.comments, "Requires additional verification");
    }
}

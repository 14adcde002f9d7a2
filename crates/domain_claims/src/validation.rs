//! Stage validation rules
//!
//! Pure, stateless validators for each intake stage. Errors block the
//! corresponding transition; warnings are advisory and returned to the
//! caller but never block.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use core_kernel::geo::{BoundingBox, Coordinate};

use crate::claim::{ClaimType, DocumentRef, LandType, Priority};

/// Intake stages of the submission wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Documents,
    Metadata,
    Location,
    Review,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Documents => "documents",
            Stage::Metadata => "metadata",
            Stage::Location => "location",
            Stage::Review => "review",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "documents" => Ok(Stage::Documents),
            "metadata" => Ok(Stage::Metadata),
            "location" => Ok(Stage::Location),
            "review" => Ok(Stage::Review),
            other => Err(format!("unknown stage: {other}")),
        }
    }
}

/// A non-blocking validation warning with a suggested fix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub message: String,
    pub suggestion: String,
}

/// Result of validating one stage: field-keyed errors plus warnings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StageValidation {
    pub errors: BTreeMap<String, String>,
    pub warnings: Vec<ValidationWarning>,
}

impl StageValidation {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    pub fn add_warning(&mut self, message: impl Into<String>, suggestion: impl Into<String>) {
        self.warnings.push(ValidationWarning {
            message: message.into(),
            suggestion: suggestion.into(),
        });
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Merges another validation result into this one
    pub fn merge(&mut self, other: StageValidation) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

/// The intake form for a claim before it becomes an aggregate
///
/// All fields are optional so partially-completed drafts can be validated
/// stage by stage; [`crate::claim::ClaimBuilder`] requires the fields the
/// metadata stage marks as errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClaimDraft {
    pub applicant_name: Option<String>,
    pub guardian_name: Option<String>,
    pub mobile_number: Option<String>,
    pub email: Option<String>,
    pub village: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub claim_type: Option<ClaimType>,
    pub land_type: Option<LandType>,
    pub total_area: Option<Decimal>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub truth_declaration: bool,
    pub false_information_declaration: bool,
    pub data_consent: bool,
    pub documents: Vec<DocumentRef>,
    pub center: Option<Coordinate>,
    pub boundary: Vec<Coordinate>,
}

/// Validates one stage of a draft against the configured national bounds
pub fn validate_stage(draft: &ClaimDraft, stage: Stage, bounds: &BoundingBox) -> StageValidation {
    match stage {
        Stage::Documents => validate_documents(draft),
        Stage::Metadata => validate_metadata(draft),
        Stage::Location => validate_location(draft, bounds),
        Stage::Review => validate_review(draft),
    }
}

/// Runs every stage and merges the results; used as the submission gate
pub fn validate_all(draft: &ClaimDraft, bounds: &BoundingBox) -> StageValidation {
    let mut result = validate_documents(draft);
    result.merge(validate_metadata(draft));
    result.merge(validate_location(draft, bounds));
    result.merge(validate_review(draft));
    result
}

fn validate_documents(draft: &ClaimDraft) -> StageValidation {
    let mut result = StageValidation::ok();
    if draft.documents.is_empty() {
        result.add_error("documents", "At least one document must be uploaded");
    }
    result
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

fn validate_metadata(draft: &ClaimDraft) -> StageValidation {
    let mut result = StageValidation::ok();

    if is_blank(&draft.applicant_name) {
        result.add_error("applicantName", "Applicant name is required");
    }
    if is_blank(&draft.guardian_name) {
        result.add_error("guardianName", "Father's/Husband's name is required");
    }
    match draft.mobile_number.as_deref().map(str::trim) {
        None | Some("") => result.add_error("mobileNumber", "Mobile number is required"),
        Some(mobile) => {
            if mobile.len() != 10 || !mobile.chars().all(|c| c.is_ascii_digit()) {
                result.add_error("mobileNumber", "Mobile number must be 10 digits");
            }
        }
    }
    if is_blank(&draft.village) {
        result.add_error("village", "Village name is required");
    }
    if is_blank(&draft.district) {
        result.add_error("district", "District name is required");
    }
    if is_blank(&draft.state) {
        result.add_error("state", "State selection is required");
    }
    if draft.claim_type.is_none() {
        result.add_error("claimType", "Claim type selection is required");
    }
    if draft.land_type.is_none() {
        result.add_error("landType", "Land type selection is required");
    }
    match draft.total_area {
        Some(area) if area > Decimal::ZERO => {}
        _ => result.add_error("totalArea", "Valid total area is required"),
    }
    if !draft.truth_declaration {
        result.add_error("declaration1", "Truth declaration must be accepted");
    }
    if !draft.false_information_declaration {
        result.add_error("declaration2", "False information warning must be accepted");
    }
    if !draft.data_consent {
        result.add_error("dataConsent", "Data processing consent is required");
    }

    if is_blank(&draft.email) {
        result.add_warning(
            "Email address not provided",
            "Adding email will help with claim status updates",
        );
    }
    if is_blank(&draft.description) {
        result.add_warning(
            "Claim description is empty",
            "Detailed description helps in faster processing",
        );
    }

    result
}

fn validate_location(draft: &ClaimDraft, bounds: &BoundingBox) -> StageValidation {
    let mut result = StageValidation::ok();

    match &draft.center {
        None => result.add_error("coordinates", "Location coordinates are required"),
        Some(center) => {
            if !bounds.contains_latitude(center.latitude) {
                result.add_error(
                    "centerLat",
                    format!(
                        "Latitude must be between {}\u{b0} and {}\u{b0} N",
                        bounds.min_latitude, bounds.max_latitude
                    ),
                );
            }
            if !bounds.contains_longitude(center.longitude) {
                result.add_error(
                    "centerLng",
                    format!(
                        "Longitude must be between {}\u{b0} and {}\u{b0} E",
                        bounds.min_longitude, bounds.max_longitude
                    ),
                );
            }
        }
    }

    if draft.boundary.is_empty() {
        result.add_warning(
            "No boundary points defined",
            "Adding boundary points improves claim accuracy",
        );
    }

    result
}

/// Final gate before requesting the verification/committee transitions:
/// re-validates documents, required metadata, and location presence.
fn validate_review(draft: &ClaimDraft) -> StageValidation {
    let mut result = StageValidation::ok();

    if draft.documents.is_empty() {
        result.add_error("documents", "Documents are required for submission");
    }
    if is_blank(&draft.applicant_name) || draft.claim_type.is_none() {
        result.add_error("form", "Required form fields are missing");
    }
    if draft.center.is_none() {
        result.add_error("location", "Location coordinates are required");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::DocumentType;
    use core_kernel::geo::INDIA_BOUNDS;
    use rust_decimal_macros::dec;

    fn valid_draft() -> ClaimDraft {
        ClaimDraft {
            applicant_name: Some("Ramesh Kumar Patel".to_string()),
            guardian_name: Some("Mohan Lal Patel".to_string()),
            mobile_number: Some("9876543210".to_string()),
            email: Some("ramesh@example.in".to_string()),
            village: Some("Khandwa".to_string()),
            district: Some("Khandwa".to_string()),
            state: Some("Madhya Pradesh".to_string()),
            claim_type: Some(ClaimType::Individual),
            land_type: Some(LandType::Agricultural),
            total_area: Some(dec!(2.5)),
            description: Some("Ancestral cultivation".to_string()),
            priority: None,
            truth_declaration: true,
            false_information_declaration: true,
            data_consent: true,
            documents: vec![DocumentRef::new(
                DocumentType::IdentityProof,
                "aadhaar.pdf",
                120_000,
            )],
            center: Some(Coordinate::new(23.2599, 77.4126).unwrap()),
            boundary: vec![],
        }
    }

    #[test]
    fn test_valid_draft_passes_all_stages() {
        let draft = valid_draft();
        for stage in [Stage::Documents, Stage::Metadata, Stage::Location, Stage::Review] {
            let result = validate_stage(&draft, stage, &INDIA_BOUNDS);
            assert!(result.is_valid(), "{stage} errors: {:?}", result.errors);
        }
    }

    #[test]
    fn test_missing_documents_blocks() {
        let mut draft = valid_draft();
        draft.documents.clear();
        let result = validate_stage(&draft, Stage::Documents, &INDIA_BOUNDS);
        assert!(!result.is_valid());
        assert!(result.errors.contains_key("documents"));
    }

    #[test]
    fn test_short_mobile_number_rejected() {
        let mut draft = valid_draft();
        draft.mobile_number = Some("98765432".to_string());
        let result = validate_stage(&draft, Stage::Metadata, &INDIA_BOUNDS);
        assert_eq!(
            result.errors.get("mobileNumber").map(String::as_str),
            Some("Mobile number must be 10 digits")
        );
    }

    #[test]
    fn test_non_numeric_mobile_number_rejected() {
        let mut draft = valid_draft();
        draft.mobile_number = Some("98765abc10".to_string());
        let result = validate_stage(&draft, Stage::Metadata, &INDIA_BOUNDS);
        assert!(result.errors.contains_key("mobileNumber"));
    }

    #[test]
    fn test_missing_email_is_warning_not_error() {
        let mut draft = valid_draft();
        draft.email = None;
        let result = validate_stage(&draft, Stage::Metadata, &INDIA_BOUNDS);
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.message.contains("Email")));
    }

    #[test]
    fn test_declarations_must_all_be_accepted() {
        let mut draft = valid_draft();
        draft.data_consent = false;
        let result = validate_stage(&draft, Stage::Metadata, &INDIA_BOUNDS);
        assert!(result.errors.contains_key("dataConsent"));
    }

    #[test]
    fn test_zero_area_rejected() {
        let mut draft = valid_draft();
        draft.total_area = Some(Decimal::ZERO);
        let result = validate_stage(&draft, Stage::Metadata, &INDIA_BOUNDS);
        assert!(result.errors.contains_key("totalArea"));
    }

    #[test]
    fn test_out_of_bounds_latitude_yields_field_error() {
        let mut draft = valid_draft();
        draft.center = Some(Coordinate::new(3.0, 77.0).unwrap());
        let result = validate_stage(&draft, Stage::Location, &INDIA_BOUNDS);
        assert!(result.errors.contains_key("centerLat"));
        assert!(!result.errors.contains_key("centerLng"));
    }

    #[test]
    fn test_missing_boundary_is_warning_only() {
        let draft = valid_draft();
        let result = validate_stage(&draft, Stage::Location, &INDIA_BOUNDS);
        assert!(result.is_valid());
        assert!(result
            .warnings
            .iter()
            .any(|w| w.message.contains("boundary")));
    }

    #[test]
    fn test_validate_all_merges_stages() {
        let mut draft = valid_draft();
        draft.documents.clear();
        draft.mobile_number = None;
        let result = validate_all(&draft, &INDIA_BOUNDS);
        assert!(result.errors.contains_key("documents"));
        assert!(result.errors.contains_key("mobileNumber"));
    }
}

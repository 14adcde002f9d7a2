//! Randomized data generators
//!
//! Thin wrappers over `fake` for tests that want varied rather than
//! fixed inputs.

use fake::faker::address::en::CityName;
use fake::faker::name::en::Name;
use fake::Fake;

use domain_claims::ClaimDraft;

use crate::builders::ClaimDraftBuilder;

/// A random person name
pub fn random_name() -> String {
    Name().fake()
}

/// A random settlement name
pub fn random_village() -> String {
    CityName().fake()
}

/// A random 10-digit mobile number starting with 9
pub fn random_mobile() -> String {
    let tail: u64 = (0..1_000_000_000u64).fake();
    format!("9{:09}", tail)
}

/// A valid draft with randomized identity fields
pub fn random_draft() -> ClaimDraft {
    ClaimDraftBuilder::new()
        .with_applicant_name(random_name())
        .with_mobile_number(random_mobile())
        .with_village(random_village())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_mobile_is_ten_digits() {
        let mobile = random_mobile();
        assert_eq!(mobile.len(), 10);
        assert!(mobile.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_random_draft_is_valid() {
        use core_kernel::geo::INDIA_BOUNDS;
        use domain_claims::validation::validate_all;

        let draft = random_draft();
        let result = validate_all(&draft, &INDIA_BOUNDS);
        assert!(result.is_valid(), "errors: {:?}", result.errors);
    }
}

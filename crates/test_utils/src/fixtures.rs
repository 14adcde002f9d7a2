//! Common test fixtures
//!
//! Values mirror the seed data used across the test suites so assertions
//! read naturally.

use core_kernel::geo::Coordinate;
use core_kernel::MemberId;
use domain_claims::CommitteeMember;

/// Geographic fixtures
pub struct GeoFixtures;

impl GeoFixtures {
    /// Bhopal, Madhya Pradesh - inside the India bounds
    pub fn bhopal() -> Coordinate {
        Coordinate::new(23.2599, 77.4126).expect("valid coordinate")
    }

    /// Wayanad, Kerala - inside the India bounds
    pub fn wayanad() -> Coordinate {
        Coordinate::new(11.6854, 76.1320).expect("valid coordinate")
    }

    /// South of the India bounding box (latitude 3.0)
    pub fn south_of_india() -> Coordinate {
        Coordinate::new(3.0, 77.0).expect("valid coordinate")
    }

    /// West of the India bounding box (longitude 60.0)
    pub fn west_of_india() -> Coordinate {
        Coordinate::new(23.0, 60.0).expect("valid coordinate")
    }
}

/// String fixtures
pub struct StringFixtures;

impl StringFixtures {
    pub fn applicant_name() -> &'static str {
        "Ramesh Kumar Patel"
    }

    pub fn guardian_name() -> &'static str {
        "Mohan Lal Patel"
    }

    pub fn mobile_number() -> &'static str {
        "9876543210"
    }

    pub fn village() -> &'static str {
        "Khandwa"
    }

    pub fn district() -> &'static str {
        "Khandwa"
    }

    pub fn state() -> &'static str {
        "Madhya Pradesh"
    }

    pub fn officer() -> &'static str {
        "Rajesh Kumar"
    }
}

/// Committee fixtures
pub struct CommitteeFixtures;

impl CommitteeFixtures {
    /// The standard five-member roster: chair weight 2, others weight 1
    /// (total weight 6)
    pub fn standard_roster() -> Vec<CommitteeMember> {
        vec![
            CommitteeMember::chair(MemberId::new(), "Dr. Anita Sharma", 2),
            CommitteeMember::new(MemberId::new(), "Prof. Vikram Singh", 1),
            CommitteeMember::new(MemberId::new(), "Smt. Meera Patel", 1),
            CommitteeMember::new(MemberId::new(), "Shri Ramesh Gupta", 1),
            CommitteeMember::new(MemberId::new(), "Dr. Sunita Rao", 1),
        ]
    }
}

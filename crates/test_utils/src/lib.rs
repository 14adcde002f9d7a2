//! Test Utilities
//!
//! Shared builders, fixtures, and generators for the claims engine test
//! suites. Builders produce valid data by default so tests only override
//! the fields they care about.

pub mod builders;
pub mod fixtures;
pub mod generators;

pub use builders::{ClaimDraftBuilder, StagedClaimBuilder};
pub use fixtures::{CommitteeFixtures, GeoFixtures, StringFixtures};

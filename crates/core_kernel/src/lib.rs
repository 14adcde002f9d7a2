//! Core Kernel - foundational types for the claims engine
//!
//! Building blocks shared by every domain and infrastructure crate:
//! - Strongly-typed UUID identifiers
//! - Geographic value objects with bounding-box containment
//! - The `PortError` taxonomy shared by infrastructure adapters

pub mod geo;
pub mod identifiers;
pub mod ports;

pub use geo::{BoundingBox, Coordinate, GeoError};
pub use identifiers::{ClaimId, DecisionId, DocumentId, MemberId};
pub use ports::{DomainPort, PortError};

//! Ports for the claims domain
//!
//! The engine reads and writes claims through `ClaimStore` and hands
//! domain events to `EventSink`. Adapters live in `infra_store`; every
//! implementation reports failures as `PortError` so the service layer
//! can classify transient conditions uniformly.

use async_trait::async_trait;

use core_kernel::{ClaimId, DomainPort, PortError};

use crate::claim::Claim;
use crate::events::ClaimEvent;

/// Persistence port for claim aggregates
///
/// Updates use optimistic concurrency: the caller passes the version it
/// read, and the store must reject the write with `PortError::Conflict`
/// when the persisted version differs. This serializes mutations per
/// claim without a process-wide lock.
#[async_trait]
pub trait ClaimStore: DomainPort {
    /// Fetches a claim by ID
    async fn get(&self, id: ClaimId) -> Result<Claim, PortError>;

    /// Fetches a claim by its human-readable claim number
    async fn find_by_number(&self, claim_number: &str) -> Result<Option<Claim>, PortError>;

    /// Inserts a new claim; `Conflict` if the ID already exists
    async fn insert(&self, claim: &Claim) -> Result<(), PortError>;

    /// Replaces a claim if the persisted version matches `expected_version`
    async fn update(&self, claim: &Claim, expected_version: u32) -> Result<(), PortError>;

    /// Lists all claims (the query service filters and sorts in memory)
    async fn list(&self) -> Result<Vec<Claim>, PortError>;

    /// Cheap connectivity check for readiness probes
    async fn ping(&self) -> Result<(), PortError>;
}

/// Outbound port for domain events
///
/// Publishing happens after a successful persist; sinks must not block.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: &ClaimEvent);
}

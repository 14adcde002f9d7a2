//! In-memory claim store
//!
//! Used by tests and local runs. Shares the optimistic-version contract
//! with the PostgreSQL adapter so the service behaves identically against
//! either.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use core_kernel::{ClaimId, DomainPort, PortError};
use domain_claims::{Claim, ClaimStore};

/// Claim store held entirely in process memory
#[derive(Debug, Default)]
pub struct MemoryClaimStore {
    claims: RwLock<HashMap<ClaimId, Claim>>,
}

impl MemoryClaimStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored claims
    pub async fn len(&self) -> usize {
        self.claims.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.claims.read().await.is_empty()
    }
}

impl DomainPort for MemoryClaimStore {}

#[async_trait]
impl ClaimStore for MemoryClaimStore {
    async fn get(&self, id: ClaimId) -> Result<Claim, PortError> {
        self.claims
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Claim", id))
    }

    async fn find_by_number(&self, claim_number: &str) -> Result<Option<Claim>, PortError> {
        Ok(self
            .claims
            .read()
            .await
            .values()
            .find(|c| c.claim_number() == claim_number)
            .cloned())
    }

    async fn insert(&self, claim: &Claim) -> Result<(), PortError> {
        let mut claims = self.claims.write().await;
        if claims.contains_key(&claim.id()) {
            return Err(PortError::conflict(format!(
                "claim {} already exists",
                claim.id()
            )));
        }
        claims.insert(claim.id(), claim.clone());
        Ok(())
    }

    async fn update(&self, claim: &Claim, expected_version: u32) -> Result<(), PortError> {
        let mut claims = self.claims.write().await;
        let stored = claims
            .get(&claim.id())
            .ok_or_else(|| PortError::not_found("Claim", claim.id()))?;
        if stored.version() != expected_version {
            return Err(PortError::conflict(format!(
                "stored version {} does not match expected {}",
                stored.version(),
                expected_version
            )));
        }
        claims.insert(claim.id(), claim.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Claim>, PortError> {
        Ok(self.claims.read().await.values().cloned().collect())
    }

    async fn ping(&self) -> Result<(), PortError> {
        Ok(())
    }
}

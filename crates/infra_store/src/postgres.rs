//! PostgreSQL claim store
//!
//! Claims persist as JSONB documents alongside a version column:
//!
//! ```sql
//! CREATE TABLE fra_claims (
//!     claim_id     UUID PRIMARY KEY,
//!     claim_number TEXT NOT NULL UNIQUE,
//!     status       TEXT NOT NULL,
//!     version      BIGINT NOT NULL,
//!     document     JSONB NOT NULL,
//!     updated_at   TIMESTAMPTZ NOT NULL
//! );
//! ```
//!
//! Updates are compare-and-swap on the version column, which serializes
//! concurrent writers on the same claim without any process-level lock.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use core_kernel::{ClaimId, DomainPort, PortError};
use domain_claims::{Claim, ClaimStore};

use crate::error::StoreError;

/// Claim store backed by PostgreSQL
#[derive(Debug, Clone)]
pub struct PostgresClaimStore {
    pool: PgPool,
}

impl PostgresClaimStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn encode(claim: &Claim) -> Result<serde_json::Value, PortError> {
        serde_json::to_value(claim)
            .map_err(|e| StoreError::Serialization(e.to_string()).into())
    }

    fn decode(document: serde_json::Value) -> Result<Claim, PortError> {
        serde_json::from_value(document)
            .map_err(|e| StoreError::Serialization(e.to_string()).into())
    }
}

impl DomainPort for PostgresClaimStore {}

#[async_trait]
impl ClaimStore for PostgresClaimStore {
    async fn get(&self, id: ClaimId) -> Result<Claim, PortError> {
        let row = sqlx::query("SELECT document FROM fra_claims WHERE claim_id = $1")
            .bind(Uuid::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from)?
            .ok_or_else(|| PortError::not_found("Claim", id))?;

        let document: serde_json::Value =
            row.try_get("document").map_err(StoreError::from)?;
        Self::decode(document)
    }

    async fn find_by_number(&self, claim_number: &str) -> Result<Option<Claim>, PortError> {
        let row = sqlx::query("SELECT document FROM fra_claims WHERE claim_number = $1")
            .bind(claim_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from)?;

        match row {
            Some(row) => {
                let document: serde_json::Value =
                    row.try_get("document").map_err(StoreError::from)?;
                Ok(Some(Self::decode(document)?))
            }
            None => Ok(None),
        }
    }

    async fn insert(&self, claim: &Claim) -> Result<(), PortError> {
        let document = Self::encode(claim)?;
        sqlx::query(
            r#"
            INSERT INTO fra_claims (claim_id, claim_number, status, version, document, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::from(claim.id()))
        .bind(claim.claim_number())
        .bind(claim.status().as_str())
        .bind(i64::from(claim.version()))
        .bind(document)
        .bind(claim.updated_at())
        .execute(&self.pool)
        .await
        .map_err(StoreError::from)?;

        tracing::debug!(claim_id = %claim.id(), "claim inserted");
        Ok(())
    }

    async fn update(&self, claim: &Claim, expected_version: u32) -> Result<(), PortError> {
        let document = Self::encode(claim)?;
        let result = sqlx::query(
            r#"
            UPDATE fra_claims
            SET claim_number = $2, status = $3, version = $4, document = $5, updated_at = $6
            WHERE claim_id = $1 AND version = $7
            "#,
        )
        .bind(Uuid::from(claim.id()))
        .bind(claim.claim_number())
        .bind(claim.status().as_str())
        .bind(i64::from(claim.version()))
        .bind(document)
        .bind(claim.updated_at())
        .bind(i64::from(expected_version))
        .execute(&self.pool)
        .await
        .map_err(StoreError::from)?;

        if result.rows_affected() == 0 {
            // Distinguish a missing row from a version mismatch
            let stored: Option<i64> =
                sqlx::query("SELECT version FROM fra_claims WHERE claim_id = $1")
                    .bind(Uuid::from(claim.id()))
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(StoreError::from)?
                    .map(|row| row.try_get("version"))
                    .transpose()
                    .map_err(StoreError::from)?;

            return match stored {
                Some(version) => Err(StoreError::VersionConflict(format!(
                    "stored version {} does not match expected {}",
                    version, expected_version
                ))
                .into()),
                None => Err(PortError::not_found("Claim", claim.id())),
            };
        }

        tracing::debug!(claim_id = %claim.id(), version = claim.version(), "claim updated");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Claim>, PortError> {
        let rows = sqlx::query("SELECT document FROM fra_claims ORDER BY updated_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::from)?;

        rows.into_iter()
            .map(|row| {
                let document: serde_json::Value =
                    row.try_get("document").map_err(StoreError::from)?;
                Self::decode(document)
            })
            .collect()
    }

    async fn ping(&self) -> Result<(), PortError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(StoreError::from)?;
        Ok(())
    }
}

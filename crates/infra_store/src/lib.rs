//! Claim store infrastructure
//!
//! Adapters implementing the `ClaimStore` port from `domain_claims`:
//!
//! - [`PostgresClaimStore`] persists claim aggregates as JSONB documents
//!   with a version column enforcing optimistic concurrency
//! - [`MemoryClaimStore`] keeps claims in process memory with identical
//!   version semantics, for tests and local runs

pub mod error;
pub mod pool;
pub mod memory;
pub mod postgres;

pub use error::StoreError;
pub use pool::{create_pool_from_url, DatabaseConfig, DatabasePool};
pub use memory::MemoryClaimStore;
pub use postgres::PostgresClaimStore;

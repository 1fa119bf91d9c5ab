//! Storage of calculated liquidations.
//!
//! [`LiquidationRepository`] is the seam to whatever database keeps results.
//! Writes are idempotent upserts keyed by company, employee and period, so
//! submitting the same liquidation twice never creates a second record.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::LiquidationResult;

/// Identifies one stored liquidation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LiquidationKey {
    /// The employing company.
    pub company_id: String,
    /// The liquidated employee.
    pub employee_id: String,
    /// Period year.
    pub year: i32,
    /// Period month (1-12).
    pub month: u32,
}

impl LiquidationKey {
    /// Builds the key for a result calculated for a company.
    pub fn for_result(company_id: impl Into<String>, result: &LiquidationResult) -> Self {
        Self {
            company_id: company_id.into(),
            employee_id: result.employee_id.clone(),
            year: result.period.year,
            month: result.period.month,
        }
    }
}

impl fmt::Display for LiquidationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{:04}-{:02}",
            self.company_id, self.employee_id, self.year, self.month
        )
    }
}

/// A liquidation as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredLiquidation {
    /// Record identifier, stable across upserts of the same key.
    pub id: Uuid,
    /// The stored result.
    pub result: LiquidationResult,
}

/// Persists liquidation results.
#[async_trait]
pub trait LiquidationRepository: Send + Sync {
    /// Inserts or replaces the liquidation for `key`.
    ///
    /// Returns the record identifier. A key that is already stored keeps its
    /// identifier.
    async fn upsert(&self, key: &LiquidationKey, result: &LiquidationResult) -> EngineResult<Uuid>;

    /// Returns the stored liquidation for `key`, if any.
    async fn get(&self, key: &LiquidationKey) -> EngineResult<Option<StoredLiquidation>>;
}

/// A [`LiquidationRepository`] held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryLiquidationRepository {
    records: RwLock<HashMap<LiquidationKey, StoredLiquidation>>,
}

impl InMemoryLiquidationRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored liquidations.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl LiquidationRepository for InMemoryLiquidationRepository {
    async fn upsert(&self, key: &LiquidationKey, result: &LiquidationResult) -> EngineResult<Uuid> {
        let mut records = self.records.write().await;
        match records.get_mut(key) {
            Some(stored) => {
                stored.result = result.clone();
                debug!(key = %key, id = %stored.id, "Replaced stored liquidation");
                Ok(stored.id)
            }
            None => {
                let id = Uuid::new_v4();
                records.insert(
                    key.clone(),
                    StoredLiquidation {
                        id,
                        result: result.clone(),
                    },
                );
                info!(key = %key, id = %id, "Stored new liquidation");
                Ok(id)
            }
        }
    }

    async fn get(&self, key: &LiquidationKey) -> EngineResult<Option<StoredLiquidation>> {
        Ok(self.records.read().await.get(key).cloned())
    }
}

//! The liquidation service wiring the calculator to its collaborators.
//!
//! [`LiquidationService`] resolves a company's configuration from the settings
//! store, applies live economic indicators, runs the calculator and optionally
//! persists the result. It is cheap to clone and safe to share between tasks.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{LiquidationRequest, liquidate};
use crate::config::{ConfigurationMerger, EffectiveConfiguration, SettingsStore};
use crate::error::{EngineError, ValidationErrors};
use crate::indicators::IndicatorProvider;
use crate::models::LiquidationResult;
use crate::persistence::{LiquidationKey, LiquidationRepository};

/// Why a liquidation could not be stored.
#[derive(Debug, Error)]
pub enum LiquidateAndStoreError {
    /// The request was malformed; nothing was calculated.
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    /// The result was calculated but could not be stored.
    #[error(transparent)]
    Storage(#[from] EngineError),
}

/// Shared entry point for liquidations on behalf of a company.
#[derive(Clone)]
pub struct LiquidationService {
    settings: Arc<dyn SettingsStore>,
    indicators: Arc<dyn IndicatorProvider>,
    repository: Arc<dyn LiquidationRepository>,
}

impl LiquidationService {
    /// Creates a service over the given collaborators.
    pub fn new(
        settings: Arc<dyn SettingsStore>,
        indicators: Arc<dyn IndicatorProvider>,
        repository: Arc<dyn LiquidationRepository>,
    ) -> Self {
        Self {
            settings,
            indicators,
            repository,
        }
    }

    /// Resolves the configuration a company's liquidations run against.
    ///
    /// A failing settings store does not block calculation; the legal defaults
    /// are used and the failure is logged.
    pub async fn effective_configuration(&self, company_id: &str) -> EffectiveConfiguration {
        let company_override = match self.settings.get(company_id).await {
            Ok(company_override) => company_override,
            Err(err) => {
                warn!(company_id = %company_id, error = %err, "Settings unavailable, using legal defaults");
                None
            }
        };

        let indicators = self.indicators.get_indicators().await;
        ConfigurationMerger::merge(company_override.as_ref()).with_indicators(indicators)
    }

    /// Validates and calculates a liquidation for a company's employee.
    pub async fn liquidate(
        &self,
        company_id: &str,
        request: &LiquidationRequest,
    ) -> Result<LiquidationResult, ValidationErrors> {
        let config = self.effective_configuration(company_id).await;
        liquidate(request, &config)
    }

    /// Calculates a liquidation and upserts it into the repository.
    ///
    /// Returns the stored record identifier with the result. Storing the same
    /// company, employee and period again returns the same identifier.
    pub async fn liquidate_and_store(
        &self,
        company_id: &str,
        request: &LiquidationRequest,
    ) -> Result<(Uuid, LiquidationResult), LiquidateAndStoreError> {
        let result = self.liquidate(company_id, request).await?;
        let key = LiquidationKey::for_result(company_id, &result);
        let id = self.repository.upsert(&key, &result).await?;
        info!(key = %key, id = %id, net = result.net_pay, "Liquidation stored");
        Ok((id, result))
    }
}

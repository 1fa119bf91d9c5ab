//! Economic indicators (minimum wage, UF, UTM).
//!
//! Indicator values change monthly or daily and come from an external
//! authority. This module defines the value type, the [`IndicatorSource`]
//! seam for fetching them, and [`CachedIndicatorProvider`], which caches
//! values for a bounded time and falls back instead of failing.

mod provider;
mod source;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use provider::{
    CachedIndicatorProvider, DEFAULT_FETCH_TIMEOUT, DEFAULT_INDICATOR_TTL, IndicatorProvider,
};
pub use source::{FileIndicatorSource, IndicatorSource, StaticIndicatorSource};

/// Indicator values in force on a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EconomicIndicators {
    /// Monthly minimum wage, in pesos.
    pub minimum_wage: i64,
    /// Value of one Unidad de Fomento, in pesos.
    pub uf_value: Decimal,
    /// Value of one Unidad Tributaria Mensual, in pesos.
    pub utm_value: Decimal,
    /// Date the values apply to.
    pub as_of: NaiveDate,
}

impl EconomicIndicators {
    /// Hardcoded values used when no source has ever answered.
    ///
    /// # Example
    ///
    /// ```
    /// use liquidation_engine::indicators::EconomicIndicators;
    ///
    /// let fallback = EconomicIndicators::fallback();
    /// assert_eq!(fallback.minimum_wage, 529_000);
    /// ```
    pub fn fallback() -> Self {
        Self {
            minimum_wage: 529_000,
            uf_value: Decimal::new(3_948_565, 2),
            utm_value: Decimal::from(69_265),
            as_of: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap_or(NaiveDate::MIN),
        }
    }
}

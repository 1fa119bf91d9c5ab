//! Sources of economic indicator values.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{EngineError, EngineResult};

use super::EconomicIndicators;

/// Fetches indicator values from an authority.
///
/// Implementations may be slow or fail; [`CachedIndicatorProvider`](super::CachedIndicatorProvider)
/// bounds the wait and absorbs failures.
#[async_trait]
pub trait IndicatorSource: Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &str;

    /// Fetches the current indicator values.
    async fn fetch(&self) -> EngineResult<EconomicIndicators>;
}

/// A source that always returns the same values.
#[derive(Debug, Clone)]
pub struct StaticIndicatorSource {
    indicators: EconomicIndicators,
}

impl StaticIndicatorSource {
    /// Creates a source returning `indicators`.
    pub fn new(indicators: EconomicIndicators) -> Self {
        Self { indicators }
    }
}

#[async_trait]
impl IndicatorSource for StaticIndicatorSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self) -> EngineResult<EconomicIndicators> {
        Ok(self.indicators.clone())
    }
}

/// Reads indicator values from a YAML or JSON file.
///
/// The file is re-read on every fetch so an external job can replace it.
///
/// ```yaml
/// minimum_wage: 529000
/// uf_value: "39485.65"
/// utm_value: "69265"
/// as_of: 2025-09-01
/// ```
#[derive(Debug, Clone)]
pub struct FileIndicatorSource {
    path: PathBuf,
}

impl FileIndicatorSource {
    /// Creates a source reading from `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl IndicatorSource for FileIndicatorSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch(&self) -> EngineResult<EconomicIndicators> {
        let path_str = self.path.display().to_string();

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|_| EngineError::ConfigNotFound {
                path: path_str.clone(),
            })?;

        // JSON is valid YAML, so one parser covers both formats
        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }
}

use super::evaluator::EvaluatorKind;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// 構築時の設定エラー (探索中には発生しない)
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("unsupported search method {0:?} (expected \"minimax\" or \"alphabeta\")")]
    UnsupportedMethod(String),
    #[error("search depth must be positive, got {0}")]
    NonPositiveDepth(u32),
    #[error("timeout threshold must be a non-negative number of milliseconds, got {0}")]
    InvalidThreshold(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum SearchMethod {
    #[default]
    Minimax,
    AlphaBeta,
}

impl FromStr for SearchMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minimax" => Ok(SearchMethod::Minimax),
            "alphabeta" => Ok(SearchMethod::AlphaBeta),
            other => Err(ConfigError::UnsupportedMethod(other.to_string())),
        }
    }
}

impl TryFrom<String> for SearchMethod {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SearchMethod::Minimax => write!(f, "minimax"),
            SearchMethod::AlphaBeta => write!(f, "alphabeta"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Fixed ply count, only used when `iterative` is off
    pub search_depth: u32,
    pub evaluator: EvaluatorKind,
    pub iterative: bool,
    pub method: SearchMethod,
    /// Abort margin compared against the remaining time
    pub timeout_threshold_ms: f64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig {
            search_depth: 3,
            evaluator: EvaluatorKind::MobilityRatio,
            iterative: true,
            method: SearchMethod::Minimax,
            timeout_threshold_ms: 10.0,
        }
    }
}

impl AgentConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_depth == 0 {
            return Err(ConfigError::NonPositiveDepth(self.search_depth));
        }
        if !self.timeout_threshold_ms.is_finite() || self.timeout_threshold_ms < 0.0 {
            return Err(ConfigError::InvalidThreshold(self.timeout_threshold_ms));
        }
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: AgentConfig = serde_json::from_str(&config_str)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("using default agent config: {:#}", e);
            Self::default()
        })
    }
}

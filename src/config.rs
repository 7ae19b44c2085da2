use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::embedding::Provider;
use crate::error::ConfigError;

/// Tolerance for the weight-sum check.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path of the JSON document store file
    pub store_path: PathBuf,
    /// Server bind address
    pub bind_addr: String,
    /// Hybrid scoring configuration
    pub search: SearchConfig,
    /// Embedding provider configuration
    pub embedding: EmbeddingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Weight of the lexical (TF-IDF) score in the blend
    pub tfidf_weight: f64,
    /// Weight of the semantic (embedding) score in the blend
    pub embedding_weight: f64,
    /// Number of results returned when the request does not specify top_k
    pub default_top_k: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// "ollama" or "openai"
    pub provider: String,
    /// Base URL for the provider API
    pub base_url: String,
    /// Model name for embeddings
    pub model: String,
    /// API key (only needed for cloud providers)
    pub api_key: Option<String>,
    /// Expected embedding vector dimension
    pub dimension: usize,
    /// Request timeout for provider calls, in seconds
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("./data/faqs.json"),
            bind_addr: "127.0.0.1:9010".to_string(),
            search: SearchConfig::default(),
            embedding: EmbeddingConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            tfidf_weight: 0.3,
            embedding_weight: 0.7,
            default_top_k: 3,
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            base_url: "https://api.openai.com".to_string(),
            model: "text-embedding-3-small".to_string(),
            api_key: None,
            dimension: 1536,
            timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("FAQ_SEARCH_STORE_PATH") {
            config.store_path = PathBuf::from(path);
        }
        if let Ok(addr) = std::env::var("FAQ_SEARCH_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(val) = std::env::var("TFIDF_WEIGHT") {
            if let Ok(v) = val.parse() {
                config.search.tfidf_weight = v;
            }
        }
        if let Ok(val) = std::env::var("EMBEDDING_WEIGHT") {
            if let Ok(v) = val.parse() {
                config.search.embedding_weight = v;
            }
        }
        if let Ok(val) = std::env::var("FAQ_SEARCH_DEFAULT_TOP_K") {
            if let Ok(v) = val.parse() {
                config.search.default_top_k = v;
            }
        }
        if let Ok(provider) = std::env::var("EMBEDDING_PROVIDER") {
            config.embedding.provider = provider;
        }
        if let Ok(url) = std::env::var("EMBEDDING_BASE_URL") {
            config.embedding.base_url = url;
        }
        if let Ok(model) = std::env::var("EMBEDDING_MODEL") {
            config.embedding.model = model;
        }
        if let Ok(key) = std::env::var("EMBEDDING_API_KEY") {
            config.embedding.api_key = Some(key);
        }
        if let Ok(dim) = std::env::var("EMBEDDING_DIMENSION") {
            if let Ok(d) = dim.parse() {
                config.embedding.dimension = d;
            }
        }
        if let Ok(val) = std::env::var("EMBEDDING_TIMEOUT_SECS") {
            if let Ok(v) = val.parse() {
                config.embedding.timeout_secs = v;
            }
        }

        config
    }

    /// Validate the configuration. Called once at startup, before any search
    /// executes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.search.validate()?;
        self.embedding.provider.parse::<Provider>()?;
        if self.embedding.dimension == 0 {
            return Err(ConfigError::InvalidDimension);
        }
        Ok(())
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("tfidf_weight", self.tfidf_weight),
            ("embedding_weight", self.embedding_weight),
        ] {
            if !(0.0..=1.0).contains(&value) || !value.is_finite() {
                return Err(ConfigError::WeightOutOfRange { name, value });
            }
        }
        let sum = self.tfidf_weight + self.embedding_weight;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightsDoNotSumToOne { sum });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let cfg = SearchConfig {
            tfidf_weight: 0.3,
            embedding_weight: 0.6,
            default_top_k: 3,
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::WeightsDoNotSumToOne { .. })
        ));
    }

    #[test]
    fn test_weight_sum_within_tolerance_accepted() {
        let cfg = SearchConfig {
            tfidf_weight: 0.3,
            embedding_weight: 0.7,
            default_top_k: 3,
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_weight_out_of_range_rejected() {
        let cfg = SearchConfig {
            tfidf_weight: 1.5,
            embedding_weight: -0.5,
            default_top_k: 3,
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::WeightOutOfRange { name: "tfidf_weight", .. })
        ));
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let mut cfg = Config::default();
        cfg.embedding.provider = "voyage".to_string();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::UnknownProvider(_))
        ));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let mut cfg = Config::default();
        cfg.embedding.dimension = 0;
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidDimension)));
    }
}

use crate::error::{CourtsError, Result};
use crate::validation::{SearchLimits, DEFAULT_MAX_RADIUS_KM};
use courts_geo::{GreatCircle, MEAN_EARTH_RADIUS_KM};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

pub const ENV_MAX_RADIUS_KM: &str = "COURTS_MAX_RADIUS_KM";
pub const ENV_EARTH_RADIUS_KM: &str = "COURTS_EARTH_RADIUS_KM";
pub const ENV_CANDIDATE_STRATEGY: &str = "COURTS_CANDIDATE_STRATEGY";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// How the spatial query engine obtains candidate facilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStrategy {
    /// Push the radius predicate down to the store's spatial index
    #[default]
    StorePredicate,
    /// Enumerate every facility and filter in the engine
    FullScan,
}

/// Layered configuration for nearby search
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub max_radius_km: ConfigValue<f64>,
    pub earth_radius_km: ConfigValue<f64>,
    pub candidate_strategy: ConfigValue<CandidateStrategy>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl SearchConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            max_radius_km: ConfigValue::new(DEFAULT_MAX_RADIUS_KM, ConfigSource::Default),
            earth_radius_km: ConfigValue::new(MEAN_EARTH_RADIUS_KM, ConfigSource::Default),
            candidate_strategy: ConfigValue::new(
                CandidateStrategy::default(),
                ConfigSource::Default,
            ),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| CourtsError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| CourtsError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(max_radius_km) = file_config.max_radius_km {
            self.max_radius_km.update(max_radius_km, ConfigSource::File);
        }

        if let Some(earth_radius_km) = file_config.earth_radius_km {
            self.earth_radius_km.update(earth_radius_km, ConfigSource::File);
        }

        if let Some(strategy) = file_config.candidate_strategy {
            self.candidate_strategy.update(strategy, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(self) -> Self {
        self.load_from_vars(|key| env::var(key).ok())
    }

    /// Apply overrides from a variable lookup; unparsable values are logged and skipped
    pub fn load_from_vars<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_MAX_RADIUS_KM) {
            match raw.trim().parse::<f64>() {
                Ok(value) => self.max_radius_km.update(value, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid {} value '{}': expected a number of kilometers",
                    ENV_MAX_RADIUS_KM,
                    raw
                ),
            }
        }

        if let Some(raw) = lookup(ENV_EARTH_RADIUS_KM) {
            match raw.trim().parse::<f64>() {
                Ok(value) => self.earth_radius_km.update(value, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid {} value '{}': expected a number of kilometers",
                    ENV_EARTH_RADIUS_KM,
                    raw
                ),
            }
        }

        if let Some(raw) = lookup(ENV_CANDIDATE_STRATEGY) {
            match parse_candidate_strategy(&raw) {
                Ok(strategy) => {
                    self.candidate_strategy.update(strategy, ConfigSource::Environment)
                }
                Err(_) => tracing::warn!(
                    "Invalid {} value '{}': expected store_predicate or full_scan",
                    ENV_CANDIDATE_STRATEGY,
                    raw
                ),
            }
        }

        self
    }

    /// Check that the resolved values are usable
    pub fn validate(&self) -> Result<()> {
        let max = self.max_radius_km.value;
        if !max.is_finite() || max <= 0.0 {
            return Err(CourtsError::ConfigInvalid {
                key: "max_radius_km".to_string(),
                reason: format!("must be a positive number, got {}", max),
            });
        }

        self.great_circle()?;
        Ok(())
    }

    pub fn limits(&self) -> SearchLimits {
        SearchLimits { max_radius_km: self.max_radius_km.value }
    }

    pub fn great_circle(&self) -> Result<GreatCircle> {
        Ok(GreatCircle::new(self.earth_radius_km.value)?)
    }

    pub fn strategy(&self) -> CandidateStrategy {
        self.candidate_strategy.value
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "max_radius_km".to_string(),
            (self.max_radius_km.value.to_string(), self.max_radius_km.source),
        );

        map.insert(
            "earth_radius_km".to_string(),
            (self.earth_radius_km.value.to_string(), self.earth_radius_km.source),
        );

        map.insert(
            "candidate_strategy".to_string(),
            (format!("{:?}", self.candidate_strategy.value), self.candidate_strategy.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    max_radius_km: Option<f64>,
    earth_radius_km: Option<f64>,
    candidate_strategy: Option<CandidateStrategy>,
}

/// Parse candidate strategy from string
pub fn parse_candidate_strategy(s: &str) -> Result<CandidateStrategy> {
    match s.trim().to_lowercase().replace('-', "_").as_str() {
        "store_predicate" | "store" | "native" => Ok(CandidateStrategy::StorePredicate),
        "full_scan" | "scan" => Ok(CandidateStrategy::FullScan),
        _ => Err(CourtsError::ConfigInvalid {
            key: "candidate_strategy".to_string(),
            reason: format!("Invalid candidate strategy: {}. Use store_predicate or full_scan", s),
        }),
    }
}

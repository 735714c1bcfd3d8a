use std::path::Path;

use crate::ai::{EstimatorConfig, PolicyConfig};
use crate::error::ConfigError;
use crate::game::STATE_SIZE;
use crate::simulation::SimulationConfig;
use crate::training::{StoreConfig, TrainerConfig};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub estimator: EstimatorConfig,
    pub policy: PolicyConfig,
    pub trainer: TrainerConfig,
    pub store: StoreConfig,
    pub simulation: SimulationConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.estimator.learning_rate <= 0.0 {
            return Err(ConfigError::Validation(
                "estimator.learning_rate must be > 0".into(),
            ));
        }
        if self.estimator.hidden_size == 0 {
            return Err(ConfigError::Validation(
                "estimator.hidden_size must be > 0".into(),
            ));
        }

        for (name, value) in [
            ("policy.start", self.policy.start),
            ("policy.decay_per_round", self.policy.decay_per_round),
            ("policy.floor", self.policy.floor),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Validation(format!("{name} must be in [0, 1]")));
            }
        }
        if self.policy.floor > self.policy.start {
            return Err(ConfigError::Validation(
                "policy.floor must be <= policy.start".into(),
            ));
        }

        if self.trainer.gamma < 0.0 || self.trainer.gamma > 1.0 {
            return Err(ConfigError::Validation(
                "trainer.gamma must be in [0, 1]".into(),
            ));
        }
        if self.trainer.batch_size == 0 {
            return Err(ConfigError::Validation(
                "trainer.batch_size must be > 0".into(),
            ));
        }
        if self.trainer.min_transitions == 0 {
            return Err(ConfigError::Validation(
                "trainer.min_transitions must be > 0".into(),
            ));
        }

        if let Some(capacity) = self.store.capacity {
            if capacity < self.trainer.min_transitions {
                return Err(ConfigError::Validation(
                    "store.capacity must be >= trainer.min_transitions".into(),
                ));
            }
        }

        if self.simulation.rounds == 0 {
            return Err(ConfigError::Validation(
                "simulation.rounds must be > 0".into(),
            ));
        }
        if self.simulation.train_interval == 0 {
            return Err(ConfigError::Validation(
                "simulation.train_interval must be > 0".into(),
            ));
        }
        if self.simulation.log_interval == 0 {
            return Err(ConfigError::Validation(
                "simulation.log_interval must be > 0".into(),
            ));
        }
        if self.simulation.towers_per_round >= STATE_SIZE {
            return Err(ConfigError::Validation(format!(
                "simulation.towers_per_round must be < {STATE_SIZE}"
            )));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

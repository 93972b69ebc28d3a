//! Config
//!
//! Training and pruning parameters, settable in code or loaded from json.
use crate::constants::{DEFAULT_MAX_PRUNE, DEFAULT_PRUNE_TRIALS, DEFAULT_SEED};
use crate::criterion::SplitCriterion;
use crate::errors::BdtreeError;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TreeConfig {
    /// Measure used to choose splits.
    #[serde(default)]
    pub criterion: SplitCriterion,
    /// Number of pruning trials (L).
    #[serde(default = "default_prune_trials")]
    pub prune_trials: usize,
    /// Exclusive upper bound on the nodes pruned in one trial (K).
    #[serde(default = "default_max_prune")]
    pub max_prune: usize,
    /// Integer value used to seed the randomness used in pruning.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_prune_trials() -> usize {
    DEFAULT_PRUNE_TRIALS
}
fn default_max_prune() -> usize {
    DEFAULT_MAX_PRUNE
}
fn default_seed() -> u64 {
    DEFAULT_SEED
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            criterion: SplitCriterion::default(),
            prune_trials: DEFAULT_PRUNE_TRIALS,
            max_prune: DEFAULT_MAX_PRUNE,
            seed: DEFAULT_SEED,
        }
    }
}

impl TreeConfig {
    pub fn validate(&self) -> Result<(), BdtreeError> {
        if self.max_prune < 2 {
            return Err(BdtreeError::InvalidParameter(
                "max_prune".to_string(),
                "a value of at least 2".to_string(),
                self.max_prune.to_string(),
            ));
        }
        Ok(())
    }

    /// Load a config from a json string; missing fields take their defaults.
    pub fn from_json(json_str: &str) -> Result<Self, BdtreeError> {
        let config = match serde_json::from_str::<TreeConfig>(json_str) {
            Ok(c) => Ok(c),
            Err(e) => Err(BdtreeError::UnableToRead(e.to_string())),
        }?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a path to a json file.
    pub fn load_config(path: &str) -> Result<Self, BdtreeError> {
        let json_str = match fs::read_to_string(path) {
            Ok(s) => Ok(s),
            Err(e) => Err(BdtreeError::UnableToRead(format!("{}: {}", path, e))),
        }?;
        Self::from_json(&json_str)
    }

    // Set methods for parameters

    /// Set the split criterion.
    pub fn set_criterion(mut self, criterion: SplitCriterion) -> Self {
        self.criterion = criterion;
        self
    }

    /// Set the number of pruning trials.
    pub fn set_prune_trials(mut self, prune_trials: usize) -> Self {
        self.prune_trials = prune_trials;
        self
    }

    /// Set the exclusive bound on nodes pruned per trial.
    pub fn set_max_prune(mut self, max_prune: usize) -> Self {
        self.max_prune = max_prune;
        self
    }

    /// Set the seed.
    pub fn set_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = TreeConfig::default();
        assert_eq!(config.criterion, SplitCriterion::Entropy);
        assert_eq!(config.prune_trials, DEFAULT_PRUNE_TRIALS);
        assert_eq!(config.max_prune, DEFAULT_MAX_PRUNE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_json() {
        let config = TreeConfig::from_json(r#"{"criterion": "Impurity", "max_prune": 8}"#).unwrap();
        assert_eq!(
            config,
            TreeConfig::default().set_criterion(SplitCriterion::Impurity).set_max_prune(8)
        );
        assert_eq!(TreeConfig::from_json("{}").unwrap(), TreeConfig::default());
    }

    #[test]
    fn test_config_from_json_invalid() {
        assert!(matches!(
            TreeConfig::from_json(r#"{"criterion": "Gini"}"#),
            Err(BdtreeError::UnableToRead(_))
        ));
        assert!(matches!(
            TreeConfig::from_json(r#"{"max_prune": 1}"#),
            Err(BdtreeError::InvalidParameter(..))
        ));
        assert!(matches!(
            TreeConfig::load_config("resources/missing.json"),
            Err(BdtreeError::UnableToRead(_))
        ));
    }

    #[test]
    fn test_load_config() {
        let config = TreeConfig::load_config("resources/config.json").unwrap();
        assert_eq!(config.prune_trials, 20);
        assert_eq!(config.max_prune, 6);
        assert_eq!(config.seed, 2024);
    }
}

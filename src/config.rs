//! Parameters of the bees algorithm.
//!
//! Configuration can be built in code, starting from [`BeesConfig::default`],
//! or loaded from JSON. Keys use the short names of the algorithm's
//! literature (`ns`, `ne`, `nb`, ...); missing keys keep their defaults.
//!
//! ```
//! use bees_shopper::config::BeesConfig;
//!
//! let config = BeesConfig::from_json_str(r#"{ "ns": 20, "nb": 10, "ne": 4, "seed": 7 }"#).unwrap();
//!
//! assert_eq!(config.scouts, 20);
//! assert_eq!(config.elite_foragers, 5);
//! assert_eq!(config.seed, Some(7));
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShopperError};

/// Tunables of the bees metaheuristic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeesConfig {
    /// Number of scouts, i.e. population size per iteration (`ns`)
    #[serde(rename = "ns")]
    pub scouts: usize,

    /// Number of elite patches (`ne`)
    #[serde(rename = "ne")]
    pub elite_patches: usize,

    /// Number of retained patches, elite included (`nb`)
    #[serde(rename = "nb")]
    pub best_patches: usize,

    /// Foragers sent to each elite patch (`nre`)
    #[serde(rename = "nre")]
    pub elite_foragers: usize,

    /// Foragers sent to each non-elite patch (`nrb`)
    #[serde(rename = "nrb")]
    pub best_foragers: usize,

    /// Edit budget of a single neighbour mutation (`d`)
    #[serde(rename = "d", alias = "neighbourhood_size")]
    pub neighbourhood_size: usize,

    /// Stop after this many iterations without a new best
    #[serde(alias = "improve_iters")]
    pub iters_without_improvement: usize,

    /// Hard limit on iterations
    pub max_iters: usize,

    /// Initial annealing temperature; 0 disables annealing
    pub temperature: f64,

    /// Multiplier applied to the temperature after each iteration
    #[serde(alias = "decay")]
    pub temp_decay: f64,

    /// Mutation attempts per forager before falling back to the patch
    pub max_neighbour_attempts: usize,

    /// Seed for the random source; entropy when absent
    pub seed: Option<u64>,

    /// Evaluate scouts and foragers on the rayon pool
    pub parallel: bool,

    /// Re-sequence neighbours with the sweep heuristic before scoring
    pub reorder_foragers: bool,
}

impl Default for BeesConfig {
    fn default() -> Self {
        Self {
            scouts: 50,
            elite_patches: 20,
            best_patches: 30,
            elite_foragers: 5,
            best_foragers: 3,
            neighbourhood_size: 6,
            iters_without_improvement: 150,
            max_iters: 500,
            temperature: 1000.0,
            temp_decay: 0.99,
            max_neighbour_attempts: 100,
            seed: None,
            parallel: false,
            reorder_foragers: true,
        }
    }
}

impl BeesConfig {
    /// Parses a JSON document and validates it
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a JSON file and validates it
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Checks the relations between parameters
    pub fn validate(&self) -> Result<()> {
        let fail = |message: String| Err(ShopperError::InvalidConfig(message));

        if self.best_patches == 0 {
            return fail("nb must be at least 1".to_string());
        }
        if self.elite_patches > self.best_patches {
            return fail(format!(
                "ne ({}) must not exceed nb ({})",
                self.elite_patches, self.best_patches
            ));
        }
        if self.best_patches > self.scouts {
            return fail(format!(
                "nb ({}) must not exceed ns ({})",
                self.best_patches, self.scouts
            ));
        }
        if self.elite_foragers == 0 || self.best_foragers == 0 {
            return fail("nre and nrb must be at least 1".to_string());
        }
        if self.neighbourhood_size == 0 {
            return fail("neighbourhood size must be at least 1".to_string());
        }
        if self.iters_without_improvement == 0 {
            return fail("iters_without_improvement must be at least 1".to_string());
        }
        if self.max_neighbour_attempts == 0 {
            return fail("max_neighbour_attempts must be at least 1".to_string());
        }
        if !self.temperature.is_finite() || self.temperature < 0.0 {
            return fail(format!(
                "temperature must be a non-negative number, got {}",
                self.temperature
            ));
        }
        if !(self.temp_decay > 0.0 && self.temp_decay <= 1.0) {
            return fail(format!(
                "temperature decay must be in (0, 1], got {}",
                self.temp_decay
            ));
        }

        Ok(())
    }
}

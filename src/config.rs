use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::LinSysError;
use crate::math::DEFAULT_TOLERANCE;

/// Central configuration for the solver.
///
/// `tolerance` is the single near-zero threshold used by triangularization,
/// RREF and classification.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SolverConfig {
    pub tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SolverConfig {
    pub fn new(tolerance: f64) -> Result<Self, LinSysError> {
        let config = Self { tolerance };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LinSysError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(LinSysError::InvalidTolerance(self.tolerance));
        }
        Ok(())
    }
}

/// Load a solver configuration from a JSON file.
pub fn load_solver_config<P: AsRef<Path>>(path: P) -> Result<SolverConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: SolverConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config: {}", path.as_ref().display()))?;
    Ok(config)
}

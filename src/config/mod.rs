// src/config/mod.rs

//! Run configuration of one teleportation experiment.

use crate::core::{DEFAULT_OUTPUT_DIR, DEFAULT_SHOTS, SECRET_ANGLE, TeleportError, TeleportResult};
use serde::Serialize;
use std::path::PathBuf;

/// Parameters of an experiment run. The success threshold is deliberately
/// absent; it is the fixed [`SUCCESS_THRESHOLD`](crate::core::SUCCESS_THRESHOLD).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeleportConfig {
    /// Preparation angle θ in radians.
    pub angle: f64,
    /// Number of shots to execute.
    pub shots: u32,
    /// Directory artifacts are written to.
    pub output_dir: PathBuf,
    /// RNG seed for reproducible runs; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for TeleportConfig {
    fn default() -> Self {
        Self {
            angle: SECRET_ANGLE,
            shots: DEFAULT_SHOTS,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            seed: None,
        }
    }
}

impl TeleportConfig {
    /// Sets the preparation angle.
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Sets the shot count.
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    /// Sets the artifact directory.
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Sets or clears the RNG seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Rejects configurations that must never reach the executor.
    ///
    /// # Errors
    /// * `InvalidShotCount` for zero shots.
    /// * `InvalidAngle` for a NaN or infinite angle.
    pub fn validate(&self) -> TeleportResult<()> {
        if self.shots == 0 {
            return Err(TeleportError::InvalidShotCount { shots: 0 });
        }
        if !self.angle.is_finite() {
            return Err(TeleportError::InvalidAngle { angle: self.angle });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = TeleportConfig::default();
        assert_eq!(config.shots, 1000);
        assert_eq!(config.output_dir, PathBuf::from("images"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_degenerate_values_rejected() {
        let zero = TeleportConfig::default().with_shots(0);
        assert!(matches!(zero.validate(), Err(TeleportError::InvalidShotCount { shots: 0 })));

        for angle in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let config = TeleportConfig::default().with_angle(angle);
            assert!(matches!(config.validate(), Err(TeleportError::InvalidAngle { .. })));
        }
    }

    #[test]
    fn test_any_finite_angle_accepted() {
        for angle in [0.0, -7.5, 1e6] {
            assert!(TeleportConfig::default().with_angle(angle).validate().is_ok());
        }
    }
}

// src/validation/mod.rs

//! Sanity checks on simulated states.

use crate::core::{StateVector, TeleportError, TeleportResult};

const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;

/// Checks that the state vector is normalized (sum of squared amplitudes ≈ 1.0).
///
/// # Arguments
/// * `state` - The `StateVector` to check.
/// * `tolerance` - Allowed deviation from 1.0. Defaults to `1e-9`.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(TeleportError::Incoherence)` otherwise.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> TeleportResult<()> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let norm_sq = state.norm_sqr();
    if !norm_sq.is_finite() || (norm_sq - 1.0).abs() > effective_tolerance {
        Err(TeleportError::Incoherence {
            message: format!(
                "State vector normalization failed. Sum(|c_i|^2) = {} (Deviation > {})",
                norm_sq, effective_tolerance
            ),
        })
    } else {
        Ok(())
    }
}

/// Checks that every amplitude is a finite complex number.
pub fn check_finite(state: &StateVector) -> TeleportResult<()> {
    match state.vector().iter().position(|c| !c.re.is_finite() || !c.im.is_finite()) {
        Some(index) => Err(TeleportError::Incoherence {
            message: format!("Amplitude at basis index {} is not finite", index),
        }),
        None => Ok(()),
    }
}

/// Runs every state check. Called by the simulator at the end of each shot.
pub fn validate_state(state: &StateVector, norm_tolerance: Option<f64>) -> TeleportResult<()> {
    check_finite(state)?;
    check_normalization(state, norm_tolerance)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;
    use num_traits::Zero;

    #[test]
    fn test_ground_state_is_valid() {
        assert!(validate_state(&StateVector::ground(3), None).is_ok());
    }

    #[test]
    fn test_unnormalized_state_rejected() {
        let state = StateVector::from_amplitudes(vec![Complex::new(1.0, 0.0), Complex::new(1.0, 0.0)]);
        assert!(matches!(check_normalization(&state, None), Err(TeleportError::Incoherence { .. })));
        assert!(check_normalization(&state, Some(1.5)).is_ok());
    }

    #[test]
    fn test_nan_amplitude_rejected() {
        let state = StateVector::from_amplitudes(vec![Complex::new(f64::NAN, 0.0), Complex::zero()]);
        assert!(matches!(validate_state(&state, None), Err(TeleportError::Incoherence { .. })));
    }
}

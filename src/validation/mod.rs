// src/validation/mod.rs

//! Checks on [`StateVector`]s.
//!
//! Decompositions are only correct up to a global phase, so comparing two
//! states amplitude-by-amplitude is usually the wrong test; use
//! [`equal_up_to_global_phase`] instead.

use crate::core::constants::AMPLITUDE_TOLERANCE;
use crate::core::{QpuError, QpuResult, StateVector};
use num_complex::Complex;

const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;

/// Checks that the squared amplitudes of `state` sum to 1.
///
/// # Errors
/// Returns [`QpuError::Engine`] when the norm deviates by more than
/// `tolerance` (default `1e-9`).
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> QpuResult<()> {
    let tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let norm_sq: f64 = state.probabilities().iter().sum();
    if (norm_sq - 1.0).abs() > tolerance {
        return Err(QpuError::Engine {
            message: format!("state norm {norm_sq} deviates from 1 by more than {tolerance}"),
        });
    }
    Ok(())
}

/// The unit factor `g` with `actual ≈ g · expected`, taken from the largest
/// amplitude of `expected`.
///
/// Returns `None` when the dimensions differ or `expected` is the zero vector.
pub fn global_phase_between(actual: &StateVector, expected: &StateVector) -> Option<Complex<f64>> {
    if actual.dim() != expected.dim() {
        return None;
    }
    let (index, pivot) = expected
        .amplitudes()
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.norm_sqr().total_cmp(&b.1.norm_sqr()))?;
    if pivot.norm_sqr() < AMPLITUDE_TOLERANCE {
        return None;
    }
    let ratio = actual.amplitudes()[index] / pivot;
    if ratio.norm() < AMPLITUDE_TOLERANCE {
        return None;
    }
    Some(ratio / ratio.norm())
}

/// Returns `true` if the states differ at most by a global phase factor.
pub fn equal_up_to_global_phase(actual: &StateVector, expected: &StateVector, tolerance: f64) -> bool {
    let Some(phase) = global_phase_between(actual, expected) else {
        return false;
    };
    actual
        .amplitudes()
        .iter()
        .zip(expected.amplitudes())
        .all(|(a, e)| (a - phase * e).norm() <= tolerance)
}

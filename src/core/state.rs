// src/core/state.rs

use super::error::{QpuError, QpuResult};
use num_complex::Complex;
use num_traits::{One, Zero};
use std::fmt;

/// Amplitudes of an n-qubit register over the 2^n computational basis states.
///
/// Basis index bit `n - 1 - i` holds the value of the qubit at register
/// position `i`, so the first qubit is the most significant bit of the index.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct StateVector {
    amplitudes: Vec<Complex<f64>>,
    num_qubits: usize,
}

impl StateVector {
    /// The |0…0⟩ state on `num_qubits` qubits.
    ///
    /// Fails with [`QpuError::Engine`] if 2^n amplitudes cannot be indexed or
    /// allocated.
    pub(crate) fn zero_state(num_qubits: usize) -> QpuResult<Self> {
        let dim = u32::try_from(num_qubits)
            .ok()
            .and_then(|n| 1usize.checked_shl(n))
            .ok_or_else(|| QpuError::Engine {
                message: format!("a state of {num_qubits} qubits cannot be indexed"),
            })?;
        let mut amplitudes = Vec::new();
        amplitudes.try_reserve_exact(dim).map_err(|e| QpuError::Engine {
            message: format!("cannot allocate {dim} amplitudes: {e}"),
        })?;
        amplitudes.resize(dim, Complex::zero());
        amplitudes[0] = Complex::one();
        Ok(Self { amplitudes, num_qubits })
    }

    /// Wraps a caller-supplied amplitude vector; its length must be 2^n.
    pub fn from_amplitudes(amplitudes: Vec<Complex<f64>>) -> Option<Self> {
        let len = amplitudes.len();
        if !len.is_power_of_two() {
            return None;
        }
        let num_qubits = len.trailing_zeros() as usize;
        Some(Self { amplitudes, num_qubits })
    }

    /// Read-only access to the amplitudes.
    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub(crate) fn amplitudes_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Number of basis states (2^n).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Number of qubits described.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Bit mask inside a basis index for the qubit at register `position`.
    pub(crate) fn bit_of(&self, position: usize) -> usize {
        1 << (self.num_qubits - 1 - position)
    }

    /// Born-rule probability of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|c| c.norm_sqr()).collect()
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.amplitudes.iter().enumerate() {
            if c.norm_sqr() < 1e-12 {
                continue;
            }
            write!(
                f,
                "{}({:.3}{:+.3}i)|{:0width$b}⟩",
                if i > 0 { " + " } else { "" },
                c.re,
                c.im,
                i,
                width = self.num_qubits
            )?;
        }
        Ok(())
    }
}

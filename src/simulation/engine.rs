// src/simulation/engine.rs
use crate::core::{QpuError, QpuResult, QubitId, QubitRegister, StateVector};
use crate::operations::Operation;
use num_complex::Complex;
use num_traits::{One, Zero};
use rand::Rng;
use std::collections::HashMap;
use std::f64::consts::FRAC_1_SQRT_2;

type Matrix2 = [[Complex<f64>; 2]; 2];

/// Statevector engine evolving one register through a circuit's operations.
/// (Internal visibility)
pub(crate) struct SimulationEngine {
    /// Maps each qubit handle to its register position.
    qubit_indices: HashMap<QubitId, usize>,
    /// The joint state of every register qubit.
    state: StateVector,
}

impl SimulationEngine {
    /// Initializes the engine to |0…0⟩ over every qubit of `register`.
    pub(crate) fn init(register: &QubitRegister) -> QpuResult<Self> {
        let state = StateVector::zero_state(register.len())?;
        let qubit_indices = register.qubits().iter().enumerate().map(|(i, q)| (*q, i)).collect();
        Ok(Self { qubit_indices, state })
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: StateVector) -> QpuResult<()> {
        if state.dim() != self.state.dim() {
            return Err(QpuError::Engine {
                message: format!(
                    "cannot set state: dimension {} does not match engine dimension {}",
                    state.dim(),
                    self.state.dim()
                ),
            });
        }
        self.state = state;
        Ok(())
    }

    pub(crate) fn state(&self) -> &StateVector {
        &self.state
    }

    pub(crate) fn into_state(self) -> StateVector {
        self.state
    }

    /// Applies a single unitary operation to the state.
    pub(crate) fn apply_operation(&mut self, op: &Operation) -> QpuResult<()> {
        match op {
            Operation::Hadamard { target } => {
                let h = Complex::new(FRAC_1_SQRT_2, 0.0);
                self.apply_single_qubit_gate(*target, &[[h, h], [h, -h]])?;
            }
            Operation::PauliX { target } => {
                self.apply_controlled_flip(&[], *target)?;
            }
            Operation::SqrtX { target } => {
                let p = Complex::new(0.5, 0.5);
                let m = Complex::new(0.5, -0.5);
                self.apply_single_qubit_gate(*target, &[[p, m], [m, p]])?;
            }
            Operation::Rz { target, theta } => {
                self.apply_single_qubit_gate(*target, &rz_matrix(*theta))?;
            }
            Operation::Cnot { control, target } => {
                self.apply_controlled_flip(&[*control], *target)?;
            }
            Operation::Ccnot { controls, target } => {
                self.apply_controlled_flip(controls, *target)?;
            }
            Operation::Measure { .. } => {
                return Err(QpuError::Engine {
                    message: "measurement must go through SimulationEngine::measure".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Measures `targets` in the computational basis.
    ///
    /// Samples a basis state from the Born-rule distribution, collapses the
    /// state onto the measured bits, renormalizes, and returns the bits in
    /// target order.
    pub(crate) fn measure<R: Rng>(
        &mut self,
        targets: &[QubitId],
        rng: &mut R,
    ) -> QpuResult<Vec<u8>> {
        let bits = targets
            .iter()
            .map(|q| self.qubit_bit(*q))
            .collect::<QpuResult<Vec<usize>>>()?;

        let probabilities = self.state.probabilities();
        let sample: f64 = rng.random::<f64>();
        let mut cumulative = 0.0;
        let mut chosen = None;
        for (k, p) in probabilities.iter().enumerate() {
            if *p <= 0.0 {
                continue;
            }
            chosen = Some(k);
            cumulative += p;
            if sample < cumulative {
                break;
            }
        }
        // Rounding can leave `sample` above the final cumulative sum; the last
        // populated basis state is kept in that case.
        let chosen = chosen.ok_or_else(|| QpuError::Engine {
            message: "cannot measure a state with zero norm".to_string(),
        })?;

        let pattern = bits.iter().fold(0usize, |acc, b| acc | b);
        let outcome = chosen & pattern;

        let mut kept = 0.0;
        for (i, amp) in self.state.amplitudes_mut().iter_mut().enumerate() {
            if i & pattern == outcome {
                kept += amp.norm_sqr();
            } else {
                *amp = Complex::zero();
            }
        }
        let scale = 1.0 / kept.sqrt();
        for amp in self.state.amplitudes_mut() {
            *amp *= scale;
        }

        Ok(bits.iter().map(|b| u8::from(chosen & b != 0)).collect())
    }

    /// Basis-index bit of `qubit`, or an error if the register lacks it.
    fn qubit_bit(&self, qubit: QubitId) -> QpuResult<usize> {
        self.qubit_indices
            .get(&qubit)
            .map(|pos| self.state.bit_of(*pos))
            .ok_or(QpuError::UnknownQubit { qubit })
    }

    /// Applies a 2x2 matrix to one qubit of the joint state.
    fn apply_single_qubit_gate(&mut self, target: QubitId, matrix: &Matrix2) -> QpuResult<()> {
        let bit = self.qubit_bit(target)?;
        let amps = self.state.amplitudes_mut();
        for i0 in 0..amps.len() {
            if i0 & bit != 0 {
                continue;
            }
            let i1 = i0 | bit;
            let (psi_0, psi_1) = (amps[i0], amps[i1]);
            amps[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            amps[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
        Ok(())
    }

    /// Flips `target` on every basis state whose `controls` are all |1⟩.
    /// With no controls this is Pauli-X.
    fn apply_controlled_flip(&mut self, controls: &[QubitId], target: QubitId) -> QpuResult<()> {
        let control_mask = controls
            .iter()
            .map(|c| self.qubit_bit(*c))
            .collect::<QpuResult<Vec<usize>>>()?
            .into_iter()
            .fold(0usize, |acc, b| acc | b);
        let target_bit = self.qubit_bit(target)?;
        let amps = self.state.amplitudes_mut();
        for i in 0..amps.len() {
            if i & control_mask == control_mask && i & target_bit == 0 {
                amps.swap(i, i | target_bit);
            }
        }
        Ok(())
    }
}

/// Rz(θ) = diag(e^{-iθ/2}, e^{iθ/2}).
fn rz_matrix(theta: f64) -> Matrix2 {
    [
        [Complex::from_polar(1.0, -theta / 2.0), Complex::zero()],
        [Complex::zero(), Complex::from_polar(1.0, theta / 2.0)],
    ]
}

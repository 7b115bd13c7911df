// src/core/qubit.rs

use super::constants::MASK_WIDTH;
use super::error::{QpuError, QpuResult};
use std::fmt;

/// Opaque handle to one simulated qubit.
///
/// The wrapped value is the qubit's position in the register that created it,
/// so handles sort in register order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QubitId(pub usize);

impl QubitId {
    /// Position of this qubit in its register (equivalently, its mask bit).
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q({})", self.0)
    }
}

/// Ordered, fixed-size sequence of qubit handles created by a reset.
///
/// Invariant: the handle at position `i` answers to bit `i` of every mask.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct QubitRegister {
    qubits: Vec<QubitId>,
}

impl QubitRegister {
    /// Creates a register of `num_qubits` distinct handles.
    ///
    /// Fails with [`QpuError::RegisterTooLarge`] if the register could not be
    /// addressed by a 64-bit mask.
    pub fn new(num_qubits: usize) -> QpuResult<Self> {
        if num_qubits > MASK_WIDTH {
            return Err(QpuError::RegisterTooLarge { requested: num_qubits, max: MASK_WIDTH });
        }
        Ok(Self { qubits: (0..num_qubits).map(QubitId).collect() })
    }

    /// Number of qubits held.
    pub fn len(&self) -> usize {
        self.qubits.len()
    }

    /// Returns `true` if the register holds no qubits.
    pub fn is_empty(&self) -> bool {
        self.qubits.is_empty()
    }

    /// Handle at `position`, if any.
    pub fn get(&self, position: usize) -> Option<QubitId> {
        self.qubits.get(position).copied()
    }

    /// Position of `qubit` in this register, if it belongs here.
    pub fn position(&self, qubit: QubitId) -> Option<usize> {
        self.qubits.iter().position(|q| *q == qubit)
    }

    /// All handles in register order.
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }
}

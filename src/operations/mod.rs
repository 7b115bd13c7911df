// src/operations/mod.rs

//! The primitive gate vocabulary understood by the circuit engine.
//!
//! Every higher-level builder call (controlled phase, exchange) is expressed
//! as a sequence of these operations; nothing else ever enters a circuit.

use crate::core::{QpuError, QpuResult, QubitId};
use std::f64::consts::PI;

/// One primitive operation on concrete qubit handles.
#[derive(Debug, Clone, PartialEq)] // f64 parameters rule out Eq
pub enum Operation {
    /// Hadamard on a single qubit.
    Hadamard {
        /// Qubit acted upon.
        target: QubitId,
    },

    /// Pauli-X (NOT) on a single qubit.
    PauliX {
        /// Qubit acted upon.
        target: QubitId,
    },

    /// Principal square root of Pauli-X: `½[[1+i, 1−i], [1−i, 1+i]]`.
    SqrtX {
        /// Qubit acted upon.
        target: QubitId,
    },

    /// Rotation about the Z axis, `diag(e^{-iθ/2}, e^{iθ/2})`.
    Rz {
        /// Qubit acted upon.
        target: QubitId,
        /// Rotation angle in radians.
        theta: f64,
    },

    /// Controlled-NOT: flips `target` iff `control` is |1⟩.
    Cnot {
        /// Conditioning qubit.
        control: QubitId,
        /// Flipped qubit.
        target: QubitId,
    },

    /// Doubly-controlled NOT (Toffoli): flips `target` iff both controls are |1⟩.
    Ccnot {
        /// Conditioning qubits, in mask order.
        controls: [QubitId; 2],
        /// Flipped qubit.
        target: QubitId,
    },

    /// Measurement of `targets` in the computational basis, recorded under `key`.
    Measure {
        /// Measured qubits; their bits are recorded in this order.
        targets: Vec<QubitId>,
        /// Name of the output record.
        key: String,
    },
}

impl Operation {
    /// Short gate name used in errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Hadamard { .. } => "H",
            Operation::PauliX { .. } => "X",
            Operation::SqrtX { .. } => "SqrtX",
            Operation::Rz { .. } => "Rz",
            Operation::Cnot { .. } => "CNOT",
            Operation::Ccnot { .. } => "CCNOT",
            Operation::Measure { .. } => "measure",
        }
    }

    /// Every qubit the operation touches, controls first.
    pub fn involved_qubits(&self) -> Vec<QubitId> {
        match self {
            Operation::Hadamard { target }
            | Operation::PauliX { target }
            | Operation::SqrtX { target }
            | Operation::Rz { target, .. } => vec![*target],
            Operation::Cnot { control, target } => vec![*control, *target],
            Operation::Ccnot { controls, target } => vec![controls[0], controls[1], *target],
            Operation::Measure { targets, .. } => targets.clone(),
        }
    }

    /// Checks the operation is well formed for the engine: distinct operands,
    /// a non-empty measurement, a finite rotation angle.
    pub fn validate(&self) -> QpuResult<()> {
        let qubits = self.involved_qubits();
        for (i, q) in qubits.iter().enumerate() {
            if qubits[..i].contains(q) {
                return Err(QpuError::DuplicateQubit { qubit: *q, gate: self.name() });
            }
        }
        match self {
            Operation::Measure { targets, .. } if targets.is_empty() => Err(QpuError::Engine {
                message: "measurement without qubits".to_string(),
            }),
            Operation::Rz { theta, .. } if !theta.is_finite() => Err(QpuError::Engine {
                message: format!("rotation angle {theta} is not finite"),
            }),
            _ => Ok(()),
        }
    }

    /// Diagram labels for each involved qubit, in [`involved_qubits`](Self::involved_qubits) order.
    pub(crate) fn symbols(&self) -> Vec<String> {
        match self {
            Operation::Hadamard { .. } => vec!["H".to_string()],
            Operation::PauliX { .. } => vec!["X".to_string()],
            Operation::SqrtX { .. } => vec!["X^0.5".to_string()],
            Operation::Rz { theta, .. } => vec![format!("Rz({}π)", trim_float(theta / PI))],
            Operation::Cnot { .. } => vec!["@".to_string(), "X".to_string()],
            Operation::Ccnot { .. } => vec!["@".to_string(), "@".to_string(), "X".to_string()],
            Operation::Measure { targets, key } => (0..targets.len())
                .map(|i| if i == 0 { format!("M('{key}')") } else { "M".to_string() })
                .collect(),
        }
    }
}

/// Formats with at most three decimals, dropping trailing zeros.
fn trim_float(x: f64) -> String {
    let s = format!("{:.3}", x);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

//! Error handling logic

use super::qubit::QubitId;
use thiserror::Error;

/// Which operand of a gate a mask was resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandRole {
    /// The qubit(s) acted upon.
    Target,
    /// The qubit(s) conditioning the action.
    Control,
}

impl std::fmt::Display for OperandRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperandRole::Target => write!(f, "target"),
            OperandRole::Control => write!(f, "control"),
        }
    }
}

/// Errors raised while addressing qubits, emitting gates, or executing a circuit.
///
/// The variants fall into three classes:
/// - addressing: [`MaskOutOfRange`](QpuError::MaskOutOfRange),
///   [`EmptySelection`](QpuError::EmptySelection),
///   [`RegisterTooLarge`](QpuError::RegisterTooLarge)
/// - cardinality: [`Cardinality`](QpuError::Cardinality)
/// - collaborator: [`DuplicateQubit`](QpuError::DuplicateQubit),
///   [`UnknownQubit`](QpuError::UnknownQubit), [`Engine`](QpuError::Engine)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum QpuError {
    /// The mask selects a bit position at or beyond the register size.
    #[error("mask {mask:#x} selects qubit {bit} but the register holds {size} qubits")]
    MaskOutOfRange {
        /// The offending mask.
        mask: u64,
        /// Lowest out-of-range bit position.
        bit: u32,
        /// Register size at the time of the call.
        size: usize,
    },

    /// The mask selects no qubit where the gate needs a fixed number of them.
    #[error("{gate} needs {expected} {role} qubit(s) but the mask selects none")]
    EmptySelection {
        /// Gate being emitted.
        gate: &'static str,
        /// Operand the mask was resolved for.
        role: OperandRole,
        /// Required number of qubits.
        expected: usize,
    },

    /// A register was requested with more qubits than a mask can address.
    #[error("register of {requested} qubits exceeds the {max}-bit mask width")]
    RegisterTooLarge {
        /// Requested qubit count.
        requested: usize,
        /// Maximum supported qubit count.
        max: usize,
    },

    /// The mask resolves to the wrong number of qubits for the gate.
    #[error("{gate} needs exactly {expected} {role} qubit(s), mask selects {got}")]
    Cardinality {
        /// Gate being emitted.
        gate: &'static str,
        /// Operand the mask was resolved for.
        role: OperandRole,
        /// Required number of qubits.
        expected: usize,
        /// Number of qubits the mask selected.
        got: usize,
    },

    /// A single operation names the same qubit twice.
    #[error("{qubit} appears more than once in {gate}")]
    DuplicateQubit {
        /// The repeated qubit.
        qubit: QubitId,
        /// Gate being appended.
        gate: &'static str,
    },

    /// A circuit references a qubit the executing register does not hold.
    #[error("{qubit} is not part of the executing register")]
    UnknownQubit {
        /// The unknown qubit.
        qubit: QubitId,
    },

    /// Any other failure inside the circuit engine or simulator.
    #[error("engine failure: {message}")]
    Engine {
        /// Failure description.
        message: String,
    },
}

impl QpuError {
    /// Returns `true` for mask-resolution failures.
    pub fn is_addressing(&self) -> bool {
        matches!(
            self,
            QpuError::MaskOutOfRange { .. }
                | QpuError::EmptySelection { .. }
                | QpuError::RegisterTooLarge { .. }
        )
    }

    /// Returns `true` when a mask resolved to the wrong qubit count.
    pub fn is_cardinality(&self) -> bool {
        matches!(self, QpuError::Cardinality { .. })
    }

    /// Returns `true` for failures raised by the circuit engine or simulator.
    pub fn is_collaborator(&self) -> bool {
        matches!(
            self,
            QpuError::DuplicateQubit { .. } | QpuError::UnknownQubit { .. } | QpuError::Engine { .. }
        )
    }
}

/// Result type used throughout the crate.
pub type QpuResult<T> = Result<T, QpuError>;

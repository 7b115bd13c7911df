// src/lib.rs

//! `qpu` - a bitmask-addressed quantum circuit builder
//!
//! Qubits are selected by bitmask, circuits are composed from a small gate
//! vocabulary (H, X, CNOT, CCNOT, Rz, √X, measurement), and controlled phase
//! and (controlled) swap are decomposed into that vocabulary. Execution is
//! delegated to a [`Backend`]; a statevector [`Simulator`] is bundled.

pub mod backend;
pub mod circuits;
pub mod core;
pub mod operations;
pub mod qpu;
pub mod simulation;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use backend::Backend;
pub use circuits::{Circuit, CircuitBuilder};
pub use crate::core::{
    DEFAULT_MEASUREMENT_KEY, OperandRole, QpuError, QpuResult, QubitId, QubitMask, QubitRegister,
    StateVector,
};
pub use operations::Operation;
pub use qpu::Qpu;
pub use simulation::{Counts, SimulationResult, Simulator, SimulatorConfig};
pub use validation::{check_normalization, equal_up_to_global_phase, global_phase_between};

// Example 1: Controlled phase against its hand-written decomposition
// The builder's expansion and the explicit five-step sequence emit the same
// operations and leave the register in the same state.
/// ```
/// use qpu::{Qpu, QpuError, Simulator, QubitMask};
///
/// fn build(direct: bool) -> Result<Qpu, QpuError> {
///     let mut qpu = Qpu::with_backend(Simulator::with_seed(1));
///     qpu.reset(2)?;
///     qpu.had(QubitMask::All)?;
///     if direct {
///         qpu.controlled_phase(90.0, 0x1, 0x2)?;
///     } else {
///         qpu.phase(45.0, 0x1)?;
///         qpu.cnot(0x1, 0x2)?;
///         qpu.phase(-45.0, 0x1)?;
///         qpu.cnot(0x1, 0x2)?;
///         qpu.phase(45.0, 0x2)?;
///     }
///     Ok(qpu)
/// }
///
/// let direct = build(true).unwrap();
/// let manual = build(false).unwrap();
/// assert_eq!(direct.circuit(), manual.circuit());
/// println!("{}", direct.draw());
///
/// let a = direct.run().unwrap();
/// let b = manual.run().unwrap();
/// assert!(qpu::equal_up_to_global_phase(a.final_state(), b.final_state(), 1e-9));
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Controlled swap
// With the control set, the Fredkin expansion moves the |1> from q(0) to q(1).
/// ```
/// use qpu::Qpu;
///
/// let mut qpu = Qpu::new();
/// qpu.reset(3).unwrap();
/// qpu.x(0x1 | 0x4).unwrap(); // q(0) = 1, control q(2) = 1
/// qpu.controlled_exchange(0x1, 0x2, 0x4).unwrap();
/// qpu.measure_keyed(0x3, "pair").unwrap();
/// let result = qpu.run().unwrap();
/// assert_eq!(result.measurement("pair"), Some(&[0u8, 1][..]));
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

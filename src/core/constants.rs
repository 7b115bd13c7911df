//! Constants shared across the crate.

/// Measurement key used when the caller supplies none.
pub const DEFAULT_MEASUREMENT_KEY: &str = "result";

/// Width in bits of a [`QubitMask`](super::QubitMask); also the largest
/// register a mask can address.
pub const MASK_WIDTH: usize = u64::BITS as usize;

/// Default qubit limit of the bundled statevector simulator.
pub const DEFAULT_MAX_QUBITS: usize = 20;

/// Tolerance used when comparing amplitudes.
pub const AMPLITUDE_TOLERANCE: f64 = 1e-9;

/// Hard ceiling on the simulator's qubit limit: 2^n amplitudes of 16 bytes
/// each must stay addressable.
pub const SIMULATOR_QUBIT_CEILING: usize = usize::BITS as usize - 5;

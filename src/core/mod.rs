// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod mask;
pub mod qubit;
pub mod state;

pub use error::{OperandRole, QpuError, QpuResult};
pub use mask::QubitMask;
pub use qubit::{QubitId, QubitRegister};
pub use state::StateVector;

pub mod constants;
pub use constants::{DEFAULT_MEASUREMENT_KEY, MASK_WIDTH};

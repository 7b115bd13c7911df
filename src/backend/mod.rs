// src/backend/mod.rs

//! The circuit-engine seam.
//!
//! [`Qpu`](crate::Qpu) never evolves quantum state itself. It asks a
//! [`Backend`] for qubit handles and hands the finished circuit back to it for
//! execution, so alternative simulators can be swapped in without touching
//! the decomposition logic.

use crate::circuits::Circuit;
use crate::core::{QpuResult, QubitRegister};

/// An engine able to allocate qubits and execute circuits on them.
pub trait Backend {
    /// Whatever the engine reports after execution.
    type Output;

    /// Human-readable engine name.
    fn name(&self) -> &str;

    /// Produces `num_qubits` distinct qubit handles.
    fn allocate(&self, num_qubits: usize) -> QpuResult<QubitRegister> {
        QubitRegister::new(num_qubits)
    }

    /// Executes `circuit` on a fresh state over `register`.
    ///
    /// # Errors
    /// Any engine failure, returned unchanged to the caller.
    fn execute(&self, circuit: &Circuit, register: &QubitRegister) -> QpuResult<Self::Output>;
}

impl<B: Backend + ?Sized> Backend for &B {
    type Output = B::Output;

    fn name(&self) -> &str {
        (**self).name()
    }

    fn allocate(&self, num_qubits: usize) -> QpuResult<QubitRegister> {
        (**self).allocate(num_qubits)
    }

    fn execute(&self, circuit: &Circuit, register: &QubitRegister) -> QpuResult<Self::Output> {
        (**self).execute(circuit, register)
    }
}

// src/qpu/mod.rs

//! The mask-addressed circuit builder.
//!
//! [`Qpu`] resolves bitmasks to qubit handles, emits primitive operations and
//! expands the two composite operations the primitive set lacks:
//!
//! - controlled phase: `Rz(θ/2)` on the target, CNOT, `Rz(-θ/2)` on the
//!   target, CNOT, `Rz(θ/2)` on the control;
//! - exchange: three alternating CNOTs, or CNOT, CCNOT, CNOT when controlled.
//!
//! Every call builds its whole operation list before touching the circuit, so
//! a failed call appends nothing.

use crate::backend::Backend;
use crate::circuits::Circuit;
use crate::core::{
    DEFAULT_MEASUREMENT_KEY, OperandRole, QpuError, QpuResult, QubitId, QubitMask, QubitRegister,
};
use crate::operations::Operation;
use crate::simulation::{Counts, Simulator};
use tracing::{debug, trace};

/// Builds a circuit over a register addressed by [`QubitMask`]s and hands it
/// to a [`Backend`] for execution.
///
/// ```
/// use qpu::{Qpu, QubitMask};
///
/// let mut qpu = Qpu::new();
/// qpu.reset(2).unwrap();
/// qpu.x(0x1).unwrap();
/// qpu.exchange(0x1, 0x2).unwrap();
/// qpu.measure(QubitMask::All).unwrap();
/// let result = qpu.run().unwrap();
/// assert_eq!(result.measurement("result"), Some(&[0u8, 1][..]));
/// ```
pub struct Qpu<B: Backend = Simulator> {
    backend: B,
    register: QubitRegister,
    circuit: Circuit,
}

impl Qpu<Simulator> {
    /// A builder backed by the bundled statevector simulator.
    pub fn new() -> Self {
        Self::with_backend(Simulator::new())
    }

    /// Executes the circuit `shots` times and histograms every measurement key.
    pub fn sample(&self, shots: usize) -> QpuResult<Counts> {
        self.backend.sample(&self.circuit, &self.register, shots)
    }
}

impl Default for Qpu<Simulator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> Qpu<B> {
    /// A builder with an empty register, executing on `backend`.
    pub fn with_backend(backend: B) -> Self {
        Self { backend, register: QubitRegister::default(), circuit: Circuit::new() }
    }

    /// Starts a new session on `num_qubits` freshly allocated qubits with an
    /// empty circuit.
    pub fn reset(&mut self, num_qubits: usize) -> QpuResult<()> {
        self.register = self.backend.allocate(num_qubits)?;
        self.circuit = Circuit::new();
        debug!(qubits = num_qubits, backend = self.backend.name(), "register reset");
        Ok(())
    }

    /// The current register.
    pub fn register(&self) -> &QubitRegister {
        &self.register
    }

    /// The circuit accumulated so far.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// The executing backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Qubits selected by `mask`, in ascending bit order.
    pub fn resolve(&self, mask: impl Into<QubitMask>) -> QpuResult<Vec<QubitId>> {
        mask.into().resolve(&self.register)
    }

    /// Hadamard on every selected qubit.
    pub fn had(&mut self, mask: impl Into<QubitMask>) -> QpuResult<()> {
        let ops = self.each(mask.into(), |target| Operation::Hadamard { target })?;
        self.append(ops)
    }

    /// Pauli-X on every selected qubit.
    pub fn x(&mut self, mask: impl Into<QubitMask>) -> QpuResult<()> {
        let ops = self.each(mask.into(), |target| Operation::PauliX { target })?;
        self.append(ops)
    }

    /// Square root of NOT on every selected qubit; applied twice it acts as X.
    pub fn root_not(&mut self, mask: impl Into<QubitMask>) -> QpuResult<()> {
        let ops = self.each(mask.into(), |target| Operation::SqrtX { target })?;
        self.append(ops)
    }

    /// Controlled-NOT; each mask must select exactly one qubit.
    pub fn cnot(&mut self, target: impl Into<QubitMask>, control: impl Into<QubitMask>) -> QpuResult<()> {
        let op = self.cnot_op(target.into(), control.into())?;
        self.append(vec![op])
    }

    /// Doubly-controlled NOT; `control` must select exactly two qubits and
    /// `target` exactly one.
    pub fn ccnot(&mut self, target: impl Into<QubitMask>, control: impl Into<QubitMask>) -> QpuResult<()> {
        let op = self.ccnot_op(target.into(), control.into())?;
        self.append(vec![op])
    }

    /// Z rotation by `degrees` on every selected qubit.
    pub fn phase(&mut self, degrees: f64, target: impl Into<QubitMask>) -> QpuResult<()> {
        let ops = self.rotation_ops(degrees, target.into())?;
        self.append(ops)
    }

    /// Phase rotation of `degrees` on `target`, conditioned on `control`.
    ///
    /// A `control` selecting nothing makes this a plain [`phase`](Self::phase).
    /// Otherwise both masks must select one qubit each, and the result matches
    /// `diag(1, 1, 1, e^{iθ})` up to a global phase.
    pub fn controlled_phase(
        &mut self,
        degrees: f64,
        target: impl Into<QubitMask>,
        control: impl Into<QubitMask>,
    ) -> QpuResult<()> {
        let (target, control) = (target.into(), control.into());
        let ops = if control.is_empty() {
            self.rotation_ops(degrees, target)?
        } else {
            let half = degrees / 2.0;
            let cnot = self.cnot_op(target, control)?;
            let mut ops = self.rotation_ops(half, target)?;
            ops.push(cnot.clone());
            ops.extend(self.rotation_ops(-half, target)?);
            ops.push(cnot);
            ops.extend(self.rotation_ops(half, control)?);
            ops
        };
        self.append(ops)
    }

    /// Swaps the states of the qubits selected by `a` and `b`.
    pub fn exchange(&mut self, a: impl Into<QubitMask>, b: impl Into<QubitMask>) -> QpuResult<()> {
        self.controlled_exchange(a, b, QubitMask::NONE)
    }

    /// Swaps `a` and `b` iff `control` is |1⟩ (Fredkin).
    ///
    /// The middle gate is a CCNOT on `b` controlled by `a | control`, so
    /// `control` must select one qubit distinct from `a` and `b`: sharing the
    /// qubit of `b` fails with [`QpuError::DuplicateQubit`], while sharing the
    /// qubit of `a` leaves a single control and fails with
    /// [`QpuError::Cardinality`]. A `control` selecting nothing makes this a
    /// plain [`exchange`](Self::exchange).
    pub fn controlled_exchange(
        &mut self,
        a: impl Into<QubitMask>,
        b: impl Into<QubitMask>,
        control: impl Into<QubitMask>,
    ) -> QpuResult<()> {
        let (a, b, control) = (a.into(), b.into(), control.into());
        let outer = self.cnot_op(a, b)?;
        let middle = if control.is_empty() {
            self.cnot_op(b, a)?
        } else {
            self.ccnot_op(b, a | control)?
        };
        self.append(vec![outer.clone(), middle, outer])
    }

    /// Measures every selected qubit under the default key `"result"`.
    pub fn measure(&mut self, mask: impl Into<QubitMask>) -> QpuResult<()> {
        self.measure_keyed(mask, DEFAULT_MEASUREMENT_KEY)
    }

    /// Measures every selected qubit, recording the bits under `key`.
    pub fn measure_keyed(&mut self, mask: impl Into<QubitMask>, key: &str) -> QpuResult<()> {
        let targets = self.resolve(mask)?;
        if targets.is_empty() {
            return Err(QpuError::EmptySelection { gate: "measure", role: OperandRole::Target, expected: 1 });
        }
        self.append(vec![Operation::Measure { targets, key: key.to_string() }])
    }

    /// Text diagram of the circuit.
    pub fn draw(&self) -> String {
        self.circuit.to_string()
    }

    /// Executes the circuit on the backend and returns its result unchanged.
    pub fn run(&self) -> QpuResult<B::Output> {
        self.backend.execute(&self.circuit, &self.register)
    }

    fn each(&self, mask: QubitMask, gate: impl Fn(QubitId) -> Operation) -> QpuResult<Vec<Operation>> {
        Ok(self.resolve(mask)?.into_iter().map(gate).collect())
    }

    fn rotation_ops(&self, degrees: f64, mask: QubitMask) -> QpuResult<Vec<Operation>> {
        let theta = degrees.to_radians();
        self.each(mask, |target| Operation::Rz { target, theta })
    }

    fn cnot_op(&self, target: QubitMask, control: QubitMask) -> QpuResult<Operation> {
        let [target] = self.exactly::<1>("CNOT", OperandRole::Target, target)?;
        let [control] = self.exactly::<1>("CNOT", OperandRole::Control, control)?;
        Ok(Operation::Cnot { control, target })
    }

    fn ccnot_op(&self, target: QubitMask, control: QubitMask) -> QpuResult<Operation> {
        let [target] = self.exactly::<1>("CCNOT", OperandRole::Target, target)?;
        let controls = self.exactly::<2>("CCNOT", OperandRole::Control, control)?;
        Ok(Operation::Ccnot { controls, target })
    }

    /// Resolves `mask` to exactly `N` qubits.
    fn exactly<const N: usize>(
        &self,
        gate: &'static str,
        role: OperandRole,
        mask: QubitMask,
    ) -> QpuResult<[QubitId; N]> {
        let qubits = self.resolve(mask)?;
        let got = qubits.len();
        if got == 0 {
            return Err(QpuError::EmptySelection { gate, role, expected: N });
        }
        qubits.try_into().map_err(|_| QpuError::Cardinality { gate, role, expected: N, got })
    }

    fn append(&mut self, ops: Vec<Operation>) -> QpuResult<()> {
        for op in &ops {
            trace!(gate = op.name(), qubits = ?op.involved_qubits(), "append");
        }
        self.circuit.add_operations(ops)
    }
}

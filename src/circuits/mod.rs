// src/circuits/mod.rs

//! Defines structures for representing and building ordered sequences of
//! operations (`qpu::operations::Operation`).
//!
//! A [`Circuit`] is append-only: operations are validated on the way in and
//! never reordered or removed afterwards.

use crate::core::{QpuResult, QubitId};
use crate::operations::Operation;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Represents an ordered sequence of Operations applied to a set of qubits.
///
/// Analogy: Similar to `cirq.Circuit` or `qiskit.QuantumCircuit`.
#[derive(Clone, PartialEq, Default)]
pub struct Circuit {
    /// The unique set of qubits involved across all operations in this circuit.
    qubits: BTreeSet<QubitId>,

    /// The ordered sequence of operations defining the circuit's logic.
    operations: Vec<Operation>,
}

impl Circuit {
    /// Creates a new, empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `op` and appends it to the end of the circuit.
    ///
    /// # Errors
    /// Returns the validation error from [`Operation::validate`]; the circuit
    /// is left untouched in that case.
    pub fn add_operation(&mut self, op: Operation) -> QpuResult<()> {
        op.validate()?;
        self.push(op);
        Ok(())
    }

    /// Appends several operations, all or nothing.
    ///
    /// Every operation is validated before the first one is appended.
    pub fn add_operations<I>(&mut self, ops: I) -> QpuResult<()>
    where
        I: IntoIterator<Item = Operation>,
    {
        let ops: Vec<Operation> = ops.into_iter().collect();
        for op in &ops {
            op.validate()?;
        }
        for op in ops {
            self.push(op);
        }
        Ok(())
    }

    fn push(&mut self, op: Operation) {
        self.qubits.extend(op.involved_qubits());
        self.operations.push(op);
    }

    /// The qubits referenced by at least one operation, in register order.
    pub fn qubits(&self) -> &BTreeSet<QubitId> {
        &self.qubits
    }

    /// Returns a slice containing the ordered sequence of operations in this circuit.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Returns the total number of operations defined in the circuit.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the circuit contains no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// A helper struct for constructing `Circuit` instances by method chaining.
///
/// Operations are collected as given and validated together by [`build`](Self::build).
///
/// ```
/// use qpu::{CircuitBuilder, Operation, QubitId};
///
/// let circuit = CircuitBuilder::new()
///     .add_op(Operation::Hadamard { target: QubitId(0) })
///     .add_op(Operation::Cnot { control: QubitId(0), target: QubitId(1) })
///     .build()
///     .unwrap();
/// assert_eq!(circuit.len(), 2);
/// ```
#[derive(Default)]
pub struct CircuitBuilder {
    operations: Vec<Operation>,
}

impl CircuitBuilder {
    /// Creates a new, empty CircuitBuilder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single operation to the circuit being built.
    pub fn add_op(mut self, op: Operation) -> Self {
        self.operations.push(op);
        self
    }

    /// Adds multiple operations from an iterator to the circuit being built.
    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        self.operations.extend(ops);
        self
    }

    /// Validates the collected operations and returns the built `Circuit`.
    pub fn build(self) -> QpuResult<Circuit> {
        let mut circuit = Circuit::new();
        circuit.add_operations(self.operations)?;
        Ok(circuit)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operations.is_empty() {
            return writeln!(f, "qpu::Circuit[0 operations on 0 qubits]");
        }

        let ops = &self.operations;
        let num_ops = ops.len();
        let rows: Vec<QubitId> = self.qubits.iter().copied().collect();
        let num_rows = rows.len();
        let row_of: HashMap<QubitId, usize> = rows.iter().enumerate().map(|(i, q)| (*q, i)).collect();

        let labels: Vec<String> = rows.iter().map(|q| format!("{}: ", q)).collect();
        let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        const H_WIRE: char = '─';
        const V_WIRE: char = '│';

        // cells[row][t] holds the gate symbol, if any; v_connect[row][t] marks a
        // vertical wire between `row` and `row + 1`.
        let mut cells: Vec<Vec<Option<String>>> = vec![vec![None; num_ops]; num_rows];
        let mut v_connect: Vec<Vec<bool>> = vec![vec![false; num_ops]; num_rows];

        for (t, op) in ops.iter().enumerate() {
            let involved = op.involved_qubits();
            let mut used_rows = Vec::with_capacity(involved.len());
            for (q, symbol) in involved.iter().zip(op.symbols()) {
                if let Some(r) = row_of.get(q) {
                    cells[*r][t] = Some(symbol);
                    used_rows.push(*r);
                }
            }
            let is_multi_qubit_gate = !matches!(op, Operation::Measure { .. });
            if let (true, Some(r_min), Some(r_max)) =
                (is_multi_qubit_gate, used_rows.iter().min(), used_rows.iter().max())
            {
                for row in v_connect.iter_mut().take(*r_max).skip(*r_min) {
                    row[t] = true;
                }
            }
        }

        // Each column is as wide as its widest symbol plus a wire on each side.
        let widths: Vec<usize> = (0..num_ops)
            .map(|t| {
                cells
                    .iter()
                    .filter_map(|row| row[t].as_ref().map(|s| s.chars().count()))
                    .max()
                    .unwrap_or(1)
                    + 4
            })
            .collect();

        writeln!(f, "qpu::Circuit[{} operations on {} qubits]", num_ops, num_rows)?;
        for r in 0..num_rows {
            write!(f, "{:<width$}", labels[r], width = label_width)?;
            for t in 0..num_ops {
                let w = widths[t];
                let cell = match &cells[r][t] {
                    Some(symbol) => {
                        let total = w - symbol.chars().count();
                        let pre = total / 2;
                        format!(
                            "{}{}{}",
                            H_WIRE.to_string().repeat(pre),
                            symbol,
                            H_WIRE.to_string().repeat(total - pre)
                        )
                    }
                    None => H_WIRE.to_string().repeat(w),
                };
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;

            if r < num_rows - 1 {
                write!(f, "{}", " ".repeat(label_width))?;
                for t in 0..num_ops {
                    let w = widths[t];
                    let pre = (w - 1) / 2;
                    let connector = if v_connect[r][t] { V_WIRE } else { ' ' };
                    write!(f, "{}{}{}", " ".repeat(pre), connector, " ".repeat(w - 1 - pre))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

// tests/simulation_tests.rs

use qpu::{
    Backend, Circuit, CircuitBuilder, Operation, QpuResult, QubitId, QubitRegister,
    SimulationResult, Simulator,
};

use std::f64::consts::PI;

fn qid(id: usize) -> QubitId {
    QubitId(id)
}

fn measure_all(n: usize) -> Operation {
    Operation::Measure { targets: (0..n).map(qid).collect(), key: "m".to_string() }
}

fn run(circuit: &Circuit, n: usize) -> QpuResult<SimulationResult> {
    Simulator::with_seed(5).execute(circuit, &QubitRegister::new(n)?)
}

fn check_bits(result: &SimulationResult, expected: &[u8]) {
    assert_eq!(result.measurement("m"), Some(expected), "full result:\n{}", result);
}

#[test]
fn test_empty_circuit() -> QpuResult<()> {
    let result = run(&Circuit::new(), 1)?;
    assert!(result.measurements().is_empty(), "Empty circuit should yield no measurements");
    Ok(())
}

#[test]
fn test_initial_state_measurement() -> QpuResult<()> {
    let circuit = CircuitBuilder::new().add_op(measure_all(2)).build()?;
    check_bits(&run(&circuit, 2)?, &[0, 0]);
    Ok(())
}

#[test]
fn test_pauli_x_flips() -> QpuResult<()> {
    let circuit = CircuitBuilder::new()
        .add_op(Operation::PauliX { target: qid(1) })
        .add_op(measure_all(2))
        .build()?;
    check_bits(&run(&circuit, 2)?, &[0, 1]);
    Ok(())
}

#[test]
fn test_rz_does_not_change_outcome() -> QpuResult<()> {
    let circuit = CircuitBuilder::new()
        .add_op(Operation::Rz { target: qid(0), theta: PI / 2.0 })
        .add_op(measure_all(1))
        .build()?;
    check_bits(&run(&circuit, 1)?, &[0]);
    Ok(())
}

#[test]
fn test_cnot_control_zero() -> QpuResult<()> {
    let circuit = CircuitBuilder::new()
        .add_op(Operation::Cnot { control: qid(0), target: qid(1) })
        .add_op(measure_all(2))
        .build()?;
    check_bits(&run(&circuit, 2)?, &[0, 0]);
    Ok(())
}

#[test]
fn test_cnot_control_one() -> QpuResult<()> {
    let circuit = CircuitBuilder::new()
        .add_op(Operation::PauliX { target: qid(0) })
        .add_op(Operation::Cnot { control: qid(0), target: qid(1) })
        .add_op(measure_all(2))
        .build()?;
    check_bits(&run(&circuit, 2)?, &[1, 1]);
    Ok(())
}

#[test]
fn test_hadamard_interference() -> QpuResult<()> {
    // H Rz(pi) H sends |0> to |1> (up to phase).
    let circuit = CircuitBuilder::new()
        .add_op(Operation::Hadamard { target: qid(0) })
        .add_op(Operation::Rz { target: qid(0), theta: PI })
        .add_op(Operation::Hadamard { target: qid(0) })
        .add_op(measure_all(1))
        .build()?;
    check_bits(&run(&circuit, 1)?, &[1]);
    Ok(())
}

#[test]
fn test_bell_pair_correlation() -> QpuResult<()> {
    let circuit = CircuitBuilder::new()
        .add_op(Operation::Hadamard { target: qid(0) })
        .add_op(Operation::Cnot { control: qid(0), target: qid(1) })
        .add_op(measure_all(2))
        .build()?;
    let counts = Simulator::with_seed(9).sample(&circuit, &QubitRegister::new(2)?, 2000)?;
    assert_eq!(counts.count("m", 0b01) + counts.count("m", 0b10), 0, "{counts}");
    let zeros = counts.frequency("m", 0b00);
    assert!((zeros - 0.5).abs() < 0.05, "|00> drawn with frequency {zeros}");
    Ok(())
}

#[test]
fn test_measurement_collapses_for_later_gates() -> QpuResult<()> {
    // After measuring q(0) of a Bell pair, a CNOT copies the collapsed value
    // onto q(2); all three bits must agree.
    let circuit = CircuitBuilder::new()
        .add_op(Operation::Hadamard { target: qid(0) })
        .add_op(Operation::Cnot { control: qid(0), target: qid(1) })
        .add_op(Operation::Measure { targets: vec![qid(0)], key: "first".to_string() })
        .add_op(Operation::Cnot { control: qid(1), target: qid(2) })
        .add_op(measure_all(3))
        .build()?;
    let sim = Simulator::new();
    let register = QubitRegister::new(3)?;
    for _ in 0..20 {
        let result = sim.execute(&circuit, &register)?;
        let bits = result.measurement("m").expect("measured");
        assert!(bits == [0, 0, 0] || bits == [1, 1, 1], "bits {bits:?}");
        assert_eq!(result.measurement("first"), Some(&bits[..1]));
    }
    Ok(())
}

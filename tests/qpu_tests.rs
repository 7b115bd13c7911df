// tests/qpu_tests.rs

use num_complex::Complex;
use qpu::{
    Backend, Circuit, DEFAULT_MEASUREMENT_KEY, Operation, Qpu, QpuError, QpuResult, QubitMask,
    QubitRegister, Simulator, StateVector, equal_up_to_global_phase,
};
use std::f64::consts::FRAC_1_SQRT_2;

const PHASE_TOLERANCE: f64 = 1e-6;

fn seeded(n: usize, seed: u64) -> QpuResult<Qpu> {
    let mut qpu = Qpu::with_backend(Simulator::with_seed(seed));
    qpu.reset(n)?;
    Ok(qpu)
}

fn state(amps: &[Complex<f64>]) -> StateVector {
    StateVector::from_amplitudes(amps.to_vec()).expect("power-of-two length")
}

#[test]
fn swap_moves_excitation() -> QpuResult<()> {
    let mut qpu = seeded(2, 0)?;
    qpu.x(0x1)?;
    qpu.exchange(0x1, 0x2)?;
    qpu.measure(QubitMask::All)?;
    let result = qpu.run()?;
    // Bits are listed in register order: q(0), q(1).
    assert_eq!(result.measurement(DEFAULT_MEASUREMENT_KEY), Some(&[0u8, 1][..]));
    Ok(())
}

#[test]
fn double_swap_is_identity() -> QpuResult<()> {
    let mut prepared = seeded(3, 0)?;
    prepared.had(0x1)?;
    prepared.phase(30.0, 0x1)?;
    prepared.root_not(0x2)?;
    prepared.had(0x4)?;
    prepared.cnot(0x4, 0x1)?;
    let before = prepared.run()?;

    prepared.exchange(0x1, 0x2)?;
    prepared.exchange(0x1, 0x2)?;
    assert_eq!(prepared.circuit().len(), 5 + 6);
    let after = prepared.run()?;

    for (a, b) in after.final_state().amplitudes().iter().zip(before.final_state().amplitudes()) {
        assert!((a - b).norm() < 1e-9, "amplitude changed: {a} vs {b}");
    }
    Ok(())
}

#[test]
fn controlled_phase_acts_only_when_control_is_set() -> QpuResult<()> {
    let h = Complex::new(FRAC_1_SQRT_2, 0.0);
    let zero = Complex::new(0.0, 0.0);
    for degrees in [0.0, 30.0, 90.0, 135.0, 180.0, -60.0, 270.0] {
        let theta = f64::to_radians(degrees);

        // Control q(1) = |1>, target q(0) in |+>.
        let mut on = seeded(2, 0)?;
        on.x(0x2)?;
        on.had(0x1)?;
        on.controlled_phase(degrees, 0x1, 0x2)?;
        let expected_on = state(&[zero, h, zero, h * Complex::from_polar(1.0, theta)]);
        assert!(
            equal_up_to_global_phase(on.run()?.final_state(), &expected_on, PHASE_TOLERANCE),
            "control |1>, {degrees} degrees"
        );

        // Control q(1) = |0>: the target keeps its phase.
        let mut off = seeded(2, 0)?;
        off.had(0x1)?;
        off.controlled_phase(degrees, 0x1, 0x2)?;
        let expected_off = state(&[h, zero, h, zero]);
        assert!(
            equal_up_to_global_phase(off.run()?.final_state(), &expected_off, PHASE_TOLERANCE),
            "control |0>, {degrees} degrees"
        );
    }
    Ok(())
}

#[test]
fn controlled_phase_is_symmetric_in_its_qubits() -> QpuResult<()> {
    // controlled_phase(90, 0x1, 0x2) against the hand-written expansion with
    // target and control exchanged.
    let direct = {
        let mut qpu = seeded(2, 11)?;
        qpu.had(QubitMask::All)?;
        qpu.controlled_phase(90.0, 0x1, 0x2)?;
        qpu.had(QubitMask::All)?;
        qpu
    };
    let manual = {
        let mut qpu = seeded(2, 12)?;
        qpu.had(QubitMask::All)?;
        qpu.phase(45.0, 0x2)?;
        qpu.cnot(0x2, 0x1)?;
        qpu.phase(-45.0, 0x2)?;
        qpu.cnot(0x2, 0x1)?;
        qpu.phase(45.0, 0x1)?;
        qpu.had(QubitMask::All)?;
        qpu
    };
    assert!(equal_up_to_global_phase(
        direct.run()?.final_state(),
        manual.run()?.final_state(),
        PHASE_TOLERANCE
    ));

    let mut direct = direct;
    let mut manual = manual;
    direct.measure(QubitMask::All)?;
    manual.measure(QubitMask::All)?;
    let a = direct.sample(4000)?;
    let b = manual.sample(4000)?;
    for value in 0..4 {
        let (fa, fb) = (a.frequency("result", value), b.frequency("result", value));
        assert!((fa - fb).abs() < 0.05, "outcome {value}: {fa} vs {fb}");
    }
    Ok(())
}

#[test]
fn controlled_exchange_respects_control() -> QpuResult<()> {
    for control_set in [false, true] {
        let mut qpu = seeded(3, 0)?;
        qpu.x(0x1)?;
        if control_set {
            qpu.x(0x4)?;
        }
        qpu.controlled_exchange(0x1, 0x2, 0x4)?;
        qpu.measure_keyed(0x3, "pair")?;
        let expected: &[u8] = if control_set { &[0, 1] } else { &[1, 0] };
        assert_eq!(qpu.run()?.measurement("pair"), Some(expected));
    }
    Ok(())
}

#[test]
fn root_not_twice_flips() -> QpuResult<()> {
    let mut qpu = seeded(1, 0)?;
    qpu.root_not(0x1)?;
    qpu.root_not(0x1)?;
    qpu.measure(0x1)?;
    for _ in 0..10 {
        assert_eq!(qpu.run()?.measurement("result"), Some(&[1u8][..]));
    }
    Ok(())
}

#[test]
fn ccnot_flips_only_with_both_controls() -> QpuResult<()> {
    let mut qpu = seeded(3, 0)?;
    qpu.x(0x3)?;
    qpu.ccnot(0x4, 0x3)?;
    qpu.measure(QubitMask::All)?;
    assert_eq!(qpu.run()?.measurement_value("result"), Some(0b111));
    Ok(())
}

#[test]
fn multi_bit_target_is_rejected_without_append() -> QpuResult<()> {
    let mut qpu = seeded(2, 0)?;
    qpu.had(QubitMask::All)?;
    let before = qpu.circuit().len();
    let err = qpu.cnot(0x3, 0x1).unwrap_err();
    assert!(err.is_cardinality(), "unexpected error {err}");
    assert_eq!(qpu.circuit().len(), before);
    Ok(())
}

#[test]
fn failing_calls_leave_circuit_unchanged() -> QpuResult<()> {
    let mut qpu = seeded(3, 0)?;
    qpu.had(QubitMask::All)?;
    let snapshot: Circuit = qpu.circuit().clone();

    assert!(qpu.had(0x8).unwrap_err().is_addressing());
    assert!(qpu.controlled_phase(45.0, 0x1, 0x10).unwrap_err().is_addressing());
    assert!(qpu.controlled_phase(45.0, 0x3, 0x4).unwrap_err().is_cardinality());
    assert!(qpu.controlled_exchange(0x1, 0x2, 0x8).unwrap_err().is_addressing());
    assert!(qpu.controlled_exchange(0x1, 0x2, 0x1).unwrap_err().is_cardinality());
    assert!(qpu.controlled_exchange(0x1, 0x2, 0x2).unwrap_err().is_collaborator());
    assert!(qpu.ccnot(0x4, 0x1).unwrap_err().is_cardinality());
    assert!(qpu.cnot(0x1, 0x1).unwrap_err().is_collaborator());
    assert!(qpu.measure(0).unwrap_err().is_addressing());
    assert!(qpu.phase(f64::INFINITY, 0x1).unwrap_err().is_collaborator());

    assert_eq!(qpu.circuit(), &snapshot);
    Ok(())
}

#[test]
fn default_measurement_key_is_shared() -> QpuResult<()> {
    let mut qpu = seeded(2, 0)?;
    qpu.measure(0x1)?;
    qpu.measure(0x2)?;
    let keys: Vec<&str> = qpu
        .circuit()
        .operations()
        .iter()
        .filter_map(|op| match op {
            Operation::Measure { key, .. } => Some(key.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(keys, vec![DEFAULT_MEASUREMENT_KEY, DEFAULT_MEASUREMENT_KEY]);
    assert_eq!(DEFAULT_MEASUREMENT_KEY, "result");

    // The later record wins.
    qpu.x(0x2)?;
    qpu.measure(0x2)?;
    assert_eq!(qpu.run()?.measurement("result"), Some(&[1u8][..]));
    Ok(())
}

#[test]
fn draw_shows_decomposition() -> QpuResult<()> {
    let mut qpu = seeded(2, 0)?;
    qpu.controlled_phase(90.0, 0x1, 0x2)?;
    let text = qpu.draw();
    assert!(text.starts_with("qpu::Circuit[5 operations on 2 qubits]"));
    assert!(text.contains("Rz(0.25π)"));
    assert!(text.contains("Rz(-0.25π)"));
    assert_eq!(text.matches('@').count(), 2);
    Ok(())
}

/// Backend that only counts what it is asked to execute.
struct OperationCounter;

impl Backend for OperationCounter {
    type Output = (usize, usize);

    fn name(&self) -> &str {
        "counter"
    }

    fn execute(&self, circuit: &Circuit, register: &QubitRegister) -> QpuResult<(usize, usize)> {
        Ok((register.len(), circuit.len()))
    }
}

#[test]
fn builder_runs_on_any_backend() -> QpuResult<()> {
    let mut qpu = Qpu::with_backend(OperationCounter);
    qpu.reset(3)?;
    qpu.controlled_exchange(0x1, 0x2, 0x4)?;
    qpu.exchange(0x2, 0x4)?;
    assert_eq!(qpu.run()?, (3, 6));
    Ok(())
}

#[test]
fn oversized_register_is_an_error() {
    let mut qpu = Qpu::new();
    assert!(matches!(qpu.reset(65), Err(QpuError::RegisterTooLarge { requested: 65, max: 64 })));

    // The mask can address it, but the default simulator refuses to run it.
    qpu.reset(21).unwrap();
    assert!(qpu.run().unwrap_err().is_collaborator());
}

#[test]
fn full_width_register_fails_cleanly_on_a_raised_limit() {
    let mut qpu = Qpu::with_backend(Simulator::with_max_qubits(64));
    qpu.reset(64).unwrap();
    qpu.x(QubitMask::All).unwrap();
    assert!(qpu.run().unwrap_err().is_collaborator());
    assert!(qpu.sample(10).unwrap_err().is_collaborator());
}

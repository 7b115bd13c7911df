// demos/custom_cphase.rs

//! Builds a conditional phase twice: once by hand from two CNOTs and three
//! phase rotations, once with `controlled_phase`. Together they apply a
//! conditional phase of 180 degrees.
//!
//! Run with `RUST_LOG=qpu=trace cargo run --example custom_cphase` to see
//! every appended operation.

use qpu::{Qpu, QpuError, QubitMask};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), QpuError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut qpu = Qpu::new();
    qpu.reset(2)?;
    qpu.had(QubitMask::All)?;

    let theta = 90.0;
    // Using two CNOTs and three phase rotations...
    qpu.phase(theta / 2.0, 0x2)?;
    qpu.cnot(0x2, 0x1)?;
    qpu.phase(-theta / 2.0, 0x2)?;
    qpu.cnot(0x2, 0x1)?;
    qpu.phase(theta / 2.0, 0x1)?;

    // ...builds the same operation as the two-qubit controlled phase.
    qpu.controlled_phase(theta, 0x1, 0x2)?;

    println!("Circuit:\n{}", qpu.draw());
    let result = qpu.run()?;
    println!("{}", result);

    qpu.measure(QubitMask::All)?;
    println!("{}", qpu.sample(1000)?);
    Ok(())
}

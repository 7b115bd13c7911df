// src/simulation/mod.rs

//! The bundled statevector [`Backend`].
//!
//! [`Simulator`] is the entry point; the internal
//! `SimulationEngine` holds and evolves the state of one execution.

mod results;
pub(crate) mod engine;

pub use results::{Counts, SimulationResult};

use crate::backend::Backend;
use crate::circuits::Circuit;
use crate::core::constants::{DEFAULT_MAX_QUBITS, SIMULATOR_QUBIT_CEILING};
use crate::core::{QpuError, QpuResult, QubitRegister};
use crate::operations::Operation;
use crate::validation::check_normalization;
use engine::SimulationEngine;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument, trace, warn};

/// Settings for a [`Simulator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatorConfig {
    /// Seed for measurement sampling; `None` draws a fresh seed from the OS
    /// for every execution.
    pub seed: Option<u64>,
    /// Largest register the simulator accepts; clamped to
    /// [`SIMULATOR_QUBIT_CEILING`] when the simulator is built.
    pub max_qubits: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self { seed: None, max_qubits: DEFAULT_MAX_QUBITS }
    }
}

/// Statevector simulator.
///
/// Supports registers up to `max_qubits` (20 by default; memory grows as 2^n).
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulatorConfig,
}

impl Simulator {
    /// Creates a new Simulator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a simulator from explicit settings.
    pub fn with_config(mut config: SimulatorConfig) -> Self {
        if config.max_qubits > SIMULATOR_QUBIT_CEILING {
            warn!(
                requested = config.max_qubits,
                ceiling = SIMULATOR_QUBIT_CEILING,
                "qubit limit clamped"
            );
            config.max_qubits = SIMULATOR_QUBIT_CEILING;
        }
        Self { config }
    }

    /// Creates a simulator whose measurements are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_config(SimulatorConfig { seed: Some(seed), ..SimulatorConfig::default() })
    }

    /// Creates a simulator with a custom qubit limit.
    pub fn with_max_qubits(max_qubits: usize) -> Self {
        Self::with_config(SimulatorConfig { max_qubits, ..SimulatorConfig::default() })
    }

    /// The active settings.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Executes `circuit` `shots` times and histograms every measurement key.
    ///
    /// All shots share one random stream, so a seeded simulator reproduces
    /// the same histogram.
    #[instrument(skip(self, circuit, register), fields(qubits = register.len(), ops = circuit.len()))]
    pub fn sample(&self, circuit: &Circuit, register: &QubitRegister, shots: usize) -> QpuResult<Counts> {
        self.check_fits(circuit, register)?;
        let mut rng = self.rng();
        let mut counts = Counts::new();
        for shot in 0..shots {
            let result = self.run_once(circuit, register, &mut rng)?;
            counts.record(&result);
            if shot > 0 && shot % 1000 == 0 {
                debug!("Completed {} shots", shot);
            }
        }
        debug!("Sampling completed: {} shots", shots);
        Ok(counts)
    }

    fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Rejects registers over the limit and circuits touching foreign qubits.
    fn check_fits(&self, circuit: &Circuit, register: &QubitRegister) -> QpuResult<()> {
        if register.len() > self.config.max_qubits {
            return Err(QpuError::Engine {
                message: format!(
                    "register of {} qubits exceeds the simulator limit of {}",
                    register.len(),
                    self.config.max_qubits
                ),
            });
        }
        if let Some(qubit) = circuit.qubits().iter().find(|q| register.position(**q).is_none()) {
            return Err(QpuError::UnknownQubit { qubit: *qubit });
        }
        Ok(())
    }

    fn run_once<R: Rng>(
        &self,
        circuit: &Circuit,
        register: &QubitRegister,
        rng: &mut R,
    ) -> QpuResult<SimulationResult> {
        let mut engine = SimulationEngine::init(register)?;
        let mut result = SimulationResult::new(register.clone(), engine.state().clone());

        for op in circuit.operations() {
            match op {
                Operation::Measure { targets, key } => {
                    let bits = engine.measure(targets, rng)?;
                    if result.record_measurement(key, bits).is_some() {
                        trace!(key = %key, "measurement key reused; keeping latest bits");
                    }
                }
                _ => engine.apply_operation(op)?,
            }
        }

        let final_state = engine.into_state();
        check_normalization(&final_state, None)?;
        result.set_final_state(final_state);
        Ok(result)
    }
}

impl Backend for Simulator {
    type Output = SimulationResult;

    fn name(&self) -> &str {
        "statevector"
    }

    #[instrument(skip(self, circuit, register), fields(qubits = register.len(), ops = circuit.len()))]
    fn execute(&self, circuit: &Circuit, register: &QubitRegister) -> QpuResult<SimulationResult> {
        self.check_fits(circuit, register)?;
        debug!("Starting simulation: {} qubits, {} operations", register.len(), circuit.len());
        let result = self.run_once(circuit, register, &mut self.rng())?;
        debug!("Simulation completed with {} measurement keys", result.measurements().len());
        Ok(result)
    }
}

// src/simulation/results.rs
use crate::core::{QubitRegister, StateVector};
use std::collections::BTreeMap;
use std::fmt;

/// Outcome of one simulated execution.
///
/// Holds the measured bits per measurement key and the final state vector.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    /// Measured bits per key, in the order the measurement listed its qubits.
    measurements: BTreeMap<String, Vec<u8>>,
    /// State after the last operation, over the whole register.
    final_state: StateVector,
    register: QubitRegister,
}

impl SimulationResult {
    pub(crate) fn new(register: QubitRegister, final_state: StateVector) -> Self {
        Self { measurements: BTreeMap::new(), final_state, register }
    }

    /// Records the bits of a measurement; a repeated key replaces the earlier record.
    pub(crate) fn record_measurement(&mut self, key: &str, bits: Vec<u8>) -> Option<Vec<u8>> {
        self.measurements.insert(key.to_string(), bits)
    }

    pub(crate) fn set_final_state(&mut self, state: StateVector) {
        self.final_state = state;
    }

    /// Bits recorded under `key`, if a measurement used it.
    pub fn measurement(&self, key: &str) -> Option<&[u8]> {
        self.measurements.get(key).map(Vec::as_slice)
    }

    /// Bits recorded under `key` read as an integer, first bit most significant.
    pub fn measurement_value(&self, key: &str) -> Option<u64> {
        self.measurement(key).map(bits_to_value)
    }

    /// All recorded measurements, ordered by key.
    pub fn measurements(&self) -> &BTreeMap<String, Vec<u8>> {
        &self.measurements
    }

    /// The state after the whole circuit ran.
    pub fn final_state(&self) -> &StateVector {
        &self.final_state
    }

    /// The register the circuit ran on.
    pub fn register(&self) -> &QubitRegister {
        &self.register
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "measurements:")?;
        if self.measurements.is_empty() {
            write!(f, " (no measurements)")?;
        }
        for (key, bits) in &self.measurements {
            let text: String = bits.iter().map(|b| if *b == 0 { '0' } else { '1' }).collect();
            write!(f, " {}={}", key, text)?;
        }
        writeln!(f)?;
        writeln!(f, "output vector: {}", self.final_state)
    }
}

/// Measurement histograms accumulated over repeated executions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Counts {
    shots: usize,
    histograms: BTreeMap<String, BTreeMap<u64, usize>>,
}

impl Counts {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds one execution's measurements to the histograms.
    pub(crate) fn record(&mut self, result: &SimulationResult) {
        self.shots += 1;
        for (key, bits) in result.measurements() {
            *self
                .histograms
                .entry(key.clone())
                .or_default()
                .entry(bits_to_value(bits))
                .or_insert(0) += 1;
        }
    }

    /// Number of executions recorded.
    pub fn shots(&self) -> usize {
        self.shots
    }

    /// Histogram of measured values under `key`.
    pub fn histogram(&self, key: &str) -> Option<&BTreeMap<u64, usize>> {
        self.histograms.get(key)
    }

    /// How often `key` read `value`.
    pub fn count(&self, key: &str, value: u64) -> usize {
        self.histogram(key).and_then(|h| h.get(&value)).copied().unwrap_or(0)
    }

    /// Fraction of shots in which `key` read `value`.
    pub fn frequency(&self, key: &str, value: u64) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        self.count(key, value) as f64 / self.shots as f64
    }
}

impl fmt::Display for Counts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} shots", self.shots)?;
        for (key, histogram) in &self.histograms {
            let entries: Vec<String> = histogram.iter().map(|(v, n)| format!("{v}: {n}")).collect();
            writeln!(f, "  {}: {{{}}}", key, entries.join(", "))?;
        }
        Ok(())
    }
}

fn bits_to_value(bits: &[u8]) -> u64 {
    bits.iter().fold(0u64, |acc, b| (acc << 1) | u64::from(*b & 1))
}

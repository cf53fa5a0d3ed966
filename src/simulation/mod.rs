// src/simulation/mod.rs

//! Executes circuits shot by shot and aggregates the outcomes.
//!
//! The [`Executor`] trait is the only seam between circuit definition and
//! execution: one blocking call with a circuit and a shot count, one complete
//! [`Histogram`] back. [`Simulator`] is the built-in ideal state-vector
//! implementation.

mod results;
pub(crate) mod engine;

pub use results::{Histogram, format_outcome, outcome_bit};

use crate::circuits::Circuit;
use crate::core::{TeleportError, TeleportResult};
use crate::operations::Operation;
use crate::validation::validate_state;
use engine::SimulationEngine;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Instant;
use tracing::{debug, instrument, trace};

/// Runs a circuit a given number of times and reports outcome frequencies.
///
/// Implementations must return a histogram whose keys are bit strings of
/// width `circuit.num_clbits()` (ordered as in [`format_outcome`]) and whose
/// counts sum to `shots`. Failures are returned, never papered over with a
/// partial result.
pub trait Executor {
    /// Executes `circuit` for `shots` independent shots.
    fn execute(&self, circuit: &Circuit, shots: u32) -> TeleportResult<Histogram>;
}

/// Ideal (noise-free) state-vector simulator.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    seed: Option<u64>,
}

impl Simulator {
    /// Creates a simulator drawing randomness from the operating system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a simulator whose runs are reproducible for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// The configured seed, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Runs one shot and returns the committed classical bits by `ClbitId`.
    /// Bits no measurement wrote read 0.
    fn run_shot(&self, circuit: &Circuit, rng: &mut StdRng) -> TeleportResult<Vec<bool>> {
        let mut engine = SimulationEngine::init(circuit.num_qubits() as usize)?;
        let mut clbits: Vec<Option<bool>> = vec![None; circuit.num_clbits()];

        for op in circuit.operations() {
            match op {
                Operation::Gate(gate) => engine.apply_gate(gate)?,
                Operation::Measure { qubit, clbit } => {
                    let slot = clbits.get_mut(clbit.index()).ok_or(TeleportError::UnknownClbit { clbit: *clbit })?;
                    if slot.is_some() {
                        return Err(TeleportError::ClbitRewritten { clbit: *clbit });
                    }
                    *slot = Some(engine.measure(*qubit, rng)?);
                }
                Operation::Conditional { condition, gate } => {
                    let bit = clbits
                        .get(condition.clbit.index())
                        .copied()
                        .flatten()
                        .ok_or(TeleportError::UnmeasuredCondition { clbit: condition.clbit })?;
                    if condition.holds(bit) {
                        engine.apply_gate(gate)?;
                    }
                }
                Operation::Barrier { .. } => {}
            }
        }

        validate_state(engine.get_state(), None)?;
        Ok(clbits.into_iter().map(|b| b.unwrap_or(false)).collect())
    }
}

impl Executor for Simulator {
    #[instrument(skip(self, circuit), fields(seed = ?self.seed))]
    fn execute(&self, circuit: &Circuit, shots: u32) -> TeleportResult<Histogram> {
        if shots == 0 {
            return Err(TeleportError::InvalidShotCount { shots: 0 });
        }
        let start = Instant::now();
        debug!(
            "Starting simulation: {} qubits, {} classical bits, {} operations, {} shots",
            circuit.num_qubits(),
            circuit.num_clbits(),
            circuit.len(),
            shots
        );

        let mut rng = self.rng();
        let mut histogram = Histogram::new();
        for shot in 0..shots {
            let bits = self.run_shot(circuit, &mut rng)?;
            histogram.record(format_outcome(&bits));

            if shot > 0 && shot % 1000 == 0 {
                trace!("Completed {} shots", shot);
            }
        }

        debug!("Simulation completed in {:?} with {} distinct outcomes", start.elapsed(), histogram.len());
        Ok(histogram)
    }
}

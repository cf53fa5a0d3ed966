// src/protocol/experiment.rs
use super::{CR_RESULT, teleportation_circuit};
use crate::circuits::Circuit;
use crate::config::TeleportConfig;
use crate::core::TeleportResult;
use crate::simulation::{Executor, Histogram};
use crate::statistics::{SuccessReport, evaluate};
use tracing::{info, instrument, warn};

/// Everything one experiment run produced.
#[derive(Debug, Clone)]
pub struct ExperimentOutcome {
    /// The submitted circuit.
    pub circuit: Circuit,
    /// Outcome counts returned by the executor.
    pub histogram: Histogram,
    /// Success statistics over `histogram`.
    pub report: SuccessReport,
}

/// Builds the teleportation circuit for `config.angle`, executes it once for
/// `config.shots` shots and evaluates the outcome.
///
/// The executor's histogram is checked for mass conservation and key
/// well-formedness before it is trusted. A "failed" classification is
/// returned as data and logged, not raised.
///
/// # Errors
/// Configuration errors before execution, executor failures unchanged, and
/// `MalformedOutcome` / `ShotCountMismatch` for a histogram that breaks the
/// executor contract.
#[instrument(skip_all, fields(angle = config.angle, shots = config.shots))]
pub fn run_experiment<E>(config: &TeleportConfig, executor: &E) -> TeleportResult<ExperimentOutcome>
where
    E: Executor + ?Sized,
{
    config.validate()?;
    let circuit = teleportation_circuit(config.angle)?;

    let histogram = executor.execute(&circuit, config.shots)?;
    histogram.validate(circuit.num_clbits(), u64::from(config.shots))?;

    let report = evaluate(&histogram, CR_RESULT)?;
    if report.is_successful() {
        info!("{}", report);
    } else {
        warn!("Teleportation below threshold: {}", report);
    }

    Ok(ExperimentOutcome { circuit, histogram, report })
}

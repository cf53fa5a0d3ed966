// src/lib.rs

//! `qteleport` - quantum teleportation on an ideal state-vector simulator
//!
//! The library defines the three-qubit teleportation circuit (message
//! preparation, Bell pair, Bell-basis measurement, measurement-conditioned
//! correction and verification), executes it shot by shot and classifies the
//! empirical success rate against a fixed threshold.

pub mod core;
pub mod operations;
pub mod circuits;
pub mod simulation;
pub mod statistics;
pub mod protocol;
pub mod config;
pub mod artifacts;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use core::{ClbitId, QubitId, StateVector, TeleportError, TeleportResult};
pub use operations::{Condition, Gate, Operation};
pub use circuits::{Circuit, CircuitBuilder};
pub use simulation::{Executor, Histogram, Simulator};
pub use statistics::{Classification, SuccessReport, SuccessTally, classify, evaluate};
pub use protocol::{ExperimentOutcome, Teleportation, correction_for, run_experiment, teleportation_circuit};
pub use config::TeleportConfig;
pub use validation::{check_normalization, validate_state};

// Example 1: Teleporting the default message state
// Runs the whole experiment with a seeded simulator and checks that the
// verification bit read 0 in every shot.
/// ```
/// use qteleport::{Classification, Simulator, TeleportConfig, run_experiment};
///
/// # fn main() -> Result<(), qteleport::TeleportError> {
/// let config = TeleportConfig::default().with_shots(500);
/// let outcome = run_experiment(&config, &Simulator::with_seed(7))?;
///
/// println!("Circuit:\n{}", outcome.circuit);
/// println!("{}", outcome.histogram);
/// println!("{}", outcome.report);
///
/// assert_eq!(outcome.histogram.total(), 500);
/// assert_eq!(outcome.report.tally.successes, 500);
/// assert_eq!(outcome.report.classification, Classification::Successful);
/// # Ok(())
/// # }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Guard evaluation inside a shot
// A measured bit drives a conditional X on a second qubit, so both bits always agree.
/// ```
/// use qteleport::{CircuitBuilder, ClbitId, Condition, Executor, Gate, Operation, QubitId, Simulator};
///
/// # fn main() -> Result<(), qteleport::TeleportError> {
/// let (q0, q1) = (QubitId(0), QubitId(1));
/// let circuit = CircuitBuilder::new(2)
///     .add_register("a")
///     .add_register("b")
///     .add_op(Gate::Hadamard { target: q0 })
///     .add_op(Operation::Measure { qubit: q0, clbit: ClbitId(0) })
///     .add_op(Operation::Conditional {
///         condition: Condition::is_set(ClbitId(0)),
///         gate: Gate::PauliX { target: q1 },
///     })
///     .add_op(Operation::Measure { qubit: q1, clbit: ClbitId(1) })
///     .build()?;
///
/// let histogram = Simulator::with_seed(1).execute(&circuit, 100)?;
/// assert_eq!(histogram.get("00") + histogram.get("11"), 100);
/// # Ok(())
/// # }
/// ```
#[doc(hidden)]
const _: () = ();

//! Error handling logic

use super::qubit::{ClbitId, QubitId};
use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while configuring, defining, executing or evaluating a
/// teleportation experiment.
///
/// Configuration and circuit-definition errors are raised before anything is
/// executed. Engine failures are surfaced as-is; nothing is retried.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TeleportError {
    /// The requested number of shots cannot produce a histogram.
    #[error("Invalid shot count {shots}: at least one shot is required")]
    InvalidShotCount {
        /// The rejected shot count.
        shots: u64,
    },

    /// A rotation angle that is not a finite real number.
    #[error("Invalid rotation angle {angle}: the angle must be a finite real number")]
    InvalidAngle {
        /// The rejected angle in radians.
        angle: f64,
    },

    /// An operation references a qubit slot outside the register.
    #[error("Qubit {qubit} is out of range for a {num_qubits}-qubit register")]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Size of the quantum register.
        num_qubits: u32,
    },

    /// A controlled gate uses the same qubit as control and target.
    #[error("Qubit {qubit} cannot be both control and target")]
    DuplicateQubit {
        /// The duplicated qubit.
        qubit: QubitId,
    },

    /// An operation references a classical bit that was never declared.
    #[error("Classical bit {clbit} is not declared in the circuit")]
    UnknownClbit {
        /// The undeclared classical bit.
        clbit: ClbitId,
    },

    /// Two classical registers share a name.
    #[error("Classical register '{name}' is declared more than once")]
    DuplicateRegister {
        /// The repeated register name.
        name: String,
    },

    /// A classical bit is the target of more than one measurement.
    #[error("Classical bit {clbit} is already written by an earlier measurement")]
    ClbitRewritten {
        /// The classical bit written twice.
        clbit: ClbitId,
    },

    /// A conditional operation is guarded on a bit no earlier measurement writes.
    #[error("Condition on classical bit {clbit} precedes any measurement into it")]
    UnmeasuredCondition {
        /// The classical bit read too early.
        clbit: ClbitId,
    },

    /// Statistics were requested for a histogram without any counts.
    #[error("Cannot compute a success rate from an empty histogram")]
    EmptyHistogram,

    /// A histogram key is not a bit string of the expected width.
    #[error("Malformed outcome '{key}': expected {expected_len} characters of '0' or '1'")]
    MalformedOutcome {
        /// The offending key.
        key: String,
        /// Number of classical bits in the circuit.
        expected_len: usize,
    },

    /// The histogram does not account for exactly the requested shots.
    #[error("Histogram accounts for {actual} shots but {expected} were requested")]
    ShotCountMismatch {
        /// Requested shot count.
        expected: u64,
        /// Sum of all histogram counts.
        actual: u64,
    },

    /// Histogram counts add up past what a `u64` can hold.
    #[error("Histogram counts overflow while summing {context}")]
    CountOverflow {
        /// Which sum overflowed.
        context: &'static str,
    },

    /// The execution engine failed.
    #[error("Simulation process error: {message}")]
    Simulation {
        /// Engine failure message.
        message: String,
    },

    /// The simulated state lost normalization.
    #[error("Incoherent state: {message}")]
    Incoherence {
        /// Incoherence failure message.
        message: String,
    },

    /// An artifact could not be written.
    #[error("Failed to write artifact '{}': {source}", .path.display())]
    Artifact {
        /// Path of the artifact or directory.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The histogram could not be serialized.
    #[error("Failed to serialize histogram: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for teleportation operations.
pub type TeleportResult<T> = Result<T, TeleportError>;

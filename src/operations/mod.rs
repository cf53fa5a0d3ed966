// src/operations/mod.rs

//! Symbolic instructions a circuit is made of.
//!
//! Operations only describe *what* happens to which slot. Executing them is
//! the job of an [`Executor`](crate::simulation::Executor); in particular a
//! [`Operation::Conditional`] is carried inline and its guard is evaluated by
//! the engine during each shot, never by the code that builds the circuit.

use crate::core::{ClbitId, QubitId};
use std::fmt;

/// A unitary gate acting on one or two qubit slots.
#[derive(Debug, Clone, PartialEq)] // f64 angle rules out Eq
pub enum Gate {
    /// Rotation about the Y axis by `theta` radians.
    Ry {
        /// Rotated qubit.
        target: QubitId,
        /// Rotation angle in radians.
        theta: f64,
    },
    /// Hadamard (basis mixing).
    Hadamard {
        /// Target qubit.
        target: QubitId,
    },
    /// Pauli-X (bit flip).
    PauliX {
        /// Target qubit.
        target: QubitId,
    },
    /// Pauli-Z (phase flip).
    PauliZ {
        /// Target qubit.
        target: QubitId,
    },
    /// Controlled-NOT: flips `target` when `control` is |1>.
    ControlledNot {
        /// Control qubit.
        control: QubitId,
        /// Target qubit.
        target: QubitId,
    },
}

impl Gate {
    /// Qubits the gate acts on, control first for controlled gates.
    pub fn qubits(&self) -> Vec<QubitId> {
        match self {
            Gate::Ry { target, .. }
            | Gate::Hadamard { target }
            | Gate::PauliX { target }
            | Gate::PauliZ { target } => vec![*target],
            Gate::ControlledNot { control, target } => vec![*control, *target],
        }
    }

    /// Lower-case mnemonic, as used in circuit listings.
    pub fn name(&self) -> &'static str {
        match self {
            Gate::Ry { .. } => "ry",
            Gate::Hadamard { .. } => "h",
            Gate::PauliX { .. } => "x",
            Gate::PauliZ { .. } => "z",
            Gate::ControlledNot { .. } => "cx",
        }
    }

    /// Symbol drawn on the target wire of a circuit diagram.
    pub fn symbol(&self) -> String {
        match self {
            Gate::Ry { theta, .. } => format!("Ry({:.2})", theta),
            Gate::Hadamard { .. } => "H".to_string(),
            Gate::PauliX { .. } | Gate::ControlledNot { .. } => "X".to_string(),
            Gate::PauliZ { .. } => "Z".to_string(),
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Ry { target, theta } => write!(f, "ry({}) {}", theta, target),
            Gate::ControlledNot { control, target } => write!(f, "cx {}, {}", control, target),
            other => write!(f, "{} {}", other.name(), other.qubits()[0]),
        }
    }
}

/// Guard of a conditional operation: "classical bit == value".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Condition {
    /// The classical bit read by the guard.
    pub clbit: ClbitId,
    /// The literal it is compared with (`true` is 1).
    pub value: bool,
}

impl Condition {
    /// Guard that holds when `clbit` reads 1.
    pub fn is_set(clbit: ClbitId) -> Self {
        Self { clbit, value: true }
    }

    /// Whether the guard holds for the committed bit `bit`.
    pub fn holds(&self, bit: bool) -> bool {
        bit == self.value
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} == {}", self.clbit, u8::from(self.value))
    }
}

/// One entry of a circuit's ordered operation list.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Apply a gate unconditionally.
    Gate(Gate),

    /// Projectively measure `qubit` in the computational basis and commit the
    /// result to `clbit`. Collapses the qubit's simulated state.
    Measure {
        /// Measured qubit.
        qubit: QubitId,
        /// Classical bit receiving the result.
        clbit: ClbitId,
    },

    /// Apply `gate` only when `condition` holds for the bit committed earlier
    /// in the same shot.
    Conditional {
        /// The guard evaluated at execution time.
        condition: Condition,
        /// The guarded gate.
        gate: Gate,
    },

    /// Layout marker between protocol stages. No effect on the simulated state.
    Barrier {
        /// Qubits the barrier spans; empty means the whole register.
        qubits: Vec<QubitId>,
    },
}

impl Operation {
    /// Qubits mentioned by the operation's parameters.
    pub fn involved_qubits(&self) -> Vec<QubitId> {
        match self {
            Operation::Gate(gate) | Operation::Conditional { gate, .. } => gate.qubits(),
            Operation::Measure { qubit, .. } => vec![*qubit],
            Operation::Barrier { qubits } => qubits.clone(),
        }
    }

    /// The classical bit this operation writes, if any.
    pub fn written_clbit(&self) -> Option<ClbitId> {
        match self {
            Operation::Measure { clbit, .. } => Some(*clbit),
            _ => None,
        }
    }

    /// The classical bit this operation reads, if any.
    pub fn read_clbit(&self) -> Option<ClbitId> {
        match self {
            Operation::Conditional { condition, .. } => Some(condition.clbit),
            _ => None,
        }
    }
}

impl From<Gate> for Operation {
    fn from(gate: Gate) -> Self {
        Operation::Gate(gate)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Gate(gate) => write!(f, "{}", gate),
            Operation::Measure { qubit, clbit } => write!(f, "measure {} -> {}", qubit, clbit),
            Operation::Conditional { condition, gate } => write!(f, "if ({}) {}", condition, gate),
            Operation::Barrier { qubits } if qubits.is_empty() => write!(f, "barrier"),
            Operation::Barrier { qubits } => {
                let names: Vec<String> = qubits.iter().map(ToString::to_string).collect();
                write!(f, "barrier {}", names.join(", "))
            }
        }
    }
}

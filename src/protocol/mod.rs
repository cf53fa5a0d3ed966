// src/protocol/mod.rs

//! The teleportation circuit.
//!
//! The circuit is assembled by a typestate pipeline. Each stage consumes the
//! previous one, so the only sequence the compiler accepts is
//!
//! ```text
//! Init -> Prepared -> Entangled -> Analyzed -> Corrected -> Verified
//! ```
//!
//! Correction cannot be appended before analysis has committed `crz` and
//! `crx`, and verification cannot run before correction. The resulting
//! [`Circuit`] additionally rejects, at build time, any guard whose bit was not
//! measured earlier.
//!
//! Slot layout: `q0` holds the message, `q1` the sender's half of the Bell
//! pair and `q2` the receiver's half. Classical bits are declared in the order
//! `crz`, `crx`, `cr_result`, which fixes the outcome keys as
//! `"<cr_result><crx><crz>"`.

mod experiment;

pub use experiment::{ExperimentOutcome, run_experiment};

use crate::circuits::{Circuit, CircuitBuilder};
use crate::core::{ClbitId, QubitId, TeleportError, TeleportResult};
use crate::operations::{Condition, Gate, Operation};
use std::marker::PhantomData;
use tracing::debug;

/// Message qubit.
pub const MESSAGE: QubitId = QubitId(0);
/// Sender's half of the entangled pair.
pub const SENDER: QubitId = QubitId(1);
/// Receiver's half of the entangled pair.
pub const RECEIVER: QubitId = QubitId(2);
/// Qubit slots used by the protocol.
pub const NUM_QUBITS: u32 = 3;

/// Measurement of the message qubit; drives the Z correction.
pub const CRZ: ClbitId = ClbitId(0);
/// Measurement of the sender qubit; drives the X correction.
pub const CRX: ClbitId = ClbitId(1);
/// Verification bit; 0 means the state arrived intact.
pub const CR_RESULT: ClbitId = ClbitId(2);

/// Register name of [`CRZ`].
pub const CRZ_NAME: &str = "crz";
/// Register name of [`CRX`].
pub const CRX_NAME: &str = "crx";
/// Register name of [`CR_RESULT`].
pub const CR_RESULT_NAME: &str = "cr_result";

/// Pipeline stage markers.
pub mod stage {
    /// Registers declared, nothing applied.
    #[derive(Debug)]
    pub struct Init;
    /// Message state rotated onto `q0`.
    #[derive(Debug)]
    pub struct Prepared;
    /// Bell pair shared between `q1` and `q2`.
    #[derive(Debug)]
    pub struct Entangled;
    /// `crz` and `crx` committed.
    #[derive(Debug)]
    pub struct Analyzed;
    /// Guarded Pauli corrections appended.
    #[derive(Debug)]
    pub struct Corrected;
    /// Inverse preparation applied and `cr_result` committed.
    #[derive(Debug)]
    pub struct Verified;
}

use stage::{Analyzed, Corrected, Entangled, Init, Prepared, Verified};

/// Teleportation circuit under construction, at stage `S`.
#[derive(Debug)]
pub struct Teleportation<S> {
    builder: CircuitBuilder,
    theta: f64,
    _stage: PhantomData<S>,
}

impl<S> Teleportation<S> {
    fn advance<T>(self, ops: impl IntoIterator<Item = Operation>) -> Teleportation<T> {
        Teleportation {
            builder: self.builder.add_ops(ops),
            theta: self.theta,
            _stage: PhantomData,
        }
    }

    /// The preparation angle (0 before [`prepare`](Teleportation::prepare)).
    pub fn theta(&self) -> f64 {
        self.theta
    }
}

fn barrier() -> Operation {
    Operation::Barrier { qubits: Vec::new() }
}

impl Teleportation<Init> {
    /// Three qubit slots and the registers `crz`, `crx`, `cr_result`.
    pub fn new() -> Self {
        Self {
            builder: CircuitBuilder::new(NUM_QUBITS)
                .add_register(CRZ_NAME)
                .add_register(CRX_NAME)
                .add_register(CR_RESULT_NAME),
            theta: 0.0,
            _stage: PhantomData,
        }
    }

    /// Rotates the message qubit by `theta` about Y.
    ///
    /// # Errors
    /// `InvalidAngle` if `theta` is NaN or infinite.
    pub fn prepare(mut self, theta: f64) -> TeleportResult<Teleportation<Prepared>> {
        if !theta.is_finite() {
            return Err(TeleportError::InvalidAngle { angle: theta });
        }
        self.theta = theta;
        Ok(self.advance([Gate::Ry { target: MESSAGE, theta }.into(), barrier()]))
    }
}

impl Default for Teleportation<Init> {
    fn default() -> Self {
        Self::new()
    }
}

impl Teleportation<Prepared> {
    /// H on the sender qubit, then CX sender -> receiver.
    pub fn entangle(self) -> Teleportation<Entangled> {
        self.advance([
            Gate::Hadamard { target: SENDER }.into(),
            Gate::ControlledNot { control: SENDER, target: RECEIVER }.into(),
            barrier(),
        ])
    }
}

impl Teleportation<Entangled> {
    /// Bell-basis measurement of message and sender: CX q0 -> q1, H q0, then
    /// q0 into `crz` and q1 into `crx`. Neither qubit is used afterwards.
    pub fn analyze(self) -> Teleportation<Analyzed> {
        self.advance([
            Gate::ControlledNot { control: MESSAGE, target: SENDER }.into(),
            Gate::Hadamard { target: MESSAGE }.into(),
            barrier(),
            Operation::Measure { qubit: MESSAGE, clbit: CRZ },
            Operation::Measure { qubit: SENDER, clbit: CRX },
            barrier(),
        ])
    }
}

impl Teleportation<Analyzed> {
    /// `if crx == 1: X q2` and `if crz == 1: Z q2`, evaluated per shot.
    pub fn correct(self) -> Teleportation<Corrected> {
        self.advance([
            Operation::Conditional {
                condition: Condition::is_set(CRX),
                gate: Gate::PauliX { target: RECEIVER },
            },
            Operation::Conditional {
                condition: Condition::is_set(CRZ),
                gate: Gate::PauliZ { target: RECEIVER },
            },
        ])
    }
}

impl Teleportation<Corrected> {
    /// Undoes the preparation on the receiver and measures it into `cr_result`.
    pub fn verify(self) -> Teleportation<Verified> {
        let theta = self.theta;
        self.advance([
            Gate::Ry { target: RECEIVER, theta: -theta }.into(),
            Operation::Measure { qubit: RECEIVER, clbit: CR_RESULT },
        ])
    }
}

impl Teleportation<Verified> {
    /// Validates the assembled operations and returns the circuit.
    pub fn build(self) -> TeleportResult<Circuit> {
        let circuit = self.builder.build()?;
        debug!(
            "Built teleportation circuit for theta = {}: {} operations",
            self.theta,
            circuit.len()
        );
        Ok(circuit)
    }
}

/// The full prepare/entangle/analyze/correct/verify circuit for `theta`.
pub fn teleportation_circuit(theta: f64) -> TeleportResult<Circuit> {
    Teleportation::new()
        .prepare(theta)?
        .entangle()
        .analyze()
        .correct()
        .verify()
        .build()
}

/// The gates the corrector applies to the receiver for a committed
/// (`crz`, `crx`) pair, in circuit order.
pub fn correction_for(crz: bool, crx: bool) -> Vec<Gate> {
    let mut gates = Vec::with_capacity(2);
    if crx {
        gates.push(Gate::PauliX { target: RECEIVER });
    }
    if crz {
        gates.push(Gate::PauliZ { target: RECEIVER });
    }
    gates
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_registers_declared_in_key_order() -> TeleportResult<()> {
        let circuit = teleportation_circuit(PI / 3.0)?;
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.registers(), ["crz", "crx", "cr_result"]);
        assert_eq!(circuit.clbit(CR_RESULT_NAME), Some(CR_RESULT));
        Ok(())
    }

    #[test]
    fn test_correction_table() {
        assert!(correction_for(false, false).is_empty());
        assert_eq!(correction_for(false, true), vec![Gate::PauliX { target: RECEIVER }]);
        assert_eq!(correction_for(true, false), vec![Gate::PauliZ { target: RECEIVER }]);
        assert_eq!(
            correction_for(true, true),
            vec![Gate::PauliX { target: RECEIVER }, Gate::PauliZ { target: RECEIVER }]
        );
    }

    #[test]
    fn test_guards_pair_crx_with_x_and_crz_with_z() -> TeleportResult<()> {
        let circuit = teleportation_circuit(1.0)?;
        let guards: Vec<(ClbitId, &Gate)> = circuit
            .operations()
            .iter()
            .filter_map(|op| match op {
                Operation::Conditional { condition, gate } => Some((condition.clbit, gate)),
                _ => None,
            })
            .collect();
        assert_eq!(
            guards,
            vec![
                (CRX, &Gate::PauliX { target: RECEIVER }),
                (CRZ, &Gate::PauliZ { target: RECEIVER }),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_verification_undoes_preparation() -> TeleportResult<()> {
        let circuit = teleportation_circuit(0.7)?;
        let ops = circuit.operations();
        assert_eq!(ops[0], Gate::Ry { target: MESSAGE, theta: 0.7 }.into());
        assert_eq!(ops[ops.len() - 2], Gate::Ry { target: RECEIVER, theta: -0.7 }.into());
        assert_eq!(ops[ops.len() - 1], Operation::Measure { qubit: RECEIVER, clbit: CR_RESULT });
        Ok(())
    }

    #[test]
    fn test_non_finite_angle_rejected() {
        let result = Teleportation::new().prepare(f64::NAN);
        assert!(matches!(result, Err(TeleportError::InvalidAngle { .. })));
    }
}

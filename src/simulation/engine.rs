// src/simulation/engine.rs
use crate::core::{QubitId, StateVector, TeleportError, TeleportResult};
use crate::operations::Gate;
use num_complex::Complex;
use num_traits::Zero;
use rand::Rng;

/// Outcome probabilities below this are treated as exactly zero.
const AMPLITUDE_TOLERANCE: f64 = 1e-12;

/// Largest register the engine will allocate a state vector for.
const MAX_QUBITS: usize = 24;

type Matrix2 = [[Complex<f64>; 2]; 2];

/// State-vector engine holding the evolving state of one shot.
/// (Internal visibility)
pub(crate) struct SimulationEngine {
    state: StateVector,
    num_qubits: usize,
}

impl SimulationEngine {
    /// Initializes the engine in |0...0> for `num_qubits` qubits.
    pub(crate) fn init(num_qubits: usize) -> TeleportResult<Self> {
        if num_qubits == 0 {
            return Err(TeleportError::Simulation {
                message: "Cannot initialize simulation engine with zero qubits".to_string(),
            });
        }
        if num_qubits > MAX_QUBITS {
            return Err(TeleportError::Simulation {
                message: format!(
                    "Register of {} qubits exceeds the engine limit of {}",
                    num_qubits, MAX_QUBITS
                ),
            });
        }
        Ok(Self {
            state: StateVector::ground(num_qubits),
            num_qubits,
        })
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: StateVector) -> TeleportResult<()> {
        if state.dim() != self.state.dim() {
            return Err(TeleportError::Simulation {
                message: format!(
                    "Cannot set state: provided dimension {} does not match engine dimension {}",
                    state.dim(),
                    self.state.dim()
                ),
            });
        }
        self.state = state;
        Ok(())
    }

    pub(crate) fn get_state(&self) -> &StateVector {
        &self.state
    }

    /// Applies a gate to the state.
    pub(crate) fn apply_gate(&mut self, gate: &Gate) -> TeleportResult<()> {
        match gate {
            Gate::ControlledNot { control, target } => {
                let control_idx = self.qubit_index(*control)?;
                let target_idx = self.qubit_index(*target)?;
                if control_idx == target_idx {
                    return Err(TeleportError::DuplicateQubit { qubit: *control });
                }
                self.apply_controlled_gate(control_idx, target_idx, &pauli_x_matrix());
            }
            Gate::Ry { target, theta } => {
                let idx = self.qubit_index(*target)?;
                self.apply_single_qubit_gate(idx, &ry_matrix(*theta));
            }
            Gate::Hadamard { target } => {
                let idx = self.qubit_index(*target)?;
                self.apply_single_qubit_gate(idx, &hadamard_matrix());
            }
            Gate::PauliX { target } => {
                let idx = self.qubit_index(*target)?;
                self.apply_single_qubit_gate(idx, &pauli_x_matrix());
            }
            Gate::PauliZ { target } => {
                let idx = self.qubit_index(*target)?;
                self.apply_single_qubit_gate(idx, &pauli_z_matrix());
            }
        }
        Ok(())
    }

    /// Measures `qubit` in the computational basis.
    ///
    /// Samples the outcome from the Born probability, collapses the state onto
    /// it and renormalizes. Returns `true` for outcome 1.
    pub(crate) fn measure<R: Rng>(&mut self, qubit: QubitId, rng: &mut R) -> TeleportResult<bool> {
        let idx = self.qubit_index(qubit)?;
        let p_one = self.state.probability_of_one(idx).clamp(0.0, 1.0);
        let p_zero = 1.0 - p_one;

        let outcome = if p_one < AMPLITUDE_TOLERANCE {
            false
        } else if p_zero < AMPLITUDE_TOLERANCE {
            true
        } else {
            rng.random::<f64>() < p_one
        };

        let p_outcome = if outcome { p_one } else { p_zero };
        if !p_outcome.is_finite() || p_outcome < AMPLITUDE_TOLERANCE {
            return Err(TeleportError::Simulation {
                message: format!("Measurement of {} selected an outcome with probability {}", qubit, p_outcome),
            });
        }

        let scale = 1.0 / p_outcome.sqrt();
        let mask = 1usize << idx;
        for (i, amp) in self.state.vector_mut().iter_mut().enumerate() {
            if (i & mask != 0) == outcome {
                *amp *= scale;
            } else {
                *amp = Complex::zero();
            }
        }
        Ok(outcome)
    }

    fn qubit_index(&self, qubit: QubitId) -> TeleportResult<usize> {
        let idx = qubit.index();
        if idx >= self.num_qubits {
            return Err(TeleportError::QubitOutOfRange {
                qubit,
                num_qubits: self.num_qubits as u32,
            });
        }
        Ok(idx)
    }

    /// Applies a 2x2 matrix to the qubit at bit position `target_idx`.
    fn apply_single_qubit_gate(&mut self, target_idx: usize, matrix: &Matrix2) {
        let mask = 1usize << target_idx;
        let vector = self.state.vector_mut();
        // Iterate over pairs of basis states differing only at the target bit
        for i0 in 0..vector.len() {
            if i0 & mask != 0 {
                continue;
            }
            let i1 = i0 | mask;
            let psi_0 = vector[i0];
            let psi_1 = vector[i1];
            vector[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            vector[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
    }

    /// Applies `matrix` to `target_idx` on the subspace where `control_idx` is 1.
    fn apply_controlled_gate(&mut self, control_idx: usize, target_idx: usize, matrix: &Matrix2) {
        let c_mask = 1usize << control_idx;
        let t_mask = 1usize << target_idx;
        let vector = self.state.vector_mut();
        for i0 in 0..vector.len() {
            if i0 & c_mask == 0 || i0 & t_mask != 0 {
                continue;
            }
            let i1 = i0 | t_mask;
            let psi_0 = vector[i0];
            let psi_1 = vector[i1];
            vector[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            vector[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
    }
}

/// Ry(theta) = [[cos(a), -sin(a)], [sin(a), cos(a)]] where a = theta/2.
fn ry_matrix(theta: f64) -> Matrix2 {
    let (sin_a, cos_a) = (theta / 2.0).sin_cos();
    [
        [Complex::new(cos_a, 0.0), Complex::new(-sin_a, 0.0)],
        [Complex::new(sin_a, 0.0), Complex::new(cos_a, 0.0)],
    ]
}

fn hadamard_matrix() -> Matrix2 {
    use std::f64::consts::FRAC_1_SQRT_2;
    [
        [Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(FRAC_1_SQRT_2, 0.0)],
        [Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(-FRAC_1_SQRT_2, 0.0)],
    ]
}

fn pauli_x_matrix() -> Matrix2 {
    [
        [Complex::zero(), Complex::new(1.0, 0.0)],
        [Complex::new(1.0, 0.0), Complex::zero()],
    ]
}

fn pauli_z_matrix() -> Matrix2 {
    [
        [Complex::new(1.0, 0.0), Complex::zero()],
        [Complex::zero(), Complex::new(-1.0, 0.0)],
    ]
}

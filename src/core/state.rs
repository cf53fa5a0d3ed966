// src/core/state.rs

use num_complex::Complex;
use num_traits::Zero;
use std::fmt;

/// Amplitude vector of an `n`-qubit register.
///
/// Basis index bit `k` holds the value of qubit `k`, so the vector has
/// `2^n` entries and starts out as |0...0>.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct StateVector {
    amplitudes: Vec<Complex<f64>>,
    num_qubits: usize,
}

impl StateVector {
    /// Creates the ground state |0...0> for `num_qubits` qubits.
    ///
    /// Callers bound `num_qubits` beforehand; the engine rejects registers
    /// whose dimension would overflow.
    pub(crate) fn ground(num_qubits: usize) -> Self {
        let dim = 1usize << num_qubits;
        let mut amplitudes = vec![Complex::zero(); dim];
        amplitudes[0] = Complex::new(1.0, 0.0);
        Self { amplitudes, num_qubits }
    }

    /// Wraps an explicit amplitude vector. The length must be a power of two.
    #[cfg(test)]
    pub(crate) fn from_amplitudes(amplitudes: Vec<Complex<f64>>) -> Self {
        let num_qubits = amplitudes.len().trailing_zeros() as usize;
        Self { amplitudes, num_qubits }
    }

    /// Read-only access to the amplitudes.
    pub fn vector(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub(crate) fn vector_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Number of basis states (`2^n`).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Number of qubits the vector describes.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Sum of squared amplitude magnitudes.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }

    /// Probability that measuring `qubit` yields 1.
    pub fn probability_of_one(&self, qubit: usize) -> f64 {
        let mask = 1usize << qubit;
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, c)| c.norm_sqr())
            .sum()
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}

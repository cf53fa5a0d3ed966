// src/statistics/mod.rs

//! Success-rate statistics over an outcome histogram.
//!
//! A shot counts as a success when its verification bit reads 0. The run is
//! classified "successful" only when the success ratio is strictly greater
//! than [`SUCCESS_THRESHOLD`], a fixed constant.

use crate::core::{ClbitId, SUCCESS_THRESHOLD, TeleportError, TeleportResult};
use crate::simulation::{Histogram, outcome_bit};
use serde::Serialize;
use std::fmt;

/// Success and total counts derived from a histogram. `successes <= total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SuccessTally {
    /// Shots whose verification bit read 0.
    pub successes: u64,
    /// All shots.
    pub total: u64,
}

impl SuccessTally {
    /// Tallies `histogram` by the value of `result_bit` in each key.
    ///
    /// # Errors
    /// * `MalformedOutcome` if a key has no valid character for `result_bit`.
    /// * `CountOverflow` if the counts do not fit in a `u64`.
    pub fn from_histogram(histogram: &Histogram, result_bit: ClbitId) -> TeleportResult<Self> {
        let mut tally = SuccessTally::default();
        for (key, count) in histogram.iter() {
            if !outcome_bit(key, result_bit)? {
                tally.successes = tally
                    .successes
                    .checked_add(count)
                    .ok_or(TeleportError::CountOverflow { context: "successes" })?;
            }
            tally.total = tally
                .total
                .checked_add(count)
                .ok_or(TeleportError::CountOverflow { context: "total" })?;
        }
        Ok(tally)
    }

    /// `successes / total`.
    ///
    /// # Errors
    /// `EmptyHistogram` when `total` is zero.
    pub fn ratio(&self) -> TeleportResult<f64> {
        if self.total == 0 {
            return Err(TeleportError::EmptyHistogram);
        }
        Ok(self.successes as f64 / self.total as f64)
    }
}

/// Binary verdict on a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Ratio strictly above the threshold.
    Successful,
    /// Ratio at or below the threshold.
    Failed,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Successful => write!(f, "successful"),
            Classification::Failed => write!(f, "failed"),
        }
    }
}

/// Classifies a success ratio against [`SUCCESS_THRESHOLD`] (strict greater-than).
pub fn classify(ratio: f64) -> Classification {
    if ratio > SUCCESS_THRESHOLD {
        Classification::Successful
    } else {
        Classification::Failed
    }
}

/// Textual success-rate report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SuccessReport {
    /// Underlying counts.
    pub tally: SuccessTally,
    /// `successes / total`, in `[0, 1]`.
    pub ratio: f64,
    /// Verdict for `ratio`.
    pub classification: Classification,
}

impl SuccessReport {
    /// Builds the report for a tally.
    ///
    /// # Errors
    /// `EmptyHistogram` when the tally is empty.
    pub fn from_tally(tally: SuccessTally) -> TeleportResult<Self> {
        let ratio = tally.ratio()?;
        Ok(Self {
            tally,
            ratio,
            classification: classify(ratio),
        })
    }

    /// The ratio as a percentage.
    pub fn percentage(&self) -> f64 {
        self.ratio * 100.0
    }

    /// Whether the run classified as successful.
    pub fn is_successful(&self) -> bool {
        self.classification == Classification::Successful
    }
}

impl fmt::Display for SuccessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Teleportation success rate: {}/{} = {:.2}% ({})",
            self.tally.successes,
            self.tally.total,
            self.percentage(),
            self.classification
        )
    }
}

/// Tallies `histogram` on `result_bit` and classifies the result.
pub fn evaluate(histogram: &Histogram, result_bit: ClbitId) -> TeleportResult<SuccessReport> {
    SuccessReport::from_tally(SuccessTally::from_histogram(histogram, result_bit)?)
}

// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod qubit;
pub mod state;

pub use error::{TeleportError, TeleportResult};
pub use qubit::{ClbitId, QubitId};
pub use state::StateVector;

pub mod constants;
pub use constants::teleport_constants::{
    CIRCUIT_DIAGRAM_FILE, DEFAULT_OUTPUT_DIR, DEFAULT_SHOTS, HISTOGRAM_CHART_FILE,
    HISTOGRAM_JSON_FILE, SECRET_ANGLE, SUCCESS_THRESHOLD,
};

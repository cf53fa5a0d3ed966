//! Fixed constants of the teleportation experiment.

/// Constants shared by the protocol, the statistics and the binary.
///
/// None of these are configurable at run time except through the explicit
/// CLI flags that mirror `SECRET_ANGLE`, `DEFAULT_SHOTS` and `DEFAULT_OUTPUT_DIR`.
pub mod teleport_constants {
    /// Rotation angle of the prepared message state (π/3).
    pub const SECRET_ANGLE: f64 = std::f64::consts::PI / 3.0;
    /// Shot count used when none is given.
    pub const DEFAULT_SHOTS: u32 = 1000;
    /// A run is "successful" only when its success ratio is strictly above this value.
    pub const SUCCESS_THRESHOLD: f64 = 0.95;
    /// Directory artifacts are written to when none is given.
    pub const DEFAULT_OUTPUT_DIR: &str = "images";
    /// File name of the rendered circuit diagram.
    pub const CIRCUIT_DIAGRAM_FILE: &str = "quantum_teleportation_circuit.txt";
    /// File name of the histogram counts.
    pub const HISTOGRAM_JSON_FILE: &str = "teleportation_results_histogram.json";
    /// File name of the histogram bar chart.
    pub const HISTOGRAM_CHART_FILE: &str = "teleportation_results_histogram.txt";
}

// src/artifacts/mod.rs

//! Presentation artifacts: the circuit diagram and the outcome histogram.
//!
//! Nothing here affects the protocol or its statistics. The output directory
//! is created only by an explicit [`ensure_output_dir`] call.

use crate::circuits::Circuit;
use crate::core::{
    CIRCUIT_DIAGRAM_FILE, HISTOGRAM_CHART_FILE, HISTOGRAM_JSON_FILE, TeleportError, TeleportResult,
};
use crate::simulation::Histogram;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Width of a 100% bar in the text chart.
const CHART_WIDTH: usize = 50;

fn artifact_error(path: &Path) -> impl FnOnce(std::io::Error) -> TeleportError + '_ {
    move |source| TeleportError::Artifact { path: path.to_path_buf(), source }
}

/// Creates `dir` and any missing parents. Succeeds if it already exists.
pub fn ensure_output_dir(dir: &Path) -> TeleportResult<()> {
    if dir.is_dir() {
        debug!("Output directory {} already exists", dir.display());
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(artifact_error(dir))?;
    info!("Created output directory {}", dir.display());
    Ok(())
}

/// Writes the text diagram of `circuit` into `dir`.
pub fn write_circuit_diagram(circuit: &Circuit, dir: &Path) -> TeleportResult<PathBuf> {
    let path = dir.join(CIRCUIT_DIAGRAM_FILE);
    fs::write(&path, circuit.to_string()).map_err(artifact_error(&path))?;
    info!("Circuit diagram saved to {}", path.display());
    Ok(path)
}

/// Writes the histogram as a pretty-printed JSON object of key -> count.
pub fn write_histogram_json(histogram: &Histogram, dir: &Path) -> TeleportResult<PathBuf> {
    let path = dir.join(HISTOGRAM_JSON_FILE);
    let json = serde_json::to_string_pretty(histogram)?;
    fs::write(&path, json).map_err(artifact_error(&path))?;
    info!("Histogram counts saved to {}", path.display());
    Ok(path)
}

/// Renders a titled horizontal bar chart, one line per outcome in key order.
pub fn render_histogram_chart(histogram: &Histogram) -> String {
    let total = histogram.total();
    let mut chart = format!("Quantum Teleportation Results ({} shots)\n", total);
    if total == 0 {
        chart.push_str("  No outcomes recorded.\n");
        return chart;
    }
    for (outcome, count) in histogram.iter() {
        let fraction = count as f64 / total as f64;
        let bar_len = (fraction * CHART_WIDTH as f64).round() as usize;
        chart.push_str(&format!(
            "  {}: {:>6} ({:>6.2}%) {}\n",
            outcome,
            count,
            fraction * 100.0,
            "█".repeat(bar_len)
        ));
    }
    chart
}

/// Writes [`render_histogram_chart`] into `dir`.
pub fn write_histogram_chart(histogram: &Histogram, dir: &Path) -> TeleportResult<PathBuf> {
    let path = dir.join(HISTOGRAM_CHART_FILE);
    fs::write(&path, render_histogram_chart(histogram)).map_err(artifact_error(&path))?;
    info!("Histogram chart saved to {}", path.display());
    Ok(path)
}

/// Paths of the files written by [`write_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// Text circuit diagram.
    pub circuit_diagram: PathBuf,
    /// Histogram counts as JSON.
    pub histogram_json: PathBuf,
    /// Histogram bar chart.
    pub histogram_chart: PathBuf,
}

impl ArtifactPaths {
    /// Iterates over every written path.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        [&self.circuit_diagram, &self.histogram_json, &self.histogram_chart]
            .into_iter()
            .map(PathBuf::as_path)
    }
}

/// Ensures `dir` exists and writes every artifact into it.
pub fn write_all(circuit: &Circuit, histogram: &Histogram, dir: &Path) -> TeleportResult<ArtifactPaths> {
    ensure_output_dir(dir)?;
    Ok(ArtifactPaths {
        circuit_diagram: write_circuit_diagram(circuit, dir)?,
        histogram_json: write_histogram_json(histogram, dir)?,
        histogram_chart: write_histogram_chart(histogram, dir)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_bars_scale_with_counts() {
        let mut histogram = Histogram::new();
        histogram.add("000", 3);
        histogram.add("001", 1);
        let chart = render_histogram_chart(&histogram);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines[0], "Quantum Teleportation Results (4 shots)");
        assert_eq!(lines[1].matches('█').count(), 38);
        assert_eq!(lines[2].matches('█').count(), 13);
        assert!(lines[1].contains("75.00%"));
        assert_eq!(lines.len(), 3);
        assert!(chart.ends_with('\n'));
    }

    #[test]
    fn test_empty_chart_has_title_only() {
        let chart = render_histogram_chart(&Histogram::new());
        assert!(chart.starts_with("Quantum Teleportation Results (0 shots)"));
        assert!(!chart.contains('█'));
    }
}

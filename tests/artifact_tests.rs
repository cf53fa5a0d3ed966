// tests/artifact_tests.rs

use qteleport::artifacts::{ensure_output_dir, render_histogram_chart, write_all};
use qteleport::core::{CIRCUIT_DIAGRAM_FILE, HISTOGRAM_CHART_FILE, HISTOGRAM_JSON_FILE};
use qteleport::{Histogram, Simulator, TeleportConfig, TeleportError, run_experiment};
use std::collections::BTreeMap;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_ensure_output_dir_creates_nested_and_is_repeatable() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    let dir = tmp.path().join("runs").join("images");
    assert!(!dir.exists());

    ensure_output_dir(&dir)?;
    assert!(dir.is_dir());
    ensure_output_dir(&dir)?;
    Ok(())
}

#[test]
fn test_ensure_output_dir_over_file_fails() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    let blocker = tmp.path().join("images");
    fs::write(&blocker, "not a directory")?;

    let result = ensure_output_dir(&blocker);
    assert!(matches!(result, Err(TeleportError::Artifact { path, .. }) if path == blocker));
    Ok(())
}

#[test]
fn test_write_all_produces_every_artifact() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    let dir = tmp.path().join("images");
    let config = TeleportConfig::default().with_shots(200).with_output_dir(dir.clone());
    let outcome = run_experiment(&config, &Simulator::with_seed(11))?;

    let paths = write_all(&outcome.circuit, &outcome.histogram, &config.output_dir)?;
    assert_eq!(paths.circuit_diagram, dir.join(CIRCUIT_DIAGRAM_FILE));
    assert_eq!(paths.histogram_json, dir.join(HISTOGRAM_JSON_FILE));
    assert_eq!(paths.histogram_chart, dir.join(HISTOGRAM_CHART_FILE));
    assert!(paths.iter().all(|p| p.is_file()));

    let diagram = fs::read_to_string(&paths.circuit_diagram)?;
    assert_eq!(diagram, outcome.circuit.to_string());
    for label in ["q0: ", "q1: ", "q2: ", "crz: ", "crx: ", "cr_result: "] {
        assert!(diagram.contains(label), "diagram lacks {:?}", label);
    }

    let json = fs::read_to_string(&paths.histogram_json)?;
    let counts: BTreeMap<String, u64> = serde_json::from_str(&json)?;
    assert_eq!(counts.values().sum::<u64>(), 200);
    let reparsed: Histogram = serde_json::from_str(&json)?;
    assert_eq!(reparsed, outcome.histogram);

    let chart = fs::read_to_string(&paths.histogram_chart)?;
    assert!(chart.starts_with("Quantum Teleportation Results (200 shots)"));
    assert_eq!(chart, render_histogram_chart(&outcome.histogram));
    Ok(())
}

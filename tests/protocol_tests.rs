// tests/protocol_tests.rs

use qteleport::protocol::{CR_RESULT, CRX, CRZ, MESSAGE, RECEIVER, SENDER};
use qteleport::{
    Circuit, CircuitBuilder, Classification, Condition, Executor, Gate, Histogram, Operation,
    Simulator, TeleportConfig, TeleportError, evaluate, run_experiment, teleportation_circuit,
};
use std::f64::consts::PI;

type TestResult = Result<(), TeleportError>;

fn barrier() -> Operation {
    Operation::Barrier { qubits: vec![] }
}

#[test]
fn test_circuit_follows_protocol_order() -> TestResult {
    let theta = PI / 3.0;
    let circuit = teleportation_circuit(theta)?;

    let expected: Vec<Operation> = vec![
        // prepare
        Gate::Ry { target: MESSAGE, theta }.into(),
        barrier(),
        // entangle
        Gate::Hadamard { target: SENDER }.into(),
        Gate::ControlledNot { control: SENDER, target: RECEIVER }.into(),
        barrier(),
        // Bell-basis analysis
        Gate::ControlledNot { control: MESSAGE, target: SENDER }.into(),
        Gate::Hadamard { target: MESSAGE }.into(),
        barrier(),
        Operation::Measure { qubit: MESSAGE, clbit: CRZ },
        Operation::Measure { qubit: SENDER, clbit: CRX },
        barrier(),
        // correction
        Operation::Conditional { condition: Condition::is_set(CRX), gate: Gate::PauliX { target: RECEIVER } },
        Operation::Conditional { condition: Condition::is_set(CRZ), gate: Gate::PauliZ { target: RECEIVER } },
        // verification
        Gate::Ry { target: RECEIVER, theta: -theta }.into(),
        Operation::Measure { qubit: RECEIVER, clbit: CR_RESULT },
    ];
    assert_eq!(circuit.operations(), expected.as_slice());
    Ok(())
}

#[test]
fn test_circuit_definition_is_idempotent() -> TestResult {
    let first = teleportation_circuit(PI / 3.0)?;
    let second = teleportation_circuit(PI / 3.0)?;
    assert_eq!(first, second);
    assert_ne!(first, teleportation_circuit(PI / 4.0)?);
    Ok(())
}

#[test]
fn test_no_quantum_use_of_sender_side_after_analysis() -> TestResult {
    let circuit = teleportation_circuit(1.2)?;
    let ops = circuit.operations();
    let last_sender_measure = ops
        .iter()
        .rposition(|op| matches!(op, Operation::Measure { qubit, .. } if *qubit == SENDER))
        .ok_or(TeleportError::UnknownClbit { clbit: CRX })?;
    for op in &ops[last_sender_measure + 1..] {
        if let Operation::Barrier { .. } = op {
            continue;
        }
        assert_eq!(op.involved_qubits(), vec![RECEIVER], "{} touches the sender side", op);
    }
    Ok(())
}

#[test]
fn test_basis_messages_always_verify_for_every_correction_case() -> TestResult {
    // |0> and |1> messages; every (crz, crx) pair must occur and verify
    for theta in [0.0, PI] {
        let circuit = teleportation_circuit(theta)?;
        let histogram = Simulator::with_seed(17).execute(&circuit, 1000)?;

        for key in ["000", "001", "010", "011"] {
            assert!(histogram.get(key) > 0, "theta={} never produced {}", theta, key);
        }
        for key in ["100", "101", "110", "111"] {
            assert_eq!(histogram.get(key), 0, "theta={} failed verification in {}", theta, key);
        }
    }
    Ok(())
}

#[test]
fn test_default_experiment_is_successful() -> TestResult {
    let config = TeleportConfig::default().with_seed(Some(42));
    let outcome = run_experiment(&config, &Simulator::with_seed(42))?;

    assert_eq!(outcome.histogram.total(), 1000);
    assert!(outcome.report.ratio > 0.95);
    assert_eq!(outcome.report.classification, Classification::Successful);
    assert_eq!(outcome.report.to_string(), "Teleportation success rate: 1000/1000 = 100.00% (successful)");
    Ok(())
}

#[test]
fn test_arbitrary_angles_teleport() -> TestResult {
    for (i, angle) in [-2.5, 0.3, PI / 2.0, 4.0].into_iter().enumerate() {
        let config = TeleportConfig::default().with_angle(angle).with_shots(300);
        let outcome = run_experiment(&config, &Simulator::with_seed(i as u64))?;
        assert!(outcome.report.is_successful(), "angle {} -> {}", angle, outcome.report);
    }
    Ok(())
}

#[test]
fn test_swapped_guards_break_teleportation() -> TestResult {
    let theta = PI / 3.0;
    let swapped = CircuitBuilder::new(3)
        .add_register("crz")
        .add_register("crx")
        .add_register("cr_result")
        .add_op(Gate::Ry { target: MESSAGE, theta })
        .add_op(Gate::Hadamard { target: SENDER })
        .add_op(Gate::ControlledNot { control: SENDER, target: RECEIVER })
        .add_op(Gate::ControlledNot { control: MESSAGE, target: SENDER })
        .add_op(Gate::Hadamard { target: MESSAGE })
        .add_op(Operation::Measure { qubit: MESSAGE, clbit: CRZ })
        .add_op(Operation::Measure { qubit: SENDER, clbit: CRX })
        .add_op(Operation::Conditional { condition: Condition::is_set(CRX), gate: Gate::PauliZ { target: RECEIVER } })
        .add_op(Operation::Conditional { condition: Condition::is_set(CRZ), gate: Gate::PauliX { target: RECEIVER } })
        .add_op(Gate::Ry { target: RECEIVER, theta: -theta })
        .add_op(Operation::Measure { qubit: RECEIVER, clbit: CR_RESULT })
        .build()?;

    let histogram = Simulator::with_seed(8).execute(&swapped, 1000)?;
    let report = evaluate(&histogram, CR_RESULT)?;
    assert_eq!(report.classification, Classification::Failed);
    assert!(report.ratio < 0.7, "swapped guards still succeeded: {}", report);
    Ok(())
}

#[test]
fn test_invalid_configuration_never_reaches_executor() {
    struct Unreachable;
    impl Executor for Unreachable {
        fn execute(&self, _: &Circuit, _: u32) -> Result<Histogram, TeleportError> {
            panic!("executor called with an invalid configuration");
        }
    }

    let zero_shots = TeleportConfig::default().with_shots(0);
    assert!(matches!(
        run_experiment(&zero_shots, &Unreachable),
        Err(TeleportError::InvalidShotCount { .. })
    ));

    let nan_angle = TeleportConfig::default().with_angle(f64::NAN);
    assert!(matches!(run_experiment(&nan_angle, &Unreachable), Err(TeleportError::InvalidAngle { .. })));
}

/// Returns a fixed histogram regardless of the circuit.
struct Canned(Histogram);

impl Executor for Canned {
    fn execute(&self, _: &Circuit, _: u32) -> Result<Histogram, TeleportError> {
        Ok(self.0.clone())
    }
}

/// Always fails like an unavailable backend would.
struct Broken;

impl Executor for Broken {
    fn execute(&self, _: &Circuit, _: u32) -> Result<Histogram, TeleportError> {
        Err(TeleportError::Simulation { message: "backend unavailable".to_string() })
    }
}

#[test]
fn test_engine_failure_is_surfaced() {
    let config = TeleportConfig::default();
    let result = run_experiment(&config, &Broken);
    assert!(matches!(result, Err(TeleportError::Simulation { message }) if message == "backend unavailable"));
}

#[test]
fn test_malformed_engine_output_rejected() {
    let config = TeleportConfig::default().with_shots(10);

    let short_keys: Histogram = [("00".to_string(), 10)].into_iter().collect();
    assert!(matches!(
        run_experiment(&config, &Canned(short_keys)),
        Err(TeleportError::MalformedOutcome { .. })
    ));

    let lost_shots: Histogram = [("000".to_string(), 9)].into_iter().collect();
    assert!(matches!(
        run_experiment(&config, &Canned(lost_shots)),
        Err(TeleportError::ShotCountMismatch { expected: 10, actual: 9 })
    ));
}

#[test]
fn test_overflowing_engine_counts_rejected() {
    let histogram: Histogram = [("100".to_string(), u64::MAX), ("000".to_string(), 1001)]
        .into_iter()
        .collect();
    let result = run_experiment(&TeleportConfig::default(), &Canned(histogram));
    assert!(matches!(
        result,
        Err(TeleportError::ShotCountMismatch { expected: 1000, actual: u64::MAX })
    ));
}

#[test]
fn test_failed_classification_is_returned_not_raised() -> TestResult {
    let config = TeleportConfig::default().with_shots(10);
    let histogram: Histogram = [("000".to_string(), 5), ("100".to_string(), 5)].into_iter().collect();
    let outcome = run_experiment(&config, &Canned(histogram))?;
    assert_eq!(outcome.report.classification, Classification::Failed);
    assert_eq!(outcome.report.tally.successes, 5);
    Ok(())
}

#[test]
fn test_executor_trait_object() -> TestResult {
    let executor: Box<dyn Executor> = Box::new(Simulator::with_seed(3));
    let outcome = run_experiment(&TeleportConfig::default().with_shots(50), executor.as_ref())?;
    assert_eq!(outcome.histogram.total(), 50);
    Ok(())
}

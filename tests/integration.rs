//! End-to-end integration tests for the rulegate pipeline.
//!
//! These tests exercise the full path from candidate rule through grounding
//! validation, provenance annotation, and the sink, validating that the
//! oracle contract, annotator, and report APIs all work together.

use rulegate::error::{OracleError, PipelineError};
use rulegate::oracle::{MemorySignature, SignatureOracle};
use rulegate::pipeline::{IngestPipeline, PipelineConfig, RuleOutcome};
use rulegate::rule::{EntityName, Predicate, PredicateValue, Rule, RuleMetadata};
use rulegate::store::MemoryRuleStore;
use rulegate::validate::{is_grounded, missing_entities};

fn facility_signature() -> MemorySignature {
    let signature = MemorySignature::new();
    signature.insert_typed("Room_101", "Room");
    signature.insert_typed("Room_102", "Room");
    signature.insert_typed("Sensor_7", "TemperatureSensor");
    signature.insert_typed("Sensor_9", "HumiditySensor");
    signature.insert_typed("Setpoint_3", "Setpoint");
    signature.insert("Legacy_Damper"); // known but never classified
    signature
}

fn setpoint_rule(name: &str, sensor: &str, room: &str, weight: f64) -> Rule {
    Rule::new(name)
        .with_condition(vec![
            Predicate::new(sensor, "hasValue", PredicateValue::literal("26.0")),
            Predicate::new(sensor, "locatedIn", PredicateValue::entity(room)),
        ])
        .with_conclusion(vec![Predicate::new(
            room,
            "suggestedSetpoint",
            PredicateValue::literal("21.0"),
        )])
        .with_metadata(RuleMetadata::new("Specialization", "R1->R2", weight))
}

struct DownOracle;

impl SignatureOracle for DownOracle {
    fn exists(&self, _: &EntityName) -> Result<bool, OracleError> {
        Err(OracleError::Unreachable {
            reason: "connection refused".into(),
        })
    }

    fn most_specific_type(&self, _: &EntityName) -> Result<Option<String>, OracleError> {
        Err(OracleError::Unreachable {
            reason: "connection refused".into(),
        })
    }
}

#[test]
fn end_to_end_validate_annotate_store() {
    let signature = facility_signature();
    let pipeline = IngestPipeline::new(PipelineConfig::default());
    let mut sink = MemoryRuleStore::new();

    let candidates = vec![
        setpoint_rule("r-101", "Sensor_7", "Room_101", 0.75),
        setpoint_rule("r-unknown", "Sensor_7", "Unknown42", 0.9),
        setpoint_rule("r-102", "Sensor_9", "Room_102", 0.6),
    ];

    let report = pipeline.run(candidates, &signature, &mut sink).unwrap();

    // One rejection, two acceptances, reported in candidate order.
    assert_eq!(report.accepted(), 2);
    assert_eq!(report.rejected(), 1);
    assert_eq!(report.failed(), 0);
    match &report.outcomes[1] {
        RuleOutcome::Rejected {
            name,
            unknown_entities,
        } => {
            assert_eq!(name, "r-unknown");
            assert_eq!(unknown_entities, &vec![EntityName::new("Unknown42")]);
        }
        other => panic!("expected rejection, got {other:?}"),
    }

    // Rejected rules consume no ids: the accepted pair gets 1 and 2.
    assert_eq!(sink.len(), 2);
    assert_eq!(sink.rules()[0].0.name, "r-101");
    assert_eq!(sink.rules()[0].1.id, 1);
    assert_eq!(sink.rules()[0].1.suggestion, "Specialization R1->R2");
    assert_eq!(sink.rules()[0].1.weight, 0.75);
    assert_eq!(sink.rules()[1].0.name, "r-102");
    assert_eq!(sink.rules()[1].1.id, 2);

    // Both accepted rules suggest setpoints for rooms.
    assert_eq!(report.accepted_by_class.get("Room"), Some(&2));
}

#[test]
fn grounding_checks_operands_on_both_sides_only() {
    let signature = facility_signature();

    // Entity-valued right-hand sides are carried, not existence-checked.
    let values_free = Rule::new("values-free")
        .with_condition(vec![Predicate::new(
            "Sensor_7",
            "adjacentTo",
            PredicateValue::entity("Phantom_Zone"),
        )])
        .with_conclusion(vec![Predicate::new(
            "Room_101",
            "suggestedSetpoint",
            PredicateValue::literal("20.0"),
        )]);
    assert!(is_grounded(&values_free, &signature).unwrap());

    // An unknown conclusion operand rejects the whole rule.
    let bad = setpoint_rule("bad", "Sensor_7", "Unknown42", 0.9);
    assert!(!is_grounded(&bad, &signature).unwrap());
    assert_eq!(
        missing_entities(&bad, &signature).unwrap(),
        vec![EntityName::new("Unknown42")]
    );

    // Untyped individuals still ground rules; they just have no class.
    let untyped = setpoint_rule("untyped", "Legacy_Damper", "Room_101", 0.3);
    assert!(is_grounded(&untyped, &signature).unwrap());
}

#[test]
fn unreachable_oracle_is_an_error_not_a_rejection() {
    let rule = setpoint_rule("r-down", "Sensor_7", "Room_101", 0.75);

    let err = is_grounded(&rule, &DownOracle).unwrap_err();
    assert!(matches!(err, OracleError::Unreachable { .. }));

    // The pipeline surfaces the same failure instead of silently dropping rules.
    let pipeline = IngestPipeline::new(PipelineConfig::default());
    let mut sink = MemoryRuleStore::new();
    let result = pipeline.run(vec![rule], &DownOracle, &mut sink);
    assert!(matches!(result, Err(PipelineError::Oracle(_))));
    assert!(sink.is_empty());
}

#[test]
fn rejections_and_failures_keep_the_batch_flowing() {
    let signature = facility_signature();
    let pipeline = IngestPipeline::new(PipelineConfig::default());
    let mut sink = MemoryRuleStore::new();

    let mut bare = setpoint_rule("bare", "Sensor_7", "Room_101", 0.5);
    bare.metadata = None;

    let report = pipeline
        .run(
            vec![
                setpoint_rule("nope", "Sensor_7", "Unknown42", 0.9),
                bare,
                setpoint_rule("fine", "Sensor_9", "Room_102", 0.6),
            ],
            &signature,
            &mut sink,
        )
        .unwrap();

    assert!(matches!(report.outcomes[0], RuleOutcome::Rejected { .. }));
    assert!(matches!(report.outcomes[1], RuleOutcome::Failed { .. }));
    match &report.outcomes[2] {
        // Neither the rejection nor the failure consumed an id.
        RuleOutcome::Accepted { annotations, .. } => assert_eq!(annotations.id, 1),
        other => panic!("expected acceptance, got {other:?}"),
    }
}

#[test]
fn session_resume_continues_id_sequence() {
    let signature = facility_signature();
    let mut sink = MemoryRuleStore::new();

    // First session: two rules accepted, ids 1 and 2.
    let first = IngestPipeline::new(PipelineConfig::default());
    first
        .run(
            vec![
                setpoint_rule("r-1", "Sensor_7", "Room_101", 0.75),
                setpoint_rule("r-2", "Sensor_9", "Room_102", 0.6),
            ],
            &signature,
            &mut sink,
        )
        .unwrap();
    assert_eq!(sink.rules()[1].1.id, 2);

    // A restarted session seeds the annotator with the stored count.
    let resumed = IngestPipeline::new(PipelineConfig {
        initial_rule_count: sink.len() as u64,
        ..Default::default()
    });
    let report = resumed
        .run(
            vec![setpoint_rule("r-3", "Sensor_7", "Room_102", 0.5)],
            &signature,
            &mut sink,
        )
        .unwrap();

    match &report.outcomes[0] {
        RuleOutcome::Accepted { annotations, .. } => assert_eq!(annotations.id, 3),
        other => panic!("expected acceptance, got {other:?}"),
    }
}

#[test]
fn annotations_serialize_for_downstream_writers() {
    let signature = facility_signature();
    let pipeline = IngestPipeline::new(PipelineConfig::default());
    let mut sink = MemoryRuleStore::new();

    pipeline
        .run(
            vec![setpoint_rule("r-json", "Sensor_7", "Room_101", 0.75)],
            &signature,
            &mut sink,
        )
        .unwrap();

    let json = serde_json::to_value(&sink.rules()[0].1).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "id": 1,
            "suggestion": "Specialization R1->R2",
            "weight": 0.75,
        })
    );

    // Entity names serialize as bare strings.
    let name = serde_json::to_string(&EntityName::new("Room_101")).unwrap();
    assert_eq!(name, "\"Room_101\"");
}

// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # rulegate
//!
//! A gatekeeper between rule producers and a knowledge base: candidate
//! inference rules are grounded against the base's signature (every entity
//! they mention must exist) and accepted rules are stamped with provenance
//! annotations before being handed to a sink.
//!
//! ## Architecture
//!
//! - **Rule model** (`rule`): entity names, predicates, candidate rules, producer metadata
//! - **Predicate index** (`index`): groups a rule side's predicates by the entity they are about
//! - **Signature oracle** (`oracle`): existence/classification contract to the knowledge base
//! - **Grounding validation** (`validate`): rejects rules that mention unknown entities
//! - **Provenance annotation** (`annotate`): session-monotonic ids, suggestion text, weight passthrough
//! - **Ingestion pipeline** (`pipeline`): validate → annotate → store, with per-rule outcomes
//!
//! ## Library usage
//!
//! ```
//! use rulegate::oracle::MemorySignature;
//! use rulegate::pipeline::{IngestPipeline, PipelineConfig};
//! use rulegate::rule::{Predicate, PredicateValue, Rule, RuleMetadata};
//! use rulegate::store::MemoryRuleStore;
//!
//! let signature = MemorySignature::new();
//! signature.insert_typed("Room_101", "Room");
//! signature.insert_typed("Sensor_7", "TemperatureSensor");
//!
//! let rule = Rule::new("lower-setpoint")
//!     .with_condition(vec![Predicate::new(
//!         "Sensor_7",
//!         "hasValue",
//!         PredicateValue::literal("26.0"),
//!     )])
//!     .with_conclusion(vec![Predicate::new(
//!         "Room_101",
//!         "suggestedSetpoint",
//!         PredicateValue::literal("21.0"),
//!     )])
//!     .with_metadata(RuleMetadata::new("Specialization", "R1->R2", 0.75));
//!
//! let pipeline = IngestPipeline::new(PipelineConfig::default());
//! let mut sink = MemoryRuleStore::new();
//! let report = pipeline.run(vec![rule], &signature, &mut sink).unwrap();
//!
//! assert_eq!(report.accepted(), 1);
//! assert_eq!(sink.rules()[0].1.id, 1);
//! assert_eq!(sink.rules()[0].1.suggestion, "Specialization R1->R2");
//! ```

pub mod annotate;
pub mod error;
pub mod index;
pub mod oracle;
pub mod pipeline;
pub mod rule;
pub mod store;
pub mod validate;

//! Ingestion pipeline: validate, annotate, persist.
//!
//! The thin orchestration layer over the core. Candidate rules flow through
//! grounding validation; validated rules get provenance annotations and are
//! handed to the sink; everything else is routed into per-rule outcomes so
//! callers can log or quarantine without re-deriving the reason. This is the
//! only layer that emits `tracing` events — the core components below report
//! strictly to their caller.

use std::collections::HashMap;

use crate::annotate::{AnnotationSet, RuleAnnotator};
use crate::error::{OracleError, PipelineError};
use crate::oracle::SignatureOracle;
use crate::rule::{EntityName, Rule};
use crate::store::RuleSink;
use crate::validate;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for an ingestion session.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Number of rules annotated in previous sessions; ids resume after it
    /// (default: 0, so the first accepted rule gets id 1).
    pub initial_rule_count: u64,
    /// Abort the run on the first oracle transport failure (default) instead
    /// of recording a per-rule failure and continuing with the rest.
    pub halt_on_oracle_failure: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            initial_rule_count: 0,
            halt_on_oracle_failure: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// What happened to one candidate rule during a run.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleOutcome {
    /// Grounded, annotated, and handed to the sink.
    Accepted {
        name: String,
        annotations: AnnotationSet,
        /// Most specific class of the entity the rule's first conclusion
        /// predicate is about, when the oracle knows one. Downstream routing
        /// groups accepted suggestions by it.
        target_class: Option<String>,
    },
    /// References entities the signature does not know. Not an error.
    Rejected {
        name: String,
        unknown_entities: Vec<EntityName>,
    },
    /// Could not be processed: oracle down in continue mode, or metadata
    /// missing on a grounded rule. No annotation id was consumed.
    Failed { name: String, error: String },
}

/// Result of one ingestion run.
#[derive(Debug, Clone)]
pub struct IngestReport {
    /// Per-rule outcomes in candidate order.
    pub outcomes: Vec<RuleOutcome>,
    /// Accepted-rule tally keyed by target class.
    pub accepted_by_class: HashMap<String, usize>,
}

impl IngestReport {
    /// Number of accepted rules.
    pub fn accepted(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RuleOutcome::Accepted { .. }))
            .count()
    }

    /// Number of rejected rules.
    pub fn rejected(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RuleOutcome::Rejected { .. }))
            .count()
    }

    /// Number of rules that could not be processed.
    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RuleOutcome::Failed { .. }))
            .count()
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Feeds candidate rules through validation and annotation into a sink.
///
/// Owns the session's single [`RuleAnnotator`], so repeated [`run`](Self::run)
/// calls on one pipeline continue the same id sequence. The oracle and sink
/// are borrowed per run — the pipeline holds no handle to the knowledge base
/// between runs.
#[derive(Debug)]
pub struct IngestPipeline {
    config: PipelineConfig,
    annotator: RuleAnnotator,
}

impl IngestPipeline {
    /// Create a pipeline for a fresh ingestion session.
    pub fn new(config: PipelineConfig) -> Self {
        let annotator = RuleAnnotator::starting_from(config.initial_rule_count);
        Self { config, annotator }
    }

    /// Run one batch of candidate rules against the oracle, storing accepted
    /// rules in the sink.
    ///
    /// Per rule: unknown entities reject it; an unreachable oracle aborts the
    /// run or records a failure, per config; missing metadata on a grounded
    /// rule records a failure; a sink failure always aborts (ids already
    /// issued stay issued — annotations are never retracted).
    pub fn run<O, S>(
        &self,
        candidates: Vec<Rule>,
        oracle: &O,
        sink: &mut S,
    ) -> Result<IngestReport, PipelineError>
    where
        O: SignatureOracle + ?Sized,
        S: RuleSink + ?Sized,
    {
        let mut outcomes = Vec::with_capacity(candidates.len());
        let mut accepted_by_class: HashMap<String, usize> = HashMap::new();

        for rule in candidates {
            let unknown = match validate::missing_entities(&rule, oracle) {
                Ok(unknown) => unknown,
                Err(err) => {
                    if self.config.halt_on_oracle_failure {
                        return Err(err.into());
                    }
                    tracing::warn!(rule = %rule.name, error = %err, "oracle unavailable; rule left unchecked");
                    outcomes.push(RuleOutcome::Failed {
                        name: rule.name,
                        error: err.to_string(),
                    });
                    continue;
                }
            };

            if !unknown.is_empty() {
                tracing::debug!(rule = %rule.name, unknown = ?unknown, "rule rejected: unknown entities");
                outcomes.push(RuleOutcome::Rejected {
                    name: rule.name,
                    unknown_entities: unknown,
                });
                continue;
            }

            let target_class = match target_class(&rule, oracle) {
                Ok(class) => class,
                Err(err) => {
                    if self.config.halt_on_oracle_failure {
                        return Err(err.into());
                    }
                    tracing::warn!(rule = %rule.name, error = %err, "oracle unavailable; rule left unchecked");
                    outcomes.push(RuleOutcome::Failed {
                        name: rule.name,
                        error: err.to_string(),
                    });
                    continue;
                }
            };

            let annotations = match self.annotator.annotate(&rule) {
                Ok(annotations) => annotations,
                Err(err) => {
                    tracing::warn!(rule = %rule.name, error = %err, "grounded rule failed annotation");
                    outcomes.push(RuleOutcome::Failed {
                        name: rule.name,
                        error: err.to_string(),
                    });
                    continue;
                }
            };

            sink.store(&rule, &annotations)?;

            if let Some(class) = &target_class {
                *accepted_by_class.entry(class.clone()).or_insert(0) += 1;
            }
            tracing::info!(
                rule = %rule.name,
                id = annotations.id,
                weight = annotations.weight,
                class = target_class.as_deref().unwrap_or("-"),
                "rule accepted"
            );
            outcomes.push(RuleOutcome::Accepted {
                name: rule.name,
                annotations,
                target_class,
            });
        }

        Ok(IngestReport {
            outcomes,
            accepted_by_class,
        })
    }
}

/// Most specific class of the entity the rule's first conclusion predicate is
/// about. Empty conclusions have no target.
fn target_class<O>(rule: &Rule, oracle: &O) -> Result<Option<String>, OracleError>
where
    O: SignatureOracle + ?Sized,
{
    match rule.conclusion.first() {
        Some(predicate) => oracle.most_specific_type(&predicate.operand),
        None => Ok(None),
    }
}

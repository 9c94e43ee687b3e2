//! Persistence boundary for accepted rules.
//!
//! The gate never writes the knowledge base itself — it hands every accepted
//! rule, together with its freshly issued annotations, to a [`RuleSink`]. What
//! the sink does with them (ontology axioms, database rows, a queue) is its
//! own business. [`MemoryRuleStore`] is the bundled in-memory sink for tests
//! and embedded use.

use crate::annotate::AnnotationSet;
use crate::error::SinkError;
use crate::rule::Rule;

/// Writer boundary an ingestion run hands accepted rules to.
///
/// `store` is called once per accepted rule, in acceptance order, with the
/// annotations already attached. Implementations own durability and encoding.
pub trait RuleSink: Send {
    /// Persist an accepted rule and its annotations.
    fn store(&mut self, rule: &Rule, annotations: &AnnotationSet) -> Result<(), SinkError>;
}

/// In-memory sink recording accepted rules in acceptance order.
#[derive(Debug, Default)]
pub struct MemoryRuleStore {
    accepted: Vec<(Rule, AnnotationSet)>,
}

impl MemoryRuleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepted rules with their annotations, in acceptance order.
    pub fn rules(&self) -> &[(Rule, AnnotationSet)] {
        &self.accepted
    }

    /// Number of stored rules.
    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    /// Whether nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }
}

impl RuleSink for MemoryRuleStore {
    fn store(&mut self, rule: &Rule, annotations: &AnnotationSet) -> Result<(), SinkError> {
        self.accepted.push((rule.clone(), annotations.clone()));
        Ok(())
    }
}

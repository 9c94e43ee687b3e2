//! Provenance annotations for accepted rules.
//!
//! Every rule that passes grounding gets exactly three generated facts: a
//! session-unique id, a human-readable suggestion text derived from the
//! producer metadata, and the confidence weight carried over verbatim. The
//! [`RuleAnnotator`] owns the only mutable state in the crate — a monotonic
//! atomic counter — so ids stay unique and gap-free however many threads
//! annotate concurrently.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::AnnotateError;
use crate::rule::Rule;

/// The three provenance facts attached to an accepted rule.
///
/// This is what the knowledge-base writer receives alongside the rule; how it
/// is encoded on disk or on the wire is the writer's business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSet {
    /// Session-global id, strictly increasing, 1-based from the configured
    /// start. Never reused, never renumbered.
    pub id: u64,
    /// Classification label and reduction description, space-joined.
    pub suggestion: String,
    /// Producer confidence, copied unchanged — no clamping, no rounding.
    pub weight: f64,
}

/// Issues provenance annotations with monotonically increasing ids.
///
/// Holds the session's id counter; create exactly one per ingestion session
/// and share it by reference. Nothing else reads or writes the counter, and
/// the only thing that moves it is a successful
/// [`annotate`](Self::annotate) call.
#[derive(Debug)]
pub struct RuleAnnotator {
    next: AtomicU64,
}

impl RuleAnnotator {
    /// Create an annotator whose first issued id is 1.
    pub fn new() -> Self {
        Self::starting_from(0)
    }

    /// Resume a session in which `already_annotated` rules were numbered: the
    /// next issued id is `already_annotated + 1`.
    pub fn starting_from(already_annotated: u64) -> Self {
        Self {
            next: AtomicU64::new(already_annotated),
        }
    }

    /// Produce the annotation facts for a rule that passed grounding.
    ///
    /// The caller vouches for the rule: annotation does not re-validate.
    /// The metadata check comes first so a malformed rule fails fast without
    /// consuming an id — issued ids have no gaps beyond the rules actually
    /// annotated. Then, in fixed order: the id is drawn from the counter, the
    /// suggestion is built as `"{kind} {reduction}"` with exactly one joining
    /// space and no trimming, and the weight is copied through as-is.
    pub fn annotate(&self, rule: &Rule) -> Result<AnnotationSet, AnnotateError> {
        let metadata = rule
            .metadata
            .as_ref()
            .ok_or_else(|| AnnotateError::MissingMetadata {
                rule: rule.name.clone(),
            })?;

        // Relaxed suffices: only uniqueness and monotonicity matter, the id
        // orders no other memory.
        let id = self.next.fetch_add(1, Ordering::Relaxed) + 1;

        Ok(AnnotationSet {
            id,
            suggestion: format!("{} {}", metadata.kind, metadata.reduction),
            weight: metadata.weight,
        })
    }
}

impl Default for RuleAnnotator {
    fn default() -> Self {
        Self::new()
    }
}

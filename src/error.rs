//! Rich diagnostic error types for the rule gate.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]`
//! derives — error codes and help text — so callers can route failures without
//! string matching. Rejection of a rule is *not* an error anywhere in this
//! crate: it is a normal `false`/outcome, and only infrastructure failures
//! land here.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the rule gate.
///
/// Each variant wraps a subsystem-specific error, preserving the full
/// diagnostic chain through to the caller.
#[derive(Debug, Error, Diagnostic)]
pub enum RulegateError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Annotate(#[from] AnnotateError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Sink(#[from] SinkError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Pipeline(#[from] PipelineError),
}

// ---------------------------------------------------------------------------
// Oracle errors
// ---------------------------------------------------------------------------

/// Failure to *query* the knowledge base.
///
/// These are transport-level faults, strictly distinct from a negative answer:
/// an entity that is simply not in the signature comes back as a normal
/// `Ok(false)` / `Ok(None)`, never as a variant here. Callers must never treat
/// "could not check" as "does not exist".
#[derive(Debug, Error, Diagnostic)]
pub enum OracleError {
    #[error("knowledge base unreachable: {reason}")]
    #[diagnostic(
        code(rulegate::oracle::unreachable),
        help(
            "The signature oracle could not be queried (connectivity, upstream \
             timeout, store offline). The rule was NOT rejected — retry the \
             validation once the knowledge base is reachable again."
        )
    )]
    Unreachable { reason: String },

    #[error("knowledge base answered malformed: {message}")]
    #[diagnostic(
        code(rulegate::oracle::malformed),
        help(
            "The oracle returned an answer the gate could not interpret. This \
             usually means a corrupt store or a version mismatch between the \
             gate and the knowledge base."
        )
    )]
    Malformed { message: String },
}

// ---------------------------------------------------------------------------
// Annotation errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum AnnotateError {
    #[error("rule '{rule}' carries no metadata; cannot derive provenance annotations")]
    #[diagnostic(
        code(rulegate::annotate::missing_metadata),
        help(
            "Annotation needs the producer metadata (classification, reduction, \
             weight) to build the suggestion text. Attach RuleMetadata to the \
             rule before ingesting it. No annotation id was consumed."
        )
    )]
    MissingMetadata { rule: String },
}

// ---------------------------------------------------------------------------
// Sink errors
// ---------------------------------------------------------------------------

/// Failure at the persistence boundary accepted rules are handed to.
#[derive(Debug, Error, Diagnostic)]
pub enum SinkError {
    #[error("rule sink unavailable: {reason}")]
    #[diagnostic(
        code(rulegate::sink::unavailable),
        help(
            "The knowledge-base writer could not be reached. Annotation ids \
             already issued in this session stay issued; re-run ingestion for \
             the rules that were not stored."
        )
    )]
    Unavailable { reason: String },

    #[error("failed to store accepted rule: {message}")]
    #[diagnostic(
        code(rulegate::sink::write),
        help("The writer rejected the rule or its annotations. Check the sink's own logs.")
    )]
    Write { message: String },
}

// ---------------------------------------------------------------------------
// Pipeline errors
// ---------------------------------------------------------------------------

/// Errors surfaced by the ingestion pipeline.
///
/// The pipeline adds no failure modes of its own — it routes the subsystem
/// failures of the rules it feeds through.
#[derive(Debug, Error, Diagnostic)]
pub enum PipelineError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Annotate(#[from] AnnotateError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Sink(#[from] SinkError),
}

/// Convenience alias for functions returning rule-gate results.
pub type RulegateResult<T> = std::result::Result<T, RulegateError>;

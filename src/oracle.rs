//! Signature oracle: the narrow query contract onto the knowledge base.
//!
//! The gate never owns or mutates the knowledge base — it consumes exactly two
//! capabilities: signature membership and most-specific-type lookup. Anything
//! the backing store can do beyond that (reasoning, persistence, namespaces)
//! stays behind the implementation.
//!
//! [`MemorySignature`] is the bundled in-memory implementation, suitable for
//! tests and for embedding the gate without a live knowledge base.

use dashmap::DashMap;

use crate::error::OracleError;
use crate::rule::EntityName;

/// Query interface onto the knowledge base's current signature.
///
/// Absence is an answer, not a failure: a name that is simply unknown comes
/// back as `Ok(false)` / `Ok(None)`. An `Err` always means the question itself
/// could not be asked (transport failure, corrupt store) and must never be
/// collapsed into non-existence by callers.
pub trait SignatureOracle: Send + Sync {
    /// Whether `entity` names a known individual in the current signature.
    fn exists(&self, entity: &EntityName) -> Result<bool, OracleError>;

    /// The most specific known classification of the individual, or `None` if
    /// the individual is absent or untyped.
    ///
    /// Not consulted by the grounding decision — this capability exists for
    /// callers that route accepted rules by the class of the entity they
    /// target.
    fn most_specific_type(&self, entity: &EntityName) -> Result<Option<String>, OracleError>;
}

/// Thread-safe in-memory signature: entity name → optional declared class.
///
/// Backed by a `DashMap` so ingestion and validation can run concurrently with
/// signature growth. The backend is infallible — trait methods always answer.
#[derive(Debug, Default)]
pub struct MemorySignature {
    entries: DashMap<EntityName, Option<String>>,
}

impl MemorySignature {
    /// Create an empty signature.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an untyped individual.
    pub fn insert(&self, name: impl Into<EntityName>) {
        self.entries.insert(name.into(), None);
    }

    /// Register an individual with its most specific class.
    pub fn insert_typed(&self, name: impl Into<EntityName>, class: impl Into<String>) {
        self.entries.insert(name.into(), Some(class.into()));
    }

    /// Snapshot of every individual currently in the signature.
    pub fn individuals(&self) -> Vec<EntityName> {
        self.entries.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Number of individuals in the signature.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the signature is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SignatureOracle for MemorySignature {
    fn exists(&self, entity: &EntityName) -> Result<bool, OracleError> {
        Ok(self.entries.contains_key(entity))
    }

    fn most_specific_type(&self, entity: &EntityName) -> Result<Option<String>, OracleError> {
        Ok(self
            .entries
            .get(entity)
            .and_then(|entry| entry.value().clone()))
    }
}

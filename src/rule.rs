//! Core data model for candidate inference rules.
//!
//! A [`Rule`] carries a condition and a conclusion, each a flat set of
//! [`Predicate`]s, plus optional [`RuleMetadata`] describing how the rule was
//! proposed. Rules are immutable inputs: the gate derives facts about them and
//! for them, it never rewrites them.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Entity name
// ---------------------------------------------------------------------------

/// Opaque token naming an individual, class, or property in the knowledge
/// base's namespace.
///
/// The gate compares these by value only. Namespace qualification (IRI
/// prefixing and the like) is the oracle implementation's business.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityName(String);

impl EntityName {
    /// Create an entity name from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for EntityName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for EntityName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Predicate
// ---------------------------------------------------------------------------

/// Right-hand side of a predicate: another named entity, or a literal constant
/// such as a setpoint or threshold.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredicateValue {
    /// Names another individual in the knowledge base.
    Entity(EntityName),
    /// A scalar constant carried verbatim.
    Literal(String),
}

impl PredicateValue {
    /// Shorthand for an entity-valued right-hand side.
    pub fn entity(name: impl Into<EntityName>) -> Self {
        Self::Entity(name.into())
    }

    /// Shorthand for a literal right-hand side.
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }
}

/// A single fact-shaped statement `(operand, relation, value)` inside a rule's
/// condition or conclusion.
///
/// The `operand` is the entity the predicate classifies or constrains — the
/// grouping key for [`PredicateIndex`](crate::index::PredicateIndex) and the
/// only position that participates in grounding. Values are never
/// existence-checked, even when they name entities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Predicate {
    /// The entity this predicate is about.
    pub operand: EntityName,
    /// The relation or property connecting operand and value.
    pub relation: String,
    /// The right-hand side.
    pub value: PredicateValue,
}

impl Predicate {
    /// Create a new predicate.
    pub fn new(
        operand: impl Into<EntityName>,
        relation: impl Into<String>,
        value: PredicateValue,
    ) -> Self {
        Self {
            operand: operand.into(),
            relation: relation.into(),
            value,
        }
    }
}

// ---------------------------------------------------------------------------
// Rule metadata
// ---------------------------------------------------------------------------

/// Classification metadata attached to a candidate rule by its producer.
///
/// The weight is a confidence in `[0, 1]` by producer contract. The gate never
/// validates or clamps it — an out-of-range value passes through annotation
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleMetadata {
    /// Classification label (e.g. "Specialization").
    pub kind: String,
    /// Description of the reduction or derivation that produced the rule.
    pub reduction: String,
    /// Confidence weight assigned by the producer.
    pub weight: f64,
}

impl RuleMetadata {
    /// Create metadata for a candidate rule.
    pub fn new(kind: impl Into<String>, reduction: impl Into<String>, weight: f64) -> Self {
        Self {
            kind: kind.into(),
            reduction: reduction.into(),
            weight,
        }
    }
}

// ---------------------------------------------------------------------------
// Rule
// ---------------------------------------------------------------------------

/// A candidate inference rule: match the condition, assert the conclusion.
///
/// The name is a diagnostic handle only — outcomes and errors cite it, the
/// grounding decision ignores it. Metadata may be absent on malformed input;
/// annotation is the point where its absence becomes an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    pub condition: Vec<Predicate>,
    pub conclusion: Vec<Predicate>,
    pub metadata: Option<RuleMetadata>,
}

impl Rule {
    /// Create an empty rule with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            condition: Vec::new(),
            conclusion: Vec::new(),
            metadata: None,
        }
    }

    /// Set the condition predicates.
    pub fn with_condition(mut self, condition: Vec<Predicate>) -> Self {
        self.condition = condition;
        self
    }

    /// Set the conclusion predicates.
    pub fn with_conclusion(mut self, conclusion: Vec<Predicate>) -> Self {
        self.conclusion = conclusion;
        self
    }

    /// Attach producer metadata.
    pub fn with_metadata(mut self, metadata: RuleMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

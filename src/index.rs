//! Predicate grouping by left-hand operand.
//!
//! A [`PredicateIndex`] partitions a flat collection of predicates into groups
//! sharing the same operand — the entity each predicate is about. It is built
//! fresh for every validation call over borrowed predicates, never mutated
//! afterwards, and dropped with the call that built it. Grouping is pure and
//! in-memory; no oracle is involved.

use std::collections::HashMap;

use crate::rule::{EntityName, Predicate};

/// One group of an index: every predicate whose operand equals `operand`, in
/// source insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct PredicateGroup<'a> {
    /// The shared left-hand operand.
    pub operand: &'a EntityName,
    /// The predicates about that operand, in the order they appeared.
    pub predicates: Vec<&'a Predicate>,
}

/// Mapping operand → ordered sequence of predicates sharing that operand.
///
/// Groups iterate in first-seen order so diagnostics are reproducible; the
/// grounding decision itself never depends on that order. Each predicate lands
/// in exactly one group (the key is its own operand, no transitive closure),
/// and equal operand tokens share a group regardless of where they appeared.
#[derive(Debug, Clone)]
pub struct PredicateIndex<'a> {
    /// Groups in first-seen insertion order.
    groups: Vec<PredicateGroup<'a>>,
    /// Operand → slot in `groups` for O(1) lookup during construction.
    by_operand: HashMap<&'a EntityName, usize>,
}

impl<'a> PredicateIndex<'a> {
    /// Partition `predicates` into groups keyed by operand. O(n) in the number
    /// of predicates.
    pub fn group_by_operand<I>(predicates: I) -> Self
    where
        I: IntoIterator<Item = &'a Predicate>,
    {
        let mut groups: Vec<PredicateGroup<'a>> = Vec::new();
        let mut by_operand: HashMap<&'a EntityName, usize> = HashMap::new();

        for predicate in predicates {
            match by_operand.get(&predicate.operand) {
                Some(&slot) => groups[slot].predicates.push(predicate),
                None => {
                    by_operand.insert(&predicate.operand, groups.len());
                    groups.push(PredicateGroup {
                        operand: &predicate.operand,
                        predicates: vec![predicate],
                    });
                }
            }
        }

        Self { groups, by_operand }
    }

    /// The groups, in first-seen insertion order.
    pub fn groups(&self) -> &[PredicateGroup<'a>] {
        &self.groups
    }

    /// The group keys (distinct operands), in first-seen insertion order.
    pub fn operands(&self) -> impl Iterator<Item = &'a EntityName> + '_ {
        self.groups.iter().map(|group| group.operand)
    }

    /// Look up the group for an operand.
    pub fn get(&self, operand: &EntityName) -> Option<&PredicateGroup<'a>> {
        self.by_operand.get(operand).map(|&slot| &self.groups[slot])
    }

    /// Whether any predicate in the index is about `operand`.
    pub fn contains(&self, operand: &EntityName) -> bool {
        self.by_operand.contains_key(operand)
    }

    /// Number of groups (distinct operands).
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of predicates across all groups.
    pub fn predicate_count(&self) -> usize {
        self.groups.iter().map(|group| group.predicates.len()).sum()
    }

    /// Whether the index holds no predicates at all.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

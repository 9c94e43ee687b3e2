//! Grounding validation: is every entity a rule references known?
//!
//! A rule is *grounded* when every operand appearing anywhere in its condition
//! or conclusion exists in the knowledge base's current signature. One unknown
//! operand on either side rejects the whole rule. Rejection is a normal
//! boolean answer; only a failure to *ask* the oracle is an error.
//!
//! Both entry points are pure, total functions of `(rule, oracle)`: indices
//! are built fresh per call, nothing is memoized across calls, and within one
//! call each distinct operand is queried at most once.

use std::collections::HashSet;

use crate::error::OracleError;
use crate::index::PredicateIndex;
use crate::oracle::SignatureOracle;
use crate::rule::{EntityName, Rule};

/// Decide whether `rule` is fully grounded in known entities.
///
/// Groups the condition and conclusion predicates by operand, then asks the
/// oracle for each distinct operand across both sides, short-circuiting to
/// `Ok(false)` at the first unknown. A rule with an empty condition or
/// conclusion is vacuously grounded on that side; a rule empty on both sides
/// is grounded without the oracle ever being queried.
///
/// `Err` means the oracle could not be consulted — never that the rule was
/// rejected.
pub fn is_grounded<O>(rule: &Rule, oracle: &O) -> Result<bool, OracleError>
where
    O: SignatureOracle + ?Sized,
{
    let condition = PredicateIndex::group_by_operand(&rule.condition);
    let conclusion = PredicateIndex::group_by_operand(&rule.conclusion);

    let mut checked: HashSet<&EntityName> = HashSet::new();
    for operand in condition.operands().chain(conclusion.operands()) {
        if !checked.insert(operand) {
            continue;
        }
        if !oracle.exists(operand)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Collect every unknown operand in `rule`, deduplicated, in first-seen order
/// (condition groups before conclusion groups).
///
/// The diagnostic companion to [`is_grounded`]: where the boolean answer
/// short-circuits, this scans the whole rule so rejection reports can name
/// everything that is missing. An empty result means the rule is grounded.
pub fn missing_entities<O>(rule: &Rule, oracle: &O) -> Result<Vec<EntityName>, OracleError>
where
    O: SignatureOracle + ?Sized,
{
    let condition = PredicateIndex::group_by_operand(&rule.condition);
    let conclusion = PredicateIndex::group_by_operand(&rule.conclusion);

    let mut checked: HashSet<&EntityName> = HashSet::new();
    let mut missing = Vec::new();
    for operand in condition.operands().chain(conclusion.operands()) {
        if !checked.insert(operand) {
            continue;
        }
        if !oracle.exists(operand)? {
            missing.push(operand.clone());
        }
    }
    Ok(missing)
}

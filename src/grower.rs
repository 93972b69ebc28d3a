//! Grower
//!
//! Greedy, depth-first growth of a decision tree from a record table.
use crate::criterion::SplitCriterion;
use crate::data::RecordTable;
use crate::errors::BdtreeError;
use crate::node::Node;
use log::trace;

/// Attribute with the strictly largest positive gain, if any.
///
/// Attributes are scanned in header order and a later attribute only replaces
/// the current best when its gain is strictly greater, so ties go to the
/// attribute that comes first in the header.
pub fn best_split<'a>(
    table: &'a RecordTable,
    criterion: SplitCriterion,
) -> Result<Option<(&'a str, f64)>, BdtreeError> {
    let mut best: Option<(&str, f64)> = None;
    let mut best_gain = 0.0;
    for attribute in table.available_attributes() {
        let gain = table.gain(attribute, criterion)?;
        if gain > best_gain {
            best_gain = gain;
            best = Some((attribute, gain));
        }
    }
    Ok(best)
}

/// Grow a tree from `table`.
///
/// A leaf is produced when the table is pure under `criterion`, when no
/// attribute is left to split on, or when no attribute has a positive gain.
/// Otherwise the best attribute becomes a decision node whose children are
/// grown from the rows where it is 0 (left) and 1 (right).
pub fn grow(table: &RecordTable, criterion: SplitCriterion) -> Result<Node, BdtreeError> {
    let score = table.score(criterion)?;
    let majority_class = table.majority_class();
    if score == 0.0 || table.attributes().is_empty() {
        return Ok(Node::leaf(majority_class, score));
    }
    let (attribute, gain) = match best_split(table, criterion)? {
        Some(split) => split,
        None => return Ok(Node::leaf(majority_class, score)),
    };
    trace!("splitting {} rows on {} with gain {}", table.n_rows(), attribute, gain);
    let left = grow(&table.split(attribute, 0)?, criterion)?;
    let right = grow(&table.split(attribute, 1)?, criterion)?;
    Ok(Node::decision(
        attribute.to_string(),
        majority_class,
        score,
        gain,
        left,
        right,
    ))
}

//! Criterion
//!
//! Split-quality measures computed from the positive and negative class counts
//! of a set of rows, and the selector choosing between them.
use crate::errors::BdtreeError;
use crate::utils::items_to_strings;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type ScoreFn = fn(usize, usize) -> f64;

/// Measure used to score a table and the gain of splitting it.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitCriterion {
    /// Shannon entropy of the class labels, base 2 (ID3).
    #[default]
    Entropy,
    /// Variance impurity, `(positive * negative) / total^2`.
    Impurity,
}

impl FromStr for SplitCriterion {
    type Err = BdtreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Entropy" | "entropy" | "ID3" => Ok(SplitCriterion::Entropy),
            "Impurity" | "impurity" | "Variance" => Ok(SplitCriterion::Impurity),
            _ => Err(BdtreeError::ParseString(
                s.to_string(),
                "SplitCriterion".to_string(),
                items_to_strings(vec!["Entropy", "Impurity"]),
            )),
        }
    }
}

impl fmt::Display for SplitCriterion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            SplitCriterion::Entropy => "Entropy",
            SplitCriterion::Impurity => "Impurity",
        };
        write!(f, "{}", name)
    }
}

pub fn score_callables(criterion: &SplitCriterion) -> ScoreFn {
    match criterion {
        SplitCriterion::Entropy => Entropy::score,
        SplitCriterion::Impurity => VarianceImpurity::score,
    }
}

pub trait DisorderMeasure {
    /// Disorder of a set holding `positive` rows of class 1 and `negative` rows of class 0.
    /// A set with no rows scores zero; callers weight it by its (zero) share of rows.
    fn score(positive: usize, negative: usize) -> f64;
}

#[derive(Default)]
pub struct Entropy {}

impl DisorderMeasure for Entropy {
    #[inline]
    fn score(positive: usize, negative: usize) -> f64 {
        let total = positive + negative;
        if total == 0 {
            return 0.0;
        }
        if positive == negative {
            return 1.0;
        }
        if positive == 0 || negative == 0 {
            return 0.0;
        }
        let pos_prob = positive as f64 / total as f64;
        let neg_prob = negative as f64 / total as f64;
        -(pos_prob * pos_prob.log2() + neg_prob * neg_prob.log2())
    }
}

#[derive(Default)]
pub struct VarianceImpurity {}

impl DisorderMeasure for VarianceImpurity {
    #[inline]
    fn score(positive: usize, negative: usize) -> f64 {
        let total = positive + negative;
        if total == 0 {
            return 0.0;
        }
        (positive as f64 * negative as f64) / (total as f64).powi(2)
    }
}

/// Parent score minus the row-weighted score of the two children, never below zero.
///
/// * `counts` - `[value][class]` counts, i.e. `counts[0][1]` is the number of
///   rows where the attribute is 0 and the class is 1.
#[inline]
pub fn split_gain(parent_score: f64, counts: &[[usize; 2]; 2], score: ScoreFn) -> f64 {
    let size = counts.iter().flatten().sum::<usize>() as f64;
    let weighted = counts
        .iter()
        .map(|c| {
            let n = c[0] + c[1];
            n as f64 / size * score(c[1], c[0])
        })
        .sum::<f64>();
    // Rounding can leave a split that keeps the class ratio a hair below zero.
    (parent_score - weighted).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_entropy_special_cases() {
        assert_eq!(Entropy::score(5, 5), 1.0);
        assert_eq!(Entropy::score(7, 0), 0.0);
        assert_eq!(Entropy::score(0, 3), 0.0);
        assert_eq!(Entropy::score(0, 0), 0.0);
    }

    #[test]
    fn test_entropy_mixed() {
        assert_relative_eq!(Entropy::score(3, 1), 0.811278124459133, epsilon = 1e-12);
        assert_relative_eq!(Entropy::score(1, 3), Entropy::score(3, 1));
    }

    #[test]
    fn test_impurity() {
        assert_eq!(VarianceImpurity::score(4, 0), 0.0);
        assert_eq!(VarianceImpurity::score(2, 2), 0.25);
        assert_eq!(VarianceImpurity::score(3, 1), 0.1875);
    }

    #[test]
    fn test_split_gain() {
        // A split that separates one mixed half from one pure half.
        let counts = [[1, 1], [0, 2]];
        let parent = Entropy::score(3, 1);
        assert_relative_eq!(split_gain(parent, &counts, Entropy::score), parent - 0.5, epsilon = 1e-12);
        // A split that changes nothing has no gain.
        let counts = [[1, 1], [1, 1]];
        assert_eq!(split_gain(1.0, &counts, Entropy::score), 0.0);
        // Same 3:2 ratio on both sides as in the parent.
        let counts = [[2, 3], [8, 12]];
        let parent = Entropy::score(15, 10);
        assert!(split_gain(parent, &counts, Entropy::score) >= 0.0);
        let parent = VarianceImpurity::score(15, 10);
        assert!(split_gain(parent, &counts, VarianceImpurity::score) >= 0.0);
    }

    #[test]
    fn test_criterion_from_str() {
        assert_eq!("ID3".parse::<SplitCriterion>().unwrap(), SplitCriterion::Entropy);
        assert_eq!("impurity".parse::<SplitCriterion>().unwrap(), SplitCriterion::Impurity);
        assert!(matches!(
            "gini".parse::<SplitCriterion>(),
            Err(BdtreeError::ParseString(..))
        ));
        assert_eq!(SplitCriterion::default(), SplitCriterion::Entropy);
        assert_eq!(SplitCriterion::Impurity.to_string(), "Impurity");
    }
}

//! Errors
//!
//! Custom error types used throughout the `bdtree` crate.
use thiserror::Error;

/// Errors that can occur while building, scoring or pruning a decision tree.
#[derive(Debug, Error, PartialEq)]
pub enum BdtreeError {
    /// Gain or split requested on an attribute that is not available for splitting.
    #[error("Attribute {0} is not available for splitting in this table.")]
    InvalidAttribute(String),
    /// A statistic that needs at least one row was requested on an empty table.
    #[error("The table has no rows.")]
    EmptyTable,
    /// The tree was used before it was trained.
    #[error("The decision tree has not been trained.")]
    UntrainedTree,
    /// First value is the name of the parameter, second is expected, third is what was passed.
    #[error("Invalid parameter value passed for {0}, expected {1} but {2} provided.")]
    InvalidParameter(String, String, String),
    /// A row that violates the table invariants, with its position.
    #[error("Invalid row {0}: {1}")]
    InvalidRow(usize, String),
    /// Invalid value parsing.
    #[error("Invalid value {0} passed for {1}, expected one of {2}.")]
    ParseString(String, String, String),
    /// Unable to read data or configuration.
    #[error("Unable to read from {0}")]
    UnableToRead(String),
}

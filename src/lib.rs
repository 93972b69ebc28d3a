mod prune;

// Modules
pub mod config;
pub mod constants;
pub mod criterion;
pub mod data;
pub mod errors;
pub mod grower;
pub mod metric;
pub mod node;
pub mod reader;
pub mod tree;
pub mod utils;

// Individual classes, and functions
pub use config::TreeConfig;
pub use criterion::SplitCriterion;
pub use data::RecordTable;
pub use errors::BdtreeError;
pub use reader::read_csv;
pub use tree::{train, DecisionTree};

pub const DEFAULT_PRUNE_TRIALS: usize = 10;
pub const DEFAULT_MAX_PRUNE: usize = 5;
pub const DEFAULT_SEED: u64 = 0;
pub const DEFAULT_DELIMITER: u8 = b',';
pub const BRANCH_PREFIX: &str = "| ";

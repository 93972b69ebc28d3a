use crate::config::TreeConfig;
use crate::data::RecordTable;
use crate::errors::BdtreeError;
use crate::tree::DecisionTree;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

impl DecisionTree {
    /// Randomized reduced-error pruning.
    ///
    /// Runs `trials` independent trials on copies of this tree. Each trial draws
    /// a budget `m` uniformly from `[1, max_prune - 1]` and then, up to `m`
    /// times, turns a uniformly chosen decision node other than the root into
    /// a leaf. The copy scoring the highest accuracy on `validation` is
    /// returned; a pruned copy replaces the current best only when it scores
    /// strictly higher, so the result never does worse than this tree.
    ///
    /// * `trials` - Number of pruned copies to try.
    /// * `max_prune` - Exclusive upper bound on the nodes pruned per trial, at least 2.
    /// * `validation` - Held-out rows used to score each copy.
    /// * `rng` - Source of randomness for the budget and the node choices.
    pub fn prune<R: Rng>(
        &self,
        trials: usize,
        max_prune: usize,
        validation: &RecordTable,
        rng: &mut R,
    ) -> Result<DecisionTree, BdtreeError> {
        validate_max_prune(max_prune)?;
        let initial_accuracy = self.accuracy(validation)?;
        let mut best_tree = self.clone();
        let mut best_accuracy = initial_accuracy;

        for trial in 0..trials {
            let mut candidate = self.clone();
            let budget = rng.gen_range(1..max_prune);
            let root = candidate.root_mut()?;
            let mut pruned = 0;
            while pruned < budget && !root.is_leaf() {
                let n_internal = root.n_internal();
                if n_internal < 2 {
                    break;
                }
                // The root, first in pre-order, is never pruned.
                let target = rng.gen_range(1..n_internal);
                root.make_leaf_at(target);
                pruned += 1;
            }
            let accuracy = candidate.accuracy(validation)?;
            debug!(
                "prune trial {}: {} of {} nodes pruned, accuracy {}",
                trial, pruned, budget, accuracy
            );
            if accuracy > best_accuracy {
                best_accuracy = accuracy;
                best_tree = candidate;
            }
        }

        info!(
            "pruned over {} trials: validation accuracy {} -> {}, nodes {} -> {}",
            trials,
            initial_accuracy,
            best_accuracy,
            self.n_nodes(),
            best_tree.n_nodes()
        );
        Ok(best_tree)
    }

    /// Prune with a random generator seeded from `seed`.
    pub fn prune_seeded(
        &self,
        trials: usize,
        max_prune: usize,
        validation: &RecordTable,
        seed: u64,
    ) -> Result<DecisionTree, BdtreeError> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.prune(trials, max_prune, validation, &mut rng)
    }

    /// Prune with the trials, bound and seed from `config`.
    pub fn prune_with_config(&self, validation: &RecordTable, config: &TreeConfig) -> Result<DecisionTree, BdtreeError> {
        config.validate()?;
        self.prune_seeded(config.prune_trials, config.max_prune, validation, config.seed)
    }
}

fn validate_max_prune(max_prune: usize) -> Result<(), BdtreeError> {
    if max_prune < 2 {
        Err(BdtreeError::InvalidParameter(
            "max_prune".to_string(),
            "a value of at least 2".to_string(),
            max_prune.to_string(),
        ))
    } else {
        Ok(())
    }
}

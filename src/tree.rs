use crate::config::TreeConfig;
use crate::constants::BRANCH_PREFIX;
use crate::criterion::SplitCriterion;
use crate::data::RecordTable;
use crate::errors::BdtreeError;
use crate::grower::grow;
use crate::metric::accuracy;
use crate::node::{DecisionNode, Node};
use hashbrown::HashMap;
use log::info;
use rayon::prelude::*;
use std::fmt::{self, Display};

/// Binary decision tree classifier for rows of 0/1 values.
#[derive(Debug, Clone)]
pub struct DecisionTree {
    root: Option<Node>,
    /// Position of every header column, used to read split attributes from a row.
    column_index: HashMap<String, usize>,
    criterion: SplitCriterion,
}

impl Default for DecisionTree {
    fn default() -> Self {
        Self::new(SplitCriterion::default())
    }
}

/// Train a tree on `table` with the given criterion.
pub fn train(table: &RecordTable, criterion: SplitCriterion) -> Result<DecisionTree, BdtreeError> {
    let mut tree = DecisionTree::new(criterion);
    tree.fit(table)?;
    Ok(tree)
}

impl DecisionTree {
    /// An untrained tree that will split with `criterion`.
    pub fn new(criterion: SplitCriterion) -> Self {
        DecisionTree {
            root: None,
            column_index: HashMap::new(),
            criterion,
        }
    }

    /// Grow the tree on a training table, replacing any previous fit.
    ///
    /// * `table` - Training rows; the table must not be empty.
    pub fn fit(&mut self, table: &RecordTable) -> Result<(), BdtreeError> {
        let root = grow(table, self.criterion)?;
        self.column_index = table.column_map().clone();
        info!(
            "trained {} tree on {} rows and {} attributes: {} nodes, depth {}",
            self.criterion,
            table.n_rows(),
            table.attributes().len(),
            root.n_nodes(),
            root.depth()
        );
        self.root = Some(root);
        Ok(())
    }

    /// Train a tree with the criterion from `config`.
    pub fn fit_with_config(table: &RecordTable, config: &TreeConfig) -> Result<Self, BdtreeError> {
        config.validate()?;
        train(table, config.criterion)
    }

    pub fn criterion(&self) -> SplitCriterion {
        self.criterion
    }

    pub fn is_trained(&self) -> bool {
        self.root.is_some()
    }

    pub fn root(&self) -> Result<&Node, BdtreeError> {
        self.root.as_ref().ok_or(BdtreeError::UntrainedTree)
    }

    pub(crate) fn root_mut(&mut self) -> Result<&mut Node, BdtreeError> {
        self.root.as_mut().ok_or(BdtreeError::UntrainedTree)
    }

    /// Predict the class of a single row.
    ///
    /// * `row` - Values laid out like the training header; the class column may be omitted.
    pub fn predict(&self, row: &[u8]) -> Result<u8, BdtreeError> {
        let mut node = self.root()?;
        loop {
            match node {
                Node::Leaf(leaf) => return Ok(leaf.majority_class),
                Node::Decision(decision) => {
                    let idx = self.attribute_index(decision)?;
                    let value = row.get(idx).ok_or_else(|| {
                        BdtreeError::InvalidParameter(
                            "row".to_string(),
                            format!("at least {} values", idx + 1),
                            row.len().to_string(),
                        )
                    })?;
                    node = decision.get_child(*value);
                }
            }
        }
    }

    /// Predict the class of every row in `table`.
    pub fn predict_table(&self, table: &RecordTable, parallel: bool) -> Result<Vec<u8>, BdtreeError> {
        if parallel {
            table.rows().par_iter().map(|r| self.predict(r)).collect()
        } else {
            table.rows().iter().map(|r| self.predict(r)).collect()
        }
    }

    /// Percentage of rows in `table` whose class column matches the prediction.
    pub fn accuracy(&self, table: &RecordTable) -> Result<f64, BdtreeError> {
        self.root()?;
        if table.is_empty() {
            return Err(BdtreeError::EmptyTable);
        }
        let predictions = self.predict_table(table, false)?;
        accuracy(&table.labels(), &predictions)
    }

    fn attribute_index(&self, node: &DecisionNode) -> Result<usize, BdtreeError> {
        self.column_index
            .get(&node.split_attribute)
            .copied()
            .ok_or_else(|| BdtreeError::InvalidAttribute(node.split_attribute.clone()))
    }

    pub fn n_nodes(&self) -> usize {
        self.root.as_ref().map_or(0, |r| r.n_nodes())
    }

    pub fn n_leaves(&self) -> usize {
        self.root.as_ref().map_or(0, |r| r.n_leaves())
    }

    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, |r| r.depth())
    }

    /// Decision nodes in pre-order.
    pub fn internal_nodes(&self) -> Vec<&DecisionNode> {
        self.root.as_ref().map_or_else(Vec::new, |r| r.internal_nodes())
    }

    /// Human readable text of the tree.
    ///
    /// Each branch is a line of the form `attribute = value : `, indented with
    /// one `| ` per level, followed by the class when the branch ends in a leaf.
    pub fn render(&self) -> Result<String, BdtreeError> {
        let mut r = String::new();
        render_node(self.root()?, 0, &mut r);
        Ok(r.trim_start_matches('\n').to_string())
    }
}

fn render_node(node: &Node, level: usize, r: &mut String) {
    match node {
        Node::Leaf(leaf) => r.push_str(&leaf.majority_class.to_string()),
        Node::Decision(decision) => {
            for (value, child) in [(0, &decision.left), (1, &decision.right)] {
                r.push('\n');
                r.push_str(&BRANCH_PREFIX.repeat(level));
                r.push_str(&format!("{} = {} : ", decision.split_attribute, value));
                render_node(child, level + 1, r);
            }
        }
    }
}

impl Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.render() {
            Ok(r) => write!(f, "{}", r),
            Err(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_csv;

    fn sample_table() -> RecordTable {
        RecordTable::new(
            vec!["A".to_string(), "B".to_string(), "Class".to_string()],
            vec![vec![0, 0, 0], vec![0, 1, 1], vec![1, 0, 1], vec![1, 1, 1]],
        )
        .unwrap()
    }

    #[test]
    fn test_untrained_tree() {
        let tree = DecisionTree::default();
        assert!(!tree.is_trained());
        assert_eq!(tree.predict(&[0, 1]), Err(BdtreeError::UntrainedTree));
        assert_eq!(tree.render(), Err(BdtreeError::UntrainedTree));
        assert_eq!(tree.accuracy(&sample_table()), Err(BdtreeError::UntrainedTree));
        assert_eq!(tree.to_string(), "");
        assert_eq!(tree.n_nodes(), 0);
    }

    #[test]
    fn test_train_and_predict() {
        let table = sample_table();
        let tree = train(&table, SplitCriterion::Entropy).unwrap();
        assert!(tree.is_trained());
        assert_eq!(tree.n_nodes(), 5);
        assert_eq!(tree.depth(), 2);
        for row in table.iter() {
            assert_eq!(tree.predict(row).unwrap(), row[2]);
        }
        // The class column is not needed to predict.
        assert_eq!(tree.predict(&[0, 1]).unwrap(), 1);
        assert_eq!(tree.accuracy(&table).unwrap(), 100.0);
        assert_eq!(tree.predict_table(&table, true).unwrap(), table.labels());
    }

    #[test]
    fn test_predict_short_row() {
        let tree = train(&sample_table(), SplitCriterion::Impurity).unwrap();
        assert!(matches!(tree.predict(&[0]), Err(BdtreeError::InvalidParameter(..))));
    }

    #[test]
    fn test_accuracy_empty_table() {
        let tree = train(&sample_table(), SplitCriterion::Entropy).unwrap();
        let empty = RecordTable::new(vec!["A".to_string(), "B".to_string(), "Class".to_string()], vec![]).unwrap();
        assert_eq!(tree.accuracy(&empty), Err(BdtreeError::EmptyTable));
    }

    #[test]
    fn test_accuracy_partial() {
        let tree = train(&sample_table(), SplitCriterion::Entropy).unwrap();
        let test = RecordTable::new(
            vec!["A".to_string(), "B".to_string(), "Class".to_string()],
            vec![vec![0, 0, 1], vec![0, 1, 1], vec![1, 1, 0], vec![1, 0, 1]],
        )
        .unwrap();
        assert_eq!(tree.accuracy(&test).unwrap(), 50.0);
    }

    #[test]
    fn test_fit_empty_table() {
        let empty = RecordTable::new(vec!["A".to_string(), "Class".to_string()], vec![]).unwrap();
        let mut tree = DecisionTree::new(SplitCriterion::Entropy);
        assert_eq!(tree.fit(&empty), Err(BdtreeError::EmptyTable));
        assert!(!tree.is_trained());
    }

    #[test]
    fn test_render() {
        let tree = train(&sample_table(), SplitCriterion::Entropy).unwrap();
        let expected = "A = 0 : \n| B = 0 : 0\n| B = 1 : 1\nA = 1 : 1";
        assert_eq!(tree.render().unwrap(), expected);
        assert_eq!(tree.to_string(), expected);

        let leaf_only = RecordTable::new(vec!["A".to_string(), "Class".to_string()], vec![vec![1, 1]]).unwrap();
        let tree = train(&leaf_only, SplitCriterion::Entropy).unwrap();
        assert_eq!(tree.render().unwrap(), "1");
    }

    #[test]
    fn test_fit_with_config() {
        let config = TreeConfig::default().set_criterion(SplitCriterion::Impurity);
        let tree = DecisionTree::fit_with_config(&sample_table(), &config).unwrap();
        assert_eq!(tree.criterion(), SplitCriterion::Impurity);
        let names: Vec<&str> = tree.internal_nodes().iter().map(|n| n.split_attribute.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_tree_resources() {
        let train_table = read_csv("resources/training_set.csv").unwrap();
        let test_table = read_csv("resources/test_set.csv").unwrap();
        for criterion in [SplitCriterion::Entropy, SplitCriterion::Impurity] {
            let tree = train(&train_table, criterion).unwrap();
            assert!(tree.depth() <= train_table.attributes().len());
            assert_eq!(tree.n_nodes(), 2 * tree.internal_nodes().len() + 1);
            let acc = tree.accuracy(&test_table).unwrap();
            assert!((0.0..=100.0).contains(&acc));
            assert_eq!(
                tree.predict_table(&test_table, true).unwrap(),
                tree.predict_table(&test_table, false).unwrap()
            );
        }
    }
}

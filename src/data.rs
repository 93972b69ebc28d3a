//! Data
//!
//! The record table: a header, a set of binary rows and the attributes that
//! are still available for splitting.
use crate::criterion::{score_callables, split_gain, DisorderMeasure, Entropy, SplitCriterion, VarianceImpurity};
use crate::errors::BdtreeError;
use hashbrown::{HashMap, HashSet};
use std::sync::{Arc, OnceLock};

/// Positive (class 1) and negative (class 0) row counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClassCounts {
    pub positive: usize,
    pub negative: usize,
}

/// Rows of 0/1 values, the last column of each being the class label.
///
/// A table is never modified after it is created. Splitting produces a new
/// table holding copies of the matching rows, sharing the header of its parent
/// and with one attribute fewer available. The class counts, entropy and
/// impurity are computed on first access and kept for the life of the table.
#[derive(Debug, Clone)]
pub struct RecordTable {
    header: Arc<Vec<String>>,
    column_index: Arc<HashMap<String, usize>>,
    attributes: HashSet<String>,
    rows: Vec<Vec<u8>>,
    counts: OnceLock<ClassCounts>,
    entropy: OnceLock<f64>,
    impurity: OnceLock<f64>,
}

impl RecordTable {
    /// Create a table from a header and its rows.
    ///
    /// * `header` - Column names, the last one naming the class label.
    /// * `rows` - Rows as wide as the header, holding only 0 and 1.
    pub fn new(header: Vec<String>, rows: Vec<Vec<u8>>) -> Result<Self, BdtreeError> {
        if header.len() < 2 {
            return Err(BdtreeError::InvalidRow(
                0,
                format!("header needs an attribute and a class column, found {} columns", header.len()),
            ));
        }
        let column_index: HashMap<String, usize> = header.iter().enumerate().map(|(i, h)| (h.clone(), i)).collect();
        if column_index.len() != header.len() {
            return Err(BdtreeError::InvalidParameter(
                "header".to_string(),
                "unique column names".to_string(),
                header.join(","),
            ));
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != header.len() {
                return Err(BdtreeError::InvalidRow(
                    i,
                    format!("expected {} values, found {}", header.len(), row.len()),
                ));
            }
            if let Some(v) = row.iter().find(|v| **v > 1) {
                return Err(BdtreeError::InvalidRow(i, format!("value {} is not 0 or 1", v)));
            }
        }
        let attributes = header[..header.len() - 1].iter().cloned().collect();
        Ok(RecordTable::from_parts(
            Arc::new(header),
            Arc::new(column_index),
            attributes,
            rows,
        ))
    }

    fn from_parts(
        header: Arc<Vec<String>>,
        column_index: Arc<HashMap<String, usize>>,
        attributes: HashSet<String>,
        rows: Vec<Vec<u8>>,
    ) -> Self {
        RecordTable {
            header,
            column_index,
            attributes,
            rows,
            counts: OnceLock::new(),
            entropy: OnceLock::new(),
            impurity: OnceLock::new(),
        }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Name of the class label column.
    pub fn class_name(&self) -> &str {
        &self.header[self.class_index()]
    }

    pub fn class_index(&self) -> usize {
        self.header.len() - 1
    }

    /// Number of values in each row.
    pub fn row_width(&self) -> usize {
        self.header.len()
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&[u8]> {
        self.rows.get(index).map(|r| r.as_slice())
    }

    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// Class label of every row, in row order.
    pub fn labels(&self) -> Vec<u8> {
        let class_idx = self.class_index();
        self.rows.iter().map(|r| r[class_idx]).collect()
    }

    /// Position of a column in the header.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_index.get(name).copied()
    }

    /// Lookup from every column name to its position in the header.
    pub fn column_map(&self) -> &HashMap<String, usize> {
        &self.column_index
    }

    /// Attributes that can still be split on.
    pub fn attributes(&self) -> &HashSet<String> {
        &self.attributes
    }

    /// Attributes that can still be split on, in header order.
    pub fn available_attributes(&self) -> Vec<&str> {
        self.header[..self.class_index()]
            .iter()
            .filter(|h| self.attributes.contains(h.as_str()))
            .map(|h| h.as_str())
            .collect()
    }

    pub fn class_counts(&self) -> ClassCounts {
        *self.counts.get_or_init(|| {
            let class_idx = self.class_index();
            let positive = self.rows.iter().filter(|r| r[class_idx] != 0).count();
            ClassCounts {
                positive,
                negative: self.rows.len() - positive,
            }
        })
    }

    /// Shannon entropy of the class labels, base 2.
    pub fn entropy(&self) -> Result<f64, BdtreeError> {
        if self.is_empty() {
            return Err(BdtreeError::EmptyTable);
        }
        Ok(*self.entropy.get_or_init(|| {
            let c = self.class_counts();
            Entropy::score(c.positive, c.negative)
        }))
    }

    /// Variance impurity of the class labels.
    pub fn impurity(&self) -> Result<f64, BdtreeError> {
        if self.is_empty() {
            return Err(BdtreeError::EmptyTable);
        }
        Ok(*self.impurity.get_or_init(|| {
            let c = self.class_counts();
            VarianceImpurity::score(c.positive, c.negative)
        }))
    }

    /// Score of the table under the given criterion.
    pub fn score(&self, criterion: SplitCriterion) -> Result<f64, BdtreeError> {
        match criterion {
            SplitCriterion::Entropy => self.entropy(),
            SplitCriterion::Impurity => self.impurity(),
        }
    }

    /// Reduction in score obtained by splitting on `attribute`.
    ///
    /// The class counts of both branches are gathered in a single pass over the rows.
    pub fn gain(&self, attribute: &str, criterion: SplitCriterion) -> Result<f64, BdtreeError> {
        let index = self.available_index(attribute)?;
        let parent_score = self.score(criterion)?;
        let class_idx = self.class_index();
        let mut counts = [[0_usize; 2]; 2];
        for row in &self.rows {
            let value = usize::from(row[index] != 0);
            let class = usize::from(row[class_idx] != 0);
            counts[value][class] += 1;
        }
        Ok(split_gain(parent_score, &counts, score_callables(&criterion)))
    }

    /// New table holding the rows where `attribute` equals `value`, with
    /// `attribute` no longer available.
    pub fn split(&self, attribute: &str, value: u8) -> Result<RecordTable, BdtreeError> {
        let index = self.available_index(attribute)?;
        if value > 1 {
            return Err(BdtreeError::InvalidParameter(
                "value".to_string(),
                "0 or 1".to_string(),
                value.to_string(),
            ));
        }
        let rows = self.rows.iter().filter(|r| r[index] == value).cloned().collect();
        let mut attributes = self.attributes.clone();
        attributes.remove(attribute);
        Ok(RecordTable::from_parts(
            Arc::clone(&self.header),
            Arc::clone(&self.column_index),
            attributes,
            rows,
        ))
    }

    /// 1 if class 1 strictly outnumbers class 0, otherwise 0.
    pub fn majority_class(&self) -> u8 {
        let c = self.class_counts();
        u8::from(c.positive > c.negative)
    }

    fn available_index(&self, attribute: &str) -> Result<usize, BdtreeError> {
        if !self.attributes.contains(attribute) {
            return Err(BdtreeError::InvalidAttribute(attribute.to_string()));
        }
        self.column_index(attribute)
            .ok_or_else(|| BdtreeError::InvalidAttribute(attribute.to_string()))
    }
}

use crate::errors::BdtreeError;

/// Number of positions where the label and the prediction agree.
pub fn count_matches(labels: &[u8], predictions: &[u8]) -> usize {
    labels.iter().zip(predictions).filter(|(y, yhat)| y == yhat).count()
}

/// Percentage of correct predictions, `100 * matches / rows`.
pub fn accuracy(labels: &[u8], predictions: &[u8]) -> Result<f64, BdtreeError> {
    if labels.len() != predictions.len() {
        return Err(BdtreeError::InvalidParameter(
            "predictions".to_string(),
            format!("{} values", labels.len()),
            predictions.len().to_string(),
        ));
    }
    if labels.is_empty() {
        return Err(BdtreeError::EmptyTable);
    }
    Ok(count_matches(labels, predictions) as f64 / labels.len() as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::precision_round;

    #[test]
    fn test_accuracy() {
        assert_eq!(accuracy(&[1, 0, 1, 1], &[1, 0, 0, 1]).unwrap(), 75.0);
        assert_eq!(accuracy(&[1, 0], &[1, 0]).unwrap(), 100.0);
        assert_eq!(precision_round(accuracy(&[1, 0, 1], &[0, 0, 0]).unwrap(), 2), 33.33);
    }

    #[test]
    fn test_accuracy_errors() {
        assert_eq!(accuracy(&[], &[]), Err(BdtreeError::EmptyTable));
        assert!(matches!(accuracy(&[1, 0], &[1]), Err(BdtreeError::InvalidParameter(..))));
    }
}

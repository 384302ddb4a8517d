use crate::error::{NnError, Result};

/// Half squared error, the loss whose gradient `Network::back` follows.
pub struct SquaredErrorLoss;

impl SquaredErrorLoss {
    /// Scalar loss: 0.5 · Σ (predicted − expected)²
    pub fn loss(predicted: &[f64], expected: &[f64]) -> Result<f64> {
        check_lengths(predicted, expected)?;
        Ok(0.5 * predicted.iter().zip(expected.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>())
    }

    /// Per-output gradient: predicted − expected
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Result<Vec<f64>> {
        check_lengths(predicted, expected)?;
        Ok(predicted.iter().zip(expected.iter())
            .map(|(a, b)| a - b)
            .collect())
    }
}

fn check_lengths(predicted: &[f64], expected: &[f64]) -> Result<()> {
    if predicted.len() != expected.len() {
        return Err(NnError::mismatch("squared error", predicted.len(), expected.len()));
    }
    Ok(())
}

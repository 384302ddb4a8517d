use crate::{
    error::{NnError, Result},
    loss::squared::SquaredErrorLoss,
    network::network::Network,
};

/// One online pass: `advance` then `back` for every sample, in order.
///
/// Returns the mean loss of the outputs seen before each update.
pub fn train_network(
    network: &mut Network,
    inputs: &[Vec<f64>],
    expected_outputs: &[Vec<f64>],
) -> Result<f64> {
    if inputs.len() != expected_outputs.len() {
        return Err(NnError::mismatch("training samples", inputs.len(), expected_outputs.len()));
    }
    if inputs.is_empty() {
        return Err(NnError::Configuration("training set is empty".into()));
    }

    let mut total_loss = 0.0;

    for (input, expected) in inputs.iter().zip(expected_outputs.iter()) {
        let output = network.advance(input)?;
        total_loss += SquaredErrorLoss::loss(&output, expected)?;
        network.back(expected)?;
    }

    Ok(total_loss / inputs.len() as f64)
}

use log::{debug, info};

use crate::error::Result;
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::train_network;

/// Trains `network` for up to `config.epochs` epochs and returns the stats
/// of every completed epoch.
///
/// Stops early once an epoch's mean loss reaches `config.target_loss`.
pub fn train_loop(
    network: &mut Network,
    inputs: &[Vec<f64>],
    expected_outputs: &[Vec<f64>],
    config: &TrainConfig,
) -> Result<Vec<EpochStats>> {
    let mut history = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        let loss = train_network(network, inputs, expected_outputs)?;
        history.push(EpochStats { epoch, loss });

        if config.log_every > 0 && epoch % config.log_every == 0 {
            info!("epoch {epoch}/{}: loss = {loss:.6}", config.epochs);
        }

        if let Some(target) = config.target_loss {
            if loss <= target {
                debug!("target loss {target} reached after {epoch} epochs");
                break;
            }
        }
    }

    Ok(history)
}

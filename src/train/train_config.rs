/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`      — maximum number of full passes over the training data
/// - `log_every`   — emit an `info!` line every this many epochs; `0` disables it
/// - `target_loss` — stop after the first epoch whose mean loss is at or below this
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    pub epochs: usize,
    pub log_every: usize,
    pub target_loss: Option<f64>,
}

impl TrainConfig {
    /// Creates a `TrainConfig` with logging and early stopping turned off.
    pub fn new(epochs: usize) -> Self {
        TrainConfig {
            epochs,
            log_every: 0,
            target_loss: None,
        }
    }

    pub fn log_every(mut self, epochs: usize) -> Self {
        self.log_every = epochs;
        self
    }

    pub fn target_loss(mut self, loss: f64) -> Self {
        self.target_loss = Some(loss);
        self
    }
}

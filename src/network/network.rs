use log::debug;
use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::{
    activation::activation::ActivationFunction,
    error::{NnError, Result},
    layers::dense::{Layer, DEFAULT_BIAS},
    math::{matrix::Matrix, vector::Vector},
};

/// Nested weights indexed `[layer][neuron][previous neuron]`. Entry 0 belongs
/// to the input layer and is always empty.
pub type Weights = Vec<Vec<Vec<f64>>>;

/// Which layer's bias is added to a layer's net input during `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiasSource {
    /// Layer `i` is biased by layer `i - 1`'s bias. The first layer's bias
    /// feeds the second layer and the last layer's bias is never read.
    #[default]
    PreviousLayer,
    /// Layer `i` is biased by its own bias.
    OwnLayer,
}

/// A stack of fully connected layers trained by plain gradient descent on
/// squared error.
///
/// Layers are pushed input first. `initialize` must run once, after the last
/// push and before the first `advance`.
#[derive(Debug, Clone)]
pub struct Network {
    layers: Vec<Layer>,
    learning_rate: f64,
    bias_source: BiasSource,
    initialized: bool,
}

impl Network {
    pub fn new(learning_rate: f64) -> Network {
        Network {
            layers: Vec::new(),
            learning_rate,
            bias_source: BiasSource::default(),
            initialized: false,
        }
    }

    pub fn with_bias_source(mut self, bias_source: BiasSource) -> Network {
        self.bias_source = bias_source;
        self
    }

    /// Appends a layer with the default bias of 1.0.
    pub fn push_layer(&mut self, size: usize, activation: ActivationFunction) -> Result<()> {
        self.push_layer_with_bias(size, activation, DEFAULT_BIAS)
    }

    pub fn push_layer_with_bias(&mut self, size: usize, activation: ActivationFunction, bias: f64) -> Result<()> {
        if self.initialized {
            return Err(NnError::Configuration("cannot add a layer to an initialized network".into()));
        }
        if size == 0 {
            return Err(NnError::Configuration("a layer needs at least one neuron".into()));
        }

        self.layers.push(Layer::with_bias(size, activation, bias));
        Ok(())
    }

    /// Sizes every weight matrix against the previous layer and fills it,
    /// either from `weights` or with uniform draws on (0, 1) taken from `rng`.
    pub fn initialize<R: Rng + ?Sized>(&mut self, weights: Option<&[Vec<Vec<f64>>]>, rng: &mut R) -> Result<()> {
        match weights {
            Some(weights) => self.initialize_with_weights(weights),
            None => {
                self.check_ready_to_initialize()?;
                let matrices = (1..self.layers.len())
                    .map(|i| Matrix::random_uniform(self.layers[i].size(), self.layers[i - 1].size(), &mut *rng))
                    .collect();
                self.install(matrices, "uniform(0, 1)");
                Ok(())
            }
        }
    }

    /// Initializes from caller-supplied weights; no random source is needed.
    pub fn initialize_with_weights(&mut self, weights: &[Vec<Vec<f64>>]) -> Result<()> {
        self.check_ready_to_initialize()?;
        if weights.len() != self.layers.len() {
            return Err(NnError::mismatch("supplied weights", self.layers.len(), weights.len()));
        }

        let mut matrices = Vec::with_capacity(self.layers.len() - 1);
        for i in 1..self.layers.len() {
            let expected = (self.layers[i].size(), self.layers[i - 1].size());
            let m = Matrix::from_rows(weights[i].clone())?;
            if (m.rows(), m.cols()) != expected {
                return Err(NnError::mismatch(
                    "supplied weights",
                    format!("{}x{} for layer {}", expected.0, expected.1, i),
                    format!("{}x{}", m.rows(), m.cols()),
                ));
            }
            matrices.push(m);
        }

        self.install(matrices, "caller");
        Ok(())
    }

    fn check_ready_to_initialize(&self) -> Result<()> {
        if self.initialized {
            return Err(NnError::Configuration("network is already initialized".into()));
        }
        if self.layers.len() < 2 {
            return Err(NnError::Configuration(format!(
                "at least 2 layers are required, found {}",
                self.layers.len()
            )));
        }
        Ok(())
    }

    fn install(&mut self, matrices: Vec<Matrix>, source: &str) {
        for (layer, weights) in self.layers.iter_mut().skip(1).zip(matrices) {
            layer.connect(weights);
        }
        self.initialized = true;

        debug!(
            "initialized network: sizes={:?} bias_source={:?} weights={}",
            self.layers.iter().map(Layer::size).collect::<Vec<_>>(),
            self.bias_source,
            source
        );
    }

    fn ensure_initialized(&self) -> Result<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(NnError::Configuration("network must be initialized before propagation".into()))
        }
    }

    /// Forward pass. Returns the activated outputs of the last layer.
    pub fn advance(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        self.ensure_initialized()?;
        if input.len() != self.input_size() {
            return Err(NnError::mismatch("network input", self.input_size(), input.len()));
        }

        let bias_source = self.bias_source;
        self.layers[0].load_input(Vector::from(input));

        for i in 1..self.layers.len() {
            let (done, rest) = self.layers.split_at_mut(i);
            let prev = &done[i - 1];
            let layer = &mut rest[0];

            let bias = match bias_source {
                BiasSource::PreviousLayer => prev.bias(),
                BiasSource::OwnLayer => layer.bias(),
            };
            let net = layer.weights.mul_vector(&prev.out)?.as_vector()? + bias;
            layer.activate(net);
        }

        Ok(self.layers[self.layers.len() - 1].out.clone().into_inner())
    }

    /// Backward pass against `target` for the most recent `advance`.
    ///
    /// New weights are staged in every layer first and committed only after
    /// the error terms of all layers have been computed from the old ones.
    pub fn back(&mut self, target: &[f64]) -> Result<()> {
        self.ensure_initialized()?;
        if target.len() != self.output_size() {
            return Err(NnError::mismatch("network target", self.output_size(), target.len()));
        }

        let lr = self.learning_rate;
        let last = self.layers.len() - 1;

        let output = &mut self.layers[last];
        let derivative = output.activation().apply_derivative(&output.net);
        output.error = output.out
            .checked_sub(&Vector::from(target))?
            .checked_mul(&derivative)?;

        for i in (0..last).rev() {
            let (head, tail) = self.layers.split_at_mut(i + 1);
            let layer = &mut head[i];
            let next = &mut tail[0];

            for k in 0..next.size() {
                for j in 0..layer.size() {
                    next.pending[(k, j)] = next.weights[(k, j)] - lr * (next.error[k] * layer.out[j]);
                }
            }

            let carried = next.weights.transpose().mul_vector(&next.error)?.as_vector()?;
            let derivative = layer.activation().apply_derivative(&layer.net);
            layer.error = carried.checked_mul(&derivative)?;
        }

        for layer in self.layers.iter_mut().skip(1) {
            layer.commit();
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, i: usize) -> Option<&Layer> {
        self.layers.get(i)
    }

    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, Layer::size)
    }

    pub fn output_size(&self) -> usize {
        self.layers.last().map_or(0, Layer::size)
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) {
        self.learning_rate = learning_rate;
    }

    pub fn bias_source(&self) -> BiasSource {
        self.bias_source
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Snapshot of all weights, shaped for `initialize_with_weights`.
    pub fn weights(&self) -> Weights {
        self.layers.iter()
            .enumerate()
            .map(|(i, layer)| if i == 0 { Vec::new() } else { layer.weights().to_rows() })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::{rngs::StdRng, SeedableRng};

    fn two_two_one(weights: &[Vec<Vec<f64>>]) -> Network {
        let mut network = Network::new(0.5);
        network.push_layer(2, ActivationFunction::Sigmoid).unwrap();
        network.push_layer(2, ActivationFunction::Sigmoid).unwrap();
        network.push_layer(1, ActivationFunction::Sigmoid).unwrap();
        network.initialize_with_weights(weights).unwrap();
        network
    }

    fn sample_weights() -> Weights {
        vec![
            vec![],
            vec![vec![0.1, -0.2], vec![0.3, 0.4]],
            vec![vec![0.5, -0.6]],
        ]
    }

    #[test]
    fn initialize_needs_two_layers() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut network = Network::new(0.5);
        assert!(matches!(network.initialize(None, &mut rng), Err(NnError::Configuration(_))));

        network.push_layer(3, ActivationFunction::Sigmoid).unwrap();
        assert!(matches!(network.initialize(None, &mut rng), Err(NnError::Configuration(_))));

        network.push_layer(1, ActivationFunction::Sigmoid).unwrap();
        network.initialize(None, &mut rng).unwrap();
        assert!(network.is_initialized());
    }

    #[test]
    fn random_weights_are_shaped_against_previous_layer() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut network = Network::new(0.1);
        network.push_layer(3, ActivationFunction::Identity).unwrap();
        network.push_layer(4, ActivationFunction::Sigmoid).unwrap();
        network.push_layer(2, ActivationFunction::Softplus).unwrap();
        network.initialize(None, &mut rng).unwrap();

        let weights = network.weights();
        assert!(weights[0].is_empty());
        assert_eq!(weights[1].len(), 4);
        assert!(weights[1].iter().all(|row| row.len() == 3));
        assert_eq!(weights[2].len(), 2);
        assert!(weights[2].iter().all(|row| row.len() == 4));
        assert!(weights.iter().flatten().flatten().all(|&w| w > 0.0 && w < 1.0));
    }

    #[test]
    fn seeded_initialization_is_reproducible() {
        let build = || {
            let mut network = Network::new(0.5);
            network.push_layer(2, ActivationFunction::Sigmoid).unwrap();
            network.push_layer(3, ActivationFunction::Sigmoid).unwrap();
            network.initialize(None, &mut StdRng::seed_from_u64(11)).unwrap();
            network.weights()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn misshaped_supplied_weights_are_rejected() {
        let mut network = Network::new(0.5);
        network.push_layer(2, ActivationFunction::Sigmoid).unwrap();
        network.push_layer(1, ActivationFunction::Sigmoid).unwrap();

        let wrong = vec![vec![], vec![vec![0.1, 0.2, 0.3]]];
        assert!(matches!(network.initialize_with_weights(&wrong), Err(NnError::DimensionMismatch { .. })));
        assert!(!network.is_initialized());

        let too_few = vec![vec![]];
        assert!(matches!(network.initialize_with_weights(&too_few), Err(NnError::DimensionMismatch { .. })));
    }

    #[test]
    fn lifecycle_misuse_is_a_configuration_error() {
        let mut network = Network::new(0.5);
        network.push_layer(2, ActivationFunction::Sigmoid).unwrap();
        network.push_layer(1, ActivationFunction::Sigmoid).unwrap();

        assert!(matches!(network.advance(&[0.0, 1.0]), Err(NnError::Configuration(_))));
        assert!(matches!(network.back(&[1.0]), Err(NnError::Configuration(_))));
        assert!(matches!(network.push_layer(0, ActivationFunction::Sigmoid), Err(NnError::Configuration(_))));

        network.initialize_with_weights(&[vec![], vec![vec![0.1, 0.2]]]).unwrap();
        assert!(matches!(network.push_layer(1, ActivationFunction::Sigmoid), Err(NnError::Configuration(_))));
        let snapshot = network.weights();
        assert!(matches!(network.initialize_with_weights(&snapshot), Err(NnError::Configuration(_))));
    }

    #[test]
    fn input_and_target_lengths_are_checked() {
        let mut network = two_two_one(&sample_weights());

        assert!(matches!(network.advance(&[1.0]), Err(NnError::DimensionMismatch { .. })));
        network.advance(&[1.0, 0.0]).unwrap();
        assert!(matches!(network.back(&[1.0, 0.0]), Err(NnError::DimensionMismatch { .. })));
    }

    #[test]
    fn forward_pass_matches_hand_computation() {
        let mut network = two_two_one(&sample_weights());
        let out = network.advance(&[1.0, 2.0]).unwrap();

        let sig = |x: f64| 1.0 / (1.0 + (-x).exp());
        // Every layer carries the default bias of 1.0.
        let h0 = sig(0.1 * 1.0 - 0.2 * 2.0 + 1.0);
        let h1 = sig(0.3 * 1.0 + 0.4 * 2.0 + 1.0);
        let o = sig(0.5 * h0 - 0.6 * h1 + 1.0);

        assert_abs_diff_eq!(out[0], o, epsilon = 1e-12);
        assert_abs_diff_eq!(network.layers()[1].net()[1], 0.3 + 0.8 + 1.0, epsilon = 1e-12);
    }

    #[test]
    fn forward_pass_is_deterministic() {
        let mut network = two_two_one(&sample_weights());
        let first = network.advance(&[0.3, 0.9]).unwrap();
        let second = network.advance(&[0.3, 0.9]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn hidden_errors_use_weights_from_before_the_update() {
        let mut network = two_two_one(&sample_weights());
        let out = network.advance(&[1.0, 2.0]).unwrap()[0];
        let target = 0.0;
        network.back(&[target]).unwrap();

        let output_error = (out - target) * out * (1.0 - out);
        assert_abs_diff_eq!(network.layers()[2].errors()[0], output_error, epsilon = 1e-12);

        let h0 = network.layers()[1].outputs()[0];
        let expected_hidden = output_error * 0.5 * h0 * (1.0 - h0);
        assert_abs_diff_eq!(network.layers()[1].errors()[0], expected_hidden, epsilon = 1e-12);

        let updated = network.weights();
        assert_abs_diff_eq!(updated[2][0][0], 0.5 - 0.5 * output_error * h0, epsilon = 1e-12);

        let hidden_error = network.layers()[1].errors()[1];
        assert_abs_diff_eq!(updated[1][1][1], 0.4 - 0.5 * hidden_error * 2.0, epsilon = 1e-12);
    }

    #[test]
    fn bias_source_selects_which_bias_feeds_a_layer() {
        let weights = vec![vec![], vec![vec![0.0]]];
        let build = |source: BiasSource| {
            let mut network = Network::new(0.5).with_bias_source(source);
            network.push_layer_with_bias(1, ActivationFunction::Identity, 0.25).unwrap();
            network.push_layer_with_bias(1, ActivationFunction::Identity, 2.0).unwrap();
            network.initialize_with_weights(&weights).unwrap();
            network
        };

        let mut previous = build(BiasSource::PreviousLayer);
        let mut own = build(BiasSource::OwnLayer);
        assert_eq!(previous.advance(&[3.0]).unwrap(), vec![0.25]);
        assert_eq!(own.advance(&[3.0]).unwrap(), vec![2.0]);
    }
}

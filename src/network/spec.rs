use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{NnError, Result};
use crate::layers::dense::DEFAULT_BIAS;
use crate::network::network::{BiasSource, Network};

fn default_bias() -> f64 {
    DEFAULT_BIAS
}

/// Describes one layer of a network architecture.
///
/// Fields:
/// - `size`       — number of neurons in this layer
/// - `activation` — activation applied to the layer's net input
/// - `bias`       — scalar bias carried by the layer (1.0 when omitted)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub size: usize,
    pub activation: ActivationFunction,
    #[serde(default = "default_bias")]
    pub bias: f64,
}

/// A serializable description of a network architecture.
///
/// Only the shape and hyperparameters are stored here. Trained weights are
/// read out with `Network::weights` and supplied back through
/// `Network::initialize_with_weights`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub learning_rate: f64,
    #[serde(default)]
    pub bias_source: BiasSource,
    /// Ordered list of layer descriptions (input → output).
    pub layers: Vec<LayerSpec>,
}

impl NetworkSpec {
    /// Pushes every layer into a fresh, uninitialized network.
    pub fn build(&self) -> Result<Network> {
        let mut network = Network::new(self.learning_rate).with_bias_source(self.bias_source);
        for layer in &self.layers {
            network.push_layer_with_bias(layer.size, layer.activation, layer.bias)?;
        }
        Ok(network)
    }

    /// Captures the architecture of an existing network.
    pub fn from_network(network: &Network) -> NetworkSpec {
        NetworkSpec {
            learning_rate: network.learning_rate(),
            bias_source: network.bias_source(),
            layers: network.layers().iter()
                .map(|layer| LayerSpec {
                    size: layer.size(),
                    activation: layer.activation(),
                    bias: layer.bias(),
                })
                .collect(),
        }
    }

    /// Serializes the architecture to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        if self.layers.iter().any(|layer| layer.activation.is_custom()) {
            return Err(NnError::Configuration(
                "custom activation functions cannot be saved".into(),
            ));
        }

        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

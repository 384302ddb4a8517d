pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod train;

// Convenience re-exports
pub use error::{NnError, Result};
pub use math::{matrix::Matrix, vector::Vector};
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::network::{BiasSource, Network, Weights};
pub use network::spec::{LayerSpec, NetworkSpec};
pub use loss::squared::SquaredErrorLoss;
pub use train::{train_loop, train_network, EpochStats, TrainConfig};

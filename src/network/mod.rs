pub mod network;
pub mod spec;

pub use network::{BiasSource, Network, Weights};
pub use spec::{NetworkSpec, LayerSpec};

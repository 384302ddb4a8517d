use serde::{Serialize, Deserialize};

use crate::math::vector::Vector;

/// An activation paired with its derivative, selected per layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActivationFunction {
    Sigmoid,
    /// ln(1 + e^x); its derivative is the logistic function.
    Softplus,
    Identity,
    Tanh,
    ReLU,
    /// A caller-supplied pair. Cannot be written to a `NetworkSpec` file.
    #[serde(skip)]
    Custom {
        function: fn(f64) -> f64,
        derivative: fn(f64) -> f64,
    },
}

fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => logistic(x),
            ActivationFunction::Softplus => {
                // x + ln(1 + e^-x) for positive x; e^x overflows past ~709.
                if x > 0.0 { x + (-x).exp().ln_1p() } else { x.exp().ln_1p() }
            }
            ActivationFunction::Identity => x,
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
            ActivationFunction::Custom { function, .. } => function(x),
        }
    }

    /// Derivative with respect to the pre-activation input `x`.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => {
                let fx = logistic(x);
                fx * (1.0 - fx)
            }
            ActivationFunction::Softplus => logistic(x),
            ActivationFunction::Identity => 1.0,
            ActivationFunction::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            ActivationFunction::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::Custom { derivative, .. } => derivative(x),
        }
    }

    pub fn apply(&self, v: &Vector) -> Vector {
        v.map(|x| self.function(x))
    }

    pub fn apply_derivative(&self, v: &Vector) -> Vector {
        v.map(|x| self.derivative(x))
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, ActivationFunction::Custom { .. })
    }
}

use std::ops::{Index, IndexMut};

use crate::{math::{matrix::Matrix, vector::Vector}, activation::activation::ActivationFunction};

pub const DEFAULT_BIAS: f64 = 1.0;

/// One fully connected layer of neurons.
///
/// `weights[(i, k)]` connects neuron `k` of the previous layer to neuron `i`
/// of this one. The input layer keeps an empty `0 x 0` weight matrix.
/// `pending` holds the next value of `weights` while a backward pass is in
/// flight, so that earlier layers still read the old weights.
#[derive(Debug, Clone)]
pub struct Layer{
    size: usize,
    pub(crate) net: Vector,
    pub(crate) out: Vector,
    pub(crate) error: Vector,
    pub(crate) weights: Matrix,
    pub(crate) pending: Matrix,
    bias: f64,
    activator: ActivationFunction
}

impl Layer {
    pub fn new(size: usize, activation: ActivationFunction) -> Layer {
        Layer::with_bias(size, activation, DEFAULT_BIAS)
    }

    pub fn with_bias(size: usize, activation: ActivationFunction, bias: f64) -> Layer {
        Layer {
            size,
            net: Vector::zeros(size),
            out: Vector::zeros(size),
            error: Vector::zeros(size),
            weights: Matrix::default(),
            pending: Matrix::default(),
            bias,
            activator: activation
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn activation(&self) -> ActivationFunction {
        self.activator
    }

    pub fn net(&self) -> &Vector {
        &self.net
    }

    pub fn outputs(&self) -> &Vector {
        &self.out
    }

    pub fn errors(&self) -> &Vector {
        &self.error
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    /// Sizes both weight buffers against the previous layer and loads `weights`.
    pub(crate) fn connect(&mut self, weights: Matrix) {
        self.pending = Matrix::zeros(weights.rows(), weights.cols());
        self.weights = weights;
    }

    /// Sets the state of an input layer directly from data.
    pub(crate) fn load_input(&mut self, input: Vector) {
        self.net = input.clone();
        self.out = input;
    }

    /// Stores the pre-activation sums and activates them.
    pub(crate) fn activate(&mut self, net: Vector) {
        self.out = self.activator.apply(&net);
        self.net = net;
    }

    pub(crate) fn commit(&mut self) {
        self.weights.clone_from(&self.pending);
    }
}

impl Index<usize> for Layer {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.net[i]
    }
}

impl IndexMut<usize> for Layer {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.net[i]
    }
}

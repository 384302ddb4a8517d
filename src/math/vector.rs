use serde::{Serialize, Deserialize};
use std::ops::{Add, Sub, Mul, Div, Index, IndexMut};

use crate::error::{NnError, Result};

/// A fixed-length column vector of `f64` with value semantics.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    data: Vec<f64>,
}

impl Vector {
    pub fn zeros(len: usize) -> Vector {
        Vector { data: vec![0.0; len] }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.data.iter()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.data
    }

    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    pub fn map<F>(&self, functor: F) -> Vector
    where
        F: Fn(f64) -> f64,
    {
        self.data.iter().map(|&x| functor(x)).collect()
    }

    pub fn map_square(&self) -> Vector {
        self.map(|x| x * x)
    }

    /// result[i] = f(self[i], other[i]); both operands must have equal length.
    pub fn combine<F>(&self, other: &Vector, functor: F) -> Result<Vector>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.len() != other.len() {
            return Err(NnError::mismatch("vector combine", self.len(), other.len()));
        }

        Ok(self.data.iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| functor(a, b))
            .collect())
    }

    /// result[i] = f(self[i], scalar).
    pub fn combine_scalar<F>(&self, scalar: f64, functor: F) -> Vector
    where
        F: Fn(f64, f64) -> f64,
    {
        self.map(|x| functor(x, scalar))
    }

    pub fn checked_add(&self, other: &Vector) -> Result<Vector> {
        self.combine(other, |a, b| a + b)
    }

    pub fn checked_sub(&self, other: &Vector) -> Result<Vector> {
        self.combine(other, |a, b| a - b)
    }

    /// Elementwise (Hadamard) product.
    pub fn checked_mul(&self, other: &Vector) -> Result<Vector> {
        self.combine(other, |a, b| a * b)
    }

    pub fn checked_div(&self, other: &Vector) -> Result<Vector> {
        self.combine(other, |a, b| a / b)
    }

    pub fn dot(&self, other: &Vector) -> Result<f64> {
        Ok(self.checked_mul(other)?.sum())
    }
}

impl From<Vec<f64>> for Vector {
    fn from(data: Vec<f64>) -> Self {
        Vector { data }
    }
}

impl From<&[f64]> for Vector {
    fn from(data: &[f64]) -> Self {
        Vector { data: data.to_vec() }
    }
}

impl From<Vector> for Vec<f64> {
    fn from(v: Vector) -> Self {
        v.data
    }
}

impl FromIterator<f64> for Vector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Vector { data: iter.into_iter().collect() }
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.data[i]
    }
}

impl IndexMut<usize> for Vector {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.data[i]
    }
}

// Scalar broadcast never fails, so it gets real operators. Vector-vector
// arithmetic goes through the checked_* methods instead.
macro_rules! scalar_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait<f64> for Vector {
            type Output = Vector;

            fn $method(self, rhs: f64) -> Vector {
                self.combine_scalar(rhs, |x, s| x $op s)
            }
        }

        impl $trait<f64> for &Vector {
            type Output = Vector;

            fn $method(self, rhs: f64) -> Vector {
                self.combine_scalar(rhs, |x, s| x $op s)
            }
        }
    };
}

scalar_op!(Add, add, +);
scalar_op!(Sub, sub, -);
scalar_op!(Mul, mul, *);
scalar_op!(Div, div, /);

impl Mul<Vector> for f64 {
    type Output = Vector;

    fn mul(self, rhs: Vector) -> Vector {
        rhs.map(|x| self * x)
    }
}

impl Add<Vector> for f64 {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        rhs.map(|x| self + x)
    }
}

impl Sub<Vector> for f64 {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        rhs.map(|x| self - x)
    }
}

use rand::distributions::Open01;
use rand::Rng;
use serde::{Serialize, Deserialize};
use std::ops::{Index, IndexMut, Mul};

use crate::error::{NnError, Result};
use crate::math::vector::Vector;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix{
    rows: usize,
    cols: usize,
    data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Fills a matrix with independent draws from the open interval (0, 1).
    pub fn random_uniform<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.sample(Open01);
            }
        }

        res
    }

    /// Builds a matrix from row data. Every row must have the same length.
    pub fn from_rows(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let rows = data.len();
        let cols = data.first().map_or(0, Vec::len);

        if let Some(bad) = data.iter().find(|row| row.len() != cols) {
            return Err(NnError::mismatch("matrix rows", cols, bad.len()));
        }

        Ok(Matrix { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.data.get(i).and_then(|row| row.get(j)).copied()
    }

    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.data[i][j] = value;
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.clone()
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    pub fn scale(&self, factor: f64) -> Matrix {
        self.map(|x| x * factor)
    }

    fn zip_with<F>(&self, rhs: &Matrix, op: &'static str, functor: F) -> Result<Matrix>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            return Err(NnError::mismatch(
                op,
                format!("{}x{}", self.rows, self.cols),
                format!("{}x{}", rhs.rows, rhs.cols),
            ));
        }

        let mut res = Matrix::zeros(self.rows, self.cols);

        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[i][j] = functor(self.data[i][j], rhs.data[i][j]);
            }
        }

        Ok(res)
    }

    pub fn checked_add(&self, rhs: &Matrix) -> Result<Matrix> {
        self.zip_with(rhs, "matrix add", |a, b| a + b)
    }

    pub fn checked_sub(&self, rhs: &Matrix) -> Result<Matrix> {
        self.zip_with(rhs, "matrix sub", |a, b| a - b)
    }

    /// Plain triple-loop product; `self.cols` must equal `rhs.rows`.
    pub fn matmul(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.cols != rhs.rows {
            return Err(NnError::mismatch(
                "matrix multiply",
                format!("{} rows", self.cols),
                format!("{} rows", rhs.rows),
            ));
        }

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;

                for k in 0..self.cols {
                    sum += self.data[i][k] * rhs.data[k][j];
                }

                res.data[i][j] = sum;
            }
        }

        Ok(res)
    }

    /// Treats `v` as a column matrix; the result is `rows x 1`.
    pub fn mul_vector(&self, v: &Vector) -> Result<Matrix> {
        if self.cols != v.len() {
            return Err(NnError::mismatch("matrix-vector multiply", self.cols, v.len()));
        }

        let mut res = Matrix::zeros(self.rows, 1);

        for i in 0..self.rows {
            let mut sum = 0.0;

            for k in 0..self.cols {
                sum += self.data[i][k] * v[k];
            }

            res.data[i][0] = sum;
        }

        Ok(res)
    }

    pub fn row(&self, i: usize) -> Result<Vector> {
        self.data.get(i)
            .map(|row| Vector::from(row.clone()))
            .ok_or_else(|| NnError::mismatch("matrix row", format!("index < {}", self.rows), i))
    }

    pub fn col(&self, j: usize) -> Result<Vector> {
        if j >= self.cols {
            return Err(NnError::mismatch("matrix column", format!("index < {}", self.cols), j));
        }
        Ok(self.data.iter().map(|row| row[j]).collect())
    }

    /// The `rows x cols` block whose top-left corner is `(row, col)`.
    pub fn submatrix(&self, row: usize, col: usize, rows: usize, cols: usize) -> Result<Matrix> {
        let past_rows = row.checked_add(rows).map_or(true, |end| end > self.rows);
        let past_cols = col.checked_add(cols).map_or(true, |end| end > self.cols);
        if past_rows || past_cols {
            return Err(NnError::mismatch(
                "submatrix",
                format!("block within {}x{}", self.rows, self.cols),
                format!("{}x{} block at ({}, {})", rows, cols, row, col),
            ));
        }

        let data = self.data[row..row + rows]
            .iter()
            .map(|r| r[col..col + cols].to_vec())
            .collect();

        Ok(Matrix { rows, cols, data })
    }

    /// Views a single-row or single-column matrix as a vector.
    pub fn as_vector(&self) -> Result<Vector> {
        if self.rows == 1 {
            self.row(0)
        } else if self.cols == 1 {
            self.col(0)
        } else {
            Err(NnError::Conversion { rows: self.rows, cols: self.cols })
        }
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.data[i][j]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        &mut self.data[i][j]
    }
}

impl Mul<f64> for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl Mul<f64> for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

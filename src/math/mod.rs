pub mod vector;
pub mod matrix;

pub use vector::Vector;
pub use matrix::Matrix;

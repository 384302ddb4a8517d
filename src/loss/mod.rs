pub mod squared;

pub use squared::SquaredErrorLoss;

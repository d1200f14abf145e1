//! Travel cost matrices.

mod matrix;

pub use matrix::DistanceMatrix;

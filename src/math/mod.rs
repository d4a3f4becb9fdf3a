//! Numeric building blocks for the solver.
//!
//! `Vector` is a small owned coordinate container with the geometric
//! operations the hyperplane and solution types need. `Matrix` wraps an
//! ndarray `Array2` with shape-checked arithmetic. `tolerance` holds the
//! near-zero policy shared by elimination and classification.
pub mod matrix;
pub mod tolerance;
pub mod vector;

pub use matrix::Matrix;
pub use tolerance::{first_nonzero_index, is_near_zero, DEFAULT_TOLERANCE};
pub use vector::Vector;

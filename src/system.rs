//! The `LinearSystem` container and its row operations.
//!
//! A system is a fixed, ordered list of equations sharing one dimension.
//! Equations can be read, replaced, and combined through the three
//! elementary row operations, but never inserted or removed.

use std::fmt;
use std::ops::Index;

use ndarray::Array2;

use crate::config::SolverConfig;
use crate::error::LinSysError;
use crate::hyperplane::{ConstantTerm, Hyperplane, NormalVector};
use crate::math::{is_near_zero, Matrix, Vector, DEFAULT_TOLERANCE};

#[derive(Clone, Debug, PartialEq)]
pub struct LinearSystem {
    equations: Vec<Hyperplane>,
    dimension: usize,
    tolerance: f64,
}

impl LinearSystem {
    /// Create a system from equations that all share the first one's dimension.
    pub fn new(equations: Vec<Hyperplane>) -> Result<Self, LinSysError> {
        let dimension = equations
            .first()
            .map(|e| e.dimension())
            .ok_or(LinSysError::EmptySystem)?;

        if let Some(bad) = equations.iter().find(|e| e.dimension() != dimension) {
            return Err(LinSysError::DimensionMismatch {
                expected: dimension,
                found: bad.dimension(),
            });
        }

        Ok(Self {
            equations,
            dimension,
            tolerance: DEFAULT_TOLERANCE,
        })
    }

    pub fn with_config(equations: Vec<Hyperplane>, config: &SolverConfig) -> Result<Self, LinSysError> {
        Self::new(equations)?.with_tolerance(config.tolerance)
    }

    /// Replace the near-zero threshold used by elimination and classification.
    pub fn with_tolerance(mut self, tolerance: f64) -> Result<Self, LinSysError> {
        SolverConfig::new(tolerance)?;
        self.tolerance = tolerance;
        Ok(self)
    }

    /// Build a system from an augmented matrix `[A | b]`.
    ///
    /// Each row becomes one equation: all but the last column are the normal
    /// vector, the last column is the constant term.
    pub fn from_augmented(matrix: &Array2<f64>) -> Result<Self, LinSysError> {
        let (nrows, ncols) = matrix.dim();
        if nrows == 0 || ncols == 0 {
            return Err(LinSysError::EmptySystem);
        }
        let equations = matrix
            .outer_iter()
            .map(|row| {
                let coefficients: Vec<f64> = row.iter().take(ncols - 1).copied().collect();
                Hyperplane::new(Vector::new(coefficients), row[ncols - 1])
            })
            .collect();
        Self::new(equations)
    }

    /// The augmented matrix `[A | b]`, one row per equation.
    pub fn to_augmented(&self) -> Array2<f64> {
        let ncols = self.dimension + 1;
        Array2::from_shape_fn((self.len(), ncols), |(i, j)| {
            let eq = &self.equations[i];
            if j < self.dimension {
                eq.coefficients()[j]
            } else {
                eq.constant_term()
            }
        })
    }

    /// The coefficient matrix `A` of `A x = b`.
    pub fn coefficient_matrix(&self) -> Result<Matrix, LinSysError> {
        Matrix::new(Array2::from_shape_fn((self.len(), self.dimension), |(i, j)| {
            self.equations[i].coefficients()[j]
        }))
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn len(&self) -> usize {
        self.equations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.equations.is_empty()
    }

    pub fn equations(&self) -> &[Hyperplane] {
        &self.equations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Hyperplane> {
        self.equations.iter()
    }

    #[inline]
    pub(crate) fn coefficient(&self, row: usize, col: usize) -> f64 {
        self.equations[row].coefficients()[col]
    }

    #[inline]
    pub(crate) fn is_near_zero(&self, x: f64) -> bool {
        is_near_zero(x, self.tolerance)
    }

    fn check_row(&self, row: usize) -> Result<(), LinSysError> {
        if row >= self.len() {
            return Err(LinSysError::RowOutOfBounds {
                row,
                len: self.len(),
            });
        }
        Ok(())
    }

    /// Replace the equation at `row`; it must match the system's dimension.
    pub fn set(&mut self, row: usize, equation: Hyperplane) -> Result<(), LinSysError> {
        self.check_row(row)?;
        if equation.dimension() != self.dimension {
            return Err(LinSysError::DimensionMismatch {
                expected: self.dimension,
                found: equation.dimension(),
            });
        }
        self.equations[row] = equation;
        Ok(())
    }

    pub fn swap_rows(&mut self, row1: usize, row2: usize) -> Result<(), LinSysError> {
        self.check_row(row1)?;
        self.check_row(row2)?;
        self.swap(row1, row2);
        Ok(())
    }

    /// Multiply both sides of equation `row` by `coefficient`.
    ///
    /// Scaling by zero is allowed here; it wipes the equation to `0 = 0`.
    pub fn multiply_row(&mut self, row: usize, coefficient: f64) -> Result<(), LinSysError> {
        self.check_row(row)?;
        self.scale(row, coefficient);
        Ok(())
    }

    /// `row_to_add_to += coefficient * row_to_add`.
    pub fn add_multiple_of_row(
        &mut self,
        coefficient: f64,
        row_to_add: usize,
        row_to_add_to: usize,
    ) -> Result<(), LinSysError> {
        self.check_row(row_to_add)?;
        self.check_row(row_to_add_to)?;
        self.add_scaled(coefficient, row_to_add, row_to_add_to);
        Ok(())
    }

    /// Scale `row` so that its coefficient at `col` becomes exactly one.
    pub fn scale_row_to_unit_pivot(&mut self, row: usize, col: usize) -> Result<(), LinSysError> {
        self.check_row(row)?;
        if col >= self.dimension {
            return Err(LinSysError::ColumnOutOfBounds {
                col,
                dimension: self.dimension,
            });
        }
        if self.is_near_zero(self.coefficient(row, col)) {
            return Err(LinSysError::DegenerateScale { row, col });
        }
        self.normalize_pivot(row, col);
        Ok(())
    }

    // Unchecked row operations used by elimination. Indices come from the
    // system itself and every row shares one dimension, so nothing can fail.

    #[inline]
    pub(crate) fn swap(&mut self, row1: usize, row2: usize) {
        self.equations.swap(row1, row2);
    }

    pub(crate) fn scale(&mut self, row: usize, coefficient: f64) {
        self.equations[row] = self.equations[row].scaled(coefficient);
    }

    pub(crate) fn add_scaled(&mut self, coefficient: f64, src: usize, dst: usize) {
        self.equations[dst] = self.equations[dst].plus_scaled(&self.equations[src], coefficient);
    }

    /// Caller guarantees the coefficient at `(row, col)` is not near zero.
    pub(crate) fn normalize_pivot(&mut self, row: usize, col: usize) {
        let pivot = self.coefficient(row, col);
        self.scale(row, 1.0 / pivot);
        // Division can leave 0.9999999999999999 behind.
        self.equations[row].set_coefficient(col, 1.0);
    }
}

impl Index<usize> for LinearSystem {
    type Output = Hyperplane;

    fn index(&self, index: usize) -> &Self::Output {
        &self.equations[index]
    }
}

impl<'a> IntoIterator for &'a LinearSystem {
    type Item = &'a Hyperplane;
    type IntoIter = std::slice::Iter<'a, Hyperplane>;

    fn into_iter(self) -> Self::IntoIter {
        self.equations.iter()
    }
}

impl fmt::Display for LinearSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Linear System:")?;
        for (i, eq) in self.equations.iter().enumerate() {
            write!(f, "\nEquation {}: {}", i + 1, eq)?;
        }
        Ok(())
    }
}

use std::fmt;
use std::ops::Index;

use ndarray::Array2;

use crate::error::LinSysError;
use crate::math::tolerance::{is_near_zero, DEFAULT_TOLERANCE};
use crate::math::vector::{round_to, Vector};

/// Dense, nonempty `f64` matrix.
///
/// Shapes are checked up front so that no operation ever falls through to
/// ndarray broadcasting or a shape panic.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    data: Array2<f64>,
}

impl Matrix {
    pub fn new(data: Array2<f64>) -> Result<Self, LinSysError> {
        if data.nrows() == 0 || data.ncols() == 0 {
            return Err(LinSysError::EmptyMatrix);
        }
        Ok(Self { data })
    }

    /// Builds a matrix from row slices. Every row must have the length of the first.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, LinSysError> {
        let ncols = rows.first().map_or(0, |r| r.as_ref().len());
        if ncols == 0 {
            return Err(LinSysError::EmptyMatrix);
        }
        if let Some(bad) = rows.iter().find(|r| r.as_ref().len() != ncols) {
            return Err(LinSysError::DimensionMismatch {
                expected: ncols,
                found: bad.as_ref().len(),
            });
        }
        let data = Array2::from_shape_fn((rows.len(), ncols), |(i, j)| rows[i].as_ref()[j]);
        Ok(Self { data })
    }

    pub fn identity(n: usize) -> Result<Self, LinSysError> {
        Self::new(Array2::eye(n))
    }

    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    pub fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn into_array(self) -> Array2<f64> {
        self.data
    }

    pub fn row(&self, row: usize) -> Result<Vector, LinSysError> {
        if row >= self.nrows() {
            return Err(LinSysError::RowOutOfBounds {
                row,
                len: self.nrows(),
            });
        }
        Ok(self.data.row(row).iter().copied().collect())
    }

    pub fn column(&self, col: usize) -> Result<Vector, LinSysError> {
        if col >= self.ncols() {
            return Err(LinSysError::ColumnOutOfBounds {
                col,
                dimension: self.ncols(),
            });
        }
        Ok(self.data.column(col).iter().copied().collect())
    }

    fn check_same_shape(&self, other: &Matrix) -> Result<(), LinSysError> {
        if self.shape() != other.shape() {
            return Err(LinSysError::ShapeMismatch {
                expected: self.shape(),
                found: other.shape(),
            });
        }
        Ok(())
    }

    pub fn plus(&self, other: &Matrix) -> Result<Matrix, LinSysError> {
        self.check_same_shape(other)?;
        Ok(Self {
            data: &self.data + &other.data,
        })
    }

    pub fn minus(&self, other: &Matrix) -> Result<Matrix, LinSysError> {
        self.check_same_shape(other)?;
        Ok(Self {
            data: &self.data - &other.data,
        })
    }

    pub fn times_scalar(&self, c: f64) -> Matrix {
        Self {
            data: &self.data * c,
        }
    }

    /// Matrix product `self · other`; needs `self.ncols() == other.nrows()`.
    pub fn times(&self, other: &Matrix) -> Result<Matrix, LinSysError> {
        if self.ncols() != other.nrows() {
            return Err(LinSysError::ShapeMismatch {
                expected: (self.ncols(), other.ncols()),
                found: other.shape(),
            });
        }
        Ok(Self {
            data: self.data.dot(&other.data),
        })
    }

    pub fn times_vector(&self, v: &Vector) -> Result<Vector, LinSysError> {
        if self.ncols() != v.dimension() {
            return Err(LinSysError::DimensionMismatch {
                expected: self.ncols(),
                found: v.dimension(),
            });
        }
        self.data
            .rows()
            .into_iter()
            .map(|row| Vector::from_iter(row.iter().copied()).dot(v))
            .collect()
    }

    pub fn transpose(&self) -> Matrix {
        Self {
            data: self.data.t().to_owned(),
        }
    }

    /// Inverse of a 1x1 or 2x2 matrix.
    ///
    /// A 2x2 inverse is `(tr(A)·I - A) / det(A)`. Larger matrices are
    /// rejected with `UnsupportedDimension`; a near-zero determinant gives
    /// `SingularMatrix`.
    pub fn inverse(&self) -> Result<Matrix, LinSysError> {
        if !self.is_square() {
            return Err(LinSysError::NotSquare {
                rows: self.nrows(),
                cols: self.ncols(),
            });
        }
        let a = &self.data;
        match self.nrows() {
            1 => {
                if is_near_zero(a[(0, 0)], DEFAULT_TOLERANCE) {
                    return Err(LinSysError::SingularMatrix);
                }
                Ok(Self {
                    data: Array2::from_elem((1, 1), 1.0 / a[(0, 0)]),
                })
            }
            2 => {
                let determinant = a[(0, 0)] * a[(1, 1)] - a[(0, 1)] * a[(1, 0)];
                if is_near_zero(determinant, DEFAULT_TOLERANCE) {
                    return Err(LinSysError::SingularMatrix);
                }
                let trace = a[(0, 0)] + a[(1, 1)];
                let adjugate = Array2::<f64>::eye(2) * trace - a;
                Ok(Self {
                    data: adjugate / determinant,
                })
            }
            n => Err(LinSysError::UnsupportedDimension {
                operation: "Matrix inverse",
                dimension: n,
            }),
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.data[index]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[")?;
        for row in self.data.rows() {
            let cells: Vec<String> = row.iter().map(|x| round_to(*x, 3).to_string()).collect();
            writeln!(f, "  [{}],", cells.join(", "))?;
        }
        write!(f, "]")
    }
}

use std::error::Error;
use std::fmt;

/// Errors raised while building or manipulating a linear system.
///
/// "No solution" and "infinitely many solutions" are not errors; they are
/// reported through [`crate::Solution`].
#[derive(Debug, Clone, PartialEq)]
pub enum LinSysError {
    /// Two equations (or vectors) live in different dimensions.
    DimensionMismatch { expected: usize, found: usize },
    /// A system needs at least one equation to fix its dimension.
    EmptySystem,
    RowOutOfBounds { row: usize, len: usize },
    ColumnOutOfBounds { col: usize, dimension: usize },
    /// The coefficient at `(row, col)` is near zero and cannot be scaled to one.
    DegenerateScale { row: usize, col: usize },
    ZeroVector,
    InvalidTolerance(f64),
    UnsupportedDimension {
        operation: &'static str,
        dimension: usize,
    },
    /// A matrix needs at least one row and one column.
    EmptyMatrix,
    /// Matrix shapes `(rows, cols)` that do not fit the requested operation.
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    NotSquare { rows: usize, cols: usize },
    SingularMatrix,
}

impl fmt::Display for LinSysError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LinSysError::DimensionMismatch { expected, found } => write!(
                f,
                "All equations in the system should live in the same dimension (expected {}, found {})",
                expected, found
            ),
            LinSysError::EmptySystem => write!(f, "A linear system needs at least one equation"),
            LinSysError::RowOutOfBounds { row, len } => {
                write!(f, "Row {} is out of bounds for a system of {} equations", row, len)
            }
            LinSysError::ColumnOutOfBounds { col, dimension } => {
                write!(f, "Column {} is out of bounds for dimension {}", col, dimension)
            }
            LinSysError::DegenerateScale { row, col } => write!(
                f,
                "Coefficient at row {}, column {} is near zero and cannot be normalized",
                row, col
            ),
            LinSysError::ZeroVector => write!(f, "Cannot normalize the zero vector"),
            LinSysError::InvalidTolerance(tol) => {
                write!(f, "Tolerance must be positive and finite, got {}", tol)
            }
            LinSysError::UnsupportedDimension { operation, dimension } => write!(
                f,
                "{} is not defined for vectors of dimension {}",
                operation, dimension
            ),
            LinSysError::EmptyMatrix => write!(f, "The matrix must be nonempty"),
            LinSysError::ShapeMismatch { expected, found } => write!(
                f,
                "Matrix shape mismatch: expected {}x{}, found {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            LinSysError::NotSquare { rows, cols } => {
                write!(f, "The matrix must be square, got {}x{}", rows, cols)
            }
            LinSysError::SingularMatrix => write!(f, "The matrix is not invertible"),
        }
    }
}

impl Error for LinSysError {}

use std::f64::consts::PI;
use std::fmt;
use std::iter::FromIterator;
use std::ops::Index;
use std::slice::Iter;

use serde::{Deserialize, Serialize};

use crate::error::LinSysError;
use crate::math::tolerance::is_near_zero;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    coordinates: Vec<f64>,
}

impl Vector {
    pub fn new(coordinates: Vec<f64>) -> Self {
        Self { coordinates }
    }

    pub fn from_slice(coordinates: &[f64]) -> Self {
        Self::new(coordinates.to_vec())
    }

    pub fn zeros(dimension: usize) -> Self {
        Self::new(vec![0.0; dimension])
    }

    /// Unit vector along axis `axis`.
    pub fn basis(dimension: usize, axis: usize) -> Result<Self, LinSysError> {
        if axis >= dimension {
            return Err(LinSysError::ColumnOutOfBounds {
                col: axis,
                dimension,
            });
        }
        let mut v = Self::zeros(dimension);
        v.coordinates[axis] = 1.0;
        Ok(v)
    }

    pub fn dimension(&self) -> usize {
        self.coordinates.len()
    }

    pub fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }

    pub fn iter(&self) -> Iter<'_, f64> {
        self.coordinates.iter()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.coordinates.clone()
    }

    fn check_dimension(&self, other: &Vector) -> Result<(), LinSysError> {
        if self.dimension() != other.dimension() {
            return Err(LinSysError::DimensionMismatch {
                expected: self.dimension(),
                found: other.dimension(),
            });
        }
        Ok(())
    }

    fn zip_with<F>(&self, other: &Vector, f: F) -> Result<Vector, LinSysError>
    where
        F: Fn(f64, f64) -> f64,
    {
        self.check_dimension(other)?;
        Ok(self
            .iter()
            .zip(other.iter())
            .map(|(&a, &b)| f(a, b))
            .collect())
    }

    pub fn plus(&self, other: &Vector) -> Result<Vector, LinSysError> {
        self.zip_with(other, |a, b| a + b)
    }

    pub fn minus(&self, other: &Vector) -> Result<Vector, LinSysError> {
        self.zip_with(other, |a, b| a - b)
    }

    pub fn times_scalar(&self, c: f64) -> Vector {
        self.iter().map(|&x| c * x).collect()
    }

    pub fn dot(&self, other: &Vector) -> Result<f64, LinSysError> {
        self.check_dimension(other)?;
        Ok(self.iter().zip(other.iter()).map(|(a, b)| a * b).sum())
    }

    pub fn magnitude(&self) -> f64 {
        self.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    pub fn normalized(&self) -> Result<Vector, LinSysError> {
        let mag = self.magnitude();
        if mag == 0.0 {
            return Err(LinSysError::ZeroVector);
        }
        Ok(self.times_scalar(1.0 / mag))
    }

    pub fn is_zero(&self, tolerance: f64) -> bool {
        is_near_zero(self.magnitude(), tolerance)
    }

    /// Angle to `other` in radians.
    pub fn angle_with(&self, other: &Vector) -> Result<f64, LinSysError> {
        let u = self.normalized()?;
        let v = other.normalized()?;
        // Rounding can push the cosine just past +-1.
        let cosine = u.dot(&v)?.clamp(-1.0, 1.0);
        Ok(cosine.acos())
    }

    pub fn angle_with_degrees(&self, other: &Vector) -> Result<f64, LinSysError> {
        Ok(self.angle_with(other)? * 180.0 / PI)
    }

    /// The zero vector is parallel to every vector. Anti-parallel vectors count.
    pub fn is_parallel_to(&self, other: &Vector, tolerance: f64) -> Result<bool, LinSysError> {
        self.check_dimension(other)?;
        if self.is_zero(tolerance) || other.is_zero(tolerance) {
            return Ok(true);
        }
        let u = self.normalized()?;
        let v = other.normalized()?;
        Ok(u.minus(&v)?.is_zero(tolerance) || u.plus(&v)?.is_zero(tolerance))
    }

    pub fn is_orthogonal_to(&self, other: &Vector, tolerance: f64) -> Result<bool, LinSysError> {
        Ok(is_near_zero(self.dot(other)?, tolerance))
    }

    /// Projection of `self` onto `basis`.
    pub fn component_parallel_to(&self, basis: &Vector) -> Result<Vector, LinSysError> {
        let unit = basis.normalized()?;
        let weight = self.dot(&unit)?;
        Ok(unit.times_scalar(weight))
    }

    pub fn component_orthogonal_to(&self, basis: &Vector) -> Result<Vector, LinSysError> {
        let parallel = self.component_parallel_to(basis)?;
        self.minus(&parallel)
    }

    pub fn cross(&self, other: &Vector) -> Result<Vector, LinSysError> {
        for v in [self, other] {
            if v.dimension() != 3 {
                return Err(LinSysError::UnsupportedDimension {
                    operation: "cross product",
                    dimension: v.dimension(),
                });
            }
        }
        let (x1, y1, z1) = (self[0], self[1], self[2]);
        let (x2, y2, z2) = (other[0], other[1], other[2]);
        Ok(Vector::new(vec![
            y1 * z2 - y2 * z1,
            x2 * z1 - x1 * z2,
            x1 * y2 - x2 * y1,
        ]))
    }

    pub fn area_of_parallelogram_with(&self, other: &Vector) -> Result<f64, LinSysError> {
        Ok(self.cross(other)?.magnitude())
    }

    pub fn area_of_triangle_with(&self, other: &Vector) -> Result<f64, LinSysError> {
        Ok(self.area_of_parallelogram_with(other)? / 2.0)
    }
}

impl From<Vec<f64>> for Vector {
    fn from(value: Vec<f64>) -> Self {
        Vector::new(value)
    }
}

impl From<Vector> for Vec<f64> {
    fn from(value: Vector) -> Self {
        value.coordinates
    }
}

impl FromIterator<f64> for Vector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Vector::new(iter.into_iter().collect())
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.coordinates[index]
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, value) in self.coordinates.iter().enumerate() {
            write!(f, "{}", round_to(*value, 3))?;
            if idx + 1 != self.coordinates.len() {
                write!(f, ", ")?;
            }
        }
        write!(f, "]")
    }
}

/// Round for display, folding `-0.0` into `0.0`.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

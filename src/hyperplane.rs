//! Hyperplane equations `n · x = k`.
//!
//! The solver only needs two capabilities from an equation: its normal
//! vector and its constant term. They are expressed as the [`NormalVector`]
//! and [`ConstantTerm`] traits so elimination code never probes concrete
//! types. [`Hyperplane`] is the single concrete equation type; its
//! [`HyperplaneKind`] tags whether it is a 2-D line, a 3-D plane or a
//! general N-D hyperplane.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LinSysError;
use crate::math::vector::round_to;
use crate::math::{first_nonzero_index, is_near_zero, Vector};
use crate::solution::Solution;
use crate::system::LinearSystem;

pub trait NormalVector {
    fn normal_vector(&self) -> &Vector;

    fn dimension(&self) -> usize {
        self.normal_vector().dimension()
    }
}

pub trait ConstantTerm {
    fn constant_term(&self) -> f64;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HyperplaneKind {
    Line,
    Plane,
    Hyperplane(usize),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hyperplane {
    normal_vector: Vector,
    constant_term: f64,
}

impl NormalVector for Hyperplane {
    fn normal_vector(&self) -> &Vector {
        &self.normal_vector
    }
}

impl ConstantTerm for Hyperplane {
    fn constant_term(&self) -> f64 {
        self.constant_term
    }
}

impl Hyperplane {
    pub fn new(normal_vector: Vector, constant_term: f64) -> Self {
        Self {
            normal_vector,
            constant_term,
        }
    }

    /// Build from raw coefficients, e.g. `from_coefficients(&[1.0, 2.0], 3.0)` for `x + 2y = 3`.
    pub fn from_coefficients(coefficients: &[f64], constant_term: f64) -> Self {
        Self::new(Vector::from_slice(coefficients), constant_term)
    }

    /// Copy the capabilities of any equation-like value.
    pub fn from_equation<E: NormalVector + ConstantTerm>(equation: &E) -> Self {
        Self::new(equation.normal_vector().clone(), equation.constant_term())
    }

    pub fn kind(&self) -> HyperplaneKind {
        match self.dimension() {
            2 => HyperplaneKind::Line,
            3 => HyperplaneKind::Plane,
            n => HyperplaneKind::Hyperplane(n),
        }
    }

    pub fn coefficients(&self) -> &[f64] {
        self.normal_vector.coordinates()
    }

    pub fn first_nonzero_index(&self, tolerance: f64) -> Option<usize> {
        first_nonzero_index(self.coefficients(), tolerance)
    }

    /// A point on the hyperplane, or `None` when the normal vector is zero.
    pub fn basepoint(&self, tolerance: f64) -> Option<Vector> {
        let idx = self.first_nonzero_index(tolerance)?;
        let mut coords = vec![0.0; self.dimension()];
        coords[idx] = self.constant_term / self.coefficients()[idx];
        Some(Vector::new(coords))
    }

    pub fn is_parallel_to(&self, other: &Hyperplane, tolerance: f64) -> Result<bool, LinSysError> {
        self.normal_vector
            .is_parallel_to(&other.normal_vector, tolerance)
    }

    /// True when both equations describe the same point set.
    pub fn coincides_with(&self, other: &Hyperplane, tolerance: f64) -> Result<bool, LinSysError> {
        match (self.basepoint(tolerance), other.basepoint(tolerance)) {
            (None, None) => Ok(is_near_zero(
                self.constant_term - other.constant_term,
                tolerance,
            )),
            (Some(x0), Some(y0)) => {
                if !self.is_parallel_to(other, tolerance)? {
                    return Ok(false);
                }
                x0.minus(&y0)?
                    .is_orthogonal_to(&self.normal_vector, tolerance)
            }
            _ => Ok(false),
        }
    }

    /// Intersect with another hyperplane of the same dimension.
    pub fn intersection_with(&self, other: &Hyperplane, tolerance: f64) -> Result<Solution, LinSysError> {
        let system = LinearSystem::new(vec![self.clone(), other.clone()])?.with_tolerance(tolerance)?;
        Ok(system.solve())
    }

    pub(crate) fn scaled(&self, c: f64) -> Hyperplane {
        Hyperplane::new(self.normal_vector.times_scalar(c), self.constant_term * c)
    }

    /// `self + c * other`; both sides must share a dimension.
    pub(crate) fn plus_scaled(&self, other: &Hyperplane, c: f64) -> Hyperplane {
        let normal = self
            .normal_vector
            .iter()
            .zip(other.normal_vector.iter())
            .map(|(a, b)| a + c * b)
            .collect();
        Hyperplane::new(normal, self.constant_term + c * other.constant_term)
    }

    pub(crate) fn set_coefficient(&mut self, col: usize, value: f64) {
        let mut coords = self.normal_vector.to_vec();
        coords[col] = value;
        self.normal_vector = Vector::new(coords);
    }

    /// Returns `n · point - k`, zero when `point` lies on the hyperplane.
    pub fn residual(&self, point: &Vector) -> Result<f64, LinSysError> {
        Ok(self.normal_vector.dot(point)? - self.constant_term)
    }
}

fn write_coefficient(coefficient: f64, is_initial_term: bool) -> String {
    let mut output = String::new();
    if coefficient < 0.0 {
        output.push('-');
    }
    if coefficient > 0.0 && !is_initial_term {
        output.push('+');
    }
    if !is_initial_term {
        output.push(' ');
    }
    if coefficient.abs() != 1.0 {
        output.push_str(&coefficient.abs().to_string());
    }
    output
}

impl fmt::Display for Hyperplane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const DECIMALS: i32 = 3;
        let mut terms = Vec::new();
        for (i, &c) in self.coefficients().iter().enumerate() {
            let c = round_to(c, DECIMALS);
            if c == 0.0 {
                continue;
            }
            terms.push(format!("{}x_{}", write_coefficient(c, terms.is_empty()), i + 1));
        }
        if terms.is_empty() {
            write!(f, "0")?;
        } else {
            write!(f, "{}", terms.join(" "))?;
        }
        write!(f, " = {}", round_to(self.constant_term, DECIMALS))
    }
}

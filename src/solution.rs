//! Classifying a reduced system and extracting its solution set.

use std::fmt;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::LinSysError;
use crate::hyperplane::ConstantTerm;
use crate::math::vector::round_to;
use crate::math::Vector;
use crate::system::LinearSystem;

/// Affine solution set `basepoint + Σ tᵢ · directionᵢ`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parametrization {
    basepoint: Vector,
    direction_vectors: Vec<Vector>,
}

impl Parametrization {
    /// Every direction vector must live in the basepoint's dimension.
    pub fn new(basepoint: Vector, direction_vectors: Vec<Vector>) -> Result<Self, LinSysError> {
        let dimension = basepoint.dimension();
        if let Some(bad) = direction_vectors.iter().find(|v| v.dimension() != dimension) {
            return Err(LinSysError::DimensionMismatch {
                expected: dimension,
                found: bad.dimension(),
            });
        }
        Ok(Self {
            basepoint,
            direction_vectors,
        })
    }

    pub fn basepoint(&self) -> &Vector {
        &self.basepoint
    }

    pub fn direction_vectors(&self) -> &[Vector] {
        &self.direction_vectors
    }

    pub fn dimension(&self) -> usize {
        self.basepoint.dimension()
    }

    pub fn free_variable_count(&self) -> usize {
        self.direction_vectors.len()
    }

    /// The point reached with one parameter per direction vector.
    pub fn point_at(&self, params: &[f64]) -> Result<Vector, LinSysError> {
        if params.len() != self.direction_vectors.len() {
            return Err(LinSysError::DimensionMismatch {
                expected: self.direction_vectors.len(),
                found: params.len(),
            });
        }
        let mut point = self.basepoint.clone();
        for (t, direction) in params.iter().zip(self.direction_vectors.iter()) {
            point = point.plus(&direction.times_scalar(*t))?;
        }
        Ok(point)
    }
}

impl fmt::Display for Parametrization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for coord in 0..self.dimension() {
            if coord > 0 {
                writeln!(f)?;
            }
            write!(f, "x_{} = {}", coord + 1, round_to(self.basepoint[coord], 3))?;
            for (free_var, direction) in self.direction_vectors.iter().enumerate() {
                write!(f, " + {}*t_{}", round_to(direction[coord], 3), free_var + 1)?;
            }
        }
        Ok(())
    }
}

/// Outcome of solving a linear system. Exactly one variant applies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Solution {
    Unique(Vector),
    Infinite(Parametrization),
    Inconsistent,
}

impl Solution {
    pub fn is_unique(&self) -> bool {
        matches!(self, Solution::Unique(_))
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Solution::Infinite(_))
    }

    pub fn is_inconsistent(&self) -> bool {
        matches!(self, Solution::Inconsistent)
    }

    pub fn unique(&self) -> Option<&Vector> {
        match self {
            Solution::Unique(v) => Some(v),
            _ => None,
        }
    }

    pub fn parametrization(&self) -> Option<&Parametrization> {
        match self {
            Solution::Infinite(p) => Some(p),
            _ => None,
        }
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Solution::Unique(v) => write!(f, "Unique solution: {}", v),
            Solution::Infinite(p) => write!(f, "Infinitely many solutions:\n{}", p),
            Solution::Inconsistent => write!(f, "No solution exists"),
        }
    }
}

impl LinearSystem {
    /// Solve the system.
    ///
    /// Works on an RREF copy; `self` is left untouched, so the same system
    /// can be solved any number of times.
    pub fn solve(&self) -> Solution {
        let rref = self.compute_rref();
        let pivot_indices = rref.pivot_indices();

        if rref.has_contradictory_equation(&pivot_indices) {
            log::debug!("system of {} equations is inconsistent", self.len());
            return Solution::Inconsistent;
        }

        let num_pivots = pivot_indices.iter().flatten().count();
        log::debug!(
            "reduced system has {} pivots over {} variables",
            num_pivots,
            rref.dimension()
        );

        if num_pivots < rref.dimension() {
            Solution::Infinite(rref.extract_parametrization(&pivot_indices))
        } else {
            Solution::Unique(rref.extract_unique_solution(&pivot_indices))
        }
    }

    /// A row `0 = k` with `k` not near zero. `0 = 0` rows are fine.
    fn has_contradictory_equation(&self, pivot_indices: &[Option<usize>]) -> bool {
        self.iter()
            .zip(pivot_indices)
            .any(|(eq, pivot)| pivot.is_none() && !self.is_near_zero(eq.constant_term()))
    }

    /// Each variable takes the constant term of the row pivoting on it.
    fn extract_unique_solution(&self, pivot_indices: &[Option<usize>]) -> Vector {
        let mut coords = vec![0.0; self.dimension()];
        for (row, pivot) in pivot_indices.iter().enumerate() {
            if let Some(col) = *pivot {
                coords[col] = self[row].constant_term();
            }
        }
        Vector::new(coords)
    }

    fn extract_parametrization(&self, pivot_indices: &[Option<usize>]) -> Parametrization {
        let basepoint = self.extract_basepoint(pivot_indices);
        let direction_vectors = self.extract_direction_vectors(pivot_indices);
        Parametrization {
            basepoint,
            direction_vectors,
        }
    }

    fn extract_basepoint(&self, pivot_indices: &[Option<usize>]) -> Vector {
        // Same placement rule as the unique case, free variables stay at zero.
        self.extract_unique_solution(pivot_indices)
    }

    fn extract_direction_vectors(&self, pivot_indices: &[Option<usize>]) -> Vec<Vector> {
        let num_variables = self.dimension();
        let mut is_pivot = vec![false; num_variables];
        for col in pivot_indices.iter().flatten() {
            is_pivot[*col] = true;
        }

        (0..num_variables)
            .filter(|&col| !is_pivot[col])
            .map(|free_var| {
                let mut coords = vec![0.0; num_variables];
                coords[free_var] = 1.0;
                for (row, pivot) in pivot_indices.iter().enumerate() {
                    if let Some(pivot_var) = *pivot {
                        coords[pivot_var] = -self.coefficient(row, free_var);
                    }
                }
                Vector::new(coords)
            })
            .collect()
    }
}

/// Solve independent systems in parallel. Output order matches input order.
pub fn solve_all(systems: &[LinearSystem]) -> Vec<Solution> {
    systems.par_iter().map(LinearSystem::solve).collect()
}

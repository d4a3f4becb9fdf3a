//! Gaussian elimination on a [`LinearSystem`].
//!
//! Both transformations take `&self` and return a reduced copy; the system
//! they are called on is never modified.

use crate::system::LinearSystem;

impl LinearSystem {
    /// Column of the first non-near-zero coefficient in each row, `None` for
    /// rows whose normal vector is (near) zero.
    pub fn pivot_indices(&self) -> Vec<Option<usize>> {
        self.iter()
            .map(|eq| eq.first_nonzero_index(self.tolerance()))
            .collect()
    }

    pub fn pivot_count(&self) -> usize {
        self.pivot_indices().iter().flatten().count()
    }

    /// Forward elimination.
    ///
    /// In the result each row's pivot column is strictly greater than the
    /// pivot column of every row above it. Rows that end up with a zero
    /// normal vector stay in place so `0 = k` contradictions survive.
    pub fn compute_triangular_form(&self) -> LinearSystem {
        let mut system = self.clone();
        let num_equations = system.len();
        let num_variables = system.dimension();

        let mut col = 0;
        for row in 0..num_equations {
            while col < num_variables {
                if system.is_near_zero(system.coefficient(row, col))
                    && !system.swap_with_row_below_for_nonzero_coefficient(row, col)
                {
                    // Variable `col` is absent from the remaining equations.
                    col += 1;
                    continue;
                }
                system.clear_coefficients_below(row, col);
                col += 1;
                break;
            }
        }

        system
    }

    /// Swap `row` with the first row below it that has a usable coefficient
    /// in `col`. Returns false when no such row exists.
    fn swap_with_row_below_for_nonzero_coefficient(&mut self, row: usize, col: usize) -> bool {
        let found = (row + 1..self.len()).find(|&k| !self.is_near_zero(self.coefficient(k, col)));
        match found {
            Some(k) => {
                log::trace!("swapping rows {} and {} for pivot column {}", row, k, col);
                self.swap(row, k);
                true
            }
            None => false,
        }
    }

    fn clear_coefficients_below(&mut self, row: usize, col: usize) {
        let pivot = self.coefficient(row, col);
        for k in row + 1..self.len() {
            let alpha = -self.coefficient(k, col) / pivot;
            self.add_scaled(alpha, row, k);
        }
    }

    /// Reduced row-echelon form.
    ///
    /// Triangularizes a copy, then walks the rows bottom-up scaling each
    /// pivot to one and clearing its column in every row above.
    pub fn compute_rref(&self) -> LinearSystem {
        let mut tf = self.compute_triangular_form();
        let pivot_indices = tf.pivot_indices();

        for (row, pivot) in pivot_indices.into_iter().enumerate().rev() {
            let Some(col) = pivot else {
                continue;
            };
            tf.normalize_pivot(row, col);
            tf.clear_coefficients_above(row, col);
        }

        tf
    }

    fn clear_coefficients_above(&mut self, row: usize, col: usize) {
        for k in (0..row).rev() {
            let alpha = -self.coefficient(k, col);
            self.add_scaled(alpha, row, k);
        }
    }
}

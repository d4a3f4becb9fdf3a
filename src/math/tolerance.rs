/// Magnitude below which a coefficient is treated as zero.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Returns true when `x` is within `eps` of zero.
///
/// Row operations accumulate floating point error, so every pivot and
/// contradiction test goes through this instead of comparing against `0.0`.
#[inline]
pub fn is_near_zero(x: f64, eps: f64) -> bool {
    x.abs() < eps
}

/// Index of the first coefficient in `values` that is not near zero.
pub fn first_nonzero_index(values: &[f64], eps: f64) -> Option<usize> {
    values.iter().position(|&v| !is_near_zero(v, eps))
}

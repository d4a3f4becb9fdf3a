//! linsys: row-reduction solver for systems of hyperplane equations.
//!
//! A [`LinearSystem`] is built from equations `n · x = k` of one fixed
//! dimension. [`LinearSystem::solve`] reduces a copy to reduced row-echelon
//! form and reports a [`Solution`]: a unique point, a [`Parametrization`] of
//! an affine solution set, or inconsistency.
//!
//! Row operations are public so callers can drive elimination by hand, and
//! every near-zero decision goes through the system's configured tolerance
//! (see [`SolverConfig`]).
pub mod config;
mod elimination;
pub mod error;
pub mod hyperplane;
pub mod math;
pub mod solution;
pub mod system;

pub use config::{load_solver_config, SolverConfig};
pub use error::LinSysError;
pub use hyperplane::{ConstantTerm, Hyperplane, HyperplaneKind, NormalVector};
pub use math::{Matrix, Vector};
pub use solution::{solve_all, Parametrization, Solution};
pub use system::LinearSystem;

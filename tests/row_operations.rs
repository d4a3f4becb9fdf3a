//! Integration tests for system construction, row operations and the
//! reduced forms they drive.

use ndarray::array;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use linsys::{ConstantTerm, Hyperplane, LinSysError, LinearSystem, Solution, SolverConfig};

fn plane(n: [f64; 3], k: f64) -> Hyperplane {
    Hyperplane::from_coefficients(&n, k)
}

fn sample_system() -> LinearSystem {
    LinearSystem::new(vec![
        plane([1.0, 1.0, 1.0], 1.0),
        plane([0.0, 1.0, 0.0], 2.0),
        plane([1.0, 1.0, -1.0], 3.0),
        plane([1.0, 0.0, -2.0], 2.0),
    ])
    .unwrap()
}

fn assert_systems_close(a: &LinearSystem, b: &LinearSystem, tol: f64) {
    assert_eq!(a.len(), b.len());
    for (ea, eb) in a.iter().zip(b.iter()) {
        for (x, y) in ea.coefficients().iter().zip(eb.coefficients()) {
            assert!((x - y).abs() < tol, "{} vs {}", ea, eb);
        }
        assert!((ea.constant_term() - eb.constant_term()).abs() < tol, "{} vs {}", ea, eb);
    }
}

fn assert_solutions_close(a: &Solution, b: &Solution, tol: f64) {
    let close = |u: &linsys::Vector, v: &linsys::Vector| {
        u.dimension() == v.dimension() && u.iter().zip(v.iter()).all(|(x, y)| (x - y).abs() < tol)
    };
    match (a, b) {
        (Solution::Unique(u), Solution::Unique(v)) => assert!(close(u, v), "{} vs {}", u, v),
        (Solution::Infinite(p), Solution::Infinite(q)) => {
            assert!(close(p.basepoint(), q.basepoint()), "{} vs {}", p, q);
            assert_eq!(p.free_variable_count(), q.free_variable_count());
            for (u, v) in p.direction_vectors().iter().zip(q.direction_vectors()) {
                assert!(close(u, v), "{} vs {}", u, v);
            }
        }
        (Solution::Inconsistent, Solution::Inconsistent) => {}
        _ => panic!("different outcomes: {} vs {}", a, b),
    }
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn construction_rejects_mixed_dimensions() {
    let err = LinearSystem::new(vec![
        plane([1.0, 1.0, 1.0], 1.0),
        Hyperplane::from_coefficients(&[1.0, 2.0], 3.0),
    ])
    .unwrap_err();
    assert_eq!(err, LinSysError::DimensionMismatch { expected: 3, found: 2 });
}

#[test]
fn construction_rejects_empty_system() {
    assert_eq!(LinearSystem::new(vec![]).unwrap_err(), LinSysError::EmptySystem);
}

#[test]
fn construction_with_config_uses_its_tolerance() {
    let cfg = SolverConfig { tolerance: 1e-6 };
    let s = LinearSystem::with_config(vec![plane([1.0, 0.0, 0.0], 1.0)], &cfg).unwrap();
    assert_eq!(s.tolerance(), 1e-6);

    let bad = SolverConfig { tolerance: -1.0 };
    assert!(LinearSystem::with_config(vec![plane([1.0, 0.0, 0.0], 1.0)], &bad).is_err());
}

#[test]
fn set_replaces_only_matching_dimension() {
    let mut s = sample_system();
    s.set(0, plane([0.0, 1.0, 0.0], 2.0)).unwrap();
    assert_eq!(s[0], s[1]);

    let err = s.set(1, Hyperplane::from_coefficients(&[1.0], 1.0)).unwrap_err();
    assert_eq!(err, LinSysError::DimensionMismatch { expected: 3, found: 1 });
    assert_eq!(s.set(9, plane([0.0, 0.0, 1.0], 0.0)).unwrap_err(), LinSysError::RowOutOfBounds { row: 9, len: 4 });
}

#[test]
fn augmented_matrix_bridge() {
    let m = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
    let s = LinearSystem::from_augmented(&m).unwrap();
    assert_eq!(s.dimension(), 2);
    assert_eq!(s[1], Hyperplane::from_coefficients(&[4.0, 5.0], 6.0));
    assert_eq!(s.to_augmented(), m);
}

#[test]
fn display_lists_equations() {
    let s = sample_system();
    let text = s.to_string();
    assert!(text.starts_with("Linear System:"));
    assert!(text.contains("Equation 1: x_1 + x_2 + x_3 = 1"));
    assert!(text.contains("Equation 4: x_1 - 2x_3 = 2"));
}

// ---------------------------------------------------------------------------
// Row operations
// ---------------------------------------------------------------------------

#[test]
fn row_operation_sequence() {
    let p0 = plane([1.0, 1.0, 1.0], 1.0);
    let p1 = plane([0.0, 1.0, 0.0], 2.0);
    let p2 = plane([1.0, 1.0, -1.0], 3.0);
    let p3 = plane([1.0, 0.0, -2.0], 2.0);
    let mut s = sample_system();

    s.swap_rows(0, 1).unwrap();
    assert_eq!(s.equations(), &[p1.clone(), p0.clone(), p2.clone(), p3.clone()]);

    s.swap_rows(1, 3).unwrap();
    assert_eq!(s.equations(), &[p1.clone(), p3.clone(), p2.clone(), p0.clone()]);

    s.swap_rows(3, 1).unwrap();
    assert_eq!(s.equations(), &[p1.clone(), p0.clone(), p2.clone(), p3.clone()]);

    s.multiply_row(0, 1.0).unwrap();
    assert_eq!(s[0], p1);

    s.multiply_row(2, -1.0).unwrap();
    assert_eq!(s[2], plane([-1.0, -1.0, 1.0], -3.0));

    s.multiply_row(1, 10.0).unwrap();
    assert_eq!(s[1], plane([10.0, 10.0, 10.0], 10.0));

    s.add_multiple_of_row(0.0, 0, 1).unwrap();
    assert_eq!(s[1], plane([10.0, 10.0, 10.0], 10.0));

    s.add_multiple_of_row(1.0, 0, 1).unwrap();
    assert_eq!(s[1], plane([10.0, 11.0, 10.0], 12.0));
    assert_eq!(s[0], p1);

    s.add_multiple_of_row(-1.0, 1, 0).unwrap();
    assert_eq!(s[0], plane([-10.0, -10.0, -10.0], -10.0));
    assert_eq!(s[1], plane([10.0, 11.0, 10.0], 12.0));
    assert_eq!(s[2], plane([-1.0, -1.0, 1.0], -3.0));
    assert_eq!(s[3], p3);
}

#[test]
fn row_operations_check_bounds() {
    let mut s = sample_system();
    assert!(matches!(s.swap_rows(0, 4), Err(LinSysError::RowOutOfBounds { row: 4, len: 4 })));
    assert!(s.multiply_row(7, 2.0).is_err());
    assert!(s.add_multiple_of_row(1.0, 5, 0).is_err());
    assert_eq!(s, sample_system());
}

#[test]
fn multiply_by_zero_is_allowed() {
    let mut s = sample_system();
    s.multiply_row(0, 0.0).unwrap();
    assert_eq!(s.pivot_indices()[0], None);
    assert_eq!(s[0].constant_term(), 0.0);
}

#[test]
fn scale_row_to_unit_pivot() {
    let mut s = LinearSystem::new(vec![plane([0.0, 2.0, 6.0], 8.0)]).unwrap();
    s.scale_row_to_unit_pivot(0, 1).unwrap();
    assert_eq!(s[0], plane([0.0, 1.0, 3.0], 4.0));

    assert_eq!(s.scale_row_to_unit_pivot(0, 0).unwrap_err(), LinSysError::DegenerateScale { row: 0, col: 0 });
    assert_eq!(
        s.scale_row_to_unit_pivot(0, 3).unwrap_err(),
        LinSysError::ColumnOutOfBounds { col: 3, dimension: 3 }
    );
}

// ---------------------------------------------------------------------------
// Triangular form and RREF
// ---------------------------------------------------------------------------

#[test]
fn triangular_form_has_strictly_increasing_pivots() {
    let s = sample_system();
    let t = s.compute_triangular_form();
    assert_eq!(t.pivot_indices(), vec![Some(0), Some(1), Some(2), None]);
    assert_eq!(t[0], plane([1.0, 1.0, 1.0], 1.0));
    assert_eq!(t[1], plane([0.0, 1.0, 0.0], 2.0));
    assert_eq!(t[2], plane([0.0, 0.0, -2.0], 2.0));
    assert!(t[3].constant_term().abs() < 1e-12);
    // The input is a value, not a working buffer.
    assert_eq!(s, sample_system());
}

#[test]
fn rref_isolates_each_pivot() {
    let r = sample_system().compute_rref();
    let pivots = r.pivot_indices();
    for (row, pivot) in pivots.iter().enumerate() {
        let Some(col) = *pivot else { continue };
        assert_eq!(r[row].coefficients()[col], 1.0);
        for other in 0..r.len() {
            if other != row {
                assert!(r[other].coefficients()[col].abs() < 1e-12);
            }
        }
    }
}

#[test]
fn rref_is_idempotent() {
    let systems = vec![
        sample_system(),
        LinearSystem::new(vec![
            plane([8.631, 5.112, -1.816], -5.113),
            plane([4.315, 11.132, -5.27], -6.775),
            plane([-2.158, 3.01, -1.727], -0.831),
        ])
        .unwrap(),
        LinearSystem::new(vec![plane([0.0, 0.0, 0.0], 0.0), plane([1.0, 1.0, 1.0], 1.0)]).unwrap(),
    ];
    for s in systems {
        let once = s.compute_rref();
        let twice = once.compute_rref();
        assert_systems_close(&once, &twice, 1e-10);
        assert_eq!(once.pivot_count(), twice.pivot_count());
    }
}

#[test]
fn random_row_operations_preserve_the_solution_set() {
    let mut rng = StdRng::seed_from_u64(7);
    let multipliers = [2.0, -1.0, 0.5, 3.0, -0.25];

    for trial in 0..50 {
        let mut rows: Vec<Hyperplane> = (0..3)
            .map(|_| {
                let n: Vec<f64> = (0..3).map(|_| rng.gen_range(-5..=5) as f64).collect();
                Hyperplane::from_coefficients(&n, rng.gen_range(-5..=5) as f64)
            })
            .collect();
        if trial % 3 == 0 {
            // Force a dependent fourth row.
            let combined: Vec<f64> = rows[0]
                .coefficients()
                .iter()
                .zip(rows[1].coefficients())
                .map(|(a, b)| a + 2.0 * b)
                .collect();
            let k = rows[0].constant_term() + 2.0 * rows[1].constant_term();
            rows.push(Hyperplane::from_coefficients(&combined, k));
        }
        let original = LinearSystem::new(rows).unwrap();
        let mut shuffled = original.clone();
        let n = shuffled.len();

        for _ in 0..10 {
            let i = rng.gen_range(0..n);
            let j = rng.gen_range(0..n);
            let c = multipliers[rng.gen_range(0..multipliers.len())];
            match rng.gen_range(0..3) {
                0 => shuffled.swap_rows(i, j).unwrap(),
                1 => shuffled.multiply_row(i, c).unwrap(),
                _ if i != j => shuffled.add_multiple_of_row(c, i, j).unwrap(),
                _ => {}
            }
        }

        assert_eq!(
            original.compute_rref().pivot_count(),
            shuffled.compute_rref().pivot_count(),
            "trial {}",
            trial
        );
        assert_solutions_close(&original.solve(), &shuffled.solve(), 1e-8);
    }
}

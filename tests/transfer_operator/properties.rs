// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property-based checks of the pipeline invariants.

use ndarray::Array2;
use proptest::collection::vec;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use transferoperator::estimators::approaches::transfer_operator::{solve, transition_matrix};
use transferoperator::estimators::approaches::{
    BoundaryCondition, RectangularBinning, SolverOptions, VisitCompression,
};

fn boundary() -> impl Strategy<Value = BoundaryCondition> {
    prop_oneof![Just(BoundaryCondition::Circular), Just(BoundaryCondition::Random)]
}

/// A label sequence over `n` bins, each label `< n`.
fn visit_sequence() -> impl Strategy<Value = (usize, Vec<usize>)> {
    (1usize..12).prop_flat_map(|n| (Just(n), vec(0..n, 1..120)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Count-based partitions place every sample in `0..k` on every axis.
    #[test]
    fn prop_cell_count_covers_data(
        values in vec(-1e3f64..1e3, 2..200),
        k in 1usize..25,
    ) {
        let n = values.len() / 2;
        let data = Array2::from_shape_vec((n, 2), values[..2 * n].to_vec()).unwrap();
        let grid = RectangularBinning::CellCount(k).resolve(data.view()).unwrap();
        let codes = grid.encode_all(data.view()).unwrap();
        prop_assert!(codes.iter().all(|&c| c >= 0 && c < k as i64));
    }

    /// Coverage also holds for subnormal, tiny and huge extents.
    #[test]
    fn prop_cell_count_covers_data_at_any_scale(
        unit in vec(-1.0f64..1.0, 1..100),
        scale in prop_oneof![Just(5e-324), Just(1e-310), Just(1e-300), Just(1.0), Just(1e300), Just(8e307)],
        offset in prop_oneof![Just(0.0), -1e3f64..1e3, Just(1e300), Just(-1e300)],
        k in prop_oneof![1usize..25, Just(1usize << 50)],
    ) {
        let values: Vec<f64> = unit.iter().map(|&u| offset + u * scale).collect();
        let data = Array2::from_shape_vec((values.len(), 1), values).unwrap();
        let grid = RectangularBinning::CellCount(k).resolve(data.view()).unwrap();
        let codes = grid.encode_all(data.view()).unwrap();
        prop_assert!(codes.iter().all(|&c| c >= 0 && c < k as i64));
    }

    /// Visited rows sum to one, unvisited rows stay empty.
    #[test]
    fn prop_transition_matrix_is_row_stochastic(
        (n, visits) in visit_sequence(),
        bc in boundary(),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let p = transition_matrix(&visits, n, bc, &mut rng).unwrap();
        let sums = p.row_sums();
        for i in 0..n {
            if visits.contains(&i) {
                prop_assert!((sums[i] - 1.0).abs() < 1e-10, "row {} sums to {}", i, sums[i]);
            } else {
                prop_assert_eq!(p.row(i).count(), 0);
            }
        }
        prop_assert!(p.triplets().all(|(_, _, v)| v > 0.0 && v <= 1.0));
    }

    /// The solver always returns a normalised, non-negative vector.
    #[test]
    fn prop_solution_is_a_distribution(
        (n, visits) in visit_sequence(),
        bc in boundary(),
        seed in any::<u64>(),
        max_iterations in 1usize..300,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let p = transition_matrix(&visits, n, bc, &mut rng).unwrap();
        let options = SolverOptions::default().with_max_iterations(max_iterations);
        let sol = solve(&p, &options, &mut rng).unwrap();
        prop_assert_eq!(sol.probabilities.len(), n);
        prop_assert!(sol.probabilities.iter().all(|&v| v >= 0.0 && v.is_finite()));
        prop_assert!((sol.probabilities.iter().sum::<f64>() - 1.0).abs() < 1e-10);
        prop_assert!(sol.iterations <= max_iterations);
        prop_assert_eq!(sol.converged, sol.distance < options.tolerance);
    }

    /// Two samples share a label exactly when their integer coordinates agree.
    #[test]
    fn prop_compression_groups_equal_rows(
        flat in vec(-3i64..3, 3..150),
    ) {
        let n = flat.len() / 3;
        let codes = Array2::from_shape_vec((n, 3), flat[..3 * n].to_vec()).unwrap();
        let vc = VisitCompression::from_codes(codes.view()).unwrap();
        let labels = vc.visits();
        for s in 0..n {
            for t in 0..n {
                prop_assert_eq!(labels[s] == labels[t], codes.row(s) == codes.row(t));
            }
        }
        prop_assert_eq!(vc.counts().iter().sum::<usize>(), n);
        // labels are assigned in order of first occurrence
        let mut seen = 0;
        for &label in labels {
            prop_assert!(label <= seen);
            if label == seen {
                seen += 1;
            }
        }
        prop_assert_eq!(seen, vc.n_bins());
    }
}

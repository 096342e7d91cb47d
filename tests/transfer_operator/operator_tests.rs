// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use approx::assert_abs_diff_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;

use transferoperator::Error;
use transferoperator::estimators::approaches::transfer_operator::transition_matrix;
use transferoperator::estimators::approaches::{
    BoundaryCondition, RectangularBinning, TransferOperator,
};

use crate::test_helpers::{
    assert_row_stochastic, column, generate_random_walk, henon_trajectory, logistic_series,
};

#[test]
fn transition_counts_are_normalised_per_source() {
    let mut rng = StdRng::seed_from_u64(0);
    let visits = [0, 0, 1, 0, 1, 1];
    let p = transition_matrix(&visits, 2, BoundaryCondition::Circular, &mut rng).unwrap();
    // bin 0 at t = 0, 1, 3 -> 0, 1, 1; bin 1 at t = 2, 4, 5 -> 0, 1, wrap to 0
    assert_abs_diff_eq!(p.get(0, 0), 1.0 / 3.0, epsilon = 1e-15);
    assert_abs_diff_eq!(p.get(0, 1), 2.0 / 3.0, epsilon = 1e-15);
    assert_abs_diff_eq!(p.get(1, 0), 2.0 / 3.0, epsilon = 1e-15);
    assert_abs_diff_eq!(p.get(1, 1), 1.0 / 3.0, epsilon = 1e-15);
    assert_eq!(p.nnz(), 4);
}

#[test]
fn last_sample_wraps_to_first_bin() {
    let mut rng = StdRng::seed_from_u64(0);
    let p = transition_matrix(&[0, 1, 2], 3, BoundaryCondition::Circular, &mut rng).unwrap();
    assert_eq!(p.get(2, 0), 1.0);
    assert_row_stochastic(&p, 1e-12);
}

#[test]
fn random_boundary_is_reproducible_for_a_seed() {
    let visits: Vec<usize> = (0..50).map(|t| (t * 7) % 11).collect();
    let build = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        transition_matrix(&visits, 11, BoundaryCondition::Random, &mut rng).unwrap()
    };
    let a = build(5);
    assert_eq!(a, build(5));
    assert_row_stochastic(&a, 1e-12);

    // Only the row of the final sample depends on the draw.
    let last = *visits.last().unwrap();
    let circular = {
        let mut rng = StdRng::seed_from_u64(5);
        transition_matrix(&visits, 11, BoundaryCondition::Circular, &mut rng).unwrap()
    };
    for i in (0..11).filter(|&i| i != last) {
        assert_eq!(a.row(i).collect::<Vec<_>>(), circular.row(i).collect::<Vec<_>>());
    }
}

#[test]
fn invalid_label_sequences_are_rejected() {
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(
        transition_matrix(&[], 3, BoundaryCondition::Circular, &mut rng),
        Err(Error::EmptyTrajectory)
    );
    assert!(matches!(
        transition_matrix(&[0, 3], 3, BoundaryCondition::Circular, &mut rng),
        Err(Error::DimensionMismatch { expected: 3, found: 4 })
    ));
}

#[test]
fn boundary_condition_parses_known_names_only() {
    assert_eq!("circular".parse::<BoundaryCondition>(), Ok(BoundaryCondition::Circular));
    assert_eq!(" Random ".parse::<BoundaryCondition>(), Ok(BoundaryCondition::Random));
    assert_eq!(BoundaryCondition::default(), BoundaryCondition::Circular);
    for name in ["none", "periodic", ""] {
        assert_eq!(
            name.parse::<BoundaryCondition>(),
            Err(Error::UnknownBoundaryCondition(name.to_string()))
        );
    }
    for bc in [BoundaryCondition::Circular, BoundaryCondition::Random] {
        assert_eq!(bc.to_string().parse::<BoundaryCondition>(), Ok(bc));
    }
}

#[test]
fn operator_rows_are_stochastic_on_chaotic_data() {
    let mut rng = StdRng::seed_from_u64(1);
    let data = henon_trajectory(5000);
    for k in [5, 20, 60] {
        let to = TransferOperator::from_trajectory(
            data.view(),
            &RectangularBinning::CellCount(k),
            BoundaryCondition::Circular,
            &mut rng,
        )
        .unwrap();
        let p = to.transfer_matrix();
        assert_eq!(p.nrows(), to.n_bins());
        assert_row_stochastic(p, 1e-10);
        // every visited bin has an outgoing transition
        assert!((0..to.n_bins()).all(|i| p.row(i).count() > 0));
    }
}

#[test]
fn operator_exposes_bins_aligned_with_matrix() {
    let mut rng = StdRng::seed_from_u64(2);
    let data = generate_random_walk(400, 3, 0.5, 9);
    let to = TransferOperator::from_trajectory(
        data.view(),
        &RectangularBinning::CellWidth(1.0),
        BoundaryCondition::Circular,
        &mut rng,
    )
    .unwrap();
    assert_eq!(to.visits().len(), 400);
    assert_eq!(to.visit_counts().iter().sum::<usize>(), 400);
    assert_eq!(to.boundary_condition(), BoundaryCondition::Circular);
    assert_eq!(to.binning(), &RectangularBinning::CellWidth(1.0));

    let corners = to.bin_corners();
    assert_eq!(corners.dim(), (to.n_bins(), 3));
    for (i, bin) in to.bins().iter().enumerate() {
        assert_eq!(corners.row(i), to.grid().corner(bin).unwrap());
    }
    // each sample lies inside the bin it was assigned to
    for (t, &label) in to.visits().iter().enumerate() {
        for d in 0..3 {
            let lo = corners[(label, d)];
            let x = data[(t, d)];
            assert!(x >= lo - 1e-12 && x < lo + 1.0 + 1e-12);
        }
    }
}

#[test]
fn circular_operator_is_deterministic() {
    let data = henon_trajectory(1000);
    let binning = RectangularBinning::CellCount(15);
    let a = TransferOperator::from_trajectory(
        data.view(),
        &binning,
        BoundaryCondition::Circular,
        &mut StdRng::seed_from_u64(1),
    )
    .unwrap();
    let b = TransferOperator::from_trajectory(
        data.view(),
        &binning,
        BoundaryCondition::Circular,
        &mut StdRng::seed_from_u64(99),
    )
    .unwrap();
    assert_eq!(a.transfer_matrix(), b.transfer_matrix());
    assert_eq!(a.bins(), b.bins());
}

#[test]
fn series_constructor_matches_single_column_trajectory() {
    let series = logistic_series(800, 4.0, 0.4);
    let binning = RectangularBinning::CellCount(10);
    let from_series = TransferOperator::from_series(
        series.view(),
        &binning,
        BoundaryCondition::Circular,
        &mut StdRng::seed_from_u64(0),
    )
    .unwrap();
    let data = column(series.as_slice().unwrap());
    let from_column = TransferOperator::from_trajectory(
        data.view(),
        &binning,
        BoundaryCondition::Circular,
        &mut StdRng::seed_from_u64(0),
    )
    .unwrap();
    assert_eq!(from_series.transfer_matrix(), from_column.transfer_matrix());
    assert!(from_series.n_bins() <= 10);
}

#[test]
fn configuration_errors_abort_construction() {
    let mut rng = StdRng::seed_from_u64(0);
    let data = henon_trajectory(10);
    let err = TransferOperator::from_trajectory(
        data.view(),
        &RectangularBinning::CellCounts(vec![3]),
        BoundaryCondition::Circular,
        &mut rng,
    )
    .unwrap_err();
    assert_eq!(err, Error::DimensionMismatch { expected: 1, found: 2 });
}

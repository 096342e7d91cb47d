// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, Array2};
use rand::Rng;

use crate::error::Result;
use crate::estimators::approaches::transfer_operator::{
    BoundaryCondition, RectangularBinning, SolverOptions, TransferOperatorEntropy,
};
pub use crate::estimators::traits::{GlobalValue, ProbabilitiesEstimator};

/// Entropy estimation methods for state-space trajectories
///
/// This struct provides static methods for creating entropy estimators
/// backed by the invariant measure of a transfer operator.
pub struct Entropy;

impl Entropy {
    /// Creates a transfer-operator entropy estimator for a D-dimensional trajectory
    ///
    /// # Arguments
    ///
    /// * `data` - Time-ordered trajectory, one row per sample
    /// * `binning` - Rectangular partition of the state space
    ///
    /// # Returns
    ///
    /// An estimator using the circular boundary condition, default solver
    /// options and a fixed seed, so repeated calls give identical results.
    pub fn new_transfer_operator(
        data: Array2<f64>,
        binning: RectangularBinning,
    ) -> Result<TransferOperatorEntropy> {
        TransferOperatorEntropy::new(data, binning)
    }

    /// Creates a transfer-operator entropy estimator for a scalar time series
    pub fn new_transfer_operator_1d(
        data: Array1<f64>,
        binning: RectangularBinning,
    ) -> Result<TransferOperatorEntropy> {
        TransferOperatorEntropy::from_series(data, binning)
    }

    /// Creates a transfer-operator entropy estimator with explicit settings
    ///
    /// # Arguments
    ///
    /// * `data` - Time-ordered trajectory, one row per sample
    /// * `binning` - Rectangular partition of the state space
    /// * `boundary` - Successor rule for the last sample
    /// * `options` - Power-iteration settings
    /// * `rng` - Source of the initial guess and of the random boundary draw
    pub fn transfer_operator_with<R: Rng + ?Sized>(
        data: Array2<f64>,
        binning: RectangularBinning,
        boundary: BoundaryCondition,
        options: &SolverOptions,
        rng: &mut R,
    ) -> Result<TransferOperatorEntropy> {
        TransferOperatorEntropy::new_with(data, binning, boundary, options, rng)
    }
}

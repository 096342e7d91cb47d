// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, Array2, Axis};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::Result;
use crate::estimators::approaches::transfer_operator::binning::RectangularBinning;
use crate::estimators::approaches::transfer_operator::invariant_measure::{
    InvariantMeasure, SolverOptions,
};
use crate::estimators::approaches::transfer_operator::operator::BoundaryCondition;
use crate::estimators::probabilities::Probabilities;
use crate::estimators::traits::{GlobalValue, ProbabilitiesEstimator};

/// Seed of the generator used when the caller does not supply one.
pub const DEFAULT_SEED: u64 = 1234;

/// Shannon entropy (nats) of the invariant measure of a transfer operator.
///
/// The trajectory is binned on a rectangular partition, the empirical
/// transfer operator between visited bins is estimated, and its stationary
/// distribution is used as the probability mass function. Unlike a plain
/// histogram, the measure reflects the dynamics (transition structure) of the
/// trajectory rather than only its visit frequencies.
pub struct TransferOperatorEntropy {
    measure: InvariantMeasure,
}

impl TransferOperatorEntropy {
    /// Build from a trajectory (`samples x dimensions`) with circular boundary,
    /// default solver options and a fixed seed.
    pub fn new(data: Array2<f64>, binning: RectangularBinning) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(DEFAULT_SEED);
        Self::new_with(
            data,
            binning,
            BoundaryCondition::Circular,
            &SolverOptions::default(),
            &mut rng,
        )
    }

    /// Build from a scalar time series.
    pub fn from_series(data: Array1<f64>, binning: RectangularBinning) -> Result<Self> {
        Self::new(data.insert_axis(Axis(1)), binning)
    }

    pub fn new_with<R: Rng + ?Sized>(
        data: Array2<f64>,
        binning: RectangularBinning,
        boundary: BoundaryCondition,
        options: &SolverOptions,
        rng: &mut R,
    ) -> Result<Self> {
        let measure =
            InvariantMeasure::from_trajectory(data.view(), &binning, boundary, options, rng)?;
        Ok(Self { measure })
    }

    pub fn invariant_measure(&self) -> &InvariantMeasure {
        &self.measure
    }
}

impl ProbabilitiesEstimator for TransferOperatorEntropy {
    fn probabilities(&self) -> &Probabilities {
        self.measure.probabilities()
    }

    fn outcomes(&self) -> Array2<f64> {
        self.measure.bin_corners()
    }
}

impl GlobalValue for TransferOperatorEntropy {
    fn global_value(&self) -> f64 {
        self.measure.probabilities().shannon_entropy()
    }
}

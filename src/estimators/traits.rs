// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::Array2;

use crate::estimators::probabilities::Probabilities;

pub trait GlobalValue {
    /// Compute and return the global value of the measure.
    fn global_value(&self) -> f64;
}

/// Interface for estimators that yield a probability mass function over
/// state-space outcomes.
///
/// Row `i` of [`outcomes`](Self::outcomes) is the outcome whose probability is
/// `probabilities()[i]`, so downstream measures can report both together.
pub trait ProbabilitiesEstimator {
    fn probabilities(&self) -> &Probabilities;

    /// Outcome coordinates, one row per probability (`outcomes x dimensions`).
    fn outcomes(&self) -> Array2<f64>;

    /// Probabilities paired with their outcomes.
    fn probabilities_and_outcomes(&self) -> (Probabilities, Array2<f64>) {
        (self.probabilities().clone(), self.outcomes())
    }
}

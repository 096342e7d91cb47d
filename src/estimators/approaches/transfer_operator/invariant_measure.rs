// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, Array2, ArrayView2};
use rand::Rng;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::estimators::approaches::transfer_operator::binning::RectangularBinning;
use crate::estimators::approaches::transfer_operator::operator::{
    BoundaryCondition, TransferOperator,
};
use crate::estimators::approaches::transfer_operator::sparse::SparseMatrix;
use crate::estimators::probabilities::Probabilities;
use crate::estimators::traits::ProbabilitiesEstimator;

/// Settings of the power-iteration solver.
///
/// Each step computes the image `ρ·P`, measures
/// `‖ρ·P - ρ‖₂ / ‖ρ‖₂` and stops once it drops below `tolerance`. Otherwise
/// the next iterate is `laziness·ρ + (1 - laziness)·ρ·P`. The lazy chain has
/// the same stationary distribution as `P` but no periodic oscillation;
/// `laziness = 0` gives plain power iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverOptions {
    pub max_iterations: usize,
    pub tolerance: f64,
    /// Check the total mass every this many iterations.
    /// `None` means `floor(1 / renormalization_tolerance)`.
    pub renormalization_interval: Option<usize>,
    pub renormalization_tolerance: f64,
    pub laziness: f64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            tolerance: 1e-8,
            renormalization_interval: None,
            renormalization_tolerance: 1e-8,
            laziness: 0.5,
        }
    }
}

impl SolverOptions {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_renormalization_interval(mut self, interval: usize) -> Self {
        self.renormalization_interval = Some(interval);
        self
    }

    pub fn with_renormalization_tolerance(mut self, tolerance: f64) -> Self {
        self.renormalization_tolerance = tolerance;
        self
    }

    pub fn with_laziness(mut self, laziness: f64) -> Self {
        self.laziness = laziness;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(Error::InvalidSolverOptions(
                "max_iterations must be positive".to_string(),
            ));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(Error::InvalidSolverOptions(format!(
                "tolerance must be positive and finite (got {})",
                self.tolerance
            )));
        }
        if !(self.renormalization_tolerance.is_finite() && self.renormalization_tolerance > 0.0)
        {
            return Err(Error::InvalidSolverOptions(format!(
                "renormalization_tolerance must be positive and finite (got {})",
                self.renormalization_tolerance
            )));
        }
        if self.renormalization_interval == Some(0) {
            return Err(Error::InvalidSolverOptions(
                "renormalization_interval must be positive".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.laziness) {
            return Err(Error::InvalidSolverOptions(format!(
                "laziness must lie in [0, 1) (got {})",
                self.laziness
            )));
        }
        Ok(())
    }

    /// Effective number of iterations between mass checks.
    pub fn renormalization_every(&self) -> usize {
        self.renormalization_interval
            .unwrap_or_else(|| ((1.0 / self.renormalization_tolerance).floor() as usize).max(1))
    }
}

/// Stationary distribution found by [`solve`] and how it was reached.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub probabilities: Probabilities,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Relative distance `‖ρ·P - ρ‖₂ / ‖ρ‖₂` of the returned `ρ`.
    pub distance: f64,
    pub converged: bool,
}

/// Left eigenvector for eigenvalue one of a non-negative square matrix.
///
/// The initial guess is drawn uniformly from `rng` and normalised. Rows
/// without stored entries leak their mass instead of producing `NaN`.
/// Exhausting `max_iterations` is not an error: the last iterate is returned
/// with `converged == false`.
pub fn solve<R: Rng + ?Sized>(
    matrix: &SparseMatrix,
    options: &SolverOptions,
    rng: &mut R,
) -> Result<Solution> {
    options.validate()?;
    let n = matrix.nrows();
    if n == 0 {
        return Err(Error::EmptyTrajectory);
    }
    if matrix.ncols() != n {
        return Err(Error::DimensionMismatch {
            expected: n,
            found: matrix.ncols(),
        });
    }
    if matrix.triplets().any(|(_, _, v)| !(v.is_finite() && v >= 0.0)) {
        return Err(Error::InvalidProbabilities(
            "transfer matrix has negative or non-finite entries".to_string(),
        ));
    }

    let mut rho: Array1<f64> = (0..n).map(|_| rng.gen_range(0.0..1.0)).collect();
    let total = rho.sum();
    if total > 0.0 {
        rho /= total;
    } else {
        rho.fill(1.0 / n as f64);
    }

    let every = options.renormalization_every();
    let alpha = options.laziness;
    let mut iterations = 0;
    let mut distance = f64::INFINITY;
    let mut collapsed = false;
    while iterations < options.max_iterations {
        let image = matrix.left_mul(rho.view())?;
        iterations += 1;
        distance = relative_distance(&image, &rho);
        if distance < options.tolerance {
            break;
        }

        let mut next = if alpha > 0.0 {
            &rho * alpha + &image * (1.0 - alpha)
        } else {
            image
        };
        if iterations % every == 0 {
            renormalize_if_drifted(&mut next, options.renormalization_tolerance);
        }
        let mass = next.sum();
        if !(mass.is_finite() && mass > 0.0) {
            collapsed = true;
            break;
        }
        rho = next;
    }
    if !collapsed && distance >= options.tolerance {
        // The loop ran out after an update; measure the iterate being returned.
        distance = relative_distance(&matrix.left_mul(rho.view())?, &rho);
    }
    renormalize_if_drifted(&mut rho, options.renormalization_tolerance);

    let converged = !collapsed && distance < options.tolerance;
    if collapsed {
        warn!(iterations, "invariant measure lost all mass; keeping last positive iterate");
    } else if !converged {
        warn!(
            iterations,
            distance,
            tolerance = options.tolerance,
            "invariant measure did not converge"
        );
    }
    debug!(bins = n, iterations, distance, converged, "solved invariant measure");

    Ok(Solution {
        probabilities: Probabilities::new(rho)?,
        iterations,
        distance,
        converged,
    })
}

fn relative_distance(image: &Array1<f64>, rho: &Array1<f64>) -> f64 {
    let norm = rho.dot(rho).sqrt();
    if norm == 0.0 {
        return 0.0;
    }
    let diff = image - rho;
    diff.dot(&diff).sqrt() / norm
}

fn renormalize_if_drifted(v: &mut Array1<f64>, tolerance: f64) {
    let total = v.sum();
    if total > 0.0 && total.is_finite() && (total - 1.0).abs() > tolerance {
        *v /= total;
    }
}

/// Invariant measure of a transfer operator, aligned with its unique bins.
///
/// Entry `i` of [`probabilities`](Self::probabilities) is the stationary mass
/// of the bin whose lower corner is `bin_corners().row(i)`.
#[derive(Debug, Clone)]
pub struct InvariantMeasure {
    operator: TransferOperator,
    solution: Solution,
    tolerance: f64,
}

impl InvariantMeasure {
    pub fn new<R: Rng + ?Sized>(
        operator: TransferOperator,
        options: &SolverOptions,
        rng: &mut R,
    ) -> Result<Self> {
        let solution = solve(operator.transfer_matrix(), options, rng)?;
        Ok(Self {
            operator,
            solution,
            tolerance: options.tolerance,
        })
    }

    /// Run the full pipeline: bin the trajectory, estimate the operator, solve.
    pub fn from_trajectory<R: Rng + ?Sized>(
        points: ArrayView2<'_, f64>,
        binning: &RectangularBinning,
        boundary: BoundaryCondition,
        options: &SolverOptions,
        rng: &mut R,
    ) -> Result<Self> {
        options.validate()?;
        let operator = TransferOperator::from_trajectory(points, binning, boundary, rng)?;
        Self::new(operator, options, rng)
    }

    pub fn probabilities(&self) -> &Probabilities {
        &self.solution.probabilities
    }

    pub fn operator(&self) -> &TransferOperator {
        &self.operator
    }

    pub fn transfer_matrix(&self) -> &SparseMatrix {
        self.operator.transfer_matrix()
    }

    pub fn bins(&self) -> &[Vec<i64>] {
        self.operator.bins()
    }

    pub fn bin_corners(&self) -> Array2<f64> {
        self.operator.bin_corners()
    }

    pub fn iterations(&self) -> usize {
        self.solution.iterations
    }

    pub fn distance(&self) -> f64 {
        self.solution.distance
    }

    pub fn converged(&self) -> bool {
        self.solution.converged
    }

    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    /// Bins whose measure exceeds `tolerance / N`.
    pub fn nonzero_support(&self) -> Vec<usize> {
        let threshold = self.tolerance / self.operator.n_bins() as f64;
        self.probabilities()
            .iter()
            .enumerate()
            .filter(|&(_, &p)| p > threshold)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn into_parts(self) -> (TransferOperator, Solution) {
        (self.operator, self.solution)
    }
}

impl ProbabilitiesEstimator for InvariantMeasure {
    fn probabilities(&self) -> &Probabilities {
        &self.solution.probabilities
    }

    /// Lower corners of the visited bins.
    fn outcomes(&self) -> Array2<f64> {
        self.operator.bin_corners()
    }
}

// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use rand::Rng;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::{Error, Result};
use crate::estimators::approaches::transfer_operator::binning::RectangularBinning;
use crate::estimators::approaches::transfer_operator::grid::BinGrid;
use crate::estimators::approaches::transfer_operator::sparse::SparseMatrix;
use crate::estimators::approaches::transfer_operator::visits::VisitCompression;

/// Successor assigned to the last sample of a finite trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BoundaryCondition {
    /// The last sample jumps to the bin of the first sample.
    #[default]
    Circular,
    /// The last sample jumps to the bin of a uniformly drawn sample.
    ///
    /// A convenience option: it carries no guarantee about the stationary
    /// distribution of the resulting operator.
    Random,
}

impl FromStr for BoundaryCondition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "circular" => Ok(Self::Circular),
            "random" => Ok(Self::Random),
            _ => Err(Error::UnknownBoundaryCondition(s.to_string())),
        }
    }
}

impl fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Circular => f.write_str("circular"),
            Self::Random => f.write_str("random"),
        }
    }
}

/// Row-stochastic transition matrix estimated from a sequence of bin labels.
///
/// Every consecutive pair `(visits[t], visits[t + 1])` is one transition; the
/// last sample gets a synthetic successor chosen by `boundary`. Entry `(i, j)`
/// is the number of `i -> j` transitions divided by the number of visits to
/// `i`, so every visited bin has a row summing to one. `rng` is only drawn
/// from by [`BoundaryCondition::Random`].
pub fn transition_matrix<R: Rng + ?Sized>(
    visits: &[usize],
    n_bins: usize,
    boundary: BoundaryCondition,
    rng: &mut R,
) -> Result<SparseMatrix> {
    let n = visits.len();
    if n == 0 {
        return Err(Error::EmptyTrajectory);
    }
    if let Some(&label) = visits.iter().find(|&&label| label >= n_bins) {
        return Err(Error::DimensionMismatch {
            expected: n_bins,
            found: label + 1,
        });
    }

    let wrap = match boundary {
        BoundaryCondition::Circular => visits[0],
        BoundaryCondition::Random => visits[rng.gen_range(0..n)],
    };

    let mut out_degree = vec![0usize; n_bins];
    let mut transitions: HashMap<(usize, usize), usize> = HashMap::new();
    for (t, &source) in visits.iter().enumerate() {
        let target = visits.get(t + 1).copied().unwrap_or(wrap);
        out_degree[source] += 1;
        *transitions.entry((source, target)).or_insert(0) += 1;
    }

    let matrix = SparseMatrix::from_triplets(
        n_bins,
        n_bins,
        transitions
            .into_iter()
            .map(|((i, j), count)| (i, j, count as f64 / out_degree[i] as f64)),
    )?;
    debug!(
        samples = n,
        bins = n_bins,
        nnz = matrix.nnz(),
        %boundary,
        "built transfer matrix"
    );
    Ok(matrix)
}

/// Empirical transfer (Perron-Frobenius) operator of a trajectory on a
/// rectangular partition.
///
/// Keeps the resolved grid and the unique visited bins so that row `i` of the
/// transfer matrix can be traced back to the bin at `bin_corners().row(i)`.
#[derive(Debug, Clone)]
pub struct TransferOperator {
    binning: RectangularBinning,
    grid: BinGrid,
    compression: VisitCompression,
    boundary: BoundaryCondition,
    matrix: SparseMatrix,
}

impl TransferOperator {
    /// Estimate the operator from a time-ordered trajectory (`samples x dimensions`).
    pub fn from_trajectory<R: Rng + ?Sized>(
        points: ArrayView2<'_, f64>,
        binning: &RectangularBinning,
        boundary: BoundaryCondition,
        rng: &mut R,
    ) -> Result<Self> {
        let grid = binning.resolve(points)?;
        let codes = grid.encode_all(points)?;
        let compression = VisitCompression::from_codes(codes.view())?;
        debug!(
            samples = compression.n_samples(),
            bins = compression.n_bins(),
            "compressed bin visits"
        );
        let matrix = transition_matrix(
            compression.visits(),
            compression.n_bins(),
            boundary,
            rng,
        )?;
        Ok(Self {
            binning: binning.clone(),
            grid,
            compression,
            boundary,
            matrix,
        })
    }

    /// Estimate the operator from a scalar time series.
    pub fn from_series<R: Rng + ?Sized>(
        series: ArrayView1<'_, f64>,
        binning: &RectangularBinning,
        boundary: BoundaryCondition,
        rng: &mut R,
    ) -> Result<Self> {
        Self::from_trajectory(series.insert_axis(Axis(1)), binning, boundary, rng)
    }

    pub fn transfer_matrix(&self) -> &SparseMatrix {
        &self.matrix
    }

    /// Unique visited bins in label order (rows/columns of the transfer matrix).
    pub fn bins(&self) -> &[Vec<i64>] {
        self.compression.bins()
    }

    /// Bin label of every trajectory sample.
    pub fn visits(&self) -> &[usize] {
        self.compression.visits()
    }

    /// Number of samples that visited each bin.
    pub fn visit_counts(&self) -> &[usize] {
        self.compression.counts()
    }

    pub fn n_bins(&self) -> usize {
        self.compression.n_bins()
    }

    /// Lower corners of the unique bins, one row per bin (`bins x dimensions`).
    pub fn bin_corners(&self) -> Array2<f64> {
        let dim = self.grid.dim();
        let mut corners = Array2::<f64>::zeros((self.n_bins(), dim));
        for (mut row, bin) in corners.axis_iter_mut(Axis(0)).zip(self.bins()) {
            row.assign(&self.grid.corner_unchecked(bin));
        }
        corners
    }

    pub fn grid(&self) -> &BinGrid {
        &self.grid
    }

    pub fn binning(&self) -> &RectangularBinning {
        &self.binning
    }

    pub fn boundary_condition(&self) -> BoundaryCondition {
        self.boundary
    }
}

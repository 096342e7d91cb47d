// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array2, ArrayView2, Axis};
use std::collections::HashMap;

use crate::error::{Error, Result};

/// Unique bins visited by a trajectory and the bin label of every sample.
///
/// Labels are dense (`0..n_bins`) and assigned in order of first visit, so two
/// runs on the same input produce identical labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitCompression {
    bins: Vec<Vec<i64>>,
    visits: Vec<usize>,
    counts: Vec<usize>,
}

impl VisitCompression {
    /// Compress a `samples x dimensions` array of bin coordinates.
    pub fn from_codes(codes: ArrayView2<'_, i64>) -> Result<Self> {
        if codes.nrows() == 0 {
            return Err(Error::EmptyTrajectory);
        }
        if codes.ncols() == 0 {
            return Err(Error::EmptyDimension);
        }
        let n = codes.nrows();
        let mut labels: HashMap<Vec<i64>, usize> = HashMap::new();
        let mut bins: Vec<Vec<i64>> = Vec::new();
        let mut counts: Vec<usize> = Vec::new();
        let mut visits: Vec<usize> = Vec::with_capacity(n);
        for row in codes.axis_iter(Axis(0)) {
            let key = row.to_vec();
            let label = match labels.get(&key) {
                Some(&label) => label,
                None => {
                    let label = bins.len();
                    bins.push(key.clone());
                    counts.push(0);
                    labels.insert(key, label);
                    label
                }
            };
            counts[label] += 1;
            visits.push(label);
        }
        Ok(Self {
            bins,
            visits,
            counts,
        })
    }

    pub fn from_array2(codes: &Array2<i64>) -> Result<Self> {
        Self::from_codes(codes.view())
    }

    /// Unique bin coordinates, indexed by label.
    pub fn bins(&self) -> &[Vec<i64>] {
        &self.bins
    }

    /// Bin label of every sample, in trajectory order.
    pub fn visits(&self) -> &[usize] {
        &self.visits
    }

    /// Number of samples that visited each bin, indexed by label.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn n_bins(&self) -> usize {
        self.bins.len()
    }

    pub fn n_samples(&self) -> usize {
        self.visits.len()
    }
}

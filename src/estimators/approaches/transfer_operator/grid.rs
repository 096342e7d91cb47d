// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::error::{Error, Result};

/// Resolved rectangular grid: per-axis minima and strictly positive edge lengths.
///
/// A point `x` lies in the bin with integer coordinates
/// `floor((x - minima) / edge_lengths)`, taken componentwise.
#[derive(Debug, Clone, PartialEq)]
pub struct BinGrid {
    minima: Array1<f64>,
    edge_lengths: Array1<f64>,
}

impl BinGrid {
    pub fn new(minima: Array1<f64>, edge_lengths: Array1<f64>) -> Result<Self> {
        if minima.len() != edge_lengths.len() {
            return Err(Error::DimensionMismatch {
                expected: minima.len(),
                found: edge_lengths.len(),
            });
        }
        if minima.is_empty() {
            return Err(Error::EmptyDimension);
        }
        if let Some(axis) = minima.iter().position(|m| !m.is_finite()) {
            return Err(Error::InvalidBinning(format!(
                "axis minimum must be finite (axis {axis})"
            )));
        }
        if let Some(axis) = edge_lengths
            .iter()
            .position(|&e| !(e.is_finite() && e > 0.0))
        {
            return Err(Error::InvalidBinning(format!(
                "edge length must be positive and finite (axis {axis})"
            )));
        }
        Ok(Self {
            minima,
            edge_lengths,
        })
    }

    pub fn minima(&self) -> &Array1<f64> {
        &self.minima
    }

    pub fn edge_lengths(&self) -> &Array1<f64> {
        &self.edge_lengths
    }

    pub fn dim(&self) -> usize {
        self.minima.len()
    }

    /// Bin coordinates of a single point.
    pub fn encode(&self, point: ArrayView1<'_, f64>) -> Result<Vec<i64>> {
        if point.len() != self.dim() {
            return Err(Error::DimensionMismatch {
                expected: self.dim(),
                found: point.len(),
            });
        }
        self.encode_point(point)
    }

    /// Bin coordinates of every point, one row per sample (`samples x dimensions`).
    pub fn encode_all(&self, points: ArrayView2<'_, f64>) -> Result<Array2<i64>> {
        validate_points(points)?;
        if points.ncols() != self.dim() {
            return Err(Error::DimensionMismatch {
                expected: self.dim(),
                found: points.ncols(),
            });
        }
        let mut out = Array2::<i64>::zeros(points.raw_dim());
        for (mut row, point) in out.axis_iter_mut(Axis(0)).zip(points.axis_iter(Axis(0))) {
            for (code, bin) in row.iter_mut().zip(self.encode_point(point)?) {
                *code = bin;
            }
        }
        Ok(out)
    }

    /// Lower corner of a bin in state-space coordinates.
    pub fn corner(&self, bin: &[i64]) -> Result<Array1<f64>> {
        if bin.len() != self.dim() {
            return Err(Error::DimensionMismatch {
                expected: self.dim(),
                found: bin.len(),
            });
        }
        Ok(self.corner_unchecked(bin))
    }

    pub(crate) fn corner_unchecked(&self, bin: &[i64]) -> Array1<f64> {
        self.minima
            .iter()
            .zip(self.edge_lengths.iter())
            .zip(bin.iter())
            .map(|((&lo, &len), &b)| lo + b as f64 * len)
            .collect()
    }

    /// Fails instead of saturating when a coordinate does not fit in `i64`.
    fn encode_point(&self, point: ArrayView1<'_, f64>) -> Result<Vec<i64>> {
        point
            .iter()
            .zip(self.minima.iter().zip(self.edge_lengths.iter()))
            .enumerate()
            .map(|(axis, (&x, (&lo, &len)))| {
                let bin = ((x - lo) / len).floor();
                // i64::MIN as f64 is exactly -2^63; i64::MAX as f64 rounds up to 2^63.
                if bin.is_finite() && bin >= i64::MIN as f64 && bin < i64::MAX as f64 {
                    Ok(bin as i64)
                } else {
                    Err(Error::InvalidBinning(format!(
                        "bin index out of range on axis {axis}"
                    )))
                }
            })
            .collect()
    }
}

/// Reject empty, zero-dimensional or non-finite point clouds.
pub(crate) fn validate_points(points: ArrayView2<'_, f64>) -> Result<()> {
    if points.nrows() == 0 {
        return Err(Error::EmptyTrajectory);
    }
    if points.ncols() == 0 {
        return Err(Error::EmptyDimension);
    }
    for ((sample, axis), x) in points.indexed_iter() {
        if !x.is_finite() {
            return Err(Error::NonFiniteValue { sample, axis });
        }
    }
    Ok(())
}

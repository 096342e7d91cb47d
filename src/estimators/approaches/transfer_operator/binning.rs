// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, ArrayView2, Axis};
use tracing::debug;

use crate::error::{Error, Result};
use crate::estimators::approaches::transfer_operator::grid::{BinGrid, validate_points};

/// Axis-aligned rectangular partition of a state space.
///
/// The count and width variants derive the axis minima from the data; the
/// range variant uses a fixed window that does not need to cover the data.
///
/// | Variant | Minimum per axis | Edge length per axis |
/// |---------|------------------|----------------------|
/// | `CellCount(k)` / `CellCounts` | data minimum | `(max - min + (max - min)/(100 k)) / k` |
/// | `CellWidth(w)` / `CellWidths` | data minimum | `w` |
/// | `Ranges { ranges, cells }` | `low` | `(high - low) / cells` |
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RectangularBinning {
    /// The same number of cells along every axis.
    CellCount(usize),
    /// One cell count per axis.
    CellCounts(Vec<usize>),
    /// The same cell width along every axis.
    CellWidth(f64),
    /// One cell width per axis.
    CellWidths(Vec<f64>),
    /// Explicit `(low, high)` window per axis, each subdivided into `cells` cells.
    ///
    /// Points outside the window are still encoded, but their bin coordinates
    /// may be negative or exceed `cells - 1`.
    Ranges { ranges: Vec<(f64, f64)>, cells: usize },
}

impl RectangularBinning {
    /// Resolve the partition against a point cloud (`samples x dimensions`),
    /// producing the per-axis minima and edge lengths.
    pub fn resolve(&self, points: ArrayView2<'_, f64>) -> Result<BinGrid> {
        validate_points(points)?;
        let dim = points.ncols();
        let grid = match self {
            Self::CellCount(k) => resolve_counts(points, &vec![*k; dim])?,
            Self::CellCounts(counts) => {
                check_dim(counts.len(), dim)?;
                resolve_counts(points, counts)?
            }
            Self::CellWidth(w) => resolve_widths(points, &vec![*w; dim])?,
            Self::CellWidths(widths) => {
                check_dim(widths.len(), dim)?;
                resolve_widths(points, widths)?
            }
            Self::Ranges { ranges, cells } => {
                check_dim(ranges.len(), dim)?;
                resolve_ranges(ranges, *cells)?
            }
        };
        debug!(
            dim,
            minima = ?grid.minima().as_slice(),
            edge_lengths = ?grid.edge_lengths().as_slice(),
            "resolved rectangular binning"
        );
        Ok(grid)
    }

    /// Number of cells in the full partition of a `dim`-dimensional space.
    ///
    /// Only defined for the count and range variants; width-based partitions
    /// have no fixed upper bound. Returns `None` on overflow or when a per-axis
    /// descriptor does not match `dim`.
    pub fn total_outcomes(&self, dim: usize) -> Option<usize> {
        match self {
            Self::CellCount(k) => k.checked_pow(u32::try_from(dim).ok()?),
            Self::CellCounts(counts) if counts.len() == dim => {
                counts.iter().try_fold(1usize, |acc, &k| acc.checked_mul(k))
            }
            Self::Ranges { ranges, cells } if ranges.len() == dim => {
                cells.checked_pow(u32::try_from(dim).ok()?)
            }
            _ => None,
        }
    }
}

fn check_dim(expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(Error::DimensionMismatch { expected, found });
    }
    Ok(())
}

/// Per-axis (min, max) of a validated, non-empty point cloud.
fn axis_extrema(points: ArrayView2<'_, f64>) -> (Array1<f64>, Array1<f64>) {
    let minima = points.fold_axis(Axis(0), f64::INFINITY, |&acc, &x| acc.min(x));
    let maxima = points.fold_axis(Axis(0), f64::NEG_INFINITY, |&acc, &x| acc.max(x));
    (minima, maxima)
}

fn resolve_counts(points: ArrayView2<'_, f64>, counts: &[usize]) -> Result<BinGrid> {
    if let Some(axis) = counts.iter().position(|&k| k == 0) {
        return Err(Error::InvalidBinning(format!(
            "cell count must be positive (axis {axis})"
        )));
    }
    let (minima, maxima) = axis_extrema(points);
    let mut edge_lengths = Array1::<f64>::zeros(counts.len());
    for (axis, &k) in counts.iter().enumerate() {
        edge_lengths[axis] = count_edge_length(maxima[axis] - minima[axis], k, axis)?;
    }
    BinGrid::new(minima, edge_lengths)
}

/// Edge length that splits `extent` into `k` cells with the maximum strictly
/// inside the last one.
fn count_edge_length(extent: f64, k: usize, axis: usize) -> Result<f64> {
    if extent == 0.0 {
        return Ok(1.0);
    }
    if !extent.is_finite() {
        return Err(Error::InvalidBinning(format!(
            "data extent on axis {axis} exceeds the f64 range"
        )));
    }
    let cells = k as f64;
    // Pad by 1% of one cell so the maximum lies strictly inside the last bin.
    let raw_width = extent / cells;
    let mut edge = (extent + raw_width / 100.0) / cells;
    if edge <= 0.0 {
        edge = f64::from_bits(1);
    } else if edge.is_infinite() {
        edge = f64::MAX;
    }
    // The pad underflows for subnormal extents and is absorbed for very large k.
    while (extent / edge).floor() >= cells && edge < f64::MAX {
        edge = f64::from_bits(edge.to_bits() + 1);
    }
    if (extent / edge).floor() >= cells {
        return Err(Error::InvalidBinning(format!(
            "data extent on axis {axis} is too large for {k} cells"
        )));
    }
    Ok(edge)
}

fn resolve_widths(points: ArrayView2<'_, f64>, widths: &[f64]) -> Result<BinGrid> {
    if let Some(axis) = widths.iter().position(|&w| !(w.is_finite() && w > 0.0)) {
        return Err(Error::InvalidBinning(format!(
            "cell width must be positive and finite (axis {axis})"
        )));
    }
    let (minima, _) = axis_extrema(points);
    BinGrid::new(minima, Array1::from(widths.to_vec()))
}

fn resolve_ranges(ranges: &[(f64, f64)], cells: usize) -> Result<BinGrid> {
    if cells == 0 {
        return Err(Error::InvalidBinning("cell count must be positive".to_string()));
    }
    for (axis, &(low, high)) in ranges.iter().enumerate() {
        if !(low.is_finite() && high.is_finite() && high > low) {
            return Err(Error::InvalidBinning(format!(
                "range ({low}, {high}) on axis {axis} must be finite with high > low"
            )));
        }
    }
    let minima: Array1<f64> = ranges.iter().map(|&(low, _)| low).collect();
    let edge_lengths: Array1<f64> = ranges
        .iter()
        .map(|&(low, high)| (high - low) / cells as f64)
        .collect();
    BinGrid::new(minima, edge_lengths)
}

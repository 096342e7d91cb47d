// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, Array2, ArrayView1};

use crate::error::{Error, Result};

/// Compressed-sparse-row matrix of `f64` values.
///
/// Column indices within each row are strictly increasing. Built once from
/// coordinate triples and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix {
    nrows: usize,
    ncols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseMatrix {
    /// Assemble from `(row, col, value)` triples. Duplicate coordinates are summed.
    pub fn from_triplets(
        nrows: usize,
        ncols: usize,
        triplets: impl IntoIterator<Item = (usize, usize, f64)>,
    ) -> Result<Self> {
        let mut rows: Vec<Vec<(usize, f64)>> = vec![Vec::new(); nrows];
        for (row, col, value) in triplets {
            if row >= nrows || col >= ncols {
                return Err(Error::IndexOutOfBounds {
                    row,
                    col,
                    nrows,
                    ncols,
                });
            }
            rows[row].push((col, value));
        }

        let mut indptr = Vec::with_capacity(nrows + 1);
        let mut indices = Vec::new();
        let mut values = Vec::new();
        indptr.push(0);
        for mut entries in rows {
            entries.sort_unstable_by_key(|&(col, _)| col);
            let row_start = indices.len();
            for (col, value) in entries {
                if indices.len() > row_start && indices.last() == Some(&col) {
                    if let Some(v) = values.last_mut() {
                        *v += value;
                    }
                } else {
                    indices.push(col);
                    values.push(value);
                }
            }
            indptr.push(indices.len());
        }

        Ok(Self {
            nrows,
            ncols,
            indptr,
            indices,
            values,
        })
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Value at `(row, col)`; zero when the entry is not stored or out of range.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        if row >= self.nrows {
            return 0.0;
        }
        let (start, end) = (self.indptr[row], self.indptr[row + 1]);
        match self.indices[start..end].binary_search(&col) {
            Ok(pos) => self.values[start + pos],
            Err(_) => 0.0,
        }
    }

    /// Stored `(col, value)` pairs of one row, in increasing column order.
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let (start, end) = if row < self.nrows {
            (self.indptr[row], self.indptr[row + 1])
        } else {
            (0, 0)
        };
        self.indices[start..end]
            .iter()
            .copied()
            .zip(self.values[start..end].iter().copied())
    }

    /// All stored entries as `(row, col, value)`, row-major.
    pub fn triplets(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.nrows).flat_map(move |i| self.row(i).map(move |(j, v)| (i, j, v)))
    }

    pub fn row_sums(&self) -> Array1<f64> {
        (0..self.nrows).map(|i| self.row(i).map(|(_, v)| v).sum()).collect()
    }

    /// Row vector times matrix: `y = x · A`.
    pub fn left_mul(&self, x: ArrayView1<'_, f64>) -> Result<Array1<f64>> {
        if x.len() != self.nrows {
            return Err(Error::DimensionMismatch {
                expected: self.nrows,
                found: x.len(),
            });
        }
        let mut y = Array1::<f64>::zeros(self.ncols);
        for (i, &xi) in x.iter().enumerate() {
            if xi == 0.0 {
                continue;
            }
            for k in self.indptr[i]..self.indptr[i + 1] {
                y[self.indices[k]] += xi * self.values[k];
            }
        }
        Ok(y)
    }

    pub fn to_dense(&self) -> Array2<f64> {
        let mut dense = Array2::<f64>::zeros((self.nrows, self.ncols));
        for (i, j, v) in self.triplets() {
            dense[(i, j)] = v;
        }
        dense
    }
}

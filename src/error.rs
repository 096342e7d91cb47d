// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

/// Errors raised while configuring or building a transfer operator.
///
/// All variants are configuration errors: they abort the pipeline before any
/// operator is constructed. Numerical non-convergence of the invariant-measure
/// solver is reported through the returned solution instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("trajectory contains no samples")]
    EmptyTrajectory,

    #[error("trajectory points have zero dimensions")]
    EmptyDimension,

    #[error("invalid binning: {0}")]
    InvalidBinning(String),

    #[error("non-finite value at sample {sample}, axis {axis}")]
    NonFiniteValue { sample: usize, axis: usize },

    #[error("unknown boundary condition `{0}` (expected `circular` or `random`)")]
    UnknownBoundaryCondition(String),

    #[error("invalid solver options: {0}")]
    InvalidSolverOptions(String),

    #[error("entry ({row}, {col}) out of bounds for a {nrows}x{ncols} matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        nrows: usize,
        ncols: usize,
    },

    #[error("invalid probabilities: {0}")]
    InvalidProbabilities(String),
}

pub type Result<T> = std::result::Result<T, Error>;

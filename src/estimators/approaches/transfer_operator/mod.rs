// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

// Transfer-operator estimation on rectangular partitions:
// binning -> grid encoding -> visit compression -> sparse operator -> invariant measure.

pub mod binning;
pub mod grid;
pub mod invariant_measure;
pub mod operator;
pub mod sparse;
pub mod transfer_operator;
pub mod visits;

pub use binning::RectangularBinning;
pub use grid::BinGrid;
pub use invariant_measure::{InvariantMeasure, Solution, SolverOptions, solve};
pub use operator::{BoundaryCondition, TransferOperator, transition_matrix};
pub use sparse::SparseMatrix;
pub use transfer_operator::TransferOperatorEntropy;
pub use visits::VisitCompression;

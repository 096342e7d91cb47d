// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # transferoperator
//!
//! Transfer-operator (Perron-Frobenius) estimation and invariant measures for
//! state-space trajectories of dynamical systems.
//!
//! ## Quick Start
//!
//! ```rust
//! use transferoperator::estimators::entropy::{Entropy, GlobalValue, ProbabilitiesEstimator};
//! use transferoperator::estimators::approaches::RectangularBinning;
//! use ndarray::array;
//!
//! // A short 2D trajectory, ordered in time
//! let trajectory = array![[0.1, 0.2], [0.9, 0.8], [0.1, 0.2], [0.9, 0.8]];
//! let est = Entropy::new_transfer_operator(trajectory, RectangularBinning::CellCount(2)).unwrap();
//!
//! let rho = est.probabilities();   // invariant measure over visited bins
//! let corners = est.outcomes();    // lower corner of each visited bin
//! let h = est.global_value();      // Shannon entropy of the measure (nats)
//! assert_eq!(rho.len(), corners.nrows());
//! assert!((h - 2f64.ln()).abs() < 1e-8);
//! ```
//!
//! ## Pipeline
//!
//! | Stage | Type | Output |
//! |-------|------|--------|
//! | Partition | [`RectangularBinning`] | resolved [`BinGrid`] (minima, edge lengths) |
//! | Bin locator | [`BinGrid`] | integer bin coordinates per sample |
//! | Visit compression | [`VisitCompression`] | unique bins, label per sample |
//! | Operator | [`TransferOperator`] | sparse row-stochastic [`SparseMatrix`] |
//! | Solver | [`InvariantMeasure`] | [`Probabilities`] over unique bins |
//!
//! ### Partitions
//! Cells per axis (`CellCount`, `CellCounts`), fixed widths (`CellWidth`,
//! `CellWidths`) or an explicit window (`Ranges`). Count-based partitions pad
//! the upper bound by 1% of a cell so that every sample lands in `0..k`.
//!
//! ### Boundary condition
//! The last sample has no successor; [`BoundaryCondition::Circular`] wraps it
//! to the first sample's bin, [`BoundaryCondition::Random`] to the bin of a
//! sample drawn from a caller-supplied generator.
//!
//! ### Solver
//! Lazy power iteration with periodic renormalisation. Non-convergence is
//! reported on the result, never raised.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for `RectangularBinning`,
//!   `BoundaryCondition` and `SolverOptions`
//!
//! [`RectangularBinning`]: estimators::approaches::RectangularBinning
//! [`BinGrid`]: estimators::approaches::BinGrid
//! [`VisitCompression`]: estimators::approaches::VisitCompression
//! [`TransferOperator`]: estimators::approaches::TransferOperator
//! [`SparseMatrix`]: estimators::approaches::SparseMatrix
//! [`InvariantMeasure`]: estimators::approaches::InvariantMeasure
//! [`Probabilities`]: estimators::Probabilities
//! [`BoundaryCondition::Circular`]: estimators::approaches::BoundaryCondition::Circular
//! [`BoundaryCondition::Random`]: estimators::approaches::BoundaryCondition::Random

pub mod error;
pub mod estimators;

pub use error::{Error, Result};

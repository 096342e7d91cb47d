pub mod transfer_operator;

// Unified re-exports so tests and users can import
// transferoperator::estimators::approaches::* ergonomically.
pub use transfer_operator::{
    BinGrid, BoundaryCondition, InvariantMeasure, RectangularBinning, Solution, SolverOptions,
    SparseMatrix, TransferOperator, TransferOperatorEntropy, VisitCompression,
};

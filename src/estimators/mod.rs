pub mod entropy;
pub mod probabilities;
pub mod traits;
pub mod approaches;

pub use probabilities::Probabilities;
pub use traits::{GlobalValue, ProbabilitiesEstimator};

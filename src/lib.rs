// Public modules
pub mod algorithms;
pub mod config;
pub mod error;
pub mod models;
pub mod utils;

// Re-exports for convenience
pub use algorithms::bees::{BeesAlgorithm, BeesOutcome};
pub use algorithms::generator::{greedy_solution, CandidateGenerator};
pub use algorithms::selection::SelectionStrategy;
pub use config::BeesConfig;
pub use error::{Result, ShopperError};
pub use models::{Candidate, Location, Problem, Shop, Visit, WeightMatrix};

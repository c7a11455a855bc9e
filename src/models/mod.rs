// Models module - exports all model types

mod candidate;
mod location;
mod problem;
mod shop;
mod weights;

// Re-export model types
pub use self::candidate::{sort_by_cost, Candidate, Visit};
pub use self::location::Location;
pub use self::problem::Problem;
pub use self::shop::Shop;
pub use self::weights::WeightMatrix;

// Common type aliases for improved code readability
pub type ItemId = u32;
pub type ShopId = u32;
pub type Cost = f64;

/// Node identifier reserved for the start position in the weight matrix
pub const START_NODE: ShopId = 0;

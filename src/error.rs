//! Error types for the shopping tour solver

use thiserror::Error;

use crate::models::{ItemId, ShopId};

/// Main error type for solver operations
#[derive(Debug, Error)]
pub enum ShopperError {
    /// A required item is not stocked by any shop
    #[error("Infeasible instance: item {item} is not stocked by any shop")]
    Infeasible { item: ItemId },

    /// The weight matrix has no entry for a pair the tour needs
    #[error("Missing weight for node pair ({from}, {to})")]
    MissingWeight { from: ShopId, to: ShopId },

    /// A shop id outside of the catalog was referenced
    #[error("Unknown shop id {0}")]
    UnknownShop(ShopId),

    /// The cost of a tour without shops was requested
    #[error("Cannot evaluate an empty tour")]
    EmptyTour,

    /// Problem data violates the model constraints
    #[error("Invalid instance: {0}")]
    InvalidInstance(String),

    /// Algorithm parameters are inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Plotting error: {0}")]
    Plot(String),
}

/// Result type alias for solver operations
pub type Result<T> = std::result::Result<T, ShopperError>;

pub mod annealing;
pub mod bees;
pub mod cost;
pub mod generator;
pub mod neighbourhood;
pub mod ordering;
pub mod selection;

// Common algorithm traits
use crate::error::Result;
use crate::models::{ItemId, Problem, ShopId};
use rand::RngCore;
use std::collections::BTreeSet;

/// Chosen shops with the items to buy at each, in the order they were chosen
pub type Selection = Vec<(ShopId, BTreeSet<ItemId>)>;

/// Strategy turning the shopping list into a covering set of shops
pub trait CoverageSelector {
    /// Select shops so that every required item is bought exactly once
    fn select(&self, problem: &Problem, rng: &mut dyn RngCore) -> Result<Selection>;
}

// Coverage selectors: greedy and randomized shop choice

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::algorithms::{CoverageSelector, Selection};
use crate::error::{Result, ShopperError};
use crate::models::{ItemId, Problem, Shop};

/// Picks the shop covering the most remaining items each round
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedySelector;

/// Picks a random remaining item, then a random shop stocking it
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSelector;

/// Runtime choice between the two selectors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    Greedy,
    #[default]
    Randomized,
}

impl GreedySelector {
    /// Deterministic cover; ties go to the shop listed first in the catalog
    pub fn cover(&self, problem: &Problem) -> Result<Selection> {
        problem.check_coverage()?;

        let mut remaining = problem.required().clone();
        let mut selection = Selection::new();

        while !remaining.is_empty() {
            let mut best: Option<(&Shop, usize)> = None;

            for shop in problem.shops() {
                let count = shop.fulfil_count(&remaining);
                if best.map_or(true, |(_, best_count)| count > best_count) {
                    best = Some((shop, count));
                }
            }

            let shop = match best {
                Some((shop, count)) if count > 0 => shop,
                _ => {
                    let item = remaining.iter().next().copied().unwrap_or_default();
                    return Err(ShopperError::Infeasible { item });
                }
            };

            let bought = shop.fulfils(&remaining);
            take(&mut remaining, &bought);
            selection.push((shop.id, bought));
        }

        Ok(selection)
    }
}

impl CoverageSelector for GreedySelector {
    fn select(&self, problem: &Problem, _rng: &mut dyn RngCore) -> Result<Selection> {
        self.cover(problem)
    }
}

impl CoverageSelector for RandomSelector {
    fn select(&self, problem: &Problem, rng: &mut dyn RngCore) -> Result<Selection> {
        problem.check_coverage()?;

        let mut remaining = problem.required().clone();
        let mut selection = Selection::new();

        while !remaining.is_empty() {
            let pick = rng.gen_range(0..remaining.len());
            let item = remaining
                .iter()
                .nth(pick)
                .copied()
                .ok_or_else(|| ShopperError::InvalidInstance("empty shopping list".to_string()))?;

            let shop_id = problem
                .stockists(&item)
                .choose(rng)
                .copied()
                .ok_or(ShopperError::Infeasible { item })?;
            let shop = problem.shop(shop_id)?;

            let bought = shop.fulfils(&remaining);
            take(&mut remaining, &bought);
            selection.push((shop.id, bought));
        }

        Ok(selection)
    }
}

impl CoverageSelector for SelectionStrategy {
    fn select(&self, problem: &Problem, rng: &mut dyn RngCore) -> Result<Selection> {
        match self {
            SelectionStrategy::Greedy => GreedySelector.select(problem, rng),
            SelectionStrategy::Randomized => RandomSelector.select(problem, rng),
        }
    }
}

fn take(remaining: &mut BTreeSet<ItemId>, bought: &BTreeSet<ItemId>) {
    remaining.retain(|item| !bought.contains(item));
}

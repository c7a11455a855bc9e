// Neighbour generation for the bees local search

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use std::collections::HashSet;
use tracing::warn;

use crate::algorithms::cost::calculate_cost;
use crate::algorithms::generator::score_ordered;
use crate::algorithms::Selection;
use crate::error::Result;
use crate::models::{Candidate, Problem, ShopId, Visit};

/// Edit applied to a shop sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// Insert a shop not yet in the sequence at a random position
    Insert,
    /// Drop a random shop
    Remove,
    /// Replace a random position with a shop not yet in the sequence
    Substitute,
    /// Exchange two positions; costs two units of budget
    Swap,
}

impl Mutation {
    pub fn budget(&self) -> usize {
        match self {
            Mutation::Swap => 2,
            _ => 1,
        }
    }
}

/// Produces feasible neighbours of a candidate within an edit budget
#[derive(Debug, Clone, Copy)]
pub struct NeighbourGenerator<'a> {
    problem: &'a Problem,
    budget: usize,
    max_attempts: usize,
    reorder: bool,
}

impl<'a> NeighbourGenerator<'a> {
    /// Creates a generator.
    ///
    /// `budget` is the neighbourhood size, `max_attempts` bounds the mutate/replay
    /// retries and `reorder` selects whether a neighbour is re-sequenced by the
    /// sweep heuristic before scoring or scored in its mutated order.
    pub fn new(problem: &'a Problem, budget: usize, max_attempts: usize, reorder: bool) -> Self {
        Self {
            problem,
            budget,
            max_attempts,
            reorder,
        }
    }

    /// Randomly edits `original` until the budget is spent or no edit applies
    pub fn mutate(&self, original: &[ShopId], rng: &mut dyn RngCore) -> Vec<ShopId> {
        let shops = self.problem.shops();
        let mut path = original.to_vec();
        let mut present: HashSet<ShopId> = path.iter().copied().collect();
        let mut budget = self.budget;
        let mut applicable = Vec::with_capacity(4);

        while budget > 0 {
            let absent = shops.len().saturating_sub(present.len());

            applicable.clear();
            if absent > 0 {
                applicable.push(Mutation::Insert);
                if !path.is_empty() {
                    applicable.push(Mutation::Substitute);
                }
            }
            if !path.is_empty() {
                applicable.push(Mutation::Remove);
            }
            if path.len() >= 2 && budget >= 2 {
                applicable.push(Mutation::Swap);
            }

            let mutation = match applicable.choose(rng) {
                Some(mutation) => *mutation,
                None => break,
            };

            match mutation {
                Mutation::Insert => {
                    let shop_id = self.random_absent(&present, rng);
                    let index = rng.gen_range(0..=path.len());
                    path.insert(index, shop_id);
                    present.insert(shop_id);
                }
                Mutation::Remove => {
                    let index = rng.gen_range(0..path.len());
                    let removed = path.remove(index);
                    present.remove(&removed);
                }
                Mutation::Substitute => {
                    let shop_id = self.random_absent(&present, rng);
                    let index = rng.gen_range(0..path.len());
                    let replaced = std::mem::replace(&mut path[index], shop_id);
                    present.remove(&replaced);
                    present.insert(shop_id);
                }
                Mutation::Swap => {
                    let first = rng.gen_range(0..path.len());
                    let mut second = rng.gen_range(0..path.len() - 1);
                    if second >= first {
                        second += 1;
                    }
                    path.swap(first, second);
                }
            }

            budget -= mutation.budget();
        }

        path
    }

    /// Replays `path` against the shopping list.
    ///
    /// Each shop buys whatever it stocks from the items still missing; shops that
    /// add nothing are dropped. Returns `None` when items are left over.
    pub fn replay(&self, path: &[ShopId]) -> Result<Option<Selection>> {
        let mut unmet = self.problem.required().clone();
        let mut selection = Selection::new();

        for &shop_id in path {
            if unmet.is_empty() {
                break;
            }

            let shop = self.problem.shop(shop_id)?;
            let bought = shop.fulfils(&unmet);
            if !bought.is_empty() {
                unmet.retain(|item| !bought.contains(item));
                selection.push((shop_id, bought));
            }
        }

        Ok(unmet.is_empty().then_some(selection))
    }

    /// Builds one scored neighbour of `patch`.
    ///
    /// Gives up after `max_attempts` infeasible mutations and returns the patch.
    pub fn neighbour(&self, patch: &Candidate, rng: &mut dyn RngCore) -> Result<Candidate> {
        let original = patch.shop_sequence();

        for _ in 0..self.max_attempts {
            let path = self.mutate(&original, rng);
            if let Some(selection) = self.replay(&path)? {
                return self.score(selection);
            }
        }

        warn!(
            event = "neighbour_starvation",
            attempts = self.max_attempts,
            cost = patch.cost,
        );
        Ok(patch.clone())
    }

    fn score(&self, selection: Selection) -> Result<Candidate> {
        if self.reorder {
            return score_ordered(selection, self.problem);
        }

        let visits: Vec<Visit> = selection
            .into_iter()
            .map(|(shop_id, items)| Visit::new(shop_id, items.into_iter().collect()))
            .collect();
        let cost = calculate_cost(&visits, self.problem)?;
        Ok(Candidate::new(visits, cost))
    }

    // Rejection sampling; only called when at least one shop is absent
    fn random_absent(&self, present: &HashSet<ShopId>, rng: &mut dyn RngCore) -> ShopId {
        let shops = self.problem.shops();
        loop {
            let shop_id = shops[rng.gen_range(0..shops.len())].id;
            if !present.contains(&shop_id) {
                return shop_id;
            }
        }
    }
}

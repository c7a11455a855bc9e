// Candidate models for representing scored shopping tours

use crate::models::{Cost, ItemId, ShopId};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// One stop of a tour: the shop and the items bought there
#[derive(Debug, Clone, PartialEq)]
pub struct Visit {
    pub shop_id: ShopId,
    pub items: Vec<ItemId>,
}

impl Visit {
    pub fn new(shop_id: ShopId, items: Vec<ItemId>) -> Self {
        Self { shop_id, items }
    }
}

/// Represents a complete tour with its objective value
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Stops in visiting order (the tour starts and ends at the start node)
    pub visits: Vec<Visit>,

    /// Objective value of the tour
    pub cost: Cost,
}

impl Candidate {
    /// Creates a new candidate
    pub fn new(visits: Vec<Visit>, cost: Cost) -> Self {
        Self { visits, cost }
    }

    /// Visited shop ids in order, without item assignments
    pub fn shop_sequence(&self) -> Vec<ShopId> {
        self.visits.iter().map(|visit| visit.shop_id).collect()
    }

    /// Checks the candidate invariant: disjoint purchases whose union is `required`
    /// and no shop visited twice
    pub fn covers_exactly(&self, required: &BTreeSet<ItemId>) -> bool {
        let mut bought = BTreeSet::new();
        let mut shops = BTreeSet::new();

        for visit in &self.visits {
            if !shops.insert(visit.shop_id) {
                return false;
            }
            for item in &visit.items {
                if !bought.insert(*item) {
                    return false;
                }
            }
        }

        &bought == required
    }

    /// Ascending comparison by cost, usable with stable sorts
    pub fn cmp_cost(&self, other: &Candidate) -> Ordering {
        self.cost.total_cmp(&other.cost)
    }
}

/// Sorts candidates ascending by cost, keeping the relative order of ties
pub fn sort_by_cost(candidates: &mut [Candidate]) {
    candidates.sort_by(Candidate::cmp_cost);
}

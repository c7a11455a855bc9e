// JSON persistence of problem instances and solutions

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use crate::error::{Result, ShopperError};
use crate::models::{
    Candidate, Cost, ItemId, Location, Problem, Shop, ShopId, WeightMatrix, START_NODE,
};

/// On-disk layout of a shop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopRecord {
    pub id: ShopId,
    pub q: Cost,
    pub x: f64,
    pub y: f64,
    pub items: Vec<ItemId>,
}

/// On-disk layout of an instance.
///
/// Weights are keyed by stringified node ids since JSON objects only have
/// string keys; node "0" is the start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceRecord {
    pub list: Vec<ItemId>,
    pub start: Location,
    pub shops: Vec<ShopRecord>,
    pub weights: BTreeMap<String, BTreeMap<String, f64>>,
}

/// On-disk layout of a solution: `[[shop_id, [items]], ...]` plus its cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionRecord {
    pub solution: Vec<(ShopId, Vec<ItemId>)>,
    pub cost: Cost,
}

impl From<&Candidate> for SolutionRecord {
    fn from(candidate: &Candidate) -> Self {
        Self {
            solution: candidate
                .visits
                .iter()
                .map(|visit| (visit.shop_id, visit.items.clone()))
                .collect(),
            cost: candidate.cost,
        }
    }
}

impl InstanceRecord {
    /// Converts the raw record into a validated problem
    pub fn into_problem(self) -> Result<Problem> {
        let node_ids: HashSet<ShopId> = self.shops.iter().map(|shop| shop.id).collect();

        let shops = self
            .shops
            .into_iter()
            .map(|shop| Shop::new(shop.id, Location::new(shop.x, shop.y), shop.items, shop.q))
            .collect();

        let mut weights = WeightMatrix::new();
        for (from_key, row) in &self.weights {
            let from = parse_node(from_key, &node_ids)?;
            for (to_key, weight) in row {
                let to = parse_node(to_key, &node_ids)?;
                weights.insert_directed(from, to, *weight);
            }
        }

        Problem::new(self.list, self.start, shops, weights)
    }

    /// Builds the raw record of a problem
    pub fn from_problem(problem: &Problem) -> Self {
        let shops = problem
            .shops()
            .iter()
            .map(|shop| ShopRecord {
                id: shop.id,
                q: shop.queue_penalty,
                x: shop.location.x,
                y: shop.location.y,
                items: shop.items.iter().copied().collect(),
            })
            .collect();

        let mut weights: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
        for (from, to, weight) in problem.weights().iter() {
            weights
                .entry(from.to_string())
                .or_default()
                .insert(to.to_string(), weight);
        }

        Self {
            list: problem.required().iter().copied().collect(),
            start: problem.start(),
            shops,
            weights,
        }
    }
}

fn parse_node(key: &str, node_ids: &HashSet<ShopId>) -> Result<ShopId> {
    let node = key.trim().parse::<ShopId>().map_err(|_| {
        ShopperError::InvalidInstance(format!("weight key {:?} is not a node id", key))
    })?;

    if node == START_NODE || node_ids.contains(&node) {
        Ok(node)
    } else {
        Err(ShopperError::InvalidInstance(format!(
            "weight key {} does not name a shop",
            node
        )))
    }
}

/// Parses an instance from a JSON string
pub fn problem_from_json_str(json: &str) -> Result<Problem> {
    serde_json::from_str::<InstanceRecord>(json)?.into_problem()
}

/// Loads an instance from a JSON file
pub fn load_problem<P: AsRef<Path>>(path: P) -> Result<Problem> {
    let json = fs::read_to_string(path)?;
    problem_from_json_str(&json)
}

/// Writes an instance to a JSON file
pub fn save_problem<P: AsRef<Path>>(problem: &Problem, path: P) -> Result<()> {
    let json = serde_json::to_string(&InstanceRecord::from_problem(problem))?;
    fs::write(path, json)?;
    Ok(())
}

/// Writes a solution to a JSON file
pub fn save_solution<P: AsRef<Path>>(candidate: &Candidate, path: P) -> Result<()> {
    let json = serde_json::to_string(&SolutionRecord::from(candidate))?;
    fs::write(path, json)?;
    Ok(())
}

// Weight matrix holding travel multipliers between nodes (0 is the start)

use crate::models::ShopId;
use std::collections::HashMap;

/// Symmetric sparse matrix of travel weights keyed by node id pairs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightMatrix {
    weights: HashMap<(ShopId, ShopId), f64>,
}

impl WeightMatrix {
    /// Creates an empty weight matrix
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a complete matrix over `nodes` where every pair has the same weight
    pub fn uniform<I>(nodes: I, weight: f64) -> Self
    where
        I: IntoIterator<Item = ShopId>,
    {
        let nodes: Vec<ShopId> = nodes.into_iter().collect();
        let mut matrix = Self::new();

        for (i, &a) in nodes.iter().enumerate() {
            for &b in &nodes[i + 1..] {
                matrix.insert(a, b, weight);
            }
        }

        matrix
    }

    /// Sets the weight for both directions of the pair
    pub fn insert(&mut self, a: ShopId, b: ShopId, weight: f64) {
        self.weights.insert((a, b), weight);
        self.weights.insert((b, a), weight);
    }

    /// Sets the weight for a single direction only
    pub fn insert_directed(&mut self, from: ShopId, to: ShopId, weight: f64) {
        self.weights.insert((from, to), weight);
    }

    /// Gets the weight between two nodes if present
    pub fn get(&self, from: ShopId, to: ShopId) -> Option<f64> {
        self.weights.get(&(from, to)).copied()
    }

    /// Number of directed entries stored
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Iterates over all directed entries
    pub fn iter(&self) -> impl Iterator<Item = (ShopId, ShopId, f64)> + '_ {
        self.weights.iter().map(|(&(a, b), &w)| (a, b, w))
    }
}

// Problem instance: shopping list, start point, shop catalog and weights

use crate::error::{Result, ShopperError};
use crate::models::{ItemId, Location, Shop, ShopId, WeightMatrix, START_NODE};
use std::collections::{BTreeSet, HashMap};

/// Read-only input of a solve
#[derive(Debug, Clone)]
pub struct Problem {
    /// Items that have to be bought
    required: BTreeSet<ItemId>,

    /// Start (and end) of every tour
    start: Location,

    /// Shop catalog in input order
    shops: Vec<Shop>,

    /// Shop id -> position in `shops`
    index: HashMap<ShopId, usize>,

    /// Inverted list of items to the shops stocking them (catalog order)
    item_shops: HashMap<ItemId, Vec<ShopId>>,

    /// Travel weights between nodes
    weights: WeightMatrix,
}

impl Problem {
    /// Creates a new problem, validating ids, penalties and weights
    pub fn new<I>(required: I, start: Location, shops: Vec<Shop>, weights: WeightMatrix) -> Result<Self>
    where
        I: IntoIterator<Item = ItemId>,
    {
        let required: BTreeSet<ItemId> = required.into_iter().collect();
        if required.is_empty() {
            return Err(ShopperError::InvalidInstance(
                "shopping list is empty".to_string(),
            ));
        }

        if !start.is_finite() {
            return Err(ShopperError::InvalidInstance(format!(
                "start location ({}, {}) is not finite",
                start.x, start.y
            )));
        }

        let mut index = HashMap::with_capacity(shops.len());
        let mut item_shops: HashMap<ItemId, Vec<ShopId>> = HashMap::new();

        for (position, shop) in shops.iter().enumerate() {
            if shop.id == START_NODE {
                return Err(ShopperError::InvalidInstance(format!(
                    "shop id {} is reserved for the start",
                    START_NODE
                )));
            }
            if index.insert(shop.id, position).is_some() {
                return Err(ShopperError::InvalidInstance(format!(
                    "duplicate shop id {}",
                    shop.id
                )));
            }
            if !shop.location.is_finite() {
                return Err(ShopperError::InvalidInstance(format!(
                    "shop {} has non-finite location ({}, {})",
                    shop.id, shop.location.x, shop.location.y
                )));
            }
            if !shop.queue_penalty.is_finite() || shop.queue_penalty < 0.0 {
                return Err(ShopperError::InvalidInstance(format!(
                    "shop {} has invalid queue penalty {}",
                    shop.id, shop.queue_penalty
                )));
            }

            for item in &shop.items {
                item_shops.entry(*item).or_default().push(shop.id);
            }
        }

        for (from, to, weight) in weights.iter() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ShopperError::InvalidInstance(format!(
                    "weight ({}, {}) = {} is not a non-negative number",
                    from, to, weight
                )));
            }
        }

        Ok(Self {
            required,
            start,
            shops,
            index,
            item_shops,
            weights,
        })
    }

    pub fn required(&self) -> &BTreeSet<ItemId> {
        &self.required
    }

    pub fn start(&self) -> Location {
        self.start
    }

    /// Shops in catalog order
    pub fn shops(&self) -> &[Shop] {
        &self.shops
    }

    pub fn weights(&self) -> &WeightMatrix {
        &self.weights
    }

    /// Gets a shop by id
    pub fn shop(&self, id: ShopId) -> Result<&Shop> {
        self.index
            .get(&id)
            .map(|&position| &self.shops[position])
            .ok_or(ShopperError::UnknownShop(id))
    }

    pub fn contains_shop(&self, id: ShopId) -> bool {
        self.index.contains_key(&id)
    }

    /// Ids of the shops stocking `item`, in catalog order
    pub fn stockists(&self, item: &ItemId) -> &[ShopId] {
        self.item_shops
            .get(item)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Position of a node, where node 0 is the start
    pub fn location(&self, node: ShopId) -> Result<Location> {
        if node == START_NODE {
            Ok(self.start)
        } else {
            self.shop(node).map(|shop| shop.location)
        }
    }

    /// Travel weight between two nodes
    pub fn weight(&self, from: ShopId, to: ShopId) -> Result<f64> {
        self.weights
            .get(from, to)
            .ok_or(ShopperError::MissingWeight { from, to })
    }

    /// Checks that every required item is stocked somewhere
    pub fn check_coverage(&self) -> Result<()> {
        match self
            .required
            .iter()
            .find(|item| self.stockists(item).is_empty())
        {
            Some(item) => Err(ShopperError::Infeasible { item: *item }),
            None => Ok(()),
        }
    }
}

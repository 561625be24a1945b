use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use stockbook_core::{ProductId, ZoneId};

/// A catalog product record.
///
/// `quantity` is never negative in any snapshot published by the transaction
/// processor; the identifier is immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub quantity: i64,
    pub reorder_point: i64,
    pub lead_time_days: u32,
    /// Assigned storage zone, if any.
    pub zone: Option<ZoneId>,
}

impl Product {
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity: 0,
            reorder_point: 0,
            lead_time_days: 0,
            zone: None,
        }
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_reorder_point(mut self, reorder_point: i64) -> Self {
        self.reorder_point = reorder_point;
        self
    }

    pub fn with_lead_time_days(mut self, days: u32) -> Self {
        self.lead_time_days = days;
        self
    }
}

/// Mapping from product identifier to [`Product`].
///
/// Backed by a `BTreeMap` so every consumer iterates products in identifier
/// order without extra sorting (the layout and alert contracts require
/// deterministic output for identical inputs).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: BTreeMap<ProductId, Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a product record (caller-side catalog construction).
    pub fn upsert(&mut self, product: Product) {
        self.products.insert(product.id.clone(), product);
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.get(id)
    }

    pub fn get_mut(&mut self, id: &ProductId) -> Option<&mut Product> {
        self.products.get_mut(id)
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.products.contains_key(id)
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ProductId> {
        self.products.keys()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl FromIterator<Product> for Catalog {
    fn from_iter<T: IntoIterator<Item = Product>>(iter: T) -> Self {
        let mut catalog = Catalog::new();
        for product in iter {
            catalog.upsert(product);
        }
        catalog
    }
}

//! Read-only views over a product collection.
//!
//! Recomputed on every call; nothing here is cached.

use rust_decimal::Decimal;
use serde::Serialize;

use atelier_core::{Entity, Money, ProductId};

use crate::product::Product;
use crate::restock::{RestockRecommendation, restock_recommendation};

/// Products selling fewer units per week than this are slow movers.
pub const SLOW_MOVING_VELOCITY: u32 = 6;

/// Products at or below their low-stock threshold.
pub fn low_stock(products: &[Product]) -> Vec<&Product> {
    products.iter().filter(|p| p.is_low_stock()).collect()
}

/// Products selling under [`SLOW_MOVING_VELOCITY`] units per week.
pub fn slow_moving(products: &[Product]) -> Vec<&Product> {
    products
        .iter()
        .filter(|p| p.sales_velocity() < SLOW_MOVING_VELOCITY)
        .collect()
}

/// Case-insensitive substring search on name or sku. An empty term matches all.
pub fn search<'a>(products: &'a [Product], term: &str) -> Vec<&'a Product> {
    products.iter().filter(|p| p.matches(term)).collect()
}

/// One row of the restock plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestockLine {
    pub product_id: ProductId,
    pub sku: String,
    pub name: String,
    pub total_stock: u64,
    pub weeks_of_stock: Option<Decimal>,
    pub recommendation: RestockRecommendation,
}

/// Recommendation for every product, in collection order.
pub fn restock_plan(products: &[Product]) -> Vec<RestockLine> {
    products
        .iter()
        .map(|p| RestockLine {
            product_id: *p.id(),
            sku: p.sku().to_string(),
            name: p.name().to_string(),
            total_stock: p.total_stock(),
            weeks_of_stock: p.weeks_of_stock().map(|w| w.round_dp(1)),
            recommendation: restock_recommendation(p),
        })
        .collect()
}

/// Lines of [`restock_plan`] that actually call for an order, in collection order.
pub fn restock_needed(products: &[Product]) -> Vec<RestockLine> {
    restock_plan(products)
        .into_iter()
        .filter(|line| line.recommendation.is_actionable())
        .collect()
}

/// Headline numbers for the inventory screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventorySummary {
    pub products: usize,
    pub low_stock: usize,
    pub slow_moving: usize,
    pub units_in_stock: u64,
    pub units_sold: u64,
    /// Stock valued at unit cost.
    pub stock_value_at_cost: Money,
    /// Stock valued at sale price.
    pub stock_value_at_retail: Money,
}

pub fn summarize(products: &[Product]) -> InventorySummary {
    InventorySummary {
        products: products.len(),
        low_stock: low_stock(products).len(),
        slow_moving: slow_moving(products).len(),
        units_in_stock: saturating_total(products, Product::total_stock),
        units_sold: saturating_total(products, Product::total_sold),
        stock_value_at_cost: products
            .iter()
            .map(|p| p.unit_cost().times(p.total_stock()))
            .sum(),
        stock_value_at_retail: products
            .iter()
            .map(|p| p.price().times(p.total_stock()))
            .sum(),
    }
}

fn saturating_total(products: &[Product], count: fn(&Product) -> u64) -> u64 {
    products
        .iter()
        .map(count)
        .fold(0, |acc, n| acc.saturating_add(n))
}

//! Serializable snapshot of the inventory screen.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use atelier_accounting::{BusinessCost, CategoryTotal, CostLedger, Frequency};
use atelier_core::{CostId, Entity, Money, ProductId};
use atelier_inventory::{
    Channels, InventoryLedger, InventorySummary, Product, RestockLine, restock_needed,
    restock_plan, summarize,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRow {
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    pub price: Money,
    pub unit_cost: Money,
    pub unit_margin: Money,
    /// One decimal place.
    pub margin_percent: Decimal,
    pub total_stock: u64,
    pub total_sold: u64,
    pub low_stock_threshold: u64,
    pub sales_velocity: u32,
    pub last_restocked: NaiveDate,
    pub channels: Channels,
    /// Aggregate minus channel stock; non-zero after aggregate-only edits.
    pub channel_drift: i64,
}

impl From<&Product> for ProductRow {
    fn from(p: &Product) -> Self {
        let drift = p.channel_drift();
        Self {
            id: *p.id(),
            sku: p.sku().to_string(),
            name: p.name().to_string(),
            price: p.price(),
            unit_cost: p.unit_cost(),
            unit_margin: p.unit_margin(),
            margin_percent: p.margin_percent().round_dp(1),
            total_stock: p.total_stock(),
            total_sold: p.total_sold(),
            low_stock_threshold: p.low_stock_threshold(),
            sales_velocity: p.sales_velocity(),
            last_restocked: p.last_restocked(),
            channels: *p.channels(),
            channel_drift: i64::try_from(drift).unwrap_or(if drift < 0 { i64::MIN } else { i64::MAX }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostRow {
    pub id: CostId,
    pub category: String,
    pub description: String,
    pub amount: Money,
    pub frequency: Frequency,
    pub monthly_share: Money,
}

impl From<&BusinessCost> for CostRow {
    fn from(c: &BusinessCost) -> Self {
        Self {
            id: *c.id(),
            category: c.category().to_string(),
            description: c.description().to_string(),
            amount: c.amount(),
            frequency: c.frequency(),
            monthly_share: c.monthly_share().rounded(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostReport {
    pub entries: Vec<CostRow>,
    /// Rounded to cents.
    pub monthly_total: Money,
    pub by_category: Vec<CategoryTotal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryReport {
    pub generated_at: DateTime<Utc>,
    pub search: String,
    pub summary: InventorySummary,
    /// Products matching `search`.
    pub products: Vec<ProductRow>,
    pub low_stock: Vec<ProductRow>,
    pub slow_moving: Vec<ProductRow>,
    pub restock_plan: Vec<RestockLine>,
    /// Restock lines with a non-zero order.
    pub restock_needed: Vec<RestockLine>,
    pub costs: CostReport,
}

impl InventoryReport {
    pub fn build(inventory: &InventoryLedger, costs: &CostLedger, search: &str) -> Self {
        let rows = |products: Vec<&Product>| -> Vec<ProductRow> {
            products.into_iter().map(ProductRow::from).collect()
        };

        Self {
            generated_at: Utc::now(),
            search: search.to_string(),
            summary: summarize(inventory.products()),
            products: rows(inventory.search(search)),
            low_stock: rows(inventory.low_stock()),
            slow_moving: rows(inventory.slow_moving()),
            restock_plan: restock_plan(inventory.products()),
            restock_needed: restock_needed(inventory.products()),
            costs: CostReport {
                entries: costs.costs().iter().map(CostRow::from).collect(),
                monthly_total: costs.monthly_total().rounded(),
                by_category: costs
                    .monthly_by_category()
                    .into_iter()
                    .map(|c| CategoryTotal {
                        monthly: c.monthly.rounded(),
                        ..c
                    })
                    .collect(),
            },
        }
    }
}

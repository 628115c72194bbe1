//! Inventory ledger.
//!
//! Product records with per-channel stock and unit economics, the stock
//! adjustment path, restock recommendations and the read-only views the
//! dashboard renders. Pure in-memory logic: no IO, no storage.

pub mod ledger;
pub mod product;
pub mod restock;
pub mod views;

pub use ledger::{InventoryEvent, InventoryLedger, StockAdjusted};
pub use product::{Channel, ChannelStock, Channels, CostComponent, NewProduct, Product};
pub use restock::{RestockRecommendation, RestockUrgency, restock_recommendation};
pub use views::{
    InventorySummary, RestockLine, SLOW_MOVING_VELOCITY, low_stock, restock_needed, restock_plan,
    search, slow_moving, summarize,
};

//! Inventory back-office service.
//!
//! Composes the inventory and cost ledgers behind one handle, loads seed
//! data, fans change events out to subscribers and renders the report.

pub mod config;
pub mod dashboard;
pub mod report;
pub mod seed;

pub use config::{ConfigError, DashboardConfig};
pub use dashboard::{Dashboard, DashboardEvent};
pub use report::{CostReport, InventoryReport, ProductRow};
pub use seed::{SeedData, SeedError};

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use atelier_accounting::{BusinessCost, CostAdded, CostDraft, CostEvent, CostLedger};
use atelier_core::ProductId;
use atelier_events::{Event, EventBus, InMemoryEventBus, Subscription};
use atelier_inventory::{
    Channel, InventoryEvent, InventoryLedger, Product, RestockRecommendation, StockAdjusted,
};

use crate::report::InventoryReport;
use crate::seed::{SeedData, SeedError};

/// Anything a dashboard subscriber can be told about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "event", rename_all = "lowercase")]
pub enum DashboardEvent {
    Inventory(InventoryEvent),
    Cost(CostEvent),
}

impl Event for DashboardEvent {
    fn event_type(&self) -> &'static str {
        match self {
            DashboardEvent::Inventory(e) => e.event_type(),
            DashboardEvent::Cost(e) => e.event_type(),
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            DashboardEvent::Inventory(e) => e.occurred_at(),
            DashboardEvent::Cost(e) => e.occurred_at(),
        }
    }
}

/// Handle over both ledgers.
///
/// Every successful mutation is published to subscribers; no-ops publish
/// nothing.
#[derive(Debug)]
pub struct Dashboard {
    inventory: InventoryLedger,
    costs: CostLedger,
    bus: Arc<InMemoryEventBus<DashboardEvent>>,
}

impl Dashboard {
    pub fn new(inventory: InventoryLedger, costs: CostLedger) -> Self {
        Self {
            inventory,
            costs,
            bus: Arc::new(InMemoryEventBus::new()),
        }
    }

    pub fn from_seed(seed: SeedData) -> Result<Self, SeedError> {
        let products = seed
            .products
            .into_iter()
            .map(Product::create)
            .collect::<Result<Vec<_>, _>>()?;
        let costs = seed
            .costs
            .into_iter()
            .map(|c| BusinessCost::create(c.id, c.entry))
            .collect::<Result<Vec<_>, _>>()?;

        let dashboard = Self::new(
            InventoryLedger::with_products(products)?,
            CostLedger::with_costs(costs)?,
        );
        tracing::info!(
            products = dashboard.inventory.len(),
            costs = dashboard.costs.len(),
            "dashboard loaded"
        );
        Ok(dashboard)
    }

    /// Dashboard over the built-in sample data.
    pub fn seeded() -> Result<Self, SeedError> {
        Self::from_seed(SeedData::builtin())
    }

    pub fn inventory(&self) -> &InventoryLedger {
        &self.inventory
    }

    pub fn costs(&self) -> &CostLedger {
        &self.costs
    }

    pub fn subscribe(&self) -> Subscription<DashboardEvent> {
        self.bus.subscribe()
    }

    pub fn adjust_stock(
        &mut self,
        product_id: ProductId,
        delta: i64,
        channel: Option<Channel>,
    ) -> Option<StockAdjusted> {
        let adjusted = self.inventory.adjust_stock(product_id, delta, channel)?;
        self.publish(DashboardEvent::Inventory(InventoryEvent::StockAdjusted(
            adjusted.clone(),
        )));
        Some(adjusted)
    }

    pub fn restock_recommendation(&self, product_id: ProductId) -> Option<RestockRecommendation> {
        self.inventory.restock_recommendation(product_id)
    }

    pub fn add_cost(&mut self, entry: CostDraft) -> Option<CostAdded> {
        let added = self.costs.add_cost(entry)?;
        self.publish(DashboardEvent::Cost(CostEvent::CostAdded(added.clone())));
        Some(added)
    }

    pub fn cost_draft_mut(&mut self) -> &mut CostDraft {
        self.costs.draft_mut()
    }

    pub fn submit_cost_draft(&mut self) -> Option<CostAdded> {
        let added = self.costs.submit_draft()?;
        self.publish(DashboardEvent::Cost(CostEvent::CostAdded(added.clone())));
        Some(added)
    }

    /// Snapshot of the inventory screen, with `search` applied to the
    /// product list.
    pub fn report(&self, search: &str) -> InventoryReport {
        InventoryReport::build(&self.inventory, &self.costs, search)
    }

    fn publish(&self, event: DashboardEvent) {
        let event_type = event.event_type();
        if let Err(e) = self.bus.publish(event) {
            tracing::warn!(event_type, error = %e, "failed to publish dashboard event");
        }
    }
}

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use atelier_core::{DomainError, DomainResult, Entity, ProductId};
use atelier_events::Event;

use crate::product::{Channel, Product};
use crate::restock::{RestockRecommendation, restock_recommendation};
use crate::views;

/// Event: StockAdjusted.
///
/// `channel_before`/`channel_after` are set only for channel-scoped adjustments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAdjusted {
    pub product_id: ProductId,
    pub channel: Option<Channel>,
    pub delta: i64,
    pub total_before: u64,
    pub total_after: u64,
    pub channel_before: Option<u64>,
    pub channel_after: Option<u64>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryEvent {
    StockAdjusted(StockAdjusted),
}

impl Event for InventoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::StockAdjusted(_) => "inventory.stock_adjusted",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InventoryEvent::StockAdjusted(e) => e.occurred_at,
        }
    }
}

/// Owned store of products, in insertion order, unique by id.
#[derive(Debug, Clone, Default)]
pub struct InventoryLedger {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl InventoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from products, rejecting duplicate ids.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> DomainResult<Self> {
        let mut ledger = Self::new();
        for product in products {
            ledger.insert(product)?;
        }
        Ok(ledger)
    }

    pub fn insert(&mut self, product: Product) -> DomainResult<()> {
        let id = *product.id();
        if self.index.contains_key(&id) {
            return Err(DomainError::conflict(format!("product {id} already exists")));
        }
        self.index.insert(id, self.products.len());
        self.products.push(product);
        Ok(())
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.index.get(&id).map(|&i| &self.products[i])
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Apply `delta` to a product's stock, flooring at zero.
    ///
    /// With a channel, the channel count and the aggregate are each moved by
    /// `delta` from their own current value, so the aggregate can drift away
    /// from the channel sum once either one clamps. Without a channel only the
    /// aggregate moves.
    ///
    /// Returns `None` (and changes nothing) for an unknown product.
    pub fn adjust_stock(
        &mut self,
        product_id: ProductId,
        delta: i64,
        channel: Option<Channel>,
    ) -> Option<StockAdjusted> {
        let Some(&i) = self.index.get(&product_id) else {
            tracing::debug!(%product_id, delta, "stock adjustment for unknown product ignored");
            return None;
        };
        let product = &mut self.products[i];

        let total_before = product.total_stock();
        let total_after = clamped_add(total_before, delta);

        let (channel_before, channel_after) = match channel {
            Some(c) => {
                let stock = product.channel_mut(c);
                let before = stock.in_stock;
                stock.in_stock = clamped_add(before, delta);
                (Some(before), Some(stock.in_stock))
            }
            None => (None, None),
        };
        product.set_total_stock(total_after);

        tracing::info!(
            %product_id,
            sku = product.sku(),
            channel = channel.map(|c| c.as_str()),
            delta,
            total_before,
            total_after,
            "stock adjusted"
        );

        if channel.is_some() {
            let drift = product.channel_drift();
            if drift != 0 {
                tracing::warn!(
                    %product_id,
                    drift = %drift,
                    "aggregate stock no longer matches channel stock"
                );
            }
        }

        Some(StockAdjusted {
            product_id,
            channel,
            delta,
            total_before,
            total_after,
            channel_before,
            channel_after,
            occurred_at: Utc::now(),
        })
    }

    pub fn restock_recommendation(&self, product_id: ProductId) -> Option<RestockRecommendation> {
        self.get(product_id).map(restock_recommendation)
    }

    pub fn low_stock(&self) -> Vec<&Product> {
        views::low_stock(&self.products)
    }

    pub fn slow_moving(&self) -> Vec<&Product> {
        views::slow_moving(&self.products)
    }

    pub fn search(&self, term: &str) -> Vec<&Product> {
        views::search(&self.products, term)
    }
}

/// `max(0, current + delta)`, saturating at `u64::MAX`.
fn clamped_add(current: u64, delta: i64) -> u64 {
    let next = i128::from(current) + i128::from(delta);
    u64::try_from(next.max(0)).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::tests::new_product;
    use crate::product::{ChannelStock, Channels};
    use proptest::prelude::*;

    fn channel_product(id: u128, website: u64, showroom: u64) -> Product {
        let mut new = new_product(id, website + showroom, 5);
        new.channels = Channels {
            website: ChannelStock { in_stock: website, sold: 0 },
            showroom: ChannelStock { in_stock: showroom, sold: 0 },
        };
        Product::create(new).unwrap()
    }

    fn ledger_with(products: Vec<Product>) -> InventoryLedger {
        InventoryLedger::with_products(products).unwrap()
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = InventoryLedger::with_products(vec![
            channel_product(1, 1, 1),
            channel_product(1, 2, 2),
        ])
        .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn adjust_without_channel_moves_only_aggregate() {
        let id = ProductId::from_u128(1);
        let mut ledger = ledger_with(vec![channel_product(1, 95, 50)]);

        let event = ledger.adjust_stock(id, 5, None).unwrap();
        assert_eq!(event.total_before, 145);
        assert_eq!(event.total_after, 150);
        assert_eq!(event.channel_after, None);

        let product = ledger.get(id).unwrap();
        assert_eq!(product.total_stock(), 150);
        assert_eq!(product.channels().website.in_stock, 95);
        assert_eq!(product.channels().showroom.in_stock, 50);
        assert_eq!(product.channel_drift(), 5);
    }

    #[test]
    fn adjust_with_channel_moves_both_counts() {
        let id = ProductId::from_u128(1);
        let mut ledger = ledger_with(vec![channel_product(1, 8, 4)]);

        ledger.adjust_stock(id, -1, Some(Channel::Website)).unwrap();

        let product = ledger.get(id).unwrap();
        assert_eq!(product.channels().website.in_stock, 7);
        assert_eq!(product.channels().showroom.in_stock, 4);
        assert_eq!(product.total_stock(), 11);
    }

    #[test]
    fn channel_and_aggregate_clamp_independently() {
        let id = ProductId::from_u128(1);
        let mut ledger = ledger_with(vec![channel_product(1, 8, 4)]);

        // Showroom floors at 0 after 4 units, the aggregate keeps going.
        let event = ledger.adjust_stock(id, -6, Some(Channel::Showroom)).unwrap();
        assert_eq!(event.channel_before, Some(4));
        assert_eq!(event.channel_after, Some(0));
        assert_eq!(event.total_after, 6);

        let product = ledger.get(id).unwrap();
        assert_eq!(product.channels().in_stock_total(), 8);
        assert_eq!(product.channel_drift(), -2);
    }

    #[test]
    fn stock_never_goes_negative() {
        let id = ProductId::from_u128(1);
        let mut ledger = ledger_with(vec![channel_product(1, 1, 1)]);
        ledger.adjust_stock(id, i64::MIN, None).unwrap();
        assert_eq!(ledger.get(id).unwrap().total_stock(), 0);
    }

    #[test]
    fn unknown_product_is_a_no_op() {
        let mut ledger = ledger_with(vec![channel_product(1, 3, 3)]);
        let before = ledger.products().to_vec();

        assert!(ledger.adjust_stock(ProductId::from_u128(99), 10, None).is_none());
        assert_eq!(ledger.products(), before.as_slice());
    }

    #[test]
    fn recommendation_for_unknown_product_is_none() {
        let ledger = ledger_with(vec![]);
        assert!(ledger.restock_recommendation(ProductId::from_u128(1)).is_none());
    }

    #[test]
    fn event_type_is_stable() {
        let mut ledger = ledger_with(vec![channel_product(1, 3, 3)]);
        let event = ledger.adjust_stock(ProductId::from_u128(1), 1, None).unwrap();
        let event = InventoryEvent::StockAdjusted(event);
        assert_eq!(event.event_type(), "inventory.stock_adjusted");
    }

    proptest! {
        /// Property: without a channel, total becomes max(0, old + delta).
        #[test]
        fn aggregate_adjustment_floors_at_zero(
            stock in 0u64..1_000,
            delta in -2_000i64..2_000,
        ) {
            let id = ProductId::from_u128(1);
            let mut ledger = ledger_with(vec![Product::create(new_product(1, stock, 3)).unwrap()]);

            ledger.adjust_stock(id, delta, None);

            let expected = (stock as i64 + delta).max(0) as u64;
            prop_assert_eq!(ledger.get(id).unwrap().total_stock(), expected);
        }

        /// Property: with a channel, channel and total each become
        /// max(0, own old value + delta).
        #[test]
        fn channel_adjustment_uses_independent_bases(
            website in 0u64..500,
            showroom in 0u64..500,
            extra in 0u64..100,
            delta in -1_000i64..1_000,
            use_website in any::<bool>(),
        ) {
            let id = ProductId::from_u128(1);
            let mut new = new_product(1, website + showroom + extra, 3);
            new.channels = Channels {
                website: ChannelStock { in_stock: website, sold: 0 },
                showroom: ChannelStock { in_stock: showroom, sold: 0 },
            };
            let mut ledger = ledger_with(vec![Product::create(new).unwrap()]);
            let channel = if use_website { Channel::Website } else { Channel::Showroom };
            let old_channel = if use_website { website } else { showroom };
            let old_total = website + showroom + extra;

            ledger.adjust_stock(id, delta, Some(channel));

            let product = ledger.get(id).unwrap();
            prop_assert_eq!(
                product.channels().get(channel).in_stock,
                (old_channel as i64 + delta).max(0) as u64
            );
            prop_assert_eq!(product.total_stock(), (old_total as i64 + delta).max(0) as u64);
        }
    }
}

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use atelier_core::{DomainError, DomainResult, Entity, Money, ProductId, ValueObject};

/// Sales outlet carrying its own stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Website,
    Showroom,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Website => "website",
            Channel::Showroom => "showroom",
        }
    }
}

impl core::fmt::Display for Channel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Channel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "website" => Ok(Channel::Website),
            "showroom" => Ok(Channel::Showroom),
            other => Err(DomainError::validation(format!("unknown channel: {other}"))),
        }
    }
}

/// Stock and sales of one product in one channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelStock {
    pub in_stock: u64,
    pub sold: u64,
}

impl ValueObject for ChannelStock {}

/// Per-channel breakdown; always exactly one entry per [`Channel`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channels {
    pub website: ChannelStock,
    pub showroom: ChannelStock,
}

impl Channels {
    pub fn get(&self, channel: Channel) -> &ChannelStock {
        match channel {
            Channel::Website => &self.website,
            Channel::Showroom => &self.showroom,
        }
    }

    pub fn get_mut(&mut self, channel: Channel) -> &mut ChannelStock {
        match channel {
            Channel::Website => &mut self.website,
            Channel::Showroom => &mut self.showroom,
        }
    }

    pub fn in_stock_total(&self) -> u64 {
        self.website.in_stock.saturating_add(self.showroom.in_stock)
    }
}

/// One named input to a product's unit cost (fabric, labor, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostComponent {
    pub name: String,
    pub cost: Money,
}

impl ValueObject for CostComponent {}

impl CostComponent {
    pub fn new(name: impl Into<String>, cost: Money) -> Self {
        Self {
            name: name.into(),
            cost,
        }
    }
}

/// Input for creating a [`Product`] (seed data, fixtures).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub price: Money,
    #[serde(default)]
    pub cost_components: Vec<CostComponent>,
    pub total_stock: u64,
    #[serde(default)]
    pub total_sold: u64,
    pub low_stock_threshold: u64,
    pub last_restocked: NaiveDate,
    /// Units per week.
    pub sales_velocity: u32,
    #[serde(default)]
    pub channels: Channels,
}

/// Catalog product with stock position and unit economics.
///
/// Unit cost is always derived from the cost components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    id: ProductId,
    sku: String,
    name: String,
    image: String,
    price: Money,
    cost_components: Vec<CostComponent>,
    total_stock: u64,
    total_sold: u64,
    low_stock_threshold: u64,
    last_restocked: NaiveDate,
    sales_velocity: u32,
    channels: Channels,
}

impl Product {
    pub fn create(new: NewProduct) -> DomainResult<Self> {
        if new.name.trim().is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        if new.sku.trim().is_empty() {
            return Err(DomainError::validation("product sku cannot be empty"));
        }
        if new.price.amount().is_sign_negative() {
            return Err(DomainError::validation("price cannot be negative"));
        }
        if new.cost_components.iter().any(|c| c.cost.amount().is_sign_negative()) {
            return Err(DomainError::validation("cost components cannot be negative"));
        }

        Ok(Self {
            id: new.id,
            sku: new.sku,
            name: new.name,
            image: new.image,
            price: new.price,
            cost_components: new.cost_components,
            total_stock: new.total_stock,
            total_sold: new.total_sold,
            low_stock_threshold: new.low_stock_threshold,
            last_restocked: new.last_restocked,
            sales_velocity: new.sales_velocity,
            channels: new.channels,
        })
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn cost_components(&self) -> &[CostComponent] {
        &self.cost_components
    }

    pub fn total_stock(&self) -> u64 {
        self.total_stock
    }

    pub fn total_sold(&self) -> u64 {
        self.total_sold
    }

    pub fn low_stock_threshold(&self) -> u64 {
        self.low_stock_threshold
    }

    pub fn last_restocked(&self) -> NaiveDate {
        self.last_restocked
    }

    pub fn sales_velocity(&self) -> u32 {
        self.sales_velocity
    }

    pub fn channels(&self) -> &Channels {
        &self.channels
    }

    /// Sum of the cost components.
    pub fn unit_cost(&self) -> Money {
        self.cost_components.iter().map(|c| c.cost).sum()
    }

    /// Price minus unit cost (negative when sold at a loss).
    pub fn unit_margin(&self) -> Money {
        self.price - self.unit_cost()
    }

    /// Margin as a percentage of price; zero for a free product.
    pub fn margin_percent(&self) -> Decimal {
        if self.price.is_zero() {
            return Decimal::ZERO;
        }
        self.unit_margin().amount() / self.price.amount() * Decimal::ONE_HUNDRED
    }

    /// Stock runway in weeks, `None` when nothing sells.
    pub fn weeks_of_stock(&self) -> Option<Decimal> {
        if self.sales_velocity == 0 {
            return None;
        }
        Some(Decimal::from(self.total_stock) / Decimal::from(self.sales_velocity))
    }

    pub fn is_low_stock(&self) -> bool {
        self.total_stock <= self.low_stock_threshold
    }

    /// Aggregate stock minus the sum of channel stock.
    pub fn channel_drift(&self) -> i128 {
        i128::from(self.total_stock) - i128::from(self.channels.in_stock_total())
    }

    /// Case-insensitive substring match on name or sku.
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.name.to_lowercase().contains(&needle) || self.sku.to_lowercase().contains(&needle)
    }

    pub(crate) fn set_total_stock(&mut self, value: u64) {
        self.total_stock = value;
    }

    pub(crate) fn channel_mut(&mut self, channel: Channel) -> &mut ChannelStock {
        self.channels.get_mut(channel)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

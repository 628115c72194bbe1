//! Startup data: the built-in sample catalog or a JSON seed file.

use std::path::Path;

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use atelier_accounting::{CostDraft, Frequency};
use atelier_core::{CostId, DomainError, Money, ProductId};
use atelier_inventory::{ChannelStock, Channels, CostComponent, NewProduct};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse seed file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// A cost entry with a fixed id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedCost {
    pub id: CostId,
    #[serde(flatten)]
    pub entry: CostDraft,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub products: Vec<NewProduct>,
    #[serde(default)]
    pub costs: Vec<SeedCost>,
}

impl SeedData {
    pub fn from_json(json: &str, origin: &str) -> Result<Self, SeedError> {
        serde_json::from_str(json).map_err(|source| SeedError::Parse {
            path: origin.to_string(),
            source,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, SeedError> {
        let display = path.display().to_string();
        let json = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: display.clone(),
            source,
        })?;
        Self::from_json(&json, &display)
    }

    /// The boutique's sample catalog and running costs.
    pub fn builtin() -> Self {
        Self {
            products: vec![
                product(
                    1,
                    "MWT-001",
                    "The Meadow Whisper Top",
                    "/The Meadow Whisper Top.png",
                    Money::new(dec!(910.00)),
                    &[
                        ("Fabric", Money::new(dec!(45.50))),
                        ("Thread", Money::new(dec!(8.20))),
                        ("Buttons", Money::new(dec!(5.30))),
                        ("Labor", Money::new(dec!(25.00))),
                    ],
                    Stock {
                        total: 145,
                        sold: 156,
                        threshold: 20,
                        velocity: 12,
                        restocked: (2025, 1, 10),
                        website: (95, 98),
                        showroom: (50, 58),
                    },
                ),
                product(
                    2,
                    "BWT-002",
                    "The Berry Whisper Top",
                    "/The Berry Whisper Top.png",
                    Money::new(dec!(910.00)),
                    &[
                        ("Fabric", Money::new(dec!(48.00))),
                        ("Thread", Money::new(dec!(8.50))),
                        ("Buttons", Money::new(dec!(6.20))),
                        ("Labor", Money::new(dec!(25.00))),
                    ],
                    Stock {
                        total: 12,
                        sold: 234,
                        threshold: 15,
                        velocity: 18,
                        restocked: (2025, 1, 5),
                        website: (8, 156),
                        showroom: (4, 78),
                    },
                ),
                product(
                    3,
                    "LSB-003",
                    "Long Sleve Beige Top",
                    "/Long Sleve Beige Top.jpg",
                    Money::new(dec!(390.00)),
                    &[
                        ("Fabric", Money::new(dec!(22.80))),
                        ("Thread", Money::new(dec!(4.90))),
                        ("Buttons", Money::new(dec!(3.40))),
                        ("Labor", Money::new(dec!(15.00))),
                    ],
                    Stock {
                        total: 67,
                        sold: 189,
                        threshold: 25,
                        velocity: 8,
                        restocked: (2025, 1, 12),
                        website: (45, 123),
                        showroom: (22, 66),
                    },
                ),
                product(
                    4,
                    "PCC-004",
                    "Pink Cloud Chemise",
                    "/Pink Cloud Chemise.jpg",
                    Money::new(dec!(620.00)),
                    &[
                        ("Fabric", Money::new(dec!(35.20))),
                        ("Thread", Money::new(dec!(6.80))),
                        ("Lace", Money::new(dec!(12.30))),
                        ("Labor", Money::new(dec!(18.00))),
                    ],
                    Stock {
                        total: 234,
                        sold: 98,
                        threshold: 30,
                        velocity: 5,
                        restocked: (2025, 1, 8),
                        website: (156, 67),
                        showroom: (78, 31),
                    },
                ),
            ],
            costs: vec![
                cost(1, "Marketing", "Social Media Ads", Money::new(dec!(2500))),
                cost(2, "Operations", "Rent & Utilities", Money::new(dec!(1800))),
                cost(3, "Logistics", "Shipping & Packaging", Money::new(dec!(1200))),
                cost(4, "Personnel", "Staff Salaries", Money::new(dec!(4500))),
            ],
        }
    }
}

struct Stock {
    total: u64,
    sold: u64,
    threshold: u64,
    velocity: u32,
    restocked: (i32, u32, u32),
    website: (u64, u64),
    showroom: (u64, u64),
}

fn product(
    id: u128,
    sku: &str,
    name: &str,
    image: &str,
    price: Money,
    components: &[(&str, Money)],
    stock: Stock,
) -> NewProduct {
    let (year, month, day) = stock.restocked;
    NewProduct {
        id: ProductId::from_u128(id),
        sku: sku.to_string(),
        name: name.to_string(),
        image: image.to_string(),
        price,
        cost_components: components
            .iter()
            .map(|(name, cost)| CostComponent::new(*name, *cost))
            .collect(),
        total_stock: stock.total,
        total_sold: stock.sold,
        low_stock_threshold: stock.threshold,
        last_restocked: NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN),
        sales_velocity: stock.velocity,
        channels: Channels {
            website: ChannelStock {
                in_stock: stock.website.0,
                sold: stock.website.1,
            },
            showroom: ChannelStock {
                in_stock: stock.showroom.0,
                sold: stock.showroom.1,
            },
        },
    }
}

fn cost(id: u128, category: &str, description: &str, amount: Money) -> SeedCost {
    SeedCost {
        id: CostId::from_u128(id),
        entry: CostDraft::new(category, description, amount, Frequency::Monthly),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_accounting::CATEGORY_SUGGESTIONS;

    #[test]
    fn builtin_seed_has_four_products_and_costs() {
        let seed = SeedData::builtin();
        assert_eq!(seed.products.len(), 4);
        assert_eq!(seed.costs.len(), 4);
        for p in &seed.products {
            assert_eq!(
                p.total_stock,
                p.channels.website.in_stock + p.channels.showroom.in_stock,
                "{} starts consistent",
                p.sku
            );
        }
    }

    #[test]
    fn builtin_costs_use_suggested_categories() {
        for cost in SeedData::builtin().costs {
            assert!(CATEGORY_SUGGESTIONS.contains(&cost.entry.category.as_str()));
        }
    }

    #[test]
    fn parses_json_seed() {
        let json = r#"{
            "products": [{
                "id": "00000000-0000-0000-0000-000000000009",
                "sku": "TST-009",
                "name": "Test Top",
                "price": "100.00",
                "cost_components": [{ "name": "Fabric", "cost": "40" }],
                "total_stock": 3,
                "low_stock_threshold": 5,
                "last_restocked": "2025-02-01",
                "sales_velocity": 2
            }],
            "costs": [{
                "id": "00000000-0000-0000-0000-000000000001",
                "category": "Technology",
                "description": "Hosting",
                "amount": "240",
                "frequency": "yearly"
            }]
        }"#;

        let seed = SeedData::from_json(json, "inline").unwrap();
        assert_eq!(seed.products[0].id, ProductId::from_u128(9));
        assert_eq!(seed.products[0].channels, Channels::default());
        assert_eq!(seed.costs[0].entry.frequency, Frequency::Yearly);
        assert_eq!(seed.costs[0].entry.amount, Money::new(dec!(240)));
    }

    #[test]
    fn malformed_json_reports_origin() {
        let err = SeedData::from_json("{ not json", "broken.json").unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = SeedData::from_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, SeedError::Io { .. }));
    }
}

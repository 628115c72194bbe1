//! Velocity-based restock recommendation.
//!
//! Runway is `total_stock / sales_velocity` weeks:
//!
//! | runway      | order            | urgency  |
//! |-------------|------------------|----------|
//! | < 2 weeks   | 4 weeks of sales | high     |
//! | < 4 weeks   | 3 weeks of sales | medium   |
//! | otherwise   | nothing          | low      |
//!
//! A product that does not sell has no runway and gets no order.

use serde::{Deserialize, Serialize};

use crate::product::Product;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestockUrgency {
    High,
    Medium,
    Low,
}

impl RestockUrgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            RestockUrgency::High => "high",
            RestockUrgency::Medium => "medium",
            RestockUrgency::Low => "low",
        }
    }
}

impl core::fmt::Display for RestockUrgency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestockRecommendation {
    /// Units to order.
    pub amount: u64,
    pub urgency: RestockUrgency,
}

impl RestockRecommendation {
    /// Whether any units should be ordered.
    pub fn is_actionable(&self) -> bool {
        self.amount > 0
    }

    const NONE: RestockRecommendation = RestockRecommendation {
        amount: 0,
        urgency: RestockUrgency::Low,
    };
}

const HIGH_RUNWAY_WEEKS: u64 = 2;
const MEDIUM_RUNWAY_WEEKS: u64 = 4;
const HIGH_ORDER_WEEKS: u64 = 4;
const MEDIUM_ORDER_WEEKS: u64 = 3;

/// Recommend a restock for `product` from its current snapshot.
pub fn restock_recommendation(product: &Product) -> RestockRecommendation {
    let velocity = u64::from(product.sales_velocity());
    if velocity == 0 {
        return RestockRecommendation::NONE;
    }

    // stock / velocity < n  <=>  stock < n * velocity, without leaving integers.
    let stock = u128::from(product.total_stock());
    let runway_below = |weeks: u64| stock < u128::from(weeks) * u128::from(velocity);

    if runway_below(HIGH_RUNWAY_WEEKS) {
        RestockRecommendation {
            amount: velocity * HIGH_ORDER_WEEKS,
            urgency: RestockUrgency::High,
        }
    } else if runway_below(MEDIUM_RUNWAY_WEEKS) {
        RestockRecommendation {
            amount: velocity * MEDIUM_ORDER_WEEKS,
            urgency: RestockUrgency::Medium,
        }
    } else {
        RestockRecommendation::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::tests::test_product;
    use proptest::prelude::*;

    #[test]
    fn one_and_a_half_weeks_is_high() {
        let rec = restock_recommendation(&test_product(1, 15, 10));
        assert_eq!(rec.urgency, RestockUrgency::High);
        assert_eq!(rec.amount, 40);
    }

    #[test]
    fn three_weeks_is_medium() {
        let rec = restock_recommendation(&test_product(1, 30, 10));
        assert_eq!(rec.urgency, RestockUrgency::Medium);
        assert_eq!(rec.amount, 30);
    }

    #[test]
    fn five_weeks_is_low_with_nothing_to_order() {
        let rec = restock_recommendation(&test_product(1, 50, 10));
        assert_eq!(rec, RestockRecommendation { amount: 0, urgency: RestockUrgency::Low });
    }

    #[test]
    fn berry_top_needs_urgent_restock() {
        // 12 units at 18/week is two thirds of a week.
        let rec = restock_recommendation(&test_product(2, 12, 18));
        assert_eq!(rec.urgency, RestockUrgency::High);
        assert_eq!(rec.amount, 72);
    }

    #[test]
    fn boundaries_fall_into_the_next_band() {
        assert_eq!(restock_recommendation(&test_product(1, 20, 10)).urgency, RestockUrgency::Medium);
        assert_eq!(restock_recommendation(&test_product(1, 40, 10)).urgency, RestockUrgency::Low);
    }

    #[test]
    fn zero_velocity_orders_nothing() {
        let rec = restock_recommendation(&test_product(1, 0, 0));
        assert_eq!(rec, RestockRecommendation { amount: 0, urgency: RestockUrgency::Low });
    }

    proptest! {
        /// Property: the recommendation is a pure function of the snapshot.
        #[test]
        fn recommendation_is_deterministic(stock in 0u64..10_000, velocity in 0u32..500) {
            let product = test_product(1, stock, velocity);
            let before = product.clone();
            let first = restock_recommendation(&product);
            let second = restock_recommendation(&product);
            prop_assert_eq!(first, second);
            prop_assert_eq!(product, before);
        }

        /// Property: an order is recommended exactly when runway is under four weeks.
        #[test]
        fn orders_only_when_runway_is_short(stock in 0u64..10_000, velocity in 1u32..500) {
            let rec = restock_recommendation(&test_product(1, stock, velocity));
            let short = stock < 4 * u64::from(velocity);
            prop_assert_eq!(rec.amount > 0, short);
        }
    }
}

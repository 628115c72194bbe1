//! Business cost ledger.
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod costs;

pub use costs::{
    BusinessCost, CATEGORY_SUGGESTIONS, CategoryTotal, CostAdded, CostDraft, CostEvent,
    CostLedger, Frequency, monthly_by_category, monthly_total,
};

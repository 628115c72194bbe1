//! `atelier-core`: shared building blocks for the back-office ledgers.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CostId, ProductId};
pub use money::Money;
pub use value_object::ValueObject;

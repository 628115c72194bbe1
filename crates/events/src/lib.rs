//! Change notifications for the ledgers.
//!
//! Ledgers report what happened as events; the dashboard fans them out to
//! whoever subscribed (a UI, a log sink, a test).

pub mod bus;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};

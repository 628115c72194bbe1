use chrono::{DateTime, Utc};

/// A fact reported by a ledger after a successful mutation.
///
/// Events are immutable; a no-op mutation reports nothing.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name (e.g. "inventory.stock_adjusted").
    fn event_type(&self) -> &'static str;

    /// When the mutation happened.
    fn occurred_at(&self) -> DateTime<Utc>;
}

//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity** and are compared by their attributes:
/// a cost component named "Fabric" costing 45.50 is equal to any other
/// "Fabric" component at 45.50. To "modify" one, build a new value.
///
/// - **Value Object**: `Money`, `CostComponent`, `ChannelStock`
/// - **Entity**: `Product`, `BusinessCost` (identified by their ids)
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use atelier_core::{CostId, DomainError, DomainResult, Entity, Money};
use atelier_events::Event;

/// Categories offered when entering a cost. The category itself is free text.
pub const CATEGORY_SUGGESTIONS: [&str; 6] = [
    "Marketing",
    "Operations",
    "Logistics",
    "Personnel",
    "Technology",
    "Other",
];

/// How often a cost is billed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    #[default]
    Monthly,
    Yearly,
    OneTime,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
            Frequency::OneTime => "one-time",
        }
    }

    /// Contribution of `amount` billed at this frequency to a single month.
    pub fn monthly_share(&self, amount: Money) -> Money {
        match self {
            Frequency::Monthly => amount,
            Frequency::Yearly => amount.split(12),
            Frequency::OneTime => Money::ZERO,
        }
    }
}

impl core::fmt::Display for Frequency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Frequency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            "one-time" | "onetime" | "one_time" => Ok(Frequency::OneTime),
            other => Err(DomainError::validation(format!("unknown frequency: {other}"))),
        }
    }
}

/// Input for a new cost entry (the "add cost" form).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostDraft {
    #[serde(default)]
    pub category: String,
    pub description: String,
    pub amount: Money,
    #[serde(default)]
    pub frequency: Frequency,
}

impl CostDraft {
    pub fn new(
        category: impl Into<String>,
        description: impl Into<String>,
        amount: Money,
        frequency: Frequency,
    ) -> Self {
        Self {
            category: category.into(),
            description: description.into(),
            amount,
            frequency,
        }
    }

    /// Description present and amount above zero.
    pub fn validate(&self) -> DomainResult<()> {
        if self.description.is_empty() {
            return Err(DomainError::validation("description cannot be empty"));
        }
        if !self.amount.is_positive() {
            return Err(DomainError::validation("amount must be positive"));
        }
        Ok(())
    }
}

/// A recurring or one-time business expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusinessCost {
    id: CostId,
    category: String,
    description: String,
    amount: Money,
    frequency: Frequency,
}

impl BusinessCost {
    pub fn create(id: CostId, draft: CostDraft) -> DomainResult<Self> {
        draft.validate()?;
        Ok(Self {
            id,
            category: draft.category,
            description: draft.description,
            amount: draft.amount,
            frequency: draft.frequency,
        })
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn monthly_share(&self) -> Money {
        self.frequency.monthly_share(self.amount)
    }
}

impl Entity for BusinessCost {
    type Id = CostId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Event: CostAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostAdded {
    pub cost: BusinessCost,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CostEvent {
    CostAdded(CostAdded),
}

impl Event for CostEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CostEvent::CostAdded(_) => "accounting.cost_added",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CostEvent::CostAdded(e) => e.occurred_at,
        }
    }
}

/// Monthly-normalized total of `costs`.
///
/// Monthly and yearly amounts are summed separately and the yearly sum is
/// divided once, so the result does not depend on entry order.
pub fn monthly_total(costs: &[BusinessCost]) -> Money {
    let (monthly, yearly) = costs.iter().fold(
        (Money::ZERO, Money::ZERO),
        |(monthly, yearly), cost| match cost.frequency {
            Frequency::Monthly => (monthly + cost.amount, yearly),
            Frequency::Yearly => (monthly, yearly + cost.amount),
            Frequency::OneTime => (monthly, yearly),
        },
    );
    monthly + Frequency::Yearly.monthly_share(yearly)
}

/// Monthly-normalized spend of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub monthly: Money,
}

/// [`monthly_total`] per category, sorted by category name.
pub fn monthly_by_category(costs: &[BusinessCost]) -> Vec<CategoryTotal> {
    let mut grouped: BTreeMap<&str, Vec<BusinessCost>> = BTreeMap::new();
    for cost in costs {
        grouped.entry(cost.category()).or_default().push(cost.clone());
    }
    grouped
        .into_iter()
        .map(|(category, entries)| CategoryTotal {
            category: category.to_string(),
            monthly: monthly_total(&entries),
        })
        .collect()
}

/// Owned list of business costs plus the pending form draft.
#[derive(Debug, Clone, Default)]
pub struct CostLedger {
    costs: Vec<BusinessCost>,
    draft: CostDraft,
}

impl CostLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from existing entries, rejecting duplicate ids.
    pub fn with_costs(costs: impl IntoIterator<Item = BusinessCost>) -> DomainResult<Self> {
        let mut ledger = Self::new();
        for cost in costs {
            let id = *cost.id();
            if ledger.get(id).is_some() {
                return Err(DomainError::conflict(format!("cost {id} already exists")));
            }
            ledger.costs.push(cost);
        }
        Ok(ledger)
    }

    pub fn costs(&self) -> &[BusinessCost] {
        &self.costs
    }

    pub fn get(&self, id: CostId) -> Option<&BusinessCost> {
        self.costs.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    pub fn draft(&self) -> &CostDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut CostDraft {
        &mut self.draft
    }

    /// Append a cost under a fresh id and clear the draft.
    ///
    /// Returns `None` (and changes nothing, draft included) when the
    /// description is empty or the amount is not positive.
    pub fn add_cost(&mut self, entry: CostDraft) -> Option<CostAdded> {
        let id = self.fresh_id();
        let cost = match BusinessCost::create(id, entry) {
            Ok(cost) => cost,
            Err(e) => {
                tracing::debug!(error = %e, "cost entry rejected");
                return None;
            }
        };

        tracing::info!(
            cost_id = %cost.id,
            category = cost.category(),
            amount = %cost.amount,
            frequency = cost.frequency.as_str(),
            "cost added"
        );

        self.costs.push(cost.clone());
        self.draft = CostDraft::default();
        Some(CostAdded {
            cost,
            occurred_at: Utc::now(),
        })
    }

    /// Submit the pending draft; the draft is cleared only on success.
    pub fn submit_draft(&mut self) -> Option<CostAdded> {
        self.add_cost(self.draft.clone())
    }

    pub fn monthly_total(&self) -> Money {
        monthly_total(&self.costs)
    }

    pub fn monthly_by_category(&self) -> Vec<CategoryTotal> {
        monthly_by_category(&self.costs)
    }

    fn fresh_id(&self) -> CostId {
        loop {
            let id = CostId::new();
            if self.get(id).is_none() {
                return id;
            }
        }
    }
}

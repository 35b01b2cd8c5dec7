//! # View Models
//!
//! Typed snapshots the dashboards render. Each is a pure function of one
//! ledger object (plus, transiently, an optimistic patch).

use ld_01_transaction_builder::{Topping, ToppingCounts};
use serde::Serialize;
use shared_types::{Address, LedgerObject, ObjectId};
use tracing::debug;

use super::errors::SchemaError;
use super::projection::{move_fields, struct_field, text_field, u64_field, Projection};
use crate::algorithms::{next_milestone, pizza_layout, progress_percent, Milestone, Tier};
use crate::algorithms::ToppingPosition;

/// Shown when the ledger has no name for a business.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Shown when the ledger has no category for a business.
pub const UNKNOWN_CATEGORY: &str = "Uncategorized";

// =============================================================================
// REPUTATION
// =============================================================================

/// Reputation dashboard for one registered business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusinessView {
    /// The reputation object.
    pub object_id: ObjectId,
    /// Owning account, when address-owned.
    pub owner: Option<Address>,
    /// Business name.
    pub name: String,
    /// Business category.
    pub category: String,
    /// Cumulative revenue in IDR.
    pub revenue: u64,
    /// Badge artwork.
    pub image_url: String,
}

impl BusinessView {
    /// A freshly registered business: zero revenue, Bronze.
    pub fn registered(
        object_id: ObjectId,
        owner: Option<Address>,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            object_id,
            owner,
            name: name.into(),
            category: category.into(),
            revenue: 0,
            image_url: Tier::Bronze.image_url().to_string(),
        }
    }

    /// Tier, derived from revenue.
    pub fn tier(&self) -> Tier {
        Tier::for_revenue(self.revenue)
    }

    /// Lender-facing trust score.
    pub fn trust_score(&self) -> &'static str {
        self.tier().trust_score()
    }

    /// Distance to the next tier.
    pub fn next_milestone(&self) -> Milestone {
        next_milestone(self.revenue)
    }

    /// Progress towards Gold, 0.0..=100.0.
    pub fn progress_percent(&self) -> f64 {
        progress_percent(self.revenue)
    }

    /// Whether `account` owns the object.
    pub fn is_owned_by(&self, account: &Address) -> bool {
        self.owner.as_ref() == Some(account)
    }
}

impl Projection for BusinessView {
    fn decode(object: &LedgerObject) -> Result<Self, SchemaError> {
        let fields = move_fields(object)?;
        let revenue = u64_field(fields, "revenue", 0)?;
        let tier = Tier::for_revenue(revenue);

        if let Some(stored) = fields.get("tier").and_then(|v| v.as_str()) {
            if stored != tier.as_str() {
                debug!(
                    object_id = %object.object_id,
                    stored,
                    derived = %tier,
                    "[ld-02] Ignoring stored tier"
                );
            }
        }

        let image_url = text_field(fields, "image_url", tier.image_url())?;

        Ok(Self {
            object_id: object.object_id.clone(),
            owner: object.owner_address().cloned(),
            name: text_field(fields, "name", UNKNOWN_NAME)?,
            category: text_field(fields, "category", UNKNOWN_CATEGORY)?,
            revenue,
            image_url,
        })
    }
}

// =============================================================================
// PIZZA
// =============================================================================

/// A cooked pizza box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PizzaBoxView {
    /// The box object.
    pub object_id: ObjectId,
    /// Owning account, when address-owned.
    pub owner: Option<Address>,
    /// Topping counts inside the box.
    pub toppings: ToppingCounts,
}

impl PizzaBoxView {
    /// Glyph layout for rendering.
    pub fn layout(&self) -> Vec<(Topping, Vec<ToppingPosition>)> {
        pizza_layout(&self.toppings)
    }
}

impl Projection for PizzaBoxView {
    fn decode(object: &LedgerObject) -> Result<Self, SchemaError> {
        let fields = move_fields(object)?;
        // Boxes wrap a `pizza` struct; a bare pizza carries the counts itself.
        let source = struct_field(fields, "pizza")?.unwrap_or(fields);

        let mut toppings = ToppingCounts::default();
        for topping in Topping::ALL {
            let name = topping.field_name();
            let count = u64_field(source, name, 0)?;
            let count = u32::try_from(count)
                .map_err(|_| SchemaError::invalid(name, format!("{} does not fit u32", count)))?;
            toppings.set(topping, count);
        }

        Ok(Self {
            object_id: object.object_id.clone(),
            owner: object.owner_address().cloned(),
            toppings,
        })
    }
}

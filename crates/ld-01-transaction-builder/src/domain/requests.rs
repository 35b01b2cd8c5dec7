//! # Mutation Requests
//!
//! User intents and their validated form.
//!
//! ## Type-State
//!
//! `MutationRequest` is what the view layer hands over. The only way to obtain
//! a `ValidatedRequest` is `MutationRequest::validate`, and the builder only
//! accepts `ValidatedRequest`, so unvalidated input cannot reach a payload:
//!
//! ```text
//! [MutationRequest] ──validate──→ [ValidatedRequest] ──build──→ [TransactionPayload]
//!         │
//!         └── ValidationError (never leaves the client)
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use shared_types::ObjectId;
use uuid::Uuid;

use super::errors::ValidationError;
use super::invariants::{
    invariant_amount_positive, invariant_bounded_text, invariant_non_empty,
    invariant_topping_in_range, MAX_CATEGORY_LEN, MAX_DESCRIPTION_LEN, MAX_NAME_LEN,
};

// =============================================================================
// PIZZA TOPPINGS
// =============================================================================

/// Toppings the pizza contract knows about, in contract argument order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topping {
    /// Pepperoni slices.
    Pepperoni,
    /// Sausage pieces.
    Sausage,
    /// Extra cheese blobs.
    Cheese,
    /// Onion rings.
    Onion,
    /// Chives.
    Chives,
}

impl Topping {
    /// All toppings in contract argument order.
    pub const ALL: [Topping; 5] = [
        Topping::Pepperoni,
        Topping::Sausage,
        Topping::Cheese,
        Topping::Onion,
        Topping::Chives,
    ];

    /// Field name on the ledger object and in the form.
    pub fn field_name(self) -> &'static str {
        match self {
            Topping::Pepperoni => "pepperoni",
            Topping::Sausage => "sausage",
            Topping::Cheese => "cheese",
            Topping::Onion => "onion",
            Topping::Chives => "chives",
        }
    }

    /// Layout seed; fixed per topping so each kind scatters differently.
    pub fn layout_seed(self) -> u32 {
        match self {
            Topping::Pepperoni => 1,
            Topping::Sausage => 2,
            Topping::Cheese => 3,
            Topping::Onion => 4,
            Topping::Chives => 5,
        }
    }
}

impl fmt::Display for Topping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// Count per topping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToppingCounts {
    /// Pepperoni slices.
    pub pepperoni: u32,
    /// Sausage pieces.
    pub sausage: u32,
    /// Cheese blobs.
    pub cheese: u32,
    /// Onion rings.
    pub onion: u32,
    /// Chives.
    pub chives: u32,
}

impl ToppingCounts {
    /// Count for one topping.
    pub fn get(&self, topping: Topping) -> u32 {
        match topping {
            Topping::Pepperoni => self.pepperoni,
            Topping::Sausage => self.sausage,
            Topping::Cheese => self.cheese,
            Topping::Onion => self.onion,
            Topping::Chives => self.chives,
        }
    }

    /// Set the count for one topping.
    pub fn set(&mut self, topping: Topping, count: u32) {
        match topping {
            Topping::Pepperoni => self.pepperoni = count,
            Topping::Sausage => self.sausage = count,
            Topping::Cheese => self.cheese = count,
            Topping::Onion => self.onion = count,
            Topping::Chives => self.chives = count,
        }
    }

    /// `(topping, count)` pairs in contract argument order.
    pub fn iter(&self) -> impl Iterator<Item = (Topping, u32)> + '_ {
        Topping::ALL.into_iter().map(|t| (t, self.get(t)))
    }

    /// Total number of toppings on the pizza.
    pub fn total(&self) -> u32 {
        self.iter().map(|(_, count)| count).sum()
    }
}

// =============================================================================
// REQUESTS
// =============================================================================

/// Enumerated contract actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Mint a business reputation object.
    Register,
    /// Add revenue to an existing business.
    RecordRevenue,
    /// Cook a pizza into a new box.
    Cook,
}

impl ActionKind {
    /// Label used in logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Register => "register",
            ActionKind::RecordRevenue => "record_revenue",
            ActionKind::Cook => "cook",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw arguments as the view layer collected them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// `register(name, category)`.
    Register {
        /// Business name.
        name: String,
        /// Business category.
        category: String,
    },
    /// `record_revenue(business, amount)`.
    RecordRevenue {
        /// Target business object.
        business: ObjectId,
        /// Amount as entered; signed so negative input can be rejected.
        amount: i64,
        /// Free-text note kept only in the local history.
        description: String,
    },
    /// `cook(pepperoni, sausage, cheese, onion, chives)`.
    Cook {
        /// Requested toppings.
        toppings: ToppingCounts,
    },
}

impl Action {
    /// Which contract action this is.
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Register { .. } => ActionKind::Register,
            Action::RecordRevenue { .. } => ActionKind::RecordRevenue,
            Action::Cook { .. } => ActionKind::Cook,
        }
    }
}

/// A user intent, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationRequest {
    /// Correlation id carried through logs and the coordinator snapshot.
    pub id: Uuid,
    /// Requested action.
    pub action: Action,
}

impl MutationRequest {
    /// Wrap an action with a fresh correlation id.
    pub fn new(action: Action) -> Self {
        Self {
            id: Uuid::new_v4(),
            action,
        }
    }

    /// `register(name, category)`.
    pub fn register(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self::new(Action::Register {
            name: name.into(),
            category: category.into(),
        })
    }

    /// `record_revenue(business, amount)` with a history note.
    pub fn record_revenue(business: ObjectId, amount: i64, description: impl Into<String>) -> Self {
        Self::new(Action::RecordRevenue {
            business,
            amount,
            description: description.into(),
        })
    }

    /// `cook(...)`.
    pub fn cook(toppings: ToppingCounts) -> Self {
        Self::new(Action::Cook { toppings })
    }

    /// Action kind.
    pub fn kind(&self) -> ActionKind {
        self.action.kind()
    }

    /// Check every input constraint of the target contract.
    ///
    /// This is the ONLY way to obtain a `ValidatedRequest`.
    pub fn validate(&self) -> Result<ValidatedRequest, ValidationError> {
        let action = match &self.action {
            Action::Register { name, category } => {
                let name = name.trim();
                let category = category.trim();
                invariant_non_empty("name", name)?;
                invariant_bounded_text("name", name, MAX_NAME_LEN)?;
                invariant_non_empty("category", category)?;
                invariant_bounded_text("category", category, MAX_CATEGORY_LEN)?;
                ValidatedAction::Register {
                    name: name.to_string(),
                    category: category.to_string(),
                }
            }
            Action::RecordRevenue {
                business,
                amount,
                description,
            } => {
                let amount = invariant_amount_positive(*amount)?;
                let description = description.trim();
                invariant_bounded_text("description", description, MAX_DESCRIPTION_LEN)?;
                ValidatedAction::RecordRevenue {
                    business: business.clone(),
                    amount,
                    description: description.to_string(),
                }
            }
            Action::Cook { toppings } => {
                for (topping, count) in toppings.iter() {
                    invariant_topping_in_range(topping, count)?;
                }
                ValidatedAction::Cook {
                    toppings: *toppings,
                }
            }
        };

        Ok(ValidatedRequest {
            id: self.id,
            action,
        })
    }
}

/// Arguments after validation; integer widths match the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAction {
    /// Trimmed, non-empty name and category.
    Register {
        /// Business name.
        name: String,
        /// Business category.
        category: String,
    },
    /// Strictly positive amount.
    RecordRevenue {
        /// Target business object.
        business: ObjectId,
        /// Amount in IDR.
        amount: u64,
        /// Local history note.
        description: String,
    },
    /// Every count within 0..=30.
    Cook {
        /// Requested toppings.
        toppings: ToppingCounts,
    },
}

/// A request that satisfied every input constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    id: Uuid,
    action: ValidatedAction,
}

impl ValidatedRequest {
    /// Correlation id of the originating request.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Validated arguments.
    pub fn action(&self) -> &ValidatedAction {
        &self.action
    }

    /// Action kind.
    pub fn kind(&self) -> ActionKind {
        match self.action {
            ValidatedAction::Register { .. } => ActionKind::Register,
            ValidatedAction::RecordRevenue { .. } => ActionKind::RecordRevenue,
            ValidatedAction::Cook { .. } => ActionKind::Cook,
        }
    }
}

//! # Confirmation Handlers
//!
//! Run by the coordinators after a transaction is confirmed: remember the
//! created object, show the optimistic patch, then ask the ledger.
//!
//! ```text
//! Confirmed ──► locator.save (creations only)
//!           ──► history.record (revenue only)
//!           ──► reconciler.apply_patch(patch, awaiting = effects version)
//!           ──► reconciler.refresh()   (stale reads are dropped)
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use ld_01_transaction_builder::{ValidatedAction, ValidatedRequest};
use ld_02_read_model::{
    BusinessView, CookPatch, PizzaBoxView, Projection, Reconciler, RegistrationPatch,
    RevenueHistory, RevenuePatch,
};
use ld_03_mutation_coordinator::ConfirmationHandler;
use parking_lot::Mutex;
use shared_types::{Address, ObjectId, TransactionEffects};
use tracing::{debug, warn};

use crate::ports::ObjectLocator;

/// Follows confirmed reputation transactions.
pub struct ReputationConfirmation {
    account: Option<Address>,
    reconciler: Arc<Reconciler<BusinessView>>,
    locator: Arc<dyn ObjectLocator>,
    history: Arc<Mutex<RevenueHistory>>,
}

impl ReputationConfirmation {
    /// Handler feeding `reconciler`, `locator` and the session `history`.
    pub fn new(
        account: Option<Address>,
        reconciler: Arc<Reconciler<BusinessView>>,
        locator: Arc<dyn ObjectLocator>,
        history: Arc<Mutex<RevenueHistory>>,
    ) -> Self {
        Self {
            account,
            reconciler,
            locator,
            history,
        }
    }
}

#[async_trait]
impl ConfirmationHandler for ReputationConfirmation {
    async fn on_confirmed(&self, request: &ValidatedRequest, effects: &TransactionEffects) {
        match request.action() {
            ValidatedAction::Register { name, category } => {
                let Some(created) = effects.first_created() else {
                    warn!(digest = %effects.digest, "[runtime] Registration created no object");
                    return;
                };
                remember(self.locator.as_ref(), &created.object_id);
                let patch = RegistrationPatch {
                    object_id: created.object_id.clone(),
                    owner: self.account.clone(),
                    name: name.clone(),
                    category: category.clone(),
                };
                self.reconciler
                    .apply_patch(&created.object_id, &patch, Some(created.version));
            }
            ValidatedAction::RecordRevenue {
                business,
                amount,
                description,
            } => {
                self.history.lock().record(*amount, description, Utc::now());
                let patch = RevenuePatch { amount: *amount };
                self.reconciler
                    .apply_patch(business, &patch, effects.version_of(business));
            }
            ValidatedAction::Cook { .. } => {
                warn!(request_id = %request.id(), "[runtime] Cook confirmed on the reputation surface");
                return;
            }
        }
        refresh(self.reconciler.as_ref()).await;
    }
}

/// Follows confirmed `cook` transactions.
pub struct PizzaConfirmation {
    account: Option<Address>,
    reconciler: Arc<Reconciler<PizzaBoxView>>,
    locator: Arc<dyn ObjectLocator>,
}

impl PizzaConfirmation {
    /// Handler feeding `reconciler` and `locator`.
    pub fn new(
        account: Option<Address>,
        reconciler: Arc<Reconciler<PizzaBoxView>>,
        locator: Arc<dyn ObjectLocator>,
    ) -> Self {
        Self {
            account,
            reconciler,
            locator,
        }
    }
}

#[async_trait]
impl ConfirmationHandler for PizzaConfirmation {
    async fn on_confirmed(&self, request: &ValidatedRequest, effects: &TransactionEffects) {
        let ValidatedAction::Cook { toppings } = request.action() else {
            warn!(request_id = %request.id(), "[runtime] Unexpected action on the pizza surface");
            return;
        };
        let Some(created) = effects.first_created() else {
            warn!(digest = %effects.digest, "[runtime] Cook created no box");
            return;
        };

        remember(self.locator.as_ref(), &created.object_id);
        let patch = CookPatch {
            object_id: created.object_id.clone(),
            owner: self.account.clone(),
            toppings: *toppings,
        };
        self.reconciler
            .apply_patch(&created.object_id, &patch, Some(created.version));
        refresh(self.reconciler.as_ref()).await;
    }
}

/// A locator failure never fails the confirmation.
fn remember(locator: &dyn ObjectLocator, object_id: &ObjectId) {
    if let Err(e) = locator.save(object_id) {
        warn!(object_id = %object_id, error = %e, "[runtime] Failed to remember object");
    }
}

async fn refresh<V: Projection>(reconciler: &Reconciler<V>) {
    // Errors are published on the reconciler's error channel.
    if let Err(e) = reconciler.refresh().await {
        debug!(error = %e, "[runtime] Post-confirmation refresh failed");
    }
}

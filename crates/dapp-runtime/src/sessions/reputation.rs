//! # Reputation Session
//!
//! One business dashboard: register, record revenue, resume after reload.

use std::sync::Arc;
use std::time::Instant;

use ld_01_transaction_builder::MutationRequest;
use ld_02_read_model::{BusinessView, HistoryEntry, Reconciler, RevenueHistory, ViewState};
use ld_03_mutation_coordinator::{MutationCoordinator, MutationOutcome};
use parking_lot::Mutex;
use shared_types::{Address, LedgerGateway, ObjectId};
use tracing::{debug, info};

use crate::container::RuntimeConfig;
use crate::errors::RuntimeError;
use crate::handlers::{record_submission, ReputationConfirmation};
use crate::ports::ObjectLocator;

/// Reputation app state for one connected account.
pub struct ReputationSession {
    account: Option<Address>,
    struct_type: String,
    gateway: Arc<dyn LedgerGateway>,
    coordinator: Arc<MutationCoordinator>,
    reconciler: Arc<Reconciler<BusinessView>>,
    locator: Arc<dyn ObjectLocator>,
    history: Arc<Mutex<RevenueHistory>>,
}

impl ReputationSession {
    /// Wire a session for `account` (`None` until a wallet connects).
    pub fn new(
        gateway: Arc<dyn LedgerGateway>,
        config: &RuntimeConfig,
        locator: Arc<dyn ObjectLocator>,
        account: Option<Address>,
    ) -> Result<Self, RuntimeError> {
        let struct_type = config
            .contract
            .reputation_struct_type()
            .ok_or(RuntimeError::ContractNotConfigured)?;

        let reconciler = Arc::new(Reconciler::new(
            Arc::clone(&gateway),
            config.reconciler.clone(),
            struct_type.clone(),
        ));
        let history = Arc::new(Mutex::new(RevenueHistory::default()));
        let handler = ReputationConfirmation::new(
            account.clone(),
            Arc::clone(&reconciler),
            Arc::clone(&locator),
            Arc::clone(&history),
        );
        let coordinator = Arc::new(
            MutationCoordinator::new(
                Arc::clone(&gateway),
                config.contract.clone(),
                config.coordinator.clone(),
            )
            .with_handler(Arc::new(handler)),
        );

        Ok(Self {
            account,
            struct_type,
            gateway,
            coordinator,
            reconciler,
            locator,
            history,
        })
    }

    /// Connected account.
    pub fn account(&self) -> Option<&Address> {
        self.account.as_ref()
    }

    /// Lifecycle of the registration and revenue forms.
    pub fn coordinator(&self) -> &Arc<MutationCoordinator> {
        &self.coordinator
    }

    /// Read model of the shown business.
    pub fn reconciler(&self) -> &Arc<Reconciler<BusinessView>> {
        &self.reconciler
    }

    /// Currently displayed business.
    pub fn view(&self) -> Option<ViewState<BusinessView>> {
        self.reconciler.current()
    }

    /// Revenue confirmed in this session, newest first.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.lock().entries().to_vec()
    }

    /// Id of the shown business.
    pub fn object_id(&self) -> Option<ObjectId> {
        self.reconciler.object_id()
    }

    /// Register a new business.
    pub async fn register(
        &self,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<MutationOutcome, RuntimeError> {
        self.submit(MutationRequest::register(name, category)).await
    }

    /// Record `amount` IDR of revenue against the shown business.
    pub async fn record_revenue(
        &self,
        amount: i64,
        description: impl Into<String>,
    ) -> Result<MutationOutcome, RuntimeError> {
        let business = self.object_id().ok_or(RuntimeError::NoBusiness)?;
        self.submit(MutationRequest::record_revenue(business, amount, description))
            .await
    }

    async fn submit(&self, request: MutationRequest) -> Result<MutationOutcome, RuntimeError> {
        let action = request.kind();
        let started = Instant::now();
        let result = self.coordinator.submit(request).await;
        record_submission(action, &result, started.elapsed());
        Ok(result?)
    }

    /// Find the business to show after a reload.
    ///
    /// The locator wins; otherwise the first business the account owns.
    /// Returns the id now tracked, if any.
    pub async fn resume(&self) -> Result<Option<ObjectId>, RuntimeError> {
        if let Some(object_id) = self.locator.load()? {
            debug!(object_id = %object_id, "[runtime] Resuming remembered business");
            self.reconciler.open(object_id.clone()).await?;
            return Ok(Some(object_id));
        }

        let Some(account) = &self.account else {
            return Ok(None);
        };
        let owned = self.gateway.owned_objects(account, &self.struct_type).await?;
        let Some(object) = owned.into_iter().next() else {
            debug!(account = %account.abbreviated(), "[runtime] Account has no business yet");
            return Ok(None);
        };

        info!(
            account = %account.abbreviated(),
            object_id = %object.object_id,
            "[runtime] Found business owned by account"
        );
        self.locator.save(&object.object_id)?;
        self.reconciler.open(object.object_id.clone()).await?;
        Ok(Some(object.object_id))
    }

    /// Forget the shown business and return the form to `Idle`.
    pub fn clear_object(&self) -> Result<(), RuntimeError> {
        self.coordinator.reset();
        self.reconciler.clear();
        self.history.lock().clear();
        self.locator.clear()?;
        Ok(())
    }

    /// Whether `address` owns the shown business. Case-insensitive.
    pub fn is_owner(&self, address: &str) -> bool {
        let Ok(address) = address.parse::<Address>() else {
            return false;
        };
        self.view()
            .map(|state| state.view.is_owned_by(&address))
            .unwrap_or(false)
    }
}

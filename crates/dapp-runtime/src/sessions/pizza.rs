//! Pizza session: cook a pizza, then show its box.

use std::sync::Arc;
use std::time::Instant;

use ld_01_transaction_builder::{MutationRequest, Topping, ToppingCounts};
use ld_02_read_model::{PizzaBoxView, Reconciler, RefreshOutcome, ToppingPosition, ViewState};
use ld_03_mutation_coordinator::{MutationCoordinator, MutationOutcome};
use shared_types::{Address, LedgerGateway, ObjectId};

use crate::container::RuntimeConfig;
use crate::errors::RuntimeError;
use crate::handlers::{record_submission, PizzaConfirmation};
use crate::ports::ObjectLocator;

/// Pizza app state for one connected account.
pub struct PizzaSession {
    coordinator: Arc<MutationCoordinator>,
    reconciler: Arc<Reconciler<PizzaBoxView>>,
    locator: Arc<dyn ObjectLocator>,
}

impl PizzaSession {
    /// Wire a session for `account`.
    pub fn new(
        gateway: Arc<dyn LedgerGateway>,
        config: &RuntimeConfig,
        locator: Arc<dyn ObjectLocator>,
        account: Option<Address>,
    ) -> Result<Self, RuntimeError> {
        let struct_type = config
            .contract
            .pizza_struct_type()
            .ok_or(RuntimeError::ContractNotConfigured)?;

        let reconciler = Arc::new(Reconciler::new(
            Arc::clone(&gateway),
            config.reconciler.clone(),
            struct_type,
        ));
        let handler = PizzaConfirmation::new(account, Arc::clone(&reconciler), Arc::clone(&locator));
        let coordinator = Arc::new(
            MutationCoordinator::new(gateway, config.contract.clone(), config.coordinator.clone())
                .with_handler(Arc::new(handler)),
        );

        Ok(Self {
            coordinator,
            reconciler,
            locator,
        })
    }

    /// Lifecycle of the cook button.
    pub fn coordinator(&self) -> &Arc<MutationCoordinator> {
        &self.coordinator
    }

    /// Read model of the shown box.
    pub fn reconciler(&self) -> &Arc<Reconciler<PizzaBoxView>> {
        &self.reconciler
    }

    /// Currently displayed box.
    pub fn view(&self) -> Option<ViewState<PizzaBoxView>> {
        self.reconciler.current()
    }

    /// Cook a pizza with `toppings`.
    pub async fn cook(&self, toppings: ToppingCounts) -> Result<MutationOutcome, RuntimeError> {
        let request = MutationRequest::cook(toppings);
        let action = request.kind();
        let started = Instant::now();
        let result = self.coordinator.submit(request).await;
        record_submission(action, &result, started.elapsed());
        Ok(result?)
    }

    /// Show an existing box and remember it.
    pub async fn open(&self, object_id: ObjectId) -> Result<RefreshOutcome, RuntimeError> {
        self.locator.save(&object_id)?;
        Ok(self.reconciler.open(object_id).await?)
    }

    /// Show the remembered box, if any.
    pub async fn resume(&self) -> Result<Option<ObjectId>, RuntimeError> {
        let Some(object_id) = self.locator.load()? else {
            return Ok(None);
        };
        self.reconciler.open(object_id.clone()).await?;
        Ok(Some(object_id))
    }

    /// Forget the shown box and return the button to `Idle`.
    pub fn clear_object(&self) -> Result<(), RuntimeError> {
        self.coordinator.reset();
        self.reconciler.clear();
        self.locator.clear()?;
        Ok(())
    }

    /// Glyph positions for the shown box.
    pub fn layout(&self) -> Option<Vec<(Topping, Vec<ToppingPosition>)>> {
        self.view().map(|state| state.view.layout())
    }
}

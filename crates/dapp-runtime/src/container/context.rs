//! # Dapp Context
//!
//! Explicitly constructed wiring for both apps: one gateway, two sessions,
//! their polling loops and error counters.
//!
//! ## Lifecycle
//!
//! 1. `DappContext::new` builds the sessions and spawns background tasks
//!    (must be called inside a tokio runtime)
//! 2. The view layer drives the sessions
//! 3. `shutdown` stops every task and waits for it

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use shared_types::{Address, LedgerGateway};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::config::RuntimeConfig;
use crate::adapters::{FileLocator, MemoryLocator};
use crate::errors::RuntimeError;
use crate::handlers::spawn_error_counter;
use crate::ports::ObjectLocator;
use crate::sessions::{PizzaSession, ReputationSession};

/// Runtime context for one connected account.
pub struct DappContext {
    config: RuntimeConfig,
    reputation: ReputationSession,
    pizza: PizzaSession,
    shutdown_tx: watch::Sender<bool>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl DappContext {
    /// Wire both sessions with locators chosen from `config`.
    pub fn new(
        gateway: Arc<dyn LedgerGateway>,
        config: RuntimeConfig,
        account: Option<Address>,
    ) -> Result<Self, RuntimeError> {
        let (reputation_locator, pizza_locator) = locators_for(config.locator_file.as_deref());
        Self::with_locators(gateway, config, account, reputation_locator, pizza_locator)
    }

    /// Wire both sessions with explicit locators.
    pub fn with_locators(
        gateway: Arc<dyn LedgerGateway>,
        config: RuntimeConfig,
        account: Option<Address>,
        reputation_locator: Arc<dyn ObjectLocator>,
        pizza_locator: Arc<dyn ObjectLocator>,
    ) -> Result<Self, RuntimeError> {
        let reputation = ReputationSession::new(
            Arc::clone(&gateway),
            &config,
            reputation_locator,
            account.clone(),
        )?;
        let pizza = PizzaSession::new(gateway, &config, pizza_locator, account.clone())?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let mut tasks = vec![
            spawn_error_counter(
                "business",
                reputation.reconciler().errors(),
                shutdown_rx.clone(),
            ),
            spawn_error_counter("pizza_box", pizza.reconciler().errors(), shutdown_rx.clone()),
        ];
        tasks.extend(reputation.reconciler().spawn_polling(shutdown_rx.clone()));
        tasks.extend(pizza.reconciler().spawn_polling(shutdown_rx));

        info!(
            account = ?account.as_ref().map(Address::abbreviated),
            package_id = ?config.contract.package_id.as_ref().map(|p| p.short()),
            poll_interval_ms = config.reconciler.poll_interval_ms,
            "[runtime] Context ready"
        );

        Ok(Self {
            config,
            reputation,
            pizza,
            shutdown_tx,
            tasks: Mutex::new(tasks),
        })
    }

    /// Configuration the context was built with.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Reputation app.
    pub fn reputation(&self) -> &ReputationSession {
        &self.reputation
    }

    /// Pizza app.
    pub fn pizza(&self) -> &PizzaSession {
        &self.pizza
    }

    /// Stop background tasks and wait for them.
    ///
    /// In-flight mutations are abandoned, not cancelled on the ledger.
    pub async fn shutdown(&self) {
        info!("[runtime] Shutting down");
        self.reputation.coordinator().reset();
        self.pizza.coordinator().reset();
        self.shutdown_tx.send_replace(true);

        let tasks = std::mem::take(&mut *self.tasks.lock());
        for task in tasks {
            if let Err(e) = task.await {
                warn!(error = %e, "[runtime] Background task ended abnormally");
            }
        }
        info!("[runtime] Shutdown complete");
    }
}

/// File-backed locators when a path is configured, in-memory otherwise.
/// The pizza box id goes next to the business id with a `.pizza` extension.
fn locators_for(path: Option<&Path>) -> (Arc<dyn ObjectLocator>, Arc<dyn ObjectLocator>) {
    match path {
        Some(path) => (
            Arc::new(FileLocator::new(path)),
            Arc::new(FileLocator::new(path.with_extension("pizza"))),
        ),
        None => (
            Arc::new(MemoryLocator::default()),
            Arc::new(MemoryLocator::default()),
        ),
    }
}

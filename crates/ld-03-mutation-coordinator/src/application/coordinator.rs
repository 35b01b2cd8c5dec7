//! # Mutation Coordinator
//!
//! Drives one mutation at a time through build, sign, submit and confirm,
//! and publishes every step on a `watch` channel.
//!
//! ## Single flight
//!
//! The busy check and the move to `Building` happen under one lock, so two
//! concurrent submits can never both start. Each run carries the generation
//! it started in; `reset` bumps the generation, turning every later write of
//! the abandoned run into a no-op. A transaction that was already broadcast
//! is not cancelled by a reset.

use std::sync::Arc;

use ld_01_transaction_builder::{build, ContractConfig, MutationRequest, ValidatedRequest};
use parking_lot::Mutex;
use shared_types::{ConfirmationError, Digest, ExecutionStatus, LedgerGateway, TransactionEffects};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::CoordinatorConfig;
use crate::domain::{
    CoordinatorSnapshot, FailureKind, LifecycleState, MutationError, SubmitError,
};
use crate::ports::ConfirmationHandler;

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Executed; the handler has run.
    Confirmed(TransactionEffects),
    /// Ended in `Failed`.
    Failed(MutationError),
    /// A reset happened while the run was in flight; its result was dropped.
    Abandoned,
}

impl MutationOutcome {
    /// Effects of a confirmed run.
    pub fn effects(&self) -> Option<&TransactionEffects> {
        match self {
            MutationOutcome::Confirmed(effects) => Some(effects),
            _ => None,
        }
    }
}

/// Coordinator for one UI surface.
pub struct MutationCoordinator {
    gateway: Arc<dyn LedgerGateway>,
    contract: ContractConfig,
    config: CoordinatorConfig,
    handler: Option<Arc<dyn ConfirmationHandler>>,
    /// Current run generation.
    generation: Mutex<u64>,
    state_tx: watch::Sender<CoordinatorSnapshot>,
}

impl MutationCoordinator {
    /// Create a coordinator with no confirmation handler.
    pub fn new(
        gateway: Arc<dyn LedgerGateway>,
        contract: ContractConfig,
        config: CoordinatorConfig,
    ) -> Self {
        let (state_tx, _) = watch::channel(CoordinatorSnapshot::default());
        Self {
            gateway,
            contract,
            config,
            handler: None,
            generation: Mutex::new(0),
            state_tx,
        }
    }

    /// Set the handler invoked after each confirmation.
    pub fn with_handler(mut self, handler: Arc<dyn ConfirmationHandler>) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Contract the coordinator builds against.
    pub fn contract(&self) -> &ContractConfig {
        &self.contract
    }

    /// Current state.
    pub fn snapshot(&self) -> CoordinatorSnapshot {
        self.state_tx.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<CoordinatorSnapshot> {
        self.state_tx.subscribe()
    }

    /// Run `request` to completion.
    ///
    /// Returns `Err` only when the request is refused up front (invalid or
    /// busy); every later failure is reported in the outcome and the
    /// snapshot.
    pub async fn submit(&self, request: MutationRequest) -> Result<MutationOutcome, SubmitError> {
        let (validated, generation) = self.begin(&request)?;
        Ok(self.run(validated, generation).await)
    }

    /// Validate synchronously and run the lifecycle on a task.
    pub fn spawn_submit(
        self: &Arc<Self>,
        request: MutationRequest,
    ) -> Result<JoinHandle<MutationOutcome>, SubmitError> {
        let (validated, generation) = self.begin(&request)?;
        let coordinator = Arc::clone(self);
        Ok(tokio::spawn(async move {
            coordinator.run(validated, generation).await
        }))
    }

    /// Return to `Idle`, abandoning any in-flight run.
    pub fn reset(&self) {
        let mut generation = self.generation.lock();
        *generation += 1;
        let previous = self.state_tx.send_replace(CoordinatorSnapshot::default());
        if previous.state.is_in_flight() {
            info!(
                state = %previous.state,
                digest = ?previous.digest.as_ref().map(Digest::as_str),
                "[ld-03] Reset abandoned in-flight mutation"
            );
        } else {
            debug!("[ld-03] Reset");
        }
    }

    fn begin(&self, request: &MutationRequest) -> Result<(ValidatedRequest, u64), SubmitError> {
        let mut generation = self.generation.lock();

        let state = self.state_tx.borrow().state;
        if state.is_in_flight() {
            debug!(request_id = %request.id, %state, "[ld-03] Refused: busy");
            return Err(SubmitError::Busy { state });
        }

        let validated = match request.validate() {
            Ok(validated) => validated,
            Err(e) => {
                info!(request_id = %request.id, error = %e, "[ld-03] Refused: invalid request");
                self.state_tx.send_replace(CoordinatorSnapshot {
                    state: LifecycleState::Idle,
                    error: Some(MutationError::Validation(e.clone())),
                    digest: None,
                    request_id: Some(request.id),
                    action: Some(request.kind()),
                });
                return Err(SubmitError::Validation(e));
            }
        };

        *generation += 1;
        self.state_tx.send_replace(CoordinatorSnapshot {
            state: LifecycleState::Building,
            error: None,
            digest: None,
            request_id: Some(request.id),
            action: Some(request.kind()),
        });
        info!(
            request_id = %request.id,
            action = request.kind().as_str(),
            "[ld-03] Mutation started"
        );
        Ok((validated, *generation))
    }

    async fn run(&self, request: ValidatedRequest, generation: u64) -> MutationOutcome {
        let payload = match build(&request, &self.contract) {
            Ok(payload) => payload,
            Err(e) => return self.fail(generation, e.into()),
        };

        if !self.advance(generation, LifecycleState::AwaitingSignature, None) {
            return MutationOutcome::Abandoned;
        }

        let digest = match self.gateway.submit(&payload).await {
            Ok(digest) => digest,
            Err(e) => return self.fail(generation, e.into()),
        };
        debug!(request_id = %request.id(), %digest, "[ld-03] Transaction broadcast");

        if !self.advance(generation, LifecycleState::Submitted, Some(digest.clone()))
            || !self.advance(generation, LifecycleState::Confirming, None)
        {
            return MutationOutcome::Abandoned;
        }

        let timeout = self.config.confirmation_timeout();
        let effects =
            match tokio::time::timeout(timeout, self.gateway.await_confirmation(&digest)).await {
                Err(_) => {
                    return self.fail(
                        generation,
                        MutationError::ConfirmationTimeout {
                            digest,
                            timeout_ms: self.config.confirmation_timeout_ms,
                        },
                    )
                }
                Ok(Err(ConfirmationError::Rejected(reason))) => {
                    return self.fail(generation, MutationError::LedgerRejected { digest, reason })
                }
                Ok(Err(source)) => {
                    return self.fail(generation, MutationError::Confirmation { digest, source })
                }
                Ok(Ok(effects)) => effects,
            };

        if let ExecutionStatus::Failure { error } = &effects.status {
            return self.fail(
                generation,
                MutationError::LedgerRejected {
                    digest,
                    reason: error.clone(),
                },
            );
        }

        if !self.advance(generation, LifecycleState::Confirmed, None) {
            return MutationOutcome::Abandoned;
        }
        info!(
            request_id = %request.id(),
            action = request.kind().as_str(),
            %digest,
            created = effects.created.len(),
            "[ld-03] Mutation confirmed"
        );

        if let Some(handler) = &self.handler {
            handler.on_confirmed(&request, &effects).await;
        }

        MutationOutcome::Confirmed(effects)
    }

    /// Move to `next` if `generation` is still current. `digest`, when
    /// given, is recorded alongside.
    fn advance(&self, generation: u64, next: LifecycleState, digest: Option<Digest>) -> bool {
        let current = self.generation.lock();
        if *current != generation {
            debug!(%next, "[ld-03] Dropping transition of abandoned run");
            return false;
        }

        let mut applied = true;
        self.state_tx.send_modify(|snapshot| {
            if !snapshot.state.can_transition_to(next) {
                warn!(from = %snapshot.state, to = %next, "[ld-03] Illegal transition");
                applied = false;
                return;
            }
            snapshot.state = next;
            if digest.is_some() {
                snapshot.digest = digest;
            }
        });
        applied
    }

    fn fail(&self, generation: u64, error: MutationError) -> MutationOutcome {
        let kind = match error.failure_kind() {
            Some(kind) => kind,
            None => return MutationOutcome::Failed(error),
        };

        let current = self.generation.lock();
        if *current != generation {
            debug!(kind = kind.as_str(), "[ld-03] Dropping failure of abandoned run");
            return MutationOutcome::Abandoned;
        }

        let mut snapshot = self.state_tx.borrow().clone();
        snapshot.state = LifecycleState::Failed(kind);
        if snapshot.digest.is_none() {
            snapshot.digest = error.digest().cloned();
        }
        snapshot.error = Some(error.clone());
        let request_id = snapshot.request_id;
        self.state_tx.send_replace(snapshot);

        match kind {
            FailureKind::UserRejected => {
                info!(?request_id, "[ld-03] Signature rejected by user")
            }
            _ => warn!(?request_id, kind = kind.as_str(), error = %error, "[ld-03] Mutation failed"),
        }
        MutationOutcome::Failed(error)
    }
}

//! # Read-Model Reconciler
//!
//! Keeps one view model in sync with one tracked ledger object.
//!
//! ## Version gating
//!
//! Snapshots arrive from three places: explicit refreshes after a
//! confirmation, the background poll, and `watch` itself. They can race,
//! so every snapshot is checked against what is displayed:
//!
//! - a snapshot older than the displayed authoritative version is dropped;
//! - while an optimistic patch awaits version `v`, snapshots below `v` are
//!   dropped, so a slow poll cannot roll the patch back;
//! - a snapshot taken for a previously tracked object is dropped.
//!
//! State lives behind a `parking_lot::Mutex` that is never held across an
//! `.await`; consumers observe it through `tokio::sync::watch` channels.

use std::sync::Arc;

use parking_lot::Mutex;
use shared_types::{LedgerGateway, LedgerObject, ObjectId};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::ReconcilerConfig;
use crate::domain::projection::same_struct_type;
use crate::domain::{OptimisticPatch, Projection, ReconcileError, SchemaError};

/// Where the displayed view came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Decoded from the ledger at `version`.
    Authoritative {
        /// Object version of the snapshot.
        version: u64,
    },
    /// Predicted locally; the ledger should reach `awaiting_version`.
    Optimistic {
        /// Version reported by the confirmation, when known.
        awaiting_version: Option<u64>,
    },
}

/// The displayed view and its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<V> {
    /// Object the view describes.
    pub object_id: ObjectId,
    /// The view model.
    pub view: V,
    /// Origin of the view.
    pub provenance: Provenance,
}

impl<V> ViewState<V> {
    /// Whether the view is a local prediction.
    pub fn is_optimistic(&self) -> bool {
        matches!(self.provenance, Provenance::Optimistic { .. })
    }
}

/// Result of one refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Nothing is being tracked.
    Idle,
    /// The snapshot replaced the displayed view.
    Applied {
        /// Version now displayed.
        version: u64,
    },
    /// The snapshot was older than what is displayed or awaited.
    Stale {
        /// Version fetched.
        fetched: u64,
        /// Version it lost to.
        displayed: u64,
    },
    /// Tracking switched objects while the fetch was in flight.
    Superseded,
}

#[derive(Debug, Default)]
struct Tracking {
    object_id: Option<ObjectId>,
    /// Bumped whenever `object_id` changes; in-flight fetches compare it.
    epoch: u64,
    authoritative_version: Option<u64>,
    awaiting_version: Option<u64>,
}

impl Tracking {
    fn switch_to(&mut self, object_id: Option<ObjectId>) {
        self.object_id = object_id;
        self.epoch += 1;
        self.authoritative_version = None;
        self.awaiting_version = None;
    }
}

/// Reconciler for view model `V`.
pub struct Reconciler<V: Projection> {
    gateway: Arc<dyn LedgerGateway>,
    config: ReconcilerConfig,
    /// Fully qualified struct type every tracked object must have.
    struct_type: String,
    tracking: Mutex<Tracking>,
    view_tx: watch::Sender<Option<ViewState<V>>>,
    error_tx: watch::Sender<Option<ReconcileError>>,
}

impl<V: Projection> Reconciler<V> {
    /// Create a reconciler for objects of `struct_type`.
    pub fn new(
        gateway: Arc<dyn LedgerGateway>,
        config: ReconcilerConfig,
        struct_type: impl Into<String>,
    ) -> Self {
        let (view_tx, _) = watch::channel(None);
        let (error_tx, _) = watch::channel(None);
        Self {
            gateway,
            config,
            struct_type: struct_type.into(),
            tracking: Mutex::new(Tracking::default()),
            view_tx,
            error_tx,
        }
    }

    /// Configuration.
    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    /// Struct type this reconciler accepts.
    pub fn struct_type(&self) -> &str {
        &self.struct_type
    }

    /// Currently tracked object.
    pub fn object_id(&self) -> Option<ObjectId> {
        self.tracking.lock().object_id.clone()
    }

    /// Start tracking `object_id`. Returns `false` if it was already tracked.
    pub fn watch(&self, object_id: ObjectId) -> bool {
        let mut tracking = self.tracking.lock();
        if tracking.object_id.as_ref() == Some(&object_id) {
            return false;
        }
        info!(object_id = %object_id, "[ld-02] Tracking object");
        tracking.switch_to(Some(object_id));
        self.view_tx.send_replace(None);
        self.error_tx.send_replace(None);
        true
    }

    /// Track `object_id` and, if configured, load it right away.
    pub async fn open(&self, object_id: ObjectId) -> Result<RefreshOutcome, ReconcileError> {
        let changed = self.watch(object_id);
        if changed && self.config.refresh_on_watch {
            self.refresh().await
        } else {
            Ok(RefreshOutcome::Idle)
        }
    }

    /// Stop tracking and drop the displayed view.
    pub fn clear(&self) {
        let mut tracking = self.tracking.lock();
        if let Some(id) = &tracking.object_id {
            info!(object_id = %id, "[ld-02] Cleared tracked object");
        }
        tracking.switch_to(None);
        self.view_tx.send_replace(None);
        self.error_tx.send_replace(None);
    }

    /// Displayed view.
    pub fn current(&self) -> Option<ViewState<V>> {
        self.view_tx.borrow().clone()
    }

    /// Most recent refresh failure, cleared by the next success.
    pub fn last_error(&self) -> Option<ReconcileError> {
        self.error_tx.borrow().clone()
    }

    /// Subscribe to view changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<ViewState<V>>> {
        self.view_tx.subscribe()
    }

    /// Subscribe to refresh failures.
    pub fn errors(&self) -> watch::Receiver<Option<ReconcileError>> {
        self.error_tx.subscribe()
    }

    /// Fetch the tracked object and display it unless it is stale.
    pub async fn refresh(&self) -> Result<RefreshOutcome, ReconcileError> {
        let (object_id, epoch) = {
            let tracking = self.tracking.lock();
            match &tracking.object_id {
                Some(id) => (id.clone(), tracking.epoch),
                None => return Ok(RefreshOutcome::Idle),
            }
        };

        let fetched = self.fetch(&object_id).await;

        let mut tracking = self.tracking.lock();
        if tracking.epoch != epoch {
            debug!(object_id = %object_id, "[ld-02] Dropping snapshot for superseded object");
            return Ok(RefreshOutcome::Superseded);
        }

        let (version, view) = match fetched {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(object_id = %object_id, error = %e, "[ld-02] Refresh failed");
                self.error_tx.send_replace(Some(e.clone()));
                return Err(e);
            }
        };

        let floor = tracking
            .authoritative_version
            .into_iter()
            .chain(tracking.awaiting_version)
            .max();
        if let Some(displayed) = floor {
            if version < displayed {
                debug!(
                    object_id = %object_id,
                    fetched = version,
                    displayed,
                    "[ld-02] Dropping stale snapshot"
                );
                return Ok(RefreshOutcome::Stale {
                    fetched: version,
                    displayed,
                });
            }
        }

        tracking.authoritative_version = Some(version);
        tracking.awaiting_version = None;
        self.view_tx.send_replace(Some(ViewState {
            object_id,
            view,
            provenance: Provenance::Authoritative { version },
        }));
        self.error_tx.send_replace(None);

        Ok(RefreshOutcome::Applied { version })
    }

    /// Display the prediction `patch` for `object_id`, tracking it if needed.
    ///
    /// `awaiting_version` is the object version reported by the confirmed
    /// transaction. Returns whether the patch was displayed.
    pub fn apply_patch(
        &self,
        object_id: &ObjectId,
        patch: &dyn OptimisticPatch<V>,
        awaiting_version: Option<u64>,
    ) -> bool {
        let mut tracking = self.tracking.lock();
        if tracking.object_id.as_ref() != Some(object_id) {
            info!(object_id = %object_id, "[ld-02] Tracking object from confirmation");
            tracking.switch_to(Some(object_id.clone()));
            self.view_tx.send_replace(None);
            self.error_tx.send_replace(None);
        }

        if let (Some(displayed), Some(awaited)) = (tracking.authoritative_version, awaiting_version)
        {
            if displayed >= awaited {
                debug!(
                    object_id = %object_id,
                    patch = patch.label(),
                    displayed,
                    "[ld-02] Ledger already reflects patch"
                );
                return false;
            }
        }

        // The borrow must end before `send_replace`.
        let current = self.view_tx.borrow().as_ref().map(|state| state.view.clone());
        let Some(view) = patch.apply(current.as_ref()) else {
            debug!(object_id = %object_id, patch = patch.label(), "[ld-02] Patch not applicable");
            return false;
        };

        if awaiting_version.is_some() {
            tracking.awaiting_version = awaiting_version;
        }
        debug!(
            object_id = %object_id,
            patch = patch.label(),
            awaiting_version,
            "[ld-02] Applied optimistic patch"
        );
        self.view_tx.send_replace(Some(ViewState {
            object_id: object_id.clone(),
            view,
            provenance: Provenance::Optimistic { awaiting_version },
        }));
        true
    }

    /// Refresh every poll interval until `shutdown` flips to `true`.
    ///
    /// Returns `None` when polling is disabled in the config.
    pub fn spawn_polling(
        self: &Arc<Self>,
        mut shutdown: watch::Receiver<bool>,
    ) -> Option<JoinHandle<()>> {
        let period = self.config.poll_interval()?;
        let reconciler = Arc::clone(self);

        Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            debug!(period_ms = period.as_millis() as u64, "[ld-02] Polling started");

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if reconciler.object_id().is_none() {
                            continue;
                        }
                        // Failures are already published on the error channel.
                        let _ = reconciler.refresh().await;
                    }
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            break;
                        }
                    }
                }
            }
            debug!("[ld-02] Polling stopped");
        }))
    }

    async fn fetch(&self, object_id: &ObjectId) -> Result<(u64, V), ReconcileError> {
        let object = self
            .gateway
            .fetch_object(object_id)
            .await?
            .ok_or_else(|| ReconcileError::NotFound(object_id.clone()))?;

        let view = self.decode(&object).map_err(|source| ReconcileError::Schema {
            object_id: object_id.clone(),
            source,
        })?;
        Ok((object.version, view))
    }

    fn decode(&self, object: &LedgerObject) -> Result<V, SchemaError> {
        let (type_tag, _) = object.move_fields().ok_or(SchemaError::NotAMoveObject)?;
        if !same_struct_type(&self.struct_type, type_tag) {
            return Err(SchemaError::UnexpectedType {
                expected: self.struct_type.clone(),
                found: type_tag.to_string(),
            });
        }
        V::decode(object)
    }
}

//! Bridges coordinator and reconciler outcomes into Prometheus counters.

use std::time::Duration;

use dapp_telemetry::metrics::{
    MUTATIONS_CONFIRMED, MUTATIONS_FAILED, MUTATIONS_REFUSED, MUTATIONS_SUBMITTED,
    MUTATION_DURATION, RECONCILE_ERRORS,
};
use ld_01_transaction_builder::ActionKind;
use ld_02_read_model::ReconcileError;
use ld_03_mutation_coordinator::{MutationOutcome, SubmitError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Count one `submit` call.
pub fn record_submission(
    action: ActionKind,
    result: &Result<MutationOutcome, SubmitError>,
    elapsed: Duration,
) {
    let action = action.as_str();
    let outcome = match result {
        Err(SubmitError::Busy { .. }) => {
            MUTATIONS_REFUSED.with_label_values(&[action, "busy"]).inc();
            return;
        }
        Err(SubmitError::Validation(_)) => {
            MUTATIONS_REFUSED
                .with_label_values(&[action, "validation"])
                .inc();
            return;
        }
        Ok(outcome) => outcome,
    };

    MUTATIONS_SUBMITTED.with_label_values(&[action]).inc();
    MUTATION_DURATION
        .with_label_values(&[action])
        .observe(elapsed.as_secs_f64());

    match outcome {
        MutationOutcome::Confirmed(_) => {
            MUTATIONS_CONFIRMED.with_label_values(&[action]).inc();
        }
        MutationOutcome::Failed(error) => {
            let kind = error.failure_kind().map_or("unknown", |k| k.as_str());
            MUTATIONS_FAILED.with_label_values(&[action, kind]).inc();
        }
        MutationOutcome::Abandoned => {
            MUTATIONS_FAILED.with_label_values(&[action, "abandoned"]).inc();
        }
    }
}

/// Count every error a reconciler publishes until `shutdown` flips.
pub fn spawn_error_counter(
    view: &'static str,
    mut errors: watch::Receiver<Option<ReconcileError>>,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                changed = errors.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let kind = errors.borrow_and_update().as_ref().map(ReconcileError::kind);
                    if let Some(kind) = kind {
                        RECONCILE_ERRORS.with_label_values(&[view, kind]).inc();
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        debug!(view, "[runtime] Error counter stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ld_03_mutation_coordinator::LifecycleState;

    #[test]
    fn test_busy_counts_as_refused() {
        let before = MUTATIONS_REFUSED.with_label_values(&["cook", "busy"]).get();
        record_submission(
            ActionKind::Cook,
            &Err(SubmitError::Busy {
                state: LifecycleState::Confirming,
            }),
            Duration::ZERO,
        );
        assert_eq!(
            MUTATIONS_REFUSED.with_label_values(&["cook", "busy"]).get(),
            before + 1
        );
    }

    #[test]
    fn test_abandoned_counts_as_failed() {
        let labels = ["register", "abandoned"];
        let before = MUTATIONS_FAILED.with_label_values(&labels).get();
        record_submission(
            ActionKind::Register,
            &Ok(MutationOutcome::Abandoned),
            Duration::from_millis(5),
        );
        assert_eq!(MUTATIONS_FAILED.with_label_values(&labels).get(), before + 1);
    }
}

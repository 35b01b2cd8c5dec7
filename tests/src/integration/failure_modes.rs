//! # Failure Modes
//!
//! Wallet rejection, ledger aborts, lost confirmations, busy coordinators,
//! read failures and polling, all through the real wiring.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use dapp_runtime::{DappContext, MemoryLocator, RuntimeError};
    use ld_01_transaction_builder::{MutationRequest, ToppingCounts};
    use ld_02_read_model::{ReconcileError, Tier};
    use ld_03_mutation_coordinator::{
        FailureKind, LifecycleState, MutationError, MutationOutcome, SubmitError,
    };
    use shared_ledger::Fault;
    use shared_types::{LedgerGateway, SubmissionError};
    use tokio::time::timeout;

    use crate::fixtures::{business_object, config, context, context_with, ledger, slow_ledger};

    async fn registered(context: &DappContext) {
        let outcome = context
            .reputation()
            .register("Kopi Senja", "F&B")
            .await
            .unwrap();
        assert!(matches!(outcome, MutationOutcome::Confirmed(_)));
    }

    fn failure(outcome: MutationOutcome) -> MutationError {
        match outcome {
            MutationOutcome::Failed(error) => error,
            other => panic!("expected failure, got {:?}", other),
        }
    }

    // =========================================================================
    // SUBMISSION
    // =========================================================================

    #[tokio::test]
    async fn test_user_rejection_is_a_normal_outcome() {
        let ledger = ledger();
        let context = context(&ledger);
        ledger.inject(Fault::RejectSignature);

        let error = failure(context.reputation().register("Kopi Senja", "F&B").await.unwrap());
        assert_eq!(error, MutationError::Submission(SubmissionError::UserRejected));
        assert_eq!(error.failure_kind(), Some(FailureKind::UserRejected));
        assert_eq!(ledger.transaction_count(), 0);
        assert!(context.reputation().object_id().is_none());
    }

    #[tokio::test]
    async fn test_retry_after_rejection() {
        let ledger = ledger();
        let context = context(&ledger);
        ledger.inject(Fault::WalletError("locked".into()));

        let error = failure(context.reputation().register("Kopi Senja", "F&B").await.unwrap());
        assert_eq!(error.failure_kind(), Some(FailureKind::WalletError));

        registered(&context).await;
        assert!(context.reputation().view().is_some());
    }

    #[tokio::test]
    async fn test_ledger_abort_leaves_view_untouched() {
        let ledger = ledger();
        let context = context(&ledger);
        registered(&context).await;
        ledger.inject(Fault::Abort("MoveAbort: EPaused".into()));

        let error = failure(
            context
                .reputation()
                .record_revenue(15_000_000, "")
                .await
                .unwrap(),
        );
        assert_eq!(error.failure_kind(), Some(FailureKind::LedgerRejected));
        assert!(error.digest().is_some());

        let view = context.reputation().view().unwrap().view;
        assert_eq!(view.revenue, 0);
        assert!(context.reputation().history().is_empty());
    }

    #[tokio::test]
    async fn test_negative_amount_is_refused_up_front() {
        let ledger = ledger();
        let context = context(&ledger);
        registered(&context).await;

        for amount in [0, -5_000] {
            let err = context
                .reputation()
                .record_revenue(amount, "")
                .await
                .unwrap_err();
            assert!(matches!(err, RuntimeError::Submit(SubmitError::Validation(_))));
        }
        assert_eq!(ledger.transaction_count(), 1);
    }

    // =========================================================================
    // CONFIRMATION
    // =========================================================================

    #[tokio::test]
    async fn test_timeout_keeps_object_and_digest() {
        let ledger = ledger();
        let context = context(&ledger);
        registered(&context).await;
        let id = context.reputation().object_id();
        ledger.inject(Fault::HangConfirmation);

        let error = failure(
            context
                .reputation()
                .record_revenue(15_000_000, "")
                .await
                .unwrap(),
        );
        assert!(matches!(error, MutationError::ConfirmationTimeout { .. }));
        let kind = error.failure_kind().unwrap();
        assert!(kind.outcome_unknown());

        let snapshot = context.reputation().coordinator().snapshot();
        assert_eq!(snapshot.state, LifecycleState::Failed(FailureKind::ConfirmationTimeout));
        assert!(snapshot.digest.is_some());
        assert_eq!(context.reputation().object_id(), id);

        // The transaction did execute; the next read shows it.
        context.reputation().reconciler().refresh().await.unwrap();
        assert_eq!(context.reputation().view().unwrap().view.tier(), Tier::Silver);
    }

    #[tokio::test]
    async fn test_confirmation_transport_error_is_distinct() {
        let ledger = ledger();
        let context = context(&ledger);
        ledger.inject(Fault::ConfirmTransport("rpc reset".into()));

        let error = failure(context.pizza().cook(ToppingCounts::default()).await.unwrap());
        assert_eq!(error.failure_kind(), Some(FailureKind::ConfirmationError));
        assert!(context.pizza().view().is_none());
    }

    // =========================================================================
    // SINGLE FLIGHT
    // =========================================================================

    #[tokio::test]
    async fn test_second_submit_while_in_flight_is_busy() {
        let ledger = slow_ledger(Duration::from_millis(50));
        let context = context(&ledger);

        let first = context
            .pizza()
            .coordinator()
            .spawn_submit(MutationRequest::cook(ToppingCounts::default()))
            .unwrap();

        let err = context
            .pizza()
            .cook(ToppingCounts::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RuntimeError::Submit(SubmitError::Busy { .. })));

        assert!(matches!(first.await.unwrap(), MutationOutcome::Confirmed(_)));
        assert_eq!(ledger.transaction_count(), 1);
    }

    #[tokio::test]
    async fn test_reset_abandons_in_flight_run() {
        let ledger = slow_ledger(Duration::from_millis(50));
        let context = context(&ledger);

        let run = context
            .pizza()
            .coordinator()
            .spawn_submit(MutationRequest::cook(ToppingCounts::default()))
            .unwrap();
        context.pizza().clear_object().unwrap();

        assert_eq!(run.await.unwrap(), MutationOutcome::Abandoned);
        assert_eq!(
            context.pizza().coordinator().snapshot().state,
            LifecycleState::Idle
        );
        assert!(context.pizza().view().is_none());
    }

    // =========================================================================
    // READS
    // =========================================================================

    #[tokio::test]
    async fn test_read_failure_keeps_object() {
        let ledger = ledger();
        let context = context(&ledger);
        registered(&context).await;
        let id = context.reputation().object_id();
        let errors = context.reputation().reconciler().errors();

        ledger.fail_next_read("connection refused");
        let err = context.reputation().reconciler().refresh().await.unwrap_err();
        assert!(err.is_transient());
        assert_eq!(context.reputation().object_id(), id);
        assert!(matches!(*errors.borrow(), Some(ReconcileError::Transport(_))));
        assert!(context.reputation().view().is_some());

        context.reputation().reconciler().refresh().await.unwrap();
        assert!(errors.borrow().is_none());
    }

    #[tokio::test]
    async fn test_registration_visible_before_ledger_catches_up() {
        let ledger = ledger();
        let context = context(&ledger);

        // The first read of a brand-new object finds nothing yet.
        ledger.lag_reads(1);
        registered(&context).await;

        let state = context.reputation().view().unwrap();
        assert!(state.is_optimistic());
        assert_eq!(state.view.name, "Kopi Senja");
        assert!(matches!(
            context.reputation().reconciler().last_error(),
            Some(ReconcileError::NotFound(_))
        ));

        context.reputation().reconciler().refresh().await.unwrap();
        assert!(!context.reputation().view().unwrap().is_optimistic());
    }

    #[tokio::test]
    async fn test_polling_picks_up_external_change() {
        let ledger = ledger();
        let mut config = config();
        config.reconciler.poll_interval_ms = 20;
        let context = context_with(&ledger, config, std::sync::Arc::new(MemoryLocator::default()));
        registered(&context).await;
        let id = context.reputation().object_id().unwrap();

        // Someone else's transaction lands on the ledger.
        ledger.insert_object(business_object(&id, 9, "Kopi Senja", 150_000_000));
        assert!(ledger.fetch_object(&id).await.unwrap().is_some());

        let mut views = context.reputation().reconciler().subscribe();
        let gold = timeout(Duration::from_secs(2), async {
            loop {
                let tier = views.borrow_and_update().as_ref().map(|s| s.view.tier());
                if tier == Some(Tier::Gold) {
                    return;
                }
                if views.changed().await.is_err() {
                    return;
                }
            }
        })
        .await;
        assert!(gold.is_ok());

        context.shutdown().await;
    }
}

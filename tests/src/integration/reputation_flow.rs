//! # Reputation Flow
//!
//! Register a business, record revenue, resume after reload.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use dapp_runtime::{DappContext, MemoryLocator, ObjectLocator, RuntimeError};
    use ld_02_read_model::{BusinessView, Milestone, Projection, Provenance, RefreshOutcome, Tier};
    use ld_03_mutation_coordinator::{LifecycleState, MutationOutcome};

    use crate::fixtures::{config, context, context_with, ledger, signer};

    async fn register(context: &DappContext) {
        let outcome = context
            .reputation()
            .register("Kopi Senja", "F&B")
            .await
            .unwrap();
        assert!(matches!(outcome, MutationOutcome::Confirmed(_)));
    }

    // =========================================================================
    // REGISTRATION
    // =========================================================================

    #[tokio::test]
    async fn test_register_shows_bronze_business() {
        let ledger = ledger();
        let context = context(&ledger);
        register(&context).await;

        let state = context.reputation().view().unwrap();
        assert_eq!(state.provenance, Provenance::Authoritative { version: 1 });
        let view = state.view;
        assert_eq!(view.name, "Kopi Senja");
        assert_eq!(view.category, "F&B");
        assert_eq!(view.revenue, 0);
        assert_eq!(view.tier(), Tier::Bronze);
        assert_eq!(view.trust_score(), "B-");
        assert_eq!(view.image_url, Tier::Bronze.image_url());
        assert_eq!(
            view.next_milestone().to_string(),
            "NEXT: SILVER (10.000.001 MORE)"
        );
        assert_eq!(
            context.reputation().coordinator().snapshot().state,
            LifecycleState::Confirmed
        );
    }

    #[tokio::test]
    async fn test_owner_check_ignores_case() {
        let ledger = ledger();
        let context = context(&ledger);
        register(&context).await;

        let upper = signer().as_str().to_uppercase();
        assert!(context.reputation().is_owner(&upper));
        assert!(!context.reputation().is_owner("0x1234"));
        assert!(!context.reputation().is_owner("not an address"));
    }

    #[tokio::test]
    async fn test_registration_remembers_object() {
        let ledger = ledger();
        let locator = Arc::new(MemoryLocator::default());
        let context = context_with(&ledger, config(), locator.clone());
        register(&context).await;

        assert_eq!(locator.load().unwrap(), context.reputation().object_id());
    }

    // =========================================================================
    // REVENUE
    // =========================================================================

    #[tokio::test]
    async fn test_revenue_promotes_to_silver() {
        let ledger = ledger();
        let context = context(&ledger);
        register(&context).await;

        let outcome = context
            .reputation()
            .record_revenue(15_000_000, "Catering order")
            .await
            .unwrap();
        assert!(matches!(outcome, MutationOutcome::Confirmed(_)));

        let state = context.reputation().view().unwrap();
        assert_eq!(state.provenance, Provenance::Authoritative { version: 2 });
        let view = state.view;
        assert_eq!(view.revenue, 15_000_000);
        assert_eq!(view.tier(), Tier::Silver);
        assert_eq!(view.trust_score(), "BBB");
        assert_eq!(
            view.next_milestone(),
            Milestone::Next {
                tier: Tier::Gold,
                remaining: 85_000_001
            }
        );

        let history = context.reputation().history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].description, "Catering order");
        assert_eq!(history[0].amount, 15_000_000);
    }

    #[tokio::test]
    async fn test_history_is_newest_first() {
        let ledger = ledger();
        let context = context(&ledger);
        register(&context).await;

        let session = context.reputation();
        session.record_revenue(1_000, "first").await.unwrap();
        session.record_revenue(2_000, "").await.unwrap();

        assert_eq!(session.view().unwrap().view.revenue, 3_000);
        let history = session.history();
        let labels: Vec<_> = history.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(labels, vec!["Revenue", "first"]);
    }

    #[tokio::test]
    async fn test_optimistic_then_authoritative() {
        let ledger = ledger();
        let context = context(&ledger);
        register(&context).await;

        // The read right after confirmation still sees version 1.
        ledger.lag_reads(1);
        context
            .reputation()
            .record_revenue(15_000_000, "Catering order")
            .await
            .unwrap();

        let state = context.reputation().view().unwrap();
        assert_eq!(
            state.provenance,
            Provenance::Optimistic {
                awaiting_version: Some(2)
            }
        );
        assert_eq!(state.view.tier(), Tier::Silver);

        let outcome = context.reputation().reconciler().refresh().await.unwrap();
        assert_eq!(outcome, RefreshOutcome::Applied { version: 2 });
        let state = context.reputation().view().unwrap();
        assert!(!state.is_optimistic());
        assert_eq!(state.view.revenue, 15_000_000);

        // Nothing but the ledger object is left on display.
        let object = ledger.object(&state.object_id).unwrap();
        assert_eq!(state.view, BusinessView::decode(&object).unwrap());
        assert_eq!(context.reputation().history().len(), 1);
    }

    #[tokio::test]
    async fn test_revenue_without_business_is_refused() {
        let ledger = ledger();
        let context = context(&ledger);

        let err = context
            .reputation()
            .record_revenue(5_000, "")
            .await
            .unwrap_err();
        assert!(matches!(err, RuntimeError::NoBusiness));
        assert_eq!(ledger.transaction_count(), 0);
    }

    // =========================================================================
    // RESUME / CLEAR
    // =========================================================================

    #[tokio::test]
    async fn test_resume_from_locator() {
        let ledger = ledger();
        let locator = Arc::new(MemoryLocator::default());
        let first = context_with(&ledger, config(), locator.clone());
        register(&first).await;
        let id = first.reputation().object_id();

        let reloaded = context_with(&ledger, config(), locator);
        assert_eq!(reloaded.reputation().resume().await.unwrap(), id);
        assert_eq!(reloaded.reputation().view().unwrap().view.name, "Kopi Senja");
    }

    #[tokio::test]
    async fn test_resume_finds_owned_business() {
        let ledger = ledger();
        let first = context(&ledger);
        register(&first).await;
        let id = first.reputation().object_id();

        let locator = Arc::new(MemoryLocator::default());
        let reloaded = context_with(&ledger, config(), locator.clone());
        assert_eq!(reloaded.reputation().resume().await.unwrap(), id);
        assert_eq!(locator.load().unwrap(), id);
    }

    #[tokio::test]
    async fn test_resume_with_nothing_owned() {
        let ledger = ledger();
        let context = context(&ledger);
        assert_eq!(context.reputation().resume().await.unwrap(), None);
        assert!(context.reputation().view().is_none());
    }

    #[tokio::test]
    async fn test_clear_object_forgets_everything() {
        let ledger = ledger();
        let locator = Arc::new(MemoryLocator::default());
        let context = context_with(&ledger, config(), locator.clone());
        register(&context).await;
        context
            .reputation()
            .record_revenue(1_000, "Sales")
            .await
            .unwrap();

        context.reputation().clear_object().unwrap();

        assert!(context.reputation().object_id().is_none());
        assert!(context.reputation().view().is_none());
        assert!(context.reputation().history().is_empty());
        assert!(locator.load().unwrap().is_none());
        assert_eq!(
            context.reputation().coordinator().snapshot().state,
            LifecycleState::Idle
        );
    }
}

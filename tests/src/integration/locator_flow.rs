//! # Locator Flow
//!
//! Reload through `LD_LOCATOR_FILE`: a new context finds the business and
//! the pizza box the previous one remembered on disk.

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use dapp_runtime::{DappContext, RuntimeConfig};
    use ld_01_transaction_builder::ToppingCounts;
    use ld_02_read_model::Tier;
    use ld_03_mutation_coordinator::MutationOutcome;
    use shared_ledger::InMemoryLedger;

    use crate::fixtures::{config, ledger, signer};

    fn file_config(path: &Path) -> RuntimeConfig {
        let mut config = config();
        config.locator_file = Some(path.to_path_buf());
        config
    }

    /// Context without a connected account, so only the files can resume.
    fn anonymous(ledger: &Arc<InMemoryLedger>, path: &Path) -> DappContext {
        DappContext::new(ledger.clone(), file_config(path), None).unwrap()
    }

    #[tokio::test]
    async fn test_reload_resumes_from_locator_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session").join("business");
        let ledger = ledger();

        let first = DappContext::new(ledger.clone(), file_config(&path), Some(signer())).unwrap();
        let registered = first
            .reputation()
            .register("Kopi Senja", "F&B")
            .await
            .unwrap();
        assert!(matches!(registered, MutationOutcome::Confirmed(_)));
        first
            .reputation()
            .record_revenue(15_000_000, "Catering order")
            .await
            .unwrap();
        let mut toppings = ToppingCounts::default();
        toppings.cheese = 4;
        first.pizza().cook(toppings).await.unwrap();

        let business_id = first.reputation().object_id().unwrap();
        let box_id = first.pizza().view().unwrap().object_id;
        first.shutdown().await;

        assert!(path.exists());
        assert!(path.with_extension("pizza").exists());

        let second = anonymous(&ledger, &path);
        assert_eq!(second.reputation().resume().await.unwrap(), Some(business_id));
        assert_eq!(second.pizza().resume().await.unwrap(), Some(box_id));

        let business = second.reputation().view().unwrap().view;
        assert_eq!(business.tier(), Tier::Silver);
        // History belongs to the session that recorded it.
        assert!(second.reputation().history().is_empty());
        assert_eq!(second.pizza().view().unwrap().view.toppings.cheese, 4);
        second.shutdown().await;
    }

    #[tokio::test]
    async fn test_cleared_business_is_not_resumed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("business");
        let ledger = ledger();

        let first = DappContext::new(ledger.clone(), file_config(&path), Some(signer())).unwrap();
        first
            .reputation()
            .register("Kopi Senja", "F&B")
            .await
            .unwrap();
        first.reputation().clear_object().unwrap();
        first.shutdown().await;
        assert!(!path.exists());

        let second = anonymous(&ledger, &path);
        assert_eq!(second.reputation().resume().await.unwrap(), None);
        assert!(second.reputation().view().is_none());
        second.shutdown().await;
    }
}

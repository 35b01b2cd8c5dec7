//! # Pizza Flow
//!
//! Cook a pizza, show its box, lay out the toppings.

#[cfg(test)]
mod tests {
    use dapp_runtime::RuntimeError;
    use ld_01_transaction_builder::{Topping, ToppingCounts, ValidationError};
    use ld_02_read_model::{pizza_layout, Provenance, MAX_LAYOUT_TOPPINGS};
    use ld_03_mutation_coordinator::{LifecycleState, MutationError, MutationOutcome, SubmitError};

    use crate::fixtures::{context, ledger, signer};

    fn toppings(counts: [u32; 5]) -> ToppingCounts {
        let mut toppings = ToppingCounts::default();
        for (topping, count) in Topping::ALL.into_iter().zip(counts) {
            toppings.set(topping, count);
        }
        toppings
    }

    #[tokio::test]
    async fn test_cook_shows_box() {
        let ledger = ledger();
        let context = context(&ledger);
        let requested = toppings([8, 0, 12, 1, 30]);

        let outcome = context.pizza().cook(requested).await.unwrap();
        let effects = outcome.effects().unwrap().clone();

        let state = context.pizza().view().unwrap();
        assert_eq!(state.object_id, effects.first_created().unwrap().object_id);
        assert_eq!(state.provenance, Provenance::Authoritative { version: 1 });
        assert_eq!(state.view.toppings, requested);
        assert_eq!(state.view.owner, Some(signer()));
    }

    #[tokio::test]
    async fn test_layout_matches_generator() {
        let ledger = ledger();
        let context = context(&ledger);
        let requested = toppings([3, 5, 30, 0, 2]);
        context.pizza().cook(requested).await.unwrap();

        let layout = context.pizza().layout().unwrap();
        assert_eq!(layout, pizza_layout(&requested));
        let glyphs: usize = layout.iter().map(|(_, g)| g.len()).sum();
        assert_eq!(glyphs, 40);
        assert!(layout.iter().all(|(_, g)| g.len() <= MAX_LAYOUT_TOPPINGS as usize));
    }

    #[tokio::test]
    async fn test_open_existing_box_in_new_context() {
        let ledger = ledger();
        let first = context(&ledger);
        let requested = toppings([1, 2, 3, 4, 5]);
        first.pizza().cook(requested).await.unwrap();
        let id = first.pizza().view().unwrap().object_id;

        let second = context(&ledger);
        second.pizza().open(id.clone()).await.unwrap();
        assert_eq!(second.pizza().view().unwrap().view.toppings, requested);
        assert_eq!(second.pizza().resume().await.unwrap(), Some(id));
    }

    #[tokio::test]
    async fn test_topping_over_limit_never_reaches_ledger() {
        let ledger = ledger();
        let context = context(&ledger);

        let err = context
            .pizza()
            .cook(toppings([0, 0, 31, 0, 0]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::Submit(SubmitError::Validation(ValidationError::ToppingOutOfRange { .. }))
        ));
        assert_eq!(ledger.transaction_count(), 0);

        let snapshot = context.pizza().coordinator().snapshot();
        assert_eq!(snapshot.state, LifecycleState::Idle);
        assert!(matches!(snapshot.error, Some(MutationError::Validation(_))));
    }

    #[tokio::test]
    async fn test_empty_pizza_is_fine() {
        let ledger = ledger();
        let context = context(&ledger);

        let outcome = context.pizza().cook(ToppingCounts::default()).await.unwrap();
        assert!(matches!(outcome, MutationOutcome::Confirmed(_)));
        let layout = context.pizza().layout().unwrap();
        assert!(layout.iter().all(|(_, glyphs)| glyphs.is_empty()));
    }

    #[tokio::test]
    async fn test_clear_object_then_cook_again() {
        let ledger = ledger();
        let context = context(&ledger);
        context.pizza().cook(toppings([1, 1, 1, 1, 1])).await.unwrap();
        let first = context.pizza().view().unwrap().object_id;

        context.pizza().clear_object().unwrap();
        assert!(context.pizza().view().is_none());

        context.pizza().cook(toppings([2, 2, 2, 2, 2])).await.unwrap();
        assert_ne!(context.pizza().view().unwrap().object_id, first);
    }
}

//! # Optimistic Patches
//!
//! Local predictions of what a confirmed transaction did, shown until the
//! next authoritative snapshot replaces them.

use ld_01_transaction_builder::ToppingCounts;
use shared_types::{Address, ObjectId};

use super::view_models::{BusinessView, PizzaBoxView};
use crate::algorithms::Tier;

/// A prediction of the post-transaction view.
pub trait OptimisticPatch<V>: Send + Sync {
    /// Predicted view given the one currently displayed. `None` means the
    /// patch does not apply (e.g. a revenue patch with nothing displayed).
    fn apply(&self, current: Option<&V>) -> Option<V>;

    /// Short label for logs.
    fn label(&self) -> &'static str;
}

/// A business was just registered.
#[derive(Debug, Clone)]
pub struct RegistrationPatch {
    /// Created object.
    pub object_id: ObjectId,
    /// Signing account.
    pub owner: Option<Address>,
    /// Submitted name.
    pub name: String,
    /// Submitted category.
    pub category: String,
}

impl OptimisticPatch<BusinessView> for RegistrationPatch {
    fn apply(&self, _current: Option<&BusinessView>) -> Option<BusinessView> {
        Some(BusinessView::registered(
            self.object_id.clone(),
            self.owner.clone(),
            self.name.clone(),
            self.category.clone(),
        ))
    }

    fn label(&self) -> &'static str {
        "registration"
    }
}

/// Revenue was recorded against the displayed business.
#[derive(Debug, Clone)]
pub struct RevenuePatch {
    /// Amount added.
    pub amount: u64,
}

impl OptimisticPatch<BusinessView> for RevenuePatch {
    fn apply(&self, current: Option<&BusinessView>) -> Option<BusinessView> {
        let mut view = current?.clone();
        view.revenue = view.revenue.saturating_add(self.amount);
        view.image_url = Tier::for_revenue(view.revenue).image_url().to_string();
        Some(view)
    }

    fn label(&self) -> &'static str {
        "revenue"
    }
}

/// A pizza was just cooked into a new box.
#[derive(Debug, Clone)]
pub struct CookPatch {
    /// Created box.
    pub object_id: ObjectId,
    /// Signing account.
    pub owner: Option<Address>,
    /// Submitted toppings.
    pub toppings: ToppingCounts,
}

impl OptimisticPatch<PizzaBoxView> for CookPatch {
    fn apply(&self, _current: Option<&PizzaBoxView>) -> Option<PizzaBoxView> {
        Some(PizzaBoxView {
            object_id: self.object_id.clone(),
            owner: self.owner.clone(),
            toppings: self.toppings,
        })
    }

    fn label(&self) -> &'static str {
        "cook"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn business(revenue: u64) -> BusinessView {
        let mut view = BusinessView::registered(ObjectId::from_bytes([1; 32]), None, "A", "B");
        view.revenue = revenue;
        view
    }

    fn revenue(amount: u64) -> RevenuePatch {
        RevenuePatch { amount }
    }

    #[test]
    fn test_registration_starts_bronze() {
        let patch = RegistrationPatch {
            object_id: ObjectId::from_bytes([2; 32]),
            owner: None,
            name: "Kopi Senja".to_string(),
            category: "F&B".to_string(),
        };
        let view = patch.apply(None).unwrap();
        assert_eq!(view.revenue, 0);
        assert_eq!(view.tier(), Tier::Bronze);
        assert_eq!(view.name, "Kopi Senja");
    }

    #[test]
    fn test_revenue_patch_promotes_tier_and_artwork() {
        let view = revenue(15_000_000).apply(Some(&business(0))).unwrap();
        assert_eq!(view.revenue, 15_000_000);
        assert_eq!(view.tier(), Tier::Silver);
        assert_eq!(view.image_url, Tier::Silver.image_url());
    }

    #[test]
    fn test_revenue_patch_exact_threshold_stays_bronze() {
        let view = revenue(10_000_000).apply(Some(&business(0))).unwrap();
        assert_eq!(view.tier(), Tier::Bronze);
    }

    #[test]
    fn test_revenue_patch_needs_a_view() {
        assert!(revenue(1).apply(None).is_none());
    }

    #[test]
    fn test_revenue_patches_accumulate() {
        let first = revenue(1).apply(Some(&business(0))).unwrap();
        let second = revenue(2).apply(Some(&first)).unwrap();
        assert_eq!(second.revenue, 3);
        assert_eq!(second.name, "A");
    }
}

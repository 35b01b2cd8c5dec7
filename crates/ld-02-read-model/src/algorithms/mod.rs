//! Pure derivations used by the view models.

pub mod lenders;
pub mod tier;
pub mod topping_layout;

pub use lenders::{eligible_lenders, Lender, LENDERS};
pub use tier::{
    format_idr, next_milestone, progress_percent, Milestone, Tier, GOLD_THRESHOLD,
    SILVER_THRESHOLD,
};
pub use topping_layout::{pizza_layout, topping_positions, ToppingPosition, MAX_LAYOUT_TOPPINGS};

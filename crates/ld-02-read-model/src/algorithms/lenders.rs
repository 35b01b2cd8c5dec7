//! Lending partners and the tier each one requires.

use serde::Serialize;

use super::tier::Tier;

/// A lending partner listed on the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Lender {
    /// Catalog id.
    pub id: u32,
    /// Partner name.
    pub name: &'static str,
    /// One-line pitch.
    pub description: &'static str,
    /// Lowest tier the partner lends to.
    pub required_tier: Tier,
    /// Minimum transactions per day.
    pub min_daily_transactions: u32,
    /// Largest loan offered, in IDR.
    pub max_loan: u64,
}

/// Partner catalog in display order.
pub const LENDERS: [Lender; 4] = [
    Lender {
        id: 1,
        name: "Bank Rakyat Digital",
        description: "Working capital for fast-growing small businesses.",
        required_tier: Tier::Silver,
        min_daily_transactions: 20,
        max_loan: 500_000_000,
    },
    Lender {
        id: 2,
        name: "Ventura Kilat",
        description: "Fast disbursement for urgent needs.",
        required_tier: Tier::Bronze,
        min_daily_transactions: 5,
        max_loan: 50_000_000,
    },
    Lender {
        id: 3,
        name: "Mega Investama",
        description: "Strategic partner for large-scale expansion.",
        required_tier: Tier::Gold,
        min_daily_transactions: 50,
        max_loan: 2_000_000_000,
    },
    Lender {
        id: 4,
        name: "Koperasi Warga",
        description: "Low interest, from the community for the community.",
        required_tier: Tier::Bronze,
        min_daily_transactions: 2,
        max_loan: 10_000_000,
    },
];

/// Partners whose tier requirement `tier` meets.
pub fn eligible_lenders(tier: Tier) -> impl Iterator<Item = &'static Lender> {
    LENDERS.iter().filter(move |lender| tier >= lender.required_tier)
}

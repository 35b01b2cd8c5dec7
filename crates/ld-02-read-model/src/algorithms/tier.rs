//! # Tier Rules
//!
//! Everything the reputation dashboard derives from cumulative revenue.
//! Tier is never read from the ledger; it is recomputed from revenue so the
//! two cannot disagree.
//!
//! Thresholds are exclusive: a business must exceed 10,000,000 IDR to be
//! Silver and 100,000,000 IDR to be Gold. Milestones use the same boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Revenue a business must exceed to reach Silver.
pub const SILVER_THRESHOLD: u64 = 10_000_000;

/// Revenue a business must exceed to reach Gold.
pub const GOLD_THRESHOLD: u64 = 100_000_000;

/// Reputation tier, ordered Bronze < Silver < Gold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// Entry tier.
    Bronze,
    /// Revenue above 10,000,000.
    Silver,
    /// Revenue above 100,000,000.
    Gold,
}

impl Tier {
    /// Tier for a cumulative revenue.
    pub fn for_revenue(revenue: u64) -> Self {
        if revenue > GOLD_THRESHOLD {
            Tier::Gold
        } else if revenue > SILVER_THRESHOLD {
            Tier::Silver
        } else {
            Tier::Bronze
        }
    }

    /// Display name.
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Bronze => "Bronze",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
        }
    }

    /// The tier above this one.
    pub fn next(self) -> Option<Tier> {
        match self {
            Tier::Bronze => Some(Tier::Silver),
            Tier::Silver => Some(Tier::Gold),
            Tier::Gold => None,
        }
    }

    /// Revenue that must be exceeded to hold this tier.
    pub fn threshold(self) -> Option<u64> {
        match self {
            Tier::Bronze => None,
            Tier::Silver => Some(SILVER_THRESHOLD),
            Tier::Gold => Some(GOLD_THRESHOLD),
        }
    }

    /// Lender-facing trust score.
    pub fn trust_score(self) -> &'static str {
        match self {
            Tier::Gold => "AAA",
            Tier::Silver => "BBB",
            Tier::Bronze => "B-",
        }
    }

    /// Badge artwork shown on the dashboard.
    pub fn image_url(self) -> &'static str {
        match self {
            Tier::Bronze => "https://cdn-icons-png.flaticon.com/128/14458/14458082.png",
            Tier::Silver => "https://cdn-icons-png.flaticon.com/128/14457/14457452.png",
            Tier::Gold => "https://cdn-icons-png.flaticon.com/128/14458/14458116.png",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Distance to the next tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    /// `remaining` more revenue reaches `tier`.
    Next {
        /// Tier to reach.
        tier: Tier,
        /// Smallest additional revenue that crosses the threshold.
        remaining: u64,
    },
    /// Already Gold.
    MaxReached,
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Milestone::Next { tier, remaining } => write!(
                f,
                "NEXT: {} ({} MORE)",
                tier.as_str().to_uppercase(),
                format_idr(*remaining)
            ),
            Milestone::MaxReached => f.write_str("MAX POWER REACHED!"),
        }
    }
}

/// Next milestone for a revenue.
pub fn next_milestone(revenue: u64) -> Milestone {
    let current = Tier::for_revenue(revenue);
    match current.next() {
        Some(tier) => {
            let threshold = tier.threshold().unwrap_or(0);
            Milestone::Next {
                tier,
                remaining: (threshold + 1).saturating_sub(revenue),
            }
        }
        None => Milestone::MaxReached,
    }
}

/// Progress bar fill towards Gold, 0.0..=100.0.
///
/// Measured against the first Gold revenue, so the bar is full exactly when
/// the tier is.
pub fn progress_percent(revenue: u64) -> f64 {
    match Tier::for_revenue(revenue) {
        Tier::Gold => 100.0,
        _ => revenue as f64 / (GOLD_THRESHOLD + 1) as f64 * 100.0,
    }
}

/// Group digits with `.` as the Indonesian locale does (`15.000.000`).
pub fn format_idr(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

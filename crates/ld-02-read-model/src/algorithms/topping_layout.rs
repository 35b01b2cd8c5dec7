//! # Topping Layout
//!
//! Deterministic placement of topping glyphs on the pizza. Every client
//! renders the same box identically, so the positions are a pure function
//! of `(count, seed)` with no randomness.
//!
//! For glyph `i`:
//!
//! ```text
//! angle  = ((seed * 137.5 + i * 47) mod 360) degrees
//! radius = 20 + ((seed * 13 + i * 17) mod 45)
//! x, y   = 100 + radius * cos(angle), 100 + radius * sin(angle)
//! size   = 6 + (i mod 3) * 2
//! ```

use std::f64::consts::PI;

use ld_01_transaction_builder::{Topping, ToppingCounts};
use serde::Serialize;

/// Glyphs drawn per topping kind; larger counts are truncated.
pub const MAX_LAYOUT_TOPPINGS: u32 = 30;

/// Centre of the 200x200 pizza canvas.
pub const CANVAS_CENTER: f64 = 100.0;

/// Radius of the sauce disc; every glyph fits inside it.
pub const SAUCE_RADIUS: f64 = 78.0;

/// Canvas position and size of one glyph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ToppingPosition {
    /// Horizontal canvas coordinate.
    pub x: f64,
    /// Vertical canvas coordinate.
    pub y: f64,
    /// Glyph radius.
    pub r: f64,
}

/// Positions for `count` glyphs of the topping seeded with `seed`.
pub fn topping_positions(count: u32, seed: u32) -> Vec<ToppingPosition> {
    let count = count.min(MAX_LAYOUT_TOPPINGS);
    let seed = u64::from(seed);

    (0..u64::from(count))
        .map(|i| {
            let degrees = (seed as f64 * 137.5 + i as f64 * 47.0) % 360.0;
            let angle = degrees * PI / 180.0;
            let radius = 20.0 + ((seed * 13 + i * 17) % 45) as f64;
            ToppingPosition {
                x: CANVAS_CENTER + angle.cos() * radius,
                y: CANVAS_CENTER + angle.sin() * radius,
                r: 6.0 + ((i % 3) * 2) as f64,
            }
        })
        .collect()
}

/// Layout for a whole pizza, in render order.
pub fn pizza_layout(toppings: &ToppingCounts) -> Vec<(Topping, Vec<ToppingPosition>)> {
    toppings
        .iter()
        .map(|(topping, count)| (topping, topping_positions(count, topping.layout_seed())))
        .collect()
}

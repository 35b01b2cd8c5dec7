//! # Domain Invariants
//!
//! Input constraints the contracts enforce on-chain, checked locally first so
//! that invalid requests never reach the wallet.

use super::errors::ValidationError;
use super::requests::Topping;

/// Upper bound for each topping count (inclusive).
pub const MAX_TOPPING_COUNT: u32 = 30;

/// Longest accepted business name, in characters.
pub const MAX_NAME_LEN: usize = 64;

/// Longest accepted business category, in characters.
pub const MAX_CATEGORY_LEN: usize = 64;

/// Longest accepted revenue note, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 140;

/// Invariant: text fields passed to the contract are non-empty.
pub fn invariant_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(())
}

/// Invariant: text fields stay within their length limit.
pub fn invariant_bounded_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::FieldTooLong { field, max, got: len });
    }
    Ok(())
}

/// Invariant: revenue amounts are strictly positive.
///
/// Returns the amount in the contract's unsigned width.
pub fn invariant_amount_positive(amount: i64) -> Result<u64, ValidationError> {
    if amount <= 0 {
        return Err(ValidationError::NonPositiveAmount(amount));
    }
    Ok(amount.unsigned_abs())
}

/// Invariant: topping counts are within 0..=30.
pub fn invariant_topping_in_range(topping: Topping, count: u32) -> Result<(), ValidationError> {
    if count > MAX_TOPPING_COUNT {
        return Err(ValidationError::ToppingOutOfRange { topping, count });
    }
    Ok(())
}

/// Parse a topping count typed into the form. Empty input is rejected, the
/// cook button stays disabled until all five fields hold numbers.
pub fn parse_topping_input(topping: Topping, input: &str) -> Result<u32, ValidationError> {
    let trimmed = input.trim();
    let count: u32 = trimmed.parse().map_err(|_| ValidationError::InvalidNumber {
        field: topping.field_name(),
        input: input.to_string(),
    })?;
    invariant_topping_in_range(topping, count)?;
    Ok(count)
}

/// Parse a revenue amount typed into the form.
pub fn parse_amount_input(input: &str) -> Result<i64, ValidationError> {
    input
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidNumber {
            field: "amount",
            input: input.to_string(),
        })
}

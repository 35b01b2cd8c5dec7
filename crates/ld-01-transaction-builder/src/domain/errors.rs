//! # Domain Errors
//!
//! Error types for request validation and payload construction.

use thiserror::Error;

use super::requests::Topping;

/// A request failed local constraint checks. User-correctable; never reaches
/// the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Required text field is blank.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Field name as shown in the form.
        field: &'static str,
    },

    /// Text field over its limit.
    #[error("{field} is too long: {got} > {max} characters")]
    FieldTooLong {
        /// Field name.
        field: &'static str,
        /// Limit.
        max: usize,
        /// Actual length.
        got: usize,
    },

    /// Zero or negative revenue.
    #[error("amount must be greater than zero, got {0}")]
    NonPositiveAmount(i64),

    /// Topping count outside 0..=30.
    #[error("{topping} count must be between 0 and 30, got {count}")]
    ToppingOutOfRange {
        /// Offending topping.
        topping: Topping,
        /// Requested count.
        count: u32,
    },

    /// Form input that is not a number.
    #[error("{field} is not a valid number: {input:?}")]
    InvalidNumber {
        /// Field name.
        field: &'static str,
        /// Raw input.
        input: String,
    },
}

/// The builder was handed a well-typed request it cannot encode for the
/// configured contract. A programming or configuration defect, not something
/// the user can fix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// No package id configured for the contract.
    #[error("contract package id is not configured")]
    MissingPackage,

    /// Module or function name is not a valid identifier.
    #[error("invalid {kind} identifier: {value:?}")]
    InvalidIdentifier {
        /// `module` or `function`.
        kind: &'static str,
        /// Offending identifier.
        value: String,
    },

    /// Pure argument over the ledger's size limit.
    #[error("argument {index} is {size} bytes, limit is {limit}")]
    ArgumentTooLarge {
        /// Position of the argument.
        index: usize,
        /// Encoded size.
        size: usize,
        /// Limit.
        limit: usize,
    },
}

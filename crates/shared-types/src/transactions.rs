//! # Transaction Payloads
//!
//! The opaque payload handed to the Ledger Gateway: a list of contract calls
//! with typed arguments. The gateway (wallet + RPC client) turns this into a
//! signed programmable transaction.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entities::ObjectId;

/// Fully qualified contract function (`package::module::function`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallTarget {
    /// Published package id.
    pub package: ObjectId,
    /// Module inside the package.
    pub module: String,
    /// Entry function inside the module.
    pub function: String,
}

impl fmt::Display for CallTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.package, self.module, self.function)
    }
}

/// A pure (by-value) argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum PureValue {
    /// UTF-8 string (`std::string::String`).
    String(String),
    /// `u16`.
    U16(u16),
    /// `u64`.
    U64(u64),
}

impl PureValue {
    /// Size of the serialized argument: ULEB128 length prefix plus bytes for
    /// strings, fixed width for integers.
    pub fn encoded_len(&self) -> usize {
        match self {
            PureValue::String(s) => uleb128_len(s.len()) + s.len(),
            PureValue::U16(_) => 2,
            PureValue::U64(_) => 8,
        }
    }
}

fn uleb128_len(mut value: usize) -> usize {
    let mut len = 1;
    while value >= 0x80 {
        value >>= 7;
        len += 1;
    }
    len
}

/// Argument of a contract call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallArg {
    /// By-value argument.
    Pure(PureValue),
    /// Reference to an existing object, resolved by the gateway.
    Object(ObjectId),
}

/// One contract call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCall {
    /// Function to call.
    pub target: CallTarget,
    /// Positional arguments, in the order the contract declares them.
    pub arguments: Vec<CallArg>,
}

/// Payload submitted to the gateway for signing and execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPayload {
    /// Calls executed in order.
    pub calls: Vec<MoveCall>,
}

impl TransactionPayload {
    /// Payload with exactly one call.
    pub fn single(call: MoveCall) -> Self {
        Self { calls: vec![call] }
    }
}
